//! Medidesk portal: the listing pages and the order flows built on the
//! catalog engine.
//!
//! Every listing page is a record type implementing [`pages::Listing`]; its
//! fixture data is embedded at compile time and loaded with
//! [`fixtures::load`]. The pharmacy and lab-test pages also implement
//! [`checkout::Orderable`] so a cart of them can be turned into an
//! [`checkout::OrderDraft`] and submitted through an
//! [`checkout::OrderGateway`].
//!
//! # Modules
//!
//! - [`pages`] - one record type per listing page
//! - [`fixtures`] - embedded page data
//! - [`checkout`] - cart-to-order flow, gateways and confirmation notices
//! - [`config`] - environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod fixtures;
pub mod pages;

pub use config::{ConfigError, GatewayKind, PortalConfig};
pub use fixtures::FixtureError;
pub use pages::{CatalogKind, Listing};
