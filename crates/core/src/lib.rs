//! Medidesk Core - Shared types and the catalog engine.
//!
//! This crate provides the pieces every Medidesk listing page is built from:
//! - `portal` - Role-scoped listing pages, fixtures and checkout
//! - `cli` - Command-line access to catalogs, carts and orders
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure functions - no I/O, no
//! HTTP clients, no clocks. Every operation takes plain values and returns
//! freshly computed values, so it can be called from any render loop.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices and status enums
//! - [`catalog`] - Search, category filters, sorting, cart and order totals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod types;

pub use catalog::*;
pub use types::*;
