//! Core types for Medidesk.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod status;

pub use id::*;
pub use price::{CURRENCY_SCALE, Price, round_currency};
pub use status::*;
