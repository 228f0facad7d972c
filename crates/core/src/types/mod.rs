//! Core types for the storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod size;

pub use id::{ProductId, ShopperId};
pub use price::Price;
pub use product::Product;
pub use size::{Size, SizeError};
