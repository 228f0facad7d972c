//! Kaabil KapdeWala Core - Shared types library.
//!
//! This crate provides the domain types used by the storefront:
//! - [`types`] - Newtype wrappers for ids, prices, sizes and the product model
//! - [`catalog`] - The static, compiled-in product catalog
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no session handling. The storefront crate owns all of that.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod types;

pub use types::*;
