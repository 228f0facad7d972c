//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with a `request_id` field)
//! 3. Request ID (fill the span field, tag Sentry, echo header)
//! 4. Security headers (CSP, frame and isolation policies)
//! 5. Session layer (tower-sessions over a bounded moka store)
//!
//! [`CurrentShopper`] is an extractor rather than a layer: static files and
//! the health check never create a shopper.

pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod session_store;
pub mod shopper;

pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
pub use session_store::MokaSessionStore;
pub use shopper::CurrentShopper;
