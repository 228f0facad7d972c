//! Session-related types.
//!
//! Keys for values stored in the session.

/// Session keys for shopper data.
pub mod keys {
    /// Key for the anonymous shopper id.
    pub const SHOPPER_ID: &str = "shopper_id";
}
