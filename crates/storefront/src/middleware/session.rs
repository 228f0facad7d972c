//! Session middleware configuration.
//!
//! Sets up bounded in-memory sessions using tower-sessions. The session only holds
//! the anonymous shopper id; shopper state lives in the
//! [`ShopperStore`](crate::shop::ShopperStore).

use std::time::Duration;

use tower_sessions::{Expiry, SessionManagerLayer};

use super::session_store::{DEFAULT_MAX_SESSIONS, MokaSessionStore};
use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "kk_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Session inactivity expiry.
#[allow(clippy::cast_sign_loss)] // positive constant
pub const SESSION_EXPIRY: Duration = Duration::from_secs(SESSION_EXPIRY_SECONDS as u64);

/// Create the session layer with a bounded in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MokaSessionStore> {
    SessionManagerLayer::new(MokaSessionStore::new(DEFAULT_MAX_SESSIONS, SESSION_EXPIRY))
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.secure_cookies())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
