//! Anonymous shopper extractor.
//!
//! Every visitor gets a [`ShopperId`] stored in their session on first
//! contact. The extractor resolves it to the shopper's state handle.

use axum::{extract::FromRequestParts, http::request::Parts};
use kapdewala_core::ShopperId;
use tower_sessions::Session;

use crate::error::{AppError, set_sentry_shopper};
use crate::models::session_keys;
use crate::shop::ShopperHandle;
use crate::state::AppState;

/// Extractor for the current shopper.
///
/// Creates the shopper on first use, so it never rejects a request that
/// passed through the session layer.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(shopper: CurrentShopper) -> impl IntoResponse {
///     let count = shopper.handle.lock().await.cart().total_count();
///     format!("{count} items")
/// }
/// ```
pub struct CurrentShopper {
    /// The shopper's id.
    pub id: ShopperId,
    /// The shopper's state.
    pub handle: ShopperHandle,
}

impl FromRequestParts<AppState> for CurrentShopper {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;

        let id = shopper_id(session).await?;
        set_sentry_shopper(&id);

        let handle = state.shoppers().get_or_create(id).await;
        Ok(Self { id, handle })
    }
}

/// Read the shopper id from the session, assigning a new one if absent.
async fn shopper_id(session: &Session) -> Result<ShopperId, tower_sessions::session::Error> {
    if let Some(id) = session.get::<ShopperId>(session_keys::SHOPPER_ID).await? {
        return Ok(id);
    }

    let id = ShopperId::generate();
    session.insert(session_keys::SHOPPER_ID, id).await?;
    tracing::debug!(shopper_id = %id, "assigned shopper id");
    Ok(id)
}
