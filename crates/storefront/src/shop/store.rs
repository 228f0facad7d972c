//! In-memory shopper store.
//!
//! Maps shopper ids (kept in the session cookie) to their [`ShopSession`].
//! Entries idle longer than the session lifetime are evicted.

use std::sync::Arc;
use std::time::Duration;

use kapdewala_core::ShopperId;
use moka::future::Cache;
use tokio::sync::Mutex;

use super::ShopSession;

/// Shared, lockable state of one shopper.
pub type ShopperHandle = Arc<Mutex<ShopSession>>;

/// Default upper bound on concurrently tracked shoppers.
const DEFAULT_MAX_SHOPPERS: u64 = 100_000;

/// Server-side store of shopper state.
#[derive(Clone)]
pub struct ShopperStore {
    cache: Cache<ShopperId, ShopperHandle>,
}

impl ShopperStore {
    /// Create a store that forgets shoppers after `idle` without activity.
    #[must_use]
    pub fn new(idle: Duration) -> Self {
        Self::with_capacity(idle, DEFAULT_MAX_SHOPPERS)
    }

    /// Create a store with an explicit capacity.
    #[must_use]
    pub fn with_capacity(idle: Duration, max_shoppers: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_shoppers)
            .time_to_idle(idle)
            .build();
        Self { cache }
    }

    /// Get the state for `id`, creating an empty one on first use.
    pub async fn get_or_create(&self, id: ShopperId) -> ShopperHandle {
        self.cache
            .get_with(id, async move {
                tracing::debug!(shopper_id = %id, "new shopper");
                Arc::new(Mutex::new(ShopSession::default()))
            })
            .await
    }
}
