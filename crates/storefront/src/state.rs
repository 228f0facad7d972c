//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::middleware::session::SESSION_EXPIRY;
use crate::shop::ShopperStore;
use crate::stylist::Stylist;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the shopper store, the stylist and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    shoppers: ShopperStore,
    stylist: Stylist,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Shopper state is forgotten after the same period of inactivity as
    /// the session cookie.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let stylist = Stylist::new(&config.stylist);
        if stylist.is_enabled() {
            tracing::info!(model = %config.stylist.model, "stylist enabled");
        }

        Self {
            inner: Arc::new(AppStateInner {
                shoppers: ShopperStore::new(SESSION_EXPIRY),
                stylist,
                config,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the shopper store.
    #[must_use]
    pub fn shoppers(&self) -> &ShopperStore {
        &self.inner.shoppers
    }

    /// Get a reference to the styling advice service.
    #[must_use]
    pub fn stylist(&self) -> &Stylist {
        &self.inner.stylist
    }
}
