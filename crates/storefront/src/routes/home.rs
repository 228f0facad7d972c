//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use kapdewala_core::catalog;
use tracing::instrument;

use super::views::{NavView, ProductCardView};
use crate::error::add_breadcrumb;
use crate::filters;
use crate::middleware::CurrentShopper;
use crate::shop::ViewKind;

/// Number of products in the "latest drops" row.
const LATEST_DROPS: usize = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: NavView,
    /// Newest products for the drops row.
    pub latest: Vec<ProductCardView>,
}

/// Display the home page.
#[instrument(skip(shopper), fields(shopper_id = %shopper.id))]
pub async fn home(shopper: CurrentShopper) -> impl IntoResponse {
    let mut shop = shopper.handle.lock().await;
    shop.navigate(ViewKind::Home, None);
    add_breadcrumb("navigation", "Viewed home", None);

    HomeTemplate {
        nav: NavView::new(ViewKind::Home, &shop),
        latest: catalog::featured(LATEST_DROPS)
            .iter()
            .map(ProductCardView::from)
            .collect(),
    }
}
