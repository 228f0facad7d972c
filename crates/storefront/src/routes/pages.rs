//! Static content page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tracing::instrument;

use super::views::NavView;
use crate::error::add_breadcrumb;
use crate::filters;
use crate::middleware::CurrentShopper;
use crate::shop::ViewKind;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub nav: NavView,
}

/// Display the About page.
#[instrument(skip(shopper), fields(shopper_id = %shopper.id))]
pub async fn about(shopper: CurrentShopper) -> impl IntoResponse {
    let mut shop = shopper.handle.lock().await;
    shop.navigate(ViewKind::About, None);
    add_breadcrumb("navigation", "Viewed about", None);

    AboutTemplate {
        nav: NavView::new(ViewKind::About, &shop),
    }
}
