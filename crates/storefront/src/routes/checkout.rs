//! Checkout summary route handler.
//!
//! Read-only: lists cart lines and totals. "Pay Now" is not wired to any
//! payment provider.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use kapdewala_core::Price;
use tracing::instrument;

use super::views::{CartLineView, NavView};
use crate::error::add_breadcrumb;
use crate::filters;
use crate::middleware::CurrentShopper;
use crate::shop::ViewKind;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub nav: NavView,
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
}

/// Display the checkout summary.
#[instrument(skip(shopper), fields(shopper_id = %shopper.id))]
pub async fn show(shopper: CurrentShopper) -> impl IntoResponse {
    let mut shop = shopper.handle.lock().await;
    shop.navigate(ViewKind::Checkout, None);
    add_breadcrumb("navigation", "Viewed checkout", None);

    let cart = shop.cart();
    let subtotal = cart.subtotal();
    let shipping = Price::ZERO;

    CheckoutTemplate {
        nav: NavView::new(ViewKind::Checkout, &shop),
        lines: cart.entries().iter().map(CartLineView::from).collect(),
        subtotal: subtotal.to_string(),
        shipping: shipping.to_string(),
        total: (subtotal + shipping).to_string(),
    }
}
