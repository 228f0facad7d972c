//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! A successful add returns the badge fragment, an out-of-band swap that
//! clears any size alert, and an `HX-Trigger` so the navbar badge refreshes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use kapdewala_core::{Size, SizeError, catalog};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::CurrentShopper;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub size: Option<String>,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: usize,
}

/// Response to a successful add: the badge plus an emptied alert region.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_added.html")]
pub struct CartAddedTemplate {
    pub count: usize,
}

/// Blocking alert fragment shown when no size was picked.
#[derive(Template, WebTemplate)]
#[template(path = "partials/size_alert.html")]
pub struct SizeAlertTemplate;

/// Add item to cart (HTMX).
///
/// A missing size answers 422 with an alert retargeted at `#cart-alert` and
/// leaves the cart untouched.
///
/// # Errors
///
/// Returns `BadRequest` for a malformed form, an unknown product or size.
#[instrument(skip_all, fields(shopper_id = %shopper.id))]
pub async fn add(
    shopper: CurrentShopper,
    form: std::result::Result<Form<AddToCartForm>, FormRejection>,
) -> Result<Response> {
    let Form(form) = form.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let product = catalog::find(&form.product_id)
        .ok_or_else(|| AppError::BadRequest(format!("unknown product '{}'", form.product_id)))?;

    let size = match Size::from_form(form.size.as_deref()) {
        Ok(size) => size,
        Err(SizeError::Missing) => {
            tracing::debug!(product_id = %product.id, "add to cart without size");
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                AppendHeaders([("HX-Retarget", "#cart-alert"), ("HX-Reswap", "innerHTML")]),
                SizeAlertTemplate,
            )
                .into_response());
        }
        Err(e @ SizeError::Unknown(_)) => return Err(AppError::BadRequest(e.to_string())),
    };

    let count = shopper.handle.lock().await.add_item(product, size);
    add_breadcrumb(
        "cart",
        "Added item",
        Some(&[("product_id", product.id.as_str()), ("size", size.label())]),
    );

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartAddedTemplate { count },
    )
        .into_response())
}

/// Get cart count badge (HTMX).
#[instrument(skip(shopper), fields(shopper_id = %shopper.id))]
pub async fn count(shopper: CurrentShopper) -> impl IntoResponse {
    let count = shopper.handle.lock().await.cart().total_count();
    CartCountTemplate { count }
}
