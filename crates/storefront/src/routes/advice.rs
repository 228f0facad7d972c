//! Styling advice route handlers (HTMX fragments).
//!
//! `POST` starts a fetch for the product being viewed and waits for it.
//! A second `POST` while one is running gets the loading fragment, which
//! polls `GET` until the advice is ready.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use kapdewala_core::{ProductId, catalog};
use tracing::instrument;

use super::views::AdviceView;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::CurrentShopper;
use crate::shop::{AdviceOutcome, AdviceRefusal};
use crate::state::AppState;

/// Advice panel fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/advice.html")]
pub struct AdviceTemplate {
    pub product_id: String,
    pub advice: AdviceView,
}

/// Current state of the advice panel for `id`.
///
/// Shows the idle button unless the shopper is viewing this product.
#[instrument(skip(shopper), fields(shopper_id = %shopper.id))]
pub async fn show(shopper: CurrentShopper, Path(id): Path<String>) -> impl IntoResponse {
    let product_id = ProductId::new(id);
    let shop = shopper.handle.lock().await;

    let advice = if shop.router().current().shows(&product_id) {
        AdviceView::from(shop.advice())
    } else {
        AdviceView::Idle
    };

    AdviceTemplate {
        product_id: product_id.to_string(),
        advice,
    }
}

/// Fetch styling advice for the product being viewed.
///
/// # Errors
///
/// Returns `NotFound` for an unknown product and `Conflict` when the shopper
/// is not viewing it.
#[instrument(skip(state, shopper), fields(shopper_id = %shopper.id))]
pub async fn fetch(
    State(state): State<AppState>,
    shopper: CurrentShopper,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let product = catalog::find(&id).ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let ticket = {
        let mut shop = shopper.handle.lock().await;
        match shop.begin_advice(&product.id) {
            Ok(ticket) => ticket,
            Err(AdviceRefusal::NotViewing(_)) => {
                return Err(AppError::Conflict(format!(
                    "not viewing product {}",
                    product.id
                )));
            }
            Err(AdviceRefusal::InFlight | AdviceRefusal::AlreadyAdvised) => {
                return Ok(AdviceTemplate {
                    product_id: id,
                    advice: AdviceView::from(shop.advice()),
                });
            }
        }
    };
    add_breadcrumb("stylist", "Requested advice", Some(&[("product_id", id.as_str())]));

    // The spawned task owns the fetch, so it completes even if this request
    // is dropped.
    let outcome = state
        .stylist()
        .spawn_advice(shopper.handle.clone(), ticket, product.clone())
        .await
        .map_err(|e| AppError::Internal(format!("advice task failed: {e}")))?;

    let shop = shopper.handle.lock().await;
    let advice = match outcome {
        AdviceOutcome::Applied => AdviceView::from(shop.advice()),
        AdviceOutcome::Discarded => AdviceView::Idle,
    };

    Ok(AdviceTemplate {
        product_id: id,
        advice,
    })
}
