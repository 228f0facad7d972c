//! Product route handlers.
//!
//! The collection grid and the product view. Opening a product selects it;
//! `/product` re-opens the selection.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query},
    response::{IntoResponse, Redirect, Response},
};
use kapdewala_core::{Product, catalog};
use serde::Deserialize;
use tracing::instrument;

use super::views::{AdviceView, NavView, ProductCardView, ProductDetailView};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CurrentShopper;
use crate::shop::{ShopSession, ViewKind};

/// Number of "complete the look" products on the product view.
const RELATED_PRODUCTS: usize = 3;

/// Collection filter query parameters.
#[derive(Debug, Deserialize)]
pub struct ShopQuery {
    pub category: Option<String>,
}

/// A category filter chip.
#[derive(Clone)]
pub struct CategoryChip {
    pub label: String,
    pub active: bool,
}

/// Collection grid template.
#[derive(Template, WebTemplate)]
#[template(path = "shop.html")]
pub struct ShopTemplate {
    pub nav: NavView,
    pub products: Vec<ProductCardView>,
    pub categories: Vec<CategoryChip>,
    /// Active filter, if any.
    pub category: Option<String>,
}

/// Product view template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub nav: NavView,
    pub product: ProductDetailView,
    pub related_products: Vec<ProductCardView>,
    pub advice: AdviceView,
}

impl ProductShowTemplate {
    fn new(product: &Product, shop: &ShopSession) -> Self {
        Self {
            nav: NavView::new(ViewKind::ProductView, shop),
            product: ProductDetailView::from(product),
            related_products: catalog::related(&product.id, RELATED_PRODUCTS)
                .into_iter()
                .map(ProductCardView::from)
                .collect(),
            advice: AdviceView::from(shop.advice()),
        }
    }
}

/// Display the collection grid, optionally filtered by category.
#[instrument(skip(shopper), fields(shopper_id = %shopper.id))]
pub async fn index(shopper: CurrentShopper, Query(query): Query<ShopQuery>) -> impl IntoResponse {
    let category = query
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let products: Vec<ProductCardView> = match &category {
        Some(category) => catalog::in_category(category)
            .into_iter()
            .map(ProductCardView::from)
            .collect(),
        None => catalog::all().iter().map(ProductCardView::from).collect(),
    };

    let categories = catalog::categories()
        .into_iter()
        .map(|label| CategoryChip {
            active: category
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(label)),
            label: label.to_string(),
        })
        .collect();

    let mut shop = shopper.handle.lock().await;
    shop.navigate(ViewKind::Shop, None);
    match category.as_deref() {
        Some(c) => add_breadcrumb("navigation", "Viewed shop", Some(&[("category", c)])),
        None => add_breadcrumb("navigation", "Viewed shop", None),
    }

    ShopTemplate {
        nav: NavView::new(ViewKind::Shop, &shop),
        products,
        categories,
        category,
    }
}

/// Display the product view for `id`.
///
/// # Errors
///
/// Returns `NotFound` for an unknown product id.
#[instrument(skip(shopper), fields(shopper_id = %shopper.id))]
pub async fn show(shopper: CurrentShopper, Path(id): Path<String>) -> Result<impl IntoResponse> {
    let product = catalog::find(&id).ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let mut shop = shopper.handle.lock().await;
    shop.navigate(ViewKind::ProductView, Some(product));
    add_breadcrumb("navigation", "Viewed product", Some(&[("product_id", id.as_str())]));

    Ok(ProductShowTemplate::new(product, &shop))
}

/// Re-open the selected product, or fall back to the shop grid.
#[instrument(skip(shopper), fields(shopper_id = %shopper.id))]
pub async fn reopen(shopper: CurrentShopper) -> Response {
    let mut shop = shopper.handle.lock().await;
    let nav = shop.navigate(ViewKind::ProductView, None);

    match shop.router().shown_product() {
        Some(product) if !nav.fell_back => {
            ProductShowTemplate::new(product, &shop).into_response()
        }
        _ => Redirect::to("/shop").into_response(),
    }
}
