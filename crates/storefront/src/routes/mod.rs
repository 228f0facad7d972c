//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page (hero + latest drops)
//! GET  /health                  - Health check
//!
//! # Products
//! GET  /shop[?category=]        - Collection grid
//! GET  /products/{id}           - Product view
//! GET  /product                 - Re-open the selected product (or redirect to /shop)
//!
//! # Styling advice (HTMX fragments)
//! GET  /products/{id}/advice    - Advice panel (polled while loading)
//! POST /products/{id}/advice    - Fetch advice
//!
//! # Cart (HTMX fragments)
//! POST /cart/add                - Add to cart (returns count, triggers cart-updated)
//! GET  /cart/count              - Cart count badge
//!
//! # Pages
//! GET  /checkout                - Checkout summary
//! GET  /about                   - About page
//! ```

pub mod advice;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod pages;
pub mod products;
pub mod views;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(products::show))
        .route("/{id}/advice", get(advice::show).post(advice::fetch))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/shop", get(products::index))
        .route("/product", get(products::reopen))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show))
        .route("/about", get(pages::about))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, Response, StatusCode, header},
    };
    use tower::ServiceExt;

    use crate::config::StorefrontConfig;
    use crate::state::AppState;
    use crate::stylist::FALLBACK_ADVICE;

    fn app() -> axum::Router {
        crate::app(AppState::new(StorefrontConfig::default()))
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn session_cookie(response: &Response<Body>) -> String {
        let value = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("session cookie")
            .to_str()
            .unwrap();
        value.split(';').next().unwrap().to_string()
    }

    async fn body_text(response: Response<Body>) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app().oneshot(get("/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn test_home_starts_session() {
        let response = app().oneshot(get("/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(session_cookie(&response).starts_with("kk_session="));

        let body = body_text(response).await;
        assert!(body.contains("Latest Drops"));
        assert!(body.contains("/products/p1"));
    }

    #[tokio::test]
    async fn test_shop_category_filter() {
        let response = app()
            .oneshot(get("/shop?category=jackets", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("href=\"/products/p1\""));
        assert!(body.contains("href=\"/products/p4\""));
        assert!(!body.contains("href=\"/products/p2\""));
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let response = app().oneshot(get("/products/p99", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reopen_without_selection_redirects_to_shop() {
        let response = app().oneshot(get("/product", None)).await.unwrap();
        assert!(response.status().is_redirection());
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/shop");
    }

    #[tokio::test]
    async fn test_reopen_shows_selected_product() {
        let app = app();
        let response = app.clone().oneshot(get("/products/p3", None)).await.unwrap();
        let cookie = session_cookie(&response);

        app.clone().oneshot(get("/about", Some(&cookie))).await.unwrap();
        let response = app.oneshot(get("/product", Some(&cookie))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("/products/p3/advice"));
    }

    #[tokio::test]
    async fn test_add_without_size_is_rejected() {
        let app = app();
        let response = app
            .clone()
            .oneshot(post_form("/cart/add", "product_id=p1", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let cookie = session_cookie(&response);
        assert!(body_text(response).await.contains("Please select a size"));

        let response = app.oneshot(get("/cart/count", Some(&cookie))).await.unwrap();
        assert!(body_text(response).await.contains(">0<"));
    }

    #[tokio::test]
    async fn test_add_with_size_updates_badge() {
        let response = app()
            .oneshot(post_form("/cart/add", "product_id=p1&size=M", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("HX-Trigger").unwrap(), "cart-updated");
        let body = body_text(response).await;
        assert!(body.contains(">1<"));
        assert!(body.contains(r#"<div id="cart-alert" role="alert" hx-swap-oob="true"></div>"#));
    }

    #[tokio::test]
    async fn test_add_after_missing_size_clears_alert() {
        let app = app();
        let response = app
            .clone()
            .oneshot(post_form("/cart/add", "product_id=p2", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let cookie = session_cookie(&response);

        let response = app
            .oneshot(post_form("/cart/add", "product_id=p2&size=S", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("hx-swap-oob"));
        assert!(!body.contains("Please select a size"));
    }

    #[tokio::test]
    async fn test_add_with_malformed_form_is_bad_request() {
        let app = app();
        let response = app
            .clone()
            .oneshot(post_form("/cart/add", "size=M", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(post_form("/cart/add", "product_id=p1&size=M&size=L", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_add_rejects_unknown_size_and_product() {
        let app = app();
        let response = app
            .clone()
            .oneshot(post_form("/cart/add", "product_id=p1&size=XXL", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(post_form("/cart/add", "product_id=nope&size=M", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_checkout_lists_cart() {
        let app = app();
        let response = app
            .clone()
            .oneshot(post_form("/cart/add", "product_id=p1&size=M", None))
            .await
            .unwrap();
        let cookie = session_cookie(&response);

        let response = app.oneshot(get("/checkout", Some(&cookie))).await.unwrap();
        let body = body_text(response).await;
        assert!(body.contains("$245.00"));
        assert!(body.contains("$0.00"));
        assert!(!body.contains("Your cart is empty."));
    }

    #[tokio::test]
    async fn test_checkout_empty_cart() {
        let response = app().oneshot(get("/checkout", None)).await.unwrap();
        assert!(body_text(response).await.contains("Your cart is empty."));
    }

    #[tokio::test]
    async fn test_advice_without_key_returns_fallback() {
        let app = app();
        let response = app.clone().oneshot(get("/products/p1", None)).await.unwrap();
        let cookie = session_cookie(&response);

        let response = app
            .oneshot(post_form("/products/p1/advice", "", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(FALLBACK_ADVICE));
    }

    #[tokio::test]
    async fn test_advice_requires_viewing_product() {
        let app = app();
        let response = app.clone().oneshot(get("/products/p1", None)).await.unwrap();
        let cookie = session_cookie(&response);

        let response = app
            .oneshot(post_form("/products/p2/advice", "", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
