//! Response hardening headers.
//!
//! Every response gets the same frame, sniffing, referrer and isolation
//! policy. Rendered pages carry shopper-specific state (the cart badge, the
//! advice panel) and are never cached; files under `/static` may be.

use axum::{
    extract::Request,
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

/// Content Security Policy for storefront pages.
///
/// Catalog images come from picsum.photos (which redirects to its fastly
/// host) and HTMX is loaded from unpkg. Nothing else leaves the origin.
pub const CONTENT_SECURITY_POLICY_VALUE: &str = concat!(
    "default-src 'none'; ",
    "script-src 'self' https://unpkg.com; ",
    "style-src 'self'; ",
    "img-src 'self' https://picsum.photos https://fastly.picsum.photos; ",
    "connect-src 'self'; ",
    "object-src 'none'; ",
    "base-uri 'self'; ",
    "form-action 'self'; ",
    "frame-ancestors 'none'",
);

const PERMISSIONS_POLICY: &str = concat!(
    "camera=(), microphone=(), geolocation=(), payment=(), usb=(), ",
    "browsing-topics=(), interest-cohort=()",
);

/// Headers applied to every response, as `(name, value)` pairs.
const ALWAYS: [(&str, &str); 5] = [
    ("permissions-policy", PERMISSIONS_POLICY),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    // picsum.photos sends no CORP header, so require-corp would block it.
    ("cross-origin-embedder-policy", "credentialless"),
    ("x-dns-prefetch-control", "off"),
];

const PAGE_CACHE: &str = "no-store, max-age=0";
const STATIC_CACHE: &str = "public, max-age=3600";

/// Add security headers to all responses.
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let is_static = request.uri().path().starts_with("/static/");
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("no-referrer"));
    headers.insert(
        CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CONTENT_SECURITY_POLICY_VALUE),
    );

    for (name, value) in ALWAYS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static(if is_static { STATIC_CACHE } else { PAGE_CACHE }),
    );

    response
}
