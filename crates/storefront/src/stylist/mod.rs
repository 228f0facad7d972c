//! AI styling advice.
//!
//! [`Stylist::advise`] never fails: every error collapses into
//! [`FALLBACK_ADVICE`]. [`Stylist::spawn_advice`] runs a fetch detached from
//! the request and writes the result back into the shopper's advice slot.

pub mod client;
pub mod error;
pub mod types;

pub use client::StylistClient;
pub use error::StylistError;

use std::time::Duration;

use kapdewala_core::Product;
use tokio::task::JoinHandle;
use tracing::instrument;

use crate::config::StylistConfig;
use crate::shop::{AdviceOutcome, AdviceTicket, ShopperHandle};

/// Returned when the model answers with no text.
pub const EMPTY_ADVICE: &str = "Pair with confidence and heavy boots.";

/// Returned on any failure.
pub const FALLBACK_ADVICE: &str =
    "Style this piece with raw denim and chunky leather boots for an effortless industrial look.";

/// Base delay between attempts; grows linearly with the attempt number.
const RETRY_BACKOFF: Duration = Duration::from_millis(100);

/// Build the stylist instruction for `product`.
#[must_use]
pub fn build_prompt(product: &Product) -> String {
    format!(
        "You are a high-end avant-garde fashion stylist for a brutalist streetwear brand \
called \"Kaabil KapdeWala\".\n\
The user is looking at this product: {name}.\n\
Description: {description}\n\
Tags: {tags}\n\n\
Provide a short, punchy, and edgy styling tip (max 3 sentences).\n\
Suggest what to pair it with (shoes, accessories, bottoms) to create a cohesive \
\"archive fashion\" look.\n\
Do not be overly enthusiastic. Be cool, minimal, and authoritative.",
        name = product.name,
        description = product.description,
        tags = product.tag_line(),
    )
}

/// Styling advice service.
///
/// Cheap to clone. Without a usable credential every call returns the
/// fallback without touching the network.
#[derive(Clone)]
pub struct Stylist {
    client: Option<StylistClient>,
    timeout: Option<Duration>,
    max_retries: u32,
}

impl Stylist {
    /// Create the service from configuration.
    #[must_use]
    pub fn new(config: &StylistConfig) -> Self {
        let client = match StylistClient::new(config) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!(error = %e, "stylist disabled, advice will use the fallback");
                None
            }
        };

        Self {
            client,
            timeout: config.timeout,
            max_retries: config.max_retries,
        }
    }

    /// Whether a client is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Get styling advice for `product`.
    ///
    /// Returns the generated text trimmed, [`EMPTY_ADVICE`] if it is empty,
    /// or [`FALLBACK_ADVICE`] if the call failed.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn advise(&self, product: &Product) -> String {
        match self.try_advise(product).await {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    EMPTY_ADVICE.to_string()
                } else {
                    text.to_string()
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "styling advice failed, using fallback");
                FALLBACK_ADVICE.to_string()
            }
        }
    }

    async fn try_advise(&self, product: &Product) -> Result<String, StylistError> {
        let client = self.client.as_ref().ok_or(StylistError::MissingCredential)?;
        let prompt = build_prompt(product);

        let mut attempt = 0;
        loop {
            match self.attempt(client, prompt.clone()).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::info!(error = %e, attempt, "retrying styling advice");
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn attempt(&self, client: &StylistClient, prompt: String) -> Result<String, StylistError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, client.generate(prompt))
                .await
                .map_err(|_| {
                    StylistError::Timeout(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX))
                })?,
            None => client.generate(prompt).await,
        }
    }

    /// Fetch advice on a background task and store it in `shopper`'s slot.
    ///
    /// The shopper lock is only taken after the call returns. The result is
    /// discarded if the shopper navigated away in the meantime.
    pub fn spawn_advice(
        &self,
        shopper: ShopperHandle,
        ticket: AdviceTicket,
        product: Product,
    ) -> JoinHandle<AdviceOutcome> {
        let stylist = self.clone();
        tokio::spawn(async move {
            let text = stylist.advise(&product).await;
            shopper.lock().await.complete_advice(&ticket, text)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::shop::{AdviceSlot, ShopSession, ViewKind};
    use kapdewala_core::{ProductId, catalog};
    use secrecy::SecretString;
    use tokio::sync::Mutex;
    use url::Url;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base: &str, timeout: Option<Duration>, max_retries: u32) -> StylistConfig {
        StylistConfig {
            api_key: Some(SecretString::from("test-key".to_string())),
            model: "gemini-test".to_string(),
            api_base: Url::parse(base).unwrap(),
            timeout,
            max_retries,
        }
    }

    fn text_body(text: &str) -> serde_json::Value {
        serde_json::json!({"candidates": [{"content": {"parts": [{"text": text}]}}]})
    }

    fn jacket() -> &'static Product {
        catalog::find("p1").unwrap()
    }

    #[test]
    fn test_prompt_mentions_product() {
        let prompt = build_prompt(jacket());
        assert!(prompt.contains(&jacket().name));
        assert!(prompt.contains(&jacket().description));
        assert!(prompt.contains(&jacket().tag_line()));
        assert!(prompt.contains("max 3 sentences"));
    }

    #[tokio::test]
    async fn test_advise_trims_generated_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body("\n  Wear it open.  \n")))
            .mount(&server)
            .await;

        let stylist = Stylist::new(&config(&server.uri(), None, 0));
        assert_eq!(stylist.advise(jacket()).await, "Wear it open.");
    }

    #[tokio::test]
    async fn test_advise_empty_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body("   ")))
            .mount(&server)
            .await;

        let stylist = Stylist::new(&config(&server.uri(), None, 0));
        assert_eq!(stylist.advise(jacket()).await, EMPTY_ADVICE);
    }

    #[tokio::test]
    async fn test_advise_server_error_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let stylist = Stylist::new(&config(&server.uri(), None, 0));
        assert_eq!(stylist.advise(jacket()).await, FALLBACK_ADVICE);
    }

    #[tokio::test]
    async fn test_advise_retries_up_to_limit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let stylist = Stylist::new(&config(&server.uri(), None, 2));
        assert_eq!(stylist.advise(jacket()).await, FALLBACK_ADVICE);
    }

    #[tokio::test]
    async fn test_advise_does_not_retry_client_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&server)
            .await;

        let stylist = Stylist::new(&config(&server.uri(), None, 3));
        assert_eq!(stylist.advise(jacket()).await, FALLBACK_ADVICE);
    }

    #[tokio::test]
    async fn test_advise_recovers_on_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body("Cuff the sleeves.")))
            .mount(&server)
            .await;

        let stylist = Stylist::new(&config(&server.uri(), None, 1));
        assert_eq!(stylist.advise(jacket()).await, "Cuff the sleeves.");
    }

    #[tokio::test]
    async fn test_advise_timeout_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(text_body("too late"))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let stylist = Stylist::new(&config(&server.uri(), Some(Duration::from_millis(50)), 0));
        assert_eq!(stylist.advise(jacket()).await, FALLBACK_ADVICE);
    }

    #[tokio::test]
    async fn test_advise_without_key_falls_back() {
        let mut cfg = config("http://127.0.0.1:9", None, 0);
        cfg.api_key = None;
        let stylist = Stylist::new(&cfg);

        assert!(!stylist.is_enabled());
        assert_eq!(stylist.advise(jacket()).await, FALLBACK_ADVICE);
    }

    #[tokio::test]
    async fn test_spawn_advice_fills_slot() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body("Go tonal.")))
            .mount(&server)
            .await;
        let stylist = Stylist::new(&config(&server.uri(), None, 0));

        let shopper = Arc::new(Mutex::new(ShopSession::default()));
        let ticket = {
            let mut shop = shopper.lock().await;
            shop.navigate(ViewKind::ProductView, Some(jacket()));
            shop.begin_advice(&ProductId::new("p1")).unwrap()
        };

        let outcome = stylist
            .spawn_advice(shopper.clone(), ticket, jacket().clone())
            .await
            .unwrap();

        assert_eq!(outcome, AdviceOutcome::Applied);
        assert_eq!(
            shopper.lock().await.advice(),
            &AdviceSlot::Ready("Go tonal.".to_string())
        );
    }
}
