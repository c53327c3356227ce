use crate::client::{DetectorClient, ProductDescriptor};
use crate::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Input parameters for the product filter tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FilterInput {
    /// List of products to filter; each entry needs at least a URL
    pub products: Vec<ProductDescriptor>,
}

/// Tool that forwards a product list to the detection service and returns
/// the Stripe-enabled subset.
///
/// The remote response is passed through verbatim. On any failure the tool
/// returns `{ "products": [], "error": <message> }` instead of propagating
/// an error, so callers always receive a well-formed object.
#[derive(Debug, Clone)]
pub struct FilterProductsTool {
    client: Arc<DetectorClient>,
}

impl FilterProductsTool {
    pub const NAME: &'static str = "filter_products";
    pub const DESCRIPTION: &'static str =
        "Filter a list of products to only those using Stripe for payments";

    /// Create a new filter tool
    pub fn new(client: Arc<DetectorClient>) -> Self {
        info!("Initializing product filter tool");
        Self { client }
    }

    /// Run the filter, absorbing every failure into the fallback payload
    #[instrument(skip(self, input), fields(count = input.products.len()))]
    pub async fn run(&self, input: FilterInput) -> serde_json::Value {
        match self.try_run(&input).await {
            Ok(body) => body,
            Err(e) => {
                warn!(kind = ?e.transport_kind(), "Product filter call failed: {e}");
                Self::fallback(&e.to_string())
            }
        }
    }

    async fn try_run(&self, input: &FilterInput) -> Result<serde_json::Value> {
        self.client.filter_products(&input.products).await
    }

    /// Safe-default payload returned when the remote call fails
    #[must_use]
    pub fn fallback(error: &str) -> serde_json::Value {
        serde_json::json!({
            "products": [],
            "error": error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool_for(uri: &str) -> FilterProductsTool {
        let mut config = Config::default();
        config.detector.base_url = uri.to_string();
        config.detector.timeout_secs = 2;
        FilterProductsTool::new(Arc::new(DetectorClient::new(&config).unwrap()))
    }

    #[tokio::test]
    async fn test_remote_response_passed_through_unchanged() {
        let mock_server = MockServer::start().await;
        let remote_body = serde_json::json!({
            "products": [{"url": "http://a.com", "name": "A", "stripe_info": {"confidence": 0.9}}]
        });
        Mock::given(method("POST"))
            .and(path("/api/filter-products"))
            .and(body_json(
                &serde_json::json!({"products": [{"url": "http://a.com", "name": "A"}]}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(&remote_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tool = tool_for(&mock_server.uri());
        let input = FilterInput {
            products: vec![ProductDescriptor::new("http://a.com").with_name("A")],
        };
        assert_eq!(tool.run(input).await, remote_body);
    }

    #[tokio::test]
    async fn test_failure_yields_fallback_payload() {
        // Nothing listens here, so the call fails at the transport layer
        let tool = tool_for("http://127.0.0.1:1");
        let result = tool
            .run(FilterInput {
                products: vec![ProductDescriptor::new("http://a.com")],
            })
            .await;

        assert_eq!(result["products"], serde_json::json!([]));
        let message = result["error"].as_str().unwrap();
        assert!(!message.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_yields_fallback_payload() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/filter-products"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let tool = tool_for(&mock_server.uri());
        let result = tool.run(FilterInput { products: vec![] }).await;
        assert_eq!(result["products"], serde_json::json!([]));
        assert!(result["error"].as_str().unwrap().contains("503"));
    }

    #[test]
    fn test_fallback_shape() {
        let payload = FilterProductsTool::fallback("boom");
        assert_eq!(
            payload,
            serde_json::json!({"products": [], "error": "boom"})
        );
    }

    #[test]
    fn test_input_schema_requires_products() {
        let schema = serde_json::to_value(schemars::schema_for!(FilterInput)).unwrap();
        let required = schema["required"].as_array().unwrap();
        assert!(required.contains(&serde_json::json!("products")));
    }
}
