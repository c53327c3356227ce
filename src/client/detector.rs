use crate::client::ProductDescriptor;
use crate::{Config, Error, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Endpoint for filtering a product list down to Stripe-enabled entries
pub const FILTER_PRODUCTS_ENDPOINT: &str = "/api/filter-products";

/// Endpoint for checking a single URL for Stripe integration
pub const VALIDATE_URL_ENDPOINT: &str = "/api/validate-url";

/// Wire body for `POST /api/filter-products`
#[derive(Debug, Serialize)]
struct FilterRequest<'a> {
    products: &'a [ProductDescriptor],
}

/// Wire body for `POST /api/validate-url`
#[derive(Debug, Serialize)]
struct DetectionRequest<'a> {
    url: &'a str,
}

/// HTTP client for the Stripe detection service.
///
/// Each operation is a single best-effort POST: no retries, no caching.
/// The response body is passed through verbatim as JSON; its schema is
/// owned by the detection service, not validated here.
#[derive(Debug, Clone)]
pub struct DetectorClient {
    http_client: Client,
    base_url: Url,
}

impl DetectorClient {
    /// Create a new client against the configured detection service
    pub fn new(config: &Config) -> Result<Self> {
        let base_url =
            Url::parse(&config.detector.base_url).map_err(|e| Error::InvalidInput {
                field: "detector.base_url".to_string(),
                reason: format!("not a valid URL: {e}"),
            })?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.detector.timeout_secs))
            .connect_timeout(Duration::from_secs(config.detector.connect_timeout_secs))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| Error::Service(format!("Failed to create HTTP client: {e}")))?;

        info!("Initialized detector client for {base_url}");
        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Forward a product list to the filtering endpoint.
    ///
    /// The whole list goes out in one request regardless of size; an empty
    /// list is still forwarded.
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub async fn filter_products(
        &self,
        products: &[ProductDescriptor],
    ) -> Result<serde_json::Value> {
        self.post_json(FILTER_PRODUCTS_ENDPOINT, &FilterRequest { products })
            .await
    }

    /// Ask the detection service whether a URL uses Stripe
    #[instrument(skip(self))]
    pub async fn validate_url(&self, url: &str) -> Result<serde_json::Value> {
        self.post_json(VALIDATE_URL_ENDPOINT, &DetectionRequest { url })
            .await
    }

    /// Issue one POST and decode the JSON response
    async fn post_json<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<serde_json::Value> {
        let url = self.endpoint_url(endpoint)?;
        debug!("POST {url}");

        let response = self.http_client.post(url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Detection service returned {status} for {endpoint}");
            return Err(Error::Status {
                code: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| Error::Decode {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        self.base_url
            .join(endpoint)
            .map_err(|e| Error::Service(format!("Invalid endpoint {endpoint}: {e}")))
    }

    /// Base URL this client talks to
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}
