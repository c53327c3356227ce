use crate::client::DetectorClient;
use crate::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Input parameters for the site detection tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DetectInput {
    /// The URL to check for Stripe integration
    pub url: String,
}

/// Tool that asks the detection service whether a website uses Stripe.
///
/// The remote verdict is passed through verbatim. On any failure the tool
/// returns `{ "stripe_enabled": false, "confidence": 0, "error": <message> }`
/// instead of propagating an error. A caller that needs to tell a confirmed
/// negative apart from "could not determine" must inspect the `error` field.
#[derive(Debug, Clone)]
pub struct DetectStripeTool {
    client: Arc<DetectorClient>,
}

impl DetectStripeTool {
    pub const NAME: &'static str = "detect_stripe";
    pub const DESCRIPTION: &'static str =
        "Detect if a website or product uses Stripe for payments";

    /// Create a new detection tool
    pub fn new(client: Arc<DetectorClient>) -> Self {
        info!("Initializing Stripe detection tool");
        Self { client }
    }

    /// Run the detection, absorbing every failure into the fallback payload
    #[instrument(skip(self, input), fields(url = %input.url))]
    pub async fn run(&self, input: DetectInput) -> serde_json::Value {
        match self.try_run(&input).await {
            Ok(body) => body,
            Err(e) => {
                warn!(kind = ?e.transport_kind(), "Detection call failed: {e}");
                Self::fallback(&e.to_string())
            }
        }
    }

    async fn try_run(&self, input: &DetectInput) -> Result<serde_json::Value> {
        self.client.validate_url(&input.url).await
    }

    /// Safe-default payload returned when the remote call fails
    #[must_use]
    pub fn fallback(error: &str) -> serde_json::Value {
        serde_json::json!({
            "stripe_enabled": false,
            "confidence": 0,
            "error": error,
        })
    }
}
