pub mod detector;

pub use detector::DetectorClient;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A product entry as forwarded to the detection service.
///
/// Only `url` is required; `name` is omitted from the wire body when not
/// provided so the service sees exactly what the caller sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProductDescriptor {
    /// Product URL
    pub url: String,
    /// Product name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ProductDescriptor {
    /// Create a descriptor with only a URL
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: None,
        }
    }

    /// Attach a product name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
