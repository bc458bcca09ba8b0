//! g0v company aggregator
//!
//! `GET /api/show/{ubn}` answers with `{"data": {...}}` where the name sits
//! somewhere inside `data`, under a key that depends on the record type.

use crate::{NameSource, SourceError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use ubn_core::{deep_search_name, SourcesConfig};

pub struct G0vSource {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl G0vSource {
    pub fn new(client: Client, base_url: impl AsRef<str>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: super::trim_base(base_url.as_ref()),
            timeout,
        }
    }

    pub fn from_config(client: Client, config: &SourcesConfig) -> Self {
        Self::new(client, &config.g0v_base_url, config.g0v_timeout())
    }
}

#[async_trait]
impl NameSource for G0vSource {
    async fn lookup(&self, ubn: &str) -> Result<Option<String>, SourceError> {
        let body: Value = self
            .client
            .get(format!("{}/api/show/{ubn}", self.base_url))
            .timeout(self.timeout)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;

        Ok(body
            .get("data")
            .and_then(deep_search_name)
            .map(str::to_owned))
    }

    fn name(&self) -> &str {
        "g0v"
    }

    fn endpoint(&self) -> String {
        format!("GET {}/api/show/{{ubn}}", self.base_url)
    }
}
