//! Ministry of Finance e-Tax business query
//!
//! The portal has no JSON API. The result page is an HTML table, so the name
//! is taken from the first `<td>` following the `營業人名稱` label. The portal
//! rejects requests whose Origin and Referer do not point at its own query
//! page.

use crate::{NameSource, SourceError};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{header, Client, StatusCode};
use std::time::Duration;
use ubn_core::SourcesConfig;

const QUERY_PATH: &str = "/etwmain/etw113w1/query";
const RESULT_PATH: &str = "/etwmain/etw113w1/result";

static NAME_CELL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)營業人名稱.*?<td.*?>(.*?)</td>").expect("name cell pattern is valid")
});

/// Pull the business name out of an e-Tax result page.
///
/// Only the first match counts. Markup nested inside the cell is returned
/// as-is.
pub fn extract_business_name(html: &str) -> Option<String> {
    NAME_CELL
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

pub struct EtaxSource {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl EtaxSource {
    pub fn new(client: Client, base_url: impl AsRef<str>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: super::trim_base(base_url.as_ref()),
            timeout,
        }
    }

    pub fn from_config(client: Client, config: &SourcesConfig) -> Self {
        Self::new(client, &config.etax_base_url, config.etax_timeout())
    }
}

#[async_trait]
impl NameSource for EtaxSource {
    async fn lookup(&self, ubn: &str) -> Result<Option<String>, SourceError> {
        let response = self
            .client
            .post(format!("{}{RESULT_PATH}", self.base_url))
            .header(header::ORIGIN, self.base_url.as_str())
            .header(header::REFERER, format!("{}{QUERY_PATH}", self.base_url))
            .form(&[("ban", ubn)])
            .timeout(self.timeout)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let html = response.text().await?;
        Ok(extract_business_name(&html))
    }

    fn name(&self) -> &str {
        "etax"
    }

    fn endpoint(&self) -> String {
        format!("POST {}{RESULT_PATH}", self.base_url)
    }
}
