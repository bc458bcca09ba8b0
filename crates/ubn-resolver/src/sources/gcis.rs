//! GCIS open data (Department of Commerce)
//!
//! OData-style endpoints, one per dataset. The query filters on
//! `Business_Accounting_NO` and asks for a single row; the body is a JSON
//! array of records.

use crate::{NameSource, SourceError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use ubn_core::{deep_search_name, SourcesConfig};

/// Which GCIS registration dataset to query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GcisDataset {
    /// Registered companies (公司登記)
    Company,
    /// Sole proprietorships and partnerships (商業登記)
    Business,
}

impl GcisDataset {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Company => "gcis-company",
            Self::Business => "gcis-business",
        }
    }

    fn code<'c>(&self, config: &'c SourcesConfig) -> &'c str {
        match self {
            Self::Company => &config.gcis_company_dataset,
            Self::Business => &config.gcis_business_dataset,
        }
    }
}

pub struct GcisSource {
    client: Client,
    dataset: GcisDataset,
    url: String,
    timeout: Duration,
}

impl GcisSource {
    pub fn new(
        client: Client,
        dataset: GcisDataset,
        base_url: impl AsRef<str>,
        dataset_code: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            dataset,
            url: format!(
                "{}/od/data/api/{dataset_code}",
                super::trim_base(base_url.as_ref())
            ),
            timeout,
        }
    }

    pub fn from_config(client: Client, dataset: GcisDataset, config: &SourcesConfig) -> Self {
        Self::new(
            client,
            dataset,
            &config.gcis_base_url,
            dataset.code(config),
            config.gcis_timeout(),
        )
    }

    pub fn dataset(&self) -> GcisDataset {
        self.dataset
    }
}

#[async_trait]
impl NameSource for GcisSource {
    async fn lookup(&self, ubn: &str) -> Result<Option<String>, SourceError> {
        let filter = format!("Business_Accounting_NO eq {ubn}");
        let body: Value = self
            .client
            .get(&self.url)
            .query(&[
                ("$format", "json"),
                ("$filter", filter.as_str()),
                ("$skip", "0"),
                ("$top", "1"),
            ])
            .timeout(self.timeout)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;

        Ok(match &body {
            Value::Array(rows) => rows
                .first()
                .and_then(deep_search_name)
                .map(str::to_owned),
            _ => None,
        })
    }

    fn name(&self) -> &str {
        self.dataset.label()
    }

    fn endpoint(&self) -> String {
        format!("GET {}?$filter=Business_Accounting_NO eq {{ubn}}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source(server: &MockServer, dataset: GcisDataset) -> GcisSource {
        let config = SourcesConfig {
            gcis_base_url: server.uri(),
            ..SourcesConfig::default()
        };
        GcisSource::from_config(Client::new(), dataset, &config)
    }

    #[tokio::test]
    async fn test_company_dataset_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/od/data/api/5F64D864-61CB-4D0D-8AD9-492047CC1EA6"))
            .and(query_param("$format", "json"))
            .and(query_param("$filter", "Business_Accounting_NO eq 12345678"))
            .and(query_param("$skip", "0"))
            .and(query_param("$top", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "Business_Accounting_NO": "12345678",
                    "Company_Status_Desc": "核准設立",
                    "Company_Name": "範例科技股份有限公司"
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let name = source(&server, GcisDataset::Company)
            .lookup("12345678")
            .await
            .unwrap();
        assert_eq!(name.as_deref(), Some("範例科技股份有限公司"));
    }

    #[tokio::test]
    async fn test_business_dataset_uses_its_own_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/od/data/api/45A17014-F975-4C3D-A614-38742F1C6339"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "Business_Name": "X", "商業名稱": "範例小吃店" }
            ])))
            .mount(&server)
            .await;

        let gcis = source(&server, GcisDataset::Business);
        assert_eq!(gcis.name(), "gcis-business");
        let name = gcis.lookup("87654321").await.unwrap();
        assert_eq!(name.as_deref(), Some("範例小吃店"));
    }

    #[tokio::test]
    async fn test_empty_list_and_non_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("$filter", "Business_Accounting_NO eq 00000000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("$filter", "Business_Accounting_NO eq 11111111"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "Company_Name": "物件回應" })),
            )
            .mount(&server)
            .await;

        let gcis = source(&server, GcisDataset::Company);
        assert_eq!(gcis.lookup("00000000").await.unwrap(), None);
        assert_eq!(gcis.lookup("11111111").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_empty_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let err = source(&server, GcisDataset::Company)
            .lookup("12345678")
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }
}
