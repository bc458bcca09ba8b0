//! Upstream registry adapters
//!
//! Author: hephaex@gmail.com

mod etax;
mod g0v;
mod gcis;

pub use etax::{extract_business_name, EtaxSource};
pub use g0v::G0vSource;
pub use gcis::{GcisDataset, GcisSource};

use reqwest::Client;
use ubn_core::{SourcesConfig, UbnError};

/// Build the HTTP client shared by all sources
///
/// Timeouts are set per request, since each source has its own.
pub fn build_client(config: &SourcesConfig) -> ubn_core::Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| UbnError::HttpClient(e.to_string()))
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
