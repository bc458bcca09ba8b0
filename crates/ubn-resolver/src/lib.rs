//! UBN Resolver - Business name lookup across registries
//!
//! A unified business number is resolved by asking a fixed list of sources in
//! priority order and keeping the first usable name:
//!
//! 1. the g0v company aggregator (JSON)
//! 2. the Ministry of Finance e-Tax portal (HTML scrape)
//! 3. the GCIS company dataset (JSON)
//! 4. the GCIS sole-proprietor business dataset (JSON)
//!
//! Sources are tried one at a time. A failing source (network error, timeout,
//! unexpected body) is logged and skipped; it never aborts the lookup.
//!
//! Author: hephaex@gmail.com

use async_trait::async_trait;
use thiserror::Error;

pub mod chain;
pub mod sources;

pub use chain::{Resolution, ResolutionChain};
pub use sources::{EtaxSource, G0vSource, GcisDataset, GcisSource};

// ============================================================================
// Source contract
// ============================================================================

/// Why a single source produced no name
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(String),
}

impl SourceError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_timeout())
    }
}

/// One upstream registry and its request/parse strategy
#[async_trait]
pub trait NameSource: Send + Sync {
    /// Look up `ubn`, returning the raw name when the source knows it.
    ///
    /// `Ok(None)` means the source answered but had no name.
    async fn lookup(&self, ubn: &str) -> Result<Option<String>, SourceError>;

    /// Short identifier used in logs and metrics
    fn name(&self) -> &str;

    /// Human-readable endpoint description
    fn endpoint(&self) -> String;
}
