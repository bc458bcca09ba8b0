//! Application state management
//!
//! Author: hephaex@gmail.com

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::RwLock;
use ubn_core::AppConfig;
use ubn_resolver::{Resolution, ResolutionChain};

/// Application state shared across handlers
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Server start time
    pub start_time: Instant,
    /// Request counter
    pub request_count: AtomicU64,
    /// Source chain used for every lookup
    pub resolver: ResolutionChain,
    /// Lookup outcome counters
    pub lookups: LookupStats,
    /// Request counts per route template
    pub endpoint_counts: RwLock<HashMap<String, u64>>,
}

impl AppState {
    /// Create state with the standard source chain built from `config`
    pub fn new(config: AppConfig) -> ubn_core::Result<Self> {
        let resolver = ResolutionChain::from_config(&config.sources)?;
        Ok(Self::with_chain(config, resolver))
    }

    /// Create state around an explicit chain
    pub fn with_chain(config: AppConfig, resolver: ResolutionChain) -> Self {
        let lookups = LookupStats::new(resolver.sources().len());
        Self {
            config,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
            resolver,
            lookups,
            endpoint_counts: RwLock::new(HashMap::new()),
        }
    }

    /// Increment request counter
    pub fn increment_requests(&self) {
        self.request_count.fetch_add(1, Ordering::SeqCst);
    }

    /// Get total request count
    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Record a request against its endpoint
    pub async fn record_request(&self, endpoint: String) {
        self.increment_requests();
        *self.endpoint_counts.write().await.entry(endpoint).or_insert(0) += 1;
    }
}

/// Counters for lookup outcomes
pub struct LookupStats {
    total: AtomicU64,
    resolved: AtomicU64,
    not_found: AtomicU64,
    /// Hits per source, indexed by chain position
    source_hits: Vec<AtomicU64>,
}

impl LookupStats {
    fn new(sources: usize) -> Self {
        Self {
            total: AtomicU64::new(0),
            resolved: AtomicU64::new(0),
            not_found: AtomicU64::new(0),
            source_hits: (0..sources).map(|_| AtomicU64::new(0)).collect(),
        }
    }

    pub fn record(&self, outcome: Option<&Resolution>) {
        self.total.fetch_add(1, Ordering::Relaxed);
        match outcome {
            Some(resolution) => {
                self.resolved.fetch_add(1, Ordering::Relaxed);
                if let Some(hits) = self.source_hits.get(resolution.index) {
                    hits.fetch_add(1, Ordering::Relaxed);
                }
            }
            None => {
                self.not_found.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    pub fn resolved(&self) -> u64 {
        self.resolved.load(Ordering::Relaxed)
    }

    pub fn not_found(&self) -> u64 {
        self.not_found.load(Ordering::Relaxed)
    }

    pub fn source_hits(&self, index: usize) -> u64 {
        self.source_hits
            .get(index)
            .map(|h| h.load(Ordering::Relaxed))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_stats() {
        let stats = LookupStats::new(4);
        stats.record(None);
        stats.record(Some(&Resolution {
            name: "範例".to_string(),
            source: "etax".to_string(),
            index: 1,
        }));

        assert_eq!(stats.total(), 2);
        assert_eq!(stats.resolved(), 1);
        assert_eq!(stats.not_found(), 1);
        assert_eq!(stats.source_hits(1), 1);
        assert_eq!(stats.source_hits(0), 0);
        assert_eq!(stats.source_hits(9), 0);
    }

    #[tokio::test]
    async fn test_record_request() {
        let state = AppState::with_chain(AppConfig::default(), ResolutionChain::new(Vec::new()));
        state.record_request("/health".to_string()).await;
        state.record_request("/health".to_string()).await;

        assert_eq!(state.get_request_count(), 2);
        assert_eq!(state.endpoint_counts.read().await.get("/health"), Some(&2));
    }

    #[test]
    fn test_increment_requests() {
        let state = AppState::with_chain(AppConfig::default(), ResolutionChain::new(Vec::new()));
        state.increment_requests();
        assert_eq!(state.get_request_count(), 1);
        state.increment_requests();
        assert_eq!(state.get_request_count(), 2);
    }
}
