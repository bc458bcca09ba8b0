//! Cascading resolution across sources
//!
//! Author: hephaex@gmail.com

use crate::sources::{build_client, EtaxSource, G0vSource, GcisDataset, GcisSource};
use crate::NameSource;
use std::time::Instant;
use ubn_core::{name_candidate, SourcesConfig};

/// A successful lookup and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Entity name, trimmed
    pub name: String,
    /// Name of the source that answered
    pub source: String,
    /// Position of that source in the chain (0-based)
    pub index: usize,
}

/// Ordered list of sources tried one after another
pub struct ResolutionChain {
    sources: Vec<Box<dyn NameSource>>,
}

impl ResolutionChain {
    /// Create a chain from explicit sources, highest priority first
    pub fn new(sources: Vec<Box<dyn NameSource>>) -> Self {
        Self { sources }
    }

    /// Standard chain: g0v, e-Tax, GCIS company, GCIS business
    pub fn from_config(config: &SourcesConfig) -> ubn_core::Result<Self> {
        let client = build_client(config)?;

        Ok(Self::new(vec![
            Box::new(G0vSource::from_config(client.clone(), config)),
            Box::new(EtaxSource::from_config(client.clone(), config)),
            Box::new(GcisSource::from_config(
                client.clone(),
                GcisDataset::Company,
                config,
            )),
            Box::new(GcisSource::from_config(
                client,
                GcisDataset::Business,
                config,
            )),
        ]))
    }

    pub fn sources(&self) -> &[Box<dyn NameSource>] {
        &self.sources
    }

    /// Resolve `ubn` to a name, or an empty string when no source knows it.
    pub async fn resolve(&self, ubn: &str) -> String {
        self.resolve_detailed(ubn)
            .await
            .map(|r| r.name)
            .unwrap_or_default()
    }

    /// Resolve `ubn`, reporting which source answered.
    ///
    /// Sources after the first one yielding a valid name are never called.
    pub async fn resolve_detailed(&self, ubn: &str) -> Option<Resolution> {
        let start = Instant::now();

        for (index, source) in self.sources.iter().enumerate() {
            tracing::debug!(source = source.name(), ubn, "Querying source");

            let raw = match source.lookup(ubn).await {
                Ok(Some(raw)) => raw,
                Ok(None) => {
                    tracing::debug!(source = source.name(), ubn, "Source has no name");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(
                        source = source.name(),
                        ubn,
                        timeout = e.is_timeout(),
                        "Source failed: {e}"
                    );
                    continue;
                }
            };

            match name_candidate(&raw) {
                Some(name) => {
                    tracing::info!(
                        source = source.name(),
                        ubn,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Resolved: {name}"
                    );
                    return Some(Resolution {
                        name: name.to_string(),
                        source: source.name().to_string(),
                        index,
                    });
                }
                None => {
                    tracing::debug!(
                        source = source.name(),
                        ubn,
                        raw = raw.as_str(),
                        "Discarding placeholder name"
                    );
                }
            }
        }

        tracing::info!(
            ubn,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "No source could resolve"
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    enum Outcome {
        Name(&'static str),
        Nothing,
        Fail,
    }

    struct MockSource {
        label: &'static str,
        outcome: Outcome,
        calls: Arc<AtomicUsize>,
    }

    impl MockSource {
        fn boxed(label: &'static str, outcome: Outcome) -> (Box<dyn NameSource>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let source = Self {
                label,
                outcome,
                calls: calls.clone(),
            };
            (Box::new(source), calls)
        }
    }

    #[async_trait]
    impl NameSource for MockSource {
        async fn lookup(&self, _ubn: &str) -> Result<Option<String>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcome {
                Outcome::Name(name) => Ok(Some(name.to_string())),
                Outcome::Nothing => Ok(None),
                Outcome::Fail => Err(SourceError::Status(500)),
            }
        }

        fn name(&self) -> &str {
            self.label
        }

        fn endpoint(&self) -> String {
            format!("mock://{}", self.label)
        }
    }

    fn chain_of(outcomes: Vec<Outcome>) -> (ResolutionChain, Vec<Arc<AtomicUsize>>) {
        let labels = ["first", "second", "third", "fourth"];
        let (sources, counters) = outcomes
            .into_iter()
            .zip(labels)
            .map(|(outcome, label)| MockSource::boxed(label, outcome))
            .unzip();
        (ResolutionChain::new(sources), counters)
    }

    fn counts(counters: &[Arc<AtomicUsize>]) -> Vec<usize> {
        counters.iter().map(|c| c.load(Ordering::SeqCst)).collect()
    }

    #[tokio::test]
    async fn test_first_hit_short_circuits() {
        let (chain, counters) = chain_of(vec![
            Outcome::Name("範例股份有限公司"),
            Outcome::Name("不該被呼叫"),
            Outcome::Name("不該被呼叫"),
            Outcome::Name("不該被呼叫"),
        ]);

        assert_eq!(chain.resolve("12345678").await, "範例股份有限公司");
        assert_eq!(counts(&counters), vec![1, 0, 0, 0]);
    }

    #[tokio::test]
    async fn test_falls_through_failures_in_order() {
        let (chain, counters) = chain_of(vec![
            Outcome::Fail,
            Outcome::Nothing,
            Outcome::Name("第三來源商行"),
            Outcome::Name("第四來源"),
        ]);

        let resolution = chain.resolve_detailed("12345678").await.unwrap();
        assert_eq!(resolution.name, "第三來源商行");
        assert_eq!(resolution.source, "third");
        assert_eq!(resolution.index, 2);
        assert_eq!(counts(&counters), vec![1, 1, 1, 0]);
    }

    #[tokio::test]
    async fn test_all_sources_fail_yields_empty() {
        let (chain, counters) = chain_of(vec![
            Outcome::Fail,
            Outcome::Fail,
            Outcome::Nothing,
            Outcome::Fail,
        ]);

        assert_eq!(chain.resolve("12345678").await, "");
        assert_eq!(counts(&counters), vec![1, 1, 1, 1]);
    }

    #[tokio::test]
    async fn test_placeholder_names_do_not_stop_the_chain() {
        let (chain, counters) = chain_of(vec![
            Outcome::Name(""),
            Outcome::Name(" X "),
            Outcome::Name("  有效名稱  "),
            Outcome::Nothing,
        ]);

        assert_eq!(chain.resolve("12345678").await, "有效名稱");
        assert_eq!(counts(&counters), vec![1, 1, 1, 0]);
    }

    #[tokio::test]
    async fn test_empty_chain() {
        let chain = ResolutionChain::new(Vec::new());
        assert_eq!(chain.resolve_detailed("12345678").await, None);
    }

    #[test]
    fn test_standard_chain_order() {
        let chain = ResolutionChain::from_config(&SourcesConfig::default()).unwrap();
        let names: Vec<&str> = chain.sources().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["g0v", "etax", "gcis-company", "gcis-business"]);
    }
}
