// src/fetch/memory.rs
// =============================================================================
// A fetcher backed by a HashMap instead of the network.
//
// Every URI maps to the triples its "document" contains. URIs that were never
// registered fail with NotFound; URIs registered with `failing` fail with
// Unavailable. Each fetch attempt is recorded so callers can check which
// nodes were tried and in what order.
// =============================================================================

use crate::fetch::{FetchError, Fetcher};
use crate::rdf::Triple;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryFetcher {
    documents: HashMap<String, Vec<Triple>>,
    failing: HashSet<String>,
    attempts: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the triples served for `uri`, replacing any earlier ones.
    pub fn with_document(mut self, uri: impl Into<String>, triples: Vec<Triple>) -> Self {
        self.insert(uri, triples);
        self
    }

    /// Makes `uri` fail every time it is fetched.
    pub fn failing(mut self, uri: impl Into<String>) -> Self {
        self.failing.insert(uri.into());
        self
    }

    pub fn insert(&mut self, uri: impl Into<String>, triples: Vec<Triple>) {
        self.documents.insert(uri.into(), triples);
    }

    /// Every URI passed to `fetch` so far, in call order.
    pub fn attempts(&self) -> Vec<String> {
        self.attempts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record(&self, uri: &str) {
        self.attempts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(uri.to_string());
    }
}

impl Fetcher for MemoryFetcher {
    async fn fetch(&self, uri: &str) -> Result<Vec<Triple>, FetchError> {
        self.record(uri);

        if self.failing.contains(uri) {
            return Err(FetchError::Unavailable(uri.to_string()));
        }

        self.documents
            .get(uri)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(uri.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::Term;

    fn link(s: &str, o: &str) -> Triple {
        Triple::new(Term::uri(s), Term::uri("http://example.org/next"), Term::uri(o))
    }

    #[tokio::test]
    async fn test_serves_registered_documents() {
        let fetcher = MemoryFetcher::new().with_document("a", vec![link("a", "b")]);

        let triples = fetcher.fetch("a").await.unwrap();
        assert_eq!(triples, vec![link("a", "b")]);
    }

    #[tokio::test]
    async fn test_unknown_and_failing_uris() {
        let fetcher = MemoryFetcher::new()
            .with_document("a", vec![link("a", "b")])
            .failing("a");

        assert!(matches!(fetcher.fetch("a").await, Err(FetchError::Unavailable(_))));
        assert!(matches!(fetcher.fetch("zzz").await, Err(FetchError::NotFound(_))));
        assert_eq!(fetcher.attempts(), vec!["a".to_string(), "zzz".to_string()]);
    }
}
