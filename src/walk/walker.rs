// src/walk/walker.rs
// =============================================================================
// The walker crawls a linked-data graph breadth-first.
//
// How it works:
// 1. Start with the initial URI in the frontier queue
// 2. Pop a URI; skip it if it is already in the closed set
// 3. Add it to the closed set *before* fetching, so a node that fails is
//    never tried again in this walk
// 4. Fetch its triples; on failure, move on to the next URI
// 5. Keep only the triples the filter admits
// 6. Hand the node's URI and admitted triples to the visitor
// 7. Queue the object of every admitted triple that is a URI
// 8. Repeat until the frontier is empty
//
// The frontier may hold duplicates. They are dropped when popped, not when
// pushed, so the order is "first discovered, first visited".
//
// Concurrency:
// With `concurrency > 1`, up to that many URIs are popped per round and
// fetched at the same time. Their results are still filtered, visited and
// expanded one by one in the order they were popped, which gives exactly the
// same visit order as the sequential walk.
// =============================================================================

use crate::fetch::Fetcher;
use crate::rdf::Triple;
use crate::visitors::Visitor;
use crate::walk::filter::{Admit, AdmitAll};
use futures::future::join_all;
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// How many documents may be fetched at once. 0 is treated as 1.
    pub concurrency: usize,
    /// Checked before every fetch round.
    pub cancel: Option<CancellationToken>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        WalkConfig {
            concurrency: 1,
            cancel: None,
        }
    }
}

/// Counters for one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WalkStats {
    /// Nodes handed to the visitor
    pub visited: usize,
    /// Nodes whose fetch failed
    pub failed: usize,
    /// Frontier entries dropped because they were already closed
    pub skipped: usize,
    /// URIs pushed onto the frontier (duplicates included)
    pub discovered: usize,
}

#[derive(Debug, Error)]
pub enum WalkError {
    /// A visitor returned an error. The walk stops right there.
    #[error("visitor failed on {uri}")]
    Visitor {
        uri: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("walk cancelled")]
    Cancelled,
}

pub struct Walker<F, V, P = AdmitAll> {
    fetcher: F,
    visitor: V,
    filter: P,
    config: WalkConfig,
}

impl<F, V> Walker<F, V>
where
    F: Fetcher,
    V: Visitor,
{
    /// A walker that admits every triple.
    pub fn new(fetcher: F, visitor: V) -> Self {
        Walker {
            fetcher,
            visitor,
            filter: AdmitAll,
            config: WalkConfig::default(),
        }
    }
}

impl<F, V, P> Walker<F, V, P>
where
    F: Fetcher,
    V: Visitor,
    P: Admit,
{
    pub fn with_filter<Q: Admit>(self, filter: Q) -> Walker<F, V, Q> {
        Walker {
            fetcher: self.fetcher,
            visitor: self.visitor,
            filter,
            config: self.config,
        }
    }

    pub fn with_config(mut self, config: WalkConfig) -> Self {
        self.config = config;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn visitor(&self) -> &V {
        &self.visitor
    }

    pub fn visitor_mut(&mut self) -> &mut V {
        &mut self.visitor
    }

    pub fn into_visitor(self) -> V {
        self.visitor
    }

    /// Walks the graph reachable from `start_uri`.
    ///
    /// Every URI is fetched at most once. Fetch failures are logged and
    /// skipped. A visitor error aborts the walk and is returned as
    /// `WalkError::Visitor`; nothing about the partial walk is kept.
    ///
    /// There is no depth or size limit: the walk ends when no unvisited URI
    /// is left, so an unbounded graph needs a filter (or a cancel token).
    pub async fn walk(&mut self, start_uri: &str) -> Result<WalkStats, WalkError> {
        let round_size = self.config.concurrency.max(1);

        // Both live only for this call
        let mut closed: HashSet<String> = HashSet::new();
        let mut frontier: VecDeque<String> = VecDeque::new();
        frontier.push_back(start_uri.to_string());

        let mut stats = WalkStats::default();

        info!(start = start_uri, concurrency = round_size, "starting walk");

        // Process the frontier until no URI is left
        while !frontier.is_empty() {
            // Stop between rounds if someone asked us to
            if let Some(token) = &self.config.cancel {
                if token.is_cancelled() {
                    warn!(visited = stats.visited, pending = frontier.len(), "walk cancelled");
                    return Err(WalkError::Cancelled);
                }
            }

            // Take the next URIs off the front of the queue, closing each one
            let round = next_round(&mut frontier, &mut closed, round_size, &mut stats);
            if round.is_empty() {
                // Everything popped was a duplicate
                continue;
            }

            // Fetch the whole round at once; results come back in round order
            let results = join_all(round.iter().map(|uri| self.fetcher.fetch(uri))).await;

            for (uri, result) in round.iter().zip(results) {
                // A failed node stays closed but contributes nothing
                let triples = match result {
                    Ok(triples) => triples,
                    Err(e) => {
                        stats.failed += 1;
                        warn!(uri = %uri, error = %e, "fetch failed, skipping node");
                        continue;
                    }
                };

                // Drop the triples the filter rejects, keeping document order
                let admitted: Vec<Triple> = triples
                    .into_iter()
                    .filter(|t| self.filter.admit(t))
                    .collect();

                info!(uri = %uri, triples = admitted.len(), "visiting node");

                // Any visitor error ends the walk
                self.visitor
                    .visit(uri, &admitted)
                    .map_err(|source| WalkError::Visitor {
                        uri: uri.clone(),
                        source,
                    })?;
                stats.visited += 1;

                // Queue every admitted object that is a URI (duplicates are fine)
                for next in admitted.iter().filter_map(Triple::object_uri) {
                    frontier.push_back(next.as_str().to_string());
                    stats.discovered += 1;
                }
            }
        }

        info!(
            visited = stats.visited,
            failed = stats.failed,
            skipped = stats.skipped,
            "walk finished"
        );

        Ok(stats)
    }
}

// Pops up to `size` URIs that have not been closed yet, closing each one.
fn next_round(
    frontier: &mut VecDeque<String>,
    closed: &mut HashSet<String>,
    size: usize,
    stats: &mut WalkStats,
) -> Vec<String> {
    // `size` comes straight from the config and may be huge, so grow on demand
    let mut round = Vec::new();

    while round.len() < size {
        let Some(uri) = frontier.pop_front() else {
            break;
        };

        if closed.contains(&uri) {
            stats.skipped += 1;
            debug!(uri = %uri, "already visited");
            continue;
        }

        closed.insert(uri.clone());
        round.push(uri);
    }

    round
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate;
    use crate::fetch::MemoryFetcher;
    use crate::rdf::Term;
    use crate::visitors::{visitor_fn, Pass, StoreTriples, StoreUris};
    use crate::walk::filter::PredicateIn;
    use anyhow::anyhow;
    use std::cell::RefCell;

    const LINK: &str = "http://example.org/link";
    const OTHER: &str = "http://example.org/other";
    const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    fn link(s: &str, o: &str) -> Triple {
        Triple::new(Term::uri(s), Term::uri(LINK), Term::uri(o))
    }

    // Builds a graph where each node links to the listed nodes, in order
    fn graph(edges: Vec<(&str, Vec<&str>)>) -> MemoryFetcher {
        let mut fetcher = MemoryFetcher::new();
        for (node, targets) in edges {
            let triples = targets.iter().map(|t| link(node, t)).collect();
            fetcher.insert(node, triples);
        }
        fetcher
    }

    async fn visit_order(fetcher: &MemoryFetcher, start: &str, concurrency: usize) -> Vec<String> {
        let mut uris = Vec::new();
        {
            let config = WalkConfig {
                concurrency,
                cancel: None,
            };
            let mut walker = Walker::new(fetcher, StoreUris::new(&mut uris)).with_config(config);
            walker.walk(start).await.unwrap();
        }
        uris
    }

    #[tokio::test]
    async fn test_breadth_first_in_discovery_order() {
        let fetcher = graph(vec![
            ("A", vec!["B", "C"]),
            ("B", vec!["D"]),
            ("C", vec!["D"]),
            ("D", vec![]),
        ]);

        assert_eq!(visit_order(&fetcher, "A", 1).await, vec!["A", "B", "C", "D"]);
    }

    #[tokio::test]
    async fn test_cycle_terminates_and_visits_once() {
        let fetcher = graph(vec![("A", vec!["B"]), ("B", vec!["A"])]);

        assert_eq!(visit_order(&fetcher, "A", 1).await, vec!["A", "B"]);
        assert_eq!(fetcher.attempts(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_visit_at_most_once_with_many_references() {
        let fetcher = graph(vec![
            ("A", vec!["B", "B", "C", "B"]),
            ("B", vec!["C", "A"]),
            ("C", vec!["B", "C"]),
        ]);

        let mut uris = Vec::new();
        let mut walker = Walker::new(&fetcher, StoreUris::new(&mut uris));
        let stats = walker.walk("A").await.unwrap();
        drop(walker);

        assert_eq!(uris, vec!["A", "B", "C"]);
        assert_eq!(fetcher.attempts(), vec!["A", "B", "C"]);
        assert_eq!(stats.visited, 3);
        assert_eq!(stats.discovered, 8);
        assert_eq!(stats.skipped, 6);
    }

    #[tokio::test]
    async fn test_filter_delivers_exact_subsequence() {
        let a_triples = vec![
            link("A", "B"),
            Triple::new(Term::uri("A"), Term::uri(OTHER), Term::uri("C")),
            Triple::new(Term::uri("A"), Term::uri(LINK), Term::literal("x", XSD_STRING)),
            link("A", "D"),
        ];
        let fetcher = MemoryFetcher::new()
            .with_document("A", a_triples.clone())
            .with_document("B", vec![])
            .with_document("C", vec![])
            .with_document("D", vec![]);

        let mut seen = Vec::new();
        let mut uris = Vec::new();
        {
            let visitor = aggregate![StoreTriples::new(&mut seen), StoreUris::new(&mut uris)];
            let mut walker = Walker::new(&fetcher, visitor).with_filter(PredicateIn::new([LINK]));
            walker.walk("A").await.unwrap();
        }

        assert_eq!(
            seen,
            vec![a_triples[0].clone(), a_triples[2].clone(), a_triples[3].clone()]
        );
        // C was only reachable through a filtered-out triple
        assert_eq!(uris, vec!["A", "B", "D"]);
        assert!(!fetcher.attempts().contains(&"C".to_string()));
    }

    #[tokio::test]
    async fn test_filter_sees_each_triple_once_in_fetch_order() {
        let a_triples = vec![
            link("A", "B"),
            Triple::new(Term::uri("A"), Term::uri(OTHER), Term::uri("C")),
            link("A", "B"),
            Triple::new(Term::uri("A"), Term::uri(LINK), Term::literal("x", XSD_STRING)),
        ];
        let b_triples = vec![link("B", "A"), link("B", "D")];
        let fetcher = MemoryFetcher::new()
            .with_document("A", a_triples.clone())
            .with_document("B", b_triples.clone());

        let asked = RefCell::new(Vec::new());
        let filter = |t: &Triple| {
            asked.borrow_mut().push(t.clone());
            t.predicate() == &Term::uri(LINK)
        };

        let mut walker = Walker::new(&fetcher, Pass).with_filter(filter);
        walker.walk("A").await.unwrap();
        drop(walker);

        // D was never registered, so only A and B produced triples
        let expected: Vec<Triple> = a_triples.into_iter().chain(b_triples).collect();
        assert_eq!(asked.into_inner(), expected);
    }

    #[tokio::test]
    async fn test_huge_concurrency_is_accepted() {
        let fetcher = graph(vec![("A", vec!["B"]), ("B", vec![])]);

        assert_eq!(visit_order(&fetcher, "A", usize::MAX).await, vec!["A", "B"]);
        assert_eq!(fetcher.attempts(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_literals_and_blank_nodes_are_not_followed() {
        let fetcher = MemoryFetcher::new().with_document(
            "A",
            vec![
                Triple::new(Term::uri("A"), Term::uri(LINK), Term::literal("B", XSD_STRING)),
                Triple::new(Term::uri("A"), Term::uri(LINK), Term::blank("B")),
            ],
        );

        assert_eq!(visit_order(&fetcher, "A", 1).await, vec!["A"]);
        assert_eq!(fetcher.attempts(), vec!["A"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_absorbed_and_never_retried() {
        let fetcher = graph(vec![("A", vec!["X", "B"]), ("B", vec!["X", "C"]), ("C", vec![])])
            .failing("X");

        let mut uris = Vec::new();
        let mut walker = Walker::new(&fetcher, StoreUris::new(&mut uris));
        let stats = walker.walk("A").await.unwrap();
        drop(walker);

        assert_eq!(uris, vec!["A", "B", "C"]);
        assert_eq!(fetcher.attempts(), vec!["A", "X", "B", "C"]);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.visited, 3);
    }

    #[tokio::test]
    async fn test_failed_start_means_no_visits() {
        let fetcher = MemoryFetcher::new().failing("X");

        let mut calls = 0;
        let visitor = visitor_fn(|_, _| {
            calls += 1;
            Ok(())
        });
        let mut walker = Walker::new(&fetcher, visitor);
        let stats = walker.walk("X").await.unwrap();
        drop(walker);

        assert_eq!(calls, 0);
        assert_eq!(stats, WalkStats { visited: 0, failed: 1, skipped: 0, discovered: 0 });
    }

    #[tokio::test]
    async fn test_visitor_failure_aborts_walk() {
        let fetcher = graph(vec![("A", vec!["B"]), ("B", vec!["C"]), ("C", vec![])]);

        let mut walker = Walker::new(
            &fetcher,
            visitor_fn(|uri, _| {
                if uri == "B" {
                    Err(anyhow!("cannot store {}", uri))
                } else {
                    Ok(())
                }
            }),
        );
        let err = walker.walk("A").await.unwrap_err();

        match err {
            WalkError::Visitor { uri, source } => {
                assert_eq!(uri, "B");
                assert_eq!(source.to_string(), "cannot store B");
            }
            other => panic!("expected a visitor error, got {:?}", other),
        }
        assert_eq!(fetcher.attempts(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_composite_failure_skips_later_visitors() {
        let fetcher = graph(vec![("A", vec![])]);
        let calls = RefCell::new(Vec::new());

        let visitor = aggregate![
            visitor_fn(|_, _| {
                calls.borrow_mut().push("first");
                Ok(())
            }),
            visitor_fn(|_, _| {
                calls.borrow_mut().push("second");
                Err(anyhow!("boom"))
            }),
            visitor_fn(|_, _| {
                calls.borrow_mut().push("third");
                Ok(())
            }),
        ];
        let mut walker = Walker::new(&fetcher, visitor);
        assert!(matches!(walker.walk("A").await, Err(WalkError::Visitor { .. })));
        drop(walker);

        assert_eq!(calls.into_inner(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_concurrent_rounds_keep_sequential_order() {
        let fetcher = graph(vec![
            ("A", vec!["B", "C", "D"]),
            ("B", vec!["E", "C"]),
            ("C", vec!["F", "A"]),
            ("D", vec!["E"]),
            ("E", vec!["G"]),
            ("F", vec!["G"]),
            ("G", vec![]),
        ]);

        let sequential = visit_order(&fetcher, "A", 1).await;
        for concurrency in [2, 3, 8] {
            assert_eq!(visit_order(&fetcher, "A", concurrency).await, sequential);
        }
        assert_eq!(sequential, vec!["A", "B", "C", "D", "E", "F", "G"]);
    }

    #[tokio::test]
    async fn test_concurrent_walk_fetches_each_node_once() {
        let fetcher = graph(vec![
            ("A", vec!["B", "B", "C"]),
            ("B", vec!["C", "A"]),
            ("C", vec!["B"]),
        ]);

        visit_order(&fetcher, "A", 4).await;

        let mut attempts = fetcher.attempts();
        attempts.sort();
        assert_eq!(attempts, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let fetcher = graph(vec![("A", vec![])]);
        let token = CancellationToken::new();
        token.cancel();

        let mut walker = Walker::new(&fetcher, visitor_fn(|_, _| Ok(()))).with_config(WalkConfig {
            concurrency: 1,
            cancel: Some(token),
        });

        assert!(matches!(walker.walk("A").await, Err(WalkError::Cancelled)));
        assert!(fetcher.attempts().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_from_visitor_stops_at_next_fetch() {
        let fetcher = graph(vec![("A", vec!["B"]), ("B", vec![])]);
        let token = CancellationToken::new();
        let trigger = token.clone();

        let mut walker = Walker::new(
            &fetcher,
            visitor_fn(move |_, _| {
                trigger.cancel();
                Ok(())
            }),
        )
        .with_config(WalkConfig {
            concurrency: 1,
            cancel: Some(token),
        });

        assert!(matches!(walker.walk("A").await, Err(WalkError::Cancelled)));
        assert_eq!(fetcher.attempts(), vec!["A"]);
    }

    #[tokio::test]
    async fn test_walker_can_be_reused() {
        let fetcher = graph(vec![("A", vec!["B"]), ("B", vec![])]);

        let mut count = 0;
        {
            let mut walker = Walker::new(&fetcher, crate::visitors::CountNodes::new(&mut count));
            walker.walk("A").await.unwrap();
            // Closed set is per walk, so the second run visits everything again
            walker.walk("A").await.unwrap();
        }
        assert_eq!(count, 4);
    }
}
