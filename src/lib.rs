// src/lib.rs
// =============================================================================
// rdf-walker: crawl linked data by following the URIs inside RDF triples.
//
// The pieces, leaves first:
// - rdf: terms, triples and document parsing
// - fetch: turning a URI into triples (web, local files, in-memory)
// - visitors: what to do with each visited node, and how to combine them
// - walk: the breadth-first walker that ties it all together
//
// A minimal walk:
//
//   let fetcher = WebFetcher::new()?;
//   let mut walker = Walker::new(fetcher, PrintUris::stdout());
//   walker.walk("http://xmlns.com/foaf/0.1/").await?;
// =============================================================================

pub mod fetch;
pub mod rdf;
pub mod visitors;
pub mod walk;

pub use fetch::{FetchError, Fetcher, MemoryFetcher, WebFetcher, WebFetcherConfig};
pub use rdf::{Term, TermError, Triple};
pub use visitors::{Aggregate, Visitor};
pub use walk::{Admit, WalkConfig, WalkError, WalkStats, Walker};
