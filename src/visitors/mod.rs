// src/visitors/mod.rs
// =============================================================================
// Visitors are what the walker calls for every node it manages to fetch.
//
// A visitor receives the node's URI and the triples that passed the walker's
// filter. It does whatever it likes with them (print, store, count...) and
// returns Ok(()) or an error. An error stops the whole walk.
//
// Several visitors can be combined with `Aggregate` (or the `aggregate!`
// macro). The aggregate calls each of them in the order they were added.
//
// Submodules:
// - print: visitors that write triples or URIs to stdout or any writer
// - store: visitors that collect triples, URIs or counts into caller-owned
//   containers
// =============================================================================

mod print;
mod store;

pub use print::{JsonLines, OutputTriples, PrintTriples, PrintUris};
pub use store::{CountNodes, Pass, StoreTriples, StoreTriplesIf, StoreUris};

use crate::rdf::Triple;
use std::fmt;

/// Reacts to one visited node.
///
/// Called at most once per URI per walk, never concurrently. `triples` is
/// the filtered view of the node's document, in document order.
pub trait Visitor {
    fn visit(&mut self, uri: &str, triples: &[Triple]) -> anyhow::Result<()>;
}

impl<F> Visitor for F
where
    F: FnMut(&str, &[Triple]) -> anyhow::Result<()>,
{
    fn visit(&mut self, uri: &str, triples: &[Triple]) -> anyhow::Result<()> {
        self(uri, triples)
    }
}

/// Pins a closure to the visitor signature so its argument and error types
/// get inferred.
///
/// ```
/// use rdf_walker::visitors::{visitor_fn, Visitor};
///
/// let mut seen = 0;
/// let mut v = visitor_fn(|_uri, triples| {
///     seen += triples.len();
///     Ok(())
/// });
/// v.visit("http://example.org/", &[]).unwrap();
/// ```
pub fn visitor_fn<F>(f: F) -> F
where
    F: FnMut(&str, &[Triple]) -> anyhow::Result<()>,
{
    f
}

/// Runs several visitors, one after another, on every node.
///
/// All of them see the same URI and the same triples. The first error stops
/// the dispatch; visitors after it are not called for that node.
#[derive(Default)]
pub struct Aggregate<'a> {
    visitors: Vec<Box<dyn Visitor + 'a>>,
}

impl<'a> Aggregate<'a> {
    pub fn new() -> Self {
        Aggregate {
            visitors: Vec::new(),
        }
    }

    pub fn with(mut self, visitor: impl Visitor + 'a) -> Self {
        self.push(visitor);
        self
    }

    pub fn push(&mut self, visitor: impl Visitor + 'a) {
        self.visitors.push(Box::new(visitor));
    }

    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }
}

impl Visitor for Aggregate<'_> {
    fn visit(&mut self, uri: &str, triples: &[Triple]) -> anyhow::Result<()> {
        for visitor in &mut self.visitors {
            visitor.visit(uri, triples)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Aggregate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregate")
            .field("visitors", &self.visitors.len())
            .finish()
    }
}

/// Builds an [`Aggregate`] from a list of visitors, in order.
///
/// ```
/// use rdf_walker::aggregate;
/// use rdf_walker::visitors::{CountNodes, StoreUris};
///
/// let mut count = 0;
/// let mut uris = Vec::new();
/// let visitor = aggregate![CountNodes::new(&mut count), StoreUris::new(&mut uris)];
/// assert_eq!(visitor.len(), 2);
/// ```
#[macro_export]
macro_rules! aggregate {
    ($($visitor:expr),* $(,)?) => {
        $crate::visitors::Aggregate::new()$(.with($visitor))*
    };
}
