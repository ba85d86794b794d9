// src/visitors/store.rs
// =============================================================================
// Visitors that collect results into containers the caller owns.
//
// They borrow the container mutably for as long as the walker lives, so the
// caller reads the results once the walker is dropped:
//
//   let mut uris = Vec::new();
//   {
//       let mut walker = Walker::new(fetcher, StoreUris::new(&mut uris));
//       walker.walk(start).await?;
//   }
//   println!("{:?}", uris);
// =============================================================================

use crate::rdf::Triple;
use crate::visitors::Visitor;

/// Does nothing. Useful when only the walk's side effects on the fetcher
/// or its stats matter.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pass;

impl Visitor for Pass {
    fn visit(&mut self, _uri: &str, _triples: &[Triple]) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Appends every triple it sees.
#[derive(Debug)]
pub struct StoreTriples<'a> {
    store: &'a mut Vec<Triple>,
}

impl<'a> StoreTriples<'a> {
    pub fn new(store: &'a mut Vec<Triple>) -> Self {
        StoreTriples { store }
    }
}

impl Visitor for StoreTriples<'_> {
    fn visit(&mut self, _uri: &str, triples: &[Triple]) -> anyhow::Result<()> {
        self.store.extend_from_slice(triples);
        Ok(())
    }
}

/// Appends the triples that match `pred`.
///
/// Unlike the walker's filter this does not change which nodes get
/// followed; it only decides what gets kept.
pub struct StoreTriplesIf<'a, P> {
    store: &'a mut Vec<Triple>,
    pred: P,
}

impl<'a, P> StoreTriplesIf<'a, P>
where
    P: Fn(&Triple) -> bool,
{
    pub fn new(store: &'a mut Vec<Triple>, pred: P) -> Self {
        StoreTriplesIf { store, pred }
    }
}

impl<P> Visitor for StoreTriplesIf<'_, P>
where
    P: Fn(&Triple) -> bool,
{
    fn visit(&mut self, _uri: &str, triples: &[Triple]) -> anyhow::Result<()> {
        let pred = &self.pred;
        self.store.extend(triples.iter().filter(|t| pred(*t)).cloned());
        Ok(())
    }
}

/// Records the URI of every visited node, in visit order.
#[derive(Debug)]
pub struct StoreUris<'a> {
    uris: &'a mut Vec<String>,
}

impl<'a> StoreUris<'a> {
    pub fn new(uris: &'a mut Vec<String>) -> Self {
        StoreUris { uris }
    }
}

impl Visitor for StoreUris<'_> {
    fn visit(&mut self, uri: &str, _triples: &[Triple]) -> anyhow::Result<()> {
        self.uris.push(uri.to_string());
        Ok(())
    }
}

/// Counts visited nodes.
#[derive(Debug)]
pub struct CountNodes<'a> {
    count: &'a mut usize,
}

impl<'a> CountNodes<'a> {
    pub fn new(count: &'a mut usize) -> Self {
        CountNodes { count }
    }
}

impl Visitor for CountNodes<'_> {
    fn visit(&mut self, _uri: &str, _triples: &[Triple]) -> anyhow::Result<()> {
        *self.count += 1;
        Ok(())
    }
}
