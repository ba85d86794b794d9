// src/fetch/mod.rs
// =============================================================================
// This module turns a URI into the triples of the document behind it.
//
// The walker only depends on the `Fetcher` trait. It never sees HTTP, files
// or parsers, just "here are the triples" or "this node failed".
//
// Implementations:
// - web: downloads http(s) documents with reqwest, reads file:// documents
//   from disk, and parses them with sophia
// - memory: a fixed in-memory graph, handy for tests and embedding
// =============================================================================

mod memory;
mod web;

pub use memory::MemoryFetcher;
pub use web::{is_local, WebFetcher, WebFetcherConfig};

use crate::rdf::{ParseError, Triple};
use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;

/// Why a node produced no triples.
///
/// The walker absorbs every one of these: the node is closed and skipped.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid uri '{uri}': {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    #[error("reading local files is disabled: {0}")]
    LocalFilesDisabled(String),

    #[error("unsupported uri scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("no document at {0}")]
    NotFound(String),

    #[error("{0} is unavailable")]
    Unavailable(String),
}

/// Fetches and parses the document named by a URI.
///
/// `Err` means "no triples for this node": network errors, bad status codes
/// and parse errors all land here instead of panicking or aborting a walk.
/// On success the triples are returned in the order the parser produced them.
pub trait Fetcher {
    fn fetch(&self, uri: &str) -> impl Future<Output = Result<Vec<Triple>, FetchError>> + Send;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, uri: &str) -> impl Future<Output = Result<Vec<Triple>, FetchError>> + Send {
        (**self).fetch(uri)
    }
}
