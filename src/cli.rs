// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - walk: crawl the graph reachable from a URI and print what is found
// - parse: fetch a single document and print its triples
// =============================================================================

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "rdf-walker",
    version,
    about = "Walk linked-data graphs by following URIs found in RDF triples",
    long_about = "rdf-walker fetches an RDF document, prints its triples, and keeps going with \
                  every URI that appears as the object of a triple. Each document is fetched \
                  at most once."
)]
pub struct Cli {
    /// Log every fetch and skipped node to stderr (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk the graph reachable from a URI
    ///
    /// Example: rdf-walker walk http://xmlns.com/foaf/0.1/ --concurrency 4
    Walk(WalkArgs),

    /// Fetch one document and print its triples without following anything
    ///
    /// Example: rdf-walker parse ./ontology.ttl
    Parse {
        /// URI, file:// URI or local path of the document
        uri: String,

        /// Output the triples as JSON instead of plain text
        #[arg(long)]
        json: bool,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
    },
}

#[derive(Args, Debug)]
pub struct WalkArgs {
    /// Where to start: an http(s) URI, a file:// URI or a local path
    pub start_uri: String,

    /// Only keep (and follow) triples with this predicate IRI
    ///
    /// Can be given several times. Without it every triple is kept.
    #[arg(long = "predicate", value_name = "IRI")]
    pub predicates: Vec<String>,

    /// Print only the URI of each visited node
    #[arg(long, conflicts_with = "json")]
    pub uris_only: bool,

    /// Print one JSON object per visited node
    #[arg(long)]
    pub json: bool,

    /// How many documents to fetch at the same time
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}
