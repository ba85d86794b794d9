// src/main.rs
// =============================================================================
// This is the entry point of the rdf-walker CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing) on stderr
// 3. Dispatch to the subcommand handler
// 4. Exit with proper code (0 = success, 1 = cancelled, 2 = error)
//
// Triples go to stdout, logs and the summary go to stderr, so the output
// can be piped into other tools.
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, WalkArgs};
use rdf_walker::fetch::is_local;
use rdf_walker::rdf::Triple;
use rdf_walker::visitors::{Aggregate, JsonLines, PrintTriples, PrintUris};
use rdf_walker::walk::{Admit, PredicateIn};
use rdf_walker::{Fetcher, WalkConfig, WalkError, Walker, WebFetcher, WebFetcherConfig};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole error chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "rdf_walker=debug"
    } else {
        "rdf_walker=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Walk(args) => handle_walk(args).await,
        Commands::Parse {
            uri,
            json,
            timeout_secs,
        } => handle_parse(&uri, json, timeout_secs).await,
    }
}

fn web_fetcher(timeout_secs: u64, local_files: bool) -> Result<WebFetcher> {
    let fetcher = WebFetcher::with_config(WebFetcherConfig {
        timeout: Duration::from_secs(timeout_secs),
        local_files,
        ..WebFetcherConfig::default()
    })?;
    Ok(fetcher)
}

// Handles the 'walk' subcommand
async fn handle_walk(args: WalkArgs) -> Result<i32> {
    eprintln!("🔍 Walking from: {}", args.start_uri);

    // A remote start must not lead the walk into local files
    let local_files = is_local(&args.start_uri);
    let fetcher = web_fetcher(args.timeout_secs, local_files)?;

    // Ctrl-C stops the walk before the next fetch round
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    let visitor = if args.json {
        Aggregate::new().with(JsonLines::stdout())
    } else if args.uris_only {
        Aggregate::new().with(PrintUris::stdout())
    } else {
        Aggregate::new().with(PrintTriples::stdout())
    };

    // No --predicate means keep everything
    let predicates = PredicateIn::new(args.predicates);
    let keep_all = predicates.is_empty();
    let filter = move |t: &Triple| keep_all || predicates.admit(t);

    let mut walker = Walker::new(fetcher, visitor)
        .with_filter(filter)
        .with_config(WalkConfig {
            concurrency: args.concurrency,
            cancel: Some(cancel),
        });

    match walker.walk(&args.start_uri).await {
        Ok(stats) => {
            eprintln!();
            eprintln!("📊 Summary:");
            eprintln!("   ✅ Visited: {}", stats.visited);
            eprintln!("   ❌ Failed: {}", stats.failed);
            eprintln!("   🔁 Duplicates skipped: {}", stats.skipped);
            Ok(0)
        }
        Err(WalkError::Cancelled) => {
            eprintln!("⚠️  Walk cancelled");
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}

// Handles the 'parse' subcommand
async fn handle_parse(uri: &str, json: bool, timeout_secs: u64) -> Result<i32> {
    let fetcher = web_fetcher(timeout_secs, true)?;
    let triples = fetcher.fetch(uri).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&triples)?);
    } else {
        for triple in &triples {
            println!("{}", triple);
        }
    }

    eprintln!("📄 {} triple(s) in {}", triples.len(), uri);
    Ok(0)
}
