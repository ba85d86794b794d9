// src/visitors/print.rs
// =============================================================================
// Visitors that write what they see.
//
// - PrintTriples: every triple on its own line, then a separator line
// - PrintUris: just the URI of each visited node
// - OutputTriples: every triple on its own line, into any io::Write
// - JsonLines: one JSON object per node ({"uri": ..., "triples": [...]})
//
// Write errors are returned, so a closed pipe stops the walk.
// =============================================================================

use crate::rdf::Triple;
use crate::visitors::Visitor;
use serde::Serialize;
use std::io::{self, Write};

const SEPARATOR: &str = "==============================================================";

#[derive(Debug)]
pub struct PrintTriples<W = io::Stdout> {
    out: W,
}

impl PrintTriples {
    pub fn stdout() -> Self {
        PrintTriples { out: io::stdout() }
    }
}

impl<W: Write> PrintTriples<W> {
    pub fn new(out: W) -> Self {
        PrintTriples { out }
    }
}

impl<W: Write> Visitor for PrintTriples<W> {
    fn visit(&mut self, _uri: &str, triples: &[Triple]) -> anyhow::Result<()> {
        for triple in triples {
            writeln!(self.out, "{}", triple)?;
        }
        writeln!(self.out, "{}", SEPARATOR)?;
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct PrintUris<W = io::Stdout> {
    out: W,
}

impl PrintUris {
    pub fn stdout() -> Self {
        PrintUris { out: io::stdout() }
    }
}

impl<W: Write> PrintUris<W> {
    pub fn new(out: W) -> Self {
        PrintUris { out }
    }
}

impl<W: Write> Visitor for PrintUris<W> {
    fn visit(&mut self, uri: &str, _triples: &[Triple]) -> anyhow::Result<()> {
        writeln!(self.out, "{}", uri)?;
        Ok(())
    }
}

/// Copies every triple into a writer, one per line, without separators.
#[derive(Debug)]
pub struct OutputTriples<W> {
    out: W,
}

impl<W: Write> OutputTriples<W> {
    pub fn new(out: W) -> Self {
        OutputTriples { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Visitor for OutputTriples<W> {
    fn visit(&mut self, _uri: &str, triples: &[Triple]) -> anyhow::Result<()> {
        for triple in triples {
            writeln!(self.out, "{}", triple)?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct NodeRecord<'a> {
    uri: &'a str,
    triples: &'a [Triple],
}

/// Writes one JSON document per visited node.
#[derive(Debug)]
pub struct JsonLines<W = io::Stdout> {
    out: W,
}

impl JsonLines {
    pub fn stdout() -> Self {
        JsonLines { out: io::stdout() }
    }
}

impl<W: Write> JsonLines<W> {
    pub fn new(out: W) -> Self {
        JsonLines { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Visitor for JsonLines<W> {
    fn visit(&mut self, uri: &str, triples: &[Triple]) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.out, &NodeRecord { uri, triples })?;
        writeln!(self.out)?;
        Ok(())
    }
}
