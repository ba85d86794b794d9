// src/rdf/parse.rs
// =============================================================================
// Turns the text of an RDF document into our own Triple values.
//
// The actual parsing is done by the sophia crates:
// - sophia_xml for RDF/XML
// - sophia_turtle for Turtle and N-Triples
//
// We only translate sophia's terms into `Term` and decide which syntax a
// document is written in.
// =============================================================================

use crate::rdf::{Term, Triple};
use sophia_api::parser::TripleParser;
use sophia_api::source::TripleSource;
use sophia_api::term::{Term as _, TermKind as SophiaKind};
use sophia_api::triple::Triple as _;
use sophia_iri::Iri;
use sophia_turtle::parser::nt::NTriplesParser;
use sophia_turtle::parser::turtle::TurtleParser;
use sophia_xml::parser::RdfXmlParser;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    RdfXml,
    Turtle,
    NTriples,
}

impl RdfFormat {
    /// The value we send in the `Accept` header, most preferred first.
    pub const ACCEPT: &'static str =
        "application/rdf+xml, text/turtle;q=0.9, application/n-triples;q=0.8, */*;q=0.1";

    /// Picks a format from a `Content-Type` header value.
    ///
    /// Returns None for generic types like text/html so the caller can fall
    /// back to the file extension.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        match mime.as_str() {
            "application/rdf+xml" => Some(RdfFormat::RdfXml),
            "text/turtle" | "application/x-turtle" | "application/turtle" => {
                Some(RdfFormat::Turtle)
            }
            "application/n-triples" | "text/n-triples" => Some(RdfFormat::NTriples),
            _ => None,
        }
    }

    /// Picks a format from the extension at the end of a URI or path.
    pub fn from_extension(uri: &str) -> Option<Self> {
        // Strip query and fragment so "x.ttl?v=2" still counts as Turtle
        let path = uri.split(['?', '#']).next().unwrap_or(uri);
        let file = path.rsplit('/').next().unwrap_or(path);
        let (_, ext) = file.rsplit_once('.')?;

        match ext.to_ascii_lowercase().as_str() {
            "rdf" | "owl" | "xml" => Some(RdfFormat::RdfXml),
            "ttl" => Some(RdfFormat::Turtle),
            "nt" => Some(RdfFormat::NTriples),
            _ => None,
        }
    }

    /// Content type first, then extension, then RDF/XML.
    pub fn detect(content_type: Option<&str>, uri: &str) -> Self {
        content_type
            .and_then(RdfFormat::from_content_type)
            .or_else(|| RdfFormat::from_extension(uri))
            .unwrap_or(RdfFormat::RdfXml)
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RdfFormat::RdfXml => "rdfxml",
            RdfFormat::Turtle => "turtle",
            RdfFormat::NTriples => "ntriples",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid {format} document: {message}")]
    Syntax { format: RdfFormat, message: String },

    #[error("unsupported term in {format} document: {kind}")]
    UnsupportedTerm { format: RdfFormat, kind: String },
}

/// Parses a whole document.
///
/// Triples come back in the order the parser produced them. Relative IRIs
/// resolve against `base_uri` when it is a valid absolute IRI.
pub fn parse_document(
    text: &str,
    format: RdfFormat,
    base_uri: &str,
) -> Result<Vec<Triple>, ParseError> {
    let base = Iri::new(base_uri.to_string()).ok();

    match format {
        RdfFormat::RdfXml => collect(RdfXmlParser { base }.parse_str(text), format),
        RdfFormat::Turtle => collect(TurtleParser { base }.parse_str(text), format),
        RdfFormat::NTriples => collect(NTriplesParser::default().parse_str(text), format),
    }
}

fn collect<S: TripleSource>(mut source: S, format: RdfFormat) -> Result<Vec<Triple>, ParseError> {
    let mut triples = Vec::new();
    let mut unsupported: Option<String> = None;

    source
        .for_each_triple(|t| {
            if unsupported.is_some() {
                return;
            }
            let converted = (convert(t.s()), convert(t.p()), convert(t.o()));
            match converted {
                (Ok(s), Ok(p), Ok(o)) => triples.push(Triple::new(s, p, o)),
                (Err(kind), _, _) | (_, Err(kind), _) | (_, _, Err(kind)) => {
                    unsupported = Some(kind)
                }
            }
        })
        .map_err(|e| ParseError::Syntax {
            format,
            message: e.to_string(),
        })?;

    match unsupported {
        Some(kind) => Err(ParseError::UnsupportedTerm { format, kind }),
        None => Ok(triples),
    }
}

fn convert<T: sophia_api::term::Term>(term: T) -> Result<Term, String> {
    match term.kind() {
        SophiaKind::Iri => Ok(Term::uri(
            term.iri().map(|iri| iri.as_str().to_string()).unwrap_or_default(),
        )),
        SophiaKind::BlankNode => Ok(Term::blank(
            term.bnode_id()
                .map(|id| id.as_str().to_string())
                .unwrap_or_default(),
        )),
        SophiaKind::Literal => {
            let value = term.lexical_form().map(|v| v.to_string()).unwrap_or_default();
            let datatype = term
                .datatype()
                .map(|dt| dt.as_str().to_string())
                .unwrap_or_default();
            let mut lit = crate::rdf::Literal::new(value, crate::rdf::Uri::new(datatype));
            if let Some(tag) = term.language_tag() {
                lit = lit.with_language(tag.as_str());
            }
            Ok(Term::Literal(lit))
        }
        other => Err(format!("{:?}", other)),
    }
}
