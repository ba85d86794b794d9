// src/rdf/mod.rs
// =============================================================================
// RDF terms and triples, plus parsing of RDF documents into them.
//
// Submodules:
// - term: Term (uri / literal / blank node) and Triple
// - parse: document syntax detection and parsing via sophia
// =============================================================================

mod parse;
mod term;

pub use parse::{parse_document, ParseError, RdfFormat};
pub use term::{Blank, Literal, Term, TermError, TermKind, Triple, Uri};
