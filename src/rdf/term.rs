// src/rdf/term.rs
// =============================================================================
// The data model the walker operates over.
//
// An RDF term is exactly one of:
// 1) A URI (a resource reference)
// 2) A literal value with a datatype URI
// 3) A blank node, whose label only means something inside its own document
//
// A triple is three terms: (subject, predicate, object).
//
// Rust concepts:
// - Enums with payloads: a type-safe tagged union
// - Result<&T, E>: projecting a term to one variant can fail
// - Display: printing a term renders only its text
// =============================================================================

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The variant names used in cast errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TermKind {
    Uri,
    Literal,
    Blank,
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TermKind::Uri => "uri",
            TermKind::Literal => "literal",
            TermKind::Blank => "blank node",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermError {
    /// The term was read as a variant it does not hold.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: TermKind, found: TermKind },
}

/// A resource reference. May be empty when the parser had no value for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Uri(String);

impl Uri {
    pub fn new(uri: impl Into<String>) -> Self {
        Uri(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A literal value plus its datatype.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Literal {
    value: String,
    datatype: Uri,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<String>,
}

impl Literal {
    pub fn new(value: impl Into<String>, datatype: Uri) -> Self {
        Literal {
            value: value.into(),
            datatype,
            language: None,
        }
    }

    /// Attaches a language tag, as carried by `"chat"@fr` style literals.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn datatype(&self) -> &Uri {
        &self.datatype
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

/// A blank node label, scoped to the document it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Blank(String);

impl Blank {
    pub fn new(label: impl Into<String>) -> Self {
        Blank(label.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Term {
    Uri(Uri),
    Literal(Literal),
    Blank(Blank),
}

impl Term {
    pub fn uri(uri: impl Into<String>) -> Self {
        Term::Uri(Uri::new(uri))
    }

    pub fn literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal(Literal::new(value, Uri::new(datatype)))
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Term::Blank(Blank::new(label))
    }

    pub fn kind(&self) -> TermKind {
        match self {
            Term::Uri(_) => TermKind::Uri,
            Term::Literal(_) => TermKind::Literal,
            Term::Blank(_) => TermKind::Blank,
        }
    }

    pub fn is_uri(&self) -> bool {
        matches!(self, Term::Uri(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Term::Blank(_))
    }

    pub fn as_uri(&self) -> Result<&Uri, TermError> {
        match self {
            Term::Uri(uri) => Ok(uri),
            other => Err(other.mismatch(TermKind::Uri)),
        }
    }

    pub fn as_literal(&self) -> Result<&Literal, TermError> {
        match self {
            Term::Literal(lit) => Ok(lit),
            other => Err(other.mismatch(TermKind::Literal)),
        }
    }

    pub fn as_blank(&self) -> Result<&Blank, TermError> {
        match self {
            Term::Blank(blank) => Ok(blank),
            other => Err(other.mismatch(TermKind::Blank)),
        }
    }

    pub fn into_uri(self) -> Result<Uri, TermError> {
        match self {
            Term::Uri(uri) => Ok(uri),
            other => Err(other.mismatch(TermKind::Uri)),
        }
    }

    pub fn into_literal(self) -> Result<Literal, TermError> {
        match self {
            Term::Literal(lit) => Ok(lit),
            other => Err(other.mismatch(TermKind::Literal)),
        }
    }

    pub fn into_blank(self) -> Result<Blank, TermError> {
        match self {
            Term::Blank(blank) => Ok(blank),
            other => Err(other.mismatch(TermKind::Blank)),
        }
    }

    fn mismatch(&self, expected: TermKind) -> TermError {
        TermError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }
}

// Only the text content is printed: no <>, no quotes, no ^^datatype.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Uri(uri) => f.write_str(uri.as_str()),
            Term::Literal(lit) => f.write_str(lit.value()),
            Term::Blank(blank) => f.write_str(blank.value()),
        }
    }
}

impl From<Uri> for Term {
    fn from(uri: Uri) -> Self {
        Term::Uri(uri)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

impl From<Blank> for Term {
    fn from(blank: Blank) -> Self {
        Term::Blank(blank)
    }
}

/// A (subject, predicate, object) statement. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Triple {
    subject: Term,
    predicate: Term,
    object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Triple {
            subject,
            predicate,
            object,
        }
    }

    pub fn subject(&self) -> &Term {
        &self.subject
    }

    pub fn predicate(&self) -> &Term {
        &self.predicate
    }

    pub fn object(&self) -> &Term {
        &self.object
    }

    /// The object's URI, if the object is a resource reference.
    ///
    /// This is what the walker follows.
    pub fn object_uri(&self) -> Option<&Uri> {
        self.object.as_uri().ok()
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}
