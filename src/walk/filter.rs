// src/walk/filter.rs
// =============================================================================
// Filters decide which triples of a node the walker keeps.
//
// A kept ("admitted") triple is handed to the visitor, and if its object is a
// URI that URI is queued for a visit. A dropped triple is invisible: the
// visitor never sees it and the walker never follows it.
//
// Any `Fn(&Triple) -> bool` closure is a filter. A few common ones are
// provided as types.
// =============================================================================

use crate::rdf::Triple;
use std::collections::HashSet;

pub trait Admit {
    fn admit(&self, triple: &Triple) -> bool;
}

impl<F> Admit for F
where
    F: Fn(&Triple) -> bool,
{
    fn admit(&self, triple: &Triple) -> bool {
        self(triple)
    }
}

/// Keeps everything. The walker's default.
#[derive(Debug, Default, Clone, Copy)]
pub struct AdmitAll;

impl Admit for AdmitAll {
    fn admit(&self, _triple: &Triple) -> bool {
        true
    }
}

/// Keeps triples whose predicate is one of a fixed set of IRIs.
///
/// This is how you walk along, say, `owl:imports` and `rdfs:seeAlso` only.
#[derive(Debug, Clone, Default)]
pub struct PredicateIn {
    predicates: HashSet<String>,
}

impl PredicateIn {
    pub fn new<I, S>(predicates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PredicateIn {
            predicates: predicates.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl Admit for PredicateIn {
    fn admit(&self, triple: &Triple) -> bool {
        triple
            .predicate()
            .as_uri()
            .map(|p| self.predicates.contains(p.as_str()))
            .unwrap_or(false)
    }
}

/// Keeps only triples that link to another resource.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectIsUri;

impl Admit for ObjectIsUri {
    fn admit(&self, triple: &Triple) -> bool {
        triple.object().is_uri()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::Term;

    const SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";
    const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

    fn see_also() -> Triple {
        Triple::new(Term::uri("a"), Term::uri(SEE_ALSO), Term::uri("b"))
    }

    fn label() -> Triple {
        Triple::new(
            Term::uri("a"),
            Term::uri(LABEL),
            Term::literal("A", "http://www.w3.org/2001/XMLSchema#string"),
        )
    }

    #[test]
    fn test_admit_all() {
        assert!(AdmitAll.admit(&see_also()));
        assert!(AdmitAll.admit(&label()));
    }

    #[test]
    fn test_closure_filter() {
        let only_labels = |t: &Triple| t.object().is_literal();
        assert!(only_labels.admit(&label()));
        assert!(!only_labels.admit(&see_also()));
    }

    #[test]
    fn test_predicate_in() {
        let filter = PredicateIn::new([SEE_ALSO]);
        assert!(filter.admit(&see_also()));
        assert!(!filter.admit(&label()));

        // A blank predicate never matches
        let odd = Triple::new(Term::uri("a"), Term::blank(SEE_ALSO), Term::uri("b"));
        assert!(!filter.admit(&odd));
    }

    #[test]
    fn test_object_is_uri() {
        assert!(ObjectIsUri.admit(&see_also()));
        assert!(!ObjectIsUri.admit(&label()));
    }
}
