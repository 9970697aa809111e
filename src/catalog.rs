//! Defined-term catalog with longest-match-first iteration.
//!
//! Terms are searched for verbatim: case-sensitive, no word boundaries. The
//! catalog orders them by display length, longest first, so that a phrase like
//! "Company Material Adverse Effect" is claimed whole before "Company" gets a
//! chance to fragment it.
//!
//! # Example
//!
//! ```
//! use clause_lens::{DefinedTerm, TermCatalog};
//!
//! let catalog = TermCatalog::new(vec![
//!     DefinedTerm::new("Co", "Company"),
//!     DefinedTerm::new("MAE", "Company Material Adverse Effect"),
//! ]);
//! let ids: Vec<&str> = catalog.iter().map(|t| t.id.as_str()).collect();
//! assert_eq!(ids, ["MAE", "Co"]);
//! ```

use serde::{Deserialize, Serialize};

/// A phrase with a glossary entry.
///
/// `meta` is never read by the engine. It rides along so the term panel can
/// look up definitions and related material by id after a click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinedTerm<M = ()> {
    /// Unique identity of the term
    pub id: String,
    /// Exact substring to search for
    pub display: String,
    /// Caller-owned payload
    pub meta: M,
}

impl DefinedTerm<()> {
    pub fn new(id: impl Into<String>, display: impl Into<String>) -> Self {
        Self::with_meta(id, display, ())
    }
}

impl<M> DefinedTerm<M> {
    pub fn with_meta(id: impl Into<String>, display: impl Into<String>, meta: M) -> Self {
        Self {
            id: id.into(),
            display: display.into(),
            meta,
        }
    }

    /// Display length used for priority ordering, in chars.
    pub fn display_len(&self) -> usize {
        self.display.chars().count()
    }
}

/// Ordered collection of defined terms.
///
/// Iteration order is descending display length; terms of equal length keep
/// their insertion order. When two ids share one display string, the earlier
/// one claims the first occurrence in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermCatalog<M = ()> {
    terms: Vec<DefinedTerm<M>>,
}

impl<M> Default for TermCatalog<M> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<M> TermCatalog<M> {
    /// Build a catalog. Input order only matters between equal-length terms.
    pub fn new(terms: impl IntoIterator<Item = DefinedTerm<M>>) -> Self {
        let mut terms: Vec<DefinedTerm<M>> = terms.into_iter().collect();
        // sort_by_key is stable
        terms.sort_by_key(|term| std::cmp::Reverse(term.display_len()));
        Self { terms }
    }

    pub fn empty() -> Self {
        Self { terms: Vec::new() }
    }

    /// Terms in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &DefinedTerm<M>> {
        self.terms.iter()
    }

    pub fn for_each_in_priority_order(&self, f: impl FnMut(&DefinedTerm<M>)) {
        self.terms.iter().for_each(f)
    }

    /// Look up a term by id, e.g. after a click on a term reference.
    pub fn get(&self, id: &str) -> Option<&DefinedTerm<M>> {
        self.terms.iter().find(|term| term.id == id)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<M> FromIterator<DefinedTerm<M>> for TermCatalog<M> {
    fn from_iter<I: IntoIterator<Item = DefinedTerm<M>>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'c, M> IntoIterator for &'c TermCatalog<M> {
    type Item = &'c DefinedTerm<M>;
    type IntoIter = std::slice::Iter<'c, DefinedTerm<M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}
