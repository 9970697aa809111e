//! Core types for parsed `.lens` fixture files.

use std::ops::Range;

use clause_lens::{AnnotationSpec, DefinedTerm, TermCatalog};
use serde::{Deserialize, Serialize};

/// Marker id reserved for the annotation region: `«@:phrase»`.
pub const ANNOTATION_MARKER: &str = "@";

/// A parsed `.lens` fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LensFixture {
    /// Optional title from `# Title` header
    pub title: Option<String>,
    /// Catalog entries from `> term ID: display`, in file order
    pub terms: Vec<TermDirective>,
    /// Phrase from `> annotation: phrase`
    pub annotation: Option<String>,
    /// Set by a bare `> open` directive
    pub is_open: bool,
    /// Clause text with markers removed
    pub text: String,
    /// Expected typed segments, in text order
    pub spans: Vec<SpanMarker>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermDirective {
    pub id: String,
    pub display: String,
    /// Source line for error reporting
    pub source_line: usize,
}

/// A span marker extracted from `«ID:text»` syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpanMarker {
    /// Term id, or [`ANNOTATION_MARKER`]
    pub id: String,
    /// The marked text content (without guillemets)
    pub text: String,
    /// Byte range in the normalized text
    pub byte_range: Range<usize>,
}

impl SpanMarker {
    pub fn is_annotation(&self) -> bool {
        self.id == ANNOTATION_MARKER
    }

    /// Stable reference used in the expected-failures ledger, e.g. `DGCL@4..8`.
    pub fn reference(&self) -> String {
        format!("{}@{}..{}", self.id, self.byte_range.start, self.byte_range.end)
    }
}

impl LensFixture {
    /// Catalog built from the term directives.
    pub fn catalog(&self) -> TermCatalog {
        self.terms
            .iter()
            .map(|t| DefinedTerm::new(t.id.clone(), t.display.clone()))
            .collect()
    }

    pub fn annotation_spec(&self) -> Option<AnnotationSpec> {
        self.annotation
            .as_ref()
            .map(|phrase| AnnotationSpec::new(phrase.clone(), String::new()))
    }

    pub fn term_spans(&self) -> impl Iterator<Item = &SpanMarker> {
        self.spans.iter().filter(|s| !s.is_annotation())
    }

    pub fn annotation_span(&self) -> Option<&SpanMarker> {
        self.spans.iter().find(|s| s.is_annotation())
    }
}
