//! Annotation and defined-term overlays for clause text.
//!
//! The annotation pass always runs first. Its region is a typed segment, so the
//! term pass (which only scans plain text) can never start or end a term
//! reference inside it.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::catalog::{DefinedTerm, TermCatalog};
use crate::segment::{apply_matcher, find_exact, Segment, SegmentMatcher};

/// The highlighted phrase for one (clause, level) pair and its explanatory note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationSpec {
    /// Must occur verbatim in the clause text to have any effect
    pub phrase: String,
    pub note: String,
}

impl AnnotationSpec {
    pub fn new(phrase: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            note: note.into(),
        }
    }
}

/// Matches the annotation phrase and wraps it as an [`Segment::AnnotationRegion`].
pub struct AnnotationMatcher<'s> {
    phrase: &'s str,
    is_open: bool,
}

impl<'s> AnnotationMatcher<'s> {
    pub fn new(phrase: &'s str, is_open: bool) -> Self {
        Self { phrase, is_open }
    }
}

impl<'a, 's> SegmentMatcher<'a> for AnnotationMatcher<'s> {
    fn find_first(&self, text: &str) -> Option<Range<usize>> {
        find_exact(text, self.phrase)
    }

    fn wrap(&self, matched: &'a str) -> Segment<'a> {
        Segment::annotation(matched, self.is_open)
    }
}

/// Matches one defined term's display string.
pub struct TermMatcher<'a> {
    id: &'a str,
    display: &'a str,
}

impl<'a> TermMatcher<'a> {
    pub fn new<M>(term: &'a DefinedTerm<M>) -> Self {
        Self {
            id: &term.id,
            display: &term.display,
        }
    }
}

impl<'a> SegmentMatcher<'a> for TermMatcher<'a> {
    fn find_first(&self, text: &str) -> Option<Range<usize>> {
        find_exact(text, self.display)
    }

    fn wrap(&self, matched: &'a str) -> Segment<'a> {
        Segment::term(self.id, matched)
    }
}

/// Split `text` around its annotation phrase.
///
/// Without a spec, or when the phrase is empty or absent, the result is the
/// single segment `[PlainText(text)]`. `is_open` is UI toggle state and is
/// copied onto the region as-is.
pub fn apply_annotation<'a>(
    text: &'a str,
    spec: Option<&AnnotationSpec>,
    is_open: bool,
) -> Vec<Segment<'a>> {
    let segments = vec![Segment::plain(text)];
    let spec = match spec {
        Some(spec) => spec,
        None => return segments,
    };

    let segments = apply_matcher(segments, &AnnotationMatcher::new(&spec.phrase, is_open));
    if segments.iter().all(Segment::is_plain) {
        tracing::trace!(phrase = %spec.phrase, "annotation phrase not found in clause text");
    }
    segments
}

/// Wrap the first occurrence of each catalog term found in plain segments.
///
/// Terms are applied one pass each in catalog priority order, so longer terms
/// claim their text before any shorter term they contain.
pub fn apply_terms<'a, M>(
    segments: Vec<Segment<'a>>,
    catalog: &'a TermCatalog<M>,
) -> Vec<Segment<'a>> {
    catalog.iter().fold(segments, |segments, term| {
        apply_matcher(segments, &TermMatcher::new(term))
    })
}

/// Full clause pipeline: annotation overlay, then term overlay.
pub fn segment_clause<'a, M>(
    text: &'a str,
    annotation: Option<&AnnotationSpec>,
    is_open: bool,
    catalog: &'a TermCatalog<M>,
) -> Vec<Segment<'a>> {
    apply_terms(apply_annotation(text, annotation, is_open), catalog)
}
