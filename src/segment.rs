//! Typed segments and the single-pass scanner that produces them.
//!
//! A segment list is a lossless, ordered view over an immutable source text:
//! concatenating [`Segment::text`] of every segment yields the source again.
//! Overlays never rewrite the source; they only split [`Segment::PlainText`]
//! entries into smaller plain pieces around one newly typed segment.

use std::ops::Range;

use serde::Serialize;

/// One typed, contiguous piece of a clause.
///
/// Every string is borrowed from the source text, so a segment list costs one
/// small allocation per render and never copies clause prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment<'a> {
    /// Inert prose, still eligible for later matcher passes.
    PlainText { text: &'a str },
    /// First occurrence of a defined term.
    TermRef { term_id: &'a str, label: &'a str },
    /// The highlighted annotation phrase. Opaque to every later pass.
    AnnotationRegion { label: &'a str, is_open: bool },
}

impl<'a> Segment<'a> {
    pub fn plain(text: &'a str) -> Self {
        Segment::PlainText { text }
    }

    pub fn term(term_id: &'a str, label: &'a str) -> Self {
        Segment::TermRef { term_id, label }
    }

    pub fn annotation(label: &'a str, is_open: bool) -> Self {
        Segment::AnnotationRegion { label, is_open }
    }

    /// The slice of source text this segment covers.
    pub fn text(&self) -> &'a str {
        match *self {
            Segment::PlainText { text } => text,
            Segment::TermRef { label, .. } => label,
            Segment::AnnotationRegion { label, .. } => label,
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, Segment::PlainText { .. })
    }

    /// Term id for [`Segment::TermRef`], `None` otherwise.
    pub fn term_id(&self) -> Option<&'a str> {
        match *self {
            Segment::TermRef { term_id, .. } => Some(term_id),
            _ => None,
        }
    }
}

/// Locates one kind of typed segment inside plain text.
///
/// Implement this trait to add a new overlay pass. The scanner only ever hands
/// plain text to [`SegmentMatcher::find_first`] and calls
/// [`SegmentMatcher::wrap`] with exactly the matched slice.
pub trait SegmentMatcher<'a> {
    /// Byte range of the first match in `text`, or `None`.
    ///
    /// Must never report an empty range.
    fn find_first(&self, text: &str) -> Option<Range<usize>>;

    /// Build the typed segment covering `matched`.
    fn wrap(&self, matched: &'a str) -> Segment<'a>;
}

/// Run one matcher pass over `segments`.
///
/// Plain segments are scanned in order and the first one that yields a match is
/// split into prefix, typed segment and suffix (empty pieces are dropped). The
/// pass stops at that first hit, so one invocation claims at most one occurrence
/// across the whole text. Typed segments are copied through untouched.
pub fn apply_matcher<'a, M>(segments: Vec<Segment<'a>>, matcher: &M) -> Vec<Segment<'a>>
where
    M: SegmentMatcher<'a> + ?Sized,
{
    let mut out = Vec::with_capacity(segments.len() + 2);
    let mut claimed = false;

    for segment in segments {
        let text = match segment {
            Segment::PlainText { text } if !claimed => text,
            other => {
                out.push(other);
                continue;
            }
        };

        match matcher
            .find_first(text)
            .and_then(|range| split_at_range(text, range))
        {
            Some((prefix, matched, suffix)) => {
                claimed = true;
                if !prefix.is_empty() {
                    out.push(Segment::plain(prefix));
                }
                out.push(matcher.wrap(matched));
                if !suffix.is_empty() {
                    out.push(Segment::plain(suffix));
                }
            }
            None => out.push(segment),
        }
    }

    out
}

/// Split `text` around `range`, rejecting empty, out-of-bounds or
/// non-char-boundary ranges.
fn split_at_range(text: &str, range: Range<usize>) -> Option<(&str, &str, &str)> {
    if range.start >= range.end {
        return None;
    }
    let matched = text.get(range.clone())?;
    Some((&text[..range.start], matched, &text[range.end..]))
}

/// Exact, case-sensitive substring matcher shared by the annotation and term
/// passes. An empty needle never matches.
pub(crate) fn find_exact(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }
    haystack
        .find(needle)
        .map(|start| start..start + needle.len())
}
