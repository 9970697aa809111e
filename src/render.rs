//! Visitor seams for UI layers.
//!
//! A renderer implements [`SegmentVisitor`] (clause text) or [`NodeVisitor`]
//! (explainer prose) and is walked over the engine output. Click wiring lives
//! entirely in the visitor: term references emit their id, annotation regions
//! emit a toggle.

use std::ops::Range;

use crate::embed::Node;
use crate::segment::Segment;

pub trait SegmentVisitor<'a> {
    fn plain(&mut self, text: &'a str);
    fn term(&mut self, term_id: &'a str, label: &'a str);
    fn annotation(&mut self, label: &'a str, is_open: bool);
}

pub trait NodeVisitor<'a, C, K> {
    fn paragraph(&mut self, text: &'a str);
    /// `None` means the reference did not resolve.
    fn concept_card(&mut self, concept: Option<&C>);
    /// `None` means the reference did not resolve.
    fn case_card(&mut self, case: Option<&K>);
}

pub fn walk_segments<'a, V>(segments: &[Segment<'a>], visitor: &mut V)
where
    V: SegmentVisitor<'a> + ?Sized,
{
    for segment in segments {
        match *segment {
            Segment::PlainText { text } => visitor.plain(text),
            Segment::TermRef { term_id, label } => visitor.term(term_id, label),
            Segment::AnnotationRegion { label, is_open } => visitor.annotation(label, is_open),
        }
    }
}

pub fn walk_nodes<'a, C, K, V>(nodes: &[Node<'a, C, K>], visitor: &mut V)
where
    V: NodeVisitor<'a, C, K> + ?Sized,
{
    for node in nodes {
        match node {
            Node::Paragraph { text } => visitor.paragraph(*text),
            Node::ConceptCard { concept } => visitor.concept_card(concept.as_ref()),
            Node::CaseCard { case } => visitor.case_card(case.as_ref()),
        }
    }
}

/// Byte range of every segment within the source text it was cut from.
pub fn segment_ranges(segments: &[Segment<'_>]) -> Vec<Range<usize>> {
    let mut offset = 0;
    segments
        .iter()
        .map(|segment| {
            let start = offset;
            offset += segment.text().len();
            start..offset
        })
        .collect()
}

/// Reassemble the source text. Equal to the input of a lossless segmentation.
pub fn concat_segments(segments: &[Segment<'_>]) -> String {
    segments.iter().map(Segment::text).collect()
}
