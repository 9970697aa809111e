//! Segmentation and overlay engine for annotated legal clause text.
//!
//! Given an immutable clause, the engine locates one highlighted annotation
//! phrase and the first occurrence of every defined term, and returns a flat,
//! ordered, non-overlapping list of [`Segment`]s. Explainer prose goes through
//! a separate, simpler pass that expands `[[concept:slug]]` / `[[case:id]]`
//! tokens into card [`Node`]s.
//!
//! Nothing here performs I/O or fails: every degenerate input (missing phrase,
//! unknown term, malformed token) falls back to plain text.
//!
//! ## Modules
//!
//! - [`catalog`] - [`TermCatalog`] with longest-match-first ordering
//! - [`segment`] - [`Segment`] and the single-pass [`apply_matcher`] scanner
//! - [`overlay`] - annotation and term overlays, [`segment_clause`]
//! - [`embed`] - embed-token parser for explainer prose
//! - [`render`] - visitor seams for UI layers
//! - [`toggle`] - single-slot annotation open state
//!
//! ## Example
//!
//! ```
//! use clause_lens::{segment_clause, AnnotationSpec, DefinedTerm, Segment, TermCatalog};
//!
//! let catalog = TermCatalog::new(vec![
//!     DefinedTerm::new("AS", "Acquisition Sub"),
//!     DefinedTerm::new("Co", "Company"),
//! ]);
//! let ann = AnnotationSpec::new("merged with and into the Company", "Forward triangular.");
//! let text = "Acquisition Sub shall be merged with and into the Company";
//!
//! let segments = segment_clause(text, Some(&ann), false, &catalog);
//! assert_eq!(
//!     segments,
//!     vec![
//!         Segment::term("AS", "Acquisition Sub"),
//!         Segment::plain(" shall be "),
//!         Segment::annotation("merged with and into the Company", false),
//!     ]
//! );
//! ```

pub mod catalog;
mod display;
pub mod embed;
pub mod overlay;
pub mod render;
pub mod segment;
pub mod toggle;

pub use catalog::{DefinedTerm, TermCatalog};
pub use display::{DisplayConfig, SegmentDisplay};
pub use embed::{
    embed_tokens, paragraphs, parse_embeds, tokenize_embeds, EmbedKind, EmbedPiece, EmbedToken,
    Node,
};
pub use overlay::{
    apply_annotation, apply_terms, segment_clause, AnnotationMatcher, AnnotationSpec, TermMatcher,
};
pub use render::{
    concat_segments, segment_ranges, walk_nodes, walk_segments, NodeVisitor, SegmentVisitor,
};
pub use segment::{apply_matcher, Segment, SegmentMatcher};
pub use toggle::{AnnotationToggle, ToggleState};
