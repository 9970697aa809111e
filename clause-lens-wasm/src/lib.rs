use clause_lens::{
    embed_tokens, parse_embeds as parse_embed_nodes, segment_clause as segment_clause_text,
    segment_ranges, AnnotationSpec, DefinedTerm, Node, Segment, TermCatalog,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

// ============================================================================
// INPUT TYPES
// ============================================================================

/// A catalog entry as sent by the front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasmTerm {
    pub id: String,
    /// Accepts the content record's `term` field as well
    #[serde(alias = "term")]
    pub display: String,
}

/// Annotation for the clause being segmented.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WasmAnnotation {
    pub phrase: String,
    #[serde(default)]
    pub note: String,
}

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// One segment with its byte offsets in the clause text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WasmSegment {
    /// `plain_text`, `term_ref` or `annotation_region`
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentResult {
    pub segments: Vec<WasmSegment>,
    pub term_count: usize,
    pub has_annotation: bool,
}

/// Explainer node; cards carry the caller's own concept/case object back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WasmNode {
    Paragraph { text: String },
    ConceptCard { slug: String, concept: Option<Value> },
    CaseCard { id: String, case: Option<Value> },
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedResult {
    pub nodes: Vec<WasmNode>,
    pub unresolved_count: usize,
}

// ============================================================================
// SEGMENTATION API
// ============================================================================

/// Segment one clause.
///
/// `annotation` is `{ phrase, note }` or null; `terms` is an array of
/// `{ id, display }` (or `{ id, term }`) in catalog order. Inputs that fail to
/// deserialize are treated as absent, so the clause still renders as text.
#[wasm_bindgen]
pub fn segment_clause(text: &str, annotation: JsValue, is_open: bool, terms: JsValue) -> JsValue {
    init();
    let annotation: Option<WasmAnnotation> = from_js_or_default(annotation, "annotation");
    let terms: Vec<WasmTerm> = from_js_or_default(terms, "terms");
    let result = segment_clause_internal(text, annotation.as_ref(), is_open, &terms);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn segment_clause_internal(
    text: &str,
    annotation: Option<&WasmAnnotation>,
    is_open: bool,
    terms: &[WasmTerm],
) -> SegmentResult {
    let catalog: TermCatalog = terms
        .iter()
        .map(|t| DefinedTerm::new(t.id.clone(), t.display.clone()))
        .collect();
    let spec = annotation.map(|a| AnnotationSpec::new(a.phrase.clone(), a.note.clone()));

    let segments = segment_clause_text(text, spec.as_ref(), is_open, &catalog);
    let ranges = segment_ranges(&segments);

    let segments: Vec<WasmSegment> = segments
        .iter()
        .zip(ranges)
        .map(|(segment, range)| {
            let (kind, term_id, is_open) = match segment {
                Segment::PlainText { .. } => ("plain_text", None, None),
                Segment::TermRef { term_id, .. } => ("term_ref", Some(term_id.to_string()), None),
                Segment::AnnotationRegion { is_open, .. } => {
                    ("annotation_region", None, Some(*is_open))
                }
            };
            WasmSegment {
                kind,
                text: segment.text().to_string(),
                term_id,
                is_open,
                start: range.start,
                end: range.end,
            }
        })
        .collect();

    SegmentResult {
        term_count: segments.iter().filter(|s| s.term_id.is_some()).count(),
        has_annotation: segments.iter().any(|s| s.is_open.is_some()),
        segments,
    }
}

// ============================================================================
// EXPLAINER API
// ============================================================================

/// Parse an explainer body into paragraphs and cards.
///
/// `concepts` is an array of objects with a `slug` field, `cases` an array of
/// objects with an `id` field. Unknown references become cards with a null
/// payload.
#[wasm_bindgen]
pub fn parse_embeds(body: &str, concepts: JsValue, cases: JsValue) -> JsValue {
    init();
    let concepts: Vec<Value> = from_js_or_default(concepts, "concepts");
    let cases: Vec<Value> = from_js_or_default(cases, "cases");
    let result = parse_embeds_internal(body, &concepts, &cases);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn parse_embeds_internal(body: &str, concepts: &[Value], cases: &[Value]) -> EmbedResult {
    let nodes = parse_embed_nodes(
        body,
        |slug| lookup(concepts, "slug", slug),
        |id| lookup(cases, "id", id),
    );

    // cards come out in token order, one per token
    let mut token_ids = embed_tokens(body).into_iter().map(|t| t.id.to_string());
    let nodes: Vec<WasmNode> = nodes
        .into_iter()
        .map(|node| match node {
            Node::Paragraph { text } => WasmNode::Paragraph {
                text: text.to_string(),
            },
            Node::ConceptCard { concept } => WasmNode::ConceptCard {
                slug: token_ids.next().unwrap_or_default(),
                concept,
            },
            Node::CaseCard { case } => WasmNode::CaseCard {
                id: token_ids.next().unwrap_or_default(),
                case,
            },
        })
        .collect();

    EmbedResult {
        unresolved_count: nodes
            .iter()
            .filter(|n| {
                matches!(
                    n,
                    WasmNode::ConceptCard { concept: None, .. }
                        | WasmNode::CaseCard { case: None, .. }
                )
            })
            .count(),
        nodes,
    }
}

fn lookup(items: &[Value], key: &str, wanted: &str) -> Option<Value> {
    items
        .iter()
        .find(|item| item.get(key).and_then(Value::as_str) == Some(wanted))
        .cloned()
}

fn from_js_or_default<T>(value: JsValue, what: &str) -> T
where
    T: Default + for<'de> Deserialize<'de>,
{
    if value.is_null() || value.is_undefined() {
        return T::default();
    }
    serde_wasm_bindgen::from_value(value).unwrap_or_else(|err| {
        tracing::debug!(input = what, error = %err, "ignoring malformed input");
        T::default()
    })
}
