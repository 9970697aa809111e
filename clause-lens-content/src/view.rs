//! View assembly for the clause tab, explainer prose and Q&A answers.

use clause_lens::{
    parse_embeds, segment_clause, AnnotationSpec, AnnotationToggle, DefinedTerm, Node, Segment,
    TermCatalog,
};
use serde::Serialize;

use crate::bundle::ContentBundle;
use crate::model::{CaseRecord, Clause, ConceptRecord, Explainer, Level, QaItem, TermRecord};
use crate::resolver::AnnotationIndex;

/// Identifies one annotation's open state: a clause at a level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AnnotationKey {
    pub clause_id: String,
    pub level: Level,
}

impl AnnotationKey {
    pub fn new(clause_id: impl Into<String>, level: Level) -> Self {
        Self {
            clause_id: clause_id.into(),
            level,
        }
    }
}

/// One rendered clause on the clause tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClauseView<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub segments: Vec<Segment<'a>>,
    pub is_open: bool,
    /// The annotation shown under the clause while it is open
    pub note: Option<&'a AnnotationSpec>,
}

/// Build a catalog whose metadata is the full term record.
pub fn term_catalog(records: impl IntoIterator<Item = TermRecord>) -> TermCatalog<TermRecord> {
    records
        .into_iter()
        .map(|record| DefinedTerm::with_meta(record.id.clone(), record.term.clone(), record))
        .collect()
}

/// Segment every clause at `level`, taking open state from `toggle`.
pub fn annotated_clauses<'a, M>(
    clauses: &'a [Clause],
    annotations: &'a AnnotationIndex,
    level: Level,
    catalog: &'a TermCatalog<M>,
    toggle: &AnnotationToggle<AnnotationKey>,
) -> Vec<ClauseView<'a>> {
    clauses
        .iter()
        .map(|clause| {
            let annotation = annotations.resolve(clause, level);
            let is_open = toggle.is_open(&AnnotationKey::new(clause.id.as_str(), level));
            ClauseView {
                id: &clause.id,
                label: &clause.label,
                segments: segment_clause(&clause.text, annotation, is_open, catalog),
                is_open,
                note: annotation.filter(|_| is_open),
            }
        })
        .collect()
}

/// Explainer prose with cards resolved against the bundle.
pub fn explainer_nodes<'a>(
    explainer: &'a Explainer,
    bundle: &'a ContentBundle,
) -> Vec<Node<'a, &'a ConceptRecord, &'a CaseRecord>> {
    parse_embeds(
        &explainer.body,
        |slug| bundle.concept(slug),
        |id| bundle.case(id),
    )
}

/// A Q&A answer with cards resolved against the bundle.
pub fn qa_answer_nodes<'a>(
    item: &'a QaItem,
    bundle: &'a ContentBundle,
) -> Vec<Node<'a, &'a ConceptRecord, &'a CaseRecord>> {
    parse_embeds(&item.answer, |slug| bundle.concept(slug), |id| bundle.case(id))
}
