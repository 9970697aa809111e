//! Content store seam.
//!
//! A store is an editable content source that takes priority over the static
//! bundle. Implementations report failures as [`ContentError::Store`]; the
//! resolver treats an error and an empty answer the same way.
//!
//! [`ContentError::Store`]: crate::ContentError::Store

use crate::error::ContentResult;
use crate::model::{
    AnnotationRow, CaseRecord, Clause, ConceptRecord, Explainer, Level, NegotiationPoint, QaItem,
    TermRecord, WarStory,
};

pub trait ContentStore {
    /// Clauses of a provision, in display order.
    fn clauses(&self, provision_id: &str) -> ContentResult<Vec<Clause>>;

    fn annotation_rows(&self, provision_id: &str) -> ContentResult<Vec<AnnotationRow>>;

    fn defined_terms(&self) -> ContentResult<Vec<TermRecord>>;

    fn explainer(&self, provision_id: &str, level: Level) -> ContentResult<Option<Explainer>>;

    /// Concepts for a provision, or every concept for `None`.
    fn concepts(&self, provision_id: Option<&str>) -> ContentResult<Vec<ConceptRecord>>;

    /// Cases for a provision, or every case for `None`.
    fn cases(&self, provision_id: Option<&str>) -> ContentResult<Vec<CaseRecord>>;

    fn negotiation_points(&self, provision_id: &str) -> ContentResult<Vec<NegotiationPoint>>;

    /// Q&A for a provision at `level`, by `sort_order`.
    fn qa(&self, provision_id: &str, level: Level) -> ContentResult<Vec<QaItem>>;

    fn war_stories(&self, provision_id: &str, level: Level) -> ContentResult<Vec<WarStory>>;
}

/// Records addressed by a unique key for upserts.
trait Keyed {
    fn key(&self) -> &str;
}

macro_rules! keyed {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(impl Keyed for $ty {
            fn key(&self) -> &str {
                &self.$field
            }
        })*
    };
}

keyed! {
    AnnotationRow => id,
    TermRecord => id,
    ConceptRecord => slug,
    CaseRecord => id,
    NegotiationPoint => id,
    QaItem => id,
    WarStory => id,
}

/// Clause row: a clause plus the provision it is shown under.
#[derive(Debug, Clone)]
struct ClauseRow {
    provision_id: String,
    sort_order: u32,
    clause: Clause,
}

impl Keyed for ClauseRow {
    fn key(&self) -> &str {
        &self.clause.id
    }
}

/// Replace the record with the same key, or append.
fn upsert<T: Keyed>(records: &mut Vec<T>, record: T) {
    match records.iter_mut().find(|r| r.key() == record.key()) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

fn remove<T: Keyed>(records: &mut Vec<T>, key: &str) -> bool {
    let before = records.len();
    records.retain(|r| r.key() != key);
    records.len() != before
}

/// In-memory store with id-keyed upserts.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    clauses: Vec<ClauseRow>,
    annotations: Vec<AnnotationRow>,
    terms: Vec<TermRecord>,
    concepts: Vec<ConceptRecord>,
    cases: Vec<CaseRecord>,
    explainers: Vec<Explainer>,
    negotiation_points: Vec<NegotiationPoint>,
    qa: Vec<QaItem>,
    war_stories: Vec<WarStory>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_clause(
        &mut self,
        provision_id: impl Into<String>,
        sort_order: u32,
        clause: Clause,
    ) {
        upsert(
            &mut self.clauses,
            ClauseRow {
                provision_id: provision_id.into(),
                sort_order,
                clause,
            },
        );
    }

    pub fn upsert_annotation(&mut self, row: AnnotationRow) {
        upsert(&mut self.annotations, row);
    }

    pub fn upsert_term(&mut self, term: TermRecord) {
        upsert(&mut self.terms, term);
    }

    pub fn upsert_concept(&mut self, concept: ConceptRecord) {
        upsert(&mut self.concepts, concept);
    }

    pub fn upsert_case(&mut self, case: CaseRecord) {
        upsert(&mut self.cases, case);
    }

    /// Explainers are keyed by (provision, level).
    pub fn upsert_explainer(&mut self, explainer: Explainer) {
        match self
            .explainers
            .iter_mut()
            .find(|e| e.provision_id == explainer.provision_id && e.level == explainer.level)
        {
            Some(existing) => *existing = explainer,
            None => self.explainers.push(explainer),
        }
    }

    pub fn upsert_negotiation_point(&mut self, point: NegotiationPoint) {
        upsert(&mut self.negotiation_points, point);
    }

    pub fn upsert_qa(&mut self, item: QaItem) {
        upsert(&mut self.qa, item);
    }

    pub fn upsert_war_story(&mut self, story: WarStory) {
        upsert(&mut self.war_stories, story);
    }

    pub fn remove_clause(&mut self, clause_id: &str) -> bool {
        remove(&mut self.clauses, clause_id)
    }

    pub fn remove_annotation(&mut self, row_id: &str) -> bool {
        remove(&mut self.annotations, row_id)
    }

    pub fn remove_term(&mut self, term_id: &str) -> bool {
        remove(&mut self.terms, term_id)
    }
}

impl ContentStore for MemoryStore {
    fn clauses(&self, provision_id: &str) -> ContentResult<Vec<Clause>> {
        let mut rows: Vec<&ClauseRow> = self
            .clauses
            .iter()
            .filter(|row| row.provision_id == provision_id)
            .collect();
        rows.sort_by_key(|row| row.sort_order);
        Ok(rows.into_iter().map(|row| row.clause.clone()).collect())
    }

    fn annotation_rows(&self, provision_id: &str) -> ContentResult<Vec<AnnotationRow>> {
        Ok(self
            .annotations
            .iter()
            .filter(|row| row.provision_id == provision_id)
            .cloned()
            .collect())
    }

    fn defined_terms(&self) -> ContentResult<Vec<TermRecord>> {
        let mut terms = self.terms.clone();
        terms.sort_by(|a, b| a.term.cmp(&b.term));
        Ok(terms)
    }

    fn explainer(&self, provision_id: &str, level: Level) -> ContentResult<Option<Explainer>> {
        Ok(self
            .explainers
            .iter()
            .find(|e| e.provision_id == provision_id && e.level == level)
            .cloned())
    }

    fn concepts(&self, provision_id: Option<&str>) -> ContentResult<Vec<ConceptRecord>> {
        let mut concepts: Vec<ConceptRecord> = self
            .concepts
            .iter()
            .filter(|c| provision_id.map_or(true, |id| c.provision_ids.iter().any(|p| p == id)))
            .cloned()
            .collect();
        concepts.sort_by_key(|c| c.sort_order);
        Ok(concepts)
    }

    fn cases(&self, provision_id: Option<&str>) -> ContentResult<Vec<CaseRecord>> {
        let mut cases: Vec<CaseRecord> = self
            .cases
            .iter()
            .filter(|c| provision_id.map_or(true, |id| c.provisions.iter().any(|p| p == id)))
            .cloned()
            .collect();
        cases.sort_by_key(|c| std::cmp::Reverse(c.year));
        Ok(cases)
    }

    fn negotiation_points(&self, provision_id: &str) -> ContentResult<Vec<NegotiationPoint>> {
        let mut points: Vec<NegotiationPoint> = self
            .negotiation_points
            .iter()
            .filter(|p| p.provision_id == provision_id)
            .cloned()
            .collect();
        points.sort_by_key(|p| p.sort_order);
        Ok(points)
    }

    fn qa(&self, provision_id: &str, level: Level) -> ContentResult<Vec<QaItem>> {
        let mut items: Vec<QaItem> = self
            .qa
            .iter()
            .filter(|q| q.provision_id == provision_id && q.level == level)
            .cloned()
            .collect();
        items.sort_by_key(|q| q.sort_order);
        Ok(items)
    }

    fn war_stories(&self, provision_id: &str, level: Level) -> ContentResult<Vec<WarStory>> {
        let mut stories: Vec<WarStory> = self
            .war_stories
            .iter()
            .filter(|w| w.provision_id == provision_id && w.level == level)
            .cloned()
            .collect();
        stories.sort_by_key(|w| w.sort_order);
        Ok(stories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(id: &str, text: &str) -> Clause {
        Clause {
            id: id.into(),
            label: format!("§ {}", id),
            text: text.into(),
            annotations: Default::default(),
        }
    }

    fn row(id: &str, clause_id: &str, level: Level, phrase: &str) -> AnnotationRow {
        AnnotationRow {
            id: id.into(),
            provision_id: "structure".into(),
            clause_id: clause_id.into(),
            level,
            phrase: phrase.into(),
            note: "note".into(),
        }
    }

    #[test]
    fn clauses_come_back_in_sort_order() {
        let mut store = MemoryStore::new();
        store.upsert_clause("structure", 2, clause("b", "second"));
        store.upsert_clause("structure", 1, clause("a", "first"));
        store.upsert_clause("economics", 0, clause("z", "elsewhere"));

        let ids: Vec<String> = store
            .clauses("structure")
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn upsert_replaces_by_id() {
        let mut store = MemoryStore::new();
        store.upsert_annotation(row("r1", "c1", Level::Junior, "old"));
        store.upsert_annotation(row("r1", "c1", Level::Junior, "new"));
        store.upsert_annotation(row("r2", "c1", Level::Mid, "other"));

        let rows = store.annotation_rows("structure").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].phrase, "new");
    }

    #[test]
    fn explainers_upsert_per_level() {
        let mut store = MemoryStore::new();
        for (level, headline) in [(Level::Junior, "j1"), (Level::Mid, "m"), (Level::Junior, "j2")] {
            store.upsert_explainer(Explainer {
                provision_id: "structure".into(),
                level,
                headline: headline.into(),
                body: String::new(),
            });
        }
        let junior = store.explainer("structure", Level::Junior).unwrap();
        assert_eq!(junior.map(|e| e.headline), Some("j2".to_string()));
        assert!(store.explainer("structure", Level::Senior).unwrap().is_none());
    }

    #[test]
    fn qa_is_filtered_by_level_and_sorted() {
        let mut store = MemoryStore::new();
        for (id, level, sort_order) in [
            ("q2", Level::Mid, 2),
            ("q1", Level::Mid, 1),
            ("q3", Level::Senior, 0),
        ] {
            store.upsert_qa(QaItem {
                id: id.into(),
                provision_id: "structure".into(),
                level,
                question: format!("{}?", id),
                answer: String::new(),
                concepts: vec![],
                sort_order,
            });
        }

        let ids: Vec<String> = store
            .qa("structure", Level::Mid)
            .unwrap()
            .into_iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, ["q1", "q2"]);
        assert!(store.qa("structure", Level::Junior).unwrap().is_empty());
        assert!(store.war_stories("structure", Level::Mid).unwrap().is_empty());
    }

    #[test]
    fn remove_reports_whether_anything_was_removed() {
        let mut store = MemoryStore::new();
        store.upsert_clause("structure", 0, clause("a", "text"));
        assert!(store.remove_clause("a"));
        assert!(!store.remove_clause("a"));
        assert!(store.clauses("structure").unwrap().is_empty());
    }
}
