//! Store-first content resolution with static fallback.
//!
//! Every lookup asks the store when one is attached. A store error or an empty
//! answer falls back to the [`ContentBundle`], so a half-populated store never
//! blanks out a page.

use std::collections::HashMap;

use clause_lens::{AnnotationSpec, TermCatalog};
use tracing::{debug, warn};

use crate::bundle::ContentBundle;
use crate::config::StoreConfig;
use crate::error::ContentResult;
use crate::model::{
    AnnotationRow, CaseRecord, Clause, ConceptRecord, Explainer, Level, LevelAnnotations,
    NegotiationPoint, QaItem, TermRecord, WarStory,
};
use crate::store::{ContentStore, MemoryStore};
use crate::view::term_catalog;

/// Per-clause annotations that override a clause's own annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationIndex {
    by_clause: HashMap<String, LevelAnnotations>,
}

impl AnnotationIndex {
    pub fn from_rows<'r>(rows: impl IntoIterator<Item = &'r AnnotationRow>) -> Self {
        let mut index = Self::default();
        for row in rows {
            index.insert(&row.clause_id, row.level, row.spec());
        }
        index
    }

    pub fn insert(&mut self, clause_id: &str, level: Level, spec: AnnotationSpec) {
        self.by_clause
            .entry(clause_id.to_string())
            .or_default()
            .set(level, spec);
    }

    pub fn get(&self, clause_id: &str, level: Level) -> Option<&AnnotationSpec> {
        self.by_clause.get(clause_id).and_then(|a| a.get(level))
    }

    /// Index entry for the clause at `level`, else the clause's own annotation.
    pub fn resolve<'a>(&'a self, clause: &'a Clause, level: Level) -> Option<&'a AnnotationSpec> {
        self.get(&clause.id, level)
            .or_else(|| clause.annotations.get(level))
    }

    pub fn is_empty(&self) -> bool {
        self.by_clause.is_empty()
    }
}

pub struct ContentResolver<S = MemoryStore> {
    bundle: ContentBundle,
    store: Option<S>,
}

impl<S: ContentStore> ContentResolver<S> {
    /// Resolver backed by the bundle alone.
    pub fn new(bundle: ContentBundle) -> Self {
        Self {
            bundle,
            store: None,
        }
    }

    /// Attach `store` when `config` enables it.
    pub fn with_store(bundle: ContentBundle, store: S, config: &StoreConfig) -> Self {
        if !config.is_enabled() {
            debug!("content store not configured, using static bundle");
            return Self::new(bundle);
        }
        Self {
            bundle,
            store: Some(store),
        }
    }

    pub fn bundle(&self) -> &ContentBundle {
        &self.bundle
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    /// Run `query` against the store. `None` means "use the bundle".
    fn query<T>(
        &self,
        what: &'static str,
        query: impl FnOnce(&S) -> ContentResult<T>,
        is_empty: impl FnOnce(&T) -> bool,
    ) -> Option<T> {
        let store = self.store.as_ref()?;
        match query(store) {
            Ok(found) if !is_empty(&found) => Some(found),
            Ok(_) => {
                debug!(what, "store returned nothing, falling back to static bundle");
                None
            }
            Err(err) => {
                warn!(what, error = %err, "store query failed, falling back to static bundle");
                None
            }
        }
    }

    /// Clauses for a provision: caller override, then store, then bundle.
    pub fn clauses(&self, provision_id: &str, override_clauses: Option<&[Clause]>) -> Vec<Clause> {
        if let Some(clauses) = override_clauses.filter(|c| !c.is_empty()) {
            return clauses.to_vec();
        }
        self.query("clauses", |s| s.clauses(provision_id), Vec::is_empty)
            .unwrap_or_else(|| self.bundle.clauses(provision_id).to_vec())
    }

    /// Section heading: caller override, else the bundle's.
    pub fn section_label(
        &self,
        provision_id: &str,
        override_label: Option<&str>,
    ) -> Option<String> {
        override_label
            .map(str::to_string)
            .or_else(|| self.bundle.section(provision_id).map(|s| s.section.clone()))
    }

    /// Annotation overrides: caller override, then store rows. Empty means
    /// every clause uses its own annotations.
    pub fn annotations(
        &self,
        provision_id: &str,
        override_index: Option<AnnotationIndex>,
    ) -> AnnotationIndex {
        if let Some(index) = override_index {
            return index;
        }
        self.query("annotations", |s| s.annotation_rows(provision_id), Vec::is_empty)
            .map(|rows| AnnotationIndex::from_rows(&rows))
            .unwrap_or_default()
    }

    pub fn defined_terms(&self) -> Vec<TermRecord> {
        self.query("defined_terms", |s| s.defined_terms(), Vec::is_empty)
            .unwrap_or_else(|| self.bundle.terms.clone())
    }

    pub fn term(&self, id: &str) -> Option<TermRecord> {
        self.defined_terms().into_iter().find(|t| t.id == id)
    }

    /// Catalog of every defined term, with its record as metadata.
    pub fn term_catalog(&self) -> TermCatalog<TermRecord> {
        term_catalog(self.defined_terms())
    }

    pub fn explainer(&self, provision_id: &str, level: Level) -> Option<Explainer> {
        self.query(
            "explainer",
            |s| s.explainer(provision_id, level),
            Option::is_none,
        )
        .flatten()
        .or_else(|| self.bundle.explainer(provision_id, level).cloned())
    }

    pub fn concepts(&self, provision_id: Option<&str>) -> Vec<ConceptRecord> {
        self.query("concepts", |s| s.concepts(provision_id), Vec::is_empty)
            .unwrap_or_else(|| self.bundle.concepts_for(provision_id))
    }

    pub fn concept(&self, slug: &str) -> Option<ConceptRecord> {
        self.query("concepts", |s| s.concepts(None), Vec::is_empty)
            .and_then(|concepts| concepts.into_iter().find(|c| c.slug == slug))
            .or_else(|| self.bundle.concept(slug).cloned())
    }

    pub fn cases(&self, provision_id: Option<&str>) -> Vec<CaseRecord> {
        self.query("cases", |s| s.cases(provision_id), Vec::is_empty)
            .unwrap_or_else(|| self.bundle.cases_for(provision_id))
    }

    pub fn case(&self, id: &str) -> Option<CaseRecord> {
        self.query("cases", |s| s.cases(None), Vec::is_empty)
            .and_then(|cases| cases.into_iter().find(|c| c.id == id))
            .or_else(|| self.bundle.case(id).cloned())
    }

    pub fn negotiation_points(&self, provision_id: &str) -> Vec<NegotiationPoint> {
        self.query(
            "negotiation_points",
            |s| s.negotiation_points(provision_id),
            Vec::is_empty,
        )
        .unwrap_or_else(|| self.bundle.negotiation_points(provision_id))
    }

    pub fn qa(&self, provision_id: &str, level: Level) -> Vec<QaItem> {
        self.query("qa", |s| s.qa(provision_id, level), Vec::is_empty)
            .unwrap_or_else(|| self.bundle.qa_for(provision_id, level))
    }

    /// Q&A whose question or answer contains `query`, ignoring case.
    pub fn qa_matching(&self, provision_id: &str, level: Level, query: &str) -> Vec<QaItem> {
        let mut items = self.qa(provision_id, level);
        items.retain(|item| item.matches(query));
        items
    }

    pub fn war_stories(&self, provision_id: &str, level: Level) -> Vec<WarStory> {
        self.query(
            "war_stories",
            |s| s.war_stories(provision_id, level),
            Vec::is_empty,
        )
        .unwrap_or_else(|| self.bundle.war_stories_for(provision_id, level))
    }
}
