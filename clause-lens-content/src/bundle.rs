//! Static content bundle.
//!
//! The bundle is the fallback content source: it is always available, and
//! every store query that fails or comes back empty is answered from here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ContentError, ContentResult};
use crate::model::{
    CaseRecord, Clause, ClauseSection, ConceptRecord, Explainer, Level, NegotiationPoint,
    Provision, QaItem, TermRecord, WarStory,
};

const BUILTIN_RON: &str = include_str!("../data/builtin.ron");

/// All content for the static fallback, deserialized from RON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentBundle {
    #[serde(default)]
    pub provisions: Vec<Provision>,
    #[serde(default)]
    pub sections: Vec<ClauseSection>,
    #[serde(default)]
    pub terms: Vec<TermRecord>,
    #[serde(default)]
    pub concepts: Vec<ConceptRecord>,
    #[serde(default)]
    pub cases: Vec<CaseRecord>,
    #[serde(default)]
    pub explainers: Vec<Explainer>,
    #[serde(default)]
    pub negotiation_points: Vec<NegotiationPoint>,
    #[serde(default)]
    pub qa: Vec<QaItem>,
    #[serde(default)]
    pub war_stories: Vec<WarStory>,
}

impl ContentBundle {
    /// The bundle compiled into this crate.
    pub fn builtin() -> ContentResult<Self> {
        Self::from_ron(BUILTIN_RON)
    }

    pub fn from_ron(source: &str) -> ContentResult<Self> {
        Ok(ron::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> ContentResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron(&source)
    }

    pub fn provision(&self, id: &str) -> Option<&Provision> {
        self.provisions.iter().find(|p| p.id == id)
    }

    pub fn section(&self, provision_id: &str) -> Option<&ClauseSection> {
        self.sections.iter().find(|s| s.provision_id == provision_id)
    }

    /// Clauses for a provision, empty when the provision has no section.
    pub fn clauses(&self, provision_id: &str) -> &[Clause] {
        self.section(provision_id)
            .map(|s| s.items.as_slice())
            .unwrap_or(&[])
    }

    pub fn clause(&self, clause_id: &str) -> Option<&Clause> {
        self.sections
            .iter()
            .flat_map(|s| s.items.iter())
            .find(|c| c.id == clause_id)
    }

    pub fn term(&self, id: &str) -> Option<&TermRecord> {
        self.terms.iter().find(|t| t.id == id)
    }

    pub fn concept(&self, slug: &str) -> Option<&ConceptRecord> {
        self.concepts.iter().find(|c| c.slug == slug)
    }

    /// Concepts attached to a provision (all concepts for `None`), by `sort_order`.
    pub fn concepts_for(&self, provision_id: Option<&str>) -> Vec<ConceptRecord> {
        let mut concepts: Vec<ConceptRecord> = self
            .concepts
            .iter()
            .filter(|c| provision_id.map_or(true, |id| c.provision_ids.iter().any(|p| p == id)))
            .cloned()
            .collect();
        concepts.sort_by_key(|c| c.sort_order);
        concepts
    }

    pub fn case(&self, id: &str) -> Option<&CaseRecord> {
        self.cases.iter().find(|c| c.id == id)
    }

    /// Cases attached to a provision (all cases for `None`), newest first.
    pub fn cases_for(&self, provision_id: Option<&str>) -> Vec<CaseRecord> {
        let mut cases: Vec<CaseRecord> = self
            .cases
            .iter()
            .filter(|c| provision_id.map_or(true, |id| c.provisions.iter().any(|p| p == id)))
            .cloned()
            .collect();
        cases.sort_by_key(|c| std::cmp::Reverse(c.year));
        cases
    }

    pub fn explainer(&self, provision_id: &str, level: Level) -> Option<&Explainer> {
        self.explainers
            .iter()
            .find(|e| e.provision_id == provision_id && e.level == level)
    }

    pub fn negotiation_points(&self, provision_id: &str) -> Vec<NegotiationPoint> {
        let mut points: Vec<NegotiationPoint> = self
            .negotiation_points
            .iter()
            .filter(|p| p.provision_id == provision_id)
            .cloned()
            .collect();
        points.sort_by_key(|p| p.sort_order);
        points
    }

    /// Q&A for a provision at one level, by `sort_order`.
    pub fn qa_for(&self, provision_id: &str, level: Level) -> Vec<QaItem> {
        let mut items: Vec<QaItem> = self
            .qa
            .iter()
            .filter(|q| q.provision_id == provision_id && q.level == level)
            .cloned()
            .collect();
        items.sort_by_key(|q| q.sort_order);
        items
    }

    /// War stories for a provision at one level, by `sort_order`.
    pub fn war_stories_for(&self, provision_id: &str, level: Level) -> Vec<WarStory> {
        let mut stories: Vec<WarStory> = self
            .war_stories
            .iter()
            .filter(|w| w.provision_id == provision_id && w.level == level)
            .cloned()
            .collect();
        stories.sort_by_key(|w| w.sort_order);
        stories
    }
}
