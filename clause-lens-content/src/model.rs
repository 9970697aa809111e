//! Content records.
//!
//! Records are shaped the same way whether they come from the static bundle or
//! from a store, so the resolver can hand either to the views.

use clause_lens::{paragraphs, AnnotationSpec};
use serde::{Deserialize, Serialize};

/// Reader seniority. Selects which annotation and explainer is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Junior,
    Mid,
    Senior,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Junior, Level::Mid, Level::Senior];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Junior => "junior",
            Level::Mid => "mid",
            Level::Senior => "senior",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A topic page, e.g. "Structure & Mechanics".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provision {
    pub id: String,
    pub number: u32,
    pub title: String,
    pub deal: String,
    pub deal_date: String,
    /// Agreement sections covered, e.g. "§§ 2.1–2.3"
    pub sections: String,
}

/// At most one annotation per level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelAnnotations {
    #[serde(default)]
    pub junior: Option<AnnotationSpec>,
    #[serde(default)]
    pub mid: Option<AnnotationSpec>,
    #[serde(default)]
    pub senior: Option<AnnotationSpec>,
}

impl LevelAnnotations {
    pub fn get(&self, level: Level) -> Option<&AnnotationSpec> {
        match level {
            Level::Junior => self.junior.as_ref(),
            Level::Mid => self.mid.as_ref(),
            Level::Senior => self.senior.as_ref(),
        }
    }

    pub fn set(&mut self, level: Level, spec: AnnotationSpec) {
        let slot = match level {
            Level::Junior => &mut self.junior,
            Level::Mid => &mut self.mid,
            Level::Senior => &mut self.senior,
        };
        *slot = Some(spec);
    }

    /// Present annotations with their level, in level order.
    pub fn iter(&self) -> impl Iterator<Item = (Level, &AnnotationSpec)> {
        Level::ALL
            .into_iter()
            .filter_map(move |level| self.get(level).map(|spec| (level, spec)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// One numbered section of agreement text. `text` is never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub id: String,
    pub label: String,
    pub text: String,
    #[serde(default)]
    pub annotations: LevelAnnotations,
}

/// The clauses shown on one provision's clause tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseSection {
    pub provision_id: String,
    /// Heading, e.g. "Article II"
    pub section: String,
    pub items: Vec<Clause>,
}

/// Glossary entry backing a defined term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    pub id: String,
    /// Exact string searched for in clause text
    pub term: String,
    pub short: String,
    pub long: String,
    /// Clause ids the term is defined or used in
    #[serde(default)]
    pub appears_in: Vec<String>,
    #[serde(default)]
    pub related_cases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptRecord {
    pub slug: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub provision_ids: Vec<String>,
    pub summary: String,
    pub definition: String,
    #[serde(default)]
    pub related_concepts: Vec<String>,
    #[serde(default)]
    pub related_cases: Vec<String>,
    #[serde(default)]
    pub sort_order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: String,
    pub name: String,
    pub court: String,
    pub year: u16,
    pub cite: String,
    #[serde(default)]
    pub provisions: Vec<String>,
    pub summary: String,
    #[serde(default)]
    pub holdings: Vec<String>,
}

/// Level-specific prose for a provision. `body` may contain embed tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explainer {
    pub provision_id: String,
    pub level: Level,
    pub headline: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationPoint {
    pub id: String,
    pub provision_id: String,
    pub title: String,
    pub deal_context: String,
    pub buyer_position: String,
    pub seller_position: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub sort_order: u32,
}

/// One question on the Q&A tab. `answer` may contain embed tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaItem {
    pub id: String,
    pub provision_id: String,
    pub level: Level,
    pub question: String,
    pub answer: String,
    /// Free-form topic labels, not concept slugs
    #[serde(default)]
    pub concepts: Vec<String>,
    #[serde(default)]
    pub sort_order: u32,
}

impl QaItem {
    /// Case-insensitive substring match on question or answer. An empty query
    /// matches everything.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.question.to_lowercase().contains(&query)
            || self.answer.to_lowercase().contains(&query)
    }
}

/// Practitioner anecdote. `story` paragraphs are separated by blank lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarStory {
    pub id: String,
    pub provision_id: String,
    pub level: Level,
    pub title: String,
    pub story: String,
    #[serde(default)]
    pub concepts: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub sort_order: u32,
}

impl WarStory {
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        paragraphs(&self.story)
    }
}

/// Store-shaped annotation: one row per (clause, level).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRow {
    pub id: String,
    pub provision_id: String,
    pub clause_id: String,
    pub level: Level,
    pub phrase: String,
    pub note: String,
}

impl AnnotationRow {
    pub fn spec(&self) -> AnnotationSpec {
        AnnotationSpec::new(self.phrase.clone(), self.note.clone())
    }
}
