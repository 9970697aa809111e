//! Content lint.
//!
//! The engine fails soft on bad content: a phrase that is not in its clause is
//! silently not highlighted, and an unknown embed renders as nothing. This lint
//! surfaces those cases before they ship.

use std::collections::HashMap;
use std::fmt;

use clause_lens::{embed_tokens, EmbedKind};

use crate::bundle::ContentBundle;
use crate::model::Level;

/// Prose that can carry embed tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedSource {
    Explainer,
    Qa { id: String },
    WarStory { id: String },
}

impl fmt::Display for EmbedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbedSource::Explainer => f.write_str("explainer"),
            EmbedSource::Qa { id } => write!(f, "qa {}", id),
            EmbedSource::WarStory { id } => write!(f, "war story {}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentIssue {
    EmptyAnnotationPhrase {
        clause_id: String,
        level: Level,
    },
    AnnotationPhraseNotFound {
        clause_id: String,
        level: Level,
        phrase: String,
    },
    UnknownConcept {
        source: EmbedSource,
        provision_id: String,
        level: Level,
        slug: String,
    },
    UnknownCase {
        source: EmbedSource,
        provision_id: String,
        level: Level,
        case_id: String,
    },
    /// Several term ids share one display string; catalog order decides
    /// which id claims the first occurrence.
    DuplicateTermDisplay {
        display: String,
        term_ids: Vec<String>,
    },
    UnknownTermClause {
        term_id: String,
        clause_id: String,
    },
}

impl fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentIssue::EmptyAnnotationPhrase { clause_id, level } => {
                write!(f, "{} [{}]: annotation phrase is empty", clause_id, level)
            }
            ContentIssue::AnnotationPhraseNotFound {
                clause_id,
                level,
                phrase,
            } => write!(
                f,
                "{} [{}]: annotation phrase {:?} does not occur in the clause text",
                clause_id, level, phrase
            ),
            ContentIssue::UnknownConcept {
                source,
                provision_id,
                level,
                slug,
            } => write!(
                f,
                "{} {} [{}]: unknown concept {:?}",
                source, provision_id, level, slug
            ),
            ContentIssue::UnknownCase {
                source,
                provision_id,
                level,
                case_id,
            } => write!(
                f,
                "{} {} [{}]: unknown case {:?}",
                source, provision_id, level, case_id
            ),
            ContentIssue::DuplicateTermDisplay { display, term_ids } => write!(
                f,
                "terms {} share the display string {:?}",
                term_ids.join(", "),
                display
            ),
            ContentIssue::UnknownTermClause { term_id, clause_id } => {
                write!(f, "term {} appears_in unknown clause {:?}", term_id, clause_id)
            }
        }
    }
}

/// Every issue in `bundle`, grouped by check.
pub fn lint_bundle(bundle: &ContentBundle) -> Vec<ContentIssue> {
    let mut issues = Vec::new();
    lint_annotations(bundle, &mut issues);
    lint_embeds(bundle, &mut issues);
    lint_terms(bundle, &mut issues);
    issues
}

fn lint_annotations(bundle: &ContentBundle, issues: &mut Vec<ContentIssue>) {
    for clause in bundle.sections.iter().flat_map(|s| s.items.iter()) {
        for (level, spec) in clause.annotations.iter() {
            if spec.phrase.is_empty() {
                issues.push(ContentIssue::EmptyAnnotationPhrase {
                    clause_id: clause.id.clone(),
                    level,
                });
            } else if !clause.text.contains(&spec.phrase) {
                issues.push(ContentIssue::AnnotationPhraseNotFound {
                    clause_id: clause.id.clone(),
                    level,
                    phrase: spec.phrase.clone(),
                });
            }
        }
    }
}

fn lint_embeds(bundle: &ContentBundle, issues: &mut Vec<ContentIssue>) {
    let explainers = bundle
        .explainers
        .iter()
        .map(|e| (EmbedSource::Explainer, &e.provision_id, e.level, &e.body));
    let qa = bundle.qa.iter().map(|q| {
        let source = EmbedSource::Qa { id: q.id.clone() };
        (source, &q.provision_id, q.level, &q.answer)
    });
    let war_stories = bundle.war_stories.iter().map(|w| {
        let source = EmbedSource::WarStory { id: w.id.clone() };
        (source, &w.provision_id, w.level, &w.story)
    });

    for (source, provision_id, level, body) in explainers.chain(qa).chain(war_stories) {
        for token in embed_tokens(body) {
            let issue = match token.kind {
                EmbedKind::Concept if bundle.concept(token.id).is_none() => {
                    ContentIssue::UnknownConcept {
                        source: source.clone(),
                        provision_id: provision_id.clone(),
                        level,
                        slug: token.id.to_string(),
                    }
                }
                EmbedKind::Case if bundle.case(token.id).is_none() => ContentIssue::UnknownCase {
                    source: source.clone(),
                    provision_id: provision_id.clone(),
                    level,
                    case_id: token.id.to_string(),
                },
                _ => continue,
            };
            issues.push(issue);
        }
    }
}

fn lint_terms(bundle: &ContentBundle, issues: &mut Vec<ContentIssue>) {
    let mut by_display: HashMap<&str, Vec<String>> = HashMap::new();
    let mut displays = Vec::new();
    for term in &bundle.terms {
        let ids = by_display.entry(term.term.as_str()).or_insert_with(|| {
            displays.push(term.term.as_str());
            Vec::new()
        });
        ids.push(term.id.clone());

        for clause_id in &term.appears_in {
            if bundle.clause(clause_id).is_none() {
                issues.push(ContentIssue::UnknownTermClause {
                    term_id: term.id.clone(),
                    clause_id: clause_id.clone(),
                });
            }
        }
    }

    for display in displays {
        if let Some(term_ids) = by_display.remove(display) {
            if term_ids.len() > 1 {
                issues.push(ContentIssue::DuplicateTermDisplay {
                    display: display.to_string(),
                    term_ids,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_bundle_is_clean() {
        let bundle = ContentBundle::builtin().unwrap();
        let issues = lint_bundle(&bundle);
        assert!(issues.is_empty(), "{:#?}", issues);
    }

    #[test]
    fn qa_answers_and_war_stories_are_scanned() {
        let bundle = ContentBundle::from_ron(
            r#"(
                concepts: [(
                    slug: "known",
                    title: "Known",
                    category: "c",
                    summary: "s",
                    definition: "d",
                )],
                qa: [(
                    id: "q1",
                    provision_id: "p",
                    level: junior,
                    question: "Which?",
                    answer: "[[concept:known]] but not [[concept:gone]]",
                )],
                war_stories: [(
                    id: "w1",
                    provision_id: "p",
                    level: senior,
                    title: "t",
                    story: "Told once.\n\n[[case:missing]]",
                )],
            )"#,
        )
        .unwrap();

        let rendered: Vec<String> = lint_bundle(&bundle).iter().map(|i| i.to_string()).collect();
        assert_eq!(
            rendered,
            [
                "qa q1 p [junior]: unknown concept \"gone\"",
                "war story w1 p [senior]: unknown case \"missing\"",
            ]
        );
    }

    #[test]
    fn reports_every_kind_of_issue() {
        let bundle = ContentBundle::from_ron(
            r#"(
                sections: [(
                    provision_id: "p",
                    section: "Article I",
                    items: [(
                        id: "x",
                        label: "§ 1",
                        text: "The Company shall pay.",
                        annotations: (
                            junior: Some((phrase: "", note: "n")),
                            senior: Some((phrase: "shall not pay", note: "n")),
                        ),
                    )],
                )],
                terms: [
                    (id: "co-1", term: "Company", short: "", long: "", appears_in: ["x"]),
                    (id: "co-2", term: "Company", short: "", long: "", appears_in: ["y"]),
                ],
                explainers: [(
                    provision_id: "p",
                    level: mid,
                    headline: "h",
                    body: "See [[concept:nope]] and [[case:none]].",
                )],
            )"#,
        )
        .unwrap();

        let rendered: Vec<String> = lint_bundle(&bundle).iter().map(|i| i.to_string()).collect();
        insta::assert_debug_snapshot!(rendered, @r###"
        [
            "x [junior]: annotation phrase is empty",
            "x [senior]: annotation phrase \"shall not pay\" does not occur in the clause text",
            "explainer p [mid]: unknown concept \"nope\"",
            "explainer p [mid]: unknown case \"none\"",
            "term co-2 appears_in unknown clause \"y\"",
            "terms co-1, co-2 share the display string \"Company\"",
        ]
        "###);
    }
}
