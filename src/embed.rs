//! Embed-token parser for free-form explainer prose.
//!
//! Prose may reference concept and case cards inline with `[[concept:slug]]`
//! and `[[case:id]]`. The kind is case-sensitive and the id runs up to the first
//! `]`. Anything that does not match exactly, such as an unterminated `[[` or an
//! unknown kind, stays ordinary prose.
//!
//! Prose between tokens is chunked into paragraphs on runs of two or more
//! newlines; each paragraph is trimmed and empty ones are dropped.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static EMBED_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\[(concept|case):([^\]]+)\]\]").expect("embed token pattern is valid")
});

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\n+").expect("paragraph break pattern is valid"));

/// Which card family a token refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedKind {
    Concept,
    Case,
}

impl EmbedKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "concept" => Some(EmbedKind::Concept),
            "case" => Some(EmbedKind::Case),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmbedKind::Concept => "concept",
            EmbedKind::Case => "case",
        }
    }
}

/// A parsed `[[kind:id]]` reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EmbedToken<'a> {
    pub kind: EmbedKind,
    /// Slug or id exactly as written between `:` and `]]`
    pub id: &'a str,
}

impl std::fmt::Display for EmbedToken<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[[{}:{}]]", self.kind.as_str(), self.id)
    }
}

/// Raw split of a body: prose between tokens, and the tokens themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedPiece<'a> {
    Prose(&'a str),
    Token(EmbedToken<'a>),
}

/// One renderable unit of explainer prose.
///
/// Card payloads are `None` when the reference did not resolve; renderers
/// draw nothing (or a placeholder) for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node<'a, C, K> {
    Paragraph { text: &'a str },
    ConceptCard { concept: Option<C> },
    CaseCard { case: Option<K> },
}

/// Split `body` into prose and tokens, in source order. Empty prose between
/// adjacent tokens is omitted.
pub fn tokenize_embeds(body: &str) -> Vec<EmbedPiece<'_>> {
    let mut pieces = Vec::new();
    let mut last = 0;

    for caps in EMBED_TOKEN.captures_iter(body) {
        let (whole, tag, id) = match (caps.get(0), caps.get(1), caps.get(2)) {
            (Some(whole), Some(tag), Some(id)) => (whole, tag, id),
            _ => continue,
        };
        let kind = match EmbedKind::from_tag(tag.as_str()) {
            Some(kind) => kind,
            None => continue,
        };

        if whole.start() > last {
            pieces.push(EmbedPiece::Prose(&body[last..whole.start()]));
        }
        pieces.push(EmbedPiece::Token(EmbedToken {
            kind,
            id: id.as_str(),
        }));
        last = whole.end();
    }

    if last < body.len() {
        pieces.push(EmbedPiece::Prose(&body[last..]));
    }
    pieces
}

/// Every embed token in `body`, repeats included.
pub fn embed_tokens(body: &str) -> Vec<EmbedToken<'_>> {
    tokenize_embeds(body)
        .into_iter()
        .filter_map(|piece| match piece {
            EmbedPiece::Token(token) => Some(token),
            EmbedPiece::Prose(_) => None,
        })
        .collect()
}

/// Trimmed, non-empty paragraphs of a prose chunk.
pub fn paragraphs(prose: &str) -> impl Iterator<Item = &str> {
    PARAGRAPH_BREAK
        .split(prose)
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
}

/// Parse an explainer body into paragraphs and resolved cards.
///
/// Nodes follow source order exactly; repeated tokens produce repeated cards.
/// Unknown references never fail, they become cards with a `None` payload.
pub fn parse_embeds<'a, C, K>(
    body: &'a str,
    mut resolve_concept: impl FnMut(&str) -> Option<C>,
    mut resolve_case: impl FnMut(&str) -> Option<K>,
) -> Vec<Node<'a, C, K>> {
    let mut nodes = Vec::new();

    for piece in tokenize_embeds(body) {
        match piece {
            EmbedPiece::Prose(prose) => {
                nodes.extend(paragraphs(prose).map(|text| Node::Paragraph { text }));
            }
            EmbedPiece::Token(token) => {
                let node = match token.kind {
                    EmbedKind::Concept => Node::ConceptCard {
                        concept: resolve_concept(token.id),
                    },
                    EmbedKind::Case => Node::CaseCard {
                        case: resolve_case(token.id),
                    },
                };
                if node.is_unresolved() {
                    tracing::trace!(token = %token, "embed reference did not resolve");
                }
                nodes.push(node);
            }
        }
    }

    nodes
}

impl<'a, C, K> Node<'a, C, K> {
    /// True for a card whose reference did not resolve.
    pub fn is_unresolved(&self) -> bool {
        matches!(
            self,
            Node::ConceptCard { concept: None } | Node::CaseCard { case: None }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_prose_and_tokens_in_order() {
        let pieces = tokenize_embeds("A [[concept:x]][[case:y]] B");
        assert_eq!(
            pieces,
            vec![
                EmbedPiece::Prose("A "),
                EmbedPiece::Token(EmbedToken {
                    kind: EmbedKind::Concept,
                    id: "x"
                }),
                EmbedPiece::Token(EmbedToken {
                    kind: EmbedKind::Case,
                    id: "y"
                }),
                EmbedPiece::Prose(" B"),
            ]
        );
    }

    #[test]
    fn malformed_tokens_stay_prose() {
        for body in [
            "[[concept:unterminated",
            "stray ]] closer",
            "[[Concept:wrong-case]]",
            "[[person:unknown-kind]]",
            "[[concept:]]",
            "[concept:single]",
        ] {
            assert_eq!(tokenize_embeds(body), vec![EmbedPiece::Prose(body)], "{}", body);
        }
    }

    #[test]
    fn id_is_taken_verbatim() {
        let tokens = embed_tokens("[[case: twitter v musk ]]");
        assert_eq!(tokens[0].id, " twitter v musk ");
        assert_eq!(tokens[0].to_string(), "[[case: twitter v musk ]]");
    }

    #[test]
    fn paragraphs_split_on_runs_of_newlines() {
        let paras: Vec<&str> =
            paragraphs("  one\ncontinued\n\n\n\ntwo  \n\n   \n\nthree").collect();
        assert_eq!(paras, ["one\ncontinued", "two", "three"]);
    }

    #[test]
    fn empty_body_yields_nothing() {
        let nodes: Vec<Node<'_, (), ()>> = parse_embeds("", |_| None, |_| None);
        assert!(nodes.is_empty());
        assert!(tokenize_embeds("").is_empty());
    }
}
