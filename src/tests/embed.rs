use crate::{embed_tokens, parse_embeds, EmbedKind, Node};

#[derive(Debug, Clone, PartialEq)]
struct Concept(&'static str);

#[derive(Debug, Clone, PartialEq)]
struct Case(&'static str);

fn concept(slug: &str) -> Option<Concept> {
    match slug {
        "forward-triangular" => Some(Concept("Forward triangular merger")),
        "specific-performance" => Some(Concept("Specific performance")),
        _ => None,
    }
}

fn case(id: &str) -> Option<Case> {
    match id {
        "twitter-v-musk" => Some(Case("Twitter v. Musk")),
        "akorn" => Some(Case("Akorn v. Fresenius")),
        _ => None,
    }
}

type Parsed<'a> = Vec<Node<'a, Concept, Case>>;

#[test]
fn prose_only_body_is_paragraphs() {
    let nodes: Parsed = parse_embeds("First.\n\nSecond.\nStill second.", concept, case);
    assert_eq!(
        nodes,
        vec![
            Node::Paragraph { text: "First." },
            Node::Paragraph {
                text: "Second.\nStill second."
            },
        ]
    );
}

#[test]
fn cards_and_prose_follow_source_order() {
    let body = "Intro.\n\n[[concept:forward-triangular]]\n\nMiddle.\n\n[[case:twitter-v-musk]]\n\nOutro.";
    let nodes: Parsed = parse_embeds(body, concept, case);
    assert_eq!(
        nodes,
        vec![
            Node::Paragraph { text: "Intro." },
            Node::ConceptCard {
                concept: Some(Concept("Forward triangular merger"))
            },
            Node::Paragraph { text: "Middle." },
            Node::CaseCard {
                case: Some(Case("Twitter v. Musk"))
            },
            Node::Paragraph { text: "Outro." },
        ]
    );
}

#[test]
fn token_inside_a_sentence_splits_it() {
    let nodes: Parsed = parse_embeds("See [[case:akorn]] for the MAE test.", concept, case);
    assert_eq!(
        nodes,
        vec![
            Node::Paragraph { text: "See" },
            Node::CaseCard {
                case: Some(Case("Akorn v. Fresenius"))
            },
            Node::Paragraph {
                text: "for the MAE test."
            },
        ]
    );
}

#[test]
fn repeated_tokens_produce_repeated_cards() {
    let body = "[[case:akorn]] and again [[case:akorn]]";
    let nodes: Parsed = parse_embeds(body, concept, case);
    let cards = nodes
        .iter()
        .filter(|node| matches!(node, Node::CaseCard { .. }))
        .count();
    assert_eq!(cards, 2);
    assert_eq!(embed_tokens(body).len(), 2);
}

#[test]
fn unknown_references_become_unresolved_cards() {
    let nodes: Parsed = parse_embeds(
        "[[concept:no-such-slug]][[case:no-such-case]]",
        concept,
        case,
    );
    assert_eq!(
        nodes,
        vec![
            Node::ConceptCard { concept: None },
            Node::CaseCard { case: None },
        ]
    );
    assert!(nodes.iter().all(Node::is_unresolved));
}

#[test]
fn kinds_are_dispatched_to_their_own_resolver() {
    // a case id handed to the concept resolver must not resolve
    let nodes: Parsed = parse_embeds("[[concept:akorn]][[case:forward-triangular]]", concept, case);
    assert!(nodes.iter().all(Node::is_unresolved));
}

#[test]
fn resolvers_are_called_once_per_token() {
    let mut seen = Vec::new();
    let _: Vec<Node<'_, (), ()>> = parse_embeds(
        "[[concept:a]] text [[concept:b]] [[case:c]] [[concept:a]]",
        |slug| {
            seen.push(slug.to_string());
            None
        },
        |_| None,
    );
    assert_eq!(seen, ["a", "b", "a"]);
}

#[test]
fn malformed_token_stays_in_the_paragraph() {
    let nodes: Parsed = parse_embeds("Broken [[concept:forward-triangular here.", concept, case);
    assert_eq!(
        nodes,
        vec![Node::Paragraph {
            text: "Broken [[concept:forward-triangular here."
        }]
    );
}

#[test]
fn whitespace_only_prose_between_cards_is_dropped() {
    let nodes: Parsed = parse_embeds(
        "[[concept:specific-performance]]\n\n   \n\n[[case:twitter-v-musk]]",
        concept,
        case,
    );
    assert_eq!(nodes.len(), 2);
}

#[test]
fn extracted_tokens_keep_kind_and_id() {
    let tokens = embed_tokens("a [[concept:x-1]] b [[case:y_2]] c");
    let pairs: Vec<(EmbedKind, &str)> = tokens.iter().map(|t| (t.kind, t.id)).collect();
    assert_eq!(
        pairs,
        [(EmbedKind::Concept, "x-1"), (EmbedKind::Case, "y_2")]
    );
}
