//! Parser for `.lens` fixture files.
//!
//! ```text
//! # Longest match wins
//! > term MAE: Company Material Adverse Effect
//! > term Co: Company
//! // comments are ignored
//! A «MAE:Company Material Adverse Effect» hurts the «Co:Company».
//! ```

use crate::errors::{SpecError, SpecResult};
use crate::fixture::{LensFixture, SpanMarker, TermDirective};

/// Parse span markers from text, returning the normalized text and spans.
///
/// Input text may contain `«ID:text»` markers. The ID is made of alphanumerics,
/// `_`, `-` or `@`. Ranges are byte offsets into the marker-free text.
pub fn parse_spans(input: &str) -> SpecResult<(String, Vec<SpanMarker>)> {
    let mut spans = Vec::new();
    let mut normalized = String::new();
    let mut chars = input.char_indices();

    while let Some((pos, ch)) = chars.next() {
        if ch != '«' {
            normalized.push(ch);
            continue;
        }

        let start = normalized.len();

        let mut id = String::new();
        loop {
            match chars.next() {
                Some((_, ':')) => break,
                Some((_, c)) if c.is_alphanumeric() || matches!(c, '_' | '-' | '@') => id.push(c),
                Some((_, c)) => {
                    return Err(SpecError::Parse {
                        line: count_lines(input, pos),
                        message: format!(
                            "invalid span marker: expected id character or ':', found '{}'",
                            c
                        ),
                    });
                }
                None => {
                    return Err(SpecError::Parse {
                        line: count_lines(input, pos),
                        message: "unclosed span marker: expected ':'".to_string(),
                    });
                }
            }
        }

        if id.is_empty() {
            return Err(SpecError::Parse {
                line: count_lines(input, pos),
                message: "span marker has an empty id".to_string(),
            });
        }

        let mut text = String::new();
        loop {
            match chars.next() {
                Some((_, '»')) => break,
                Some((_, '«')) => {
                    return Err(SpecError::Parse {
                        line: count_lines(input, pos),
                        message: "span markers cannot nest".to_string(),
                    });
                }
                Some((_, c)) => {
                    text.push(c);
                    normalized.push(c);
                }
                None => {
                    return Err(SpecError::Parse {
                        line: count_lines(input, pos),
                        message: "unclosed span marker: expected '»'".to_string(),
                    });
                }
            }
        }

        spans.push(SpanMarker {
            id,
            text,
            byte_range: start..normalized.len(),
        });
    }

    Ok((normalized, spans))
}

/// Count lines up to a byte position (for error messages).
fn count_lines(input: &str, byte_pos: usize) -> usize {
    input[..byte_pos.min(input.len())]
        .chars()
        .filter(|&c| c == '\n')
        .count()
        + 1
}

/// Parse a full `.lens` fixture file.
pub fn parse_fixture(input: &str) -> SpecResult<LensFixture> {
    let mut title = None;
    let mut terms = Vec::new();
    let mut annotation = None;
    let mut is_open = false;
    let mut body_lines: Vec<(usize, &str)> = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let line_num = idx + 1;
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("# ") {
            if title.is_none() {
                title = Some(rest.trim().to_string());
            }
        } else if let Some(directive) = trimmed.strip_prefix('>') {
            match parse_directive(directive.trim(), line_num)? {
                Directive::Term(term) => terms.push(term),
                Directive::Annotation(phrase) => {
                    if annotation.replace(phrase).is_some() {
                        return Err(SpecError::Parse {
                            line: line_num,
                            message: "only one annotation directive is allowed".to_string(),
                        });
                    }
                }
                Directive::Open => is_open = true,
            }
        } else if !trimmed.is_empty() && !trimmed.starts_with("//") {
            body_lines.push((line_num, line));
        }
    }

    let body = body_lines
        .iter()
        .map(|(_, line)| *line)
        .collect::<Vec<_>>()
        .join("\n");

    // parse_spans counts lines within the joined body; map back to the file
    let (text, spans) = parse_spans(&body).map_err(|err| match err {
        SpecError::Parse { line, message } => SpecError::Parse {
            line: body_lines.get(line - 1).map_or(line, |(source, _)| *source),
            message,
        },
        other => other,
    })?;

    Ok(LensFixture {
        title,
        terms,
        annotation,
        is_open,
        text,
        spans,
    })
}

enum Directive {
    Term(TermDirective),
    Annotation(String),
    Open,
}

/// Parse one `>` line: `term ID: display`, `annotation: phrase` or `open`.
fn parse_directive(input: &str, source_line: usize) -> SpecResult<Directive> {
    if input == "open" {
        return Ok(Directive::Open);
    }

    if let Some(phrase) = input.strip_prefix("annotation:") {
        let phrase = phrase.trim();
        if phrase.is_empty() {
            return Err(SpecError::Parse {
                line: source_line,
                message: "annotation directive needs a phrase".to_string(),
            });
        }
        return Ok(Directive::Annotation(phrase.to_string()));
    }

    if let Some(rest) = input.strip_prefix("term ") {
        let colon = rest.find(':').ok_or_else(|| SpecError::Parse {
            line: source_line,
            message: format!("expected ':' in term directive: {}", input),
        })?;
        let id = rest[..colon].trim();
        let display = rest[colon + 1..].trim();
        if id.is_empty() || display.is_empty() {
            return Err(SpecError::Parse {
                line: source_line,
                message: format!("term directive needs an id and a display string: {}", input),
            });
        }
        return Ok(Directive::Term(TermDirective {
            id: id.to_string(),
            display: display.to_string(),
            source_line,
        }));
    }

    Err(SpecError::Parse {
        line: source_line,
        message: format!("unknown directive: {}", input),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spans_simple() {
        let (text, spans) = parse_spans("The «DGCL:DGCL» governs.").unwrap();
        assert_eq!(text, "The DGCL governs.");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].id, "DGCL");
        assert_eq!(spans[0].text, "DGCL");
        assert_eq!(spans[0].byte_range, 4..8);
    }

    #[test]
    fn test_parse_spans_annotation_and_multibyte() {
        let (text, spans) = parse_spans("§ 2.1 «@:merged» into «co-1:Company»").unwrap();
        assert_eq!(text, "§ 2.1 merged into Company");
        assert!(spans[0].is_annotation());
        assert_eq!(&text[spans[0].byte_range.clone()], "merged");
        assert_eq!(&text[spans[1].byte_range.clone()], "Company");
        assert_eq!(spans[1].reference(), "co-1@19..26");
        // "§" is two bytes, so the byte offset runs one past the char offset
        assert_eq!(spans[1].byte_range, 19..26);
        assert_eq!(text[..spans[1].byte_range.start].chars().count(), 18);
    }

    #[test]
    fn test_parse_spans_errors() {
        assert!(matches!(
            parse_spans("line one\n«DGCL DGCL»"),
            Err(SpecError::Parse { line: 2, .. })
        ));
        assert!(parse_spans("«DGCL:unterminated").is_err());
        assert!(parse_spans("«:no id»").is_err());
        assert!(parse_spans("«a:outer «b:inner»»").is_err());
    }

    #[test]
    fn test_parse_fixture_directives() {
        let input = "\
# Title here
> term MAE: Company Material Adverse Effect
> term Co: Company
> annotation: shall not
> open
// a comment
The «Co:Company» «@:shall not» suffer a «MAE:Company Material Adverse Effect».
";
        let fixture = parse_fixture(input).unwrap();
        assert_eq!(fixture.title.as_deref(), Some("Title here"));
        assert_eq!(fixture.terms.len(), 2);
        assert_eq!(fixture.terms[0].id, "MAE");
        assert_eq!(fixture.terms[1].source_line, 3);
        assert_eq!(fixture.annotation.as_deref(), Some("shall not"));
        assert!(fixture.is_open);
        assert_eq!(
            fixture.text,
            "The Company shall not suffer a Company Material Adverse Effect."
        );
        assert_eq!(fixture.spans.len(), 3);
        assert_eq!(fixture.catalog().iter().next().map(|t| t.id.as_str()), Some("MAE"));
    }

    #[test]
    fn test_parse_fixture_multiline_body() {
        let fixture = parse_fixture("first line\n\nsecond «x:line»").unwrap();
        assert_eq!(fixture.text, "first line\nsecond line");
        assert_eq!(fixture.spans[0].byte_range, 18..22);
    }

    #[test]
    fn test_parse_fixture_errors_report_source_line() {
        let err = parse_fixture("# T\n> term X: X\n\nok\n«X:broken").unwrap_err();
        assert!(matches!(err, SpecError::Parse { line: 5, .. }), "{}", err);

        let err = parse_fixture("> frobnicate").unwrap_err();
        assert!(err.to_string().contains("unknown directive"));

        assert!(parse_fixture("> term NoColon").is_err());
        assert!(parse_fixture("> annotation:").is_err());
        assert!(parse_fixture("> annotation: a\n> annotation: b").is_err());
    }
}
