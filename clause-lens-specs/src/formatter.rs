//! Failure formatting for harness output.

use crate::fixture::{LensFixture, SpanMarker};
use crate::runner::SpanMismatch;
use std::fmt::Write;

/// Format a mismatch with the clause line it sits on.
pub fn format_failure(
    fixture_name: &str,
    fixture: &LensFixture,
    mismatch: &SpanMismatch,
) -> String {
    let mut output = String::new();

    writeln!(output, "\nFAIL: {} ({})", fixture_name, mismatch.reference()).unwrap();
    if let Some(title) = &fixture.title {
        writeln!(output, "  {}", title).unwrap();
    }
    writeln!(output).unwrap();

    match mismatch {
        SpanMismatch::Missing(span) => {
            write_context(&mut output, &fixture.text, span);
            writeln!(output, "  expected {} not produced", describe(span)).unwrap();
            if let Some(hint) = missing_hint(fixture, span) {
                writeln!(output).unwrap();
                writeln!(output, "  hint: {}", hint).unwrap();
            }
        }
        SpanMismatch::Unexpected(span) => {
            write_context(&mut output, &fixture.text, span);
            writeln!(output, "  unexpected {}", describe(span)).unwrap();
        }
        SpanMismatch::NotLossless { actual } => {
            writeln!(output, "  segments do not reproduce the clause text").unwrap();
            writeln!(output, "    expected: {:?}", fixture.text).unwrap();
            writeln!(output, "    actual:   {:?}", actual).unwrap();
        }
        SpanMismatch::OpenState { expected, actual } => {
            writeln!(
                output,
                "  annotation open state: expected `{}`, found `{}`",
                expected, actual
            )
            .unwrap();
        }
    }

    output
}

/// Format a summary of all results.
pub fn format_summary(
    fixture_name: &str,
    passed: usize,
    failed: usize,
    expected_failures: usize,
    regressions: usize,
) -> String {
    let mut output = String::new();

    let status = if regressions > 0 { "FAIL" } else { "PASS" };

    writeln!(output, "\n{}: {}", status, fixture_name).unwrap();
    writeln!(
        output,
        "  {} passed, {} failed ({} expected, {} regressions)",
        passed, failed, expected_failures, regressions
    )
    .unwrap();

    output
}

fn describe(span: &SpanMarker) -> String {
    if span.is_annotation() {
        format!("annotation {:?}", span.text)
    } else {
        format!("term {} {:?}", span.id, span.text)
    }
}

/// The text line holding the span, with the span underlined.
fn write_context(output: &mut String, text: &str, span: &SpanMarker) {
    let start = span.byte_range.start.min(text.len());
    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[start..].find('\n').map_or(text.len(), |i| start + i);
    let line = &text[line_start..line_end];

    let column = text[line_start..start].chars().count();
    let width = span.text.chars().take_while(|&c| c != '\n').count().max(1);

    writeln!(output, "  {}", line).unwrap();
    writeln!(output, "  {}{}", " ".repeat(column), "^".repeat(width)).unwrap();
    writeln!(output).unwrap();
}

fn missing_hint(fixture: &LensFixture, span: &SpanMarker) -> Option<String> {
    if span.is_annotation() {
        return match &fixture.annotation {
            None => Some("no `> annotation:` directive in this fixture".to_string()),
            Some(phrase) if *phrase != span.text => Some(format!(
                "the annotation phrase is {:?}, the marker covers {:?}",
                phrase, span.text
            )),
            Some(_) => None,
        };
    }

    match fixture.terms.iter().find(|t| t.id == span.id) {
        None => Some(format!("no `> term {}:` directive in this fixture", span.id)),
        Some(term) if term.display != span.text => Some(format!(
            "term {} displays as {:?}; matching is exact and case-sensitive",
            term.id, term.display
        )),
        Some(_) => Some(
            "each term is wrapped once, at its first occurrence outside the annotation"
                .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_fixture;

    fn fixture() -> LensFixture {
        parse_fixture("# Case\n> term co: Company\nFirst line\nThe «co:company» shall pay.")
            .unwrap()
    }

    #[test]
    fn test_format_missing_with_context() {
        let fixture = fixture();
        let mismatch = SpanMismatch::Missing(fixture.spans[0].clone());
        let output = format_failure("known/case.lens", &fixture, &mismatch);

        insta::assert_snapshot!(output.trim(), @r###"
        FAIL: known/case.lens (co@15..22)
          Case

          The company shall pay.
              ^^^^^^^

          expected term co "company" not produced

          hint: term co displays as "Company"; matching is exact and case-sensitive
        "###);
    }

    #[test]
    fn test_format_unexpected_and_lossless() {
        let fixture = fixture();
        let unexpected = SpanMismatch::Unexpected(SpanMarker {
            id: "@".to_string(),
            text: "shall".to_string(),
            byte_range: 23..28,
        });
        let output = format_failure("x.lens", &fixture, &unexpected);
        assert!(output.contains("unexpected annotation \"shall\""));
        assert!(output.contains(&format!("\n{}^^^^^\n", " ".repeat(14))));

        let lossless = SpanMismatch::NotLossless {
            actual: "First line".to_string(),
        };
        let output = format_failure("x.lens", &fixture, &lossless);
        assert!(output.contains("FAIL: x.lens (lossless)"));
        assert!(output.contains("actual:   \"First line\""));
    }

    #[test]
    fn test_hint_for_missing_directive() {
        let fixture = parse_fixture("The «x:DGCL» governs.").unwrap();
        let mismatch = SpanMismatch::Missing(fixture.spans[0].clone());
        let output = format_failure("x.lens", &fixture, &mismatch);
        assert!(output.contains("hint: no `> term x:` directive"));
    }

    #[test]
    fn test_format_summary_pass() {
        let output = format_summary("10 fixtures", 10, 0, 0, 0);
        assert!(output.contains("PASS: 10 fixtures"));
        assert!(output.contains("10 passed"));
    }

    #[test]
    fn test_format_summary_with_regressions() {
        let output = format_summary("10 fixtures", 10, 2, 1, 1);
        assert!(output.contains("FAIL: 10 fixtures"));
        assert!(output.contains("1 regressions"));
    }
}
