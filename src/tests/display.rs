use crate::{
    segment_clause, AnnotationSpec, DefinedTerm, DisplayConfig, SegmentDisplay, TermCatalog,
};

#[test]
fn test_single_term() {
    let catalog = TermCatalog::new(vec![DefinedTerm::new("DGCL", "DGCL")]);
    let segments = segment_clause("The DGCL governs mergers.", None, false, &catalog);

    insta::assert_snapshot!(SegmentDisplay::new(&segments), @r###"
    The DGCL governs mergers.
        ╰──╯Term(DGCL)
    "###);
}

#[test]
fn test_term_and_open_annotation() {
    let catalog = TermCatalog::new(vec![
        DefinedTerm::new("AS", "Acquisition Sub"),
        DefinedTerm::new("Co", "Company"),
    ]);
    let ann = AnnotationSpec::new("merged with and into the Company", "Forward triangular.");
    let segments = segment_clause(
        "Acquisition Sub shall be merged with and into the Company",
        Some(&ann),
        true,
        &catalog,
    );

    insta::assert_snapshot!(SegmentDisplay::new(&segments), @r###"
    Acquisition Sub shall be merged with and into the Company
    ╰─────────────╯Term(AS)
                             ╰──────────────────────────────╯Annotation [open]
    "###);
}

#[test]
fn test_longest_match_display() {
    let catalog = TermCatalog::new(vec![
        DefinedTerm::new("Co", "Company"),
        DefinedTerm::new("MAE", "Company Material Adverse Effect"),
    ]);
    let segments = segment_clause(
        "Company Material Adverse Effect and the Company",
        None,
        false,
        &catalog,
    );

    insta::assert_snapshot!(SegmentDisplay::new(&segments), @r###"
    Company Material Adverse Effect and the Company
    ╰─────────────────────────────╯Term(MAE)
                                            ╰─────╯Term(Co)
    "###);
}

#[test]
fn test_single_char_term() {
    let catalog = TermCatalog::new(vec![DefinedTerm::new("x", "x")]);
    let segments = segment_clause("a x b", None, false, &catalog);

    insta::assert_snapshot!(SegmentDisplay::new(&segments), @r###"
    a x b
      ╰Term(x)
    "###);
}

#[test]
fn test_wide_chars_and_newlines_keep_columns() {
    let catalog = TermCatalog::new(vec![DefinedTerm::new("DGCL", "DGCL")]);

    let segments = segment_clause("合同 DGCL", None, false, &catalog);
    insta::assert_snapshot!(SegmentDisplay::new(&segments), @r###"
    合同 DGCL
         ╰──╯Term(DGCL)
    "###);

    let segments = segment_clause("line one\nDGCL", None, false, &catalog);
    insta::assert_snapshot!(SegmentDisplay::new(&segments), @r###"
    line one↵DGCL
             ╰──╯Term(DGCL)
    "###);
}

#[test]
fn test_hide_open_state() {
    let ann = AnnotationSpec::new("shall", "note");
    let catalog = TermCatalog::<()>::empty();
    let segments = segment_clause("It shall close.", Some(&ann), true, &catalog);
    let config = DisplayConfig {
        show_open_state: false,
        ..DisplayConfig::default()
    };

    insta::assert_snapshot!(SegmentDisplay::with_config(&segments, config), @r###"
    It shall close.
       ╰───╯Annotation
    "###);
}

#[test]
fn test_plain_only() {
    let catalog = TermCatalog::<()>::empty();
    let segments = segment_clause("No terms here.", None, false, &catalog);
    insta::assert_snapshot!(SegmentDisplay::new(&segments), @"No terms here.");
}
