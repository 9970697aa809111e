use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

use crate::render::SegmentVisitor;
use crate::segment::Segment;

/// Options for [`SegmentDisplay`].
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Show `[open]` after annotation regions that are open
    pub show_open_state: bool,
    /// Glyph printed in place of `\n` so columns stay aligned
    pub newline_glyph: char,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_open_state: true,
            newline_glyph: '↵',
        }
    }
}

/// One underline row: display columns plus its label.
struct Underline {
    start_col: usize,
    end_col: usize,
    label: String,
}

/// Text rendering of a segment list, for snapshots and terminal inspection.
//
// The DGCL governs mergers.
//     ╰──╯Term(DGCL)
//
// Acquisition Sub shall be merged with and into the Company
// ╰─────────────╯Term(AS)
//                          ╰──────────────────────────────╯Annotation [open]
pub struct SegmentDisplay<'s, 'a> {
    segments: &'s [Segment<'a>],
    config: DisplayConfig,
}

impl<'s, 'a> SegmentDisplay<'s, 'a> {
    pub fn new(segments: &'s [Segment<'a>]) -> Self {
        Self::with_config(segments, DisplayConfig::default())
    }

    pub fn with_config(segments: &'s [Segment<'a>], config: DisplayConfig) -> Self {
        SegmentDisplay { segments, config }
    }
}

/// Visitor that lays out the source line and collects underline rows.
struct Layout<'c> {
    config: &'c DisplayConfig,
    line: String,
    underlines: Vec<Underline>,
}

impl<'c> Layout<'c> {
    fn push_text(&mut self, text: &str) -> (usize, usize) {
        let start_col = UnicodeWidthStr::width(&*self.line);
        for ch in text.chars() {
            self.line
                .push(if ch == '\n' { self.config.newline_glyph } else { ch });
        }
        (start_col, UnicodeWidthStr::width(&*self.line))
    }
}

impl<'a, 'c> SegmentVisitor<'a> for Layout<'c> {
    fn plain(&mut self, text: &'a str) {
        self.push_text(text);
    }

    fn term(&mut self, term_id: &'a str, label: &'a str) {
        let (start_col, end_col) = self.push_text(label);
        self.underlines.push(Underline {
            start_col,
            end_col,
            label: format!("Term({})", term_id),
        });
    }

    fn annotation(&mut self, label: &'a str, is_open: bool) {
        let (start_col, end_col) = self.push_text(label);
        let label = if is_open && self.config.show_open_state {
            "Annotation [open]".to_string()
        } else {
            "Annotation".to_string()
        };
        self.underlines.push(Underline {
            start_col,
            end_col,
            label,
        });
    }
}

impl<'s, 'a> std::fmt::Display for SegmentDisplay<'s, 'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut layout = Layout {
            config: &self.config,
            line: String::new(),
            underlines: Vec::new(),
        };
        crate::render::walk_segments(self.segments, &mut layout);

        f.write_str(&layout.line)?;

        for underline in &layout.underlines {
            f.write_char('\n')?;

            for _ in 0..underline.start_col {
                f.write_char(' ')?;
            }

            f.write_char('╰')?;

            let char_len = underline.end_col - underline.start_col;
            for _ in (underline.start_col + 1)..underline.end_col.saturating_sub(1) {
                f.write_char('─')?;
            }

            if char_len > 1 {
                f.write_char('╯')?;
            }

            f.write_str(&underline.label)?;
        }

        Ok(())
    }
}
