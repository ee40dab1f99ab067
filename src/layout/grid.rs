//! Fixed-advance layout engine.
//!
//! Every grapheme advances by its display width in columns (per
//! `unicode-width`) times `font.size × advance_ratio`. Lines are as tall as
//! their largest font asks for. Text is left aligned from the origin with
//! no padding.

use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::TextLayoutEngine;
use crate::config::LayoutMetrics;
use crate::geometry::{Point, Rect};
use crate::text::{CharacterRange, Font, LineBreakMode, TextSpec};

/// Slack for float comparisons against the container edges.
const EPSILON: f64 = 1e-9;

/// A grapheme placed on a line.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGlyph {
    /// Character offset in the content
    pub index: usize,
    /// The grapheme cluster itself
    pub text: String,
    /// Left edge relative to the line start
    pub x: f64,
    pub advance: f64,
    /// Line height requested by this glyph's font
    pub height: f64,
    pub is_whitespace: bool,
}

/// One laid-out line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBox {
    pub y: f64,
    pub height: f64,
    pub glyphs: Vec<PlacedGlyph>,
    /// Offset of the hard line break that ends this line, if any
    pub break_index: Option<usize>,
}

impl LineBox {
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Width up to the last visible glyph; trailing whitespace hangs.
    pub fn used_width(&self) -> f64 {
        self.glyphs
            .iter()
            .rev()
            .find(|g| !g.is_whitespace)
            .map(|g| g.x + g.advance)
            .unwrap_or(0.0)
    }

    fn nearest_glyph(&self, x: f64) -> Option<usize> {
        if self.glyphs.is_empty() {
            return self.break_index;
        }
        self.glyphs
            .iter()
            .find(|g| x < g.x + g.advance)
            .or_else(|| self.glyphs.last())
            .map(|g| g.index)
    }
}

struct PendingLine {
    glyphs: Vec<PlacedGlyph>,
    break_index: Option<usize>,
}

fn is_hard_break(grapheme: &str) -> bool {
    matches!(grapheme, "\n" | "\r\n" | "\r")
}

#[derive(Debug, Default)]
pub struct GridLayoutEngine {
    metrics: LayoutMetrics,
    lines: Vec<LineBox>,
    used_rect: Rect,
}

impl GridLayoutEngine {
    pub fn new(metrics: LayoutMetrics) -> Self {
        Self {
            metrics,
            lines: Vec::new(),
            used_rect: Rect::ZERO,
        }
    }

    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    /// Lines from the most recent layout.
    pub fn lines(&self) -> &[LineBox] {
        &self.lines
    }

    fn line_height(&self, font: &Font) -> f64 {
        font.size * self.metrics.line_height_ratio
    }

    /// Split content into lines according to the effective break mode.
    fn break_lines(&self, spec: &TextSpec) -> Vec<PendingLine> {
        let mode = spec.effective_line_break_mode();
        let width = spec.size.width;

        let mut lines = Vec::new();
        let mut current: Vec<PlacedGlyph> = Vec::new();
        let mut x = 0.0;
        // Number of glyphs to keep when breaking at the last word boundary
        let mut word_break: Option<usize> = None;
        let mut clipped = false;

        for (index, grapheme) in spec.text.content().graphemes(true).enumerate() {
            if is_hard_break(grapheme) {
                lines.push(PendingLine {
                    glyphs: std::mem::take(&mut current),
                    break_index: Some(index),
                });
                x = 0.0;
                word_break = None;
                clipped = false;
                continue;
            }

            let font = spec.font_at(index);
            let advance = grapheme.width() as f64 * font.size * self.metrics.advance_ratio;
            let is_whitespace = grapheme.chars().all(char::is_whitespace);

            if mode.is_wrapping() {
                if !is_whitespace && x + advance > width + EPSILON && !current.is_empty() {
                    let carry = match (mode, word_break) {
                        (LineBreakMode::WordWrap, Some(keep)) if keep < current.len() => {
                            current.split_off(keep)
                        }
                        _ => Vec::new(),
                    };
                    lines.push(PendingLine {
                        glyphs: std::mem::take(&mut current),
                        break_index: None,
                    });
                    x = 0.0;
                    word_break = None;
                    for mut glyph in carry {
                        glyph.x = x;
                        x += glyph.advance;
                        current.push(glyph);
                    }
                    // Word longer than the line: break inside it
                    if x + advance > width + EPSILON && !current.is_empty() {
                        lines.push(PendingLine {
                            glyphs: std::mem::take(&mut current),
                            break_index: None,
                        });
                        x = 0.0;
                    }
                }
            } else if clipped || x + advance > width + EPSILON {
                clipped = true;
                continue;
            }

            current.push(PlacedGlyph {
                index,
                text: grapheme.to_string(),
                x,
                advance,
                height: self.line_height(font),
                is_whitespace,
            });
            x += advance;
            if is_whitespace {
                word_break = Some(current.len());
            }
        }

        if !current.is_empty() {
            lines.push(PendingLine {
                glyphs: current,
                break_index: None,
            });
        }
        lines
    }
}

impl TextLayoutEngine for GridLayoutEngine {
    fn layout(&mut self, spec: &TextSpec) {
        let pending = self.break_lines(spec);
        let default_height = self.line_height(&spec.font);

        self.lines.clear();
        let mut y = 0.0;
        for line in pending {
            if spec.max_lines > 0 && self.lines.len() >= spec.max_lines {
                break;
            }
            let height = line
                .glyphs
                .iter()
                .map(|g| g.height)
                .reduce(f64::max)
                .unwrap_or(default_height);
            if y + height > spec.size.height + EPSILON {
                break;
            }
            self.lines.push(LineBox {
                y,
                height,
                glyphs: line.glyphs,
                break_index: line.break_index,
            });
            y += height;
        }

        let width = self
            .lines
            .iter()
            .map(LineBox::used_width)
            .fold(0.0, f64::max);
        self.used_rect = if self.lines.is_empty() {
            Rect::ZERO
        } else {
            Rect::new(0.0, 0.0, width, y)
        };
        trace!(lines = self.lines.len(), used_rect = ?self.used_rect, "Grid layout complete");
    }

    fn used_rect(&self) -> Rect {
        self.used_rect
    }

    fn character_index_at(&self, point: Point) -> Option<usize> {
        let first = self.lines.first()?;
        let line = if point.y < first.y {
            first
        } else {
            self.lines
                .iter()
                .find(|line| point.y < line.bottom())
                .or_else(|| self.lines.last())?
        };
        line.nearest_glyph(point.x)
    }

    fn bounding_rect(&self, range: CharacterRange) -> Rect {
        self.lines
            .iter()
            .flat_map(|line| {
                line.glyphs
                    .iter()
                    .filter(|g| range.contains(g.index))
                    .map(move |g| Rect::new(g.x, line.y, g.advance, line.height))
            })
            .fold(Rect::ZERO, |acc, rect| acc.union(&rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::text::{StyledText, TextStyle};

    // Font size 10 with default metrics: 6.0 per column, 12.0 per line
    fn spec(text: &str, width: f64, height: f64) -> TextSpec {
        TextSpec::new(text, Size::new(width, height)).with_font(Font::new("mono", 10.0))
    }

    fn laid_out(spec: &TextSpec) -> GridLayoutEngine {
        let mut engine = GridLayoutEngine::default();
        engine.layout(spec);
        engine
    }

    fn line_texts(engine: &GridLayoutEngine) -> Vec<String> {
        engine
            .lines()
            .iter()
            .map(|line| line.glyphs.iter().map(|g| g.text.as_str()).collect())
            .collect()
    }

    fn range(start: usize, end: usize) -> CharacterRange {
        CharacterRange::new(start, end).unwrap()
    }

    #[test]
    fn test_single_line_geometry() {
        let engine = laid_out(&spec("Hello world", 200.0, 100.0));

        assert_eq!(engine.lines().len(), 1);
        assert_eq!(engine.used_rect(), Rect::new(0.0, 0.0, 66.0, 12.0));
        assert_eq!(engine.bounding_rect(range(6, 11)), Rect::new(36.0, 0.0, 30.0, 12.0));
        // 'r' spans 48..54
        assert_eq!(engine.character_index_at(Point::new(51.0, 6.0)), Some(8));
    }

    #[test]
    fn test_nearest_glyph_clamps_to_line_ends() {
        let engine = laid_out(&spec("Hello", 200.0, 100.0));
        assert_eq!(engine.character_index_at(Point::new(-5.0, 6.0)), Some(0));
        assert_eq!(engine.character_index_at(Point::new(500.0, 6.0)), Some(4));
        assert_eq!(engine.character_index_at(Point::new(2.0, 500.0)), Some(0));
    }

    #[test]
    fn test_word_wrap_breaks_at_word_boundary() {
        let engine = laid_out(&spec("ab cdef", 30.0, 100.0));
        assert_eq!(line_texts(&engine), vec!["ab ", "cdef"]);
        // Second line starts over at x = 0
        assert_eq!(engine.bounding_rect(range(3, 7)), Rect::new(0.0, 12.0, 24.0, 12.0));
    }

    #[test]
    fn test_char_wrap_breaks_anywhere() {
        let spec = spec("ab cdef", 30.0, 100.0).with_line_break_mode(LineBreakMode::CharWrap);
        let engine = laid_out(&spec);
        assert_eq!(line_texts(&engine), vec!["ab cd", "ef"]);
    }

    #[test]
    fn test_long_word_breaks_inside() {
        let engine = laid_out(&spec("abcdefghij", 30.0, 100.0));
        assert_eq!(line_texts(&engine), vec!["abcde", "fghij"]);
    }

    #[test]
    fn test_trailing_whitespace_hangs() {
        let engine = laid_out(&spec("Hello world", 40.0, 100.0));
        assert_eq!(line_texts(&engine), vec!["Hello ", "world"]);
        assert_eq!(engine.used_rect(), Rect::new(0.0, 0.0, 30.0, 24.0));
        assert_eq!(engine.character_index_at(Point::new(3.0, 18.0)), Some(6));
    }

    #[test]
    fn test_max_lines_limits_layout() {
        let spec = spec("Hello world", 40.0, 100.0).with_max_lines(1);
        let engine = laid_out(&spec);
        assert_eq!(line_texts(&engine), vec!["Hello "]);
        assert_eq!(engine.used_rect().height, 12.0);
        assert_eq!(engine.bounding_rect(range(6, 11)), Rect::ZERO);
    }

    #[test]
    fn test_container_height_limits_layout() {
        let engine = laid_out(&spec("Hello world", 40.0, 20.0));
        assert_eq!(engine.lines().len(), 1);
    }

    #[test]
    fn test_clip_drops_glyphs_past_the_edge() {
        let spec = spec("Hello world", 40.0, 100.0)
            .with_line_break_mode(LineBreakMode::Clip)
            .with_max_lines(1);
        let engine = laid_out(&spec);
        assert_eq!(line_texts(&engine), vec!["Hello "]);
        assert_eq!(engine.bounding_rect(range(6, 11)), Rect::ZERO);
    }

    #[test]
    fn test_hard_breaks_and_empty_lines() {
        let engine = laid_out(&spec("ab\n\ncd", 200.0, 100.0));
        assert_eq!(line_texts(&engine), vec!["ab", "", "cd"]);
        assert_eq!(engine.lines()[0].break_index, Some(2));
        // The empty middle line resolves to its own newline
        assert_eq!(engine.character_index_at(Point::new(5.0, 18.0)), Some(3));
        assert_eq!(engine.character_index_at(Point::new(7.0, 30.0)), Some(5));
    }

    #[test]
    fn test_run_fonts_change_advance_and_height() {
        let text = StyledText::plain("aXb").with_style(
            range(1, 2),
            TextStyle::default().with_font(Font::new("big", 20.0)),
        );
        let spec = TextSpec::new(text, Size::new(200.0, 100.0)).with_font(Font::new("mono", 10.0));
        let engine = laid_out(&spec);

        assert_eq!(engine.bounding_rect(range(1, 2)), Rect::new(6.0, 0.0, 12.0, 24.0));
        assert_eq!(engine.used_rect(), Rect::new(0.0, 0.0, 24.0, 24.0));
    }

    #[test]
    fn test_wide_graphemes_take_two_columns() {
        let engine = laid_out(&spec("\u{4F60}\u{597D}!", 200.0, 100.0));
        assert_eq!(engine.bounding_rect(range(1, 2)), Rect::new(12.0, 0.0, 12.0, 12.0));
        assert_eq!(engine.character_index_at(Point::new(25.0, 1.0)), Some(2));
    }

    #[test]
    fn test_empty_content() {
        let engine = laid_out(&spec("", 200.0, 100.0));
        assert!(engine.lines().is_empty());
        assert_eq!(engine.used_rect(), Rect::ZERO);
        assert_eq!(engine.character_index_at(Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_relayout_replaces_previous_lines() {
        let mut engine = laid_out(&spec("Hello world", 40.0, 100.0));
        engine.layout(&spec("Hi", 40.0, 100.0));
        assert_eq!(line_texts(&engine), vec!["Hi"]);
    }
}
