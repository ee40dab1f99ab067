//! Text model: ranges, styles, and the layout snapshot handed to engines.

mod range;
mod style;

pub use range::{grapheme_count, CharacterRange};
pub use style::{Font, StyledRun, StyledText, TextStyle};

use crate::geometry::Size;

/// How lines are broken when text is wider than its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineBreakMode {
    #[default]
    WordWrap,
    CharWrap,
    Clip,
    TruncateHead,
    TruncateMiddle,
    TruncateTail,
}

impl LineBreakMode {
    pub fn is_wrapping(self) -> bool {
        matches!(self, LineBreakMode::WordWrap | LineBreakMode::CharWrap)
    }
}

/// Immutable snapshot of everything layout depends on.
///
/// Produced by the host whenever content or bounds change and compared by
/// value to decide whether layout must be recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    pub text: StyledText,
    /// Applied to every character whose runs set no font.
    pub font: Font,
    pub line_break_mode: LineBreakMode,
    /// `0` means unlimited.
    pub max_lines: usize,
    pub size: Size,
}

impl TextSpec {
    pub fn new(text: impl Into<StyledText>, size: Size) -> Self {
        Self {
            text: text.into(),
            font: Font::default(),
            line_break_mode: LineBreakMode::default(),
            max_lines: 0,
            size,
        }
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn with_line_break_mode(mut self, mode: LineBreakMode) -> Self {
        self.line_break_mode = mode;
        self
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Multi-line text always wraps, whatever mode was requested.
    pub fn effective_line_break_mode(&self) -> LineBreakMode {
        if self.max_lines != 1 && !self.line_break_mode.is_wrapping() {
            LineBreakMode::WordWrap
        } else {
            self.line_break_mode
        }
    }

    /// Font for the character at `index`, falling back to the default font.
    pub fn font_at(&self, index: usize) -> &Font {
        self.text.font_at(index).unwrap_or(&self.font)
    }
}
