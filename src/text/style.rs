//! Styled text: content plus ordered style runs.

use ratatui::style::Style;

use super::range::{grapheme_count, CharacterRange};

/// Font used to measure glyphs.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f64,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("system", 17.0)
    }
}

/// Attributes for a run of text.
///
/// `font` participates in layout. `style` is purely visual (colors,
/// underline, bold) and only matters to renderers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    pub font: Option<Font>,
    pub style: Style,
}

impl TextStyle {
    pub fn new(style: Style) -> Self {
        Self { font: None, style }
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.font.is_none() && self.style == Style::default()
    }

    /// Layer `other` on top of `self`.
    pub fn patch(&self, other: &TextStyle) -> TextStyle {
        TextStyle {
            font: other.font.clone().or_else(|| self.font.clone()),
            style: self.style.patch(other.style),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    pub range: CharacterRange,
    pub style: TextStyle,
}

/// Text content with attribute runs. Later runs patch earlier ones.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledText {
    content: String,
    runs: Vec<StyledRun>,
}

impl StyledText {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            runs: Vec::new(),
        }
    }

    /// Builder form of [`apply_style`](Self::apply_style).
    pub fn with_style(mut self, range: CharacterRange, style: TextStyle) -> Self {
        self.apply_style(range, style);
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Length in characters (grapheme clusters).
    pub fn len(&self) -> usize {
        grapheme_count(&self.content)
    }

    /// Add a run over `range`. Empty ranges and empty styles are ignored.
    pub fn apply_style(&mut self, range: CharacterRange, style: TextStyle) {
        if range.is_empty() || style.is_empty() {
            return;
        }
        self.runs.push(StyledRun { range, style });
    }

    /// Resolved style for the character at `index`.
    pub fn style_at(&self, index: usize) -> TextStyle {
        self.runs
            .iter()
            .filter(|run| run.range.contains(index))
            .fold(TextStyle::default(), |acc, run| acc.patch(&run.style))
    }

    /// Font set by the runs covering `index`, if any.
    pub fn font_at(&self, index: usize) -> Option<&Font> {
        self.runs
            .iter()
            .rev()
            .filter(|run| run.range.contains(index))
            .find_map(|run| run.style.font.as_ref())
    }
}

impl From<&str> for StyledText {
    fn from(content: &str) -> Self {
        StyledText::plain(content)
    }
}

impl From<String> for StyledText {
    fn from(content: String) -> Self {
        StyledText::plain(content)
    }
}
