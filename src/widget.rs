//! Terminal rendering for [`HyperLabel`].
//!
//! The grid engine lays text out in points. A [`CellGrid`] fixes how many
//! points one terminal cell spans, which lets the widget place glyphs in
//! cells and lets mouse events map back to points for hit-testing.

use ratatui::{
    buffer::Buffer,
    layout::Rect as CellRect,
    style::Style,
    widgets::Widget,
};

use crate::config::LayoutMetrics;
use crate::geometry::{Point, Size};
use crate::label::HyperLabel;
use crate::text::{CharacterRange, Font};

/// Conversion between terminal cells and layout points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGrid {
    pub cell_width: f64,
    pub cell_height: f64,
}

impl CellGrid {
    /// One cell per column advance and line of `font`.
    pub fn for_font(font: &Font, metrics: LayoutMetrics) -> Self {
        Self {
            cell_width: font.size * metrics.advance_ratio,
            cell_height: font.size * metrics.line_height_ratio,
        }
    }

    /// Label size that fills `area`.
    pub fn size_of(&self, area: CellRect) -> Size {
        Size::new(
            f64::from(area.width) * self.cell_width,
            f64::from(area.height) * self.cell_height,
        )
    }

    /// Point at the center of the cell at (`column`, `row`), relative to
    /// `area`. `None` when the cell is outside `area`.
    pub fn point_at(&self, area: CellRect, column: u16, row: u16) -> Option<Point> {
        let inside = column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height);
        if !inside {
            return None;
        }
        Some(Point::new(
            (f64::from(column - area.x) + 0.5) * self.cell_width,
            (f64::from(row - area.y) + 0.5) * self.cell_height,
        ))
    }

    fn column(&self, x: f64) -> u16 {
        (x / self.cell_width).round() as u16
    }

    fn row(&self, y: f64) -> u16 {
        (y / self.cell_height).round() as u16
    }
}

/// Draws a label's laid-out glyphs with their resolved styles.
pub struct HyperLabelWidget<'a> {
    label: &'a mut HyperLabel,
    grid: CellGrid,
    highlight: Option<(CharacterRange, Style)>,
}

impl<'a> HyperLabelWidget<'a> {
    pub fn new(label: &'a mut HyperLabel, grid: CellGrid) -> Self {
        Self {
            label,
            grid,
            highlight: None,
        }
    }

    /// Patch `style` over `range`, e.g. the link under the mouse.
    pub fn highlight(mut self, range: CharacterRange, style: Style) -> Self {
        self.highlight = Some((range, style));
        self
    }
}

impl Widget for HyperLabelWidget<'_> {
    fn render(self, area: CellRect, buf: &mut Buffer) {
        let text = self.label.text().clone();
        let layout = self.label.layout();
        let buf_area = buf.area;

        for line in layout.engine().lines() {
            let y = area.y.saturating_add(self.grid.row(line.y));
            if y >= area.bottom() || y >= buf_area.bottom() {
                break;
            }
            for glyph in &line.glyphs {
                let x = area.x.saturating_add(self.grid.column(glyph.x));
                if x >= area.right() || x >= buf_area.right() {
                    break;
                }
                let mut style = text.style_at(glyph.index).style;
                if let Some((range, highlight)) = self.highlight {
                    if range.contains(glyph.index) {
                        style = style.patch(highlight);
                    }
                }
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(&glyph.text).set_style(style);
                }
            }
        }
    }
}
