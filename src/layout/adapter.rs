use tracing::trace;

use super::{GridLayoutEngine, TextLayoutEngine};
use crate::geometry::{Point, Rect};
use crate::text::{CharacterRange, TextSpec};

/// Memoizing front for a [`TextLayoutEngine`].
///
/// Call [`update`](Self::update) before every query: hosts can be resized
/// between events without any content change notification, and `update` is
/// free when nothing changed.
#[derive(Debug)]
pub struct LayoutAdapter<E = GridLayoutEngine> {
    engine: E,
    applied: Option<TextSpec>,
    /// Derived from `applied`; reset on every relayout
    used_rect: Rect,
    character_count: usize,
    relayouts: u64,
}

impl Default for LayoutAdapter<GridLayoutEngine> {
    fn default() -> Self {
        Self::new(GridLayoutEngine::default())
    }
}

impl<E: TextLayoutEngine> LayoutAdapter<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            applied: None,
            used_rect: Rect::ZERO,
            character_count: 0,
            relayouts: 0,
        }
    }

    /// Lay out `spec` unless it equals the spec already applied.
    ///
    /// Returns true if layout was recomputed.
    pub fn update(&mut self, spec: &TextSpec) -> bool {
        if self.applied.as_ref() == Some(spec) {
            return false;
        }

        self.engine.layout(spec);
        self.used_rect = self.engine.used_rect();
        self.character_count = spec.text.len();
        self.applied = Some(spec.clone());
        self.relayouts += 1;
        trace!(
            relayouts = self.relayouts,
            characters = self.character_count,
            "Relayout"
        );
        true
    }

    /// Character offset under `point`.
    ///
    /// `None` when there is no content or `point` lies outside the used area.
    pub fn character_index(&self, point: Point) -> Option<usize> {
        if !self.is_within_text(point) {
            return None;
        }
        self.engine.character_index_at(point)
    }

    /// Whether `point` falls inside the area covered by laid-out glyphs.
    pub fn is_within_text(&self, point: Point) -> bool {
        self.character_count > 0 && self.used_rect.contains(point)
    }

    /// Rectangle covering `range`, or [`Rect::ZERO`] for an empty range or
    /// one that does not fit the current content.
    pub fn bounding_rect(&self, range: CharacterRange) -> Rect {
        if range.is_empty() || range.end() > self.character_count {
            return Rect::ZERO;
        }
        self.engine.bounding_rect(range)
    }

    pub fn used_rect(&self) -> Rect {
        self.used_rect
    }

    /// Number of layouts computed so far.
    pub fn relayout_count(&self) -> u64 {
        self.relayouts
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::text::Font;

    fn spec(text: &str) -> TextSpec {
        TextSpec::new(text, Size::new(200.0, 100.0)).with_font(Font::new("mono", 10.0))
    }

    #[test]
    fn test_identical_spec_lays_out_once() {
        let mut adapter = LayoutAdapter::default();
        assert!(adapter.update(&spec("Hello world")));
        assert!(!adapter.update(&spec("Hello world")));
        assert_eq!(adapter.relayout_count(), 1);
    }

    #[test]
    fn test_any_field_change_relayouts() {
        let mut adapter = LayoutAdapter::default();
        adapter.update(&spec("Hello world"));

        let mut resized = spec("Hello world");
        resized.size = Size::new(40.0, 100.0);
        assert!(adapter.update(&resized));
        assert!(adapter.update(&spec("Hello world").with_max_lines(1)));
        assert!(adapter.update(&spec("Hello")));
        assert_eq!(adapter.relayout_count(), 4);
    }

    #[test]
    fn test_used_rect_refreshes_with_spec() {
        let mut adapter = LayoutAdapter::default();
        adapter.update(&spec("Hello world"));
        assert_eq!(adapter.used_rect().width, 66.0);

        adapter.update(&spec("Hi"));
        assert_eq!(adapter.used_rect().width, 12.0);
        assert_eq!(adapter.character_index(Point::new(30.0, 6.0)), None);
    }

    #[test]
    fn test_character_index_requires_point_inside_used_area() {
        let mut adapter = LayoutAdapter::default();
        adapter.update(&spec("Hello world"));

        assert_eq!(adapter.character_index(Point::new(51.0, 6.0)), Some(8));
        assert_eq!(adapter.character_index(Point::new(66.0, 6.0)), None);
        assert_eq!(adapter.character_index(Point::new(10.0, 12.0)), None);
        assert_eq!(adapter.character_index(Point::new(-0.1, 6.0)), None);
    }

    #[test]
    fn test_no_content_resolves_nothing() {
        let mut adapter = LayoutAdapter::default();
        assert_eq!(adapter.character_index(Point::new(1.0, 1.0)), None);

        adapter.update(&spec(""));
        assert_eq!(adapter.character_index(Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_bounding_rect_rejects_invalid_ranges() {
        let mut adapter = LayoutAdapter::default();
        adapter.update(&spec("Hello world"));

        let world = CharacterRange::new(6, 11).unwrap();
        assert_eq!(adapter.bounding_rect(world), Rect::new(36.0, 0.0, 30.0, 12.0));
        assert_eq!(adapter.bounding_rect(CharacterRange::new(3, 3).unwrap()), Rect::ZERO);
        assert_eq!(adapter.bounding_rect(CharacterRange::new(6, 12).unwrap()), Rect::ZERO);
    }
}
