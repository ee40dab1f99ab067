//! Text layout: the engine seam and the memoizing adapter in front of it.
//!
//! # Architecture
//!
//! Hit-testing needs two answers from a layout engine: which character sits
//! under a point, and which rectangle a character range covers. Engines are
//! pluggable through [`TextLayoutEngine`]; the crate ships
//! [`GridLayoutEngine`], a fixed-advance engine suited to terminals and
//! tests.
//!
//! [`LayoutAdapter`] wraps an engine and:
//! - skips relayout when the [`TextSpec`] is unchanged (taps arrive far more
//!   often than content changes)
//! - rejects points outside the used area before asking the engine
//! - rejects ranges that do not fit the current content

mod adapter;
mod grid;

pub use adapter::LayoutAdapter;
pub use grid::{GridLayoutEngine, LineBox, PlacedGlyph};

use crate::geometry::{Point, Rect};
use crate::text::{CharacterRange, TextSpec};

/// An engine that lays out a [`TextSpec`] and answers geometric queries.
pub trait TextLayoutEngine {
    /// Recompute layout for `spec`, discarding any previous layout.
    fn layout(&mut self, spec: &TextSpec);

    /// Bounding box of the laid-out glyphs.
    ///
    /// Can be smaller than the container when text is short.
    fn used_rect(&self) -> Rect;

    /// Character offset of the glyph nearest to `point`.
    fn character_index_at(&self, point: Point) -> Option<usize>;

    /// Union of glyph boxes for `range`. Characters that were not laid out
    /// (clipped, past the line limit) contribute nothing.
    fn bounding_rect(&self, range: CharacterRange) -> Rect;
}
