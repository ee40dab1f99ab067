//! Resolving taps to registered links.
//!
//! A tap first resolves exactly: the character under the point, looked up in
//! the link registry. When that misses and the extended touch area is on,
//! the coordinator probes points on rings of growing radius around the tap
//! and takes the first probe that lands on a link. Small or tightly packed
//! links stay tappable with a fingertip this way.
//!
//! # Search order
//!
//! Radii run `2.5, 5.0, 7.5, 10.0, 12.5`. At each radius eight probes are
//! tried in a fixed order: `+x, -x, +y, -y`, then the diagonals
//! `(-d,-d), (+d,+d), (+d,-d), (-d,+d)` with `d = r / √2` so every probe sits
//! exactly `r` away. The search stops at the first hit, so a nearer link
//! always beats a farther one and ties at the same radius go to the earlier
//! direction.

use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

use tracing::debug;

use crate::config::HitTestConfig;
use crate::geometry::{Point, Rect};
use crate::layout::{GridLayoutEngine, LayoutAdapter, TextLayoutEngine};
use crate::registry::RangeRegistry;
use crate::text::{CharacterRange, TextSpec};

/// Distance between successive search rings.
pub const RADIUS_STEP: f64 = 2.5;
/// Exclusive upper bound on the search radius.
pub const MAX_SEARCH_RADIUS: f64 = 15.0;

/// Callback fired when a link is tapped.
pub type LinkHandler = Box<dyn FnMut()>;

/// Value stored for each registered link.
pub struct LinkItem {
    /// Identifier exposed to accessibility; links without one are not
    /// projected as separate elements
    pub identifier: Option<String>,
    handler: LinkHandler,
}

impl LinkItem {
    pub fn new(identifier: Option<String>, handler: impl FnMut() + 'static) -> Self {
        Self {
            identifier,
            handler: Box::new(handler),
        }
    }

    pub fn invoke(&mut self) {
        (self.handler)();
    }
}

impl fmt::Debug for LinkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkItem")
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchKind {
    /// The character under the tap belongs to the link.
    Exact,
    /// Found by the radial search at this radius.
    Approximate { radius: f64 },
}

/// A resolved tap: which registry slot matched and how.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapMatch {
    pub slot: usize,
    pub kind: MatchKind,
}

/// Search radii, nearest first.
pub fn search_radii() -> impl Iterator<Item = f64> {
    (1..)
        .map(|step| step as f64 * RADIUS_STEP)
        .take_while(|radius| *radius < MAX_SEARCH_RADIUS)
}

/// Probe offsets at `radius`, in search order.
pub fn search_offsets(radius: f64) -> impl Iterator<Item = Point> {
    let d = radius * FRAC_1_SQRT_2;
    [
        Point::new(radius, 0.0),
        Point::new(-radius, 0.0),
        Point::new(0.0, radius),
        Point::new(0.0, -radius),
        Point::new(-d, -d),
        Point::new(d, d),
        Point::new(d, -d),
        Point::new(-d, d),
    ]
    .into_iter()
}

/// Owns the layout adapter and link registry for one piece of text.
#[derive(Debug)]
pub struct HitTestCoordinator<E = GridLayoutEngine> {
    layout: LayoutAdapter<E>,
    links: RangeRegistry<LinkItem>,
    extended_touch_area: bool,
    search_beyond_text_bounds: bool,
}

impl HitTestCoordinator<GridLayoutEngine> {
    pub fn new() -> Self {
        Self::with_config(&HitTestConfig::default())
    }

    pub fn with_config(config: &HitTestConfig) -> Self {
        debug_assert!(
            config.metrics.validate().is_ok(),
            "invalid layout metrics: {:?}",
            config.metrics
        );
        Self::with_engine(GridLayoutEngine::new(config.metrics), config)
    }
}

impl Default for HitTestCoordinator<GridLayoutEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: TextLayoutEngine> HitTestCoordinator<E> {
    pub fn with_engine(engine: E, config: &HitTestConfig) -> Self {
        Self {
            layout: LayoutAdapter::new(engine),
            links: RangeRegistry::new(),
            extended_touch_area: config.extended_touch_area,
            search_beyond_text_bounds: config.search_beyond_text_bounds,
        }
    }

    pub fn extended_touch_area(&self) -> bool {
        self.extended_touch_area
    }

    pub fn set_extended_touch_area(&mut self, enabled: bool) {
        self.extended_touch_area = enabled;
    }

    /// Register a link over `range`.
    ///
    /// `range` must refer to the content that is current now; callers clear
    /// and re-register whenever content is replaced.
    pub fn register_link(
        &mut self,
        range: CharacterRange,
        identifier: Option<String>,
        handler: impl FnMut() + 'static,
    ) {
        debug!(
            start = range.start(),
            end = range.end(),
            identifier = identifier.as_deref().unwrap_or(""),
            "Registered link"
        );
        self.links.register(range, LinkItem::new(identifier, handler));
    }

    /// Drop every link. Must run whenever the displayed content changes.
    pub fn remove_all_links(&mut self) {
        if !self.links.is_empty() {
            debug!(count = self.links.len(), "Removed all links");
        }
        self.links.clear();
    }

    pub fn links(&self) -> &RangeRegistry<LinkItem> {
        &self.links
    }

    pub fn layout(&self) -> &LayoutAdapter<E> {
        &self.layout
    }

    /// Bring the layout up to date with `spec` and return it.
    pub fn layout_for(&mut self, spec: &TextSpec) -> &LayoutAdapter<E> {
        self.layout.update(spec);
        &self.layout
    }

    /// Resolve `point` to a link without invoking it.
    pub fn link_at(&mut self, spec: &TextSpec, point: Point) -> Option<TapMatch> {
        self.layout.update(spec);

        if let Some(slot) = self.slot_at(point) {
            return Some(TapMatch {
                slot,
                kind: MatchKind::Exact,
            });
        }
        if !self.extended_touch_area {
            return None;
        }
        if !self.search_beyond_text_bounds && !self.layout.is_within_text(point) {
            return None;
        }

        search_radii().find_map(|radius| {
            search_offsets(radius)
                .find_map(|offset| self.slot_at(point + offset))
                .map(|slot| TapMatch {
                    slot,
                    kind: MatchKind::Approximate { radius },
                })
        })
    }

    /// Handle a completed tap at `point`.
    ///
    /// `spec` is `None` when there is no host text to hit-test against.
    /// Returns true if a link handler ran.
    pub fn handle_tap(&mut self, spec: Option<&TextSpec>, point: Point) -> bool {
        let Some(spec) = spec else {
            debug!("Tap ignored: no host text");
            return false;
        };
        let Some(hit) = self.link_at(spec, point) else {
            debug!(x = point.x, y = point.y, "Tap missed every link");
            return false;
        };
        let Some(entry) = self.links.get_mut(hit.slot) else {
            return false;
        };

        debug!(
            x = point.x,
            y = point.y,
            slot = hit.slot,
            kind = ?hit.kind,
            identifier = entry.value.identifier.as_deref().unwrap_or(""),
            "Tap resolved to link"
        );
        entry.value.invoke();
        true
    }

    /// Rectangle covering `range` in the current layout.
    pub fn rect_for_range(&mut self, spec: Option<&TextSpec>, range: CharacterRange) -> Rect {
        let Some(spec) = spec else {
            return Rect::ZERO;
        };
        self.layout.update(spec);
        self.layout.bounding_rect(range)
    }

    fn slot_at(&self, point: Point) -> Option<usize> {
        let index = self.layout.character_index(point)?;
        self.links.find(index)
    }
}
