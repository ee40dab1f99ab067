//! Hyperspan - tappable link ranges inside laid-out text
//!
//! Register character ranges of a text as links, then resolve taps to them.
//! Taps that land near a link rather than on it are still resolved by a
//! short radial search around the tap point.

pub mod accessibility;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod geometry;
pub mod label;
pub mod layout;
pub mod links;
pub mod registry;
pub mod text;
pub mod widget;

pub use config::{HitTestConfig, LayoutMetrics};
pub use coordinator::{HitTestCoordinator, MatchKind, TapMatch};
pub use error::{HyperspanError, HyperspanResult};
pub use geometry::{Point, Rect, Size};
pub use label::HyperLabel;
pub use text::{CharacterRange, TextSpec};
