//! Hit-testing and layout configuration.
//!
//! Configuration is plain data with builder-style setters. It can also be
//! loaded from a JSON file; every field is optional there and falls back to
//! its default.
//!
//! ```ignore
//! use hyperspan::config::HitTestConfig;
//!
//! let config = HitTestConfig::default()
//!     .with_extended_touch_area(false);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{HyperspanError, HyperspanResult};

/// Glyph metrics for [`GridLayoutEngine`](crate::layout::GridLayoutEngine),
/// expressed as multiples of the font size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    /// Horizontal advance of one display column.
    pub advance_ratio: f64,
    /// Height of a line.
    pub line_height_ratio: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            line_height_ratio: 1.2,
        }
    }
}

impl LayoutMetrics {
    pub fn new(advance_ratio: f64, line_height_ratio: f64) -> Self {
        Self {
            advance_ratio,
            line_height_ratio,
        }
    }

    pub fn validate(&self) -> HyperspanResult<()> {
        check_ratio("advance_ratio", self.advance_ratio)?;
        check_ratio("line_height_ratio", self.line_height_ratio)
    }
}

fn check_ratio(field: &'static str, value: f64) -> HyperspanResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(HyperspanError::InvalidConfig {
            field,
            message: format!("must be a positive number, got {}", value),
        })
    }
}

/// Configuration for resolving taps to links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitTestConfig {
    /// Search around a missed tap for a nearby link (default: true)
    pub extended_touch_area: bool,
    /// Also search around taps that land outside the laid-out text (default: false)
    pub search_beyond_text_bounds: bool,
    /// Metrics for the built-in grid layout engine
    pub metrics: LayoutMetrics,
}

impl Default for HitTestConfig {
    fn default() -> Self {
        Self {
            extended_touch_area: true,
            search_beyond_text_bounds: false,
            metrics: LayoutMetrics::default(),
        }
    }
}

impl HitTestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether missed taps search nearby for a link.
    pub fn with_extended_touch_area(mut self, enabled: bool) -> Self {
        self.extended_touch_area = enabled;
        self
    }

    /// Set whether taps outside the text bounds may still search nearby.
    pub fn with_search_beyond_text_bounds(mut self, enabled: bool) -> Self {
        self.search_beyond_text_bounds = enabled;
        self
    }

    /// Set the grid layout metrics.
    pub fn with_metrics(mut self, metrics: LayoutMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> HyperspanResult<Self> {
        let config: HitTestConfig = serde_json::from_str(json)?;
        config.metrics.validate()?;
        Ok(config)
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> HyperspanResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| HyperspanError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), ?config, "Loaded hit-test config");
        Ok(config)
    }
}
