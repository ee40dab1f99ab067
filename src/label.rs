//! A text label with tappable links.
//!
//! [`HyperLabel`] owns the displayed content and everything layout depends
//! on, and keeps its link registry consistent with that content: replacing
//! the text with something different drops every link, because registered
//! ranges only describe the text they were registered against.

use tracing::debug;

use crate::accessibility::AccessibilityElement;
use crate::config::HitTestConfig;
use crate::coordinator::{HitTestCoordinator, LinkItem, TapMatch};
use crate::geometry::{Point, Rect, Size};
use crate::layout::{GridLayoutEngine, LayoutAdapter, TextLayoutEngine};
use crate::links::detect_urls;
use crate::registry::RangeRegistry;
use crate::text::{CharacterRange, Font, LineBreakMode, StyledText, TextSpec, TextStyle};

#[derive(Debug)]
pub struct HyperLabel<E = GridLayoutEngine> {
    text: StyledText,
    font: Font,
    line_break_mode: LineBreakMode,
    max_lines: usize,
    size: Size,
    /// Applied over every link range as links are added
    link_style: TextStyle,
    accessibility_identifier: Option<String>,
    coordinator: HitTestCoordinator<E>,
}

impl HyperLabel<GridLayoutEngine> {
    pub fn new(size: Size) -> Self {
        Self::with_config(size, &HitTestConfig::default())
    }

    pub fn with_config(size: Size, config: &HitTestConfig) -> Self {
        Self::with_coordinator(size, HitTestCoordinator::with_config(config))
    }
}

impl<E: TextLayoutEngine> HyperLabel<E> {
    pub fn with_coordinator(size: Size, coordinator: HitTestCoordinator<E>) -> Self {
        Self {
            text: StyledText::default(),
            font: Font::default(),
            line_break_mode: LineBreakMode::default(),
            max_lines: 0,
            size,
            link_style: TextStyle::default(),
            accessibility_identifier: None,
            coordinator,
        }
    }

    pub fn text(&self) -> &StyledText {
        &self.text
    }

    /// Replace the content with plain text.
    ///
    /// Links are dropped unless the content is unchanged.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text.content() == text {
            return;
        }
        self.replace_text(StyledText::plain(text));
    }

    /// Replace the content with styled text.
    ///
    /// Links are dropped unless the new value equals the current one.
    pub fn set_styled_text(&mut self, text: StyledText) {
        if self.text == text {
            return;
        }
        self.replace_text(text);
    }

    fn replace_text(&mut self, text: StyledText) {
        debug!(characters = text.len(), "Label text changed");
        self.text = text;
        self.coordinator.remove_all_links();
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    pub fn line_break_mode(&self) -> LineBreakMode {
        self.line_break_mode
    }

    pub fn set_line_break_mode(&mut self, mode: LineBreakMode) {
        self.line_break_mode = mode;
    }

    /// `0` means unlimited.
    pub fn set_max_lines(&mut self, max_lines: usize) {
        self.max_lines = max_lines;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize the label. Links survive; layout refreshes on the next query.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn link_style(&self) -> &TextStyle {
        &self.link_style
    }

    /// Style applied to links added from now on.
    pub fn set_link_style(&mut self, style: TextStyle) {
        self.link_style = style;
    }

    pub fn extends_link_touch_area(&self) -> bool {
        self.coordinator.extended_touch_area()
    }

    pub fn set_extends_link_touch_area(&mut self, enabled: bool) {
        self.coordinator.set_extended_touch_area(enabled);
    }

    pub fn accessibility_identifier(&self) -> Option<&str> {
        self.accessibility_identifier.as_deref()
    }

    pub fn set_accessibility_identifier(&mut self, identifier: Option<String>) {
        self.accessibility_identifier = identifier;
    }

    /// Make `range` of the current content tappable.
    pub fn add_link(&mut self, range: CharacterRange, handler: impl FnMut() + 'static) {
        self.add_link_with_identifier(range, None, handler);
    }

    /// Make `range` tappable and expose it to accessibility as `identifier`.
    ///
    /// The link style is applied to the range in place; this is not a
    /// content change and keeps existing links.
    pub fn add_link_with_identifier(
        &mut self,
        range: CharacterRange,
        identifier: Option<String>,
        handler: impl FnMut() + 'static,
    ) {
        debug_assert!(
            range.end() <= self.text.len(),
            "link range {}..{} exceeds text length {}",
            range.start(),
            range.end(),
            self.text.len()
        );
        self.text.apply_style(range, self.link_style.clone());
        self.coordinator.register_link(range, identifier, handler);
    }

    /// Register every URL in the current content.
    ///
    /// `on_open` receives the URL of the tapped link. Returns the number of
    /// links added.
    pub fn add_detected_links<F>(&mut self, on_open: F) -> usize
    where
        F: Fn(&str) + Clone + 'static,
    {
        let detected = detect_urls(self.text.content());
        let count = detected.len();
        for link in detected {
            let open = on_open.clone();
            let url = link.url.clone();
            self.add_link_with_identifier(link.range, Some(link.url), move || open(&url));
        }
        debug!(count, "Added detected links");
        count
    }

    pub fn remove_all_links(&mut self) {
        self.coordinator.remove_all_links();
    }

    pub fn links(&self) -> &RangeRegistry<LinkItem> {
        self.coordinator.links()
    }

    /// Snapshot of everything layout depends on.
    pub fn text_spec(&self) -> TextSpec {
        TextSpec {
            text: self.text.clone(),
            font: self.font.clone(),
            line_break_mode: self.line_break_mode,
            max_lines: self.max_lines,
            size: self.size,
        }
    }

    /// Fire the link under `point`, if any. Returns true if a handler ran.
    pub fn handle_tap(&mut self, point: Point) -> bool {
        let spec = self.text_spec();
        self.coordinator.handle_tap(Some(&spec), point)
    }

    /// Link under `point` without firing it.
    pub fn link_at(&mut self, point: Point) -> Option<TapMatch> {
        let spec = self.text_spec();
        self.coordinator.link_at(&spec, point)
    }

    /// Rectangle `range` occupies in the current layout.
    pub fn link_rect(&mut self, range: CharacterRange) -> Rect {
        let spec = self.text_spec();
        self.coordinator.rect_for_range(Some(&spec), range)
    }

    pub fn accessibility_elements(&mut self) -> Vec<AccessibilityElement> {
        let spec = self.text_spec();
        let identifier = self.accessibility_identifier.clone();
        self.coordinator
            .accessibility_elements(&spec, identifier.as_deref())
    }

    pub fn coordinator(&self) -> &HitTestCoordinator<E> {
        &self.coordinator
    }

    /// Layout of the current content, recomputed only if it changed.
    pub fn layout(&mut self) -> &LayoutAdapter<E> {
        let spec = self.text_spec();
        self.coordinator.layout_for(&spec)
    }
}
