//! Accessibility projection of a label and its links.
//!
//! Assistive technology sees the label as one static-text element followed
//! by one element per identified link, each framed by the rectangle its
//! characters occupy.

use serde::Serialize;

use crate::coordinator::HitTestCoordinator;
use crate::geometry::Rect;
use crate::layout::TextLayoutEngine;
use crate::text::TextSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessibilityRole {
    StaticText,
    Link,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessibilityElement {
    pub role: AccessibilityRole,
    pub frame: Rect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub value: String,
}

impl<E: TextLayoutEngine> HitTestCoordinator<E> {
    /// Container element first, then identified links in registration order.
    ///
    /// Links without an identifier are reachable by tapping only.
    pub fn accessibility_elements(
        &mut self,
        spec: &TextSpec,
        container_identifier: Option<&str>,
    ) -> Vec<AccessibilityElement> {
        let content = spec.text.content();
        let mut elements = vec![AccessibilityElement {
            role: AccessibilityRole::StaticText,
            frame: Rect::from_size(spec.size),
            identifier: container_identifier.map(str::to_string),
            value: content.to_string(),
        }];

        let identified: Vec<_> = self
            .links()
            .entries()
            .iter()
            .filter_map(|entry| {
                let identifier = entry.value.identifier.clone()?;
                Some((entry.range, identifier))
            })
            .collect();

        for (range, identifier) in identified {
            elements.push(AccessibilityElement {
                role: AccessibilityRole::Link,
                frame: self.rect_for_range(Some(spec), range),
                identifier: Some(identifier),
                value: range.slice(content).unwrap_or_default().to_string(),
            });
        }
        elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::text::{CharacterRange, Font};

    fn spec(text: &str) -> TextSpec {
        TextSpec::new(text, Size::new(200.0, 100.0)).with_font(Font::new("mono", 10.0))
    }

    #[test]
    fn test_container_comes_first() {
        let mut coordinator = HitTestCoordinator::new();
        let elements = coordinator.accessibility_elements(&spec("Hello world"), Some("label"));

        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].role, AccessibilityRole::StaticText);
        assert_eq!(elements[0].frame, Rect::new(0.0, 0.0, 200.0, 100.0));
        assert_eq!(elements[0].identifier.as_deref(), Some("label"));
        assert_eq!(elements[0].value, "Hello world");
    }

    #[test]
    fn test_only_identified_links_are_projected() {
        let mut coordinator = HitTestCoordinator::new();
        let text = spec("Hello world");
        coordinator.register_link(CharacterRange::of("Hello world", "Hello").unwrap(), None, || {});
        coordinator.register_link(
            CharacterRange::of("Hello world", "world").unwrap(),
            Some("world-link".into()),
            || {},
        );

        let elements = coordinator.accessibility_elements(&text, None);
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[1].role, AccessibilityRole::Link);
        assert_eq!(elements[1].identifier.as_deref(), Some("world-link"));
        assert_eq!(elements[1].value, "world");
        assert_eq!(elements[1].frame, Rect::new(36.0, 0.0, 30.0, 12.0));
    }

    #[test]
    fn test_serializes_to_json() {
        let mut coordinator = HitTestCoordinator::new();
        let elements = coordinator.accessibility_elements(&spec("Hi"), None);
        let json = serde_json::to_value(&elements).unwrap();

        assert_eq!(json[0]["role"], "static_text");
        assert_eq!(json[0]["value"], "Hi");
        assert!(json[0].get("identifier").is_none());
        assert_eq!(json[0]["frame"]["width"], 200.0);
    }
}
