//! State for the interactive demo: three labels and the status line.

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect as CellRect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use hyperspan::accessibility::AccessibilityElement;
use hyperspan::config::HitTestConfig;
use hyperspan::coordinator::MatchKind;
use hyperspan::geometry::{Point, Size};
use hyperspan::label::HyperLabel;
use hyperspan::text::{CharacterRange, Font, TextStyle};
use hyperspan::widget::{CellGrid, HyperLabelWidget};

pub const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.";

pub const URL_TEXT: &str = "Read the guide at https://example.com/guide, or report a problem at https://example.com/issues.";

/// Cell size used when no terminal is attached (accessibility dump).
const HEADLESS_AREA: CellRect = CellRect {
    x: 0,
    y: 0,
    width: 60,
    height: 10,
};

type Status = Rc<RefCell<Option<String>>>;

pub struct Example {
    pub title: &'static str,
    pub label: HyperLabel,
    /// Where the label was drawn last frame
    area: Option<CellRect>,
}

pub struct DemoApp {
    pub examples: Vec<Example>,
    grid: CellGrid,
    status: Status,
    hovered: Option<(usize, CharacterRange)>,
}

fn demo_font() -> Font {
    Font::new("terminal", 10.0)
}

fn link_style() -> TextStyle {
    TextStyle::new(
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::UNDERLINED),
    )
}

fn report(status: &Status, message: &str) -> impl FnMut() + 'static {
    let status = Rc::clone(status);
    let message = message.to_string();
    move || {
        tracing::info!(link = %message, "Link pressed");
        *status.borrow_mut() = Some(message.clone());
    }
}

fn lorem_label(config: &HitTestConfig, extended: bool, status: &Status) -> HyperLabel {
    let mut label = HyperLabel::with_config(Size::ZERO, config);
    label.set_font(demo_font());
    label.set_extends_link_touch_area(extended);
    label.set_link_style(link_style());
    label.set_text(LOREM);

    if let Some(range) = CharacterRange::of(LOREM, "consectetur adipiscing elit") {
        label.add_link_with_identifier(
            range,
            Some("first-link".into()),
            report(status, "first link pressed"),
        );
    }
    if let Some(range) = CharacterRange::of(LOREM, "minim veniam") {
        label.add_link_with_identifier(
            range,
            Some("second-link".into()),
            report(status, "second link pressed"),
        );
    }
    label
}

fn url_label(config: &HitTestConfig, status: &Status) -> HyperLabel {
    let mut label = HyperLabel::with_config(Size::ZERO, config);
    label.set_font(demo_font());
    label.set_link_style(link_style());
    label.set_text(URL_TEXT);

    let status = Rc::clone(status);
    label.add_detected_links(move |url| {
        tracing::info!(%url, "URL pressed");
        *status.borrow_mut() = Some(format!("open {url}"));
    });
    label
}

impl DemoApp {
    pub fn new(config: &HitTestConfig) -> Self {
        let status: Status = Rc::new(RefCell::new(None));
        let examples = vec![
            Example {
                title: "Exact touchable area",
                label: lorem_label(config, false, &status),
                area: None,
            },
            Example {
                title: "Extended touchable area",
                label: lorem_label(config, true, &status),
                area: None,
            },
            Example {
                title: "Detected URLs",
                label: url_label(config, &status),
                area: None,
            },
        ];
        Self {
            examples,
            grid: CellGrid::for_font(&demo_font(), config.metrics),
            status,
            hovered: None,
        }
    }

    /// Last link message, if any link fired.
    pub fn status(&self) -> Option<String> {
        self.status.borrow().clone()
    }

    /// Example index and point under the cell, if it falls in a label.
    fn locate(&self, column: u16, row: u16) -> Option<(usize, Point)> {
        self.examples.iter().enumerate().find_map(|(i, example)| {
            let area = example.area?;
            self.grid.point_at(area, column, row).map(|point| (i, point))
        })
    }

    pub fn click(&mut self, column: u16, row: u16) -> bool {
        let Some((index, point)) = self.locate(column, row) else {
            return false;
        };
        let fired = self.examples[index].label.handle_tap(point);
        if !fired {
            *self.status.borrow_mut() = Some(format!(
                "no link near ({:.1}, {:.1}) in \"{}\"",
                point.x, point.y, self.examples[index].title
            ));
        }
        fired
    }

    pub fn hover(&mut self, column: u16, row: u16) {
        self.hovered = self.locate(column, row).and_then(|(index, point)| {
            let label = &mut self.examples[index].label;
            let hit = label.link_at(point)?;
            // Only exact hits get the hover highlight
            if !matches!(hit.kind, MatchKind::Exact) {
                return None;
            }
            let range = label.links().get(hit.slot)?.range;
            Some((index, range))
        });
    }

    /// Accessibility tree of every example, laid out at a fixed size.
    pub fn accessibility_dump(&mut self) -> Vec<(&'static str, Vec<AccessibilityElement>)> {
        let size = self.grid.size_of(HEADLESS_AREA);
        self.examples
            .iter_mut()
            .map(|example| {
                example.label.set_size(size);
                (example.title, example.label.accessibility_elements())
            })
            .collect()
    }

    pub fn render(&mut self, area: CellRect, buf: &mut Buffer) {
        let [labels, status] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        let rows = Layout::vertical([Constraint::Ratio(1, 3); 3]).split(labels);

        for (index, (example, row)) in self.examples.iter_mut().zip(rows.iter()).enumerate() {
            let block = Block::default().borders(Borders::ALL).title(example.title);
            let inner = block.inner(*row);
            block.render(*row, buf);

            example.area = Some(inner);
            example.label.set_size(self.grid.size_of(inner));

            let mut widget = HyperLabelWidget::new(&mut example.label, self.grid);
            if let Some((hovered, range)) = self.hovered {
                if hovered == index {
                    widget = widget.highlight(range, Style::default().bg(Color::DarkGray));
                }
            }
            widget.render(inner, buf);
        }

        let message = self
            .status()
            .unwrap_or_else(|| "click a link; q to quit".to_string());
        Paragraph::new(Line::from(message))
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true })
            .render(status, buf);
    }
}
