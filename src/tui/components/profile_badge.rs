//! # User Profile Badge Component
//!
//! Compact header badge with the user's initial and display name.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::theme;

pub struct UserProfileBadge<'a> {
    pub name: &'a str,
}

impl<'a> UserProfileBadge<'a> {
    pub fn new(name: &'a str) -> Self {
        Self { name }
    }

    fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}

impl Component for UserProfileBadge<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                format!("({})", self.initial()),
                Style::default()
                    .fg(theme::AGRI_GREEN)
                    .add_modifier(theme::EMPHASIS_LG),
            ),
            Span::styled(
                format!(" {}", self.name),
                Style::default().fg(theme::AGRI_LIGHT),
            ),
        ]);
        let widget = Paragraph::new(line).alignment(Alignment::Right);
        frame.render_widget(widget, area);
    }
}
