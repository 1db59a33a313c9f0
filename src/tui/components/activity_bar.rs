//! # Activity Bar Component
//!
//! Narrow vertical rail on the far left with one icon per global action.
//! Stateless: actions are surfaced to the shell, which owns the sidebar
//! pin state and the user menu.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::component::Component;
use crate::tui::theme;

/// Global actions the rail exposes, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityAction {
    TogglePin,
    NewChat,
    FocusSearch,
    Profile,
}

const ICONS: &[(&str, ActivityAction)] = &[
    ("☰", ActivityAction::TogglePin),
    ("+", ActivityAction::NewChat),
    ("⌕", ActivityAction::FocusSearch),
    ("◉", ActivityAction::Profile),
];

pub struct ActivityBar {
    pub pinned: bool,
}

impl ActivityBar {
    pub fn new(pinned: bool) -> Self {
        Self { pinned }
    }

    /// Map a click row inside the rail to its action. Each icon occupies one
    /// row, starting below the top border.
    pub fn action_at(area: Rect, row: u16) -> Option<ActivityAction> {
        let index = row.checked_sub(area.y + 1)? as usize;
        ICONS.get(index).map(|(_, action)| *action)
    }
}

impl Component for ActivityBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(theme::AGRI_DARK));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let constraints: Vec<Constraint> =
            ICONS.iter().map(|_| Constraint::Length(1)).collect();
        let rows = Layout::vertical(constraints).split(inner);

        for (i, (icon, action)) in ICONS.iter().enumerate() {
            let style = if *action == ActivityAction::TogglePin && self.pinned {
                Style::default()
                    .fg(theme::AGRI_GREEN)
                    .add_modifier(theme::EMPHASIS_LG)
            } else {
                Style::default().fg(theme::AGRI_LIGHT)
            };
            let cell = Paragraph::new(*icon)
                .style(style)
                .alignment(Alignment::Center);
            frame.render_widget(cell, rows[i]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_at_maps_rows_below_border() {
        let area = Rect::new(0, 0, 3, 10);
        assert_eq!(ActivityBar::action_at(area, 1), Some(ActivityAction::TogglePin));
        assert_eq!(ActivityBar::action_at(area, 2), Some(ActivityAction::NewChat));
        assert_eq!(ActivityBar::action_at(area, 3), Some(ActivityAction::FocusSearch));
        assert_eq!(ActivityBar::action_at(area, 4), Some(ActivityAction::Profile));
    }

    #[test]
    fn test_action_at_outside_rail_is_none() {
        let area = Rect::new(0, 0, 3, 10);
        assert_eq!(ActivityBar::action_at(area, 0), None);
        assert_eq!(ActivityBar::action_at(area, 9), None);
    }
}
