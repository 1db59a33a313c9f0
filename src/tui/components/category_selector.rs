//! # Category Selector Component
//!
//! Landing view shown when no conversation is selected: a grid of advisory
//! topic cards. Choosing a card seeds a new conversation with that topic.
//!
//! Card names and subtitles come from the translation bundle, so the grid
//! follows the active locale without any state of its own beyond the cursor.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::core::i18n::t;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme;

/// One advisory topic card. `key` doubles as the translation key and the
/// category identifier sent upstream.
pub struct Category {
    pub key: &'static str,
    pub icon: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category { key: "farming", icon: "🌾" },
    Category { key: "loans", icon: "💰" },
    Category { key: "market_prices", icon: "📈" },
    Category { key: "weather", icon: "🌦" },
    Category { key: "livestock", icon: "🐄" },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryEvent {
    /// Start a conversation seeded with this category key.
    Choose(&'static str),
}

#[derive(Default)]
pub struct CategorySelectorState {
    pub cursor: usize,
}

impl EventHandler for CategorySelectorState {
    type Event = CategoryEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<CategoryEvent> {
        match event {
            TuiEvent::CursorLeft | TuiEvent::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            TuiEvent::CursorRight | TuiEvent::CursorDown => {
                self.cursor = (self.cursor + 1).min(CATEGORIES.len() - 1);
                None
            }
            TuiEvent::Submit => Some(CategoryEvent::Choose(CATEGORIES[self.cursor].key)),
            TuiEvent::InputChar(c) => {
                // Digits 1-5 choose a card directly
                let digit = c.to_digit(10)? as usize;
                if (1..=CATEGORIES.len()).contains(&digit) {
                    self.cursor = digit - 1;
                    Some(CategoryEvent::Choose(CATEGORIES[digit - 1].key))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

pub struct CategorySelector<'a> {
    state: &'a CategorySelectorState,
}

impl<'a> CategorySelector<'a> {
    pub fn new(state: &'a CategorySelectorState) -> Self {
        Self { state }
    }
}

impl Component for CategorySelector<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [_, heading_area, _, cards_area, _] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(2),
            Constraint::Length(theme::SPACE_XS),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .areas(area);

        let heading = Paragraph::new(vec![
            Line::styled(
                t("quickStart"),
                Style::default()
                    .fg(theme::AGRI_GREEN)
                    .add_modifier(theme::EMPHASIS_LG),
            ),
            Line::styled(
                t("chooseCategory"),
                Style::default().add_modifier(theme::EMPHASIS_SM),
            ),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(heading, heading_area);

        let constraints: Vec<Constraint> = CATEGORIES
            .iter()
            .map(|_| Constraint::Ratio(1, CATEGORIES.len() as u32))
            .collect();
        let columns = Layout::horizontal(constraints).split(cards_area);

        for (i, category) in CATEGORIES.iter().enumerate() {
            let is_cursor = i == self.state.cursor;
            let border_style = if is_cursor {
                Style::default()
                    .fg(theme::AGRI_GREEN)
                    .add_modifier(theme::EMPHASIS_LG)
            } else {
                Style::default().fg(theme::AGRI_DARK)
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style)
                .title(format!(" {} ", i + 1));

            let card = Paragraph::new(vec![
                Line::from(category.icon),
                Line::styled(
                    t(category.key),
                    Style::default().fg(theme::AGRI_LIGHT).add_modifier(theme::EMPHASIS_LG),
                ),
                Line::styled(
                    t(&format!("{}.subtitle", category.key)),
                    Style::default().add_modifier(theme::EMPHASIS_SM),
                ),
            ])
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(card, columns[i]);
        }
    }
}
