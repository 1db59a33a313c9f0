//! # Language Switcher Component
//!
//! Two-way toggle between English and Hindi. Switching updates the
//! process-wide locale and persists the choice so the next launch starts in
//! the same language.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::widgets::Paragraph;

use crate::core::i18n::{self, Language};
use crate::core::store::{LANGUAGE_KEY, Store};
use crate::tui::component::Component;
use crate::tui::theme;

pub struct LanguageSwitcher;

impl LanguageSwitcher {
    /// Flip the active locale and persist it. Returns the new language.
    pub fn toggle(store: &mut Store) -> Language {
        let next = i18n::language().toggled();
        i18n::set_language(next);
        store.set(LANGUAGE_KEY, next.code());
        log::info!("locale switched to {}", next.code());
        next
    }

    fn label() -> &'static str {
        match i18n::language() {
            Language::En => "🌐 EN",
            Language::Hi => "🌐 हिं",
        }
    }
}

impl Component for LanguageSwitcher {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let widget = Paragraph::new(Self::label())
            .style(Style::default().fg(theme::AGRI_INFO))
            .alignment(Alignment::Center);
        frame.render_widget(widget, area);
    }
}
