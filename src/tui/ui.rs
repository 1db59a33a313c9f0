//! Frame composition: header, activity rail, sidebar, main area, overlays.
//!
//! Layout math lives here so the event loop can reuse it for mouse hit
//! testing (`rail_area` recomputes the same split `draw_ui` renders).

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::core::i18n::t;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::activity_bar::ActivityBar;
use crate::tui::components::category_selector::CategorySelector;
use crate::tui::components::conversation_sidebar::{ConversationSidebar, display_title};
use crate::tui::components::language_switcher::LanguageSwitcher;
use crate::tui::components::price_chart::PriceChart;
use crate::tui::components::profile_badge::UserProfileBadge;
use crate::tui::components::weather_alerts::WeatherAlerts;
use crate::tui::theme;

/// Width of the pinned conversation sidebar.
pub const SIDEBAR_WIDTH: u16 = 34;
/// Width of the activity rail.
pub const RAIL_WIDTH: u16 = 3;

pub fn draw_ui(frame: &mut Frame, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let [header_area, body_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());

    draw_header(frame, header_area, tui);

    let sidebar_width = if tui.pinned { SIDEBAR_WIDTH } else { 0 };
    let [rail, sidebar_area, main_area] = Layout::horizontal([
        Length(RAIL_WIDTH),
        Length(sidebar_width),
        Min(0),
    ])
    .areas(body_area);

    ActivityBar::new(tui.pinned).render(frame, rail);
    if tui.pinned {
        ConversationSidebar::new(&mut tui.sidebar).render(frame, sidebar_area);
    }
    draw_main(frame, main_area, tui);

    // Overlays, topmost last
    if tui.alerts.open {
        let area = alerts_anchor(frame.area());
        WeatherAlerts::new(&tui.alerts).render_dropdown(frame, area);
    }
    if tui.chart.open {
        let area = centered_rect(frame.area(), 70, 60);
        PriceChart::new(&tui.chart).render(frame, area);
    }
    if let Some(message) = &tui.alert_banner {
        draw_banner(frame, frame.area(), message);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let [title_area, switcher_area, bell_area, badge_area] =
        Layout::horizontal([Min(0), Length(8), Length(6), Length(24)]).areas(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" 🌾 {}", t("agriSahayak")),
            Style::default()
                .fg(theme::AGRI_GREEN)
                .add_modifier(theme::EMPHASIS_LG),
        ),
    ]));
    frame.render_widget(title, title_area);

    LanguageSwitcher.render(frame, switcher_area);
    WeatherAlerts::new(&tui.alerts).render_bell(frame, bell_area);

    let name = tui.sidebar.display_name();
    UserProfileBadge::new(&name).render(frame, badge_area);
}

fn draw_main(frame: &mut Frame, area: Rect, tui: &mut TuiState) {
    match &tui.sidebar.selected_id {
        Some(id) => {
            let title = tui
                .sidebar
                .all_conversations
                .iter()
                .find(|c| c.conversation_id == *id)
                .map(display_title)
                .unwrap_or_else(|| t("untitledConversation"));
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme::AGRI_PRIMARY))
                .title(format!(" {title} "));
            frame.render_widget(block, area);
        }
        None => {
            CategorySelector::new(&tui.categories).render(frame, area);
            if let Some(category) = tui.selected_category {
                let hint = Paragraph::new(format!("▸ {}", t(category)))
                    .style(Style::default().fg(theme::AGRI_ACCENT))
                    .alignment(Alignment::Center);
                let [_, hint_area] =
                    Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
                frame.render_widget(hint, hint_area);
            }
        }
    }
}

/// Transient error banner along the bottom edge, dismissed by the next key.
fn draw_banner(frame: &mut Frame, frame_area: Rect, message: &str) {
    let [_, banner_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame_area);
    frame.render_widget(Clear, banner_area);
    let banner = Paragraph::new(format!(" ⚠ {message}"))
        .style(
            Style::default()
                .fg(theme::AGRI_LIGHT)
                .bg(theme::SEVERITY_HIGH),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(banner, banner_area);
}

/// The activity rail's rect for mouse hit testing. Must stay in sync with
/// the split in `draw_ui`.
pub fn rail_area(frame_area: Rect) -> Rect {
    use Constraint::{Length, Min};
    let [_, body_area] = Layout::vertical([Length(1), Min(0)]).areas(frame_area);
    let [rail, _] = Layout::horizontal([Length(RAIL_WIDTH), Min(0)]).areas(body_area);
    rail
}

/// Dropdown anchored under the bell at the right edge of the header.
fn alerts_anchor(frame_area: Rect) -> Rect {
    let width = 46.min(frame_area.width);
    let height = 14.min(frame_area.height.saturating_sub(1));
    Rect {
        x: frame_area.width.saturating_sub(width + 1),
        y: 1,
        width,
        height,
    }
}

fn centered_rect(frame_area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(frame_area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(mid);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::conversation;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_draw_ui_smoke() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tui = TuiState::new(None);
        tui.sidebar
            .set_conversations(vec![conversation("c1", Some("Wheat"), None)]);
        terminal.draw(|f| draw_ui(f, &mut tui)).unwrap();
    }

    #[test]
    fn test_draw_ui_with_overlays_open() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tui = TuiState::new(None);
        tui.alerts.open = true;
        tui.chart.open = true;
        tui.alert_banner = Some("Network error".to_string());
        terminal.draw(|f| draw_ui(f, &mut tui)).unwrap();
    }

    #[test]
    fn test_draw_ui_unpinned_hides_sidebar() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tui = TuiState::new(None);
        tui.pinned = false;
        terminal.draw(|f| draw_ui(f, &mut tui)).unwrap();
    }

    #[test]
    fn test_rail_area_starts_below_header() {
        let area = Rect::new(0, 0, 100, 30);
        let rail = rail_area(area);
        assert_eq!(rail.y, 1);
        assert_eq!(rail.width, RAIL_WIDTH);
    }
}
