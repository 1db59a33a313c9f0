//! # Weather Alerts Component
//!
//! Bell indicator with an unread badge plus a dropdown listing the current
//! alert set. The alert list is ephemeral server state: every poll replaces
//! it wholesale. What persists per user is a single read watermark, the
//! batch's `last_updated` value saved when the dropdown is opened.
//!
//! Unread counting mirrors the watermark rule exactly: with no stored
//! watermark every alert is unread; with one, an alert is unread only when
//! its timestamp parses and is strictly newer than the watermark.

use chrono::DateTime;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, Padding, Paragraph};

use crate::api::{AlertSeverity, WeatherAlert, WeatherAlertBatch};
use crate::core::i18n::t;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;
use crate::tui::theme;

/// Badge cap: counts above nine render as "9+".
const BADGE_MAX: u32 = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertsEvent {
    /// Manual refresh request from the dropdown.
    Refresh,
}

/// Persistent state for the bell and dropdown.
pub struct WeatherAlertsState {
    pub open: bool,
    pub is_loading: bool,
    pub alerts: Vec<WeatherAlert>,
    pub last_updated: Option<String>,
    pub unread: u32,
}

impl WeatherAlertsState {
    pub fn new() -> Self {
        Self {
            open: false,
            is_loading: true,
            alerts: Vec::new(),
            last_updated: None,
            unread: 0,
        }
    }

    /// Install a fetched batch and recount unread against the stored
    /// watermark.
    pub fn apply_batch(&mut self, batch: WeatherAlertBatch, stored_check: Option<&str>) {
        self.is_loading = false;
        self.unread = count_unread(&batch.alerts, stored_check);
        self.alerts = batch.alerts;
        self.last_updated = batch.last_updated;
    }

    /// A failed poll clears the alert list but leaves the watermark and
    /// unread count from the last good batch alone.
    pub fn apply_failure(&mut self) {
        self.is_loading = false;
        self.alerts.clear();
    }

    /// Bell badge text, if any alerts are unread.
    pub fn badge_label(&self) -> Option<String> {
        match self.unread {
            0 => None,
            n if n > BADGE_MAX => Some("9+".to_string()),
            n => Some(n.to_string()),
        }
    }

    /// Toggle the dropdown. On a closed-to-open transition with a known
    /// batch marker, the unread count resets and the marker is returned for
    /// the caller to persist as the new watermark. Open-to-close never
    /// touches read state.
    pub fn toggle_open(&mut self) -> Option<String> {
        if self.open {
            self.open = false;
            return None;
        }
        self.open = true;
        let marker = self.last_updated.clone()?;
        self.unread = 0;
        Some(marker)
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

impl Default for WeatherAlertsState {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for WeatherAlertsState {
    type Event = AlertsEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<AlertsEvent> {
        if !self.open {
            return None;
        }
        match event {
            TuiEvent::Escape => {
                self.close();
                None
            }
            // Refresh is a no-op while a fetch is already in flight
            TuiEvent::InputChar('r') | TuiEvent::InputChar('R') if !self.is_loading => {
                self.is_loading = true;
                Some(AlertsEvent::Refresh)
            }
            _ => None,
        }
    }
}

/// Count alerts strictly newer than the stored watermark.
fn count_unread(alerts: &[WeatherAlert], stored_check: Option<&str>) -> u32 {
    let Some(stored) = stored_check else {
        return alerts.len() as u32;
    };
    let Ok(watermark) = DateTime::parse_from_rfc3339(stored) else {
        return 0;
    };
    alerts
        .iter()
        .filter(|a| {
            DateTime::parse_from_rfc3339(&a.timestamp)
                .map(|ts| ts > watermark)
                .unwrap_or(false)
        })
        .count() as u32
}

pub fn severity_color(severity: AlertSeverity) -> Color {
    match severity {
        AlertSeverity::High => theme::SEVERITY_HIGH,
        AlertSeverity::Medium => theme::SEVERITY_MEDIUM,
        AlertSeverity::Low => theme::SEVERITY_LOW,
    }
}

/// Transient render wrapper for the bell and dropdown overlay.
pub struct WeatherAlerts<'a> {
    state: &'a WeatherAlertsState,
}

impl<'a> WeatherAlerts<'a> {
    pub fn new(state: &'a WeatherAlertsState) -> Self {
        Self { state }
    }

    /// Render the bell icon with its badge into a small header cell.
    pub fn render_bell(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            "🔔",
            Style::default().fg(theme::AGRI_AMBER),
        )];
        if let Some(badge) = self.state.badge_label() {
            spans.push(Span::styled(
                format!(" {badge}"),
                Style::default()
                    .fg(theme::SEVERITY_HIGH)
                    .add_modifier(theme::EMPHASIS_LG),
            ));
        }
        let widget = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(widget, area);
    }

    /// Render the dropdown overlay anchored under the header.
    pub fn render_dropdown(&self, frame: &mut Frame, area: Rect) {
        let help = if self.state.is_loading {
            format!(" {} ", t("refreshing"))
        } else {
            format!(" r {}  Esc {} ", t("refresh"), t("cancel"))
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::AGRI_AMBER))
            .title(format!(" {} ", t("weatherAlerts")))
            .title_bottom(Line::from(help).centered())
            .padding(Padding::horizontal(1));

        frame.render_widget(Clear, area);

        if self.state.is_loading && self.state.alerts.is_empty() {
            let loading = Paragraph::new(t("loadingAlerts"))
                .style(Style::default().add_modifier(theme::EMPHASIS_SM))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(loading, area);
            return;
        }

        if self.state.alerts.is_empty() {
            let empty = Paragraph::new(format!("{}\n\n{}", t("noWeatherAlerts"), t("stayTuned")))
                .style(Style::default().add_modifier(theme::EMPHASIS_SM))
                .alignment(Alignment::Center)
                .block(block)
                .wrap(ratatui::widgets::Wrap { trim: true });
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .alerts
            .iter()
            .map(|alert| {
                let color = severity_color(alert.severity);
                let header = Line::from(vec![
                    Span::styled(format!("{} ", alert.icon), Style::default()),
                    Span::styled(
                        alert.title.clone(),
                        Style::default().fg(color).add_modifier(theme::EMPHASIS_LG),
                    ),
                    Span::styled(
                        format!("  {}", alert.district),
                        Style::default().add_modifier(theme::EMPHASIS_SM),
                    ),
                ]);
                let body = Line::styled(
                    format!("   {}", alert.message),
                    Style::default().fg(theme::AGRI_LIGHT),
                );
                ListItem::new(vec![header, body, Line::default()])
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::alert;

    fn batch(alerts: Vec<WeatherAlert>, last_updated: Option<&str>) -> WeatherAlertBatch {
        WeatherAlertBatch {
            alerts,
            last_updated: last_updated.map(str::to_string),
        }
    }

    #[test]
    fn test_no_watermark_means_all_unread() {
        let mut state = WeatherAlertsState::new();
        state.apply_batch(
            batch(
                vec![
                    alert(AlertSeverity::High, "2025-06-01T10:00:00Z"),
                    alert(AlertSeverity::Low, "2025-06-02T10:00:00Z"),
                ],
                Some("2025-06-02T12:00:00Z"),
            ),
            None,
        );
        assert_eq!(state.unread, 2);
    }

    #[test]
    fn test_unread_counts_only_newer_than_watermark() {
        let mut state = WeatherAlertsState::new();
        state.apply_batch(
            batch(
                vec![
                    alert(AlertSeverity::High, "2025-06-01T10:00:00Z"),
                    alert(AlertSeverity::Medium, "2025-06-03T10:00:00Z"),
                    alert(AlertSeverity::Low, "2025-06-04T10:00:00Z"),
                ],
                Some("2025-06-04T12:00:00Z"),
            ),
            Some("2025-06-02T00:00:00Z"),
        );
        assert_eq!(state.unread, 2);
    }

    #[test]
    fn test_unparseable_alert_timestamp_is_not_unread() {
        let mut state = WeatherAlertsState::new();
        state.apply_batch(
            batch(
                vec![
                    alert(AlertSeverity::High, "garbage"),
                    alert(AlertSeverity::Low, "2025-06-03T10:00:00Z"),
                ],
                None,
            ),
            Some("2025-06-02T00:00:00Z"),
        );
        assert_eq!(state.unread, 1);
    }

    #[test]
    fn test_unparseable_watermark_yields_zero_unread() {
        let mut state = WeatherAlertsState::new();
        state.apply_batch(
            batch(vec![alert(AlertSeverity::High, "2025-06-03T10:00:00Z")], None),
            Some("not-a-date"),
        );
        assert_eq!(state.unread, 0);
    }

    #[test]
    fn test_badge_caps_at_nine_plus() {
        let mut state = WeatherAlertsState::new();
        assert_eq!(state.badge_label(), None);

        state.unread = 3;
        assert_eq!(state.badge_label().as_deref(), Some("3"));

        state.unread = 9;
        assert_eq!(state.badge_label().as_deref(), Some("9"));

        state.unread = 12;
        assert_eq!(state.badge_label().as_deref(), Some("9+"));
    }

    #[test]
    fn test_open_marks_read_and_returns_marker() {
        let mut state = WeatherAlertsState::new();
        state.apply_batch(
            batch(
                vec![alert(AlertSeverity::High, "2025-06-03T10:00:00Z")],
                Some("2025-06-03T12:00:00Z"),
            ),
            None,
        );
        assert_eq!(state.unread, 1);

        let marker = state.toggle_open();
        assert!(state.open);
        assert_eq!(marker.as_deref(), Some("2025-06-03T12:00:00Z"));
        assert_eq!(state.unread, 0);

        // Closing returns nothing and changes no read state
        assert!(state.toggle_open().is_none());
        assert!(!state.open);
    }

    #[test]
    fn test_open_without_marker_keeps_unread() {
        let mut state = WeatherAlertsState::new();
        state.apply_batch(
            batch(vec![alert(AlertSeverity::High, "2025-06-03T10:00:00Z")], None),
            None,
        );
        assert_eq!(state.unread, 1);

        let marker = state.toggle_open();
        assert!(marker.is_none());
        // Without a batch marker there is nothing to persist, so the count
        // stays until a batch with one arrives
        assert_eq!(state.unread, 1);
    }

    #[test]
    fn test_failure_clears_alerts_but_keeps_watermark_state() {
        let mut state = WeatherAlertsState::new();
        state.apply_batch(
            batch(
                vec![alert(AlertSeverity::High, "2025-06-03T10:00:00Z")],
                Some("2025-06-03T12:00:00Z"),
            ),
            None,
        );
        state.apply_failure();

        assert!(state.alerts.is_empty());
        assert_eq!(state.last_updated.as_deref(), Some("2025-06-03T12:00:00Z"));
        assert_eq!(state.unread, 1);
    }

    #[test]
    fn test_refresh_ignored_while_loading() {
        let mut state = WeatherAlertsState::new();
        state.is_loading = false;
        state.open = true;

        let first = state.handle_event(&TuiEvent::InputChar('r'));
        assert_eq!(first, Some(AlertsEvent::Refresh));
        assert!(state.is_loading);

        let second = state.handle_event(&TuiEvent::InputChar('r'));
        assert!(second.is_none());
    }

    #[test]
    fn test_events_ignored_while_closed() {
        let mut state = WeatherAlertsState::new();
        state.is_loading = false;
        assert!(state.handle_event(&TuiEvent::InputChar('r')).is_none());
        assert!(!state.is_loading);
    }
}
