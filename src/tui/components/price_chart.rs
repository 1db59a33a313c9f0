//! # Price Trend Chart Component
//!
//! Modal overlay charting recent market prices for the user's primary crop.
//! The server returns up to thirty days; the 7-day and 30-day views are pure
//! client-side slices of that one payload, so switching ranges never
//! refetches. Fresh data is requested each time the overlay opens.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Line;
use ratatui::widgets::{
    Axis, Block, BorderType, Borders, Chart, Clear, Dataset, GraphType, Padding, Paragraph,
};

use crate::api::{PriceHistory, PricePoint};
use crate::core::i18n::t;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;
use crate::tui::theme;

const WINDOW_SHORT: usize = 7;
const WINDOW_LONG: usize = 30;

/// Persistent state for the chart overlay.
pub struct PriceChartState {
    pub open: bool,
    pub is_loading: bool,
    pub data: Option<PriceHistory>,
    pub show_7_days: bool,
}

impl PriceChartState {
    pub fn new() -> Self {
        Self {
            open: false,
            is_loading: false,
            data: None,
            show_7_days: true,
        }
    }

    /// The slice of the series the current range shows: the most recent 7 or
    /// 30 points.
    pub fn windowed(&self) -> &[PricePoint] {
        let series = match &self.data {
            Some(history) => history.price_history.as_slice(),
            None => return &[],
        };
        let window = if self.show_7_days { WINDOW_SHORT } else { WINDOW_LONG };
        let start = series.len().saturating_sub(window);
        &series[start..]
    }

    pub fn set_data(&mut self, data: PriceHistory) {
        self.is_loading = false;
        self.data = Some(data);
    }

    /// A failed fetch presents the same as having no data at all.
    pub fn set_failure(&mut self) {
        self.is_loading = false;
        self.data = None;
    }
}

impl Default for PriceChartState {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for PriceChartState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        if !self.open {
            return None;
        }
        match event {
            TuiEvent::Escape => self.open = false,
            TuiEvent::InputChar('7') => self.show_7_days = true,
            TuiEvent::InputChar('3') => self.show_7_days = false,
            _ => {}
        }
        None
    }
}

/// Transient render wrapper for the chart overlay.
pub struct PriceChart<'a> {
    state: &'a PriceChartState,
}

impl<'a> PriceChart<'a> {
    pub fn new(state: &'a PriceChartState) -> Self {
        Self { state }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let crop = self
            .state
            .data
            .as_ref()
            .and_then(|d| d.crop.as_deref())
            .unwrap_or("");
        let title = if crop.is_empty() {
            format!(" {} ", t("priceTrendChart.title"))
        } else {
            format!(" {} · {} ", t("priceTrendChart.title"), crop)
        };
        let range_help = if self.state.show_7_days {
            " [7d]  3 30d  Esc "
        } else {
            " 7 7d  [30d]  Esc "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::AGRI_GREEN))
            .title(title)
            .title_bottom(Line::from(range_help).centered())
            .padding(Padding::uniform(1));

        frame.render_widget(Clear, area);

        if self.state.is_loading {
            let loading = Paragraph::new(t("loading"))
                .style(Style::default().add_modifier(theme::EMPHASIS_SM))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(loading, area);
            return;
        }

        let window = self.state.windowed();
        if window.is_empty() {
            let empty = Paragraph::new(t("priceTrendChart.noData"))
                .style(Style::default().add_modifier(theme::EMPHASIS_SM))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let points: Vec<(f64, f64)> = window
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.price))
            .collect();

        let (min_price, max_price) = price_bounds(window);
        let mid_price = (min_price + max_price) / 2.0;

        let x_labels = vec![
            Line::from(window.first().map(|p| p.date.clone()).unwrap_or_default()),
            Line::from(window.last().map(|p| p.date.clone()).unwrap_or_default()),
        ];
        let y_labels = vec![
            Line::from(format!("₹{min_price:.0}")),
            Line::from(format!("₹{mid_price:.0}")),
            Line::from(format!("₹{max_price:.0}")),
        ];

        let dataset = Dataset::default()
            .name(t("price"))
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::AGRI_GREEN))
            .data(&points);

        let chart = Chart::new(vec![dataset])
            .block(block)
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(theme::AGRI_DARK))
                    .labels(x_labels)
                    .bounds([0.0, (window.len().saturating_sub(1)).max(1) as f64]),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(theme::AGRI_DARK))
                    .labels(y_labels)
                    .bounds([min_price, max_price]),
            );
        frame.render_widget(chart, area);
    }
}

/// Y-axis bounds with a little headroom; a flat series still gets a visible
/// band.
fn price_bounds(window: &[PricePoint]) -> (f64, f64) {
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for p in window {
        min = min.min(p.price);
        max = max.max(p.price);
    }
    if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        let pad = (max - min) * 0.1;
        (min - pad, max + pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(n: usize) -> PriceHistory {
        PriceHistory {
            crop: Some("wheat".to_string()),
            price_history: (0..n)
                .map(|i| PricePoint {
                    date: format!("2025-06-{:02}", i + 1),
                    price: 2000.0 + i as f64,
                })
                .collect(),
        }
    }

    #[test]
    fn test_windowed_takes_most_recent_seven() {
        let mut state = PriceChartState::new();
        state.set_data(history(30));
        state.show_7_days = true;

        let window = state.windowed();
        assert_eq!(window.len(), 7);
        assert_eq!(window.first().map(|p| p.date.as_str()), Some("2025-06-24"));
        assert_eq!(window.last().map(|p| p.date.as_str()), Some("2025-06-30"));
    }

    #[test]
    fn test_windowed_thirty_day_range() {
        let mut state = PriceChartState::new();
        state.set_data(history(30));
        state.show_7_days = false;
        assert_eq!(state.windowed().len(), 30);
    }

    #[test]
    fn test_ten_point_series_windows() {
        let mut state = PriceChartState::new();
        state.set_data(history(10));

        state.show_7_days = true;
        let window = state.windowed();
        assert_eq!(window.len(), 7);
        assert_eq!(window.first().map(|p| p.date.as_str()), Some("2025-06-04"));
        assert_eq!(window.last().map(|p| p.date.as_str()), Some("2025-06-10"));

        state.show_7_days = false;
        assert_eq!(state.windowed().len(), 10);
    }

    #[test]
    fn test_windowed_with_fewer_points_than_window() {
        let mut state = PriceChartState::new();
        state.set_data(history(3));
        state.show_7_days = true;
        assert_eq!(state.windowed().len(), 3);
    }

    #[test]
    fn test_windowed_empty_without_data() {
        let state = PriceChartState::new();
        assert!(state.windowed().is_empty());
    }

    #[test]
    fn test_range_keys_switch_without_touching_data() {
        let mut state = PriceChartState::new();
        state.set_data(history(30));
        state.open = true;

        state.handle_event(&TuiEvent::InputChar('3'));
        assert!(!state.show_7_days);
        state.handle_event(&TuiEvent::InputChar('7'));
        assert!(state.show_7_days);
        // The payload never changes during range switches
        assert_eq!(state.data.as_ref().map(|d| d.price_history.len()), Some(30));
    }

    #[test]
    fn test_escape_closes_overlay() {
        let mut state = PriceChartState::new();
        state.open = true;
        state.handle_event(&TuiEvent::Escape);
        assert!(!state.open);
    }

    #[test]
    fn test_failure_clears_stale_data() {
        let mut state = PriceChartState::new();
        state.set_data(history(5));
        state.set_failure();
        assert!(state.data.is_none());
        assert!(state.windowed().is_empty());
    }

    #[test]
    fn test_failed_fetch_renders_same_as_never_fetched() {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        let mut never_fetched = PriceChartState::new();
        never_fetched.open = true;

        let mut failed = PriceChartState::new();
        failed.open = true;
        failed.set_data(history(5));
        failed.set_failure();

        let area = Rect::new(0, 0, 60, 20);
        let mut a = Terminal::new(TestBackend::new(60, 20)).unwrap();
        a.draw(|f| PriceChart::new(&never_fetched).render(f, area))
            .unwrap();
        let mut b = Terminal::new(TestBackend::new(60, 20)).unwrap();
        b.draw(|f| PriceChart::new(&failed).render(f, area)).unwrap();

        assert_eq!(a.backend().buffer(), b.backend().buffer());
    }

    #[test]
    fn test_price_bounds_pad_flat_series() {
        let flat = vec![
            PricePoint { date: "d1".to_string(), price: 2000.0 },
            PricePoint { date: "d2".to_string(), price: 2000.0 },
        ];
        let (min, max) = price_bounds(&flat);
        assert!(min < 2000.0);
        assert!(max > 2000.0);
    }
}
