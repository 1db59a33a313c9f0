//! # TUI Adapter
//!
//! The ratatui-specific layer: terminal I/O, frame composition, and the event
//! loop that ties components to the advisory API.
//!
//! ## Concurrency Model
//!
//! The loop itself is synchronous. Every network call runs in a spawned tokio
//! task that reports back over a std `mpsc` channel as a [`Msg`]. Fetches that
//! replace whole data sets (profile, conversations, alerts, prices) carry a
//! generation number; a response whose generation no longer matches the
//! counter is stale and gets dropped, so a slow response can never clobber a
//! newer one. Mutations (delete, rename) carry their target id instead and are
//! reconciled into local state only on success.
//!
//! ## Redraw Strategy
//!
//! Conditional redraw, same as the rest of our tools: draw once up front,
//! then only when an event, a message, the filter debounce, or the alert poll
//! timer actually changed something. Idle polling sleeps up to 250ms.

mod component;
mod components;
mod event;
pub mod theme;
mod ui;

use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use log::{debug, info, warn};

use crate::api::{
    AdvisoryApi, ApiError, Conversation, HttpAdvisoryApi, PriceHistory, UserProfile,
    WeatherAlertBatch,
};
use crate::core::config::ResolvedConfig;
use crate::core::i18n::t;
use crate::core::store::{self, Store, USER_ID_KEY, USER_NAME_KEY};
use crate::tui::component::EventHandler;
use crate::tui::components::activity_bar::{ActivityAction, ActivityBar};
use crate::tui::components::category_selector::{CategoryEvent, CategorySelectorState};
use crate::tui::components::conversation_sidebar::{ConversationSidebarState, SidebarEvent};
use crate::tui::components::language_switcher::LanguageSwitcher;
use crate::tui::components::price_chart::PriceChartState;
use crate::tui::components::weather_alerts::{AlertsEvent, WeatherAlertsState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which region has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Main,
}

/// Messages sent back from background API tasks.
pub enum Msg {
    ProfileLoaded {
        generation: u64,
        result: Result<UserProfile, ApiError>,
    },
    ConversationsLoaded {
        generation: u64,
        result: Result<Vec<Conversation>, ApiError>,
    },
    DeleteDone {
        conversation_id: String,
        result: Result<(), ApiError>,
    },
    RenameDone {
        conversation_id: String,
        title: String,
        result: Result<(), ApiError>,
    },
    AlertsLoaded {
        generation: u64,
        result: Result<WeatherAlertBatch, ApiError>,
    },
    PriceLoaded {
        generation: u64,
        result: Result<PriceHistory, ApiError>,
    },
    LogoutDone(Result<(), ApiError>),
}

/// TUI presentation state: persistent component states plus shell flags.
pub struct TuiState {
    pub sidebar: ConversationSidebarState,
    pub alerts: WeatherAlertsState,
    pub chart: PriceChartState,
    pub categories: CategorySelectorState,
    pub focus: Focus,
    pub pinned: bool,
    /// Transient error banner, dismissed by the next key press.
    pub alert_banner: Option<String>,
    /// Topic hint from the category selector for the next conversation.
    pub selected_category: Option<&'static str>,
}

impl TuiState {
    pub fn new(fallback_name: Option<String>) -> Self {
        Self {
            sidebar: ConversationSidebarState::new(fallback_name),
            alerts: WeatherAlertsState::new(),
            chart: PriceChartState::new(),
            categories: CategorySelectorState::default(),
            focus: Focus::Sidebar,
            pinned: true,
            alert_banner: None,
            selected_category: None,
        }
    }
}

/// Generation counters, one per replaceable data set.
#[derive(Default)]
struct Generations {
    profile: u64,
    conversations: u64,
    alerts: u64,
    price: u64,
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse capture)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

pub fn run(config: ResolvedConfig, mut store: Store, user_id: String) -> std::io::Result<()> {
    let api: Arc<dyn AdvisoryApi> =
        Arc::new(HttpAdvisoryApi::new(Some(config.server_url.clone())));
    let fallback_name = store.get(USER_NAME_KEY).map(str::to_string);
    let mut tui = TuiState::new(fallback_name);
    let mut gens = Generations::default();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();
    let (tx, rx) = mpsc::channel();

    // Initial fetches: profile, conversations, and the first alert poll
    spawn_profile(api.clone(), user_id.clone(), gens.profile, tx.clone());
    spawn_conversations(api.clone(), user_id.clone(), gens.conversations, tx.clone());
    spawn_alerts(api.clone(), user_id.clone(), gens.alerts, tx.clone());

    let alert_poll_interval = Duration::from_secs(config.alert_poll_minutes * 60);
    let mut next_alert_poll = Instant::now() + alert_poll_interval;

    let mut needs_redraw = true;
    let mut should_quit = false;
    let mut logging_out = false;

    loop {
        let now = Instant::now();

        // Debounced filter and periodic alert poll both piggyback on the tick
        if tui.sidebar.poll_filter(now) {
            needs_redraw = true;
        }
        if now >= next_alert_poll {
            next_alert_poll = now + alert_poll_interval;
            if !tui.alerts.is_loading {
                tui.alerts.is_loading = true;
                gens.alerts += 1;
                spawn_alerts(api.clone(), user_id.clone(), gens.alerts, tx.clone());
            }
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }

        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            if matches!(event, TuiEvent::ForceQuit) {
                should_quit = true;
                continue;
            }

            // Any key dismisses the error banner, then still gets handled
            if !matches!(event, TuiEvent::MouseClick(..)) && tui.alert_banner.is_some() {
                tui.alert_banner = None;
            }

            if logging_out {
                continue;
            }

            // Global chords first; they work regardless of focus
            match event {
                TuiEvent::TogglePin => {
                    tui.pinned = !tui.pinned;
                    if !tui.pinned && tui.focus == Focus::Sidebar {
                        tui.focus = Focus::Main;
                    }
                    continue;
                }
                TuiEvent::NewChat => {
                    tui.sidebar.selected_id = None;
                    tui.selected_category = None;
                    tui.focus = Focus::Main;
                    continue;
                }
                TuiEvent::FocusSearch => {
                    tui.pinned = true;
                    tui.focus = Focus::Sidebar;
                    tui.sidebar.searching = true;
                    continue;
                }
                TuiEvent::Profile => {
                    tui.pinned = true;
                    tui.focus = Focus::Sidebar;
                    tui.sidebar.show_user_menu = !tui.sidebar.show_user_menu;
                    continue;
                }
                TuiEvent::ToggleLanguage => {
                    LanguageSwitcher::toggle(&mut store);
                    continue;
                }
                TuiEvent::ToggleAlerts => {
                    if let Some(marker) = tui.alerts.toggle_open() {
                        store.set(&store::alerts_last_check_key(&user_id), &marker);
                    }
                    continue;
                }
                TuiEvent::ToggleChart => {
                    if tui.chart.open {
                        tui.chart.open = false;
                    } else {
                        // Fresh data on every open
                        tui.chart.open = true;
                        tui.chart.is_loading = true;
                        gens.price += 1;
                        spawn_price(api.clone(), user_id.clone(), gens.price, tx.clone());
                    }
                    continue;
                }
                TuiEvent::Logout => {
                    start_logout(api.clone(), &mut store, user_id.clone(), tx.clone());
                    logging_out = true;
                    continue;
                }
                TuiEvent::FocusNext => {
                    tui.focus = match tui.focus {
                        Focus::Sidebar => Focus::Main,
                        Focus::Main if tui.pinned => Focus::Sidebar,
                        Focus::Main => Focus::Main,
                    };
                    continue;
                }
                _ => {}
            }

            // Overlays swallow events while open, topmost first
            if tui.chart.open {
                tui.chart.handle_event(&event);
                continue;
            }
            if tui.alerts.open {
                if let Some(AlertsEvent::Refresh) = tui.alerts.handle_event(&event) {
                    gens.alerts += 1;
                    spawn_alerts(api.clone(), user_id.clone(), gens.alerts, tx.clone());
                }
                continue;
            }

            // Wheel scrolling always drives the sidebar list when it's shown
            if matches!(event, TuiEvent::ScrollUp | TuiEvent::ScrollDown) {
                if tui.pinned {
                    tui.sidebar.handle_event(&event);
                }
                continue;
            }

            if let TuiEvent::MouseClick(_col, row) = event {
                let rail = ui::rail_area(terminal.get_frame().area());
                match ActivityBar::action_at(rail, row) {
                    Some(ActivityAction::TogglePin) => tui.pinned = !tui.pinned,
                    Some(ActivityAction::NewChat) => {
                        tui.sidebar.selected_id = None;
                        tui.selected_category = None;
                    }
                    Some(ActivityAction::FocusSearch) => {
                        tui.pinned = true;
                        tui.focus = Focus::Sidebar;
                        tui.sidebar.searching = true;
                    }
                    Some(ActivityAction::Profile) => {
                        tui.pinned = true;
                        tui.focus = Focus::Sidebar;
                        tui.sidebar.show_user_menu = !tui.sidebar.show_user_menu;
                    }
                    None => {}
                }
                continue;
            }

            match tui.focus {
                Focus::Sidebar => {
                    if let Some(sidebar_event) = tui.sidebar.handle_event(&event) {
                        match sidebar_event {
                            SidebarEvent::Select(id) => {
                                info!("conversation selected: {:?}", id);
                                tui.sidebar.selected_id = id.clone();
                                if id.is_none() {
                                    tui.selected_category = None;
                                }
                                tui.focus = Focus::Main;
                            }
                            SidebarEvent::Delete(conversation_id) => {
                                spawn_delete(api.clone(), conversation_id, tx.clone());
                            }
                            SidebarEvent::Rename {
                                conversation_id,
                                title,
                            } => {
                                spawn_rename(api.clone(), conversation_id, title, tx.clone());
                            }
                            SidebarEvent::Logout => {
                                start_logout(
                                    api.clone(),
                                    &mut store,
                                    user_id.clone(),
                                    tx.clone(),
                                );
                                logging_out = true;
                            }
                        }
                    }
                }
                Focus::Main => {
                    if tui.sidebar.selected_id.is_none()
                        && let Some(CategoryEvent::Choose(key)) =
                            tui.categories.handle_event(&event)
                    {
                        info!("category chosen: {key}");
                        tui.selected_category = Some(key);
                    }
                }
            }
        }

        if should_quit {
            break;
        }

        while let Ok(msg) = rx.try_recv() {
            needs_redraw = true;
            match msg {
                Msg::ProfileLoaded { generation, result } => {
                    if generation != gens.profile {
                        debug!("discarding stale profile response (gen {generation})");
                        continue;
                    }
                    match result {
                        Ok(profile) => tui.sidebar.profile = Some(profile),
                        // Badge falls back to the persisted or placeholder name
                        Err(e) => warn!("profile fetch failed: {e}"),
                    }
                }
                Msg::ConversationsLoaded { generation, result } => {
                    if generation != gens.conversations {
                        debug!("discarding stale conversations response (gen {generation})");
                        continue;
                    }
                    match result {
                        Ok(conversations) => {
                            info!("loaded {} conversations", conversations.len());
                            tui.sidebar.set_conversations(conversations);
                        }
                        Err(e) => {
                            warn!("conversations fetch failed: {e}");
                            tui.sidebar.set_load_error(t("failedToLoadConversations"));
                        }
                    }
                }
                Msg::DeleteDone {
                    conversation_id,
                    result,
                } => match result {
                    Ok(()) => {
                        info!("deleted conversation {conversation_id}");
                        tui.sidebar.remove_conversation(&conversation_id);
                    }
                    Err(e) => {
                        warn!("delete failed for {conversation_id}: {e}");
                        tui.alert_banner = Some(format!("{}: {e}", t("delete")));
                    }
                },
                Msg::RenameDone {
                    conversation_id,
                    title,
                    result,
                } => match result {
                    Ok(()) => {
                        info!("renamed conversation {conversation_id}");
                        tui.sidebar.apply_rename(&conversation_id, &title);
                    }
                    Err(e) => {
                        // Edit mode stays open so the user can retry or cancel
                        warn!("rename failed for {conversation_id}: {e}");
                        tui.alert_banner = Some(format!("{}: {e}", t("rename")));
                    }
                },
                Msg::AlertsLoaded { generation, result } => {
                    if generation != gens.alerts {
                        debug!("discarding stale alerts response (gen {generation})");
                        continue;
                    }
                    match result {
                        Ok(batch) => {
                            let stored = store.get(&store::alerts_last_check_key(&user_id));
                            tui.alerts.apply_batch(batch, stored);
                        }
                        Err(e) => {
                            warn!("weather alerts fetch failed: {e}");
                            tui.alerts.apply_failure();
                        }
                    }
                }
                Msg::PriceLoaded { generation, result } => {
                    if generation != gens.price {
                        debug!("discarding stale price response (gen {generation})");
                        continue;
                    }
                    match result {
                        Ok(history) => tui.chart.set_data(history),
                        // Failure presents exactly like an empty series
                        Err(e) => {
                            warn!("price history fetch failed: {e}");
                            tui.chart.set_failure();
                        }
                    }
                }
                Msg::LogoutDone(result) => {
                    if let Err(e) = result {
                        // Local session is already cleared; server-side cleanup
                        // is best effort
                        warn!("logout request failed: {e}");
                    }
                    should_quit = true;
                }
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Tell the server, then clear the local session. The server call is best
/// effort; the local keys go either way, and the loop quits once
/// `LogoutDone` arrives.
fn start_logout(
    api: Arc<dyn AdvisoryApi>,
    store: &mut Store,
    user_id: String,
    tx: mpsc::Sender<Msg>,
) {
    info!("logging out user {user_id}");
    tokio::spawn(async move {
        let result = api.logout(&user_id).await;
        if tx.send(Msg::LogoutDone(result)).is_err() {
            warn!("failed to send logout result: receiver dropped");
        }
    });
    store.remove(USER_ID_KEY);
    store.remove(USER_NAME_KEY);
}

fn spawn_profile(
    api: Arc<dyn AdvisoryApi>,
    user_id: String,
    generation: u64,
    tx: mpsc::Sender<Msg>,
) {
    tokio::spawn(async move {
        let result = api.fetch_profile(&user_id).await;
        if tx.send(Msg::ProfileLoaded { generation, result }).is_err() {
            warn!("failed to send profile result: receiver dropped");
        }
    });
}

fn spawn_conversations(
    api: Arc<dyn AdvisoryApi>,
    user_id: String,
    generation: u64,
    tx: mpsc::Sender<Msg>,
) {
    tokio::spawn(async move {
        let result = api.list_conversations(&user_id).await;
        if tx
            .send(Msg::ConversationsLoaded { generation, result })
            .is_err()
        {
            warn!("failed to send conversations result: receiver dropped");
        }
    });
}

fn spawn_delete(api: Arc<dyn AdvisoryApi>, conversation_id: String, tx: mpsc::Sender<Msg>) {
    tokio::spawn(async move {
        let result = api.delete_conversation(&conversation_id).await;
        if tx
            .send(Msg::DeleteDone {
                conversation_id,
                result,
            })
            .is_err()
        {
            warn!("failed to send delete result: receiver dropped");
        }
    });
}

fn spawn_rename(
    api: Arc<dyn AdvisoryApi>,
    conversation_id: String,
    title: String,
    tx: mpsc::Sender<Msg>,
) {
    tokio::spawn(async move {
        let result = api.rename_conversation(&conversation_id, &title).await;
        if tx
            .send(Msg::RenameDone {
                conversation_id,
                title,
                result,
            })
            .is_err()
        {
            warn!("failed to send rename result: receiver dropped");
        }
    });
}

fn spawn_alerts(
    api: Arc<dyn AdvisoryApi>,
    user_id: String,
    generation: u64,
    tx: mpsc::Sender<Msg>,
) {
    debug!("polling weather alerts (gen {generation})");
    tokio::spawn(async move {
        let result = api.fetch_weather_alerts(&user_id).await;
        if tx.send(Msg::AlertsLoaded { generation, result }).is_err() {
            warn!("failed to send alerts result: receiver dropped");
        }
    });
}

fn spawn_price(
    api: Arc<dyn AdvisoryApi>,
    user_id: String,
    generation: u64,
    tx: mpsc::Sender<Msg>,
) {
    tokio::spawn(async move {
        let result = api.fetch_price_history(&user_id).await;
        if tx.send(Msg::PriceLoaded { generation, result }).is_err() {
            warn!("failed to send price result: receiver dropped");
        }
    });
}
