//! # Conversation Sidebar Component
//!
//! Lists, filters, creates, renames, and deletes one user's conversations,
//! and surfaces a "select conversation" intent upward.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ConversationSidebarState` lives in `TuiState`
//! - `ConversationSidebar` is created each frame with borrowed state
//!
//! The cached list is exactly that, a cache. The remote API is the source of
//! truth, and local mutations (delete, rename) land only after the matching
//! remote call succeeds. Filtering is client-side over the full cache,
//! debounced by 200ms of input inactivity so only the latest quiet-period
//! query is applied.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::api::{Conversation, UserProfile};
use crate::core::i18n::t;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;
use crate::tui::theme;

/// Quiet period before a query is applied to the visible list.
pub const FILTER_DEBOUNCE: Duration = Duration::from_millis(200);

/// Titles longer than this are truncated with an ellipsis.
const TITLE_DISPLAY_LIMIT: usize = 40;

/// In-progress rename of one conversation.
pub struct EditState {
    pub conversation_id: String,
    pub buffer: String,
}

/// Events emitted by the sidebar for the parent shell to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarEvent {
    /// Select a conversation; `None` signals "start a fresh conversation".
    Select(Option<String>),
    /// Confirmed delete request for the given conversation id.
    Delete(String),
    /// Rename request with an already-trimmed, non-empty title.
    Rename {
        conversation_id: String,
        title: String,
    },
    Logout,
}

/// Persistent state for the conversation sidebar.
pub struct ConversationSidebarState {
    /// Full cached list from the server.
    pub all_conversations: Vec<Conversation>,
    /// Filtered view rendered in the list.
    pub visible: Vec<Conversation>,
    pub query: String,
    /// When the pending query should be applied; `None` = nothing pending.
    filter_deadline: Option<Instant>,
    pub selected_id: Option<String>,
    pub cursor: usize,
    pub list_state: ListState,
    pub editing: Option<EditState>,
    /// Conversation id whose action menu is open. At most one at a time.
    pub active_menu: Option<String>,
    pub confirm_delete: bool,
    pub show_user_menu: bool,
    pub searching: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    pub profile: Option<UserProfile>,
    /// Persisted display name, used when the profile fetch fails.
    pub fallback_name: Option<String>,
}

impl ConversationSidebarState {
    pub fn new(fallback_name: Option<String>) -> Self {
        Self {
            all_conversations: Vec::new(),
            visible: Vec::new(),
            query: String::new(),
            filter_deadline: None,
            selected_id: None,
            cursor: 0,
            list_state: ListState::default(),
            editing: None,
            active_menu: None,
            confirm_delete: false,
            show_user_menu: false,
            searching: false,
            is_loading: true,
            error: None,
            profile: None,
            fallback_name,
        }
    }

    /// Install a freshly fetched list: both the cache and the view.
    pub fn set_conversations(&mut self, conversations: Vec<Conversation>) {
        self.all_conversations = conversations;
        self.is_loading = false;
        self.error = None;
        self.apply_filter();
    }

    /// List fetch failed: visible error, empty list.
    pub fn set_load_error(&mut self, message: String) {
        self.all_conversations.clear();
        self.visible.clear();
        self.is_loading = false;
        self.error = Some(message);
        self.clamp_cursor();
    }

    pub fn push_query_char(&mut self, c: char, now: Instant) {
        self.query.push(c);
        self.filter_deadline = Some(now + FILTER_DEBOUNCE);
    }

    pub fn pop_query_char(&mut self, now: Instant) {
        self.query.pop();
        self.filter_deadline = Some(now + FILTER_DEBOUNCE);
    }

    /// Apply the pending query if its quiet period has elapsed. Returns true
    /// when the visible list was recomputed. Intermediate keystrokes push the
    /// deadline forward, so only the latest query is ever applied.
    pub fn poll_filter(&mut self, now: Instant) -> bool {
        match self.filter_deadline {
            Some(deadline) if now >= deadline => {
                self.filter_deadline = None;
                self.apply_filter();
                true
            }
            _ => false,
        }
    }

    /// Recompute the visible list from the full cache: case-insensitive
    /// substring match of the query against each title. Empty query = full
    /// list.
    pub fn apply_filter(&mut self) {
        let q = self.query.to_lowercase();
        if q.is_empty() {
            self.visible = self.all_conversations.clone();
        } else {
            self.visible = self
                .all_conversations
                .iter()
                .filter(|c| {
                    c.title
                        .as_deref()
                        .unwrap_or("")
                        .to_lowercase()
                        .contains(&q)
                })
                .cloned()
                .collect();
        }
        self.clamp_cursor();
    }

    /// Remove a conversation from both cached lists after a confirmed remote
    /// delete. Returns true when the deleted id was the current selection
    /// (which is then cleared).
    pub fn remove_conversation(&mut self, conversation_id: &str) -> bool {
        self.all_conversations
            .retain(|c| c.conversation_id != conversation_id);
        self.visible.retain(|c| c.conversation_id != conversation_id);
        self.clamp_cursor();

        if self.selected_id.as_deref() == Some(conversation_id) {
            self.selected_id = None;
            return true;
        }
        false
    }

    /// Update a title in both cached lists after a confirmed remote rename
    /// and leave edit mode.
    pub fn apply_rename(&mut self, conversation_id: &str, title: &str) {
        for list in [&mut self.all_conversations, &mut self.visible] {
            for c in list.iter_mut() {
                if c.conversation_id == conversation_id {
                    c.title = Some(title.to_string());
                }
            }
        }
        self.editing = None;
    }

    pub fn start_editing(&mut self, conversation_id: &str) {
        let current = self
            .all_conversations
            .iter()
            .find(|c| c.conversation_id == conversation_id)
            .and_then(|c| c.title.clone())
            .unwrap_or_default();
        self.editing = Some(EditState {
            conversation_id: conversation_id.to_string(),
            buffer: current,
        });
        self.active_menu = None;
        self.confirm_delete = false;
    }

    pub fn cancel_editing(&mut self) {
        self.editing = None;
    }

    pub fn close_menu(&mut self) {
        self.active_menu = None;
        self.confirm_delete = false;
    }

    /// Badge name: profile name, then persisted name, then the localized
    /// placeholder.
    pub fn display_name(&self) -> String {
        self.profile
            .as_ref()
            .and_then(|p| p.name.clone())
            .or_else(|| self.fallback_name.clone())
            .unwrap_or_else(|| t("farmer"))
    }

    fn clamp_cursor(&mut self) {
        if self.visible.is_empty() {
            self.cursor = 0;
            self.list_state.select(None);
        } else {
            self.cursor = self.cursor.min(self.visible.len() - 1);
            self.list_state.select(Some(self.cursor));
        }
    }

    fn cursor_conversation_id(&self) -> Option<String> {
        self.visible
            .get(self.cursor)
            .map(|c| c.conversation_id.clone())
    }

    fn handle_search_event(&mut self, event: &TuiEvent) -> Option<SidebarEvent> {
        let now = Instant::now();
        match event {
            TuiEvent::Escape => {
                self.searching = false;
            }
            TuiEvent::Submit => {
                // Enter commits the query immediately, skipping the debounce
                self.searching = false;
                self.filter_deadline = None;
                self.apply_filter();
            }
            TuiEvent::InputChar(c) => self.push_query_char(*c, now),
            TuiEvent::Backspace => self.pop_query_char(now),
            _ => {}
        }
        None
    }

    fn handle_edit_event(&mut self, event: &TuiEvent) -> Option<SidebarEvent> {
        match event {
            TuiEvent::Escape => {
                self.cancel_editing();
                None
            }
            TuiEvent::Submit => {
                let edit = self.editing.as_ref()?;
                let title = edit.buffer.trim();
                if title.is_empty() {
                    // Blank rename is a no-op: no network call, edit stays open
                    return None;
                }
                // Edit mode is cleared only once the server acknowledges
                Some(SidebarEvent::Rename {
                    conversation_id: edit.conversation_id.clone(),
                    title: title.to_string(),
                })
            }
            TuiEvent::InputChar(c) => {
                if let Some(edit) = self.editing.as_mut() {
                    edit.buffer.push(*c);
                }
                None
            }
            TuiEvent::Backspace => {
                if let Some(edit) = self.editing.as_mut() {
                    edit.buffer.pop();
                }
                None
            }
            _ => None,
        }
    }
}

impl EventHandler for ConversationSidebarState {
    type Event = SidebarEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SidebarEvent> {
        if self.editing.is_some() {
            return self.handle_edit_event(event);
        }
        if self.searching {
            return self.handle_search_event(event);
        }
        if self.show_user_menu {
            // Any interaction either logs out or dismisses the menu
            return match event {
                TuiEvent::Submit | TuiEvent::InputChar('x') => {
                    self.show_user_menu = false;
                    Some(SidebarEvent::Logout)
                }
                _ => {
                    self.show_user_menu = false;
                    None
                }
            };
        }

        // Reset delete confirmation on any non-delete key
        let is_delete_key = matches!(event, TuiEvent::InputChar('d'));
        if !is_delete_key {
            self.confirm_delete = false;
        }

        match event {
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                self.close_menu();
                if !self.visible.is_empty() {
                    self.cursor = self.cursor.saturating_sub(1);
                    self.list_state.select(Some(self.cursor));
                }
                None
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown => {
                self.close_menu();
                if !self.visible.is_empty() {
                    self.cursor = (self.cursor + 1).min(self.visible.len() - 1);
                    self.list_state.select(Some(self.cursor));
                }
                None
            }
            TuiEvent::Submit => {
                self.close_menu();
                self.cursor_conversation_id()
                    .map(|id| SidebarEvent::Select(Some(id)))
            }
            TuiEvent::InputChar('n') => {
                self.close_menu();
                Some(SidebarEvent::Select(None))
            }
            TuiEvent::InputChar('m') => {
                let id = self.cursor_conversation_id()?;
                if self.active_menu.as_deref() == Some(&id) {
                    self.close_menu();
                } else {
                    self.active_menu = Some(id);
                    self.confirm_delete = false;
                }
                None
            }
            TuiEvent::InputChar('r') => {
                let id = self.active_menu.clone()?;
                self.start_editing(&id);
                None
            }
            TuiEvent::InputChar('d') => {
                let id = self.active_menu.clone()?;
                if self.confirm_delete {
                    // Menu closes regardless of how the delete turns out
                    self.close_menu();
                    Some(SidebarEvent::Delete(id))
                } else {
                    self.confirm_delete = true;
                    None
                }
            }
            TuiEvent::Escape => {
                self.close_menu();
                None
            }
            // Anything else counts as interaction outside the open menu
            _ => {
                self.close_menu();
                None
            }
        }
    }
}

/// Transient render wrapper for the sidebar.
pub struct ConversationSidebar<'a> {
    state: &'a mut ConversationSidebarState,
}

impl<'a> ConversationSidebar<'a> {
    pub fn new(state: &'a mut ConversationSidebarState) -> Self {
        Self { state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [search_area, list_area, profile_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .areas(area);

        self.render_search(frame, search_area);
        self.render_list(frame, list_area);
        self.render_profile(frame, profile_area);
    }

    fn render_search(&self, frame: &mut Frame, area: Rect) {
        let (text, style) = if self.state.query.is_empty() && !self.state.searching {
            (
                format!(" / {}", t("searchConversations")),
                Style::default().add_modifier(theme::EMPHASIS_SM),
            )
        } else {
            let marker = if self.state.searching { "▏" } else { "" };
            (
                format!(" / {}{}", self.state.query, marker),
                Style::default().fg(theme::AGRI_LIGHT),
            )
        };
        frame.render_widget(Paragraph::new(text).style(style), area);
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect) {
        let help_text = if self.state.confirm_delete {
            " Press d again to confirm delete ".to_string()
        } else if self.state.active_menu.is_some() {
            format!(" r {}  d {}  Esc {} ", t("rename"), t("delete"), t("cancel"))
        } else {
            format!(" ↑↓  Enter  m {}  n {} ", t("moreActions"), t("newChat"))
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::AGRI_PRIMARY))
            .title(format!(" {} ", t("conversations")))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if let Some(error) = &self.state.error {
            let msg = Paragraph::new(error.as_str())
                .style(Style::default().fg(theme::SEVERITY_HIGH))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(msg, area);
            return;
        }

        if self.state.is_loading {
            let loading = Paragraph::new(t("loading"))
                .style(Style::default().add_modifier(theme::EMPHASIS_SM))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(loading, area);
            return;
        }

        if self.state.visible.is_empty() {
            let empty = Paragraph::new(format!(
                "{}\n{}",
                t("noConversationsYet"),
                t("startNewConversation")
            ))
            .style(Style::default().add_modifier(theme::EMPHASIS_SM))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let now = Local::now();
        let inner_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .state
            .visible
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let is_selected = self.state.selected_id.as_deref()
                    == Some(c.conversation_id.as_str());
                let is_cursor = i == self.state.cursor;
                let menu_open = self.state.active_menu.as_deref()
                    == Some(c.conversation_id.as_str());

                if let Some(edit) = &self.state.editing
                    && edit.conversation_id == c.conversation_id
                {
                    let line = Line::from(vec![
                        Span::styled("✎ ", Style::default().fg(theme::AGRI_ACCENT)),
                        Span::styled(
                            format!("{}▏", edit.buffer),
                            Style::default().fg(theme::AGRI_LIGHT),
                        ),
                    ]);
                    return ListItem::new(line);
                }

                let date = c
                    .timestamp
                    .as_deref()
                    .map(|ts| format_relative(ts, now))
                    .unwrap_or_default();
                let title = display_title(c);
                let title_width = inner_width.saturating_sub(date.width() + 4);
                let padded_title = format!(
                    "{:<width$}",
                    truncate_to_width(&title, title_width),
                    width = title_width
                );

                let style = if menu_open && self.state.confirm_delete {
                    Style::default()
                        .fg(theme::SEVERITY_HIGH)
                        .add_modifier(theme::EMPHASIS_XL)
                } else if is_cursor {
                    Style::default().add_modifier(theme::EMPHASIS_XL)
                } else if is_selected {
                    Style::default()
                        .fg(theme::AGRI_GREEN)
                        .add_modifier(theme::EMPHASIS_LG)
                } else {
                    Style::default().fg(theme::AGRI_LIGHT)
                };

                let marker = if menu_open { "▸" } else { " " };
                let line = Line::from(vec![
                    Span::styled(format!("{marker}✉ "), style),
                    Span::styled(padded_title, style),
                    Span::styled("  ", style),
                    Span::styled(date, style.add_modifier(Modifier::DIM)),
                ]);
                ListItem::new(line)
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }

    fn render_profile(&self, frame: &mut Frame, area: Rect) {
        let name = self.state.display_name();
        let email = self
            .state
            .profile
            .as_ref()
            .and_then(|p| p.email.clone())
            .unwrap_or_else(|| "farmer@example.com".to_string());

        let lines = if self.state.show_user_menu {
            vec![
                Line::from(Span::styled(
                    format!(" ◉ {name}"),
                    Style::default().add_modifier(theme::EMPHASIS_LG),
                )),
                Line::from(Span::styled(
                    format!(" x {}  Esc {}", t("logout"), t("cancel")),
                    Style::default().fg(theme::SEVERITY_HIGH),
                )),
            ]
        } else {
            vec![
                Line::from(Span::styled(
                    format!(" ◉ {name}"),
                    Style::default().add_modifier(theme::EMPHASIS_LG),
                )),
                Line::from(Span::styled(
                    format!("   {email}"),
                    Style::default().add_modifier(theme::EMPHASIS_SM),
                )),
            ]
        };
        frame.render_widget(Paragraph::new(lines), area);
    }
}

/// Display title: falls back to the localized "untitled" label and truncates
/// long titles with an ellipsis, as the list view expects.
pub fn display_title(c: &Conversation) -> String {
    match c.title.as_deref() {
        Some(title) if !title.is_empty() => {
            if title.chars().count() > TITLE_DISPLAY_LIMIT {
                let prefix: String = title.chars().take(TITLE_DISPLAY_LIMIT).collect();
                format!("{prefix}...")
            } else {
                title.to_string()
            }
        }
        _ => t("untitledConversation"),
    }
}

/// Relative timestamp display rule: within 24 hours → time of day, within 7
/// days → weekday name, otherwise → month/day. Unparseable input renders as
/// an empty string.
pub fn format_relative(timestamp: &str, now: DateTime<Local>) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) else {
        return String::new();
    };
    let local = parsed.with_timezone(&Local);
    let elapsed_hours = (now - local).num_hours();

    if elapsed_hours < 24 {
        local.format("%H:%M").to_string()
    } else if elapsed_hours < 24 * 7 {
        local.format("%a").to_string()
    } else {
        local.format("%b %d").to_string()
    }
}

/// Truncate a string to fit within `max_width` display columns, counting
/// each char's actual column width so double-width characters cannot
/// overshoot.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}
