// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The UI loop runs on a blocking thread and owns one [`BrowsingContext`]. Catalog requests go
//! to an async fetch worker over a channel and their outcomes come back on another channel; each
//! tick drains those outcomes and any sibling favorites changes before drawing.

use std::{
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::adoption::{AdoptionError, AdoptionRequest};
use crate::client::{CatalogClient, CatalogError};
use crate::context::{BrowsingContext, CatalogStatus, DetailState};
use crate::model::{CatalogEntry, EntryId};

const FOCUS_COLOR: Color = Color::LightGreen;
const FAVORITE_COLOR: Color = Color::LightMagenta;
const BANNER_COLOR: Color = Color::Red;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "adopta";
const TICK: Duration = Duration::from_millis(250);
const TOAST_TTL: Duration = Duration::from_secs(2);
const PAGE: usize = 10;

/// Work the UI asks the fetch worker to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchRequest {
    Catalog { request: u64 },
    Detail(EntryId),
}

#[derive(Debug)]
pub enum FetchOutcome {
    Catalog {
        request: u64,
        result: Result<Vec<CatalogEntry>, CatalogError>,
    },
    Detail {
        id: EntryId,
        result: Result<CatalogEntry, CatalogError>,
    },
}

/// Serves [`FetchRequest`]s until the request channel closes. Each request runs on its own task,
/// so a slow detail fetch never blocks a refetch.
pub async fn fetch_worker<C>(
    client: Arc<C>,
    mut requests: UnboundedReceiver<FetchRequest>,
    outcomes: UnboundedSender<FetchOutcome>,
) where
    C: CatalogClient + 'static,
{
    while let Some(request) = requests.recv().await {
        let client = client.clone();
        let outcomes = outcomes.clone();
        tokio::spawn(async move {
            let outcome = match request {
                FetchRequest::Catalog { request } => FetchOutcome::Catalog {
                    request,
                    result: client.fetch_catalog().await,
                },
                FetchRequest::Detail(id) => FetchOutcome::Detail {
                    id,
                    result: client.fetch_entry(id).await,
                },
            };
            // The UI may already be gone.
            let _ = outcomes.send(outcome);
        });
    }
    tracing::debug!("fetch worker stopped");
}

/// Runs the interactive terminal UI until the user quits.
///
/// Must be called from a blocking thread; `runtime` drives the fetch worker.
pub fn run<C>(
    context: BrowsingContext,
    client: Arc<C>,
    runtime: tokio::runtime::Handle,
) -> Result<(), Box<dyn Error>>
where
    C: CatalogClient + 'static,
{
    let (request_tx, request_rx) = mpsc::unbounded_channel();
    let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
    let worker = runtime.spawn(fetch_worker(client, request_rx, outcome_tx));

    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(context, request_tx, outcome_rx);
    app.request_catalog();

    let result = (|| -> Result<(), Box<dyn Error>> {
        while !app.should_quit {
            app.tick();
            terminal.draw(|frame| draw(frame, &mut app))?;

            if event::poll(TICK)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                    _ => {}
                }
            }
        }
        Ok(())
    })();

    drop(app);
    worker.abort();
    result
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Browse,
    EditingCity,
    Adopting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Name,
    Email,
    Phone,
    Message,
}

impl FormField {
    const ALL: [FormField; 4] = [Self::Name, Self::Email, Self::Phone, Self::Message];

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Message => "Message",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Email => 1,
            Self::Phone => 2,
            Self::Message => 3,
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Field to focus after a validation error.
    fn for_error(err: &AdoptionError) -> Self {
        match err {
            AdoptionError::MissingName => Self::Name,
            AdoptionError::MissingEmail | AdoptionError::InvalidEmail { .. } => Self::Email,
            AdoptionError::MissingPhone => Self::Phone,
        }
    }
}

/// Adoption request being filled in for the dog that was open in the detail pane.
#[derive(Debug, Clone)]
struct AdoptionForm {
    entry: CatalogEntry,
    name: String,
    email: String,
    phone: String,
    message: String,
    field: FormField,
}

impl AdoptionForm {
    fn new(entry: CatalogEntry) -> Self {
        Self {
            entry,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            message: String::new(),
            field: FormField::Name,
        }
    }

    fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Message => &self.message,
        }
    }

    fn focused_value_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Message => &mut self.message,
        }
    }

    fn request(&self) -> AdoptionRequest {
        AdoptionRequest::new(&self.name, &self.email, &self.phone).with_message(&self.message)
    }
}

struct App {
    context: BrowsingContext,
    requests: UnboundedSender<FetchRequest>,
    outcomes: UnboundedReceiver<FetchOutcome>,
    list_state: ListState,
    seen_rev: u64,
    input_mode: InputMode,
    show_help: bool,
    adoption: Option<AdoptionForm>,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(
        context: BrowsingContext,
        requests: UnboundedSender<FetchRequest>,
        outcomes: UnboundedReceiver<FetchOutcome>,
    ) -> Self {
        let seen_rev = context.rev();
        Self {
            context,
            requests,
            outcomes,
            list_state: ListState::default(),
            seen_rev,
            input_mode: InputMode::Browse,
            show_help: false,
            adoption: None,
            toast: None,
            should_quit: false,
        }
    }

    /// Applies finished fetches and sibling favorites changes.
    fn tick(&mut self) {
        while let Ok(outcome) = self.outcomes.try_recv() {
            self.apply_outcome(outcome);
        }

        let summary = self.context.reconcile();
        if summary.changed {
            self.set_toast("Favorites updated from another session");
        }

        if self.context.rev() != self.seen_rev {
            self.seen_rev = self.context.rev();
            self.clamp_selection();
        }
    }

    fn apply_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Catalog { request, result } => {
                let failed = result.is_err();
                self.context.apply_catalog_result(request, result);
                if !failed {
                    self.set_toast(format!("Loaded {} dogs", self.context.catalog().len()));
                }
            }
            FetchOutcome::Detail { id, result } => {
                self.context.apply_detail_result(id, result);
            }
        }
    }

    fn request_catalog(&mut self) {
        let request = self.context.begin_catalog_fetch();
        self.send(FetchRequest::Catalog { request });
    }

    fn request_detail(&mut self, id: EntryId) {
        self.context.open_detail(id);
        self.send(FetchRequest::Detail(id));
    }

    fn send(&mut self, request: FetchRequest) {
        if self.requests.send(request).is_err() {
            tracing::warn!(?request, "fetch worker unavailable");
            self.set_toast("Fetch worker stopped; restart to refresh");
        }
    }

    fn selected_entry(&self) -> Option<&CatalogEntry> {
        let idx = self.list_state.selected()?;
        self.context.filtered().get(idx).copied()
    }

    /// Entry the favorite toggle applies to: the open detail, else the list cursor.
    fn toggle_target(&self) -> Option<EntryId> {
        match self.context.detail() {
            DetailState::Loaded(entry) => Some(entry.id()),
            _ => self.selected_entry().map(CatalogEntry::id),
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.context.filtered().len();
        let selected = match (len, self.list_state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(idx)) => Some(idx.min(len - 1)),
        };
        self.list_state.select(selected);
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.context.filtered().len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.list_state.select(Some(next));
    }

    fn select_edge(&mut self, last: bool) {
        let len = self.context.filtered().len();
        let idx = if len == 0 {
            None
        } else if last {
            Some(len - 1)
        } else {
            Some(0)
        };
        self.list_state.select(idx);
    }

    fn toggle_selected_favorite(&mut self) {
        let Some(id) = self.toggle_target() else {
            self.set_toast("Nothing selected");
            return;
        };
        match self.context.toggle_favorite(id) {
            Ok(true) => self.set_toast(format!("Added {id} to favorites")),
            Ok(false) => self.set_toast(format!("Removed {id} from favorites")),
            Err(err) => self.set_toast(format!("Could not save favorites: {err}")),
        }
    }

    fn toggle_favorites_only(&mut self) {
        let next = !self.context.criteria().favorites_only;
        self.context.set_favorites_only(next);
        self.set_toast(if next { "Showing favorites only" } else { "Showing all dogs" });
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    /// Returns `true` when the key asks to quit.
    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.show_help {
            match code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        match self.input_mode {
            InputMode::EditingCity => {
                self.handle_city_edit_key(code);
                return false;
            }
            InputMode::Adopting => {
                self.handle_adoption_key(code);
                return false;
            }
            InputMode::Browse => {}
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('/') => self.input_mode = InputMode::EditingCity,
            KeyCode::Char('*') => self.toggle_favorites_only(),
            KeyCode::Char(' ') | KeyCode::Char('f') => self.toggle_selected_favorite(),
            KeyCode::Char('r') => self.request_catalog(),
            KeyCode::Char('a') => self.open_adoption_form(),
            KeyCode::Enter => {
                if let Some(id) = self.selected_entry().map(CatalogEntry::id) {
                    self.request_detail(id);
                }
            }
            KeyCode::Esc => {
                if self.context.detail().is_open() {
                    self.context.close_detail();
                } else if self.context.set_city_text("") {
                    self.set_toast("City filter cleared");
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::PageDown => self.move_selection(PAGE as isize),
            KeyCode::PageUp => self.move_selection(-(PAGE as isize)),
            KeyCode::Home | KeyCode::Char('g') => self.select_edge(false),
            KeyCode::End | KeyCode::Char('G') => self.select_edge(true),
            _ => {}
        }
        false
    }

    fn handle_city_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => self.input_mode = InputMode::Browse,
            KeyCode::Esc => {
                self.context.set_city_text("");
                self.input_mode = InputMode::Browse;
            }
            KeyCode::Backspace => {
                let mut text = self.context.criteria().city_text.clone();
                text.pop();
                self.context.set_city_text(text);
            }
            KeyCode::Char(ch) => {
                let mut text = self.context.criteria().city_text.clone();
                text.push(ch);
                self.context.set_city_text(text);
            }
            _ => {}
        }
        self.clamp_selection();
    }

    fn open_adoption_form(&mut self) {
        let DetailState::Loaded(entry) = self.context.detail() else {
            self.set_toast("Open a dog to request adoption");
            return;
        };
        self.adoption = Some(AdoptionForm::new(entry.clone()));
        self.input_mode = InputMode::Adopting;
    }

    fn close_adoption_form(&mut self) {
        self.adoption = None;
        self.input_mode = InputMode::Browse;
    }

    fn handle_adoption_key(&mut self, code: KeyCode) {
        let Some(form) = self.adoption.as_mut() else {
            self.input_mode = InputMode::Browse;
            return;
        };
        match code {
            KeyCode::Esc => {
                self.close_adoption_form();
                self.set_toast("Adoption request cancelled");
            }
            KeyCode::Tab | KeyCode::Down => form.field = form.field.next(),
            KeyCode::BackTab | KeyCode::Up => form.field = form.field.prev(),
            KeyCode::Backspace => {
                form.focused_value_mut().pop();
            }
            KeyCode::Char(ch) => form.focused_value_mut().push(ch),
            KeyCode::Enter => self.submit_adoption(),
            _ => {}
        }
    }

    fn submit_adoption(&mut self) {
        let Some(form) = self.adoption.as_mut() else {
            return;
        };
        match form.request().submit(&form.entry) {
            Ok(acknowledgment) => {
                self.close_adoption_form();
                self.set_toast(acknowledgment);
            }
            Err(err) => {
                form.field = FormField::for_error(&err);
                self.set_toast(format!("Cannot send: {err}"));
            }
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    let banner = app.context.status().banner().map(str::to_owned);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(u16::from(banner.is_some())),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    let header_area = layout[0];
    let banner_area = layout[1];
    let main_area = layout[2];
    let status_area = layout[3];

    let counts = app.context.counts();
    let header = Paragraph::new(Text::from(vec![
        counters_line(counts.total, counts.filtered, counts.favorites),
        criteria_line(
            &app.context.criteria().city_text,
            app.context.criteria().favorites_only,
            app.input_mode == InputMode::EditingCity,
        ),
    ]));
    frame.render_widget(header, header_area);

    if let Some(banner) = banner {
        let banner = Paragraph::new(banner)
            .style(Style::default().fg(Color::White).bg(BANNER_COLOR))
            .alignment(Alignment::Center);
        frame.render_widget(banner, banner_area);
    }

    let (list_area, detail_area) = if app.context.detail().is_open() {
        let direction = if stack_panes_vertically(main_area) {
            Direction::Vertical
        } else {
            Direction::Horizontal
        };
        let panes = Layout::default()
            .direction(direction)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_area);
        (panes[0], Some(panes[1]))
    } else {
        (main_area, None)
    };

    let items: Vec<ListItem<'static>> = app
        .context
        .filtered()
        .into_iter()
        .map(|entry| ListItem::new(entry_list_line(entry, app.context.is_favorite(entry.id()))))
        .collect();
    let empty = items.is_empty();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(FOCUS_COLOR))
                .title(list_title(app.context.status())),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD))
        .highlight_symbol("› ");
    frame.render_stateful_widget(list, list_area, &mut app.list_state);
    if empty {
        let inner = Rect {
            x: list_area.x.saturating_add(2),
            y: list_area.y.saturating_add(1),
            width: list_area.width.saturating_sub(4),
            height: list_area.height.saturating_sub(2).min(1),
        };
        let hint = Paragraph::new(empty_list_message(&app.context))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, inner);
    }

    if let Some(detail_area) = detail_area {
        let lines = detail_lines(app.context.detail(), |id| app.context.is_favorite(id));
        let detail = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(detail_title(app.context.detail())),
        );
        frame.render_widget(detail, detail_area);
    }

    let toast_snapshot = app.toast.as_ref().map(|toast| (toast.message.clone(), toast.expires_at));
    let toast_suffix = match toast_snapshot {
        Some((message, expires_at)) if expires_at > Instant::now() => format!(" | {message}"),
        Some(_) => {
            app.toast = None;
            String::new()
        }
        None => String::new(),
    };
    let status = Paragraph::new(footer_help_line(app.input_mode, &toast_suffix));
    frame.render_widget(status, status_area);
    let brand = Paragraph::new(footer_brand_line()).alignment(Alignment::Right);
    frame.render_widget(brand, status_area);

    if app.input_mode == InputMode::EditingCity {
        let prefix = "City: ".chars().count() as u16;
        let typed = app.context.criteria().city_text.chars().count() as u16;
        let cursor_x = header_area
            .x
            .saturating_add(prefix)
            .saturating_add(typed)
            .min(header_area.x.saturating_add(header_area.width.saturating_sub(1)));
        frame.set_cursor(cursor_x, header_area.y.saturating_add(1));
    }

    if let Some(form) = &app.adoption {
        render_adoption_form(frame, main_area, form);
    }

    if app.show_help {
        render_help(frame, main_area);
    }
}

include!("chrome.rs");

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

#[cfg(test)]
mod tests;
