// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use crossterm::event::KeyCode;
use ratatui::{backend::TestBackend, layout::Rect, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::{
    adoption_form_lines, counters_line, criteria_line, detail_lines, draw, empty_list_message,
    entry_list_line, footer_help_line, footer_label_ucfirst, stack_panes_vertically,
    AdoptionForm, App, FetchOutcome, FetchRequest, FormField, InputMode,
};
use crate::client::CatalogError;
use crate::context::{BrowsingContext, DetailState, CONNECTION_BANNER};
use crate::model::{CatalogEntry, EntryId};
use crate::store::{MemoryStorage, StorageArea, FAVORITES_KEY};

fn line_to_string(line: &ratatui::text::Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect::<String>()
}

fn row_to_string(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|x| buffer.get(x, y).symbol().to_owned())
        .collect::<String>()
}

fn screen_to_string(terminal: &Terminal<TestBackend>) -> String {
    let height = terminal.backend().buffer().area.height;
    (0..height)
        .map(|y| row_to_string(terminal, y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new(EntryId::new(1), "Luna", "Bogotá").with_size("Mediano"),
        CatalogEntry::new(EntryId::new(2), "Rocky", "Medellín").with_size("Grande"),
        CatalogEntry::new(EntryId::new(3), "Canela", "Cali").with_size("Pequeño"),
    ]
}

struct Harness {
    storage: Arc<MemoryStorage>,
    app: App,
    requests: UnboundedReceiver<FetchRequest>,
    outcomes: UnboundedSender<FetchOutcome>,
}

impl Harness {
    fn new() -> Self {
        let storage = Arc::new(MemoryStorage::new());
        let context = BrowsingContext::open(storage.clone());
        let (request_tx, requests) = mpsc::unbounded_channel();
        let (outcomes, outcome_rx) = mpsc::unbounded_channel();
        Self {
            storage,
            app: App::new(context, request_tx, outcome_rx),
            requests,
            outcomes,
        }
    }

    /// Harness whose catalog has already been fetched.
    fn loaded() -> Self {
        let mut harness = Self::new();
        harness.app.request_catalog();
        let Some(FetchRequest::Catalog { request }) = harness.requests.try_recv().ok() else {
            panic!("expected a catalog request");
        };
        harness
            .outcomes
            .send(FetchOutcome::Catalog {
                request,
                result: Ok(catalog()),
            })
            .unwrap();
        harness.app.tick();
        harness
    }

    /// Loaded harness with Luna open in the detail pane.
    fn with_detail_open() -> Self {
        let mut harness = Self::loaded();
        harness.press(KeyCode::Enter);
        harness
            .outcomes
            .send(FetchOutcome::Detail {
                id: EntryId::new(1),
                result: Ok(catalog()[0].clone()),
            })
            .unwrap();
        harness.app.tick();
        harness
    }

    fn press(&mut self, code: KeyCode) -> bool {
        self.app.handle_key_code(code)
    }

    fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press(KeyCode::Char(ch));
        }
    }

    fn toast(&self) -> Option<&str> {
        self.app.toast.as_ref().map(|toast| toast.message.as_str())
    }

    fn render(&mut self, width: u16, height: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, &mut self.app)).unwrap();
        terminal
    }
}

#[test]
fn catalog_outcome_is_applied_on_tick() {
    let harness = Harness::loaded();

    assert_eq!(harness.app.context.catalog().len(), 3);
    assert_eq!(harness.app.list_state.selected(), Some(0));
    assert_eq!(harness.toast(), Some("Loaded 3 dogs"));
}

#[test]
fn failed_catalog_outcome_raises_banner() {
    let mut harness = Harness::new();
    harness.app.request_catalog();
    let Ok(FetchRequest::Catalog { request }) = harness.requests.try_recv() else {
        panic!("expected a catalog request");
    };
    harness
        .outcomes
        .send(FetchOutcome::Catalog {
            request,
            result: Err(CatalogError::Connection {
                message: "refused".to_owned(),
            }),
        })
        .unwrap();
    harness.app.tick();

    assert_eq!(harness.app.context.status().banner(), Some(CONNECTION_BANNER));
    assert_eq!(harness.app.list_state.selected(), None);
    assert_eq!(
        empty_list_message(&harness.app.context),
        "No dogs loaded. Press r to retry."
    );
}

#[test]
fn r_requests_a_fresh_catalog() {
    let mut harness = Harness::loaded();
    assert!(!harness.press(KeyCode::Char('r')));
    assert!(matches!(
        harness.requests.try_recv(),
        Ok(FetchRequest::Catalog { request: 2 })
    ));
}

#[test]
fn star_toggles_favorites_only() {
    let mut harness = Harness::loaded();

    harness.press(KeyCode::Char('*'));
    assert!(harness.app.context.criteria().favorites_only);
    assert_eq!(harness.app.context.counts().filtered, 0);
    assert_eq!(harness.toast(), Some("Showing favorites only"));

    harness.press(KeyCode::Char('*'));
    assert!(!harness.app.context.criteria().favorites_only);
    assert_eq!(harness.toast(), Some("Showing all dogs"));
}

#[test]
fn city_edit_filters_while_typing() {
    let mut harness = Harness::loaded();

    harness.press(KeyCode::Char('/'));
    assert_eq!(harness.app.input_mode, InputMode::EditingCity);
    harness.type_text("med");
    assert_eq!(harness.app.context.criteria().city_text, "med");
    assert_eq!(harness.app.context.counts().filtered, 1);

    // q is text while editing, not quit.
    assert!(!harness.press(KeyCode::Char('q')));
    harness.press(KeyCode::Backspace);
    assert_eq!(harness.app.context.criteria().city_text, "med");

    harness.press(KeyCode::Enter);
    assert_eq!(harness.app.input_mode, InputMode::Browse);
    assert_eq!(harness.app.context.criteria().city_text, "med");

    harness.press(KeyCode::Esc);
    assert_eq!(harness.app.context.criteria().city_text, "");
    assert_eq!(harness.toast(), Some("City filter cleared"));
}

#[test]
fn esc_while_editing_clears_city() {
    let mut harness = Harness::loaded();
    harness.press(KeyCode::Char('/'));
    harness.type_text("cali");
    harness.press(KeyCode::Esc);

    assert_eq!(harness.app.input_mode, InputMode::Browse);
    assert_eq!(harness.app.context.criteria().city_text, "");
    assert_eq!(harness.app.context.counts().filtered, 3);
}

#[test]
fn space_toggles_favorite_under_cursor_and_persists() {
    let mut harness = Harness::loaded();
    harness.press(KeyCode::Down);
    harness.press(KeyCode::Char(' '));

    assert!(harness.app.context.is_favorite(EntryId::new(2)));
    assert_eq!(harness.toast(), Some("Added 2 to favorites"));
    assert_eq!(
        harness.storage.get_item(FAVORITES_KEY).unwrap().as_deref(),
        Some("[2]")
    );

    harness.press(KeyCode::Char('f'));
    assert!(!harness.app.context.is_favorite(EntryId::new(2)));
    assert_eq!(harness.toast(), Some("Removed 2 from favorites"));
    assert_eq!(
        harness.storage.get_item(FAVORITES_KEY).unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn toggle_with_empty_list_reports_nothing_selected() {
    let mut harness = Harness::new();
    harness.press(KeyCode::Char(' '));
    assert_eq!(harness.toast(), Some("Nothing selected"));
}

#[test]
fn enter_opens_detail_and_esc_closes_it() {
    let mut harness = Harness::loaded();
    harness.press(KeyCode::End);
    harness.press(KeyCode::Enter);

    assert_eq!(
        *harness.app.context.detail(),
        DetailState::Loading(EntryId::new(3))
    );
    assert!(matches!(
        harness.requests.try_recv(),
        Ok(FetchRequest::Detail(id)) if id == EntryId::new(3)
    ));

    harness
        .outcomes
        .send(FetchOutcome::Detail {
            id: EntryId::new(3),
            result: Ok(catalog()[2].clone()),
        })
        .unwrap();
    harness.app.tick();
    assert!(matches!(harness.app.context.detail(), DetailState::Loaded(entry) if entry.name() == "Canela"));

    // With the detail open the toggle applies to it, not the cursor.
    harness.press(KeyCode::Home);
    harness.press(KeyCode::Char(' '));
    assert!(harness.app.context.is_favorite(EntryId::new(3)));

    harness.press(KeyCode::Esc);
    assert_eq!(*harness.app.context.detail(), DetailState::Closed);
}

#[test]
fn cursor_moves_are_clamped() {
    let mut harness = Harness::loaded();

    harness.press(KeyCode::Up);
    assert_eq!(harness.app.list_state.selected(), Some(0));
    harness.press(KeyCode::PageDown);
    assert_eq!(harness.app.list_state.selected(), Some(2));
    harness.press(KeyCode::Char('g'));
    assert_eq!(harness.app.list_state.selected(), Some(0));
    harness.press(KeyCode::Char('G'));
    assert_eq!(harness.app.list_state.selected(), Some(2));

    harness.press(KeyCode::Char('/'));
    harness.type_text("bog");
    assert_eq!(harness.app.list_state.selected(), Some(0));
}

#[test]
fn help_overlay_swallows_keys_until_closed() {
    let mut harness = Harness::loaded();
    harness.press(KeyCode::Char('?'));
    assert!(harness.app.show_help);

    harness.press(KeyCode::Char('*'));
    assert!(!harness.app.context.criteria().favorites_only);

    harness.press(KeyCode::Esc);
    assert!(!harness.app.show_help);
    assert!(harness.press(KeyCode::Char('q')));
}

#[test]
fn sibling_change_is_reconciled_on_tick() {
    let mut harness = Harness::loaded();
    let mut sibling = BrowsingContext::open(harness.storage.clone());
    sibling.toggle_favorite(EntryId::new(1)).unwrap();

    harness.app.tick();

    assert!(harness.app.context.is_favorite(EntryId::new(1)));
    assert_eq!(harness.toast(), Some("Favorites updated from another session"));
}

#[test]
fn header_shows_counters_and_banner() {
    let mut harness = Harness::loaded();
    harness.app.context.toggle_favorite(EntryId::new(1)).unwrap();
    harness.app.context.apply_catalog_result(
        1,
        Err(CatalogError::Connection {
            message: "refused".to_owned(),
        }),
    );

    let terminal = harness.render(100, 20);

    assert!(row_to_string(&terminal, 0).starts_with("Total: 3  Shown: 3  Favorites: 1"));
    assert!(row_to_string(&terminal, 1).starts_with("City: any"));
    assert!(row_to_string(&terminal, 2).contains(CONNECTION_BANNER));
    let screen = screen_to_string(&terminal);
    assert!(screen.contains("♥ Luna"));
    assert!(screen.contains("♡ Rocky"));
}

#[test]
fn open_detail_renders_beside_the_list() {
    let mut harness = Harness::loaded();
    harness.app.context.open_detail(EntryId::new(9));
    harness.app.context.apply_detail_result(
        EntryId::new(9),
        Err(CatalogError::NotFound {
            id: EntryId::new(9),
            message: "Dog not found".to_owned(),
        }),
    );

    let terminal = harness.render(100, 20);
    let screen = screen_to_string(&terminal);
    assert!(screen.contains("Dog 9"));
    assert!(screen.contains("Dog not found"));
}

#[test]
fn help_overlay_renders() {
    let mut harness = Harness::loaded();
    harness.press(KeyCode::Char('?'));
    let terminal = harness.render(100, 30);
    assert!(screen_to_string(&terminal).contains("Help (Esc/? to close)"));
}

#[test]
fn counters_and_criteria_lines() {
    assert_eq!(
        line_to_string(&counters_line(12, 4, 2)),
        "Total: 12  Shown: 4  Favorites: 2"
    );
    assert_eq!(
        line_to_string(&criteria_line("", false, false)),
        "City: any  ☆ all dogs"
    );
    assert_eq!(
        line_to_string(&criteria_line("", true, true)),
        "City:   ★ favorites only"
    );
}

#[test]
fn entry_line_marks_favorites() {
    let entry = CatalogEntry::new(EntryId::new(1), "Luna", "Bogotá").with_size("Mediano");
    assert_eq!(line_to_string(&entry_list_line(&entry, true)), "♥ Luna  Bogotá • Mediano");

    let bare = CatalogEntry::new(EntryId::new(2), "Rocky", "Cali");
    assert_eq!(line_to_string(&entry_list_line(&bare, false)), "♡ Rocky  Cali");
}

#[test]
fn detail_lines_follow_detail_state() {
    assert!(detail_lines(&DetailState::Closed, |_| false).is_empty());

    let loading = detail_lines(&DetailState::Loading(EntryId::new(1)), |_| false);
    assert_eq!(line_to_string(&loading[0]), "Loading…");

    let entry = CatalogEntry::new(EntryId::new(4), "Tobías", "Bogotá")
        .with_age(7)
        .with_description("Senior gentleman.")
        .with_flags(true, true, true);
    let lines: Vec<String> = detail_lines(&DetailState::Loaded(entry), |id| id == EntryId::new(4))
        .iter()
        .map(line_to_string)
        .collect();
    assert_eq!(lines[0], "Senior gentleman.");
    assert!(lines.contains(&"Age: 7 years".to_owned()));
    assert!(lines.iter().any(|line| line.starts_with("Tags: ")));
    assert!(lines.contains(&"♥ In favorites (space to remove)".to_owned()));
    assert_eq!(lines.last().map(String::as_str), Some("Press a to request adoption"));
}

#[test]
fn footer_reflects_input_mode() {
    let browse = line_to_string(&footer_help_line(InputMode::Browse, " | saved"));
    assert!(browse.starts_with("City:/ | Favs only:*"));
    assert!(browse.ends_with("Quit:q | saved"));

    let editing = line_to_string(&footer_help_line(InputMode::EditingCity, ""));
    assert_eq!(editing, "Type:city | Keep:Enter | Clear:Esc");

    let adopting = line_to_string(&footer_help_line(InputMode::Adopting, ""));
    assert_eq!(adopting, "Next:Tab | Send:Enter | Cancel:Esc");

    assert_eq!(footer_label_ucfirst("FAVS ONLY"), "Favs only");
    assert_eq!(footer_label_ucfirst(""), "");
}

#[test]
fn narrow_screens_stack_panes() {
    assert!(stack_panes_vertically(Rect::new(0, 0, 80, 30)));
    assert!(!stack_panes_vertically(Rect::new(0, 0, 120, 30)));
}

#[test]
fn adopt_key_needs_an_open_dog() {
    let mut harness = Harness::loaded();
    harness.press(KeyCode::Char('a'));

    assert_eq!(harness.app.input_mode, InputMode::Browse);
    assert!(harness.app.adoption.is_none());
    assert_eq!(harness.toast(), Some("Open a dog to request adoption"));
}

#[test]
fn adoption_form_reports_first_problem_and_focuses_its_field() {
    let mut harness = Harness::with_detail_open();
    harness.press(KeyCode::Char('a'));
    assert_eq!(harness.app.input_mode, InputMode::Adopting);

    harness.type_text("Ana");
    harness.press(KeyCode::Enter);
    assert_eq!(harness.toast(), Some("Cannot send: email is required"));
    assert_eq!(harness.app.adoption.as_ref().map(|form| form.field), Some(FormField::Email));

    harness.type_text("ana@example");
    harness.press(KeyCode::Enter);
    assert_eq!(
        harness.toast(),
        Some("Cannot send: email \"ana@example\" is not a valid address")
    );

    harness.type_text(".com");
    harness.press(KeyCode::Tab);
    harness.press(KeyCode::Enter);
    assert_eq!(harness.toast(), Some("Cannot send: phone is required"));
    assert_eq!(harness.app.adoption.as_ref().map(|form| form.field), Some(FormField::Phone));
    assert_eq!(harness.app.input_mode, InputMode::Adopting);
}

#[test]
fn submitted_adoption_shows_acknowledgment_and_closes_form() {
    let mut harness = Harness::with_detail_open();
    harness.press(KeyCode::Char('a'));
    harness.type_text("Ana");
    harness.press(KeyCode::Tab);
    harness.type_text("ana@example.com");
    harness.press(KeyCode::Down);
    harness.type_text("+57 300");
    harness.press(KeyCode::Tab);
    harness.type_text("I have a garden");
    harness.press(KeyCode::Enter);

    let toast = harness.toast().unwrap_or_default().to_owned();
    assert!(toast.starts_with("Thank you Ana!"));
    assert!(toast.contains("adopt Luna"));
    assert_eq!(harness.app.input_mode, InputMode::Browse);
    assert!(harness.app.adoption.is_none());
    assert!(harness.app.context.detail().is_open());
}

#[test]
fn esc_cancels_adoption_form_and_keeps_detail() {
    let mut harness = Harness::with_detail_open();
    harness.press(KeyCode::Char('a'));

    // q is text inside the form.
    assert!(!harness.press(KeyCode::Char('q')));
    assert_eq!(harness.app.adoption.as_ref().map(|form| form.name.as_str()), Some("q"));
    harness.press(KeyCode::Backspace);
    harness.press(KeyCode::Esc);

    assert_eq!(harness.app.input_mode, InputMode::Browse);
    assert!(harness.app.adoption.is_none());
    assert_eq!(harness.toast(), Some("Adoption request cancelled"));
    assert!(harness.app.context.detail().is_open());
}

#[test]
fn form_fields_wrap_in_both_directions() {
    assert_eq!(FormField::Name.prev(), FormField::Message);
    assert_eq!(FormField::Message.next(), FormField::Name);
    assert_eq!(FormField::Email.next(), FormField::Phone);
}

#[test]
fn adoption_form_renders_over_main_area() {
    let mut harness = Harness::with_detail_open();
    harness.press(KeyCode::Char('a'));
    harness.type_text("Ana");

    let terminal = harness.render(100, 30);
    let screen = screen_to_string(&terminal);
    assert!(screen.contains("Adopt Luna"));
    assert!(screen.contains("Name:    Ana"));
    assert!(screen.contains("Next:Tab | Send:Enter | Cancel:Esc"));
}

#[test]
fn adoption_form_lines_list_every_field() {
    let mut form = AdoptionForm::new(catalog()[1].clone());
    form.email = "ana@example.com".to_owned();

    let lines: Vec<String> = adoption_form_lines(&form).iter().map(line_to_string).collect();
    assert_eq!(lines[0], "Name:    ");
    assert_eq!(lines[1], "Email:   ana@example.com");
    assert_eq!(lines[2], "Phone:   ");
    assert_eq!(lines[3], "Message: ");
}
