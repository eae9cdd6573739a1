// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Header, list, detail, footer and help helpers used by `draw`.

fn stack_panes_vertically(area: Rect) -> bool {
    area.width < 90
}

fn favorite_marker(favorite: bool) -> &'static str {
    if favorite {
        "♥"
    } else {
        "♡"
    }
}

fn counters_line(total: usize, filtered: usize, favorites: usize) -> Line<'static> {
    let label = Style::default().fg(FOOTER_LABEL_COLOR);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled("Total: ".to_owned(), label),
        Span::styled(total.to_string(), value),
        Span::styled("  Shown: ".to_owned(), label),
        Span::styled(filtered.to_string(), value),
        Span::styled("  Favorites: ".to_owned(), label),
        Span::styled(favorites.to_string(), value.fg(FAVORITE_COLOR)),
    ])
}

fn criteria_line(city_text: &str, favorites_only: bool, editing: bool) -> Line<'static> {
    let label = Style::default().fg(FOOTER_LABEL_COLOR);
    let city_style = if editing {
        Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::White)
    };
    let city = if city_text.is_empty() && !editing {
        "any".to_owned()
    } else {
        city_text.to_owned()
    };
    let only = if favorites_only { "★ favorites only" } else { "☆ all dogs" };
    Line::from(vec![
        Span::styled("City: ".to_owned(), label),
        Span::styled(city, city_style),
        Span::styled("  ".to_owned(), label),
        Span::styled(only.to_owned(), Style::default().fg(FAVORITE_COLOR)),
    ])
}

fn list_title(status: &CatalogStatus) -> String {
    match status {
        CatalogStatus::Idle => " Dogs ".to_owned(),
        CatalogStatus::Loading => " Dogs (loading…) ".to_owned(),
        CatalogStatus::Loaded => " Dogs ".to_owned(),
        CatalogStatus::Failed(_) => " Dogs (offline) ".to_owned(),
    }
}

fn empty_list_message(context: &BrowsingContext) -> &'static str {
    match context.status() {
        CatalogStatus::Idle | CatalogStatus::Loading if context.catalog().is_empty() => {
            "Loading dogs…"
        }
        CatalogStatus::Failed(_) if context.catalog().is_empty() => "No dogs loaded. Press r to retry.",
        _ if context.criteria().favorites_only && context.favorites().is_empty() => {
            "No favorites yet. Press space to add one."
        }
        _ => "No dogs match the current filters.",
    }
}

fn entry_list_line(entry: &CatalogEntry, favorite: bool) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!("{} ", favorite_marker(favorite)),
            Style::default().fg(FAVORITE_COLOR),
        ),
        Span::styled(
            entry.name().to_owned(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  ".to_owned()),
        Span::styled(entry.city().to_owned(), Style::default().fg(Color::Gray)),
    ];
    if !entry.size().is_empty() {
        spans.push(Span::styled(
            format!(" • {}", entry.size()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn detail_title(detail: &DetailState) -> String {
    match detail {
        DetailState::Loaded(entry) => format!(" {} ", entry.name()),
        DetailState::Loading(id) | DetailState::NotFound(id) => format!(" Dog {id} "),
        DetailState::Closed => String::new(),
    }
}

fn detail_lines(detail: &DetailState, is_favorite: impl Fn(EntryId) -> bool) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let key = Style::default().fg(FOOTER_LABEL_COLOR);
    match detail {
        DetailState::Closed => Vec::new(),
        DetailState::Loading(_) => vec![Line::from(Span::styled("Loading…".to_owned(), dim))],
        DetailState::NotFound(_) => vec![
            Line::from(Span::styled(
                "Dog not found".to_owned(),
                Style::default().fg(BANNER_COLOR),
            )),
            Line::from(""),
            Line::from(Span::styled("Esc to go back".to_owned(), dim)),
        ],
        DetailState::Loaded(entry) => {
            let mut lines = Vec::new();
            if !entry.description().is_empty() {
                lines.push(Line::from(entry.description().to_owned()));
                lines.push(Line::from(""));
            }
            let fields = [
                ("City", entry.city().to_owned()),
                ("Size", entry.size().to_owned()),
                ("Age", format!("{} years", entry.age())),
            ];
            for (label, value) in fields {
                if value.is_empty() {
                    continue;
                }
                lines.push(Line::from(vec![
                    Span::styled(format!("{label}: "), key),
                    Span::raw(value),
                ]));
            }
            let tags = entry.tags();
            if !tags.is_empty() {
                lines.push(Line::from(vec![
                    Span::styled("Tags: ".to_owned(), key),
                    Span::styled(tags.join(", "), Style::default().fg(FOCUS_COLOR)),
                ]));
            }
            if !entry.image().is_empty() {
                lines.push(Line::from(vec![
                    Span::styled("Photo: ".to_owned(), key),
                    Span::styled(entry.image().to_owned(), dim),
                ]));
            }
            lines.push(Line::from(""));
            let favorite = is_favorite(entry.id());
            let action = if favorite {
                "♥ In favorites (space to remove)"
            } else {
                "♡ Not in favorites (space to add)"
            };
            lines.push(Line::from(Span::styled(
                action.to_owned(),
                Style::default().fg(FAVORITE_COLOR),
            )));
            lines.push(Line::from(vec![
                Span::styled("Press ".to_owned(), dim),
                Span::styled("a".to_owned(), help_key_style()),
                Span::styled(" to request adoption".to_owned(), dim),
            ]));
            lines
        }
    }
}

fn footer_help_line(mode: InputMode, toast_suffix: &str) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    match mode {
        InputMode::EditingCity => {
            push_footer_entry(&mut spans, "TYPE", "city");
            push_footer_entry(&mut spans, "KEEP", "Enter");
            push_footer_entry(&mut spans, "CLEAR", "Esc");
        }
        InputMode::Adopting => {
            push_footer_entry(&mut spans, "NEXT", "Tab");
            push_footer_entry(&mut spans, "SEND", "Enter");
            push_footer_entry(&mut spans, "CANCEL", "Esc");
        }
        InputMode::Browse => {
            push_footer_entry(&mut spans, "CITY", "/");
            push_footer_entry(&mut spans, "FAVS ONLY", "*");
            push_footer_entry(&mut spans, "FAVORITE", "space");
            push_footer_entry(&mut spans, "DETAIL", "Enter");
            push_footer_entry(&mut spans, "ADOPT", "a");
            push_footer_entry(&mut spans, "RELOAD", "r");
            push_footer_entry(&mut spans, "HELP", "?");
            push_footer_entry(&mut spans, "QUIT", "q");
        }
    }
    if !toast_suffix.is_empty() {
        spans.push(Span::styled(
            toast_suffix.to_owned(),
            Style::default().fg(Color::Yellow),
        ));
    }
    Line::from(spans)
}

fn footer_brand_line() -> Line<'static> {
    Line::from(vec![Span::styled(
        FOOTER_BRAND.to_owned(),
        Style::default().fg(FOOTER_BRAND_COLOR),
    )])
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(
            " | ".to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(
        value.to_owned(),
        Style::default()
            .fg(FOOTER_KEY_COLOR)
            .add_modifier(Modifier::BOLD),
    ));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn help_key_style() -> Style {
    Style::default()
        .fg(FOOTER_KEY_COLOR)
        .add_modifier(Modifier::BOLD)
}

fn help_header_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

const HELP_ENTRIES: &[(&str, &[(&str, &str)])] = &[
    (
        "Browse",
        &[
            ("j/k, ↑/↓", "Move cursor"),
            ("PgUp/PgDn", "Move by page"),
            ("g/G, Home/End", "First/last dog"),
            ("Enter", "Open detail"),
            ("Esc", "Close detail, then clear city filter"),
            ("space/f", "Toggle favorite"),
            ("a", "Request adoption of the open dog"),
            ("r", "Reload catalog"),
        ],
    ),
    (
        "Filters",
        &[
            ("/", "Edit city filter"),
            ("*", "Toggle favorites only"),
        ],
    ),
    (
        "City filter",
        &[
            ("Type", "Update filter"),
            ("Backspace", "Delete char"),
            ("Enter", "Keep filter"),
            ("Esc", "Clear filter"),
        ],
    ),
    (
        "Adoption form",
        &[
            ("Tab/↓, S-Tab/↑", "Next/previous field"),
            ("Type", "Fill field"),
            ("Enter", "Send request"),
            ("Esc", "Cancel"),
        ],
    ),
    ("Global", &[("?", "Help (toggle)"), ("q", "Quit")]),
];

fn help_lines() -> Vec<Line<'static>> {
    let key_col_width = HELP_ENTRIES
        .iter()
        .flat_map(|(_, entries)| entries.iter())
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::<Line<'static>>::new();
    for (idx, (section, entries)) in HELP_ENTRIES.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            format!("--- {section} ---"),
            help_header_style(),
        )));
        for (key, desc) in entries.iter() {
            lines.push(help_kv(key, desc, key_col_width, help_key_style()));
        }
    }
    lines
}

fn render_help(frame: &mut Frame<'_>, main_area: Rect) {
    let area = centered_rect(70, 80, main_area);
    frame.render_widget(Clear, area);

    let help = Paragraph::new(Text::from(help_lines()))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(FOCUS_COLOR))
                .title(" Help (Esc/? to close) "),
        );
    frame.render_widget(help, area);
}

const FORM_LABEL_WIDTH: usize = 9;

fn adoption_form_lines(form: &AdoptionForm) -> Vec<Line<'static>> {
    let label = Style::default().fg(FOOTER_LABEL_COLOR);
    let focused = Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line<'static>> = FormField::ALL
        .iter()
        .map(|&field| {
            let style = if field == form.field { focused } else { label };
            Line::from(vec![
                Span::styled(
                    format!("{:<width$}", format!("{}:", field.label()), width = FORM_LABEL_WIDTH),
                    style,
                ),
                Span::raw(form.value(field).to_owned()),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Message is optional.".to_owned(),
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn render_adoption_form(frame: &mut Frame<'_>, main_area: Rect, form: &AdoptionForm) {
    let area = centered_rect(70, 60, main_area);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(FOCUS_COLOR))
        .title(format!(" Adopt {} ", form.entry.name()));
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(Text::from(adoption_form_lines(form))).block(block), area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let typed = form.value(form.field).chars().count();
    let offset = u16::try_from(FORM_LABEL_WIDTH + typed).unwrap_or(u16::MAX);
    let cursor_x = inner
        .x
        .saturating_add(offset)
        .min(inner.x.saturating_add(inner.width - 1));
    let row = u16::try_from(form.field.index()).unwrap_or(0);
    let cursor_y = inner.y.saturating_add(row).min(inner.y.saturating_add(inner.height - 1));
    frame.set_cursor(cursor_x, cursor_y);
}
