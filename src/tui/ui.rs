use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, Tabs};

use crate::output::{format_age, format_attribute, format_score, truncate_text};
use crate::tui::app::{App, FlashKind, FormField, FormState, InputMode, InputTab, View};
use crate::tui::theme::ThemeColors;
use crate::upload::ACCEPTED_EXTENSION;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    if area.height < 8 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(1), // Tab bar
        Constraint::Fill(1),   // Active view
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    match app.current_view {
        View::Database => render_database(frame, chunks[2], app),
        View::Results => render_results(frame, chunks[2], app),
        View::Input => render_input(frame, chunks[2], app),
    }
    render_status_bar(frame, chunks[3], app);

    match app.input_mode {
        InputMode::EditForm => render_edit_popup(frame, app),
        InputMode::Help => render_help_popup(frame, &app.theme),
        InputMode::ScoreBreakdown => render_score_breakdown_popup(frame, app),
        _ => {}
    }

    if app.is_loading {
        render_loading_overlay(frame, app);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let name = "Facility Dashboard";
    let mut spans = vec![Span::styled(
        name,
        Style::default().fg(theme.title_color).bold(),
    )];

    let counts = format!(
        "{} records  {} selected  {} results",
        app.dashboard.records().len(),
        app.dashboard.selection().len(),
        app.dashboard.results().len()
    );
    let padding_len = (area.width as usize).saturating_sub(name.len() + counts.len());
    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(Span::styled(counts, Style::default().fg(theme.muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<String> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{} {}", i + 1, v.label()))
        .collect();
    let selected = View::ALL
        .iter()
        .position(|v| *v == app.current_view)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive_style)
        .highlight_style(app.theme.tab_active_style)
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn checkbox(on: bool) -> &'static str {
    if on {
        "[x]"
    } else {
        "[ ]"
    }
}

fn render_database(frame: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    let (search_area, table_area) = if app.input_mode == InputMode::Search
        || !app.dashboard.search().is_empty()
    {
        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).split(area);
        (Some(chunks[0]), chunks[1])
    } else {
        (None, area)
    };

    if let Some(search_area) = search_area {
        let cursor = if app.input_mode == InputMode::Search {
            "|"
        } else {
            ""
        };
        let line = Line::from(vec![
            Span::styled("Search: ", Style::default().fg(theme.status_key_color)),
            Span::raw(format!("{}{}", app.dashboard.search(), cursor)),
        ]);
        frame.render_widget(Paragraph::new(line), search_area);
    }

    let visible = app.dashboard.visible_records();
    if visible.is_empty() {
        let text = if app.dashboard.records().is_empty() {
            "No records yet. Press n to add one."
        } else {
            "No records match the search"
        };
        let empty_msg = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.muted));
        frame.render_widget(empty_msg, table_area);
        return;
    }

    let selection = app.dashboard.selection();
    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let selected = selection.contains(record.id);
            let check_style = if selected {
                Style::default().fg(theme.checkbox_on).bold()
            } else {
                Style::default().fg(theme.index_color)
            };
            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(checkbox(selected)).style(check_style),
                Cell::from(truncate_text(&record.name, 40)),
                Cell::from(record.airport.clone()),
                Cell::from(record.grade.to_string()),
                Cell::from(format_attribute(record.pax)),
                Cell::from(format_attribute(record.traffic)),
                Cell::from(format_attribute(record.runway)),
                Cell::from(format_age(record.age())).style(Style::default().fg(theme.muted)),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),  // Checkbox
        Constraint::Fill(1),    // Name
        Constraint::Length(8),  // Airport
        Constraint::Length(6),  // Grade
        Constraint::Length(6),  // Pax
        Constraint::Length(8),  // Traffic
        Constraint::Length(7),  // Runway
        Constraint::Length(5),  // Age
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec![
                checkbox(app.dashboard.all_selected()),
                "Name",
                "Airport",
                "Grade",
                "Pax",
                "Traffic",
                "Runway",
                "Age",
            ])
            .style(theme.header_style)
            .bottom_margin(1),
        )
        .row_highlight_style(theme.row_selected);

    frame.render_stateful_widget(table, table_area, &mut app.table_state);
}

fn render_results(frame: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let results = app.dashboard.results();

    if results.is_empty() {
        let empty_msg = Paragraph::new("No scores generated yet")
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.muted));
        frame.render_widget(empty_msg, area);
        return;
    }

    let max_score = results.max_score();
    let rows: Vec<Row> = results
        .list()
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            let score_color = theme.score_color(result.score, max_score);
            let mut score_spans = vec![Span::styled(
                format!("{:>5} ", format_score(result.score)),
                Style::default().fg(score_color),
            )];
            score_spans.extend(score_bar(result.score, max_score, 8, theme).spans);

            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(format!("{}.", idx + 1)).style(Style::default().fg(theme.index_color)),
                Cell::from(truncate_text(&result.record.name, 40)),
                Cell::from(result.record.airport.clone()),
                Cell::from(result.record.grade.to_string()),
                Cell::from(Line::from(score_spans)),
                Cell::from(result.scored_at.format("%H:%M:%S").to_string())
                    .style(Style::default().fg(theme.muted)),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),  // Index
        Constraint::Fill(1),    // Name
        Constraint::Length(8),  // Airport
        Constraint::Length(6),  // Grade
        Constraint::Length(15), // Score + bar
        Constraint::Length(9),  // Scored at
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Name", "Airport", "Grade", "Score", "Scored"])
                .style(theme.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(theme.row_selected);

    frame.render_stateful_widget(table, area, &mut app.results_state);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let chunks = Layout::vertical([
        Constraint::Length(1), // Sub-tabs
        Constraint::Length(1), // Spacer
        Constraint::Fill(1),   // Body
    ])
    .split(area);

    let selected = match app.input_tab {
        InputTab::Manual => 0,
        InputTab::Upload => 1,
    };
    let tabs = Tabs::new(vec!["m Manual Input", "u Upload Data"])
        .select(selected)
        .style(theme.tab_inactive_style)
        .highlight_style(theme.tab_active_style)
        .divider(" | ");
    frame.render_widget(tabs, chunks[0]);

    match app.input_tab {
        InputTab::Manual => {
            let active = app.input_mode == InputMode::CreateForm;
            let lines = form_lines(&app.create_form, active, theme);
            frame.render_widget(Paragraph::new(lines), chunks[2]);
        }
        InputTab::Upload => {
            let active = app.input_mode == InputMode::UploadPath;
            let cursor = if active { "|" } else { "" };
            let label_style = if active {
                theme.field_focus
            } else {
                Style::default()
            };
            let lines = vec![
                Line::from(vec![
                    Span::styled(format!("{:<10}", "File"), label_style),
                    Span::raw(format!("{}{}", app.upload_input, cursor)),
                ]),
                Line::from(""),
                Line::from(Span::styled(
                    format!("Accepted: .{}", ACCEPTED_EXTENSION),
                    Style::default().fg(theme.muted),
                )),
                Line::from(Span::styled(
                    if active {
                        "Enter: upload | Esc: cancel"
                    } else {
                        "Enter: choose a file"
                    },
                    Style::default().fg(theme.muted),
                )),
            ];
            frame.render_widget(Paragraph::new(lines), chunks[2]);
        }
    }
}

/// Lines for a record form: editable fields first, then the read-only
/// attributes the airport selection fills in.
fn form_lines(form: &FormState, active: bool, theme: &ThemeColors) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let fields = [
        (FormField::Name, "Name", form.draft.name.clone()),
        (
            FormField::Airport,
            "Airport",
            if form.draft.airport.is_empty() {
                "< select >".to_string()
            } else {
                format!("< {} >", form.draft.airport)
            },
        ),
        (
            FormField::Grade,
            "Grade",
            match form.draft.grade {
                Some(g) => format!("< {} >", g),
                None => "< select >".to_string(),
            },
        ),
    ];

    for (field, label, value) in fields {
        let focused = active && form.focus == field;
        let label_style = if focused {
            theme.field_focus
        } else {
            Style::default()
        };
        let cursor = if focused && field == FormField::Name {
            "|"
        } else {
            ""
        };
        let mut spans = vec![
            Span::styled(format!("{:<10}", label), label_style),
            Span::raw(format!("{}{}", value, cursor)),
        ];
        if let Some(err) = form.error_for(field.as_field()) {
            spans.push(Span::styled(
                format!("  {}", err),
                Style::default().fg(theme.field_error),
            ));
        }
        lines.push(Line::from(spans));
    }

    for (label, value) in [
        ("Pax", form.draft.pax),
        ("Traffic", form.draft.traffic),
        ("Runway", form.draft.runway),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<10}", label), Style::default().fg(theme.field_readonly)),
            Span::styled(format_attribute(value), Style::default().fg(theme.field_readonly)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        if active {
            "Tab: next field | Left/Right: change | Enter: save | Esc: cancel"
        } else {
            "Enter: start typing"
        },
        Style::default().fg(theme.muted),
    )));

    // Only populated after a failed submit
    if !form.errors.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("{} field(s) need attention", form.errors.len()),
            Style::default().fg(theme.field_error),
        )));
    }

    lines
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some((ref msg, kind, _)) = app.flash_message {
        let msg_color = match kind {
            FlashKind::Success => theme.flash_success,
            FlashKind::Error => theme.flash_error,
            FlashKind::Info => theme.flash_info,
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: Vec<(&str, &str)> = match (app.input_mode, app.current_view) {
            (InputMode::Search, _) => vec![("Enter", ":keep "), ("Esc", ":clear")],
            (InputMode::CreateForm, _) | (InputMode::EditForm, _) => vec![
                ("Tab", ":field "),
                ("Left/Right", ":change "),
                ("Enter", ":save "),
                ("Esc", ":cancel"),
            ],
            (InputMode::UploadPath, _) => vec![("Enter", ":upload "), ("Esc", ":cancel")],
            (_, View::Database) => vec![
                ("j/k", ":nav "),
                ("Space", ":select "),
                ("a", ":all "),
                ("g", ":generate "),
                ("e", ":edit "),
                ("d", ":delete "),
                ("/", ":search "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            (_, View::Results) => vec![
                ("j/k", ":nav "),
                ("b", ":breakdown "),
                ("Tab", ":next view "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            (_, View::Input) => vec![
                ("m/u", ":tab "),
                ("Enter", ":start "),
                ("Tab", ":next view "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

fn score_bar(score: f64, max_score: f64, width: usize, theme: &ThemeColors) -> Line<'static> {
    let ratio = if max_score > 0.0 {
        (score / max_score).min(1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let bar_color = theme.score_color(score, max_score);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled("█".repeat(filled), Style::default().fg(bar_color)));
    }
    if empty > 0 {
        spans.push(Span::styled("░".repeat(empty), Style::default().fg(theme.bar_empty)));
    }

    Line::from(spans)
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn popup_block<'a>(title: &'a str, theme: &ThemeColors) -> Block<'a> {
    Block::bordered()
        .title(Span::styled(title, theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg))
}

fn render_edit_popup(frame: &mut Frame, app: &App) {
    let Some(form) = app.edit_form.as_ref() else {
        return;
    };
    let popup_area = centered_rect_fixed(72, 12, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(" Edit Record ", &app.theme);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let lines = form_lines(form, true, &app.theme);
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(52, 21, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(" Keyboard Shortcuts ", theme);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(theme.status_key_color).bold();
    let entries = [
        ("1 / 2 / 3", "Database / Results / Input"),
        ("Tab", "Next view"),
        ("j / Down", "Move down"),
        ("k / Up", "Move up"),
        ("Space", "Select record"),
        ("a", "Select all / clear"),
        ("g", "Generate scores for selection"),
        ("n", "New record"),
        ("e", "Edit record"),
        ("d", "Delete record"),
        ("/", "Search name, airport, grade"),
        ("b", "Score breakdown (Results)"),
        ("m / u", "Manual / Upload (Input)"),
        ("Enter / i", "Start typing (Input)"),
        ("?", "Show/hide this help"),
        ("q / Ctrl-c", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("{:<14}", key), key_style),
                Span::raw(*desc),
            ])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}

fn render_score_breakdown_popup(frame: &mut Frame, app: &App) {
    let Some(result) = app.highlighted_result() else {
        return;
    };
    let theme = &app.theme;

    let height = result.breakdown.factors.len() as u16 + 8;
    let popup_area = centered_rect_fixed(56, height, frame.area());
    frame.render_widget(Clear, popup_area);

    let title = format!(" {} ", truncate_text(&result.record.name, 40));
    let block = popup_block(&title, theme);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{}  grade {}", result.record.airport, result.record.grade),
            Style::default().fg(theme.muted),
        )),
        Line::from(""),
    ];
    for factor in &result.breakdown.factors {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<10}", factor.label), theme.header_style),
            Span::raw(format!(
                "{:>6} x {:.2} = {:.3}",
                factor.value, factor.weight, factor.contribution
            )),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!("{:<10}", "Score"), theme.header_style),
        Span::styled(
            format_score(result.score),
            Style::default().fg(theme.score_color(result.score, app.dashboard.results().max_score())),
        ),
        Span::styled(
            format!("  (raw {:.4})", result.breakdown.raw_total()),
            Style::default().fg(theme.muted),
        ),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "j/k: next result | Esc: close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_loading_overlay(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(30, 3, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block("", &app.theme);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let spinner_chars = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let spinner = spinner_chars[app.spinner_frame % spinner_chars.len()];

    let loading_text = Paragraph::new(format!("{} Generating scores...", spinner))
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.title_color));

    frame.render_widget(loading_text, inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = centered_rect_fixed(40, 5, area);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.y, 2);
    }

    #[test]
    fn test_score_bar_fill() {
        let theme = ThemeColors::dark();
        let full = score_bar(3.0, 3.0, 8, &theme);
        assert_eq!(full.spans.len(), 1);
        let empty = score_bar(0.0, 0.0, 8, &theme);
        assert_eq!(empty.spans.len(), 1);
        let half = score_bar(1.5, 3.0, 8, &theme);
        assert_eq!(half.spans.len(), 2);
    }
}
