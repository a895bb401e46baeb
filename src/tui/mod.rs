pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};
use tracing::{debug, warn};

use app::{InputMode, InputTab, View};
use crate::scoring::ScoringJob;

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(250);
    let mut pending_job: Option<ScoringJob> = None;

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => {
                app.update_flash();
                if app.is_loading {
                    app.advance_spinner();
                }
            }
        }

        if let Some(request) = app.pending_request.take() {
            debug!(selected = request.selection.len(), "starting scoring job");
            pending_job = Some(ScoringJob::spawn(request, app.scoring_delay));
        }

        if pending_job.as_ref().is_some_and(|job| job.is_finished()) {
            if let Some(job) = pending_job.take() {
                let outcome = job.join().await;
                if let Err(e) = &outcome {
                    warn!(error = %e, "scoring job failed");
                }
                app.finish_scoring(outcome);
            }
        }

        if app.should_quit {
            break;
        }
    }

    if let Some(job) = pending_job.take() {
        job.abort();
    }

    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    Ok(())
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if is_quit(&key) {
        app.should_quit = true;
        return;
    }

    // The loading overlay swallows keys; only quit and the re-trigger notice get through
    if app.is_loading {
        if key.code == KeyCode::Char('q') {
            app.should_quit = true;
        } else if key.code == KeyCode::Char('g') {
            app.request_scoring();
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => match key.code {
            KeyCode::Enter => app.confirm_search(),
            KeyCode::Esc => app.cancel_search(),
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Char(c) => app.push_search_char(c),
            _ => {}
        },
        InputMode::CreateForm => match key.code {
            KeyCode::Enter => app.submit_create(),
            KeyCode::Esc => app.leave_create_form(),
            _ => handle_form_key(app, key),
        },
        InputMode::EditForm => match key.code {
            KeyCode::Enter => app.submit_edit(),
            KeyCode::Esc => app.cancel_edit(),
            _ => handle_form_key(app, key),
        },
        InputMode::UploadPath => match key.code {
            KeyCode::Enter => app.confirm_upload(),
            KeyCode::Esc => app.cancel_upload(),
            KeyCode::Backspace => {
                app.upload_input.pop();
            }
            KeyCode::Char(c) => app.upload_input.push(c),
            _ => {}
        },
        InputMode::ScoreBreakdown => match key.code {
            KeyCode::Esc | KeyCode::Char('b') => app.dismiss_score_breakdown(),
            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
            _ => {}
        },
        InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // View switching
        KeyCode::Char('1') => app.switch_view(View::Database),
        KeyCode::Char('2') => app.switch_view(View::Results),
        KeyCode::Char('3') => app.switch_view(View::Input),
        KeyCode::Tab => app.next_view(),
        KeyCode::BackTab => app.previous_view(),

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.next_row(),
        KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

        KeyCode::Char('?') => app.show_help(),
        KeyCode::Char('n') => app.start_create(),
        KeyCode::Char('g') => app.request_scoring(),

        _ => match app.current_view {
            View::Database => match key.code {
                KeyCode::Char(' ') => app.toggle_highlighted(),
                KeyCode::Char('a') => app.toggle_select_all(),
                KeyCode::Char('e') | KeyCode::Enter => app.start_edit(),
                KeyCode::Char('d') => app.delete_highlighted(),
                KeyCode::Char('/') => app.start_search(),
                _ => {}
            },
            View::Results => {
                if key.code == KeyCode::Char('b') || key.code == KeyCode::Enter {
                    app.show_score_breakdown();
                }
            }
            View::Input => match key.code {
                KeyCode::Char('m') => app.input_tab = InputTab::Manual,
                KeyCode::Char('u') => app.input_tab = InputTab::Upload,
                KeyCode::Enter | KeyCode::Char('i') => match app.input_tab {
                    InputTab::Manual => app.start_create(),
                    InputTab::Upload => app.start_upload_input(),
                },
                _ => {}
            },
        },
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.active_form() {
                form.focus_next();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.active_form() {
                form.focus_previous();
            }
        }
        KeyCode::Left => app.form_cycle(false),
        KeyCode::Right => app.form_cycle(true),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(c) => app.form_char(c),
        _ => {}
    }
}
