use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::dashboard::Dashboard;
use crate::error::{Error, Field, FieldError};
use crate::records::{FacilityRecord, RecordDraft, RecordId, MAX_GRADE};
use crate::scoring::{ScoredResult, ScoringRequest};
use crate::tui::theme::ThemeColors;

const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Database,
    Results,
    Input,
}

impl View {
    pub const ALL: [View; 3] = [View::Database, View::Results, View::Input];

    pub fn label(&self) -> &'static str {
        match self {
            View::Database => "Database",
            View::Results => "Results",
            View::Input => "Input Data",
        }
    }

    fn index(&self) -> usize {
        match self {
            View::Database => 0,
            View::Results => 1,
            View::Input => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTab {
    Manual,
    Upload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    CreateForm,
    EditForm,
    UploadPath,
    Help,
    ScoreBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

/// Focusable form fields. Pax, traffic and runway are read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Airport,
    Grade,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Airport,
            FormField::Airport => FormField::Grade,
            FormField::Grade => FormField::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            FormField::Name => FormField::Grade,
            FormField::Airport => FormField::Name,
            FormField::Grade => FormField::Airport,
        }
    }

    pub fn as_field(self) -> Field {
        match self {
            FormField::Name => Field::Name,
            FormField::Airport => Field::Airport,
            FormField::Grade => Field::Grade,
        }
    }
}

/// A create form or edit modal in progress.
#[derive(Debug, Clone)]
pub struct FormState {
    /// `None` for the create form, the record being edited otherwise
    pub target: Option<RecordId>,
    pub draft: RecordDraft,
    pub focus: FormField,
    pub errors: Vec<FieldError>,
}

impl FormState {
    pub fn create() -> Self {
        Self {
            target: None,
            draft: RecordDraft::default(),
            focus: FormField::Name,
            errors: Vec::new(),
        }
    }

    pub fn edit(record: &FacilityRecord) -> Self {
        Self {
            target: Some(record.id),
            draft: RecordDraft::from_record(record),
            focus: FormField::Name,
            errors: Vec::new(),
        }
    }

    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field() == field)
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }
}

pub struct App {
    pub dashboard: Dashboard,
    pub table_state: ratatui::widgets::TableState,
    pub results_state: ratatui::widgets::TableState,
    pub current_view: View,
    pub input_tab: InputTab,
    pub input_mode: InputMode,
    pub create_form: FormState,
    pub edit_form: Option<FormState>,
    pub upload_input: String,
    pub flash_message: Option<(String, FlashKind, Instant)>,
    pub pending_request: Option<ScoringRequest>,
    pub scoring_delay: Duration,
    pub should_quit: bool,
    pub is_loading: bool,
    pub spinner_frame: usize,
    pub theme: ThemeColors,
}

impl App {
    pub fn new(dashboard: Dashboard, scoring_delay: Duration, theme: ThemeColors) -> Self {
        Self {
            dashboard,
            table_state: ratatui::widgets::TableState::default(),
            results_state: ratatui::widgets::TableState::default(),
            current_view: View::Database,
            input_tab: InputTab::Manual,
            input_mode: InputMode::Normal,
            create_form: FormState::create(),
            edit_form: None,
            upload_input: String::new(),
            flash_message: None,
            pending_request: None,
            scoring_delay,
            should_quit: false,
            is_loading: false,
            spinner_frame: 0,
            theme,
        }
    }

    // Navigation

    pub fn switch_view(&mut self, view: View) {
        self.current_view = view;
        self.clamp_selection();
    }

    pub fn next_view(&mut self) {
        let idx = (self.current_view.index() + 1) % View::ALL.len();
        self.switch_view(View::ALL[idx]);
    }

    pub fn previous_view(&mut self) {
        let idx = (self.current_view.index() + View::ALL.len() - 1) % View::ALL.len();
        self.switch_view(View::ALL[idx]);
    }

    fn current_len(&self) -> usize {
        match self.current_view {
            View::Database => self.dashboard.visible_records().len(),
            View::Results => self.dashboard.results().len(),
            View::Input => 0,
        }
    }

    fn current_table_state(&mut self) -> &mut ratatui::widgets::TableState {
        match self.current_view {
            View::Results => &mut self.results_state,
            _ => &mut self.table_state,
        }
    }

    pub fn next_row(&mut self) {
        let len = self.current_len();
        if len == 0 {
            return;
        }
        let state = self.current_table_state();
        let i = match state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.current_len();
        if len == 0 {
            return;
        }
        let state = self.current_table_state();
        let i = match state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        state.select(Some(i));
    }

    /// Keep both table cursors inside their lists after any change.
    pub fn clamp_selection(&mut self) {
        let visible = self.dashboard.visible_records().len();
        clamp(&mut self.table_state, visible);
        let results = self.dashboard.results().len();
        clamp(&mut self.results_state, results);
    }

    /// Id of the record under the database cursor.
    pub fn highlighted_record(&self) -> Option<RecordId> {
        let visible = self.dashboard.visible_records();
        self.table_state
            .selected()
            .and_then(|i| visible.get(i).map(|r| r.id))
    }

    pub fn highlighted_result(&self) -> Option<&ScoredResult> {
        self.results_state
            .selected()
            .and_then(|i| self.dashboard.results().get(i))
    }

    // Flash notifications

    pub fn update_flash(&mut self) {
        if let Some((_, _, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String, kind: FlashKind) {
        self.flash_message = Some((msg, kind, Instant::now()));
    }

    pub fn flash_success(&mut self, msg: impl Into<String>) {
        self.show_flash(msg.into(), FlashKind::Success);
    }

    pub fn flash_error(&mut self, msg: impl Into<String>) {
        self.show_flash(msg.into(), FlashKind::Error);
    }

    pub fn flash_info(&mut self, msg: impl Into<String>) {
        self.show_flash(msg.into(), FlashKind::Info);
    }

    // Selection

    pub fn toggle_highlighted(&mut self) {
        if let Some(id) = self.highlighted_record() {
            if let Err(e) = self.dashboard.toggle_selected(id) {
                self.flash_error(e.to_string());
            }
        }
    }

    pub fn toggle_select_all(&mut self) {
        self.dashboard.toggle_select_all();
    }

    // Search

    pub fn start_search(&mut self) {
        if self.current_view == View::Database {
            self.input_mode = InputMode::Search;
        }
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut query = self.dashboard.search().to_string();
        query.push(c);
        self.dashboard.set_search(query);
        self.reset_database_cursor();
    }

    pub fn pop_search_char(&mut self) {
        let mut query = self.dashboard.search().to_string();
        query.pop();
        self.dashboard.set_search(query);
        self.reset_database_cursor();
    }

    pub fn confirm_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_search(&mut self) {
        self.dashboard.set_search(String::new());
        self.input_mode = InputMode::Normal;
        self.reset_database_cursor();
    }

    fn reset_database_cursor(&mut self) {
        let visible = self.dashboard.visible_records().len();
        self.table_state
            .select(if visible == 0 { None } else { Some(0) });
    }

    // Forms

    /// Jump to the Input view with the create form focused.
    pub fn start_create(&mut self) {
        self.switch_view(View::Input);
        self.input_tab = InputTab::Manual;
        self.input_mode = InputMode::CreateForm;
    }

    pub fn start_edit(&mut self) {
        let Some(id) = self.highlighted_record() else {
            return;
        };
        if let Some(record) = self.dashboard.find(id) {
            self.edit_form = Some(FormState::edit(record));
            self.input_mode = InputMode::EditForm;
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit_form = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn leave_create_form(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// The form receiving keys in the current mode.
    pub fn active_form(&mut self) -> Option<&mut FormState> {
        match self.input_mode {
            InputMode::CreateForm => Some(&mut self.create_form),
            InputMode::EditForm => self.edit_form.as_mut(),
            _ => None,
        }
    }

    pub fn form_char(&mut self, c: char) {
        let Some(form) = self.active_form() else {
            return;
        };
        match form.focus {
            FormField::Name => form.draft.name.push(c),
            FormField::Grade => {
                if let Some(digit) = c.to_digit(10) {
                    let digit = digit as u8;
                    let typed = form
                        .draft
                        .grade
                        .and_then(|g| g.checked_mul(10))
                        .and_then(|g| g.checked_add(digit))
                        .filter(|g| *g <= MAX_GRADE);
                    form.draft.grade = match typed {
                        Some(g) => Some(g),
                        None if digit == 0 => None,
                        None => Some(digit),
                    };
                }
            }
            FormField::Airport => {}
        }
    }

    pub fn form_backspace(&mut self) {
        let Some(form) = self.active_form() else {
            return;
        };
        match form.focus {
            FormField::Name => {
                form.draft.name.pop();
            }
            FormField::Grade => {
                form.draft.grade = form.draft.grade.map(|g| g / 10).filter(|g| *g > 0);
            }
            FormField::Airport => {}
        }
    }

    /// Left/Right on a selector field.
    pub fn form_cycle(&mut self, forward: bool) {
        let airports = self.dashboard.airports().clone();
        let Some(form) = self.active_form() else {
            return;
        };
        match form.focus {
            FormField::Airport => form.draft.cycle_airport(forward, &airports),
            FormField::Grade => form.draft.cycle_grade(forward),
            FormField::Name => {}
        }
    }

    pub fn submit_create(&mut self) {
        match self.dashboard.add_record(&self.create_form.draft) {
            Ok(_) => {
                self.create_form = FormState::create();
                self.input_mode = InputMode::Normal;
                self.switch_view(View::Database);
                self.flash_success("Record saved");
            }
            Err(Error::Validation(errors)) => {
                self.create_form.errors = errors;
                self.flash_error("Fill in the required fields");
            }
            Err(e) => self.flash_error(e.to_string()),
        }
    }

    pub fn submit_edit(&mut self) {
        let Some(form) = self.edit_form.as_mut() else {
            self.input_mode = InputMode::Normal;
            return;
        };
        let Some(id) = form.target else {
            self.cancel_edit();
            return;
        };
        match self.dashboard.update_record(id, &form.draft) {
            Ok(()) => {
                self.cancel_edit();
                self.flash_success("Record updated");
            }
            Err(Error::Validation(errors)) => {
                form.errors = errors;
                self.flash_error("Fill in the required fields");
            }
            Err(e) => {
                self.cancel_edit();
                self.flash_error(e.to_string());
            }
        }
    }

    pub fn delete_highlighted(&mut self) {
        let Some(id) = self.highlighted_record() else {
            return;
        };
        match self.dashboard.remove_record(id) {
            Ok(removed) => {
                self.clamp_selection();
                self.flash_success(format!("Deleted: {}", removed.name));
            }
            Err(e) => self.flash_error(e.to_string()),
        }
    }

    // Upload

    pub fn start_upload_input(&mut self) {
        self.input_tab = InputTab::Upload;
        self.input_mode = InputMode::UploadPath;
    }

    pub fn confirm_upload(&mut self) {
        let path = PathBuf::from(self.upload_input.trim());
        match crate::upload::import_file(&path) {
            Ok(drafts) => {
                let mut saved = 0;
                for draft in &drafts {
                    if self.dashboard.add_record(draft).is_ok() {
                        saved += 1;
                    }
                }
                self.flash_success(format!("Imported {} records", saved));
            }
            Err(Error::UploadNotImplemented { .. }) => {
                self.flash_info("Upload functionality not implemented yet");
            }
            Err(e) => self.flash_error(e.to_string()),
        }
        self.upload_input.clear();
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_upload(&mut self) {
        self.upload_input.clear();
        self.input_mode = InputMode::Normal;
    }

    // Scoring

    /// Queue a scoring run for the event loop. Refused while one is running
    /// or when nothing is selected.
    pub fn request_scoring(&mut self) {
        if self.is_loading || self.pending_request.is_some() {
            self.flash_info("Score generation already in progress");
            return;
        }
        match self.dashboard.prepare_scoring() {
            Ok(request) => {
                self.pending_request = Some(request);
                self.is_loading = true;
            }
            Err(Error::EmptySelection) => {
                self.flash_info("Select the records to generate scores for first");
            }
            Err(e) => self.flash_error(e.to_string()),
        }
    }

    /// Apply a finished scoring run.
    pub fn finish_scoring(&mut self, outcome: crate::error::Result<Vec<ScoredResult>>) {
        self.is_loading = false;
        match outcome {
            Ok(batch) => {
                let added = self.dashboard.apply_results(batch);
                self.switch_view(View::Results);
                if added > 0 && self.results_state.selected().is_none() {
                    self.results_state.select(Some(0));
                }
                self.flash_success(format!("Generated {} scores and added them to Results", added));
            }
            Err(e) => self.flash_error(e.to_string()),
        }
    }

    // Overlays

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn show_score_breakdown(&mut self) {
        if self.current_view == View::Results && self.highlighted_result().is_some() {
            self.input_mode = InputMode::ScoreBreakdown;
        }
    }

    pub fn dismiss_score_breakdown(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Advance the loading spinner animation frame
    pub fn advance_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }
}

fn clamp(state: &mut ratatui::widgets::TableState, len: usize) {
    if len == 0 {
        state.select(None);
    } else {
        match state.selected() {
            Some(i) if i >= len => state.select(Some(len - 1)),
            None => state.select(Some(0)),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport::AirportTable;

    fn test_app() -> App {
        App::new(
            Dashboard::new(AirportTable::builtin()),
            Duration::ZERO,
            ThemeColors::dark(),
        )
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.form_char(c);
        }
    }

    fn create_record(app: &mut App, name: &str, airport_steps: usize, grade: &str) {
        app.start_create();
        type_str(app, name);
        app.create_form.focus_next();
        for _ in 0..airport_steps {
            app.form_cycle(true);
        }
        app.create_form.focus_next();
        type_str(app, grade);
        app.submit_create();
    }

    #[test]
    fn test_create_flow_saves_and_returns_to_database() {
        let mut app = test_app();
        create_record(&mut app, "Alpha", 2, "7");

        assert_eq!(app.current_view, View::Database);
        assert_eq!(app.input_mode, InputMode::Normal);
        let record = &app.dashboard.records()[0];
        assert_eq!(record.name, "Alpha");
        assert_eq!(record.airport, "DPS");
        assert_eq!(record.grade, 7);
        assert_eq!(record.pax, Some(6.0));
        assert!(app.create_form.draft.name.is_empty());
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn test_create_with_missing_fields_shows_errors() {
        let mut app = test_app();
        app.start_create();
        type_str(&mut app, "Alpha");
        app.submit_create();

        assert!(app.dashboard.records().is_empty());
        assert_eq!(app.input_mode, InputMode::CreateForm);
        assert!(app.create_form.error_for(Field::Airport).is_some());
        assert!(app.create_form.error_for(Field::Grade).is_some());
        assert!(app.create_form.error_for(Field::Name).is_none());
    }

    #[test]
    fn test_grade_typing() {
        let mut app = test_app();
        app.start_create();
        app.create_form.focus = FormField::Grade;

        type_str(&mut app, "2");
        assert_eq!(app.create_form.draft.grade, Some(2));
        type_str(&mut app, "3");
        assert_eq!(app.create_form.draft.grade, Some(23));
        // 234 is out of range, so the new digit starts over
        type_str(&mut app, "4");
        assert_eq!(app.create_form.draft.grade, Some(4));

        app.form_backspace();
        assert_eq!(app.create_form.draft.grade, None);
    }

    #[test]
    fn test_edit_flow_updates_record() {
        let mut app = test_app();
        create_record(&mut app, "Alpha", 1, "3");

        app.start_edit();
        assert_eq!(app.input_mode, InputMode::EditForm);
        let form = app.edit_form.as_mut().unwrap();
        form.focus = FormField::Airport;
        app.form_cycle(true);
        app.submit_edit();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.edit_form.is_none());
        let record = &app.dashboard.records()[0];
        assert_eq!(record.airport, "DPS");
        assert_eq!(record.traffic, Some(3.0));
    }

    #[test]
    fn test_delete_clamps_cursor() {
        let mut app = test_app();
        create_record(&mut app, "Alpha", 1, "1");
        create_record(&mut app, "Beta", 1, "2");
        app.table_state.select(Some(1));

        app.delete_highlighted();
        assert_eq!(app.dashboard.records().len(), 1);
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn test_request_scoring_empty_selection() {
        let mut app = test_app();
        create_record(&mut app, "Alpha", 1, "1");
        app.request_scoring();

        assert!(app.pending_request.is_none());
        assert!(!app.is_loading);
        assert!(matches!(app.flash_message, Some((_, FlashKind::Info, _))));
    }

    #[test]
    fn test_request_scoring_refuses_reentry() {
        let mut app = test_app();
        create_record(&mut app, "Alpha", 1, "1");
        app.toggle_highlighted();

        app.request_scoring();
        assert!(app.is_loading);
        assert!(app.pending_request.is_some());

        app.request_scoring();
        let (msg, _, _) = app.flash_message.as_ref().unwrap();
        assert!(msg.contains("already in progress"));
    }

    #[test]
    fn test_finish_scoring_switches_to_results() {
        let mut app = test_app();
        create_record(&mut app, "Alpha", 1, "1");
        app.toggle_highlighted();
        app.request_scoring();

        let request = app.pending_request.take().unwrap();
        let outcome = crate::scoring::generate_scores(&request.selection, &request.records);
        app.finish_scoring(outcome);

        assert!(!app.is_loading);
        assert_eq!(app.current_view, View::Results);
        assert_eq!(app.dashboard.results().len(), 1);
        assert_eq!(app.highlighted_result().unwrap().score, 2.95);
        assert!(app.dashboard.selection().is_empty());
    }

    #[test]
    fn test_search_resets_cursor() {
        let mut app = test_app();
        create_record(&mut app, "Alpha", 1, "1");
        create_record(&mut app, "Beta", 1, "2");
        app.table_state.select(Some(1));

        app.start_search();
        for c in "bet".chars() {
            app.push_search_char(c);
        }
        assert_eq!(app.table_state.selected(), Some(0));
        assert_eq!(app.highlighted_record(), Some(app.dashboard.records()[1].id));

        app.cancel_search();
        assert_eq!(app.dashboard.visible_records().len(), 2);
    }

    #[test]
    fn test_upload_csv_reports_not_implemented() {
        let mut app = test_app();
        app.start_upload_input();
        app.upload_input.push_str("facilities.csv");
        app.confirm_upload();

        let (msg, kind, _) = app.flash_message.as_ref().unwrap();
        assert_eq!(*kind, FlashKind::Info);
        assert!(msg.contains("not implemented"));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_view_cycling() {
        let mut app = test_app();
        app.next_view();
        assert_eq!(app.current_view, View::Results);
        app.next_view();
        assert_eq!(app.current_view, View::Input);
        app.next_view();
        assert_eq!(app.current_view, View::Database);
        app.previous_view();
        assert_eq!(app.current_view, View::Input);
    }
}
