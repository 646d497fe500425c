mod form;

use std::{path::PathBuf, time::Duration};

use crossterm::event::{self, Event};
use engine::{
    EngineError, ExportFormat, JsonFileStore, Record, RecordId, Store, SyncStatus, Tracker,
    export,
};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui::{self, keymap::AppAction},
};

pub use form::{EditTarget, FormField, FormState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
}

#[derive(Debug)]
pub struct AppState {
    pub mode: Mode,
    pub form: FormState,
    /// Index into the display-ordered records.
    pub selected: usize,
    pub toast: Option<ToastState>,
    pub export_dir: PathBuf,
}

pub struct App<S: Store> {
    tracker: Tracker<S>,
    pub state: AppState,
    should_quit: bool,
}

impl App<JsonFileStore> {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let tracker = Tracker::builder(JsonFileStore::new(&config.data_path))
            .date_format(config.date_format()?)
            .order(config.order)
            .build();
        tracing::info!(
            "loaded {} records from {}",
            tracker.len(),
            config.data_path.display()
        );
        Ok(Self::new(tracker, config.export_dir.clone()))
    }
}

impl<S: Store> App<S> {
    pub fn new(tracker: Tracker<S>, export_dir: PathBuf) -> Self {
        Self {
            tracker,
            state: AppState {
                mode: Mode::Browse,
                form: FormState::new_entry(),
                selected: 0,
                toast: None,
                export_dir,
            },
            should_quit: false,
        }
    }

    pub fn tracker(&self) -> &Tracker<S> {
        &self.tracker
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        ui::restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, self))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_action(ui::keymap::map_key(key));
            }
        }

        Ok(())
    }

    pub fn handle_action(&mut self, action: AppAction) {
        if action == AppAction::None {
            return;
        }
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }
        match self.state.mode {
            Mode::Browse => self.handle_browse(action),
            Mode::Form => self.handle_form(action),
        }
    }

    fn handle_browse(&mut self, action: AppAction) {
        self.state.toast = None;
        match action {
            AppAction::Up => self.select_prev(),
            AppAction::Down => self.select_next(),
            AppAction::Submit => self.open_edit_form(),
            AppAction::Delete => self.delete_selected(),
            AppAction::Input(ch) => match ch {
                'q' | 'Q' => self.should_quit = true,
                'k' | 'K' => self.select_prev(),
                'j' | 'J' => self.select_next(),
                'n' | 'N' | 'a' | 'A' => self.open_new_form(),
                'e' | 'E' => self.open_edit_form(),
                'd' | 'D' => self.delete_selected(),
                'o' | 'O' => self.toggle_order(),
                'x' | 'X' => self.export(ExportFormat::Json),
                'c' | 'C' => self.export(ExportFormat::Csv),
                _ => {}
            },
            _ => {}
        }
    }

    fn handle_form(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.cancel_form(),
            AppAction::Submit => self.submit_form(),
            AppAction::NextField | AppAction::Down => self.state.form.next_field(),
            AppAction::PrevField | AppAction::Up => self.state.form.prev_field(),
            AppAction::Backspace => self.state.form.backspace(),
            AppAction::Input(ch) => self.state.form.input(ch),
            _ => {}
        }
    }

    /// Records in the current display order.
    pub fn visible_records(&self) -> Vec<&Record> {
        self.tracker.ordered()
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.visible_records().get(self.state.selected).copied()
    }

    fn select_next(&mut self) {
        let len = self.tracker.len();
        if len == 0 {
            return;
        }
        self.state.selected = (self.state.selected + 1).min(len - 1);
    }

    fn select_prev(&mut self) {
        self.state.selected = self.state.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.tracker.len();
        self.state.selected = self.state.selected.min(len.saturating_sub(1));
    }

    fn select_id(&mut self, id: RecordId) {
        let index = self.visible_records().iter().position(|r| r.id() == id);
        if let Some(index) = index {
            self.state.selected = index;
        }
    }

    fn open_new_form(&mut self) {
        self.tracker.cancel_edit();
        self.state.form = FormState::new_entry();
        self.state.mode = Mode::Form;
    }

    fn open_edit_form(&mut self) {
        let Some(id) = self.selected_record().map(Record::id) else {
            return;
        };
        match self.tracker.begin_edit(id) {
            Ok(record) => {
                self.state.form = FormState::for_record(record);
                self.state.mode = Mode::Form;
            }
            Err(err) => {
                tracing::warn!("cannot edit record {id}: {err}");
                self.toast(ToastLevel::Error, "Cannot edit: entry not found.");
            }
        }
    }

    fn cancel_form(&mut self) {
        self.tracker.cancel_edit();
        self.state.form = FormState::new_entry();
        self.state.mode = Mode::Browse;
    }

    fn submit_form(&mut self) {
        let form = &self.state.form;
        let result = self.tracker.submit_entry(
            form.value(FormField::Coffee),
            form.value(FormField::Books),
            form.value(FormField::Trips),
        );

        match result {
            Ok(ack) => {
                self.state.form = FormState::new_entry();
                self.state.mode = Mode::Browse;
                self.select_id(ack.id);
                match &ack.sync {
                    SyncStatus::Saved => self.toast(ToastLevel::Success, ack.message()),
                    SyncStatus::Failed(err) => self.toast(
                        ToastLevel::Error,
                        format!("{} Not saved to disk: {err}", ack.message()),
                    ),
                }
            }
            Err(err) => {
                let message = if err.is_validation() {
                    format!("Please fix the values. {err}")
                } else {
                    err.to_string()
                };
                self.state.form.error = Some(message.clone());
                self.toast(ToastLevel::Error, message);
            }
        }
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected_record().map(Record::id) else {
            return;
        };
        let ack = self.tracker.delete_entry(id);
        self.clamp_selection();
        match &ack.sync {
            SyncStatus::Saved => self.toast(ToastLevel::Success, ack.message()),
            SyncStatus::Failed(err) => self.toast(
                ToastLevel::Error,
                format!("{} Not saved to disk: {err}", ack.message()),
            ),
        }
    }

    fn toggle_order(&mut self) {
        let selected = self.selected_record().map(Record::id);
        self.tracker.set_order(self.tracker.order().toggled());
        if let Some(id) = selected {
            self.select_id(id);
        }
    }

    fn export(&mut self, format: ExportFormat) {
        let target = self.state.export_dir.join(format.default_file_name());
        match export::export_to_path(self.tracker.records(), format, &target) {
            Ok(path) => self.toast(
                ToastLevel::Success,
                format!("Exported to {}", path.display()),
            ),
            Err(EngineError::NothingToExport) => {
                self.toast(ToastLevel::Info, "Nothing to export.");
            }
            Err(err) => {
                tracing::error!("export failed: {err}");
                self.toast(ToastLevel::Error, format!("Export failed: {err}"));
            }
        }
    }

    fn toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.state.toast = Some(ToastState {
            message: message.into(),
            level,
        });
    }
}
