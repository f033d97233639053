use std::time::{Duration, Instant};

use log::{debug, info};

use crate::{
    constants::TIME_SETTINGS,
    domain::{Category, Record},
    storage::RecordStore,
    timer::SessionTimer,
};

mod dev_tools;
mod name_entry;
mod session;
mod view;

use name_entry::NameEntry;
pub use view::{FrameView, PlotView, format_clock};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    EnterGarden,
    SelectCategory(Category),
    StartStop,
    PrevPage,
    NextPage,
    Home,
    ToggleDevOverlay,
    BackupAndReset,
    AddFifteenMinutes,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextKey {
    Char(char),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Press(Control),
    Key(TextKey),
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Home,
    Garden { dev_overlay: bool },
    NameInput,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning {
    pub text: String,
    pub expires_at: Instant,
}

pub struct Garden<S: RecordStore> {
    store: S,
    record: Record,
    screen: Screen,
    timer: SessionTimer,
    selected: Option<Category>,
    // Slot in the last field held for the running or unnamed session.
    reserved: Option<usize>,
    viewed_field: usize,
    name_entry: NameEntry,
    warning: Option<Warning>,
    save_error: Option<String>,
}

impl<S: RecordStore> Garden<S> {
    pub fn new(store: S) -> Self {
        let record = store.load();
        let viewed_field = record.last_field_index();
        info!(
            "Loaded garden of {} with {} field(s)",
            record.owner_name,
            record.fields.len()
        );

        Self {
            store,
            record,
            screen: Screen::Home,
            timer: SessionTimer::new(),
            selected: None,
            reserved: None,
            viewed_field,
            name_entry: NameEntry::new(),
            warning: None,
            save_error: None,
        }
    }

    pub fn handle(&mut self, input: Input, now: Instant) -> Flow {
        self.expire_warning(now);

        match input {
            Input::Quit => {
                self.shutdown(now);
                Flow::Exit
            }
            Input::Press(control) => {
                self.press(control, now);
                Flow::Continue
            }
            Input::Key(key) => {
                self.type_key(key);
                Flow::Continue
            }
        }
    }

    fn press(&mut self, control: Control, now: Instant) {
        match (self.screen, control) {
            (Screen::Home, Control::EnterGarden) => {
                self.viewed_field = self.record.last_field_index();
                self.screen = Screen::Garden { dev_overlay: false };
            }
            (Screen::Garden { .. }, Control::SelectCategory(category)) => {
                debug!("Selected {}", category.name());
                self.selected = Some(category);
            }
            (Screen::Garden { .. }, Control::StartStop) => {
                if self.timer.is_running() {
                    self.stop_session(now);
                } else {
                    self.start_session(now);
                }
            }
            (Screen::Garden { .. }, Control::PrevPage) => {
                self.viewed_field = self.viewed_field.saturating_sub(1);
            }
            (Screen::Garden { .. }, Control::NextPage) => {
                self.viewed_field = (self.viewed_field + 1).min(self.record.last_field_index());
            }
            (Screen::Garden { .. }, Control::Home) => self.leave_to_home(now),
            (Screen::Garden { dev_overlay }, Control::ToggleDevOverlay) => {
                self.screen = Screen::Garden {
                    dev_overlay: !dev_overlay,
                };
            }
            (Screen::Garden { dev_overlay: true }, Control::BackupAndReset) => {
                self.backup_and_reset(now);
            }
            (Screen::Garden { dev_overlay: true }, Control::AddFifteenMinutes) => {
                self.add_time(now);
            }
            (screen, control) => debug!("Ignored {:?} on {:?}", control, screen),
        }
    }

    fn type_key(&mut self, key: TextKey) {
        if self.screen != Screen::NameInput {
            return;
        }

        match key {
            TextKey::Char(c) => self.name_entry.push(c),
            TextKey::Backspace => self.name_entry.pop(),
            TextKey::Enter => {
                let label = self.name_entry.take();
                self.commit_session(&label);
                self.screen = Screen::Garden { dev_overlay: false };
            }
        }
    }

    fn warn(&mut self, now: Instant, text: impl Into<String>) {
        let text = text.into();
        info!("Warning shown: {}", text);
        self.warning = Some(Warning {
            text,
            expires_at: now + Duration::from_millis(TIME_SETTINGS.warning_ms),
        });
    }

    fn expire_warning(&mut self, now: Instant) {
        if self
            .warning
            .as_ref()
            .is_some_and(|warning| warning.expires_at <= now)
        {
            self.warning = None;
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }
}

#[cfg(test)]
impl<S: RecordStore> Garden<S> {
    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn viewed_field(&self) -> usize {
        self.viewed_field
    }

    pub fn selected(&self) -> Option<Category> {
        self.selected
    }

    pub fn reserved_slot(&self) -> Option<usize> {
        self.reserved
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }
}
