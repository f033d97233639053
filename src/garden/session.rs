use std::time::Instant;

use log::{error, info, warn};

use crate::{
    allocator,
    constants::LABELS,
    domain::Planting,
    storage::{RecordStore, StoreError},
};

use super::{Garden, Screen};

impl<S: RecordStore> Garden<S> {
    pub(super) fn start_session(&mut self, now: Instant) {
        let Some(category) = self.selected else {
            self.warn(now, "Pick a plant before starting the timer");
            return;
        };

        self.viewed_field = self.record.last_field_index();
        let at = match allocator::ensure_writable_field(&mut self.record, &self.store) {
            Ok(at) => at,
            Err(e) => {
                self.viewed_field = self.record.last_field_index();
                self.report_save_error(e);
                return;
            }
        };

        if let Err(e) = self.timer.start(now) {
            error!("Could not start timer: {}", e);
            return;
        }

        self.viewed_field = at.field;
        self.reserved = Some(at.slot);
        info!(
            "Started {} session in field {} plot {}",
            category.name(),
            at.field,
            at.slot
        );
    }

    pub(super) fn stop_session(&mut self, now: Instant) {
        match self.timer.stop(now) {
            Ok(elapsed) => {
                info!("Stopped session after {}s, waiting for a name", elapsed);
                self.name_entry.clear();
                self.screen = Screen::NameInput;
            }
            Err(e) => error!("Could not stop timer: {}", e),
        }
    }

    // Session state is reset whether or not the write happened. True only
    // when the plot was written and saved.
    pub(super) fn commit_session(&mut self, label: &str) -> bool {
        let elapsed = self.timer.commit();
        let written = match (self.selected, self.reserved, elapsed) {
            (Some(category), Some(slot), Ok(elapsed_secs)) => {
                let planting = Planting {
                    category,
                    elapsed_secs: elapsed_secs.max(1),
                    label: resolve_label(label),
                };
                self.plant(slot, planting)
            }
            (category, slot, elapsed) => {
                error!(
                    "Commit without a pending session (category {:?}, slot {:?}, timer {:?})",
                    category, slot, elapsed
                );
                false
            }
        };

        self.reset_session();
        written
    }

    fn plant(&mut self, slot: usize, planting: Planting) -> bool {
        let field_index = self.record.last_field_index();
        let Some(field) = self.record.last_field_mut() else {
            error!("Record has no field to plant into");
            return false;
        };

        let summary = format!(
            "{} '{}' ({}s)",
            planting.category.name(),
            planting.label,
            planting.elapsed_secs
        );
        if let Err(e) = field.plant(slot, planting) {
            error!("Commit aborted in field {}: {}", field_index, e);
            return false;
        }

        info!("Planted {} in field {} plot {}", summary, field_index, slot);
        self.persist()
    }

    // A session already waiting for its name is committed with its frozen
    // time.
    fn force_commit(&mut self, now: Instant, label: &str) -> bool {
        if self.timer.is_running() {
            if let Err(e) = self.timer.stop(now) {
                error!("Could not stop timer: {}", e);
            }
        }
        self.timer.is_paused() && self.commit_session(label)
    }

    pub(super) fn leave_to_home(&mut self, now: Instant) {
        self.force_commit(now, LABELS.home_commit);
        self.selected = None;
        self.screen = Screen::Home;
    }

    pub(super) fn shutdown(&mut self, now: Instant) {
        if !self.force_commit(now, LABELS.quit_commit) {
            self.persist();
        }
        if let Some(e) = &self.save_error {
            warn!("Exiting with unsaved changes: {}", e);
        }
    }

    pub(super) fn reset_session(&mut self) {
        self.timer.reset();
        self.selected = None;
        self.reserved = None;
        self.name_entry.clear();
    }

    pub(super) fn persist(&mut self) -> bool {
        match self.store.save(&self.record) {
            Ok(()) => {
                self.save_error = None;
                true
            }
            Err(e) => {
                self.report_save_error(e);
                false
            }
        }
    }

    pub(super) fn report_save_error(&mut self, e: StoreError) {
        error!("Save failed: {}", e);
        self.save_error = Some(format!("Garden not saved: {}", e));
    }
}

fn resolve_label(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return LABELS.home_commit.to_string();
    }
    trimmed.chars().take(LABELS.max_label_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::resolve_label;

    #[test]
    fn test_resolve_label_trims_and_defaults() {
        assert_eq!(resolve_label("  focus  "), "focus");
        assert_eq!(resolve_label(""), "Event");
        assert_eq!(resolve_label("\t"), "Event");
        assert_eq!(resolve_label(&"x".repeat(80)).chars().count(), 48);
    }
}
