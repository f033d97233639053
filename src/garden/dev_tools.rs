use std::time::{Duration, Instant};

use chrono::Local;
use log::{info, warn};

use crate::{
    constants::TIME_SETTINGS,
    domain::Record,
    storage::{self, RecordStore},
};

use super::Garden;

impl<S: RecordStore> Garden<S> {
    // Nothing is reset if the copy fails.
    pub(super) fn backup_and_reset(&mut self, now: Instant) {
        let name = storage::backup_file_name(Local::now());
        let name = match self.store.save_as(&self.record, &name) {
            Ok(path) => {
                info!("Backed up garden to {}", path.display());
                path.file_name()
                    .map(|file| file.to_string_lossy().into_owned())
                    .unwrap_or(name)
            }
            Err(e) => {
                self.report_save_error(e);
                return;
            }
        };

        self.reset_session();
        self.record = Record::new();
        self.viewed_field = 0;
        if self.persist() {
            self.warn(now, format!("Backed up to {} and reset", name));
        }
    }

    pub(super) fn add_time(&mut self, now: Instant) {
        let delta = Duration::from_secs(TIME_SETTINGS.add_time_secs);
        match self.timer.shift_start(delta) {
            Ok(()) => info!("Shifted running session by {}s", delta.as_secs()),
            Err(e) => {
                warn!("Add time rejected: {}", e);
                self.warn(now, "Start the timer before adding time");
            }
        }
    }
}
