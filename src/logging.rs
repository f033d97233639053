use std::fs::OpenOptions;

use env_logger::{Builder, Env, Target};

use crate::{constants::FILE_NAMES, storage};

pub fn init_file_logging() {
    let path = storage::get_state_dir().join(FILE_NAMES.log);
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: Could not open log file {}: {}", path.display(), e);
            return;
        }
    };

    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init();
}

pub fn init_stderr_logging() {
    let _ = Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .try_init();
}
