mod allocator;
mod app;
mod cli;
mod constants;
mod domain;
mod garden;
mod logging;
mod storage;
mod timer;

use std::io;

use clap::Parser;

use crate::cli::Cli;

fn main() -> Result<(), io::Error> {
    let cli = Cli::parse();

    match cli.command {
        Some(command) => {
            logging::init_stderr_logging();
            cli::run_cli(command);
            Ok(())
        }
        None => {
            logging::init_file_logging();
            app::run_ui()
        }
    }
}
