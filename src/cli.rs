use std::{io, path::PathBuf};

use chrono::{DateTime, Utc};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{GRID_SIDE, PLOTS_PER_FIELD},
    domain::{Category, Plot, Record, classify, grid_position},
    garden::format_clock,
    storage::{self, JsonFileStore, RecordStore},
};

#[derive(Parser, Debug)]
#[command(name = "thriving")]
#[command(about = "Grow a garden out of the time you spend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "Print the garden, field by field")]
    Report,

    #[command(about = "Export planted sessions")]
    Export {
        #[arg(long, value_enum, help = "Export format")]
        format: ExportFormat,

        #[arg(long, short, help = "Output path")]
        out: Option<PathBuf>,
    },

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(help = "Shell type (bash, zsh, fish)")]
        shell: String,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlantingExport {
    pub field: usize,
    pub slot: usize,
    pub row: usize,
    pub col: usize,
    pub category_id: u8,
    pub category_name: String,
    pub elapsed_seconds: u64,
    pub stage: u8,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataExport {
    pub schema_version: u32,
    pub exported_at: DateTime<Utc>,
    pub owner: String,
    pub field_count: usize,
    pub plantings: Vec<PlantingExport>,
}

pub fn planting_rows(record: &Record) -> Vec<PlantingExport> {
    record
        .plantings()
        .map(|(at, planting)| {
            let (row, col) = grid_position(at.slot);
            PlantingExport {
                field: at.field + 1,
                slot: at.slot,
                row,
                col,
                category_id: planting.category.id(),
                category_name: planting.category.name().to_string(),
                elapsed_seconds: planting.elapsed_secs,
                stage: classify(planting.category, planting.elapsed_secs).number(),
                label: planting.label.clone(),
            }
        })
        .collect()
}

pub fn render_report(record: &Record) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}'s garden ({} field(s))\n",
        record.owner_name,
        record.fields.len()
    ));

    for (index, field) in record.fields.iter().enumerate() {
        out.push_str(&format!(
            "\nField {} [{}/{}]\n",
            index + 1,
            field.planted_count(),
            PLOTS_PER_FIELD
        ));
        for row in &field.plots.iter().chunks(GRID_SIDE) {
            let cells = row
                .map(|plot| match plot {
                    Plot::Empty => format!("{:<24}", "."),
                    Plot::Planted(p) => format!(
                        "{:<24}",
                        format!("{} {}", p.label, format_clock(p.elapsed_secs))
                    ),
                })
                .join(" | ");
            out.push_str(&format!("  {}\n", cells.trim_end()));
        }
    }

    out.push_str(&format!("\n{}\n", "-".repeat(40)));
    for category in Category::ALL {
        out.push_str(&format!(
            "{:20} {}\n",
            category.name(),
            format_clock(record.total_secs_for(category))
        ));
    }
    out
}

pub fn report() -> Result<(), String> {
    let record = JsonFileStore::open_default().load();
    print!("{}", render_report(&record));
    Ok(())
}

pub fn export_data(format: ExportFormat, out_path: Option<PathBuf>) -> Result<(), String> {
    let record = JsonFileStore::open_default().load();
    let rows = planting_rows(&record);

    let content = match format {
        ExportFormat::Json => {
            let export = DataExport {
                schema_version: 1,
                exported_at: Utc::now(),
                owner: record.owner_name.clone(),
                field_count: record.fields.len(),
                plantings: rows,
            };
            serde_json::to_string_pretty(&export).map_err(|e| e.to_string())?
        }
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for row in &rows {
                writer.serialize(row).map_err(|e| e.to_string())?;
            }
            let bytes = writer.into_inner().map_err(|e| e.to_string())?;
            String::from_utf8(bytes).map_err(|e| e.to_string())?
        }
    };

    if let Some(path) = out_path {
        storage::atomic_write(&path, &content).map_err(|e| e.to_string())?;
        println!("Exported to {}", path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

pub fn print_completions(shell: &str) -> Result<(), String> {
    use clap_complete::Shell;
    let shell = match shell {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        _ => {
            return Err(format!(
                "Unsupported shell: {}. Use bash, zsh, or fish.",
                shell
            ));
        }
    };
    clap_complete::generate(shell, &mut Cli::command(), "thriving", &mut io::stdout());
    Ok(())
}

pub fn run_cli(command: Command) {
    let result = match command {
        Command::Report => report(),
        Command::Export { format, out } => export_data(format, out),
        Command::Completions { shell } => print_completions(&shell),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
