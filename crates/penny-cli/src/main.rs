//! Penny CLI - Personal finance tracker with a self-improving categorizer
//!
//! Usage:
//!   penny init                               Initialize database and model
//!   penny categorize "STARBUCKS #1234"       Predict a category
//!   penny correct "STARBUCKS" "Food & Dining"  Record a correction
//!   penny retrain                            Fold corrections into the model

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let model_dir = cli.model_dir.as_deref();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, model_dir),
        Commands::Categorize { description } => {
            let trainer = commands::open_trainer(&cli.db, model_dir)?;
            commands::cmd_categorize(&trainer, &description)
        }
        Commands::Correct {
            description,
            category,
            predicted,
        } => {
            let trainer = commands::open_trainer(&cli.db, model_dir)?;
            commands::cmd_correct(&trainer, &description, &category, predicted.as_deref())
        }
        Commands::Corrections { action } => {
            let trainer = commands::open_trainer(&cli.db, model_dir)?;
            match action {
                None => commands::cmd_corrections_list(&trainer, None, 20),
                Some(CorrectionsAction::List { limit, category }) => {
                    commands::cmd_corrections_list(&trainer, category.as_deref(), limit)
                }
                Some(CorrectionsAction::Delete { id }) => {
                    commands::cmd_corrections_delete(&trainer, id)
                }
                Some(CorrectionsAction::Export { output }) => {
                    commands::cmd_corrections_export(&trainer, output.as_deref())
                }
                Some(CorrectionsAction::Clear) => commands::cmd_corrections_clear(&trainer),
            }
        }
        Commands::Retrain { max } => {
            let trainer = commands::open_trainer(&cli.db, model_dir)?;
            commands::cmd_retrain(&trainer, max)
        }
        Commands::Reset => {
            let trainer = commands::open_trainer(&cli.db, model_dir)?;
            commands::cmd_reset(&trainer)
        }
        Commands::Stats => {
            let trainer = commands::open_trainer(&cli.db, model_dir)?;
            commands::cmd_stats(&trainer)
        }
        Commands::History { limit } => {
            let trainer = commands::open_trainer(&cli.db, model_dir)?;
            commands::cmd_history(&trainer, limit)
        }
    }
}
