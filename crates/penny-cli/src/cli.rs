//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Penny - Track spending with a categorizer that learns from you
#[derive(Parser)]
#[command(name = "penny")]
#[command(about = "Personal finance tracker with a self-improving expense categorizer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "penny.db", global = true)]
    pub db: PathBuf,

    /// Model artifact directory (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub model_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and train the initial model
    Init,

    /// Categorize an expense description
    Categorize {
        /// Expense description, e.g. "STARBUCKS #1234"
        description: String,
    },

    /// Correct a wrong prediction (teaches the next retrain)
    Correct {
        /// Expense description the model got wrong
        description: String,

        /// The category it should have been
        category: String,

        /// What the model predicted (looked up automatically if omitted)
        #[arg(long)]
        predicted: Option<String>,
    },

    /// Manage the correction log
    Corrections {
        #[command(subcommand)]
        action: Option<CorrectionsAction>,
    },

    /// Retrain the model with pending corrections
    Retrain {
        /// Maximum corrections to fold in this run
        #[arg(long)]
        max: Option<i64>,
    },

    /// Reset the model to the built-in baseline (keeps the correction log)
    Reset,

    /// Show model, correction, and training statistics
    Stats,

    /// Show the training history
    History {
        /// Number of events to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },
}

#[derive(Subcommand)]
pub enum CorrectionsAction {
    /// List corrections, newest first
    List {
        /// Number of corrections to show
        #[arg(short, long, default_value = "20")]
        limit: i64,

        /// Only show corrections for this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete a correction by ID
    Delete {
        /// Correction ID
        id: i64,
    },

    /// Export the correction log as CSV
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete every correction (the model is unaffected until a reset or retrain)
    Clear,
}
