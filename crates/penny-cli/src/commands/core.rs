//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_trainer` - Shared utility to open the database and model
//! - `cmd_init` - Initialize the database and train the initial model

use std::path::Path;

use anyhow::{Context, Result};
use penny_core::{Database, ModelRegistry, Trainer};
use tracing::debug;

/// Open the database and categorization service
///
/// First call on a fresh setup trains and stores the initial model.
pub fn open_trainer(db_path: &Path, model_dir: Option<&Path>) -> Result<Trainer> {
    debug!(path = %db_path.display(), "Opening database");
    let db = Database::new(&db_path.to_string_lossy()).context("Failed to open database")?;

    let registry = match model_dir {
        Some(dir) => ModelRegistry::new(dir),
        None => ModelRegistry::new(ModelRegistry::default_dir()),
    };

    Trainer::open(db, registry).context("Failed to load categorization model")
}

pub fn cmd_init(db_path: &Path, model_dir: Option<&Path>) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let trainer = open_trainer(db_path, model_dir)?;
    let info = trainer.model_info();

    println!(
        "   Model v{} ready ({} categories, {:.0}% accuracy)",
        info.version,
        info.categories.len(),
        info.accuracy * 100.0
    );
    println!("✅ Initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Categorize an expense: penny categorize \"STARBUCKS #1234\"");
    println!("  2. Fix a wrong guess:     penny correct \"STARBUCKS #1234\" \"Food & Dining\"");
    println!("  3. Apply your fixes:      penny retrain");

    Ok(())
}
