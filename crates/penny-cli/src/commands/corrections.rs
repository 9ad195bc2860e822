//! Correction log command implementations

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use penny_core::{NewCorrection, Trainer};

use super::truncate;

pub fn cmd_correct(
    trainer: &Trainer,
    description: &str,
    category: &str,
    predicted: Option<&str>,
) -> Result<()> {
    // When the caller doesn't say what the model predicted, ask it
    let (predicted_category, confidence) = match predicted {
        Some(p) => (p.to_string(), None),
        None => {
            let prediction = trainer.categorize(description);
            (prediction.category, Some(prediction.confidence))
        }
    };

    if predicted_category == category {
        println!(
            "ℹ️  The model already predicts \"{}\" for this description.",
            category
        );
        println!("   Recording the correction anyway; it will reinforce the next retrain.");
    }

    let id = trainer.submit_correction(&NewCorrection {
        description: description.to_string(),
        predicted_category: predicted_category.clone(),
        correct_category: category.to_string(),
        confidence,
    })?;

    println!("✅ Correction #{} recorded: {} → {}", id, predicted_category, category);
    println!("   It takes effect at the next retrain: penny retrain");

    Ok(())
}

pub fn cmd_corrections_list(
    trainer: &Trainer,
    category: Option<&str>,
    limit: i64,
) -> Result<()> {
    let corrections = trainer.database().list_corrections(category, limit, 0)?;

    if corrections.is_empty() {
        println!("No corrections recorded yet.");
        return Ok(());
    }

    println!();
    println!(
        "  {:>5}  {:<34} {:<18} {:<18} {}",
        "ID", "Description", "Predicted", "Corrected", "Status"
    );
    println!("  {}", "─".repeat(90));

    for c in &corrections {
        let status = match c.applied_in_version {
            Some(version) => format!("applied in v{}", version),
            None => "pending".to_string(),
        };
        println!(
            "  {:>5}  {:<34} {:<18} {:<18} {}",
            c.id,
            truncate(&c.description, 34),
            truncate(&c.predicted_category, 18),
            truncate(&c.correct_category, 18),
            status
        );
    }

    let pending = trainer.database().count_unused_corrections()?;
    println!();
    println!("  {} shown, {} pending retrain", corrections.len(), pending);

    Ok(())
}

pub fn cmd_corrections_delete(trainer: &Trainer, id: i64) -> Result<()> {
    trainer.delete_correction(id)?;
    println!("🗑️  Correction #{} deleted.", id);
    println!("   An already-applied correction stays in the model until the next retrain.");
    Ok(())
}

pub fn cmd_corrections_export(trainer: &Trainer, output: Option<&Path>) -> Result<()> {
    let csv = trainer.database().export_corrections_csv()?;

    match output {
        Some(path) => {
            fs::write(path, &csv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            // Subtract the header line
            let rows = csv.lines().count().saturating_sub(1);
            println!("✅ Exported {} corrections to {}", rows, path.display());
        }
        None => print!("{}", csv),
    }

    Ok(())
}

pub fn cmd_corrections_clear(trainer: &Trainer) -> Result<()> {
    let deleted = trainer.database().clear_corrections()?;
    println!("🗑️  Cleared {} corrections.", deleted);
    println!("   The current model is unchanged; run penny reset to forget what it learned.");
    Ok(())
}
