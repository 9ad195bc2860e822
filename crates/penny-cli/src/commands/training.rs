//! Retrain, reset, and statistics command implementations

use anyhow::Result;
use penny_core::{Error, Trainer};

pub fn cmd_retrain(trainer: &Trainer, max: Option<i64>) -> Result<()> {
    println!("🧠 Retraining model...");

    match trainer.retrain(max) {
        Ok(outcome) => {
            println!(
                "✅ Model v{} trained on {} examples ({} corrections applied, {:.0}% accuracy)",
                outcome.version,
                outcome.examples,
                outcome.corrections_applied,
                outcome.accuracy * 100.0
            );
            Ok(())
        }
        Err(Error::Training(message)) => {
            println!("⚠️  {}", message);
            println!("   Record corrections first: penny correct \"<description>\" \"<category>\"");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn cmd_reset(trainer: &Trainer) -> Result<()> {
    println!("♻️  Resetting model to the built-in baseline...");

    let outcome = trainer.reset()?;
    println!(
        "✅ Model v{} reset ({} seed examples, {:.0}% accuracy)",
        outcome.version,
        outcome.examples,
        outcome.accuracy * 100.0
    );
    println!("   Corrections were kept and will re-apply at the next retrain.");

    Ok(())
}

pub fn cmd_stats(trainer: &Trainer) -> Result<()> {
    let stats = trainer.stats()?;

    println!();
    println!("📊 Penny Categorizer");
    println!("   ─────────────────────────────────────────────");
    println!("   Model version:     v{}", stats.model.version);
    println!("   Accuracy:          {:.1}%", stats.model.accuracy * 100.0);
    println!("   Categories:        {}", stats.model.categories.len());
    println!(
        "   Corrections in model: {}",
        stats.model.corrections_applied
    );
    println!();
    println!("   Corrections:       {} total", stats.corrections.total);
    println!("     Applied:         {}", stats.corrections.applied);
    println!("     Pending:         {}", stats.corrections.unused);

    if !stats.corrections.by_category.is_empty() {
        println!();
        println!("   Most corrected categories:");
        for entry in stats.corrections.by_category.iter().take(5) {
            println!(
                "     {:<20} {} ({} pending)",
                entry.category, entry.total, entry.unused
            );
        }
    }

    println!();
    println!("   Training runs:     {}", stats.training.total_events);
    if let Some(last) = stats.training.last_training {
        println!("   Last training:     {}", last.format("%Y-%m-%d %H:%M UTC"));
    }
    println!();

    Ok(())
}

pub fn cmd_history(trainer: &Trainer, limit: i64) -> Result<()> {
    let events = trainer.database().list_training_events(limit)?;

    if events.is_empty() {
        println!("No training runs recorded yet.");
        return Ok(());
    }

    println!();
    println!(
        "  {:>4}  {:<8} {:>9} {:>12} {:>9}  {}",
        "Ver", "Kind", "Accuracy", "Corrections", "Examples", "When"
    );
    println!("  {}", "─".repeat(70));

    for event in &events {
        println!(
            "  {:>4}  {:<8} {:>8.1}% {:>12} {:>9}  {}",
            format!("v{}", event.version),
            event.kind.as_str(),
            event.accuracy * 100.0,
            event.corrections_applied,
            event.examples,
            event.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    println!();

    Ok(())
}
