//! Prediction command implementations

use anyhow::Result;
use penny_core::Trainer;

pub fn cmd_categorize(trainer: &Trainer, description: &str) -> Result<()> {
    let prediction = trainer.categorize(description);

    println!();
    println!("  {}", description);
    println!(
        "  → {} ({:.0}% confident)",
        prediction.category,
        prediction.confidence * 100.0
    );

    if prediction.confidence < 0.4 {
        println!();
        println!(
            "  💡 Low confidence. If this is wrong: penny correct \"{}\" \"<category>\"",
            description
        );
    }

    Ok(())
}
