//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_trainer) and init
//! - `categorize` - Prediction commands
//! - `corrections` - Correction log commands (correct, list, delete, export, clear)
//! - `training` - Retrain/reset/stats/history commands

pub mod categorize;
pub mod core;
pub mod corrections;
pub mod training;

// Re-export command functions for main.rs
pub use categorize::*;
pub use core::*;
pub use corrections::*;
pub use training::*;

/// Truncate a string to a maximum number of characters, adding "..." if
/// truncated
///
/// Counts characters rather than bytes so multi-byte descriptions never
/// get sliced mid-character.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
