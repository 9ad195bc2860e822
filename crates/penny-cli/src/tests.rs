//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use penny_core::{Database, ModelRegistry, Trainer};
use tempfile::TempDir;

use crate::commands::{self, truncate};

fn setup_trainer() -> (TempDir, Trainer) {
    let dir = TempDir::new().unwrap();
    let db = Database::in_memory().unwrap();
    let trainer = Trainer::open(db, ModelRegistry::new(dir.path().join("model"))).unwrap();
    (dir, trainer)
}

// ========== Init / Open Tests ==========

#[test]
fn test_cmd_init_bootstraps_model() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("penny.db");
    let model_dir = dir.path().join("model");

    let result = commands::cmd_init(&db_path, Some(&model_dir));
    assert!(result.is_ok());
    assert!(model_dir.join("model.json").exists());
}

#[test]
fn test_open_trainer_is_reopenable() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("penny.db");
    let model_dir = dir.path().join("model");

    let first = commands::open_trainer(&db_path, Some(&model_dir)).unwrap();
    assert_eq!(first.model_info().version, 1);
    drop(first);

    let second = commands::open_trainer(&db_path, Some(&model_dir)).unwrap();
    assert_eq!(second.model_info().version, 1);
}

// ========== Categorize Command Tests ==========

#[test]
fn test_cmd_categorize() {
    let (_dir, trainer) = setup_trainer();
    let result = commands::cmd_categorize(&trainer, "Coffee at Starbucks");
    assert!(result.is_ok());
}

// ========== Corrections Command Tests ==========

#[test]
fn test_cmd_correct_records_correction() {
    let (_dir, trainer) = setup_trainer();

    commands::cmd_correct(&trainer, "PETCO pet supplies", "Pets", None).unwrap();

    let corrections = trainer.database().list_corrections(None, 10, 0).unwrap();
    assert_eq!(corrections.len(), 1);
    assert_eq!(corrections[0].correct_category, "Pets");
    // Auto-detected prediction captured the model's confidence
    assert!(corrections[0].confidence.is_some());
}

#[test]
fn test_cmd_correct_with_explicit_prediction() {
    let (_dir, trainer) = setup_trainer();

    commands::cmd_correct(
        &trainer,
        "PETCO pet supplies",
        "Pets",
        Some("Miscellaneous"),
    )
    .unwrap();

    let corrections = trainer.database().list_corrections(None, 10, 0).unwrap();
    assert_eq!(corrections[0].predicted_category, "Miscellaneous");
    assert!(corrections[0].confidence.is_none());
}

#[test]
fn test_cmd_corrections_list_and_delete() {
    let (_dir, trainer) = setup_trainer();

    commands::cmd_correct(&trainer, "PETCO", "Pets", None).unwrap();
    assert!(commands::cmd_corrections_list(&trainer, None, 20).is_ok());
    assert!(commands::cmd_corrections_list(&trainer, Some("Pets"), 20).is_ok());

    let id = trainer.database().list_corrections(None, 10, 0).unwrap()[0].id;
    commands::cmd_corrections_delete(&trainer, id).unwrap();
    assert!(trainer.database().list_corrections(None, 10, 0).unwrap().is_empty());
}

#[test]
fn test_cmd_corrections_export_to_file() {
    let (dir, trainer) = setup_trainer();

    commands::cmd_correct(&trainer, "PETCO", "Pets", None).unwrap();

    let path = dir.path().join("corrections.csv");
    commands::cmd_corrections_export(&trainer, Some(&path)).unwrap();

    let csv = std::fs::read_to_string(&path).unwrap();
    assert!(csv.starts_with("id,description,"));
    assert!(csv.contains("PETCO"));
}

#[test]
fn test_cmd_corrections_clear() {
    let (_dir, trainer) = setup_trainer();

    commands::cmd_correct(&trainer, "PETCO", "Pets", None).unwrap();
    commands::cmd_corrections_clear(&trainer).unwrap();
    assert_eq!(trainer.database().count_unused_corrections().unwrap(), 0);
}

// ========== Training Command Tests ==========

#[test]
fn test_cmd_retrain_with_corrections() {
    let (_dir, trainer) = setup_trainer();

    commands::cmd_correct(&trainer, "PETCO pet supplies", "Pets", None).unwrap();
    commands::cmd_correct(&trainer, "Chewy dog food", "Pets", None).unwrap();

    commands::cmd_retrain(&trainer, None).unwrap();
    assert_eq!(trainer.model_info().version, 2);
}

#[test]
fn test_cmd_retrain_without_corrections_is_friendly() {
    let (_dir, trainer) = setup_trainer();

    // No corrections pending: reported, not a hard error
    let result = commands::cmd_retrain(&trainer, None);
    assert!(result.is_ok());
    assert_eq!(trainer.model_info().version, 1);
}

#[test]
fn test_cmd_reset() {
    let (_dir, trainer) = setup_trainer();

    commands::cmd_correct(&trainer, "PETCO", "Pets", None).unwrap();
    commands::cmd_retrain(&trainer, None).unwrap();

    commands::cmd_reset(&trainer).unwrap();
    assert_eq!(trainer.model_info().version, 3);
    assert!(!trainer.model_info().categories.contains(&"Pets".to_string()));
}

#[test]
fn test_cmd_stats_and_history() {
    let (_dir, trainer) = setup_trainer();

    assert!(commands::cmd_stats(&trainer).is_ok());
    assert!(commands::cmd_history(&trainer, 20).is_ok());
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("exactly ten", 11), "exactly ten");
    assert_eq!(truncate("a very long description", 10), "a very ...");
}

#[test]
fn test_truncate_multibyte_descriptions() {
    // Cut points must land on character boundaries, not byte offsets
    assert_eq!(truncate(&"Ż".repeat(20), 10), format!("{}...", "Ż".repeat(7)));
    assert_eq!(truncate("ŻABKA WARSZAWA 1234", 10), "ŻABKA W...");
    assert_eq!(truncate("CAFÉ RENÉ", 9), "CAFÉ RENÉ");
}

#[test]
fn test_cmd_corrections_list_multibyte_description() {
    let (_dir, trainer) = setup_trainer();

    commands::cmd_correct(
        &trainer,
        &format!("ŻABKA WARSZAWA {}", "Ż".repeat(40)),
        "Food & Dining",
        None,
    )
    .unwrap();

    assert!(commands::cmd_corrections_list(&trainer, None, 20).is_ok());
}
