//! Categorization service: prediction, corrections, and the retrain cycle
//!
//! [`Trainer`] owns the live model and coordinates everything around it.
//! Reads (categorize, stats) take a shared lock on the current model and
//! never block each other. A retrain builds the replacement off to the side
//! and swaps it in atomically at the end, so predictions made during a
//! retrain are served consistently by the outgoing model.

use std::sync::{Arc, Mutex, RwLock, TryLockError};

use chrono::Utc;
use tracing::{info, warn};

use crate::classifier::{Example, TrainedModel};
use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{
    CategorizerStats, ModelInfo, NewCorrection, Prediction, RetrainOutcome, TrainingEventKind,
};
use crate::registry::{ModelArtifact, ModelRegistry};
use crate::seed;
use crate::text::TextProcessor;

/// Corrections folded in per retrain unless the caller asks for fewer.
pub const DEFAULT_MAX_CORRECTIONS: i64 = 500;

/// Floor below which a training set is rejected outright.
const MIN_TRAINING_EXAMPLES: usize = 10;
const MIN_CATEGORIES: usize = 2;

pub struct Trainer {
    db: Database,
    registry: ModelRegistry,
    processor: TextProcessor,
    current: RwLock<Arc<ModelArtifact>>,
    /// Held for the duration of a retrain or reset. `try_lock` failure means
    /// another training run is in flight.
    training: Mutex<()>,
}

impl Trainer {
    /// Open the service, loading the stored model or training a fresh one
    ///
    /// When no usable artifact exists (first run, or the file is corrupt)
    /// this trains a seed-only model and persists it before returning, so a
    /// successfully opened `Trainer` can always categorize.
    pub fn open(db: Database, registry: ModelRegistry) -> Result<Self> {
        let processor = TextProcessor::new();

        let artifact = match registry.load()? {
            Some(artifact) => artifact,
            None => {
                info!("No model artifact found, training initial model");
                let examples = seed::seed_examples();
                let (model, accuracy) = TrainedModel::train_and_evaluate(&processor, &examples)?;

                let version = db.latest_model_version()? + 1;
                let artifact = ModelArtifact {
                    version,
                    accuracy,
                    corrections_applied: 0,
                    created_at: Utc::now(),
                    model,
                };

                registry.save(&artifact)?;
                db.record_training_event(
                    version,
                    TrainingEventKind::Initial,
                    accuracy,
                    0,
                    examples.len() as i64,
                )?;

                artifact
            }
        };

        Ok(Self {
            db,
            registry,
            processor,
            current: RwLock::new(Arc::new(artifact)),
            training: Mutex::new(()),
        })
    }

    fn snapshot(&self) -> Arc<ModelArtifact> {
        // A poisoned lock only means a panic elsewhere; the Arc inside is
        // still a complete artifact, so keep serving it.
        let guard = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    fn install(&self, artifact: ModelArtifact) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(artifact);
    }

    /// Predict a category for one expense description
    pub fn categorize(&self, description: &str) -> Prediction {
        self.snapshot().model.predict(&self.processor, description)
    }

    /// Predict categories for a batch of descriptions
    ///
    /// The whole batch is served by one model snapshot, even if a retrain
    /// completes midway through.
    pub fn categorize_batch(&self, descriptions: &[String]) -> Vec<Prediction> {
        self.snapshot()
            .model
            .predict_batch(&self.processor, descriptions)
    }

    /// Record a user correction for a wrong prediction
    ///
    /// The category does not have to exist in the current model: corrections
    /// are how new categories get taught, and they take effect at the next
    /// retrain.
    pub fn submit_correction(&self, correction: &NewCorrection) -> Result<i64> {
        if correction.description.trim().is_empty() {
            return Err(Error::InvalidData(
                "correction description cannot be empty".to_string(),
            ));
        }
        if correction.correct_category.trim().is_empty() {
            return Err(Error::InvalidData(
                "correction category cannot be empty".to_string(),
            ));
        }

        let id = self.db.create_correction(correction)?;
        info!(
            id,
            category = %correction.correct_category,
            "Correction recorded"
        );
        Ok(id)
    }

    /// Retrain the model, folding in up to `max_corrections` new corrections
    ///
    /// The training set is the seed data, every previously applied
    /// correction, and the oldest unapplied corrections up to the cap. On
    /// any failure the stored artifact, the live model, and every
    /// correction's applied flag are left exactly as they were.
    pub fn retrain(&self, max_corrections: Option<i64>) -> Result<RetrainOutcome> {
        let _guard = self.acquire_training_slot()?;

        let cap = max_corrections.unwrap_or(DEFAULT_MAX_CORRECTIONS);
        if cap <= 0 {
            return Err(Error::InvalidData(
                "max_corrections must be positive".to_string(),
            ));
        }

        let batch = self.db.list_unused_corrections(cap)?;
        if batch.is_empty() {
            return Err(Error::Training(
                "no unapplied corrections to train on".to_string(),
            ));
        }

        let applied = self.db.list_applied_corrections()?;

        let mut examples = seed::seed_examples();
        examples.extend(
            applied
                .iter()
                .chain(batch.iter())
                .map(|c| (c.description.clone(), c.correct_category.clone())),
        );
        check_training_set(&examples)?;

        info!(
            corrections = batch.len(),
            examples = examples.len(),
            "Retraining model"
        );
        let (model, accuracy) = TrainedModel::train_and_evaluate(&self.processor, &examples)?;

        let version = self.db.latest_model_version()? + 1;
        let artifact = ModelArtifact {
            version,
            accuracy,
            corrections_applied: (applied.len() + batch.len()) as i64,
            created_at: Utc::now(),
            model,
        };

        // Persist before touching any correction flags. If the save fails
        // the whole run fails and nothing is half-applied.
        self.registry.save(&artifact)?;

        let batch_ids: Vec<i64> = batch.iter().map(|c| c.id).collect();
        self.db.mark_corrections_applied(&batch_ids, version)?;
        self.db.record_training_event(
            version,
            TrainingEventKind::Retrain,
            accuracy,
            batch.len() as i64,
            examples.len() as i64,
        )?;

        self.install(artifact);
        info!(version, accuracy, "Retrain complete");

        Ok(RetrainOutcome {
            version,
            accuracy,
            corrections_applied: batch.len() as i64,
            examples: examples.len() as i64,
        })
    }

    /// Throw away all learned corrections and return to the seed baseline
    ///
    /// The correction log itself is kept; every correction is flagged
    /// unapplied again, so a later retrain can re-teach the model.
    pub fn reset(&self) -> Result<RetrainOutcome> {
        let _guard = self.acquire_training_slot()?;

        let examples = seed::seed_examples();
        let (model, accuracy) = TrainedModel::train_and_evaluate(&self.processor, &examples)?;

        let version = self.db.latest_model_version()? + 1;
        let artifact = ModelArtifact {
            version,
            accuracy,
            corrections_applied: 0,
            created_at: Utc::now(),
            model,
        };

        self.registry.save(&artifact)?;

        let released = self.db.reset_correction_flags()?;
        if released > 0 {
            warn!(released, "Corrections unapplied by model reset");
        }
        self.db.record_training_event(
            version,
            TrainingEventKind::Reset,
            accuracy,
            0,
            examples.len() as i64,
        )?;

        self.install(artifact);
        info!(version, "Model reset to seed baseline");

        Ok(RetrainOutcome {
            version,
            accuracy,
            corrections_applied: 0,
            examples: examples.len() as i64,
        })
    }

    /// Delete one correction from the log
    pub fn delete_correction(&self, id: i64) -> Result<()> {
        self.db.delete_correction(id)
    }

    /// Metadata about the model currently serving predictions
    pub fn model_info(&self) -> ModelInfo {
        let artifact = self.snapshot();
        ModelInfo {
            version: artifact.version,
            accuracy: artifact.accuracy,
            corrections_applied: artifact.corrections_applied,
            categories: artifact.model.categories().to_vec(),
            created_at: artifact.created_at,
        }
    }

    /// Aggregate view over the model, correction log, and training history
    pub fn stats(&self) -> Result<CategorizerStats> {
        Ok(CategorizerStats {
            model: self.model_info(),
            corrections: self.db.get_correction_stats()?,
            training: self.db.get_training_stats()?,
        })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn acquire_training_slot(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        match self.training.try_lock() {
            Ok(guard) => Ok(guard),
            Err(TryLockError::WouldBlock) => Err(Error::AlreadyTraining),
            Err(TryLockError::Poisoned(poisoned)) => Ok(poisoned.into_inner()),
        }
    }
}

fn check_training_set(examples: &[Example]) -> Result<()> {
    if examples.len() < MIN_TRAINING_EXAMPLES {
        return Err(Error::InsufficientData {
            examples: examples.len(),
            minimum: MIN_TRAINING_EXAMPLES,
        });
    }

    let categories: std::collections::HashSet<&str> =
        examples.iter().map(|(_, c)| c.as_str()).collect();
    if categories.len() < MIN_CATEGORIES {
        return Err(Error::Training(format!(
            "training set needs at least {} categories, found {}",
            MIN_CATEGORIES,
            categories.len()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Trainer) {
        let dir = TempDir::new().unwrap();
        let db = Database::in_memory().unwrap();
        let registry = ModelRegistry::new(dir.path());
        let trainer = Trainer::open(db, registry).unwrap();
        (dir, trainer)
    }

    fn pet_correction(description: &str) -> NewCorrection {
        NewCorrection {
            description: description.to_string(),
            predicted_category: "Miscellaneous".to_string(),
            correct_category: "Pets".to_string(),
            confidence: Some(0.3),
        }
    }

    #[test]
    fn test_bootstrap_trains_initial_model() {
        let (_dir, trainer) = setup();

        let info = trainer.model_info();
        assert_eq!(info.version, 1);
        assert_eq!(info.categories.len(), 15);
        assert_eq!(info.corrections_applied, 0);

        let events = trainer.database().list_training_events(10).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, TrainingEventKind::Initial);
    }

    #[test]
    fn test_bootstrap_reuses_existing_artifact() {
        let dir = TempDir::new().unwrap();
        let db = Database::in_memory().unwrap();

        let trainer = Trainer::open(db.clone(), ModelRegistry::new(dir.path())).unwrap();
        assert_eq!(trainer.model_info().version, 1);
        drop(trainer);

        let reopened = Trainer::open(db.clone(), ModelRegistry::new(dir.path())).unwrap();
        assert_eq!(reopened.model_info().version, 1);
        // No second initial training run
        assert_eq!(db.list_training_events(10).unwrap().len(), 1);
    }

    #[test]
    fn test_bootstrap_recovers_from_corrupt_artifact() {
        let dir = TempDir::new().unwrap();
        let db = Database::in_memory().unwrap();
        std::fs::write(dir.path().join("model.json"), "garbage").unwrap();

        let trainer = Trainer::open(db, ModelRegistry::new(dir.path())).unwrap();
        assert_eq!(trainer.model_info().version, 1);
        let p = trainer.categorize("Coffee at Starbucks");
        assert_eq!(p.category, "Food & Dining");
    }

    #[test]
    fn test_categorize_bounds_and_labels() {
        let (_dir, trainer) = setup();
        let categories = trainer.model_info().categories;

        for description in ["Coffee at Starbucks", "zzyzx unknown merchant", ""] {
            let p = trainer.categorize(description);
            assert!((0.0..=1.0).contains(&p.confidence));
            assert!(categories.contains(&p.category));
        }
    }

    #[test]
    fn test_submit_correction_rejects_blank_fields() {
        let (_dir, trainer) = setup();

        let blank_description = pet_correction("  ");
        assert!(matches!(
            trainer.submit_correction(&blank_description),
            Err(Error::InvalidData(_))
        ));

        let mut blank_category = pet_correction("PETCO");
        blank_category.correct_category = "".to_string();
        assert!(matches!(
            trainer.submit_correction(&blank_category),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_retrain_applies_corrections_and_learns() {
        let (_dir, trainer) = setup();

        trainer
            .submit_correction(&pet_correction("PETCO pet supplies"))
            .unwrap();
        trainer
            .submit_correction(&pet_correction("Chewy dog food autoship"))
            .unwrap();
        trainer
            .submit_correction(&pet_correction("PETCO grooming visit"))
            .unwrap();

        let outcome = trainer.retrain(None).unwrap();
        assert_eq!(outcome.version, 2);
        assert_eq!(outcome.corrections_applied, 3);
        assert!((0.0..=1.0).contains(&outcome.accuracy));

        // The new category exists and wins for matching text
        let p = trainer.categorize("petco supplies");
        assert_eq!(p.category, "Pets");

        // Corrections are now consumed
        assert_eq!(trainer.database().count_unused_corrections().unwrap(), 0);
        let applied = trainer.database().list_applied_corrections().unwrap();
        assert_eq!(applied.len(), 3);
        assert!(applied.iter().all(|c| c.applied_in_version == Some(2)));

        let events = trainer.database().list_training_events(10).unwrap();
        assert_eq!(events[0].kind, TrainingEventKind::Retrain);
        assert_eq!(events[0].corrections_applied, 3);
    }

    #[test]
    fn test_retrain_without_corrections_errors() {
        let (_dir, trainer) = setup();
        assert!(matches!(trainer.retrain(None), Err(Error::Training(_))));
        // Nothing recorded beyond the initial event
        assert_eq!(trainer.database().list_training_events(10).unwrap().len(), 1);
    }

    #[test]
    fn test_retrain_rejects_nonpositive_cap() {
        let (_dir, trainer) = setup();
        trainer.submit_correction(&pet_correction("PETCO")).unwrap();

        assert!(matches!(
            trainer.retrain(Some(0)),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(
            trainer.retrain(Some(-5)),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_retrain_cap_keeps_oldest() {
        let (_dir, trainer) = setup();

        let first = trainer.submit_correction(&pet_correction("PETCO one")).unwrap();
        let second = trainer
            .submit_correction(&pet_correction("PETCO two"))
            .unwrap();
        let third = trainer
            .submit_correction(&pet_correction("PETCO three"))
            .unwrap();

        let outcome = trainer.retrain(Some(2)).unwrap();
        assert_eq!(outcome.corrections_applied, 2);

        let applied: Vec<i64> = trainer
            .database()
            .list_applied_corrections()
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(applied, vec![first, second]);

        let unused = trainer.database().list_unused_corrections(10).unwrap();
        assert_eq!(unused.len(), 1);
        assert_eq!(unused[0].id, third);
    }

    #[test]
    fn test_only_one_training_run_at_a_time() {
        let (_dir, trainer) = setup();
        trainer.submit_correction(&pet_correction("PETCO")).unwrap();

        let _slot = trainer.training.lock().unwrap();
        assert!(matches!(trainer.retrain(None), Err(Error::AlreadyTraining)));
        assert!(matches!(trainer.reset(), Err(Error::AlreadyTraining)));
    }

    #[test]
    fn test_categorize_from_threads_while_training_slot_held() {
        let (_dir, trainer) = setup();
        trainer.submit_correction(&pet_correction("PETCO")).unwrap();

        let _slot = trainer.training.lock().unwrap();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    // Inference keeps working while a training run is active
                    for _ in 0..25 {
                        let prediction = trainer.categorize("Coffee at Starbucks");
                        assert_eq!(prediction.category, "Food & Dining");
                        assert!(prediction.confidence > 0.0 && prediction.confidence <= 1.0);
                    }
                    // Competing training attempts are rejected, not queued
                    assert!(matches!(trainer.retrain(None), Err(Error::AlreadyTraining)));
                });
            }
        });

        // The held slot never consumed anything
        assert_eq!(trainer.database().count_unused_corrections().unwrap(), 1);
        assert_eq!(trainer.model_info().version, 1);
    }

    #[test]
    fn test_failed_persist_leaves_everything_untouched() {
        let (dir, trainer) = setup();
        trainer.submit_correction(&pet_correction("PETCO")).unwrap();

        // Make the artifact path unwritable: a directory can't be renamed over
        let artifact_path = dir.path().join("model.json");
        std::fs::remove_file(&artifact_path).unwrap();
        std::fs::create_dir(&artifact_path).unwrap();

        assert!(trainer.retrain(None).is_err());

        // Correction still pending, no event recorded, old model still live
        assert_eq!(trainer.database().count_unused_corrections().unwrap(), 1);
        assert_eq!(trainer.database().list_training_events(10).unwrap().len(), 1);
        assert_eq!(trainer.model_info().version, 1);
        assert_eq!(
            trainer.categorize("Coffee at Starbucks").category,
            "Food & Dining"
        );
    }

    #[test]
    fn test_reset_restores_baseline_and_keeps_corrections() {
        let (_dir, trainer) = setup();

        trainer
            .submit_correction(&pet_correction("PETCO pet supplies"))
            .unwrap();
        trainer
            .submit_correction(&pet_correction("Chewy dog food"))
            .unwrap();
        trainer
            .submit_correction(&pet_correction("PETCO grooming"))
            .unwrap();
        trainer.retrain(None).unwrap();
        assert_eq!(trainer.categorize("petco supplies").category, "Pets");

        let outcome = trainer.reset().unwrap();
        assert_eq!(outcome.version, 3);
        assert_eq!(outcome.corrections_applied, 0);

        // Learned category is gone from the model
        assert!(!trainer
            .model_info()
            .categories
            .contains(&"Pets".to_string()));
        assert_ne!(trainer.categorize("petco supplies").category, "Pets");

        // But the log survives, with the corrections unapplied again
        let stats = trainer.database().get_correction_stats().unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.unused, 3);

        // And a later retrain re-teaches them
        trainer.retrain(None).unwrap();
        assert_eq!(trainer.categorize("petco supplies").category, "Pets");
    }

    #[test]
    fn test_stats_aggregates_all_sections() {
        let (_dir, trainer) = setup();

        trainer.submit_correction(&pet_correction("PETCO")).unwrap();

        let stats = trainer.stats().unwrap();
        assert_eq!(stats.model.version, 1);
        assert_eq!(stats.corrections.total, 1);
        assert_eq!(stats.corrections.unused, 1);
        assert_eq!(stats.training.total_events, 1);
    }

    #[test]
    fn test_delete_correction_passthrough() {
        let (_dir, trainer) = setup();

        let id = trainer.submit_correction(&pet_correction("PETCO")).unwrap();
        trainer.delete_correction(id).unwrap();
        assert!(matches!(
            trainer.delete_correction(id),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_batch_uses_one_snapshot() {
        let (_dir, trainer) = setup();

        let descriptions: Vec<String> = ["Coffee at Starbucks", "Gas station fill up"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let batch = trainer.categorize_batch(&descriptions);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], trainer.categorize(&descriptions[0]));
        assert_eq!(batch[1], trainer.categorize(&descriptions[1]));
    }
}
