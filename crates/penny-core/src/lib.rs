//! Penny Core Library
//!
//! Shared functionality for the Penny personal finance tool:
//! - Self-improving expense categorizer (naive Bayes over description text)
//! - Correction log: users fix wrong predictions, retraining folds them in
//! - Versioned model artifacts with an append-only training history
//! - SQLite storage with connection pooling and migrations
//! - Correction log CSV export

pub mod classifier;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod registry;
pub mod seed;
pub mod text;
pub mod trainer;

pub use classifier::TrainedModel;
pub use db::Database;
pub use error::{Error, Result};
pub use models::{
    CategorizerStats, CategoryCorrectionStats, Correction, CorrectionStats, ModelInfo,
    NewCorrection, Prediction, RetrainOutcome, TrainingEvent, TrainingEventKind, TrainingStats,
};
pub use registry::{ModelArtifact, ModelRegistry};
pub use text::TextProcessor;
pub use trainer::{Trainer, DEFAULT_MAX_CORRECTIONS};
