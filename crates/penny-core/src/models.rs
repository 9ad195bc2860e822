//! Domain types shared across the categorization core

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A category prediction for an expense description
///
/// `confidence` is the classifier's probability mass on the winning category,
/// always in `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub category: String,
    pub confidence: f64,
}

/// A user-submitted correction to a wrong prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Correction {
    pub id: i64,
    pub description: String,
    /// Category the model predicted (metadata only, never used as a label)
    pub predicted_category: String,
    /// Category the user says is right (the training label)
    pub correct_category: String,
    /// Model confidence at the time of the wrong prediction, if known
    pub confidence: Option<f64>,
    /// Whether a training cycle has consumed this correction
    pub is_applied: bool,
    /// Model version that folded this correction in
    pub applied_in_version: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a new correction record
#[derive(Debug, Clone)]
pub struct NewCorrection {
    pub description: String,
    pub predicted_category: String,
    pub correct_category: String,
    pub confidence: Option<f64>,
}

/// What kind of training run produced a training event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingEventKind {
    /// First model fit at bootstrap (no persisted artifact found)
    Initial,
    /// Correction-driven retrain
    Retrain,
    /// Explicit reset to the seed-only baseline
    Reset,
}

impl TrainingEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingEventKind::Initial => "initial",
            TrainingEventKind::Retrain => "retrain",
            TrainingEventKind::Reset => "reset",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "initial" => Some(TrainingEventKind::Initial),
            "retrain" => Some(TrainingEventKind::Retrain),
            "reset" => Some(TrainingEventKind::Reset),
            _ => None,
        }
    }
}

impl std::fmt::Display for TrainingEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One completed training run (append-only log entry)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingEvent {
    pub id: i64,
    pub version: i64,
    pub kind: TrainingEventKind,
    pub accuracy: f64,
    pub corrections_applied: i64,
    /// Size of the combined training set for this run
    pub examples: i64,
    pub created_at: DateTime<Utc>,
}

/// Result of a successful retrain or reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrainOutcome {
    pub version: i64,
    pub accuracy: f64,
    pub corrections_applied: i64,
    pub examples: i64,
}

/// Per-category correction counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCorrectionStats {
    pub category: String,
    pub total: i64,
    pub applied: i64,
    pub unused: i64,
}

/// Aggregate correction statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionStats {
    pub total: i64,
    pub applied: i64,
    pub unused: i64,
    pub by_category: Vec<CategoryCorrectionStats>,
}

/// Metadata about the currently loaded model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub version: i64,
    pub accuracy: f64,
    pub corrections_applied: i64,
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Aggregate training history statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingStats {
    pub total_events: i64,
    pub last_training: Option<DateTime<Utc>>,
    pub total_corrections_applied: i64,
    pub events: Vec<TrainingEvent>,
}

/// Read-only aggregate view over the whole categorization subsystem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizerStats {
    pub model: ModelInfo,
    pub corrections: CorrectionStats,
    pub training: TrainingStats,
}
