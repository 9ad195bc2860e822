//! Training event history operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{TrainingEvent, TrainingEventKind, TrainingStats};

fn event_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TrainingEvent> {
    let kind_str: String = row.get(2)?;
    let created_at_str: String = row.get(6)?;

    Ok(TrainingEvent {
        id: row.get(0)?,
        version: row.get(1)?,
        kind: TrainingEventKind::from_str(&kind_str).unwrap_or(TrainingEventKind::Retrain),
        accuracy: row.get(3)?,
        corrections_applied: row.get(4)?,
        examples: row.get(5)?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Append a completed training run to the history log
    pub fn record_training_event(
        &self,
        version: i64,
        kind: TrainingEventKind,
        accuracy: f64,
        corrections_applied: i64,
        examples: i64,
    ) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO training_events (version, kind, accuracy, corrections_applied, examples)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![version, kind.as_str(), accuracy, corrections_applied, examples],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List training events, newest first
    pub fn list_training_events(&self, limit: i64) -> Result<Vec<TrainingEvent>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, version, kind, accuracy, corrections_applied, examples, created_at
            FROM training_events
            ORDER BY version DESC, id DESC
            LIMIT ?
            "#,
        )?;

        let events = stmt
            .query_map(params![limit], event_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(events)
    }

    /// Highest model version recorded so far (0 when the log is empty)
    pub fn latest_model_version(&self) -> Result<i64> {
        let conn = self.conn()?;
        let version: i64 = conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM training_events",
            [],
            |row| row.get(0),
        )?;
        Ok(version)
    }

    /// Get aggregate training history statistics
    pub fn get_training_stats(&self) -> Result<TrainingStats> {
        let conn = self.conn()?;

        let (total_events, total_corrections_applied): (i64, i64) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(corrections_applied), 0) FROM training_events",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let last_training: Option<String> = conn
            .query_row(
                "SELECT created_at FROM training_events ORDER BY id DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .ok();

        let events = self.list_training_events(20)?;

        Ok(TrainingStats {
            total_events,
            last_training: last_training.map(|s| parse_datetime(&s)),
            total_corrections_applied,
            events,
        })
    }
}
