//! Correction log export

use crate::db::Database;
use crate::error::{Error, Result};

impl Database {
    /// Export the full correction log as CSV, newest first
    ///
    /// One row per correction with a header line. Quoting is handled by the
    /// writer, so descriptions containing commas or quotes survive intact.
    pub fn export_corrections_csv(&self) -> Result<String> {
        let corrections = self.list_corrections(None, i64::MAX, 0)?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "id",
            "description",
            "predicted_category",
            "correct_category",
            "confidence",
            "is_applied",
            "applied_in_version",
            "created_at",
        ])?;

        for c in &corrections {
            writer.write_record([
                c.id.to_string(),
                c.description.clone(),
                c.predicted_category.clone(),
                c.correct_category.clone(),
                c.confidence.map(|v| v.to_string()).unwrap_or_default(),
                if c.is_applied { "true" } else { "false" }.to_string(),
                c.applied_in_version
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
                c.created_at.to_rfc3339(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Persistence(format!("CSV buffer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| Error::InvalidData(format!("CSV output not UTF-8: {}", e)))
    }
}
