//! Versioned backup/restore of the full store.
//!
//! The export envelope is a JSON object with camelCase keys and stable
//! field ordering so backups stay human-reviewable. Import is gated on an
//! exact version-tag match; anything else fails without touching state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ImportError;
use crate::model::{FocusSession, Habit, Todo};
use crate::stats::Statistics;
use crate::storage::DATA_VERSION;

/// Full snapshot of the four collections plus version tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub todos: Vec<Todo>,
    pub habits: Vec<Habit>,
    pub focus_sessions: Vec<FocusSession>,
    pub statistics: Statistics,
    pub version: String,
    pub export_date: DateTime<Utc>,
}

impl ExportData {
    /// Snapshot the collections under the current version tag.
    pub fn snapshot(
        todos: Vec<Todo>,
        habits: Vec<Habit>,
        focus_sessions: Vec<FocusSession>,
        statistics: Statistics,
    ) -> Self {
        ExportData {
            todos,
            habits,
            focus_sessions,
            statistics,
            version: DATA_VERSION.to_string(),
            export_date: Utc::now(),
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Decode an export payload, enforcing the version gate.
    ///
    /// # Errors
    /// Fails on undecodable JSON or a version tag not exactly equal to
    /// [`DATA_VERSION`]; the caller performs no mutation in either case.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        let data: ExportData = serde_json::from_str(json)?;
        if data.version != DATA_VERSION {
            return Err(ImportError::VersionMismatch {
                found: data.version,
                expected: DATA_VERSION.to_string(),
            });
        }
        Ok(data)
    }
}
