//! Change notifications emitted by the entity store.
//!
//! View layers subscribe through a channel and receive one event per
//! mutation, after persistence, statistics recompute, and the widget
//! projection write have all run.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Every store mutation produces a StoreEvent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StoreEvent {
    TodoAdded {
        id: String,
        at: DateTime<Utc>,
    },
    TodoUpdated {
        id: String,
        at: DateTime<Utc>,
    },
    TodoDeleted {
        id: String,
        at: DateTime<Utc>,
    },
    TodoToggled {
        id: String,
        completed: bool,
        at: DateTime<Utc>,
    },
    HabitAdded {
        id: String,
        at: DateTime<Utc>,
    },
    HabitUpdated {
        id: String,
        at: DateTime<Utc>,
    },
    HabitDeleted {
        id: String,
        at: DateTime<Utc>,
    },
    HabitChecked {
        id: String,
        date: NaiveDate,
        completed: bool,
        at: DateTime<Utc>,
    },
    FocusSessionAdded {
        id: String,
        at: DateTime<Utc>,
    },
    FocusSessionUpdated {
        id: String,
        at: DateTime<Utc>,
    },
    FocusSessionDeleted {
        id: String,
        at: DateTime<Utc>,
    },
    /// Import replaced all four collections wholesale.
    DataImported {
        at: DateTime<Utc>,
    },
}
