//! Todo entity and priority ordering.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Todo priority, ordered from least to most urgent.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
            Priority::Urgent => write!(f, "urgent"),
        }
    }
}

/// A single todo item.
///
/// Invariant: `completed_at` is `Some` exactly when `completed` is true.
/// The store's toggle operation is the only place that flips the pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier, assigned at creation and never changed
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    /// Free-form category label
    pub category: String,
    /// Target calendar day; drives the whole-store streak
    pub due_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp, also the merge token for widget sync
    pub updated_at: DateTime<Utc>,
    /// Set when the todo was marked complete, cleared when un-marked
    pub completed_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Create a new incomplete todo due on `due_date`.
    pub fn new(title: impl Into<String>, due_date: NaiveDate) -> Self {
        let now = Utc::now();
        Todo {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            completed: false,
            priority: Priority::Medium,
            category: String::new(),
            due_date,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Flip the completion flag, keeping the timestamp invariant.
    ///
    /// Becoming complete stamps `completed_at` with now; un-completing
    /// clears it.
    pub fn toggle_completion(&mut self) {
        let now = Utc::now();
        self.completed = !self.completed;
        self.completed_at = if self.completed { Some(now) } else { None };
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert!(Priority::High < Priority::Urgent);
    }

    #[test]
    fn toggle_sets_and_clears_completed_at() {
        let mut todo = Todo::new("write report", day(2026, 3, 1));
        assert!(!todo.completed);
        assert!(todo.completed_at.is_none());

        todo.toggle_completion();
        assert!(todo.completed);
        assert!(todo.completed_at.is_some());

        todo.toggle_completion();
        assert!(!todo.completed);
        assert!(todo.completed_at.is_none());
    }

    #[test]
    fn json_roundtrip() {
        let mut todo = Todo::new("water plants", day(2026, 5, 10));
        todo.priority = Priority::Urgent;
        todo.description = Some("the ones on the balcony".into());
        let json = serde_json::to_string(&todo).unwrap();
        let back: Todo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, todo);
    }

    #[test]
    fn due_date_serializes_as_iso_date() {
        let todo = Todo::new("x", day(2026, 1, 2));
        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(value["due_date"], "2026-01-02");
    }
}
