//! Widget sync bridge.
//!
//! The home-screen widget runs as a separate OS process with no access to
//! the primary store. Both processes share a single JSON file (the shared
//! location); the primary writes a projection of its state after every
//! mutation, and the widget toggles completion flags in place.
//!
//! Every shared record carries a `modified_at` token. A projection write
//! merges with the stored copy per record, keeping the completion flag
//! with the newer token, so a widget toggle that is newer than the
//! primary's last change to that entity survives the rewrite instead of
//! being silently reverted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::model::{Habit, Todo};
use crate::storage::shared_dir;

/// Default cap on todos in the projection.
pub const DEFAULT_TODO_LIMIT: usize = 5;

/// A habit's "today" projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedHabit {
    /// String form of the source habit's id
    pub id: String,
    pub title: String,
    /// Completion flag for the reference date
    pub completed: bool,
    /// Reference day the flag refers to
    pub date: NaiveDate,
    /// Merge token: when this record's flag last changed, in either process
    pub modified_at: DateTime<Utc>,
}

/// A todo's projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedTodo {
    /// String form of the source todo's id
    pub id: String,
    pub title: String,
    pub completed: bool,
    /// Creation day of the source todo
    pub date: NaiveDate,
    /// Merge token: when this record's flag last changed, in either process
    pub modified_at: DateTime<Utc>,
}

/// Root of the shared location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedData {
    #[serde(default)]
    pub habits: Vec<SharedHabit>,
    #[serde(default)]
    pub todos: Vec<SharedTodo>,
    pub updated_at: DateTime<Utc>,
}

impl Default for SharedData {
    fn default() -> Self {
        SharedData {
            habits: Vec::new(),
            todos: Vec::new(),
            updated_at: Utc::now(),
        }
    }
}

/// File-backed bridge to the shared location.
///
/// Used by the primary process (projection writes) and the widget process
/// (in-place toggles). Neither side locks the file; consistency is
/// per-record newest-token-wins.
pub struct WidgetBridge {
    path: PathBuf,
}

impl WidgetBridge {
    /// Bridge over the default shared location (`shared.json`).
    ///
    /// # Errors
    /// Returns an error if the shared directory cannot be resolved.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::at(shared_dir()?.join("shared.json")))
    }

    /// Bridge over an explicit file path.
    pub fn at(path: PathBuf) -> Self {
        WidgetBridge { path }
    }

    /// Read the shared location. A missing or unreadable file is an empty
    /// SharedData, never an error.
    pub fn read(&self) -> SharedData {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "shared data undecodable, treating as empty");
                SharedData::default()
            }),
            Err(_) => SharedData::default(),
        }
    }

    fn write(&self, data: &SharedData) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Rebuild the projection from the primary collections and write it,
    /// merging per record with whatever is currently stored.
    ///
    /// Active habits project their completion flag for `today`; up to
    /// `limit` todos are taken, incomplete before complete (stable
    /// otherwise). Write failures are logged and swallowed.
    pub fn project(&self, habits: &[Habit], todos: &[Todo], today: NaiveDate, limit: usize) {
        let fresh = build_projection(habits, todos, today, limit);
        let merged = merge_shared(fresh, &self.read());
        if let Err(e) = self.write(&merged) {
            warn!(path = %self.path.display(), error = %e, "failed to write widget projection");
        } else {
            debug!(habits = merged.habits.len(), todos = merged.todos.len(), "widget projection written");
        }
    }

    /// Widget-process toggle of a habit's flag. Returns whether the record
    /// was found. Never touches the primary store.
    pub fn toggle_habit(&self, id: &str) -> bool {
        let mut data = self.read();
        let now = Utc::now();
        let Some(record) = data.habits.iter_mut().find(|h| h.id == id) else {
            return false;
        };
        record.completed = !record.completed;
        record.modified_at = now;
        data.updated_at = now;
        self.write_toggled(&data);
        true
    }

    /// Widget-process toggle of a todo's flag. Returns whether the record
    /// was found. Never touches the primary store.
    pub fn toggle_todo(&self, id: &str) -> bool {
        let mut data = self.read();
        let now = Utc::now();
        let Some(record) = data.todos.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        record.completed = !record.completed;
        record.modified_at = now;
        data.updated_at = now;
        self.write_toggled(&data);
        true
    }

    fn write_toggled(&self, data: &SharedData) {
        if let Err(e) = self.write(data) {
            warn!(path = %self.path.display(), error = %e, "failed to write widget toggle");
        }
    }
}

/// Build a fresh projection from the primary collections.
fn build_projection(habits: &[Habit], todos: &[Todo], today: NaiveDate, limit: usize) -> SharedData {
    let habits = habits
        .iter()
        .filter(|h| h.active)
        .map(|h| SharedHabit {
            id: h.id.clone(),
            title: h.title.clone(),
            completed: h.is_completed_on(today),
            date: today,
            modified_at: h.updated_at,
        })
        .collect();

    let mut ordered: Vec<&Todo> = todos.iter().collect();
    ordered.sort_by_key(|t| t.completed); // stable: incomplete first
    let todos = ordered
        .into_iter()
        .take(limit)
        .map(|t| SharedTodo {
            id: t.id.clone(),
            title: t.title.clone(),
            completed: t.completed,
            date: t.created_at.date_naive(),
            modified_at: t.updated_at,
        })
        .collect();

    SharedData {
        habits,
        todos,
        updated_at: Utc::now(),
    }
}

/// Per-record merge of a fresh projection with the stored copy.
///
/// Record membership and titles follow the fresh projection (the primary
/// owns which entities exist); the completion flag of a record present in
/// both copies follows the newer `modified_at`.
fn merge_shared(mut fresh: SharedData, stored: &SharedData) -> SharedData {
    for habit in &mut fresh.habits {
        if let Some(prev) = stored.habits.iter().find(|h| h.id == habit.id) {
            if prev.modified_at > habit.modified_at && prev.date == habit.date {
                habit.completed = prev.completed;
                habit.modified_at = prev.modified_at;
            }
        }
    }
    for todo in &mut fresh.todos {
        if let Some(prev) = stored.todos.iter().find(|t| t.id == todo.id) {
            if prev.modified_at > todo.modified_at {
                todo.completed = prev.completed;
                todo.modified_at = prev.modified_at;
            }
        }
    }
    fresh
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::tempdir;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bridge_in(dir: &tempfile::TempDir) -> WidgetBridge {
        WidgetBridge::at(dir.path().join("shared.json"))
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let data = bridge_in(&dir).read();
        assert!(data.habits.is_empty());
        assert!(data.todos.is_empty());
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let bridge = bridge_in(&dir);
        std::fs::write(dir.path().join("shared.json"), "{broken").unwrap();
        assert!(bridge.read().todos.is_empty());
    }

    #[test]
    fn projection_keeps_active_habits_only() {
        let dir = tempdir().unwrap();
        let bridge = bridge_in(&dir);
        let today = day(2026, 5, 1);

        let mut active = Habit::new("stretch");
        active.toggle_completion(today);
        let mut paused = Habit::new("journal");
        paused.active = false;

        bridge.project(&[active.clone(), paused], &[], today, DEFAULT_TODO_LIMIT);
        let data = bridge.read();
        assert_eq!(data.habits.len(), 1);
        assert_eq!(data.habits[0].id, active.id);
        assert!(data.habits[0].completed);
        assert_eq!(data.habits[0].date, today);
    }

    #[test]
    fn projection_takes_five_todos_incomplete_first() {
        let dir = tempdir().unwrap();
        let bridge = bridge_in(&dir);
        let today = day(2026, 5, 1);

        let mut todos: Vec<Todo> = (0..7).map(|i| Todo::new(format!("t{i}"), today)).collect();
        todos[0].toggle_completion();
        todos[3].toggle_completion();

        bridge.project(&[], &todos, today, DEFAULT_TODO_LIMIT);
        let data = bridge.read();
        assert_eq!(data.todos.len(), 5);
        // Incomplete todos come first, original order otherwise
        let titles: Vec<&str> = data.todos.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["t1", "t2", "t4", "t5", "t6"]);
        assert!(data.todos.iter().all(|t| !t.completed));
    }

    #[test]
    fn widget_toggle_is_visible_on_reread() {
        let dir = tempdir().unwrap();
        let bridge = bridge_in(&dir);
        let today = day(2026, 5, 1);
        let todo = Todo::new("write report", today);

        bridge.project(&[], &[todo.clone()], today, DEFAULT_TODO_LIMIT);
        assert!(bridge.toggle_todo(&todo.id));
        assert!(bridge.read().todos[0].completed);
    }

    #[test]
    fn toggle_of_unknown_id_is_a_noop() {
        let dir = tempdir().unwrap();
        let bridge = bridge_in(&dir);
        assert!(!bridge.toggle_todo("nope"));
        assert!(!bridge.toggle_habit("nope"));
    }

    #[test]
    fn newer_widget_toggle_survives_projection_rewrite() {
        let dir = tempdir().unwrap();
        let bridge = bridge_in(&dir);
        let today = day(2026, 5, 1);
        let mut todo = Todo::new("write report", today);
        // Primary last touched this todo in the past
        todo.updated_at = Utc::now() - Duration::hours(1);

        bridge.project(&[], &[todo.clone()], today, DEFAULT_TODO_LIMIT);
        assert!(bridge.toggle_todo(&todo.id));

        // Primary mutates something unrelated and rewrites the projection
        let unrelated = Todo::new("other", today);
        bridge.project(&[], &[todo.clone(), unrelated], today, DEFAULT_TODO_LIMIT);

        let data = bridge.read();
        let record = data.todos.iter().find(|t| t.id == todo.id).unwrap();
        assert!(record.completed, "widget toggle must win the merge");
    }

    #[test]
    fn newer_primary_change_wins_over_stale_widget_toggle() {
        let dir = tempdir().unwrap();
        let bridge = bridge_in(&dir);
        let today = day(2026, 5, 1);
        let mut todo = Todo::new("write report", today);
        todo.updated_at = Utc::now() - Duration::hours(1);

        bridge.project(&[], &[todo.clone()], today, DEFAULT_TODO_LIMIT);
        assert!(bridge.toggle_todo(&todo.id));

        // Primary later toggles the todo itself: its token is now newest
        todo.toggle_completion();
        todo.toggle_completion(); // back to incomplete, token refreshed
        bridge.project(&[], &[todo.clone()], today, DEFAULT_TODO_LIMIT);

        let data = bridge.read();
        let record = data.todos.iter().find(|t| t.id == todo.id).unwrap();
        assert!(!record.completed, "newer primary state must win");
    }

    #[test]
    fn deleted_entities_drop_out_of_the_projection() {
        let dir = tempdir().unwrap();
        let bridge = bridge_in(&dir);
        let today = day(2026, 5, 1);
        let todo = Todo::new("ephemeral", today);

        bridge.project(&[], &[todo], today, DEFAULT_TODO_LIMIT);
        assert_eq!(bridge.read().todos.len(), 1);
        bridge.project(&[], &[], today, DEFAULT_TODO_LIMIT);
        assert!(bridge.read().todos.is_empty());
    }

    #[test]
    fn habit_merge_ignores_records_for_other_days() {
        let dir = tempdir().unwrap();
        let bridge = bridge_in(&dir);
        let mut habit = Habit::new("stretch");
        habit.updated_at = Utc::now() - Duration::hours(1);

        bridge.project(&[habit.clone()], &[], day(2026, 5, 1), DEFAULT_TODO_LIMIT);
        assert!(bridge.toggle_habit(&habit.id));

        // Next day's projection starts from a clean flag even though the
        // widget record carries a newer token for yesterday.
        bridge.project(&[habit.clone()], &[], day(2026, 5, 2), DEFAULT_TODO_LIMIT);
        let data = bridge.read();
        assert!(!data.habits[0].completed);
        assert_eq!(data.habits[0].date, day(2026, 5, 2));
    }
}
