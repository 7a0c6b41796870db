//! The entity store.
//!
//! `EntityStore` owns the authoritative todo/habit/focus-session
//! collections and the derived statistics cache. Every mutation runs the
//! same save cycle: persist all four collections, recompute statistics in
//! full, rebuild the widget projection, notify subscribers. Persistence
//! and projection failures are logged and swallowed; in-memory state is
//! the source of truth and may run ahead of disk until the next
//! successful write.

use chrono::{Local, NaiveDate, Utc};
use std::sync::mpsc;
use tracing::{info, warn};

use crate::error::{CoreError, ImportError};
use crate::events::StoreEvent;
use crate::export::ExportData;
use crate::model::{FocusSession, Habit, Todo};
use crate::stats::{self, Statistics};
use crate::storage::{CollectionKey, Database, DATA_VERSION};
use crate::widget::WidgetBridge;

pub struct EntityStore {
    todos: Vec<Todo>,
    habits: Vec<Habit>,
    focus_sessions: Vec<FocusSession>,
    statistics: Statistics,
    db: Database,
    bridge: WidgetBridge,
    todo_limit: usize,
    subscribers: Vec<mpsc::Sender<StoreEvent>>,
}

impl EntityStore {
    /// Open the store over the default database and shared location.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened. Decode failures
    /// inside the persisted data are not errors; the affected collection
    /// loads empty.
    pub fn open() -> Result<Self, CoreError> {
        let db = Database::open()?;
        let bridge = WidgetBridge::open().map_err(|e| CoreError::Custom(e.to_string()))?;
        let todo_limit = crate::config::Config::load_or_default().widget.todo_limit;
        Ok(Self::with_parts(db, bridge, todo_limit))
    }

    /// Build a store from explicit parts and load the persisted state.
    pub fn with_parts(db: Database, bridge: WidgetBridge, todo_limit: usize) -> Self {
        let mut store = EntityStore {
            todos: Vec::new(),
            habits: Vec::new(),
            focus_sessions: Vec::new(),
            statistics: Statistics::default(),
            db,
            bridge,
            todo_limit,
            subscribers: Vec::new(),
        };
        store.load();
        store
    }

    /// Load persisted collections, one key at a time.
    ///
    /// Each key is decoded independently: a missing or corrupt key resets
    /// only that collection to empty and leaves the others alone.
    fn load(&mut self) {
        self.todos = self.load_or_empty(CollectionKey::Todos);
        self.habits = self.load_or_empty(CollectionKey::Habits);
        self.focus_sessions = self.load_or_empty(CollectionKey::FocusSessions);
        self.migrate_version();
        self.statistics = self.recompute();
    }

    fn load_or_empty<T: serde::de::DeserializeOwned + Default>(&self, key: CollectionKey) -> T {
        match self.db.load_collection(key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "resetting collection after decode failure");
                T::default()
            }
        }
    }

    /// Migration hook: currently a no-op beyond updating the stored tag.
    fn migrate_version(&self) {
        match self.db.read_version() {
            Ok(Some(stored)) if stored != DATA_VERSION => {
                info!(from = %stored, to = DATA_VERSION, "updating data version tag");
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "failed to read data version"),
        }
        if let Err(e) = self.db.write_version() {
            warn!(error = %e, "failed to write data version");
        }
    }

    // === Accessors ===

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn focus_sessions(&self) -> &[FocusSession] {
        &self.focus_sessions
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn todo(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn focus_session(&self, id: &str) -> Option<&FocusSession> {
        self.focus_sessions.iter().find(|s| s.id == id)
    }

    /// Underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Subscribe to store events. Dropped receivers are pruned on the
    /// next notification.
    pub fn subscribe(&mut self) -> mpsc::Receiver<StoreEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    // === Todo operations ===

    pub fn add_todo(&mut self, todo: Todo) {
        let id = todo.id.clone();
        self.todos.push(todo);
        self.save_cycle(StoreEvent::TodoAdded { id, at: Utc::now() });
    }

    /// Replace the todo with a matching id. Silent no-op when absent.
    pub fn update_todo(&mut self, mut todo: Todo) {
        todo.updated_at = Utc::now();
        let Some(slot) = self.todos.iter_mut().find(|t| t.id == todo.id) else {
            return;
        };
        let id = todo.id.clone();
        *slot = todo;
        self.save_cycle(StoreEvent::TodoUpdated { id, at: Utc::now() });
    }

    pub fn delete_todo(&mut self, id: &str) {
        let before = self.todos.len();
        self.todos.retain(|t| t.id != id);
        if self.todos.len() != before {
            self.save_cycle(StoreEvent::TodoDeleted {
                id: id.to_string(),
                at: Utc::now(),
            });
        }
    }

    /// Flip a todo's completion flag, keeping the timestamp invariant.
    /// Returns whether the todo was found.
    pub fn toggle_todo(&mut self, id: &str) -> bool {
        let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        todo.toggle_completion();
        let event = StoreEvent::TodoToggled {
            id: id.to_string(),
            completed: todo.completed,
            at: Utc::now(),
        };
        self.save_cycle(event);
        true
    }

    // === Habit operations ===

    pub fn add_habit(&mut self, habit: Habit) {
        let id = habit.id.clone();
        self.habits.push(habit);
        self.save_cycle(StoreEvent::HabitAdded { id, at: Utc::now() });
    }

    /// Replace the habit with a matching id. Silent no-op when absent.
    pub fn update_habit(&mut self, mut habit: Habit) {
        habit.updated_at = Utc::now();
        let Some(slot) = self.habits.iter_mut().find(|h| h.id == habit.id) else {
            return;
        };
        let id = habit.id.clone();
        *slot = habit;
        self.save_cycle(StoreEvent::HabitUpdated { id, at: Utc::now() });
    }

    pub fn delete_habit(&mut self, id: &str) {
        let before = self.habits.len();
        self.habits.retain(|h| h.id != id);
        if self.habits.len() != before {
            self.save_cycle(StoreEvent::HabitDeleted {
                id: id.to_string(),
                at: Utc::now(),
            });
        }
    }

    /// Toggle a habit's completion record for a calendar day. Marking the
    /// same day twice un-marks it. Returns false when the habit is unknown
    /// or does not apply on `date`.
    pub fn check_habit(&mut self, id: &str, date: NaiveDate) -> bool {
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            return false;
        };
        if !habit.toggle_completion(date) {
            return false;
        }
        let event = StoreEvent::HabitChecked {
            id: id.to_string(),
            date,
            completed: habit.is_completed_on(date),
            at: Utc::now(),
        };
        self.save_cycle(event);
        true
    }

    // === Focus session operations ===

    pub fn add_focus_session(&mut self, session: FocusSession) {
        let id = session.id.clone();
        self.focus_sessions.push(session);
        self.save_cycle(StoreEvent::FocusSessionAdded { id, at: Utc::now() });
    }

    /// Replace the session with a matching id. Silent no-op when absent.
    pub fn update_focus_session(&mut self, mut session: FocusSession) {
        session.updated_at = Utc::now();
        let Some(slot) = self.focus_sessions.iter_mut().find(|s| s.id == session.id) else {
            return;
        };
        let id = session.id.clone();
        *slot = session;
        self.save_cycle(StoreEvent::FocusSessionUpdated { id, at: Utc::now() });
    }

    pub fn delete_focus_session(&mut self, id: &str) {
        let before = self.focus_sessions.len();
        self.focus_sessions.retain(|s| s.id != id);
        if self.focus_sessions.len() != before {
            self.save_cycle(StoreEvent::FocusSessionDeleted {
                id: id.to_string(),
                at: Utc::now(),
            });
        }
    }

    // === Import/export ===

    /// Snapshot the full store as a pretty-printed JSON export.
    pub fn export(&self) -> Result<String, serde_json::Error> {
        ExportData::snapshot(
            self.todos.clone(),
            self.habits.clone(),
            self.focus_sessions.clone(),
            self.statistics.clone(),
        )
        .to_json()
    }

    /// Replace all four collections from an export payload.
    ///
    /// # Errors
    /// Fails without mutating anything on decode failure or a version-tag
    /// mismatch.
    pub fn import(&mut self, json: &str) -> Result<(), ImportError> {
        let data = ExportData::from_json(json)?;
        self.todos = data.todos;
        self.habits = data.habits;
        self.focus_sessions = data.focus_sessions;
        self.statistics = data.statistics;
        self.save_cycle(StoreEvent::DataImported { at: Utc::now() });
        Ok(())
    }

    // === Save cycle ===

    fn save_cycle(&mut self, event: StoreEvent) {
        self.persist();
        self.statistics = self.recompute();
        let today = Local::now().date_naive();
        self.bridge
            .project(&self.habits, &self.todos, today, self.todo_limit);
        self.notify(event);
    }

    /// Fire-and-forget persistence of the four collections plus version
    /// marker. Failures are logged; in-memory state is never rolled back.
    fn persist(&self) {
        let writes = [
            self.db.save_collection(CollectionKey::Todos, &self.todos),
            self.db.save_collection(CollectionKey::Habits, &self.habits),
            self.db
                .save_collection(CollectionKey::FocusSessions, &self.focus_sessions),
            self.db
                .save_collection(CollectionKey::Statistics, &self.statistics),
            self.db.write_version(),
        ];
        for result in writes {
            if let Err(e) = result {
                warn!(error = %e, "persistence write failed, in-memory state retained");
            }
        }
    }

    fn recompute(&self) -> Statistics {
        let today = Local::now().date_naive();
        stats::compute(&self.todos, &self.habits, &self.focus_sessions, today)
    }

    fn notify(&mut self, event: StoreEvent) {
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}
