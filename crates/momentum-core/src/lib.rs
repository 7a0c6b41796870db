//! # Momentum Core Library
//!
//! This library provides the core business logic for Momentum, a
//! single-user tracker for todos, recurring habits, and timed focus
//! sessions. All operations are available via a standalone CLI binary;
//! GUI layers are thin shells over the same core library.
//!
//! ## Architecture
//!
//! - **Entity Store**: owns the authoritative collections; every mutation
//!   persists, recomputes statistics, refreshes the widget projection,
//!   and notifies subscribers
//! - **Frequency Evaluator**: pure per-date applicability check on habits
//! - **Statistics Engine**: whole-collection aggregate/streak recompute
//! - **Widget Bridge**: file-backed, merge-on-write projection shared
//!   with the separately running widget process
//! - **Import/Export**: versioned full-store JSON snapshots
//!
//! ## Key Components
//!
//! - [`EntityStore`]: mutation API and change notifications
//! - [`Habit::applies_on`]: the frequency evaluator
//! - [`WidgetBridge`]: cross-process shared location
//! - [`ExportData`]: backup/restore envelope

pub mod config;
pub mod error;
pub mod events;
pub mod export;
pub mod model;
pub mod stats;
pub mod storage;
pub mod store;
pub mod widget;

pub use config::Config;
pub use error::{CoreError, ImportError, StorageError};
pub use events::StoreEvent;
pub use export::ExportData;
pub use model::{Color, FocusSession, Frequency, Habit, Priority, Todo};
pub use stats::Statistics;
pub use storage::{Database, DATA_VERSION};
pub use store::EntityStore;
pub use widget::{SharedData, SharedHabit, SharedTodo, WidgetBridge};
