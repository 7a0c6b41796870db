//! Authoritative entity types.

mod color;
mod focus;
mod habit;
mod todo;

pub use color::{Color, ParseColorError};
pub use focus::FocusSession;
pub use habit::{Frequency, Habit};
pub use todo::{Priority, Todo};
