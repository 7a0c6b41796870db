pub mod config;
pub mod data;
pub mod focus;
pub mod habit;
pub mod stats;
pub mod todo;
pub mod widget;
