//! Data Science Learning Accelerator Hub.
//!
//! A terminal course-notes editor: six fixed courses, ten content sections
//! each, and a per-course list of resource links. Every edit is written
//! straight through to local JSON storage.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::App;
pub use catalog::{Course, Section};
pub use error::{HubError, Result};
pub use state::{HubState, Resource, ResourceField};
pub use storage::{FileStore, KeyValueStore, MemoryStore, Storage};
