//! Terminal admin console for a tutoring marketplace backend.
//!
//! The console signs in against the backend's admin endpoint and then manages
//! its collections (categories, companies, users, ads, teachers, students,
//! courses) and the links between them (teacher/course, student/course,
//! teacher/student). Every collection is presented through the same pipeline:
//! case-insensitive substring search, fixed-size pages, and create/edit/delete
//! with a confirmation gate in front of anything destructive.
//!
//! The backend stays authoritative throughout. A mutation key press spawns
//! the REST call; the local collection only changes when the call comes back
//! successful, and relationship membership is re-fetched outright after every
//! change.
//!
//! # Layout
//!
//! - [`controller`] — search, paging, and collection bookkeeping, UI-free
//! - [`entities`] — the seven collections as serde types
//! - [`remote`] — the HTTP client and the source traits screens call through
//! - [`screen`] — login, list management, and relationship screens
//! - [`app`] — the top-level program model wiring it all together

pub mod app;
pub mod config;
pub mod confirm;
pub mod controller;
pub mod entities;
pub mod error;
pub mod notify;
pub mod record;
pub mod remote;
pub mod screen;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
