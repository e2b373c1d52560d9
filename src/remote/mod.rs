//! The REST boundary: HTTP client, per-collection sources, and the traits
//! the screens talk to.
//!
//! Screens never touch reqwest directly. They hold a boxed
//! [`RemoteListSource`] (or [`RelationSource`] for assignment screens) and
//! issue calls through it from `Cmd` futures; tests swap in in-memory fakes.
//! The live implementations are thin adapters over one shared [`RestClient`]
//! that carries the base URL, the session cookie jar, and the request
//! timeout.

mod client;
mod source;

pub use client::RestClient;
pub use source::{
    RelationEndpoint, RelationSource, RemoteListSource, RestRelation, RestSource,
    STUDENT_COURSES, TEACHER_COURSES, TEACHER_STUDENTS,
};
