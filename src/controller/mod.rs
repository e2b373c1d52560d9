//! Generic client-side list management: search filter, pagination, mutation.
//!
//! Every entity screen in the console shows the same thing: a collection
//! fetched once from the backend, narrowed by a case-insensitive substring
//! search, sliced into fixed-size pages, and mutated in place as remote
//! create/update/delete calls succeed. This module implements that behavior
//! once, generic over the record shape, instead of per entity.
//!
//! The controller is headless: it owns state and arithmetic but renders
//! nothing. Screens read [`Model::visible_page`] and draw it.
//!
//! ## State
//!
//! - **Collection**: ordered records, ids unique at all times.
//! - **SearchQuery**: case-folded substring over [`Record::search_text`];
//!   empty matches everything. Changing it resets to page 1.
//! - **PageWindow**: fixed page size, 1-based current page, always within
//!   `[1, total_pages]`.
//!
//! Filtering and slicing are recomputed on every read; the collections are
//! tens of records.
//!
//! [`Record::search_text`]: crate::record::Record::search_text

mod filtering;
mod model;
mod mutate;

#[cfg(test)]
mod tests;

pub use model::Model;
