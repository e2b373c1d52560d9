//! Core record abstractions shared by every list screen.
//!
//! A list screen is generic over the shape of the rows it manages. The only
//! things the list machinery needs from a row are a stable identifier and a
//! searchable text projection, which is what the [`Record`] trait provides.

use std::fmt::Display;

/// Trait for rows that can be managed by a list controller.
///
/// Records must be displayable (for table rendering) and cloneable (pages are
/// handed out by value). The identifier type is caller-defined: the live
/// backend uses Mongo-style string ids for most collections and numeric ids
/// for two legacy ones, so `Id` is an associated type rather than a fixed
/// choice.
///
/// # Examples
///
/// ```
/// use tutordesk::record::Record;
/// use std::fmt::Display;
///
/// #[derive(Clone)]
/// struct Tag {
///     id: u32,
///     label: String,
/// }
///
/// impl Display for Tag {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "{}", self.label)
///     }
/// }
///
/// impl Record for Tag {
///     type Id = u32;
///
///     fn id(&self) -> u32 {
///         self.id
///     }
///
///     fn search_text(&self) -> String {
///         self.label.clone()
///     }
/// }
/// ```
pub trait Record: Display + Clone + Send + Sync + 'static {
    /// The identifier type. Must be printable so it can appear in request
    /// paths and error messages.
    type Id: Clone + PartialEq + Display + Send + Sync + 'static;

    /// Returns the record's unique identifier.
    fn id(&self) -> Self::Id;

    /// Returns the text the search filter matches against.
    ///
    /// The match is a case-insensitive substring test, so this should
    /// concatenate whichever display fields are worth searching. It is not
    /// tokenized or ranked.
    fn search_text(&self) -> String;
}

/// One visible page of a filtered collection.
///
/// Produced by [`crate::controller::Model::visible_page`]; `records` holds at
/// most `page_size` rows and `total_pages` is always at least 1, even for an
/// empty collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    /// The records on the current page, in collection order.
    pub records: Vec<R>,
    /// Total number of pages for the current filter, never zero.
    pub total_pages: usize,
}
