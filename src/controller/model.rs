//! Controller state and accessors.

use crate::record::Record;

/// List state for one screen: collection, search query, and page window.
///
/// The controller owns its collection exclusively. It is created empty,
/// hydrated once from a successful fetch, mutated by the reconciliation flow,
/// and dropped with the screen that owns it. No cross-screen sharing exists;
/// each screen fetches its own copy.
///
/// # Examples
///
/// ```
/// use tutordesk::controller::Model;
/// use tutordesk::entities::Category;
///
/// let mut list: Model<Category> = Model::new(5);
/// assert!(list.is_empty());
/// assert_eq!(list.page(), 1);
/// assert_eq!(list.total_pages(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Model<R: Record> {
    pub(super) records: Vec<R>,
    pub(super) query: String,
    /// 1-based. Invariant: `1 <= page <= total_pages()`.
    pub(super) page: usize,
    pub(super) page_size: usize,
}

impl<R: Record> Model<R> {
    /// Creates an empty controller with the given page size.
    ///
    /// A page size of zero is clamped to 1, matching how the backend screens
    /// treat their `recordsPerPage` constant as always positive.
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            query: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Returns the number of records in the full (unfiltered) collection.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the full collection is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the full collection in order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Returns the current search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the current 1-based page number.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the fixed page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Looks up a record by id.
    pub fn find(&self, id: &R::Id) -> Option<&R> {
        self.records.iter().find(|r| r.id() == *id)
    }

    /// Position of a record in the collection, if present.
    pub(super) fn position(&self, id: &R::Id) -> Option<usize> {
        self.records.iter().position(|r| r.id() == *id)
    }
}
