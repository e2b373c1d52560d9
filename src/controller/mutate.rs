//! Navigation and collection mutation.
//!
//! Mutations here are local bookkeeping only. The reconciliation flow calls
//! them after the backend has confirmed the corresponding create/update/
//! delete, so in normal operation the error variants never fire; they guard
//! the id-uniqueness invariant all the same.

use super::Model;
use crate::error::{Error, Result};
use crate::record::Record;

impl<R: Record> Model<R> {
    /// Moves to page `p` if it is within `[1, total_pages]`.
    ///
    /// Out-of-bounds requests are a state-preserving no-op, so callers can
    /// wire "next"/"prev" keys without their own bounds checks.
    ///
    /// # Examples
    ///
    /// ```
    /// use tutordesk::controller::Model;
    /// use tutordesk::entities::Category;
    ///
    /// let mut list: Model<Category> = Model::new(5);
    /// list.hydrate(
    ///     (1..=7)
    ///         .map(|i| Category::new(format!("c{i}"), format!("Category {i}")))
    ///         .collect(),
    /// )
    /// .unwrap();
    ///
    /// list.go_to_page(2);
    /// assert_eq!(list.page(), 2);
    /// list.go_to_page(3); // out of bounds, ignored
    /// assert_eq!(list.page(), 2);
    /// ```
    pub fn go_to_page(&mut self, p: usize) {
        if p >= 1 && p <= self.total_pages() {
            self.page = p;
        }
    }

    /// Appends a record, failing with [`Error::DuplicateId`] if its id is
    /// already present.
    pub fn insert(&mut self, record: R) -> Result<()> {
        let id = record.id();
        if self.position(&id).is_some() {
            return Err(Error::DuplicateId(id.to_string()));
        }
        self.records.push(record);
        Ok(())
    }

    /// Overwrites the record with the given id in place, preserving its
    /// position in iteration order. Fails with [`Error::NotFound`] if absent.
    pub fn replace(&mut self, id: &R::Id, record: R) -> Result<()> {
        match self.position(id) {
            Some(idx) => {
                self.records[idx] = record;
                Ok(())
            }
            None => Err(Error::NotFound(id.to_string())),
        }
    }

    /// Deletes the record with the given id, failing with
    /// [`Error::NotFound`] if absent.
    ///
    /// Afterwards the current page is clamped to the recomputed page count,
    /// so deleting the last record of a trailing page lands on the new last
    /// page instead of pointing past the end.
    pub fn remove(&mut self, id: &R::Id) -> Result<()> {
        match self.position(id) {
            Some(idx) => {
                self.records.remove(idx);
                self.page = self.page.min(self.total_pages());
                Ok(())
            }
            None => Err(Error::NotFound(id.to_string())),
        }
    }

    /// Replaces the whole collection after a successful fetch and resets to
    /// page 1.
    ///
    /// The batch is rejected with [`Error::DuplicateId`] if it contains two
    /// records with the same id; the existing collection is left untouched in
    /// that case. The query is kept, so a refresh does not clear an active
    /// search.
    pub fn hydrate(&mut self, records: Vec<R>) -> Result<()> {
        for (i, a) in records.iter().enumerate() {
            if records[i + 1..].iter().any(|b| b.id() == a.id()) {
                return Err(Error::DuplicateId(a.id().to_string()));
            }
        }
        self.records = records;
        self.page = 1;
        Ok(())
    }
}
