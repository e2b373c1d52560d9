//! Query application and page derivation.

use super::Model;
use crate::record::{Page, Record};

impl<R: Record> Model<R> {
    /// Updates the search query and resets to page 1.
    ///
    /// The query is matched as a case-insensitive substring against each
    /// record's search text. An empty query matches everything. Resetting the
    /// page keeps the window valid no matter how much the filter narrows the
    /// collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use tutordesk::controller::Model;
    /// use tutordesk::entities::Category;
    ///
    /// let mut list: Model<Category> = Model::new(5);
    /// list.set_query("cloth");
    /// assert_eq!(list.query(), "cloth");
    /// assert_eq!(list.page(), 1);
    /// ```
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.page = 1;
    }

    /// Computes the currently visible page.
    ///
    /// Pure function of the current state: filters the collection by the
    /// query, derives `total_pages = max(1, ceil(filtered / page_size))`, and
    /// slices out the window for the current page. At most `page_size`
    /// records are returned, and walking every page yields the filtered
    /// collection exactly once.
    ///
    /// # Examples
    ///
    /// ```
    /// use tutordesk::controller::Model;
    /// use tutordesk::entities::Category;
    ///
    /// let mut list: Model<Category> = Model::new(5);
    /// let names = ["Electronics", "Clothing", "Books"];
    /// list.hydrate(
    ///     names
    ///         .iter()
    ///         .enumerate()
    ///         .map(|(i, n)| Category::new(format!("c{i}"), *n))
    ///         .collect(),
    /// )
    /// .unwrap();
    ///
    /// list.set_query("cloth");
    /// let page = list.visible_page();
    /// assert_eq!(page.records.len(), 1);
    /// assert_eq!(page.records[0].name, "Clothing");
    /// assert_eq!(page.total_pages, 1);
    /// ```
    pub fn visible_page(&self) -> Page<R> {
        let filtered = self.filtered();
        let total_pages = Self::pages_for(filtered.len(), self.page_size);

        let start = (self.page - 1) * self.page_size;
        let end = (start + self.page_size).min(filtered.len());
        let records = if start < filtered.len() {
            filtered[start..end].iter().map(|r| (*r).clone()).collect()
        } else {
            Vec::new()
        };

        Page {
            records,
            total_pages,
        }
    }

    /// Total pages for the current filter, never zero.
    pub fn total_pages(&self) -> usize {
        Self::pages_for(self.filtered().len(), self.page_size)
    }

    /// Records matching the current query, in collection order.
    pub(super) fn filtered(&self) -> Vec<&R> {
        if self.query.is_empty() {
            return self.records.iter().collect();
        }
        let needle = self.query.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.search_text().to_lowercase().contains(&needle))
            .collect()
    }

    pub(super) fn pages_for(filtered_len: usize, page_size: usize) -> usize {
        if filtered_len == 0 {
            1
        } else {
            filtered_len.div_ceil(page_size)
        }
    }
}
