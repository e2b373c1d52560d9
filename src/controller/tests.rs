//! Tests for the list controller.

use super::Model;
use crate::entities::Category;
use crate::error::Error;

fn categories(n: usize) -> Vec<Category> {
    (1..=n)
        .map(|i| Category::new(format!("c{i}"), format!("Category {i}")))
        .collect()
}

fn named(names: &[&str]) -> Vec<Category> {
    names
        .iter()
        .enumerate()
        .map(|(i, n)| Category::new(format!("c{i}"), *n))
        .collect()
}

fn hydrated(records: Vec<Category>) -> Model<Category> {
    let mut list = Model::new(5);
    list.hydrate(records).unwrap();
    list
}

#[test]
fn empty_controller_has_one_page() {
    let list: Model<Category> = Model::new(5);
    let page = list.visible_page();
    assert!(page.records.is_empty());
    assert_eq!(page.total_pages, 1);
    assert_eq!(list.page(), 1);
}

#[test]
fn zero_page_size_is_clamped_to_one() {
    let list: Model<Category> = Model::new(0);
    assert_eq!(list.page_size(), 1);
}

#[test]
fn seven_records_page_size_five() {
    // 7 records at page size 5: a full page then a 2-record remainder.
    let mut list = hydrated(categories(7));

    let page = list.visible_page();
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.records.len(), 5);
    assert_eq!(page.records[0].name, "Category 1");
    assert_eq!(page.records[4].name, "Category 5");

    list.go_to_page(2);
    let page = list.visible_page();
    assert_eq!(page.records.len(), 2);
    assert_eq!(page.records[0].name, "Category 6");
    assert_eq!(page.records[1].name, "Category 7");
}

#[test]
fn pages_partition_the_filtered_collection() {
    let mut list = hydrated(categories(23));

    let mut seen = Vec::new();
    let total = list.visible_page().total_pages;
    for p in 1..=total {
        list.go_to_page(p);
        let page = list.visible_page();
        assert!(page.records.len() <= list.page_size());
        seen.extend(page.records.into_iter().map(|c| c.id));
    }

    let expected: Vec<String> = list.records().iter().map(|c| c.id.clone()).collect();
    assert_eq!(seen, expected);
}

#[test]
fn substring_search_is_case_insensitive() {
    let mut list = hydrated(named(&["Electronics", "Clothing", "Books"]));

    list.set_query("cloth");
    let page = list.visible_page();
    assert_eq!(page.records.len(), 1);
    assert_eq!(page.records[0].name, "Clothing");
    assert_eq!(page.total_pages, 1);
}

#[test]
fn empty_query_matches_everything() {
    let mut list = hydrated(categories(3));
    list.set_query("");
    assert_eq!(list.visible_page().records.len(), 3);
}

#[test]
fn filtering_is_idempotent() {
    let mut list = hydrated(named(&["Alpha", "Beta", "Alphabet", "Gamma"]));

    list.set_query("alpha");
    let first = list.visible_page();
    list.set_query("alpha");
    let second = list.visible_page();

    assert_eq!(first, second);
}

#[test]
fn set_query_resets_page() {
    let mut list = hydrated(categories(12));
    list.go_to_page(3);
    assert_eq!(list.page(), 3);

    list.set_query("Category");
    assert_eq!(list.page(), 1);
}

#[test]
fn go_to_page_out_of_bounds_is_a_noop() {
    let mut list = hydrated(categories(7));
    list.go_to_page(2);

    list.go_to_page(0);
    assert_eq!(list.page(), 2);
    list.go_to_page(3);
    assert_eq!(list.page(), 2);
}

#[test]
fn insert_rejects_duplicate_id() {
    let mut list = hydrated(categories(2));
    let err = list.insert(Category::new("c1", "Shadow")).unwrap_err();
    assert!(matches!(err, Error::DuplicateId(_)));
    assert_eq!(list.len(), 2);
}

#[test]
fn insert_then_remove_round_trips() {
    let mut list = hydrated(categories(4));
    let before: Vec<String> = list.records().iter().map(|c| c.id.clone()).collect();

    list.insert(Category::new("c9", "Transient")).unwrap();
    list.remove(&"c9".to_string()).unwrap();

    let after: Vec<String> = list.records().iter().map(|c| c.id.clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn replace_preserves_position() {
    let mut list = hydrated(categories(5));

    list.replace(&"c3".to_string(), Category::new("c3", "Renamed"))
        .unwrap();

    assert_eq!(list.records()[2].name, "Renamed");
    assert_eq!(list.records()[2].id, "c3");
    assert_eq!(list.len(), 5);
}

#[test]
fn replace_missing_id_fails() {
    let mut list = hydrated(categories(2));
    let err = list
        .replace(&"nope".to_string(), Category::new("nope", "X"))
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn remove_missing_id_fails() {
    let mut list = hydrated(categories(2));
    let err = list.remove(&"nope".to_string()).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn remove_clamps_trailing_page() {
    // 6 records: page 2 holds only c6. Removing it must clamp back to page 1
    // instead of leaving the window past the end.
    let mut list = hydrated(categories(6));
    list.go_to_page(2);

    list.remove(&"c6".to_string()).unwrap();

    assert_eq!(list.page(), 1);
    assert_eq!(list.visible_page().total_pages, 1);
    assert_eq!(list.visible_page().records.len(), 5);
}

#[test]
fn remove_off_trailing_page_keeps_current_page() {
    let mut list = hydrated(categories(11));
    list.go_to_page(2);

    list.remove(&"c1".to_string()).unwrap();

    assert_eq!(list.page(), 2);
    assert_eq!(list.visible_page().total_pages, 2);
}

#[test]
fn hydrate_resets_page_and_keeps_query() {
    let mut list = hydrated(categories(12));
    list.set_query("Category 1");
    list.go_to_page(2);

    list.hydrate(categories(3)).unwrap();

    assert_eq!(list.page(), 1);
    assert_eq!(list.query(), "Category 1");
    assert_eq!(list.len(), 3);
}

#[test]
fn hydrate_rejects_duplicate_ids() {
    let mut list = hydrated(categories(2));
    let batch = vec![
        Category::new("x1", "One"),
        Category::new("x1", "One again"),
    ];

    let err = list.hydrate(batch).unwrap_err();

    assert!(matches!(err, Error::DuplicateId(_)));
    assert_eq!(list.len(), 2);
}

#[test]
fn find_looks_up_by_id() {
    let list = hydrated(categories(3));
    assert_eq!(list.find(&"c2".to_string()).unwrap().name, "Category 2");
    assert!(list.find(&"zz".to_string()).is_none());
}
