//! Generic collection management screen.
//!
//! One instance per entity collection: fetches the collection on entry,
//! drives the list controller for search and paging, and opens the form or
//! confirmation modals for mutations. The collection only changes in response
//! to a completion message ([`ListFetched`], [`RecordCreated`],
//! [`RecordUpdated`], [`RecordDeleted`]); the key press that started a
//! mutation merely spawns the remote call and sets the pending flag, which
//! blocks further mutations until the outcome arrives.

use crate::confirm::{Confirm, Decision};
use crate::controller;
use crate::entities::Entity;
use crate::error::Result;
use crate::notify::Notice;
use crate::remote::RemoteListSource;
use crate::screen::form::{Form, FormOutcome};
use crate::screen::forward_key;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use bubbletea_widgets::{help, key, textinput};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use serde_json::Value;
use std::sync::Arc;

/// Outcome of fetching the full collection.
pub struct ListFetched<R: Entity>(pub Result<Vec<R>>);

/// Outcome of a create call; carries the stored record on success.
pub struct RecordCreated<R: Entity>(pub Result<R>);

/// Outcome of an update call; carries the stored record on success.
pub struct RecordUpdated<R: Entity>(pub Result<R>);

/// Outcome of a delete call; carries the id so the local copy can be
/// dropped without re-reading the selection.
pub struct RecordDeleted<R: Entity> {
    pub id: R::Id,
    pub result: Result<()>,
}

struct Keys {
    up: key::Binding,
    down: key::Binding,
    prev_page: key::Binding,
    next_page: key::Binding,
    search: key::Binding,
    add: key::Binding,
    edit: key::Binding,
    delete: key::Binding,
    refresh: key::Binding,
    toggle_help: key::Binding,
}

impl Default for Keys {
    fn default() -> Self {
        Self {
            up: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]).with_help("↑/k", "up"),
            down: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            prev_page: key::Binding::new(vec![KeyCode::Left, KeyCode::Char('h')])
                .with_help("←/h", "prev page"),
            next_page: key::Binding::new(vec![KeyCode::Right, KeyCode::Char('l')])
                .with_help("→/l", "next page"),
            search: key::Binding::new(vec![KeyCode::Char('/')]).with_help("/", "search"),
            add: key::Binding::new(vec![KeyCode::Char('a')]).with_help("a", "add"),
            edit: key::Binding::new(vec![KeyCode::Char('e'), KeyCode::Enter])
                .with_help("e/enter", "edit"),
            delete: key::Binding::new(vec![KeyCode::Char('d')]).with_help("d", "delete"),
            refresh: key::Binding::new(vec![KeyCode::Char('r')]).with_help("r", "refresh"),
            toggle_help: key::Binding::new(vec![KeyCode::Char('?')]).with_help("?", "help"),
        }
    }
}

impl help::KeyMap for Keys {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.up, &self.down, &self.search, &self.add, &self.delete, &self.toggle_help]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![&self.up, &self.down, &self.prev_page, &self.next_page],
            vec![&self.search, &self.refresh],
            vec![&self.add, &self.edit, &self.delete],
        ]
    }
}

enum Modal<R: Entity> {
    None,
    Form { editing: Option<R::Id>, form: Form },
    Confirm { id: R::Id, gate: Confirm },
}

/// List management screen for one entity collection.
pub struct ListScreen<R: Entity> {
    list: controller::Model<R>,
    source: Arc<dyn RemoteListSource<R>>,
    search: textinput::Model,
    searching: bool,
    cursor: usize,
    modal: Modal<R>,
    notice: Option<Notice>,
    loading: bool,
    pending: bool,
    keys: Keys,
    help: help::Model,
}

impl<R: Entity> ListScreen<R> {
    pub fn new(source: Arc<dyn RemoteListSource<R>>, page_size: usize) -> Self {
        let mut search = textinput::new();
        search.set_placeholder(&format!("search {}", R::PLURAL));
        Self {
            list: controller::Model::new(page_size),
            source,
            search,
            searching: false,
            cursor: 0,
            modal: Modal::None,
            notice: None,
            loading: false,
            pending: false,
            keys: Keys::default(),
            help: help::Model::new(),
        }
    }

    /// Starts a full re-fetch of the collection.
    pub fn refresh(&mut self) -> Cmd {
        self.loading = true;
        let source = Arc::clone(&self.source);
        Box::pin(async move { Some(Box::new(ListFetched::<R>(source.list().await)) as Msg) })
    }

    /// True while a modal or the search input should receive raw typing.
    /// The app uses this to keep global shortcuts out of the way.
    pub fn wants_text_input(&self) -> bool {
        self.searching || !matches!(self.modal, Modal::None)
    }

    fn create_cmd(&self, body: Value) -> Cmd {
        let source = Arc::clone(&self.source);
        Box::pin(async move {
            Some(Box::new(RecordCreated::<R>(source.create(body).await)) as Msg)
        })
    }

    fn update_cmd(&self, id: R::Id, body: Value) -> Cmd {
        let source = Arc::clone(&self.source);
        Box::pin(async move {
            Some(Box::new(RecordUpdated::<R>(source.update(&id, body).await)) as Msg)
        })
    }

    fn delete_cmd(&self, id: R::Id) -> Cmd {
        let source = Arc::clone(&self.source);
        Box::pin(async move {
            let result = source.delete(&id).await;
            Some(Box::new(RecordDeleted::<R> { id, result }) as Msg)
        })
    }

    fn selected_record(&self) -> Option<R> {
        self.list.visible_page().records.into_iter().nth(self.cursor)
    }

    fn clamp_cursor(&mut self) {
        let len = self.list.visible_page().records.len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(ListFetched(result)) = msg.downcast_ref::<ListFetched<R>>() {
            self.loading = false;
            match result {
                Ok(records) => {
                    if let Err(e) = self.list.hydrate(records.clone()) {
                        self.notice = Some(Notice::error(e.to_string()));
                    }
                }
                Err(e) => {
                    self.notice =
                        Some(Notice::error(format!("failed to load {}: {e}", R::PLURAL)));
                }
            }
            self.clamp_cursor();
            return None;
        }
        if let Some(RecordCreated(result)) = msg.downcast_ref::<RecordCreated<R>>() {
            self.pending = false;
            match result {
                Ok(record) => match self.list.insert(record.clone()) {
                    Ok(()) => {
                        self.notice = Some(Notice::success(format!("{} created", R::SINGULAR)));
                    }
                    Err(e) => self.notice = Some(Notice::error(e.to_string())),
                },
                Err(e) => self.notice = Some(Notice::error(e.to_string())),
            }
            return None;
        }
        if let Some(RecordUpdated(result)) = msg.downcast_ref::<RecordUpdated<R>>() {
            self.pending = false;
            match result {
                Ok(record) => match self.list.replace(&record.id(), record.clone()) {
                    Ok(()) => {
                        self.notice = Some(Notice::success(format!("{} updated", R::SINGULAR)));
                    }
                    Err(e) => self.notice = Some(Notice::error(e.to_string())),
                },
                Err(e) => self.notice = Some(Notice::error(e.to_string())),
            }
            return None;
        }
        if let Some(RecordDeleted { id, result }) = msg.downcast_ref::<RecordDeleted<R>>() {
            self.pending = false;
            match result {
                Ok(()) => match self.list.remove(id) {
                    Ok(()) => {
                        self.notice = Some(Notice::success(format!("{} deleted", R::SINGULAR)));
                    }
                    Err(e) => self.notice = Some(Notice::error(e.to_string())),
                },
                Err(e) => self.notice = Some(Notice::error(e.to_string())),
            }
            self.clamp_cursor();
            return None;
        }

        match &mut self.modal {
            Modal::Confirm { id, gate } => {
                let key = msg.downcast_ref::<KeyMsg>()?;
                match gate.update(key) {
                    Some(Decision::Confirmed) => {
                        let id = id.clone();
                        self.modal = Modal::None;
                        self.pending = true;
                        Some(self.delete_cmd(id))
                    }
                    Some(Decision::Aborted) => {
                        self.modal = Modal::None;
                        self.notice = Some(Notice::info("delete cancelled"));
                        None
                    }
                    None => None,
                }
            }
            Modal::Form { editing, form } => match form.update(msg) {
                FormOutcome::Submitted(body) => {
                    let editing = editing.clone();
                    self.modal = Modal::None;
                    self.pending = true;
                    match editing {
                        Some(id) => Some(self.update_cmd(id, body)),
                        None => Some(self.create_cmd(body)),
                    }
                }
                FormOutcome::Cancelled => {
                    self.modal = Modal::None;
                    None
                }
                FormOutcome::Pending(cmd) => cmd,
            },
            Modal::None => {
                let key = msg.downcast_ref::<KeyMsg>()?;
                if self.searching {
                    return self.update_search(key);
                }
                self.update_browse(key)
            }
        }
    }

    fn update_search(&mut self, key: &KeyMsg) -> Option<Cmd> {
        match key.key {
            KeyCode::Enter => {
                self.searching = false;
                self.search.blur();
                None
            }
            KeyCode::Esc => {
                self.searching = false;
                self.search.blur();
                self.search.set_value("");
                self.list.set_query("");
                self.cursor = 0;
                None
            }
            _ => {
                let cmd = self.search.update(forward_key(key));
                self.list.set_query(&self.search.value());
                self.cursor = 0;
                cmd
            }
        }
    }

    fn update_browse(&mut self, key: &KeyMsg) -> Option<Cmd> {
        if self.keys.up.matches(key) {
            self.cursor = self.cursor.saturating_sub(1);
            return None;
        }
        if self.keys.down.matches(key) {
            let len = self.list.visible_page().records.len();
            if self.cursor + 1 < len {
                self.cursor += 1;
            }
            return None;
        }
        if self.keys.prev_page.matches(key) {
            self.list.go_to_page(self.list.page().saturating_sub(1));
            self.clamp_cursor();
            return None;
        }
        if self.keys.next_page.matches(key) {
            self.list.go_to_page(self.list.page() + 1);
            self.clamp_cursor();
            return None;
        }
        if self.keys.search.matches(key) {
            self.searching = true;
            return Some(self.search.focus());
        }
        if self.keys.refresh.matches(key) {
            return Some(self.refresh());
        }
        if self.keys.toggle_help.matches(key) {
            self.help.show_all = !self.help.show_all;
            return None;
        }
        if self.pending {
            // A mutation is already in flight; serialize.
            return None;
        }
        if self.keys.add.matches(key) {
            let mut form = Form::blank::<R>();
            let cmd = form.focus_first();
            self.modal = Modal::Form {
                editing: None,
                form,
            };
            return Some(cmd);
        }
        if self.keys.edit.matches(key) {
            if let Some(record) = self.selected_record() {
                let mut form = Form::prefilled(&record);
                let cmd = form.focus_first();
                self.modal = Modal::Form {
                    editing: Some(record.id()),
                    form,
                };
                return Some(cmd);
            }
            return None;
        }
        if self.keys.delete.matches(key) {
            if let Some(record) = self.selected_record() {
                self.modal = Modal::Confirm {
                    id: record.id(),
                    gate: Confirm::new(format!("Delete {} \"{record}\"?", R::SINGULAR)),
                };
            }
            return None;
        }
        None
    }

    pub fn view(&self) -> String {
        let title = Style::new()
            .foreground(AdaptiveColor {
                Light: "#874BFD",
                Dark: "#7D56F4",
            })
            .bold(true)
            .render(R::TITLE);

        match &self.modal {
            Modal::Form { form, .. } => return format!("{title}\n\n{}", form.view()),
            Modal::Confirm { gate, .. } => return format!("{title}\n\n{}", gate.view()),
            Modal::None => {}
        }

        let mut out = format!("{title}\n");
        if self.searching || !self.list.query().is_empty() {
            out.push_str(&format!("\n/{}\n", self.search.view()));
        }
        if self.loading {
            out.push_str(&format!("\nLoading {}…\n", R::PLURAL));
            return out;
        }

        let page = self.list.visible_page();
        out.push('\n');
        if page.records.is_empty() {
            out.push_str(&format!("No {} found.\n", R::PLURAL));
        } else {
            for (i, record) in page.records.iter().enumerate() {
                let line = record.to_string();
                if i == self.cursor {
                    let styled = Style::new()
                        .foreground(AdaptiveColor {
                            Light: "#EE6FF8",
                            Dark: "#EE6FF8",
                        })
                        .bold(true)
                        .render(&format!("▸ {line}"));
                    out.push_str(&format!("{styled}\n"));
                } else {
                    out.push_str(&format!("  {line}\n"));
                }
            }
        }

        let footer = Style::new()
            .foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            })
            .render(&format!(
                "page {}/{} • {} total",
                self.list.page(),
                page.total_pages,
                self.list.len()
            ));
        out.push_str(&format!("\n{footer}\n"));

        if let Some(notice) = &self.notice {
            out.push_str(&format!("{}\n", notice.view()));
        }
        if self.pending {
            out.push_str("working…\n");
        }
        out.push_str(&format!("\n{}", self.help.view(&self.keys)));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Category;
    use async_trait::async_trait;
    use crossterm::event::KeyModifiers;

    /// Source that never gets awaited in these tests; screens are driven by
    /// feeding completion messages directly.
    struct NullSource;

    #[async_trait]
    impl RemoteListSource<Category> for NullSource {
        async fn list(&self) -> Result<Vec<Category>> {
            Ok(Vec::new())
        }
        async fn create(&self, _body: Value) -> Result<Category> {
            Ok(Category::new("new", "New"))
        }
        async fn update(&self, id: &String, _body: Value) -> Result<Category> {
            Ok(Category::new(id.clone(), "Updated"))
        }
        async fn delete(&self, _id: &String) -> Result<()> {
            Ok(())
        }
    }

    fn screen_with(records: Vec<Category>) -> ListScreen<Category> {
        let mut screen = ListScreen::new(Arc::new(NullSource), 5);
        let msg: Msg = Box::new(ListFetched::<Category>(Ok(records)));
        screen.update(&msg);
        screen
    }

    fn categories(n: usize) -> Vec<Category> {
        (1..=n)
            .map(|i| Category::new(format!("c{i}"), format!("Category {i}")))
            .collect()
    }

    fn press(screen: &mut ListScreen<Category>, code: KeyCode) -> Option<Cmd> {
        let msg: Msg = Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        });
        screen.update(&msg)
    }

    #[test]
    fn fetch_success_hydrates_the_list() {
        let screen = screen_with(categories(7));
        assert_eq!(screen.list.len(), 7);
        assert_eq!(screen.list.visible_page().total_pages, 2);
        assert!(!screen.loading);
    }

    #[test]
    fn fetch_failure_keeps_records_and_reports() {
        let mut screen = screen_with(categories(3));
        let msg: Msg = Box::new(ListFetched::<Category>(Err(
            crate::error::Error::Remote("boom".into()),
        )));
        screen.update(&msg);

        assert_eq!(screen.list.len(), 3);
        let notice = screen.notice.expect("error notice");
        assert_eq!(notice.level, crate::notify::Level::Error);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut screen = screen_with(categories(3));

        press(&mut screen, KeyCode::Char('d'));
        assert!(matches!(screen.modal, Modal::Confirm { .. }));
        // The collection is untouched while the gate is open.
        assert_eq!(screen.list.len(), 3);
        assert!(!screen.pending);
    }

    #[test]
    fn aborted_delete_changes_nothing() {
        let mut screen = screen_with(categories(3));

        press(&mut screen, KeyCode::Char('d'));
        let cmd = press(&mut screen, KeyCode::Char('n'));

        assert!(cmd.is_none());
        assert!(matches!(screen.modal, Modal::None));
        assert_eq!(screen.list.len(), 3);
        assert!(!screen.pending);
    }

    #[test]
    fn confirmed_delete_spawns_the_call_and_applies_on_success() {
        let mut screen = screen_with(categories(3));

        press(&mut screen, KeyCode::Char('d'));
        let cmd = press(&mut screen, KeyCode::Char('y'));
        assert!(cmd.is_some());
        assert!(screen.pending);
        // Local copy untouched until the backend confirms.
        assert_eq!(screen.list.len(), 3);

        let msg: Msg = Box::new(RecordDeleted::<Category> {
            id: "c1".to_string(),
            result: Ok(()),
        });
        screen.update(&msg);

        assert_eq!(screen.list.len(), 2);
        assert!(!screen.pending);
    }

    #[test]
    fn failed_delete_keeps_the_record() {
        let mut screen = screen_with(categories(3));

        press(&mut screen, KeyCode::Char('d'));
        press(&mut screen, KeyCode::Char('y'));
        let msg: Msg = Box::new(RecordDeleted::<Category> {
            id: "c1".to_string(),
            result: Err(crate::error::Error::Remote("500".into())),
        });
        screen.update(&msg);

        assert_eq!(screen.list.len(), 3);
        assert!(!screen.pending);
        assert_eq!(screen.notice.unwrap().level, crate::notify::Level::Error);
    }

    #[test]
    fn blank_required_field_makes_no_remote_call() {
        let mut screen = screen_with(categories(2));

        press(&mut screen, KeyCode::Char('a'));
        assert!(matches!(screen.modal, Modal::Form { .. }));

        let cmd = press(&mut screen, KeyCode::Enter);
        assert!(cmd.is_none());
        assert!(!screen.pending);
        assert!(matches!(screen.modal, Modal::Form { .. }));
        assert_eq!(screen.list.len(), 2);
    }

    #[test]
    fn create_applies_only_on_success_message() {
        let mut screen = screen_with(categories(2));

        press(&mut screen, KeyCode::Char('a'));
        press(&mut screen, KeyCode::Char('P'));
        let cmd = press(&mut screen, KeyCode::Enter);
        assert!(cmd.is_some());
        assert!(screen.pending);
        assert_eq!(screen.list.len(), 2);

        let msg: Msg = Box::new(RecordCreated::<Category>(Ok(Category::new("c9", "P"))));
        screen.update(&msg);

        assert_eq!(screen.list.len(), 3);
        assert!(!screen.pending);
    }

    #[test]
    fn update_replaces_in_place() {
        let mut screen = screen_with(categories(3));

        let msg: Msg = Box::new(RecordUpdated::<Category>(Ok(Category::new(
            "c2", "Renamed",
        ))));
        screen.update(&msg);

        assert_eq!(screen.list.records()[1].name, "Renamed");
    }

    #[test]
    fn mutations_are_serialized_while_pending() {
        let mut screen = screen_with(categories(3));

        press(&mut screen, KeyCode::Char('d'));
        press(&mut screen, KeyCode::Char('y'));
        assert!(screen.pending);

        // Further mutation keys are ignored until the outcome lands.
        press(&mut screen, KeyCode::Char('d'));
        assert!(matches!(screen.modal, Modal::None));
        press(&mut screen, KeyCode::Char('a'));
        assert!(matches!(screen.modal, Modal::None));
    }

    #[test]
    fn search_filters_live_and_esc_clears() {
        let mut screen = screen_with(vec![
            Category::new("c1", "Electronics"),
            Category::new("c2", "Clothing"),
            Category::new("c3", "Books"),
        ]);

        press(&mut screen, KeyCode::Char('/'));
        assert!(screen.wants_text_input());
        for c in "cloth".chars() {
            press(&mut screen, KeyCode::Char(c));
        }
        let page = screen.list.visible_page();
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].name, "Clothing");

        press(&mut screen, KeyCode::Esc);
        assert!(!screen.wants_text_input());
        assert_eq!(screen.list.visible_page().records.len(), 3);
    }

    #[test]
    fn page_keys_move_the_window() {
        let mut screen = screen_with(categories(7));

        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.list.page(), 2);
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.list.page(), 2);
        press(&mut screen, KeyCode::Left);
        assert_eq!(screen.list.page(), 1);
    }

    #[test]
    fn cursor_stays_within_the_page() {
        let mut screen = screen_with(categories(7));

        for _ in 0..10 {
            press(&mut screen, KeyCode::Down);
        }
        assert_eq!(screen.cursor, 4);
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.cursor, 1);
    }

    #[test]
    fn delete_on_trailing_page_clamps_cursor_and_page() {
        let mut screen = screen_with(categories(6));
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.list.page(), 2);

        press(&mut screen, KeyCode::Char('d'));
        press(&mut screen, KeyCode::Char('y'));
        let msg: Msg = Box::new(RecordDeleted::<Category> {
            id: "c6".to_string(),
            result: Ok(()),
        });
        screen.update(&msg);

        assert_eq!(screen.list.page(), 1);
        assert_eq!(screen.cursor, 0);
        assert_eq!(screen.list.visible_page().records.len(), 5);
    }

    #[test]
    fn view_lists_the_visible_page() {
        let screen = screen_with(categories(7));
        let view = screen.view();
        assert!(view.contains("Category 1"));
        assert!(view.contains("Category 5"));
        assert!(!view.contains("Category 6"));
        assert!(view.contains("page 1/2"));
    }
}
