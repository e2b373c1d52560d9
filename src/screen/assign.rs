//! Relationship management screen.
//!
//! Generic over a parent and child entity; the three live pairings are
//! teacher/course, student/course, and teacher/student. The screen walks
//! through three modes: pick a parent from the roster, browse that parent's
//! linked children, and pick a child from the catalog to link (or to stand
//! in for one being replaced). Membership is never edited locally: after
//! every successful assign/remove/replace the linked set is re-fetched from
//! the backend.

use crate::confirm::{Confirm, Decision};
use crate::controller;
use crate::entities::Entity;
use crate::error::Result;
use crate::notify::Notice;
use crate::record::Record;
use crate::remote::{RelationSource, RemoteListSource};
use crate::screen::forward_key;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use bubbletea_widgets::textinput;
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use std::marker::PhantomData;
use std::sync::Arc;

/// Roster of parents plus the full child catalog, fetched together on entry.
struct RosterFetched<P: Entity, C: Entity> {
    parents: Result<Vec<P>>,
    catalog: Result<Vec<C>>,
}

/// The children currently linked to the selected parent.
struct ChildrenFetched<P: Entity, C: Entity> {
    result: Result<Vec<C>>,
    _parent: PhantomData<fn() -> P>,
}

/// Outcome of an assign/remove/replace call.
struct RelationChanged<P: Entity, C: Entity> {
    action: &'static str,
    result: Result<()>,
    _types: PhantomData<fn() -> (P, C)>,
}

enum Mode<C: Record> {
    /// Choosing which parent's links to manage.
    PickParent,
    /// Viewing the selected parent's linked children.
    Browse,
    /// Choosing a child from the catalog; `replace` carries the outgoing
    /// child when this pick completes a replacement.
    PickChild { replace: Option<C::Id> },
    /// Confirming removal of a linked child.
    ConfirmRemove { id: C::Id, gate: Confirm },
}

/// Links between one parent collection and one child collection.
pub struct AssignScreen<P: Entity, C: Entity> {
    parent_source: Arc<dyn RemoteListSource<P>>,
    child_source: Arc<dyn RemoteListSource<C>>,
    relation: Arc<dyn RelationSource<C>>,
    title: &'static str,
    parents: controller::Model<P>,
    parent: Option<P>,
    children: controller::Model<C>,
    catalog: Vec<C>,
    picker: controller::Model<C>,
    mode: Mode<C>,
    search: textinput::Model,
    searching: bool,
    cursor: usize,
    notice: Option<Notice>,
    loading: bool,
    pending: bool,
}

impl<P: Entity, C: Entity> AssignScreen<P, C> {
    pub fn new(
        parent_source: Arc<dyn RemoteListSource<P>>,
        child_source: Arc<dyn RemoteListSource<C>>,
        relation: Arc<dyn RelationSource<C>>,
        title: &'static str,
        page_size: usize,
    ) -> Self {
        let mut search = textinput::new();
        search.set_placeholder("search");
        Self {
            parent_source,
            child_source,
            relation,
            title,
            parents: controller::Model::new(page_size),
            parent: None,
            children: controller::Model::new(page_size),
            catalog: Vec::new(),
            picker: controller::Model::new(page_size),
            mode: Mode::PickParent,
            search,
            searching: false,
            cursor: 0,
            notice: None,
            loading: false,
            pending: false,
        }
    }

    /// Fetches the parent roster and the child catalog.
    pub fn refresh(&mut self) -> Cmd {
        self.loading = true;
        let parents = Arc::clone(&self.parent_source);
        let children = Arc::clone(&self.child_source);
        Box::pin(async move {
            Some(Box::new(RosterFetched::<P, C> {
                parents: parents.list().await,
                catalog: children.list().await,
            }) as Msg)
        })
    }

    pub fn wants_text_input(&self) -> bool {
        self.searching
    }

    fn children_cmd(&self, parent_id: String) -> Cmd {
        let relation = Arc::clone(&self.relation);
        Box::pin(async move {
            Some(Box::new(ChildrenFetched::<P, C> {
                result: relation.children_of(&parent_id).await,
                _parent: PhantomData,
            }) as Msg)
        })
    }

    fn relation_cmd<F>(&mut self, action: &'static str, call: F) -> Cmd
    where
        F: std::future::Future<Output = Result<()>> + Send + 'static,
    {
        self.pending = true;
        Box::pin(async move {
            Some(Box::new(RelationChanged::<P, C> {
                action,
                result: call.await,
                _types: PhantomData,
            }) as Msg)
        })
    }

    /// Catalog entries not already linked to the selected parent.
    fn candidates(&self) -> Vec<C> {
        self.catalog
            .iter()
            .filter(|c| self.children.find(&c.id()).is_none())
            .cloned()
            .collect()
    }

    fn clamp_cursor(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(fetched) = msg.downcast_ref::<RosterFetched<P, C>>() {
            self.loading = false;
            match (&fetched.parents, &fetched.catalog) {
                (Ok(parents), Ok(catalog)) => {
                    if let Err(e) = self.parents.hydrate(parents.clone()) {
                        self.notice = Some(Notice::error(e.to_string()));
                    }
                    self.catalog = catalog.clone();
                    self.mode = Mode::PickParent;
                    self.cursor = 0;
                }
                (Err(e), _) | (_, Err(e)) => {
                    self.notice = Some(Notice::error(format!("failed to load: {e}")));
                }
            }
            return None;
        }
        if let Some(fetched) = msg.downcast_ref::<ChildrenFetched<P, C>>() {
            self.pending = false;
            self.loading = false;
            match &fetched.result {
                Ok(children) => {
                    if let Err(e) = self.children.hydrate(children.clone()) {
                        self.notice = Some(Notice::error(e.to_string()));
                    }
                    self.mode = Mode::Browse;
                    self.clamp_cursor(self.children.visible_page().records.len());
                }
                Err(e) => {
                    self.notice =
                        Some(Notice::error(format!("failed to load {}: {e}", C::PLURAL)));
                    self.mode = Mode::PickParent;
                }
            }
            return None;
        }
        if let Some(changed) = msg.downcast_ref::<RelationChanged<P, C>>() {
            match &changed.result {
                Ok(()) => {
                    self.notice = Some(Notice::success(format!(
                        "{} {}",
                        C::SINGULAR,
                        changed.action
                    )));
                    // Membership is re-read rather than patched locally.
                    if let Some(parent) = &self.parent {
                        return Some(self.children_cmd(parent.id().to_string()));
                    }
                    self.pending = false;
                }
                Err(e) => {
                    self.pending = false;
                    self.notice = Some(Notice::error(e.to_string()));
                }
            }
            return None;
        }

        let key = msg.downcast_ref::<KeyMsg>()?;
        if self.searching {
            return self.update_search(key);
        }
        match &self.mode {
            Mode::PickParent => self.update_pick_parent(key),
            Mode::Browse => self.update_browse(key),
            Mode::PickChild { .. } => self.update_pick_child(key),
            Mode::ConfirmRemove { .. } => self.update_confirm(key),
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
                self.apply_query();
                None
            }
            _ => {
                let cmd = self.search.update(forward_key(key));
                self.apply_query();
                cmd
            }
        }
    }

    fn apply_query(&mut self) {
        let query = self.search.value();
        match self.mode {
            Mode::PickParent => self.parents.set_query(&query),
            Mode::PickChild { .. } => self.picker.set_query(&query),
            _ => {}
        }
        self.cursor = 0;
    }

    fn update_pick_parent(&mut self, key: &KeyMsg) -> Option<Cmd> {
        let page_len = self.parents.visible_page().records.len();
        match key.key {
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < page_len {
                    self.cursor += 1;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.parents.go_to_page(self.parents.page().saturating_sub(1));
                self.clamp_cursor(self.parents.visible_page().records.len());
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.parents.go_to_page(self.parents.page() + 1);
                self.clamp_cursor(self.parents.visible_page().records.len());
            }
            KeyCode::Char('/') => {
                self.searching = true;
                return Some(self.search.focus());
            }
            KeyCode::Char('r') => return Some(self.refresh()),
            KeyCode::Enter => {
                let record = self
                    .parents
                    .visible_page()
                    .records
                    .into_iter()
                    .nth(self.cursor)?;
                let id = record.id().to_string();
                self.parent = Some(record);
                self.loading = true;
                self.cursor = 0;
                return Some(self.children_cmd(id));
            }
            _ => {}
        }
        None
    }

    fn update_browse(&mut self, key: &KeyMsg) -> Option<Cmd> {
        let page_len = self.children.visible_page().records.len();
        match key.key {
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < page_len {
                    self.cursor += 1;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.children
                    .go_to_page(self.children.page().saturating_sub(1));
                self.clamp_cursor(self.children.visible_page().records.len());
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.children.go_to_page(self.children.page() + 1);
                self.clamp_cursor(self.children.visible_page().records.len());
            }
            KeyCode::Esc => {
                self.mode = Mode::PickParent;
                self.parent = None;
                self.cursor = 0;
            }
            _ if self.pending => {}
            KeyCode::Char('a') => {
                self.open_picker(None);
            }
            KeyCode::Char('c') => {
                if let Some(child) = self.selected_child() {
                    self.open_picker(Some(child.id()));
                }
            }
            KeyCode::Char('d') => {
                if let Some(child) = self.selected_child() {
                    self.mode = Mode::ConfirmRemove {
                        id: child.id(),
                        gate: Confirm::new(format!("Remove {} \"{child}\"?", C::SINGULAR)),
                    };
                }
            }
            _ => {}
        }
        None
    }

    fn selected_child(&self) -> Option<C> {
        self.children
            .visible_page()
            .records
            .into_iter()
            .nth(self.cursor)
    }

    fn open_picker(&mut self, replace: Option<C::Id>) {
        let candidates = self.candidates();
        if candidates.is_empty() {
            self.notice = Some(Notice::info(format!("no {} left to assign", C::PLURAL)));
            return;
        }
        // Candidate ids are unique because the catalog's are.
        let _ = self.picker.hydrate(candidates);
        self.picker.set_query("");
        self.search.set_value("");
        self.mode = Mode::PickChild { replace };
        self.cursor = 0;
    }

    fn update_pick_child(&mut self, key: &KeyMsg) -> Option<Cmd> {
        let page_len = self.picker.visible_page().records.len();
        match key.key {
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < page_len {
                    self.cursor += 1;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.picker.go_to_page(self.picker.page().saturating_sub(1));
                self.clamp_cursor(self.picker.visible_page().records.len());
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.picker.go_to_page(self.picker.page() + 1);
                self.clamp_cursor(self.picker.visible_page().records.len());
            }
            KeyCode::Char('/') => {
                self.searching = true;
                return Some(self.search.focus());
            }
            KeyCode::Esc => {
                self.mode = Mode::Browse;
                self.cursor = 0;
            }
            KeyCode::Enter => {
                let child = self
                    .picker
                    .visible_page()
                    .records
                    .into_iter()
                    .nth(self.cursor)?;
                let parent_id = self.parent.as_ref()?.id().to_string();
                let child_id = child.id().to_string();
                let replace = match &self.mode {
                    Mode::PickChild { replace } => replace.clone(),
                    _ => None,
                };
                self.mode = Mode::Browse;
                self.cursor = 0;
                let relation = Arc::clone(&self.relation);
                return Some(match replace {
                    Some(old) => {
                        let old = old.to_string();
                        self.relation_cmd("replaced", async move {
                            relation.reassign(&parent_id, &old, &child_id).await
                        })
                    }
                    None => self.relation_cmd("assigned", async move {
                        relation.assign(&parent_id, &child_id).await
                    }),
                });
            }
            _ => {}
        }
        None
    }

    fn update_confirm(&mut self, key: &KeyMsg) -> Option<Cmd> {
        let (id, gate) = match &self.mode {
            Mode::ConfirmRemove { id, gate } => (id.clone(), gate),
            _ => return None,
        };
        match gate.update(key) {
            Some(Decision::Confirmed) => {
                self.mode = Mode::Browse;
                let parent_id = self.parent.as_ref()?.id().to_string();
                let child_id = id.to_string();
                let relation = Arc::clone(&self.relation);
                Some(self.relation_cmd("removed", async move {
                    relation.unassign(&parent_id, &child_id).await
                }))
            }
            Some(Decision::Aborted) => {
                self.mode = Mode::Browse;
                self.notice = Some(Notice::info("remove cancelled"));
                None
            }
            None => None,
        }
    }

    pub fn view(&self) -> String {
        let title = Style::new()
            .foreground(AdaptiveColor {
                Light: "#874BFD",
                Dark: "#7D56F4",
            })
            .bold(true)
            .render(self.title);
        let mut out = format!("{title}\n");
        if self.loading {
            out.push_str("\nLoading…\n");
            return out;
        }

        match &self.mode {
            Mode::PickParent => {
                out.push_str(&format!("\nSelect a {}:\n\n", P::SINGULAR));
                if self.searching || !self.parents.query().is_empty() {
                    out.push_str(&format!("/{}\n", self.search.view()));
                }
                self.render_page(&mut out, &self.parents.visible_page().records, P::PLURAL);
                self.render_footer(&mut out, self.parents.page(), self.parents.total_pages());
                out.push_str(&self.hint("↑/↓ move • enter select • / search • r refresh"));
            }
            Mode::Browse => {
                if let Some(parent) = &self.parent {
                    out.push_str(&format!("\n{} of {}:\n\n", C::TITLE, parent));
                }
                self.render_page(&mut out, &self.children.visible_page().records, C::PLURAL);
                self.render_footer(&mut out, self.children.page(), self.children.total_pages());
                if self.pending {
                    out.push_str("working…\n");
                }
                out.push_str(&self.hint("a assign • c change • d remove • esc back"));
            }
            Mode::PickChild { replace } => {
                let verb = if replace.is_some() { "Replace with" } else { "Assign" };
                out.push_str(&format!("\n{verb} a {}:\n\n", C::SINGULAR));
                if self.searching || !self.picker.query().is_empty() {
                    out.push_str(&format!("/{}\n", self.search.view()));
                }
                self.render_page(&mut out, &self.picker.visible_page().records, C::PLURAL);
                self.render_footer(&mut out, self.picker.page(), self.picker.total_pages());
                out.push_str(&self.hint("↑/↓ move • enter pick • / search • esc back"));
            }
            Mode::ConfirmRemove { gate, .. } => {
                out.push_str(&format!("\n{}\n", gate.view()));
            }
        }
        if let Some(notice) = &self.notice {
            out.push_str(&format!("\n{}\n", notice.view()));
        }
        out
    }

    fn render_page<T: Record>(&self, out: &mut String, records: &[T], plural: &str) {
        if records.is_empty() {
            out.push_str(&format!("No {plural} found.\n"));
            return;
        }
        for (i, record) in records.iter().enumerate() {
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

    fn render_footer(&self, out: &mut String, page: usize, total: usize) {
        let footer = Style::new()
            .foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            })
            .render(&format!("page {page}/{total}"));
        out.push_str(&format!("\n{footer}\n"));
    }

    fn hint(&self, text: &str) -> String {
        Style::new()
            .foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            })
            .render(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Course, Teacher};
    use async_trait::async_trait;
    use crossterm::event::KeyModifiers;
    use serde_json::Value;
    use std::sync::Mutex;

    struct FixedSource<R>(Vec<R>);

    #[async_trait]
    impl<R: Entity> RemoteListSource<R> for FixedSource<R> {
        async fn list(&self) -> Result<Vec<R>> {
            Ok(self.0.clone())
        }
        async fn create(&self, _body: Value) -> Result<R> {
            unreachable!("assignment screens never create records")
        }
        async fn update(&self, _id: &R::Id, _body: Value) -> Result<R> {
            unreachable!("assignment screens never update records")
        }
        async fn delete(&self, _id: &R::Id) -> Result<()> {
            unreachable!("assignment screens never delete records")
        }
    }

    /// Relation fake that records every call and serves a mutable link set.
    struct FakeRelation {
        linked: Mutex<Vec<Course>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeRelation {
        fn new(linked: Vec<Course>) -> Self {
            Self {
                linked: Mutex::new(linked),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RelationSource<Course> for FakeRelation {
        async fn children_of(&self, parent_id: &str) -> Result<Vec<Course>> {
            self.calls.lock().unwrap().push(format!("list {parent_id}"));
            Ok(self.linked.lock().unwrap().clone())
        }
        async fn assign(&self, parent_id: &str, child_id: &str) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("assign {parent_id} {child_id}"));
            self.linked
                .lock()
                .unwrap()
                .push(Course::new(child_id, format!("Course {child_id}")));
            Ok(())
        }
        async fn unassign(&self, parent_id: &str, child_id: &str) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("remove {parent_id} {child_id}"));
            self.linked.lock().unwrap().retain(|c| c.id != child_id);
            Ok(())
        }
        async fn reassign(&self, parent_id: &str, old: &str, new: &str) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("replace {parent_id} {old} {new}"));
            let mut linked = self.linked.lock().unwrap();
            linked.retain(|c| c.id != old);
            linked.push(Course::new(new, format!("Course {new}")));
            Ok(())
        }
    }

    fn courses(ids: &[&str]) -> Vec<Course> {
        ids.iter()
            .map(|id| Course::new(*id, format!("Course {id}")))
            .collect()
    }

    fn screen(
        relation: Arc<FakeRelation>,
        catalog: Vec<Course>,
    ) -> AssignScreen<Teacher, Course> {
        AssignScreen::new(
            Arc::new(FixedSource(vec![
                Teacher::new("t1", "Ada", "ada@example.com"),
                Teacher::new("t2", "Grace", "grace@example.com"),
            ])),
            Arc::new(FixedSource(catalog)),
            relation,
            "Teacher Courses",
            5,
        )
    }

    fn press(screen: &mut AssignScreen<Teacher, Course>, code: KeyCode) -> Option<Cmd> {
        let msg: Msg = Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        });
        screen.update(&msg)
    }

    /// Runs one command to completion and feeds its message back in,
    /// returning any follow-up command.
    async fn pump(screen: &mut AssignScreen<Teacher, Course>, cmd: Cmd) -> Option<Cmd> {
        let msg = cmd.await.expect("command produced no message");
        screen.update(&msg)
    }

    async fn browse_t1(
        relation: &Arc<FakeRelation>,
        catalog: Vec<Course>,
    ) -> AssignScreen<Teacher, Course> {
        let mut s = screen(Arc::clone(relation), catalog);
        let cmd = s.refresh();
        pump(&mut s, cmd).await;
        let cmd = press(&mut s, KeyCode::Enter).expect("selecting a parent fetches links");
        pump(&mut s, cmd).await;
        assert!(matches!(s.mode, Mode::Browse));
        s
    }

    #[tokio::test]
    async fn roster_and_catalog_load_on_entry() {
        let relation = Arc::new(FakeRelation::new(Vec::new()));
        let mut s = screen(Arc::clone(&relation), courses(&["m1", "m2"]));

        let cmd = s.refresh();
        pump(&mut s, cmd).await;

        assert_eq!(s.parents.len(), 2);
        assert_eq!(s.catalog.len(), 2);
        assert!(matches!(s.mode, Mode::PickParent));
    }

    #[tokio::test]
    async fn selecting_a_parent_loads_its_children() {
        let relation = Arc::new(FakeRelation::new(courses(&["m1"])));
        let s = browse_t1(&relation, courses(&["m1", "m2"])).await;

        assert_eq!(s.children.len(), 1);
        assert_eq!(relation.calls.lock().unwrap().as_slice(), ["list t1"]);
    }

    #[tokio::test]
    async fn assign_calls_the_backend_and_refetches() {
        let relation = Arc::new(FakeRelation::new(courses(&["m1"])));
        let mut s = browse_t1(&relation, courses(&["m1", "m2"])).await;

        press(&mut s, KeyCode::Char('a'));
        assert!(matches!(s.mode, Mode::PickChild { replace: None }));
        // Already-linked m1 is not offered again.
        assert_eq!(s.picker.len(), 1);
        assert_eq!(s.picker.records()[0].id, "m2");

        let cmd = press(&mut s, KeyCode::Enter).expect("pick spawns the call");
        let refetch = pump(&mut s, cmd).await.expect("success triggers a re-fetch");
        pump(&mut s, refetch).await;

        assert_eq!(s.children.len(), 2);
        assert!(!s.pending);
        let calls = relation.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), ["list t1", "assign t1 m2", "list t1"]);
    }

    #[tokio::test]
    async fn remove_requires_confirmation() {
        let relation = Arc::new(FakeRelation::new(courses(&["m1"])));
        let mut s = browse_t1(&relation, courses(&["m1"])).await;

        press(&mut s, KeyCode::Char('d'));
        assert!(matches!(s.mode, Mode::ConfirmRemove { .. }));

        let cmd = press(&mut s, KeyCode::Char('n'));
        assert!(cmd.is_none());
        assert!(matches!(s.mode, Mode::Browse));
        assert_eq!(s.children.len(), 1);
        assert_eq!(relation.calls.lock().unwrap().as_slice(), ["list t1"]);
    }

    #[tokio::test]
    async fn confirmed_remove_unlinks_and_refetches() {
        let relation = Arc::new(FakeRelation::new(courses(&["m1"])));
        let mut s = browse_t1(&relation, courses(&["m1"])).await;

        press(&mut s, KeyCode::Char('d'));
        let cmd = press(&mut s, KeyCode::Char('y')).expect("confirm spawns the call");
        let refetch = pump(&mut s, cmd).await.expect("success triggers a re-fetch");
        pump(&mut s, refetch).await;

        assert_eq!(s.children.len(), 0);
        let calls = relation.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), ["list t1", "remove t1 m1", "list t1"]);
    }

    #[tokio::test]
    async fn replace_sends_old_and_new_ids() {
        let relation = Arc::new(FakeRelation::new(courses(&["m1"])));
        let mut s = browse_t1(&relation, courses(&["m1", "m2"])).await;

        press(&mut s, KeyCode::Char('c'));
        assert!(matches!(s.mode, Mode::PickChild { replace: Some(_) }));

        let cmd = press(&mut s, KeyCode::Enter).expect("pick spawns the call");
        let refetch = pump(&mut s, cmd).await.expect("success triggers a re-fetch");
        pump(&mut s, refetch).await;

        assert_eq!(s.children.len(), 1);
        assert_eq!(s.children.records()[0].id, "m2");
        let calls = relation.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), ["list t1", "replace t1 m1 m2", "list t1"]);
    }

    #[tokio::test]
    async fn picker_is_not_opened_when_nothing_is_left() {
        let relation = Arc::new(FakeRelation::new(courses(&["m1"])));
        let mut s = browse_t1(&relation, courses(&["m1"])).await;

        press(&mut s, KeyCode::Char('a'));

        assert!(matches!(s.mode, Mode::Browse));
        assert!(s.notice.is_some());
    }
}
