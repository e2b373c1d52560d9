//! Collection and relationship sources.
//!
//! [`RemoteListSource`] is the seam between the generic list screen and the
//! backend: one implementation per entity collection, all of them the same
//! [`RestSource`] adapter parameterized by [`Entity::PATH`]. Assignment
//! screens use [`RelationSource`], whose live form is [`RestRelation`] driven
//! by a static [`RelationEndpoint`] describing the path and payload keys of
//! one parent/child pairing.

use crate::entities::Entity;
use crate::error::Result;
use crate::record::Record;
use crate::remote::RestClient;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::marker::PhantomData;

/// Remote CRUD for one collection of records.
///
/// Screens call these from `Cmd` futures and fold the results back into
/// their controller, so every method is `async` and the trait object is
/// shared behind an `Arc`.
#[async_trait]
pub trait RemoteListSource<R: Record>: Send + Sync {
    /// Fetches the full collection.
    async fn list(&self) -> Result<Vec<R>>;
    /// Creates a record from a form payload, returning the stored record
    /// (with its server-assigned id).
    async fn create(&self, body: Value) -> Result<R>;
    /// Updates the record with the given id, returning the stored record.
    async fn update(&self, id: &R::Id, body: Value) -> Result<R>;
    /// Deletes the record with the given id.
    async fn delete(&self, id: &R::Id) -> Result<()>;
}

/// Live [`RemoteListSource`] over the REST backend.
///
/// The collection path comes from the entity's [`Entity::PATH`] constant, so
/// one generic adapter serves all seven collections.
#[derive(Debug, Clone)]
pub struct RestSource<R> {
    client: RestClient,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Entity> RestSource<R> {
    pub fn new(client: RestClient) -> Self {
        Self {
            client,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<R: Entity> RemoteListSource<R> for RestSource<R> {
    async fn list(&self) -> Result<Vec<R>> {
        self.client.get_json(R::PATH).await
    }

    async fn create(&self, body: Value) -> Result<R> {
        self.client.post_json(R::PATH, &body).await
    }

    async fn update(&self, id: &R::Id, body: Value) -> Result<R> {
        self.client
            .put_json(&format!("{}/{}", R::PATH, id), &body)
            .await
    }

    async fn delete(&self, id: &R::Id) -> Result<()> {
        self.client.delete(&format!("{}/{}", R::PATH, id)).await
    }
}

/// Remote operations over one parent/child relationship.
///
/// Parent and child ids travel as strings; the three live pairings all join
/// Mongo-style string-id collections. Mutations return `()` and the caller
/// re-fetches via [`children_of`](Self::children_of) afterwards, keeping the
/// backend the single source of truth for membership.
#[async_trait]
pub trait RelationSource<C: Record>: Send + Sync {
    /// Fetches the children currently linked to the given parent.
    async fn children_of(&self, parent_id: &str) -> Result<Vec<C>>;
    /// Links a child to a parent.
    async fn assign(&self, parent_id: &str, child_id: &str) -> Result<()>;
    /// Unlinks a child from a parent.
    async fn unassign(&self, parent_id: &str, child_id: &str) -> Result<()>;
    /// Replaces one linked child with another in a single call.
    async fn reassign(&self, parent_id: &str, old_child_id: &str, new_child_id: &str)
        -> Result<()>;
}

/// Path and payload-key layout of one relationship's endpoints.
///
/// The backend spells each pairing slightly differently ("teacherId" vs
/// "studentId", "oldCourseId" vs "oldStudentId"), so the keys live in data
/// rather than in per-pairing adapter types.
#[derive(Debug, Clone, Copy)]
pub struct RelationEndpoint {
    /// Base path segment, e.g. "teacher-courses".
    pub path: &'static str,
    /// Child segment of the listing URL, e.g. "courses" in
    /// `teacher-courses/{id}/courses`.
    pub children_segment: &'static str,
    /// Payload key carrying the parent id.
    pub parent_key: &'static str,
    /// Payload key carrying the child id.
    pub child_key: &'static str,
    /// Payload key carrying the outgoing child id in a reassign.
    pub old_child_key: &'static str,
    /// Payload key carrying the incoming child id in a reassign.
    pub new_child_key: &'static str,
}

/// Courses taught by a teacher.
pub const TEACHER_COURSES: RelationEndpoint = RelationEndpoint {
    path: "teacher-courses",
    children_segment: "courses",
    parent_key: "teacherId",
    child_key: "courseId",
    old_child_key: "oldCourseId",
    new_child_key: "newCourseId",
};

/// Courses a student is enrolled in.
pub const STUDENT_COURSES: RelationEndpoint = RelationEndpoint {
    path: "student-courses",
    children_segment: "courses",
    parent_key: "studentId",
    child_key: "courseId",
    old_child_key: "oldCourseId",
    new_child_key: "newCourseId",
};

/// Students tutored by a teacher.
pub const TEACHER_STUDENTS: RelationEndpoint = RelationEndpoint {
    path: "teacher-students",
    children_segment: "students",
    parent_key: "teacherId",
    child_key: "studentId",
    old_child_key: "oldStudentId",
    new_child_key: "newStudentId",
};

/// Live [`RelationSource`] over the REST backend.
#[derive(Debug, Clone)]
pub struct RestRelation<C> {
    client: RestClient,
    endpoint: RelationEndpoint,
    _marker: PhantomData<fn() -> C>,
}

impl<C: Entity> RestRelation<C> {
    pub fn new(client: RestClient, endpoint: RelationEndpoint) -> Self {
        Self {
            client,
            endpoint,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<C: Entity> RelationSource<C> for RestRelation<C> {
    async fn children_of(&self, parent_id: &str) -> Result<Vec<C>> {
        let path = format!(
            "{}/{}/{}",
            self.endpoint.path, parent_id, self.endpoint.children_segment
        );
        self.client.get_json(&path).await
    }

    async fn assign(&self, parent_id: &str, child_id: &str) -> Result<()> {
        let path = format!("{}/assign", self.endpoint.path);
        let body = json!({
            self.endpoint.parent_key: parent_id,
            self.endpoint.child_key: child_id,
        });
        let _: Value = self.client.post_json(&path, &body).await?;
        Ok(())
    }

    async fn unassign(&self, parent_id: &str, child_id: &str) -> Result<()> {
        let path = format!("{}/remove", self.endpoint.path);
        let body = json!({
            self.endpoint.parent_key: parent_id,
            self.endpoint.child_key: child_id,
        });
        self.client.delete_with_body(&path, &body).await
    }

    async fn reassign(
        &self,
        parent_id: &str,
        old_child_id: &str,
        new_child_id: &str,
    ) -> Result<()> {
        let path = format!("{}/update", self.endpoint.path);
        let body = json!({
            self.endpoint.parent_key: parent_id,
            self.endpoint.old_child_key: old_child_id,
            self.endpoint.new_child_key: new_child_id,
        });
        self.client.put_status(&path, &body).await
    }
}
