//! The backend's seven collections as serde types, plus the per-entity
//! configuration the generic screens are parameterized by.
//!
//! Most collections carry Mongo-style `_id` strings; companies and users are
//! legacy tables with numeric ids. Unknown fields in responses are ignored;
//! fields the backend sometimes omits are defaulted so a sparse document
//! still deserializes.

use crate::record::Record;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One form field of an entity's add/edit modal.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// JSON key in create/update bodies.
    pub key: &'static str,
    /// Label shown next to the input.
    pub label: &'static str,
    /// Blank submissions are rejected before any remote call.
    pub required: bool,
    /// Rendered masked; omitted from update bodies when left blank.
    pub secret: bool,
}

impl FieldSpec {
    const fn required(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            required: true,
            secret: false,
        }
    }

    const fn optional(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            required: false,
            secret: false,
        }
    }

    const fn secret(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            required: false,
            secret: true,
        }
    }
}

/// Static configuration tying a record type to its REST collection and form.
///
/// The generic list screen needs nothing else to manage an entity: the
/// collection path for the remote source, the field specs for the modal, and
/// nouns for titles and notices.
pub trait Entity: Record + DeserializeOwned {
    /// Screen title, e.g. "Teachers".
    const TITLE: &'static str;
    /// Singular noun for notices, e.g. "teacher".
    const SINGULAR: &'static str;
    /// Plural noun for the empty state, e.g. "teachers".
    const PLURAL: &'static str;
    /// REST collection path segment, e.g. "teachers".
    const PATH: &'static str;
    /// Form fields for the add/edit modal.
    const FIELDS: &'static [FieldSpec];

    /// Current value of a form field, used to prefill the edit modal.
    /// Secret fields and unknown keys return an empty string.
    fn field_value(&self, key: &str) -> String;
}

/// An ad/listing category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Record for Category {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn search_text(&self) -> String {
        self.name.clone()
    }
}

impl Entity for Category {
    const TITLE: &'static str = "Categories";
    const SINGULAR: &'static str = "category";
    const PLURAL: &'static str = "categories";
    const PATH: &'static str = "categories";
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::required("name", "Name")];

    fn field_value(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            _ => String::new(),
        }
    }
}

/// A company account (legacy numeric id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub area: String,
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {} {}", self.name, self.email, self.phone, self.city)
    }
}

impl Record for Company {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.name, self.email)
    }
}

impl Entity for Company {
    const TITLE: &'static str = "Companies";
    const SINGULAR: &'static str = "company";
    const PLURAL: &'static str = "companies";
    const PATH: &'static str = "companies";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", "Name"),
        FieldSpec::required("email", "Email"),
        FieldSpec::optional("phone", "Phone"),
        FieldSpec::optional("city", "City"),
        FieldSpec::optional("area", "Area"),
        FieldSpec::secret("password", "Password"),
    ];

    fn field_value(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "email" => self.email.clone(),
            "phone" => self.phone.clone(),
            "city" => self.city.clone(),
            "area" => self.area.clone(),
            _ => String::new(),
        }
    }
}

/// An end-user account (legacy numeric id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

impl Record for User {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.name, self.email)
    }
}

impl Entity for User {
    const TITLE: &'static str = "Users";
    const SINGULAR: &'static str = "user";
    const PLURAL: &'static str = "users";
    const PATH: &'static str = "users";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", "Name"),
        FieldSpec::required("email", "Email"),
        FieldSpec::secret("password", "Password"),
    ];

    fn field_value(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "email" => self.email.clone(),
            _ => String::new(),
        }
    }
}

/// A tutoring request ad posted by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ad {
    #[serde(rename = "_id")]
    pub id: String,
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub status: String,
}

impl fmt::Display for Ad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.subject, self.status, self.budget)
    }
}

impl Record for Ad {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.subject, self.description)
    }
}

impl Entity for Ad {
    const TITLE: &'static str = "Ads";
    const SINGULAR: &'static str = "ad";
    const PLURAL: &'static str = "ads";
    const PATH: &'static str = "ads";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("subject", "Subject"),
        FieldSpec::optional("description", "Description"),
        FieldSpec::optional("from", "From"),
        FieldSpec::optional("to", "To"),
        FieldSpec::optional("phone", "Phone"),
        FieldSpec::optional("email", "Email"),
        FieldSpec::optional("budget", "Budget"),
        FieldSpec::optional("status", "Status"),
    ];

    fn field_value(&self, key: &str) -> String {
        match key {
            "subject" => self.subject.clone(),
            "description" => self.description.clone(),
            "from" => self.from.clone(),
            "to" => self.to.clone(),
            "phone" => self.phone.clone(),
            "email" => self.email.clone(),
            "budget" => self.budget.clone(),
            "status" => self.status.clone(),
            _ => String::new(),
        }
    }
}

/// A teacher profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub contact: String,
}

impl Teacher {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            contact: String::new(),
        }
    }
}

impl fmt::Display for Teacher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {}", self.name, self.email, self.contact)
    }
}

impl Record for Teacher {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }

    // The teachers page searches by name only.
    fn search_text(&self) -> String {
        self.name.clone()
    }
}

impl Entity for Teacher {
    const TITLE: &'static str = "Teachers";
    const SINGULAR: &'static str = "teacher";
    const PLURAL: &'static str = "teachers";
    const PATH: &'static str = "teachers";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", "Name"),
        FieldSpec::required("email", "Email"),
        FieldSpec::optional("contact", "Contact"),
        FieldSpec::secret("password", "Password"),
    ];

    fn field_value(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "email" => self.email.clone(),
            "contact" => self.contact.clone(),
            _ => String::new(),
        }
    }
}

/// A student profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub area: String,
}

impl Student {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            phone: String::new(),
            city: String::new(),
            area: String::new(),
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {}", self.name, self.email, self.city)
    }
}

impl Record for Student {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn search_text(&self) -> String {
        self.name.clone()
    }
}

impl Entity for Student {
    const TITLE: &'static str = "Students";
    const SINGULAR: &'static str = "student";
    const PLURAL: &'static str = "students";
    const PATH: &'static str = "students";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", "Name"),
        FieldSpec::required("email", "Email"),
        FieldSpec::optional("phone", "Phone"),
        FieldSpec::optional("city", "City"),
        FieldSpec::optional("area", "Area"),
        FieldSpec::secret("password", "Password"),
    ];

    fn field_value(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "email" => self.email.clone(),
            "phone" => self.phone.clone(),
            "city" => self.city.clone(),
            "area" => self.area.clone(),
            _ => String::new(),
        }
    }
}

/// A course offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
}

impl Course {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            duration: String::new(),
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.duration)
    }
}

impl Record for Course {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

impl Entity for Course {
    const TITLE: &'static str = "Courses";
    const SINGULAR: &'static str = "course";
    const PLURAL: &'static str = "courses";
    const PATH: &'static str = "courses";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("title", "Title"),
        FieldSpec::optional("description", "Description"),
        FieldSpec::optional("duration", "Duration"),
    ];

    fn field_value(&self, key: &str) -> String {
        match key {
            "title" => self.title.clone(),
            "description" => self.description.clone(),
            "duration" => self.duration.clone(),
            _ => String::new(),
        }
    }
}
