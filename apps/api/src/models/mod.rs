//! Record types for every content kind the admin surface manages.
//!
//! Each kind implements [`Entity`], which is all the generic store, form and
//! panel machinery needs to know about it: its field schema, an empty draft,
//! and name-based access to its editable string fields.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub mod article;
pub mod course;
pub mod exam;
pub mod institute;
pub mod merit_list;

pub use article::Article;
pub use course::Course;
pub use exam::Exam;
pub use institute::{CourseOffering, Institute};
pub use merit_list::MeritList;

/// Stable record identity. Server-assigned `_id` values are kept verbatim;
/// records created locally receive a generated UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reads a text field that remote backends may send as a number
/// (`"seats": 60`), a boolean or `null`. Forms edit everything as text.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Signed(i64),
        Unsigned(u64),
        Float(f64),
        Flag(bool),
    }

    Ok(match Option::<Loose>::deserialize(deserializer)? {
        None => String::new(),
        Some(Loose::Text(s)) => s,
        Some(Loose::Signed(n)) => n.to_string(),
        Some(Loose::Unsigned(n)) => n.to_string(),
        Some(Loose::Float(n)) => n.to_string(),
        Some(Loose::Flag(b)) => b.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    TextArea,
    Date,
    Url,
    Email,
    Tel,
    /// Browser file picker. The upload is kept in-process and the field holds
    /// a local attachment URL.
    File,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: InputKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, kind: InputKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: InputKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }
}

/// Schema of the repeatable sub-record list embedded in a record.
#[derive(Debug, Clone, Serialize)]
pub struct SubRecordSchema {
    pub name: &'static str,
    pub label: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Field schema driving the generic admin panel for one content kind.
#[derive(Debug, Clone, Serialize)]
pub struct EntitySchema {
    /// Collection path segment, e.g. `institutes`.
    pub path: &'static str,
    /// Singular key used in update envelopes, e.g. `institute`.
    pub singular: &'static str,
    /// Human-readable label used in notifications.
    pub label: &'static str,
    pub fields: &'static [FieldSpec],
    pub sub_records: Option<SubRecordSchema>,
}

impl EntitySchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn sub_field(&self, name: &str) -> Option<&FieldSpec> {
        self.sub_records
            .as_ref()
            .and_then(|sub| sub.fields.iter().find(|f| f.name == name))
    }
}

/// A repeatable sub-record (e.g. a course offering inside an institute).
pub trait SubRecord: Clone + Default + fmt::Debug + Send + Sync {
    fn field(&self, name: &str) -> Option<&str>;
    fn field_mut(&mut self, name: &str) -> Option<&mut String>;
}

/// Placeholder sub-record type for kinds without a repeatable list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoSubRecords;

impl SubRecord for NoSubRecords {
    fn field(&self, _name: &str) -> Option<&str> {
        None
    }

    fn field_mut(&mut self, _name: &str) -> Option<&mut String> {
        None
    }
}

/// One content kind managed by the admin surface.
pub trait Entity: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Sub: SubRecord;

    fn schema() -> &'static EntitySchema;

    /// The empty record a form starts from when creating.
    fn draft() -> Self;

    fn id(&self) -> Option<&RecordId>;

    fn set_id(&mut self, id: RecordId);

    fn field(&self, name: &str) -> Option<&str>;

    fn field_mut(&mut self, name: &str) -> Option<&mut String>;

    fn created_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn sub_records(&self) -> Option<&Vec<Self::Sub>> {
        None
    }

    fn sub_records_mut(&mut self) -> Option<&mut Vec<Self::Sub>> {
        None
    }
}
