use serde::{Deserialize, Serialize};

use super::{Entity, EntitySchema, FieldSpec, InputKind, NoSubRecords, RecordId};

static MERIT_LIST_SCHEMA: EntitySchema = EntitySchema {
    path: "merit-lists",
    singular: "meritList",
    label: "Merit list",
    fields: &[
        FieldSpec::required("title", "Title", InputKind::Text),
        FieldSpec::optional("description", "Description", InputKind::TextArea),
        FieldSpec::optional("location", "Location", InputKind::Text),
        FieldSpec::required("date", "Release date", InputKind::Date),
        FieldSpec::required("document", "Merit list PDF", InputKind::File),
    ],
    sub_records: None,
};

/// A published merit list; `document` points at the uploaded PDF.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MeritList {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(deserialize_with = "super::lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub location: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub date: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub document: String,
}

impl Entity for MeritList {
    type Sub = NoSubRecords;

    fn schema() -> &'static EntitySchema {
        &MERIT_LIST_SCHEMA
    }

    fn draft() -> Self {
        Self::default()
    }

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "description" => Some(&self.description),
            "location" => Some(&self.location),
            "date" => Some(&self.date),
            "document" => Some(&self.document),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "title" => Some(&mut self.title),
            "description" => Some(&mut self.description),
            "location" => Some(&mut self.location),
            "date" => Some(&mut self.date),
            "document" => Some(&mut self.document),
            _ => None,
        }
    }
}
