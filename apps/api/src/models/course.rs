use serde::{Deserialize, Serialize};

use super::{Entity, EntitySchema, FieldSpec, InputKind, NoSubRecords, RecordId};

static COURSE_SCHEMA: EntitySchema = EntitySchema {
    path: "courses",
    singular: "course",
    label: "Course",
    fields: &[
        FieldSpec::required("title", "Course title", InputKind::Text),
        FieldSpec::required("description", "Description", InputKind::TextArea),
        FieldSpec::optional("location", "Location", InputKind::Text),
        FieldSpec::optional("date", "Start date", InputKind::Date),
        FieldSpec::optional("link", "Link", InputKind::Url),
        FieldSpec::optional("photo", "Photo", InputKind::File),
    ],
    sub_records: None,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Course {
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
    pub link: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub photo: String,
}

impl Entity for Course {
    type Sub = NoSubRecords;

    fn schema() -> &'static EntitySchema {
        &COURSE_SCHEMA
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
            "link" => Some(&self.link),
            "photo" => Some(&self.photo),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "title" => Some(&mut self.title),
            "description" => Some(&mut self.description),
            "location" => Some(&mut self.location),
            "date" => Some(&mut self.date),
            "link" => Some(&mut self.link),
            "photo" => Some(&mut self.photo),
            _ => None,
        }
    }
}
