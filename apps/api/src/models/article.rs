use serde::{Deserialize, Serialize};

use super::{Entity, EntitySchema, FieldSpec, InputKind, NoSubRecords, RecordId};

static ARTICLE_SCHEMA: EntitySchema = EntitySchema {
    path: "articles",
    singular: "article",
    label: "Article",
    fields: &[
        FieldSpec::required("title", "Headline", InputKind::Text),
        FieldSpec::required("description", "Body", InputKind::TextArea),
        FieldSpec::optional("date", "Published on", InputKind::Date),
        FieldSpec::optional("link", "Source link", InputKind::Url),
        FieldSpec::optional("photo", "Cover image", InputKind::File),
    ],
    sub_records: None,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Article {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(deserialize_with = "super::lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub date: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub link: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub photo: String,
}

impl Entity for Article {
    type Sub = NoSubRecords;

    fn schema() -> &'static EntitySchema {
        &ARTICLE_SCHEMA
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
            "date" => Some(&mut self.date),
            "link" => Some(&mut self.link),
            "photo" => Some(&mut self.photo),
            _ => None,
        }
    }
}
