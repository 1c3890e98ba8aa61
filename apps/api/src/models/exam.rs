use serde::{Deserialize, Serialize};

use super::{Entity, EntitySchema, FieldSpec, InputKind, NoSubRecords, RecordId};

static EXAM_SCHEMA: EntitySchema = EntitySchema {
    path: "exams",
    singular: "exam",
    label: "Exam",
    fields: &[
        FieldSpec::required("title", "Exam name", InputKind::Text),
        FieldSpec::optional("description", "Description", InputKind::TextArea),
        FieldSpec::required("date", "Exam date", InputKind::Date),
        FieldSpec::optional("type", "Type", InputKind::Text),
        FieldSpec::optional("category", "Category", InputKind::Text),
        FieldSpec::optional("level", "Level", InputKind::Text),
        FieldSpec::optional("link", "Information link", InputKind::Url),
        FieldSpec::optional("applyLink", "Apply link", InputKind::Url),
    ],
    sub_records: None,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Exam {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(deserialize_with = "super::lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub date: String,
    #[serde(rename = "type", deserialize_with = "super::lenient_string")]
    pub exam_type: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub category: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub level: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub link: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub apply_link: String,
}

impl Entity for Exam {
    type Sub = NoSubRecords;

    fn schema() -> &'static EntitySchema {
        &EXAM_SCHEMA
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
            "type" => Some(&self.exam_type),
            "category" => Some(&self.category),
            "level" => Some(&self.level),
            "link" => Some(&self.link),
            "applyLink" => Some(&self.apply_link),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "title" => Some(&mut self.title),
            "description" => Some(&mut self.description),
            "date" => Some(&mut self.date),
            "type" => Some(&mut self.exam_type),
            "category" => Some(&mut self.category),
            "level" => Some(&mut self.level),
            "link" => Some(&mut self.link),
            "applyLink" => Some(&mut self.apply_link),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_match_wire_names() {
        let mut exam = Exam::draft();
        *exam.field_mut("applyLink").unwrap() = "https://jeemain.nta.nic.in".to_string();
        *exam.field_mut("type").unwrap() = "Entrance".to_string();

        let value = serde_json::to_value(&exam).unwrap();
        assert_eq!(value["applyLink"], "https://jeemain.nta.nic.in");
        assert_eq!(value["type"], "Entrance");

        for spec in Exam::schema().fields {
            assert!(exam.field(spec.name).is_some(), "no accessor for {}", spec.name);
        }
    }
}
