use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, EntitySchema, FieldSpec, InputKind, RecordId, SubRecord, SubRecordSchema};

static INSTITUTE_SCHEMA: EntitySchema = EntitySchema {
    path: "institutes",
    singular: "institute",
    label: "Institute",
    fields: &[
        FieldSpec::required("title", "Institute name", InputKind::Text),
        FieldSpec::optional("description", "Description", InputKind::TextArea),
        FieldSpec::required("location", "Location", InputKind::Text),
        FieldSpec::optional("affiliation", "Affiliation", InputKind::Text),
        FieldSpec::optional("phone", "Phone", InputKind::Tel),
        FieldSpec::optional("email", "Email", InputKind::Email),
        FieldSpec::optional("link", "Website", InputKind::Url),
        FieldSpec::optional("photo", "Photo", InputKind::File),
    ],
    sub_records: Some(SubRecordSchema {
        name: "courses",
        label: "Courses offered",
        fields: &[
            FieldSpec::required("name", "Course name", InputKind::Text),
            FieldSpec::optional("duration", "Duration", InputKind::Text),
            FieldSpec::optional("fees", "Fees", InputKind::Text),
            FieldSpec::optional("seats", "Seats", InputKind::Text),
        ],
    }),
};

/// A course offered by an institute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseOffering {
    #[serde(deserialize_with = "super::lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub duration: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub fees: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub seats: String,
}

impl SubRecord for CourseOffering {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "duration" => Some(&self.duration),
            "fees" => Some(&self.fees),
            "seats" => Some(&self.seats),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "name" => Some(&mut self.name),
            "duration" => Some(&mut self.duration),
            "fees" => Some(&mut self.fees),
            "seats" => Some(&mut self.seats),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Institute {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(deserialize_with = "super::lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub location: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub affiliation: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub link: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub photo: String,
    pub courses: Vec<CourseOffering>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Institute {
    type Sub = CourseOffering;

    fn schema() -> &'static EntitySchema {
        &INSTITUTE_SCHEMA
    }

    /// New institutes start with one blank course row, never an empty list.
    fn draft() -> Self {
        Self {
            courses: vec![CourseOffering::default()],
            ..Self::default()
        }
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
            "affiliation" => Some(&self.affiliation),
            "phone" => Some(&self.phone),
            "email" => Some(&self.email),
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
            "affiliation" => Some(&mut self.affiliation),
            "phone" => Some(&mut self.phone),
            "email" => Some(&mut self.email),
            "link" => Some(&mut self.link),
            "photo" => Some(&mut self.photo),
            _ => None,
        }
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn sub_records(&self) -> Option<&Vec<CourseOffering>> {
        Some(&self.courses)
    }

    fn sub_records_mut(&mut self) -> Option<&mut Vec<CourseOffering>> {
        Some(&mut self.courses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_draft_has_one_blank_course() {
        let draft = Institute::draft();
        assert_eq!(draft.courses, vec![CourseOffering::default()]);
        assert!(draft.id.is_none());
    }

    #[test]
    fn test_deserializes_remote_shape() {
        let institute: Institute = serde_json::from_value(json!({
            "_id": "65f1c0ffee",
            "title": "Government Polytechnic Pune",
            "location": "Pune",
            "courses": [{ "name": "Diploma in Civil", "seats": "60" }],
            "createdAt": "2024-03-01T10:00:00Z",
            "__v": 0
        }))
        .unwrap();

        assert_eq!(institute.id, Some(RecordId::from("65f1c0ffee")));
        assert_eq!(institute.courses[0].seats, "60");
        assert_eq!(institute.courses[0].fees, "");
        assert!(institute.created_at.is_some());
    }

    #[test]
    fn test_numeric_and_null_fields_read_as_text() {
        let institute: Institute = serde_json::from_value(json!({
            "_id": "65f1c0ffee",
            "title": "VJTI",
            "phone": 2224198101u64,
            "affiliation": null,
            "courses": [{ "name": "B.Tech Civil", "seats": 60, "fees": 90000, "duration": null }]
        }))
        .unwrap();

        assert_eq!(institute.phone, "2224198101");
        assert_eq!(institute.affiliation, "");
        assert_eq!(institute.courses[0].seats, "60");
        assert_eq!(institute.courses[0].fees, "90000");
        assert_eq!(institute.courses[0].duration, "");
    }

    #[test]
    fn test_serializes_id_as_underscore_id() {
        let mut institute = Institute::draft();
        institute.set_id(RecordId::from("abc"));
        let value = serde_json::to_value(&institute).unwrap();
        assert_eq!(value["_id"], "abc");
        assert!(value.get("createdAt").is_none());
    }
}
