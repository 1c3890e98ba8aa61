//! Working copy of one record bound to the admin form.

use serde::Serialize;
use thiserror::Error;

use super::store::{EntityStore, StoreError};
use crate::models::{Entity, InputKind, RecordId, SubRecord};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("field '{0}' does not accept file uploads")]
    NotAFileField(String),

    #[error("this record kind has no repeatable sub-records")]
    NoSubRecords,

    #[error("sub-record {index} is out of range for {len} entries")]
    SubIndexOutOfRange { index: usize, len: usize },

    #[error("missing required fields: {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    #[error("no record is open for editing")]
    NotEditing,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What a submit will do: create a new record, or overwrite one by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EditTarget {
    Create,
    Edit { index: usize, id: RecordId },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Commit<T> {
    Create(T),
    Update { id: RecordId, record: T },
}

impl<T: Entity> Commit<T> {
    /// Writes the commit into a local store, returning the record id.
    pub fn apply(self, store: &mut EntityStore<T>) -> Result<RecordId, StoreError> {
        match self {
            Commit::Create(record) => Ok(store.insert(record)),
            Commit::Update { id, record } => {
                store.replace_by_id(&id, record)?;
                Ok(id)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormController<T: Entity> {
    working: T,
    target: EditTarget,
    dirty: bool,
}

impl<T: Entity> Default for FormController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> FormController<T> {
    pub fn new() -> Self {
        Self {
            working: T::draft(),
            target: EditTarget::Create,
            dirty: false,
        }
    }

    pub fn working(&self) -> &T {
        &self.working
    }

    pub fn target(&self) -> &EditTarget {
        &self.target
    }

    /// True once any field has changed since the form was seeded.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn begin_create(&mut self) {
        self.working = T::draft();
        self.target = EditTarget::Create;
        self.dirty = false;
    }

    /// Seeds the working copy with a detached clone of `store[index]`.
    pub fn begin_edit(&mut self, store: &EntityStore<T>, index: usize) -> Result<(), FormError> {
        let id = store.id_at(index)?;
        self.working = store.get(index)?.clone();
        self.target = EditTarget::Edit { index, id };
        self.dirty = false;
        Ok(())
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        if T::schema().field(name).is_none() {
            return Err(FormError::UnknownField(name.to_string()));
        }
        let slot = self
            .working
            .field_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        *slot = value.into();
        self.dirty = true;
        Ok(())
    }

    /// Errors unless `name` is a file input of this record kind.
    pub fn check_file_field(name: &str) -> Result<(), FormError> {
        match T::schema().field(name) {
            Some(spec) if spec.kind == InputKind::File => Ok(()),
            Some(_) => Err(FormError::NotAFileField(name.to_string())),
            None => Err(FormError::UnknownField(name.to_string())),
        }
    }

    /// Points a file field at a locally held attachment URL.
    pub fn attach_file(&mut self, name: &str, url: impl Into<String>) -> Result<(), FormError> {
        Self::check_file_field(name)?;
        self.set_field(name, url)
    }

    pub fn set_sub_field(
        &mut self,
        index: usize,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        if T::schema().sub_field(name).is_none() {
            return Err(match T::schema().sub_records {
                Some(_) => FormError::UnknownField(name.to_string()),
                None => FormError::NoSubRecords,
            });
        }
        let subs = self
            .working
            .sub_records_mut()
            .ok_or(FormError::NoSubRecords)?;
        let len = subs.len();
        let sub = subs
            .get_mut(index)
            .ok_or(FormError::SubIndexOutOfRange { index, len })?;
        let slot = sub
            .field_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        *slot = value.into();
        self.dirty = true;
        Ok(())
    }

    /// Appends a blank sub-record, returning its index.
    pub fn append_sub(&mut self) -> Result<usize, FormError> {
        let subs = self
            .working
            .sub_records_mut()
            .ok_or(FormError::NoSubRecords)?;
        subs.push(T::Sub::default());
        self.dirty = true;
        Ok(subs.len() - 1)
    }

    pub fn remove_sub(&mut self, index: usize) -> Result<(), FormError> {
        let subs = self
            .working
            .sub_records_mut()
            .ok_or(FormError::NoSubRecords)?;
        if index >= subs.len() {
            return Err(FormError::SubIndexOutOfRange {
                index,
                len: subs.len(),
            });
        }
        subs.remove(index);
        self.dirty = true;
        Ok(())
    }

    /// Required-field check: every required field (and required sub-record
    /// field) must be non-blank. Reports all missing labels at once.
    pub fn validate(&self) -> Result<(), FormError> {
        let schema = T::schema();
        let mut missing: Vec<String> = schema
            .fields
            .iter()
            .filter(|spec| spec.required)
            .filter(|spec| is_blank(self.working.field(spec.name)))
            .map(|spec| spec.label.to_string())
            .collect();

        if let (Some(sub_schema), Some(subs)) = (&schema.sub_records, self.working.sub_records()) {
            for (i, sub) in subs.iter().enumerate() {
                for spec in sub_schema.fields.iter().filter(|s| s.required) {
                    if is_blank(sub.field(spec.name)) {
                        missing.push(format!("{} #{} {}", sub_schema.label, i + 1, spec.label));
                    }
                }
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::MissingRequired(missing))
        }
    }

    /// Validates and builds the commit without touching the form state.
    pub fn prepare(&self) -> Result<Commit<T>, FormError> {
        self.validate()?;
        let record = self.working.clone();
        Ok(match &self.target {
            EditTarget::Create => Commit::Create(record),
            EditTarget::Edit { id, .. } => Commit::Update {
                id: id.clone(),
                record,
            },
        })
    }

    /// Resets to an empty create-mode draft.
    pub fn finish(&mut self) {
        self.begin_create();
    }

    /// Validates, writes into the store and resets. The form is left
    /// untouched when validation or the write fails.
    pub fn submit(&mut self, store: &mut EntityStore<T>) -> Result<RecordId, FormError> {
        let id = self.prepare()?.apply(store)?;
        self.finish();
        Ok(id)
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
