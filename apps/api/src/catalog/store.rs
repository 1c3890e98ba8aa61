use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{Entity, RecordId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("index {index} is out of range for {len} records")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no record with id {0}")]
    UnknownId(RecordId),

    #[error("record at index {index} has no id")]
    MissingId { index: usize },
}

/// One store per content kind, shared by the HTTP handlers, the admin panel
/// and the remote sync adapter.
pub type SharedStore<T> = Arc<RwLock<EntityStore<T>>>;

/// Ordered in-memory collection of one record kind.
///
/// Every record held here carries an id: records arriving without one are
/// assigned a generated id on entry. Positions are display order only.
#[derive(Debug, Clone)]
pub struct EntityStore<T> {
    records: Vec<T>,
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> EntityStore<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let mut store = Self::new();
        store.replace_all(records);
        store
    }

    pub fn into_shared(self) -> SharedStore<T> {
        Arc::new(RwLock::new(self))
    }

    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&T, StoreError> {
        self.records.get(index).ok_or(StoreError::IndexOutOfRange {
            index,
            len: self.records.len(),
        })
    }

    /// Id of the record at `index`.
    pub fn id_at(&self, index: usize) -> Result<RecordId, StoreError> {
        self.get(index)?
            .id()
            .cloned()
            .ok_or(StoreError::MissingId { index })
    }

    pub fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == Some(id))
    }

    /// Appends a record, returning its id.
    pub fn insert(&mut self, mut record: T) -> RecordId {
        let id = ensure_id(&mut record);
        self.records.push(record);
        id
    }

    /// Inserts a record at the front, returning its id.
    pub fn prepend(&mut self, mut record: T) -> RecordId {
        let id = ensure_id(&mut record);
        self.records.insert(0, record);
        id
    }

    /// Replaces the record at `index`, returning the previous one.
    /// The incoming record inherits the existing id when it has none.
    /// Form commits go through [`replace_by_id`](Self::replace_by_id).
    #[allow(dead_code)]
    pub fn replace(&mut self, index: usize, mut record: T) -> Result<T, StoreError> {
        let len = self.records.len();
        let slot = self
            .records
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        if record.id().is_none() {
            if let Some(id) = slot.id().cloned() {
                record.set_id(id);
            }
        }
        ensure_id(&mut record);
        Ok(std::mem::replace(slot, record))
    }

    pub fn replace_by_id(&mut self, id: &RecordId, mut record: T) -> Result<T, StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::UnknownId(id.clone()))?;
        record.set_id(id.clone());
        Ok(std::mem::replace(&mut self.records[index], record))
    }

    /// Removes the record at `index`; later records shift down by one.
    pub fn remove_at(&mut self, index: usize) -> Result<T, StoreError> {
        if index >= self.records.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(index))
    }

    pub fn remove_by_id(&mut self, id: &RecordId) -> Result<T, StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::UnknownId(id.clone()))?;
        Ok(self.records.remove(index))
    }

    pub fn replace_all(&mut self, records: impl IntoIterator<Item = T>) {
        self.records = records
            .into_iter()
            .map(|mut r| {
                ensure_id(&mut r);
                r
            })
            .collect();
    }

    /// Newest first; records without a creation timestamp sort last.
    pub fn sort_by_created_desc(&mut self) {
        self.records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    }
}

fn ensure_id<T: Entity>(record: &mut T) -> RecordId {
    match record.id() {
        Some(id) => id.clone(),
        None => {
            let id = RecordId::generate();
            record.set_id(id.clone());
            id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Institute};
    use chrono::{TimeZone, Utc};

    fn course(title: &str) -> Course {
        Course {
            title: title.to_string(),
            ..Course::default()
        }
    }

    fn titles(store: &EntityStore<Course>) -> Vec<&str> {
        store.list().iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn test_insert_appends_and_assigns_id() {
        let mut store = EntityStore::new();
        let id = store.insert(course("B.Sc Agriculture"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].id.as_ref(), Some(&id));
    }

    #[test]
    fn test_insert_keeps_existing_id() {
        let mut store = EntityStore::new();
        let mut record = course("MBA");
        record.id = Some(RecordId::from("server-1"));
        let id = store.insert(record);
        assert_eq!(id, RecordId::from("server-1"));
    }

    #[test]
    fn test_delete_first_of_two_leaves_second() {
        let mut store = EntityStore::with_records([course("A"), course("B")]);
        let removed = store.remove_at(0).unwrap();
        assert_eq!(removed.title, "A");
        assert_eq!(titles(&store), vec!["B"]);
    }

    #[test]
    fn test_remove_out_of_range_is_error() {
        let mut store = EntityStore::with_records([course("A")]);
        store.remove_at(0).unwrap();
        assert_eq!(
            store.remove_at(0),
            Err(StoreError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_remove_shifts_later_indices() {
        let mut store = EntityStore::with_records([course("A"), course("B"), course("C")]);
        let c_id = store.id_at(2).unwrap();
        store.remove_at(1).unwrap();
        assert_eq!(store.position(&c_id), Some(1));
    }

    #[test]
    fn test_replace_inherits_id() {
        let mut store = EntityStore::with_records([course("A")]);
        let id = store.id_at(0).unwrap();
        let old = store.replace(0, course("A2")).unwrap();
        assert_eq!(old.title, "A");
        assert_eq!(store.list()[0].id.as_ref(), Some(&id));
        assert_eq!(store.list()[0].title, "A2");
    }

    #[test]
    fn test_replace_by_unknown_id_is_error() {
        let mut store = EntityStore::with_records([course("A")]);
        let missing = RecordId::from("nope");
        assert_eq!(
            store.replace_by_id(&missing, course("X")),
            Err(StoreError::UnknownId(missing))
        );
        assert_eq!(titles(&store), vec!["A"]);
    }

    #[test]
    fn test_sort_by_created_desc_puts_undated_last() {
        let dated = |title: &str, day: u32| Institute {
            title: title.to_string(),
            created_at: Some(Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()),
            ..Institute::default()
        };
        let undated = Institute {
            title: "undated".to_string(),
            ..Institute::default()
        };
        let mut store =
            EntityStore::with_records([dated("old", 1), undated, dated("new", 20), dated("mid", 10)]);
        store.sort_by_created_desc();
        let order: Vec<_> = store.list().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(order, vec!["new", "mid", "old", "undated"]);
    }
}
