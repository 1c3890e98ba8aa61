//! Remote-backed collections.
//!
//! `RemoteCollection` performs one round trip per mutation and then patches
//! the shared local store from the server's answer instead of re-fetching:
//! prepend on create, replace-by-id on update, filter-out on delete.
//! Failures become error notifications; local state is left as it was.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::catalog::SharedStore;
use crate::models::{Entity, RecordId};
use crate::notify::NotificationLog;
use crate::remote::RequestError;

/// Network side of a remote collection. `HttpCollectionApi` is the REST
/// implementation; tests swap in in-memory fakes.
#[async_trait]
pub trait CollectionApi<T: Entity>: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<T>, RequestError>;

    async fn create(&self, record: &T) -> Result<T, RequestError>;

    async fn update(&self, id: &RecordId, record: &T) -> Result<T, RequestError>;

    async fn delete(&self, id: &RecordId) -> Result<(), RequestError>;
}

pub struct RemoteCollection<T: Entity> {
    api: Arc<dyn CollectionApi<T>>,
    store: SharedStore<T>,
    notifications: NotificationLog,
}

impl<T: Entity> Clone for RemoteCollection<T> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            store: Arc::clone(&self.store),
            notifications: self.notifications.clone(),
        }
    }
}

impl<T: Entity> RemoteCollection<T> {
    pub fn new(
        api: Arc<dyn CollectionApi<T>>,
        store: SharedStore<T>,
        notifications: NotificationLog,
    ) -> Self {
        Self {
            api,
            store,
            notifications,
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &SharedStore<T> {
        &self.store
    }

    /// Replaces the local list with the remote one, newest first.
    pub async fn load(&self) -> bool {
        let label = T::schema().path;
        match self.api.fetch_all().await {
            Ok(records) => {
                let mut store = self.store.write().await;
                store.replace_all(records);
                store.sort_by_created_desc();
                info!("Loaded {} {label} from remote", store.len());
                self.notifications
                    .info(format!("Loaded {} {label}", store.len()));
                true
            }
            Err(e) => {
                warn!("Failed to load {label}: {e}");
                self.notifications.error(format!("Failed to load {label}"));
                false
            }
        }
    }

    /// Creates remotely, then prepends the server's record.
    pub async fn add(&self, record: T) -> Option<T> {
        let label = T::schema().label;
        let created = match self.api.create(&record).await {
            Ok(created) if created.id().is_some() => created,
            Ok(_) => return self.fail(format!("Failed to add {label}"), RequestError::MissingId),
            Err(e) => return self.fail(format!("Failed to add {label}"), e),
        };

        // Patch whatever the store holds now, not a snapshot taken before the
        // request, so overlapping creates all land.
        self.store.write().await.prepend(created.clone());
        self.notifications
            .success(format!("{label} added successfully"));
        Some(created)
    }

    /// Updates remotely, then replaces the local record with the server's.
    pub async fn edit(&self, id: &RecordId, record: T) -> Option<T> {
        let label = T::schema().label;
        let mut updated = match self.api.update(id, &record).await {
            Ok(updated) => updated,
            Err(e) => return self.fail(format!("Failed to update {label}"), e),
        };
        if updated.id() != Some(id) {
            updated.set_id(id.clone());
        }

        if let Err(e) = self.store.write().await.replace_by_id(id, updated.clone()) {
            warn!("Updated {label} is no longer in the local list: {e}");
        }
        self.notifications
            .success(format!("{label} updated successfully"));
        Some(updated)
    }

    /// Deletes remotely, then drops the record locally.
    pub async fn remove(&self, id: &RecordId) -> bool {
        let label = T::schema().label;
        if let Err(e) = self.api.delete(id).await {
            self.fail::<()>(format!("Failed to delete {label}"), e);
            return false;
        }

        if let Err(e) = self.store.write().await.remove_by_id(id) {
            warn!("Deleted {label} was already gone locally: {e}");
        }
        self.notifications.success(format!("{label} deleted"));
        true
    }

    fn fail<R>(&self, message: String, error: RequestError) -> Option<R> {
        warn!("{message}: {error}");
        self.notifications.error(format!("{message}: {error}"));
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use chrono::{TimeZone, Utc};

    use crate::catalog::EntityStore;
    use crate::models::Institute;
    use crate::notify::NotificationLevel;

    /// In-memory stand-in for the institutes endpoint.
    #[derive(Default)]
    struct FakeApi {
        remote: Mutex<Vec<Institute>>,
        next_id: Mutex<u32>,
        fail: Mutex<bool>,
        /// Applied to `create` so overlapping requests interleave.
        create_delay: Option<Duration>,
    }

    impl FakeApi {
        fn failing() -> Self {
            Self {
                fail: Mutex::new(true),
                ..Self::default()
            }
        }

        fn check(&self) -> Result<(), RequestError> {
            if *self.fail.lock().unwrap() {
                return Err(RequestError::Status {
                    status: 503,
                    message: "backend unavailable".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CollectionApi<Institute> for FakeApi {
        async fn fetch_all(&self) -> Result<Vec<Institute>, RequestError> {
            self.check()?;
            Ok(self.remote.lock().unwrap().clone())
        }

        async fn create(&self, record: &Institute) -> Result<Institute, RequestError> {
            if let Some(delay) = self.create_delay {
                tokio::time::sleep(delay).await;
            }
            self.check()?;
            let mut created = record.clone();
            let id = {
                let mut next = self.next_id.lock().unwrap();
                *next += 1;
                *next
            };
            created.id = Some(RecordId::from(format!("srv-{id}")));
            created.created_at = Some(Utc::now());
            self.remote.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn update(&self, id: &RecordId, record: &Institute) -> Result<Institute, RequestError> {
            self.check()?;
            let mut updated = record.clone();
            updated.id = Some(id.clone());
            Ok(updated)
        }

        async fn delete(&self, _id: &RecordId) -> Result<(), RequestError> {
            self.check()
        }
    }

    fn institute(id: &str, title: &str) -> Institute {
        Institute {
            id: Some(RecordId::from(id)),
            title: title.to_string(),
            location: "Mumbai".to_string(),
            ..Institute::draft()
        }
    }

    fn remote_with(api: FakeApi, records: Vec<Institute>) -> (RemoteCollection<Institute>, NotificationLog) {
        let log = NotificationLog::new();
        let store = EntityStore::with_records(records).into_shared();
        (RemoteCollection::new(Arc::new(api), store, log.clone()), log)
    }

    async fn titles(remote: &RemoteCollection<Institute>) -> Vec<String> {
        remote
            .store()
            .read()
            .await
            .list()
            .iter()
            .map(|i| i.title.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_load_sorts_newest_first() {
        let at = |day| Some(Utc.with_ymd_and_hms(2024, 6, day, 9, 0, 0).unwrap());
        let api = FakeApi::default();
        *api.remote.lock().unwrap() = vec![
            Institute { created_at: at(1), ..institute("a", "Oldest") },
            Institute { created_at: at(15), ..institute("b", "Newest") },
            Institute { created_at: at(7), ..institute("c", "Middle") },
        ];
        let (remote, _) = remote_with(api, vec![]);

        assert!(remote.load().await);
        assert_eq!(titles(&remote).await, vec!["Newest", "Middle", "Oldest"]);
    }

    #[tokio::test]
    async fn test_add_prepends_server_record() {
        let (remote, log) = remote_with(FakeApi::default(), vec![institute("x", "Existing")]);

        let created = remote.add(institute_draft("COEP")).await.unwrap();

        assert_eq!(created.id, Some(RecordId::from("srv-1")));
        assert_eq!(titles(&remote).await, vec!["COEP", "Existing"]);
        assert_eq!(log.pending()[0].message, "Institute added successfully");
    }

    #[tokio::test]
    async fn test_rejected_create_leaves_list_unchanged() {
        let (remote, log) = remote_with(FakeApi::failing(), vec![institute("x", "Existing")]);

        let result = remote.add(institute_draft("COEP")).await;

        assert!(result.is_none());
        assert_eq!(titles(&remote).await, vec!["Existing"]);
        let pending = log.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].level, NotificationLevel::Error);
        assert!(pending[0].message.starts_with("Failed to add Institute"));
    }

    #[tokio::test]
    async fn test_rejected_delete_keeps_item() {
        let (remote, log) = remote_with(FakeApi::failing(), vec![institute("x", "Existing")]);
        assert!(!remote.remove(&RecordId::from("x")).await);
        assert_eq!(titles(&remote).await, vec!["Existing"]);
        assert_eq!(log.pending()[0].level, NotificationLevel::Error);
    }

    #[tokio::test]
    async fn test_edit_replaces_by_id() {
        let (remote, _) = remote_with(
            FakeApi::default(),
            vec![institute("a", "First"), institute("b", "Second")],
        );
        let id = RecordId::from("b");
        let mut changed = institute("b", "Second (Autonomous)");
        changed.phone = "020-2550 7000".to_string();

        remote.edit(&id, changed).await.unwrap();

        let store = remote.store().read().await;
        assert_eq!(store.list()[1].title, "Second (Autonomous)");
        assert_eq!(store.list()[1].phone, "020-2550 7000");
        assert_eq!(store.list()[0].title, "First");
    }

    #[tokio::test]
    async fn test_rejected_edit_keeps_local_record() {
        let (remote, log) = remote_with(
            FakeApi::failing(),
            vec![institute("a", "First"), institute("b", "Second")],
        );
        let changed = institute("b", "Renamed");

        assert!(remote.edit(&RecordId::from("b"), changed).await.is_none());

        assert_eq!(titles(&remote).await, vec!["First", "Second"]);
        let pending = log.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].level, NotificationLevel::Error);
        assert!(pending[0].message.starts_with("Failed to update Institute"));
    }

    #[tokio::test]
    async fn test_remove_filters_by_id() {
        let (remote, _) = remote_with(
            FakeApi::default(),
            vec![institute("a", "First"), institute("b", "Second")],
        );
        assert!(remote.remove(&RecordId::from("a")).await);
        assert_eq!(titles(&remote).await, vec!["Second"]);
    }

    #[tokio::test]
    async fn test_overlapping_creates_both_land() {
        let api = FakeApi {
            create_delay: Some(Duration::from_millis(20)),
            ..FakeApi::default()
        };
        let (remote, _) = remote_with(api, vec![]);

        let (a, b) = tokio::join!(
            remote.add(institute_draft("VJTI")),
            remote.add(institute_draft("SPIT"))
        );

        assert!(a.is_some() && b.is_some());
        let mut listed = titles(&remote).await;
        listed.sort();
        assert_eq!(listed, vec!["SPIT", "VJTI"]);
    }

    fn institute_draft(title: &str) -> Institute {
        Institute {
            title: title.to_string(),
            location: "Pune".to_string(),
            ..Institute::draft()
        }
    }
}
