use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;
use tracing::info;

use crate::attachments::AttachmentStore;
use crate::catalog::{AdminPanel, EntityStore, SharedStore};
use crate::config::Config;
use crate::models::{Article, Course, Entity, Exam, Institute, MeritList};
use crate::notify::NotificationLog;
use crate::remote::{AdminInfoClient, HttpCollectionApi};
use crate::seed;
use crate::sync::{CollectionApi, RemoteCollection};

/// Everything the admin routes for one record kind need.
///
/// Lock order is panel, then store. The store lock is never held across a
/// network call.
pub struct Collection<T: Entity> {
    pub store: SharedStore<T>,
    pub panel: Arc<Mutex<AdminPanel<T>>>,
    /// Set when this kind is backed by a REST collection.
    pub remote: Option<RemoteCollection<T>>,
    pub attachments: AttachmentStore,
}

impl<T: Entity> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            panel: Arc::clone(&self.panel),
            remote: self.remote.clone(),
            attachments: self.attachments.clone(),
        }
    }
}

impl<T: Entity> Collection<T> {
    pub fn local(
        records: Vec<T>,
        notifications: &NotificationLog,
        attachments: &AttachmentStore,
    ) -> Self {
        Self {
            store: EntityStore::with_records(records).into_shared(),
            panel: Arc::new(Mutex::new(AdminPanel::new(notifications.clone()))),
            remote: None,
            attachments: attachments.clone(),
        }
    }

    pub fn with_remote(
        mut self,
        api: Arc<dyn CollectionApi<T>>,
        notifications: &NotificationLog,
    ) -> Self {
        self.remote = Some(RemoteCollection::new(
            api,
            Arc::clone(&self.store),
            notifications.clone(),
        ));
        self
    }
}

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub notifications: NotificationLog,
    pub attachments: AttachmentStore,
    pub institutes: Collection<Institute>,
    pub courses: Collection<Course>,
    pub articles: Collection<Article>,
    pub merit_lists: Collection<MeritList>,
    pub exams: Collection<Exam>,
    /// Dashboard info proxy; `None` when `ADMIN_API_URL` is unset.
    pub admin: Option<AdminInfoClient>,
    /// Body cap applied to the form upload routes.
    pub upload_limit: usize,
}

impl AppState {
    pub fn build(config: &Config) -> Result<Self> {
        let notifications = NotificationLog::new();
        let attachments = AttachmentStore::new();
        let seed_enabled = config.seed_data;

        // Remote institutes start empty and are filled by the initial load.
        let mut institutes = Collection::local(
            seeded(seed_enabled && config.institutes_api_url.is_none(), seed::institutes),
            &notifications,
            &attachments,
        );
        if let Some(url) = &config.institutes_api_url {
            let api = HttpCollectionApi::<Institute>::new(url, config.http_timeout)?;
            institutes = institutes.with_remote(Arc::new(api), &notifications);
            info!("Institutes backed by {url}");
        }

        let admin = match &config.admin_api_url {
            Some(url) => {
                info!("Admin info proxy targets {url}");
                Some(AdminInfoClient::new(url, config.http_timeout)?)
            }
            None => None,
        };

        Ok(AppState {
            courses: Collection::local(
                seeded(seed_enabled, seed::courses),
                &notifications,
                &attachments,
            ),
            articles: Collection::local(
                seeded(seed_enabled, seed::articles),
                &notifications,
                &attachments,
            ),
            merit_lists: Collection::local(
                seeded(seed_enabled, seed::merit_lists),
                &notifications,
                &attachments,
            ),
            exams: Collection::local(
                seeded(seed_enabled, seed::exams),
                &notifications,
                &attachments,
            ),
            institutes,
            admin,
            upload_limit: config.max_upload_bytes,
            notifications,
            attachments,
        })
    }
}

fn seeded<T>(enabled: bool, records: fn() -> Vec<T>) -> Vec<T> {
    if enabled {
        records()
    } else {
        Vec::new()
    }
}
