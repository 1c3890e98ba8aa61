use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Route prefix under which attachments are served.
pub const ATTACHMENT_ROUTE: &str = "/api/v1/attachments";

#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// In-process store for files picked in admin forms (photos, merit list
/// PDFs). Nothing is uploaded anywhere; the form field only receives a
/// URL local to this process, and contents are gone on restart.
#[derive(Debug, Clone, Default)]
pub struct AttachmentStore {
    inner: Arc<RwLock<HashMap<Uuid, Attachment>>>,
}

impl AttachmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the file and returns its local URL.
    pub async fn put(&self, attachment: Attachment) -> String {
        let id = Uuid::new_v4();
        tracing::debug!(
            "Stored attachment {id} ({}, {} bytes)",
            attachment.file_name,
            attachment.bytes.len()
        );
        self.inner.write().await.insert(id, attachment);
        object_url(id)
    }

    pub async fn get(&self, id: Uuid) -> Option<Attachment> {
        self.inner.read().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: Uuid) -> Option<Attachment> {
        let removed = self.inner.write().await.remove(&id);
        if removed.is_some() {
            tracing::debug!("Dropped attachment {id}");
        }
        removed
    }
}

pub fn object_url(id: Uuid) -> String {
    format!("{ATTACHMENT_ROUTE}/{id}")
}

/// Inverse of [`object_url`]; `None` for anything not served from here.
pub fn parse_object_url(url: &str) -> Option<Uuid> {
    url.strip_prefix(ATTACHMENT_ROUTE)?
        .strip_prefix('/')?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_returns_servable_url() {
        let store = AttachmentStore::new();
        let url = store
            .put(Attachment {
                file_name: "merit-list-2024.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                bytes: Bytes::from_static(b"%PDF-1.7"),
            })
            .await;

        let id = parse_object_url(&url).unwrap();
        let stored = store.get(id).await.unwrap();
        assert_eq!(stored.file_name, "merit-list-2024.pdf");
        assert_eq!(&stored.bytes[..], b"%PDF-1.7");

        assert!(store.remove(id).await.is_some());
        assert!(store.get(id).await.is_none());
    }

    #[test]
    fn test_parse_object_url_rejects_foreign_urls() {
        assert_eq!(parse_object_url("https://cdn.example.com/a.png"), None);
        assert_eq!(parse_object_url("/api/v1/attachments/not-a-uuid"), None);
        let id = Uuid::new_v4();
        assert_eq!(parse_object_url(&object_url(id)), Some(id));
    }
}
