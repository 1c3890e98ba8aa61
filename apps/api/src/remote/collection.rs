use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::warn;

use super::{build_client, send_json, RequestError};
use crate::models::{Entity, RecordId};
use crate::sync::CollectionApi;

/// REST collection endpoint for one record kind:
///
/// - `GET    {base}/{path}`      → array of records
/// - `POST   {base}/{path}`      ← `{"form": record}`
/// - `PUT    {base}/{path}/:id`  ← `{"<singular>": record}`
/// - `DELETE {base}/{path}/:id`
pub struct HttpCollectionApi<T> {
    client: Client,
    base_url: String,
    _kind: PhantomData<fn() -> T>,
}

impl<T: Entity> HttpCollectionApi<T> {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RequestError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            _kind: PhantomData,
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, T::schema().path)
    }

    fn item_url(&self, id: &RecordId) -> String {
        format!("{}/{}", self.collection_url(), id)
    }
}

/// Accepts either the bare record or one wrapped under the singular key.
fn decode_record<T: Entity>(body: Value) -> Result<T, RequestError> {
    let key = T::schema().singular;
    let record = match body {
        Value::Object(mut map) if matches!(map.get(key), Some(Value::Object(_))) => {
            map.remove(key).unwrap_or_default()
        }
        other => other,
    };
    Ok(serde_json::from_value(record)?)
}

/// Accepts a bare array or `{"<path>": [...]}`. Entries that do not decode
/// are skipped so one malformed record cannot empty the whole list.
fn decode_list<T: Entity>(body: Value) -> Result<Vec<T>, RequestError> {
    let list = match body {
        Value::Object(mut map) => map.remove(T::schema().path).unwrap_or(Value::Array(vec![])),
        Value::Null => Value::Array(vec![]),
        other => other,
    };
    let Value::Array(items) = list else {
        return Ok(serde_json::from_value(list)?);
    };

    let path = T::schema().path;
    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed {path} entry {i}: {e}");
                None
            }
        })
        .collect())
}

#[async_trait]
impl<T: Entity> CollectionApi<T> for HttpCollectionApi<T> {
    async fn fetch_all(&self) -> Result<Vec<T>, RequestError> {
        let body = send_json(self.client.get(self.collection_url())).await?;
        decode_list(body)
    }

    async fn create(&self, record: &T) -> Result<T, RequestError> {
        let body = send_json(
            self.client
                .post(self.collection_url())
                .json(&json!({ "form": record })),
        )
        .await?;
        decode_record(body)
    }

    async fn update(&self, id: &RecordId, record: &T) -> Result<T, RequestError> {
        let mut envelope = serde_json::Map::new();
        envelope.insert(T::schema().singular.to_string(), serde_json::to_value(record)?);
        let body = send_json(
            self.client
                .put(self.item_url(id))
                .json(&Value::Object(envelope)),
        )
        .await?;
        if body.is_null() {
            // Some backends answer 204; the sent record stands in.
            return Ok(record.clone());
        }
        decode_record(body)
    }

    async fn delete(&self, id: &RecordId) -> Result<(), RequestError> {
        send_json(self.client.delete(self.item_url(id))).await?;
        Ok(())
    }
}
