use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use std::sync::Mutex;

use super::{FailureKind, ObjectStore, StoreError};

/// In-memory bucket for tests. Keys are listed in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    bucket: String,
    keys: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
    list_failure: Option<FailureKind>,
    refuse_delete: Option<String>,
}

impl MemoryStore {
    pub fn with_keys(bucket: &str, keys: &[&str]) -> Self {
        Self {
            bucket: bucket.to_string(),
            keys: Mutex::new(keys.iter().map(|k| k.to_string()).collect()),
            ..Default::default()
        }
    }

    /// Every listing fails with the given class after yielding nothing.
    pub fn failing_list(mut self, kind: FailureKind) -> Self {
        self.list_failure = Some(kind);
        self
    }

    /// Deleting `key` fails as if permission had been revoked.
    pub fn refusing_delete(mut self, key: &str) -> Self {
        self.refuse_delete = Some(key.to_string());
        self
    }

    pub fn remaining(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn list<'a>(&'a self, prefix: &'a str) -> BoxStream<'a, Result<String, StoreError>> {
        if let Some(kind) = self.list_failure {
            let err = StoreError::listing(&self.bucket, kind, "injected listing failure".into());
            return stream::once(async move { Err(err) }).boxed();
        }
        let keys: Vec<_> = self
            .keys
            .lock()
            .unwrap()
            .iter()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .map(Ok)
            .collect();
        stream::iter(keys).boxed()
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        if self.refuse_delete.as_deref() == Some(key) {
            return Err(StoreError::DeleteFailure {
                key: key.to_string(),
                source: "permission denied".into(),
            });
        }
        let mut keys = self.keys.lock().unwrap();
        let Some(position) = keys.iter().position(|k| k == key) else {
            return Err(StoreError::DeleteFailure {
                key: key.to_string(),
                source: "no such object".into(),
            });
        };
        keys.remove(position);
        self.deleted.lock().unwrap().push(key.to_string());
        Ok(())
    }
}
