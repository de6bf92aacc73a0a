use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::database::memory::MemoryResourceStore;
use crate::database::ResourceStore;
use crate::error::StoreError;
use crate::media::{MediaError, MediaStore};
use crate::models::resource::{NewResource, Resource, ResourceId, ResourcePatch};

/// Memory store that counts create/update/delete calls.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryResourceStore,
    writes: AtomicUsize,
}

impl CountingStore {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn count(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ResourceStore for CountingStore {
    async fn list_all(&self) -> Result<Vec<Resource>, StoreError> {
        self.inner.list_all().await
    }

    async fn list_public(&self) -> Result<Vec<Resource>, StoreError> {
        self.inner.list_public().await
    }

    async fn get(&self, id: ResourceId) -> Result<Resource, StoreError> {
        self.inner.get(id).await
    }

    async fn create(&self, resource: NewResource) -> Result<ResourceId, StoreError> {
        self.count();
        self.inner.create(resource).await
    }

    async fn update(&self, id: ResourceId, patch: ResourcePatch) -> Result<(), StoreError> {
        self.count();
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: ResourceId) -> Result<(), StoreError> {
        self.count();
        self.inner.delete(id).await
    }
}

/// Store whose every call fails like an unreachable database.
pub struct BrokenStore;

#[async_trait]
impl ResourceStore for BrokenStore {
    async fn list_all(&self) -> Result<Vec<Resource>, StoreError> {
        Err(StoreError::FetchFailed(sqlx::Error::PoolTimedOut))
    }

    async fn list_public(&self) -> Result<Vec<Resource>, StoreError> {
        Err(StoreError::FetchFailed(sqlx::Error::PoolTimedOut))
    }

    async fn get(&self, _id: ResourceId) -> Result<Resource, StoreError> {
        Err(StoreError::FetchFailed(sqlx::Error::PoolTimedOut))
    }

    async fn create(&self, _resource: NewResource) -> Result<ResourceId, StoreError> {
        Err(StoreError::FetchFailed(sqlx::Error::PoolTimedOut))
    }

    async fn update(&self, _id: ResourceId, _patch: ResourcePatch) -> Result<(), StoreError> {
        Err(StoreError::FetchFailed(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _id: ResourceId) -> Result<(), StoreError> {
        Err(StoreError::FetchFailed(sqlx::Error::PoolTimedOut))
    }
}

/// Media store that remembers destroy calls and answers with a fixed result.
#[derive(Default)]
pub struct RecordingMedia {
    calls: Mutex<Vec<(String, String)>>,
    /// `None` answers "ok".
    reply: Option<String>,
}

impl RecordingMedia {
    pub fn rejecting(result: &str) -> Self {
        Self {
            calls: Mutex::default(),
            reply: Some(result.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaStore for RecordingMedia {
    async fn destroy(&self, public_id: &str, asset_kind: &str) -> Result<(), MediaError> {
        self.calls
            .lock()
            .unwrap()
            .push((public_id.to_string(), asset_kind.to_string()));
        match &self.reply {
            None => Ok(()),
            Some(result) => Err(MediaError::Rejected(result.clone())),
        }
    }
}
