//! In-process stores used by `storage.kind: memory` and by the test suite.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::database::{IdentityStore, ResourceStore};
use crate::error::StoreError;
use crate::models::resource::{NewResource, Resource, ResourceId, ResourcePatch};
use crate::models::session::{CreateSessionRequest, ResolveSessionResponse, SessionId};
use crate::models::user::{CreateUserRequest, User, UserCredentials, UserId};

/// Resources kept in insertion order, which is also `created_at` order.
#[derive(Default)]
pub struct MemoryResourceStore {
    resources: RwLock<Vec<Resource>>,
}

impl MemoryResourceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResourceStore for MemoryResourceStore {
    async fn list_all(&self) -> Result<Vec<Resource>, StoreError> {
        Ok(self.resources.read().await.clone())
    }

    async fn list_public(&self) -> Result<Vec<Resource>, StoreError> {
        Ok(self
            .resources
            .read()
            .await
            .iter()
            .filter(|r| r.is_public)
            .cloned()
            .collect())
    }

    async fn get(&self, id: ResourceId) -> Result<Resource, StoreError> {
        self.resources
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    #[instrument(skip_all)]
    async fn create(&self, resource: NewResource) -> Result<ResourceId, StoreError> {
        let id = Uuid::new_v4();
        self.resources
            .write()
            .await
            .push(Resource::from_new(id, resource));
        info!("created resource with id: {}", id);
        Ok(id)
    }

    async fn update(&self, id: ResourceId, patch: ResourcePatch) -> Result<(), StoreError> {
        let mut resources = self.resources.write().await;
        let resource = resources
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;
        resource.apply(&patch);
        Ok(())
    }

    async fn delete(&self, id: ResourceId) -> Result<(), StoreError> {
        let mut resources = self.resources.write().await;
        let position = resources
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;
        resources.remove(position);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryIdentityStore {
    users: DashMap<UserId, User>,
    sessions: DashMap<SessionId, ResolveSessionResponse>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| UserCredentials {
                user_id: u.id,
                password_hash: u.password_hash.clone(),
            }))
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, StoreError> {
        Ok(self.users.get(&user_id).is_some_and(|u| u.is_admin))
    }

    #[instrument(skip_all)]
    async fn create_user(&self, user: CreateUserRequest) -> Result<UserId, StoreError> {
        if self.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::AlreadyExists);
        }
        let id = Uuid::new_v4();
        self.users.insert(
            id,
            User {
                id,
                email: user.email,
                password_hash: user.password_hash,
                is_admin: user.is_admin,
                created_at: Utc::now(),
            },
        );
        info!("created user with id: {}", id);
        Ok(id)
    }

    async fn create_session(&self, session: CreateSessionRequest) -> Result<(), StoreError> {
        let now = Utc::now();
        self.sessions.retain(|_, s| s.expires_at > now);
        self.sessions.insert(
            session.id,
            ResolveSessionResponse {
                user_id: session.user_id,
                token_hash: session.token_hash,
                expires_at: session.expires_at,
            },
        );
        Ok(())
    }

    async fn resolve_session(
        &self,
        session_id: SessionId,
    ) -> Result<Option<ResolveSessionResponse>, StoreError> {
        Ok(self.sessions.get(&session_id).map(|s| s.clone()))
    }

    async fn delete_session(&self, session_id: SessionId) -> Result<(), StoreError> {
        self.sessions.remove(&session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resource::ResourceKind;

    fn new_resource(title: &str, is_public: bool) -> NewResource {
        NewResource {
            title: title.to_string(),
            category: "General".to_string(),
            kind: ResourceKind::Link,
            url: Some("https://example.com".to_string()),
            thumbnail: None,
            public_id: None,
            resource_type: None,
            description: None,
            featured: false,
            is_public,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn list_public_excludes_private_resources() {
        let store = MemoryResourceStore::new();
        store.create(new_resource("open", true)).await.unwrap();
        store.create(new_resource("hidden", false)).await.unwrap();

        let public = store.list_public().await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].title, "open");
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_id_is_not_found() {
        let store = MemoryResourceStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            store.update(id, ResourcePatch::visibility(false)).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(store.delete(id).await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryIdentityStore::new();
        let request = CreateUserRequest {
            email: "admin@example.com".to_string(),
            password_hash: "hash".to_string(),
            is_admin: true,
        };
        let id = store.create_user(request.clone()).await.unwrap();
        assert!(store.is_admin(id).await.unwrap());
        assert!(store.create_user(request).await.is_err());
        assert!(!store.is_admin(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn new_sessions_sweep_expired_ones() {
        let store = MemoryIdentityStore::new();
        let session = |id, minutes| CreateSessionRequest {
            id,
            user_id: Uuid::new_v4(),
            token_hash: b"hash".to_vec(),
            expires_at: Utc::now() + chrono::Duration::minutes(minutes),
        };
        let (stale, live, fresh) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        store.create_session(session(stale, -5)).await.unwrap();
        store.create_session(session(live, 5)).await.unwrap();
        assert!(store.resolve_session(stale).await.unwrap().is_some());

        store.create_session(session(fresh, 5)).await.unwrap();
        assert!(store.resolve_session(stale).await.unwrap().is_none());
        assert!(store.resolve_session(live).await.unwrap().is_some());
        assert!(store.resolve_session(fresh).await.unwrap().is_some());
    }
}
