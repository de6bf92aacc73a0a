use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::resource::{NewResource, Resource, ResourceId, ResourcePatch};
use crate::models::session::{CreateSessionRequest, ResolveSessionResponse, SessionId};
use crate::models::user::{CreateUserRequest, UserCredentials, UserId};

pub mod commands;
pub mod connection;
pub mod memory;
pub mod queries;
pub mod schema;
pub mod utils;

/// Access to the `resources` collection.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Resource>, StoreError>;

    /// Equality filter on `is_public = true`.
    async fn list_public(&self) -> Result<Vec<Resource>, StoreError>;

    async fn get(&self, id: ResourceId) -> Result<Resource, StoreError>;

    async fn create(&self, resource: NewResource) -> Result<ResourceId, StoreError>;

    async fn update(&self, id: ResourceId, patch: ResourcePatch) -> Result<(), StoreError>;

    async fn delete(&self, id: ResourceId) -> Result<(), StoreError>;
}

/// Users, their admin flag and sign-in sessions.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError>;

    /// Unknown users are not admins.
    async fn is_admin(&self, user_id: UserId) -> Result<bool, StoreError>;

    async fn create_user(&self, user: CreateUserRequest) -> Result<UserId, StoreError>;

    async fn create_session(&self, session: CreateSessionRequest) -> Result<(), StoreError>;

    async fn resolve_session(
        &self,
        session_id: SessionId,
    ) -> Result<Option<ResolveSessionResponse>, StoreError>;

    async fn delete_session(&self, session_id: SessionId) -> Result<(), StoreError>;
}
