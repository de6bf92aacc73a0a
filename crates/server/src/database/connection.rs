use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Error as SqlxError;

use crate::database::{commands, queries, IdentityStore, ResourceStore};
use crate::error::StoreError;
use crate::models::resource::{NewResource, Resource, ResourceId, ResourcePatch};
use crate::models::session::{CreateSessionRequest, ResolveSessionResponse, SessionId};
use crate::models::user::{CreateUserRequest, UserCredentials, UserId};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DbConfig {
    username: String,
    password: String,
    dbname: String,
    address: Option<String>,
    max_connections: Option<u32>,
}

impl DbConfig {
    const ADDRESS_FALLBACK: &'static str = "localhost";
    const MAX_CONN_FALLBACK: u32 = 5;

    pub fn development(dbname: &str, username: &str, password: &str) -> Self {
        Self {
            dbname: dbname.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            address: None,
            max_connections: None,
        }
    }

    pub fn get_url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}/{}",
            self.username,
            self.password,
            self.address.as_deref().unwrap_or(Self::ADDRESS_FALLBACK),
            self.dbname,
        )
    }
    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or(Self::MAX_CONN_FALLBACK)
    }
}

pub struct DbConnection {
    pool: PgPool,
}

impl DbConnection {
    pub async fn connect(config: &DbConfig) -> Result<Self, SqlxError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections())
            .connect(&config.get_url())
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ResourceStore for DbConnection {
    async fn list_all(&self) -> Result<Vec<Resource>, StoreError> {
        Ok(queries::list_all_resources(self.pool()).await?)
    }

    async fn list_public(&self) -> Result<Vec<Resource>, StoreError> {
        Ok(queries::list_public_resources(self.pool()).await?)
    }

    async fn get(&self, id: ResourceId) -> Result<Resource, StoreError> {
        queries::get_resource(self.pool(), id)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, resource: NewResource) -> Result<ResourceId, StoreError> {
        Ok(commands::create_resource(self.pool(), &resource).await?)
    }

    async fn update(&self, id: ResourceId, patch: ResourcePatch) -> Result<(), StoreError> {
        match commands::update_resource(self.pool(), id, &patch).await? {
            0 => Err(StoreError::NotFound),
            _ => Ok(()),
        }
    }

    async fn delete(&self, id: ResourceId) -> Result<(), StoreError> {
        match commands::delete_resource(self.pool(), id).await? {
            0 => Err(StoreError::NotFound),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl IdentityStore for DbConnection {
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError> {
        Ok(queries::get_user_credentials_by_email(self.pool(), email).await?)
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, StoreError> {
        Ok(queries::get_user_admin_flag(self.pool(), user_id)
            .await?
            .unwrap_or(false))
    }

    async fn create_user(&self, user: CreateUserRequest) -> Result<UserId, StoreError> {
        Ok(commands::create_user(self.pool(), &user).await?)
    }

    async fn create_session(&self, session: CreateSessionRequest) -> Result<(), StoreError> {
        Ok(commands::create_session(self.pool(), &session).await?)
    }

    async fn resolve_session(
        &self,
        session_id: SessionId,
    ) -> Result<Option<ResolveSessionResponse>, StoreError> {
        Ok(queries::resolve_session(self.pool(), session_id).await?)
    }

    async fn delete_session(&self, session_id: SessionId) -> Result<(), StoreError> {
        commands::delete_session(self.pool(), session_id).await?;
        Ok(())
    }
}
