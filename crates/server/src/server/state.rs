use std::sync::Arc;

use chrono::Duration;
use tracing::info;

use crate::admin::uploads::PendingUploads;
use crate::auth::session::{origin_admin_request, LoginLimiter};
use crate::config::{AppConfig, StorageConfig};
use crate::database::connection::DbConnection;
use crate::database::memory::{MemoryIdentityStore, MemoryResourceStore};
use crate::database::{IdentityStore, ResourceStore};
use crate::media::cloudinary::CloudinaryClient;
use crate::media::MediaStore;

pub struct AppState {
    pub config: AppConfig,
    pub resources: Arc<dyn ResourceStore>,
    pub identity: Arc<dyn IdentityStore>,
    pub media: Arc<dyn MediaStore>,
    pub uploads: PendingUploads,
    pub login_limiter: LoginLimiter,
}

impl AppState {
    /// Connects the configured storage backend. With `init_schema` the
    /// Postgres schema is recreated; the memory backend always starts empty.
    pub async fn try_init(config: &AppConfig, init_schema: bool) -> anyhow::Result<Self> {
        let origin_admin = config
            .auth
            .bootstrap_admin
            .as_ref()
            .map(origin_admin_request)
            .transpose()?;

        let (resources, identity): (Arc<dyn ResourceStore>, Arc<dyn IdentityStore>) =
            match &config.storage {
                StorageConfig::Postgres(db_config) => {
                    let db = Arc::new(DbConnection::connect(db_config).await?);
                    if init_schema {
                        info!("recreating database schema");
                        db.drop_schema().await?;
                        db.init_schema(origin_admin).await?;
                    }
                    let resources: Arc<dyn ResourceStore> = db.clone();
                    (resources, db)
                }
                StorageConfig::Memory => {
                    let identity = MemoryIdentityStore::new();
                    if let Some(admin) = origin_admin {
                        identity.create_user(admin).await?;
                    }
                    (Arc::new(MemoryResourceStore::new()), Arc::new(identity))
                }
            };
        let media = Arc::new(CloudinaryClient::new(config.media.clone()));
        Ok(Self::new(config.clone(), resources, identity, media))
    }

    pub fn new(
        config: AppConfig,
        resources: Arc<dyn ResourceStore>,
        identity: Arc<dyn IdentityStore>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        let login_limiter = LoginLimiter::per_minute(config.auth.login_attempts_per_minute);
        Self {
            config,
            resources,
            identity,
            media,
            uploads: PendingUploads::new(),
            login_limiter,
        }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::minutes(self.config.auth.session_ttl_minutes)
    }
}
