use std::fs::read_to_string;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::database::connection::DbConfig;
use crate::models::user::BootstrapAdmin;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub address: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageConfig {
    Postgres(DbConfig),
    Memory,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub upload_preset: String,
    pub api_key: String,
    /// Only the server ever sees this; without it media cleanup is skipped.
    #[serde(default)]
    pub api_secret: Option<String>,
    #[serde(default = "MediaConfig::default_api_base")]
    pub api_base: String,
}

impl MediaConfig {
    fn default_api_base() -> String {
        "https://api.cloudinary.com".to_string()
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub secret_word: String,
    pub search_debounce_ms: u64,
    pub skeleton_cards: usize,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            secret_word: "avnish".to_string(),
            search_debounce_ms: 300,
            skeleton_cards: 4,
        }
    }
}

impl GalleryConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub session_ttl_minutes: i64,
    pub login_attempts_per_minute: u32,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_minutes: 720,
            login_attempts_per_minute: 5,
            bootstrap_admin: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub media: MediaConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_yaml_file<P: Into<PathBuf>>(path: P) -> Result<Self, anyhow::Error> {
        let path = path.into();
        let content = read_to_string(&path).with_context(|| format!("path: {path:?}"))?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, anyhow::Error> {
        Ok(serde_yaml::from_str(content)?)
    }
}
