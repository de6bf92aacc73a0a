use async_trait::async_trait;
use thiserror::Error;

pub mod cloudinary;
pub mod signature;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media signing secret is not configured")]
    SecretMissing,
    #[error("media store refused to destroy the asset: {0}")]
    Rejected(String),
    #[error("media store request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Hosted media store, only the destroy half; uploads happen in the browser widget.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Whether destroy requests can be signed at all.
    fn can_sign(&self) -> bool {
        true
    }

    /// `asset_kind` is the store's resource type (`image`, `video`, `raw`).
    async fn destroy(&self, public_id: &str, asset_kind: &str) -> Result<(), MediaError>;
}
