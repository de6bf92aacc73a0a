use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::Form;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::MediaConfig;
use crate::media::signature::sign_destroy;
use crate::media::{MediaError, MediaStore};

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: Option<String>,
    error: Option<DestroyError>,
}

#[derive(Debug, Deserialize)]
struct DestroyError {
    message: String,
}

pub struct CloudinaryClient {
    http: reqwest::Client,
    config: MediaConfig,
}

impl CloudinaryClient {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn secret(&self) -> Option<&str> {
        self.config.api_secret.as_deref().filter(|s| !s.is_empty())
    }

    pub fn destroy_url(&self, asset_kind: &str) -> String {
        format!(
            "{}/v1_1/{}/{}/destroy",
            self.config.api_base.trim_end_matches('/'),
            self.config.cloud_name,
            asset_kind
        )
    }
}

#[async_trait]
impl MediaStore for CloudinaryClient {
    fn can_sign(&self) -> bool {
        self.secret().is_some()
    }

    #[instrument(skip(self))]
    async fn destroy(&self, public_id: &str, asset_kind: &str) -> Result<(), MediaError> {
        let secret = self.secret().ok_or(MediaError::SecretMissing)?;
        let timestamp = Utc::now().timestamp();
        let form = Form::new()
            .text("public_id", public_id.to_string())
            .text("timestamp", timestamp.to_string())
            .text("api_key", self.config.api_key.clone())
            .text("signature", sign_destroy(public_id, timestamp, secret));

        let response = self
            .http
            .post(self.destroy_url(asset_kind))
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body: DestroyResponse = response.json().await?;
        debug!("destroy responded with {status}: {body:?}");
        match (body.result, body.error) {
            (Some(result), _) if result == "ok" => Ok(()),
            (Some(result), _) => Err(MediaError::Rejected(result)),
            (None, Some(error)) => Err(MediaError::Rejected(error.message)),
            (None, None) => Err(MediaError::Rejected(status.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_secret: Option<&str>) -> MediaConfig {
        MediaConfig {
            cloud_name: "demo".to_string(),
            upload_preset: "gallery_uploads".to_string(),
            api_key: "1234".to_string(),
            api_secret: api_secret.map(str::to_string),
            api_base: "https://api.cloudinary.com/".to_string(),
        }
    }

    #[test]
    fn destroy_url_targets_asset_kind() {
        let client = CloudinaryClient::new(config(None));
        assert_eq!(
            client.destroy_url("video"),
            "https://api.cloudinary.com/v1_1/demo/video/destroy"
        );
    }

    #[tokio::test]
    async fn missing_secret_fails_before_any_request() {
        let client = CloudinaryClient::new(config(None));
        assert!(!client.can_sign());
        let err = client.destroy("folder/asset", "image").await.unwrap_err();
        assert!(matches!(err, MediaError::SecretMissing));

        let client = CloudinaryClient::new(config(Some("")));
        assert!(!client.can_sign());
        assert!(CloudinaryClient::new(config(Some("shh"))).can_sign());
        let err = client.destroy("folder/asset", "image").await.unwrap_err();
        assert!(matches!(err, MediaError::SecretMissing));
    }
}
