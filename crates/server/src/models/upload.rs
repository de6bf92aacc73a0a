use serde::{Deserialize, Serialize};

use crate::models::resource::ResourceKind;

/// Payload of the upload widget's success callback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadInfo {
    pub secure_url: String,
    pub public_id: String,
    #[serde(default)]
    pub resource_type: String,
    #[serde(default)]
    pub original_filename: String,
}

impl UploadInfo {
    pub fn drop_zone_label(&self) -> String {
        let name = if self.original_filename.is_empty() {
            &self.public_id
        } else {
            &self.original_filename
        };
        format!("File Uploaded: {name}")
    }

    /// The reported resource type, or the media class of `kind` when the widget left it out.
    pub fn asset_kind(&self, kind: ResourceKind) -> &str {
        match self.resource_type.trim() {
            "" => kind.asset_class(),
            reported => reported,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadWidgetConfig {
    pub cloud_name: String,
    pub upload_preset: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct UploadAccepted {
    pub label: String,
}
