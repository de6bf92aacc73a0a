//! Two-step removal of a resource: the hosted media asset first, then the
//! metadata record. The steps share no transaction. Only the metadata step
//! can fail the operation; a media failure leaves an orphaned asset behind
//! and is reported in the outcome.

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::database::ResourceStore;
use crate::error::StoreError;
use crate::media::{MediaError, MediaStore};
use crate::models::resource::ResourceId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrphanReason {
    SecretMissing,
    /// The record names an asset but not its kind, so the destroy call can't be addressed.
    UnknownAssetKind,
    /// The media store answered with something other than "ok".
    Rejected(String),
    Failed(String),
}

impl From<MediaError> for OrphanReason {
    fn from(e: MediaError) -> Self {
        match e {
            MediaError::SecretMissing => Self::SecretMissing,
            MediaError::Rejected(result) => Self::Rejected(result),
            MediaError::Transport(e) => Self::Failed(e.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    BothDeleted,
    /// Nothing was stored in the media store for this record.
    MetadataOnly,
    MediaOrphaned {
        public_id: String,
        reason: OrphanReason,
    },
}

impl DeleteOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BothDeleted => "both_deleted",
            Self::MetadataOnly => "metadata_only",
            Self::MediaOrphaned { .. } => "media_orphaned",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::BothDeleted => "Resource and associated media deleted successfully.".to_string(),
            Self::MetadataOnly => "Resource deleted successfully.".to_string(),
            Self::MediaOrphaned { public_id, reason } => match reason {
                OrphanReason::SecretMissing => format!(
                    "Resource metadata deleted. NOTE: The media file ({public_id}) was NOT deleted because the media API secret is not configured on the server."
                ),
                OrphanReason::UnknownAssetKind => format!(
                    "Resource metadata deleted. NOTE: The media file ({public_id}) was NOT deleted because its asset kind is unknown."
                ),
                OrphanReason::Rejected(result) => format!(
                    "Resource entry deleted, but media asset removal failed: {result}"
                ),
                OrphanReason::Failed(error) => format!(
                    "Resource entry deleted, but media asset removal failed: {error}"
                ),
            },
        }
    }

    pub fn report(&self) -> DeleteReport {
        DeleteReport {
            outcome: self.kind(),
            public_id: match self {
                Self::MediaOrphaned { public_id, .. } => Some(public_id.clone()),
                _ => None,
            },
            message: self.message(),
        }
    }
}

/// Response body of a delete request.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReport {
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    pub message: String,
}

#[instrument(skip(resources, media))]
pub async fn delete_resource(
    resources: &dyn ResourceStore,
    media: &dyn MediaStore,
    id: ResourceId,
) -> Result<DeleteOutcome, StoreError> {
    let resource = resources.get(id).await?;

    let media_step = match resource.public_id.as_deref().filter(|p| !p.is_empty()) {
        None => None,
        Some(public_id) => {
            info!("destroying media asset {public_id}");
            let asset_kind = resource.resource_type.as_deref().filter(|k| !k.is_empty());
            let result = match asset_kind {
                _ if !media.can_sign() => Err(OrphanReason::SecretMissing),
                Some(asset_kind) => media
                    .destroy(public_id, asset_kind)
                    .await
                    .map_err(OrphanReason::from),
                None => Err(OrphanReason::UnknownAssetKind),
            };
            if let Err(reason) = &result {
                warn!("media asset {public_id} was not destroyed: {reason:?}");
            }
            Some((public_id.to_string(), result))
        }
    };

    resources.delete(id).await?;
    info!("deleted resource {id}");

    Ok(match media_step {
        None => DeleteOutcome::MetadataOnly,
        Some((_, Ok(()))) => DeleteOutcome::BothDeleted,
        Some((public_id, Err(reason))) => DeleteOutcome::MediaOrphaned { public_id, reason },
    })
}
