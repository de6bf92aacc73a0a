use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::admin::uploads::PendingUploads;
use crate::database::ResourceStore;
use crate::error::RequestError;
use crate::models::resource::{
    non_empty, validate_resource_title, CreateResourceForm, EditResourceForm, NewResource,
    ResourceId, ResourcePatch,
};
use crate::models::session::SessionId;
use crate::render::admin::{resource_rows, rows_error};

pub mod saga;
pub mod uploads;

pub const UPDATED: &str = "Resource updated successfully!";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceCreated {
    pub id: ResourceId,
    pub message: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ResourceUpdated {
    pub message: &'static str,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityChanged {
    pub id: ResourceId,
    pub is_public: bool,
}

/// Management rows for every resource, or the inline load error.
pub async fn list_rows(resources: &dyn ResourceStore) -> String {
    match resources.list_all().await {
        Ok(all) => resource_rows(&all),
        Err(e) => {
            error!("failed to list resources for admin: {e}");
            rows_error()
        }
    }
}

/// Stores a new resource, filling the link and media reference from the
/// session's pending upload. The upload is consumed only when the write succeeds.
#[instrument(skip_all)]
pub async fn create_resource(
    resources: &dyn ResourceStore,
    uploads: &PendingUploads,
    session_id: SessionId,
    form: CreateResourceForm,
) -> Result<ResourceCreated, RequestError> {
    validate_resource_title(&form.title)?;
    let upload = uploads.get(session_id);

    let url = non_empty(&form.url).or_else(|| upload.as_ref().map(|u| u.secure_url.clone()));
    let thumbnail = non_empty(&form.thumbnail).or_else(|| {
        upload
            .as_ref()
            .filter(|u| u.asset_kind(form.kind) == "image")
            .map(|u| u.secure_url.clone())
    });
    let new = NewResource {
        title: form.title.trim().to_string(),
        category: form.category.trim().to_string(),
        kind: form.kind,
        url,
        thumbnail,
        public_id: upload.as_ref().map(|u| u.public_id.clone()),
        resource_type: upload.as_ref().map(|u| u.asset_kind(form.kind).to_string()),
        description: non_empty(&form.description),
        featured: form.featured,
        is_public: form.is_public,
        created_at: Utc::now(),
    };

    let id = resources.create(new).await?;
    if let Some(consumed) = &upload {
        uploads.consume(session_id, consumed);
    }
    info!("admin session {session_id} added resource {id}");
    Ok(ResourceCreated {
        id,
        message: format!("Resource added successfully! ID: {id}"),
    })
}

#[instrument(skip(resources, form))]
pub async fn edit_resource(
    resources: &dyn ResourceStore,
    id: ResourceId,
    form: EditResourceForm,
) -> Result<ResourceUpdated, RequestError> {
    validate_resource_title(&form.title)?;
    resources.update(id, form.into_patch(Utc::now())).await?;
    Ok(ResourceUpdated { message: UPDATED })
}

/// Flips the public flag of one resource.
#[instrument(skip(resources))]
pub async fn toggle_visibility(
    resources: &dyn ResourceStore,
    id: ResourceId,
) -> Result<VisibilityChanged, RequestError> {
    let current = resources.get(id).await?;
    let is_public = !current.is_public;
    resources
        .update(id, ResourcePatch::visibility(is_public))
        .await?;
    info!("resource {id} is now {}", if is_public { "public" } else { "locked" });
    Ok(VisibilityChanged { id, is_public })
}
