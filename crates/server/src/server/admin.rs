use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;

use crate::admin::saga::{delete_resource, DeleteReport};
use crate::admin::{
    create_resource, edit_resource, list_rows, toggle_visibility, ResourceCreated,
    ResourceUpdated, VisibilityChanged,
};
use crate::auth::admin::{check_admin, AdminAccess, AdminClaims};
use crate::auth::token::AccessToken;
use crate::error::RequestError;
use crate::models::resource::{CreateResourceForm, EditResourceForm, Resource, ResourceId};
use crate::models::upload::{UploadAccepted, UploadInfo, UploadWidgetConfig};
use crate::render::pages::admin_page;
use crate::server::constants::{DENIED_REDIRECT, HOME, SESSION_COOKIE};
use crate::server::state::AppState;

/// The panel itself. Unlike the JSON routes this answers with redirects.
pub async fn page(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    token: Option<AccessToken>,
) -> Response {
    match check_admin(state.identity.as_ref(), token.as_ref()).await {
        AdminAccess::Granted(_) => {
            Html(admin_page(&list_rows(state.resources.as_ref()).await)).into_response()
        }
        AdminAccess::NotAdmin => (
            jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
            Redirect::to(DENIED_REDIRECT),
        )
            .into_response(),
        AdminAccess::Unauthenticated => Redirect::to(HOME).into_response(),
    }
}

pub async fn rows(_admin: AdminClaims, State(state): State<Arc<AppState>>) -> Html<String> {
    Html(list_rows(state.resources.as_ref()).await)
}

pub async fn list(
    _admin: AdminClaims,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Resource>>, RequestError> {
    Ok(Json(state.resources.list_all().await?))
}

pub async fn create(
    AdminClaims(claims): AdminClaims,
    State(state): State<Arc<AppState>>,
    Json(form): Json<CreateResourceForm>,
) -> Result<(StatusCode, Json<ResourceCreated>), RequestError> {
    let created = create_resource(
        state.resources.as_ref(),
        &state.uploads,
        claims.session_id,
        form,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn edit(
    _admin: AdminClaims,
    State(state): State<Arc<AppState>>,
    Path(id): Path<ResourceId>,
    Json(form): Json<EditResourceForm>,
) -> Result<Json<ResourceUpdated>, RequestError> {
    Ok(Json(edit_resource(state.resources.as_ref(), id, form).await?))
}

pub async fn toggle(
    _admin: AdminClaims,
    State(state): State<Arc<AppState>>,
    Path(id): Path<ResourceId>,
) -> Result<Json<VisibilityChanged>, RequestError> {
    Ok(Json(toggle_visibility(state.resources.as_ref(), id).await?))
}

pub async fn delete(
    _admin: AdminClaims,
    State(state): State<Arc<AppState>>,
    Path(id): Path<ResourceId>,
) -> Result<Json<DeleteReport>, RequestError> {
    let outcome = delete_resource(state.resources.as_ref(), state.media.as_ref(), id).await?;
    Ok(Json(outcome.report()))
}

pub async fn upload_config(
    _admin: AdminClaims,
    State(state): State<Arc<AppState>>,
) -> Json<UploadWidgetConfig> {
    Json(UploadWidgetConfig {
        cloud_name: state.config.media.cloud_name.clone(),
        upload_preset: state.config.media.upload_preset.clone(),
    })
}

pub async fn record_upload(
    AdminClaims(claims): AdminClaims,
    State(state): State<Arc<AppState>>,
    Json(upload): Json<UploadInfo>,
) -> Json<UploadAccepted> {
    Json(state.uploads.record(claims.session_id, upload))
}

pub async fn clear_upload(
    AdminClaims(claims): AdminClaims,
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    state.uploads.clear(claims.session_id);
    StatusCode::NO_CONTENT
}
