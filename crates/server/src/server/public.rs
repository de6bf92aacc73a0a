use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tracing::warn;

use crate::auth::error::AuthError;
use crate::auth::session::{sign_in, sign_out};
use crate::auth::token::{AccessToken, AuthPayload, TokenExchangePayload};
use crate::error::RequestError;
use crate::models::resource::{Resource, ResourceKind};
use crate::render::pages::gallery_page;
use crate::server::constants::SESSION_COOKIE;
use crate::server::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct IndexParams {
    denied: Option<String>,
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IndexParams>,
) -> Html<String> {
    Html(gallery_page(
        state.config.gallery.skeleton_cards,
        params.denied.is_some(),
    ))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    q: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Public resources as JSON, optionally searched and narrowed to one kind.
pub async fn list_resources(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Resource>>, RequestError> {
    let term = params.q.as_deref().unwrap_or_default().trim().to_lowercase();
    let kind = params
        .kind
        .as_deref()
        .filter(|k| !k.is_empty() && *k != "all")
        .map(ResourceKind::parse_lossy);
    let resources = state
        .resources
        .list_public()
        .await?
        .into_iter()
        .filter(|r| kind.map_or(true, |kind| r.kind == kind))
        .filter(|r| term.is_empty() || r.matches(&term))
        .collect();
    Ok(Json(resources))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<AuthPayload>,
) -> Result<(CookieJar, Json<TokenExchangePayload>), AuthError> {
    let exchange = sign_in(
        state.identity.as_ref(),
        &state.login_limiter,
        state.session_ttl(),
        &payload,
    )
    .await?;
    let cookie = Cookie::build((SESSION_COOKIE, exchange.access_token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    Ok((jar.add(cookie), Json(exchange)))
}

/// Ends the caller's session if there is one; the cookie is dropped either way.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    token: Option<AccessToken>,
) -> (CookieJar, StatusCode) {
    if let Some(token) = token {
        match token.resolve(state.identity.as_ref()).await {
            Ok(claims) => {
                if let Err(e) = sign_out(state.identity.as_ref(), &claims).await {
                    warn!("failed to delete session on logout: {e}");
                }
            }
            Err(e) => warn!("logout with unusable token: {e:?}"),
        }
    }
    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        StatusCode::NO_CONTENT,
    )
}

pub async fn health() -> &'static str {
    "ok"
}
