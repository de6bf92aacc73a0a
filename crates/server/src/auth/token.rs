use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::{async_trait, RequestPartsExt};
use axum_extra::extract::CookieJar;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use base64::prelude::BASE64_STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::utils::{
    pack_session_id_and_token, session_token_matches, unpack_session_id_and_token,
};
use crate::database::IdentityStore;
use crate::error::SessionError;
use crate::models::session::SessionId;
use crate::models::user::UserId;
use crate::server::constants::SESSION_COOKIE;

pub type SessionToken = Vec<u8>;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: UserId,
    pub session_id: SessionId,
}

/// Raw access token from the `Authorization: Bearer` header, falling back to the session cookie.
#[derive(Clone, Debug)]
pub struct AccessToken(pub String);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AccessToken {
    type Rejection = SessionError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Ok(TypedHeader(Authorization(bearer))) =
            parts.extract::<TypedHeader<Authorization<Bearer>>>().await
        {
            return Ok(AccessToken(bearer.token().to_string()));
        }
        CookieJar::from_headers(&parts.headers)
            .get(SESSION_COOKIE)
            .map(|cookie| AccessToken(cookie.value().to_string()))
            .ok_or_else(|| {
                debug!("request carries neither bearer token nor session cookie");
                SessionError::BadToken
            })
    }
}

impl AccessToken {
    pub async fn resolve(&self, identity: &dyn IdentityStore) -> Result<Claims, SessionError> {
        let packed = BASE64.decode(&self.0).map_err(|_| {
            debug!("malformed access token: not base64");
            SessionError::BadToken
        })?;
        let (session_id, token) = unpack_session_id_and_token(&packed).ok_or_else(|| {
            debug!("malformed access token: unable to unpack");
            SessionError::BadToken
        })?;
        let session = identity
            .resolve_session(session_id)
            .await?
            .ok_or(SessionError::TokenNotFound)?;
        if !session_token_matches(token, &session.token_hash) {
            return Err(SessionError::TokenNotFound);
        }
        if session.expires_at <= Utc::now() {
            return Err(SessionError::TokenExpired);
        }
        Ok(Claims {
            user_id: session.user_id,
            session_id,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct TokenExchangePayload {
    pub access_token: String,
    pub access_token_expires_at: String,
}

impl TokenExchangePayload {
    pub fn new<B: AsRef<[u8]>>(
        session_id: &SessionId,
        access_token: B,
        access_token_expires_at: DateTime<Utc>,
    ) -> Self {
        let access_token = pack_session_id_and_token(session_id, access_token.as_ref());
        Self {
            access_token: BASE64.encode(access_token),
            access_token_expires_at: access_token_expires_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthPayload {
    pub email: String,
    pub password: String,
}
