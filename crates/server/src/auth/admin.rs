use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::async_trait;
use serde_json::json;
use tracing::{error, info, warn};

use crate::auth::session::sign_out;
use crate::auth::token::{AccessToken, Claims};
use crate::database::IdentityStore;
use crate::server::state::AppState;

/// Outcome of checking a request against the admin gate.
#[derive(Clone, Debug)]
pub enum AdminAccess {
    /// No session, a bad or expired token, or the check itself failed.
    Unauthenticated,
    /// Signed in without the admin flag; the session has been revoked.
    NotAdmin,
    Granted(Claims),
}

pub async fn check_admin(identity: &dyn IdentityStore, token: Option<&AccessToken>) -> AdminAccess {
    let Some(token) = token else {
        return AdminAccess::Unauthenticated;
    };
    let claims = match token.resolve(identity).await {
        Ok(claims) => claims,
        Err(e) => {
            info!("admin check without a valid session: {e:?}");
            return AdminAccess::Unauthenticated;
        }
    };
    match identity.is_admin(claims.user_id).await {
        Ok(true) => AdminAccess::Granted(claims),
        Ok(false) => {
            warn!("user {} is not an admin, signing out", claims.user_id);
            if let Err(e) = sign_out(identity, &claims).await {
                error!("failed to revoke non-admin session: {e}");
            }
            AdminAccess::NotAdmin
        }
        Err(e) => {
            error!("failed to verify admin flag, denying access: {e}");
            AdminAccess::Unauthenticated
        }
    }
}

/// Claims of a verified admin.
#[derive(Clone, Debug)]
pub struct AdminClaims(pub Claims);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminRejection {
    Unauthenticated,
    Forbidden,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::Unauthenticated => (StatusCode::UNAUTHORIZED, "Sign in required"),
            Self::Forbidden => (StatusCode::FORBIDDEN, "Access Denied: Admins only."),
        };
        (status, json!({ "error": error }).to_string()).into_response()
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AdminClaims {
    type Rejection = AdminRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = AccessToken::from_request_parts(parts, state).await.ok();
        match check_admin(state.identity.as_ref(), token.as_ref()).await {
            AdminAccess::Granted(claims) => Ok(AdminClaims(claims)),
            AdminAccess::NotAdmin => Err(AdminRejection::Forbidden),
            AdminAccess::Unauthenticated => Err(AdminRejection::Unauthenticated),
        }
    }
}
