use chrono::{DateTime, Utc};

use crate::auth::token::SessionToken;
use crate::models::user::UserId;

pub type SessionId = uuid::Uuid;

#[derive(Clone, Debug)]
pub struct CreateSessionRequest {
    pub id: SessionId,
    pub user_id: UserId,
    pub token_hash: SessionToken,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct ResolveSessionResponse {
    pub user_id: UserId,
    pub token_hash: SessionToken,
    pub expires_at: DateTime<Utc>,
}
