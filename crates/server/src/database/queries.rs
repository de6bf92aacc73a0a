use chrono::{DateTime, Utc};
use sqlx::{Error as SqlxError, PgExecutor};
use tracing::instrument;

use crate::database::utils::OptionalRow;
use crate::models::resource::{Resource, ResourceId, ResourceKind};
use crate::models::session::{ResolveSessionResponse, SessionId};
use crate::models::user::{UserCredentials, UserId};

const RESOURCE_COLUMNS: &str = "
    id, title, category, kind, url, thumbnail, public_id, resource_type,
    description, featured, is_public, created_at, updated_at
";

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct ResourceRow {
    pub id: ResourceId,
    pub title: String,
    pub category: String,
    pub kind: String,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
    pub public_id: Option<String>,
    pub resource_type: Option<String>,
    pub description: Option<String>,
    pub featured: bool,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ResourceRow> for Resource {
    fn from(row: ResourceRow) -> Self {
        Resource {
            id: row.id,
            title: row.title,
            category: row.category,
            kind: ResourceKind::from(row.kind),
            url: row.url,
            thumbnail: row.thumbnail,
            public_id: row.public_id,
            resource_type: row.resource_type,
            description: row.description,
            featured: row.featured,
            is_public: row.is_public,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[instrument(skip_all)]
pub async fn list_all_resources<'a, E: PgExecutor<'a>>(
    executor: E,
) -> Result<Vec<Resource>, SqlxError> {
    let rows: Vec<ResourceRow> = sqlx::query_as(&format!(
        "SELECT {RESOURCE_COLUMNS} FROM resources ORDER BY created_at;"
    ))
    .fetch_all(executor)
    .await?;
    Ok(rows.into_iter().map(Resource::from).collect())
}

#[instrument(skip_all)]
pub async fn list_public_resources<'a, E: PgExecutor<'a>>(
    executor: E,
) -> Result<Vec<Resource>, SqlxError> {
    let rows: Vec<ResourceRow> = sqlx::query_as(&format!(
        "SELECT {RESOURCE_COLUMNS} FROM resources WHERE is_public = $1 ORDER BY created_at;"
    ))
    .bind(true)
    .fetch_all(executor)
    .await?;
    Ok(rows.into_iter().map(Resource::from).collect())
}

#[instrument(skip(executor))]
pub async fn get_resource<'a, E: PgExecutor<'a>>(
    executor: E,
    id: ResourceId,
) -> Result<Option<Resource>, SqlxError> {
    let row = sqlx::query_as::<_, ResourceRow>(&format!(
        "SELECT {RESOURCE_COLUMNS} FROM resources WHERE id = $1;"
    ))
    .bind(id)
    .fetch_one(executor)
    .await
    .optional_row()?;
    Ok(row.map(Resource::from))
}

#[instrument(skip(executor))]
pub async fn get_user_credentials_by_email<'a, E: PgExecutor<'a>>(
    executor: E,
    email: &str,
) -> Result<Option<UserCredentials>, SqlxError> {
    sqlx::query_as(
        "
    SELECT
        id AS user_id, password_hash
    FROM
        users
    WHERE
        email = $1;
    ",
    )
    .bind(email)
    .fetch_optional(executor)
    .await
}

#[instrument(skip(executor))]
pub async fn get_user_admin_flag<'a, E: PgExecutor<'a>>(
    executor: E,
    user_id: UserId,
) -> Result<Option<bool>, SqlxError> {
    sqlx::query_scalar("SELECT is_admin FROM users WHERE id = $1;")
        .bind(user_id)
        .fetch_optional(executor)
        .await
}

#[instrument(skip(executor))]
pub async fn resolve_session<'a, E: PgExecutor<'a>>(
    executor: E,
    session_id: SessionId,
) -> Result<Option<ResolveSessionResponse>, SqlxError> {
    sqlx::query_as(
        "
    SELECT
        user_id, token_hash, expires_at
    FROM
        sessions
    WHERE
        id = $1;
    ",
    )
    .bind(session_id)
    .fetch_optional(executor)
    .await
}
