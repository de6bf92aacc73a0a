use sqlx::{Error as SqlxError, PgExecutor, Row};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::models::resource::{NewResource, ResourceId, ResourceKind, ResourcePatch};
use crate::models::session::{CreateSessionRequest, SessionId};
use crate::models::user::{CreateUserRequest, UserId};

#[instrument(skip_all)]
pub async fn create_resource<'a, E: PgExecutor<'a>>(
    executor: E,
    resource: &NewResource,
) -> Result<ResourceId, SqlxError> {
    let result: ResourceId = sqlx::query(
        "
            INSERT INTO resources (id, title, category, kind, url, thumbnail, public_id, resource_type,
                                   description, featured, is_public, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING id;
        ",
    )
    .bind(Uuid::new_v4())
    .bind(&resource.title)
    .bind(&resource.category)
    .bind(resource.kind.as_str())
    .bind(resource.url.as_deref())
    .bind(resource.thumbnail.as_deref())
    .bind(resource.public_id.as_deref())
    .bind(resource.resource_type.as_deref())
    .bind(resource.description.as_deref())
    .bind(resource.featured)
    .bind(resource.is_public)
    .bind(resource.created_at)
    .fetch_one(executor)
    .await?
    .try_get("id")?;
    info!("created resource with id: {}", result);
    Ok(result)
}

/// Returns the number of affected rows.
#[instrument(skip(executor, patch))]
pub async fn update_resource<'a, E: PgExecutor<'a>>(
    executor: E,
    id: ResourceId,
    patch: &ResourcePatch,
) -> Result<u64, SqlxError> {
    let result = sqlx::query(
        "
            UPDATE resources SET
                title       = COALESCE($2, title),
                category    = COALESCE($3, category),
                kind        = COALESCE($4, kind),
                url         = CASE WHEN $5::text IS NULL THEN url ELSE NULLIF(TRIM($5), '') END,
                description = CASE WHEN $6::text IS NULL THEN description ELSE NULLIF(TRIM($6), '') END,
                featured    = COALESCE($7, featured),
                is_public   = COALESCE($8, is_public),
                updated_at  = COALESCE($9, updated_at)
            WHERE id = $1;
        ",
    )
    .bind(id)
    .bind(patch.title.as_deref())
    .bind(patch.category.as_deref())
    .bind(patch.kind.map(ResourceKind::as_str))
    .bind(patch.url.as_deref())
    .bind(patch.description.as_deref())
    .bind(patch.featured)
    .bind(patch.is_public)
    .bind(patch.updated_at)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

#[instrument(skip(executor))]
pub async fn delete_resource<'a, E: PgExecutor<'a>>(
    executor: E,
    id: ResourceId,
) -> Result<u64, SqlxError> {
    let result = sqlx::query("DELETE FROM resources WHERE id = $1;")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

#[instrument(skip_all)]
pub async fn create_user<'a, E: PgExecutor<'a>>(
    executor: E,
    user: &CreateUserRequest,
) -> Result<UserId, SqlxError> {
    let result = sqlx::query(
        "
            INSERT INTO users (id, email, password_hash, is_admin, created_at)
            VALUES ($1, $2, $3, $4, current_timestamp) RETURNING id;
        ",
    )
    .bind(Uuid::new_v4())
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.is_admin)
    .fetch_one(executor)
    .await?
    .try_get("id")?;
    info!("created user with id: {}", result);
    Ok(result)
}

#[instrument(skip_all)]
pub async fn create_session<'a, E: PgExecutor<'a>>(
    executor: E,
    session: &CreateSessionRequest,
) -> Result<(), SqlxError> {
    sqlx::query(
        "
            INSERT INTO sessions (id, user_id, token_hash, created_at, expires_at)
            VALUES ($1, $2, $3, current_timestamp, $4);
        ",
    )
    .bind(session.id)
    .bind(session.user_id)
    .bind(&session.token_hash)
    .bind(session.expires_at)
    .execute(executor)
    .await?;
    Ok(())
}

#[instrument(skip(executor))]
pub async fn delete_session<'a, E: PgExecutor<'a>>(
    executor: E,
    session_id: SessionId,
) -> Result<u64, SqlxError> {
    let result = sqlx::query("DELETE FROM sessions WHERE id = $1;")
        .bind(session_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
