use sqlx::{Error as SqlxError, Postgres, Transaction};
use tracing::{info, instrument};

use crate::database::commands::create_user;
use crate::database::connection::DbConnection;
use crate::models::user::CreateUserRequest;

impl DbConnection {
    /// Creates tables and, when given, the origin admin account.
    pub async fn init_schema(&self, origin_admin: Option<CreateUserRequest>) -> Result<(), SqlxError> {
        let mut transaction = self.pool().begin().await?;
        create_all_tables(&mut transaction).await?;
        if let Some(admin) = origin_admin {
            create_origin_admin(&mut transaction, &admin).await?;
        }
        transaction.commit().await?;
        Ok(())
    }

    pub async fn drop_schema(&self) -> Result<(), SqlxError> {
        let mut transaction = self.pool().begin().await?;
        drop_all_tables(&mut transaction).await?;
        transaction.commit().await?;
        Ok(())
    }
}

#[instrument(skip_all)]
pub async fn create_all_tables(
    transaction: &mut Transaction<'_, Postgres>,
) -> Result<(), SqlxError> {
    sqlx::query(
        "
            CREATE TABLE users (
                id              uuid PRIMARY KEY,
                email           VARCHAR(254) NOT NULL UNIQUE,
                password_hash   TEXT NOT NULL,
                is_admin        BOOLEAN NOT NULL DEFAULT FALSE,
                created_at      TIMESTAMPTZ NOT NULL
            );
        ",
    )
    .execute(transaction.as_mut())
    .await?;
    sqlx::query(
        "
            CREATE TABLE sessions (
                id              uuid PRIMARY KEY,
                user_id         uuid NOT NULL REFERENCES users(id) ON UPDATE CASCADE ON DELETE CASCADE,
                token_hash      BYTEA NOT NULL,
                created_at      TIMESTAMPTZ NOT NULL,
                expires_at      TIMESTAMPTZ NOT NULL
            );
        ",
    )
    .execute(transaction.as_mut())
    .await?;
    sqlx::query(
        "
            CREATE TABLE resources (
                id              uuid PRIMARY KEY,
                title           VARCHAR(200) NOT NULL,
                category        VARCHAR(100) NOT NULL DEFAULT '',
                kind            VARCHAR(16) NOT NULL,
                url             TEXT,
                thumbnail       TEXT,
                public_id       VARCHAR(255),
                resource_type   VARCHAR(32),
                description     TEXT,
                featured        BOOLEAN NOT NULL DEFAULT FALSE,
                is_public       BOOLEAN NOT NULL DEFAULT TRUE,
                created_at      TIMESTAMPTZ NOT NULL,
                updated_at      TIMESTAMPTZ
            );
        ",
    )
    .execute(transaction.as_mut())
    .await?;
    sqlx::query("CREATE INDEX resources_is_public_idx ON resources (is_public);")
        .execute(transaction.as_mut())
        .await?;
    Ok(())
}

#[instrument(skip_all)]
pub async fn drop_all_tables(transaction: &mut Transaction<'_, Postgres>) -> Result<(), SqlxError> {
    let statements = [
        "DROP TABLE IF EXISTS resources;",
        "DROP TABLE IF EXISTS sessions;",
        "DROP TABLE IF EXISTS users;",
    ];
    for statement in &statements {
        sqlx::query(statement).execute(transaction.as_mut()).await?;
    }
    Ok(())
}

#[instrument(skip_all)]
pub async fn create_origin_admin(
    transaction: &mut Transaction<'_, Postgres>,
    admin: &CreateUserRequest,
) -> Result<(), SqlxError> {
    let user_id = create_user(transaction.as_mut(), admin).await?;
    info!("created origin admin {} with id: {}", admin.email, user_id);
    Ok(())
}
