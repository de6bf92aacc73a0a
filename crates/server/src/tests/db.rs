//! Postgres-backed store tests. They need a local database:
//! `gallery_db` owned by `gallery_guest` / `gallerypass`.
//! Run with `cargo test -- --ignored`.

use chrono::{Duration, Utc};
use once_cell::sync::Lazy;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::auth::utils::{generate_session_token, hash_password, hash_session_token};
use crate::database::connection::{DbConfig, DbConnection};
use crate::database::{IdentityStore, ResourceStore};
use crate::error::StoreError;
use crate::models::resource::{NewResource, ResourceKind, ResourcePatch};
use crate::models::session::CreateSessionRequest;
use crate::models::user::CreateUserRequest;

/// Some tests can't run in parallel, prevent them from breaking each other's state
static SERIAL_LOCK: Lazy<Mutex<()>> = Lazy::new(Mutex::default);

const ADMIN_EMAIL: &str = "admin@example.com";

async fn init_and_get_db() -> DbConnection {
    let _ = tracing_subscriber::fmt::try_init();

    let config = DbConfig::development("gallery_db", "gallery_guest", "gallerypass");
    let db = DbConnection::connect(&config).await.unwrap();
    db.drop_schema().await.unwrap();
    db.init_schema(Some(CreateUserRequest {
        email: ADMIN_EMAIL.to_string(),
        password_hash: hash_password("changepassword").unwrap(),
        is_admin: true,
    }))
    .await
    .unwrap();
    db
}

fn new_resource(title: &str, kind: ResourceKind, is_public: bool) -> NewResource {
    NewResource {
        title: title.to_string(),
        category: "Lectures".to_string(),
        kind,
        url: Some("https://example.com/resource".to_string()),
        thumbnail: None,
        public_id: None,
        resource_type: None,
        description: Some("Week one".to_string()),
        featured: false,
        is_public,
        created_at: Utc::now(),
    }
}

#[tokio::test]
#[ignore = "needs a local postgres"]
async fn public_listing_hides_locked_resources() {
    let _lock = SERIAL_LOCK.lock().await;
    let db = init_and_get_db().await;

    let open = db
        .create(new_resource("Open", ResourceKind::Video, true))
        .await
        .unwrap();
    let locked = db
        .create(new_resource("Locked", ResourceKind::Pdf, false))
        .await
        .unwrap();

    let public = db.list_public().await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].id, open);
    assert_eq!(db.list_all().await.unwrap().len(), 2);

    db.update(locked, ResourcePatch::visibility(true))
        .await
        .unwrap();
    assert_eq!(db.list_public().await.unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "needs a local postgres"]
async fn patch_changes_only_given_fields() {
    let _lock = SERIAL_LOCK.lock().await;
    let db = init_and_get_db().await;

    let id = db
        .create(new_resource("Syllabus", ResourceKind::Link, true))
        .await
        .unwrap();
    let now = Utc::now();
    db.update(
        id,
        ResourcePatch {
            kind: Some(ResourceKind::Pdf),
            url: Some(String::new()),
            updated_at: Some(now),
            ..ResourcePatch::default()
        },
    )
    .await
    .unwrap();

    let stored = db.get(id).await.unwrap();
    assert_eq!(stored.kind, ResourceKind::Pdf);
    assert_eq!(stored.url, None);
    assert_eq!(stored.title, "Syllabus");
    assert_eq!(stored.description.as_deref(), Some("Week one"));
    assert!(stored.updated_at.is_some_and(|u| u > stored.created_at));
}

#[tokio::test]
#[ignore = "needs a local postgres"]
async fn missing_rows_are_not_found() {
    let _lock = SERIAL_LOCK.lock().await;
    let db = init_and_get_db().await;

    let id = Uuid::new_v4();
    assert!(matches!(db.get(id).await, Err(StoreError::NotFound)));
    assert!(matches!(
        db.update(id, ResourcePatch::visibility(false)).await,
        Err(StoreError::NotFound)
    ));
    assert!(matches!(db.delete(id).await, Err(StoreError::NotFound)));

    let created = db
        .create(new_resource("Temp", ResourceKind::Image, true))
        .await
        .unwrap();
    db.delete(created).await.unwrap();
    assert!(db.list_all().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "needs a local postgres"]
async fn origin_admin_and_sessions_round_trip() {
    let _lock = SERIAL_LOCK.lock().await;
    let db = init_and_get_db().await;

    let credentials = db.find_credentials(ADMIN_EMAIL).await.unwrap().unwrap();
    assert!(db.is_admin(credentials.user_id).await.unwrap());
    assert!(db.find_credentials("nobody@example.com").await.unwrap().is_none());

    let visitor = db
        .create_user(CreateUserRequest {
            email: "visitor@example.com".to_string(),
            password_hash: hash_password("changepassword").unwrap(),
            is_admin: false,
        })
        .await
        .unwrap();
    assert!(!db.is_admin(visitor).await.unwrap());
    assert!(!db.is_admin(Uuid::new_v4()).await.unwrap());

    let session_id = Uuid::new_v4();
    let token = generate_session_token();
    db.create_session(CreateSessionRequest {
        id: session_id,
        user_id: visitor,
        token_hash: hash_session_token(&token),
        expires_at: Utc::now() + Duration::minutes(5),
    })
    .await
    .unwrap();
    let session = db.resolve_session(session_id).await.unwrap().unwrap();
    assert_eq!(session.user_id, visitor);
    assert_eq!(session.token_hash, hash_session_token(&token));

    db.delete_session(session_id).await.unwrap();
    assert!(db.resolve_session(session_id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "needs a local postgres"]
async fn duplicate_email_is_already_exists() {
    let _lock = SERIAL_LOCK.lock().await;
    let db = init_and_get_db().await;

    let duplicate = db
        .create_user(CreateUserRequest {
            email: ADMIN_EMAIL.to_string(),
            password_hash: hash_password("changepassword").unwrap(),
            is_admin: false,
        })
        .await;
    assert!(matches!(duplicate, Err(StoreError::AlreadyExists)));
}
