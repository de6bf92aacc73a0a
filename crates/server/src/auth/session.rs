use std::num::NonZeroU32;

use chrono::{Duration, Utc};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::auth::error::AuthError;
use crate::auth::token::{AuthPayload, Claims, TokenExchangePayload};
use crate::auth::utils::{
    generate_session_token, hash_password, hash_session_token, verify_password,
};
use crate::database::IdentityStore;
use crate::error::StoreError;
use crate::models::session::CreateSessionRequest;
use crate::models::user::{
    normalize_email, validate_user_email, validate_user_password, BootstrapAdmin,
    CreateUserRequest,
};

/// Per-email throttle on sign-in attempts.
pub struct LoginLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
}

impl LoginLimiter {
    pub fn per_minute(attempts: u32) -> Self {
        let attempts = NonZeroU32::new(attempts).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: RateLimiter::keyed(Quota::per_minute(attempts)),
        }
    }

    pub fn allow(&self, email: &str) -> bool {
        self.limiter.check_key(&email.to_string()).is_ok()
    }
}

#[instrument(skip_all)]
pub async fn sign_in(
    identity: &dyn IdentityStore,
    limiter: &LoginLimiter,
    session_ttl: Duration,
    payload: &AuthPayload,
) -> Result<TokenExchangePayload, AuthError> {
    let email = normalize_email(&payload.email);
    if email.is_empty() || payload.password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    if !limiter.allow(&email) {
        warn!("login attempts exhausted for {email}");
        return Err(AuthError::TooManyAttempts);
    }
    let credentials = identity
        .find_credentials(&email)
        .await
        .map_err(|e| {
            error!("failed to look up credentials: {e}");
            AuthError::TokenCreation
        })?
        .ok_or(AuthError::BadCredentials)?;
    if !verify_password(&payload.password, &credentials.password_hash) {
        return Err(AuthError::BadCredentials);
    }

    let session_id = Uuid::new_v4();
    let token = generate_session_token();
    let expires_at = Utc::now() + session_ttl;
    identity
        .create_session(CreateSessionRequest {
            id: session_id,
            user_id: credentials.user_id,
            token_hash: hash_session_token(&token),
            expires_at,
        })
        .await
        .map_err(|e| {
            error!("failed to store session: {e}");
            AuthError::TokenCreation
        })?;
    info!("user {} signed in", credentials.user_id);
    Ok(TokenExchangePayload::new(&session_id, token, expires_at))
}

pub async fn sign_out(identity: &dyn IdentityStore, claims: &Claims) -> Result<(), StoreError> {
    identity.delete_session(claims.session_id).await?;
    info!("user {} signed out", claims.user_id);
    Ok(())
}

/// Builds the origin admin account from config, hashing its password.
pub fn origin_admin_request(admin: &BootstrapAdmin) -> anyhow::Result<CreateUserRequest> {
    validate_user_email(&admin.email)?;
    validate_user_password(&admin.password)?;
    let password_hash =
        hash_password(&admin.password).map_err(|e| anyhow::anyhow!("hashing failed: {e}"))?;
    Ok(CreateUserRequest {
        email: normalize_email(&admin.email),
        password_hash,
        is_admin: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::AccessToken;
    use crate::database::memory::MemoryIdentityStore;
    use crate::error::SessionError;

    async fn store_with_user(is_admin: bool) -> MemoryIdentityStore {
        let store = MemoryIdentityStore::new();
        store
            .create_user(CreateUserRequest {
                email: "admin@example.com".to_string(),
                password_hash: hash_password("changepassword").unwrap(),
                is_admin,
            })
            .await
            .unwrap();
        store
    }

    fn payload(email: &str, password: &str) -> AuthPayload {
        AuthPayload {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn sign_in_issues_resolvable_token() {
        let store = store_with_user(true).await;
        let limiter = LoginLimiter::per_minute(5);
        let exchange = sign_in(
            &store,
            &limiter,
            Duration::minutes(5),
            &payload(" Admin@Example.com", "changepassword"),
        )
        .await
        .unwrap();

        let claims = AccessToken(exchange.access_token)
            .resolve(&store)
            .await
            .unwrap();
        assert!(store.is_admin(claims.user_id).await.unwrap());

        sign_out(&store, &claims).await.unwrap();
        let token = TokenExchangePayload::new(&claims.session_id, [0u8; 32], Utc::now());
        assert!(matches!(
            AccessToken(token.access_token).resolve(&store).await,
            Err(SessionError::TokenNotFound)
        ));
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let store = store_with_user(true).await;
        let limiter = LoginLimiter::per_minute(5);
        let err = sign_in(
            &store,
            &limiter,
            Duration::minutes(5),
            &payload("admin@example.com", "wrongpassword"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AuthError::BadCredentials));
        assert_eq!(err.to_string(), "invalid email or password");
    }

    #[tokio::test]
    async fn expired_session_is_rejected() {
        let store = store_with_user(true).await;
        let limiter = LoginLimiter::per_minute(5);
        let exchange = sign_in(
            &store,
            &limiter,
            Duration::minutes(-1),
            &payload("admin@example.com", "changepassword"),
        )
        .await
        .unwrap();
        assert!(matches!(
            AccessToken(exchange.access_token).resolve(&store).await,
            Err(SessionError::TokenExpired)
        ));
    }

    #[tokio::test]
    async fn attempts_are_throttled_per_email() {
        let store = store_with_user(true).await;
        let limiter = LoginLimiter::per_minute(2);
        for _ in 0..2 {
            let _ = sign_in(
                &store,
                &limiter,
                Duration::minutes(5),
                &payload("admin@example.com", "wrongpassword"),
            )
            .await;
        }
        let err = sign_in(
            &store,
            &limiter,
            Duration::minutes(5),
            &payload("admin@example.com", "changepassword"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AuthError::TooManyAttempts));
    }

    #[test]
    fn garbage_token_is_bad_token() {
        let store = MemoryIdentityStore::new();
        let result = futures::executor::block_on(AccessToken("%%%".to_string()).resolve(&store));
        assert!(matches!(result, Err(SessionError::BadToken)));
    }
}
