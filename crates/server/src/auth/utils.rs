use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::models::session::SessionId;

const SESSION_ID_LEN: usize = 16;
pub const SESSION_TOKEN_LEN: usize = 32;

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Malformed stored hashes count as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

pub fn generate_session_token() -> [u8; SESSION_TOKEN_LEN] {
    rand::random()
}

pub fn hash_session_token(token: &[u8]) -> Vec<u8> {
    Sha256::digest(token).to_vec()
}

pub fn session_token_matches(token: &[u8], stored_hash: &[u8]) -> bool {
    hash_session_token(token).ct_eq(stored_hash).into()
}

pub fn pack_session_id_and_token(session_id: &SessionId, token: &[u8]) -> Vec<u8> {
    let mut packed = Vec::with_capacity(SESSION_ID_LEN + token.len());
    packed.extend_from_slice(session_id.as_bytes());
    packed.extend_from_slice(token);
    packed
}

pub fn unpack_session_id_and_token(packed: &[u8]) -> Option<(SessionId, &[u8])> {
    if packed.len() <= SESSION_ID_LEN {
        return None;
    }
    let (sid, token) = packed.split_at(SESSION_ID_LEN);
    let sid = Uuid::from_slice(sid).ok()?;
    Some((sid, token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_verifies_only_the_original() {
        let hash = hash_password("changepassword").unwrap();
        assert!(verify_password("changepassword", &hash));
        assert!(!verify_password("otherpassword", &hash));
        assert!(!verify_password("changepassword", "not-a-phc-string"));
    }

    #[test]
    fn session_id_and_token_pack_and_unpack() {
        let sid = Uuid::new_v4();
        let token = generate_session_token();
        let packed = pack_session_id_and_token(&sid, &token);
        let (unpacked_sid, unpacked_token) = unpack_session_id_and_token(&packed).unwrap();
        assert_eq!(unpacked_sid, sid);
        assert_eq!(unpacked_token, token.as_slice());
    }

    #[test]
    fn unpack_rejects_short_input() {
        assert!(unpack_session_id_and_token(&[0u8; 16]).is_none());
    }

    #[test]
    fn token_hash_comparison() {
        let token = generate_session_token();
        let stored = hash_session_token(&token);
        assert!(session_token_matches(&token, &stored));
        assert!(!session_token_matches(b"something else", &stored));
    }
}
