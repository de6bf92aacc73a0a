use std::fmt::Write;

use sha1::{Digest, Sha1};

/// Signature for a destroy call: hex SHA-1 of the sorted parameters followed by the secret.
pub fn sign_destroy(public_id: &str, timestamp: i64, api_secret: &str) -> String {
    let payload = format!("public_id={public_id}&timestamp={timestamp}{api_secret}");
    let digest = Sha1::digest(payload.as_bytes());
    digest.iter().fold(String::with_capacity(40), |mut hex, byte| {
        let _ = write!(hex, "{byte:02x}");
        hex
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_sha1_of_canonical_string() {
        // sha1("public_id=sample&timestamp=1315060510abcd")
        assert_eq!(
            sign_destroy("sample", 1315060510, "abcd"),
            "c3470533147774275dd37996cc4d0e68fd03cd4f"
        );
    }

    #[test]
    fn signature_depends_on_every_input() {
        let base = sign_destroy("asset", 100, "secret");
        assert_eq!(base.len(), 40);
        assert_ne!(base, sign_destroy("asset", 101, "secret"));
        assert_ne!(base, sign_destroy("other", 100, "secret"));
        assert_ne!(base, sign_destroy("asset", 100, "secret2"));
    }
}
