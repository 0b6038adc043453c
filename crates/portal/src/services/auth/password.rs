//! Salted password digests.
//!
//! Argon2id with a fresh random salt per digest. Both operations are CPU-bound
//! and run on the blocking thread pool.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};

use super::AuthError;

/// Hash a password into a PHC-format Argon2id digest.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails or the worker panics.
pub async fn hash_password(password: SecretString) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_blocking(password.expose_secret()))
        .await
        .map_err(|_| AuthError::PasswordHash)?
}

/// Check a password against a stored digest.
///
/// A digest that cannot be parsed never verifies.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if the worker panics.
pub async fn verify_password(password: SecretString, digest: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || verify_blocking(password.expose_secret(), &digest))
        .await
        .map_err(|_| AuthError::PasswordHash)
}

fn hash_blocking(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

fn verify_blocking(password: &str, digest: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(digest) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[tokio::test]
    async fn test_digest_is_not_plaintext() {
        let digest = hash_password(secret("secret1")).await.unwrap();
        assert_ne!(digest, "secret1");
        assert!(digest.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_same_input_gets_fresh_salt() {
        let first = hash_password(secret("secret1")).await.unwrap();
        let second = hash_password(secret("secret1")).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_verify_roundtrip() {
        let digest = hash_password(secret("secret1")).await.unwrap();

        assert!(verify_password(secret("secret1"), digest.clone()).await.unwrap());
        assert!(!verify_password(secret("secret2"), digest).await.unwrap());
    }

    #[tokio::test]
    async fn test_unparsable_digest_never_verifies() {
        assert!(!verify_password(secret("secret1"), "secret1".to_string()).await.unwrap());
        assert!(!verify_password(secret(""), String::new()).await.unwrap());
    }
}
