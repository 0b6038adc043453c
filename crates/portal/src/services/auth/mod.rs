//! Authentication service.
//!
//! Registration, login and logout against the user-record collection.

mod error;
pub mod password;

pub use error::AuthError;
pub use password::{hash_password, verify_password};

use secrecy::SecretString;

use fleetmaster_core::{Email, UserRecord};

use crate::db::users::{CreateOutcome, UserRepository, find_index_by_email};

/// Validated registration data.
#[derive(Debug)]
pub struct NewUser {
    pub email: Email,
    pub business_name: String,
    pub password: SecretString,
}

/// Authentication service.
pub struct AuthService<'a> {
    users: &'a UserRepository,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a UserRepository) -> Self {
        Self { users }
    }

    /// Register a new user.
    ///
    /// The password is hashed before the collection is locked. Registering an
    /// email that already exists leaves the collection untouched and reports
    /// [`CreateOutcome::AlreadyExists`].
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if hashing fails.
    /// Returns `AuthError::Repository` if the collection cannot be read or written.
    pub async fn register(&self, new_user: NewUser) -> Result<CreateOutcome, AuthError> {
        let NewUser {
            email,
            business_name,
            password,
        } = new_user;

        let digest = hash_password(password).await?;

        let mut users = self.users.begin().await?;
        let index_hint = users.find_index_by_email(email.as_str());
        let outcome = users
            .create(
                index_hint,
                UserRecord::registered(email.clone(), business_name, digest),
            )
            .await?;

        match outcome {
            CreateOutcome::Created => tracing::info!(email = %email, "User registered"),
            CreateOutcome::AlreadyExists => {
                tracing::info!(email = %email, "Registration skipped, email already present");
            }
        }

        Ok(outcome)
    }

    /// Login with email and password, flagging the record as logged in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown or the
    /// password does not match. The two cases are not distinguished.
    pub async fn login(
        &self,
        email: &Email,
        password: SecretString,
    ) -> Result<UserRecord, AuthError> {
        let records = self.users.load().await?;
        let digest = find_index_by_email(&records, email.as_str())
            .and_then(|i| records.get(i))
            .map(|record| record.password_digest.clone())
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, digest).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let mut users = self.users.begin().await?;
        let index = users.find_index_by_email(email.as_str());
        let record = users
            .set_logged_in(index, true)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        tracing::info!(email = %email, "User logged in");
        Ok(record)
    }

    /// Clear the logged-in flag of the record for `email`.
    ///
    /// Returns the updated record, or `None` if no record has this email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the collection cannot be read or written.
    pub async fn logout(&self, email: &str) -> Result<Option<UserRecord>, AuthError> {
        let mut users = self.users.begin().await?;
        let index = users.find_index_by_email(email);

        let record = users.set_logged_in(index, false).await?;
        if let Some(record) = &record {
            tracing::info!(email = %record.email, "User logged out");
        }

        Ok(record)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::db::MemoryStorage;
    use crate::services::session::current_user;

    fn repository() -> UserRepository {
        UserRepository::new(Arc::new(MemoryStorage::new()), "fleetUser")
    }

    fn new_user(email: &str, password: &str) -> NewUser {
        NewUser {
            email: Email::parse(email).unwrap(),
            business_name: "Acme Haulage".to_string(),
            password: SecretString::from(password.to_string()),
        }
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[tokio::test]
    async fn test_register_creates_logged_in_record() {
        let repo = repository();
        let auth = AuthService::new(&repo);

        let outcome = auth.register(new_user("a@x.com", "secret1")).await.unwrap();
        assert_eq!(outcome, CreateOutcome::Created);

        let records = repo.load().await.unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_logged_in);
        assert_ne!(records[0].password_digest, "secret1");
        assert!(
            verify_password(secret("secret1"), records[0].password_digest.clone())
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_register_existing_email_keeps_collection() {
        let repo = repository();
        let auth = AuthService::new(&repo);

        auth.register(new_user("a@x.com", "secret1")).await.unwrap();
        let outcome = auth.register(new_user("a@x.com", "other-pw")).await.unwrap();

        assert_eq!(outcome, CreateOutcome::AlreadyExists);
        let records = repo.load().await.unwrap();
        assert_eq!(records.len(), 1);
        assert!(
            verify_password(secret("secret1"), records[0].password_digest.clone())
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_invalid_credentials() {
        let repo = repository();
        let auth = AuthService::new(&repo);
        let email = Email::parse("nobody@x.com").unwrap();

        let err = auth.login(&email, secret("secret1")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_invalid_credentials() {
        let repo = repository();
        let auth = AuthService::new(&repo);
        auth.register(new_user("a@x.com", "secret1")).await.unwrap();
        auth.logout("a@x.com").await.unwrap();

        let email = Email::parse("a@x.com").unwrap();
        let err = auth.login(&email, secret("wrong-pw")).await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(!repo.load().await.unwrap()[0].is_logged_in);
    }

    #[tokio::test]
    async fn test_login_is_case_sensitive() {
        let repo = repository();
        let auth = AuthService::new(&repo);
        auth.register(new_user("a@x.com", "secret1")).await.unwrap();

        let email = Email::parse("A@x.com").unwrap();
        let err = auth.login(&email, secret("secret1")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_register_login_logout_scenario() {
        let repo = repository();
        let auth = AuthService::new(&repo);
        let email = Email::parse("a@x.com").unwrap();

        auth.register(new_user("a@x.com", "secret1")).await.unwrap();
        let records = repo.load().await.unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_logged_in);

        let record = auth.login(&email, secret("secret1")).await.unwrap();
        assert!(record.is_logged_in);
        let records = repo.load().await.unwrap();
        assert_eq!(current_user(&records).unwrap().email, email);

        let record = auth.logout("a@x.com").await.unwrap().unwrap();
        assert!(!record.is_logged_in);
        let records = repo.load().await.unwrap();
        assert!(!records[0].is_logged_in);
        assert!(current_user(&records).is_none());
    }

    #[tokio::test]
    async fn test_logout_only_touches_named_record() {
        let repo = repository();
        let auth = AuthService::new(&repo);
        auth.register(new_user("a@x.com", "secret1")).await.unwrap();
        auth.register(new_user("b@x.com", "secret2")).await.unwrap();

        assert!(auth.logout("nobody@x.com").await.unwrap().is_none());

        let record = auth.logout("b@x.com").await.unwrap().unwrap();
        assert_eq!(record.email.as_str(), "b@x.com");

        let records = repo.load().await.unwrap();
        assert!(records[0].is_logged_in);
        assert!(!records[1].is_logged_in);
    }
}
