//! User-record repository.
//!
//! The whole collection lives under one storage key as a JSON array. Every
//! change loads the collection, mutates it in memory and writes it back in
//! full. Mutations go through [`UserCollection`], which holds the repository's
//! write lock so concurrent requests in this process cannot lose updates.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use fleetmaster_core::UserRecord;

use super::{RepositoryError, Storage};

/// Result of [`UserCollection::create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// A new record was appended and persisted.
    Created,
    /// A record with this email already existed; nothing was written.
    AlreadyExists,
}

/// Repository for the user-record collection.
pub struct UserRepository {
    storage: Arc<dyn Storage>,
    key: String,
    write_lock: Mutex<()>,
}

impl UserRepository {
    /// Create a repository over `storage`, using `key` for the collection.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Load the record collection.
    ///
    /// An absent key yields an empty collection. A blob that does not parse
    /// as a list of records is also treated as empty and logged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the storage backend cannot be read.
    pub async fn load(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        let Some(raw) = self.storage.get(&self.key).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<UserRecord>>(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Stored user records are malformed, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Serialize and write the whole collection, replacing prior content.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if serialization or the write fails.
    pub async fn save(&self, records: &[UserRecord]) -> Result<(), RepositoryError> {
        let raw = serde_json::to_string(records)?;
        self.storage.set(&self.key, &raw).await
    }

    /// Lock the collection for a load-mutate-save sequence.
    ///
    /// The lock is held until the returned [`UserCollection`] is dropped.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be loaded.
    pub async fn begin(&self) -> Result<UserCollection<'_>, RepositoryError> {
        let guard = self.write_lock.lock().await;
        let records = self.load().await?;

        Ok(UserCollection {
            repo: self,
            records,
            _guard: guard,
        })
    }
}

/// A loaded, locked copy of the record collection.
pub struct UserCollection<'a> {
    repo: &'a UserRepository,
    records: Vec<UserRecord>,
    _guard: MutexGuard<'a, ()>,
}

impl UserCollection<'_> {
    /// The records as loaded (plus any changes made through this handle).
    #[must_use]
    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    /// Index of the first record with exactly this email.
    #[must_use]
    pub fn find_index_by_email(&self, email: &str) -> Option<usize> {
        find_index_by_email(&self.records, email)
    }

    /// Append `record` and persist, unless `index_hint` says one already exists.
    ///
    /// `index_hint` is the result of a prior [`Self::find_index_by_email`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be written.
    pub async fn create(
        &mut self,
        index_hint: Option<usize>,
        record: UserRecord,
    ) -> Result<CreateOutcome, RepositoryError> {
        if index_hint.is_some() {
            return Ok(CreateOutcome::AlreadyExists);
        }

        self.records.push(record);
        self.repo.save(&self.records).await?;
        Ok(CreateOutcome::Created)
    }

    /// Set the logged-in flag of the record at `index` and persist.
    ///
    /// Returns the updated record, or `None` (without writing) when `index`
    /// is `None` or out of range.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be written.
    pub async fn set_logged_in(
        &mut self,
        index: Option<usize>,
        flag: bool,
    ) -> Result<Option<UserRecord>, RepositoryError> {
        let Some(record) = index.and_then(|i| self.records.get_mut(i)) else {
            return Ok(None);
        };

        record.is_logged_in = flag;
        let updated = record.clone();
        self.repo.save(&self.records).await?;
        Ok(Some(updated))
    }
}

/// Index of the first record whose email equals `email` exactly.
///
/// Comparison is case-sensitive.
#[must_use]
pub fn find_index_by_email(records: &[UserRecord], email: &str) -> Option<usize> {
    records.iter().position(|r| r.email.as_str() == email)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use fleetmaster_core::Email;

    use super::*;
    use crate::db::MemoryStorage;

    fn record(email: &str, logged_in: bool) -> UserRecord {
        UserRecord {
            email: Email::parse(email).unwrap(),
            business_name: "Acme Haulage".to_string(),
            password_digest: "digest".to_string(),
            is_logged_in: logged_in,
        }
    }

    fn repository() -> (Arc<MemoryStorage>, UserRepository) {
        let storage = Arc::new(MemoryStorage::new());
        let repo = UserRepository::new(storage.clone(), "fleetUser");
        (storage, repo)
    }

    #[tokio::test]
    async fn test_load_absent_key_is_empty() {
        let (_, repo) = repository();
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_malformed_blob_is_empty() {
        let (storage, repo) = repository();
        storage.set("fleetUser", "{not json").await.unwrap();
        assert!(repo.load().await.unwrap().is_empty());

        storage
            .set("fleetUser", r#"[{"email":"a@x.com"}]"#)
            .await
            .unwrap();
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_is_identity() {
        let (_, repo) = repository();
        let records = vec![record("a@x.com", true), record("b@x.com", false)];

        repo.save(&records).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), records);
    }

    #[tokio::test]
    async fn test_saved_blob_uses_wire_names() {
        let (storage, repo) = repository();
        repo.save(&[record("a@x.com", true)]).await.unwrap();

        let raw = storage.get("fleetUser").await.unwrap().unwrap();
        assert!(raw.contains("\"businessName\""));
        assert!(raw.contains("\"isLoggedIn\":true"));
    }

    #[test]
    fn test_find_index_by_email() {
        let records = vec![record("a@x.com", false), record("b@x.com", false)];

        assert_eq!(find_index_by_email(&records, "a@x.com"), Some(0));
        assert_eq!(find_index_by_email(&records, "b@x.com"), Some(1));
        assert_eq!(find_index_by_email(&records, "c@x.com"), None);
        assert_eq!(find_index_by_email(&records, "A@x.com"), None);
        assert_eq!(find_index_by_email(&[], "a@x.com"), None);
    }

    #[tokio::test]
    async fn test_create_appends_and_persists() {
        let (_, repo) = repository();

        let mut users = repo.begin().await.unwrap();
        let hint = users.find_index_by_email("a@x.com");
        let outcome = users.create(hint, record("a@x.com", true)).await.unwrap();
        drop(users);

        assert_eq!(outcome, CreateOutcome::Created);
        let stored = repo.load().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].is_logged_in);
    }

    #[tokio::test]
    async fn test_create_existing_email_is_noop() {
        let (_, repo) = repository();
        repo.save(&[record("a@x.com", false)]).await.unwrap();

        let mut users = repo.begin().await.unwrap();
        let hint = users.find_index_by_email("a@x.com");
        let outcome = users.create(hint, record("a@x.com", true)).await.unwrap();
        drop(users);

        assert_eq!(outcome, CreateOutcome::AlreadyExists);
        let stored = repo.load().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert!(!stored[0].is_logged_in);
    }

    #[tokio::test]
    async fn test_set_logged_in_applies_flag() {
        let (_, repo) = repository();
        repo.save(&[record("a@x.com", true), record("b@x.com", true)])
            .await
            .unwrap();

        let mut users = repo.begin().await.unwrap();
        let updated = users.set_logged_in(Some(1), false).await.unwrap().unwrap();
        drop(users);

        assert!(!updated.is_logged_in);
        let stored = repo.load().await.unwrap();
        assert!(stored[0].is_logged_in);
        assert!(!stored[1].is_logged_in);

        let mut users = repo.begin().await.unwrap();
        users.set_logged_in(Some(1), true).await.unwrap();
        drop(users);
        assert!(repo.load().await.unwrap()[1].is_logged_in);
    }

    #[tokio::test]
    async fn test_set_logged_in_without_index_does_not_write() {
        let (storage, repo) = repository();

        let mut users = repo.begin().await.unwrap();
        assert!(users.set_logged_in(None, true).await.unwrap().is_none());
        assert!(users.set_logged_in(Some(3), true).await.unwrap().is_none());
        drop(users);

        assert!(storage.get("fleetUser").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_creates_are_not_lost() {
        let (_, repo) = repository();
        let repo = Arc::new(repo);

        let mut handles = Vec::new();
        for i in 0..8 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let email = format!("user{i}@x.com");
                let mut users = repo.begin().await.unwrap();
                let hint = users.find_index_by_email(&email);
                users.create(hint, record(&email, true)).await.unwrap()
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), CreateOutcome::Created);
        }

        assert_eq!(repo.load().await.unwrap().len(), 8);
    }
}
