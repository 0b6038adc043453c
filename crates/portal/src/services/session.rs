//! Signed-in user resolution.
//!
//! Two ways of answering "who is logged in":
//!
//! - [`current_user`] scans the collection for the first record flagged as
//!   logged in. With several flagged records it simply picks the first one,
//!   so it is only used by operator tooling.
//! - [`resolve`] starts from the email held in the visitor's session cookie
//!   and is what gates the dashboard.

use fleetmaster_core::UserRecord;

use crate::db::users::find_index_by_email;

/// The first record whose logged-in flag is set.
#[must_use]
pub fn current_user(records: &[UserRecord]) -> Option<&UserRecord> {
    records.iter().find(|r| r.is_logged_in)
}

/// The record for a session's email, if it exists and is still logged in.
#[must_use]
pub fn resolve<'a>(records: &'a [UserRecord], session_email: &str) -> Option<&'a UserRecord> {
    find_index_by_email(records, session_email)
        .and_then(|i| records.get(i))
        .filter(|r| r.is_logged_in)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fleetmaster_core::Email;

    use super::*;

    fn record(email: &str, logged_in: bool) -> UserRecord {
        UserRecord {
            email: Email::parse(email).unwrap(),
            business_name: format!("{email} Logistics"),
            password_digest: "digest".to_string(),
            is_logged_in: logged_in,
        }
    }

    #[test]
    fn test_current_user_empty() {
        assert!(current_user(&[]).is_none());
    }

    #[test]
    fn test_current_user_none_flagged() {
        let records = vec![record("a@x.com", false), record("b@x.com", false)];
        assert!(current_user(&records).is_none());
    }

    #[test]
    fn test_current_user_first_flagged_wins() {
        let records = vec![
            record("a@x.com", false),
            record("b@x.com", true),
            record("c@x.com", true),
        ];

        assert_eq!(current_user(&records).unwrap().email.as_str(), "b@x.com");
    }

    #[test]
    fn test_resolve_requires_flag() {
        let records = vec![record("a@x.com", true), record("b@x.com", false)];

        assert_eq!(
            resolve(&records, "a@x.com").unwrap().business_name,
            "a@x.com Logistics"
        );
        assert!(resolve(&records, "b@x.com").is_none());
        assert!(resolve(&records, "missing@x.com").is_none());
    }

    #[test]
    fn test_resolve_ignores_other_flagged_records() {
        let records = vec![record("a@x.com", true), record("b@x.com", true)];
        assert_eq!(resolve(&records, "b@x.com").unwrap().email.as_str(), "b@x.com");
    }
}
