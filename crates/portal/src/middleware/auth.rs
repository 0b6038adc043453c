//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring a signed-in user in route handlers.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use fleetmaster_core::UserRecord;

use crate::error::AppError;
use crate::models::{CurrentUser, session_keys};
use crate::services::session as session_state;
use crate::state::AppState;

/// Extractor that requires a signed-in user.
///
/// The session email must name a stored record whose logged-in flag is set.
/// Otherwise the visitor is redirected to the login page. A stale session
/// (record gone or logged out) is cleared on the way.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Welcome back, {}!", user.business_name)
/// }
/// ```
pub struct RequireAuth(pub UserRecord);

/// Error returned when a signed-in user is required but none is present.
pub enum AuthRejection {
    /// Redirect to login page.
    RedirectToLogin,
    /// The record collection could not be read.
    Internal(AppError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Internal(err) => err.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AuthRejection::RedirectToLogin)?;

        let current: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRejection::RedirectToLogin)?;

        let records = state
            .users()
            .load()
            .await
            .map_err(|e| AuthRejection::Internal(e.into()))?;

        if let Some(record) = session_state::resolve(&records, current.email.as_str()) {
            return Ok(Self(record.clone()));
        }

        tracing::debug!(email = %current.email, "Session user no longer logged in");
        if let Err(e) = clear_current_user(&session).await {
            tracing::warn!(error = %e, "Failed to clear stale session user");
        }

        Err(AuthRejection::RedirectToLogin)
    }
}

/// Extractor that optionally gets the session user.
///
/// Unlike `RequireAuth`, this neither rejects the request nor consults the
/// stored records.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Helper to set the current user in the session.
///
/// The session ID is cycled first so a pre-login cookie cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}
