//! Authentication route handlers.
//!
//! Handles login, registration and logout against the local user records.
//! Validation failures, bad credentials and unexpected errors are all
//! rendered inline on the form; a successful submission renders a success
//! banner that refreshes to the dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use fleetmaster_core::UserRecord;

use crate::db::users::CreateOutcome;
use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::forms::{LoginErrors, LoginForm, LoginInput, RegisterErrors, RegisterForm, messages};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, session_keys};
use crate::services::auth::{AuthError, NewUser};
use crate::state::AppState;

/// Where a successful form submission leads.
const DASHBOARD_PATH: &str = "/dashboard";

// =============================================================================
// Templates
// =============================================================================

/// Outcome banner shown above a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBanner {
    pub success: bool,
    pub message: &'static str,
}

impl StatusBanner {
    const fn success(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }

    const fn error(message: &'static str) -> Self {
        Self {
            success: false,
            message,
        }
    }
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    /// Previously entered email.
    pub email: String,
    pub errors: LoginErrors,
    pub banner: Option<StatusBanner>,
    /// `Refresh` directive for the success state.
    pub refresh: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub email: String,
    pub business_name: String,
    pub phone_number: String,
    pub errors: RegisterErrors,
    pub banner: Option<StatusBanner>,
    pub refresh: Option<String>,
}

impl LoginTemplate {
    fn from_form(form: &LoginForm) -> Self {
        Self {
            email: form.email.clone(),
            errors: LoginErrors::default(),
            banner: None,
            refresh: None,
        }
    }
}

impl RegisterTemplate {
    fn from_form(form: &RegisterForm) -> Self {
        Self {
            email: form.email.clone(),
            business_name: form.business_name.clone(),
            phone_number: form.phone_number.clone(),
            errors: RegisterErrors::default(),
            banner: None,
            refresh: None,
        }
    }
}

/// Refresh directive sending the browser to the dashboard after `state`'s delay.
fn dashboard_refresh(state: &AppState) -> String {
    format!(
        "{};url={DASHBOARD_PATH}",
        state.config().redirect_delay.as_secs_f64()
    )
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate::from_form(&LoginForm::default())
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let mut page = LoginTemplate::from_form(&form);

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            page.errors = errors;
            return (StatusCode::UNPROCESSABLE_ENTITY, page).into_response();
        }
    };

    tokio::time::sleep(state.config().submit_delay).await;

    match sign_in(&state, &session, input).await {
        Ok(_) => {
            page.banner = Some(StatusBanner::success(messages::LOGIN_SUCCESS));
            page.refresh = Some(dashboard_refresh(&state));
            page.into_response()
        }
        Err(AppError::Auth(AuthError::InvalidCredentials)) => {
            tracing::info!(email = %form.email, "Login rejected");
            page.banner = Some(StatusBanner::error(messages::INVALID_CREDENTIALS));
            (StatusCode::UNAUTHORIZED, page).into_response()
        }
        Err(e) => {
            e.report();
            page.banner = Some(StatusBanner::error(messages::UNEXPECTED_ERROR));
            (StatusCode::INTERNAL_SERVER_ERROR, page).into_response()
        }
    }
}

/// Verify credentials, flag the record and bind it to the session.
///
/// If the session cannot be bound the flag is cleared again.
async fn sign_in(
    state: &AppState,
    session: &Session,
    input: LoginInput,
) -> Result<UserRecord, AppError> {
    let record = state.auth().login(&input.email, input.password).await?;

    let bound = set_current_user(
        session,
        &CurrentUser {
            email: record.email.clone(),
        },
    )
    .await;

    if let Err(e) = bound {
        if let Err(rollback) = state.auth().logout(record.email.as_str()).await {
            AppError::from(rollback).report();
        }
        return Err(e.into());
    }
    set_sentry_user(record.email.as_str());

    Ok(record)
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate::from_form(&RegisterForm::default())
}

/// Handle registration form submission.
///
/// Reports success whether or not the email was already registered. Only a
/// newly created record signs the visitor in.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    let mut page = RegisterTemplate::from_form(&form);

    let new_user = match form.validate() {
        Ok(new_user) => new_user,
        Err(errors) => {
            page.errors = errors;
            return (StatusCode::UNPROCESSABLE_ENTITY, page).into_response();
        }
    };

    tokio::time::sleep(state.config().submit_delay).await;

    match sign_up(&state, &session, new_user).await {
        Ok(()) => {
            page.banner = Some(StatusBanner::success(messages::REGISTER_SUCCESS));
            page.refresh = Some(dashboard_refresh(&state));
            page.into_response()
        }
        Err(e) => {
            e.report();
            page.banner = Some(StatusBanner::error(messages::UNEXPECTED_ERROR));
            (StatusCode::INTERNAL_SERVER_ERROR, page).into_response()
        }
    }
}

/// Create the record and, if it is new, bind it to the session.
async fn sign_up(state: &AppState, session: &Session, new_user: NewUser) -> Result<(), AppError> {
    let email = new_user.email.clone();

    if state.auth().register(new_user).await? == CreateOutcome::Created {
        set_current_user(session, &CurrentUser { email: email.clone() }).await?;
        set_sentry_user(email.as_str());
    }

    Ok(())
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout.
///
/// Clears the logged-in flag of the session's user, destroys the session and
/// sends the visitor to the login page. A visitor without a signed-in session
/// changes no record. Storage failures are reported but do not keep the
/// session alive.
pub async fn logout(State(state): State<AppState>, session: Session) -> Redirect {
    let current = session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten();

    if let Some(user) = current
        && let Err(e) = state.auth().logout(user.email.as_str()).await
    {
        AppError::from(e).report();
    }

    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }

    clear_sentry_user();
    Redirect::to("/login")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use secrecy::SecretString;
    use tower_sessions::session::{Id, Record};
    use tower_sessions::session_store::{self, SessionStore};

    use fleetmaster_core::Email;

    use super::*;
    use crate::config::PortalConfig;
    use crate::db::MemoryStorage;

    /// Session backend that is always down.
    #[derive(Debug)]
    struct UnavailableSessionStore;

    fn unavailable() -> session_store::Error {
        session_store::Error::Backend("session store unavailable".to_string())
    }

    #[async_trait]
    impl SessionStore for UnavailableSessionStore {
        async fn save(&self, _record: &Record) -> session_store::Result<()> {
            Err(unavailable())
        }

        async fn load(&self, _session_id: &Id) -> session_store::Result<Option<Record>> {
            Err(unavailable())
        }

        async fn delete(&self, _session_id: &Id) -> session_store::Result<()> {
            Err(unavailable())
        }
    }

    #[tokio::test]
    async fn test_failed_session_bind_clears_flag() {
        let state = AppState::new(PortalConfig::default(), Arc::new(MemoryStorage::new()));
        state
            .auth()
            .register(NewUser {
                email: Email::parse("a@x.com").unwrap(),
                business_name: "Acme Haulage".to_string(),
                password: SecretString::from("secret1".to_string()),
            })
            .await
            .unwrap();
        state.auth().logout("a@x.com").await.unwrap();

        let session = Session::new(Some(Id::default()), Arc::new(UnavailableSessionStore), None);
        let input = LoginInput {
            email: Email::parse("a@x.com").unwrap(),
            password: SecretString::from("secret1".to_string()),
        };

        let err = sign_in(&state, &session, input).await.unwrap_err();

        assert!(matches!(err, AppError::Session(_)));
        assert!(!state.users().load().await.unwrap()[0].is_logged_in);
    }
}
