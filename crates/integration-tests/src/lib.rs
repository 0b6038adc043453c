//! End-to-end test harness for the FleetMaster portal.
//!
//! Each [`TestPortal`] serves the real router on an ephemeral local port.
//! Visitors are `reqwest` clients with their own cookie jar, so several
//! sessions can share one portal.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fleetmaster-integration-tests
//! ```

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, StatusCode, Url,
    cookie::{CookieStore, Jar},
    header::{self, HeaderMap},
    redirect::Policy,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use fleetmaster_core::UserRecord;
use fleetmaster_portal::config::{DEFAULT_STORAGE_KEY, PortalConfig};
use fleetmaster_portal::db::users::UserRepository;
use fleetmaster_portal::db::{MemoryStorage, RepositoryError, Storage};
use fleetmaster_portal::middleware::session::SESSION_COOKIE_NAME;
use fleetmaster_portal::state::AppState;

/// A running portal with no artificial delays.
pub struct TestPortal {
    base_url: Url,
    users: UserRepository,
    server: JoinHandle<()>,
}

impl TestPortal {
    /// Portal backed by fresh in-memory storage.
    pub async fn new() -> Self {
        Self::with_storage(Arc::new(MemoryStorage::new())).await
    }

    /// Portal backed by `storage`.
    pub async fn with_storage(storage: Arc<dyn Storage>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        let base_url = format!("http://{addr}");

        let config = PortalConfig {
            host: addr.ip(),
            port: addr.port(),
            base_url: base_url.clone(),
            submit_delay: Duration::ZERO,
            redirect_delay: Duration::ZERO,
            ..PortalConfig::default()
        };

        let users = UserRepository::new(storage.clone(), DEFAULT_STORAGE_KEY);
        let router = fleetmaster_portal::app(AppState::new(config, storage));

        let server = tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server failed");
        });

        Self {
            base_url: Url::parse(&base_url).expect("Invalid base URL"),
            users,
            server,
        }
    }

    /// A new visitor without a session.
    #[must_use]
    pub fn client(&self) -> TestClient {
        let jar = Arc::new(Jar::default());
        let http = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .redirect(Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        TestClient {
            http,
            jar,
            base_url: self.base_url.clone(),
        }
    }

    /// Direct access to the stored record collection.
    #[must_use]
    pub const fn users(&self) -> &UserRepository {
        &self.users
    }

    /// The stored records.
    pub async fn records(&self) -> Vec<UserRecord> {
        self.users.load().await.expect("Failed to load records")
    }
}

impl Drop for TestPortal {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Storage backend whose reads and writes always fail.
#[derive(Debug, Default)]
pub struct UnavailableStorage;

#[async_trait]
impl Storage for UnavailableStorage {
    async fn get(&self, _key: &str) -> Result<Option<String>, RepositoryError> {
        Err(RepositoryError::Io(std::io::Error::other("storage offline")))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), RepositoryError> {
        Err(RepositoryError::Io(std::io::Error::other("storage offline")))
    }
}

/// One visitor. Cookies persist between requests; redirects are not followed.
pub struct TestClient {
    http: Client,
    jar: Arc<Jar>,
    base_url: Url,
}

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

impl TestClient {
    /// Whether the jar currently holds a session cookie.
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.jar
            .cookies(&self.base_url)
            .and_then(|cookies| cookies.to_str().ok().map(str::to_owned))
            .is_some_and(|cookies| {
                cookies
                    .split("; ")
                    .any(|pair| pair.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
            })
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send request");
        read(response).await
    }

    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let response = self
            .http
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .expect("Failed to send request");
        read(response).await
    }

    pub async fn register(&self, email: &str, business_name: &str, password: &str) -> TestResponse {
        self.post_form(
            "/register",
            &[
                ("email", email),
                ("businessName", business_name),
                ("phoneNumber", "5551234567"),
                ("password", password),
                ("confirmPassword", password),
            ],
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.post_form("/login", &[("email", email), ("password", password)])
            .await
    }

    pub async fn logout(&self) -> TestResponse {
        self.post_form("/logout", &[]).await
    }

    fn url(&self, path: &str) -> Url {
        self.base_url.join(path).expect("Invalid request path")
    }
}

async fn read(response: reqwest::Response) -> TestResponse {
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.text().await.expect("Failed to read body");

    TestResponse {
        status,
        headers,
        body,
    }
}
