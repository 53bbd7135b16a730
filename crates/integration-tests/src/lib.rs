//! Integration tests for the user registry.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process server, no database needed
//! cargo test -p user-registry-integration-tests
//!
//! # PostgreSQL repository tests (need REGISTRY_DATABASE_URL and `registry-cli migrate`)
//! cargo test -p user-registry-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `users_api` - Raw HTTP contract of `/users`
//! - `users_page` - The client page driven against a live server
//! - `postgres_repository` - `UserRepository` against a real database

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use user_registry_client::{HttpUsersApi, UsersPage};
use user_registry_server::db::InMemoryUserStore;
use user_registry_server::routes;
use user_registry_server::state::AppState;

/// The full server router on an ephemeral port, backed by an in-memory store.
///
/// The server task is aborted on drop.
pub struct TestServer {
    addr: SocketAddr,
    store: Arc<InMemoryUserStore>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl TestServer {
    /// Bind `127.0.0.1:0` and start serving.
    ///
    /// # Errors
    ///
    /// Returns error if the listener cannot be bound.
    pub async fn spawn() -> std::io::Result<Self> {
        let store = Arc::new(InMemoryUserStore::new());
        let app = routes::app(AppState::new(store.clone()));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move { axum::serve(listener, app).await });

        Ok(Self {
            addr,
            store,
            handle,
        })
    }

    /// `http://127.0.0.1:{port}`
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url())
    }

    /// The store behind the server, for checking what was persisted.
    #[must_use]
    pub fn store(&self) -> &InMemoryUserStore {
        &self.store
    }

    /// API client pointed at this server.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn api(&self) -> HttpUsersApi {
        HttpUsersApi::new(&self.base_url()).expect("Failed to create API client")
    }

    /// A loaded users page pointed at this server.
    pub async fn page(&self) -> UsersPage<HttpUsersApi> {
        let mut page = UsersPage::new(self.api());
        page.load().await;
        page
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
