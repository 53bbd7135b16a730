//! Registry API client.
//!
//! [`UsersApi`] is the seam the page controller talks through;
//! [`HttpUsersApi`] implements it over `reqwest`.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use user_registry_core::{NewUser, User, UserId, UserPatch};

/// Base URL used when `REGISTRY_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Errors that can occur when calling the registry API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The email or cpf is already taken (HTTP 409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// API returned any other error response.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured base URL cannot be parsed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Whether the server reported that the user id does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Operations the registry API offers.
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// `GET /users`
    async fn list(&self) -> Result<Vec<User>, ApiError>;

    /// `POST /users`
    async fn create(&self, user: &NewUser) -> Result<User, ApiError>;

    /// `PUT /users/{id}`
    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<User, ApiError>;

    /// `DELETE /users/{id}`
    async fn delete(&self, id: UserId) -> Result<(), ApiError>;
}

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// `reqwest`-backed [`UsersApi`].
#[derive(Debug, Clone)]
pub struct HttpUsersApi {
    client: reqwest::Client,
    base: Url,
    users_url: Url,
}

impl HttpUsersApi {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the URL is invalid or the HTTP client fails to build.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder().build()?;

        let users_url = base.join("users")?;
        Ok(Self {
            client,
            base,
            users_url,
        })
    }

    /// Create a client from `REGISTRY_API_URL`, falling back to
    /// [`DEFAULT_API_URL`].
    ///
    /// # Errors
    ///
    /// Returns error if the URL is invalid or the HTTP client fails to build.
    pub fn from_env() -> Result<Self, ApiError> {
        let base = std::env::var("REGISTRY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
        Self::new(&base)
    }

    /// URL of the user collection.
    #[must_use]
    pub const fn users_url(&self) -> &Url {
        &self.users_url
    }

    fn user_url(&self, id: UserId) -> Result<Url, ApiError> {
        Ok(self.base.join(&format!("users/{id}"))?)
    }
}

/// Turn a non-2xx response into an [`ApiError`], keeping the server's message.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_owned(),
    };
    tracing::debug!(status = status.as_u16(), %message, "API call failed");

    if status == StatusCode::CONFLICT {
        return Err(ApiError::Conflict(message));
    }
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl UsersApi for HttpUsersApi {
    async fn list(&self) -> Result<Vec<User>, ApiError> {
        let response = self.client.get(self.users_url.clone()).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn create(&self, user: &NewUser) -> Result<User, ApiError> {
        let response = self
            .client
            .post(self.users_url.clone())
            .json(user)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<User, ApiError> {
        let response = self
            .client
            .put(self.user_url(id)?)
            .json(patch)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn delete(&self, id: UserId) -> Result<(), ApiError> {
        let response = self.client.delete(self.user_url(id)?).send().await?;
        check(response).await?;
        Ok(())
    }
}
