//! Account service.

use std::fmt;

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    api::{ApiClient, ApiError},
    validation::ValidationError,
};

/// Registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend identifier.
    pub id: u64,

    /// Login name.
    pub username: String,

    /// Contact email.
    pub email: String,
}

/// Token returned by a successful login.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AuthToken {
    /// JWT to send as a bearer token.
    pub access_token: String,
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("access_token", &"[redacted]")
            .finish()
    }
}

/// Sign-up form.
#[derive(Clone, Serialize)]
pub struct NewUser {
    /// Login name.
    pub username: String,

    /// Contact email.
    pub email: String,

    /// Plain-text password, only ever sent to the backend.
    pub password: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Login form.
#[derive(Clone, Serialize)]
pub struct Credentials {
    /// Username or email.
    pub identifier: String,

    /// Plain-text password.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Account service backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpAccountService {
    client: ApiClient,
}

impl HttpAccountService {
    /// Create a service sending requests through `client`.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccountService for HttpAccountService {
    async fn register(&self, user: NewUser) -> Result<User, ApiError> {
        if user.username.trim().is_empty() {
            return Err(ValidationError::Required("username").into());
        }

        if user.password.is_empty() {
            return Err(ValidationError::Required("password").into());
        }

        let created: User = self.client.post("/users/register", &user).await?;

        info!(user = created.id, username = %created.username, "registered account");

        Ok(created)
    }

    async fn login(&self, credentials: Credentials) -> Result<AuthToken, ApiError> {
        if credentials.identifier.trim().is_empty() || credentials.password.is_empty() {
            return Err(ValidationError::Required("identifier and password").into());
        }

        let token: AuthToken = self.client.post("/users/login", &credentials).await?;

        self.client.set_token(Some(token.access_token.clone()));

        info!(identifier = %credentials.identifier, "logged in");

        Ok(token)
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.client.get("/users/me", &[]).await
    }
}

/// Sign-up and session management.
#[automock]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account.
    async fn register(&self, user: NewUser) -> Result<User, ApiError>;

    /// Log in and adopt the returned token for later requests.
    async fn login(&self, credentials: Credentials) -> Result<AuthToken, ApiError>;

    /// The signed-in account.
    async fn current_user(&self) -> Result<User, ApiError>;
}
