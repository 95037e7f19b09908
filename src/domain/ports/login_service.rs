//! Driving port for operator authentication.
//!
//! Inbound adapters call this to validate credentials without knowing the
//! backing directory. The production implementation is a static directory
//! built from configuration at process start; there is no module-level user
//! table.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, OperatorProfile};

/// Domain use-case port for operator authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated operator's profile.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<OperatorProfile, Error>;
}

/// Single-operator directory injected from configuration.
#[derive(Debug, Clone)]
pub struct StaticLoginService {
    username: String,
    password: String,
}

impl StaticLoginService {
    /// Build the directory from the configured operator credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[async_trait]
impl LoginService for StaticLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<OperatorProfile, Error> {
        if credentials.username() == self.username && credentials.password() == self.password {
            Ok(OperatorProfile {
                username: self.username.clone(),
            })
        } else {
            Err(Error::unauthorized("Invalid username or password"))
        }
    }
}
