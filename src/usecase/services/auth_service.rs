use std::sync::Arc;

use tracing::info;

use crate::domain::entities::session::{AccessToken, User};
use crate::usecase::ports::api::{ApiError, AuthGateway};
use crate::usecase::ports::session_store::StoreError;
use crate::usecase::services::session_service::SessionService;

#[derive(Debug)]
pub enum AuthError {
    MissingCredentials,
    Rejected,
    Api(ApiError),
    Store(StoreError),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingCredentials => write!(f, "username and password are required"),
            AuthError::Rejected => write!(f, "invalid username or password"),
            AuthError::Api(err) => write!(f, "{err}"),
            AuthError::Store(err) => write!(f, "failed to save session: {err}"),
        }
    }
}

impl std::error::Error for AuthError {}

pub struct AuthService {
    gateway: Arc<dyn AuthGateway>,
    session: Arc<SessionService>,
}

impl AuthService {
    pub fn new(gateway: Arc<dyn AuthGateway>, session: Arc<SessionService>) -> Self {
        Self { gateway, session }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let response = self
            .gateway
            .login(username.to_string(), password.to_string())
            .await
            .map_err(|err| match err {
                ApiError::Unauthorized => AuthError::Rejected,
                other => AuthError::Api(other),
            })?;

        self.session
            .set_access_token(AccessToken(response.access_token))
            .map_err(AuthError::Store)?;
        self.session
            .set_user(&response.user)
            .map_err(AuthError::Store)?;
        self.session
            .set_feature_flags(&response.feature_flags)
            .map_err(AuthError::Store)?;
        info!(user = %response.user.username, "signed in");
        Ok(response.user)
    }

    pub fn logout(&self) -> Result<(), StoreError> {
        info!("signed out");
        self.session.logout()
    }
}
