use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::entities::session::{
    AccessToken, FeatureFlags, User, ACCESS_TOKEN_KEY, FEATURE_FLAGS_KEY, FORM_DRAFT_KEY,
    USER_KEY,
};
use crate::domain::entities::wizard::WizardDraft;
use crate::usecase::ports::api::{ApiError, TokenSource};
use crate::usecase::ports::session_store::{SessionStore, StoreError};

/// Typed view over the persisted session, shared through the UI context.
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    default_flags: FeatureFlags,
    token: RwLock<Option<String>>,
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>, default_flags: FeatureFlags) -> Self {
        Self {
            store,
            default_flags,
            token: RwLock::new(None),
        }
    }

    /// Loads the persisted token into memory.
    pub fn restore(&self) -> Result<(), StoreError> {
        self.store.init()?;
        let token = self.read::<AccessToken>(ACCESS_TOKEN_KEY)?;
        self.cache_token(token.map(|token| token.0));
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(key, error = %err, "discarding unreadable session value");
                self.store.remove(key)?;
                Ok(None)
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw =
            serde_json::to_string(value).map_err(|err| StoreError::Message(err.to_string()))?;
        self.store.set(key, &raw)
    }

    fn cache_token(&self, token: Option<String>) {
        match self.token.write() {
            Ok(mut slot) => *slot = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    pub fn access_token(&self) -> Option<AccessToken> {
        let slot = match self.token.read() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        slot.map(AccessToken)
    }

    pub fn set_access_token(&self, token: AccessToken) -> Result<(), StoreError> {
        self.write(ACCESS_TOKEN_KEY, &token)?;
        self.cache_token(Some(token.0));
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    pub fn user(&self) -> Result<Option<User>, StoreError> {
        self.read(USER_KEY)
    }

    pub fn set_user(&self, user: &User) -> Result<(), StoreError> {
        self.write(USER_KEY, user)
    }

    /// Environment defaults overridden by persisted flags.
    pub fn feature_flags(&self) -> Result<FeatureFlags, StoreError> {
        let stored = self.read::<FeatureFlags>(FEATURE_FLAGS_KEY)?.unwrap_or_default();
        Ok(self.default_flags.clone().merged(&stored))
    }

    pub fn set_feature_flags(&self, flags: &FeatureFlags) -> Result<(), StoreError> {
        self.write(FEATURE_FLAGS_KEY, flags)
    }

    pub fn flag_enabled(&self, name: &str) -> bool {
        match self.feature_flags() {
            Ok(flags) => flags.is_enabled(name),
            Err(err) => {
                warn!(flag = name, error = %err, "failed to read feature flags");
                self.default_flags.is_enabled(name)
            }
        }
    }

    pub fn load_draft(&self) -> Result<Option<WizardDraft>, StoreError> {
        self.read(FORM_DRAFT_KEY)
    }

    pub fn save_draft(&self, draft: &WizardDraft) -> Result<(), StoreError> {
        self.write(FORM_DRAFT_KEY, draft)
    }

    pub fn clear_draft(&self) -> Result<(), StoreError> {
        self.store.remove(FORM_DRAFT_KEY)
    }

    pub fn logout(&self) -> Result<(), StoreError> {
        self.cache_token(None);
        self.store.clear()
    }

    /// Clears the session on 401. There is no token refresh; the user signs in again.
    pub fn handle_api_error(&self, err: &ApiError) -> bool {
        if !err.is_unauthorized() {
            return false;
        }
        info!("access token rejected, clearing session");
        if let Err(store_err) = self.logout() {
            warn!(error = %store_err, "failed to clear session after 401");
        }
        true
    }
}

impl TokenSource for SessionService {
    fn access_token(&self) -> Option<String> {
        SessionService::access_token(self).map(|token| token.0)
    }
}
