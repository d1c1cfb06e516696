use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const USER_KEY: &str = "user";
pub const FEATURE_FLAGS_KEY: &str = "featureFlags";
pub const FORM_DRAFT_KEY: &str = "multiStepFormDraft";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureFlags(pub BTreeMap<String, bool>);

impl FeatureFlags {
    pub fn is_enabled(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    /// Later values win.
    pub fn merged(mut self, overrides: &FeatureFlags) -> FeatureFlags {
        for (name, enabled) in &overrides.0 {
            self.0.insert(name.clone(), *enabled);
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "token", rename = "accessToken")]
    pub access_token: String,
    pub user: User,
    #[serde(default, rename = "featureFlags")]
    pub feature_flags: FeatureFlags,
}
