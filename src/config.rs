use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use directories::ProjectDirs;

use crate::domain::entities::grid::DEFAULT_PAGE_SIZE;
use crate::domain::entities::session::FeatureFlags;
use crate::infra::http::retry::RetryPolicy;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];
const FEATURE_PREFIX: &str = "BACKOFFICE_FEATURE_";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_size: usize,
    pub http_timeout: Duration,
    pub retry: RetryPolicy,
    pub data_dir: PathBuf,
    pub feature_flags: FeatureFlags,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let vars: BTreeMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    pub fn from_vars(vars: &BTreeMap<String, String>) -> Result<Self> {
        let lookup = |key: &str| {
            vars.get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
        };

        let api_base_url = lookup("BACKOFFICE_API_BASE_URL")
            .or_else(|| lookup("VITE_API_BASE_URL"))
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        let parsed = url::Url::parse(&api_base_url)
            .with_context(|| format!("invalid API base URL: {api_base_url}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("API base URL must use http or https: {api_base_url}");
        }

        let page_size = match lookup("BACKOFFICE_PAGE_SIZE") {
            Some(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("invalid BACKOFFICE_PAGE_SIZE: {raw}"))?,
            None => DEFAULT_PAGE_SIZE,
        };
        if page_size == 0 {
            bail!("BACKOFFICE_PAGE_SIZE must be greater than zero");
        }

        let timeout_secs = match lookup("BACKOFFICE_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("invalid BACKOFFICE_HTTP_TIMEOUT_SECS: {raw}"))?,
            None => 30,
        };

        let retry = match lookup("BACKOFFICE_HTTP_RETRIES") {
            Some(raw) => match raw
                .parse::<u32>()
                .with_context(|| format!("invalid BACKOFFICE_HTTP_RETRIES: {raw}"))?
            {
                0 | 1 => RetryPolicy::no_retry(),
                max_attempts => RetryPolicy {
                    max_attempts,
                    ..RetryPolicy::default()
                },
            },
            None => RetryPolicy::default(),
        };

        let data_dir = match lookup("BACKOFFICE_DATA_DIR") {
            Some(raw) => PathBuf::from(raw),
            None => default_data_dir()?,
        };

        Ok(Self {
            api_base_url,
            page_size,
            http_timeout: Duration::from_secs(timeout_secs),
            retry,
            data_dir,
            feature_flags: feature_flags_from_vars(vars)?,
        })
    }

    pub fn session_db_path(&self) -> PathBuf {
        self.data_dir.join("session.sqlite")
    }
}

fn feature_flags_from_vars(vars: &BTreeMap<String, String>) -> Result<FeatureFlags> {
    let mut flags = BTreeMap::new();
    for (key, value) in vars {
        let Some(name) = key.strip_prefix(FEATURE_PREFIX) else {
            continue;
        };
        let enabled = match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => true,
            "0" | "false" | "off" | "no" => false,
            other => bail!("invalid value for {key}: {other}"),
        };
        flags.insert(name.to_ascii_lowercase(), enabled);
    }
    Ok(FeatureFlags(flags))
}

pub fn default_data_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "backoffice", "console")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    Ok(project_dirs.data_local_dir().to_path_buf())
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}
