//! RON configuration files: harvest settings and replay manifests.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tradeview_core::ReportTarget;
use tradeview_engine::{
    Credentials, HarvestSettings, Selectors, StaticSite, ViewUrls, DEFAULT_BASE_URL,
    DEFAULT_LOGIN_URL,
};

pub const EMAIL_VAR: &str = "TRADEVIEW_EMAIL";
pub const PASSWORD_VAR: &str = "TRADEVIEW_PASSWORD";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid base url {url:?}: {reason}")]
    BaseUrl { url: String, reason: String },
    #[error("environment variable {0} is not set")]
    MissingCredential(&'static str),
}

/// Everything a run can be tuned with. Every field is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarvestConfig {
    pub base_url: Option<String>,
    pub login_url: Option<String>,
    pub settings: HarvestSettings,
    pub selectors: Selectors,
    pub report: ReportTarget,
}

impl HarvestConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        read_ron(path)
    }

    pub fn view_urls(&self) -> Result<ViewUrls, ConfigError> {
        let base = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        ViewUrls::new(base).map_err(|err| ConfigError::BaseUrl {
            url: base.to_string(),
            reason: err.to_string(),
        })
    }

    pub fn login_url(&self) -> &str {
        self.login_url.as_deref().unwrap_or(DEFAULT_LOGIN_URL)
    }
}

/// Saved pages to replay instead of a live browser.
///
/// File paths are relative to the manifest's own directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteManifest {
    pub pages: Vec<(String, PathBuf)>,
}

impl SiteManifest {
    pub fn load(path: &Path) -> Result<(Self, PathBuf), ConfigError> {
        let manifest = read_ron(path)?;
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok((manifest, root))
    }

    pub fn into_site(self, root: &Path) -> Result<StaticSite, ConfigError> {
        let mut site = StaticSite::new();
        for (url, file) in self.pages {
            let path = root.join(file);
            let html = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            site.insert(&url, html);
        }
        Ok(site)
    }
}

/// Reads login credentials from the environment.
pub fn credentials_from_env() -> Result<Credentials, ConfigError> {
    let email = env::var(EMAIL_VAR).map_err(|_| ConfigError::MissingCredential(EMAIL_VAR))?;
    let password =
        env::var(PASSWORD_VAR).map_err(|_| ConfigError::MissingCredential(PASSWORD_VAR))?;
    Ok(Credentials { email, password })
}

fn read_ron<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
