//! Latest-version lookups against the npm registry

use crate::error::{GeneratorError, Result};
use semver::Version;
use serde::Deserialize;
use std::future::Future;
use url::Url;

/// Default registry queried for published versions
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Environment variable overriding the registry URL
pub const REGISTRY_URL_ENV: &str = "CKEDITOR5_REGISTRY_URL";

/// Source of the latest published version of a package
pub trait VersionLookup {
    fn latest_version(&self, package: &str) -> impl Future<Output = Result<Version>> + Send;
}

/// Body of `GET /<package>/latest`
#[derive(Debug, Deserialize)]
struct LatestManifest {
    version: String,
}

/// Registry client speaking the npm registry HTTP API
pub struct RegistryClient {
    base_url: Url,
    client: reqwest::Client,
}

impl RegistryClient {
    pub fn new(base_url: Url, user_agent: &str) -> Self {
        Self {
            base_url,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Client for the registry named by `CKEDITOR5_REGISTRY_URL`, or the public one
    pub fn from_env(user_agent: &str) -> anyhow::Result<Self> {
        let url_str =
            std::env::var(REGISTRY_URL_ENV).unwrap_or_else(|_| DEFAULT_REGISTRY_URL.to_string());
        let url = Url::parse(&url_str)
            .map_err(|e| anyhow::anyhow!("Invalid registry URL {}: {}", url_str, e))?;
        Ok(Self::new(url, user_agent))
    }

    /// `<base>/<package>/latest`, keeping scoped names as two path segments
    fn latest_url(base: &Url, package: &str) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                GeneratorError::version_lookup(package, format!("URL cannot have path segments: {}", base))
            })?
            .pop_if_empty()
            .extend(package.split('/'))
            .push("latest");
        Ok(url)
    }
}

impl VersionLookup for RegistryClient {
    async fn latest_version(&self, package: &str) -> Result<Version> {
        let url = Self::latest_url(&self.base_url, package)?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| GeneratorError::version_lookup(package, e))?;

        if !response.status().is_success() {
            return Err(GeneratorError::version_lookup(
                package,
                format!("HTTP {} from {}", response.status(), url),
            ));
        }

        let manifest: LatestManifest = response
            .json()
            .await
            .map_err(|e| GeneratorError::version_lookup(package, e))?;

        parse_version(package, &manifest.version)
    }
}

/// Parse a published version, tolerating a leading `v`
pub fn parse_version(package: &str, version: &str) -> Result<Version> {
    let trimmed = version.trim();
    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(cleaned).map_err(|e| {
        GeneratorError::version_lookup(package, format!("invalid version '{}': {}", version, e))
    })
}
