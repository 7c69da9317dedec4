//! Latest-release polling against the GitHub API. Feeds the release table
//! in the report header; failures for individual ITPs are logged and
//! skipped so one dead repository cannot sink a build.

use crate::domain::model::Release;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::validate_repo_slug;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct LatestReleaseResponse {
    name: Option<String>,
    tag_name: String,
    published_at: DateTime<Utc>,
    html_url: String,
}

pub struct ReleasePoller {
    client: Client,
    api_base: String,
}

impl ReleasePoller {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into(),
        }
    }

    /// Polls every configured `Name=owner/repo` remote. Bad entries and
    /// failed requests are warned about and dropped; the build goes on
    /// with whatever answered.
    pub async fn poll(&self, remotes: &[String]) -> Vec<Release> {
        let mut releases = Vec::new();
        for remote in remotes {
            match self.poll_remote(remote).await {
                Ok(release) => {
                    tracing::debug!("Latest {} release: {}", release.itp, release.tag);
                    releases.push(release);
                }
                Err(e) => {
                    tracing::warn!("Skipping release poll for '{}': {}", remote, e);
                }
            }
        }
        releases
    }

    async fn poll_remote(&self, remote: &str) -> Result<Release> {
        let (name, slug) = parse_remote(remote)?;
        let url = format!("{}/repos/{}/releases/latest", self.api_base, slug);

        tracing::debug!("Fetching {}", url);
        let response: LatestReleaseResponse = self
            .client
            .get(&url)
            // GitHub rejects requests without a User-Agent.
            .header("User-Agent", "itp-report")
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(Release {
            itp: name.to_string(),
            release_name: response.name.unwrap_or_else(|| response.tag_name.clone()),
            tag: response.tag_name,
            published_at: response.published_at,
            url: response.html_url,
        })
    }
}

/// Splits `"Lean=leanprover/lean4"` into the ITP name and repo slug.
fn parse_remote(remote: &str) -> Result<(&str, &str)> {
    let (name, slug) = remote
        .split_once('=')
        .ok_or_else(|| ReportError::ConfigError {
            message: format!("Release remote '{}' is not 'Name=owner/repo'", remote),
        })?;
    validate_repo_slug("release_repos", slug)?;
    Ok((name.trim(), slug.trim()))
}
