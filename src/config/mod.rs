pub mod report_config;

use crate::core::ConfigProvider;
use crate::domain::model::GroupLimits;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{validate_path, validate_repo_slug, validate_url, Validate};
use clap::Parser;
use report_config::ReportConfig;

const DEFAULT_RELEASES_ENDPOINT: &str = "https://api.github.com";

#[derive(Debug, Clone, Parser)]
#[command(name = "itp-report")]
#[command(about = "Builds the ITP library metadata report from the collected datasets")]
pub struct CliConfig {
    /// Directory holding the dataset archive and taxonomy; the report
    /// bundle is written back here.
    #[arg(long, default_value = "./results")]
    pub data_dir: String,

    /// Dataset zip inside the data directory.
    #[arg(long, default_value = "all_data.zip")]
    pub dataset: String,

    /// Subject-classification taxonomy JSON inside the data directory.
    #[arg(long, default_value = "msc.json")]
    pub taxonomy: String,

    #[arg(long, default_value = DEFAULT_RELEASES_ENDPOINT)]
    pub releases_endpoint: String,

    /// `Name=owner/repo` pairs to poll for latest releases.
    #[arg(long, value_delimiter = ',')]
    pub release_repos: Vec<String>,

    /// Optional TOML file with report limits and release settings.
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// CLI flags merged with the optional TOML file. Flags win where both are
/// given; the file fills the rest.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    data_dir: String,
    dataset: String,
    taxonomy: String,
    releases_endpoint: String,
    release_repos: Vec<String>,
    limits: GroupLimits,
}

impl ResolvedConfig {
    pub fn resolve(cli: CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => ReportConfig::from_file(path)?,
            None => ReportConfig::default(),
        };
        Ok(Self::merge(cli, file))
    }

    fn merge(cli: CliConfig, file: ReportConfig) -> Self {
        let releases = file.releases.unwrap_or_default();
        let release_repos = if cli.release_repos.is_empty() {
            releases.repos.unwrap_or_default()
        } else {
            cli.release_repos
        };
        let releases_endpoint = if cli.releases_endpoint != DEFAULT_RELEASES_ENDPOINT {
            cli.releases_endpoint
        } else {
            releases.endpoint.unwrap_or(cli.releases_endpoint)
        };

        Self {
            data_dir: cli.data_dir,
            dataset: cli.dataset,
            taxonomy: cli.taxonomy,
            releases_endpoint,
            release_repos,
            limits: ReportConfig {
                limits: file.limits,
                releases: None,
            }
            .group_limits(),
        }
    }

    pub fn data_dir(&self) -> &str {
        &self.data_dir
    }
}

impl ConfigProvider for ResolvedConfig {
    fn dataset_path(&self) -> &str {
        &self.dataset
    }

    fn taxonomy_path(&self) -> &str {
        &self.taxonomy
    }

    fn output_path(&self) -> &str {
        &self.data_dir
    }

    fn releases_endpoint(&self) -> &str {
        &self.releases_endpoint
    }

    fn release_repos(&self) -> &[String] {
        &self.release_repos
    }

    fn group_limits(&self) -> GroupLimits {
        self.limits
    }
}

impl Validate for ResolvedConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_dir", &self.data_dir)?;
        validate_path("dataset", &self.dataset)?;
        validate_path("taxonomy", &self.taxonomy)?;

        if !self.release_repos.is_empty() {
            validate_url("releases_endpoint", &self.releases_endpoint)?;
            for remote in &self.release_repos {
                let slug = remote
                    .split_once('=')
                    .map(|(_, slug)| slug)
                    .ok_or_else(|| ReportError::ConfigError {
                        message: format!("Release remote '{}' is not 'Name=owner/repo'", remote),
                    })?;
                validate_repo_slug("release_repos", slug)?;
            }
        }

        let limits = [
            ("limits.top_areas", self.limits.top_areas),
            ("limits.mid_breakdowns", self.limits.mid_breakdowns),
            ("limits.fine_breakdowns", self.limits.fine_breakdowns),
            ("limits.top_itps", self.limits.top_itps),
        ];
        for (field, value) in limits {
            if value == 0 {
                return Err(ReportError::ConfigError {
                    message: format!("{} must be at least 1", field),
                });
            }
        }

        Ok(())
    }
}
