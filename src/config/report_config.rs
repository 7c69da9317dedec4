use crate::domain::model::GroupLimits;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML file tuning the report build. Anything left out falls back
/// to the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub limits: Option<LimitsConfig>,
    pub releases: Option<ReleasesConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub top_areas: Option<usize>,
    pub mid_breakdowns: Option<usize>,
    pub fine_breakdowns: Option<usize>,
    pub top_itps: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReleasesConfig {
    pub endpoint: Option<String>,
    pub repos: Option<Vec<String>>,
}

impl ReportConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn group_limits(&self) -> GroupLimits {
        let defaults = GroupLimits::default();
        match &self.limits {
            None => defaults,
            Some(limits) => GroupLimits {
                top_areas: limits.top_areas.unwrap_or(defaults.top_areas),
                mid_breakdowns: limits.mid_breakdowns.unwrap_or(defaults.mid_breakdowns),
                fine_breakdowns: limits.fine_breakdowns.unwrap_or(defaults.fine_breakdowns),
                top_itps: limits.top_itps.unwrap_or(defaults.top_itps),
            },
        }
    }
}
