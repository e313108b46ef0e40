use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Email domain suffixes eligible for the leaderboard, e.g. "@nokia.com".
    pub domains: Vec<String>,
    pub report: ReportConfig,
    pub git: GitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub top_n: usize,
    pub default_format: String,
    pub color_output: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Only count commits authored after this date.
    pub after: Option<NaiveDate>,
    pub include_merges: bool,
    /// Directory depth limit for repository discovery.
    pub max_depth: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domains: Vec::new(),
            report: ReportConfig::default(),
            git: GitConfig::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: 20,
            default_format: "text".to_string(),
            color_output: true,
        }
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            after: None,
            include_merges: false,
            max_depth: None,
        }
    }
}

impl Config {
    /// Layered load: optional TOML file, then COMMITBOARD_* environment
    /// variables. CLI flags override on top of this in main.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        builder = match path {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder.add_source(config::File::with_name("commitboard").required(false)),
        };

        let settings = builder
            .add_source(
                config::Environment::with_prefix("COMMITBOARD")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("domains"),
            )
            .build()
            .context("Failed to load configuration")?;

        settings
            .try_deserialize()
            .context("Invalid configuration values")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert!(config.domains.is_empty());
        assert_eq!(config.report.top_n, 20);
        assert_eq!(config.report.default_format, "text");
        assert!(config.report.color_output);
        assert!(config.git.after.is_none());
        assert!(!config.git.include_merges);
    }

    #[test]
    fn loads_values_from_a_toml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("commitboard.toml");
        fs::write(
            &path,
            r#"
domains = ["@nokia.com", "@microsoft.com"]

[report]
top_n = 5

[git]
after = "2014-02-10"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.domains.len(), 2);
        assert_eq!(config.report.top_n, 5);
        assert_eq!(
            config.git.after,
            Some(NaiveDate::from_ymd_opt(2014, 2, 10).unwrap())
        );
        // untouched sections keep their defaults
        assert_eq!(config.report.default_format, "text");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
