use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::categorize::{KeywordRule, RuleTable};
use crate::models::Category;
use crate::store::DEFAULT_STORAGE_KEY;

pub(crate) const DEFAULT_LOG_FILTER: &str = "pennywise=warn";

const CONFIG_FILE: &str = "config.json";

/// Runtime settings. Every field is optional in `config.json`; environment
/// variables win over the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) db_file: String,
    pub(crate) storage_key: String,
    pub(crate) log_filter: String,
    /// Extra keyword rules, tried after the built-in ones.
    pub(crate) keyword_rules: Vec<KeywordRuleConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct KeywordRuleConfig {
    pub(crate) category: String,
    pub(crate) keywords: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")),
            db_file: "pennywise.db".into(),
            storage_key: DEFAULT_STORAGE_KEY.into(),
            log_filter: DEFAULT_LOG_FILTER.into(),
            keyword_rules: Vec::new(),
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "pennywise", "PennyWise")
}

impl Config {
    /// Config file from the platform config directory, then `PENNYWISE_*`
    /// overrides from the environment.
    pub(crate) fn load() -> Self {
        let file = project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE));
        Self::from_file(file.as_deref()).with_overrides(|name| std::env::var(name).ok())
    }

    /// Missing or unreadable files give the defaults.
    pub(crate) fn from_file(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            eprintln!("Warning: ignoring invalid {}: {e}", path.display());
            Self::default()
        })
    }

    pub(crate) fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = var("PENNYWISE_DATA_DIR").filter(|v| !v.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(filter) = var("PENNYWISE_LOG").filter(|v| !v.is_empty()) {
            self.log_filter = filter;
        }
        self
    }

    /// Built-in rule table extended with the configured rules. Rules naming
    /// an unknown category are skipped.
    pub(crate) fn rule_table(&self) -> RuleTable {
        let mut table = RuleTable::default();
        for rule in &self.keyword_rules {
            let Some(category) = Category::parse(&rule.category) else {
                tracing::warn!(category = %rule.category, "skipping rule for unknown category");
                continue;
            };
            let keywords: Vec<&str> = rule.keywords.iter().map(String::as_str).collect();
            table = table.with_rule(KeywordRule::new(category, &keywords));
        }
        table
    }

    /// Database location, creating the data directory if needed.
    pub(crate) fn db_path(&self) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                self.data_dir.display()
            )
        })?;
        Ok(self.data_dir.join(&self.db_file))
    }
}
