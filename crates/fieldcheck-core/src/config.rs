use crate::engine::RuleSet;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = ".fieldcheck.toml";

/// How rule tokens naming an unregistered validator are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownRules {
    /// Skip silently
    #[default]
    Ignore,
    /// Skip, logging a warning
    Warn,
    /// Abort the validation call with a configuration error
    Error,
}

impl UnknownRules {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ignore" => Some(UnknownRules::Ignore),
            "warn" => Some(UnknownRules::Warn),
            "error" => Some(UnknownRules::Error),
            _ => None,
        }
    }
}

impl fmt::Display for UnknownRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownRules::Ignore => write!(f, "ignore"),
            UnknownRules::Warn => write!(f, "warn"),
            UnknownRules::Error => write!(f, "error"),
        }
    }
}

/// Configuration for fieldcheck
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub engine: EngineOptions,
    #[serde(default)]
    pub rules: RuleSet,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineOptions {
    #[serde(default)]
    pub unknown_rules: UnknownRules,
}

impl EngineConfig {
    /// Load config from file, `.fieldcheck.toml` if present, or defaults
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        if let Some(path) = config_path {
            Self::from_file(path)
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::from_file(DEFAULT_CONFIG_FILE)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Starter config written by `fieldcheck init`
    pub fn example() -> Self {
        let mut rules = RuleSet::new();
        rules.insert(
            "email".to_string(),
            vec!["required".to_string(), "email".to_string()],
        );
        rules.insert("age".to_string(), vec!["num:0:150".to_string()]);
        rules.insert(
            "confirm".to_string(),
            vec!["requiredWith:email".to_string(), "sameAs:email".to_string()],
        );
        Self {
            engine: EngineOptions::default(),
            rules,
        }
    }
}
