//! Sort engine settings and how they are loaded

use anyhow::{Context, anyhow};
use fieldsort_core::{Collation, NullOrdering, PivotStrategy, SortOptions, collation_for};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

use crate::error::ConfigError;

/// Env var naming a TOML or JSON config file.
pub const CONFIG_PATH_ENV: &str = "FIELDSORT_CONFIG_PATH";
/// Env var holding the config as inline JSON.
pub const CONFIG_JSON_ENV: &str = "FIELDSORT_CONFIG_JSON";

/// Source that produced the sort configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    /// Nothing found; built-in defaults
    #[default]
    Default,
    /// File named by `$FIELDSORT_CONFIG_PATH`
    EnvPath(PathBuf),
    /// JSON held in `$FIELDSORT_CONFIG_JSON`
    EnvInline,
    /// Default file found in the working directory
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => f.write_str("built-in defaults"),
            ConfigSource::EnvPath(path) => {
                write!(f, "${CONFIG_PATH_ENV} ({})", path.display())
            }
            ConfigSource::EnvInline => write!(f, "${CONFIG_JSON_ENV}"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Sort engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SortConfig {
    /// Locale tag or encoding label whose order text keys follow, e.g.
    /// `gbk`, `zh-TW`, `shift_jis` or `codepoint` for plain Unicode order.
    pub collation: String,
    /// `first`, `median-of-three` or `random`. `first` is quadratic on input
    /// that is already ordered.
    pub pivot: PivotStrategy,
    /// Seed for the `random` pivot; unset draws a fresh seed per sort.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// `reject` fails a sort on a null key; `first` / `last` place nulls
    /// regardless of direction.
    pub nulls: NullOrdering,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            collation: "gbk".to_string(),
            pivot: PivotStrategy::default(),
            seed: None,
            nulls: NullOrdering::default(),
        }
    }
}

impl SortConfig {
    /// Load configuration using environment variables.
    /// Evaluation order:
    /// 1) `$FIELDSORT_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$FIELDSORT_CONFIG_JSON` (inline JSON),
    /// 3) the first of `fieldsort.toml`, `fieldsort.json`,
    ///    `config/fieldsort.toml`, `config/fieldsort.json` that exists,
    /// 4) defaults.
    pub fn load_from_env() -> anyhow::Result<(Self, ConfigSource)> {
        if let Ok(path_str) = env::var(CONFIG_PATH_ENV)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Ok(raw) = env::var(CONFIG_JSON_ENV)
            && !raw.trim().is_empty()
        {
            let parsed =
                Self::parse_json(&raw).with_context(|| format!("failed to parse {CONFIG_JSON_ENV}"))?;
            return Ok((parsed, ConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file() {
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((Self::default(), ConfigSource::Default))
    }

    /// Read a config file. `.json` and `.toml` parse as such; any other
    /// extension goes through [`SortConfig::parse_from_str`].
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read sort config from {}", path.display()))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents)
                .with_context(|| format!("invalid sort config {}", path.display())),
            Some("toml") => toml::from_str(&contents)
                .map_err(|err| anyhow!("invalid sort config {}: {}", path.display(), err)),
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    /// Parse `contents` as TOML, falling back to JSON. `origin` names the
    /// source in the error.
    pub fn parse_from_str(contents: &str, origin: &str) -> anyhow::Result<Self> {
        // TOML first, then JSON
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse sort config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    /// Parse inline JSON.
    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).map_err(|err| anyhow!("invalid sort config json: {err}"))
    }

    /// Render as TOML, as printed by `fieldsort-config show`.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string(self).context("failed to render sort config as TOML")
    }

    /// Check the settings and build core sort options from them.
    pub fn to_options(&self) -> Result<SortOptions, ConfigError> {
        let name = self.collation.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyCollation);
        }
        let collation = collation_for(name).map_err(|source| ConfigError::UnknownCollation {
            name: name.to_string(),
            source,
        })?;

        if self.seed.is_some() && self.pivot != PivotStrategy::Random {
            warn!(pivot = ?self.pivot, "seed is only used by the random pivot");
        }
        debug!(collation = collation.name(), pivot = ?self.pivot, nulls = ?self.nulls, "sort options");

        let mut options = SortOptions::default()
            .with_collation(collation)
            .with_pivot(self.pivot)
            .with_nulls(self.nulls);
        if let Some(seed) = self.seed {
            options = options.with_seed(seed);
        }
        Ok(options)
    }

    fn find_default_file() -> Option<PathBuf> {
        const CANDIDATES: &[&str] = &[
            "fieldsort.toml",
            "fieldsort.json",
            "config/fieldsort.toml",
            "config/fieldsort.json",
        ];

        CANDIDATES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(|path| path.to_path_buf())
    }
}
