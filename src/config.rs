//! Matcher configuration loaded from YAML or JSON.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{loader, Error, Ipv4Range, Matcher, Result};

/// Configuration for a [`Matcher`].
///
/// ```yaml
/// name: office
/// ranges:
///   - 10.0.0.0/8
///   - 192.168.1.10 - 192.168.1.20
/// range_files:
///   - extra_ranges.txt
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Name of the range set, used in logs
    pub name: String,
    /// Inline range expressions
    pub ranges: Vec<String>,
    /// Range list files, one expression per line
    pub range_files: Vec<PathBuf>,
}

impl MatcherConfig {
    /// Create a config from inline range expressions.
    pub fn new<I, S>(name: impl Into<String>, ranges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            ranges: ranges.into_iter().map(Into::into).collect(),
            range_files: Vec::new(),
        }
    }

    /// Parse a config from YAML.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Parse a config from JSON.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a config file.
    ///
    /// Files ending in `.json` are read as JSON, anything else as YAML.
    /// Relative `range_files` entries are resolved against the config
    /// file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let mut config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };

        if let Some(base) = path.parent() {
            for file in config.range_files.iter_mut() {
                if file.is_relative() {
                    *file = base.join(&*file);
                }
            }
        }

        log::debug!("Loaded matcher config {:?} from {:?}", config.name, path);
        Ok(config)
    }

    /// Parse every configured range and build the matcher.
    pub fn build(&self) -> Result<Matcher> {
        if self.ranges.is_empty() && self.range_files.is_empty() {
            log::warn!("Matcher config {:?} has no ranges", self.name);
        }

        let mut parsed = self
            .ranges
            .iter()
            .map(|expr| Ipv4Range::parse(expr))
            .collect::<Result<Vec<_>>>()?;

        for file in &self.range_files {
            let ranges = loader::load_range_file(file).map_err(|e| match e {
                Error::Io(io) => Error::Config(format!("cannot read {}: {}", file.display(), io)),
                other => other,
            })?;
            parsed.extend(ranges);
        }

        let matcher = Matcher::from_ranges(parsed);
        log::info!(
            "Matcher {:?} ready: {} merged ranges",
            self.name,
            matcher.len()
        );
        Ok(matcher)
    }
}
