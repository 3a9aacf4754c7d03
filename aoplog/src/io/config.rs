//! Interceptor configuration stored as TOML (e.g. `aoplog.toml`).

use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::core::matcher::{Boundary, DEFAULT_NAMESPACE};
use crate::io::sink::{TARGET, TracingSink};

/// Interceptor configuration (TOML).
///
/// Missing fields default to the stock boundary and `debug` advice lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InterceptorConfig {
    /// `::`-separated namespace whose types are instrumented.
    pub boundary: String,

    /// Generated builder conversions excluded from the boundary.
    pub builder_conversions: Vec<String>,

    /// Severity of entry, exit and replace lines (`trace` .. `error`).
    pub level: String,

    /// Logical logger name attached to every advice line.
    pub logger: String,

    /// Subscriber directive used when `RUST_LOG` is unset. Defaults to
    /// `aoplog={level}` so advice lines are never filtered out below `level`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            boundary: DEFAULT_NAMESPACE.to_string(),
            builder_conversions: vec!["to_builder".to_string()],
            level: "debug".to_string(),
            logger: "org.example.core".to_string(),
            filter: None,
        }
    }
}

impl InterceptorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.boundary.trim().is_empty() {
            return Err(anyhow!("boundary must be non-empty"));
        }
        if self.boundary.split("::").any(|segment| segment.trim().is_empty()) {
            return Err(anyhow!(
                "boundary must be a `::`-separated path without empty segments"
            ));
        }
        self.level()?;
        if self.logger.trim().is_empty() {
            return Err(anyhow!("logger must be non-empty"));
        }
        Ok(())
    }

    pub fn level(&self) -> Result<Level> {
        Level::from_str(self.level.trim())
            .map_err(|_| anyhow!("invalid level {:?}", self.level))
    }

    /// Effective subscriber directive.
    pub fn filter_directive(&self) -> Result<String> {
        match &self.filter {
            Some(filter) => Ok(filter.clone()),
            None => Ok(format!(
                "{TARGET}={}",
                self.level()?.as_str().to_ascii_lowercase()
            )),
        }
    }

    pub fn boundary(&self) -> Boundary {
        Boundary {
            namespace: self.boundary.clone(),
            builder_conversions: self.builder_conversions.clone(),
        }
    }

    /// Sink forwarding to `tracing`, gated at the configured level.
    pub fn tracing_sink(&self) -> Result<TracingSink> {
        Ok(TracingSink::new(self.logger.clone(), self.level()?))
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `InterceptorConfig::default()`.
pub fn load_config(path: &Path) -> Result<InterceptorConfig> {
    if !path.exists() {
        let cfg = InterceptorConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: InterceptorConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &InterceptorConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, InterceptorConfig::default());
        assert_eq!(cfg.level().expect("level"), Level::DEBUG);
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("aoplog.toml");
        let cfg = InterceptorConfig {
            boundary: "acme::engine".to_string(),
            level: "info".to_string(),
            ..InterceptorConfig::default()
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("aoplog.toml");
        fs::write(&path, "boundary = \"acme::engine\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.boundary().namespace, "acme::engine");
        assert_eq!(cfg.boundary().builder_conversions, vec!["to_builder"]);
        assert_eq!(cfg.level, "debug");
    }

    #[test]
    fn rejects_invalid_level() {
        let cfg = InterceptorConfig {
            level: "loud".to_string(),
            ..InterceptorConfig::default()
        };
        let err = cfg.validate().expect_err("invalid level");
        assert!(err.to_string().contains("invalid level"));
    }

    #[test]
    fn rejects_empty_boundary_segments() {
        for boundary in ["", "acme::::engine", "acme::"] {
            let cfg = InterceptorConfig {
                boundary: boundary.to_string(),
                ..InterceptorConfig::default()
            };
            assert!(cfg.validate().is_err(), "{boundary:?}");
        }
    }

    #[test]
    fn filter_follows_level_unless_set() {
        let cfg = InterceptorConfig {
            level: "trace".to_string(),
            ..InterceptorConfig::default()
        };
        assert_eq!(cfg.filter_directive().expect("filter"), "aoplog=trace");

        let explicit = InterceptorConfig {
            filter: Some("warn,aoplog=info".to_string()),
            ..cfg
        };
        assert_eq!(
            explicit.filter_directive().expect("filter"),
            "warn,aoplog=info"
        );
    }

    #[test]
    fn default_filter_enables_default_level() {
        let cfg = InterceptorConfig::default();
        assert_eq!(cfg.filter_directive().expect("filter"), "aoplog=debug");
    }
}
