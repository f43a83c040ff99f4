// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use shelf_app::DEFAULT_PLACEHOLDER_LABEL;
use shelf_fetch::DEFAULT_SOURCE_URL;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_NAME: &str = "shelf";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_TIMEOUT: &str = "10s";
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            source: Source::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Source {
    pub url: Option<String>,
    pub file: Option<String>,
    pub timeout: Option<String>,
}

impl Default for Source {
    fn default() -> Self {
        Self {
            url: Some(DEFAULT_SOURCE_URL.to_owned()),
            file: None,
            timeout: Some(DEFAULT_TIMEOUT.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub placeholder_label: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            placeholder_label: Some(DEFAULT_PLACEHOLDER_LABEL.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("SHELF_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set SHELF_CONFIG_PATH to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version; add `version = 1` and put values under [source], [ui], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1. Run `shelf --print-example-config` for a template",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.source.file.is_none()
            && let Some(url) = &self.source.url
        {
            shelf_fetch::parse_source_url(url)
                .with_context(|| format!("invalid [source].url in {}", path.display()))?;
        }

        if let Some(file) = &self.source.file
            && file.trim().is_empty()
        {
            bail!(
                "source.file in {} must not be empty; remove it to fetch from source.url",
                path.display()
            );
        }

        if let Some(timeout) = &self.source.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "source.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        if let Some(label) = &self.ui.placeholder_label
            && label.trim().is_empty()
        {
            bail!(
                "ui.placeholder_label in {} must not be blank",
                path.display()
            );
        }

        Ok(())
    }

    pub fn source_url(&self) -> &str {
        self.source
            .url
            .as_deref()
            .unwrap_or(DEFAULT_SOURCE_URL)
            .trim()
    }

    pub fn source_file(&self) -> Option<PathBuf> {
        self.source.file.as_deref().map(PathBuf::from)
    }

    pub fn source_timeout(&self) -> Result<Duration> {
        parse_duration(self.source.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT))
    }

    pub fn placeholder_label(&self) -> &str {
        self.ui
            .placeholder_label
            .as_deref()
            .unwrap_or(DEFAULT_PLACEHOLDER_LABEL)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log.file.as_deref().map(PathBuf::from)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# shelf config\n# Place this file at: {}\n\nversion = 1\n\n[source]\nurl = \"{}\"\n# Optional. Read records from a local JSON file instead of url.\n# file = \"/absolute/path/to/hiring.json\"\ntimeout = \"{}\"\n\n[ui]\nplaceholder_label = \"{}\"\n\n[log]\n# One of: error, warn, info, debug, trace. SHELF_LOG overrides this.\nlevel = \"{}\"\n# Optional. Without a file, logs go to stderr.\n# file = \"/tmp/shelf.log\"\n",
            path.display(),
            DEFAULT_SOURCE_URL,
            DEFAULT_TIMEOUT,
            DEFAULT_PLACEHOLDER_LABEL,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(mins.saturating_mul(60)));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 10s)")
}

#[cfg(test)]
mod tests {
    use super::{Config, parse_duration};
    use anyhow::Result;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(
            config.source_url(),
            "https://fetch-hiring.s3.amazonaws.com/hiring.json"
        );
        assert_eq!(config.source_file(), None);
        assert_eq!(config.source_timeout()?, Duration::from_secs(10));
        assert_eq!(config.placeholder_label(), "No Name");
        assert_eq!(config.log_level(), "warn");
        assert_eq!(config.log_file(), None);
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[source]\nurl = \"http://localhost/items.json\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[source], [ui], and [log]"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        let message = error.to_string();
        assert!(message.contains("unsupported config version 2"));
        assert!(message.contains("--print-example-config"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[source]\nurl = \"http://localhost:8080/items.json\"\ntimeout = \"500ms\"\n[ui]\nplaceholder_label = \"(unnamed)\"\n[log]\nlevel = \"debug\"\nfile = \"/tmp/shelf.log\"\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(config.source_url(), "http://localhost:8080/items.json");
        assert_eq!(config.source_timeout()?, Duration::from_millis(500));
        assert_eq!(config.placeholder_label(), "(unnamed)");
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.log_file(), Some(PathBuf::from("/tmp/shelf.log")));
        Ok(())
    }

    #[test]
    fn source_file_skips_url_validation() -> Result<()> {
        let (_temp, path) =
            write_config("version = 1\n[source]\nurl = \"\"\nfile = \"/data/hiring.json\"\n")?;
        let config = Config::load(&path)?;
        assert_eq!(config.source_file(), Some(PathBuf::from("/data/hiring.json")));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn non_http_source_url_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[source]\nurl = \"ftp://example.com/x\"\n")?;
        let error = Config::load(&path).expect_err("ftp url should fail");
        let message = format!("{error:#}");
        assert!(message.contains("invalid [source].url"), "{message}");
        assert!(message.contains("unsupported scheme"), "{message}");
        Ok(())
    }

    #[test]
    fn blank_placeholder_label_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nplaceholder_label = \"  \"\n")?;
        let error = Config::load(&path).expect_err("blank placeholder should fail");
        assert!(error.to_string().contains("must not be blank"));
        Ok(())
    }

    #[test]
    fn timeout_rejects_non_positive_values_in_config() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[source]\ntimeout = \"0s\"\n")?;
        let error = Config::load(&path).expect_err("zero timeout should fail");
        assert!(error.to_string().contains("must be positive"));
        Ok(())
    }

    #[test]
    fn timeout_parses_ms_seconds_and_minutes() -> Result<()> {
        assert_eq!(parse_duration("500ms")?, Duration::from_millis(500));
        assert_eq!(parse_duration("5s")?, Duration::from_secs(5));
        assert_eq!(parse_duration("2m")?, Duration::from_secs(120));
        Ok(())
    }

    #[test]
    fn timeout_rejects_invalid_duration() {
        let error = parse_duration("soon").expect_err("invalid duration should fail");
        let message = error.to_string();
        assert!(
            message.contains("invalid duration") || message.contains("invalid timeout duration"),
            "unexpected message: {message}"
        );
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("SHELF_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("SHELF_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_lives_under_shelf_dir_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("SHELF_CONFIG_PATH");
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("shelf/config.toml"), "got {}", path.display());
        Ok(())
    }

    #[test]
    fn example_config_round_trips_through_load() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[source]"));
        assert!(example.contains("[ui]"));
        assert!(example.contains("[log]"));

        std::fs::write(&path, &example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.placeholder_label(), "No Name");
        assert_eq!(config.source_timeout()?, Duration::from_secs(10));
        Ok(())
    }
}
