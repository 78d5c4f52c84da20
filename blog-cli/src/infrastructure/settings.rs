use std::fmt::Write;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use blog_core::DEFAULT_TIMESTAMP_FORMAT;
use chrono::Local;
use chrono::format::{Item, StrftimeItems};

const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_HIGHLIGHT_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    /// Resolved filter: `--log-level`, then `LOG_LEVEL`, then `RUST_LOG`, then `warn`.
    pub(crate) log_level: String,
    pub(crate) timestamp_format: String,
    pub(crate) seed_demo: bool,
    pub(crate) highlight: Duration,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let log_level = lookup("LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let timestamp_format = lookup("BLOG_TIMESTAMP_FORMAT")
            .unwrap_or_else(|| DEFAULT_TIMESTAMP_FORMAT.to_string());
        validate_timestamp_format(&timestamp_format)
            .context("BLOG_TIMESTAMP_FORMAT is not a valid strftime pattern")?;
        let seed_demo = parse_bool(&lookup, "BLOG_SEED_DEMO", false)?;
        let highlight_ms = parse_u64(&lookup, "BLOG_HIGHLIGHT_MS", DEFAULT_HIGHLIGHT_MS)?;

        Ok(Self {
            log_level,
            timestamp_format,
            seed_demo,
            highlight: Duration::from_millis(highlight_ms),
        })
    }

    /// Applies command-line flags on top of the environment.
    pub(crate) fn with_overrides(
        mut self,
        log_level: Option<String>,
        timestamp_format: Option<String>,
        seed_demo: bool,
    ) -> Result<Self> {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(pattern) = timestamp_format {
            validate_timestamp_format(&pattern)
                .context("--timestamp-format is not a valid strftime pattern")?;
            self.timestamp_format = pattern;
        }
        self.seed_demo |= seed_demo;
        Ok(self)
    }
}

fn validate_timestamp_format(pattern: &str) -> Result<()> {
    if pattern.trim().is_empty() {
        return Err(anyhow!("pattern must not be empty"));
    }
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(anyhow!("unsupported specifier in `{pattern}`"));
    }

    // Parse-only specifiers pass the item check but fail when formatting.
    let mut sample = String::new();
    write!(sample, "{}", Local::now().format_with_items(StrftimeItems::new(pattern)))
        .map_err(|_| anyhow!("`{pattern}` cannot be used to format a date"))?;
    Ok(())
}

fn parse_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> Result<bool> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("{key} must be a boolean, got `{other}`")),
    }
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<u64> {
    let value = lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
