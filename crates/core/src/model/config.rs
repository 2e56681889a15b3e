use chrono::Duration;
use thiserror::Error;

/// Tuning knobs for the interactive layer.
///
/// Delays are configuration, not literals, so tests can drive auto-save and
/// notice expiry with a frozen clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleConfig {
    storage_prefix: String,
    autosave_delay: Duration,
    autosave_notice: Duration,
    save_notice: Duration,
    reflection_min_chars: usize,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("storage prefix must not be empty")]
    EmptyPrefix,

    #[error("{0} must be positive")]
    NonPositiveDelay(&'static str),
}

/// Unvalidated configuration input.
#[derive(Debug, Clone, Default)]
pub struct ModuleConfigDraft {
    pub storage_prefix: Option<String>,
    pub autosave_delay_ms: Option<i64>,
    pub autosave_notice_ms: Option<i64>,
    pub save_notice_ms: Option<i64>,
    pub reflection_min_chars: Option<usize>,
}

impl ModuleConfigDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft, falling back to defaults for absent
    /// fields.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the prefix trims to empty or a delay is not
    /// positive.
    pub fn validate(self) -> Result<ModuleConfig, ConfigError> {
        let defaults = ModuleConfig::default();

        let storage_prefix = match self.storage_prefix {
            Some(prefix) => {
                let prefix = prefix.trim().to_string();
                if prefix.is_empty() {
                    return Err(ConfigError::EmptyPrefix);
                }
                prefix
            }
            None => defaults.storage_prefix,
        };

        let autosave_delay =
            validated_delay("autosave delay", self.autosave_delay_ms, defaults.autosave_delay)?;
        let autosave_notice = validated_delay(
            "auto-save notice duration",
            self.autosave_notice_ms,
            defaults.autosave_notice,
        )?;
        let save_notice =
            validated_delay("save notice duration", self.save_notice_ms, defaults.save_notice)?;

        Ok(ModuleConfig {
            storage_prefix,
            autosave_delay,
            autosave_notice,
            save_notice,
            reflection_min_chars: self
                .reflection_min_chars
                .unwrap_or(defaults.reflection_min_chars),
        })
    }
}

fn validated_delay(
    field: &'static str,
    ms: Option<i64>,
    fallback: Duration,
) -> Result<Duration, ConfigError> {
    match ms {
        Some(ms) if ms > 0 => Ok(Duration::milliseconds(ms)),
        Some(_) => Err(ConfigError::NonPositiveDelay(field)),
        None => Ok(fallback),
    }
}

impl ModuleConfig {
    #[must_use]
    pub fn storage_prefix(&self) -> &str {
        &self.storage_prefix
    }

    /// Idle time after the last keystroke before a reflection auto-saves.
    #[must_use]
    pub fn autosave_delay(&self) -> Duration {
        self.autosave_delay
    }

    /// How long the transient auto-save notice stays visible.
    #[must_use]
    pub fn autosave_notice(&self) -> Duration {
        self.autosave_notice
    }

    /// How long the explicit-save notice stays visible.
    #[must_use]
    pub fn save_notice(&self) -> Duration {
        self.save_notice
    }

    /// Trimmed character count a reflection must exceed to count as complete.
    #[must_use]
    pub fn reflection_min_chars(&self) -> usize {
        self.reflection_min_chars
    }
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            storage_prefix: "module".to_string(),
            autosave_delay: Duration::seconds(1),
            autosave_notice: Duration::seconds(2),
            save_notice: Duration::seconds(3),
            reflection_min_chars: 50,
        }
    }
}
