use chrono::{DateTime, Utc};

/// One free-text reflection exercise.
///
/// The debounce deadline and notice expiry live on the instance itself;
/// services compare them against the clock in `tick`, so each instance
/// carries at most one pending auto-save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionView {
    pub id: Option<String>,
    pub text: String,
    /// Live character-count label, e.g. `"128 characters"`.
    pub char_label: String,
    /// Transient save notice, cleared when `notice_expires_at` passes.
    pub notice: Option<String>,
    pub pending_save_at: Option<DateTime<Utc>>,
    pub notice_expires_at: Option<DateTime<Utc>>,
}

impl ReflectionView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Storage identifier: the configured id, or a positional fallback.
    #[must_use]
    pub fn storage_id(&self, index: usize) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("reflection-{index}"))
    }
}

impl Default for ReflectionView {
    fn default() -> Self {
        Self {
            id: None,
            text: String::new(),
            char_label: "0 characters".to_string(),
            notice: None,
            pending_save_at: None,
            notice_expires_at: None,
        }
    }
}
