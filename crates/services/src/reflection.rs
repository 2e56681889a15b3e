use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use lesson_core::model::{ModuleConfig, PageView, ReflectionRecord};
use lesson_core::namespace::Namespace;
use storage::repository::Storage;

use crate::progress::ProgressService;

const AUTOSAVE_NOTICE: &str = "✓ Auto-saved";
const SAVE_NOTICE: &str = "✓ Saved!";

/// Drives free-text reflection exercises.
///
/// Keystrokes debounce into an auto-save: every input replaces the pending
/// deadline, so at most one save is ever scheduled per instance, and only the
/// most recent one fires. The host pumps `tick` from its timer loop to fire
/// due saves and expire notices.
///
/// All `now` arguments should come from the host's clock so tests can drive
/// the debounce with frozen time.
#[derive(Clone)]
pub struct ReflectionService {
    storage: Storage,
    namespace: Namespace,
    progress: Arc<ProgressService>,
    autosave_delay: Duration,
    autosave_notice: Duration,
    save_notice: Duration,
}

impl ReflectionService {
    #[must_use]
    pub fn new(
        storage: Storage,
        namespace: Namespace,
        config: &ModuleConfig,
        progress: Arc<ProgressService>,
    ) -> Self {
        Self {
            storage,
            namespace,
            progress,
            autosave_delay: config.autosave_delay(),
            autosave_notice: config.autosave_notice(),
            save_notice: config.save_notice(),
        }
    }

    /// Applies one keystroke's worth of input: replaces the text, refreshes
    /// the character count, reschedules the auto-save, and recomputes
    /// progress immediately (the save itself waits for the idle delay).
    pub async fn handle_input(
        &self,
        page: &mut PageView,
        index: usize,
        text: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        {
            let Some(reflection) = page.reflections.get_mut(index) else {
                return;
            };
            reflection.text = text.into();
            reflection.char_label = char_label(&reflection.text);
            // cancel-and-restart: the previous deadline is simply replaced
            reflection.pending_save_at = Some(now + self.autosave_delay);
        }
        self.progress.recompute(page).await;
    }

    /// Fires due auto-saves and clears expired notices.
    pub async fn tick(&self, page: &mut PageView, now: DateTime<Utc>) {
        for index in 0..page.reflections.len() {
            let due = {
                let reflection = &mut page.reflections[index];
                if reflection.notice_expires_at.is_some_and(|at| at <= now) {
                    reflection.notice = None;
                    reflection.notice_expires_at = None;
                }
                reflection.pending_save_at.is_some_and(|at| at <= now)
            };
            if due {
                self.persist(page, index, AUTOSAVE_NOTICE, self.autosave_notice, now)
                    .await;
            }
        }
    }

    /// Explicit save: bypasses the debounce, cancels any pending auto-save,
    /// and shows the longer-lived notice.
    pub async fn save(&self, page: &mut PageView, index: usize, now: DateTime<Utc>) {
        self.persist(page, index, SAVE_NOTICE, self.save_notice, now)
            .await;
    }

    async fn persist(
        &self,
        page: &mut PageView,
        index: usize,
        notice: &str,
        notice_for: Duration,
        now: DateTime<Utc>,
    ) {
        let (key, record) = {
            let Some(reflection) = page.reflections.get_mut(index) else {
                return;
            };
            reflection.pending_save_at = None;
            reflection.notice = Some(notice.to_string());
            reflection.notice_expires_at = Some(now + notice_for);

            let key = self.namespace.key(&reflection.storage_id(index));
            let record = ReflectionRecord {
                content: reflection.text.clone(),
                timestamp: now,
            };
            (key, record)
        };

        if let Err(err) = self.storage.write_json(&key, &record).await {
            tracing::warn!(key = %key, error = %err, "reflection not persisted");
        }
    }
}

/// Live character-count label, e.g. `"128 characters"`.
pub(crate) fn char_label(text: &str) -> String {
    format!("{} characters", text.chars().count())
}
