use lesson_core::Clock;
use lesson_core::model::{ModuleConfig, PageView, ProgressSummary};
use lesson_core::namespace::Namespace;
use storage::repository::Storage;

/// Aggregated completion state of one page, useful for hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub completed: u32,
    pub total: u32,
    pub percent: u8,
}

/// Recomputes the completion percentage across every countable widget and
/// maintains the single per-week progress summary record.
///
/// Invoked by every mutating widget action and once after session restore.
#[derive(Clone)]
pub struct ProgressService {
    storage: Storage,
    namespace: Namespace,
    clock: Clock,
    reflection_min_chars: usize,
}

impl ProgressService {
    #[must_use]
    pub fn new(storage: Storage, namespace: Namespace, clock: Clock, config: &ModuleConfig) -> Self {
        Self {
            storage,
            namespace,
            clock,
            reflection_min_chars: config.reflection_min_chars(),
        }
    }

    /// Counts completed items without touching the page or the store.
    ///
    /// Three item classes count: checklist/task checkboxes (complete when
    /// checked), quizzes (complete once submitted), and reflections
    /// (complete when the trimmed text exceeds the configured threshold).
    #[must_use]
    pub fn snapshot(&self, page: &PageView) -> ProgressSnapshot {
        let mut total = 0_u32;
        let mut completed = 0_u32;

        for item in page.checklists.iter().flat_map(|list| list.items.iter()) {
            total += 1;
            if item.checked {
                completed += 1;
            }
        }
        for task in &page.tasks {
            total += 1;
            if task.checked {
                completed += 1;
            }
        }
        for quiz in &page.quizzes {
            total += 1;
            if quiz.completed {
                completed += 1;
            }
        }
        for reflection in &page.reflections {
            total += 1;
            if reflection.text.trim().chars().count() > self.reflection_min_chars {
                completed += 1;
            }
        }

        let percent = if total == 0 {
            0
        } else {
            ((f64::from(completed) * 100.0) / f64::from(total)).round() as u8
        };

        ProgressSnapshot {
            completed,
            total,
            percent,
        }
    }

    /// Recomputes completion, updates the progress bar view, and rewrites the
    /// summary record.
    ///
    /// Pages without a progress bar skip both side effects. A failed write is
    /// logged and swallowed; progress display must survive a full store.
    pub async fn recompute(&self, page: &mut PageView) -> ProgressSnapshot {
        let snapshot = self.snapshot(page);

        let Some(bar) = page.progress.as_mut() else {
            return snapshot;
        };
        bar.fill_percent = snapshot.percent;
        bar.label = format!("{}%", snapshot.percent);

        let summary = ProgressSummary {
            completed: snapshot.completed,
            total: snapshot.total,
            percent: snapshot.percent,
            last_updated: self.clock.now(),
        };
        let key = self.namespace.progress_key();
        if let Err(err) = self.storage.write_json(&key, &summary).await {
            tracing::warn!(key = %key, error = %err, "progress summary not persisted");
        }

        snapshot
    }
}
