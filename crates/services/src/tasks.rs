use std::sync::Arc;

use lesson_core::Clock;
use lesson_core::model::{CheckState, PageView, TaskRecord};
use lesson_core::namespace::Namespace;
use storage::repository::Storage;

use crate::progress::ProgressService;

/// Drives the page-global task list.
///
/// A checklist variant: one fixed storage id for the whole page, and a
/// `completed` highlight on the task container.
#[derive(Clone)]
pub struct TaskService {
    storage: Storage,
    namespace: Namespace,
    clock: Clock,
    progress: Arc<ProgressService>,
}

impl TaskService {
    #[must_use]
    pub fn new(
        storage: Storage,
        namespace: Namespace,
        clock: Clock,
        progress: Arc<ProgressService>,
    ) -> Self {
        Self {
            storage,
            namespace,
            clock,
            progress,
        }
    }

    /// Sets one task checkbox, persists the whole list, and recomputes
    /// progress. Out-of-range indices are ignored.
    pub async fn set_checked(&self, page: &mut PageView, index: usize, checked: bool) {
        let record = {
            let Some(task) = page.tasks.get_mut(index) else {
                return;
            };
            task.checked = checked;
            task.completed = checked;

            TaskRecord {
                tasks: page
                    .tasks
                    .iter()
                    .enumerate()
                    .map(|(index, task)| CheckState {
                        index,
                        checked: task.checked,
                    })
                    .collect(),
                timestamp: self.clock.now(),
            }
        };

        let key = self.namespace.tasks_key();
        if let Err(err) = self.storage.write_json(&key, &record).await {
            tracing::warn!(key = %key, error = %err, "task state not persisted");
        }
        self.progress.recompute(page).await;
    }
}
