use std::sync::Arc;

use serde::de::DeserializeOwned;

use lesson_core::model::{
    AssessmentRecord, ChecklistRecord, PageView, QuizResult, ReflectionRecord, TaskRecord,
};
use lesson_core::namespace::Namespace;
use storage::repository::{Storage, StorageError};

use crate::progress::ProgressService;
use crate::quiz::apply_submission;
use crate::reflection::char_label;

/// Reconciles a freshly built page with the records of an earlier session.
///
/// Runs once at startup, after the host has built its `PageView`. Each widget
/// class restores independently: a missing record leaves the instance
/// untouched, a malformed one is skipped with a warning, and nothing
/// propagates across instances. Reconciliation is idempotent. Concludes with
/// one progress recompute so the bar reflects the restored state.
#[derive(Clone)]
pub struct SessionLoader {
    storage: Storage,
    namespace: Namespace,
    progress: Arc<ProgressService>,
}

impl SessionLoader {
    #[must_use]
    pub fn new(storage: Storage, namespace: Namespace, progress: Arc<ProgressService>) -> Self {
        Self {
            storage,
            namespace,
            progress,
        }
    }

    /// Restores every widget class, then recomputes progress.
    ///
    /// # Errors
    ///
    /// Returns `SessionLoadError` only when the store itself cannot be read;
    /// malformed records never fail the restore.
    pub async fn restore(&self, page: &mut PageView) -> Result<(), crate::SessionLoadError> {
        self.restore_tasks(page).await?;
        self.restore_checklists(page).await?;
        self.restore_reflections(page).await?;
        self.restore_assessments(page).await?;
        self.restore_quizzes(page).await?;
        self.progress.recompute(page).await;
        Ok(())
    }

    async fn restore_tasks(&self, page: &mut PageView) -> Result<(), crate::SessionLoadError> {
        let Some(record) = self.load::<TaskRecord>(&self.namespace.tasks_key()).await? else {
            return Ok(());
        };
        for entry in record.tasks {
            if let Some(task) = page.tasks.get_mut(entry.index) {
                task.checked = entry.checked;
                task.completed = entry.checked;
            }
        }
        Ok(())
    }

    async fn restore_checklists(&self, page: &mut PageView) -> Result<(), crate::SessionLoadError> {
        for list in 0..page.checklists.len() {
            let key = self.namespace.key(&page.checklists[list].storage_id());
            let Some(record) = self.load::<ChecklistRecord>(&key).await? else {
                continue;
            };
            let checklist = &mut page.checklists[list];
            for entry in record.items {
                if let Some(item) = checklist.items.get_mut(entry.index) {
                    item.checked = entry.checked;
                    item.highlighted = entry.checked;
                }
            }
        }
        Ok(())
    }

    async fn restore_reflections(&self, page: &mut PageView) -> Result<(), crate::SessionLoadError> {
        for index in 0..page.reflections.len() {
            let key = self.namespace.key(&page.reflections[index].storage_id(index));
            let Some(record) = self.load::<ReflectionRecord>(&key).await? else {
                continue;
            };
            // empty stored content never overwrites the view
            if record.content.is_empty() {
                continue;
            }
            let reflection = &mut page.reflections[index];
            reflection.char_label = char_label(&record.content);
            reflection.text = record.content;
        }
        Ok(())
    }

    async fn restore_assessments(&self, page: &mut PageView) -> Result<(), crate::SessionLoadError> {
        for index in 0..page.assessments.len() {
            let key = self.namespace.key(&page.assessments[index].storage_id());
            let Some(record) = self.load::<AssessmentRecord>(&key).await? else {
                continue;
            };
            let view = &mut page.assessments[index];
            for response in record.responses {
                // null responses are skipped, not cleared
                let Some(value) = response.value else {
                    continue;
                };
                if let Some(row) = view.items.get_mut(response.index) {
                    for option in &mut row.options {
                        option.selected = option.value == value;
                    }
                }
            }
        }
        Ok(())
    }

    async fn restore_quizzes(&self, page: &mut PageView) -> Result<(), crate::SessionLoadError> {
        for index in 0..page.quizzes.len() {
            let key = self.namespace.key(&page.quizzes[index].storage_id(index));
            let Some(record) = self.load::<QuizResult>(&key).await? else {
                continue;
            };
            apply_submission(&mut page.quizzes[index], &record.answer, record.correct);
        }
        Ok(())
    }

    async fn load<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, crate::SessionLoadError> {
        match self.storage.read_json::<T>(key).await {
            Ok(record) => Ok(record),
            Err(StorageError::Serialization(err)) => {
                tracing::warn!(key = %key, error = %err, "skipping malformed record");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}
