use std::sync::Arc;

use lesson_core::Clock;
use lesson_core::model::{AssessmentRecord, PageView, RatingResponse};
use lesson_core::namespace::Namespace;
use storage::repository::Storage;

use crate::progress::ProgressService;

/// Drives self-assessment instances.
///
/// Each rating row has radio semantics of its own: selecting an option
/// deselects its row siblings only. Every selection rewrites the full
/// response list, with unanswered rows persisted as `null`.
#[derive(Clone)]
pub struct AssessmentService {
    storage: Storage,
    namespace: Namespace,
    clock: Clock,
    progress: Arc<ProgressService>,
}

impl AssessmentService {
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

    /// Selects one rating option within one row and persists the instance's
    /// responses. Out-of-range indices are ignored.
    pub async fn select_rating(
        &self,
        page: &mut PageView,
        assessment: usize,
        item: usize,
        option: usize,
    ) {
        let (key, record) = {
            let Some(view) = page.assessments.get_mut(assessment) else {
                return;
            };
            {
                let Some(row) = view.items.get_mut(item) else {
                    return;
                };
                if option >= row.options.len() {
                    return;
                }
                for (index, opt) in row.options.iter_mut().enumerate() {
                    opt.selected = index == option;
                }
            }

            let responses = view
                .items
                .iter()
                .enumerate()
                .map(|(index, row)| RatingResponse {
                    index,
                    value: row.selected_value().map(str::to_string),
                })
                .collect();
            let key = self.namespace.key(&view.storage_id());
            let record = AssessmentRecord {
                responses,
                timestamp: self.clock.now(),
            };
            (key, record)
        };

        if let Err(err) = self.storage.write_json(&key, &record).await {
            tracing::warn!(key = %key, error = %err, "assessment responses not persisted");
        }
        self.progress.recompute(page).await;
    }
}
