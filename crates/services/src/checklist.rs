use std::sync::Arc;

use lesson_core::Clock;
use lesson_core::model::{CheckState, ChecklistRecord, PageView};
use lesson_core::namespace::Namespace;
use storage::repository::Storage;

use crate::progress::ProgressService;

/// Drives checklist instances.
///
/// Every toggle rewrites the full sibling set by position, so the record
/// always mirrors the whole list.
#[derive(Clone)]
pub struct ChecklistService {
    storage: Storage,
    namespace: Namespace,
    clock: Clock,
    progress: Arc<ProgressService>,
}

impl ChecklistService {
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

    /// Sets one checkbox, syncs its container highlight, persists the whole
    /// list, and recomputes progress. Out-of-range indices are ignored.
    pub async fn set_checked(
        &self,
        page: &mut PageView,
        list: usize,
        item: usize,
        checked: bool,
    ) {
        let (key, record) = {
            let Some(checklist) = page.checklists.get_mut(list) else {
                return;
            };
            let Some(entry) = checklist.items.get_mut(item) else {
                return;
            };
            entry.checked = checked;
            entry.highlighted = checked;

            let items = checklist
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| CheckState {
                    index,
                    checked: item.checked,
                })
                .collect();
            let key = self.namespace.key(&checklist.storage_id());
            let record = ChecklistRecord {
                items,
                timestamp: self.clock.now(),
            };
            (key, record)
        };

        if let Err(err) = self.storage.write_json(&key, &record).await {
            tracing::warn!(key = %key, error = %err, "checklist state not persisted");
        }
        self.progress.recompute(page).await;
    }
}
