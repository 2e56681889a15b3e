use lesson_core::namespace::Namespace;
use storage::repository::Storage;

use crate::error::ExportError;

/// Downloadable progress document: the host offers `json` as a file named
/// `file_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    pub file_name: String,
    pub json: String,
}

/// Answer from the host's confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetConfirmation {
    Confirmed,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// Records were deleted; the host should reload the page.
    ReloadRequested,
    Declined,
}

/// Bulk export and destructive reset over the week's namespace.
///
/// Both operate purely on the key prefix and never validate record shapes.
#[derive(Clone)]
pub struct ExportService {
    storage: Storage,
    namespace: Namespace,
}

impl ExportService {
    #[must_use]
    pub fn new(storage: Storage, namespace: Namespace) -> Self {
        Self { storage, namespace }
    }

    /// Bundles every record under the namespace into one JSON document.
    ///
    /// Values that are not valid JSON are carried as raw strings rather than
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the store cannot be read or the document
    /// cannot be assembled.
    pub async fn export(&self) -> Result<ExportBundle, ExportError> {
        let keys = self
            .storage
            .kv
            .keys_with_prefix(&self.namespace.key_prefix())
            .await?;

        let mut records = serde_json::Map::new();
        for key in keys {
            let Some(raw) = self.storage.kv.get(&key).await? else {
                continue;
            };
            let value = serde_json::from_str(&raw)
                .unwrap_or_else(|_| serde_json::Value::String(raw));
            records.insert(key, value);
        }

        let json = serde_json::to_string_pretty(&serde_json::Value::Object(records))
            .map_err(|err| ExportError::Serialization(err.to_string()))?;

        Ok(ExportBundle {
            file_name: self.namespace.export_file_name(),
            json,
        })
    }

    /// Deletes every record under the namespace.
    ///
    /// Declined confirmations are a no-op. On success the host is asked to
    /// reload the page; the deletion is irreversible.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the store cannot be read or written.
    pub async fn reset(
        &self,
        confirmation: ResetConfirmation,
    ) -> Result<ResetOutcome, ExportError> {
        if confirmation == ResetConfirmation::Declined {
            return Ok(ResetOutcome::Declined);
        }

        let keys = self
            .storage
            .kv
            .keys_with_prefix(&self.namespace.key_prefix())
            .await?;
        for key in &keys {
            self.storage.kv.remove(key).await?;
        }

        Ok(ResetOutcome::ReloadRequested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::Week;

    async fn seeded_storage() -> Storage {
        let storage = Storage::in_memory();
        storage
            .kv
            .set("module_week1_progress", r#"{"percent":50}"#)
            .await
            .unwrap();
        storage
            .kv
            .set("module_week1_quiz-0", r#"{"answer":"b"}"#)
            .await
            .unwrap();
        storage
            .kv
            .set("module_week2_progress", r#"{"percent":10}"#)
            .await
            .unwrap();
        storage.kv.set("unrelated", "{}").await.unwrap();
        storage
    }

    fn service(storage: &Storage) -> ExportService {
        ExportService::new(storage.clone(), Namespace::new("module", Week::new(1)))
    }

    #[tokio::test]
    async fn export_bundles_exactly_the_namespaced_keys() {
        let storage = seeded_storage().await;

        let bundle = service(&storage).export().await.unwrap();

        assert_eq!(bundle.file_name, "module_week1_progress.json");
        let doc: serde_json::Value = serde_json::from_str(&bundle.json).unwrap();
        let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["module_week1_progress", "module_week1_quiz-0"]);
        assert_eq!(doc["module_week1_progress"]["percent"], 50);
    }

    #[tokio::test]
    async fn export_keeps_unparseable_values_as_strings() {
        let storage = Storage::in_memory();
        storage
            .kv
            .set("module_week1_reflection-0", "not json at all")
            .await
            .unwrap();

        let bundle = service(&storage).export().await.unwrap();

        let doc: serde_json::Value = serde_json::from_str(&bundle.json).unwrap();
        assert_eq!(doc["module_week1_reflection-0"], "not json at all");
    }

    #[tokio::test]
    async fn declined_reset_deletes_nothing() {
        let storage = seeded_storage().await;

        let outcome = service(&storage)
            .reset(ResetConfirmation::Declined)
            .await
            .unwrap();

        assert_eq!(outcome, ResetOutcome::Declined);
        assert!(
            storage
                .kv
                .get("module_week1_progress")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn confirmed_reset_removes_exactly_the_namespaced_keys() {
        let storage = seeded_storage().await;

        let outcome = service(&storage)
            .reset(ResetConfirmation::Confirmed)
            .await
            .unwrap();

        assert_eq!(outcome, ResetOutcome::ReloadRequested);
        assert!(
            storage
                .kv
                .keys_with_prefix("module_week1")
                .await
                .unwrap()
                .is_empty()
        );
        // other weeks and foreign keys survive
        assert!(
            storage
                .kv
                .get("module_week2_progress")
                .await
                .unwrap()
                .is_some()
        );
        assert!(storage.kv.get("unrelated").await.unwrap().is_some());
    }
}
