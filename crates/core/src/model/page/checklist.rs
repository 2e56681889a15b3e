/// One checkbox inside a checklist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckItem {
    pub checked: bool,
    /// Container highlight, mirroring the checked state.
    pub highlighted: bool,
}

/// One checklist instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistView {
    pub id: Option<String>,
    pub items: Vec<CheckItem>,
}

impl ChecklistView {
    /// Builds a checklist of `item_count` unchecked items.
    #[must_use]
    pub fn new(item_count: usize) -> Self {
        Self {
            id: None,
            items: vec![CheckItem::default(); item_count],
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Storage identifier.
    ///
    /// Unconfigured checklists all fall back to the same literal, so two of
    /// them on one page overwrite each other's record. Existing stores were
    /// written against this fallback, so it stays; configure an id to avoid
    /// the collision.
    #[must_use]
    pub fn storage_id(&self) -> String {
        self.id.clone().unwrap_or_else(|| "checklist".to_string())
    }
}

/// One page-global task checkbox. Task items are a checklist variant with a
/// single fixed namespace and a `completed` highlight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskItem {
    pub checked: bool,
    pub completed: bool,
}
