/// Collapsible content section. Not persisted and invisible to progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccordionView {
    pub open: bool,
}

impl AccordionView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
