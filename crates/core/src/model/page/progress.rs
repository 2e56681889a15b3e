/// Progress bar state: a proportional fill and a textual percent label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub fill_percent: u8,
    pub label: String,
}

impl ProgressView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for ProgressView {
    fn default() -> Self {
        Self {
            fill_percent: 0,
            label: "0%".to_string(),
        }
    }
}
