use super::PageError;

/// One selectable rating option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingOption {
    pub value: String,
    pub selected: bool,
}

/// One rating row: mutually exclusive options, independent of sibling rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingItem {
    pub options: Vec<RatingOption>,
}

impl RatingItem {
    /// Builds a rating row from its option values.
    ///
    /// # Errors
    ///
    /// Returns `PageError::EmptyRatingItem` when no options are given.
    pub fn new(
        option_values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, PageError> {
        let options: Vec<RatingOption> = option_values
            .into_iter()
            .map(|value| RatingOption {
                value: value.into(),
                selected: false,
            })
            .collect();
        if options.is_empty() {
            return Err(PageError::EmptyRatingItem);
        }
        Ok(Self { options })
    }

    /// Value of the selected option, if any.
    #[must_use]
    pub fn selected_value(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.selected)
            .map(|option| option.value.as_str())
    }
}

/// One self-assessment instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentView {
    pub id: Option<String>,
    pub items: Vec<RatingItem>,
}

impl AssessmentView {
    #[must_use]
    pub fn new(items: Vec<RatingItem>) -> Self {
        Self { id: None, items }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Storage identifier; unconfigured instances share the same fallback
    /// literal, like checklists do.
    #[must_use]
    pub fn storage_id(&self) -> String {
        self.id.clone().unwrap_or_else(|| "assessment".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale_row() -> RatingItem {
        RatingItem::new(["1", "2", "3", "4", "5"]).unwrap()
    }

    #[test]
    fn rating_item_requires_options() {
        let err = RatingItem::new(Vec::<String>::new()).unwrap_err();
        assert_eq!(err, PageError::EmptyRatingItem);
    }

    #[test]
    fn fresh_item_has_no_selection() {
        assert_eq!(scale_row().selected_value(), None);
    }

    #[test]
    fn assessment_falls_back_to_shared_id() {
        let assessment = AssessmentView::new(vec![scale_row()]);
        assert_eq!(assessment.storage_id(), "assessment");
    }
}
