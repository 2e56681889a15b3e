use super::PageError;

/// Grading mark applied to an option or carried by the feedback panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMark {
    Correct,
    Incorrect,
}

/// One selectable quiz option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOption {
    pub value: String,
    pub selected: bool,
    pub mark: Option<AnswerMark>,
    /// Set once the quiz is submitted; disabled options ignore clicks.
    pub disabled: bool,
}

impl QuizOption {
    fn new(value: String) -> Self {
        Self {
            value,
            selected: false,
            mark: None,
            disabled: false,
        }
    }
}

/// Feedback panel shown after submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizFeedback {
    pub tone: AnswerMark,
    pub text: String,
}

/// One quiz instance.
///
/// Lifecycle: unanswered, then selected, then submitted. Submission is
/// terminal; every input is disabled afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizView {
    pub id: Option<String>,
    pub correct_value: String,
    pub correct_feedback: Option<String>,
    pub incorrect_feedback: Option<String>,
    pub options: Vec<QuizOption>,
    pub submit_enabled: bool,
    /// Replacement submit label, set on submission.
    pub submit_label: Option<String>,
    pub feedback: Option<QuizFeedback>,
    pub completed: bool,
}

impl QuizView {
    /// Builds an unanswered quiz.
    ///
    /// # Errors
    ///
    /// Returns `PageError::EmptyQuiz` when no options are given.
    pub fn new(
        correct_value: impl Into<String>,
        option_values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, PageError> {
        let options: Vec<QuizOption> = option_values
            .into_iter()
            .map(|value| QuizOption::new(value.into()))
            .collect();
        if options.is_empty() {
            return Err(PageError::EmptyQuiz);
        }

        Ok(Self {
            id: None,
            correct_value: correct_value.into(),
            correct_feedback: None,
            incorrect_feedback: None,
            options,
            submit_enabled: false,
            submit_label: None,
            feedback: None,
            completed: false,
        })
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the configured feedback texts shown after submission.
    #[must_use]
    pub fn with_feedback_texts(
        mut self,
        correct: impl Into<String>,
        incorrect: impl Into<String>,
    ) -> Self {
        self.correct_feedback = Some(correct.into());
        self.incorrect_feedback = Some(incorrect.into());
        self
    }

    /// Index of the currently selected option, if any.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.options.iter().position(|option| option.selected)
    }

    /// Storage identifier: the configured id, or a positional fallback.
    #[must_use]
    pub fn storage_id(&self, index: usize) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("quiz-{index}"))
    }
}
