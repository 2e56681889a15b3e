//! Headless mirror of one lesson page.
//!
//! The host builds a `PageView` from its markup, hands it to the services for
//! every user event, and renders from it afterwards. All widget state lives
//! here, including debounce deadlines and notice expiries, so services stay
//! free of interior mutability.

mod accordion;
mod assessment;
mod checklist;
mod progress;
mod quiz;
mod reflection;

use thiserror::Error;

pub use accordion::AccordionView;
pub use assessment::{AssessmentView, RatingItem, RatingOption};
pub use checklist::{CheckItem, ChecklistView, TaskItem};
pub use progress::ProgressView;
pub use quiz::{AnswerMark, QuizFeedback, QuizOption, QuizView};
pub use reflection::ReflectionView;

/// Why a widget view could not be constructed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PageError {
    #[error("quiz has no options")]
    EmptyQuiz,

    #[error("rating item has no options")]
    EmptyRatingItem,
}

/// Every interactive instance on one page, in markup order.
///
/// Position within each vector is the correlation key to persisted records,
/// so element order must match the markup the records were saved against.
/// Instances with a configured id are immune to reordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageView {
    pub progress: Option<ProgressView>,
    pub quizzes: Vec<QuizView>,
    pub reflections: Vec<ReflectionView>,
    pub checklists: Vec<ChecklistView>,
    pub tasks: Vec<TaskItem>,
    pub assessments: Vec<AssessmentView>,
    pub accordions: Vec<AccordionView>,
}

impl PageView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
