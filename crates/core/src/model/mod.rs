mod config;
pub mod page;
mod records;

pub use config::{ConfigError, ModuleConfig, ModuleConfigDraft};
pub use page::{
    AccordionView, AnswerMark, AssessmentView, CheckItem, ChecklistView, PageError, PageView,
    ProgressView, QuizFeedback, QuizOption, QuizView, RatingItem, RatingOption, ReflectionView,
    TaskItem,
};
pub use records::{
    AssessmentRecord, CheckState, ChecklistRecord, ProgressSummary, QuizResult, RatingResponse,
    ReflectionRecord, TaskRecord,
};
