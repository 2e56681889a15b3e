use std::sync::Arc;

use lesson_core::Clock;
use lesson_core::model::{AnswerMark, PageView, QuizFeedback, QuizResult, QuizView};
use lesson_core::namespace::Namespace;
use storage::repository::Storage;

use crate::progress::ProgressService;

const DEFAULT_CORRECT_FEEDBACK: &str = "Correct! Well done.";
const DEFAULT_INCORRECT_FEEDBACK: &str = "Not quite. Review the material and try again.";
const SUBMIT_LABEL_CORRECT: &str = "✓ Completed";
const SUBMIT_LABEL_INCORRECT: &str = "Review Answer";

/// Drives quiz instances through select and submit.
///
/// Submission is terminal: the result record is written once and the widget
/// accepts no further input.
#[derive(Clone)]
pub struct QuizService {
    storage: Storage,
    namespace: Namespace,
    clock: Clock,
    progress: Arc<ProgressService>,
}

impl QuizService {
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

    /// Selects one option, deselecting its siblings and arming the submit
    /// control. Ignored for completed quizzes and out-of-range indices.
    pub fn select_option(&self, page: &mut PageView, quiz: usize, option: usize) {
        let Some(quiz) = page.quizzes.get_mut(quiz) else {
            return;
        };
        if quiz.completed || option >= quiz.options.len() {
            return;
        }

        for (index, opt) in quiz.options.iter_mut().enumerate() {
            opt.selected = index == option;
        }
        quiz.submit_enabled = true;
    }

    /// Grades the selected option and locks the quiz.
    ///
    /// A quiz with no selection, an already-completed quiz, and an
    /// out-of-range index are all no-ops.
    pub async fn submit(&self, page: &mut PageView, index: usize) {
        let (key, record) = {
            let Some(quiz) = page.quizzes.get_mut(index) else {
                return;
            };
            if quiz.completed {
                return;
            }
            let Some(selected) = quiz.selected_index() else {
                return;
            };

            let answer = quiz.options[selected].value.clone();
            let correct = answer == quiz.correct_value;
            apply_submission(quiz, &answer, correct);

            let key = self.namespace.key(&quiz.storage_id(index));
            let record = QuizResult {
                answer,
                correct,
                timestamp: self.clock.now(),
            };
            (key, record)
        };

        if let Err(err) = self.storage.write_json(&key, &record).await {
            tracing::warn!(key = %key, error = %err, "quiz result not persisted");
        }
        self.progress.recompute(page).await;
    }
}

/// Applies the terminal submitted state to a quiz view.
///
/// Shared by submission and session restore so a reloaded page renders
/// exactly what the submit interaction produced: selection, grading marks,
/// disabled inputs, feedback panel, and the relabeled submit control.
pub(crate) fn apply_submission(quiz: &mut QuizView, answer: &str, correct: bool) {
    let correct_value = quiz.correct_value.clone();
    for option in &mut quiz.options {
        option.selected = option.value == answer;
        option.mark = if option.value == correct_value {
            Some(AnswerMark::Correct)
        } else if option.value == answer && !correct {
            Some(AnswerMark::Incorrect)
        } else {
            None
        };
        option.disabled = true;
    }

    let text = if correct {
        format!(
            "✓ Correct! {}",
            quiz.correct_feedback
                .as_deref()
                .unwrap_or(DEFAULT_CORRECT_FEEDBACK)
        )
    } else {
        format!(
            "✗ Not quite. {}",
            quiz.incorrect_feedback
                .as_deref()
                .unwrap_or(DEFAULT_INCORRECT_FEEDBACK)
        )
    };
    quiz.feedback = Some(QuizFeedback {
        tone: if correct {
            AnswerMark::Correct
        } else {
            AnswerMark::Incorrect
        },
        text,
    });

    quiz.completed = true;
    quiz.submit_enabled = false;
    quiz.submit_label = Some(
        if correct {
            SUBMIT_LABEL_CORRECT
        } else {
            SUBMIT_LABEL_INCORRECT
        }
        .to_string(),
    );
}
