//! Persisted record shapes.
//!
//! Field names are the storage wire contract: records written by an earlier
//! session must deserialize in later ones, so renames here are breaking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Single per-week summary rewritten after every interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub completed: u32,
    pub total: u32,
    pub percent: u8,
    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,
}

/// Terminal result of one quiz instance, written once on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub answer: String,
    pub correct: bool,
    pub timestamp: DateTime<Utc>,
}

/// Free-text reflection content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectionRecord {
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Positional checked-state of one checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckState {
    pub index: usize,
    pub checked: bool,
}

/// Full sibling set of one checklist, rewritten on every toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistRecord {
    pub items: Vec<CheckState>,
    pub timestamp: DateTime<Utc>,
}

/// Page-global task list, rewritten on every toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub tasks: Vec<CheckState>,
    pub timestamp: DateTime<Utc>,
}

/// One rating item's response; unanswered items persist as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingResponse {
    pub index: usize,
    pub value: Option<String>,
}

/// All rating responses of one self-assessment instance, by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub responses: Vec<RatingResponse>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn progress_summary_uses_camel_case_last_updated() {
        let summary = ProgressSummary {
            completed: 3,
            total: 4,
            percent: 75,
            last_updated: fixed_now(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["percent"], 75);
        assert!(json.get("lastUpdated").is_some());
        assert!(json.get("last_updated").is_none());
    }

    #[test]
    fn unanswered_rating_serializes_as_null() {
        let record = AssessmentRecord {
            responses: vec![
                RatingResponse {
                    index: 0,
                    value: Some("4".to_string()),
                },
                RatingResponse {
                    index: 1,
                    value: None,
                },
            ],
            timestamp: fixed_now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["responses"][0]["value"], "4");
        assert!(json["responses"][1]["value"].is_null());
    }

    #[test]
    fn checklist_record_round_trips() {
        let record = ChecklistRecord {
            items: vec![
                CheckState {
                    index: 0,
                    checked: true,
                },
                CheckState {
                    index: 1,
                    checked: false,
                },
            ],
            timestamp: fixed_now(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: ChecklistRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn quiz_result_round_trips() {
        let record = QuizResult {
            answer: "b".to_string(),
            correct: false,
            timestamp: fixed_now(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: QuizResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
