use shared::domain::{AssessmentRequest, PedagogicalStrategy, StudentLevel, StudentProfile};

use crate::error::ValidationFailure;

pub const MIN_TOTAL_TIME_MINUTES: i64 = 5;
pub const MAX_TOTAL_TIME_MINUTES: i64 = 120;

/// Operator input for one assessment generation, as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateForm {
    pub student_id: String,
    pub level: StudentLevel,
    pub learning_goals: String,
    pub mastered_topics: String,
    pub max_total_time_minutes: i64,
    pub strategy: PedagogicalStrategy,
}

impl Default for GenerateForm {
    fn default() -> Self {
        Self {
            student_id: "student123".into(),
            level: StudentLevel::Intermediate,
            learning_goals: "algebra,geometry".into(),
            mastered_topics: "basic_arithmetic".into(),
            max_total_time_minutes: 30,
            strategy: PedagogicalStrategy::Review,
        }
    }
}

impl GenerateForm {
    pub fn build(&self) -> Result<(StudentProfile, AssessmentRequest), ValidationFailure> {
        let student_id = self.student_id.trim();
        if student_id.is_empty() {
            return Err(ValidationFailure::field("student_id", "Student ID is required"));
        }
        if !(MIN_TOTAL_TIME_MINUTES..=MAX_TOTAL_TIME_MINUTES).contains(&self.max_total_time_minutes)
        {
            return Err(ValidationFailure::field(
                "max_total_time_minutes",
                format!(
                    "Max total time must be between {MIN_TOTAL_TIME_MINUTES} and {MAX_TOTAL_TIME_MINUTES} minutes"
                ),
            ));
        }

        let profile = StudentProfile {
            id: student_id.to_string(),
            current_level: self.level,
            learning_history: Vec::new(),
            learning_goals: split_topics(&self.learning_goals),
            mastered_topics: split_topics(&self.mastered_topics),
        };
        let request = AssessmentRequest {
            max_total_time_minutes: self.max_total_time_minutes,
            pedagogical_strategy: self.strategy,
        };
        Ok((profile, request))
    }
}

/// Comma-separated topics, trimmed, empties and repeats dropped, input order kept.
pub fn split_topics(raw: &str) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();
    for topic in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !topics.iter().any(|seen| seen == topic) {
            topics.push(topic.to_string());
        }
    }
    topics
}
