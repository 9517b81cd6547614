use std::fmt;

use serde::{Deserialize, Serialize};

pub const MIN_DIFFICULTY: i64 = 1;
pub const MAX_DIFFICULTY: i64 = 5;
pub const MIN_ESTIMATED_MINUTES: i64 = 1;
pub const MAX_ESTIMATED_MINUTES: i64 = 120;

/// A practice problem as stored by the catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub text: String,
    pub topic: String,
    pub difficulty: i64,
    #[serde(rename = "estimated_time_to_solve_minutes")]
    pub estimated_time_minutes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PedagogicalStrategy {
    #[default]
    Review,
    NewTopicIntroduction,
    Challenge,
}

impl fmt::Display for PedagogicalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Review => "REVIEW",
            Self::NewTopicIntroduction => "NEW_TOPIC_INTRODUCTION",
            Self::Challenge => "CHALLENGE",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: String,
    pub current_level: StudentLevel,
    /// Always sent empty; the workspace does not track history.
    #[serde(default)]
    pub learning_history: Vec<serde_json::Value>,
    #[serde(default)]
    pub learning_goals: Vec<String>,
    #[serde(default)]
    pub mastered_topics: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub max_total_time_minutes: i64,
    pub pedagogical_strategy: PedagogicalStrategy,
}
