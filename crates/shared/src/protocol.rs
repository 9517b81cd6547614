use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AssessmentRequest, Problem, StudentProfile};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateAssessmentRequest {
    pub student_profile: StudentProfile,
    pub assessment_request: AssessmentRequest,
}

/// Result of one generation call. Display-only: nothing here is validated or
/// recomputed client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub assessment_id: String,
    pub generated_at: DateTime<Utc>,
    pub planner_output: PlannerOutput,
    pub executor_output: ExecutorOutput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerOutput {
    pub plan_id: String,
    pub reasoning_log: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_plan: Option<AssessmentPlan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentPlan {
    #[serde(default)]
    pub selected_topics: Vec<String>,
    /// Difficulty label (`easy`, `medium`, `hard`) to percentage of questions.
    #[serde(default)]
    pub difficulty_distribution: BTreeMap<String, i64>,
    #[serde(default)]
    pub num_questions: i64,
    #[serde(default)]
    pub target_total_time: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutorOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    pub problems: Vec<Problem>,
    pub total_estimated_time: i64,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}
