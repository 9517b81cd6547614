use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use shared::{
    domain::Problem,
    error::ErrorBody,
    protocol::{Assessment, ExecutorOutput, GenerateAssessmentRequest, PlannerOutput},
};
use tokio::{net::TcpListener, sync::Mutex};
use workspace_core::{telemetry, WorkspaceSettings};

/// In-memory stand-in for the assessment service.
#[derive(Clone, Default)]
pub struct FixtureService {
    pub problems: Arc<Mutex<Vec<Problem>>>,
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

async fn list(State(service): State<FixtureService>) -> Json<Vec<Problem>> {
    Json(service.problems.lock().await.clone())
}

async fn create(State(service): State<FixtureService>, Json(problem): Json<Problem>) -> Response {
    let mut problems = service.problems.lock().await;
    if problems.iter().any(|p| p.id == problem.id) {
        return detail(StatusCode::BAD_REQUEST, "Problem with this id already exists");
    }
    problems.push(problem.clone());
    (StatusCode::CREATED, Json(problem)).into_response()
}

async fn update(
    State(service): State<FixtureService>,
    Path(id): Path<String>,
    Json(problem): Json<Problem>,
) -> Response {
    let mut problems = service.problems.lock().await;
    match problems.iter_mut().find(|p| p.id == id) {
        Some(existing) => {
            *existing = problem.clone();
            Json(problem).into_response()
        }
        None => detail(StatusCode::NOT_FOUND, "Problem not found"),
    }
}

async fn remove(State(service): State<FixtureService>, Path(id): Path<String>) -> Response {
    let mut problems = service.problems.lock().await;
    let before = problems.len();
    problems.retain(|p| p.id != id);
    if problems.len() == before {
        return detail(StatusCode::NOT_FOUND, "Problem not found");
    }
    StatusCode::NO_CONTENT.into_response()
}

/// Picks every problem whose topic is a learning goal, within the time budget.
async fn generate(
    State(service): State<FixtureService>,
    Json(payload): Json<GenerateAssessmentRequest>,
) -> Response {
    let budget = payload.assessment_request.max_total_time_minutes;
    let mut total = 0;
    let mut selected = Vec::new();
    for problem in service.problems.lock().await.iter() {
        if payload
            .student_profile
            .learning_goals
            .contains(&problem.topic)
            && total + problem.estimated_time_minutes <= budget
        {
            total += problem.estimated_time_minutes;
            selected.push(problem.clone());
        }
    }

    if selected.is_empty() {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "no eligible problems");
    }

    let plan_id = uuid::Uuid::new_v4().to_string();
    Json(Assessment {
        assessment_id: uuid::Uuid::new_v4().to_string(),
        generated_at: chrono::Utc::now(),
        planner_output: PlannerOutput {
            plan_id: plan_id.clone(),
            reasoning_log: format!(
                "strategy {} over {:?}",
                payload.assessment_request.pedagogical_strategy,
                payload.student_profile.learning_goals
            ),
            assessment_plan: None,
        },
        executor_output: ExecutorOutput {
            assessment_id: None,
            plan_id: Some(plan_id),
            problems: selected,
            total_estimated_time: total,
            metadata: Default::default(),
        },
    })
    .into_response()
}

pub async fn spawn_service() -> (WorkspaceSettings, FixtureService) {
    telemetry::init_tracing("workspace_core=debug");

    let service = FixtureService::default();
    let app = Router::new()
        .route("/api/problems", get(list).post(create))
        .route("/api/problems/:id", put(update).delete(remove))
        .route("/api/assessments/generate", post(generate))
        .with_state(service.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    let settings = WorkspaceSettings::with_base_url(&format!("http://{addr}/")).expect("settings");
    (settings, service)
}

pub fn problem(id: &str, topic: &str, minutes: i64) -> Problem {
    Problem {
        id: id.into(),
        text: format!("question {id}"),
        topic: topic.into(),
        difficulty: 3,
        estimated_time_minutes: minutes,
    }
}
