//! Workspace controller: canonical problem collection, assessment result,
//! notifications, and the single in-flight request gate.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use shared::{domain::Problem, protocol::Assessment};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    catalog::CatalogClient,
    editor::{validate_draft, DraftField, EditorState, ProblemEditor, Submission},
    error::{CatalogError, EditorError, ValidationFailure, WorkspaceError},
    generate_form::GenerateForm,
    notifications::{Notifications, SUCCESS_NOTIFICATION_TTL},
    paginator::{PageControl, PageWindow, Pagination},
};

const CREATED_MESSAGE: &str = "Problem created successfully!";
const UPDATED_MESSAGE: &str = "Problem updated successfully!";
const DELETED_MESSAGE: &str = "Problem deleted successfully!";
const GENERATED_MESSAGE: &str = "Assessment generated successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTab {
    #[default]
    Generate,
    Manage,
}

#[derive(Debug, Default)]
struct WorkspaceState {
    problems: Vec<Problem>,
    pagination: Pagination,
    tab: ActiveTab,
    assessment: Option<Assessment>,
    notifications: Notifications,
    editor: ProblemEditor,
    pending_delete: Option<String>,
}

/// Read model for a view layer.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceSnapshot {
    pub tab: ActiveTab,
    pub loading: bool,
    pub problems: Vec<Problem>,
    pub page: PageWindow,
    pub page_rows: Vec<Problem>,
    pub page_controls: Vec<PageControl>,
    pub editor: EditorState,
    pub editor_validation: Option<ValidationFailure>,
    pub assessment: Option<Assessment>,
    pub error: Option<String>,
    pub success: Option<String>,
    pub pending_delete: Option<String>,
}

struct LoadingGate<'a> {
    flag: &'a AtomicBool,
}

impl Drop for LoadingGate<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

pub struct WorkspaceController {
    catalog: Arc<dyn CatalogClient>,
    state: Arc<Mutex<WorkspaceState>>,
    loading: AtomicBool,
}

impl WorkspaceController {
    pub fn new(catalog: Arc<dyn CatalogClient>) -> Self {
        Self::with_pagination(catalog, Pagination::default())
    }

    pub fn with_pagination(catalog: Arc<dyn CatalogClient>, pagination: Pagination) -> Self {
        Self {
            catalog,
            state: Arc::new(Mutex::new(WorkspaceState {
                pagination,
                ..WorkspaceState::default()
            })),
            loading: AtomicBool::new(false),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub async fn snapshot(&self) -> WorkspaceSnapshot {
        let guard = self.state.lock().await;
        let page = guard.pagination.window(guard.problems.len());
        WorkspaceSnapshot {
            tab: guard.tab,
            loading: self.is_loading(),
            problems: guard.problems.clone(),
            page,
            page_rows: page.slice(&guard.problems).to_vec(),
            page_controls: page.controls(),
            editor: guard.editor.state().clone(),
            editor_validation: guard.editor.validation().cloned(),
            assessment: guard.assessment.clone(),
            error: guard.notifications.error().map(str::to_string),
            success: guard.notifications.success().map(str::to_string),
            pending_delete: guard.pending_delete.clone(),
        }
    }

    pub async fn problems(&self) -> Vec<Problem> {
        self.state.lock().await.problems.clone()
    }

    fn acquire(&self, operation: &'static str) -> Result<LoadingGate<'_>, WorkspaceError> {
        self.loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                debug!(operation, "rejected while another request is in flight");
                WorkspaceError::Busy
            })?;
        Ok(LoadingGate {
            flag: &self.loading,
        })
    }

    async fn show_error(&self, err: &CatalogError) {
        self.state
            .lock()
            .await
            .notifications
            .set_error(err.to_string());
    }

    async fn show_success(&self, message: &str) {
        let mut guard = self.state.lock().await;
        let seq = guard.notifications.set_success(message);
        let state = Arc::downgrade(&self.state);
        guard
            .notifications
            .schedule_expiry(SUCCESS_NOTIFICATION_TTL, async move {
                if let Some(state) = state.upgrade() {
                    state.lock().await.notifications.expire_success(seq);
                }
            });
    }

    pub async fn dismiss_error(&self) {
        self.state.lock().await.notifications.dismiss_error();
    }

    pub async fn dismiss_success(&self) {
        self.state.lock().await.notifications.dismiss_success();
    }

    /// Replaces the collection wholesale and returns to page 1. On failure the
    /// previous collection stays visible. A successful load clears any error
    /// left over from an earlier attempt.
    pub async fn load_problems(&self) -> Result<(), WorkspaceError> {
        let _gate = self.acquire("load_problems")?;
        self.refresh_collection().await?;
        self.state.lock().await.notifications.dismiss_error();
        Ok(())
    }

    async fn refresh_collection(&self) -> Result<(), WorkspaceError> {
        match self.catalog.list_problems().await {
            Ok(problems) => {
                let mut guard = self.state.lock().await;
                debug!(count = problems.len(), "problem collection replaced");
                guard.problems = problems;
                guard.pagination.reset();
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to load problems");
                self.show_error(&err).await;
                Err(err.into())
            }
        }
    }

    /// Re-fetch after a successful write. A failure here is already on the
    /// error notification and does not undo the write.
    async fn resync_after_write(&self) {
        if let Err(err) = self.refresh_collection().await {
            warn!(error = %err, "re-sync after write failed");
        }
    }

    async fn perform_write(&self, submission: &Submission) -> Result<(), WorkspaceError> {
        let result = match submission {
            Submission::Create(problem) => self
                .catalog
                .create_problem(problem)
                .await
                .map(|_| CREATED_MESSAGE),
            Submission::Update { id, problem } => self
                .catalog
                .update_problem(id, problem)
                .await
                .map(|_| UPDATED_MESSAGE),
        };

        match result {
            Ok(message) => {
                info!(problem_id = %submission.problem().id, "problem saved");
                self.show_success(message).await;
                Ok(())
            }
            Err(err) => {
                warn!(problem_id = %submission.problem().id, error = %err, "problem save failed");
                self.show_error(&err).await;
                Err(err.into())
            }
        }
    }

    pub async fn submit_create(&self, draft: Problem) -> Result<(), WorkspaceError> {
        validate_draft(&draft, true)?;
        let _gate = self.acquire("submit_create")?;
        self.perform_write(&Submission::Create(draft)).await?;
        self.resync_after_write().await;
        Ok(())
    }

    pub async fn submit_update(&self, draft: Problem) -> Result<(), WorkspaceError> {
        validate_draft(&draft, false)?;
        let _gate = self.acquire("submit_update")?;
        let submission = Submission::Update {
            id: draft.id.clone(),
            problem: draft,
        };
        self.perform_write(&submission).await?;
        self.resync_after_write().await;
        Ok(())
    }

    /// Submits the open editor draft. Local validation failures stay on the
    /// editor and never reach the network; a failed write leaves the editor
    /// open with the draft intact.
    pub async fn submit_editor(&self) -> Result<(), WorkspaceError> {
        let _gate = self.acquire("submit_editor")?;
        let submission = self.state.lock().await.editor.prepare_submission()?;

        self.perform_write(&submission).await?;
        {
            let mut guard = self.state.lock().await;
            if guard.editor.draft() == Some(submission.problem()) {
                guard.editor.complete_submission();
            }
        }
        self.resync_after_write().await;
        Ok(())
    }

    pub async fn open_create(&self) {
        self.state.lock().await.editor.open_create();
    }

    pub async fn open_edit(&self, problem: &Problem) {
        self.state.lock().await.editor.open_edit(problem);
    }

    pub async fn open_view(&self, problem: &Problem) {
        self.state.lock().await.editor.open_view(problem);
    }

    pub async fn request_edit_from_view(&self) -> bool {
        self.state.lock().await.editor.request_edit_from_view()
    }

    pub async fn edit_field(&self, field: DraftField) -> Result<(), EditorError> {
        self.state.lock().await.editor.edit_field(field)
    }

    pub async fn close_editor(&self) {
        self.state.lock().await.editor.close();
    }

    /// First half of the destructive-action gate; nothing is sent yet.
    pub async fn request_delete(&self, id: impl Into<String>) {
        let id = id.into();
        debug!(problem_id = %id, "delete awaiting confirmation");
        self.state.lock().await.pending_delete = Some(id);
    }

    pub async fn cancel_delete(&self) {
        self.state.lock().await.pending_delete = None;
    }

    pub async fn confirm_delete(&self) -> Result<(), WorkspaceError> {
        let _gate = self.acquire("confirm_delete")?;
        let id = self
            .state
            .lock()
            .await
            .pending_delete
            .take()
            .ok_or(WorkspaceError::NoPendingDelete)?;

        match self.catalog.delete_problem(&id).await {
            Ok(()) => {
                info!(problem_id = %id, "problem deleted");
                self.show_success(DELETED_MESSAGE).await;
                self.resync_after_write().await;
                Ok(())
            }
            Err(err) => {
                warn!(problem_id = %id, error = %err, "problem delete failed");
                self.show_error(&err).await;
                Err(err.into())
            }
        }
    }

    /// Builds the payload from `form` and requests a new assessment. A
    /// failure keeps whatever assessment was already displayed.
    pub async fn generate(&self, form: &GenerateForm) -> Result<(), WorkspaceError> {
        let _gate = self.acquire("generate")?;
        let (profile, request) = match form.build() {
            Ok(parts) => parts,
            Err(failure) => {
                self.state
                    .lock()
                    .await
                    .notifications
                    .set_error(failure.message.clone());
                return Err(failure.into());
            }
        };

        match self.catalog.generate_assessment(&profile, &request).await {
            Ok(assessment) => {
                info!(
                    assessment_id = %assessment.assessment_id,
                    problems = assessment.executor_output.problems.len(),
                    "assessment generated"
                );
                self.state.lock().await.assessment = Some(assessment);
                self.show_success(GENERATED_MESSAGE).await;
                Ok(())
            }
            Err(err) => {
                warn!(student_id = %profile.id, error = %err, "assessment generation failed");
                self.show_error(&err).await;
                Err(err.into())
            }
        }
    }

    /// Entering the manage tab reloads the collection. Does not cancel any
    /// request already in flight; if one is, the reload is skipped.
    pub async fn switch_tab(&self, tab: ActiveTab) -> Result<(), WorkspaceError> {
        let previous = std::mem::replace(&mut self.state.lock().await.tab, tab);
        if tab != ActiveTab::Manage || previous == ActiveTab::Manage {
            return Ok(());
        }

        match self.load_problems().await {
            Err(WorkspaceError::Busy) => {
                debug!("manage tab reload skipped, request already in flight");
                Ok(())
            }
            other => other,
        }
    }

    pub async fn go_to_page(&self, page: usize) -> Result<(), WorkspaceError> {
        let mut guard = self.state.lock().await;
        let total_pages = guard.pagination.window(guard.problems.len()).total_pages;
        if page < 1 || page > total_pages {
            return Err(WorkspaceError::PageOutOfRange { page, total_pages });
        }
        guard.pagination.go_to(page);
        Ok(())
    }

    pub async fn next_page(&self) -> bool {
        let mut guard = self.state.lock().await;
        let total = guard.problems.len();
        guard.pagination.next(total)
    }

    pub async fn prev_page(&self) -> bool {
        self.state.lock().await.pagination.prev()
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
