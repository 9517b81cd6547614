//! Create/edit/view lifecycle of the problem editor and its draft buffer.

use shared::domain::{
    Problem, MAX_DIFFICULTY, MAX_ESTIMATED_MINUTES, MIN_DIFFICULTY, MIN_ESTIMATED_MINUTES,
};

use crate::{
    catalog::is_dot_segment,
    error::{EditorError, ValidationFailure},
};

pub const DEFAULT_DIFFICULTY: i64 = 3;
pub const DEFAULT_ESTIMATED_MINUTES: i64 = 5;

pub fn default_draft() -> Problem {
    Problem {
        id: String::new(),
        text: String::new(),
        topic: String::new(),
        difficulty: DEFAULT_DIFFICULTY,
        estimated_time_minutes: DEFAULT_ESTIMATED_MINUTES,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    Id(String),
    Text(String),
    Topic(String),
    Difficulty(i64),
    EstimatedTimeMinutes(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit,
    View,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Closed,
    Creating {
        draft: Problem,
    },
    /// The draft id is locked to the problem being edited.
    Editing {
        draft: Problem,
    },
    Viewing {
        problem: Problem,
    },
}

/// A validated write, ready for the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(Problem),
    Update { id: String, problem: Problem },
}

impl Submission {
    pub fn problem(&self) -> &Problem {
        match self {
            Self::Create(problem) => problem,
            Self::Update { problem, .. } => problem,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProblemEditor {
    state: EditorState,
    validation: Option<ValidationFailure>,
}

impl ProblemEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn mode(&self) -> Option<EditorMode> {
        match self.state {
            EditorState::Closed => None,
            EditorState::Creating { .. } => Some(EditorMode::Create),
            EditorState::Editing { .. } => Some(EditorMode::Edit),
            EditorState::Viewing { .. } => Some(EditorMode::View),
        }
    }

    pub fn is_open(&self) -> bool {
        self.mode().is_some()
    }

    pub fn draft(&self) -> Option<&Problem> {
        match &self.state {
            EditorState::Creating { draft } | EditorState::Editing { draft } => Some(draft),
            _ => None,
        }
    }

    pub fn viewed(&self) -> Option<&Problem> {
        match &self.state {
            EditorState::Viewing { problem } => Some(problem),
            _ => None,
        }
    }

    /// Last local check that blocked a submit, until the next edit/open/close.
    pub fn validation(&self) -> Option<&ValidationFailure> {
        self.validation.as_ref()
    }

    pub fn open_create(&mut self) {
        self.transition(EditorState::Creating {
            draft: default_draft(),
        });
    }

    pub fn open_edit(&mut self, problem: &Problem) {
        self.transition(EditorState::Editing {
            draft: problem.clone(),
        });
    }

    pub fn open_view(&mut self, problem: &Problem) {
        self.transition(EditorState::Viewing {
            problem: problem.clone(),
        });
    }

    /// Pivot from inspecting to editing the same problem. No-op outside view.
    pub fn request_edit_from_view(&mut self) -> bool {
        let EditorState::Viewing { problem } = &self.state else {
            return false;
        };
        let draft = problem.clone();
        self.transition(EditorState::Editing { draft });
        true
    }

    pub fn close(&mut self) {
        self.transition(EditorState::Closed);
    }

    pub fn edit_field(&mut self, field: DraftField) -> Result<(), EditorError> {
        let (draft, id_locked) = match &mut self.state {
            EditorState::Creating { draft } => (draft, false),
            EditorState::Editing { draft } => (draft, true),
            EditorState::Closed | EditorState::Viewing { .. } => {
                return Err(EditorError::NotEditable)
            }
        };

        match field {
            DraftField::Id(_) if id_locked => return Err(EditorError::IdLocked),
            DraftField::Id(value) => draft.id = value,
            DraftField::Text(value) => draft.text = value,
            DraftField::Topic(value) => draft.topic = value,
            DraftField::Difficulty(value) => draft.difficulty = value,
            DraftField::EstimatedTimeMinutes(value) => draft.estimated_time_minutes = value,
        }
        self.validation = None;
        Ok(())
    }

    /// Validates the draft and builds the write it stands for. The draft is
    /// left exactly as it was whether or not validation passes.
    pub fn prepare_submission(&mut self) -> Result<Submission, EditorError> {
        let submission = match &self.state {
            EditorState::Creating { draft } => {
                validate_draft(draft, true).map(|()| Submission::Create(draft.clone()))
            }
            EditorState::Editing { draft } => {
                validate_draft(draft, false).map(|()| Submission::Update {
                    id: draft.id.clone(),
                    problem: draft.clone(),
                })
            }
            EditorState::Closed | EditorState::Viewing { .. } => {
                return Err(EditorError::NotEditable)
            }
        };

        match submission {
            Ok(submission) => {
                self.validation = None;
                Ok(submission)
            }
            Err(failure) => {
                self.validation = Some(failure.clone());
                Err(EditorError::Invalid(failure))
            }
        }
    }

    /// Closes the editor once the catalog accepted the submission.
    pub fn complete_submission(&mut self) {
        self.close();
    }

    fn transition(&mut self, next: EditorState) {
        self.state = next;
        self.validation = None;
    }
}

pub fn validate_draft(draft: &Problem, check_id: bool) -> Result<(), ValidationFailure> {
    if check_id && draft.id.trim().is_empty() {
        return Err(ValidationFailure::field("id", "Problem ID is required"));
    }
    if check_id && is_dot_segment(&draft.id) {
        return Err(ValidationFailure::field("id", "Problem ID cannot be '.' or '..'"));
    }
    if draft.text.trim().is_empty() {
        return Err(ValidationFailure::field("text", "Question text is required"));
    }
    if draft.topic.trim().is_empty() {
        return Err(ValidationFailure::field("topic", "Topic is required"));
    }
    if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&draft.difficulty) {
        return Err(ValidationFailure::field(
            "difficulty",
            format!("Difficulty must be between {MIN_DIFFICULTY} and {MAX_DIFFICULTY}"),
        ));
    }
    if !(MIN_ESTIMATED_MINUTES..=MAX_ESTIMATED_MINUTES).contains(&draft.estimated_time_minutes) {
        return Err(ValidationFailure::field(
            "estimated_time_to_solve_minutes",
            format!(
                "Estimated time must be between {MIN_ESTIMATED_MINUTES} and {MAX_ESTIMATED_MINUTES} minutes"
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/editor_tests.rs"]
mod tests;
