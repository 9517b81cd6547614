use thiserror::Error;

/// Failures of the remote catalog/assessment service. `Display` is the text
/// shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("{message}")]
    Network { message: String },
    #[error("{message}")]
    Service { status: u16, message: String },
    #[error("{message}")]
    Validation { message: String },
    #[error("{message}")]
    NotFound { message: String },
}

impl CatalogError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { .. } => None,
            Self::Service { status, .. } => Some(*status),
            Self::Validation { .. } => None,
            Self::NotFound { .. } => Some(404),
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(value: reqwest::Error) -> Self {
        Self::network(value.to_string())
    }
}

/// A local field check that blocked a request before it was sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationFailure {
    pub field: Option<&'static str>,
    pub message: String,
}

impl ValidationFailure {
    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("problem editor is not open for editing")]
    NotEditable,
    #[error("problem id cannot be changed while editing an existing problem")]
    IdLocked,
    #[error(transparent)]
    Invalid(#[from] ValidationFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    #[error("another request is already in progress")]
    Busy,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error("page {page} is outside 1..={total_pages}")]
    PageOutOfRange { page: usize, total_pages: usize },
    #[error("no delete is awaiting confirmation")]
    NoPendingDelete,
}
