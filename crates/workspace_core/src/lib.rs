pub mod catalog;
pub mod config;
pub mod controller;
pub mod editor;
pub mod error;
pub mod generate_form;
pub mod notifications;
pub mod paginator;
pub mod telemetry;

pub use catalog::{CatalogClient, HttpCatalogClient};
pub use config::{load_settings, WorkspaceSettings};
pub use controller::{ActiveTab, WorkspaceController, WorkspaceSnapshot};
pub use editor::{DraftField, EditorMode, EditorState, ProblemEditor, Submission};
pub use error::{CatalogError, EditorError, ValidationFailure, WorkspaceError};
pub use generate_form::GenerateForm;
pub use paginator::{PageControl, PageWindow, Pagination};
