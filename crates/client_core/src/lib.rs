//! Client side of the project/task admin console: the backend service seam,
//! the `AdminPanel` view-model and the project list derivations.

pub mod config;
pub mod draft;
pub mod error;
mod panel;
pub mod project_list;
pub mod service;

pub use config::{load_settings, Settings};
pub use draft::{DraftFieldError, ProjectDraft, ProjectField, TaskDraft, TaskField};
pub use error::{FailureClass, Operation, ServiceError};
pub use panel::{AdminPanel, Notice, NoticeSeverity, PanelEvent};
pub use project_list::{ListAction, ProjectCard, ProjectListView, TaskRow};
pub use service::{AdminService, HttpAdminService};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
