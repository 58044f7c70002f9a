use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid api base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("api base url '{0}' must be an http(s) url")]
    UnsupportedScheme(String),
    #[error("{operation} failed with status {status}: {body}")]
    UnexpectedStatus {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },
}

/// Uniform handling buckets for failed panel operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Fetch,
    Mutation,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchProjects,
    FetchTasks,
    FetchUsers,
    CreateProject,
    UpdateProject,
    DeleteProject,
    CreateTask,
    UpdateTask,
    DeleteTask,
    SearchTasks,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::FetchProjects => "fetch_projects",
            Operation::FetchTasks => "fetch_tasks",
            Operation::FetchUsers => "fetch_users",
            Operation::CreateProject => "create_project",
            Operation::UpdateProject => "update_project",
            Operation::DeleteProject => "delete_project",
            Operation::CreateTask => "create_task",
            Operation::UpdateTask => "update_task",
            Operation::DeleteTask => "delete_task",
            Operation::SearchTasks => "search_tasks",
        }
    }

    pub fn class(self) -> FailureClass {
        match self {
            Operation::FetchProjects | Operation::FetchTasks | Operation::FetchUsers => {
                FailureClass::Fetch
            }
            Operation::SearchTasks => FailureClass::Search,
            _ => FailureClass::Mutation,
        }
    }

    pub fn success_message(self) -> Option<&'static str> {
        match self {
            Operation::CreateProject => Some("Project created successfully"),
            Operation::UpdateProject => Some("Project updated successfully"),
            Operation::DeleteProject => Some("Project deleted successfully"),
            Operation::CreateTask => Some("Task created successfully"),
            Operation::UpdateTask => Some("Task updated successfully"),
            Operation::DeleteTask => Some("Task deleted successfully"),
            _ => None,
        }
    }

    /// Fetch failures are log-only and carry no user-facing message.
    pub fn failure_message(self) -> Option<&'static str> {
        match self {
            Operation::CreateProject | Operation::UpdateProject => {
                Some("Failed to create/update project")
            }
            Operation::DeleteProject => Some("Failed to delete project"),
            Operation::CreateTask | Operation::UpdateTask => Some("Failed to create/update task"),
            Operation::DeleteTask => Some("Failed to delete task"),
            Operation::SearchTasks => Some("Failed to search tasks"),
            Operation::FetchProjects | Operation::FetchTasks | Operation::FetchUsers => None,
        }
    }
}
