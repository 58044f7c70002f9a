//! Form-shaped drafts for the project and task editors.

use shared::{
    domain::{ParseEnumError, Priority, TaskStatus},
    protocol::{date_part, Project, ProjectPayload, Task, TaskPayload},
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftFieldError {
    #[error(transparent)]
    InvalidChoice(#[from] ParseEnumError),
    #[error("unknown {form} field '{field}'")]
    UnknownField { form: &'static str, field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    Title,
    Description,
    StartDate,
    EndDate,
    Owner,
}

impl ProjectField {
    pub fn parse(name: &str) -> Result<Self, DraftFieldError> {
        match name {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "startDate" => Ok(Self::StartDate),
            "endDate" => Ok(Self::EndDate),
            "owner" => Ok(Self::Owner),
            other => Err(DraftFieldError::UnknownField {
                form: "project",
                field: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Description,
    DueDate,
    Priority,
    EmployeeId,
    TaskStatus,
    ProjectId,
}

impl TaskField {
    pub fn parse(name: &str) -> Result<Self, DraftFieldError> {
        match name {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "dueDate" => Ok(Self::DueDate),
            "priority" => Ok(Self::Priority),
            "employeeId" => Ok(Self::EmployeeId),
            "taskStatus" => Ok(Self::TaskStatus),
            "projectId" => Ok(Self::ProjectId),
            other => Err(DraftFieldError::UnknownField {
                form: "task",
                field: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    /// Selected owner option value (a user id as text).
    pub owner: String,
}

impl ProjectDraft {
    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            start_date: date_part(&project.start_date).to_string(),
            end_date: date_part(&project.end_date).to_string(),
            owner: project
                .owner_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn set(&mut self, field: ProjectField, value: impl Into<String>) {
        let slot = match field {
            ProjectField::Title => &mut self.title,
            ProjectField::Description => &mut self.description,
            ProjectField::StartDate => &mut self.start_date,
            ProjectField::EndDate => &mut self.end_date,
            ProjectField::Owner => &mut self.owner,
        };
        *slot = value.into();
    }

    pub fn to_payload(&self) -> ProjectPayload {
        ProjectPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            owner: self.owner.clone(),
            owner_id: parse_leading_int(&self.owner),
        }
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("description", &self.description),
            ("startDate", &self.start_date),
            ("endDate", &self.end_date),
            ("owner", &self.owner),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: Priority,
    pub employee_id: String,
    pub task_status: TaskStatus,
    pub project_id: String,
}

impl TaskDraft {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: date_part(&task.due_date).to_string(),
            priority: task.priority,
            employee_id: task
                .employee_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            task_status: task.task_status,
            project_id: task
                .project_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }

    /// Enum fields only accept their wire tags; a rejected value leaves the
    /// draft untouched.
    pub fn set(
        &mut self,
        field: TaskField,
        value: impl Into<String>,
    ) -> Result<(), DraftFieldError> {
        let value = value.into();
        match field {
            TaskField::Title => self.title = value,
            TaskField::Description => self.description = value,
            TaskField::DueDate => self.due_date = value,
            TaskField::Priority => self.priority = value.parse()?,
            TaskField::EmployeeId => self.employee_id = value,
            TaskField::TaskStatus => self.task_status = value.parse()?,
            TaskField::ProjectId => self.project_id = value,
        }
        Ok(())
    }

    pub fn to_payload(&self) -> TaskPayload {
        TaskPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date.clone(),
            priority: self.priority,
            employee_id: self.employee_id.clone(),
            task_status: self.task_status,
            project_id: self.project_id.clone(),
        }
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("description", &self.description),
            ("dueDate", &self.due_date),
            ("employeeId", &self.employee_id),
            ("projectId", &self.project_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Integer prefix parse of a form value: optional leading whitespace and
/// sign, then base-10 digits up to the first non-digit. `None` when no digit
/// follows or the value overflows.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = rest[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use shared::domain::{ProjectId, TaskId, UserId};

    use super::*;

    #[test]
    fn parses_integer_prefix_like_a_form_would() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  7"), Some(7));
        assert_eq!(parse_leading_int("12abc"), Some(12));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("+5"), Some(5));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("1.9"), Some(1));
    }

    #[test]
    fn project_draft_truncates_timestamps_and_maps_owner() {
        let project = Project {
            id: ProjectId(1),
            title: "Migration".into(),
            description: "Move the db".into(),
            start_date: "2024-05-01T00:00:00".into(),
            end_date: "2024-05-31".into(),
            owner_id: Some(UserId(12)),
            owner_name: Some("Grace".into()),
        };

        let draft = ProjectDraft::from_project(&project);

        assert_eq!(draft.start_date, "2024-05-01");
        assert_eq!(draft.end_date, "2024-05-31");
        assert_eq!(draft.owner, "12");
        assert_eq!(draft.to_payload().owner_id, Some(12));
    }

    #[test]
    fn task_draft_stringifies_foreign_keys() {
        let task = Task {
            id: TaskId(5),
            title: "Deploy".into(),
            description: "Ship".into(),
            due_date: "2024-06-10T09:30:00Z".into(),
            priority: Priority::High,
            employee_id: Some(UserId(3)),
            task_status: TaskStatus::InProgress,
            project_id: None,
        };

        let draft = TaskDraft::from_task(&task);

        assert_eq!(draft.due_date, "2024-06-10");
        assert_eq!(draft.employee_id, "3");
        assert_eq!(draft.project_id, "");
        assert_eq!(draft.missing_required(), vec!["projectId"]);
    }

    #[test]
    fn setting_one_field_leaves_the_rest_untouched() {
        let mut draft = TaskDraft {
            title: "Keep".into(),
            ..TaskDraft::default()
        };
        draft.set(TaskField::Priority, "MEDIUM").expect("valid tag");
        assert_eq!(draft.priority, Priority::Medium);
        assert_eq!(draft.title, "Keep");

        let before = draft.clone();
        let err = draft
            .set(TaskField::TaskStatus, "DONE")
            .expect_err("unknown tag");
        assert!(matches!(err, DraftFieldError::InvalidChoice(_)));
        assert_eq!(draft, before);
    }

    #[test]
    fn field_names_follow_form_input_names() {
        assert_eq!(ProjectField::parse("startDate"), Ok(ProjectField::StartDate));
        assert_eq!(TaskField::parse("employeeId"), Ok(TaskField::EmployeeId));
        assert!(ProjectField::parse("ownerId").is_err());
    }

    #[test]
    fn empty_project_draft_reports_every_required_field() {
        assert_eq!(
            ProjectDraft::default().missing_required(),
            vec!["title", "description", "startDate", "endDate", "owner"]
        );
    }
}
