use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{Priority, ProjectId, TaskId, TaskStatus, UserId};

/// Returns the calendar-date portion of a date or timestamp string: everything
/// before the first `T`, or the whole input when there is none.
pub fn date_part(value: &str) -> &str {
    value.split_once('T').map_or(value, |(date, _)| date)
}

/// Reads an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
}

impl Project {
    /// Start and end as calendar dates, when both parse.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::parse_from_str(date_part(&self.start_date), "%Y-%m-%d").ok()?;
        let end = NaiveDate::parse_from_str(date_part(&self.end_date), "%Y-%m-%d").ok()?;
        Some((start, end))
    }

    pub fn ends_before_start(&self) -> bool {
        self.date_range().is_some_and(|(start, end)| end < start)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub due_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<UserId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub task_status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Body of a project create/update call. `owner` is the raw form value;
/// `owner_id` is its integer parse and serializes as `null` when the form
/// value held no leading digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub owner: String,
    pub owner_id: Option<i64>,
}

/// Body of a task create/update call. Foreign keys stay as the selected form
/// option values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: Priority,
    pub employee_id: String,
    pub task_status: TaskStatus,
    pub project_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_part_keeps_plain_dates_and_truncates_timestamps() {
        assert_eq!(date_part("2024-05-01"), "2024-05-01");
        assert_eq!(date_part("2024-05-01T00:00:00"), "2024-05-01");
        assert_eq!(date_part("2024-05-01T10:00:00T"), "2024-05-01");
        assert_eq!(date_part(""), "");
    }

    #[test]
    fn decodes_backend_project_with_denormalized_owner() {
        let project: Project = serde_json::from_str(
            r#"{"id":4,"title":"Launch","description":"Ship it","startDate":"2024-05-01T00:00:00",
               "endDate":"2024-06-01","ownerId":2,"ownerName":"Ada"}"#,
        )
        .expect("decode project");

        assert_eq!(project.id, ProjectId(4));
        assert_eq!(project.owner_id, Some(UserId(2)));
        assert_eq!(project.owner_name.as_deref(), Some("Ada"));
        assert!(!project.ends_before_start());
    }

    #[test]
    fn flags_inverted_date_ranges_without_rejecting_them() {
        let project: Project = serde_json::from_str(
            r#"{"id":1,"title":"Backwards","startDate":"2024-06-02","endDate":"2024-06-01"}"#,
        )
        .expect("decode project");

        assert!(project.ends_before_start());
        assert_eq!(project.owner_id, None);
    }

    #[test]
    fn null_fields_do_not_reject_the_rest_of_a_task_list() {
        let tasks: Vec<Task> = serde_json::from_str(
            r#"[{"id":1,"title":"Release","description":"Tag it","dueDate":"2024-05-02",
                 "priority":"HIGH","taskStatus":"COMPLETED","projectId":3},
                {"id":2,"title":null,"description":null,"dueDate":null,
                 "priority":null,"employeeId":null,"taskStatus":null,"projectId":null}]"#,
        )
        .expect("decode tasks");

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[0].project_id, Some(ProjectId(3)));
        let sparse = &tasks[1];
        assert_eq!(sparse.id, TaskId(2));
        assert_eq!(sparse.title, "");
        assert_eq!(sparse.description, "");
        assert_eq!(sparse.due_date, "");
        assert_eq!(sparse.priority, Priority::default());
        assert_eq!(sparse.task_status, TaskStatus::default());
        assert_eq!(sparse.employee_id, None);
        assert_eq!(sparse.project_id, None);
    }

    #[test]
    fn null_fields_do_not_reject_the_rest_of_a_project_list() {
        let projects: Vec<Project> = serde_json::from_str(
            r#"[{"id":1,"title":"Launch","startDate":"2024-05-01","endDate":"2024-06-01"},
                {"id":2,"title":null,"description":null,"startDate":null,"endDate":null,
                 "ownerId":null,"ownerName":null}]"#,
        )
        .expect("decode projects");

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].title, "Launch");
        assert_eq!(projects[1].title, "");
        assert_eq!(projects[1].start_date, "");
        assert_eq!(projects[1].owner_name, None);
        assert!(!projects[1].ends_before_start());

        let users: Vec<User> =
            serde_json::from_str(r#"[{"id":5,"name":null}]"#).expect("decode users");
        assert_eq!(users[0].name, "");
    }

    #[test]
    fn project_payload_sends_unparsed_owner_as_null() {
        let payload = ProjectPayload {
            title: "T".into(),
            description: "D".into(),
            start_date: "2024-01-01".into(),
            end_date: "2024-01-02".into(),
            owner: "abc".into(),
            owner_id: None,
        };
        let value = serde_json::to_value(&payload).expect("encode payload");

        assert_eq!(value["ownerId"], serde_json::Value::Null);
        assert_eq!(value["owner"], "abc");
        assert_eq!(value["startDate"], "2024-01-01");
    }

    #[test]
    fn task_payload_keeps_option_values_as_strings() {
        let payload = TaskPayload {
            title: "Deploy".into(),
            description: "Roll out".into(),
            due_date: "2024-05-03".into(),
            priority: Priority::High,
            employee_id: "3".into(),
            task_status: TaskStatus::InProgress,
            project_id: "9".into(),
        };
        let value = serde_json::to_value(&payload).expect("encode payload");

        assert_eq!(value["employeeId"], "3");
        assert_eq!(value["projectId"], "9");
        assert_eq!(value["priority"], "HIGH");
        assert_eq!(value["taskStatus"], "IN_PROGRESS");
    }
}
