//! Read-only derivations behind the nested project → tasks view.

use std::fmt;

use shared::{
    domain::{ProjectId, TaskId, UserId},
    protocol::{Project, Task, User},
};

pub const UNKNOWN_USER: &str = "Unknown";

pub fn tasks_for_project(tasks: &[Task], project_id: ProjectId) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| task.project_id == Some(project_id))
        .collect()
}

pub fn name_of(users: &[User], user_id: Option<UserId>) -> &str {
    user_id
        .and_then(|id| users.iter().find(|user| user.id == id))
        .map(|user| user.name.as_str())
        .unwrap_or(UNKNOWN_USER)
}

/// What a renderer hands back to the panel when a list button is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    EditProject(Project),
    DeleteProject(ProjectId),
    EditTask(Task),
    DeleteTask(TaskId),
}

#[derive(Debug, Clone, Copy)]
pub struct TaskRow<'a> {
    pub task: &'a Task,
    pub assignee: &'a str,
}

#[derive(Debug, Clone)]
pub struct ProjectCard<'a> {
    pub project: &'a Project,
    pub tasks: Vec<TaskRow<'a>>,
}

impl ProjectCard<'_> {
    pub fn owner_label(&self) -> &str {
        self.project.owner_name.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub enum ProjectListView<'a> {
    Loading,
    Ready(Vec<ProjectCard<'a>>),
}

impl<'a> ProjectListView<'a> {
    /// Recomputed from scratch on every call.
    pub fn build(
        projects: &'a [Project],
        tasks: &'a [Task],
        users: &'a [User],
        loading: bool,
    ) -> Self {
        if loading {
            return Self::Loading;
        }

        let cards = projects
            .iter()
            .map(|project| ProjectCard {
                project,
                tasks: tasks_for_project(tasks, project.id)
                    .into_iter()
                    .map(|task| TaskRow {
                        task,
                        assignee: name_of(users, task.employee_id),
                    })
                    .collect(),
            })
            .collect();
        Self::Ready(cards)
    }
}

impl fmt::Display for ProjectListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards = match self {
            Self::Loading => return writeln!(f, "Loading..."),
            Self::Ready(cards) => cards,
        };

        for card in cards {
            let project = card.project;
            writeln!(f, "[{}] {}", project.id, project.title)?;
            writeln!(f, "  {}", project.description)?;
            writeln!(f, "  Start Date: {}", project.start_date)?;
            writeln!(f, "  End Date: {}", project.end_date)?;
            writeln!(f, "  Owner: {}", card.owner_label())?;
            writeln!(f, "  Tasks")?;
            if card.tasks.is_empty() {
                writeln!(f, "    No tasks for this project")?;
                continue;
            }
            for row in &card.tasks {
                let task = row.task;
                writeln!(f, "    - [{}] {}", task.id, task.title)?;
                writeln!(f, "      {}", task.description)?;
                writeln!(f, "      Due Date: {}", task.due_date)?;
                writeln!(f, "      Priority: {}", task.priority)?;
                writeln!(f, "      Assigned To: {}", row.assignee)?;
                writeln!(f, "      Status: {}", task.task_status)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::{Priority, TaskStatus};

    use super::*;

    fn project(id: i64, title: &str) -> Project {
        Project {
            id: ProjectId(id),
            title: title.into(),
            description: format!("{title} description"),
            start_date: "2024-01-01".into(),
            end_date: "2024-02-01".into(),
            owner_id: Some(UserId(1)),
            owner_name: Some("Ada".into()),
        }
    }

    fn task(id: i64, project_id: Option<i64>, employee_id: Option<i64>) -> Task {
        Task {
            id: TaskId(id),
            title: format!("task {id}"),
            description: String::new(),
            due_date: "2024-01-15".into(),
            priority: Priority::Low,
            employee_id: employee_id.map(UserId),
            task_status: TaskStatus::Pending,
            project_id: project_id.map(ProjectId),
        }
    }

    fn users() -> Vec<User> {
        vec![
            User {
                id: UserId(1),
                name: "Ada".into(),
            },
            User {
                id: UserId(2),
                name: "Grace".into(),
            },
        ]
    }

    #[test]
    fn filters_tasks_by_project_in_input_order() {
        let tasks = vec![
            task(30, Some(1), None),
            task(10, Some(2), None),
            task(20, Some(1), None),
            task(40, None, None),
        ];

        let ids: Vec<TaskId> = tasks_for_project(&tasks, ProjectId(1))
            .into_iter()
            .map(|task| task.id)
            .collect();

        assert_eq!(ids, vec![TaskId(30), TaskId(20)]);
        assert!(tasks_for_project(&tasks, ProjectId(99)).is_empty());
    }

    #[test]
    fn looks_up_names_with_unknown_fallback() {
        let users = users();
        assert_eq!(name_of(&users, Some(UserId(2))), "Grace");
        assert_eq!(name_of(&users, Some(UserId(9))), "Unknown");
        assert_eq!(name_of(&users, None), "Unknown");
        assert_eq!(name_of(&[], Some(UserId(1))), "Unknown");
    }

    #[test]
    fn loading_ignores_every_other_input() {
        let projects = vec![project(1, "Alpha")];
        let tasks = vec![task(1, Some(1), Some(1))];
        let users = users();

        let view = ProjectListView::build(&projects, &tasks, &users, true);

        assert!(matches!(view, ProjectListView::Loading));
        assert_eq!(view.to_string(), "Loading...\n");
    }

    #[test]
    fn renders_cards_with_assignees_and_empty_placeholder() {
        let projects = vec![project(1, "Alpha"), project(2, "Beta")];
        let tasks = vec![task(7, Some(1), Some(2)), task(8, Some(1), Some(5))];
        let users = users();

        let view = ProjectListView::build(&projects, &tasks, &users, false);
        let ProjectListView::Ready(cards) = &view else {
            panic!("expected ready view");
        };

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].tasks.len(), 2);
        assert_eq!(cards[0].tasks[0].assignee, "Grace");
        assert_eq!(cards[0].tasks[1].assignee, "Unknown");
        assert!(cards[1].tasks.is_empty());

        let text = view.to_string();
        assert!(text.contains("Owner: Ada"));
        assert!(text.contains("Assigned To: Grace"));
        assert!(text.contains("Status: PENDING"));
        assert_eq!(text.matches("No tasks for this project").count(), 1);
    }
}
