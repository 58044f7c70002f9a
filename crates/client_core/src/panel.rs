use std::{collections::VecDeque, future::Future, sync::Arc};

use anyhow::Result;
use shared::{
    domain::{ProjectId, TaskId},
    protocol::{Project, Task, User},
};
use tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
};
use tracing::{debug, error, info, warn};

use crate::{
    draft::{DraftFieldError, ProjectDraft, ProjectField, TaskDraft, TaskField},
    error::Operation,
    project_list::{ListAction, ProjectListView},
    service::AdminService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Success,
    Failure,
}

/// A message the user has to acknowledge before the console continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub operation: Operation,
    pub message: &'static str,
}

/// Completion of a network call, applied to the panel by its owner.
#[derive(Debug)]
pub enum PanelEvent {
    ProjectsFetched(Result<Vec<Project>>),
    TasksFetched(Result<Vec<Task>>),
    UsersFetched(Result<Vec<User>>),
    ProjectSaved {
        operation: Operation,
        result: Result<Project>,
    },
    TaskSaved {
        operation: Operation,
        result: Result<Task>,
    },
    ProjectDeleted {
        project_id: ProjectId,
        result: Result<()>,
    },
    TaskDeleted {
        task_id: TaskId,
        result: Result<()>,
    },
    SearchCompleted {
        term: String,
        result: Result<Vec<Task>>,
    },
    /// The call's task panicked or was cancelled before producing a result.
    Aborted {
        operation: Operation,
        error: anyhow::Error,
    },
}

impl PanelEvent {
    pub fn operation(&self) -> Operation {
        match self {
            PanelEvent::ProjectsFetched(_) => Operation::FetchProjects,
            PanelEvent::TasksFetched(_) => Operation::FetchTasks,
            PanelEvent::UsersFetched(_) => Operation::FetchUsers,
            PanelEvent::ProjectSaved { operation, .. }
            | PanelEvent::TaskSaved { operation, .. }
            | PanelEvent::Aborted { operation, .. } => *operation,
            PanelEvent::ProjectDeleted { .. } => Operation::DeleteProject,
            PanelEvent::TaskDeleted { .. } => Operation::DeleteTask,
            PanelEvent::SearchCompleted { .. } => Operation::SearchTasks,
        }
    }
}

/// View-model of the admin console: drafts, edit mode, fetched lists and
/// search state. Handlers spawn their network call on `runtime` and return at
/// once; state only changes when the owner applies the resulting events.
pub struct AdminPanel {
    service: Arc<dyn AdminService>,
    runtime: Handle,
    events_tx: UnboundedSender<PanelEvent>,
    events_rx: UnboundedReceiver<PanelEvent>,
    in_flight: usize,
    project_draft: ProjectDraft,
    task_draft: TaskDraft,
    projects: Vec<Project>,
    tasks: Vec<Task>,
    users: Vec<User>,
    loading: bool,
    editing_project_id: Option<ProjectId>,
    editing_task_id: Option<TaskId>,
    search_term: String,
    is_searching: bool,
    notices: VecDeque<Notice>,
}

impl AdminPanel {
    pub fn new(service: Arc<dyn AdminService>, runtime: Handle) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            service,
            runtime,
            events_tx,
            events_rx,
            in_flight: 0,
            project_draft: ProjectDraft::default(),
            task_draft: TaskDraft::default(),
            projects: Vec::new(),
            tasks: Vec::new(),
            users: Vec::new(),
            loading: true,
            editing_project_id: None,
            editing_task_id: None,
            search_term: String::new(),
            is_searching: false,
            notices: VecDeque::new(),
        }
    }

    /// Issues the three initial loads. They race freely; `loading` clears
    /// when the task load settles, whatever happens to the other two.
    pub fn mount(&mut self) {
        self.fetch_projects();
        self.fetch_tasks();
        self.fetch_users();
    }

    pub fn submit_project(&mut self) {
        let payload = self.project_draft.to_payload();
        let service = Arc::clone(&self.service);
        let editing = self.editing_project_id;
        match editing {
            Some(project_id) => self.spawn(Operation::UpdateProject, async move {
                PanelEvent::ProjectSaved {
                    operation: Operation::UpdateProject,
                    result: service.update_project(project_id, &payload).await,
                }
            }),
            None => self.spawn(Operation::CreateProject, async move {
                PanelEvent::ProjectSaved {
                    operation: Operation::CreateProject,
                    result: service.create_project(&payload).await,
                }
            }),
        }
    }

    pub fn submit_task(&mut self) {
        let payload = self.task_draft.to_payload();
        let service = Arc::clone(&self.service);
        let editing = self.editing_task_id;
        match editing {
            Some(task_id) => self.spawn(Operation::UpdateTask, async move {
                PanelEvent::TaskSaved {
                    operation: Operation::UpdateTask,
                    result: service.update_task(task_id, &payload).await,
                }
            }),
            None => self.spawn(Operation::CreateTask, async move {
                PanelEvent::TaskSaved {
                    operation: Operation::CreateTask,
                    result: service.create_task(&payload).await,
                }
            }),
        }
    }

    pub fn delete_project(&mut self, project_id: ProjectId) {
        let service = Arc::clone(&self.service);
        self.spawn(Operation::DeleteProject, async move {
            PanelEvent::ProjectDeleted {
                project_id,
                result: service.delete_project(project_id).await,
            }
        });
    }

    pub fn delete_task(&mut self, task_id: TaskId) {
        let service = Arc::clone(&self.service);
        self.spawn(Operation::DeleteTask, async move {
            PanelEvent::TaskDeleted {
                task_id,
                result: service.delete_task(task_id).await,
            }
        });
    }

    pub fn edit_project(&mut self, project: &Project) {
        self.project_draft = ProjectDraft::from_project(project);
        self.editing_project_id = Some(project.id);
    }

    pub fn edit_task(&mut self, task: &Task) {
        self.task_draft = TaskDraft::from_task(task);
        self.editing_task_id = Some(task.id);
    }

    pub fn cancel_project_edit(&mut self) {
        self.editing_project_id = None;
        self.project_draft = ProjectDraft::default();
    }

    pub fn cancel_task_edit(&mut self) {
        self.editing_task_id = None;
        self.task_draft = TaskDraft::default();
    }

    pub fn submit_search(&mut self) {
        let term = self.search_term.clone();
        let service = Arc::clone(&self.service);
        self.spawn(Operation::SearchTasks, async move {
            let result = service.search_tasks(&term).await;
            PanelEvent::SearchCompleted { term, result }
        });
    }

    /// Leaves search mode and reloads the unfiltered task list. Returns
    /// `false` without doing anything when no search is active.
    pub fn show_all_tasks(&mut self) -> bool {
        if !self.is_searching {
            debug!("show all requested outside search mode");
            return false;
        }
        self.search_term.clear();
        self.fetch_tasks();
        self.is_searching = false;
        true
    }

    pub fn dispatch(&mut self, action: ListAction) {
        match action {
            ListAction::EditProject(project) => self.edit_project(&project),
            ListAction::DeleteProject(project_id) => self.delete_project(project_id),
            ListAction::EditTask(task) => self.edit_task(&task),
            ListAction::DeleteTask(task_id) => self.delete_task(task_id),
        }
    }

    /// Applies every completion that has already arrived, without waiting.
    pub fn process_pending_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Waits for the next completion and applies it. `None` when nothing is
    /// in flight.
    pub async fn process_next_event(&mut self) -> Option<Operation> {
        if self.in_flight == 0 {
            return None;
        }
        let event = self.events_rx.recv().await?;
        let operation = event.operation();
        self.apply(event);
        Some(operation)
    }

    /// Applies completions until no call is in flight, including the
    /// refetches that successful mutations trigger.
    pub async fn settle(&mut self) {
        while self.process_next_event().await.is_some() {}
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }

    pub fn project_draft(&self) -> &ProjectDraft {
        &self.project_draft
    }

    pub fn project_draft_mut(&mut self) -> &mut ProjectDraft {
        &mut self.project_draft
    }

    pub fn set_project_field(&mut self, field: ProjectField, value: impl Into<String>) {
        self.project_draft.set(field, value);
    }

    pub fn task_draft(&self) -> &TaskDraft {
        &self.task_draft
    }

    pub fn task_draft_mut(&mut self) -> &mut TaskDraft {
        &mut self.task_draft
    }

    pub fn set_task_field(
        &mut self,
        field: TaskField,
        value: impl Into<String>,
    ) -> Result<(), DraftFieldError> {
        self.task_draft.set(field, value)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn editing_project_id(&self) -> Option<ProjectId> {
        self.editing_project_id
    }

    pub fn editing_task_id(&self) -> Option<TaskId> {
        self.editing_task_id
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn search_term_mut(&mut self) -> &mut String {
        &mut self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn acknowledge_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    pub fn project_list(&self) -> ProjectListView<'_> {
        ProjectListView::build(&self.projects, &self.tasks, &self.users, self.loading)
    }

    pub fn project_form_heading(&self) -> &'static str {
        if self.editing_project_id.is_some() {
            "Edit Project"
        } else {
            "Create a New Project"
        }
    }

    pub fn project_submit_label(&self) -> &'static str {
        if self.editing_project_id.is_some() {
            "Update Project"
        } else {
            "Create Project"
        }
    }

    pub fn task_form_heading(&self) -> &'static str {
        if self.editing_task_id.is_some() {
            "Edit Task"
        } else {
            "Create a New Task"
        }
    }

    pub fn task_submit_label(&self) -> &'static str {
        if self.editing_task_id.is_some() {
            "Update Task"
        } else {
            "Create Task"
        }
    }

    fn fetch_projects(&mut self) {
        let service = Arc::clone(&self.service);
        self.spawn(Operation::FetchProjects, async move {
            PanelEvent::ProjectsFetched(service.get_projects().await)
        });
    }

    fn fetch_tasks(&mut self) {
        let service = Arc::clone(&self.service);
        self.spawn(Operation::FetchTasks, async move {
            PanelEvent::TasksFetched(service.get_tasks().await)
        });
    }

    fn fetch_users(&mut self) {
        let service = Arc::clone(&self.service);
        self.spawn(Operation::FetchUsers, async move {
            PanelEvent::UsersFetched(service.get_users().await)
        });
    }

    /// Every spawned call posts exactly one event, even when the call panics,
    /// so `in_flight` always returns to zero.
    fn spawn<F>(&mut self, operation: Operation, call: F)
    where
        F: Future<Output = PanelEvent> + Send + 'static,
    {
        self.in_flight += 1;
        let events_tx = self.events_tx.clone();
        let runtime = self.runtime.clone();
        self.runtime.spawn(async move {
            let event = match runtime.spawn(call).await {
                Ok(event) => event,
                Err(err) => PanelEvent::Aborted {
                    operation,
                    error: anyhow::Error::new(err)
                        .context(format!("{} did not complete", operation.name())),
                },
            };
            let _ = events_tx.send(event);
        });
    }

    fn apply(&mut self, event: PanelEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let operation = event.operation();
        match event {
            PanelEvent::ProjectsFetched(Ok(projects)) => {
                debug!(count = projects.len(), "fetched projects");
                for project in projects.iter().filter(|p| p.ends_before_start()) {
                    warn!(
                        project_id = %project.id,
                        start_date = %project.start_date,
                        end_date = %project.end_date,
                        "project ends before it starts"
                    );
                }
                self.projects = projects;
            }
            PanelEvent::TasksFetched(result) => {
                match result {
                    Ok(tasks) => {
                        debug!(count = tasks.len(), "fetched tasks");
                        self.tasks = tasks;
                    }
                    Err(err) => self.report_failure(operation, &err),
                }
                self.loading = false;
            }
            PanelEvent::UsersFetched(Ok(users)) => {
                debug!(count = users.len(), "fetched users");
                self.users = users;
            }
            PanelEvent::ProjectSaved {
                result: Ok(project),
                ..
            } => {
                info!(project_id = %project.id, operation = operation.name(), "project saved");
                self.report_success(operation);
                self.editing_project_id = None;
                self.project_draft = ProjectDraft::default();
                self.fetch_projects();
            }
            PanelEvent::TaskSaved {
                result: Ok(task),
                ..
            } => {
                info!(task_id = %task.id, operation = operation.name(), "task saved");
                self.report_success(operation);
                self.editing_task_id = None;
                self.task_draft = TaskDraft::default();
                self.fetch_tasks();
            }
            PanelEvent::ProjectDeleted {
                project_id,
                result: Ok(()),
            } => {
                info!(%project_id, "project deleted");
                self.report_success(Operation::DeleteProject);
                self.fetch_projects();
                self.fetch_tasks();
            }
            PanelEvent::TaskDeleted {
                task_id,
                result: Ok(()),
            } => {
                info!(%task_id, "task deleted");
                self.report_success(Operation::DeleteTask);
                self.fetch_tasks();
            }
            PanelEvent::SearchCompleted {
                term,
                result: Ok(tasks),
            } => {
                debug!(%term, count = tasks.len(), "search completed");
                self.tasks = tasks;
                self.is_searching = true;
            }
            PanelEvent::ProjectsFetched(Err(err))
            | PanelEvent::UsersFetched(Err(err))
            | PanelEvent::ProjectSaved { result: Err(err), .. }
            | PanelEvent::TaskSaved { result: Err(err), .. }
            | PanelEvent::ProjectDeleted { result: Err(err), .. }
            | PanelEvent::TaskDeleted { result: Err(err), .. }
            | PanelEvent::SearchCompleted { result: Err(err), .. } => {
                self.report_failure(operation, &err)
            }
            PanelEvent::Aborted { error, .. } => {
                if operation == Operation::FetchTasks {
                    self.loading = false;
                }
                self.report_failure(operation, &error);
            }
        }
    }

    fn report_success(&mut self, operation: Operation) {
        if let Some(message) = operation.success_message() {
            self.notices.push_back(Notice {
                severity: NoticeSeverity::Success,
                operation,
                message,
            });
        }
    }

    fn report_failure(&mut self, operation: Operation, err: &anyhow::Error) {
        error!(
            operation = operation.name(),
            class = ?operation.class(),
            error = %format!("{err:#}"),
            "operation failed"
        );
        if let Some(message) = operation.failure_message() {
            self.notices.push_back(Notice {
                severity: NoticeSeverity::Failure,
                operation,
                message,
            });
        }
    }
}
