use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    load_settings, AdminPanel, HttpAdminService, NoticeSeverity, ProjectField, TaskField,
};
use shared::domain::{ProjectId, TaskId};
use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Headless project/task admin console")]
struct Cli {
    /// Backend base url; overrides admin.toml and APP__API_BASE_URL.
    #[arg(long, env = "ADMIN_API_URL")]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List,
    Search {
        term: String,
    },
    CreateProject(ProjectArgs),
    UpdateProject {
        id: i64,
        #[command(flatten)]
        fields: ProjectArgs,
    },
    DeleteProject {
        id: i64,
    },
    CreateTask(TaskArgs),
    UpdateTask {
        id: i64,
        #[command(flatten)]
        fields: TaskArgs,
    },
    DeleteTask {
        id: i64,
    },
}

/// Fields left out keep their current draft value.
#[derive(Args, Debug)]
struct ProjectArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    start_date: Option<String>,
    #[arg(long)]
    end_date: Option<String>,
    /// Owner user id, sent as typed.
    #[arg(long)]
    owner: Option<String>,
}

impl ProjectArgs {
    fn apply(self, panel: &mut AdminPanel) {
        let fields = [
            (ProjectField::Title, self.title),
            (ProjectField::Description, self.description),
            (ProjectField::StartDate, self.start_date),
            (ProjectField::EndDate, self.end_date),
            (ProjectField::Owner, self.owner),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                panel.set_project_field(field, value);
            }
        }
    }
}

#[derive(Args, Debug)]
struct TaskArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    due_date: Option<String>,
    /// LOW, MEDIUM or HIGH.
    #[arg(long)]
    priority: Option<String>,
    #[arg(long)]
    employee_id: Option<String>,
    /// PENDING, IN_PROGRESS or COMPLETED.
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    project_id: Option<String>,
}

impl TaskArgs {
    fn apply(self, panel: &mut AdminPanel) -> Result<()> {
        let fields = [
            (TaskField::Title, self.title),
            (TaskField::Description, self.description),
            (TaskField::DueDate, self.due_date),
            (TaskField::Priority, self.priority),
            (TaskField::EmployeeId, self.employee_id),
            (TaskField::TaskStatus, self.status),
            (TaskField::ProjectId, self.project_id),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                panel.set_task_field(field, value)?;
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(api_url) = cli.api_url {
        settings.api_base_url = client_core::config::normalize_base_url(&api_url);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let service = HttpAdminService::new(&settings.api_base_url)
        .with_context(|| format!("cannot use api url {}", settings.api_base_url))?;
    let mut panel = AdminPanel::new(Arc::new(service), Handle::current());
    panel.mount();
    panel.settle().await;

    run_command(&mut panel, cli.command)?;
    panel.settle().await;

    let mut failed = Vec::new();
    while let Some(notice) = panel.acknowledge_notice() {
        println!("{}", notice.message);
        if notice.severity == NoticeSeverity::Failure {
            failed.push(notice.message);
        }
    }
    print!("{}", panel.project_list());

    if !failed.is_empty() {
        bail!("{}", failed.join("; "));
    }
    Ok(())
}

fn run_command(panel: &mut AdminPanel, command: Command) -> Result<()> {
    match command {
        Command::List => {}
        Command::Search { term } => {
            panel.set_search_term(term);
            panel.submit_search();
        }
        Command::CreateProject(fields) => {
            fields.apply(panel);
            report_missing(&panel.project_draft().missing_required());
            panel.submit_project();
        }
        Command::UpdateProject { id, fields } => {
            let project = panel
                .projects()
                .iter()
                .find(|project| project.id == ProjectId(id))
                .cloned()
                .with_context(|| format!("project {id} is not in the project list"))?;
            panel.edit_project(&project);
            fields.apply(panel);
            panel.submit_project();
        }
        Command::DeleteProject { id } => panel.delete_project(ProjectId(id)),
        Command::CreateTask(fields) => {
            fields.apply(panel)?;
            report_missing(&panel.task_draft().missing_required());
            panel.submit_task();
        }
        Command::UpdateTask { id, fields } => {
            let task = panel
                .tasks()
                .iter()
                .find(|task| task.id == TaskId(id))
                .cloned()
                .with_context(|| format!("task {id} is not in the task list"))?;
            panel.edit_task(&task);
            fields.apply(panel)?;
            panel.submit_task();
        }
        Command::DeleteTask { id } => panel.delete_task(TaskId(id)),
    }
    Ok(())
}

fn report_missing(missing: &[&'static str]) {
    if !missing.is_empty() {
        tracing::warn!(fields = ?missing, "submitting with empty required fields");
    }
}
