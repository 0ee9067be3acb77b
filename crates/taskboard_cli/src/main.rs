//! Terminal front end for the taskboard core.
//!
//! # Responsibility
//! - Play the view layer: issue data access calls, render the results.
//! - Persist per-project filter/sort choices through the preference store.
//!
//! Every invocation starts a fresh session, so mutations last only for the
//! command that made them. Preferences persist when `--prefs-db` is set.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;
use taskboard_core::db::{open_db, open_db_in_memory};
use taskboard_core::filter::{apply, count_for_project};
use taskboard_core::{
    init_logging, AppConfig, Backend, PreferenceRepository, PreferenceStore, PriorityFilter,
    Project, ProjectForm, ProjectId, Route, SortKey, SqlitePreferenceRepository, StatusFilter,
    Task, TaskForm, TaskId, TaskPatch, TaskPriority, TaskStatus, UserId,
};

#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about = "Browse and edit taskboard projects")]
struct Cli {
    /// JSON config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// SQLite file for remembered view preferences (overrides the config).
    #[arg(long, global = true)]
    prefs_db: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List projects with their task counts.
    Projects,
    /// Show a project's tasks; given options are remembered for the project.
    Tasks {
        project_id: ProjectId,
        #[arg(long)]
        status: Option<StatusFilter>,
        #[arg(long)]
        priority: Option<PriorityFilter>,
        #[arg(long)]
        sort_by: Option<SortKey>,
    },
    /// Create a task in a project.
    AddTask {
        project_id: ProjectId,
        #[arg(long)]
        title: String,
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = TaskPriority::Medium)]
        priority: TaskPriority,
        #[arg(long, default_value_t = TaskStatus::Todo)]
        status: TaskStatus,
    },
    /// Create a project.
    AddProject {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Edit a task; fields left out keep their current value.
    EditTask {
        task_id: TaskId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<TaskStatus>,
        #[arg(long)]
        priority: Option<TaskPriority>,
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Toggle a user's assignment; repeat for several users.
        #[arg(long = "assign", value_name = "USER_ID")]
        assign: Vec<UserId>,
    },
    /// Change a task's status.
    SetStatus { task_id: TaskId, status: TaskStatus },
    /// Render the view behind a client path such as `/projects/<id>`.
    Open { path: String },
    /// Forget every remembered filter and sort choice.
    ResetPrefs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match AppConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => AppConfig::default(),
    };

    if let Some(logging) = &config.logging {
        if let Err(err) = init_logging(logging) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let prefs_path = cli.prefs_db.clone().or_else(|| config.preferences_db.clone());
    let conn = match prefs_path {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    };
    let conn = match conn {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("error: failed to open preference database: {err}");
            return ExitCode::FAILURE;
        }
    };
    let prefs = match SqlitePreferenceRepository::try_new(&conn) {
        Ok(repo) => PreferenceStore::new(repo),
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let view = View {
        backend: Backend::from_config(&config.backend),
        prefs,
        today: Local::now().date_naive(),
    };

    match view.run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=cli_command module=cli status=error");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

struct View<R: PreferenceRepository> {
    backend: Backend,
    prefs: PreferenceStore<R>,
    today: NaiveDate,
}

impl<R: PreferenceRepository> View<R> {
    async fn run(&self, command: Command) -> Result<(), String> {
        match command {
            Command::Projects => self.projects().await,
            Command::Tasks {
                project_id,
                status,
                priority,
                sort_by,
            } => {
                // Unknown projects must not leave remembered filters behind.
                self.require_project(project_id).await?;
                if let Some(status) = status {
                    self.prefs.set_status_filter(project_id, status);
                }
                if let Some(priority) = priority {
                    self.prefs.set_priority_filter(project_id, priority);
                }
                if let Some(sort_by) = sort_by {
                    self.prefs.set_sort_key(project_id, sort_by);
                }
                self.project_tasks(project_id).await
            }
            Command::AddTask {
                project_id,
                title,
                due,
                description,
                priority,
                status,
            } => {
                let form = TaskForm {
                    title,
                    description,
                    status,
                    priority,
                    due_date: due,
                    assigned_users: Vec::new(),
                };
                self.add_task(project_id, form).await
            }
            Command::AddProject { name, description } => {
                self.add_project(ProjectForm { name, description }).await
            }
            Command::EditTask {
                task_id,
                title,
                description,
                status,
                priority,
                due,
                assign,
            } => {
                let mut form = TaskForm::from_task(&self.require_task(task_id).await?);
                if let Some(title) = title {
                    form.title = title;
                }
                if let Some(description) = description {
                    form.description = description;
                }
                if let Some(status) = status {
                    form.status = status;
                }
                if let Some(priority) = priority {
                    form.priority = priority;
                }
                if due.is_some() {
                    form.due_date = due;
                }
                self.edit_task(task_id, form, &assign).await
            }
            Command::SetStatus { task_id, status } => self.set_status(task_id, status).await,
            Command::Open { path } => self.open(&path).await,
            Command::ResetPrefs => {
                self.prefs.clear();
                println!("preferences cleared");
                Ok(())
            }
        }
    }

    async fn open(&self, path: &str) -> Result<(), String> {
        match Route::parse(path) {
            Route::Projects => self.projects().await,
            Route::ProjectDetails { project_id } => self.project_tasks(project_id).await,
            Route::NewTask { project_id } => {
                let project = self.require_project(project_id).await?;
                println!("Create Task in {}", project.name);
                print_form(&TaskForm::default());
                Ok(())
            }
            Route::EditTask {
                project_id,
                task_id,
            } => {
                self.require_project(project_id).await?;
                let task = self.require_task(task_id).await?;
                println!("Edit Task");
                print_form(&TaskForm::from_task(&task));
                Ok(())
            }
        }
    }

    async fn projects(&self) -> Result<(), String> {
        let (project_api, task_api) = (self.backend.projects(), self.backend.tasks());
        let (projects, tasks) = tokio::join!(project_api.list(), task_api.list());
        if projects.is_empty() {
            println!("No projects yet");
            return Ok(());
        }
        for project in &projects {
            println!(
                "{}  {} ({} tasks)",
                project.id,
                project.name,
                count_for_project(&tasks, project.id)
            );
            if let Some(description) = &project.description {
                println!("    {description}");
            }
        }
        Ok(())
    }

    async fn project_tasks(&self, project_id: ProjectId) -> Result<(), String> {
        let (project_api, task_api) = (self.backend.projects(), self.backend.tasks());
        let (project, tasks) = tokio::join!(
            project_api.get_by_id(project_id),
            task_api.get_by_project_id(project_id)
        );
        let project = project.ok_or_else(|| format!("project not found: {project_id}"))?;
        let criteria = self.prefs.task_view_criteria(project_id);

        println!(
            "{}  [status={} priority={} sort_by={}]",
            project.name, criteria.status, criteria.priority, criteria.sort_by
        );
        let visible = apply(&tasks, &criteria);
        if visible.is_empty() {
            println!("    No tasks match the current filters");
        }
        for task in visible {
            print_task(task, self.today);
        }
        Ok(())
    }

    async fn add_task(&self, project_id: ProjectId, form: TaskForm) -> Result<(), String> {
        self.require_project(project_id).await?;
        let new_task = form
            .into_new_task(project_id)
            .map_err(|errors| errors.to_string())?;
        let task = self.backend.tasks().create(new_task).await;
        println!("Task created successfully");
        print_task(&task, self.today);
        Ok(())
    }

    async fn add_project(&self, form: ProjectForm) -> Result<(), String> {
        let new_project = form.into_new_project().map_err(|errors| errors.to_string())?;
        let project = self.backend.projects().create(new_project).await;
        println!("Project created successfully");
        println!("{}  {}", project.id, project.name);
        Ok(())
    }

    /// Saves an edited task. Each id in `assign` toggles that user, chosen
    /// from the full user list the way the edit page offers them.
    async fn edit_task(
        &self,
        task_id: TaskId,
        mut form: TaskForm,
        assign: &[UserId],
    ) -> Result<(), String> {
        if !assign.is_empty() {
            let users = self.backend.users().list().await;
            for user_id in assign {
                let user = users
                    .iter()
                    .find(|user| user.id == *user_id)
                    .ok_or_else(|| format!("user not found: {user_id}"))?;
                form.toggle_assignee(user);
            }
        }
        let patch = form.into_patch().map_err(|errors| errors.to_string())?;
        let task = self
            .backend
            .tasks()
            .update(task_id, patch)
            .await
            .ok_or_else(|| format!("task not found: {task_id}"))?;
        println!("Task updated successfully");
        print_task(&task, self.today);
        Ok(())
    }

    async fn set_status(&self, task_id: TaskId, status: TaskStatus) -> Result<(), String> {
        let task = self
            .backend
            .tasks()
            .update(task_id, TaskPatch::status(status))
            .await
            .ok_or_else(|| format!("task not found: {task_id}"))?;
        println!("Task status updated");
        print_task(&task, self.today);
        Ok(())
    }

    async fn require_task(&self, task_id: TaskId) -> Result<Task, String> {
        self.backend
            .tasks()
            .get_by_id(task_id)
            .await
            .ok_or_else(|| format!("task not found: {task_id}"))
    }

    async fn require_project(&self, project_id: ProjectId) -> Result<Project, String> {
        self.backend
            .projects()
            .get_by_id(project_id)
            .await
            .ok_or_else(|| format!("project not found: {project_id}"))
    }
}

fn print_task(task: &Task, today: NaiveDate) {
    let overdue = if task.is_overdue(today) { "  OVERDUE" } else { "" };
    println!(
        "  {}  {:<11} {:<6} due {}{}  {}",
        task.id, task.status, task.priority, task.due_date, overdue, task.title
    );
    if !task.assigned_users.is_empty() {
        let names: Vec<String> = task
            .assigned_users
            .iter()
            .map(|user| format!("{} {}", user.avatar, user.name))
            .collect();
        println!("      assigned: {}", names.join(", "));
    }
}

fn print_form(form: &TaskForm) {
    println!("  title:       {}", form.title);
    println!("  description: {}", form.description);
    println!("  status:      {}", form.status);
    println!("  priority:    {}", form.priority);
    match form.due_date {
        Some(due) => println!("  due_date:    {due}"),
        None => println!("  due_date:"),
    }
    let assignees: Vec<&str> = form
        .assigned_users
        .iter()
        .map(|user| user.name.as_str())
        .collect();
    println!("  assigned:    {}", assignees.join(", "));
}
