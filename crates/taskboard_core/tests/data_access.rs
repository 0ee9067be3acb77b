use chrono::NaiveDate;
use std::collections::HashSet;
use std::time::Duration;
use taskboard_core::{
    Backend, BackendConfig, EntityStore, NewProject, NewTask, NewUser, Project, ProjectPatch, Task,
    TaskPatch, TaskPriority, TaskStatus, User, UserPatch,
};
use tokio::time::Instant;
use uuid::Uuid;

fn backend() -> Backend {
    Backend::new(EntityStore::empty(), &BackendConfig::default())
}

fn new_project(name: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        description: None,
    }
}

fn new_task(project_id: Uuid, title: &str, due: &str) -> NewTask {
    NewTask {
        project_id,
        title: title.to_string(),
        description: None,
        status: TaskStatus::Todo,
        priority: TaskPriority::Medium,
        due_date: due.parse::<NaiveDate>().unwrap(),
        assigned_users: Vec::new(),
    }
}

#[tokio::test(start_paused = true)]
async fn every_call_waits_the_configured_latency() {
    let backend = backend();
    let started = Instant::now();

    backend.projects().list().await;
    assert!(started.elapsed() >= Duration::from_millis(300));

    backend.projects().create(new_project("alpha")).await;
    backend.tasks().get_by_id(Uuid::new_v4()).await;
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(900));
    assert!(elapsed < Duration::from_millis(1000));
}

#[tokio::test(start_paused = true)]
async fn created_ids_are_unique() {
    let backend = backend();
    let project = backend.projects().create(new_project("alpha")).await;

    let mut ids = HashSet::new();
    ids.insert(project.id);
    for index in 0..25 {
        let task = backend
            .tasks()
            .create(new_task(project.id, &format!("task {index}"), "2024-01-01"))
            .await;
        assert!(ids.insert(task.id));
        let user = backend
            .users()
            .create(NewUser {
                name: format!("user {index}"),
                avatar: "U".to_string(),
            })
            .await;
        assert!(ids.insert(user.id));
    }
}

#[tokio::test(start_paused = true)]
async fn list_preserves_creation_order() {
    let backend = backend();
    let first = backend.projects().create(new_project("first")).await;
    let second = backend.projects().create(new_project("second")).await;
    backend
        .projects()
        .update(first.id, ProjectPatch {
            name: Some("first renamed".to_string()),
            ..ProjectPatch::default()
        })
        .await;

    let ids: Vec<_> = backend
        .projects()
        .list()
        .await
        .into_iter()
        .map(|project| project.id)
        .collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[tokio::test(start_paused = true)]
async fn update_overwrites_only_present_fields() {
    let backend = backend();
    let project = backend
        .projects()
        .create(NewProject {
            name: "alpha".to_string(),
            description: Some("keep me".to_string()),
        })
        .await;
    let task = backend
        .tasks()
        .create(new_task(project.id, "draft", "2024-03-05"))
        .await;

    let updated = backend
        .tasks()
        .update(task.id, TaskPatch {
            priority: Some(TaskPriority::High),
            description: Some(Some("details".to_string())),
            ..TaskPatch::default()
        })
        .await
        .unwrap();

    assert_eq!(updated.id, task.id);
    assert_eq!(updated.title, task.title);
    assert_eq!(updated.status, task.status);
    assert_eq!(updated.due_date, task.due_date);
    assert_eq!(updated.priority, TaskPriority::High);
    assert_eq!(updated.description.as_deref(), Some("details"));
    assert_eq!(updated.created_at, task.created_at);
    assert!(updated.updated_at > task.updated_at);

    let renamed = backend
        .projects()
        .update(project.id, ProjectPatch {
            name: Some("beta".to_string()),
            ..ProjectPatch::default()
        })
        .await
        .unwrap();
    assert_eq!(renamed.description.as_deref(), Some("keep me"));

    let cleared = backend
        .projects()
        .update(project.id, ProjectPatch {
            description: Some(None),
            ..ProjectPatch::default()
        })
        .await
        .unwrap();
    assert_eq!(cleared.name, "beta");
    assert_eq!(cleared.description, None);
}

async fn snapshot(backend: &Backend) -> (Vec<Project>, Vec<Task>, Vec<User>) {
    (
        backend.projects().list().await,
        backend.tasks().list().await,
        backend.users().list().await,
    )
}

#[tokio::test(start_paused = true)]
async fn missing_ids_are_not_found_without_side_effects() {
    let backend = backend();
    let project = backend.projects().create(new_project("alpha")).await;
    backend
        .tasks()
        .create(new_task(project.id, "keep", "2024-01-01"))
        .await;
    let before = snapshot(&backend).await;

    let missing = Uuid::new_v4();
    for _ in 0..2 {
        assert_eq!(backend.projects().get_by_id(missing).await, None);
        assert_eq!(
            backend
                .projects()
                .update(missing, ProjectPatch::default())
                .await,
            None
        );
        assert!(backend.projects().delete(missing).await);
        assert_eq!(backend.tasks().get_by_id(missing).await, None);
        assert_eq!(
            backend
                .tasks()
                .update(missing, TaskPatch::status(TaskStatus::Done))
                .await,
            None
        );
        assert!(backend.tasks().delete(missing).await);
        assert_eq!(
            backend.users().update(missing, UserPatch::default()).await,
            None
        );
    }

    let after = snapshot(&backend).await;
    assert_eq!(before, after);
}

#[tokio::test(start_paused = true)]
async fn deleting_a_project_removes_its_tasks() {
    let backend = backend();
    let doomed = backend.projects().create(new_project("doomed")).await;
    let kept = backend.projects().create(new_project("kept")).await;
    for title in ["a", "b", "c"] {
        backend
            .tasks()
            .create(new_task(doomed.id, title, "2024-01-01"))
            .await;
    }
    let survivor = backend
        .tasks()
        .create(new_task(kept.id, "survivor", "2024-01-01"))
        .await;

    assert!(backend.projects().delete(doomed.id).await);

    let tasks = backend.tasks().list().await;
    assert!(tasks.iter().all(|task| task.project_id != doomed.id));
    assert_eq!(tasks, vec![survivor]);
    assert!(backend.tasks().get_by_project_id(doomed.id).await.is_empty());
    assert_eq!(backend.projects().get_by_id(doomed.id).await, None);
}

#[tokio::test(start_paused = true)]
async fn deleting_a_task_is_idempotent() {
    let backend = backend();
    let project = backend.projects().create(new_project("alpha")).await;
    let task = backend
        .tasks()
        .create(new_task(project.id, "gone", "2024-01-01"))
        .await;

    assert!(backend.tasks().delete(task.id).await);
    assert!(backend.tasks().delete(task.id).await);
    assert!(backend.tasks().list().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn assigned_users_are_snapshots() {
    let backend = backend();
    let project = backend.projects().create(new_project("alpha")).await;
    let user = backend
        .users()
        .create(NewUser {
            name: "Alice".to_string(),
            avatar: "A".to_string(),
        })
        .await;
    let mut draft = new_task(project.id, "pair", "2024-01-01");
    draft.assigned_users = vec![user.clone()];
    let task = backend.tasks().create(draft).await;

    let renamed = backend
        .users()
        .update(user.id, UserPatch {
            name: Some("Alicia".to_string()),
            ..UserPatch::default()
        })
        .await
        .unwrap();
    assert_eq!(renamed.avatar, "A");

    let reloaded = backend.tasks().get_by_id(task.id).await.unwrap();
    assert_eq!(reloaded.assigned_users[0].name, "Alice");
}

#[tokio::test(start_paused = true)]
async fn overlapping_updates_resolve_in_completion_order() {
    let backend = backend();
    let project = backend.projects().create(new_project("alpha")).await;

    let slow = backend.projects();
    let fast = backend.with_latency(Duration::from_millis(100)).projects();
    let (issued_first, issued_second) = tokio::join!(
        slow.update(project.id, ProjectPatch {
            name: Some("issued first".to_string()),
            ..ProjectPatch::default()
        }),
        fast.update(project.id, ProjectPatch {
            name: Some("issued second".to_string()),
            ..ProjectPatch::default()
        }),
    );

    let issued_first = issued_first.unwrap();
    let issued_second = issued_second.unwrap();
    assert!(issued_first.updated_at > issued_second.updated_at);

    let current = backend.projects().get_by_id(project.id).await.unwrap();
    assert_eq!(current.name, "issued first");
}

#[tokio::test(start_paused = true)]
async fn task_with_unknown_project_is_still_created() {
    let backend = backend();
    let orphan_project = Uuid::new_v4();
    let task = backend
        .tasks()
        .create(new_task(orphan_project, "orphan", "2024-01-01"))
        .await;

    assert_eq!(
        backend.tasks().get_by_project_id(orphan_project).await,
        vec![task]
    );
}

#[tokio::test(start_paused = true)]
async fn create_then_complete_a_task() {
    let backend = backend();
    let project = backend
        .projects()
        .create(new_project("Website Redesign"))
        .await;

    let mut draft = new_task(project.id, "Design mockups", "2024-05-01");
    draft.priority = TaskPriority::High;
    let created = backend.tasks().create(draft).await;

    let listed = backend.tasks().get_by_project_id(project.id).await;
    assert_eq!(listed.len(), 1);
    let task = &listed[0];
    assert_eq!(task.title, "Design mockups");
    assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    assert_eq!(task.priority, TaskPriority::High);
    assert_eq!(task.status, TaskStatus::Todo);

    backend
        .tasks()
        .update(created.id, TaskPatch::status(TaskStatus::Done))
        .await
        .unwrap();

    let refetched = backend.tasks().get_by_id(created.id).await.unwrap();
    assert_eq!(refetched.status, TaskStatus::Done);
    assert!(refetched.updated_at > created.updated_at);
    assert_eq!(refetched.created_at, created.created_at);
}

#[tokio::test(start_paused = true)]
async fn user_delete_leaves_task_snapshots() {
    let backend = Backend::from_config(&BackendConfig::default());
    let users = backend.users().list().await;
    let tasks_before = backend.tasks().list().await;
    let bob = users
        .iter()
        .find(|user| user.name == "Bob Smith")
        .unwrap()
        .clone();

    assert!(backend.users().delete(bob.id).await);

    assert_eq!(backend.users().get_by_id(bob.id).await, None);
    assert_eq!(backend.tasks().list().await, tasks_before);
}

#[tokio::test]
async fn immediate_backend_skips_latency() {
    let backend = Backend::from_config(&BackendConfig::immediate());
    assert_eq!(backend.latency(), Duration::ZERO);
    assert!(backend.projects().list().await.is_empty());
}
