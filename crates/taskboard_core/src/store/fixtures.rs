//! Demo records loaded by `EntityStore::seeded`.
//!
//! Identifiers are fixed so preferences keyed by project id stay meaningful
//! across restarts.

use crate::model::project::Project;
use crate::model::task::{Task, TaskPriority, TaskStatus};
use crate::model::user::User;
use crate::model::Timestamp;
use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

/// Fixed id of the seeded "Website Redesign" project.
pub const WEBSITE_PROJECT_ID: Uuid = Uuid::from_u128(0x5f1c_0a7e_2b1d_4c3a_9e00_0000_0000_0001);
/// Fixed id of the seeded "Mobile App" project.
pub const MOBILE_PROJECT_ID: Uuid = Uuid::from_u128(0x5f1c_0a7e_2b1d_4c3a_9e00_0000_0000_0002);

pub(super) fn records() -> (Vec<User>, Vec<Project>, Vec<Task>) {
    let alice = user(0x01, "Alice Johnson", "👩‍💼");
    let bob = user(0x02, "Bob Smith", "👨‍💻");
    let carol = user(0x03, "Carol Davis", "👩‍🎨");
    let dan = user(0x04, "Dan Wilson", "👨‍🔬");

    let created = stamp(2024, 1, 10);
    let projects = vec![
        Project {
            id: WEBSITE_PROJECT_ID,
            name: "Website Redesign".to_string(),
            description: Some("Refresh the marketing site and component library".to_string()),
            created_at: created,
            updated_at: created,
        },
        Project {
            id: MOBILE_PROJECT_ID,
            name: "Mobile App".to_string(),
            description: Some("First release of the companion app".to_string()),
            created_at: created,
            updated_at: created,
        },
    ];

    let tasks = vec![
        task(
            0x01,
            WEBSITE_PROJECT_ID,
            "Design mockups",
            TaskStatus::InProgress,
            TaskPriority::High,
            date(2024, 2, 15),
            vec![carol.clone()],
        ),
        task(
            0x02,
            WEBSITE_PROJECT_ID,
            "Audit accessibility",
            TaskStatus::Todo,
            TaskPriority::Medium,
            date(2024, 3, 1),
            vec![alice.clone(), bob.clone()],
        ),
        task(
            0x03,
            WEBSITE_PROJECT_ID,
            "Set up analytics",
            TaskStatus::Done,
            TaskPriority::Low,
            date(2024, 1, 20),
            vec![bob.clone()],
        ),
        task(
            0x04,
            MOBILE_PROJECT_ID,
            "Define navigation flow",
            TaskStatus::Todo,
            TaskPriority::High,
            date(2024, 2, 5),
            vec![dan.clone(), carol.clone()],
        ),
        task(
            0x05,
            MOBILE_PROJECT_ID,
            "Write API client",
            TaskStatus::InProgress,
            TaskPriority::Medium,
            date(2024, 2, 28),
            vec![bob.clone()],
        ),
    ];

    (vec![alice, bob, carol, dan], projects, tasks)
}

fn user(seq: u128, name: &str, avatar: &str) -> User {
    User {
        id: Uuid::from_u128(0x7a3e_61d2_0c44_4b8f_a100_0000_0000_0000 | seq),
        name: name.to_string(),
        avatar: avatar.to_string(),
    }
}

fn task(
    seq: u128,
    project_id: Uuid,
    title: &str,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: NaiveDate,
    assigned_users: Vec<User>,
) -> Task {
    let created = stamp(2024, 1, 12);
    Task {
        id: Uuid::from_u128(0x2c9b_44f0_8d1e_4f6a_b200_0000_0000_0000 | seq),
        project_id,
        title: title.to_string(),
        description: None,
        status,
        priority,
        due_date,
        assigned_users,
        created_at: created,
        updated_at: created,
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn stamp(year: i32, month: u32, day: u32) -> Timestamp {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0)
        .single()
        .unwrap_or_default()
}
