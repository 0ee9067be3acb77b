//! Task filter/sort pipeline for project views.
//!
//! # Responsibility
//! - Select the tasks matching a status and a priority filter.
//! - Order the selection by due date or by priority.
//!
//! # Invariants
//! - Pure: no I/O, same input always yields the same sequence.
//! - Sorting is stable; ties keep their original collection order.

use crate::model::project::ProjectId;
use crate::model::task::{Task, TaskPriority, TaskStatus};
use crate::model::ParseValueError;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const ALL: &str = "all";

/// Either every value, or exactly one.
///
/// String form is `all` or the inner value's string form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Filter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

impl<T: Display> Display for Filter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.pad(ALL),
            Self::Only(value) => value.fmt(f),
        }
    }
}

impl<T: FromStr> FromStr for Filter<T> {
    type Err = T::Err;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == ALL {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }
}

impl<T: Display> Serialize for Filter<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T> Deserialize<'de> for Filter<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

pub type StatusFilter = Filter<TaskStatus>;
pub type PriorityFilter = Filter<TaskPriority>;

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Earliest due date first.
    #[default]
    DueDate,
    /// Highest priority first.
    Priority,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DueDate => "due_date",
            Self::Priority => "priority",
        }
    }

    fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::DueDate => a.due_date.cmp(&b.due_date),
            Self::Priority => b.priority.cmp(&a.priority),
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "due_date" => Ok(Self::DueDate),
            "priority" => Ok(Self::Priority),
            other => Err(ParseValueError::new("sort key", other)),
        }
    }
}

/// Filter and sort settings for one project view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskViewCriteria {
    pub status: StatusFilter,
    pub priority: PriorityFilter,
    pub sort_by: SortKey,
}

impl TaskViewCriteria {
    pub fn accepts(&self, task: &Task) -> bool {
        self.status.matches(&task.status) && self.priority.matches(&task.priority)
    }
}

/// Returns the tasks accepted by `criteria`, ordered by `criteria.sort_by`.
pub fn apply<'a>(tasks: &'a [Task], criteria: &TaskViewCriteria) -> Vec<&'a Task> {
    let mut selected: Vec<&Task> = tasks.iter().filter(|task| criteria.accepts(task)).collect();
    // `sort_by` is stable, which keeps ties in collection order.
    selected.sort_by(|a, b| criteria.sort_by.compare(a, b));
    selected
}

/// Counts the tasks owned by `project_id`.
pub fn count_for_project(tasks: &[Task], project_id: ProjectId) -> usize {
    tasks
        .iter()
        .filter(|task| task.project_id == project_id)
        .count()
}

#[cfg(test)]
mod tests {
    use super::{apply, count_for_project, Filter, SortKey, StatusFilter, TaskViewCriteria};
    use crate::model::task::{Task, TaskPriority, TaskStatus};
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn task(title: &str, status: TaskStatus, priority: TaskPriority, due: &str) -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::new_v4(),
            project_id: Uuid::nil(),
            title: title.to_string(),
            description: None,
            status,
            priority,
            due_date: due.parse::<NaiveDate>().unwrap(),
            assigned_users: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn titles(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|task| task.title.clone()).collect()
    }

    #[test]
    fn sorts_by_due_date_ascending() {
        let tasks = vec![
            task("march", TaskStatus::Todo, TaskPriority::Low, "2024-03-05"),
            task("january", TaskStatus::Todo, TaskPriority::Low, "2024-01-01"),
            task("february", TaskStatus::Todo, TaskPriority::Low, "2024-02-15"),
        ];

        let view = apply(&tasks, &TaskViewCriteria::default());
        assert_eq!(titles(&view), vec!["january", "february", "march"]);
    }

    #[test]
    fn sorts_by_priority_descending() {
        let tasks = vec![
            task("low", TaskStatus::Todo, TaskPriority::Low, "2024-01-01"),
            task("high", TaskStatus::Todo, TaskPriority::High, "2024-01-01"),
            task("medium", TaskStatus::Todo, TaskPriority::Medium, "2024-01-01"),
        ];
        let criteria = TaskViewCriteria {
            sort_by: SortKey::Priority,
            ..TaskViewCriteria::default()
        };

        let view = apply(&tasks, &criteria);
        assert_eq!(titles(&view), vec!["high", "medium", "low"]);
    }

    #[test]
    fn ties_keep_collection_order() {
        let tasks = vec![
            task("a", TaskStatus::Todo, TaskPriority::High, "2024-02-01"),
            task("b", TaskStatus::Todo, TaskPriority::Low, "2024-01-01"),
            task("c", TaskStatus::Todo, TaskPriority::High, "2024-01-01"),
            task("d", TaskStatus::Todo, TaskPriority::Low, "2024-02-01"),
        ];

        let by_due = apply(&tasks, &TaskViewCriteria::default());
        assert_eq!(titles(&by_due), vec!["b", "c", "a", "d"]);

        let by_priority = apply(
            &tasks,
            &TaskViewCriteria {
                sort_by: SortKey::Priority,
                ..TaskViewCriteria::default()
            },
        );
        assert_eq!(titles(&by_priority), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn status_filter_keeps_matching_tasks_in_order() {
        let tasks = vec![
            task("one", TaskStatus::Todo, TaskPriority::Low, "2024-01-01"),
            task("two", TaskStatus::Done, TaskPriority::Low, "2024-01-01"),
            task("three", TaskStatus::InProgress, TaskPriority::Low, "2024-01-01"),
            task("four", TaskStatus::Done, TaskPriority::Low, "2024-01-01"),
        ];
        let criteria = TaskViewCriteria {
            status: Filter::Only(TaskStatus::Done),
            ..TaskViewCriteria::default()
        };

        let view = apply(&tasks, &criteria);
        assert_eq!(titles(&view), vec!["two", "four"]);
    }

    #[test]
    fn status_and_priority_filters_combine() {
        let tasks = vec![
            task("todo-high", TaskStatus::Todo, TaskPriority::High, "2024-01-01"),
            task("todo-low", TaskStatus::Todo, TaskPriority::Low, "2024-01-01"),
            task("done-high", TaskStatus::Done, TaskPriority::High, "2024-01-01"),
        ];
        let criteria = TaskViewCriteria {
            status: Filter::Only(TaskStatus::Todo),
            priority: Filter::Only(TaskPriority::High),
            sort_by: SortKey::DueDate,
        };

        assert_eq!(titles(&apply(&tasks, &criteria)), vec!["todo-high"]);
    }

    #[test]
    fn repeated_application_is_identical() {
        let tasks = vec![
            task("x", TaskStatus::Todo, TaskPriority::Medium, "2024-04-01"),
            task("y", TaskStatus::Done, TaskPriority::High, "2024-04-01"),
            task("z", TaskStatus::Todo, TaskPriority::High, "2024-03-01"),
        ];
        let criteria = TaskViewCriteria {
            sort_by: SortKey::Priority,
            ..TaskViewCriteria::default()
        };

        assert_eq!(apply(&tasks, &criteria), apply(&tasks, &criteria));
    }

    #[test]
    fn filter_strings_match_stored_format() {
        assert_eq!(StatusFilter::All.to_string(), "all");
        assert_eq!(
            "in-progress".parse::<StatusFilter>().unwrap(),
            Filter::Only(TaskStatus::InProgress)
        );
        assert_eq!(serde_json::to_string(&StatusFilter::All).unwrap(), "\"all\"");
        assert_eq!(
            serde_json::from_str::<Filter<TaskPriority>>("\"high\"").unwrap(),
            Filter::Only(TaskPriority::High)
        );
        assert!(serde_json::from_str::<StatusFilter>("\"blocked\"").is_err());
        assert_eq!(serde_json::to_string(&SortKey::DueDate).unwrap(), "\"due_date\"");
    }

    #[test]
    fn counts_tasks_per_project() {
        let mut tasks = vec![
            task("a", TaskStatus::Todo, TaskPriority::Low, "2024-01-01"),
            task("b", TaskStatus::Todo, TaskPriority::Low, "2024-01-01"),
        ];
        let other = Uuid::new_v4();
        tasks[1].project_id = other;

        assert_eq!(count_for_project(&tasks, Uuid::nil()), 1);
        assert_eq!(count_for_project(&tasks, other), 1);
        assert_eq!(count_for_project(&tasks, Uuid::new_v4()), 0);
    }
}
