use crate::model::filter::{SortField, SortOrder, TaskFilter};
use crate::model::task::{priority_rank, Priority, Task};
use crate::repository::TaskSource;
use crate::service::dto::TaskDto;
use chrono::Local;
use anyhow::Result;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, trace};

pub struct TaskService<S: TaskSource> {
    source: S,
}

impl<S: TaskSource> TaskService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let tasks = self.source.list()?;
        let filtered = apply_filters(&tasks, filter);
        debug!(total = tasks.len(), shown = filtered.len(), "applied task filter");
        Ok(filtered)
    }

    pub fn list_task_views(&self, filter: &TaskFilter) -> Result<Vec<TaskDto>> {
        let now = Local::now();
        let dtos = self
            .list_tasks(filter)?
            .into_iter()
            .map(|t| TaskDto::from_entity(t, &now))
            .collect();
        Ok(dtos)
    }

    pub fn unique_tags(&self) -> Result<Vec<String>> {
        let tasks = self.source.list()?;
        Ok(extract_unique_tags(&tasks))
    }

    /// Next instance of every recurring task that has a due date.
    pub fn upcoming_occurrences(&self) -> Result<Vec<Task>> {
        let tasks = self.source.list()?;
        Ok(tasks.iter().filter_map(Task::next_occurrence).collect())
    }
}

// Standalone functions for pure logic

pub fn filter_by_tag(tasks: &[Task], tag: Option<&str>) -> Vec<Task> {
    match tag.filter(|t| !t.is_empty()) {
        Some(tag) => tasks.iter().filter(|t| t.has_tag(tag)).cloned().collect(),
        None => tasks.to_vec(),
    }
}

pub fn filter_by_priority(tasks: &[Task], priority: Option<Priority>) -> Vec<Task> {
    match priority {
        Some(p) => tasks.iter().filter(|t| t.priority == Some(p)).cloned().collect(),
        None => tasks.to_vec(),
    }
}

pub fn filter_by_completion(tasks: &[Task], completed: Option<bool>) -> Vec<Task> {
    match completed {
        Some(c) => tasks.iter().filter(|t| t.completed == c).cloned().collect(),
        None => tasks.to_vec(),
    }
}

/// Case-insensitive substring search over title and description.
pub fn search_tasks(tasks: &[Task], term: Option<&str>) -> Vec<Task> {
    let Some(term) = term.filter(|t| !t.is_empty()) else {
        return tasks.to_vec();
    };
    let needle = term.to_lowercase();

    tasks
        .iter()
        .filter(|t| {
            t.title.to_lowercase().contains(&needle)
                || t.description.as_ref().is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Stable sort of a copy of `tasks`.
///
/// The base direction puts the most important (priority) or newest
/// (created_at) task first; `SortOrder::Asc` reverses it. Defaults to
/// `created_at`, descending.
pub fn sort_tasks(
    tasks: &[Task],
    sort_by: Option<SortField>,
    order: Option<SortOrder>,
) -> Vec<Task> {
    let sort_by = sort_by.unwrap_or_default();
    let order = order.unwrap_or_default();

    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| {
        let comparison = compare(a, b, sort_by);
        match order {
            SortOrder::Asc => comparison.reverse(),
            SortOrder::Desc => comparison,
        }
    });
    sorted
}

fn compare(a: &Task, b: &Task, sort_by: SortField) -> Ordering {
    match sort_by {
        SortField::Priority => priority_rank(b.priority).cmp(&priority_rank(a.priority)),
        SortField::CreatedAt => b.created_at.cmp(&a.created_at),
        SortField::Unrecognized => Ordering::Equal,
    }
}

/// Runs search, priority, completion and tag filters in that order, then sorts.
pub fn apply_filters(tasks: &[Task], filter: &TaskFilter) -> Vec<Task> {
    let mut filtered = search_tasks(tasks, filter.search.as_deref());
    filtered = filter_by_priority(&filtered, filter.priority);
    filtered = filter_by_completion(&filtered, filter.completed);
    filtered = filter_by_tag(&filtered, filter.tag.as_deref());
    trace!(
        remaining = filtered.len(),
        sort = ?filter.sort,
        order = ?filter.order,
        "sorting filtered tasks"
    );

    sort_tasks(&filtered, filter.sort, filter.order)
}

/// Every distinct tag in the collection, in first-seen order.
pub fn extract_unique_tags(tasks: &[Task]) -> Vec<String> {
    let mut seen = HashSet::new();
    tasks
        .iter()
        .flat_map(|t| t.tags.iter())
        .filter(|tag| seen.insert(*tag))
        .cloned()
        .collect()
}
