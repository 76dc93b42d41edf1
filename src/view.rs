use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::models::{Priority, Task};

/// Display rank: High < Medium < Low < no priority.
fn priority_rank(priority: Option<Priority>) -> u8 {
    match priority {
        Some(Priority::High) => 0,
        Some(Priority::Medium) => 1,
        Some(Priority::Low) => 2,
        None => 3,
    }
}

/// Orders tasks for display. `sort_by_key` is stable, so tasks with equal
/// priority keep their relative insertion order and re-sorting an already
/// sorted slice never changes it.
pub fn sort_for_display(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| priority_rank(task.priority));
}

/// The calendar day used as the due-today boundary.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Tasks due exactly on `day`. Tasks without a due date never match.
pub fn due_on(tasks: &[Task], day: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.due_date == Some(day))
        .cloned()
        .collect()
}

/// Per-task view-model: exactly the fields a rendered row exposes.
#[derive(Debug, Clone, Serialize)]
pub struct TaskRow {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub due_label: Option<String>,
    pub priority_label: Option<&'static str>,
}

impl TaskRow {
    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            completed: task.completed,
            due_label: task.due_date.map(|date| date.format("%Y-%m-%d").to_string()),
            priority_label: task.priority.map(Priority::label),
        }
    }
}

/// Builds the sorted row list for a render. The backing collection is left
/// untouched; sorting happens on a copy.
pub fn build_rows(tasks: &[Task]) -> Vec<TaskRow> {
    let mut sorted = tasks.to_vec();
    sort_for_display(&mut sorted);
    sorted.iter().map(TaskRow::from_task).collect()
}
