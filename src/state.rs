use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};

use crate::models::{Priority, Settings, SettingsFile, Task, TasksFile};

const SCHEMA_VERSION: u32 = 1;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(tasks: Vec<Task>, settings: Settings) -> Self {
        let next_id = next_id_after(&tasks);
        Self {
            inner: Arc::new(Mutex::new(AppData {
                tasks,
                settings,
                next_id,
                input_error: None,
            })),
        }
    }

    pub fn tasks_file(&self) -> TasksFile {
        let guard = self.inner.lock().expect("state poisoned");
        TasksFile {
            schema_version: SCHEMA_VERSION,
            tasks: guard.tasks.clone(),
        }
    }

    pub fn settings_file(&self) -> SettingsFile {
        let guard = self.inner.lock().expect("state poisoned");
        SettingsFile {
            schema_version: SCHEMA_VERSION,
            settings: guard.settings.clone(),
        }
    }

    pub fn tasks(&self) -> Vec<Task> {
        let guard = self.inner.lock().expect("state poisoned");
        guard.tasks.clone()
    }

    /// Appends a new task built from already-validated input and returns it.
    /// Ids come from a store-owned monotonic counter and stay unique for the
    /// lifetime of the collection.
    pub fn create_task(
        &self,
        title: &str,
        due_date: Option<NaiveDate>,
        priority: Option<Priority>,
    ) -> Task {
        let mut guard = self.inner.lock().expect("state poisoned");
        let now = Utc::now().timestamp();
        let task = Task {
            id: guard.next_id,
            title: title.to_string(),
            completed: false,
            due_date,
            priority,
            created_at: now,
            updated_at: now,
        };
        guard.next_id += 1;
        guard.tasks.push(task.clone());
        task
    }

    pub fn toggle_completion(&self, task_id: i64) -> Option<Task> {
        let mut guard = self.inner.lock().expect("state poisoned");
        let now = Utc::now().timestamp();
        guard.tasks.iter_mut().find(|t| t.id == task_id).map(|task| {
            task.completed = !task.completed;
            task.updated_at = now;
            task.clone()
        })
    }

    pub fn rename_task(&self, task_id: i64, new_title: &str) -> Option<Task> {
        let mut guard = self.inner.lock().expect("state poisoned");
        let now = Utc::now().timestamp();
        guard.tasks.iter_mut().find(|t| t.id == task_id).map(|task| {
            task.title = new_title.to_string();
            task.updated_at = now;
            task.clone()
        })
    }

    pub fn remove_task(&self, task_id: i64) {
        let mut guard = self.inner.lock().expect("state poisoned");
        guard.tasks.retain(|task| task.id != task_id);
    }

    pub fn clear_tasks(&self) {
        let mut guard = self.inner.lock().expect("state poisoned");
        guard.tasks.clear();
    }

    /// One-way bulk completion: already-completed tasks stay completed.
    pub fn complete_all(&self) {
        let mut guard = self.inner.lock().expect("state poisoned");
        let now = Utc::now().timestamp();
        for task in &mut guard.tasks {
            if !task.completed {
                task.completed = true;
                task.updated_at = now;
            }
        }
    }

    /// Swaps in a rehydrated collection and re-seeds the id counter.
    pub fn replace_tasks(&self, tasks: Vec<Task>) {
        let mut guard = self.inner.lock().expect("state poisoned");
        guard.next_id = next_id_after(&tasks);
        guard.tasks = tasks;
    }

    pub fn input_error(&self) -> Option<String> {
        let guard = self.inner.lock().expect("state poisoned");
        guard.input_error.clone()
    }

    pub fn set_input_error(&self, message: Option<String>) {
        let mut guard = self.inner.lock().expect("state poisoned");
        guard.input_error = message;
    }

    pub fn settings(&self) -> Settings {
        let guard = self.inner.lock().expect("state poisoned");
        guard.settings.clone()
    }

    pub fn update_settings(&self, settings: Settings) {
        let mut guard = self.inner.lock().expect("state poisoned");
        guard.settings = settings;
    }
}

fn next_id_after(tasks: &[Task]) -> i64 {
    tasks.iter().map(|task| task.id).max().unwrap_or(0) + 1
}

#[derive(Debug)]
struct AppData {
    tasks: Vec<Task>,
    settings: Settings,
    next_id: i64,
    input_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    fn make_task(id: i64, title: &str) -> Task {
        Task {
            id,
            title: title.to_string(),
            completed: false,
            due_date: None,
            priority: None,
            created_at: 1,
            updated_at: 1,
        }
    }

    #[test]
    fn new_seeds_id_counter_past_existing_tasks() {
        let state = AppState::new(vec![make_task(3, "a"), make_task(9, "b")], Settings::default());
        let created = state.create_task("c", None, None);
        assert_eq!(created.id, 10);
    }

    #[test]
    fn create_task_appends_incomplete_tasks_with_unique_ids() {
        let state = AppState::new(Vec::new(), Settings::default());
        let first = state.create_task("first", None, Some(Priority::High));
        let second = state.create_task("second", None, None);

        assert!(!first.completed);
        assert!(!second.completed);
        assert_ne!(first.id, second.id);
        assert_eq!(second.id, first.id + 1);

        let tasks = state.tasks();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "first");
        assert_eq!(tasks[1].title, "second");
    }

    #[test]
    fn toggle_completion_twice_is_an_involution() {
        let state = AppState::new(vec![make_task(1, "a")], Settings::default());

        let once = state.toggle_completion(1).expect("task exists");
        assert!(once.completed);
        let twice = state.toggle_completion(1).expect("task exists");
        assert!(!twice.completed);

        assert!(state.toggle_completion(404).is_none());
    }

    #[test]
    fn rename_task_updates_only_the_matching_task() {
        let state = AppState::new(vec![make_task(1, "a"), make_task(2, "b")], Settings::default());

        let renamed = state.rename_task(2, "renamed").expect("task exists");
        assert_eq!(renamed.title, "renamed");

        let tasks = state.tasks();
        assert_eq!(tasks[0].title, "a");
        assert_eq!(tasks[1].title, "renamed");

        assert!(state.rename_task(404, "missing").is_none());
    }

    #[test]
    fn remove_task_with_unknown_id_leaves_collection_unchanged() {
        let state = AppState::new(vec![make_task(1, "a"), make_task(2, "b")], Settings::default());

        state.remove_task(404);
        assert_eq!(state.tasks().len(), 2);

        state.remove_task(1);
        let tasks = state.tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, 2);
    }

    #[test]
    fn complete_all_marks_every_task_completed() {
        let mut done = make_task(1, "done");
        done.completed = true;
        let state = AppState::new(
            vec![done, make_task(2, "open"), make_task(3, "open too")],
            Settings::default(),
        );

        state.complete_all();
        assert!(state.tasks().iter().all(|t| t.completed));
    }

    #[test]
    fn clear_tasks_empties_the_collection() {
        let state = AppState::new(vec![make_task(1, "a")], Settings::default());
        state.clear_tasks();
        assert!(state.tasks().is_empty());
    }

    #[test]
    fn replace_tasks_reseeds_the_id_counter() {
        let state = AppState::new(Vec::new(), Settings::default());
        state.replace_tasks(vec![make_task(41, "a")]);
        let created = state.create_task("b", None, None);
        assert_eq!(created.id, 42);
    }

    #[test]
    fn input_error_is_stored_until_cleared() {
        let state = AppState::new(Vec::new(), Settings::default());
        assert_eq!(state.input_error(), None);

        state.set_input_error(Some("title required".to_string()));
        assert_eq!(state.input_error(), Some("title required".to_string()));

        state.set_input_error(None);
        assert_eq!(state.input_error(), None);
    }

    #[test]
    fn update_settings_replaces_previous_value() {
        let state = AppState::new(Vec::new(), Settings::default());
        let mut next = Settings::default();
        next.theme = "dark".to_string();
        state.update_settings(next.clone());
        assert_eq!(state.settings().theme, "dark");
    }
}
