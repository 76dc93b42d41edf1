use std::path::PathBuf;

use chrono::NaiveDate;

#[cfg(all(feature = "app", not(test)))]
use crate::events::EVENT_VIEW_UPDATED;
use crate::events::ViewPayload;
use crate::models::{Priority, Settings, Task};
use crate::state::AppState;
use crate::storage::{Storage, StorageError};
use crate::view::{build_rows, due_on, local_today, TaskRow};

#[cfg(all(feature = "app", not(test)))]
use tauri::{AppHandle, Emitter, Manager, Runtime, State};

const EMPTY_TITLE_ERROR: &str = "Title must not be empty";

#[derive(Debug, serde::Serialize)]
pub struct CommandResult<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

trait CommandCtx {
    fn app_data_dir(&self) -> Result<PathBuf, StorageError>;
    fn emit_view_updated(&self, payload: ViewPayload);
}

fn ok<T>(data: T) -> CommandResult<T> {
    CommandResult {
        ok: true,
        data: Some(data),
        error: None,
    }
}

fn err<T>(message: &str) -> CommandResult<T> {
    CommandResult {
        ok: false,
        data: None,
        error: Some(message.to_string()),
    }
}

fn view_payload(state: &AppState, rows: Vec<TaskRow>) -> ViewPayload {
    ViewPayload {
        rows,
        show_bulk_actions: !state.tasks().is_empty(),
        input_error: state.input_error(),
        settings: state.settings(),
    }
}

fn full_view(state: &AppState) -> ViewPayload {
    view_payload(state, build_rows(&state.tasks()))
}

fn emit_view(ctx: &impl CommandCtx, state: &AppState) {
    ctx.emit_view_updated(full_view(state));
}

fn write_state(ctx: &impl CommandCtx, state: &AppState) -> Result<(), StorageError> {
    let storage = Storage::new(ctx.app_data_dir()?);
    storage.ensure_dirs()?;
    storage.save_tasks(&state.tasks_file())?;
    storage.save_settings(&state.settings_file())
}

fn persist(ctx: &impl CommandCtx, state: &AppState) -> Result<(), StorageError> {
    if let Err(error) = write_state(ctx, state) {
        // The mutation already happened in memory; only the disk copy is stale.
        log::warn!("state kept in memory but not written to disk: {error}");
        return Err(error);
    }
    emit_view(ctx, state);
    Ok(())
}

#[cfg(all(feature = "app", not(test)))]
struct TauriCommandCtx<'a, R: Runtime> {
    app: &'a AppHandle<R>,
}

#[cfg(all(feature = "app", not(test)))]
impl<R: Runtime> CommandCtx for TauriCommandCtx<'_, R> {
    fn app_data_dir(&self) -> Result<PathBuf, StorageError> {
        self.app
            .path()
            .app_data_dir()
            .map_err(|err| StorageError::Io(std::io::Error::other(err.to_string())))
    }

    fn emit_view_updated(&self, payload: ViewPayload) {
        let _ = self.app.emit(EVENT_VIEW_UPDATED, payload);
    }
}

fn load_state_impl(ctx: &impl CommandCtx, state: &AppState) -> CommandResult<ViewPayload> {
    let root = match ctx.app_data_dir() {
        Ok(path) => path,
        Err(e) => return err(&format!("app_data_dir error: {e}")),
    };
    let storage = Storage::new(root);
    if let Err(error) = storage.ensure_dirs() {
        return err(&format!("storage error: {error:?}"));
    }
    let tasks = storage
        .load_tasks()
        .map(|data| data.tasks)
        .unwrap_or_default();
    let settings = storage
        .load_settings()
        .map(|data| data.settings)
        .unwrap_or_else(|_| Settings::default());
    state.replace_tasks(tasks);
    state.update_settings(settings);

    let payload = full_view(state);
    ctx.emit_view_updated(payload.clone());
    ok(payload)
}

fn create_task_impl(
    ctx: &impl CommandCtx,
    state: &AppState,
    title: String,
    due_date: Option<NaiveDate>,
    priority: Option<Priority>,
) -> CommandResult<Task> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        // The indicator stays up until the next valid submission.
        state.set_input_error(Some(EMPTY_TITLE_ERROR.to_string()));
        emit_view(ctx, state);
        return err(EMPTY_TITLE_ERROR);
    }

    state.set_input_error(None);
    let task = state.create_task(trimmed, due_date, priority);
    if let Err(error) = persist(ctx, state) {
        return err(&format!("storage error: {error:?}"));
    }
    ok(task)
}

fn toggle_task_impl(ctx: &impl CommandCtx, state: &AppState, task_id: i64) -> CommandResult<bool> {
    if state.toggle_completion(task_id).is_none() {
        return ok(false);
    }
    if let Err(error) = persist(ctx, state) {
        return err(&format!("storage error: {error:?}"));
    }
    ok(true)
}

fn rename_task_impl(
    ctx: &impl CommandCtx,
    state: &AppState,
    task_id: i64,
    new_title: String,
) -> CommandResult<bool> {
    let trimmed = new_title.trim();
    // Empty or cancelled edits leave the task as it was.
    if trimmed.is_empty() {
        return ok(false);
    }
    if state.rename_task(task_id, trimmed).is_none() {
        return ok(false);
    }
    if let Err(error) = persist(ctx, state) {
        return err(&format!("storage error: {error:?}"));
    }
    ok(true)
}

fn delete_task_impl(ctx: &impl CommandCtx, state: &AppState, task_id: i64) -> CommandResult<bool> {
    state.remove_task(task_id);
    if let Err(error) = persist(ctx, state) {
        return err(&format!("storage error: {error:?}"));
    }
    ok(true)
}

fn clear_tasks_impl(ctx: &impl CommandCtx, state: &AppState) -> CommandResult<bool> {
    state.clear_tasks();
    if let Err(error) = persist(ctx, state) {
        return err(&format!("storage error: {error:?}"));
    }
    ok(true)
}

fn complete_all_impl(ctx: &impl CommandCtx, state: &AppState) -> CommandResult<bool> {
    state.complete_all();
    if let Err(error) = persist(ctx, state) {
        return err(&format!("storage error: {error:?}"));
    }
    ok(true)
}

/// Rendering-only: emits a view restricted to tasks due today without
/// touching the collection or the disk. The next full render (any mutation
/// or `load_state`) restores all tasks.
fn filter_due_today_impl(ctx: &impl CommandCtx, state: &AppState) -> CommandResult<ViewPayload> {
    let rows = build_rows(&due_on(&state.tasks(), local_today()));
    let payload = view_payload(state, rows);
    ctx.emit_view_updated(payload.clone());
    ok(payload)
}

fn update_settings_impl(
    ctx: &impl CommandCtx,
    state: &AppState,
    mut settings: Settings,
) -> CommandResult<Settings> {
    let previous = state.settings();

    settings.background_color = settings.background_color.trim().to_string();
    if !is_valid_color(&settings.background_color) {
        return err(&format!(
            "invalid background color: {}",
            settings.background_color
        ));
    }
    // Normalize user input so the persisted config is stable.
    let next_theme = settings.theme.trim().to_lowercase();
    settings.theme = match next_theme.as_str() {
        "light" | "dark" => next_theme.clone(),
        _ => Settings::default().theme,
    };

    state.update_settings(settings.clone());
    if let Err(error) = persist(ctx, state) {
        // Roll back in-memory settings to keep the running app consistent.
        state.update_settings(previous);
        return err(&format!("storage error: {error:?}"));
    }
    ok(settings)
}

fn is_valid_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub fn load_state(app: AppHandle, state: State<AppState>) -> CommandResult<ViewPayload> {
    let ctx = TauriCommandCtx { app: &app };
    load_state_impl(&ctx, state.inner())
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub fn create_task(
    app: AppHandle,
    state: State<AppState>,
    title: String,
    due_date: Option<NaiveDate>,
    priority: Option<Priority>,
) -> CommandResult<Task> {
    let ctx = TauriCommandCtx { app: &app };
    create_task_impl(&ctx, state.inner(), title, due_date, priority)
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub fn toggle_task(app: AppHandle, state: State<AppState>, task_id: i64) -> CommandResult<bool> {
    let ctx = TauriCommandCtx { app: &app };
    toggle_task_impl(&ctx, state.inner(), task_id)
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub fn rename_task(
    app: AppHandle,
    state: State<AppState>,
    task_id: i64,
    new_title: String,
) -> CommandResult<bool> {
    let ctx = TauriCommandCtx { app: &app };
    rename_task_impl(&ctx, state.inner(), task_id, new_title)
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub fn delete_task(app: AppHandle, state: State<AppState>, task_id: i64) -> CommandResult<bool> {
    let ctx = TauriCommandCtx { app: &app };
    delete_task_impl(&ctx, state.inner(), task_id)
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub fn clear_tasks(app: AppHandle, state: State<AppState>) -> CommandResult<bool> {
    let ctx = TauriCommandCtx { app: &app };
    clear_tasks_impl(&ctx, state.inner())
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub fn complete_all(app: AppHandle, state: State<AppState>) -> CommandResult<bool> {
    let ctx = TauriCommandCtx { app: &app };
    complete_all_impl(&ctx, state.inner())
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub fn filter_due_today(app: AppHandle, state: State<AppState>) -> CommandResult<ViewPayload> {
    let ctx = TauriCommandCtx { app: &app };
    filter_due_today_impl(&ctx, state.inner())
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub fn update_settings(
    app: AppHandle,
    state: State<AppState>,
    settings: Settings,
) -> CommandResult<Settings> {
    let ctx = TauriCommandCtx { app: &app };
    update_settings_impl(&ctx, state.inner(), settings)
}
