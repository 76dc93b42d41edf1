// Learn more about Tauri commands at https://tauri.app/develop/calling-rust/
mod commands;
mod events;
mod logging;
mod models;
mod state;
mod storage;
mod view;

#[cfg(all(feature = "app", not(test)))]
use tauri::Manager;

#[cfg(all(feature = "app", not(test)))]
use crate::commands::*;
#[cfg(all(feature = "app", not(test)))]
use crate::state::AppState;
#[cfg(all(feature = "app", not(test)))]
use crate::storage::Storage;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
#[cfg(all(feature = "app", not(test)))]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            let data_dir = app.path().app_data_dir()?;
            if let Err(error) = logging::init_logging(&data_dir) {
                eprintln!("logger init failed: {error}");
            }

            let storage = Storage::new(data_dir);
            storage.ensure_dirs()?;

            // Rehydrate the previous session; a missing or unreadable file
            // means a fresh start, not a failure.
            let tasks = storage
                .load_tasks()
                .map(|data| data.tasks)
                .unwrap_or_default();
            let settings = storage
                .load_settings()
                .map(|data| data.settings)
                .unwrap_or_default();
            log::info!("loaded {} task(s) from disk", tasks.len());

            app.manage(AppState::new(tasks, settings));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            load_state,
            create_task,
            toggle_task,
            rename_task,
            delete_task,
            clear_tasks,
            complete_all,
            filter_due_today,
            update_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
