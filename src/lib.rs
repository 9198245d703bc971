/// CodeBox application
/// Multi-file code editor: web front-end, Rust session backend.
///
/// Module structure:
/// - commands: Tauri IPC handlers (frontend → backend)
/// - services: session store, execution client, session file
/// - models: serializable types shared across the IPC boundary

mod commands;
mod models;
mod services;

use std::sync::Arc;

use parking_lot::Mutex;
use tauri::{Manager, RunEvent};

use services::persist;
use services::{ExecutionClient, SessionStore, SharedSession};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            let store = persist::session_path(app.handle())
                .and_then(|path| persist::load(&path))
                .map(SessionStore::from_session)
                .unwrap_or_default();
            app.manage(Arc::new(Mutex::new(store)));
            app.manage(ExecutionClient::new());
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::session::session_snapshot,
            commands::session::create_buffer,
            commands::session::delete_buffer,
            commands::session::set_active,
            commands::session::edit_source,
            commands::session::set_language,
            commands::session::set_stdin,
            commands::session::rename_buffer,
            commands::session::clear_buffer,
            commands::session::export_payload,
            commands::run::run_active_buffer,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| {
            if let RunEvent::Exit = event {
                // Final mirror so the next launch picks up where this one left off
                log::info!("app shutting down - saving session");
                let store = app_handle.state::<SharedSession>();
                persist::mirror(app_handle, &store.lock());
            }
        });
}
