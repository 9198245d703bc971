/// Session commands
/// Thin IPC wrappers over the session store: lock, delegate, mirror to
/// disk, hand a snapshot back so the front-end re-renders from backend
/// truth. Invalid operations are silent no-ops in the store, so these
/// never fail.

use tauri::{AppHandle, State};

use crate::models::{ExportPayload, Language, SessionSnapshot};
use crate::services::persist;
use crate::services::SharedSession;

/// Current state, for the front-end's initial render.
#[tauri::command]
pub fn session_snapshot(store: State<'_, SharedSession>) -> SessionSnapshot {
    store.lock().snapshot()
}

#[tauri::command]
pub fn create_buffer(app: AppHandle, store: State<'_, SharedSession>) -> SessionSnapshot {
    let mut session = store.lock();
    session.create_buffer();
    persist::mirror(&app, &session);
    session.snapshot()
}

#[tauri::command]
pub fn delete_buffer(
    app: AppHandle,
    store: State<'_, SharedSession>,
    index: usize,
) -> SessionSnapshot {
    let mut session = store.lock();
    session.delete_buffer(index);
    persist::mirror(&app, &session);
    session.snapshot()
}

#[tauri::command]
pub fn set_active(
    app: AppHandle,
    store: State<'_, SharedSession>,
    index: usize,
) -> SessionSnapshot {
    let mut session = store.lock();
    session.set_active(index);
    persist::mirror(&app, &session);
    session.snapshot()
}

#[tauri::command]
pub fn edit_source(
    app: AppHandle,
    store: State<'_, SharedSession>,
    text: String,
) -> SessionSnapshot {
    let mut session = store.lock();
    session.edit_source(text);
    persist::mirror(&app, &session);
    session.snapshot()
}

#[tauri::command]
pub fn set_language(
    app: AppHandle,
    store: State<'_, SharedSession>,
    language: Language,
) -> SessionSnapshot {
    let mut session = store.lock();
    session.set_language(language);
    persist::mirror(&app, &session);
    session.snapshot()
}

#[tauri::command]
pub fn set_stdin(
    app: AppHandle,
    store: State<'_, SharedSession>,
    text: String,
) -> SessionSnapshot {
    let mut session = store.lock();
    session.set_stdin(text);
    persist::mirror(&app, &session);
    session.snapshot()
}

#[tauri::command]
pub fn rename_buffer(
    app: AppHandle,
    store: State<'_, SharedSession>,
    index: usize,
    name: String,
) -> SessionSnapshot {
    let mut session = store.lock();
    session.rename_buffer(index, name);
    persist::mirror(&app, &session);
    session.snapshot()
}

/// Reset the active buffer's source, stdin, and last result. Language
/// stays.
#[tauri::command]
pub fn clear_buffer(app: AppHandle, store: State<'_, SharedSession>) -> SessionSnapshot {
    let mut session = store.lock();
    session.clear();
    persist::mirror(&app, &session);
    session.snapshot()
}

/// File name and contents of the active buffer, for the save-as dialog and
/// the copy-to-clipboard action.
#[tauri::command]
pub fn export_payload(store: State<'_, SharedSession>) -> ExportPayload {
    store.lock().export_payload()
}
