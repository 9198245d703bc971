/// Session file
/// Best-effort JSON mirror of the in-memory session, written on every
/// mutation and once more at exit. A convenience cache, not a system of
/// record: load failures fall back to the default session, save failures
/// are logged and swallowed.

use std::fs;
use std::path::{Path, PathBuf};

use tauri::Manager;

use crate::models::Session;
use crate::services::session::SessionStore;

pub const SESSION_FILE: &str = "session.json";

/// Where this app keeps its session mirror, per the platform's data dir.
pub fn session_path(app: &tauri::AppHandle) -> Option<PathBuf> {
    match app.path().app_data_dir() {
        Ok(dir) => Some(dir.join(SESSION_FILE)),
        Err(e) => {
            log::warn!("no app data dir, session will not persist: {}", e);
            None
        }
    }
}

/// Mirror the store to disk after a mutation. Best effort by design.
pub fn mirror(app: &tauri::AppHandle, store: &SessionStore) {
    if let Some(path) = session_path(app) {
        save(&path, &store.session());
    }
}

pub fn load(path: &Path) -> Option<Session> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            log::warn!("could not read session file {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("discarding corrupt session file {}: {}", path.display(), e);
            None
        }
    }
}

pub fn save(path: &Path, session: &Session) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            log::warn!("could not create {}: {}", parent.display(), e);
            return;
        }
    }
    match serde_json::to_string_pretty(session) {
        Ok(json) => {
            if let Err(e) = fs::write(path, json) {
                log::warn!("could not write session file {}: {}", path.display(), e);
            }
        }
        Err(e) => log::warn!("could not serialize session: {}", e),
    }
}
