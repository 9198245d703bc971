/// Commands module
/// All Tauri commands (IPC handlers) are defined here
/// Commands act as the boundary between frontend (web UI) and backend (Rust)

pub mod run;
pub mod session;
