/// Run command
/// Submits the active buffer to the execution service and records the
/// outcome. The store lock is never held across the network await; the
/// result is routed back by buffer id, so switching tabs mid-request
/// cannot misfile it.

use tauri::{AppHandle, State};

use crate::models::SessionSnapshot;
use crate::services::executor::RunRequest;
use crate::services::persist;
use crate::services::{ExecutionClient, SharedSession};

#[tauri::command]
pub async fn run_active_buffer(
    app: AppHandle,
    store: State<'_, SharedSession>,
    client: State<'_, ExecutionClient>,
) -> Result<SessionSnapshot, String> {
    let job = store.lock().begin_run();
    log::info!(
        "submitting {:?} run for buffer {}",
        job.language,
        job.buffer_id
    );

    let result = client
        .submit(&RunRequest {
            src: &job.source,
            lang: job.language,
            stdin: &job.stdin,
        })
        .await;

    let mut session = store.lock();
    session.finish_run(job.buffer_id, result);
    persist::mirror(&app, &session);
    Ok(session.snapshot())
}
