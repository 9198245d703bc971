/// Session store
/// Single source of truth for the open buffers, the active selection, the
/// shared stdin text, and the run latch. Commands reach it through the
/// managed `Arc<Mutex<...>>`; nothing else mutates session state.
///
/// Invariants held by every operation:
/// - the buffer list is never empty,
/// - the active index is always in bounds,
/// - invalid requests (delete the last buffer, out-of-range index) are
///   silent no-ops rather than errors.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::models::{BufferView, ExportPayload, FileBuffer, Language, Session, SessionSnapshot};

pub type SharedSession = Arc<Mutex<SessionStore>>;

pub struct SessionStore {
    buffers: Vec<FileBuffer>,
    active: usize,
    stdin: String,
    executing: bool,
    next_id: u64,
}

/// Everything a run needs once the store lock is released: the wire payload
/// plus the id of the buffer the result must come back to. Capturing the id
/// (not the tab index) is what keeps results on the right buffer when the
/// user switches tabs mid-request.
#[derive(Debug, Clone)]
pub struct RunJob {
    pub buffer_id: u64,
    pub language: Language,
    pub source: String,
    pub stdin: String,
}

impl Default for SessionStore {
    fn default() -> Self {
        SessionStore {
            buffers: vec![FileBuffer::new(1, Language::default())],
            active: 0,
            stdin: String::new(),
            executing: false,
            next_id: 2,
        }
    }
}

impl SessionStore {
    /// Rebuild a store from a rehydrated session file. A session that lost
    /// its buffers falls back to the default; an active index pointing past
    /// the end is clamped so the loaded buffers survive. Ids resume above
    /// the highest one seen so they stay unique.
    pub fn from_session(session: Session) -> Self {
        if session.buffers.is_empty() {
            return SessionStore::default();
        }
        let active = session.active.min(session.buffers.len() - 1);
        let next_id = session
            .buffers
            .iter()
            .map(|b| b.id)
            .max()
            .unwrap_or(0)
            + 1;
        SessionStore {
            buffers: session.buffers,
            active,
            stdin: session.stdin,
            executing: false,
            next_id,
        }
    }

    /// The persistable aggregate, cloned for the session file.
    pub fn session(&self) -> Session {
        Session {
            buffers: self.buffers.clone(),
            active: self.active,
            stdin: self.stdin.clone(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            buffers: self.buffers.iter().map(BufferView::from).collect(),
            active: self.active,
            stdin: self.stdin.clone(),
            executing: self.executing,
        }
    }

    /// Append a default-language buffer with its template, make it active.
    /// Stdin is scoped to the editing session, so it clears on the switch.
    pub fn create_buffer(&mut self) {
        let buffer = FileBuffer::new(self.next_id, Language::default());
        self.next_id += 1;
        self.buffers.push(buffer);
        self.active = self.buffers.len() - 1;
        self.stdin.clear();
    }

    /// Remove the buffer at `index`. Deleting the last remaining buffer or
    /// an out-of-range index is a no-op. The active index re-clamps,
    /// preferring the previous position.
    pub fn delete_buffer(&mut self, index: usize) {
        if self.buffers.len() <= 1 || index >= self.buffers.len() {
            return;
        }
        self.buffers.remove(index);
        if index <= self.active {
            self.active = self.active.saturating_sub(1);
        }
    }

    /// Switch the active buffer. Clears stdin as part of the switch; an
    /// out-of-range index or the current index changes nothing.
    pub fn set_active(&mut self, index: usize) {
        if index >= self.buffers.len() || index == self.active {
            return;
        }
        self.active = index;
        self.stdin.clear();
    }

    pub fn edit_source(&mut self, text: String) {
        self.buffers[self.active].source = text;
    }

    /// Change the active buffer's language. Always installs that language's
    /// template, discarding any edits: switching language resets the body.
    pub fn set_language(&mut self, language: Language) {
        let buffer = &mut self.buffers[self.active];
        buffer.language = language;
        buffer.source = language.template().to_string();
    }

    pub fn set_stdin(&mut self, text: String) {
        self.stdin = text;
    }

    /// Set or clear a buffer's label. No uniqueness constraint; an empty
    /// name removes the label so export falls back to the default.
    pub fn rename_buffer(&mut self, index: usize, name: String) {
        if let Some(buffer) = self.buffers.get_mut(index) {
            buffer.display_name = if name.is_empty() { None } else { Some(name) };
        }
    }

    /// Reset the active buffer's source, the shared stdin, and the last run
    /// result. The language stays.
    pub fn clear(&mut self) {
        self.stdin.clear();
        let buffer = &mut self.buffers[self.active];
        buffer.source.clear();
        buffer.last_result = None;
    }

    /// Raise the run latch and capture the active buffer's payload. There is
    /// no queuing: a second run while one is in flight is allowed, and the
    /// latch drops when whichever request settles first.
    pub fn begin_run(&mut self) -> RunJob {
        self.executing = true;
        let buffer = &self.buffers[self.active];
        RunJob {
            buffer_id: buffer.id,
            language: buffer.language,
            source: buffer.source.clone(),
            stdin: self.stdin.clone(),
        }
    }

    /// Drop the run latch and record the result on the buffer the run was
    /// started from, wherever it lives now. If that buffer was deleted in
    /// the meantime the result is dropped.
    pub fn finish_run(&mut self, buffer_id: u64, result: String) {
        self.executing = false;
        match self.buffers.iter_mut().find(|b| b.id == buffer_id) {
            Some(buffer) => buffer.last_result = Some(result),
            None => log::info!("dropping run result for deleted buffer {}", buffer_id),
        }
    }

    pub fn export_payload(&self) -> ExportPayload {
        let buffer = &self.buffers[self.active];
        ExportPayload {
            file_name: buffer.export_file_name(),
            contents: buffer.source.clone(),
        }
    }

    pub fn buffers(&self) -> &[FileBuffer] {
        &self.buffers
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_buffer(&self) -> &FileBuffer {
        &self.buffers[self.active]
    }

    pub fn stdin(&self) -> &str {
        &self.stdin
    }

    pub fn executing(&self) -> bool {
        self.executing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_python_buffer() {
        let store = SessionStore::default();
        assert_eq!(store.buffers().len(), 1);
        assert_eq!(store.active_index(), 0);
        assert_eq!(store.active_buffer().language, Language::Python3);
        assert_eq!(store.active_buffer().source, Language::Python3.template());
    }

    #[test]
    fn create_buffer_activates_it_and_clears_stdin() {
        let mut store = SessionStore::default();
        store.set_stdin("1 2 3".to_string());
        store.create_buffer();
        assert_eq!(store.buffers().len(), 2);
        assert_eq!(store.active_index(), 1);
        assert_eq!(store.stdin(), "");
    }

    #[test]
    fn delete_last_buffer_is_a_no_op() {
        let mut store = SessionStore::default();
        store.edit_source("keep me".to_string());
        store.delete_buffer(0);
        assert_eq!(store.buffers().len(), 1);
        assert_eq!(store.active_buffer().source, "keep me");
    }

    #[test]
    fn delete_out_of_range_is_a_no_op() {
        let mut store = SessionStore::default();
        store.create_buffer();
        store.delete_buffer(7);
        assert_eq!(store.buffers().len(), 2);
    }

    #[test]
    fn delete_active_buffer_prefers_previous_position() {
        let mut store = SessionStore::default();
        store.create_buffer();
        store.create_buffer();
        assert_eq!(store.active_index(), 2);
        store.delete_buffer(2);
        assert_eq!(store.active_index(), 1);
    }

    #[test]
    fn delete_before_active_shifts_active_down() {
        let mut store = SessionStore::default();
        store.create_buffer();
        store.create_buffer();
        let active_id = store.active_buffer().id;
        store.delete_buffer(0);
        assert_eq!(store.active_index(), 1);
        assert_eq!(store.active_buffer().id, active_id);
    }

    #[test]
    fn delete_first_of_two_keeps_surviving_buffer_active() {
        let mut store = SessionStore::default();
        store.create_buffer();
        let active_id = store.active_buffer().id;
        store.delete_buffer(0);
        assert_eq!(store.active_index(), 0);
        assert_eq!(store.active_buffer().id, active_id);
    }

    #[test]
    fn delete_after_active_leaves_active_alone() {
        let mut store = SessionStore::default();
        store.create_buffer();
        store.set_active(0);
        let active_id = store.active_buffer().id;
        store.delete_buffer(1);
        assert_eq!(store.active_index(), 0);
        assert_eq!(store.active_buffer().id, active_id);
    }

    #[test]
    fn list_never_empty_and_active_in_bounds_under_churn() {
        let mut store = SessionStore::default();
        for step in 0..64 {
            if step % 3 == 0 {
                store.create_buffer();
            } else {
                store.delete_buffer(step % 5);
            }
            assert!(!store.buffers().is_empty());
            assert!(store.active_index() < store.buffers().len());
        }
    }

    #[test]
    fn switching_tabs_clears_stdin() {
        let mut store = SessionStore::default();
        store.create_buffer();
        store.set_stdin("input".to_string());
        store.set_active(0);
        assert_eq!(store.stdin(), "");
    }

    #[test]
    fn set_active_out_of_range_is_a_no_op() {
        let mut store = SessionStore::default();
        store.set_stdin("input".to_string());
        store.set_active(9);
        assert_eq!(store.active_index(), 0);
        assert_eq!(store.stdin(), "input");
    }

    #[test]
    fn language_switch_resets_source_to_template() {
        let mut store = SessionStore::default();
        store.edit_source("my precious edits".to_string());
        store.set_language(Language::Java);
        assert_eq!(store.active_buffer().language, Language::Java);
        assert_eq!(store.active_buffer().source, Language::Java.template());
    }

    #[test]
    fn clear_keeps_language() {
        let mut store = SessionStore::default();
        store.set_language(Language::Cpp);
        store.set_stdin("in".to_string());
        store.finish_run(store.active_buffer().id, "out".to_string());
        store.clear();
        assert_eq!(store.active_buffer().source, "");
        assert_eq!(store.stdin(), "");
        assert_eq!(store.active_buffer().last_result, None);
        assert_eq!(store.active_buffer().language, Language::Cpp);
    }

    #[test]
    fn rename_sets_and_clears_label() {
        let mut store = SessionStore::default();
        store.rename_buffer(0, "main".to_string());
        assert_eq!(store.active_buffer().display_name.as_deref(), Some("main"));
        store.rename_buffer(0, String::new());
        assert_eq!(store.active_buffer().display_name, None);
        // out of range: ignored
        store.rename_buffer(4, "ghost".to_string());
    }

    #[test]
    fn run_result_follows_buffer_identity_across_tab_switch() {
        let mut store = SessionStore::default();
        store.create_buffer();
        let job = store.begin_run();
        assert!(store.executing());

        // user switches back to the first tab while the request is in flight
        store.set_active(0);
        store.finish_run(job.buffer_id, "42\n".to_string());

        assert!(!store.executing());
        assert_eq!(store.buffers()[0].last_result, None);
        assert_eq!(store.buffers()[1].last_result.as_deref(), Some("42\n"));
    }

    #[test]
    fn run_result_for_deleted_buffer_is_dropped() {
        let mut store = SessionStore::default();
        store.create_buffer();
        let job = store.begin_run();
        store.delete_buffer(1);
        store.finish_run(job.buffer_id, "late".to_string());
        assert!(!store.executing());
        assert!(store.buffers().iter().all(|b| b.last_result.is_none()));
    }

    #[test]
    fn session_round_trip_preserves_everything() {
        let mut store = SessionStore::default();
        store.create_buffer();
        store.set_language(Language::C);
        store.edit_source("int main() { return 7; }".to_string());
        store.rename_buffer(1, "seven".to_string());
        store.set_stdin("stdin text".to_string());

        let json = serde_json::to_string(&store.session()).unwrap();
        let restored = SessionStore::from_session(serde_json::from_str(&json).unwrap());

        assert_eq!(restored.buffers().len(), store.buffers().len());
        assert_eq!(restored.active_index(), store.active_index());
        assert_eq!(restored.stdin(), store.stdin());
        for (a, b) in restored.buffers().iter().zip(store.buffers()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.language, b.language);
            assert_eq!(a.source, b.source);
            assert_eq!(a.display_name, b.display_name);
        }
    }

    #[test]
    fn snapshot_buffers_carry_editor_mode_hint() {
        let mut store = SessionStore::default();
        store.create_buffer();
        store.set_language(Language::Cpp);
        let snapshot = store.snapshot();
        assert_eq!(snapshot.buffers[0].editor_mode, "python");
        assert_eq!(snapshot.buffers[1].editor_mode, "c_cpp");
    }

    #[test]
    fn rehydration_repairs_bad_active_index() {
        let session = Session {
            buffers: vec![FileBuffer::new(3, Language::Java)],
            active: 11,
            stdin: String::new(),
        };
        let store = SessionStore::from_session(session);
        assert_eq!(store.active_index(), 0);
        // ids resume above the highest persisted one
        let mut store = store;
        store.create_buffer();
        assert_eq!(store.buffers()[1].id, 4);
    }

    #[test]
    fn rehydration_of_empty_session_falls_back_to_default() {
        let session = Session {
            buffers: vec![],
            active: 0,
            stdin: "stale".to_string(),
        };
        let store = SessionStore::from_session(session);
        assert_eq!(store.buffers().len(), 1);
        assert_eq!(store.stdin(), "");
    }
}
