/// Services module
/// Business logic for session bookkeeping, remote execution, and the
/// persisted session file. Separated from the commands module so it stays
/// testable without a running Tauri app.

pub mod executor;
pub mod persist;
pub mod session;

pub use executor::ExecutionClient;
pub use session::{SessionStore, SharedSession};
