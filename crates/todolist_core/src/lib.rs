//! Core domain logic for the Todolist application.
//! This crate is the single source of truth for business invariants.

pub mod api;
pub mod clock;
pub mod container;
pub mod logging;
pub mod model;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use container::auth::{AuthContainer, AuthError};
pub use container::todos::{TodoContainer, TodoError, TodoResult};
pub use container::ui::{ModalType, UiContainer, View};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::notification::{Notification, NotificationId, Severity, NOTIFICATION_TTL_MS};
pub use model::todo::{Todo, TodoId, TodoPatch, TodoValidationError};
pub use model::user::{User, UserId};
pub use store::{todos_key, KvStore, MemoryStore, SqliteStore, StoreError, StoreResult, USER_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
