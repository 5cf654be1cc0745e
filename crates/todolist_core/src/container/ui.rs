//! UI state container.
//!
//! # Responsibility
//! - Hold view routing, modal state and transient notifications.
//! - Sweep notifications whose expiry deadline has passed.
//!
//! # Invariants
//! - Nothing in this container is persisted; state is lost on restart.
//! - Expiry is deadline-based and owned by the container, so dropping the
//!   container cancels every pending removal.

use crate::clock::Clock;
use crate::model::notification::{Notification, NotificationId, Severity};
use log::info;
use serde::{Deserialize, Serialize};

/// Application view the UI is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Login,
    Signup,
    Dashboard,
    Settings,
}

/// Kind of modal dialog currently requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalType {
    CreateTodo,
    EditTodo,
    ConfirmDelete,
}

/// Ephemeral view/notification state.
pub struct UiContainer<C: Clock> {
    clock: C,
    current_view: View,
    show_modal: bool,
    modal_type: Option<ModalType>,
    modal_data: Option<serde_json::Value>,
    notifications: Vec<Notification>,
}

impl<C: Clock> UiContainer<C> {
    /// Creates a container routed to the default dashboard view.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            current_view: View::Dashboard,
            show_modal: false,
            modal_type: None,
            modal_data: None,
            notifications: Vec::new(),
        }
    }

    pub fn current_view(&self) -> View {
        self.current_view
    }

    pub fn set_current_view(&mut self, view: View) {
        self.current_view = view;
    }

    pub fn show_modal(&self) -> bool {
        self.show_modal
    }

    pub fn set_show_modal(&mut self, show: bool) {
        self.show_modal = show;
    }

    pub fn modal_type(&self) -> Option<ModalType> {
        self.modal_type
    }

    pub fn set_modal_type(&mut self, modal_type: Option<ModalType>) {
        self.modal_type = modal_type;
    }

    pub fn modal_data(&self) -> Option<&serde_json::Value> {
        self.modal_data.as_ref()
    }

    pub fn set_modal_data(&mut self, data: Option<serde_json::Value>) {
        self.modal_data = data;
    }

    /// Notifications in insertion order, including ones whose deadline has
    /// passed but not yet been swept.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Appends a notification with the standard auto-removal deadline.
    ///
    /// No queue bound and no deduplication: identical messages stack.
    pub fn add_notification(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        let toast = Notification::new(message, severity, self.clock.now());
        let id = toast.id;
        info!(
            "event=notification_add module=ui severity={:?} id={id}",
            severity
        );
        self.notifications.push(toast);
        id
    }

    /// Removes one notification by id. Unknown ids are ignored.
    pub fn remove_notification(&mut self, id: NotificationId) {
        self.notifications.retain(|toast| toast.id != id);
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }

    /// Sweeps notifications whose deadline has passed.
    ///
    /// Callers invoke this from their event loop tick; there is no detached
    /// timer to leak. Returns the number of removed records.
    pub fn expire_due(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.notifications.len();
        self.notifications.retain(|toast| !toast.is_expired(now));
        before - self.notifications.len()
    }
}
