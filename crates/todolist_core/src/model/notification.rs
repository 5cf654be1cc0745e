//! UI notification model.
//!
//! # Responsibility
//! - Define the transient toast record held by the UI container.
//! - Carry an explicit expiry deadline instead of a detached timer.
//!
//! # Invariants
//! - `expires_at == created_at + TTL`; the owning container sweeps records
//!   whose deadline has passed.
//! - Notifications are never persisted.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a notification.
pub type NotificationId = Uuid;

/// How long a notification stays visible before auto-removal.
pub const NOTIFICATION_TTL_MS: i64 = 5000;

/// Severity category for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

/// Transient toast message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
    /// Deadline after which the owning container removes this record.
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    /// Creates a notification with the standard TTL deadline.
    pub fn new(message: impl Into<String>, severity: Severity, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            created_at: now,
            expires_at: now + Duration::milliseconds(NOTIFICATION_TTL_MS),
        }
    }

    /// Returns whether the deadline has passed at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
