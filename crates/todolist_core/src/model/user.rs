//! User domain model.
//!
//! # Responsibility
//! - Define the session user record persisted under the `user` storage key.
//! - Synthesize identities for the mocked login/signup flows.
//!
//! # Invariants
//! - `id` is stable for the lifetime of one session.
//! - No credential material is ever stored on this record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a session user.
pub type UserId = Uuid;

/// Session user record.
///
/// There is no credential authority behind this type: login and signup
/// synthesize it unconditionally and persist it as a single JSON blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Fresh per-session ID. A new login may yield a different ID for the
    /// same email address.
    pub id: UserId,
    /// Uniqueness is assumed in practice, never enforced.
    pub email: String,
    /// Display name; defaults to the email local part when absent.
    pub name: Option<String>,
}

impl User {
    /// Synthesizes a user for a login/signup attempt.
    ///
    /// # Contract
    /// - Generates a fresh `id`.
    /// - `name = None` falls back to the email local part.
    pub fn synthesize(email: impl Into<String>, name: Option<String>) -> Self {
        let email = email.into();
        let name = name
            .filter(|value| !value.trim().is_empty())
            .or_else(|| derive_name(&email));
        Self {
            id: Uuid::new_v4(),
            email,
            name,
        }
    }
}

/// Derives a display name from the part of the email before `@`.
fn derive_name(email: &str) -> Option<String> {
    let local = email.split('@').next().unwrap_or("");
    let trimmed = local.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
