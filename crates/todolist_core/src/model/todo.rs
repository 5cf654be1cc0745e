//! Todo domain model.
//!
//! # Responsibility
//! - Define the user-owned task record persisted under `todos-<userId>`.
//! - Provide validation and partial-update application.
//!
//! # Invariants
//! - `id` is stable and never reused for another todo.
//! - `title` is non-empty after trimming.
//! - `created_at <= updated_at` once any mutation has been applied.

use crate::model::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a todo record.
pub type TodoId = Uuid;

/// Validation error for todo fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "todo title must not be empty"),
        }
    }
}

impl Error for TodoValidationError {}

/// User-owned task record.
///
/// Timestamps serialize as ISO-8601 strings to match the persisted JSON
/// shape expected by future backend integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    /// Owning user. Every operation on this record during a session is
    /// performed on behalf of this user.
    pub user_id: UserId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a todo, mirroring the REST update payload shape.
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl Todo {
    /// Creates a new todo owned by `user_id`.
    ///
    /// # Contract
    /// - Title and description are trimmed; an empty description becomes
    ///   `None`.
    /// - `completed` starts `false`.
    /// - `created_at == updated_at == now`.
    ///
    /// # Errors
    /// - `EmptyTitle` when the trimmed title is empty.
    pub fn new(
        user_id: UserId,
        title: &str,
        description: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self, TodoValidationError> {
        let title = normalize_title(title)?;
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            description: normalize_description(description),
            completed: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a partial update and bumps `updated_at`.
    ///
    /// # Errors
    /// - `EmptyTitle` when the patch carries an empty title; the record is
    ///   left unchanged in that case.
    pub fn apply_patch(
        &mut self,
        patch: &TodoPatch,
        now: DateTime<Utc>,
    ) -> Result<(), TodoValidationError> {
        let title = match &patch.title {
            Some(value) => Some(normalize_title(value)?),
            None => None,
        };
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = &patch.description {
            self.description = normalize_description(Some(description));
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Flips completion state and bumps `updated_at`.
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.completed = !self.completed;
        self.updated_at = now;
    }
}

fn normalize_title(title: &str) -> Result<String, TodoValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TodoValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
