//! Todo state container.
//!
//! # Responsibility
//! - Hold the current user's todo list and mirror it to `todos-<userId>`.
//! - Provide fetch/create/update/delete/toggle operations.
//!
//! # Invariants
//! - Mutations require an authenticated user, passed in explicitly.
//! - Every mutation updates memory first, then replaces the stored list in
//!   full. A failed write leaves memory and storage diverged until the
//!   next fetch; there is no partial-write recovery.
//! - Insertion order is the only ordering.

use crate::clock::Clock;
use crate::model::todo::{Todo, TodoId, TodoPatch, TodoValidationError};
use crate::model::user::User;
use crate::store::{todos_key, KvStore, StoreError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TodoResult<T> = Result<T, TodoError>;

/// Todo operation error.
#[derive(Debug)]
pub enum TodoError {
    /// Operation attempted without a session.
    NotAuthenticated,
    /// Input rejected before any state changed.
    Validation(TodoValidationError),
    /// No record with the given id in the current list.
    NotFound(TodoId),
    /// Storage read, write or decode failure.
    Store(StoreError),
}

impl Display for TodoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "not signed in; log in to manage todos"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::Store(err) => write!(f, "todo storage failure: {err}"),
        }
    }
}

impl Error for TodoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NotAuthenticated | Self::NotFound(_) => None,
        }
    }
}

impl From<TodoValidationError> for TodoError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for TodoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Todo list state over an injected key-value store and clock.
pub struct TodoContainer<'s, S: KvStore, C: Clock> {
    store: &'s S,
    clock: C,
    todos: Vec<Todo>,
    error: Option<String>,
}

impl<'s, S: KvStore, C: Clock> TodoContainer<'s, S, C> {
    pub fn new(store: &'s S, clock: C) -> Self {
        Self {
            store,
            clock,
            todos: Vec::new(),
            error: None,
        }
    }

    /// Current in-memory list in insertion order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Last operation failure message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Reloads the list from storage.
    ///
    /// # Contract
    /// - No user: clears the list and succeeds.
    /// - Absent key reads as an empty list.
    /// - Read or parse failure surfaces as a storage error; the previous
    ///   in-memory list is kept.
    pub fn fetch_todos(&mut self, user: Option<&User>) -> TodoResult<()> {
        self.error = None;
        let Some(user) = user else {
            self.todos.clear();
            return Ok(());
        };

        match self.load(user) {
            Ok(todos) => {
                info!(
                    "event=fetch_todos module=todos status=ok user_id={} count={}",
                    user.id,
                    todos.len()
                );
                self.todos = todos;
                Ok(())
            }
            Err(err) => self.fail("fetch_todos", err),
        }
    }

    /// Creates a todo owned by `user` and returns a copy of the record.
    ///
    /// # Errors
    /// - `NotAuthenticated` without a user.
    /// - `Validation` for an empty or whitespace-only title; the list is
    ///   unchanged in that case.
    /// - `Store` when the full-list rewrite fails (memory already updated).
    pub fn create_todo(
        &mut self,
        user: Option<&User>,
        title: &str,
        description: Option<&str>,
    ) -> TodoResult<Todo> {
        self.error = None;
        let Some(user) = user else {
            return self.fail("create_todo", TodoError::NotAuthenticated);
        };

        let todo = match Todo::new(user.id, title, description, self.clock.now()) {
            Ok(todo) => todo,
            Err(err) => return self.fail("create_todo", err.into()),
        };

        self.todos.push(todo.clone());
        if let Err(err) = self.persist(user) {
            return self.fail("create_todo", err);
        }

        info!(
            "event=create_todo module=todos status=ok user_id={} todo_id={}",
            user.id, todo.id
        );
        Ok(todo)
    }

    /// Applies partial fields to one record and bumps its `updated_at`.
    pub fn update_todo(
        &mut self,
        user: Option<&User>,
        id: TodoId,
        patch: &TodoPatch,
    ) -> TodoResult<()> {
        self.error = None;
        let Some(user) = user else {
            return self.fail("update_todo", TodoError::NotAuthenticated);
        };

        let now = self.clock.now();
        let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) else {
            return self.fail("update_todo", TodoError::NotFound(id));
        };
        if let Err(err) = todo.apply_patch(patch, now) {
            return self.fail("update_todo", err.into());
        }

        if let Err(err) = self.persist(user) {
            return self.fail("update_todo", err);
        }

        info!(
            "event=update_todo module=todos status=ok user_id={} todo_id={id}",
            user.id
        );
        Ok(())
    }

    /// Flips one record's completion state and bumps its `updated_at`.
    pub fn toggle_todo(&mut self, user: Option<&User>, id: TodoId) -> TodoResult<()> {
        self.error = None;
        let Some(user) = user else {
            return self.fail("toggle_todo", TodoError::NotAuthenticated);
        };

        let now = self.clock.now();
        let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) else {
            return self.fail("toggle_todo", TodoError::NotFound(id));
        };
        todo.toggle(now);

        if let Err(err) = self.persist(user) {
            return self.fail("toggle_todo", err);
        }

        info!(
            "event=toggle_todo module=todos status=ok user_id={} todo_id={id}",
            user.id
        );
        Ok(())
    }

    /// Removes exactly one record by id.
    pub fn delete_todo(&mut self, user: Option<&User>, id: TodoId) -> TodoResult<()> {
        self.error = None;
        let Some(user) = user else {
            return self.fail("delete_todo", TodoError::NotAuthenticated);
        };

        let Some(index) = self.todos.iter().position(|todo| todo.id == id) else {
            return self.fail("delete_todo", TodoError::NotFound(id));
        };
        self.todos.remove(index);

        if let Err(err) = self.persist(user) {
            return self.fail("delete_todo", err);
        }

        info!(
            "event=delete_todo module=todos status=ok user_id={} todo_id={id}",
            user.id
        );
        Ok(())
    }

    fn load(&self, user: &User) -> TodoResult<Vec<Todo>> {
        match self.store.get(&todos_key(user.id))? {
            Some(raw) => {
                let todos = serde_json::from_str(&raw).map_err(StoreError::from)?;
                Ok(todos)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Replaces the stored list in full with the in-memory list.
    fn persist(&self, user: &User) -> TodoResult<()> {
        let raw = serde_json::to_string(&self.todos).map_err(StoreError::from)?;
        self.store.set(&todos_key(user.id), &raw)?;
        Ok(())
    }

    fn fail<T>(&mut self, operation: &str, err: TodoError) -> TodoResult<T> {
        error!("event={operation} module=todos status=error error={err}");
        self.error = Some(err.to_string());
        Err(err)
    }
}
