//! Application state containers.
//!
//! # Responsibility
//! - Hold the in-memory state for auth, todos and UI concerns.
//! - Mirror durable state to the injected key-value store.
//!
//! # Invariants
//! - Containers are explicit structs wired by constructor injection; there
//!   are no ambient singletons.
//! - Every operation runs to completion; failures are recorded as a
//!   human-readable message in the container's error slot and returned to
//!   the caller. None are fatal.

pub mod auth;
pub mod todos;
pub mod ui;
