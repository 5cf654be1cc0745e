//! Domain model for users, todos and UI notifications.
//!
//! # Responsibility
//! - Define the canonical records mirrored between memory and storage.
//! - Keep validation rules next to the data they protect.
//!
//! # Invariants
//! - Every record is identified by a stable v4 UUID.
//! - Todo titles are non-empty after trimming.

pub mod notification;
pub mod todo;
pub mod user;
