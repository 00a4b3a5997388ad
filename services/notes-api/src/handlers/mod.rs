//! HTTP handlers

mod auth;
mod health;
mod notes;

pub use auth::{login, refresh, register};
pub use health::{health, ready};
pub use notes::{delete_note, list_notes, save_note};
