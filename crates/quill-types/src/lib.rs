//! Quill Types - Shared domain types
//!
//! This crate contains domain types used across Quill services:
//! - User and note identifiers
//! - Issued token pairs

pub mod note;
pub mod token;
pub mod user;

pub use note::*;
pub use token::*;
pub use user::*;
