//! Quill Auth Core - Authentication business logic
//!
//! Core authentication functionality including password hashing, JWT
//! signing, and single-use refresh token rotation.

pub mod config;
pub mod crypto;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::*;
pub use crypto::*;
pub use error::*;
pub use password::*;
pub use service::*;
pub use token::*;
