//! # formgate-core
//!
//! Core types, traits, and abstractions for the formgate intake server.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the database and HTTP layers depend on.

pub mod defaults;
pub mod error;
pub mod models;
pub mod traits;
pub mod upload_safety;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
pub use upload_safety::{validate_upload, UploadKind};
