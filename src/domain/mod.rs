//! Domain layer - core types and errors.
//!
//! Pure types with no I/O; everything that touches the file system lives in
//! the infrastructure layer.

pub mod error;
pub mod models;

pub use error::{Result, StateError};
pub use models::{Counter, Delay};
