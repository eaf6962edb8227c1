//! Domain layer for TaskMitra.
//!
//! Pure types and rules shared by the repository and HTTP layers. Nothing in
//! this crate performs I/O.

pub mod category;
pub mod error;
pub mod task;
pub mod types;
pub mod validation;
