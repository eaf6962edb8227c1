//! Write-side operations shared by the HTTP handlers.
//!
//! Each command validates its input completely before the first write,
//! applies domain rules (defaults, the completion timestamp), and persists
//! through the user-scoped repositories. Rows owned by another user are
//! reported as not found.

pub mod category;
pub mod task;
