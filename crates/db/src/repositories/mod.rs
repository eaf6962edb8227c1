//! Repository layer. Each repository is a zero-sized struct whose async
//! methods take a `&PgPool` as the first argument.
//!
//! Task and category methods take the owning `user_id` and include it in
//! every predicate.

pub mod category_repo;
pub mod task_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
