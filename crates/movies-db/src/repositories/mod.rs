//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! take `&PgPool` as the first argument. Upserts are atomic
//! `INSERT ... ON CONFLICT` statements so concurrent writers cannot violate
//! the per-(user, title) uniqueness invariant.

pub mod list_repo;
pub mod rating_repo;
pub mod review_repo;
pub mod title_repo;
pub mod user_repo;

pub use list_repo::ListRepo;
pub use rating_repo::RatingRepo;
pub use review_repo::ReviewRepo;
pub use title_repo::TitleRepo;
pub use user_repo::UserRepo;
