//! HTTP glue shared by both API crates: the `AppError` response mapping,
//! bearer-token extractors, and common query-string types.

pub mod error;
pub mod extract;
pub mod query;

pub use error::{AppError, AppResult};
pub use extract::{AuthUser, RequireAdmin};
pub use query::PageQuery;
