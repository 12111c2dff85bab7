pub mod error;
pub mod handle;
pub mod query;

// Re-export commonly used types
pub use error::{ApiError, ApiResult};
pub use handle::{TypeHandle, TypeKind};
pub use query::TypeQuery;
