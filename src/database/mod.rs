pub mod models;
pub mod pool;
pub mod repository;
pub mod schema;

pub use pool::StorageError;
pub use repository::{FormError, FormRepository, UserRepository};
