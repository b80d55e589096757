//! SQLite implementation of the user store

pub mod backend_impl;
pub mod schema;
pub mod user_insert_impl;
pub mod user_read_impl;

pub use backend_impl::SqliteBackend;
pub use user_insert_impl::SqliteUserInserter;
pub use user_read_impl::SqliteUserReader;
