//! Repository implementations over the content store.
//!
//! Every user-owned object carries `metadata.user`; repositories scope all
//! reads and writes with that filter so callers cannot reach another user's
//! records by ID.

pub mod category;
pub mod decode;
pub mod transaction;
pub mod user;

pub use category::CategoryRepository;
pub use transaction::{TransactionFilter, TransactionRepository};
pub use user::{UserRecord, UserRepository};

/// Metadata field holding the owning user's ID.
pub const OWNER_FIELD: &str = "metadata.user";
