//! Logis Token Storage
//!
//! Persistent key/value storage for the client session:
//! - `TokenStore` trait
//! - File-backed, in-memory and detached (no-op) implementations
//! - `Session`, the three values a login leaves behind

pub mod atomic_writer;
pub mod detached;
pub mod file;
pub mod memory;
pub mod session;
pub mod traits;

pub use detached::DetachedTokenStore;
pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;
pub use session::{Session, keys};
pub use traits::{StorageError, StorageResult, TokenStore};
