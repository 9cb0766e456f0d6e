pub mod base;
pub mod file_storage;
pub mod memory_storage;
pub mod no_storage;

pub use base::{create_storage, ProfileStorage};
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;
pub use no_storage::NoStorage;
