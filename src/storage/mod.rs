pub mod engine;
pub mod file;
pub mod memory;

pub use engine::StorageBackend;
pub use file::FileStorage;
pub use memory::InMemoryStorage;
