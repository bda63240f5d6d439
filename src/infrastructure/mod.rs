pub mod data_source;
pub mod file_store;
pub mod http_store;
pub mod lexical_cache;
pub mod memory_store;

pub use data_source::DataSource;
pub use file_store::FileStore;
pub use http_store::HttpStore;
pub use lexical_cache::LexicalCache;
pub use memory_store::MemoryStore;
