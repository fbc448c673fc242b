//! Storage media for credential persistence
//!
//! This module provides two backends behind [`KeyValueStore`]:
//! 1. In-memory map (lives as long as the process)
//! 2. JSON file in the user's data directory (survives restarts)

mod traits;
mod memory;
mod file;

pub use traits::KeyValueStore;
pub use memory::MemoryStore;
pub use file::FileStore;
