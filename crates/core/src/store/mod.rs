//! Record store implementations.

mod fs;
mod memory;

pub use fs::FsRecordStore;
pub use memory::MemoryRecordStore;
