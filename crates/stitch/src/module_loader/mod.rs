mod fs_loader;
mod memory_loader;

pub use self::{fs_loader::FsModuleLoader, memory_loader::MemoryModuleLoader};
