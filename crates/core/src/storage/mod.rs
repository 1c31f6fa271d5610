pub mod blob;
pub mod file;
pub mod format;
pub mod manager;
pub mod memory;
