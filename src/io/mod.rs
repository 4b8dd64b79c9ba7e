//! Upload sources.
//!
//! This module provides:
//! - `UploadSource`: Trait for anything an upload can be read from
//! - `FileUpload` / `StdinUpload`: filesystem and stdin sources
//! - `MemoryUpload`: in-memory source for tests and embedding callers

mod input;
mod memory;
mod std_io;

pub use input::UploadSource;
pub use memory::MemoryUpload;
pub use std_io::{FileUpload, StdinUpload};
