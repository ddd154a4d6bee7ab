//! Built-in tapes
//!
//! - [`ConsoleTape`]: `tag arg arg ...` lines on stdout
//! - [`DebugTape`]: per-tag debug channels filtered by the `DEBUG` variable
//! - [`TracingTape`]: forwards frames as `tracing` events
//! - [`MemoryTape`]: in-memory capture for tests and inspection

pub mod console;
pub mod debug;
pub mod memory;
pub mod trace;

pub use console::ConsoleTape;
pub use debug::{DebugChannel, DebugConfig, DebugTape};
pub use memory::MemoryTape;
pub use trace::{TracingTape, TARGET};
