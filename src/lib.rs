pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod logging;
pub mod memory;
pub mod process;
pub mod vm_manager;

// Re-export commonly used items for convenience
pub use config::Config;
pub use error::{AccessError, AllocationError, LoadError, RegistrationError};
pub use memory::{FrameIndex, MemoryPool};
pub use process::{LoadReport, PageAccessResult, ProcessId, ProcessSummary, ProcessTable};
pub use vm_manager::MemoryState;
