//! A demand-paging virtual memory simulator.
//!
//! Models virtual-to-physical address translation for multiple processes
//! sharing a fixed pool of physical frames: per-process page tables,
//! page-fault handling, and two interchangeable replacement policies
//! (oldest load time and uniform random).

pub mod error;
pub mod memory;
pub mod policy;
pub mod process;
pub mod simulator;
pub mod translation;

// Re-export commonly used items for convenience
pub use error::{ConfigError, Fault};
pub use memory::{FrameSlot, PageRef};
pub use policy::Policy;
pub use process::{PageTableEntry, Pid, Process};
pub use simulator::{AccessKind, Simulator, Stats, TraceEvent};
pub use translation::VirtualAddress;
