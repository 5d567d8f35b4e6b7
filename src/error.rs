use thiserror::Error;

/// Fatal configuration errors, rejected before any simulation state exists.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    #[error("physical memory size must be greater than zero")]
    InvalidMemorySize,

    #[error("physical memory size {memory_size} is not a multiple of page size {page_size}")]
    Unaligned {
        memory_size: usize,
        page_size: usize,
    },

    #[error("process size must be greater than zero")]
    InvalidProcessSize,
}

/// Recoverable per-request translation faults.
///
/// These signal an invalid reference from the caller; the simulator state is
/// left untouched when one is returned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error("no process with pid {pid}")]
    InvalidProcess { pid: u32 },

    #[error("page {page} is outside the page table of process {pid}")]
    InvalidPage { pid: u32, page: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = ConfigError::Unaligned {
            memory_size: 10000,
            page_size: 4096,
        };
        assert_eq!(
            e.to_string(),
            "physical memory size 10000 is not a multiple of page size 4096"
        );

        let f = Fault::InvalidProcess { pid: 9 };
        assert_eq!(f.to_string(), "no process with pid 9");

        let f = Fault::InvalidPage { pid: 1, page: 4 };
        assert_eq!(f.to_string(), "page 4 is outside the page table of process 1");
    }
}
