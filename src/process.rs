use crate::error::ConfigError;

/// Process identifier, assigned sequentially starting at 1 and never reused.
pub type Pid = u32;

/// Per-page metadata for one slot of a process's page table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageTableEntry {
    pub present: bool,
    pub frame: Option<usize>,
    pub modified: bool,
    pub referenced: bool,
    pub load_time: u64,
    pub last_access: u64,
}

impl PageTableEntry {
    /// Drop the frame binding, as on eviction or reset.
    pub fn unbind(&mut self) {
        self.present = false;
        self.frame = None;
    }
}

/// A simulated process: an identifier, a virtual size in bytes, and the page
/// table covering that size.
#[derive(Debug, Clone)]
pub struct Process {
    pid: Pid,
    byte_size: usize,
    page_table: Vec<PageTableEntry>,
}

impl Process {
    fn new(pid: Pid, byte_size: usize, page_size: usize) -> Self {
        let num_pages = byte_size.div_ceil(page_size);
        Process {
            pid,
            byte_size,
            page_table: vec![PageTableEntry::default(); num_pages],
        }
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub fn byte_size(&self) -> usize {
        self.byte_size
    }

    #[inline]
    pub fn num_pages(&self) -> usize {
        self.page_table.len()
    }

    /// Look up the table entry for a page, `None` if the page number is
    /// outside this process's address space.
    pub fn entry(&self, page: usize) -> Option<&PageTableEntry> {
        self.page_table.get(page)
    }

    pub fn entry_mut(&mut self, page: usize) -> Option<&mut PageTableEntry> {
        self.page_table.get_mut(page)
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut PageTableEntry> {
        self.page_table.iter_mut()
    }
}

/// Owns every process in the simulation and hands out sequential pids.
#[derive(Debug, Default)]
pub struct ProcessTable {
    processes: Vec<Process>,
}

impl ProcessTable {
    pub fn new() -> Self {
        ProcessTable::default()
    }

    /// Create a process of `byte_size` bytes with an all-absent page table of
    /// `ceil(byte_size / page_size)` entries.
    pub fn create(&mut self, byte_size: usize, page_size: usize) -> Result<Pid, ConfigError> {
        if byte_size == 0 {
            return Err(ConfigError::InvalidProcessSize);
        }
        let pid = self.processes.len() as Pid + 1;
        self.processes.push(Process::new(pid, byte_size, page_size));
        Ok(pid)
    }

    /// Linear lookup by pid. A miss is a normal outcome signaling an invalid
    /// reference from the caller, not an internal error.
    pub fn find(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    pub fn find_mut(&mut self, pid: Pid) -> Option<&mut Process> {
        self.processes.iter_mut().find(|p| p.pid == pid)
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Process> {
        self.processes.iter_mut()
    }
}
