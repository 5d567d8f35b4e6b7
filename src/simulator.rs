use log::{debug, trace};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::error::{ConfigError, Fault};
use crate::memory::{PageRef, PhysicalMemory};
use crate::policy::Policy;
use crate::process::{Pid, Process, ProcessTable};
use crate::translation::{VirtualAddress, compose};

/// How a translation request was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    /// The page was already bound to a frame.
    Hit,
    /// Page fault resolved with a free frame.
    ColdFault,
    /// Page fault resolved by evicting another mapping.
    CapacityFault,
}

/// One resolved translation, emitted for the reporting collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEvent {
    pub time: u64,
    pub pid: Pid,
    pub virtual_address: usize,
    pub page: usize,
    pub frame: usize,
    pub physical_address: usize,
    pub kind: AccessKind,
}

/// Cumulative access statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub total_accesses: u64,
    pub total_faults: u64,
    /// Faults per hundred accesses; 0.0 before the first access.
    pub fault_rate: f64,
}

/// The whole simulation state: clock, processes, frame pool, counters, and
/// the active replacement policy.
///
/// All mutation goes through [`translate`](Simulator::translate),
/// [`create_process`](Simulator::create_process),
/// [`set_policy`](Simulator::set_policy) and [`reset`](Simulator::reset);
/// everything else is a read-only snapshot.
pub struct Simulator {
    clock: u64,
    page_size: usize,
    physical_memory_size: usize,
    processes: ProcessTable,
    memory: PhysicalMemory,
    total_accesses: u64,
    total_faults: u64,
    policy: Policy,
    rng: Box<dyn RngCore>,
    events: Vec<TraceEvent>,
}

impl Simulator {
    /// Build a simulator with an entropy-seeded randomness source.
    pub fn new(page_size: usize, physical_memory_size: usize) -> Result<Self, ConfigError> {
        Self::with_rng(
            page_size,
            physical_memory_size,
            Box::new(SmallRng::from_entropy()),
        )
    }

    /// Build a simulator with an injected randomness source, for reproducible
    /// runs of the random policy.
    pub fn with_rng(
        page_size: usize,
        physical_memory_size: usize,
        rng: Box<dyn RngCore>,
    ) -> Result<Self, ConfigError> {
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        if physical_memory_size == 0 {
            return Err(ConfigError::InvalidMemorySize);
        }
        if physical_memory_size % page_size != 0 {
            return Err(ConfigError::Unaligned {
                memory_size: physical_memory_size,
                page_size,
            });
        }
        // The checks above guarantee at least one frame
        let num_frames = physical_memory_size / page_size;

        Ok(Simulator {
            clock: 0,
            page_size,
            physical_memory_size,
            processes: ProcessTable::new(),
            memory: PhysicalMemory::new(num_frames),
            total_accesses: 0,
            total_faults: 0,
            policy: Policy::default(),
            rng,
            events: Vec::new(),
        })
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[inline]
    pub fn physical_memory_size(&self) -> usize {
        self.physical_memory_size
    }

    #[inline]
    pub fn num_frames(&self) -> usize {
        self.memory.num_frames()
    }

    #[inline]
    pub fn clock(&self) -> u64 {
        self.clock
    }

    #[inline]
    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: Policy) {
        self.policy = policy;
    }

    /// Create a process and return its pid.
    pub fn create_process(&mut self, byte_size: usize) -> Result<Pid, ConfigError> {
        self.processes.create(byte_size, self.page_size)
    }

    pub fn find_process(&self, pid: Pid) -> Option<&Process> {
        self.processes.find(pid)
    }

    pub fn processes(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }

    /// Translate a virtual address for `pid` into a physical address.
    ///
    /// A miss on a valid page is resolved through the fault handler and
    /// counted as a page fault. On success the access counter and logical
    /// clock advance by one and a [`TraceEvent`] is recorded. A rejected
    /// request ([`Fault`]) mutates nothing.
    pub fn translate(&mut self, pid: Pid, virtual_address: usize) -> Result<usize, Fault> {
        let va = VirtualAddress::decompose(virtual_address, self.page_size);

        let bound_frame = {
            let process = self
                .processes
                .find(pid)
                .ok_or(Fault::InvalidProcess { pid })?;
            let entry = process
                .entry(va.page)
                .ok_or(Fault::InvalidPage { pid, page: va.page })?;
            if entry.present { entry.frame } else { None }
        };

        let (frame, kind) = match bound_frame {
            Some(frame) => (frame, AccessKind::Hit),
            None => self.load_page(pid, va.page)?,
        };

        let physical_address = compose(frame, va.offset, self.page_size);
        let event = TraceEvent {
            time: self.clock,
            pid,
            virtual_address,
            page: va.page,
            frame,
            physical_address,
            kind,
        };
        self.total_accesses += 1;
        self.clock += 1;
        self.events.push(event);

        trace!(
            "P{} {} -> frame {} PA {} ({:?})",
            pid, va, frame, physical_address, kind
        );
        Ok(physical_address)
    }

    /// Fault handler: obtain a frame for (pid, page) and bind the mapping.
    ///
    /// Uses a free frame when one exists, otherwise lets the active policy
    /// pick a victim and evicts its mapping first.
    fn load_page(&mut self, pid: Pid, page: usize) -> Result<(usize, AccessKind), Fault> {
        let process = self
            .processes
            .find(pid)
            .ok_or(Fault::InvalidProcess { pid })?;
        if page >= process.num_pages() {
            return Err(Fault::InvalidPage { pid, page });
        }

        let (frame, kind) = match self.memory.find_free() {
            Some(frame) => (frame, AccessKind::ColdFault),
            None => {
                let victim = self.policy.select_victim(&self.memory, self.rng.as_mut());
                if let Some(evicted) = self.memory.release(victim) {
                    debug!("evicting {} from frame {}", evicted, victim);
                    if let Some(entry) = self
                        .processes
                        .find_mut(evicted.pid)
                        .and_then(|p| p.entry_mut(evicted.page))
                    {
                        entry.unbind();
                    }
                }
                (victim, AccessKind::CapacityFault)
            }
        };

        let now = self.clock;
        self.memory.bind(frame, PageRef { pid, page }, now);
        if let Some(entry) = self.processes.find_mut(pid).and_then(|p| p.entry_mut(page)) {
            entry.present = true;
            entry.frame = Some(frame);
            entry.load_time = now;
            entry.last_access = now;
            entry.modified = false;
            entry.referenced = false;
        }
        self.total_faults += 1;

        debug!("page fault: P{} page {} loaded into frame {}", pid, page, frame);
        Ok((frame, kind))
    }

    /// Return the simulation to its initial state while keeping process
    /// identities and page-table shapes, so the same workload can be replayed
    /// under a different policy.
    pub fn reset(&mut self) {
        self.clock = 0;
        self.total_accesses = 0;
        self.total_faults = 0;
        self.memory.reset();
        for process in self.processes.iter_mut() {
            for entry in process.entries_mut() {
                entry.unbind();
            }
        }
        self.events.clear();
    }

    /// Read-only frame occupancy, one slot per frame in index order.
    pub fn snapshot_frames(&self) -> Vec<Option<PageRef>> {
        self.memory.occupants()
    }

    /// Read-only cumulative counters.
    pub fn snapshot_stats(&self) -> Stats {
        let fault_rate = if self.total_accesses > 0 {
            self.total_faults as f64 / self.total_accesses as f64 * 100.0
        } else {
            0.0
        };
        Stats {
            total_accesses: self.total_accesses,
            total_faults: self.total_faults,
            fault_rate,
        }
    }

    /// Drain the trace records accumulated since the last call (or reset).
    pub fn take_trace(&mut self) -> Vec<TraceEvent> {
        std::mem::take(&mut self.events)
    }

    /// Trace records accumulated so far, without draining them.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }
}
