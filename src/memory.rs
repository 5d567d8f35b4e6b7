use std::fmt;

use crate::process::Pid;

/// Identity of the page occupying a physical frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRef {
    pub pid: Pid,
    pub page: usize,
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{} page {}", self.pid, self.page)
    }
}

/// One physical frame: either free or bound to a (pid, page) pair, with the
/// logical time at which the current occupant was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSlot {
    pub occupant: Option<PageRef>,
    pub load_time: u64,
}

/// The fixed pool of physical frames.
///
/// At most one frame is ever bound to a given (pid, page) pair; the simulator
/// maintains that invariant by evicting before rebinding.
#[derive(Debug, Clone)]
pub struct PhysicalMemory {
    frames: Vec<FrameSlot>,
}

impl PhysicalMemory {
    pub fn new(num_frames: usize) -> Self {
        PhysicalMemory {
            frames: vec![FrameSlot::default(); num_frames],
        }
    }

    #[inline]
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn frame(&self, index: usize) -> &FrameSlot {
        &self.frames[index]
    }

    /// Index of the first free frame, scanning in index order.
    pub fn find_free(&self) -> Option<usize> {
        self.frames.iter().position(|slot| slot.occupant.is_none())
    }

    /// Bind a frame to an occupant, stamping it with the current logical time.
    pub fn bind(&mut self, index: usize, occupant: PageRef, now: u64) {
        self.frames[index] = FrameSlot {
            occupant: Some(occupant),
            load_time: now,
        };
    }

    /// Free a frame, returning whoever occupied it.
    pub fn release(&mut self, index: usize) -> Option<PageRef> {
        self.frames[index].occupant.take()
    }

    /// Free every frame and zero its load time.
    pub fn reset(&mut self) {
        for slot in &mut self.frames {
            *slot = FrameSlot::default();
        }
    }

    /// Read-only occupancy snapshot, one slot per frame in index order.
    pub fn occupants(&self) -> Vec<Option<PageRef>> {
        self.frames.iter().map(|slot| slot.occupant).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrameSlot> {
        self.frames.iter()
    }
}
