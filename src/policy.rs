use std::fmt;

use rand::{Rng, RngCore};

use crate::memory::PhysicalMemory;

/// Frame replacement strategy, invoked only when the pool is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Evict the frame with the minimum load time, ties broken by the lowest
    /// frame index. Approximates FIFO: a reloaded frame gets a fresh load
    /// time and moves to the back of the effective order.
    #[default]
    OldestLoad,
    /// Pick a frame uniformly at random, regardless of occupancy or age.
    Random,
}

impl Policy {
    /// Map the numeric policy selector: 0 is oldest-load, anything else is
    /// random.
    pub fn from_id(id: u32) -> Self {
        if id == 0 {
            Policy::OldestLoad
        } else {
            Policy::Random
        }
    }

    /// Choose a victim frame index from a full pool.
    pub fn select_victim(&self, memory: &PhysicalMemory, rng: &mut dyn RngCore) -> usize {
        match self {
            Policy::OldestLoad => oldest_frame(memory),
            Policy::Random => rng.gen_range(0..memory.num_frames()),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::OldestLoad => write!(f, "oldest-load (FIFO)"),
            Policy::Random => write!(f, "random"),
        }
    }
}

/// Linear scan for the minimum load time.
///
/// The strict comparison keeps the lowest index among equal load times; the
/// scan order is part of the contract and must not be replaced by a queue.
fn oldest_frame(memory: &PhysicalMemory) -> usize {
    let mut victim = 0;
    let mut oldest = u64::MAX;
    for (index, slot) in memory.iter().enumerate() {
        if slot.load_time < oldest {
            oldest = slot.load_time;
            victim = index;
        }
    }
    victim
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::PageRef;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rand::rngs::mock::StepRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn full_pool(load_times: &[u64]) -> PhysicalMemory {
        let mut pool = PhysicalMemory::new(load_times.len());
        for (index, &t) in load_times.iter().enumerate() {
            pool.bind(index, PageRef { pid: 1, page: index }, t);
        }
        pool
    }

    #[test]
    fn test_from_id() {
        assert_eq!(Policy::from_id(0), Policy::OldestLoad);
        assert_eq!(Policy::from_id(1), Policy::Random);
        assert_eq!(Policy::from_id(3), Policy::Random);
    }

    #[test]
    fn test_oldest_load_picks_minimum_load_time() {
        // Load times [2, 4, 1, 3]: frame 2 holds the oldest page
        let pool = full_pool(&[2, 4, 1, 3]);
        let mut rng = StepRng::new(0, 0);
        assert_eq!(Policy::OldestLoad.select_victim(&pool, &mut rng), 2);
    }

    #[test]
    fn test_oldest_load_tie_breaks_to_lowest_index() {
        let pool = full_pool(&[5, 1, 1, 9]);
        let mut rng = StepRng::new(0, 0);
        assert_eq!(Policy::OldestLoad.select_victim(&pool, &mut rng), 1);

        // All equal: first frame wins
        let pool = full_pool(&[3, 3, 3]);
        assert_eq!(Policy::OldestLoad.select_victim(&pool, &mut rng), 0);
    }

    #[test]
    fn test_random_stays_in_range() {
        let pool = full_pool(&[1, 2, 3, 4]);
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let victim = Policy::Random.select_victim(&pool, &mut rng);
            assert!(victim < pool.num_frames());
        }
    }

    #[test]
    fn test_random_reproducible_with_seeded_source() {
        let pool = full_pool(&[1, 2, 3, 4]);

        let mut a = Xoshiro256PlusPlus::seed_from_u64(42);
        let mut b = Xoshiro256PlusPlus::seed_from_u64(42);
        let picks_a: Vec<usize> = (0..20)
            .map(|_| Policy::Random.select_victim(&pool, &mut a))
            .collect();
        let picks_b: Vec<usize> = (0..20)
            .map(|_| Policy::Random.select_victim(&pool, &mut b))
            .collect();
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn test_random_ignores_age() {
        // A constant zero source always yields frame 0, even though frame 0
        // holds the newest page.
        let pool = full_pool(&[9, 1, 2, 3]);
        let mut rng = StepRng::new(0, 0);
        assert_eq!(Policy::Random.select_victim(&pool, &mut rng), 0);
    }
}
