use crate::error::{Error, Result};

/// Ids per group (bits in one group word)
pub const GROUP_SIZE: u32 = 32;

/// Upper bound on groups, one per bit of the summary word
pub const MAX_GROUPS: usize = 32;

/// Largest supported capacity
pub const MAX_CAPACITY: u32 = GROUP_SIZE * MAX_GROUPS as u32;

/// Allocates and recycles unique `u32` ids from a bounded pool.
///
/// Ids live in groups of 32, one bitmask word per group, and a summary
/// word keeps one bit per group that is set when the group is full.
/// Allocation skips full groups through the summary, then picks the
/// lowest clear bit of the chosen group, so the lowest unused id is
/// always handed out first.
///
/// Bits past `capacity` (the tail of the last group and every group that
/// does not exist) are kept permanently set, which lets the summary word
/// double as the exhaustion check.
///
/// # Example
///
/// ```ignore
/// let mut alloc = SlotAllocator::new(64)?;
/// let a = alloc.allocate();  // Some(0)
/// let b = alloc.allocate();  // Some(1)
/// alloc.free(0);             // 0 is now available
/// let c = alloc.allocate();  // Some(0) (lowest free id)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAllocator {
    capacity: u32,
    len: u32,
    group_summary: u32,
    group_bits: [u32; MAX_GROUPS],
}

impl SlotAllocator {
    /// Create an empty allocator handing out ids in `[0, capacity)`
    ///
    /// # Errors
    ///
    /// `InitializationFailed` when `capacity` is 0 or above `MAX_CAPACITY`.
    pub fn new(capacity: u32) -> Result<Self> {
        if capacity == 0 || capacity > MAX_CAPACITY {
            return Err(Error::InitializationFailed(format!(
                "Slot allocator capacity {} outside 1..={}",
                capacity, MAX_CAPACITY
            )));
        }

        let mut group_bits = [u32::MAX; MAX_GROUPS];
        let mut group_summary = u32::MAX;

        let full_groups = (capacity / GROUP_SIZE) as usize;
        for group in 0..full_groups {
            group_bits[group] = 0;
            group_summary &= !(1 << group);
        }

        let tail = capacity % GROUP_SIZE;
        if tail != 0 {
            // Ids past the capacity stay marked as used forever
            group_bits[full_groups] = u32::MAX << tail;
            group_summary &= !(1 << full_groups);
        }

        Ok(Self {
            capacity,
            len: 0,
            group_summary,
            group_bits,
        })
    }

    /// Allocate the lowest unused id, or `None` when every id is in use
    pub fn allocate(&mut self) -> Option<u32> {
        if self.group_summary == u32::MAX {
            return None;
        }

        let group = self.group_summary.trailing_ones() as usize;
        let bits = self.group_bits[group];
        let bit = bits.trailing_ones();

        let bits = bits | (1 << bit);
        self.group_bits[group] = bits;
        if bits == u32::MAX {
            self.group_summary |= 1 << group;
        }

        self.len += 1;
        Some(group as u32 * GROUP_SIZE + bit)
    }

    /// Return an id to the pool
    ///
    /// The id must come from `allocate` and must not have been freed
    /// since. Freeing a free id leaves the bits untouched but skews `len`.
    pub fn free(&mut self, id: u32) {
        debug_assert!(id < self.capacity, "freeing an out of range slot: {}", id);

        let group = (id / GROUP_SIZE) as usize;
        let bit = id % GROUP_SIZE;

        self.group_bits[group] &= !(1 << bit);
        // A group can no longer be full once one member is free
        self.group_summary &= !(1 << group);
        self.len = self.len.saturating_sub(1);
    }

    /// Whether `id` is currently allocated
    pub fn is_allocated(&self, id: u32) -> bool {
        if id >= self.capacity {
            return false;
        }
        let group = (id / GROUP_SIZE) as usize;
        self.group_bits[group] & (1 << (id % GROUP_SIZE)) != 0
    }

    /// Number of ids this allocator can hand out
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Number of currently allocated ids
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether no ids are currently allocated
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of groups covering the capacity
    pub fn group_count(&self) -> usize {
        self.capacity.div_ceil(GROUP_SIZE) as usize
    }

    /// Bitmask of group `group` (bit n set when id `group * 32 + n` is taken)
    pub fn group_bits(&self, group: usize) -> u32 {
        self.group_bits[group]
    }

    /// Summary word (bit g set when group g is full)
    pub fn group_summary(&self) -> u32 {
        self.group_summary
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "slot_allocator_tests.rs"]
mod tests;
