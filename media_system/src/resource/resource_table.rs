/// Resource table: id-indexed storage for one kind of device resource.
///
/// Ids come from a `SlotAllocator` bounded by the table capacity. Storage
/// is a growable `Vec<Option<T>>` indexed by id; it only ever grows, so an
/// id keeps its slot for as long as it is allocated.

use crate::error::{Error, ResourceKind, Result};
use crate::utils::SlotAllocator;

/// Storage reserved on the first allocation
const INITIAL_SLOTS: usize = 8;

pub struct ResourceTable<T> {
    kind: ResourceKind,
    allocator: SlotAllocator,
    slots: Vec<Option<T>>,
}

impl<T> ResourceTable<T> {
    /// Create an empty table holding at most `capacity` resources
    pub fn new(kind: ResourceKind, capacity: u32) -> Result<Self> {
        Ok(Self {
            kind,
            allocator: SlotAllocator::new(capacity)?,
            slots: Vec::new(),
        })
    }

    /// Allocate an id and fill its slot with the value built by `populate`
    ///
    /// `populate` receives the id about to be used. When it fails the id
    /// goes straight back to the allocator and the error is returned.
    ///
    /// # Errors
    ///
    /// `IdExceedsLimit` when every id is in use, or whatever `populate` returns.
    pub fn create<F>(&mut self, populate: F) -> Result<u32>
    where
        F: FnOnce(u32) -> Result<T>,
    {
        let id = self.allocator.allocate().ok_or(Error::IdExceedsLimit {
            kind: self.kind,
            capacity: self.allocator.capacity(),
        })?;

        match populate(id) {
            Ok(value) => {
                self.ensure_slot(id as usize);
                self.slots[id as usize] = Some(value);
                Ok(id)
            }
            Err(err) => {
                self.allocator.free(id);
                Err(err)
            }
        }
    }

    /// Remove the resource stored under `id` and free the id
    ///
    /// The resource is handed back so the caller can finish its teardown;
    /// it is released when dropped.
    pub fn release(&mut self, id: u32) -> Result<T> {
        self.check_range(id)?;
        let value = self
            .slots
            .get_mut(id as usize)
            .and_then(Option::take)
            .ok_or(Error::NullId { kind: self.kind, id })?;
        self.allocator.free(id);
        Ok(value)
    }

    /// Borrow the resource stored under `id`
    pub fn get(&self, id: u32) -> Result<&T> {
        self.check_range(id)?;
        self.slots
            .get(id as usize)
            .and_then(Option::as_ref)
            .ok_or(Error::NullId { kind: self.kind, id })
    }

    /// Mutably borrow the resource stored under `id`
    pub fn get_mut(&mut self, id: u32) -> Result<&mut T> {
        self.check_range(id)?;
        let kind = self.kind;
        self.slots
            .get_mut(id as usize)
            .and_then(Option::as_mut)
            .ok_or(Error::NullId { kind, id })
    }

    /// Whether `id` currently holds a resource
    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_ok()
    }

    /// Iterate over live resources with their ids
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|value| (id as u32, value)))
    }

    /// Release every resource and free every id
    ///
    /// Resources are dropped in id order.
    pub fn clear(&mut self) {
        for (id, slot) in self.slots.iter_mut().enumerate() {
            if slot.take().is_some() {
                self.allocator.free(id as u32);
            }
        }
    }

    /// Resource kind stored in this table
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Maximum number of live resources
    pub fn capacity(&self) -> u32 {
        self.allocator.capacity()
    }

    /// Number of live resources
    pub fn len(&self) -> u32 {
        self.allocator.len()
    }

    /// Whether the table holds no resource
    pub fn is_empty(&self) -> bool {
        self.allocator.is_empty()
    }

    /// Current number of storage slots (grows, never shrinks)
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn check_range(&self, id: u32) -> Result<()> {
        if id >= self.allocator.capacity() {
            return Err(Error::InvalidId { kind: self.kind, id });
        }
        Ok(())
    }

    fn ensure_slot(&mut self, index: usize) {
        if index < self.slots.len() {
            return;
        }
        let mut new_len = self.slots.len().max(INITIAL_SLOTS);
        while new_len <= index {
            new_len *= 2;
        }
        let new_len = new_len.min(self.allocator.capacity() as usize).max(index + 1);
        self.slots.resize_with(new_len, || None);
    }
}

#[cfg(test)]
#[path = "resource_table_tests.rs"]
mod tests;
