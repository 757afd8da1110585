//! Small self-contained helpers shared by the subsystems

pub mod slot_allocator;
pub mod fps_counter;

pub use slot_allocator::SlotAllocator;
pub use fps_counter::FpsCounter;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the data if a panicking thread poisoned it
pub fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
