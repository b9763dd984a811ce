// SPDX-License-Identifier: MIT OR Apache-2.0
//! Allocation counting
//!
//! [`CountingAllocator`] wraps the system allocator and counts allocations
//! and requested bytes. Register it with `#[global_allocator]` in a binary
//! and take [`AllocSnapshot`]s around the code under measurement.

use serde::Serialize;
use std::alloc::{GlobalAlloc, Layout, System};
use std::ops::Sub;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Global allocator that counts allocations
#[derive(Debug)]
pub struct CountingAllocator {
    alloc_count: AtomicUsize,
    alloc_bytes: AtomicUsize,
}

impl CountingAllocator {
    /// Allocator with zeroed counters
    #[must_use]
    pub const fn new() -> Self {
        Self {
            alloc_count: AtomicUsize::new(0),
            alloc_bytes: AtomicUsize::new(0),
        }
    }

    /// Current counter values
    #[must_use]
    pub fn snapshot(&self) -> AllocSnapshot {
        AllocSnapshot {
            count: self.alloc_count.load(Ordering::Relaxed),
            bytes: self.alloc_bytes.load(Ordering::Relaxed),
        }
    }
}

impl Default for CountingAllocator {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        self.alloc_count.fetch_add(1, Ordering::Relaxed);
        self.alloc_bytes.fetch_add(layout.size(), Ordering::Relaxed);
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        self.alloc_count.fetch_add(1, Ordering::Relaxed);
        if new_size > layout.size() {
            self.alloc_bytes
                .fetch_add(new_size - layout.size(), Ordering::Relaxed);
        }
        unsafe { System.realloc(ptr, layout, new_size) }
    }
}

/// Allocation counters at one point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AllocSnapshot {
    /// Allocations and reallocations
    pub count: usize,
    /// Bytes requested
    pub bytes: usize,
}

impl Sub for AllocSnapshot {
    type Output = Self;

    fn sub(self, earlier: Self) -> Self {
        Self {
            count: self.count.saturating_sub(earlier.count),
            bytes: self.bytes.saturating_sub(earlier.bytes),
        }
    }
}
