//! Raw memory providers for [`GrowableArray`](crate::GrowableArray).

use std::{alloc::Layout, ptr::NonNull};

use growable_budget::Budget;

/// A source of raw memory blocks.
///
/// Failures are reported as `None` rather than aborting, so the caller can
/// surface them as errors and keep its current block.
///
/// # Safety
///
/// A returned pointer must be valid for reads and writes of `layout.size()` bytes,
/// aligned to `layout.align()`, and remain valid until it is passed to
/// `reallocate` or `deallocate` of the same allocator.
pub unsafe trait RawAlloc {
    /// Allocates a block for `layout`. `layout.size()` is never zero.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Resizes the block at `ptr` to `new_size` bytes, keeping the alignment of
    /// `old_layout` and the common prefix of its contents.
    ///
    /// On `None` the original block is left untouched and still owned by the caller.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator for `old_layout`, and
    /// `new_size` must be non-zero and not overflow `isize::MAX` when rounded up
    /// to the alignment.
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>>;

    /// Releases the block at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator for `layout` and not
    /// released since.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The global heap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Heap;

unsafe impl RawAlloc for Heap {
    #[inline]
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        debug_assert_ne!(layout.size(), 0);
        NonNull::new(unsafe { std::alloc::alloc(layout) })
    }

    #[inline]
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        NonNull::new(unsafe { std::alloc::realloc(ptr.as_ptr(), old_layout, new_size) })
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

/// The global heap, gated by a [`Budget`].
///
/// Every byte held through this allocator is charged to the budget. A request
/// the budget cannot cover fails before the heap is touched.
#[derive(Debug, Clone)]
pub struct BudgetedHeap {
    budget: Budget,
}

impl BudgetedHeap {
    pub fn new(budget: Budget) -> BudgetedHeap {
        BudgetedHeap { budget }
    }

    /// Creates an allocator with its own budget of `limit` bytes.
    pub fn with_limit(limit: u64) -> BudgetedHeap {
        BudgetedHeap::new(Budget::new(limit))
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }
}

unsafe impl RawAlloc for BudgetedHeap {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        let size = layout.size() as u64;
        self.budget.try_acquire(size).ok()?;
        let ptr = Heap.allocate(layout);
        if ptr.is_none() {
            self.budget.release(size);
        }
        ptr
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        let old_size = old_layout.size() as u64;
        let new_size_u64 = new_size as u64;
        if new_size_u64 > old_size {
            let delta = new_size_u64 - old_size;
            self.budget.try_acquire(delta).ok()?;
            let new_ptr = unsafe { Heap.reallocate(ptr, old_layout, new_size) };
            if new_ptr.is_none() {
                self.budget.release(delta);
            }
            new_ptr
        } else {
            let new_ptr = unsafe { Heap.reallocate(ptr, old_layout, new_size) };
            if new_ptr.is_some() {
                self.budget.release(old_size - new_size_u64);
            }
            new_ptr
        }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { Heap.deallocate(ptr, layout) };
        self.budget.release(layout.size() as u64);
    }
}
