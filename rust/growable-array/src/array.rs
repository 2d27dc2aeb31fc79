use std::{alloc::Layout, fmt, marker::PhantomData, mem, ptr::NonNull};

use growable_common::{Result, error::Error, verify_index};

use crate::alloc::{Heap, RawAlloc};

/// An owning, contiguous, resizable sequence of `T`.
///
/// The array holds `capacity()` slots, of which the first `len()` are live.
/// Appending to a full array doubles its capacity (an empty zero-capacity array
/// grows to one slot). Capacity never shrinks, not even on [`clear`](Self::clear).
///
/// Every fallible operation reports failure through [`Result`]: allocation
/// failures as `OutOfMemory`, bad indices as `IndexOutOfRange`. A failed append
/// leaves the array exactly as it was.
///
/// The array performs no internal synchronization. Mutation requires `&mut self`,
/// so sharing across threads is limited to readers unless the caller wraps it in
/// a lock.
pub struct GrowableArray<T, A: RawAlloc = Heap> {
    ptr: NonNull<T>,
    len: usize,
    cap: usize,
    alloc: A,
    _owns: PhantomData<T>,
}

unsafe impl<T: Send, A: RawAlloc + Send> Send for GrowableArray<T, A> {}
unsafe impl<T: Sync, A: RawAlloc + Sync> Sync for GrowableArray<T, A> {}

impl<T> GrowableArray<T> {
    /// Initial capacity used by [`GrowableArray::create`].
    pub const DEFAULT_CAPACITY: usize = 4;

    /// Creates an empty array with zero capacity. Nothing is allocated until the
    /// first append.
    pub const fn new() -> Self {
        Self::new_in(Heap)
    }

    /// Creates an empty array with [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY) slots.
    pub fn create() -> Result<Self> {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates an empty array with exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_capacity_in(capacity, Heap)
    }

    /// Creates an array holding clones of `items`, with capacity equal to their count.
    pub fn from_slice(items: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        let mut array = Self::with_capacity(items.len())?;
        array.extend_from_slice(items)?;
        Ok(array)
    }
}

impl<T, A: RawAlloc> GrowableArray<T, A> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// Creates an empty zero-capacity array backed by `alloc`.
    pub const fn new_in(alloc: A) -> Self {
        GrowableArray {
            ptr: NonNull::dangling(),
            len: 0,
            cap: 0,
            alloc,
            _owns: PhantomData,
        }
    }

    /// Creates an empty array with exactly `capacity` slots, backed by `alloc`.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self> {
        let mut array = Self::new_in(alloc);
        if capacity != 0 {
            array.grow_to(capacity)?;
        }
        Ok(array)
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns the number of bytes currently held from the allocator.
    pub fn heap_size(&self) -> usize {
        if Self::IS_ZST {
            0
        } else {
            self.cap * mem::size_of::<T>()
        }
    }

    /// Returns the allocator backing this array.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Appends `value` at index `len()`, doubling the capacity first if the array
    /// is full.
    ///
    /// On `OutOfMemory` the array keeps its previous storage, length and contents,
    /// and `value` is dropped.
    pub fn append(&mut self, value: T) -> Result<()> {
        if self.len == self.cap {
            self.grow_to(self.next_capacity()?)?;
        }
        unsafe {
            self.ptr.as_ptr().add(self.len).write(value);
        }
        self.len += 1;
        Ok(())
    }

    /// Appends clones of `items` one by one.
    ///
    /// Each append is atomic on its own: if growth fails midway, the items
    /// appended so far stay in the array.
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<()>
    where
        T: Clone,
    {
        for item in items {
            self.append(item.clone())?;
        }
        Ok(())
    }

    /// Returns a reference to the element at `index`.
    pub fn get(&self, index: usize) -> Result<&T> {
        verify_index!(index, self.len);
        Ok(&self.as_slice()[index])
    }

    /// Returns a mutable reference to the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        verify_index!(index, self.len);
        Ok(&mut self.as_mut_slice()[index])
    }

    /// Overwrites the element at `index`, dropping the previous value.
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting the elements after it
    /// one slot to the left. Capacity is unchanged.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        verify_index!(index, self.len);
        unsafe {
            let slot = self.ptr.as_ptr().add(index);
            let value = slot.read();
            std::ptr::copy(slot.add(1), slot, self.len - index - 1);
            self.len -= 1;
            Ok(value)
        }
    }

    /// Drops all elements. Capacity is unchanged.
    pub fn clear(&mut self) {
        let live = std::ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len);
        // Length goes first so that a panicking destructor cannot cause a double drop.
        self.len = 0;
        unsafe { std::ptr::drop_in_place(live) };
    }

    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Creates a deep copy with the same capacity, using a clone of the allocator.
    pub fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
        A: Clone,
    {
        let mut copy = Self::with_capacity_in(self.cap, self.alloc.clone())?;
        copy.extend_from_slice(self.as_slice())?;
        Ok(copy)
    }
}

impl<T, A: RawAlloc> GrowableArray<T, A> {
    fn next_capacity(&self) -> Result<usize> {
        match self.cap {
            0 => Ok(1),
            cap => cap
                .checked_mul(2)
                .ok_or_else(|| Error::out_of_memory(usize::MAX)),
        }
    }

    fn layout_for(capacity: usize) -> Result<Layout> {
        Layout::array::<T>(capacity)
            .map_err(|_| Error::out_of_memory(mem::size_of::<T>().saturating_mul(capacity)))
    }

    /// Moves the elements into a block of `new_cap` slots.
    ///
    /// On failure the current block, capacity and elements are untouched.
    #[cold]
    fn grow_to(&mut self, new_cap: usize) -> Result<()> {
        debug_assert!(new_cap > self.cap);
        if Self::IS_ZST {
            self.cap = new_cap;
            return Ok(());
        }

        let new_layout = Self::layout_for(new_cap)?;
        let ptr = if self.cap == 0 {
            self.alloc.allocate(new_layout)
        } else {
            let old_layout = Self::layout_for(self.cap)?;
            unsafe {
                self.alloc
                    .reallocate(self.ptr.cast(), old_layout, new_layout.size())
            }
        };
        let ptr = ptr.ok_or_else(|| Error::out_of_memory(new_layout.size()))?;
        self.ptr = ptr.cast();
        self.cap = new_cap;
        Ok(())
    }
}

impl<T, A: RawAlloc> Drop for GrowableArray<T, A> {
    fn drop(&mut self) {
        self.clear();
        if !Self::IS_ZST && self.cap != 0 {
            if let Ok(layout) = Self::layout_for(self.cap) {
                unsafe { self.alloc.deallocate(self.ptr.cast(), layout) };
            }
        }
    }
}

impl<T> Default for GrowableArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for GrowableArray<T> {
    fn clone(&self) -> Self {
        self.try_clone()
            .unwrap_or_else(|e| panic!("failed to clone array: {e}"))
    }
}

impl<T: PartialEq, A: RawAlloc, B: RawAlloc> PartialEq<GrowableArray<T, B>>
    for GrowableArray<T, A>
{
    fn eq(&self, other: &GrowableArray<T, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: RawAlloc> Eq for GrowableArray<T, A> {}

impl<T: PartialEq, A: RawAlloc> PartialEq<[T]> for GrowableArray<T, A> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, A: RawAlloc, const N: usize> PartialEq<[T; N]> for GrowableArray<T, A> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: fmt::Debug, A: RawAlloc> fmt::Debug for GrowableArray<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders the array as `[a, b, c] (size=3, capacity=4)`.
impl<T: fmt::Display, A: RawAlloc> fmt::Display for GrowableArray<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "] (size={}, capacity={})", self.len, self.cap)
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a GrowableArray<T, A> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a mut GrowableArray<T, A> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
