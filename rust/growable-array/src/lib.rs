//! Growable, contiguous arrays with explicit allocation failure.
//!
//! [`GrowableArray`] is a `Vec`-like sequence whose every allocation goes through
//! a [`RawAlloc`] and whose failures are returned as errors instead of aborting
//! the process. Pairing it with a [`BudgetedHeap`] bounds the bytes a group of
//! arrays may hold:
//!
//! ```
//! use growable_array::{BudgetedHeap, GrowableArray};
//!
//! let alloc = BudgetedHeap::with_limit(16);
//! let mut array = GrowableArray::<u32, _>::with_capacity_in(2, alloc).unwrap();
//! for v in [10, 20, 30, 40] {
//!     array.append(v).unwrap();
//! }
//! assert_eq!(array.capacity(), 4);
//!
//! // Growing to 8 slots would need 32 bytes.
//! assert!(array.append(50).unwrap_err().is_out_of_memory());
//! assert_eq!(array.to_string(), "[10, 20, 30, 40] (size=4, capacity=4)");
//! ```

pub mod alloc;
mod array;

pub use crate::alloc::{BudgetedHeap, Heap, RawAlloc};
pub use array::GrowableArray;
pub use growable_budget::Budget;
