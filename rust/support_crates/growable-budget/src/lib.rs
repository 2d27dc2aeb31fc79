//! Byte budgets that bound how much memory a set of containers may hold.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// A shared limit on the number of bytes that may be held at any time.
///
/// Clones of a `Budget` share the same accounting, so one budget can be handed to
/// several allocators and bound their combined footprint.
#[derive(Clone)]
pub struct Budget(Arc<BudgetState>);

impl Budget {
    /// Creates a budget that allows at most `limit` bytes to be held at once.
    pub fn new(limit: u64) -> Budget {
        Budget(Arc::new(BudgetState {
            limit,
            used: AtomicU64::new(0),
            peak: AtomicU64::new(0),
        }))
    }

    /// Creates a budget that never refuses an acquisition.
    pub fn unlimited() -> Budget {
        Budget::new(u64::MAX)
    }

    /// Returns the configured limit in bytes.
    pub fn limit(&self) -> u64 {
        self.0.limit
    }

    /// Returns `true` if this budget was created by [`Budget::unlimited`].
    pub fn is_unlimited(&self) -> bool {
        self.0.limit == u64::MAX
    }

    /// Returns the number of bytes currently acquired.
    ///
    /// **Note**: The value may be outdated in a concurrent environment.
    pub fn used(&self) -> u64 {
        self.0.used.load(Ordering::Relaxed)
    }

    /// Returns the number of bytes that can still be acquired.
    pub fn remaining(&self) -> u64 {
        self.0.limit.saturating_sub(self.used())
    }

    /// Returns the highest value `used()` has reached over the budget's lifetime.
    pub fn peak(&self) -> u64 {
        self.0.peak.load(Ordering::Relaxed)
    }

    /// Attempts to acquire `amount` bytes.
    ///
    /// Either the whole amount is acquired or nothing is: on failure the budget
    /// is left untouched.
    pub fn try_acquire(&self, amount: u64) -> Result<(), AllocationError> {
        if amount == 0 {
            return Ok(());
        }
        let state = &self.0;
        let mut current = state.used.load(Ordering::Relaxed);
        loop {
            let next = current
                .checked_add(amount)
                .filter(|&next| next <= state.limit)
                .ok_or(AllocationError { requested: amount })?;
            match state.used.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    state.peak.fetch_max(next, Ordering::Relaxed);
                    return Ok(());
                }
                Err(updated) => current = updated,
            }
        }
    }

    /// Returns `amount` previously acquired bytes to the budget.
    ///
    /// # Panics
    ///
    /// Panics if more bytes are released than are currently acquired.
    pub fn release(&self, amount: u64) {
        if amount == 0 {
            return;
        }
        let prev = self.0.used.fetch_sub(amount, Ordering::AcqRel);
        assert!(prev >= amount, "budget released more than acquired");
    }

    /// Acquires `amount` bytes and returns a guard that gives them back on drop.
    pub fn reserve(&self, amount: u64) -> Result<Reservation, AllocationError> {
        self.try_acquire(amount)?;
        Ok(Reservation {
            budget: self.clone(),
            amount,
        })
    }
}

impl std::fmt::Debug for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Budget")
            .field("limit", &self.limit())
            .field("used", &self.used())
            .field("peak", &self.peak())
            .finish()
    }
}

struct BudgetState {
    limit: u64,
    used: AtomicU64,
    peak: AtomicU64,
}

/// An amount acquired from a [`Budget`], returned to it when dropped.
pub struct Reservation {
    budget: Budget,
    amount: u64,
}

impl Reservation {
    /// Currently reserved amount.
    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Changes the reserved amount to `new_amount`.
    ///
    /// Growing acquires the difference and may fail, in which case the reservation
    /// is unchanged. Shrinking always succeeds.
    pub fn resize(&mut self, new_amount: u64) -> Result<(), AllocationError> {
        if new_amount > self.amount {
            self.budget.try_acquire(new_amount - self.amount)?;
        } else {
            self.budget.release(self.amount - new_amount);
        }
        self.amount = new_amount;
        Ok(())
    }
}

impl Drop for Reservation {
    fn drop(&mut self) {
        self.budget.release(self.amount);
    }
}

impl std::fmt::Debug for Reservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reservation")
            .field("amount", &self.amount)
            .finish_non_exhaustive()
    }
}

/// An error that occurs when a budget cannot cover an acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AllocationError {
    /// Number of bytes that were requested.
    pub requested: u64,
}

impl std::fmt::Display for AllocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "budget cannot cover {} bytes", self.requested)
    }
}

impl std::error::Error for AllocationError {}
