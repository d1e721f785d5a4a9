//! Thread-safe monotonic counter for reload generations and switch tickets.
//!
//! # Why sequence numbers? (for beginners)
//!
//! Two places in Veneer need to know which of two events happened *first by
//! trigger time*, even when their effects land in the opposite order:
//!
//! - **Reload generations** – the host stamps every configuration reload
//!   with a generation when the reload is *triggered*.  The broadcaster
//!   refuses to publish a generation older than the last one it delivered,
//!   so a slow in-flight reload can never overwrite a newer one.
//! - **Theme-switch tickets** – the view stamps every `load_theme` call with
//!   a ticket when the call is *issued*.  A response that resolves after a
//!   newer switch was issued is discarded as stale instead of clobbering
//!   the newer theme.
//!
//! # Thread safety
//!
//! The counter is an `AtomicU64`: increment-and-read happens as one
//! indivisible step, so concurrent callers never observe the same value
//! twice and no lock is needed for this pattern.

use std::sync::atomic::{AtomicU64, Ordering};

/// A thread-safe, monotonically increasing counter.
///
/// Values start at 0 and increment by 1 with each call to [`next`].
///
/// # Examples
///
/// ```rust
/// use veneer_core::SequenceCounter;
///
/// let counter = SequenceCounter::new();
/// assert_eq!(counter.next(), 0);
/// assert_eq!(counter.next(), 1);
/// ```
///
/// [`next`]: SequenceCounter::next
#[derive(Debug, Default)]
pub struct SequenceCounter {
    inner: AtomicU64,
}

impl SequenceCounter {
    /// Creates a new counter starting at 0.
    pub fn new() -> Self {
        Self {
            inner: AtomicU64::new(0),
        }
    }

    /// Returns the next value and atomically advances the counter.
    ///
    /// `Ordering::Relaxed` is sufficient: the values are only compared with
    /// each other for ordering decisions, never used to synchronize memory.
    pub fn next(&self) -> u64 {
        self.inner.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the current value without advancing.
    ///
    /// After `next()` returned `n`, `current()` returns `n + 1` — the value
    /// the *next* call will hand out.  The view's stale-switch guard relies
    /// on this: a ticket `t` is still the latest issued one exactly while
    /// `current() == t + 1`.
    pub fn current(&self) -> u64 {
        self.inner.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_counter_starts_at_zero() {
        // Arrange
        let counter = SequenceCounter::new();

        // Act / Assert
        assert_eq!(counter.next(), 0);
        assert_eq!(counter.next(), 1);
    }

    #[test]
    fn test_current_reflects_the_next_value_to_hand_out() {
        // Arrange
        let counter = SequenceCounter::new();
        let ticket = counter.next();

        // Act / Assert – ticket is the latest issued while current == ticket + 1
        assert_eq!(counter.current(), ticket + 1);
        counter.next();
        assert_ne!(counter.current(), ticket + 1);
    }

    #[test]
    fn test_values_are_unique_across_threads() {
        // Arrange
        let counter = Arc::new(SequenceCounter::new());
        let threads = 8;
        let per_thread = 1000;

        // Act – draw values from many threads simultaneously
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let c = Arc::clone(&counter);
                thread::spawn(move || (0..per_thread).map(|_| c.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut values: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().expect("thread panicked"))
            .collect();

        // Assert – no two callers ever received the same value
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), threads * per_thread);
    }
}
