use crate::Generator;
use burrow_core::ShortCode;
use std::sync::atomic::{AtomicU64, Ordering};

const INITIAL_VALUE: u64 = 1;

/// A short code generator backed by a process-local counter.
///
/// Codes are the decimal form of the counter ("1", "2", ...). The long URL is
/// ignored, so shortening the same URL twice yields two different codes.
/// The counter is not persisted; a fresh generator starts over at 1.
#[derive(Debug)]
pub struct CounterGenerator {
    counter: AtomicU64,
}

impl Clone for CounterGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
        }
    }
}

impl CounterGenerator {
    /// Creates a counter starting at 1.
    pub fn new() -> Self {
        Self::with_offset(INITIAL_VALUE)
    }

    /// Creates a counter starting from a specific value.
    ///
    /// Useful for resuming from a known state.
    pub fn with_offset(offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
        }
    }
}

impl Default for CounterGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for CounterGenerator {
    fn generate(&self, _long_url: &str) -> ShortCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        ShortCode::new(count.to_string())
    }
}
