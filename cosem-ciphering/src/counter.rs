//! Caller-side frame counter management
//!
//! The ciphering engine itself is stateless and never enforces counter
//! monotonicity; nonce uniqueness per `(system title, block cipher key)`
//! pair is the caller's obligation. `FrameCounter` is the shared,
//! externally-synchronized counter a protocol layer holds per system
//! title to meet that obligation across concurrent encodes.

use std::sync::{Arc, Mutex};

/// Frame Counter
///
/// A 32-bit counter incremented for each protected frame. Cloning shares
/// the underlying counter.
#[derive(Debug, Clone)]
pub struct FrameCounter {
    counter: Arc<Mutex<u32>>,
}

impl FrameCounter {
    /// Create a new Frame Counter starting at 0
    pub fn new() -> Self {
        Self {
            counter: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a new Frame Counter with an initial value
    pub fn with_initial(initial: u32) -> Self {
        Self {
            counter: Arc::new(Mutex::new(initial)),
        }
    }

    /// Get the current frame counter value
    pub fn get(&self) -> u32 {
        *self.counter.lock().unwrap()
    }

    /// Increment the frame counter and return the new value
    pub fn increment(&self) -> u32 {
        let mut counter = self.counter.lock().unwrap();
        *counter = counter.wrapping_add(1);
        *counter
    }

    /// Set the frame counter to a specific value
    pub fn set(&self, value: u32) {
        let mut counter = self.counter.lock().unwrap();
        *counter = value;
    }

    /// Reset the frame counter to 0
    pub fn reset(&self) {
        self.set(0);
    }
}

impl Default for FrameCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_counter() {
        let counter = FrameCounter::new();
        assert_eq!(counter.get(), 0);
        assert_eq!(counter.increment(), 1);
        assert_eq!(counter.increment(), 2);
        counter.set(100);
        assert_eq!(counter.get(), 100);
        counter.reset();
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_clone_shares_state() {
        let counter = FrameCounter::with_initial(5);
        let clone = counter.clone();
        assert_eq!(clone.increment(), 6);
        assert_eq!(counter.get(), 6);
    }
}
