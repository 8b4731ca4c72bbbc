//! Single-flight gate: at most one recognition request in flight. Frames
//! offered while busy are dropped, never queued, so the pipeline always
//! works on the most recent frame it was free to take.

use std::sync::atomic::{AtomicU8, Ordering};

const IDLE: u8 = 0;
const BUSY: u8 = 1;
const CLOSED: u8 = 2;

/// Atomic in-flight slot. Exactly one acquire per accepted frame, exactly
/// one release per completion (success, failure, or timeout). `close` is
/// terminal: a closed gate never accepts again.
pub struct RecognitionGate {
    slot: AtomicU8,
}

impl RecognitionGate {
    pub fn new() -> Self {
        Self {
            slot: AtomicU8::new(IDLE),
        }
    }

    /// Claim the slot. Succeeds only from idle.
    pub fn try_acquire(&self) -> bool {
        self.slot
            .compare_exchange(IDLE, BUSY, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Return the slot after a completed cycle. A closed gate stays closed.
    pub fn release(&self) {
        let _ = self
            .slot
            .compare_exchange(BUSY, IDLE, Ordering::AcqRel, Ordering::Acquire);
    }

    /// Close the gate permanently. Idempotent.
    pub fn close(&self) {
        self.slot.store(CLOSED, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.slot.load(Ordering::Acquire) == CLOSED
    }

    pub fn is_busy(&self) -> bool {
        self.slot.load(Ordering::Acquire) == BUSY
    }
}

impl Default for RecognitionGate {
    fn default() -> Self {
        Self::new()
    }
}
