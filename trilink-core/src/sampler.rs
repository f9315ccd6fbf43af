//! Bit sampler
//!
//! Receive-side capture state. The link's edge handlers feed it: CS rising
//! starts a frame, each Clock rising edge contributes one Data sample, CS
//! falling ends the frame. Every operation here is O(1) and non-blocking
//! because it runs in interrupt context.

use trilink_protocol::FrameBits;

/// Accumulates raw bits between two CS edges
#[derive(Debug, Clone)]
pub(crate) struct Sampler {
    buffer: FrameBits,
    cap_bits: usize,
}

impl Sampler {
    /// Create an empty sampler capped at `cap_bits` bits
    pub(crate) fn new(cap_bits: usize) -> Self {
        Self {
            buffer: FrameBits::new(),
            cap_bits: cap_bits.min(FrameBits::capacity()),
        }
    }

    /// Reset capture at a frame boundary
    pub(crate) fn start_frame(&mut self) {
        self.buffer.clear();
    }

    /// Record one sampled bit
    ///
    /// Bits past the cap are dropped; the eventual decode then reports the
    /// frame incomplete or invalid instead of this path doing unbounded
    /// work.
    pub(crate) fn capture(&mut self, bit: bool) {
        if self.buffer.len() < self.cap_bits {
            self.buffer.push(bit);
        }
    }

    /// Take the captured bits, leaving the sampler empty
    pub(crate) fn take(&mut self) -> FrameBits {
        core::mem::take(&mut self.buffer)
    }

    /// Check if nothing was captured
    pub(crate) fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of bits captured so far
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.buffer.len()
    }
}
