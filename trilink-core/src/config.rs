//! Link configuration
//!
//! Timing is fixed, not negotiated: both ends of a link must be built with
//! the same `bit_period_us`.

use trilink_protocol::MAX_FRAME_BITS;

/// Timing and buffering parameters for one link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// Clock half-cycle duration in microseconds
    ///
    /// Each bit holds Clock high for one period and low for one period.
    pub bit_period_us: u32,
    /// Hold time after asserting CS, before the first clock edge
    ///
    /// Gives the receiver's CS interrupt time to settle; must be at least
    /// the debounce time of the target line.
    pub cs_settle_us: u32,
    /// Sleep between CS probes while waiting for the bus to become free
    pub bus_poll_interval_us: u32,
    /// Total time to wait for a free bus before `send` gives up
    pub bus_free_timeout_us: u32,
    /// Cap on the raw receive buffer, in bits
    ///
    /// Bits past the cap are dropped in the sampler, so a runaway sender
    /// costs bounded memory and bounded interrupt work. Values above one
    /// maximum frame ([`MAX_FRAME_BITS`]) are clamped.
    pub max_buffer_bits: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            bit_period_us: 1000,
            cs_settle_us: 10,
            bus_poll_interval_us: 10,
            bus_free_timeout_us: 500_000,
            max_buffer_bits: 256,
        }
    }
}

impl LinkConfig {
    /// Effective receive buffer cap in bits
    pub fn buffer_cap(&self) -> usize {
        self.max_buffer_bits.min(MAX_FRAME_BITS)
    }
}
