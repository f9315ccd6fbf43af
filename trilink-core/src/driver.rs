//! Bit clock driver
//!
//! Transmit-side line timing. Emits one encoded frame as a sequence of
//! clock pulses, one data bit per pulse, bracketed by CS. The caller (the
//! link state machine) is responsible for bus arbitration and for having
//! already switched the lines to output; once CS is asserted the frame
//! always runs to completion so no partial frame is ever left on the wire.

use embedded_hal::delay::DelayNs;
use trilink_hal::FlexPin;
use trilink_protocol::FrameBits;

use crate::config::LinkConfig;

/// Clock out one frame
///
/// Per bit: Data is set first, then Clock pulses high for one bit period
/// and low for another, so the receiver sampling on the rising edge always
/// sees settled data. Clock and CS end low.
pub(crate) fn emit_frame<P: FlexPin, D: DelayNs>(
    clock: &mut P,
    data: &mut P,
    cs: &mut P,
    delay: &mut D,
    config: &LinkConfig,
    bits: &FrameBits,
) {
    cs.set_high();
    delay.delay_us(config.cs_settle_us);

    for bit in bits.iter() {
        data.set_state(bit);
        clock.set_high();
        delay.delay_us(config.bit_period_us);
        clock.set_low();
        delay.delay_us(config.bit_period_us);
    }

    cs.set_low();
}
