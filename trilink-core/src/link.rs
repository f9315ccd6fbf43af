//! Link state machine
//!
//! Owns the three line handles, the current role and the receive sampler,
//! and ties the codec, driver and sampler together: `send` arbitrates for
//! the bus and clocks a frame out, the edge handlers capture inbound bits,
//! and every completed capture is decoded into either a delivered message,
//! a resend, or an `"ERROR"` reply.

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use trilink_hal::{EdgeIrq, FlexPin};
use trilink_protocol::{decode, encode, MAX_PAYLOAD_SIZE};

use crate::config::LinkConfig;
use crate::driver;
use crate::sampler::Sampler;
use crate::traits::MessageSink;

/// Payload a receiver sends back when a frame arrives corrupted
///
/// The peer answers it by resending its last payload. Application messages
/// must not use this value.
pub const ERROR_SENTINEL: &[u8] = b"ERROR";

/// Which side of the link currently drives the lines
///
/// Exactly one role is active per device; line direction changes only when
/// the role does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    /// Lines are inputs, sampler armed. Default state.
    Receiving,
    /// Lines are outputs, sampler ignored. Held only inside `send`.
    Sending,
}

/// Errors surfaced to the caller of [`Link::send`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendError {
    /// Payload does not fit the one-byte length field (max 255 bytes)
    PayloadTooLong,
    /// The peer never released CS within the configured timeout
    BusBusyTimeout,
}

/// One end of a three-wire link
///
/// Construct with [`Link::new`], then wire the platform's edge interrupts to
/// [`Link::on_clock_rising`] and [`Link::on_cs_edge`]. The link starts in
/// [`Role::Receiving`].
pub struct Link<P, D, I, S> {
    clock: P,
    data: P,
    cs: P,
    delay: D,
    irqs: I,
    sink: S,
    config: LinkConfig,
    role: Role,
    sampler: Sampler,
    last_message: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl<P, D, I, S> Link<P, D, I, S>
where
    P: FlexPin,
    D: DelayNs,
    I: EdgeIrq,
    S: MessageSink,
{
    /// Create a link with default configuration
    pub fn new(clock: P, data: P, cs: P, delay: D, irqs: I, sink: S) -> Self {
        Self::with_config(clock, data, cs, delay, irqs, sink, LinkConfig::default())
    }

    /// Create a link with explicit configuration
    pub fn with_config(
        clock: P,
        data: P,
        cs: P,
        delay: D,
        irqs: I,
        sink: S,
        config: LinkConfig,
    ) -> Self {
        let mut link = Self {
            clock,
            data,
            cs,
            delay,
            irqs,
            sink,
            sampler: Sampler::new(config.buffer_cap()),
            config,
            role: Role::Sending,
            last_message: Vec::new(),
        };
        link.enter_receiving();
        link
    }

    /// Current role
    pub fn role(&self) -> Role {
        self.role
    }

    /// The last good non-`"ERROR"` payload sent or received
    ///
    /// This is what gets retransmitted when the peer reports a corrupted
    /// frame. Empty until the first good message passes in either direction.
    pub fn last_message(&self) -> &[u8] {
        &self.last_message
    }

    /// The message sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The message sink, mutably
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// The active configuration
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Encode and transmit one frame
    ///
    /// Blocks for the bounded bus-free wait plus the frame transmission
    /// itself (`(len + 2) * 8` clock pulses at two bit periods each). On
    /// return the link is back in [`Role::Receiving`], whatever happened.
    pub fn send(&mut self, payload: &[u8]) -> Result<(), SendError> {
        let bits = encode(payload).map_err(|_| SendError::PayloadTooLong)?;

        self.wait_bus_free()?;

        self.enter_sending();
        driver::emit_frame(
            &mut self.clock,
            &mut self.data,
            &mut self.cs,
            &mut self.delay,
            &self.config,
            &bits,
        );
        self.enter_receiving();

        // Retain what we just sent so a peer's "ERROR" reply can be answered
        // with a resend. The sentinel itself is never retained.
        if payload != ERROR_SENTINEL {
            self.last_message.clear();
            let _ = self.last_message.extend_from_slice(payload);
        }
        Ok(())
    }

    /// Clock rising edge handler
    ///
    /// Call from the platform's Clock edge interrupt. O(1): samples Data
    /// into the buffer when a frame is in progress, does nothing otherwise.
    pub fn on_clock_rising(&mut self) {
        if self.role != Role::Receiving {
            return;
        }
        if self.cs.is_high() {
            self.sampler.capture(self.data.is_high());
        }
    }

    /// CS edge handler (either direction)
    ///
    /// Call from the platform's CS change interrupt; the handler reads the
    /// level itself. Rising starts a fresh capture; falling completes the
    /// frame and runs decode, delivery and error recovery.
    pub fn on_cs_edge(&mut self) {
        if self.role != Role::Receiving {
            return;
        }
        if self.cs.is_high() {
            self.sampler.start_frame();
        } else {
            self.process_frame();
        }
    }

    /// Decode a completed capture and act on it
    fn process_frame(&mut self) {
        if self.sampler.is_empty() {
            return;
        }
        let bits = self.sampler.take();

        let frame = match decode(&bits) {
            Ok(frame) => frame,
            Err(_) => {
                // CS already fell, so no more bits will arrive: the capture
                // was truncated (cap hit or clock edges lost).
                #[cfg(feature = "defmt")]
                defmt::warn!("truncated frame: {} bits captured", bits.len());
                self.reply_error();
                return;
            }
        };

        if !frame.valid {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "checksum mismatch on {} byte frame (got {})",
                frame.len(),
                frame.checksum
            );
            self.reply_error();
            return;
        }

        if frame.payload.as_slice() == ERROR_SENTINEL {
            // Peer saw garbage: resend the retained payload, once
            #[cfg(feature = "defmt")]
            defmt::debug!("peer reported error, resending last payload");
            let last = self.last_message.clone();
            if self.send(&last).is_err() {
                #[cfg(feature = "defmt")]
                defmt::warn!("bus busy, dropping resend");
            }
        } else {
            self.last_message.clear();
            // Cannot overflow: decode caps payloads at MAX_PAYLOAD_SIZE
            let _ = self.last_message.extend_from_slice(&frame.payload);
            self.sink.on_message(&frame.payload);
        }
    }

    /// Ask the peer to resend its last frame
    fn reply_error(&mut self) {
        if self.send(ERROR_SENTINEL).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("bus busy, dropping ERROR reply");
        }
    }

    /// Bounded poll until CS reads inactive
    ///
    /// The original design spun forever here; a peer that dies mid-frame
    /// would hang us, so the wait is capped.
    fn wait_bus_free(&mut self) -> Result<(), SendError> {
        // A zero poll interval must still make progress toward the timeout
        let poll_us = self.config.bus_poll_interval_us.max(1);
        let mut waited: u32 = 0;
        while self.cs.is_high() {
            if waited >= self.config.bus_free_timeout_us {
                return Err(SendError::BusBusyTimeout);
            }
            self.delay.delay_us(poll_us);
            waited = waited.saturating_add(poll_us);
        }
        Ok(())
    }

    /// Switch to the sending role
    ///
    /// IRQs are masked before any line changes direction; the role flag is
    /// set before the first toggle so the sampler can never observe our own
    /// transmission.
    fn enter_sending(&mut self) {
        self.irqs.disable();
        self.role = Role::Sending;
        self.clock.set_output();
        self.data.set_output();
        self.cs.set_output();
    }

    /// Switch to the receiving role
    ///
    /// IRQs come back only after all three lines are inputs and the capture
    /// buffer is clean.
    fn enter_receiving(&mut self) {
        self.clock.set_input();
        self.data.set_input();
        self.cs.set_input();
        self.sampler.start_frame();
        self.role = Role::Receiving;
        self.irqs.enable();
    }
}
