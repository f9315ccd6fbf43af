//! Board-agnostic link engine for the trilink three-wire link
//!
//! This crate contains everything above the pins and below the application:
//!
//! - Bit clock driver (transmit one frame with software timing)
//! - Bit sampler (edge-driven capture of incoming bits)
//! - Link state machine (role arbitration, decode, error recovery)
//!
//! The link is half-duplex: both ends share the same Clock, Data and CS
//! lines, and exactly one end drives them at a time. A device is normally in
//! the `Receiving` role with all three lines as inputs; it switches to
//! `Sending` only for the duration of one outgoing frame.
//!
//! # Wire contract
//!
//! Clock idles low and pulses high once per bit; Data is valid when Clock
//! rises and don't-care otherwise; CS is active-high and brackets one frame.
//! CS observed low is the "bus free" heuristic both ends use before sending.
//! There is no collision detection: if both ends start sending inside the
//! same idle window the frames are lost and recovered through the `"ERROR"`
//! retry convention.
//!
//! # Concurrency
//!
//! [`Link::on_clock_rising`] and [`Link::on_cs_edge`] are meant to be called
//! from the platform's edge interrupt handlers; everything else runs in the
//! foreground. All methods take `&mut self`, so the platform must serialize
//! access (a critical-section mutex around the link is the usual shape).
//! Role transitions additionally mask the edge sources through
//! [`trilink_hal::EdgeIrq`] so no handler ever observes a line in an
//! undefined direction.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod link;
pub mod traits;

mod driver;
mod sampler;

#[cfg(test)]
mod sim;

pub use config::LinkConfig;
pub use link::{Link, Role, SendError, ERROR_SENTINEL};
pub use traits::MessageSink;
