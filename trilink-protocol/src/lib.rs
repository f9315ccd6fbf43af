//! Trilink frame codec
//!
//! This crate defines the wire format shared by both ends of a trilink
//! connection. The link transfers one frame at a time over three lines
//! (Clock, Data, Chip-Select); a frame is a length-prefixed, checksum-
//! terminated byte payload, serialized bit by bit:
//!
//! ```text
//! ┌────────┬─────────────┬──────────┐
//! │ LENGTH │ PAYLOAD     │ CHECKSUM │
//! │ 8 bits │ LENGTH×8    │ 8 bits   │
//! └────────┴─────────────┴──────────┘
//! ```
//!
//! All fields are transmitted MSB-first. The checksum is the additive
//! mod-256 sum of the payload bytes; it catches line noise, it is not
//! tamper-resistant. A zero-length frame is legal and carries an empty
//! payload.
//!
//! The codec is pure: [`frame::encode`] turns a byte payload into a
//! [`bits::BitBuffer`], [`frame::decode`] turns sampled bits back into a
//! [`frame::Frame`]. Driving and sampling the lines is the job of
//! `trilink-core`.

#![no_std]
#![deny(unsafe_code)]

pub mod bits;
pub mod frame;

pub use bits::BitBuffer;
pub use frame::{
    checksum, decode, encode, Frame, FrameBits, FrameError, MAX_FRAME_BITS, MAX_FRAME_SIZE,
    MAX_PAYLOAD_SIZE,
};
