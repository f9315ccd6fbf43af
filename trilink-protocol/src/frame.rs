//! Frame encoding and decoding
//!
//! Frame format, all fields MSB-first:
//! - LENGTH (8 bits): payload length in bytes (0-255)
//! - PAYLOAD (LENGTH × 8 bits): the bytes being carried
//! - CHECKSUM (8 bits): sum of the payload bytes mod 256
//!
//! Decoding never rejects a frame for a bad checksum; it reports
//! `valid = false` and leaves the response to the link state machine. Only
//! a frame that is too short to contain what its own length field declares
//! fails to decode, with [`FrameError::Incomplete`].

use heapless::Vec;

use crate::bits::BitBuffer;

/// Maximum payload size in bytes (the length field is one byte)
pub const MAX_PAYLOAD_SIZE: usize = 255;

/// Maximum complete frame size in bytes (LENGTH + MAX_PAYLOAD + CHECKSUM)
pub const MAX_FRAME_SIZE: usize = 1 + MAX_PAYLOAD_SIZE + 1;

/// Maximum complete frame size in bits
pub const MAX_FRAME_BITS: usize = MAX_FRAME_SIZE * 8;

/// Bit buffer sized to hold one maximum frame
pub type FrameBits = BitBuffer<MAX_FRAME_SIZE>;

/// Errors that can occur during frame encoding or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds the one-byte length field's range
    PayloadTooLarge,
    /// Fewer bits available than the frame's own length field declares
    Incomplete,
}

/// A decoded frame
///
/// `valid` records whether the received checksum matched the payload; a
/// mismatched frame still decodes so the state machine can answer it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    /// Checksum byte as received off the wire
    pub checksum: u8,
    /// Whether `checksum` matches the payload
    pub valid: bool,
}

impl Frame {
    /// Payload length in bytes, as the length field would carry it
    pub fn len(&self) -> u8 {
        self.payload.len() as u8
    }

    /// Check if the payload is empty
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Calculate the additive checksum of a payload
///
/// Sum of the byte values mod 256. Pure, no side effects.
pub fn checksum(payload: &[u8]) -> u8 {
    payload.iter().fold(0u8, |sum, &byte| sum.wrapping_add(byte))
}

/// Encode a payload into the bit sequence the driver clocks out
///
/// Emits LENGTH, the payload bytes, then the checksum, each MSB-first.
/// Payloads longer than [`MAX_PAYLOAD_SIZE`] are rejected, never truncated.
pub fn encode(payload: &[u8]) -> Result<FrameBits, FrameError> {
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(FrameError::PayloadTooLarge);
    }

    let mut bits = FrameBits::new();
    bits.push_byte(payload.len() as u8);
    for &byte in payload {
        bits.push_byte(byte);
    }
    bits.push_byte(checksum(payload));
    Ok(bits)
}

/// Decode sampled bits into a frame
///
/// Reads the first 8 bits as the length, then expects
/// `8 + length*8 + 8` bits in total. With fewer bits the frame is
/// [`FrameError::Incomplete`]: mid-capture that means "not ready yet", at a
/// frame boundary it means the capture was truncated. Bits beyond the
/// declared frame are ignored.
pub fn decode(bits: &FrameBits) -> Result<Frame, FrameError> {
    let length = bits.byte_at(0).ok_or(FrameError::Incomplete)? as usize;
    if bits.len() < 8 + length * 8 + 8 {
        return Err(FrameError::Incomplete);
    }

    let mut payload = Vec::new();
    for i in 0..length {
        let byte = bits.byte_at(8 + i * 8).ok_or(FrameError::Incomplete)?;
        // Cannot overflow: length <= 255 == capacity
        let _ = payload.push(byte);
    }

    let received = bits.byte_at(8 + length * 8).ok_or(FrameError::Incomplete)?;
    let valid = received == checksum(&payload);

    Ok(Frame {
        payload,
        checksum: received,
        valid,
    })
}
