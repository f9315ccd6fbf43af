//! Packed bit buffer
//!
//! Raw samples taken off the Data line between two CS edges, in arrival
//! order. Backed by a fixed byte array so it can live in interrupt-mutated
//! state without allocation; `N` is the backing size in bytes, capacity is
//! `N * 8` bits.

/// Append-only sequence of 0/1 samples, packed MSB-first
///
/// Bit `i` lives in byte `i / 8` at position `7 - i % 8`, which makes a
/// byte-aligned run of 8 bits read back as the byte that was sent MSB-first.
/// Pushing past capacity drops the bit and reports it; the buffer is never
/// corrupted by excess input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitBuffer<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> BitBuffer<N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
        }
    }

    /// Capacity in bits
    pub const fn capacity() -> usize {
        N * 8
    }

    /// Number of bits stored
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no bits are stored
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Discard all stored bits
    pub fn clear(&mut self) {
        self.bytes = [0; N];
        self.len = 0;
    }

    /// Append one bit
    ///
    /// Returns `false` (and stores nothing) if the buffer is full.
    pub fn push(&mut self, bit: bool) -> bool {
        if self.len >= N * 8 {
            return false;
        }
        let mask = 0x80u8 >> (self.len % 8);
        if bit {
            self.bytes[self.len / 8] |= mask;
        } else {
            self.bytes[self.len / 8] &= !mask;
        }
        self.len += 1;
        true
    }

    /// Append the 8 bits of a byte, MSB-first
    ///
    /// All-or-nothing: returns `false` if fewer than 8 bits of capacity
    /// remain.
    pub fn push_byte(&mut self, byte: u8) -> bool {
        if self.len + 8 > N * 8 {
            return false;
        }
        for shift in (0..8).rev() {
            self.push((byte >> shift) & 1 != 0);
        }
        true
    }

    /// Read the bit at `index`
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        let mask = 0x80u8 >> (index % 8);
        Some(self.bytes[index / 8] & mask != 0)
    }

    /// Read 8 bits starting at `bit_index` as a byte, MSB-first
    ///
    /// Returns `None` if fewer than 8 bits are available from `bit_index`.
    pub fn byte_at(&self, bit_index: usize) -> Option<u8> {
        if bit_index + 8 > self.len {
            return None;
        }
        if bit_index % 8 == 0 {
            // Byte-aligned fast path
            return Some(self.bytes[bit_index / 8]);
        }
        let mut value = 0u8;
        for offset in 0..8 {
            let bit = self.get(bit_index + offset)?;
            value = (value << 1) | bit as u8;
        }
        Some(value)
    }

    /// Iterate over the stored bits in order
    pub fn iter(&self) -> Bits<'_, N> {
        Bits {
            buffer: self,
            index: 0,
        }
    }
}

impl<const N: usize> Default for BitBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the bits of a [`BitBuffer`]
pub struct Bits<'a, const N: usize> {
    buffer: &'a BitBuffer<N>,
    index: usize,
}

impl<'a, const N: usize> Iterator for Bits<'a, N> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let bit = self.buffer.get(self.index)?;
        self.index += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a, const N: usize> ExactSizeIterator for Bits<'a, N> {}
