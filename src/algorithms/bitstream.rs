//! LSB-first bit packing over byte buffers.
//!
//! Within each byte, the first bit written occupies bit 0 and the eighth occupies bit 7. A
//! partially filled trailing byte keeps its unused high bits at zero.

use crate::algorithms::code_table::Code;

/// Write cursor appending bits after whatever the buffer already holds.
#[derive(Debug, Default)]
pub struct BitWriter {
    buf: Vec<u8>,
    /// bits already used in the last byte, 0 when the next write starts a fresh byte
    bit_pos: u8,
    bits_written: u64,
}

impl BitWriter {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            bit_pos: 0,
            bits_written: 0,
        }
    }

    /// Continues writing into `buf`; the first bit lands in a new byte after its current end.
    pub const fn from_vec(buf: Vec<u8>) -> Self {
        Self {
            buf,
            bit_pos: 0,
            bits_written: 0,
        }
    }

    /// Writes the low `count` bits of `value` (1 to 8 of them).
    fn write_chunk(&mut self, value: u8, count: u8) {
        debug_assert!((1..=8).contains(&count));
        if self.bit_pos == 0 {
            self.buf.push(0);
        }
        let last = self.buf.len() - 1;
        self.buf[last] |= value << self.bit_pos;

        let filled = self.bit_pos + count;
        if filled > 8 {
            // spill the bits that did not fit into a new byte
            self.buf.push(value >> (8 - self.bit_pos));
        }
        self.bit_pos = filled % 8;
        self.bits_written += count as u64;
    }

    pub fn write_bit(&mut self, bit: bool) {
        self.write_chunk(bit as u8, 1);
    }

    /// Appends all of `code`'s bits, spanning as many bytes as needed.
    pub fn append(&mut self, code: &Code) {
        let mut remaining = code.len();
        for &byte in code.as_bytes() {
            let count = remaining.min(8);
            if count == 0 {
                break;
            }
            let mask = if count == 8 { 0xff } else { (1u8 << count) - 1 };
            self.write_chunk(byte & mask, count as u8);
            remaining -= count;
        }
    }

    pub const fn bit_len(&self) -> u64 {
        self.bits_written
    }

    /// Bytes in the buffer, counting a partial last byte as a whole one.
    pub fn byte_len(&self) -> usize {
        self.buf.len()
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Read cursor mirroring [`BitWriter`].
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    byte: usize,
    bit: u8,
}

impl<'a> BitReader<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, byte: 0, bit: 0 }
    }

    /// Next bit, or `None` once every byte has been consumed.
    #[inline]
    pub fn read_bit(&mut self) -> Option<bool> {
        let byte = *self.data.get(self.byte)?;
        let bit = byte >> self.bit & 1 == 1;
        self.bit += 1;
        if self.bit == 8 {
            self.bit = 0;
            self.byte += 1;
        }
        Some(bit)
    }

    pub const fn bits_consumed(&self) -> u64 {
        self.byte as u64 * 8 + self.bit as u64
    }

    /// Bytes touched so far, counting a partially read byte.
    pub const fn bytes_consumed(&self) -> usize {
        self.byte + (self.bit > 0) as usize
    }
}
