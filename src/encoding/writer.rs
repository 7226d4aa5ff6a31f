//! Bit-level writer for encoding binary data.

use super::error::{EncodingError, EncodingResult};

/// A writer that packs values of arbitrary bit width, most significant bit
/// first, into a byte buffer.
#[derive(Debug, Default)]
pub struct BitWriter {
    /// Completed bytes.
    buffer: Vec<u8>,
    /// Bits of the byte being assembled, right aligned.
    current_byte: u8,
    /// Number of bits held in `current_byte` (0-7).
    pending_bits: u8,
}

impl BitWriter {
    /// Creates a new `BitWriter` with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `BitWriter` with a pre-allocated buffer capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Writes the low `bits` bits of `value`. Higher bits are ignored.
    ///
    /// # Errors
    /// Returns [`EncodingError::InvalidBitWidth`] if `bits` is 0 or greater than 64.
    pub fn write_bits(&mut self, value: u64, bits: u8) -> EncodingResult<()> {
        if bits == 0 || bits > 64 {
            return Err(EncodingError::InvalidBitWidth(bits));
        }

        if self.pending_bits == 0 && bits % 8 == 0 {
            let bytes = value.to_be_bytes();
            self.buffer
                .extend_from_slice(&bytes[bytes.len() - bits as usize / 8..]);
            return Ok(());
        }

        for shift in (0..bits).rev() {
            self.push_bit((value >> shift) & 1 == 1);
        }
        Ok(())
    }

    /// Writes `value` into a field of `bits` bits, rejecting values that do
    /// not fit instead of truncating them.
    pub fn write_field(&mut self, field: &'static str, value: u64, bits: u8) -> EncodingResult<()> {
        let max_value = max_for_width(bits)?;
        if value > max_value {
            return Err(EncodingError::ValueTooLarge {
                field,
                max_value,
                actual_value: value,
            });
        }
        self.write_bits(value, bits)
    }

    /// Writes a single bit.
    pub fn write_bit(&mut self, bit: bool) -> EncodingResult<()> {
        self.push_bit(bit);
        Ok(())
    }

    /// Writes a complete byte array.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> EncodingResult<()> {
        if self.pending_bits == 0 {
            self.buffer.extend_from_slice(bytes);
            return Ok(());
        }
        for &byte in bytes {
            self.write_bits(byte as u64, 8)?;
        }
        Ok(())
    }

    /// Finishes writing and returns the complete buffer, padding the last
    /// byte with zeros if necessary.
    pub fn finish(mut self) -> Vec<u8> {
        if self.pending_bits > 0 {
            self.buffer
                .push(self.current_byte << (8 - self.pending_bits));
        }
        self.buffer
    }

    /// Returns the current size of the buffer in bytes, counting a partially
    /// written byte.
    pub fn len(&self) -> usize {
        self.buffer.len() + usize::from(self.pending_bits > 0)
    }

    /// Returns true if no bits have been written yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty() && self.pending_bits == 0
    }

    /// Returns true when the next write starts on a byte boundary.
    pub fn is_byte_aligned(&self) -> bool {
        self.pending_bits == 0
    }

    fn push_bit(&mut self, bit: bool) {
        self.current_byte = (self.current_byte << 1) | u8::from(bit);
        self.pending_bits += 1;
        if self.pending_bits == 8 {
            self.buffer.push(self.current_byte);
            self.current_byte = 0;
            self.pending_bits = 0;
        }
    }
}

fn max_for_width(bits: u8) -> EncodingResult<u64> {
    match bits {
        64 => Ok(u64::MAX),
        1..=63 => Ok((1u64 << bits) - 1),
        _ => Err(EncodingError::InvalidBitWidth(bits)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_single_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(0xAB, 8).unwrap();
        assert_eq!(writer.finish(), vec![0xAB]);
    }

    #[test]
    fn test_write_bits_across_bytes() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b11001, 5).unwrap();
        writer.write_bits(0b0110, 4).unwrap();
        writer.write_bits(0b1111, 4).unwrap();
        assert_eq!(writer.finish(), vec![0b10111001, 0b01101111]);
    }

    #[test]
    fn test_write_33_bit_pts_after_flags() {
        let mut writer = BitWriter::new();
        writer.write_bit(true).unwrap();
        writer.write_bits(0x3F, 6).unwrap();
        writer.write_bits(0x1_4233_35BD, 33).unwrap();
        assert_eq!(writer.finish(), vec![0xFF, 0x42, 0x33, 0x35, 0xBD]);
    }

    #[test]
    fn test_aligned_fast_path() {
        let mut writer = BitWriter::new();
        writer.write_bits(0x4355_4549, 32).unwrap();
        writer.write_bits(0x0102_0304_0506, 48).unwrap();
        assert_eq!(
            writer.finish(),
            vec![0x43, 0x55, 0x45, 0x49, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06]
        );
    }

    #[test]
    fn test_write_bytes_unaligned() {
        let mut writer = BitWriter::new();
        writer.write_bits(0xF, 4).unwrap();
        writer.write_bytes(&[0xAB, 0xCD]).unwrap();
        writer.write_bits(0x0, 4).unwrap();
        assert_eq!(writer.finish(), vec![0xFA, 0xBC, 0xD0]);
    }

    #[test]
    fn test_partial_byte_finish() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b10110, 5).unwrap();
        assert_eq!(writer.len(), 1);
        assert!(!writer.is_byte_aligned());
        assert_eq!(writer.finish(), vec![0b10110000]);
    }

    #[test]
    fn test_value_masking() {
        let mut writer = BitWriter::new();
        writer.write_bits(0xFF, 4).unwrap();
        assert_eq!(writer.finish(), vec![0b11110000]);
    }

    #[test]
    fn test_write_field_rejects_oversized_values() {
        let mut writer = BitWriter::new();
        writer.write_field("descriptor_length", 255, 8).unwrap();
        assert_eq!(
            writer.write_field("descriptor_length", 256, 8),
            Err(EncodingError::ValueTooLarge {
                field: "descriptor_length",
                max_value: 255,
                actual_value: 256,
            })
        );
        writer.write_field("anything", u64::MAX, 64).unwrap();
        assert_eq!(writer.len(), 9);
    }

    #[test]
    fn test_invalid_bits() {
        let mut writer = BitWriter::new();
        assert_eq!(writer.write_bits(0, 0), Err(EncodingError::InvalidBitWidth(0)));
        assert_eq!(writer.write_bits(0, 65), Err(EncodingError::InvalidBitWidth(65)));
        assert_eq!(
            writer.write_field("x", 0, 65),
            Err(EncodingError::InvalidBitWidth(65))
        );
        assert!(writer.is_empty());
    }
}
