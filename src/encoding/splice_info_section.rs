//! Encoding implementation for SpliceInfoSection.

use crate::crc::{CRC_LENGTH, calculate_crc};
use crate::encoding::{BitWriter, Encodable, EncodingError, EncodingResult, SectionSerializer};
use crate::time::PTS_MASK;
use crate::types::{SpliceInfoSection, TABLE_ID};
use tracing::trace;

/// Bytes up to and including `splice_command_type`.
const FIXED_HEADER_SIZE: usize = 14;

/// Bytes preceding the part counted by `section_length`.
const SECTION_LENGTH_OFFSET: usize = 3;

/// Largest `section_length` SCTE-35 allows.
pub const MAX_SECTION_LENGTH: usize = 4093;

impl SpliceInfoSection {
    fn descriptor_loop_length(&self) -> usize {
        self.splice_descriptors
            .iter()
            .map(Encodable::encoded_size)
            .sum()
    }

    /// Encode all fields except the CRC-32.
    fn encode_without_crc(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        let section_length = self.encoded_size() - SECTION_LENGTH_OFFSET;
        if section_length > MAX_SECTION_LENGTH {
            return Err(EncodingError::ValueTooLarge {
                field: "section_length",
                max_value: MAX_SECTION_LENGTH as u64,
                actual_value: section_length as u64,
            });
        }

        writer.write_bits(TABLE_ID as u64, 8)?;
        // section_syntax_indicator, private_indicator
        writer.write_bits(0, 2)?;
        writer.write_field("sap_type", self.sap_type as u64, 2)?;
        writer.write_bits(section_length as u64, 12)?;
        writer.write_bits(self.protocol_version as u64, 8)?;
        // encrypted_packet, encryption_algorithm
        writer.write_bits(0, 7)?;
        writer.write_bits(self.pts_adjustment & PTS_MASK, 33)?;
        // cw_index
        writer.write_bits(0, 8)?;
        writer.write_field("tier", self.tier as u64, 12)?;
        writer.write_field(
            "splice_command_length",
            self.splice_command.encoded_size() as u64,
            12,
        )?;
        writer.write_bits(u8::from(self.splice_command_type()) as u64, 8)?;
        self.splice_command.encode(writer)?;

        writer.write_field(
            "descriptor_loop_length",
            self.descriptor_loop_length() as u64,
            16,
        )?;
        for descriptor in &self.splice_descriptors {
            descriptor.encode(writer)?;
        }

        Ok(())
    }
}

impl Encodable for SpliceInfoSection {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        let mut body = BitWriter::with_capacity(self.encoded_size());
        self.encode_without_crc(&mut body)?;
        let body = body.finish();

        writer.write_bytes(&body)?;
        writer.write_bits(calculate_crc(&body) as u64, 32)
    }

    fn encoded_size(&self) -> usize {
        FIXED_HEADER_SIZE
            + self.splice_command.encoded_size()
            + 2
            + self.descriptor_loop_length()
            + CRC_LENGTH
    }
}

#[cfg(feature = "base64")]
impl crate::encoding::Base64Encodable for SpliceInfoSection {}

/// [`SectionSerializer`] producing SCTE-35 wire bytes with a valid CRC_32.
#[derive(Debug, Clone, Copy, Default)]
pub struct WireSerializer;

impl SectionSerializer for WireSerializer {
    fn serialize(&self, section: &SpliceInfoSection, dest: &mut [u8]) -> EncodingResult<usize> {
        let available = dest.len();
        let overflow = |needed| EncodingError::BufferOverflow { needed, available };
        if section.encoded_size() > available {
            return Err(overflow(section.encoded_size()));
        }

        let encoded = section.encode_to_vec()?;
        dest.get_mut(..encoded.len())
            .ok_or_else(|| overflow(encoded.len()))?
            .copy_from_slice(&encoded);
        trace!(length = encoded.len(), "encoded splice_info_section");
        Ok(encoded.len())
    }
}
