//! Encoding implementations for SCTE-35 descriptors.
//!
//! Every descriptor starts with `splice_descriptor_tag`, `descriptor_length`
//! and the 32-bit identifier. `descriptor_length` counts the bytes after the
//! length field and must fit in 8 bits.

use crate::descriptors::*;
use crate::encoding::{BitWriter, Encodable, EncodingResult};

const HEADER_SIZE: usize = 2;
const IDENTIFIER_SIZE: usize = 4;

fn write_header(
    writer: &mut BitWriter,
    tag: u8,
    descriptor_length: usize,
    identifier: u32,
) -> EncodingResult<()> {
    writer.write_bits(tag as u64, 8)?;
    writer.write_field("descriptor_length", descriptor_length as u64, 8)?;
    writer.write_bits(identifier as u64, 32)
}

impl SpliceDescriptor {
    /// Bytes following the `descriptor_length` field.
    pub fn descriptor_length(&self) -> usize {
        self.encoded_size() - HEADER_SIZE
    }
}

impl Encodable for SpliceDescriptor {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        write_header(writer, self.tag(), self.descriptor_length(), self.identifier())?;
        match self {
            SpliceDescriptor::Avail(desc) => desc.encode(writer),
            SpliceDescriptor::Dtmf(desc) => desc.encode(writer),
            SpliceDescriptor::Segmentation(desc) => desc.encode(writer),
            SpliceDescriptor::Time(desc) => desc.encode(writer),
            SpliceDescriptor::Generic(desc) => desc.encode(writer),
        }
    }

    fn encoded_size(&self) -> usize {
        HEADER_SIZE
            + IDENTIFIER_SIZE
            + match self {
                SpliceDescriptor::Avail(desc) => desc.encoded_size(),
                SpliceDescriptor::Dtmf(desc) => desc.encoded_size(),
                SpliceDescriptor::Segmentation(desc) => desc.encoded_size(),
                SpliceDescriptor::Time(desc) => desc.encoded_size(),
                SpliceDescriptor::Generic(desc) => desc.encoded_size(),
            }
    }
}

// The per-kind impls below cover only the bytes after the identifier.

impl Encodable for AvailDescriptor {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        writer.write_bits(self.provider_avail_id as u64, 32)
    }

    fn encoded_size(&self) -> usize {
        4
    }
}

impl Encodable for DtmfDescriptor {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        writer.write_bits(self.preroll as u64, 8)?;
        writer.write_field("dtmf_count", self.dtmf_chars.len() as u64, 3)?;
        // reserved
        writer.write_bits(0x1F, 5)?;
        writer.write_bytes(&self.dtmf_chars)
    }

    fn encoded_size(&self) -> usize {
        2 + self.dtmf_chars.len()
    }
}

impl Encodable for SegmentationDescriptor {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        writer.write_bits(self.segmentation_event_id as u64, 32)?;
        writer.write_bit(self.segmentation_event_cancel_indicator)?;
        writer.write_bits(0x7F, 7)?;

        if self.segmentation_event_cancel_indicator {
            return Ok(());
        }

        writer.write_bit(self.program_segmentation_flag)?;
        writer.write_bit(self.segmentation_duration_flag())?;
        writer.write_bit(self.delivery_not_restricted_flag)?;
        if self.delivery_not_restricted_flag {
            writer.write_bits(0x1F, 5)?;
        } else {
            writer.write_bit(self.web_delivery_allowed_flag)?;
            writer.write_bit(self.no_regional_blackout_flag)?;
            writer.write_bit(self.archive_allowed_flag)?;
            writer.write_field("device_restrictions", self.device_restrictions as u64, 2)?;
        }

        if let Some(duration) = self.segmentation_duration {
            writer.write_field("segmentation_duration", duration, 40)?;
        }

        writer.write_bits(self.segmentation_upid_type as u64, 8)?;
        writer.write_field(
            "segmentation_upid_length",
            self.segmentation_upid.len() as u64,
            8,
        )?;
        writer.write_bytes(&self.segmentation_upid)?;
        writer.write_bits(self.segmentation_type_id as u64, 8)?;
        writer.write_bits(self.segment_num as u64, 8)?;
        writer.write_bits(self.segments_expected as u64, 8)?;

        if self.has_sub_segment_fields() {
            writer.write_bits(self.sub_segment_num as u64, 8)?;
            writer.write_bits(self.sub_segments_expected as u64, 8)?;
        }

        Ok(())
    }

    fn encoded_size(&self) -> usize {
        // segmentation_event_id + cancel indicator byte
        let mut size = 5;

        if !self.segmentation_event_cancel_indicator {
            size += 1; // flags byte
            if self.segmentation_duration_flag() {
                size += 5;
            }
            size += 2 + self.segmentation_upid.len();
            size += 3; // type_id + segment_num + segments_expected
            if self.has_sub_segment_fields() {
                size += 2;
            }
        }

        size
    }
}

impl Encodable for TimeDescriptor {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        writer.write_field("tai_seconds", self.tai_seconds, 48)?;
        writer.write_bits(self.tai_ns as u64, 32)?;
        writer.write_bits(self.utc_offset as u64, 16)
    }

    fn encoded_size(&self) -> usize {
        12
    }
}

impl Encodable for GenericDescriptor {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        writer.write_bytes(&self.data)
    }

    fn encoded_size(&self) -> usize {
        self.data.len()
    }
}
