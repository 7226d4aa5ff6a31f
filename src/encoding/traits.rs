//! Trait definitions for encodable types and section serializers.

use super::error::EncodingResult;
use super::writer::BitWriter;
use crate::types::SpliceInfoSection;

/// Trait for types that can be encoded to SCTE-35 binary format.
pub trait Encodable {
    /// Encode the structure to binary SCTE-35 format.
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()>;

    /// Calculate the encoded size in bytes.
    ///
    /// This must match the number of bytes `encode` writes; length fields
    /// are derived from it.
    fn encoded_size(&self) -> usize;

    /// Convenience method to encode to a new byte vector.
    fn encode_to_vec(&self) -> EncodingResult<Vec<u8>> {
        let mut writer = BitWriter::with_capacity(self.encoded_size());
        self.encode(&mut writer)?;
        Ok(writer.finish())
    }
}

/// Turns a finished splice section into its wire representation.
///
/// Implementations write into `dest` and return the number of bytes used.
pub trait SectionSerializer {
    fn serialize(&self, section: &SpliceInfoSection, dest: &mut [u8]) -> EncodingResult<usize>;
}

impl<S: SectionSerializer + ?Sized> SectionSerializer for &S {
    fn serialize(&self, section: &SpliceInfoSection, dest: &mut [u8]) -> EncodingResult<usize> {
        (**self).serialize(section, dest)
    }
}

/// Extension trait for base64 encoding support.
#[cfg(feature = "base64")]
pub trait Base64Encodable: Encodable {
    /// Encode to base64 string.
    fn encode_base64(&self) -> EncodingResult<String> {
        let bytes = self.encode_to_vec()?;
        Ok(data_encoding::BASE64.encode(&bytes))
    }
}
