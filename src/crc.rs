//! CRC-32 support for SCTE-35 sections.
//!
//! Every splice_info_section ends with a CRC_32 computed with the MPEG-2
//! algorithm over all preceding bytes of the section.

use crc::{CRC_32_MPEG_2, Crc};
use std::io::{self, ErrorKind};

/// MPEG-2 CRC-32 algorithm instance used for SCTE-35 sections.
pub const MPEG_2: Crc<u32> = Crc::<u32>::new(&CRC_32_MPEG_2);

/// Size of the trailing CRC_32 field.
pub const CRC_LENGTH: usize = 4;

/// Calculates the CRC-32 checksum for the given data.
pub fn calculate_crc(data: &[u8]) -> u32 {
    MPEG_2.checksum(data)
}

/// Validates CRC-32 checksum using MPEG-2 algorithm.
pub fn validate_crc(data: &[u8], expected_crc: u32) -> bool {
    calculate_crc(data) == expected_crc
}

/// Validates the CRC-32 checksum of a complete SCTE-35 section.
///
/// The CRC is read from the last 4 bytes of the buffer and compared against
/// the checksum of the preceding data.
///
/// # Example
///
/// ```rust
/// use scte104to35::crc::validate_message_crc;
/// use data_encoding::BASE64;
///
/// let base64_message = "/DAWAAAAAAAAAP/wBQb+Qjo1vQAAuwxz9A==";
/// let buffer = BASE64.decode(base64_message.as_bytes()).unwrap();
/// assert!(validate_message_crc(&buffer).unwrap());
/// ```
pub fn validate_message_crc(buffer: &[u8]) -> Result<bool, io::Error> {
    if buffer.len() < CRC_LENGTH {
        return Err(io::Error::new(
            ErrorKind::InvalidData,
            "Buffer too short to contain CRC-32 field",
        ));
    }

    let (data, crc_bytes) = buffer.split_at(buffer.len() - CRC_LENGTH);
    let stored_crc = u32::from_be_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);
    Ok(validate_crc(data, stored_crc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc_calculation() {
        let test_data = b"Hello, SCTE-35!";
        let crc = calculate_crc(test_data);
        assert!(validate_crc(test_data, crc));
        assert!(!validate_crc(test_data, crc ^ 1));
    }

    #[test]
    fn test_known_section_crc() {
        // splice_null section without its CRC field
        let section = [
            0xFC, 0x30, 0x11, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xF0, 0x00, 0x00,
            0x00, 0x00,
        ];
        assert_eq!(calculate_crc(&section), 0x7A4F_BFFF);
    }

    #[test]
    fn test_message_crc_validation_short_buffer() {
        let short_buffer = vec![0x01, 0x02];
        let result = validate_message_crc(&short_buffer);
        assert!(result.is_err());
    }

    #[test]
    fn test_message_crc_validation() {
        let mut test_data = vec![0xFC, 0x30, 0x11, 0x00, 0x00, 0x00, 0x00, 0x00];
        let calculated_crc = calculate_crc(&test_data);
        test_data.extend_from_slice(&calculated_crc.to_be_bytes());

        assert!(validate_message_crc(&test_data).unwrap());

        let last = test_data.len() - 1;
        test_data[last] ^= 0xFF;
        assert!(!validate_message_crc(&test_data).unwrap());
    }
}
