//! Encoding of splice_time() and break_duration().

use crate::encoding::{BitWriter, Encodable, EncodingResult};
use crate::time::{BreakDuration, PTS_MASK, SpliceTime};

impl Encodable for SpliceTime {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        match self.pts_time {
            Some(pts_time) if self.time_specified_flag != 0 => {
                writer.write_bit(true)?;
                writer.write_bits(0x3F, 6)?;
                writer.write_field("pts_time", pts_time, 33)
            }
            _ => {
                writer.write_bit(false)?;
                writer.write_bits(0x7F, 7)
            }
        }
    }

    fn encoded_size(&self) -> usize {
        match self.pts_time {
            Some(_) if self.time_specified_flag != 0 => 5,
            _ => 1,
        }
    }
}

impl Encodable for BreakDuration {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        writer.write_bit(self.auto_return != 0)?;
        writer.write_bits(0x3F, 6)?;
        writer.write_field("break_duration", self.duration, 33)
    }

    fn encoded_size(&self) -> usize {
        5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::EncodingError;

    #[test]
    fn test_splice_time_specified() {
        let encoded = SpliceTime::at(0x4212_35BD).encode_to_vec().unwrap();
        assert_eq!(encoded, vec![0xFE, 0x42, 0x12, 0x35, 0xBD]);
    }

    #[test]
    fn test_splice_time_unspecified() {
        let time = SpliceTime::unspecified();
        assert_eq!(time.encoded_size(), 1);
        assert_eq!(time.encode_to_vec().unwrap(), vec![0x7F]);
    }

    #[test]
    fn test_flag_without_pts_is_written_unspecified() {
        let time = SpliceTime {
            time_specified_flag: 1,
            pts_time: None,
        };
        assert_eq!(time.encode_to_vec().unwrap(), vec![0x7F]);
    }

    #[test]
    fn test_break_duration() {
        let duration = BreakDuration {
            auto_return: 1,
            duration: 270_000_000,
        };
        assert_eq!(
            duration.encode_to_vec().unwrap(),
            vec![0xFE, 0x10, 0x17, 0xDF, 0x80]
        );

        let duration = BreakDuration {
            auto_return: 0,
            duration: PTS_MASK + 1,
        };
        assert!(matches!(
            duration.encode_to_vec(),
            Err(EncodingError::ValueTooLarge {
                field: "break_duration",
                ..
            })
        ));
    }
}
