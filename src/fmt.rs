//! Human-readable formatting of splice sections.
//!
//! The [`Display`](std::fmt::Display) impls here produce the indented text
//! report printed by the command line tool.

use crate::descriptors::SpliceDescriptor;
use crate::time::{BreakDuration, SpliceTime, ticks_to_secs};
use crate::types::{SpliceCommand, SpliceInfoSection};
use std::fmt;

/// Converts a 32-bit identifier to its ASCII form when every byte is an
/// ASCII letter or digit, and to `0x`-prefixed hex otherwise.
///
/// ```rust
/// use scte104to35::fmt::format_identifier_to_string;
///
/// assert_eq!(format_identifier_to_string(0x43554549), "CUEI");
/// assert_eq!(format_identifier_to_string(0x12345678), "0x12345678");
/// ```
pub fn format_identifier_to_string(identifier: u32) -> String {
    let bytes = identifier.to_be_bytes();
    if bytes.iter().all(u8::is_ascii_alphanumeric) {
        bytes.iter().map(|&b| b as char).collect()
    } else {
        format!("0x{:08X}", identifier)
    }
}

/// Formats bytes as hex, shortening long payloads to a preview.
///
/// ```rust
/// use scte104to35::fmt::format_as_hex;
///
/// assert_eq!(format_as_hex(&[0x01, 0x02, 0x03]), "0x010203");
/// assert_eq!(format_as_hex(&(0..20).collect::<Vec<u8>>()), "0x000102030405... (20 bytes)");
/// ```
pub fn format_as_hex(data: &[u8]) -> String {
    const PREVIEW: usize = 6;
    let hex = |bytes: &[u8]| bytes.iter().map(|b| format!("{:02x}", b)).collect::<String>();
    if data.len() <= 8 {
        format!("0x{}", hex(data))
    } else {
        format!("0x{}... ({} bytes)", hex(&data[..PREVIEW]), data.len())
    }
}

/// Shows printable ASCII payloads as a quoted string, anything else as hex.
pub fn format_private_data(data: &[u8]) -> String {
    if data.is_empty() {
        return "empty".to_string();
    }
    match std::str::from_utf8(data) {
        Ok(s) if s.chars().all(|c| c.is_ascii_graphic() || c == ' ') => format!("\"{}\"", s),
        _ => format_as_hex(data),
    }
}

fn format_pts(ticks: u64) -> String {
    format!("0x{:09x} ({:.6} seconds)", ticks, ticks_to_secs(ticks))
}

impl fmt::Display for SpliceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pts_time {
            Some(pts) if self.time_specified_flag != 0 => f.write_str(&format_pts(pts)),
            _ => f.write_str("not specified"),
        }
    }
}

impl fmt::Display for BreakDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (auto return: {})",
            format_pts(self.duration),
            self.auto_return != 0
        )
    }
}

impl fmt::Display for SpliceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpliceCommand::SpliceNull => writeln!(f, "  Splice Command: SpliceNull"),
            SpliceCommand::SpliceInsert(cmd) => {
                writeln!(f, "  Splice Command: SpliceInsert")?;
                writeln!(f, "    Splice Event ID: 0x{:08x}", cmd.splice_event_id)?;
                writeln!(f, "    Splice Event Cancel: {}", cmd.splice_event_cancel_indicator)?;
                if cmd.splice_event_cancel_indicator != 0 {
                    return Ok(());
                }
                writeln!(f, "    Out of Network: {}", cmd.out_of_network_indicator)?;
                writeln!(f, "    Program Splice Flag: {}", cmd.program_splice_flag)?;
                writeln!(f, "    Duration Flag: {}", cmd.duration_flag)?;
                writeln!(f, "    Splice Immediate Flag: {}", cmd.splice_immediate_flag)?;
                if let Some(splice_time) = &cmd.splice_time {
                    writeln!(f, "    Splice Time: {}", splice_time)?;
                }
                if let (1, Some(break_duration)) = (cmd.duration_flag, &cmd.break_duration) {
                    writeln!(f, "    Break Duration: {}", break_duration)?;
                }
                writeln!(f, "    Unique Program ID: {}", cmd.unique_program_id)?;
                writeln!(f, "    Avail Num: {}", cmd.avail_num)?;
                writeln!(f, "    Avails Expected: {}", cmd.avails_expected)
            }
            SpliceCommand::TimeSignal(cmd) => {
                writeln!(f, "  Splice Command: TimeSignal")?;
                writeln!(f, "    Splice Time: {}", cmd.splice_time)
            }
            SpliceCommand::PrivateCommand(cmd) => {
                writeln!(f, "  Splice Command: PrivateCommand")?;
                writeln!(
                    f,
                    "    Identifier: {}",
                    format_identifier_to_string(cmd.identifier)
                )?;
                writeln!(f, "    Private Bytes: {}", format_private_data(&cmd.private_bytes))
            }
        }
    }
}

impl fmt::Display for SpliceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let identifier = format_identifier_to_string(self.identifier());
        match self {
            SpliceDescriptor::Avail(d) => write!(
                f,
                "Avail [{}] provider_avail_id={}",
                identifier, d.provider_avail_id
            ),
            SpliceDescriptor::Dtmf(d) => write!(
                f,
                "DTMF [{}] preroll={} chars={}",
                identifier,
                d.preroll,
                format_private_data(&d.dtmf_chars)
            ),
            SpliceDescriptor::Segmentation(d) => {
                write!(
                    f,
                    "Segmentation [{}] event_id=0x{:08x}",
                    identifier, d.segmentation_event_id
                )?;
                if d.segmentation_event_cancel_indicator {
                    return f.write_str(" cancelled");
                }
                write!(
                    f,
                    " type_id=0x{:02x} segment={}/{} upid_type=0x{:02x} upid={}",
                    d.segmentation_type_id,
                    d.segment_num,
                    d.segments_expected,
                    d.segmentation_upid_type,
                    format_private_data(&d.segmentation_upid)
                )?;
                if let Some(duration) = d.segmentation_duration {
                    write!(f, " duration={}", format_pts(duration))?;
                }
                Ok(())
            }
            SpliceDescriptor::Time(d) => write!(
                f,
                "Time [{}] tai={}.{:09} utc_offset={}",
                identifier, d.tai_seconds, d.tai_ns, d.utc_offset
            ),
            SpliceDescriptor::Generic(d) => write!(
                f,
                "Generic tag=0x{:02x} [{}] data={}",
                d.tag,
                identifier,
                format_as_hex(&d.data)
            ),
        }
    }
}

impl fmt::Display for SpliceInfoSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SpliceInfoSection:")?;
        writeln!(f, "  SAP Type: {}", self.sap_type)?;
        writeln!(f, "  Protocol Version: {}", self.protocol_version)?;
        writeln!(f, "  PTS Adjustment: {}", self.pts_adjustment)?;
        writeln!(f, "  Tier: 0x{:03x}", self.tier)?;
        write!(f, "{}", self.splice_command)?;
        writeln!(
            f,
            "  Number of Descriptors: {}",
            self.splice_descriptors.len()
        )?;
        for descriptor in &self.splice_descriptors {
            writeln!(f, "    {}", descriptor)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptors::{AvailDescriptor, GenericDescriptor};
    use crate::types::{PrivateCommand, SpliceInsert, TimeSignal};

    #[test]
    fn test_format_identifier_to_string() {
        assert_eq!(format_identifier_to_string(0x43554549), "CUEI");
        assert_eq!(format_identifier_to_string(0x54455354), "TEST");
        assert_eq!(format_identifier_to_string(0x41422D44), "0x41422D44");
        assert_eq!(format_identifier_to_string(0), "0x00000000");
    }

    #[test]
    fn test_format_private_data() {
        assert_eq!(format_private_data(&[]), "empty");
        assert_eq!(format_private_data(b"121#"), "\"121#\"");
        assert_eq!(format_private_data(&[0xFF, 0xFE, 0xFD]), "0xfffefd");
        assert_eq!(format_private_data(b"ab\x00"), "0x616200");
    }

    #[test]
    fn test_format_as_hex() {
        assert_eq!(format_as_hex(&[]), "0x");
        assert_eq!(
            format_as_hex(&[1, 2, 3, 4, 5, 6, 7, 8]),
            "0x0102030405060708"
        );
        assert_eq!(
            format_as_hex(&(0..9).collect::<Vec<u8>>()),
            "0x000102030405... (9 bytes)"
        );
    }

    #[test]
    fn test_splice_time_display() {
        assert_eq!(SpliceTime::at(90_000).to_string(), "0x000015f90 (1.000000 seconds)");
        assert_eq!(SpliceTime::unspecified().to_string(), "not specified");
    }

    #[test]
    fn test_section_display() {
        let mut insert = SpliceInsert::new(0x1234);
        insert.splice_immediate_flag = 1;
        let mut section = SpliceInfoSection::new(SpliceCommand::SpliceInsert(insert));
        section
            .splice_descriptors
            .try_push(SpliceDescriptor::Avail(AvailDescriptor::new(7)))
            .unwrap();

        let text = section.to_string();
        assert!(text.contains("Splice Command: SpliceInsert"));
        assert!(text.contains("Splice Event ID: 0x00001234"));
        assert!(text.contains("Tier: 0xfff"));
        assert!(text.contains("Number of Descriptors: 1"));
        assert!(text.contains("Avail [CUEI] provider_avail_id=7"));
    }

    #[test]
    fn test_other_commands_display() {
        let section = SpliceInfoSection::new(SpliceCommand::TimeSignal(TimeSignal {
            splice_time: SpliceTime::at(0),
        }));
        assert!(section.to_string().contains("Splice Command: TimeSignal"));

        let section = SpliceInfoSection::new(SpliceCommand::PrivateCommand(PrivateCommand {
            identifier: 0x5445_5354,
            private_bytes: b"hello".to_vec(),
        }));
        let text = section.to_string();
        assert!(text.contains("Identifier: TEST"));
        assert!(text.contains("Private Bytes: \"hello\""));

        let generic = SpliceDescriptor::Generic(GenericDescriptor {
            tag: 0xF0,
            identifier: 0x0102_0304,
            data: vec![0xAA],
        });
        assert_eq!(generic.to_string(), "Generic tag=0xf0 [0x01020304] data=0xaa");
    }
}
