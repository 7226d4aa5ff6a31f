//! Time structures carried by SCTE-35 commands and the unit conversions used
//! when deriving them from SCTE-104 requests.
//!
//! SCTE-35 expresses every instant and duration in ticks of the 90 kHz
//! presentation clock, while SCTE-104 requests carry milliseconds, tenths of a
//! second or whole seconds depending on the field.

/// Mask for 33-bit PTS fields.
pub const PTS_MASK: u64 = 0x1_FFFF_FFFF;

/// 90 kHz ticks in one millisecond.
pub const TICKS_PER_MILLISECOND: u64 = 90;

/// 90 kHz ticks in a tenth of a second.
pub const TICKS_PER_DECISECOND: u64 = 9_000;

/// 90 kHz ticks in one second.
pub const TICKS_PER_SECOND: u64 = 90_000;

/// Represents a `splice_time()` structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpliceTime {
    /// 1 when `pts_time` is present.
    pub time_specified_flag: u8,
    /// Presentation time in 90 kHz ticks (33 bits).
    pub pts_time: Option<u64>,
}

impl SpliceTime {
    /// A splice time pointing at the given PTS, masked to 33 bits.
    pub fn at(pts_time: u64) -> Self {
        Self {
            time_specified_flag: 1,
            pts_time: Some(mask_pts(pts_time)),
        }
    }

    /// A splice time without a PTS.
    pub fn unspecified() -> Self {
        Self {
            time_specified_flag: 0,
            pts_time: None,
        }
    }
}

/// Represents a `break_duration()` structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakDuration {
    /// 1 when the splicer should return to the network at the end of the break.
    pub auto_return: u8,
    /// Break length in 90 kHz ticks (33 bits).
    pub duration: u64,
}

/// Truncates a tick count to the 33 bits of a PTS field.
#[inline]
pub fn mask_pts(ticks: u64) -> u64 {
    ticks & PTS_MASK
}

/// Converts a pre-roll in milliseconds into the PTS at which the splice
/// happens, relative to `base_pts`. The result wraps like the PTS clock does.
pub fn preroll_to_pts(base_pts: u64, preroll_ms: u16) -> u64 {
    mask_pts(base_pts.wrapping_add(preroll_ms as u64 * TICKS_PER_MILLISECOND))
}

/// Converts a SCTE-104 break duration (tenths of a second) into ticks.
pub fn break_duration_to_ticks(break_duration: u16) -> u64 {
    break_duration as u64 * TICKS_PER_DECISECOND
}

/// Converts a SCTE-104 segmentation duration (seconds) into ticks.
pub fn segmentation_duration_to_ticks(duration: u16) -> u64 {
    duration as u64 * TICKS_PER_SECOND
}

/// Truncate to 6 decimal positions.
pub fn ticks_to_secs(value: u64) -> f64 {
    (value as f64 / TICKS_PER_SECOND as f64 * 1_000_000.0).ceil() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preroll_to_pts() {
        assert_eq!(preroll_to_pts(0, 4000), 360_000);
        assert_eq!(preroll_to_pts(1_000, 0), 1_000);
        assert_eq!(preroll_to_pts(0, u16::MAX), 65_535 * 90);
    }

    #[test]
    fn test_preroll_to_pts_wraps_at_33_bits() {
        assert_eq!(preroll_to_pts(PTS_MASK, 1000), 89_999);
        assert_eq!(preroll_to_pts(PTS_MASK + 1, 0), 0);
        // Bits above the 33-bit field never leak into the result.
        let base = 0xFFFF_0000_0000_0000 | 0x1234;
        assert_eq!(preroll_to_pts(base, 10), 0x1234 + 900);
    }

    #[test]
    fn test_preroll_to_pts_does_not_overflow() {
        assert_eq!(preroll_to_pts(u64::MAX, 1), mask_pts(u64::MAX.wrapping_add(90)));
    }

    #[test]
    fn test_duration_conversions() {
        assert_eq!(break_duration_to_ticks(30_000), 270_000_000);
        assert_eq!(break_duration_to_ticks(0), 0);
        assert_eq!(segmentation_duration_to_ticks(15_000), 1_350_000_000);
        assert_eq!(segmentation_duration_to_ticks(1), TICKS_PER_SECOND);
    }

    #[test]
    fn test_splice_time_constructors() {
        let time = SpliceTime::at(PTS_MASK + 5);
        assert_eq!(time.time_specified_flag, 1);
        assert_eq!(time.pts_time, Some(4));

        let time = SpliceTime::unspecified();
        assert_eq!(time.time_specified_flag, 0);
        assert_eq!(time.pts_time, None);
    }

    #[test]
    fn test_ticks_to_secs() {
        assert_eq!(ticks_to_secs(90_000), 1.0);
        assert_eq!(ticks_to_secs(0x072bd0050), 21388.766756);
    }
}
