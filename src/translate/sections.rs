//! Splice section list and the builders for primary commands.
//!
//! Each builder turns one primary-command operation into a fresh
//! [`SpliceInfoSection`]. The dispatcher appends it to the
//! [`SpliceSectionList`], where it becomes the target of later descriptor
//! operations.

use super::MAX_SPLICES;
use super::error::{TranslateError, TranslateResult};
use crate::bounded::BoundedVec;
use crate::scte104::{
    ProprietaryCommandRequestData, SpliceInsertType, SpliceRequestData, TimeSignalRequestData,
};
use crate::time::{BreakDuration, SpliceTime, break_duration_to_ticks, preroll_to_pts};
use crate::types::{
    PrivateCommand, SpliceCommand, SpliceCommandType, SpliceInfoSection, SpliceInsert,
    TimeSignal,
};
use std::ops::Deref;

/// Sections built during one translation, in the order of their operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpliceSectionList {
    sections: BoundedVec<SpliceInfoSection, MAX_SPLICES>,
}

impl SpliceSectionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no more sections can be appended.
    pub fn is_full(&self) -> bool {
        self.sections.is_full()
    }

    /// Appends a section, failing with `CapacityExceeded` when the list is full.
    pub fn push(&mut self, section: SpliceInfoSection) -> TranslateResult<()> {
        self.sections
            .try_push(section)
            .map_err(|_| TranslateError::CapacityExceeded { limit: MAX_SPLICES })
    }

    /// The most recently appended section.
    pub fn last_mut(&mut self) -> Option<&mut SpliceInfoSection> {
        self.sections.last_mut()
    }

    /// The most recently appended section whose command type satisfies `eligible`.
    pub fn find_last_eligible<F>(&mut self, eligible: F) -> Option<&mut SpliceInfoSection>
    where
        F: Fn(SpliceCommandType) -> bool,
    {
        self.sections
            .iter_mut()
            .rev()
            .find(|section| eligible(section.splice_command_type()))
    }
}

impl Deref for SpliceSectionList {
    type Target = [SpliceInfoSection];

    fn deref(&self) -> &[SpliceInfoSection] {
        &self.sections
    }
}

impl IntoIterator for SpliceSectionList {
    type Item = SpliceInfoSection;
    type IntoIter = std::vec::IntoIter<SpliceInfoSection>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.into_iter()
    }
}

/// Builds a splice_insert section from a splice request.
///
/// Normal (non-immediate) splices are scheduled `pre_roll_time` milliseconds
/// after `current_pts`; a zero pre-roll turns them into immediate splices.
/// Start splices carry `auto_return`, plus the break duration when it is
/// non-zero.
pub fn build_splice_insert(
    request: &SpliceRequestData,
    current_pts: u64,
) -> TranslateResult<SpliceInfoSection> {
    let insert_type = SpliceInsertType::try_from(request.splice_insert_type)
        .map_err(TranslateError::InvalidSpliceInsertType)?;

    let mut insert = SpliceInsert::new(request.splice_event_id);
    insert.unique_program_id = request.unique_program_id;
    insert.avail_num = request.avail_num;
    insert.avails_expected = request.avails_expected;

    if insert_type == SpliceInsertType::Cancel {
        insert.splice_event_cancel_indicator = 1;
        return Ok(SpliceInfoSection::new(SpliceCommand::SpliceInsert(insert)));
    }

    insert.out_of_network_indicator = u8::from(insert_type.is_start());

    if insert_type.is_immediate() || request.pre_roll_time == 0 {
        insert.splice_immediate_flag = 1;
    } else {
        let pts_time = preroll_to_pts(current_pts, request.pre_roll_time);
        insert.splice_time = Some(SpliceTime::at(pts_time));
    }

    if insert_type.is_start() {
        if request.break_duration > 0 {
            insert.duration_flag = 1;
        }
        insert.break_duration = Some(BreakDuration {
            auto_return: u8::from(request.auto_return_flag),
            duration: break_duration_to_ticks(request.break_duration),
        });
    }

    Ok(SpliceInfoSection::new(SpliceCommand::SpliceInsert(insert)))
}

pub fn build_splice_null() -> SpliceInfoSection {
    SpliceInfoSection::new(SpliceCommand::SpliceNull)
}

/// Builds a time_signal section; the time is always specified.
pub fn build_time_signal(request: &TimeSignalRequestData, current_pts: u64) -> SpliceInfoSection {
    let pts_time = preroll_to_pts(current_pts, request.pre_roll_time);
    SpliceInfoSection::new(SpliceCommand::TimeSignal(TimeSignal {
        splice_time: SpliceTime::at(pts_time),
    }))
}

/// Builds a private_command section carrying the proprietary payload verbatim.
pub fn build_private_command(request: &ProprietaryCommandRequestData) -> SpliceInfoSection {
    SpliceInfoSection::new(SpliceCommand::PrivateCommand(PrivateCommand {
        identifier: request.proprietary_id,
        private_bytes: request.data.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(splice_insert_type: SpliceInsertType) -> SpliceRequestData {
        SpliceRequestData {
            splice_insert_type: splice_insert_type as u8,
            splice_event_id: 0x1234,
            unique_program_id: 0x55,
            pre_roll_time: 4000,
            break_duration: 300,
            avail_num: 1,
            avails_expected: 2,
            auto_return_flag: true,
        }
    }

    fn insert_of(section: &SpliceInfoSection) -> &SpliceInsert {
        match &section.splice_command {
            SpliceCommand::SpliceInsert(insert) => insert,
            other => panic!("expected splice_insert, got {:?}", other),
        }
    }

    #[test]
    fn test_flag_table() {
        // (type, out_of_network, immediate, cancel)
        let cases = [
            (SpliceInsertType::StartNormal, 1, 0, 0),
            (SpliceInsertType::StartImmediate, 1, 1, 0),
            (SpliceInsertType::EndNormal, 0, 0, 0),
            (SpliceInsertType::EndImmediate, 0, 1, 0),
            (SpliceInsertType::Cancel, 0, 0, 1),
        ];
        for (insert_type, out_of_network, immediate, cancel) in cases {
            let section = build_splice_insert(&request(insert_type), 0).unwrap();
            let insert = insert_of(&section);
            assert_eq!(insert.out_of_network_indicator, out_of_network, "{:?}", insert_type);
            assert_eq!(insert.splice_immediate_flag, immediate, "{:?}", insert_type);
            assert_eq!(insert.splice_event_cancel_indicator, cancel, "{:?}", insert_type);
            assert_eq!(insert.program_splice_flag, 1);
            assert_eq!(insert.splice_event_id, 0x1234);
            assert_eq!(insert.unique_program_id, 0x55);
            assert_eq!(insert.avail_num, 1);
            assert_eq!(insert.avails_expected, 2);
        }
    }

    #[test]
    fn test_start_normal_with_preroll_and_break() {
        let section = build_splice_insert(&request(SpliceInsertType::StartNormal), 1_000).unwrap();
        let insert = insert_of(&section);
        assert_eq!(insert.time_specified_flag(), 1);
        assert_eq!(insert.splice_time.and_then(|t| t.pts_time), Some(361_000));
        assert_eq!(insert.duration_flag, 1);
        assert_eq!(
            insert.break_duration,
            Some(BreakDuration {
                auto_return: 1,
                duration: 2_700_000,
            })
        );
    }

    #[test]
    fn test_zero_preroll_forces_immediate() {
        let mut data = request(SpliceInsertType::StartNormal);
        data.pre_roll_time = 0;
        let section = build_splice_insert(&data, 123_456).unwrap();
        let insert = insert_of(&section);
        assert_eq!(insert.splice_immediate_flag, 1);
        assert_eq!(insert.time_specified_flag(), 0);
        assert!(insert.splice_time.is_none());
    }

    #[test]
    fn test_immediate_types_ignore_preroll() {
        let section = build_splice_insert(&request(SpliceInsertType::EndImmediate), 0).unwrap();
        let insert = insert_of(&section);
        assert_eq!(insert.splice_immediate_flag, 1);
        assert!(insert.splice_time.is_none());
    }

    #[test]
    fn test_end_types_carry_no_break() {
        let section = build_splice_insert(&request(SpliceInsertType::EndNormal), 0).unwrap();
        let insert = insert_of(&section);
        assert_eq!(insert.duration_flag, 0);
        assert!(insert.break_duration.is_none());
        assert_eq!(insert.splice_time.and_then(|t| t.pts_time), Some(360_000));
    }

    #[test]
    fn test_start_without_break_keeps_auto_return() {
        let mut data = request(SpliceInsertType::StartImmediate);
        data.break_duration = 0;
        let section = build_splice_insert(&data, 0).unwrap();
        let insert = insert_of(&section);
        assert_eq!(insert.duration_flag, 0);
        assert_eq!(insert.break_duration.map(|b| b.auto_return), Some(1));
    }

    #[test]
    fn test_invalid_insert_type() {
        let mut data = request(SpliceInsertType::StartNormal);
        data.splice_insert_type = 0;
        assert_eq!(
            build_splice_insert(&data, 0),
            Err(TranslateError::InvalidSpliceInsertType(0))
        );
        data.splice_insert_type = 6;
        assert_eq!(
            build_splice_insert(&data, 0),
            Err(TranslateError::InvalidSpliceInsertType(6))
        );
    }

    #[test]
    fn test_time_signal_always_specified() {
        let section = build_time_signal(&TimeSignalRequestData { pre_roll_time: 0 }, 42);
        let SpliceCommand::TimeSignal(signal) = section.splice_command else {
            panic!("expected time_signal");
        };
        assert_eq!(signal.splice_time, SpliceTime::at(42));
    }

    #[test]
    fn test_private_command_copies_payload() {
        let data = ProprietaryCommandRequestData {
            proprietary_id: 0x4142_4344,
            data: vec![9, 8, 7],
        };
        let section = build_private_command(&data);
        assert_eq!(
            section.splice_command,
            SpliceCommand::PrivateCommand(PrivateCommand {
                identifier: 0x4142_4344,
                private_bytes: vec![9, 8, 7],
            })
        );
    }

    #[test]
    fn test_list_capacity_and_search() {
        let mut list = SpliceSectionList::new();
        list.push(build_splice_null()).unwrap();
        list.push(build_time_signal(&Default::default(), 0)).unwrap();
        list.push(build_private_command(&Default::default())).unwrap();

        let found = list
            .find_last_eligible(|t| t != SpliceCommandType::PrivateCommand)
            .map(|s| s.splice_command_type());
        assert_eq!(found, Some(SpliceCommandType::TimeSignal));
        assert!(
            list.find_last_eligible(|t| t == SpliceCommandType::SpliceInsert)
                .is_none()
        );
        assert_eq!(
            list.last_mut().map(|s| s.splice_command_type()),
            Some(SpliceCommandType::PrivateCommand)
        );

        while !list.is_full() {
            list.push(build_splice_null()).unwrap();
        }
        assert_eq!(list.len(), MAX_SPLICES);
        assert_eq!(
            list.push(build_splice_null()),
            Err(TranslateError::CapacityExceeded { limit: MAX_SPLICES })
        );
    }
}
