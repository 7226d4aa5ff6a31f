//! Encoding implementations for SCTE-35 splice commands.

use crate::encoding::{BitWriter, Encodable, EncodingResult};
use crate::time::{BreakDuration, SpliceTime};
use crate::types::*;

impl Encodable for SpliceCommand {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        match self {
            SpliceCommand::SpliceNull => Ok(()),
            SpliceCommand::SpliceInsert(insert) => insert.encode(writer),
            SpliceCommand::TimeSignal(signal) => signal.encode(writer),
            SpliceCommand::PrivateCommand(private) => private.encode(writer),
        }
    }

    fn encoded_size(&self) -> usize {
        match self {
            SpliceCommand::SpliceNull => 0,
            SpliceCommand::SpliceInsert(insert) => insert.encoded_size(),
            SpliceCommand::TimeSignal(signal) => signal.encoded_size(),
            SpliceCommand::PrivateCommand(private) => private.encoded_size(),
        }
    }
}

impl SpliceInsert {
    fn writes_splice_time(&self) -> bool {
        self.program_splice_flag == 1 && self.splice_immediate_flag == 0
    }

    fn effective_splice_time(&self) -> SpliceTime {
        self.splice_time.unwrap_or_else(SpliceTime::unspecified)
    }

    fn effective_break_duration(&self) -> BreakDuration {
        self.break_duration.unwrap_or(BreakDuration {
            auto_return: 0,
            duration: 0,
        })
    }
}

impl Encodable for SpliceInsert {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        writer.write_bits(self.splice_event_id as u64, 32)?;
        writer.write_bit(self.splice_event_cancel_indicator != 0)?;
        writer.write_bits(0x7F, 7)?;

        if self.splice_event_cancel_indicator != 0 {
            return Ok(());
        }

        writer.write_bit(self.out_of_network_indicator != 0)?;
        writer.write_bit(self.program_splice_flag != 0)?;
        writer.write_bit(self.duration_flag != 0)?;
        writer.write_bit(self.splice_immediate_flag != 0)?;
        // reserved
        writer.write_bits(0xF, 4)?;

        if self.writes_splice_time() {
            self.effective_splice_time().encode(writer)?;
        }
        if self.duration_flag != 0 {
            self.effective_break_duration().encode(writer)?;
        }

        writer.write_bits(self.unique_program_id as u64, 16)?;
        writer.write_bits(self.avail_num as u64, 8)?;
        writer.write_bits(self.avails_expected as u64, 8)?;

        Ok(())
    }

    fn encoded_size(&self) -> usize {
        // splice_event_id + cancel indicator byte
        let mut size = 5;

        if self.splice_event_cancel_indicator == 0 {
            size += 1; // flags byte
            if self.writes_splice_time() {
                size += self.effective_splice_time().encoded_size();
            }
            if self.duration_flag != 0 {
                size += self.effective_break_duration().encoded_size();
            }
            size += 4; // unique_program_id + avail_num + avails_expected
        }

        size
    }
}

impl Encodable for TimeSignal {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        self.splice_time.encode(writer)
    }

    fn encoded_size(&self) -> usize {
        self.splice_time.encoded_size()
    }
}

impl Encodable for PrivateCommand {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        writer.write_bits(self.identifier as u64, 32)?;
        writer.write_bytes(&self.private_bytes)
    }

    fn encoded_size(&self) -> usize {
        4 + self.private_bytes.len()
    }
}
