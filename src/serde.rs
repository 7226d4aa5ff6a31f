//! Serde support for the SCTE-104 input model and the produced sections.
//!
//! Times are serialized with an extra `*_secs` field, identifiers as their
//! ASCII form when printable, and byte fields as `0x`-prefixed hex. Byte
//! fields of the input model accept either a JSON array of numbers or a
//! string.

use crate::fmt::format_identifier_to_string;
use crate::time::{BreakDuration, SpliceTime, ticks_to_secs};
use data_encoding::{HEXLOWER, HEXLOWER_PERMISSIVE};
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserializer, Serialize, Serializer};
use std::fmt;

impl Serialize for SpliceTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num_fields = if self.time_specified_flag != 0 { 3 } else { 1 };

        let mut state = serializer.serialize_struct("SpliceTime", num_fields)?;
        state.serialize_field("time_specified_flag", &(self.time_specified_flag != 0))?;
        if self.time_specified_flag != 0 {
            let pts_time = self.pts_time.unwrap_or(0);
            state.serialize_field("pts_time", &pts_time)?;
            state.serialize_field("pts_time_secs", &ticks_to_secs(pts_time))?;
        }
        state.end()
    }
}

impl Serialize for BreakDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("BreakDuration", 3)?;
        state.serialize_field("auto_return", &(self.auto_return != 0))?;
        state.serialize_field("duration", &self.duration)?;
        state.serialize_field("duration_secs", &ticks_to_secs(self.duration))?;
        state.end()
    }
}

/// Serializes a 32-bit registration identifier as text, e.g. `"CUEI"`.
pub(crate) fn serialize_identifier<S>(identifier: &u32, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_identifier_to_string(*identifier))
}

/// Serializes bytes as a `0x`-prefixed lowercase hex string.
pub(crate) fn serialize_hex<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("0x{}", HEXLOWER.encode(bytes)))
}

/// Serializes bytes that are expected to be ASCII, such as DTMF characters.
pub(crate) fn serialize_ascii<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}

/// Serializes any displayable value, such as an error, as its message.
pub(crate) fn serialize_display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

#[derive(Clone, Copy)]
enum StringForm {
    Hex,
    Ascii,
}

struct BytesVisitor(StringForm);

impl<'de> Visitor<'de> for BytesVisitor {
    type Value = Vec<u8>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            StringForm::Hex => f.write_str("a hex string or an array of bytes"),
            StringForm::Ascii => f.write_str("a string or an array of bytes"),
        }
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match self.0 {
            StringForm::Ascii => Ok(value.as_bytes().to_vec()),
            StringForm::Hex => {
                let digits = value
                    .strip_prefix("0x")
                    .or_else(|| value.strip_prefix("0X"))
                    .unwrap_or(value);
                HEXLOWER_PERMISSIVE
                    .decode(digits.as_bytes())
                    .map_err(|err| E::custom(format!("invalid hex string: {}", err)))
            }
        }
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(byte) = seq.next_element::<u8>()? {
            bytes.push(byte);
        }
        Ok(bytes)
    }
}

/// Reads bytes from a hex string (optional `0x` prefix) or a byte array.
pub(crate) fn deserialize_hex<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(BytesVisitor(StringForm::Hex))
}

/// Reads bytes from a plain string or a byte array.
pub(crate) fn deserialize_ascii<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(BytesVisitor(StringForm::Ascii))
}
