//! Schema-less protobuf codec.
//!
//! Decodes any protobuf message into its raw fields (number + wire value) and
//! encodes them back, knowing nothing about the message types. Used to check that
//! what `prost` writes for the wrapped tree survives a round trip through an
//! independent codec: decode + encode must reproduce the exact bytes.

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

const WIRE_VARINT: u8 = 0;
const WIRE_FIXED64: u8 = 1;
const WIRE_LEN: u8 = 2;
const WIRE_FIXED32: u8 = 5;

/// Highest field number protobuf allows.
const MAX_FIELD_NUMBER: u64 = (1 << 29) - 1;

#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("varint longer than 10 bytes")]
    VarintOverflow,
    #[error("unsupported wire type {0}")]
    WireType(u8),
    #[error("invalid field number {0}")]
    FieldNumber(u64),
    #[error("length {len} exceeds remaining {remaining} bytes")]
    Length { len: u64, remaining: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireValue {
    Varint(u64),
    Fixed64(u64),
    LengthDelimited(Vec<u8>),
    Fixed32(u32),
}

impl WireValue {
    fn wire_type(&self) -> u8 {
        match self {
            WireValue::Varint(_) => WIRE_VARINT,
            WireValue::Fixed64(_) => WIRE_FIXED64,
            WireValue::LengthDelimited(_) => WIRE_LEN,
            WireValue::Fixed32(_) => WIRE_FIXED32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireField {
    pub number: u32,
    pub value: WireValue,
}

/// A message as an ordered list of raw fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireMessage {
    pub fields: Vec<WireField>,
}

impl WireMessage {
    pub fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut r = Cursor::new(bytes);
        let mut fields = Vec::new();
        while (r.position() as usize) < bytes.len() {
            let key = read_varint(&mut r)?;
            let number = key >> 3;
            if number == 0 || number > MAX_FIELD_NUMBER {
                return Err(WireError::FieldNumber(number));
            }
            let value = match (key & 0x7) as u8 {
                WIRE_VARINT => WireValue::Varint(read_varint(&mut r)?),
                WIRE_FIXED64 => WireValue::Fixed64(r.read_u64::<LittleEndian>()?),
                WIRE_FIXED32 => WireValue::Fixed32(r.read_u32::<LittleEndian>()?),
                WIRE_LEN => {
                    let len = read_varint(&mut r)?;
                    let remaining = bytes.len() as u64 - r.position();
                    if len > remaining {
                        return Err(WireError::Length { len, remaining });
                    }
                    let mut buf = vec![0u8; len as usize];
                    r.read_exact(&mut buf)?;
                    WireValue::LengthDelimited(buf)
                }
                other => return Err(WireError::WireType(other)),
            };
            fields.push(WireField {
                number: number as u32,
                value,
            });
        }
        Ok(WireMessage { fields })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for f in &self.fields {
            write_varint(&mut out, (u64::from(f.number) << 3) | u64::from(f.value.wire_type()));
            match &f.value {
                WireValue::Varint(v) => write_varint(&mut out, *v),
                WireValue::Fixed64(v) => {
                    let mut buf = [0u8; 8];
                    LittleEndian::write_u64(&mut buf, *v);
                    out.extend_from_slice(&buf);
                }
                WireValue::Fixed32(v) => {
                    let mut buf = [0u8; 4];
                    LittleEndian::write_u32(&mut buf, *v);
                    out.extend_from_slice(&buf);
                }
                WireValue::LengthDelimited(b) => {
                    write_varint(&mut out, b.len() as u64);
                    out.extend_from_slice(b);
                }
            }
        }
        out
    }

    /// Values of every occurrence of field `number`, in wire order.
    pub fn values(&self, number: u32) -> impl Iterator<Item = &WireValue> {
        self.fields
            .iter()
            .filter(move |f| f.number == number)
            .map(|f| &f.value)
    }

    /// Decodes every occurrence of field `number` as an embedded message.
    pub fn messages(&self, number: u32) -> Result<Vec<WireMessage>, WireError> {
        self.values(number)
            .filter_map(|v| match v {
                WireValue::LengthDelimited(b) => Some(WireMessage::decode(b)),
                _ => None,
            })
            .collect()
    }
}

/// Counts the embedded messages reached by following `path` (a list of field
/// numbers) from the root. `[1, 2, 2]` on an export request counts log records.
pub fn count_nested(bytes: &[u8], path: &[u32]) -> Result<usize, WireError> {
    let Some((first, rest)) = path.split_first() else {
        return Ok(1);
    };
    let root = WireMessage::decode(bytes)?;
    let mut level = root.messages(*first)?;
    for number in rest {
        let mut next = Vec::new();
        for m in &level {
            next.extend(m.messages(*number)?);
        }
        level = next;
    }
    Ok(level.len())
}

fn read_varint(r: &mut Cursor<&[u8]>) -> Result<u64, WireError> {
    let mut value = 0u64;
    for i in 0..10 {
        let b = r.read_u8()?;
        value |= u64::from(b & 0x7f) << (7 * i);
        if b & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(WireError::VarintOverflow)
}

fn write_varint(out: &mut Vec<u8>, mut v: u64) {
    while v >= 0x80 {
        out.push((v as u8) | 0x80);
        v >>= 7;
    }
    out.push(v as u8);
}
