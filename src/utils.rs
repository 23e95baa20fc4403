use std::fmt;
use std::io::{self, Read};

use num_enum::TryFromPrimitive;

use crate::header::FormatError;
use crate::types::StreamError;

/// Fill `buf` completely from `r`, looping over short reads.
///
/// A single `read` call is never trusted to fill the whole buffer; the source
/// is polled until `buf` is full. Exhaustion before that is
/// `FormatError::Truncated` carrying the field name and byte counts.
pub fn read_exact_field<R: Read>(
    r: &mut R,
    buf: &mut [u8],
    field: &'static str,
) -> Result<(), StreamError> {
    let mut filled = 0usize;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(FormatError::Truncated {
                    field,
                    need: buf.len(),
                    have: filled,
                }
                .into())
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(StreamError::Io(e)),
        }
    }
    Ok(())
}

/// Read exactly one byte, reporting `Truncated` at end of source.
pub fn read_u8_field<R: Read>(r: &mut R, field: &'static str) -> Result<u8, StreamError> {
    let mut b = [0u8; 1];
    read_exact_field(r, &mut b, field)?;
    Ok(b[0])
}

pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

pub fn fmt_bytes(b: &[u8]) -> String {
    if b.iter().all(|&c| c.is_ascii_graphic() || c == b' ') {
        format!("b\"{}\"", String::from_utf8_lossy(b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}
