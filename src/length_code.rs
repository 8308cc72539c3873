//! XCDR2 EMHEADER length codes
//!
//! An XCDR2 member header packs a 3-bit length code selecting how the member's
//! byte size is derived. Codes 0-3 stand for fixed sizes of 1, 2, 4, and 8
//! bytes. Codes 4-7 are followed by a NEXTINT word: for code 4 it holds the
//! byte length directly; for codes 5-7 it doubles as the first four bytes of
//! the member's serialized form, scaled by 1, 4, or 8.

use crate::error::{CdrError, Result};

/// Length code carried in bits 28-30 of an XCDR2 EMHEADER
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthCode {
    /// The member is exactly 1 byte
    Bytes1 = 0,
    /// The member is exactly 2 bytes
    Bytes2 = 1,
    /// The member is exactly 4 bytes
    Bytes4 = 2,
    /// The member is exactly 8 bytes
    Bytes8 = 3,
    /// NEXTINT holds the member byte length
    NextInt = 4,
    /// NEXTINT holds the byte length and is reused as the member's first word
    NextIntReused = 5,
    /// NEXTINT holds the length in 4-byte units and is reused
    NextIntTimes4 = 6,
    /// NEXTINT holds the length in 8-byte units and is reused
    NextIntTimes8 = 7,
}

impl LengthCode {
    /// Parse a length code value, failing outside the 0-7 range
    pub fn from_u32(code: u32) -> Result<Self> {
        match code {
            0 => Ok(LengthCode::Bytes1),
            1 => Ok(LengthCode::Bytes2),
            2 => Ok(LengthCode::Bytes4),
            3 => Ok(LengthCode::Bytes8),
            4 => Ok(LengthCode::NextInt),
            5 => Ok(LengthCode::NextIntReused),
            6 => Ok(LengthCode::NextIntTimes4),
            7 => Ok(LengthCode::NextIntTimes8),
            _ => Err(CdrError::bad_length_code(format!(
                "length code {code} is outside the 0-7 range"
            ))),
        }
    }

    /// The 3-bit field value for this code
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Smallest length code able to describe an object of `object_size` bytes.
    ///
    /// Picks among codes 0-4 only; the reused-NEXTINT codes 5-7 are an opt-in
    /// optimization the caller selects explicitly.
    pub fn for_object_size(object_size: u32) -> Self {
        match object_size {
            1 => LengthCode::Bytes1,
            2 => LengthCode::Bytes2,
            4 => LengthCode::Bytes4,
            8 => LengthCode::Bytes8,
            _ => LengthCode::NextInt,
        }
    }

    /// Fixed object size implied by codes 0-3, `None` for codes 4-7
    pub fn fixed_size(self) -> Option<u32> {
        match self {
            LengthCode::Bytes1 => Some(1),
            LengthCode::Bytes2 => Some(2),
            LengthCode::Bytes4 => Some(4),
            LengthCode::Bytes8 => Some(8),
            _ => None,
        }
    }

    /// Whether NEXTINT doubles as the first four bytes of the member (codes 5-7)
    pub fn reuses_next_int(self) -> bool {
        matches!(
            self,
            LengthCode::NextIntReused | LengthCode::NextIntTimes4 | LengthCode::NextIntTimes8
        )
    }

    /// NEXTINT value to emit for a member of `object_size` bytes under this
    /// code, or `None` for the fixed-size codes 0-3.
    ///
    /// Validates the size against the code's constraints: codes 0-3 require
    /// the exact fixed size, codes 6 and 7 require a multiple of 4 or 8.
    pub fn next_int_for_size(self, object_size: u32) -> Result<Option<u32>> {
        match self {
            LengthCode::Bytes1 | LengthCode::Bytes2 | LengthCode::Bytes4 | LengthCode::Bytes8 => {
                // fixed_size is Some for these four codes
                let expected = self.fixed_size().unwrap_or(0);
                if object_size != expected {
                    return Err(CdrError::bad_length_code(format!(
                        "length code {} requires an object size of {expected}, got {object_size}",
                        self.as_u32()
                    )));
                }
                Ok(None)
            }
            LengthCode::NextInt | LengthCode::NextIntReused => Ok(Some(object_size)),
            LengthCode::NextIntTimes4 => {
                if object_size % 4 != 0 {
                    return Err(CdrError::bad_length_code(format!(
                        "length code 6 requires a multiple of 4, got {object_size}"
                    )));
                }
                Ok(Some(object_size >> 2))
            }
            LengthCode::NextIntTimes8 => {
                if object_size % 8 != 0 {
                    return Err(CdrError::bad_length_code(format!(
                        "length code 7 requires a multiple of 8, got {object_size}"
                    )));
                }
                Ok(Some(object_size >> 3))
            }
        }
    }
}
