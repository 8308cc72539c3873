//! Encapsulation identifiers for CDR streams
//!
//! Every CDR stream starts with a four-byte header `{0x00, kind, 0x00, 0x00}`.
//! The kind byte selects endianness, the XCDR version, and the header mode
//! (plain, parameter-list, or delimited) following the OMG RTPS numbering.

use crate::error::{CdrError, Result};

/// Size of the CDR encapsulation header in bytes
pub const ENCAPSULATION_HEADER_SIZE: usize = 4;

/// Parameter id terminating an XCDR1 parameter list
pub const SENTINEL_PID: u16 = 0x3F02;

/// Parameter id introducing the 12-byte long-form XCDR1 member header
pub const EXTENDED_PID: u16 = 0x3F01;

/// Must-understand bit in an XCDR1 short parameter id
pub const MUST_UNDERSTAND_FLAG: u16 = 0x4000;

/// Must-understand bit in an XCDR2 EMHEADER
pub const EMHEADER_MUST_UNDERSTAND: u32 = 0x8000_0000;

/// Bit position of the length code field in an XCDR2 EMHEADER
pub const EMHEADER_LENGTH_CODE_SHIFT: u32 = 28;

/// Member id field of an XCDR2 EMHEADER (bits 0-27)
pub const EMHEADER_ID_MASK: u32 = 0x0FFF_FFFF;

/// Byte order of a CDR stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endianness {
    BigEndian,
    LittleEndian,
}

impl Endianness {
    /// Byte order of the host this code was compiled for
    pub const fn native() -> Self {
        if cfg!(target_endian = "little") {
            Endianness::LittleEndian
        } else {
            Endianness::BigEndian
        }
    }

    /// Whether this byte order matches the host byte order
    pub fn is_native(self) -> bool {
        self == Self::native()
    }

    /// Whether this is little-endian byte order
    pub fn is_little(self) -> bool {
        self == Endianness::LittleEndian
    }
}

/// CDR encapsulation kind, as carried in byte 1 of the stream header
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncapsulationKind {
    /// Plain XCDR1, big-endian
    CdrBe = 0x00,
    /// Plain XCDR1, little-endian
    CdrLe = 0x01,
    /// XCDR1 parameter list, big-endian
    PlCdrBe = 0x02,
    /// XCDR1 parameter list, little-endian
    PlCdrLe = 0x03,
    /// Plain XCDR2, big-endian
    Cdr2Be = 0x10,
    /// Plain XCDR2, little-endian
    Cdr2Le = 0x11,
    /// XCDR2 parameter list, big-endian
    PlCdr2Be = 0x12,
    /// XCDR2 parameter list, little-endian
    PlCdr2Le = 0x13,
    /// Delimited XCDR2, big-endian
    DCdr2Be = 0x14,
    /// Delimited XCDR2, little-endian
    DCdr2Le = 0x15,
}

impl EncapsulationKind {
    /// Parse a kind byte, failing on values outside the OMG catalog
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0x00 => Ok(EncapsulationKind::CdrBe),
            0x01 => Ok(EncapsulationKind::CdrLe),
            0x02 => Ok(EncapsulationKind::PlCdrBe),
            0x03 => Ok(EncapsulationKind::PlCdrLe),
            0x10 => Ok(EncapsulationKind::Cdr2Be),
            0x11 => Ok(EncapsulationKind::Cdr2Le),
            0x12 => Ok(EncapsulationKind::PlCdr2Be),
            0x13 => Ok(EncapsulationKind::PlCdr2Le),
            0x14 => Ok(EncapsulationKind::DCdr2Be),
            0x15 => Ok(EncapsulationKind::DCdr2Le),
            kind => Err(CdrError::InvalidEncapsulation { kind }),
        }
    }

    /// The kind byte written at position 1 of the stream header
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Byte order of payloads under this encapsulation
    pub fn endianness(self) -> Endianness {
        if self.as_u8() & 0x01 == 0x01 {
            Endianness::LittleEndian
        } else {
            Endianness::BigEndian
        }
    }

    /// Whether payloads are little-endian
    pub fn is_little_endian(self) -> bool {
        self.endianness().is_little()
    }

    /// Whether this is an XCDR2 encapsulation (4-byte alignment for 64-bit types)
    pub fn is_cdr2(self) -> bool {
        self.as_u8() & 0xF0 == 0x10
    }

    /// Whether aggregates under this encapsulation carry a delimiter header
    pub fn is_delimited(self) -> bool {
        matches!(
            self,
            EncapsulationKind::DCdr2Be | EncapsulationKind::DCdr2Le
        )
    }

    /// Whether members under this encapsulation carry per-member headers
    pub fn is_parameter_list(self) -> bool {
        matches!(
            self,
            EncapsulationKind::PlCdrBe
                | EncapsulationKind::PlCdrLe
                | EncapsulationKind::PlCdr2Be
                | EncapsulationKind::PlCdr2Le
        )
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EncapsulationKind::CdrBe => "CDR_BE",
            EncapsulationKind::CdrLe => "CDR_LE",
            EncapsulationKind::PlCdrBe => "PL_CDR_BE",
            EncapsulationKind::PlCdrLe => "PL_CDR_LE",
            EncapsulationKind::Cdr2Be => "CDR2_BE",
            EncapsulationKind::Cdr2Le => "CDR2_LE",
            EncapsulationKind::PlCdr2Be => "PL_CDR2_BE",
            EncapsulationKind::PlCdr2Le => "PL_CDR2_LE",
            EncapsulationKind::DCdr2Be => "D_CDR2_BE",
            EncapsulationKind::DCdr2Le => "D_CDR2_LE",
        }
    }
}

impl TryFrom<u8> for EncapsulationKind {
    type Error = CdrError;

    fn try_from(value: u8) -> Result<Self> {
        Self::from_u8(value)
    }
}
