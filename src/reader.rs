//! CDR deserialization over a borrowed contiguous buffer
//!
//! `CdrReader` consumes a byte stream produced by a CDR writer, exposing the
//! typed call sequence symmetric to `CdrWriter`. It borrows the input and
//! never mutates or resizes it; decoded strings and arrays are owned copies.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::encapsulation::{
    EncapsulationKind, Endianness, EMHEADER_ID_MASK, EMHEADER_LENGTH_CODE_SHIFT,
    EMHEADER_MUST_UNDERSTAND, ENCAPSULATION_HEADER_SIZE, EXTENDED_PID, MUST_UNDERSTAND_FLAG,
    SENTINEL_PID,
};
use crate::error::{CdrError, Result};
use crate::length_code::LengthCode;
use crate::BUFFER_COPY_THRESHOLD;

/// Decoded member header of a parameter-list aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmHeader {
    /// Whether a decoder that does not recognize the member must reject the message
    pub must_understand: bool,
    /// Member id
    pub id: u32,
    /// Serialized size of the member body in bytes
    pub object_size: u32,
    /// Length code of an XCDR2 EMHEADER, `None` for XCDR1 parameter ids
    pub length_code: Option<LengthCode>,
    /// True for XCDR2 length codes 5-7: the NEXTINT word already consumed is
    /// also the first four bytes of the member's serialized form, so the
    /// member body starts four bytes before the current read position
    pub read_raw: bool,
}

macro_rules! impl_read_scalar {
    ($(#[$meta:meta])* $name:ident, $ty:ty, $width:expr, $get:ident) => {
        $(#[$meta])*
        pub fn $name(&mut self) -> Result<$ty> {
            self.align(self.alignment_of($width))?;
            let bytes = self.take($width)?;
            Ok(match self.endianness {
                Endianness::LittleEndian => LittleEndian::$get(bytes),
                Endianness::BigEndian => BigEndian::$get(bytes),
            })
        }
    };
}

macro_rules! impl_read_scalar_be {
    ($(#[$meta:meta])* $name:ident, $ty:ty, $width:expr, $get:ident) => {
        $(#[$meta])*
        pub fn $name(&mut self) -> Result<$ty> {
            self.align(self.alignment_of($width))?;
            let bytes = self.take($width)?;
            Ok(BigEndian::$get(bytes))
        }
    };
}

macro_rules! impl_read_array {
    ($(#[$meta:meta])* $array_name:ident, $seq_name:ident, $seq_doc:expr,
     $scalar:ident, $ty:ty, $width:expr, $get_into:ident) => {
        $(#[$meta])*
        pub fn $array_name(&mut self, count: usize) -> Result<Vec<$ty>> {
            self.check_array_bytes(count, $width)?;
            if self.endianness.is_native() && count >= BUFFER_COPY_THRESHOLD {
                self.align(self.alignment_of($width))?;
                let bytes = self.take(count * $width)?;
                let mut values = vec![<$ty>::default(); count];
                match self.endianness {
                    Endianness::LittleEndian => LittleEndian::$get_into(bytes, &mut values),
                    Endianness::BigEndian => BigEndian::$get_into(bytes, &mut values),
                }
                Ok(values)
            } else {
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    values.push(self.$scalar()?);
                }
                Ok(values)
            }
        }

        #[doc = $seq_doc]
        pub fn $seq_name(&mut self) -> Result<Vec<$ty>> {
            let count = self.read_sequence_length()? as usize;
            self.$array_name(count)
        }
    };
}

/// CDR deserializer over a borrowed byte view
pub struct CdrReader<'a> {
    /// The full stream, encapsulation header included
    data: &'a [u8],
    /// Next read position, in bytes from the buffer start
    offset: usize,
    /// Alignment origin, in bytes from the buffer start
    origin: usize,
    /// Encapsulation kind from the stream header
    kind: EncapsulationKind,
    /// Byte order of the stream payload
    endianness: Endianness,
    /// Alignment applied to 64-bit types: 8 under XCDR1, 4 under XCDR2
    eight_byte_alignment: usize,
}

impl<'a> CdrReader<'a> {
    /// Create a reader over an encapsulated stream.
    ///
    /// Verifies the stream holds at least the four-byte encapsulation header
    /// and that the kind byte is one of the catalogued values. The option
    /// bytes are ignored.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        if data.len() < ENCAPSULATION_HEADER_SIZE {
            return Err(CdrError::buffer_too_small(
                ENCAPSULATION_HEADER_SIZE,
                data.len(),
                0,
            ));
        }
        let kind = EncapsulationKind::from_u8(data[1])?;
        Ok(Self {
            data,
            offset: ENCAPSULATION_HEADER_SIZE,
            origin: ENCAPSULATION_HEADER_SIZE,
            kind,
            endianness: kind.endianness(),
            eight_byte_alignment: if kind.is_cdr2() { 4 } else { 8 },
        })
    }

    /// Encapsulation kind of the stream being read
    pub fn kind(&self) -> EncapsulationKind {
        self.kind
    }

    /// Byte order of the stream payload
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Current read position, in bytes from the buffer start
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Total length of the input buffer
    pub fn byte_length(&self) -> usize {
        self.data.len()
    }

    /// Bytes remaining from the current position
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Whether the read position has reached the end of the buffer
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Move the read position by a signed byte offset
    pub fn seek(&mut self, offset: isize) -> Result<()> {
        let target = self
            .offset
            .checked_add_signed(offset)
            .filter(|&t| t <= self.data.len())
            .ok_or_else(|| {
                CdrError::buffer_too_small(offset.unsigned_abs(), self.remaining(), self.offset)
            })?;
        self.offset = target;
        Ok(())
    }

    /// Move the read position to an absolute byte offset
    pub fn seek_to(&mut self, position: usize) -> Result<()> {
        if position > self.data.len() {
            return Err(CdrError::buffer_too_small(
                position - self.offset.min(position),
                self.remaining(),
                self.offset,
            ));
        }
        self.offset = position;
        Ok(())
    }

    /// Skip `count` bytes
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count)?;
        Ok(())
    }

    /// Alignment for a primitive of `width` bytes under this encapsulation
    fn alignment_of(&self, width: usize) -> usize {
        if width == 8 {
            self.eight_byte_alignment
        } else {
            width
        }
    }

    /// Skip padding until `(offset - origin)` is a multiple of `alignment`
    fn align(&mut self, alignment: usize) -> Result<()> {
        let remainder = (self.offset - self.origin) % alignment;
        if remainder != 0 {
            let padding = alignment - remainder;
            if self.offset + padding > self.data.len() {
                return Err(CdrError::buffer_too_small(
                    padding,
                    self.remaining(),
                    self.offset,
                ));
            }
            self.offset += padding;
        }
        Ok(())
    }

    /// Consume `count` bytes, returning the slice read
    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(CdrError::buffer_too_small(
                count,
                self.remaining(),
                self.offset,
            ));
        }
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    /// Upper-bound check before an array allocation: `count` elements of
    /// `width` bytes cannot exceed the bytes left in the buffer
    fn check_array_bytes(&self, count: usize, width: usize) -> Result<()> {
        let byte_len = count.checked_mul(width).unwrap_or(usize::MAX);
        if byte_len > self.remaining() {
            return Err(CdrError::buffer_too_small(
                byte_len,
                self.remaining(),
                self.offset,
            ));
        }
        Ok(())
    }

    /// Read an i8 value
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Read a u8 value
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read a boolean: a single byte, nonzero meaning true
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    impl_read_scalar!(
        /// Read an i16 value
        read_i16, i16, 2, read_i16
    );
    impl_read_scalar!(
        /// Read a u16 value
        read_u16, u16, 2, read_u16
    );
    impl_read_scalar!(
        /// Read an i32 value
        read_i32, i32, 4, read_i32
    );
    impl_read_scalar!(
        /// Read a u32 value
        read_u32, u32, 4, read_u32
    );
    impl_read_scalar!(
        /// Read an i64 value
        read_i64, i64, 8, read_i64
    );
    impl_read_scalar!(
        /// Read a u64 value
        read_u64, u64, 8, read_u64
    );
    impl_read_scalar!(
        /// Read an f32 value
        read_f32, f32, 4, read_f32
    );
    impl_read_scalar!(
        /// Read an f64 value
        read_f64, f64, 8, read_f64
    );

    impl_read_scalar_be!(
        /// Read a u16 written in network byte order regardless of the stream endianness
        read_u16_be, u16, 2, read_u16
    );
    impl_read_scalar_be!(
        /// Read a u32 written in network byte order regardless of the stream endianness
        read_u32_be, u32, 4, read_u32
    );
    impl_read_scalar_be!(
        /// Read a u64 written in network byte order regardless of the stream endianness
        read_u64_be, u64, 8, read_u64
    );

    /// Read a length-prefixed, null-terminated UTF-8 string.
    ///
    /// The prefix counts the terminator; a prefix of zero yields the empty
    /// string. Fails with `InvalidString` when the terminator is missing or
    /// the payload is not valid UTF-8.
    pub fn read_string(&mut self) -> Result<String> {
        let length = self.read_u32()? as usize;
        if length == 0 {
            return Ok(String::new());
        }
        let bytes = self.take(length)?;
        let (payload, terminator) = bytes.split_at(length - 1);
        if terminator[0] != 0 {
            return Err(CdrError::invalid_string("missing null terminator"));
        }
        let value = std::str::from_utf8(payload)
            .map_err(|err| CdrError::invalid_string(format!("invalid UTF-8: {err}")))?;
        Ok(value.to_owned())
    }

    /// Read the element count prefix of a sequence
    pub fn read_sequence_length(&mut self) -> Result<u32> {
        self.read_u32()
    }

    /// Read the delimiter header preceding a delimited aggregate
    pub fn read_dheader(&mut self) -> Result<u32> {
        self.read_u32()
    }

    /// Read a member header of a parameter-list aggregate.
    ///
    /// Under XCDR1 this consumes a short or extended parameter id and snaps
    /// the alignment origin to the position after the header, mirroring the
    /// writer. The sentinel terminating a parameter list surfaces as a header
    /// with `id == SENTINEL_PID` and `object_size == 0`; callers iterating a
    /// parameter list stop there (or call `read_sentinel_header` up front
    /// when they expect the end).
    ///
    /// Under XCDR2 this consumes the EMHEADER word and, for length codes
    /// 4-7, the NEXTINT word. For codes 5-7 `read_raw` is set: NEXTINT is
    /// also the first four bytes of the member, so the member body begins
    /// four bytes before the read position this call leaves behind.
    pub fn read_emheader(&mut self) -> Result<EmHeader> {
        if self.kind.is_cdr2() {
            self.member_header_v2()
        } else {
            self.member_header_v1()
        }
    }

    fn member_header_v1(&mut self) -> Result<EmHeader> {
        self.align(4)?;
        let id_header = self.read_u16()?;
        let must_understand = id_header & MUST_UNDERSTAND_FLAG != 0;
        let pid = id_header & 0x3FFF;
        let short_size = self.read_u16()? as u32;

        let (id, object_size) = if pid == EXTENDED_PID {
            // Long form: the short length field always holds 8 and the real
            // id and size follow as two 32-bit words
            (self.read_u32()?, self.read_u32()?)
        } else {
            (u32::from(pid), short_size)
        };

        // PUSH(ORIGIN=0): the member body aligns as a fresh sub-stream
        self.origin = self.offset;

        Ok(EmHeader {
            must_understand,
            id,
            object_size,
            length_code: None,
            read_raw: false,
        })
    }

    fn member_header_v2(&mut self) -> Result<EmHeader> {
        let header = self.read_u32()?;
        let must_understand = header & EMHEADER_MUST_UNDERSTAND != 0;
        let code = LengthCode::from_u32((header >> EMHEADER_LENGTH_CODE_SHIFT) & 0x7)?;
        let id = header & EMHEADER_ID_MASK;

        let object_size = match code.fixed_size() {
            Some(size) => size,
            None => {
                let next_int = self.read_u32()?;
                match code {
                    LengthCode::NextIntTimes4 => next_int.checked_mul(4).ok_or_else(|| {
                        CdrError::bad_length_code(format!(
                            "length code 6 NEXTINT {next_int} overflows the object size"
                        ))
                    })?,
                    LengthCode::NextIntTimes8 => next_int.checked_mul(8).ok_or_else(|| {
                        CdrError::bad_length_code(format!(
                            "length code 7 NEXTINT {next_int} overflows the object size"
                        ))
                    })?,
                    _ => next_int,
                }
            }
        };

        Ok(EmHeader {
            must_understand,
            id,
            object_size,
            length_code: Some(code),
            read_raw: code.reuses_next_int(),
        })
    }

    /// Consume and validate the sentinel terminating an XCDR1 parameter list.
    ///
    /// No-op under XCDR2. Fails with `IntegrityViolation` when the next
    /// parameter id is not the sentinel.
    pub fn read_sentinel_header(&mut self) -> Result<()> {
        if self.kind.is_cdr2() {
            return Ok(());
        }
        self.align(4)?;
        let id_header = self.read_u16()?;
        let _length = self.read_u16()?;
        if id_header & 0x3FFF != SENTINEL_PID {
            return Err(CdrError::integrity_violation(format!(
                "expected sentinel parameter id, found 0x{id_header:04X}"
            )));
        }
        Ok(())
    }

    /// Read `count` i8 values
    pub fn read_i8_array(&mut self, count: usize) -> Result<Vec<i8>> {
        let bytes = self.take(count)?;
        Ok(bytes.iter().map(|&b| b as i8).collect())
    }

    /// Read an i8 sequence prefixed with its element count
    pub fn read_i8_sequence(&mut self) -> Result<Vec<i8>> {
        let count = self.read_sequence_length()? as usize;
        self.read_i8_array(count)
    }

    /// Read `count` u8 values
    pub fn read_u8_array(&mut self, count: usize) -> Result<Vec<u8>> {
        Ok(self.take(count)?.to_vec())
    }

    /// Read a u8 sequence prefixed with its element count
    pub fn read_u8_sequence(&mut self) -> Result<Vec<u8>> {
        let count = self.read_sequence_length()? as usize;
        self.read_u8_array(count)
    }

    impl_read_array!(
        /// Read `count` i16 values
        read_i16_array, read_i16_sequence,
        "Read an i16 sequence prefixed with its element count",
        read_i16, i16, 2, read_i16_into
    );
    impl_read_array!(
        /// Read `count` u16 values
        read_u16_array, read_u16_sequence,
        "Read a u16 sequence prefixed with its element count",
        read_u16, u16, 2, read_u16_into
    );
    impl_read_array!(
        /// Read `count` i32 values
        read_i32_array, read_i32_sequence,
        "Read an i32 sequence prefixed with its element count",
        read_i32, i32, 4, read_i32_into
    );
    impl_read_array!(
        /// Read `count` u32 values
        read_u32_array, read_u32_sequence,
        "Read a u32 sequence prefixed with its element count",
        read_u32, u32, 4, read_u32_into
    );
    impl_read_array!(
        /// Read `count` i64 values
        read_i64_array, read_i64_sequence,
        "Read an i64 sequence prefixed with its element count",
        read_i64, i64, 8, read_i64_into
    );
    impl_read_array!(
        /// Read `count` u64 values
        read_u64_array, read_u64_sequence,
        "Read a u64 sequence prefixed with its element count",
        read_u64, u64, 8, read_u64_into
    );
    impl_read_array!(
        /// Read `count` f32 values
        read_f32_array, read_f32_sequence,
        "Read an f32 sequence prefixed with its element count",
        read_f32, f32, 4, read_f32_into
    );
    impl_read_array!(
        /// Read `count` f64 values
        read_f64_array, read_f64_sequence,
        "Read an f64 sequence prefixed with its element count",
        read_f64, f64, 8, read_f64_into
    );

    /// Read a sequence of composite elements driven by a closure
    pub fn read_sequence<T, F>(&mut self, mut read_element: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        let count = self.read_sequence_length()? as usize;
        // every element occupies at least one byte, so this bounds the allocation
        let mut values = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            values.push(read_element(self)?);
        }
        Ok(values)
    }
}

impl std::fmt::Debug for CdrReader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdrReader")
            .field("kind", &self.kind)
            .field("offset", &self.offset)
            .field("origin", &self.origin)
            .field("byte_length", &self.data.len())
            .finish()
    }
}
