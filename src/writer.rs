//! CDR serialization into a growable owned buffer
//!
//! `CdrWriter` produces a contiguous encapsulated byte stream from a typed
//! call sequence. The caller drives field order; the writer handles the
//! encapsulation header, alignment, member headers, and buffer growth.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::encapsulation::{
    EncapsulationKind, Endianness, EMHEADER_ID_MASK, EMHEADER_LENGTH_CODE_SHIFT,
    EMHEADER_MUST_UNDERSTAND, EXTENDED_PID, MUST_UNDERSTAND_FLAG, SENTINEL_PID,
};
use crate::error::{CdrError, Result};
use crate::length_code::LengthCode;
use crate::{BUFFER_COPY_THRESHOLD, DEFAULT_CAPACITY};

/// Largest member id encodable in the XCDR1 short parameter id form
const SHORT_PID_MAX_ID: u32 = 0x3F00;

/// Largest member size encodable in the XCDR1 short parameter id form
const SHORT_PID_MAX_SIZE: u32 = 0xFFFF;

macro_rules! impl_write_scalar {
    ($(#[$meta:meta])* $name:ident, $ty:ty, $width:expr, $put:ident) => {
        $(#[$meta])*
        pub fn $name(&mut self, value: $ty) -> &mut Self {
            self.align(self.alignment_of($width));
            self.reserve_for($width);
            let mut bytes = [0u8; $width];
            match self.endianness {
                Endianness::LittleEndian => LittleEndian::$put(&mut bytes, value),
                Endianness::BigEndian => BigEndian::$put(&mut bytes, value),
            }
            self.buffer.extend_from_slice(&bytes);
            self
        }
    };
}

macro_rules! impl_write_scalar_be {
    ($(#[$meta:meta])* $name:ident, $ty:ty, $width:expr, $put:ident) => {
        $(#[$meta])*
        pub fn $name(&mut self, value: $ty) -> &mut Self {
            self.align(self.alignment_of($width));
            self.reserve_for($width);
            let mut bytes = [0u8; $width];
            BigEndian::$put(&mut bytes, value);
            self.buffer.extend_from_slice(&bytes);
            self
        }
    };
}

macro_rules! impl_write_array {
    ($(#[$meta:meta])* $name:ident, $scalar:ident, $ty:ty, $width:expr, $put_into:ident) => {
        $(#[$meta])*
        pub fn $name(&mut self, values: &[$ty], write_length: bool) -> &mut Self {
            if write_length {
                self.write_sequence_length(values.len() as u32);
            }
            if self.endianness.is_native() && values.len() >= BUFFER_COPY_THRESHOLD {
                self.align(self.alignment_of($width));
                let byte_len = values.len() * $width;
                self.reserve_for(byte_len);
                let start = self.buffer.len();
                self.buffer.resize(start + byte_len, 0);
                match self.endianness {
                    Endianness::LittleEndian => {
                        LittleEndian::$put_into(values, &mut self.buffer[start..])
                    }
                    Endianness::BigEndian => {
                        BigEndian::$put_into(values, &mut self.buffer[start..])
                    }
                }
            } else {
                for value in values {
                    self.$scalar(*value);
                }
            }
            self
        }
    };
}

/// CDR serializer writing into a growable owned buffer
///
/// The writer emits the four-byte encapsulation header at construction and
/// appends from there; `data()` returns the finished stream. All primitive
/// writes are infallible because the buffer grows on demand. Only
/// `write_emheader` can fail, and it validates its arguments before emitting
/// any bytes, so the writer stays usable after such an error.
pub struct CdrWriter {
    /// Stream bytes written so far; the write offset is `buffer.len()`
    buffer: Vec<u8>,
    /// Alignment origin, in bytes from the buffer start
    origin: usize,
    /// Encapsulation kind from the stream header
    kind: EncapsulationKind,
    /// Byte order of the stream payload
    endianness: Endianness,
    /// Alignment applied to 64-bit types: 8 under XCDR1, 4 under XCDR2
    eight_byte_alignment: usize,
}

impl CdrWriter {
    /// Create a writer with the default initial capacity
    pub fn new(kind: EncapsulationKind) -> Self {
        Self::build(kind, Vec::with_capacity(DEFAULT_CAPACITY))
    }

    /// Create a writer with a caller-chosen initial capacity
    pub fn with_capacity(kind: EncapsulationKind, capacity: usize) -> Self {
        Self::build(kind, Vec::with_capacity(capacity))
    }

    /// Create a writer that reuses a pre-owned buffer
    ///
    /// The buffer is cleared; its capacity is retained, so a caller recycling
    /// buffers across messages avoids reallocation.
    pub fn with_buffer(kind: EncapsulationKind, mut buffer: Vec<u8>) -> Self {
        buffer.clear();
        Self::build(kind, buffer)
    }

    fn build(kind: EncapsulationKind, buffer: Vec<u8>) -> Self {
        let mut writer = CdrWriter {
            buffer,
            origin: 0,
            kind,
            endianness: kind.endianness(),
            eight_byte_alignment: if kind.is_cdr2() { 4 } else { 8 },
        };
        // Encapsulation header: {0x00, kind, options, options}, options zero
        writer.reserve_for(4);
        writer
            .buffer
            .extend_from_slice(&[0x00, kind.as_u8(), 0x00, 0x00]);
        writer.origin = writer.buffer.len();
        writer
    }

    /// Encapsulation kind this writer was constructed with
    pub fn kind(&self) -> EncapsulationKind {
        self.kind
    }

    /// Number of bytes written so far, including the encapsulation header
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// The finished stream: all bytes written so far
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the writer and hand the buffer to the caller
    pub fn into_vec(self) -> Vec<u8> {
        self.buffer
    }

    /// Ensure capacity for `additional` bytes beyond the current offset.
    ///
    /// Growth doubles the capacity with a floor at the requested size, so
    /// amortized appends stay O(1) and previously written offsets are
    /// preserved across reallocation.
    fn reserve_for(&mut self, additional: usize) {
        let needed = self.buffer.len() + additional;
        if needed > self.buffer.capacity() {
            let target = needed.max(self.buffer.capacity() * 2);
            self.buffer.reserve_exact(target - self.buffer.len());
        }
    }

    /// Alignment for a primitive of `width` bytes under this encapsulation
    fn alignment_of(&self, width: usize) -> usize {
        if width == 8 {
            self.eight_byte_alignment
        } else {
            width
        }
    }

    /// Pad with zero bytes until `(offset - origin)` is a multiple of `alignment`
    fn align(&mut self, alignment: usize) {
        let remainder = (self.buffer.len() - self.origin) % alignment;
        if remainder != 0 {
            let padding = alignment - remainder;
            self.reserve_for(padding);
            self.buffer.resize(self.buffer.len() + padding, 0);
        }
    }

    /// Write an i8 value
    pub fn write_i8(&mut self, value: i8) -> &mut Self {
        self.write_u8(value as u8)
    }

    /// Write a u8 value
    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.reserve_for(1);
        self.buffer.push(value);
        self
    }

    /// Write a boolean as a single byte (1 for true, 0 for false)
    pub fn write_bool(&mut self, value: bool) -> &mut Self {
        self.write_u8(u8::from(value))
    }

    impl_write_scalar!(
        /// Write an i16 value
        write_i16, i16, 2, write_i16
    );
    impl_write_scalar!(
        /// Write a u16 value
        write_u16, u16, 2, write_u16
    );
    impl_write_scalar!(
        /// Write an i32 value
        write_i32, i32, 4, write_i32
    );
    impl_write_scalar!(
        /// Write a u32 value
        write_u32, u32, 4, write_u32
    );
    impl_write_scalar!(
        /// Write an i64 value
        write_i64, i64, 8, write_i64
    );
    impl_write_scalar!(
        /// Write a u64 value
        write_u64, u64, 8, write_u64
    );
    impl_write_scalar!(
        /// Write an f32 value
        write_f32, f32, 4, write_f32
    );
    impl_write_scalar!(
        /// Write an f64 value
        write_f64, f64, 8, write_f64
    );

    impl_write_scalar_be!(
        /// Write a u16 in network byte order regardless of the stream endianness
        write_u16_be, u16, 2, write_u16
    );
    impl_write_scalar_be!(
        /// Write a u32 in network byte order regardless of the stream endianness
        write_u32_be, u32, 4, write_u32
    );
    impl_write_scalar_be!(
        /// Write a u64 in network byte order regardless of the stream endianness
        write_u64_be, u64, 8, write_u64
    );

    /// Write a length-prefixed, null-terminated UTF-8 string.
    ///
    /// The 4-byte length counts the UTF-8 bytes plus the terminator.
    pub fn write_string(&mut self, value: &str) -> &mut Self {
        let bytes = value.as_bytes();
        self.write_u32(bytes.len() as u32 + 1);
        self.reserve_for(bytes.len() + 1);
        self.buffer.extend_from_slice(bytes);
        self.buffer.push(0);
        self
    }

    /// Write the UTF-8 bytes and null terminator without a length prefix
    pub fn write_string_raw(&mut self, value: &str) -> &mut Self {
        let bytes = value.as_bytes();
        self.reserve_for(bytes.len() + 1);
        self.buffer.extend_from_slice(bytes);
        self.buffer.push(0);
        self
    }

    /// Write the element count prefix of a sequence
    pub fn write_sequence_length(&mut self, length: u32) -> &mut Self {
        self.write_u32(length)
    }

    /// Write the delimiter header preceding a delimited aggregate
    pub fn write_dheader(&mut self, object_size: u32) -> &mut Self {
        self.write_u32(object_size)
    }

    /// Write a member header for a parameter-list aggregate.
    ///
    /// Under XCDR1 this emits a short parameter id when `id` and
    /// `object_size` fit (4 bytes), otherwise the 12-byte extended form, and
    /// then snaps the alignment origin to the current offset so the member
    /// body aligns relative to its own start.
    ///
    /// Under XCDR2 this emits an EMHEADER word. With no explicit
    /// `length_code` the smallest of codes 0-4 is selected; the
    /// reused-NEXTINT codes 5-7 must be requested explicitly and constrain
    /// `object_size` (a multiple of 4 for code 6, of 8 for code 7).
    ///
    /// Fails with `IdTooLarge` for an XCDR2 id above 28 bits and with
    /// `BadLengthCode` when `object_size` contradicts the requested code.
    /// Both checks run before any bytes are written.
    pub fn write_emheader(
        &mut self,
        must_understand: bool,
        id: u32,
        object_size: u32,
        length_code: Option<LengthCode>,
    ) -> Result<&mut Self> {
        if self.kind.is_cdr2() {
            self.member_header_v2(must_understand, id, object_size, length_code)
        } else {
            self.member_header_v1(must_understand, id, object_size);
            Ok(self)
        }
    }

    fn member_header_v1(&mut self, must_understand: bool, id: u32, object_size: u32) {
        self.align(4);
        let flags = if must_understand {
            MUST_UNDERSTAND_FLAG
        } else {
            0
        };
        if id <= SHORT_PID_MAX_ID && object_size <= SHORT_PID_MAX_SIZE {
            self.write_u16(flags | id as u16);
            self.write_u16(object_size as u16);
        } else {
            // Extended form: the short length field is fixed at 8, the size
            // of the two 32-bit words that follow
            self.write_u16(flags | EXTENDED_PID);
            self.write_u16(8);
            self.write_u32(id);
            self.write_u32(object_size);
        }
        // PUSH(ORIGIN=0): the member body aligns as a fresh sub-stream
        self.origin = self.buffer.len();
    }

    fn member_header_v2(
        &mut self,
        must_understand: bool,
        id: u32,
        object_size: u32,
        length_code: Option<LengthCode>,
    ) -> Result<&mut Self> {
        if id > EMHEADER_ID_MASK {
            return Err(CdrError::IdTooLarge { id });
        }
        let code = length_code.unwrap_or_else(|| LengthCode::for_object_size(object_size));
        let next_int = code.next_int_for_size(object_size)?;

        let mut header = (code.as_u32() << EMHEADER_LENGTH_CODE_SHIFT) | id;
        if must_understand {
            header |= EMHEADER_MUST_UNDERSTAND;
        }
        self.write_u32(header);
        if let Some(next_int) = next_int {
            self.write_u32(next_int);
        }
        Ok(self)
    }

    /// Terminate an XCDR1 parameter list with the sentinel parameter id.
    ///
    /// No-op under XCDR2, where the delimiter header bounds the aggregate.
    pub fn write_sentinel_header(&mut self) -> &mut Self {
        if !self.kind.is_cdr2() {
            self.align(4);
            self.write_u16(SENTINEL_PID);
            self.write_u16(0);
        }
        self
    }

    /// Write an i8 array, optionally preceded by its element count
    pub fn write_i8_array(&mut self, values: &[i8], write_length: bool) -> &mut Self {
        if write_length {
            self.write_sequence_length(values.len() as u32);
        }
        self.reserve_for(values.len());
        self.buffer.extend(values.iter().map(|&v| v as u8));
        self
    }

    /// Write a u8 array, optionally preceded by its element count
    pub fn write_u8_array(&mut self, values: &[u8], write_length: bool) -> &mut Self {
        if write_length {
            self.write_sequence_length(values.len() as u32);
        }
        self.reserve_for(values.len());
        self.buffer.extend_from_slice(values);
        self
    }

    impl_write_array!(
        /// Write an i16 array, optionally preceded by its element count
        write_i16_array, write_i16, i16, 2, write_i16_into
    );
    impl_write_array!(
        /// Write a u16 array, optionally preceded by its element count
        write_u16_array, write_u16, u16, 2, write_u16_into
    );
    impl_write_array!(
        /// Write an i32 array, optionally preceded by its element count
        write_i32_array, write_i32, i32, 4, write_i32_into
    );
    impl_write_array!(
        /// Write a u32 array, optionally preceded by its element count
        write_u32_array, write_u32, u32, 4, write_u32_into
    );
    impl_write_array!(
        /// Write an i64 array, optionally preceded by its element count
        write_i64_array, write_i64, i64, 8, write_i64_into
    );
    impl_write_array!(
        /// Write a u64 array, optionally preceded by its element count
        write_u64_array, write_u64, u64, 8, write_u64_into
    );
    impl_write_array!(
        /// Write an f32 array, optionally preceded by its element count
        write_f32_array, write_f32, f32, 4, write_f32_into
    );
    impl_write_array!(
        /// Write an f64 array, optionally preceded by its element count
        write_f64_array, write_f64, f64, 8, write_f64_into
    );
}

impl Default for CdrWriter {
    fn default() -> Self {
        Self::new(EncapsulationKind::CdrLe)
    }
}

impl std::fmt::Debug for CdrWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdrWriter")
            .field("kind", &self.kind)
            .field("size", &self.buffer.len())
            .field("origin", &self.origin)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encapsulation_header() {
        let writer = CdrWriter::new(EncapsulationKind::CdrLe);
        assert_eq!(writer.data(), [0x00, 0x01, 0x00, 0x00]);
        assert_eq!(writer.size(), 4);
        assert_eq!(writer.kind(), EncapsulationKind::CdrLe);

        let writer = CdrWriter::new(EncapsulationKind::DCdr2Be);
        assert_eq!(writer.data(), [0x00, 0x15, 0x00, 0x00]);
    }

    #[test]
    fn test_default_kind_is_cdr_le() {
        let writer = CdrWriter::default();
        assert_eq!(writer.kind(), EncapsulationKind::CdrLe);
    }

    #[test]
    fn test_scalar_alignment_xcdr1() {
        // A u8 followed by an f64 pads to the 8-byte boundary under XCDR1
        let mut writer = CdrWriter::new(EncapsulationKind::CdrLe);
        writer.write_u8(1).write_f64(1.0);
        assert_eq!(
            writer.data(),
            [
                0x00, 0x01, 0x00, 0x00, // encapsulation header
                0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // u8 + 7 pad
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F, // f64 1.0
            ]
        );
    }

    #[test]
    fn test_scalar_alignment_xcdr2() {
        // Under XCDR2 the same sequence pads only to the 4-byte boundary
        let mut writer = CdrWriter::new(EncapsulationKind::Cdr2Le);
        writer.write_u8(1).write_f64(1.0);
        assert_eq!(
            writer.data(),
            [
                0x00, 0x11, 0x00, 0x00, // encapsulation header
                0x01, 0x00, 0x00, 0x00, // u8 + 3 pad
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F, // f64 1.0
            ]
        );
    }

    #[test]
    fn test_big_endian_stream() {
        let mut writer = CdrWriter::new(EncapsulationKind::CdrBe);
        writer.write_u32(0x1234_5678);
        assert_eq!(
            writer.data(),
            [0x00, 0x00, 0x00, 0x00, 0x12, 0x34, 0x56, 0x78]
        );
    }

    #[test]
    fn test_forced_network_order_writes() {
        let mut writer = CdrWriter::new(EncapsulationKind::CdrLe);
        writer
            .write_u16_be(0x0102)
            .write_u32_be(0x0304_0506)
            .write_u64_be(0x0708_090A_0B0C_0D0E);
        assert_eq!(
            writer.data(),
            [
                0x00, 0x01, 0x00, 0x00, // header
                0x01, 0x02, 0x00, 0x00, // u16 BE + pad to 4
                0x03, 0x04, 0x05, 0x06, // u32 BE
                // offset 12 is 8-aligned relative to the origin at 4
                0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, // u64 BE
            ]
        );
    }

    #[test]
    fn test_string_counts_terminator() {
        let mut writer = CdrWriter::new(EncapsulationKind::CdrLe);
        writer.write_string("abc");
        assert_eq!(
            writer.data(),
            [0x00, 0x01, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x61, 0x62, 0x63, 0x00]
        );
    }

    #[test]
    fn test_string_length_is_utf8_byte_count() {
        // "ü" is one character but two UTF-8 bytes; the prefix must count bytes
        let mut writer = CdrWriter::new(EncapsulationKind::CdrLe);
        writer.write_string("ü");
        assert_eq!(
            writer.data(),
            [0x00, 0x01, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00, 0xC3, 0xBC, 0x00]
        );
    }

    #[test]
    fn test_string_raw_has_no_prefix() {
        let mut writer = CdrWriter::new(EncapsulationKind::CdrLe);
        writer.write_string_raw("ab");
        assert_eq!(writer.data(), [0x00, 0x01, 0x00, 0x00, 0x61, 0x62, 0x00]);
    }

    #[test]
    fn test_u8_array_with_length_prefix() {
        let mut writer = CdrWriter::new(EncapsulationKind::CdrLe);
        writer.write_u8_array(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11], true);
        assert_eq!(
            writer.data(),
            [
                0x00, 0x01, 0x00, 0x00, // header
                0x0B, 0x00, 0x00, 0x00, // count = 11
                0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,
            ]
        );
    }

    #[test]
    fn test_emheader_xcdr1_short_form_and_origin_reset() {
        let mut writer = CdrWriter::new(EncapsulationKind::PlCdrLe);
        writer.write_emheader(true, 0x0012, 4, None).unwrap();
        assert_eq!(
            writer.data(),
            [0x00, 0x03, 0x00, 0x00, 0x12, 0x40, 0x04, 0x00]
        );
        // The origin was reset to offset 8, so an f64 here needs no padding
        // even though the absolute offset is not 8-byte aligned from byte 0
        writer.write_f64(1.0);
        assert_eq!(writer.size(), 16);
    }

    #[test]
    fn test_emheader_xcdr1_extended_form() {
        let mut writer = CdrWriter::new(EncapsulationKind::PlCdrLe);
        writer.write_emheader(true, 0x4000_0000, 16, None).unwrap();
        assert_eq!(
            writer.data()[4..],
            [0x01, 0x7F, 0x08, 0x00, 0x00, 0x00, 0x00, 0x40, 0x10, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_emheader_xcdr1_extended_when_size_overflows() {
        // id fits the short form but the size does not
        let mut writer = CdrWriter::new(EncapsulationKind::PlCdrLe);
        writer.write_emheader(false, 0x0010, 0x0001_0000, None).unwrap();
        assert_eq!(
            writer.data()[4..],
            [0x01, 0x3F, 0x08, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00]
        );
    }

    #[test]
    fn test_emheader_xcdr2_selects_smallest_code() {
        let cases: [(u32, u8); 5] = [(1, 0), (2, 1), (4, 2), (8, 3), (12, 4)];
        for (object_size, expected_code) in cases {
            let mut writer = CdrWriter::new(EncapsulationKind::PlCdr2Le);
            writer.write_emheader(false, 0x42, object_size, None).unwrap();
            let header = u32::from_le_bytes(writer.data()[4..8].try_into().unwrap());
            assert_eq!((header >> 28) as u8, expected_code);
            assert_eq!(header & 0x0FFF_FFFF, 0x42);
        }
    }

    #[test]
    fn test_emheader_xcdr2_explicit_length_code_6() {
        let mut writer = CdrWriter::new(EncapsulationKind::PlCdr2Le);
        writer
            .write_emheader(false, 0x1234, 12, Some(LengthCode::NextIntTimes4))
            .unwrap();
        assert_eq!(
            writer.data()[4..],
            [0x34, 0x12, 0x00, 0x60, 0x03, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_emheader_xcdr2_must_understand_bit() {
        let mut writer = CdrWriter::new(EncapsulationKind::PlCdr2Le);
        writer.write_emheader(true, 0x42, 4, None).unwrap();
        let header = u32::from_le_bytes(writer.data()[4..8].try_into().unwrap());
        assert_eq!(header & 0x8000_0000, 0x8000_0000);
    }

    #[test]
    fn test_emheader_xcdr2_id_too_large() {
        let mut writer = CdrWriter::new(EncapsulationKind::PlCdr2Le);
        let err = writer.write_emheader(false, 0x1000_0000, 4, None).unwrap_err();
        assert!(matches!(err, CdrError::IdTooLarge { id: 0x1000_0000 }));
        // nothing was written, the writer stays usable
        assert_eq!(writer.size(), 4);
        writer.write_emheader(false, 0x42, 4, None).unwrap();
        assert_eq!(writer.size(), 8);
    }

    #[test]
    fn test_emheader_xcdr2_size_mismatch_writes_nothing() {
        let mut writer = CdrWriter::new(EncapsulationKind::PlCdr2Le);
        let err = writer
            .write_emheader(false, 0x42, 13, Some(LengthCode::NextIntTimes4))
            .unwrap_err();
        assert!(matches!(err, CdrError::BadLengthCode { .. }));
        assert_eq!(writer.size(), 4);
    }

    #[test]
    fn test_sentinel_header_xcdr1() {
        let mut writer = CdrWriter::new(EncapsulationKind::PlCdrLe);
        writer.write_sentinel_header();
        assert_eq!(writer.data()[4..], [0x02, 0x3F, 0x00, 0x00]);
    }

    #[test]
    fn test_sentinel_header_is_noop_on_xcdr2() {
        let mut writer = CdrWriter::new(EncapsulationKind::PlCdr2Le);
        writer.write_sentinel_header();
        assert_eq!(writer.size(), 4);
    }

    #[test]
    fn test_growth_preserves_written_bytes() {
        let mut writer = CdrWriter::with_capacity(EncapsulationKind::CdrLe, 4);
        for i in 0..64u32 {
            writer.write_u32(i);
        }
        assert_eq!(writer.size(), 4 + 64 * 4);
        for i in 0..64u32 {
            let start = 4 + i as usize * 4;
            let value = u32::from_le_bytes(writer.data()[start..start + 4].try_into().unwrap());
            assert_eq!(value, i);
        }
    }

    #[test]
    fn test_with_buffer_reuses_capacity() {
        let buffer = Vec::with_capacity(1024);
        let writer = CdrWriter::with_buffer(EncapsulationKind::CdrLe, buffer);
        assert_eq!(writer.size(), 4);
        let recycled = writer.into_vec();
        assert!(recycled.capacity() >= 1024);
    }

    #[test]
    fn test_padding_bytes_are_zero() {
        let mut writer = CdrWriter::new(EncapsulationKind::CdrLe);
        writer.write_u8(0xFF).write_u64(u64::MAX);
        assert_eq!(&writer.data()[5..12], &[0u8; 7]);
    }
}
