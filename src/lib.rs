//! # xcdr-rs
//!
//! A Rust library for serializing and deserializing OMG Common Data
//! Representation (CDR) streams, the wire format used by DDS/RTPS and ROS2.
//!
//! The library covers plain, parameter-list, and delimited encapsulations in
//! both Extended CDR version 1 (XCDR1) and version 2 (XCDR2), including the
//! DDS-XTypes member headers (EMHEADER), delimiter headers (DHEADER), and the
//! XCDR1 sentinel. The caller drives field order; there is no schema layer.
//!
//! ## Features
//!
//! - All ten OMG encapsulation kinds, big- and little-endian
//! - Correct alignment and origin-reset semantics across XCDR1 and XCDR2
//!   (64-bit types align to 8 bytes under XCDR1 and 4 under XCDR2)
//! - XCDR2 EMHEADER length codes 0-7, including the reused-NEXTINT forms
//! - Bulk fast paths for primitive arrays when the stream byte order matches
//!   the host
//! - A growable write buffer with doubling growth and zero-copy buffer reuse
//!
//! ## Example
//!
//! ```rust
//! use xcdr_rs::{CdrReader, CdrWriter, EncapsulationKind, Result};
//!
//! fn main() -> Result<()> {
//!     let mut writer = CdrWriter::new(EncapsulationKind::CdrLe);
//!     writer.write_u32(7).write_string("odometry").write_f64(3.5);
//!
//!     let mut reader = CdrReader::new(writer.data())?;
//!     assert_eq!(reader.read_u32()?, 7);
//!     assert_eq!(reader.read_string()?, "odometry");
//!     assert_eq!(reader.read_f64()?, 3.5);
//!     Ok(())
//! }
//! ```

pub mod encapsulation;
pub mod error;
pub mod length_code;
pub mod reader;
pub mod writer;

// Re-export main types for convenience
pub use encapsulation::{EncapsulationKind, Endianness};
pub use error::{CdrError, Result};
pub use length_code::LengthCode;
pub use reader::{CdrReader, EmHeader};
pub use writer::CdrWriter;

/// Initial capacity of a writer buffer when none is requested
pub const DEFAULT_CAPACITY: usize = 16;

/// Minimum element count for the bulk copy path of primitive array
/// operations. Below it, per-element access is cheaper than the alignment
/// bookkeeping. Any value of 1 or more is correct; this is a tuning knob.
pub const BUFFER_COPY_THRESHOLD: usize = 10;
