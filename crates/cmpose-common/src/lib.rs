//! Common utilities for cmpose.
//!
//! This crate provides the low-level pieces used by the CMP and pose crates:
//!
//! - [`hex`] - Hex digit strings: byte order reversal, grouping, word parsing
//! - [`float`] - IEEE-754 single-precision decoding from raw bit patterns
//!
//! # Example
//!
//! ```
//! use cmpose_common::{float, hex};
//!
//! // "00 00 80 3F" is 1.0f32 stored little-endian
//! let word = hex::reverse_byte_order("0x0000803F", hex::WORD_BYTES)?;
//! assert_eq!(word, "0x3F800000");
//!
//! let bits = hex::parse_hex_u32(&word[2..])?;
//! assert_eq!(float::decode_f32_bits(bits), 1.0);
//! # Ok::<(), cmpose_common::Error>(())
//! ```

mod error;

pub mod float;
pub mod hex;

pub use error::{Error, Result};
