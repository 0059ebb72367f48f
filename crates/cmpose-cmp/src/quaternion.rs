//! Rotation quaternions stored in CMP bone records.
//!
//! A bone value is 16 bytes written as hex pairs: four little-endian `f32`
//! components in `x, y, z, w` order.
//!
//! ```text
//! "DB C4 32 3F F3 E6 9B BE 4B 8E 15 3F 05 4F 8F BE"
//!  |---- x ---| |---- y ---| |---- z ---| |---- w ---|
//! ```

use byteorder::{ByteOrder, LittleEndian};
use cmpose_common::{float, hex};

use crate::{Error, Result};

/// Number of components in a quaternion.
pub const QUATERNION_COMPONENTS: usize = 4;

/// Size of an encoded quaternion in bytes.
pub const QUATERNION_BYTES: usize = QUATERNION_COMPONENTS * hex::WORD_BYTES;

/// Number of hex digits in an encoded quaternion once spaces are removed.
pub const QUATERNION_DIGITS: usize = QUATERNION_COMPONENTS * hex::WORD_DIGITS;

/// A rotation as four independent `f64` components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Create a new quaternion.
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Create a quaternion from components in `x, y, z, w` order.
    pub const fn from_array(c: [f64; QUATERNION_COMPONENTS]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    /// Get the components in `x, y, z, w` order.
    pub const fn components(&self) -> [f64; QUATERNION_COMPONENTS] {
        [self.x, self.y, self.z, self.w]
    }

    /// Decode a CMP hex value.
    ///
    /// Spaces are removed, the remaining 32 digits are split into four 8-digit
    /// words, and each word has its bytes reversed before being decoded as an
    /// IEEE-754 single.
    ///
    /// # Example
    ///
    /// ```
    /// use cmpose_cmp::Quaternion;
    ///
    /// let q = Quaternion::decode_hex("00 00 00 00 00 00 00 00 00 00 00 00 00 00 80 3F")?;
    /// assert_eq!(q, Quaternion::IDENTITY);
    /// # Ok::<(), cmpose_cmp::Error>(())
    /// ```
    pub fn decode_hex(value: &str) -> Result<Self> {
        let digits = hex::strip_spaces(value);

        if digits.len() != QUATERNION_DIGITS {
            return Err(Error::DigitCount {
                expected: QUATERNION_DIGITS,
                actual: digits.len(),
            });
        }

        let groups = hex::split_groups(&digits, hex::WORD_DIGITS)?;

        let mut components = [0.0; QUATERNION_COMPONENTS];
        for (component, group) in components.iter_mut().zip(groups) {
            *component = decode_word(group)?;
        }

        Ok(Self::from_array(components))
    }

    /// Decode 16 raw little-endian bytes with the native float conversion.
    ///
    /// This is the reference the hand-rolled hex path is checked against.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != QUATERNION_BYTES {
            return Err(Error::ByteCount {
                expected: QUATERNION_BYTES,
                actual: bytes.len(),
            });
        }

        let mut floats = [0f32; QUATERNION_COMPONENTS];
        LittleEndian::read_f32_into(bytes, &mut floats);

        Ok(Self::from_array(floats.map(f64::from)))
    }

    /// Round every component to `places` decimal places.
    pub fn rounded(self, places: u32) -> Self {
        self.map(|c| float::round_to_places(c, places))
    }

    /// Negate every component.
    pub fn negated(self) -> Self {
        self.map(|c| -c)
    }

    /// Check that no component is infinite or NaN.
    pub fn is_finite(&self) -> bool {
        self.components().iter().all(|c| c.is_finite())
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::from_array(self.components().map(f))
    }
}

/// Decode one 8-digit little-endian word.
fn decode_word(group: &str) -> Result<f64> {
    let word = hex::reverse_byte_order(&format!("{}{group}", hex::HEX_PREFIX), hex::WORD_BYTES)?;
    let bits = hex::parse_hex_u32(&word[hex::HEX_PREFIX.len()..])?;
    Ok(float::decode_f32_bits(bits))
}
