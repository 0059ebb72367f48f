//! IEEE-754 single-precision decoding.
//!
//! Floats are rebuilt from their bit fields rather than reinterpreted with
//! [`f32::from_bits`], so the arithmetic is visible and independent of the
//! host. Normal numbers use
//! `sign * (mantissa | 0x800000) / 2^23 * 2^(exponent - 127)`.
//! Zero/subnormal (exponent 0) and infinity/NaN (exponent 255) follow the
//! IEEE-754 rules, which makes the result identical to the native decode for
//! every bit pattern.

const SIGN_SHIFT: u32 = 31;
const EXPONENT_SHIFT: u32 = 23;
const EXPONENT_MASK: u32 = 0xFF;
const MANTISSA_MASK: u32 = 0x007F_FFFF;
const IMPLICIT_BIT: u32 = 0x0080_0000;
const EXPONENT_BIAS: i32 = 127;
const MANTISSA_BITS: i32 = 23;

/// Decode a 32-bit IEEE-754 bit pattern into an `f64`.
///
/// # Example
///
/// ```
/// use cmpose_common::float::decode_f32_bits;
///
/// assert_eq!(decode_f32_bits(0x3F80_0000), 1.0);
/// assert_eq!(decode_f32_bits(0xBF80_0000), -1.0);
/// assert_eq!(decode_f32_bits(0x0000_0000), 0.0);
/// ```
pub fn decode_f32_bits(bits: u32) -> f64 {
    let sign = if bits >> SIGN_SHIFT != 0 { -1.0 } else { 1.0 };
    let exponent = ((bits >> EXPONENT_SHIFT) & EXPONENT_MASK) as i32;
    let mantissa = bits & MANTISSA_MASK;

    match exponent {
        // Zero and subnormals: no implicit bit, fixed exponent of -126
        0 => {
            sign * f64::from(mantissa) / 2f64.powi(MANTISSA_BITS)
                * 2f64.powi(1 - EXPONENT_BIAS)
        }
        0xFF if mantissa == 0 => sign * f64::INFINITY,
        0xFF => f64::NAN,
        _ => {
            sign * f64::from(mantissa | IMPLICIT_BIT) / 2f64.powi(MANTISSA_BITS)
                * 2f64.powi(exponent - EXPONENT_BIAS)
        }
    }
}

/// Round `value` to `places` decimal places.
///
/// Rounding goes through exact decimal formatting, so the result is the
/// double nearest to the correctly rounded decimal. Exact binary ties such as
/// `0.001953125` at 8 places round half to even. Non-finite values are
/// returned unchanged.
pub fn round_to_places(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    format!("{value:.prec$}", prec = places as usize)
        .parse()
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(decode_f32_bits(0x0000_0000), 0.0);
        assert_eq!(decode_f32_bits(0x3F80_0000), 1.0);
        assert_eq!(decode_f32_bits(0xBF80_0000), -1.0);
        assert_eq!(decode_f32_bits(0x4000_0000), 2.0);
        assert_eq!(decode_f32_bits(0x3F00_0000), 0.5);
    }

    #[test]
    fn test_negative_zero() {
        let value = decode_f32_bits(0x8000_0000);
        assert_eq!(value, 0.0);
        assert!(value.is_sign_negative());
    }

    #[test]
    fn test_special_exponents() {
        assert_eq!(decode_f32_bits(0x7F80_0000), f64::INFINITY);
        assert_eq!(decode_f32_bits(0xFF80_0000), f64::NEG_INFINITY);
        assert!(decode_f32_bits(0x7FC0_0000).is_nan());
        // Smallest positive subnormal
        assert_eq!(decode_f32_bits(0x0000_0001), 2f64.powi(-149));
    }

    #[test]
    fn test_matches_native_decode() {
        let patterns = [
            0x3F32_C4DB,
            0xBE9B_E6F3,
            0x3F15_8E4B,
            0xBE8F_4F05,
            0x0000_0001,
            0x007F_FFFF,
            0x0080_0000,
            0x7F7F_FFFF,
            0xFF7F_FFFF,
            0x3DCC_CCCD,
        ];
        for bits in patterns {
            assert_eq!(
                decode_f32_bits(bits),
                f64::from(f32::from_bits(bits)),
                "bits {bits:#010x}"
            );
        }
    }

    #[test]
    fn test_round_to_places() {
        assert_eq!(round_to_places(0.6983162760734558, 8), 0.69831628);
        assert_eq!(round_to_places(-0.3044963777065277, 8), -0.30449638);
        assert_eq!(round_to_places(1.0, 8), 1.0);
        assert_eq!(round_to_places(1e-10, 8), 0.0);
        // 2^-9 sits exactly halfway at 8 places
        assert_eq!(round_to_places(0.001953125, 8), 0.00195312);
        assert_eq!(round_to_places(-0.001953125, 8), -0.00195312);
        assert!(round_to_places(f64::NAN, 8).is_nan());
    }
}
