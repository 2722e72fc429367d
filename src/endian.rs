use core::fmt;
use core::str::FromStr;

use zerocopy::byteorder::{LE, U16};

use crate::{Result, StreamError};

/// Byte order of multi-byte values.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Endian {
    /// Most significant byte first (0x01 0x02 0x03 0x04).
    Big,
    /// Least significant byte first (0x04 0x03 0x02 0x01).
    Little,
}

impl Endian {
    /// The byte order of the target, known at compile time.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Endian = Endian::Little;

    /// The byte order of the target, known at compile time.
    #[cfg(target_endian = "big")]
    pub const NATIVE: Endian = Endian::Big;

    /// Detects the host byte order.
    ///
    /// Packs `0x00FF` in native order and checks whether reading those two bytes back as a
    /// little-endian `u16` reproduces the value.
    pub fn detect() -> Endian {
        let value: u16 = 0x00ff;
        let packed = value.to_ne_bytes();
        if U16::<LE>::from_bytes(packed).get() == value {
            Endian::Little
        } else {
            Endian::Big
        }
    }

    /// Returns the other byte order.
    pub fn opposite(self) -> Endian {
        match self {
            Endian::Big => Endian::Little,
            Endian::Little => Endian::Big,
        }
    }

    /// The name used by `Display` and `FromStr`: `"big"` or `"little"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Endian::Big => "big",
            Endian::Little => "little",
        }
    }
}

impl Default for Endian {
    fn default() -> Self {
        Endian::detect()
    }
}

impl fmt::Display for Endian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Endian {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "big" => Ok(Endian::Big),
            "little" => Ok(Endian::Little),
            _ => Err(StreamError::InvalidArgument(format!(
                "invalid endian `{s}`; endian must be set as big or little"
            ))),
        }
    }
}

/// Reverses the byte order of `value`'s minimal hexadecimal representation.
///
/// The hex digits are packed two per byte, most significant digit first. An odd digit count
/// leaves the low nibble of the last byte zero, so `0xfff` packs as `ff f0` and comes back as
/// `0xf0ff`; `0x1234` becomes `0x3412`. Values of at most two hex digits are returned
/// unchanged. Signed values can be passed as `value as u64`; they always use all 16 digits.
pub fn convert(value: u64) -> u64 {
    let digits = (u64::BITS - value.leading_zeros()).div_ceil(4);
    if digits <= 2 {
        return value;
    }
    let (packed, width) = if digits % 2 == 1 {
        (value << 4, (digits + 1) / 2)
    } else {
        (value, digits / 2)
    };
    packed.swap_bytes() >> (8 * (8 - width))
}

/// A fixed-width value that can be encoded in either byte order.
///
/// Implemented for all 8/16/32/64-bit integers and for `f32` and `f64`.
pub trait Scalar: Copy + Default {
    /// The encoded form, `[u8; WIDTH]`.
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default;

    /// Encoded size in bytes.
    const WIDTH: usize;

    /// Decodes a value from its encoded form.
    fn decode(bytes: Self::Bytes, endian: Endian) -> Self;

    /// Encodes the value.
    fn encode(self, endian: Endian) -> Self::Bytes;
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {$(
        impl Scalar for $t {
            type Bytes = [u8; core::mem::size_of::<$t>()];

            const WIDTH: usize = core::mem::size_of::<$t>();

            #[inline(always)]
            fn decode(bytes: Self::Bytes, endian: Endian) -> Self {
                match endian {
                    Endian::Big => <$t>::from_be_bytes(bytes),
                    Endian::Little => <$t>::from_le_bytes(bytes),
                }
            }

            #[inline(always)]
            fn encode(self, endian: Endian) -> Self::Bytes {
                match endian {
                    Endian::Big => self.to_be_bytes(),
                    Endian::Little => self.to_le_bytes(),
                }
            }
        }
    )*};
}

impl_scalar!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_matches_target() {
        assert_eq!(Endian::detect(), Endian::NATIVE);
        assert_eq!(Endian::default(), Endian::NATIVE);
    }

    #[test]
    fn parse_names() {
        assert_eq!("big".parse::<Endian>().unwrap(), Endian::Big);
        assert_eq!("little".parse::<Endian>().unwrap(), Endian::Little);
        assert!(matches!(
            "middle".parse::<Endian>(),
            Err(StreamError::InvalidArgument(_))
        ));
        // Names are exact.
        assert!("BIG".parse::<Endian>().is_err());
        assert_eq!(Endian::Little.to_string(), "little");
    }

    #[test]
    fn convert_small_values_unchanged() {
        assert_eq!(convert(0), 0);
        assert_eq!(convert(0x7f), 0x7f);
        assert_eq!(convert(0xff), 0xff);
    }

    #[test]
    fn convert_swaps_minimal_bytes() {
        assert_eq!(convert(0x1234), 0x3412);
        assert_eq!(convert(0x12_3456), 0x56_3412);
        assert_eq!(convert(0x1122_3344), 0x4433_2211);
        assert_eq!(convert(0x1102_0304_0506_0708), 0x0807_0605_0403_0211);
        assert_eq!(convert(u64::MAX), u64::MAX);
        assert_eq!(convert(convert(0x1122_3344)), 0x1122_3344);
    }

    /// An odd digit count is packed with a zero low nibble in the last byte.
    #[test]
    fn convert_odd_digit_count() {
        assert_eq!(convert(0x100), 0x0010);
        assert_eq!(convert(0xfff), 0xf0ff);
        assert_eq!(convert(0x123), 0x3012);
        assert_eq!(convert(0x1_2345), 0x50_3412);
        assert_eq!(convert(0x0102_0304_0506_0708), 0x8070_6050_4030_2010);
    }

    #[test]
    fn scalar_orders() {
        assert_eq!(0x0102_0304u32.encode(Endian::Big), [1, 2, 3, 4]);
        assert_eq!(0x0102_0304u32.encode(Endian::Little), [4, 3, 2, 1]);
        assert_eq!(u32::decode([4, 3, 2, 1], Endian::Little), 0x0102_0304);
        assert_eq!(i16::decode([0xff, 0xfe], Endian::Big), -2);
        assert_eq!(<f32 as Scalar>::WIDTH, 4);
    }
}
