//! Fixed-width 256-bit unsigned integer.
//!
//! Hashes and sizes in the value graph are 256-bit quantities. Only the
//! operations the metadata types need are provided: construction, narrowing,
//! ordering, byte conversion, formatting and parsing. Arithmetic lives with
//! the callers that produce these numbers.

use crate::error::{ParseU256Error, U256OverflowError};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const LIMBS: usize = 4;
// Largest power of ten that fits in a u64.
const TEN_POW_19: u64 = 10_000_000_000_000_000_000;

/// 256-bit unsigned integer stored as little-endian `u64` limbs.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct U256([u64; LIMBS]);

impl U256 {
    pub const ZERO: U256 = U256([0; LIMBS]);
    pub const ONE: U256 = U256([1, 0, 0, 0]);
    pub const MAX: U256 = U256([u64::MAX; LIMBS]);
    pub const BITS: u32 = 256;

    /// Build from little-endian limbs (`limbs[0]` is least significant).
    pub const fn from_limbs(limbs: [u64; LIMBS]) -> Self {
        Self(limbs)
    }

    pub const fn from_u64(v: u64) -> Self {
        Self([v, 0, 0, 0])
    }

    pub const fn limbs(&self) -> [u64; LIMBS] {
        self.0
    }

    #[inline(always)]
    pub fn is_zero(&self) -> bool {
        self.0 == [0; LIMBS]
    }

    /// The low 64 bits, truncating the rest.
    #[inline(always)]
    pub fn low_u64(&self) -> u64 {
        self.0[0]
    }

    /// The value as a `u64`, or `None` if narrowing would truncate.
    #[inline(always)]
    pub fn to_u64(&self) -> Option<u64> {
        if (self.0[1] | self.0[2] | self.0[3]) == 0 {
            Some(self.0[0])
        } else {
            None
        }
    }

    /// Number of significant bits; zero for `ZERO`.
    pub fn bits(&self) -> u32 {
        for i in (0..LIMBS).rev() {
            if self.0[i] != 0 {
                return i as u32 * 64 + (64 - self.0[i].leading_zeros());
            }
        }
        0
    }

    /// `2^n`. Panics if `n >= 256`.
    pub fn pow2(n: u32) -> Self {
        assert!(n < Self::BITS, "2^{n} does not fit in 256 bits");
        let mut limbs = [0u64; LIMBS];
        limbs[(n / 64) as usize] = 1u64 << (n % 64);
        Self(limbs)
    }

    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        let mut limbs = [0u64; LIMBS];
        for (i, chunk) in bytes.chunks_exact(8).enumerate() {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            limbs[LIMBS - 1 - i] = u64::from_be_bytes(word);
        }
        Self(limbs)
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (i, limb) in self.0.iter().rev().enumerate() {
            out[i * 8..i * 8 + 8].copy_from_slice(&limb.to_be_bytes());
        }
        out
    }

    fn checked_mul_add_small(self, mul: u64, add: u64) -> Option<Self> {
        let mut out = [0u64; LIMBS];
        let mut carry = add as u128;
        for (dst, &limb) in out.iter_mut().zip(self.0.iter()) {
            let t = limb as u128 * mul as u128 + carry;
            *dst = t as u64;
            carry = t >> 64;
        }
        if carry != 0 { None } else { Some(Self(out)) }
    }

    fn div_rem_small(self, div: u64) -> (Self, u64) {
        let mut out = [0u64; LIMBS];
        let mut rem = 0u128;
        for i in (0..LIMBS).rev() {
            let cur = (rem << 64) | self.0[i] as u128;
            out[i] = (cur / div as u128) as u64;
            rem = cur % div as u128;
        }
        (Self(out), rem as u64)
    }

    fn hex_digits(&self, upper: bool) -> String {
        let top = match self.0.iter().rposition(|&l| l != 0) {
            Some(i) => i,
            None => return "0".to_string(),
        };
        let mut s = String::with_capacity((top + 1) * 16);
        if upper {
            s.push_str(&format!("{:X}", self.0[top]));
            for limb in self.0[..top].iter().rev() {
                s.push_str(&format!("{:016X}", limb));
            }
        } else {
            s.push_str(&format!("{:x}", self.0[top]));
            for limb in self.0[..top].iter().rev() {
                s.push_str(&format!("{:016x}", limb));
            }
        }
        s
    }
}

macro_rules! impl_from_small {
    ($($t:ty),*) => {
        $(
            impl From<$t> for U256 {
                #[inline(always)]
                fn from(v: $t) -> Self {
                    Self::from_u64(v as u64)
                }
            }
        )*
    };
}

impl_from_small!(u8, u16, u32, u64);

impl From<u128> for U256 {
    fn from(v: u128) -> Self {
        Self([v as u64, (v >> 64) as u64, 0, 0])
    }
}

impl TryFrom<U256> for u64 {
    type Error = U256OverflowError;

    fn try_from(v: U256) -> Result<Self, Self::Error> {
        v.to_u64().ok_or(U256OverflowError { target: "u64" })
    }
}

impl TryFrom<U256> for u128 {
    type Error = U256OverflowError;

    fn try_from(v: U256) -> Result<Self, Self::Error> {
        if (v.0[2] | v.0[3]) == 0 {
            Ok(((v.0[1] as u128) << 64) | v.0[0] as u128)
        } else {
            Err(U256OverflowError { target: "u128" })
        }
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> Ordering {
        // Most significant limb first.
        self.0.iter().rev().cmp(other.0.iter().rev())
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut chunks = Vec::with_capacity(4);
        let mut n = *self;
        while !n.is_zero() {
            let (q, r) = n.div_rem_small(TEN_POW_19);
            chunks.push(r);
            n = q;
        }
        let mut s = String::new();
        match chunks.split_last() {
            None => s.push('0'),
            Some((top, rest)) => {
                s.push_str(&top.to_string());
                for chunk in rest.iter().rev() {
                    s.push_str(&format!("{:019}", chunk));
                }
            }
        }
        f.pad_integral(true, "", &s)
    }
}

impl fmt::LowerHex for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.hex_digits(false))
    }
}

impl fmt::UpperHex for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.hex_digits(true))
    }
}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self)
    }
}

impl FromStr for U256 {
    type Err = ParseU256Error;

    /// Parses decimal, or hex with a `0x`/`0X` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(rest) => (rest, 16u32),
            None => (s, 10u32),
        };
        if digits.is_empty() {
            return Err(ParseU256Error::Empty);
        }
        let offset = s.len() - digits.len();
        let mut acc = U256::ZERO;
        for (i, ch) in digits.char_indices() {
            let d = ch
                .to_digit(radix)
                .ok_or(ParseU256Error::InvalidDigit { index: offset + i, ch })?;
            acc = acc
                .checked_mul_add_small(radix as u64, d as u64)
                .ok_or(ParseU256Error::Overflow)?;
        }
        Ok(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrowing_to_u64() {
        assert_eq!(U256::from(u64::MAX).to_u64(), Some(u64::MAX));
        assert_eq!(U256::pow2(64).to_u64(), None);
        assert_eq!(U256::pow2(64).low_u64(), 0);
        assert_eq!(U256::ZERO.to_u64(), Some(0));
        assert_eq!(u64::try_from(U256::pow2(200)), Err(U256OverflowError { target: "u64" }));
    }

    #[test]
    fn u128_conversion() {
        let v = (7u128 << 64) | 9;
        let big = U256::from(v);
        assert_eq!(big.limbs(), [9, 7, 0, 0]);
        assert_eq!(u128::try_from(big), Ok(v));
        assert!(u128::try_from(U256::pow2(128)).is_err());
    }

    #[test]
    fn ordering_is_numeric() {
        assert!(U256::pow2(64) > U256::from(u64::MAX));
        assert!(U256::pow2(255) > U256::pow2(254));
        assert!(U256::from_limbs([u64::MAX, 0, 0, 0]) < U256::from_limbs([0, 0, 0, 1]));
        assert_eq!(U256::MAX.cmp(&U256::MAX), Ordering::Equal);
    }

    #[test]
    fn bits_counts_significant_bits() {
        assert_eq!(U256::ZERO.bits(), 0);
        assert_eq!(U256::ONE.bits(), 1);
        assert_eq!(U256::pow2(70).bits(), 71);
        assert_eq!(U256::MAX.bits(), 256);
    }

    #[test]
    #[should_panic(expected = "does not fit in 256 bits")]
    fn pow2_rejects_256() {
        let _ = U256::pow2(256);
    }

    #[test]
    fn be_bytes_layout() {
        let v = U256::from_limbs([0x0102030405060708, 0, 0, 0xa0a1a2a3a4a5a6a7]);
        let bytes = v.to_be_bytes();
        assert_eq!(bytes[0], 0xa0);
        assert_eq!(bytes[31], 0x08);
        assert_eq!(U256::from_be_bytes(bytes), v);
    }

    #[test]
    fn formatting() {
        assert_eq!(U256::ZERO.to_string(), "0");
        assert_eq!(U256::from(12345u32).to_string(), "12345");
        assert_eq!(U256::pow2(64).to_string(), "18446744073709551616");
        assert_eq!(U256::pow2(70).to_string(), "1180591620717411303424");
        assert_eq!(
            U256::MAX.to_string(),
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
        assert_eq!(format!("{:x}", U256::from(0xabcdu32)), "abcd");
        assert_eq!(format!("{:#X}", U256::from(0xabcdu32)), "0xABCD");
        assert_eq!(format!("{:x}", U256::pow2(64)), "10000000000000000");
        assert_eq!(format!("{:?}", U256::ONE), "0x1");
    }

    #[test]
    fn parsing() {
        assert_eq!("0".parse::<U256>(), Ok(U256::ZERO));
        assert_eq!("0xABCD".parse::<U256>(), Ok(U256::from(0xabcdu32)));
        assert_eq!("1180591620717411303424".parse::<U256>(), Ok(U256::pow2(70)));
        assert_eq!(U256::MAX.to_string().parse::<U256>(), Ok(U256::MAX));
        assert_eq!("".parse::<U256>(), Err(ParseU256Error::Empty));
        assert_eq!("0x".parse::<U256>(), Err(ParseU256Error::Empty));
        assert_eq!(
            "12a".parse::<U256>(),
            Err(ParseU256Error::InvalidDigit { index: 2, ch: 'a' })
        );
        assert_eq!(
            "0x1g".parse::<U256>(),
            Err(ParseU256Error::InvalidDigit { index: 3, ch: 'g' })
        );
        let too_big = format!("0x1{}", "0".repeat(64));
        assert_eq!(too_big.parse::<U256>(), Err(ParseU256Error::Overflow));
    }
}
