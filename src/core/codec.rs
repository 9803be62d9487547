//! core::codec
//!
//! Order-preserving bijection between integers and fixed-width strings.
//!
//! # Overview
//!
//! Arithmetic on labels ("some label after this one") is awkward on strings
//! but trivial on integers. [`PaddedCodec`] maps `0..=max_value` onto strings
//! of exactly `length` symbols so that integer order and string order agree.
//!
//! # Example
//!
//! ```
//! use ltreework::core::codec::PaddedCodec;
//!
//! let codec = PaddedCodec::new("0123456789", 3).unwrap();
//! assert_eq!(codec.max_value(), 999);
//! assert_eq!(codec.encode(42).unwrap(), "042");
//! assert_eq!(codec.decode("042").unwrap(), 42);
//! assert!(codec.encode(1000).is_err());
//! ```

use thiserror::Error;

use super::alphabet::{Alphabet, AlphabetError};

/// Errors from encoding and decoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid codec alphabet: {0}")]
    Alphabet(#[from] AlphabetError),

    #[error("codec length must be at least 1")]
    ZeroLength,

    #[error("{base}^{length} - 1 does not fit in a u64")]
    Capacity { base: usize, length: usize },

    #[error("value {value} must be between 0 and {max}")]
    OutOfRange { value: u64, max: u64 },

    #[error("value must be {expected} characters long, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("character '{0}' is not in the codec alphabet")]
    UnknownChar(char),
}

/// Fixed-width, order-preserving integer codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedCodec {
    alphabet: Alphabet,
    length: usize,
    max_value: u64,
}

impl PaddedCodec {
    /// Create a codec over sorted, unique `chars` producing `length`-symbol
    /// strings.
    ///
    /// # Errors
    ///
    /// Fails if `chars` is unsorted, has duplicates, has fewer than two
    /// symbols, if `length` is zero, or if `base^length - 1` exceeds `u64::MAX`.
    pub fn new(chars: &str, length: usize) -> Result<Self, CodecError> {
        Self::with_alphabet(Alphabet::sorted(chars)?, length)
    }

    /// Create a codec from an existing alphabet, which must be sorted.
    pub fn with_alphabet(alphabet: Alphabet, length: usize) -> Result<Self, CodecError> {
        alphabet.check_sorted()?;
        if length == 0 {
            return Err(CodecError::ZeroLength);
        }

        let base = alphabet.base();
        let max_value = u32::try_from(length)
            .ok()
            .and_then(|exp| (base as u128).checked_pow(exp))
            .and_then(|capacity| u64::try_from(capacity - 1).ok())
            .ok_or(CodecError::Capacity { base, length })?;

        Ok(Self {
            alphabet,
            length,
            max_value,
        })
    }

    /// Codec over the modern label alphabet.
    pub fn modern(length: usize) -> Result<Self, CodecError> {
        Self::with_alphabet(Alphabet::modern(), length)
    }

    /// Codec over the legacy label alphabet.
    pub fn legacy(length: usize) -> Result<Self, CodecError> {
        Self::with_alphabet(Alphabet::legacy(), length)
    }

    pub fn base(&self) -> usize {
        self.alphabet.base()
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Largest encodable value, `base^length - 1`.
    pub fn max_value(&self) -> u64 {
        self.max_value
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Encode `value`, left-padded with the lowest symbol.
    ///
    /// # Errors
    ///
    /// `CodecError::OutOfRange` if `value > max_value`.
    pub fn encode(&self, value: u64) -> Result<String, CodecError> {
        if value > self.max_value {
            return Err(CodecError::OutOfRange {
                value,
                max: self.max_value,
            });
        }

        let base = self.base() as u64;
        let symbols = self.alphabet.symbols();
        let mut digits = vec![self.alphabet.first(); self.length];
        let mut rest = value;
        for slot in digits.iter_mut().rev() {
            if rest == 0 {
                break;
            }
            *slot = symbols[(rest % base) as usize];
            rest /= base;
        }

        Ok(digits.into_iter().collect())
    }

    /// Decode a `length`-symbol string back to its integer.
    ///
    /// # Errors
    ///
    /// `CodecError::InvalidLength` for the wrong width and
    /// `CodecError::UnknownChar` for symbols outside the alphabet.
    pub fn decode(&self, value: &str) -> Result<u64, CodecError> {
        let actual = value.chars().count();
        if actual != self.length {
            return Err(CodecError::InvalidLength {
                expected: self.length,
                actual,
            });
        }

        let base = self.base() as u64;
        let pad = self.alphabet.first();
        value
            .trim_start_matches(pad)
            .chars()
            .try_fold(0u64, |acc, c| {
                let digit = self
                    .alphabet
                    .index_of(c)
                    .ok_or(CodecError::UnknownChar(c))?;
                Ok(acc * base + digit as u64)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_value_is_base_pow_length_minus_one() {
        assert_eq!(PaddedCodec::new("01", 3).unwrap().max_value(), 7);
        assert_eq!(PaddedCodec::modern(5).unwrap().max_value(), 64u64.pow(5) - 1);
        assert_eq!(PaddedCodec::legacy(2).unwrap().max_value(), 63 * 63 - 1);
    }

    #[test]
    fn zero_is_all_padding() {
        let codec = PaddedCodec::modern(5).unwrap();
        assert_eq!(codec.encode(0).unwrap(), "-----");
        assert_eq!(codec.decode("-----").unwrap(), 0);
    }

    #[test]
    fn encodes_binary() {
        let codec = PaddedCodec::new("01", 4).unwrap();
        assert_eq!(codec.encode(5).unwrap(), "0101");
        assert_eq!(codec.encode(15).unwrap(), "1111");
        assert_eq!(codec.decode("0110").unwrap(), 6);
    }

    #[test]
    fn rejects_out_of_range() {
        let codec = PaddedCodec::new("01", 2).unwrap();
        assert_eq!(
            codec.encode(4),
            Err(CodecError::OutOfRange { value: 4, max: 3 })
        );
    }

    #[test]
    fn rejects_wrong_length_and_unknown_chars() {
        let codec = PaddedCodec::new("abc", 3).unwrap();
        assert_eq!(
            codec.decode("ab"),
            Err(CodecError::InvalidLength {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(codec.decode("abz"), Err(CodecError::UnknownChar('z')));
    }

    #[test]
    fn rejects_bad_construction() {
        assert!(matches!(
            PaddedCodec::new("ba", 2),
            Err(CodecError::Alphabet(AlphabetError::Unsorted { .. }))
        ));
        assert!(matches!(
            PaddedCodec::new("aab", 2),
            Err(CodecError::Alphabet(AlphabetError::Duplicate('a')))
        ));
        assert_eq!(PaddedCodec::new("01", 0), Err(CodecError::ZeroLength));
        assert_eq!(
            PaddedCodec::new("01", 65),
            Err(CodecError::Capacity {
                base: 2,
                length: 65
            })
        );
        assert!(matches!(
            PaddedCodec::with_alphabet(Alphabet::new("zyx").unwrap(), 2),
            Err(CodecError::Alphabet(AlphabetError::Unsorted { .. }))
        ));
    }

    #[test]
    fn capacity_reaches_full_u64_range() {
        let binary = PaddedCodec::new("01", 64).unwrap();
        assert_eq!(binary.max_value(), u64::MAX);
        let top = binary.encode(u64::MAX).unwrap();
        assert_eq!(top, "1".repeat(64));
        assert_eq!(binary.decode(&top).unwrap(), u64::MAX);

        let hex = PaddedCodec::new("0123456789abcdef", 16).unwrap();
        assert_eq!(hex.max_value(), u64::MAX);
        assert_eq!(hex.encode(u64::MAX).unwrap(), "f".repeat(16));
        assert!(matches!(
            PaddedCodec::new("0123456789abcdef", 17),
            Err(CodecError::Capacity { .. })
        ));
    }

    #[test]
    fn exhaustive_small_domain() {
        let codec = PaddedCodec::new("abc", 3).unwrap();
        let mut prev: Option<String> = None;
        for v in 0..=codec.max_value() {
            let s = codec.encode(v).unwrap();
            assert_eq!(codec.decode(&s).unwrap(), v);
            if let Some(p) = prev {
                assert!(p < s);
            }
            prev = Some(s);
        }
    }
}
