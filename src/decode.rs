/*
 * Copyright (C) 2022 taylor.fish <contact@taylor.fish>
 *
 * This file is part of bech32-core.
 *
 * bech32-core is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * bech32-core is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with bech32-core. If not, see <https://www.gnu.org/licenses/>.
 */

//! Functions and types for decoding bech32 strings.

use super::charset::{is_hrp_char, value_for_byte, value_for_char};
use super::checksum::{self, Variant, CHECKSUM_LEN};
use super::{MAX_LEN, SEPARATOR, U5};

use core::fmt::{self, Display, Formatter};
use core::iter::FusedIterator;
use core::str::Bytes;

#[cfg(feature = "alloc")]
use super::encode::{encode_with_variant, EncodeResult};
#[cfg(feature = "alloc")]
use super::strip::strip_unknown_chars;
#[cfg(feature = "alloc")]
use alloc::{string::String, vec::Vec};

/// An error encountered while decoding a bech32 string.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The input had this many characters, more than
    /// [`DecodeConfig::max_len`].
    TooLong(usize),
    /// The input mixed uppercase and lowercase characters.
    InvalidCase,
    /// The input contained no separator (`1`).
    MissingSeparator,
    /// The human-readable part was empty or contained a character outside
    /// ASCII 33 through 126.
    InvalidHrp,
    /// Fewer than six characters followed the separator.
    TooShortDataPart,
    /// A character after the separator was not in the bech32 alphabet.
    InvalidCharacter(char),
    /// The checksum matched neither variant.
    InvalidChecksum,
}

/// Alias of <code>[Result]\<T, [DecodeError]></code>.
pub type DecodeResult<T> = Result<T, DecodeError>;

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong(n) => {
                write!(f, "string is too long ({} characters)", n)
            }
            Self::InvalidCase => write!(f, "mixed-case string"),
            Self::MissingSeparator => {
                write!(f, "missing separator ({})", SEPARATOR)
            }
            Self::InvalidHrp => write!(f, "invalid human-readable part"),
            Self::TooShortDataPart => write!(f, "data part is too short"),
            Self::InvalidCharacter(c) => {
                write!(f, "invalid data character: {:?}", c)
            }
            Self::InvalidChecksum => write!(f, "invalid checksum"),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for DecodeError {}

/// The checksum variant a decoded string carried, or [`Invalid`] if it
/// could not be decoded.
///
/// [`Invalid`]: Encoding::Invalid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    Bech32,
    Bech32m,
    Invalid,
}

impl Encoding {
    /// Returns the variant, or [`None`] for [`Encoding::Invalid`].
    pub fn variant(self) -> Option<Variant> {
        match self {
            Self::Bech32 => Some(Variant::Bech32),
            Self::Bech32m => Some(Variant::Bech32m),
            Self::Invalid => None,
        }
    }
}

impl From<Variant> for Encoding {
    fn from(v: Variant) -> Self {
        match v {
            Variant::Bech32 => Self::Bech32,
            Variant::Bech32m => Self::Bech32m,
        }
    }
}

impl From<Option<Variant>> for Encoding {
    fn from(v: Option<Variant>) -> Self {
        v.map_or(Self::Invalid, Self::from)
    }
}

/// Used by the `decode_*_with` functions to configure the decoding process.
#[non_exhaustive]
#[derive(Clone, Copy, Debug)]
pub struct DecodeConfig {
    /// The maximum length of the input. [default: [`MAX_LEN`]]
    pub max_len: usize,
    /// Whether to run [`strip_unknown_chars`] on the input first. Only
    /// [`decode_with`] and [`try_decode_with`] honor this, since
    /// [`decode_str_with`] borrows its input unchanged. [default: false]
    ///
    /// [`strip_unknown_chars`]: crate::strip::strip_unknown_chars
    pub strip_unknown: bool,
}

impl DecodeConfig {
    /// Returns the default configuration.
    pub const fn new() -> Self {
        Self {
            max_len: MAX_LEN,
            strip_unknown: false,
        }
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A string whose checksum has been verified.
///
/// Returned by [`decode_str`]. Borrows the input, so no allocation is
/// needed.
#[derive(Clone, Copy, Debug)]
pub struct CheckedStr<'a> {
    hrp: &'a str,
    data: &'a str,
    variant: Variant,
}

impl<'a> CheckedStr<'a> {
    /// The human-readable part, in the case it was written.
    pub fn hrp(&self) -> &'a str {
        self.hrp
    }

    /// The human-readable part, lowercased.
    pub fn hrp_lowercase(&self) -> impl Iterator<Item = char> + 'a {
        self.hrp.chars().map(|c| c.to_ascii_lowercase())
    }

    /// The checksum variant the string carried.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The number of data values, not counting the checksum.
    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    /// The data values (0 through 31), not counting the checksum.
    pub fn data(&self) -> DataValues<'a> {
        DataValues(self.data.bytes())
    }

    /// Copies the human-readable part and data into a [`DecodedResult`].
    #[cfg(feature = "alloc")]
    #[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
    pub fn to_decoded(&self) -> DecodedResult {
        DecodedResult {
            hrp: self.hrp_lowercase().collect(),
            data: self.data().collect(),
            encoding: self.variant.into(),
        }
    }
}

/// Iterator returned by [`CheckedStr::data`].
#[derive(Clone)]
pub struct DataValues<'a>(Bytes<'a>);

impl<'a> Iterator for DataValues<'a> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        // Every byte was checked against the alphabet by `decode_str_with`.
        self.0.next().and_then(value_for_byte).map(u8::from)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> ExactSizeIterator for DataValues<'a> {}

impl<'a> FusedIterator for DataValues<'a> {}

fn is_mixed_case(s: &str) -> bool {
    let mut lower = false;
    let mut upper = false;
    s.bytes().any(|b| {
        lower |= b.is_ascii_lowercase();
        upper |= b.is_ascii_uppercase();
        lower && upper
    })
}

fn symbols(s: &str) -> impl Iterator<Item = U5> + '_ {
    s.bytes().filter_map(value_for_byte)
}

/// Decodes and verifies a bech32 or bech32m string.
///
/// ```
/// use bech32_core::{decode_str, DecodeError, Variant};
///
/// let checked = decode_str("example1qpzry9x8ge8sqgv").unwrap();
/// assert_eq!(checked.hrp(), "example");
/// assert_eq!(checked.variant(), Variant::Bech32m);
/// assert!(checked.data().eq(0..9u8));
///
/// let err = decode_str("example1qpzxy9x8ge8sqgv").unwrap_err();
/// assert_eq!(err, DecodeError::InvalidChecksum);
/// ```
pub fn decode_str(s: &str) -> DecodeResult<CheckedStr<'_>> {
    decode_str_with(s, DecodeConfig::new())
}

/// Decodes and verifies a bech32 or bech32m string with the given config.
///
/// This function is like [`decode_str`], but takes a configuration object.
/// [`DecodeConfig::strip_unknown`] is ignored.
pub fn decode_str_with(
    s: &str,
    config: DecodeConfig,
) -> DecodeResult<CheckedStr<'_>> {
    if s.len() > config.max_len {
        return Err(DecodeError::TooLong(s.len()));
    }
    if is_mixed_case(s) {
        return Err(DecodeError::InvalidCase);
    }

    let sep = s.rfind(SEPARATOR).ok_or(DecodeError::MissingSeparator)?;
    let (hrp, rest) = (&s[..sep], &s[sep + SEPARATOR.len_utf8()..]);
    if hrp.is_empty() || !hrp.chars().all(is_hrp_char) {
        return Err(DecodeError::InvalidHrp);
    }
    if rest.len() < CHECKSUM_LEN {
        return Err(DecodeError::TooShortDataPart);
    }
    if let Some(c) = rest.chars().find(|&c| value_for_char(c).is_none()) {
        return Err(DecodeError::InvalidCharacter(c));
    }

    let variant = checksum::detect(hrp, symbols(rest))
        .ok_or(DecodeError::InvalidChecksum)?;
    log::trace!("{:?} has a valid {} checksum", s, variant);
    Ok(CheckedStr {
        hrp,
        data: &rest[..rest.len() - CHECKSUM_LEN],
        variant,
    })
}

/// The owned result of [`decode`].
///
/// On failure, `hrp` and `data` are empty and `encoding` is
/// [`Encoding::Invalid`].
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedResult {
    /// The human-readable part, lowercased.
    pub hrp: String,
    /// The data values (0 through 31), without the checksum.
    pub data: Vec<u8>,
    pub encoding: Encoding,
}

#[cfg(feature = "alloc")]
impl DecodedResult {
    /// The result of a failed decode.
    pub fn invalid() -> Self {
        Self {
            hrp: String::new(),
            data: Vec::new(),
            encoding: Encoding::Invalid,
        }
    }

    /// Whether decoding succeeded.
    pub fn is_valid(&self) -> bool {
        self.encoding != Encoding::Invalid
    }

    /// Encodes `hrp` and `data` again with the same checksum variant.
    ///
    /// An invalid result has an empty human-readable part, so this fails
    /// with [`EncodeError::InvalidHrp`](crate::EncodeError::InvalidHrp).
    pub fn encode(&self) -> EncodeResult<String> {
        let variant = self.encoding.variant().unwrap_or_default();
        encode_with_variant(&self.hrp, &self.data, variant)
    }
}

/// Decodes a string into an owned [`DecodedResult`] with the given config,
/// reporting why decoding failed.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn try_decode_with(
    s: &str,
    config: DecodeConfig,
) -> DecodeResult<DecodedResult> {
    if config.strip_unknown {
        let cleaned = strip_unknown_chars(s);
        decode_str_with(&cleaned, config).map(|c| c.to_decoded())
    } else {
        decode_str_with(s, config).map(|c| c.to_decoded())
    }
}

/// Decodes a string, reporting failure as [`Encoding::Invalid`].
///
/// Malformed input is expected here, so this never fails: the returned
/// value has an empty human-readable part and data instead. Use
/// [`decode_str`] or [`try_decode_with`] to learn why a string was
/// rejected.
///
/// ```
/// use bech32_core::{decode, Encoding};
///
/// let result = decode("example1qpzry9x8ge8sqgq");
/// assert_eq!(result.encoding, Encoding::Invalid);
/// assert!(result.hrp.is_empty() && result.data.is_empty());
/// ```
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode(s: &str) -> DecodedResult {
    decode_with(s, DecodeConfig::new())
}

/// Like [`decode`], but takes a configuration object.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_with(s: &str, config: DecodeConfig) -> DecodedResult {
    try_decode_with(s, config).unwrap_or_else(|e| {
        log::debug!("could not decode {:?}: {}", s, e);
        DecodedResult::invalid()
    })
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    const VALID: &str = "example1qpzry9x8ge8sqgv";

    fn corrupt(s: &str, i: usize, c: char) -> String {
        s.char_indices()
            .map(|(j, old)| if i == j { c } else { old })
            .collect()
    }

    #[test]
    fn known_answer() {
        let checked = decode_str(VALID).unwrap();
        assert_eq!(checked.hrp(), "example");
        assert_eq!(checked.variant(), Variant::Bech32m);
        assert_eq!(checked.data_len(), 9);
        assert!(checked.data().eq(0..9u8));

        let decoded = decode(VALID);
        assert_eq!(decoded.hrp, "example");
        assert_eq!(decoded.data, [0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(decoded.encoding, Encoding::Bech32m);
        assert!(decoded.is_valid());
        assert_eq!(decoded.encode().unwrap(), VALID);
    }

    #[test]
    fn legacy_variant() {
        let decoded = decode("example1qpzry9x8gvmqvdw");
        assert_eq!(decoded.encoding, Encoding::Bech32);
        assert_eq!(decoded.encode().unwrap(), "example1qpzry9x8gvmqvdw");
    }

    #[test]
    fn corrupt_data() {
        let s = corrupt(VALID, 10, 'x');
        assert_eq!(decode_str(&s).unwrap_err(), DecodeError::InvalidChecksum);
        assert_eq!(decode(&s), DecodedResult::invalid());
    }

    #[test]
    fn corrupt_checksum() {
        let s = corrupt(VALID, 19, 'q');
        assert_eq!(decode_str(&s).unwrap_err(), DecodeError::InvalidChecksum);
        assert_eq!(decode(&s), DecodedResult::invalid());
    }

    #[test]
    fn uppercase() {
        let upper = VALID.to_ascii_uppercase();
        let checked = decode_str(&upper).unwrap();
        assert_eq!(checked.hrp(), "EXAMPLE");
        assert_eq!(decode(&upper), decode(VALID));
    }

    #[test]
    fn mixed_case() {
        assert_eq!(
            decode_str("Example1qpzry9x8ge8sqgv").unwrap_err(),
            DecodeError::InvalidCase,
        );
        assert_eq!(
            decode_str("example1qpzry9x8ge8sqgV").unwrap_err(),
            DecodeError::InvalidCase,
        );
    }

    #[test]
    fn structural_errors() {
        assert_eq!(
            decode_str("pzry9x0s0muk").unwrap_err(),
            DecodeError::MissingSeparator,
        );
        assert_eq!(
            decode_str("1pzry9x0s0muk").unwrap_err(),
            DecodeError::InvalidHrp,
        );
        assert_eq!(
            decode_str(" 1qpzry9x").unwrap_err(),
            DecodeError::InvalidHrp,
        );
        assert_eq!(
            decode_str("li1dgmt3").unwrap_err(),
            DecodeError::TooShortDataPart,
        );
        assert_eq!(
            decode_str("x1b4n0q5v").unwrap_err(),
            DecodeError::InvalidCharacter('b'),
        );
        assert_eq!(decode_str("").unwrap_err(), DecodeError::MissingSeparator);
    }

    #[test]
    fn length_limit() {
        let s = format!("11{}c8247j", "q".repeat(82));
        assert_eq!(s.len(), MAX_LEN);
        assert_eq!(decode_str(&s).unwrap().variant(), Variant::Bech32);

        let s = format!("11{}c8247j", "q".repeat(83));
        assert_eq!(decode_str(&s).unwrap_err(), DecodeError::TooLong(91));

        let config = DecodeConfig {
            max_len: 91,
            ..DecodeConfig::new()
        };
        assert_eq!(
            decode_str_with(&s, config).unwrap_err(),
            DecodeError::InvalidChecksum,
        );
    }

    #[test]
    fn strip_before_decoding() {
        let dirty = " example1:qpz!r--y9#x8&%&%ge-8-sqgv ";
        assert_eq!(decode(dirty), DecodedResult::invalid());

        let config = DecodeConfig {
            strip_unknown: true,
            ..DecodeConfig::new()
        };
        let decoded = decode_with(dirty, config);
        assert_eq!(decoded.encoding, Encoding::Bech32m);
        assert_eq!(decoded.encode().unwrap(), VALID);
    }

    #[test]
    fn invalid_does_not_reencode() {
        assert_eq!(
            DecodedResult::invalid().encode(),
            Err(crate::EncodeError::InvalidHrp),
        );
    }

    #[test]
    fn encoding_conversions() {
        assert_eq!(Encoding::from(Variant::Bech32), Encoding::Bech32);
        assert_eq!(Encoding::from(None), Encoding::Invalid);
        assert_eq!(Encoding::Bech32m.variant(), Some(Variant::Bech32m));
        assert_eq!(Encoding::Invalid.variant(), None);
    }
}
