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

//! Functions and types for encoding bech32 strings.

use super::charset::{char_for_value, is_hrp_char};
use super::checksum::{self, Variant, CHECKSUM_LEN};
use super::{MAX_LEN, SEPARATOR, U5};

use core::fmt::{self, Display, Formatter, Write};
use core::iter::FusedIterator;

#[cfg(feature = "alloc")]
use alloc::string::String;

/// An error encountered while encoding.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodeError {
    /// The human-readable part was empty or contained a character outside
    /// ASCII 33 through 126.
    InvalidHrp,
    /// A data value was greater than 31.
    DataValueOutOfRange(u8),
    /// The encoded string would have had this many characters, more than
    /// [`EncodeConfig::max_len`].
    TooLong(usize),
}

/// Alias of <code>[Result]\<T, [EncodeError]></code>.
pub type EncodeResult<T> = Result<T, EncodeError>;

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHrp => write!(f, "invalid human-readable part"),
            Self::DataValueOutOfRange(_) => {
                write!(f, "data value is out of range")
            }
            Self::TooLong(n) => {
                write!(f, "encoded string is too long ({} characters)", n)
            }
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for EncodeError {}

/// Used by the `encode_*_with` functions to configure the encoding process.
#[non_exhaustive]
#[derive(Clone, Copy, Debug)]
pub struct EncodeConfig {
    /// The checksum variant. [default: [`Variant::Bech32m`]]
    pub variant: Variant,
    /// The maximum length of the encoded string. [default: [`MAX_LEN`]]
    pub max_len: usize,
}

impl EncodeConfig {
    /// Returns the default configuration.
    pub const fn new() -> Self {
        Self {
            variant: Variant::Bech32m,
            max_len: MAX_LEN,
        }
    }

    /// Returns the default configuration with a different variant.
    pub const fn with_variant(variant: Variant) -> Self {
        Self {
            variant,
            max_len: MAX_LEN,
        }
    }
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The length of the string that encoding `hrp` with `data_len` data values
/// produces.
pub fn encoded_len(hrp: &str, data_len: usize) -> usize {
    hrp.len()
        .saturating_add(SEPARATOR.len_utf8())
        .saturating_add(data_len)
        .saturating_add(CHECKSUM_LEN)
}

fn validate(
    hrp: &str,
    data: &[u8],
    config: EncodeConfig,
) -> EncodeResult<()> {
    if hrp.is_empty() || !hrp.chars().all(is_hrp_char) {
        return Err(EncodeError::InvalidHrp);
    }
    if let Some(&v) = data.iter().find(|&&v| v > U5::MAX) {
        return Err(EncodeError::DataValueOutOfRange(v));
    }
    let len = encoded_len(hrp, data.len());
    if len > config.max_len {
        return Err(EncodeError::TooLong(len));
    }
    Ok(())
}

/// Iterator returned by [`encode_to_chars`].
///
/// Also implements [`Display`], which writes the whole encoded string.
#[derive(Clone)]
pub struct EncodedChars<'a> {
    hrp: &'a [u8],
    data: &'a [u8],
    checksum: [U5; CHECKSUM_LEN],
    pos: usize,
}

impl<'a> EncodedChars<'a> {
    fn len_total(&self) -> usize {
        self.hrp.len() + 1 + self.data.len() + CHECKSUM_LEN
    }
}

impl<'a> Iterator for EncodedChars<'a> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        let hrp_len = self.hrp.len();
        let data_end = hrp_len + 1 + self.data.len();
        let c = match self.pos {
            i if i < hrp_len => char::from(self.hrp[i].to_ascii_lowercase()),
            i if i == hrp_len => SEPARATOR,
            i if i < data_end => {
                let v = self.data[i - hrp_len - 1];
                char_for_value(U5::masked(u32::from(v)))
            }
            i if i < self.len_total() => {
                char_for_value(self.checksum[i - data_end])
            }
            _ => return None,
        };
        self.pos += 1;
        Some(c)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len_total().saturating_sub(self.pos);
        (n, Some(n))
    }
}

impl<'a> ExactSizeIterator for EncodedChars<'a> {}

impl<'a> FusedIterator for EncodedChars<'a> {}

impl<'a> Display for EncodedChars<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.clone().try_for_each(|c| f.write_char(c))
    }
}

/// Encodes `data` (values 0 through 31) under `hrp` as a bech32m string.
///
/// The input is validated before anything is produced: the human-readable
/// part first, then the data values, then the total length.
pub fn encode_to_chars<'a>(
    hrp: &'a str,
    data: &'a [u8],
) -> EncodeResult<EncodedChars<'a>> {
    encode_to_chars_with(hrp, data, EncodeConfig::new())
}

/// Encodes `data` under `hrp` with the given config.
///
/// This function is like [`encode_to_chars`], but takes a configuration
/// object.
pub fn encode_to_chars_with<'a>(
    hrp: &'a str,
    data: &'a [u8],
    config: EncodeConfig,
) -> EncodeResult<EncodedChars<'a>> {
    validate(hrp, data, config)?;
    let values = data.iter().map(|&v| U5::masked(u32::from(v)));
    Ok(EncodedChars {
        hrp: hrp.as_bytes(),
        data,
        checksum: checksum::compute(hrp, values, config.variant),
        pos: 0,
    })
}

/// Encodes `data` under `hrp` with the given config and stores the result
/// in a [`String`].
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_to_string_with(
    hrp: &str,
    data: &[u8],
    config: EncodeConfig,
) -> EncodeResult<String> {
    encode_to_chars_with(hrp, data, config).map(|chars| chars.collect())
}

/// Encodes `data` (values 0 through 31) under `hrp` as a bech32m string.
///
/// ```
/// use bech32_core::{encode, EncodeError};
///
/// let s = encode("example", &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
/// assert_eq!(s.as_deref(), Ok("example1qpzry9x8ge8sqgv"));
///
/// let err = encode("example", &[0, 1, 2, 3, 4, 5, 6, 7, 33]).unwrap_err();
/// assert_eq!(err, EncodeError::DataValueOutOfRange(33));
/// assert_eq!(err.to_string(), "data value is out of range");
/// ```
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode(hrp: &str, data: &[u8]) -> EncodeResult<String> {
    encode_to_string_with(hrp, data, EncodeConfig::new())
}

/// Encodes `data` under `hrp` using the given checksum variant.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_with_variant(
    hrp: &str,
    data: &[u8],
    variant: Variant,
) -> EncodeResult<String> {
    encode_to_string_with(hrp, data, EncodeConfig::with_variant(variant))
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    const DATA: [u8; 9] = [0, 1, 2, 3, 4, 5, 6, 7, 8];

    #[test]
    fn known_answer() {
        assert_eq!(
            encode("example", &DATA).unwrap(),
            "example1qpzry9x8ge8sqgv",
        );
        assert_eq!(
            encode_with_variant("example", &DATA, Variant::Bech32).unwrap(),
            "example1qpzry9x8gvmqvdw",
        );
    }

    #[test]
    fn hrp_lowercased() {
        assert_eq!(
            encode("EXAMPLE", &DATA).unwrap(),
            "example1qpzry9x8ge8sqgv",
        );
    }

    #[test]
    fn iterator_matches_string() {
        let chars = encode_to_chars("example", &DATA).unwrap();
        assert_eq!(chars.len(), encoded_len("example", DATA.len()));
        assert_eq!(chars.to_string(), "example1qpzry9x8ge8sqgv");
        assert_eq!(chars.collect::<String>(), "example1qpzry9x8ge8sqgv");
    }

    #[test]
    fn invalid_hrp() {
        assert_eq!(encode("", &DATA), Err(EncodeError::InvalidHrp));
        assert_eq!(encode("a b", &DATA), Err(EncodeError::InvalidHrp));
        assert_eq!(encode("\x7f", &DATA), Err(EncodeError::InvalidHrp));
        assert_eq!(encode("é", &DATA), Err(EncodeError::InvalidHrp));
    }

    #[test]
    fn data_out_of_range() {
        let err = encode("example", &[0, 1, 2, 3, 4, 5, 6, 7, 33]);
        assert_eq!(err, Err(EncodeError::DataValueOutOfRange(33)));
        assert_eq!(err.unwrap_err().to_string(), "data value is out of range");
    }

    #[test]
    fn validation_order() {
        let long = [99; 100];
        assert_eq!(encode("", &long), Err(EncodeError::InvalidHrp));
        assert_eq!(
            encode("a", &long),
            Err(EncodeError::DataValueOutOfRange(99)),
        );
        assert_eq!(encode("a", &[0; 100]), Err(EncodeError::TooLong(108)));
    }

    #[test]
    fn length_limit() {
        assert_eq!(encode("a", &[0; 82]).unwrap().len(), MAX_LEN);
        assert_eq!(encode("a", &[0; 83]), Err(EncodeError::TooLong(91)));

        let config = EncodeConfig {
            max_len: 200,
            ..EncodeConfig::new()
        };
        let s = encode_to_string_with("a", &[0; 83], config).unwrap();
        assert_eq!(s.len(), 91);
    }

    #[test]
    fn empty_data() {
        assert_eq!(encode("a", &[]).unwrap(), "a1lqfn3a");
        assert_eq!(
            encode_with_variant("a", &[], Variant::Bech32).unwrap(),
            "a12uel5l",
        );
    }
}
