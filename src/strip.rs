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

//! Removing characters that can never appear in a bech32 string.

use crate::charset::{is_hrp_char, value_for_char};
use crate::SEPARATOR;

use core::iter::FusedIterator;
use core::str::CharIndices;

#[cfg(feature = "alloc")]
use alloc::string::String;

/// Iterator returned by [`strip_unknown_chars_iter`].
#[derive(Clone)]
pub struct StripUnknown<'a> {
    chars: CharIndices<'a>,
    separator: Option<usize>,
}

impl<'a> StripUnknown<'a> {
    fn keep(&self, i: usize, c: char) -> bool {
        match self.separator {
            Some(sep) if i > sep => value_for_char(c).is_some(),
            Some(sep) if i == sep => true,
            _ => is_hrp_char(c),
        }
    }
}

impl<'a> Iterator for StripUnknown<'a> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((i, c)) = self.chars.next() {
            if self.keep(i, c) {
                return Some(c);
            }
            log::trace!("stripping {:?} at byte {}", c, i);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.chars.size_hint().1)
    }
}

impl<'a> FusedIterator for StripUnknown<'a> {}

/// Drops every character of `s` that cannot be part of a bech32 string.
///
/// Before the last separator, any printable ASCII character is kept, since
/// it could belong to the human-readable part. After it, only characters
/// from the bech32 alphabet (in either case) are kept. A string with no
/// separator is filtered as if it were all human-readable part.
///
/// This is a cleanup pass, not validation: the result may still fail to
/// decode.
pub fn strip_unknown_chars_iter(s: &str) -> StripUnknown<'_> {
    StripUnknown {
        chars: s.char_indices(),
        separator: s.rfind(SEPARATOR),
    }
}

/// Like [`strip_unknown_chars_iter`], but collects into a [`String`].
///
/// ```
/// use bech32_core::strip_unknown_chars;
///
/// let dirty = " example1:qpz!r--y9#x8&%&%ge-8-sqgv ";
/// assert_eq!(strip_unknown_chars(dirty), "example1qpzry9x8ge8sqgv");
/// ```
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn strip_unknown_chars(s: &str) -> String {
    strip_unknown_chars_iter(s).collect()
}
