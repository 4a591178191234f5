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

//! The 32-character bech32 alphabet.

use crate::U5;
use core::convert::TryFrom;

/// The bech32 alphabet, indexed by 5-bit value.
pub const CHARSET: [u8; 32] = *b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

const NONE: u8 = 0xff;

// Maps ASCII (either case) to its 5-bit value, or `NONE`.
const REV_CHARSET: [u8; 128] = {
    let mut rev = [NONE; 128];
    let mut i = 0;
    while i < CHARSET.len() {
        let c = CHARSET[i];
        rev[c as usize] = i as u8;
        rev[c.to_ascii_uppercase() as usize] = i as u8;
        i += 1;
    }
    rev
};

/// Returns the (lowercase) character that encodes `v`.
pub fn char_for_value(v: U5) -> char {
    char::from(CHARSET[usize::from(u8::from(v))])
}

/// Returns the value encoded by `c`, accepting either case.
///
/// Returns [`None`] if `c` is not in the alphabet.
pub fn value_for_char(c: char) -> Option<U5> {
    let i = usize::try_from(u32::from(c)).ok()?;
    match REV_CHARSET.get(i) {
        Some(&NONE) | None => None,
        Some(&v) => Some(U5::masked(u32::from(v))),
    }
}

pub(crate) fn value_for_byte(b: u8) -> Option<U5> {
    value_for_char(char::from(b))
}

/// Whether `c` may appear in a human-readable part (ASCII 33 through 126).
pub fn is_hrp_char(c: char) -> bool {
    matches!(c, '!'..='~')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_roundtrip() {
        for v in 0..=U5::MAX {
            let v = U5::new(v).unwrap();
            let c = char_for_value(v);
            assert!(c.is_ascii_lowercase() || c.is_ascii_digit());
            assert_eq!(value_for_char(c), Some(v));
            assert_eq!(value_for_char(c.to_ascii_uppercase()), Some(v));
        }
    }

    #[test]
    fn excluded_chars() {
        for c in ['1', 'b', 'i', 'o', 'B', 'I', 'O', ' ', '-', 'é', '\0'] {
            assert_eq!(value_for_char(c), None, "{:?}", c);
        }
    }

    #[test]
    fn hrp_chars() {
        assert!(is_hrp_char('!'));
        assert!(is_hrp_char('~'));
        assert!(is_hrp_char('1'));
        assert!(!is_hrp_char(' '));
        assert!(!is_hrp_char('\x7f'));
        assert!(!is_hrp_char('é'));
    }
}
