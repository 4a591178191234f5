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

//! The BCH checksum shared by bech32 and bech32m.

use crate::U5;

use core::fmt::{self, Display, Formatter};
use core::iter::{self, FusedIterator};

/// The number of checksum characters at the end of every bech32 string.
pub const CHECKSUM_LEN: usize = 6;

const GENERATOR: [u32; 5] =
    [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

/// A checksum variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// The original checksum (BIP-173).
    Bech32,
    /// The modified checksum (BIP-350).
    Bech32m,
}

impl Variant {
    /// Variants in the order a decoder tries them.
    pub const ALL: [Self; 2] = [Self::Bech32m, Self::Bech32];

    /// The value a valid string's residue must equal.
    pub const fn constant(self) -> u32 {
        match self {
            Self::Bech32 => 1,
            Self::Bech32m => 0x2bc830a3,
        }
    }

    /// Returns the variant whose constant is `residue`, if any.
    pub fn from_residue(residue: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.constant() == residue)
    }
}

impl Default for Variant {
    fn default() -> Self {
        Self::Bech32m
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bech32 => "bech32",
            Self::Bech32m => "bech32m",
        })
    }
}

/// Iterator returned by [`hrp_expand`].
#[derive(Clone)]
pub struct HrpExpand<'a> {
    hrp: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for HrpExpand<'a> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.hrp.len();
        let item = match self.pos {
            i if i < len => self.hrp[i].to_ascii_lowercase() >> 5,
            i if i == len => 0,
            i if i <= len * 2 => {
                self.hrp[i - len - 1].to_ascii_lowercase() & 0x1f
            }
            _ => return None,
        };
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.hrp.len() * 2 + 1).saturating_sub(self.pos);
        (n, Some(n))
    }
}

impl<'a> ExactSizeIterator for HrpExpand<'a> {}

impl<'a> FusedIterator for HrpExpand<'a> {}

/// Expands a human-readable part into checksum input: the high three bits
/// of each character, a zero, then the low five bits of each character.
///
/// Characters are lowercased first, so either case expands the same way.
pub fn hrp_expand(hrp: &str) -> HrpExpand<'_> {
    HrpExpand {
        hrp: hrp.as_bytes(),
        pos: 0,
    }
}

/// Runs the BCH polynomial reduction over `values`, starting from 1.
pub fn polymod<I>(values: I) -> u32
where
    I: IntoIterator<Item = u8>,
{
    values.into_iter().fold(1, |chk, v| {
        let top = chk >> 25;
        let chk = ((chk & 0x1ffffff) << 5) ^ u32::from(v);
        GENERATOR
            .iter()
            .enumerate()
            .filter(|&(i, _)| (top >> i) & 1 == 1)
            .fold(chk, |chk, (_, g)| chk ^ g)
    })
}

fn residue<I>(hrp: &str, data: I) -> u32
where
    I: IntoIterator<Item = U5>,
{
    polymod(hrp_expand(hrp).chain(data.into_iter().map(u8::from)))
}

/// Computes the checksum of `hrp` and `data` for the given variant.
pub fn compute<I>(hrp: &str, data: I, variant: Variant) -> [U5; CHECKSUM_LEN]
where
    I: IntoIterator<Item = U5>,
{
    let padding = iter::repeat(const_u5!(0)).take(CHECKSUM_LEN);
    let residue = residue(hrp, data.into_iter().chain(padding));
    let sum = residue ^ variant.constant();

    let mut checksum = [const_u5!(0); CHECKSUM_LEN];
    checksum.iter_mut().rev().enumerate().for_each(|(i, v)| {
        *v = U5::masked(sum >> (5 * i));
    });
    checksum
}

/// Checks `data`, whose last six values are its checksum, against the
/// given variant.
pub fn verify<I>(hrp: &str, data: I, variant: Variant) -> bool
where
    I: IntoIterator<Item = U5>,
{
    residue(hrp, data) == variant.constant()
}

/// Returns the variant whose checksum `data` carries, if any.
pub fn detect<I>(hrp: &str, data: I) -> Option<Variant>
where
    I: IntoIterator<Item = U5>,
{
    Variant::from_residue(residue(hrp, data))
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::charset::char_for_value;

    fn values(v: &[u8]) -> impl Iterator<Item = U5> + Clone + '_ {
        v.iter().map(|&x| U5::new(x).unwrap())
    }

    fn as_string(sum: [U5; CHECKSUM_LEN]) -> String {
        sum.iter().copied().map(char_for_value).collect()
    }

    #[test]
    fn expand() {
        let expanded: Vec<u8> = hrp_expand("bc").collect();
        assert_eq!(expanded, [3, 3, 0, 2, 3]);
        assert_eq!(hrp_expand("BC").collect::<Vec<_>>(), expanded);
        assert_eq!(hrp_expand("bc").len(), 5);
        assert_eq!(hrp_expand("").collect::<Vec<_>>(), [0]);
    }

    #[test]
    fn known_checksums() {
        let data = [0, 1, 2, 3, 4, 5, 6, 7, 8];
        let m = compute("example", values(&data), Variant::Bech32m);
        assert_eq!(as_string(m), "e8sqgv");
        let b = compute("example", values(&data), Variant::Bech32);
        assert_eq!(as_string(b), "vmqvdw");
    }

    #[test]
    fn verify_matches_compute() {
        let data = [31, 0, 15, 9, 22];
        for variant in Variant::ALL {
            let sum = compute("hrp", values(&data), variant);
            let full = values(&data).chain(sum.iter().copied());
            assert!(verify("hrp", full.clone(), variant));
            assert_eq!(detect("hrp", full.clone()), Some(variant));
            assert_eq!(detect("HRP", full), Some(variant));
        }
    }

    #[test]
    fn variants_never_both_match() {
        let sum = compute("a", values(&[]), Variant::Bech32);
        assert!(verify("a", sum.iter().copied(), Variant::Bech32));
        assert!(!verify("a", sum.iter().copied(), Variant::Bech32m));
    }

    #[test]
    fn residue_lookup() {
        assert_eq!(Variant::from_residue(1), Some(Variant::Bech32));
        assert_eq!(Variant::from_residue(0x2bc830a3), Some(Variant::Bech32m));
        assert_eq!(Variant::from_residue(0), None);
        assert_eq!(Variant::default(), Variant::Bech32m);
        assert_eq!(Variant::Bech32m.to_string(), "bech32m");
    }
}
