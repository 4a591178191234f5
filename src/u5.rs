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

use crate::encode::EncodeError;
use core::convert::TryFrom;
use core::fmt::{self, Display, Formatter};

/// A 5-bit value (0 through 31): one symbol of a bech32 data part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct U5(u8);

macro_rules! const_u5 {
    ($n:expr) => {{
        use crate::u5::U5;
        const VALUE: U5 = U5::__const($n);
        VALUE
    }};
}

impl U5 {
    /// The largest value a [`U5`] can hold.
    pub const MAX: u8 = 31;

    /// Returns [`None`] if `x` is greater than 31.
    pub fn new(x: u8) -> Option<Self> {
        (x <= Self::MAX).then(|| Self(x))
    }

    /// Keeps the low five bits of `x`.
    pub(crate) const fn masked(x: u32) -> Self {
        Self((x & 0x1f) as u8)
    }

    #[doc(hidden)]
    pub const fn __const(n: u8) -> Self {
        const BOUNDS_CHECK: [u8; 1] = [0];
        Self(n + BOUNDS_CHECK[(n > Self::MAX) as usize])
    }
}

impl From<U5> for u8 {
    fn from(v: U5) -> u8 {
        v.0
    }
}

impl From<U5> for u32 {
    fn from(v: U5) -> u32 {
        u32::from(v.0)
    }
}

impl TryFrom<u8> for U5 {
    type Error = EncodeError;

    fn try_from(x: u8) -> Result<Self, Self::Error> {
        Self::new(x).ok_or(EncodeError::DataValueOutOfRange(x))
    }
}

impl Display for U5 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_checks_range() {
        assert_eq!(U5::new(0).map(u8::from), Some(0));
        assert_eq!(U5::new(31).map(u8::from), Some(31));
        assert_eq!(U5::new(32), None);
        assert_eq!(U5::new(255), None);
    }

    #[test]
    fn try_from_reports_value() {
        assert_eq!(
            U5::try_from(33),
            Err(EncodeError::DataValueOutOfRange(33)),
        );
        assert_eq!(U5::try_from(7).map(u8::from), Ok(7));
    }

    #[test]
    fn masked_keeps_low_bits() {
        assert_eq!(u8::from(U5::masked(0x3f)), 31);
        assert_eq!(u8::from(U5::masked(0x20)), 0);
        assert_eq!(u8::from(const_u5!(12)), 12);
    }
}
