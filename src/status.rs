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

//! Integer status codes for callers that cannot use [`Result`].

use crate::decode::DecodeError;
use crate::encode::EncodeError;

use core::fmt::{self, Display, Formatter};

/// The outcome of an encode or decode operation as a plain integer code.
///
/// `Success` is zero and every failure is negative, so the value can cross
/// an FFI boundary as an `i32`.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Success = 0,
    UnknownError = -1,
    DataValueOutOfRange = -2,
    InvalidHrp = -3,
    TooLong = -4,
    InvalidCharacter = -5,
    MissingSeparator = -6,
    TooShortDataPart = -7,
    InvalidChecksum = -8,
    InvalidCase = -9,
}

impl Status {
    const ALL: [Self; 10] = [
        Self::Success,
        Self::UnknownError,
        Self::DataValueOutOfRange,
        Self::InvalidHrp,
        Self::TooLong,
        Self::InvalidCharacter,
        Self::MissingSeparator,
        Self::TooShortDataPart,
        Self::InvalidChecksum,
        Self::InvalidCase,
    ];

    /// The integer code.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Returns the status with the given code, if there is one.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.code() == code)
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    /// Returns [`Success`](Self::Success) for `Ok`, or the status matching
    /// the error.
    pub fn of<T, E>(result: &Result<T, E>) -> Self
    where
        E: Copy + Into<Self>,
    {
        result.as_ref().map_or_else(|&e| e.into(), |_| Self::Success)
    }

    /// A short description of the status.
    pub fn message(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::UnknownError => "unknown error",
            Self::DataValueOutOfRange => "data value is out of range",
            Self::InvalidHrp => "invalid human-readable part",
            Self::TooLong => "string is too long",
            Self::InvalidCharacter => "invalid data character",
            Self::MissingSeparator => "missing separator",
            Self::TooShortDataPart => "data part is too short",
            Self::InvalidChecksum => "invalid checksum",
            Self::InvalidCase => "mixed-case string",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<EncodeError> for Status {
    fn from(e: EncodeError) -> Self {
        match e {
            EncodeError::InvalidHrp => Self::InvalidHrp,
            EncodeError::DataValueOutOfRange(_) => Self::DataValueOutOfRange,
            EncodeError::TooLong(_) => Self::TooLong,
        }
    }
}

impl From<DecodeError> for Status {
    fn from(e: DecodeError) -> Self {
        match e {
            DecodeError::TooLong(_) => Self::TooLong,
            DecodeError::InvalidCase => Self::InvalidCase,
            DecodeError::MissingSeparator => Self::MissingSeparator,
            DecodeError::InvalidHrp => Self::InvalidHrp,
            DecodeError::TooShortDataPart => Self::TooShortDataPart,
            DecodeError::InvalidCharacter(_) => Self::InvalidCharacter,
            DecodeError::InvalidChecksum => Self::InvalidChecksum,
        }
    }
}
