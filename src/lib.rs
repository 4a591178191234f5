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

//! Checksummed bech32 and bech32m strings.
//!
//! A bech32 string is a human-readable part (HRP), the separator `1`, a
//! data part made of 5-bit values written in a 32-character alphabet, and a
//! six-character checksum. Two checksum variants exist: the original
//! [`Bech32`](Variant::Bech32) from BIP-173 and [`Bech32m`](Variant::Bech32m)
//! from BIP-350. New strings are encoded as bech32m unless another variant
//! is requested.
//!
//! ```
//! # #[cfg(feature = "alloc")] {
//! use bech32_core::{decode, encode, Encoding};
//!
//! let s = encode("example", &[0, 1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
//! assert_eq!(s, "example1qpzry9x8ge8sqgv");
//!
//! let decoded = decode(&s);
//! assert_eq!(decoded.hrp, "example");
//! assert_eq!(decoded.data, [0, 1, 2, 3, 4, 5, 6, 7, 8]);
//! assert_eq!(decoded.encoding, Encoding::Bech32m);
//! # }
//! ```
//!
//! Without the `alloc` feature, [`encode_to_chars`] and [`decode_str`] work
//! on borrowed data and never allocate.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

#[macro_use]
mod u5;

pub mod charset;
pub mod checksum;
pub mod decode;
pub mod encode;
pub mod status;
pub mod strip;

#[cfg(feature = "alloc")]
extern crate alloc;

/// The character between the human-readable part and the data part.
pub const SEPARATOR: char = '1';

/// The maximum length of a bech32 string, in characters.
pub const MAX_LEN: usize = 90;

pub use u5::U5;

pub use checksum::Variant;
pub use status::Status;

pub use decode::decode_str;
pub use decode::decode_str_with;
pub use decode::{CheckedStr, DecodeConfig, DecodeError, Encoding};
#[cfg(feature = "alloc")]
pub use decode::{decode, decode_with, DecodedResult};

pub use encode::encode_to_chars;
pub use encode::{EncodeConfig, EncodeError};
#[cfg(feature = "alloc")]
pub use encode::{encode, encode_with_variant};

pub use strip::strip_unknown_chars_iter;
#[cfg(feature = "alloc")]
pub use strip::strip_unknown_chars;
