// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! This library provides an implementation of the RC6 block cipher algorithm
//!
//! RC6 was designed by Rivest, Robshaw, Sidney and Yin as an AES candidate. This crate
//! implements the RC6-32/20/16 variant: 32-bit words, 20 rounds and a 128-bit key, operating
//! on 128-bit blocks.
//!
//! Each block is handled as four little-endian words `A, B, C, D`. Every round mixes them with
//! the quadratic `x * (2x + 1)`, data-dependent rotations and two words of the expanded key
//! table. The key schedule expands the 16 byte key into 44 round keys once; an [RC6] value is
//! immutable afterwards and can be shared freely between threads.
//!
//! Only the raw block transform is provided. Modes of operation, padding and authentication
//! belong to the caller.
//!
//! ```
//! use rc6::{RC6, RC6Algo};
//!
//! let rc6 = RC6::new(b"0123456789abcdef").unwrap();
//! let mut block = *b"sixteen byte msg";
//! rc6.encrypt_in_place(&mut block);
//! assert_ne!(&block, b"sixteen byte msg");
//! rc6.decrypt_in_place(&mut block);
//! assert_eq!(&block, b"sixteen byte msg");
//! ```

mod algorithm;
mod chunker;
mod type_traits;

pub use crate::algorithm::*;
