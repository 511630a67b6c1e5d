// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! Word level primitives used by the RC6 key schedule and round function: masked rotations,
//! the `x * (2x + 1)` quadratic and little-endian conversion between bytes and words.
//!

/// An unsigned machine word with wrapping arithmetic and rotations whose amount is reduced
/// modulo the word width.
pub trait Word:
    num_traits::Unsigned + num_traits::WrappingAdd + num_traits::WrappingMul + Copy
{
    /// Rotates left by `amount mod w` bits.
    fn rotl(self, amount: Self) -> Self;
    /// Rotates right by `amount mod w` bits.
    fn rotr(self, amount: Self) -> Self;

    /// Computes `x * (2x + 1) mod 2^w`.
    #[inline]
    fn quadratic(self) -> Self {
        let two_x_plus_one = self.wrapping_add(&self).wrapping_add(&Self::one());
        self.wrapping_mul(&two_x_plus_one)
    }
}

macro_rules! impl_word {
    ($($t:ty)*) => {
        $(
            impl Word for $t {
                #[inline]
                fn rotl(self, amount: $t) -> $t {
                    self.rotate_left(rotation_amount::<$t>(amount as u32))
                }

                #[inline]
                fn rotr(self, amount: $t) -> $t {
                    self.rotate_right(rotation_amount::<$t>(amount as u32))
                }
            }
        )*
    };
}

impl_word!(u32);

/// Keeps only the low `log2(w)` bits of a rotation amount.
fn rotation_amount<T>(x: u32) -> u32 {
    x % (std::mem::size_of::<T>() * 8) as u32
}

/// Decodes the first `N * 4` bytes as little-endian `u32` words.
///
/// Panics if `bytes` is shorter than `N * 4`.
#[track_caller]
pub fn load_words<const N: usize>(bytes: &[u8]) -> [u32; N] {
    let bytes = &bytes[..N * 4];
    std::array::from_fn(|i| {
        let mut word = [0; 4];
        word.copy_from_slice(&bytes[i * 4..i * 4 + 4]);
        u32::from_le_bytes(word)
    })
}

/// Encodes `words` as little-endian bytes into the front of `out`.
///
/// Panics if `out` is shorter than `words.len() * 4`.
#[track_caller]
pub fn store_words(words: &[u32], out: &mut [u8]) {
    let out = &mut out[..words.len() * 4];
    out.chunks_exact_mut(4)
        .zip(words)
        .for_each(|(chunk, word)| chunk.copy_from_slice(&word.to_le_bytes()));
}
