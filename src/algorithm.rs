// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! The implementaton details of the RC6 block cipher algorithm
//!
use crate::chunker::*;
use crate::type_traits::*;
use std::cmp::max;
use std::cmp::min;
use std::fmt;

/// Number of rounds of the RC6-32/20/16 variant.
pub const ROUNDS: usize = 20;
/// Number of 32-bit words in the expanded key table, `2 * ROUNDS + 4`.
pub const ROUND_KEY_COUNT: usize = 2 * ROUNDS + 4;
/// Key length in bytes.
pub const KEY_SIZE: usize = 16;
/// Block length in bytes.
pub const BLOCK_SIZE: usize = 16;

/// `Odd((e - 2) * 2^32)`
pub const P32: u32 = 0xB7E1_5163;
/// `Odd((phi - 1) * 2^32)`
pub const Q32: u32 = 0x9E37_79B9;

const KEY_WORDS: usize = KEY_SIZE / 4;
const BLOCK_WORDS: usize = BLOCK_SIZE / 4;
// log2(32)
const LG_W: u32 = 5;

/// Initial contents of the expanded key table before the key is mixed in.
pub(crate) const S0: [u32; ROUND_KEY_COUNT] = magic_table();

const fn magic_table() -> [u32; ROUND_KEY_COUNT] {
    let mut s = [P32; ROUND_KEY_COUNT];
    let mut i = 1;
    while i < ROUND_KEY_COUNT {
        s[i] = s[i - 1].wrapping_add(Q32);
        i += 1;
    }
    s
}

/// The RC6 struct holds the expanded round keys of a single 128-bit key.
///
/// It is immutable once constructed, so one instance can be shared between threads and used
/// for any number of block operations.
#[derive(Clone)]
pub struct RC6 {
    round_keys: [u32; ROUND_KEY_COUNT],
}

impl RC6 {
    /// Creates a new RC6 instance by expanding the given 16 byte key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc6::{RC6, RC6InitError};
    ///
    /// let rc6 = RC6::new(&[0u8; 16]);
    /// assert!(rc6.is_ok());
    ///
    /// let rc6 = RC6::new(b"short key");
    /// assert!(matches!(rc6, Err(RC6InitError::InvalidKeySize(9))));
    /// ```
    pub fn new(key: &[u8]) -> Result<RC6, RC6InitError> {
        let key: &[u8; KEY_SIZE] = key.try_into().map_err(|_| {
            tracing::debug!(key_len = key.len(), "rejected rc6 key");
            RC6InitError::InvalidKeySize(key.len())
        })?;

        let l_arr = load_words::<KEY_WORDS>(key);
        let rc6 = RC6::mix_sl_arrays(S0, l_arr);
        tracing::debug!(rounds = ROUNDS, "rc6 key schedule expanded");

        Ok(rc6)
    }

    fn mix_sl_arrays(
        mut s_arr: [u32; ROUND_KEY_COUNT],
        mut l_arr: [u32; KEY_WORDS],
    ) -> RC6 {
        let total_count = 3 * max(s_arr.len(), l_arr.len());
        let chunk_size = min(s_arr.len(), l_arr.len());

        let mut s_chunker = CircularArrayChunker::new(&mut s_arr, chunk_size);
        let mut l_chunker = CircularArrayChunker::new(&mut l_arr, chunk_size);

        let mut a = 0u32;
        let mut b = 0u32;
        for current_chunk_size in chunk_size_iter(total_count, chunk_size) {
            std::iter::zip(s_chunker.next_chunk_mut(), l_chunker.next_chunk_mut())
                .take(current_chunk_size)
                .for_each(|(si, li)| {
                    // A = S[i] = (S[i] + A + B) <<< 3
                    *si = si.wrapping_add(a).wrapping_add(b).rotl(3);
                    a = *si;
                    // B = L[j] = (L[j] + A + B) <<< (A + B)
                    let ab = a.wrapping_add(b);
                    *li = li.wrapping_add(ab).rotl(ab);
                    b = *li;
                });
        }

        RC6 { round_keys: s_arr }
    }

    /// The expanded key table `S[0..44]`.
    pub fn round_keys(&self) -> &[u32; ROUND_KEY_COUNT] {
        &self.round_keys
    }

    /// Encrypts the four-word block `[A, B, C, D]` in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc6::{RC6, RC6InitError};
    ///
    /// # fn main() -> Result<(), RC6InitError> {
    /// let rc6 = RC6::new(&[0u8; 16])?;
    ///
    /// let mut words = [0u32; 4];
    /// rc6.encrypt_words(&mut words);
    ///
    /// assert_eq!(words, [0x36A5C38F, 0x78F7B156, 0x4EDF29C1, 0x1EA44898]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn encrypt_words(&self, words: &mut [u32; BLOCK_WORDS]) {
        let s = &self.round_keys;
        let [mut a, mut b, mut c, mut d] = *words;

        b = b.wrapping_add(s[0]);
        d = d.wrapping_add(s[1]);

        for pair in s[2..2 * ROUNDS + 2].chunks_exact(2) {
            // t = (B * (2B + 1)) <<< lg w, u = (D * (2D + 1)) <<< lg w
            let t = b.quadratic().rotl(LG_W);
            let u = d.quadratic().rotl(LG_W);
            // A = ((A ^ t) <<< u) + S[2i], C = ((C ^ u) <<< t) + S[2i + 1]
            a = (a ^ t).rotl(u).wrapping_add(pair[0]);
            c = (c ^ u).rotl(t).wrapping_add(pair[1]);
            (a, b, c, d) = (b, c, d, a);
        }

        a = a.wrapping_add(s[2 * ROUNDS + 2]);
        c = c.wrapping_add(s[2 * ROUNDS + 3]);

        *words = [a, b, c, d];
    }

    /// Decrypts the four-word block `[A, B, C, D]` in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc6::{RC6, RC6InitError};
    ///
    /// # fn main() -> Result<(), RC6InitError> {
    /// let rc6 = RC6::new(&[0u8; 16])?;
    ///
    /// let mut words = [0x36A5C38F, 0x78F7B156, 0x4EDF29C1, 0x1EA44898];
    /// rc6.decrypt_words(&mut words);
    ///
    /// assert_eq!(words, [0; 4]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn decrypt_words(&self, words: &mut [u32; BLOCK_WORDS]) {
        let s = &self.round_keys;
        let [mut a, mut b, mut c, mut d] = *words;

        c = c.wrapping_sub(s[2 * ROUNDS + 3]);
        a = a.wrapping_sub(s[2 * ROUNDS + 2]);

        for pair in s[2..2 * ROUNDS + 2].chunks_exact(2).rev() {
            (a, b, c, d) = (d, a, b, c);
            let u = d.quadratic().rotl(LG_W);
            let t = b.quadratic().rotl(LG_W);
            // C = ((C - S[2i + 1]) >>> t) ^ u, A = ((A - S[2i]) >>> u) ^ t
            c = c.wrapping_sub(pair[1]).rotr(t) ^ u;
            a = a.wrapping_sub(pair[0]).rotr(u) ^ t;
        }

        d = d.wrapping_sub(s[1]);
        b = b.wrapping_sub(s[0]);

        *words = [a, b, c, d];
    }

    /// Encrypts a 16 byte block and returns the ciphertext.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc6::{RC6, RC6InitError};
    ///
    /// # fn main() -> Result<(), RC6InitError> {
    /// let rc6 = RC6::new(&[0u8; 16])?;
    ///
    /// let ct = rc6.encrypt_block(&[0u8; 16]);
    /// assert_eq!(
    ///     ct,
    ///     [
    ///         0x8F, 0xC3, 0xA5, 0x36, 0x56, 0xB1, 0xF7, 0x78, 0xC1, 0x29, 0xDF, 0x4E, 0x98, 0x48,
    ///         0xA4, 0x1E
    ///     ]
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn encrypt_block(&self, block: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut out = *block;
        self.encrypt_block_in_place(&mut out);
        out
    }

    /// Decrypts a 16 byte block and returns the plaintext.
    pub fn decrypt_block(&self, block: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut out = *block;
        self.decrypt_block_in_place(&mut out);
        out
    }

    /// Encrypts a 16 byte block, overwriting it with the ciphertext.
    pub fn encrypt_block_in_place(&self, block: &mut [u8; BLOCK_SIZE]) {
        RC6Algo::encrypt_in_place(self, block);
    }

    /// Decrypts a 16 byte block, overwriting it with the plaintext.
    pub fn decrypt_block_in_place(&self, block: &mut [u8; BLOCK_SIZE]) {
        RC6Algo::decrypt_in_place(self, block);
    }
}

impl fmt::Debug for RC6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RC6 {{ rounds: {ROUNDS}, .. }}")
    }
}

/// The `RC6AlgoError` enum represents the possible errors that can occur during the
/// checked encryption decryption in [RC6Algo].
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RC6AlgoError {
    #[error("invalid buffer size `{0}`; buffer is shorter than one block")]
    InvalidBlockSize(usize),
}

/// The `RC6InitError` enum represents the possible errors that can occur during the
/// [RC6] initialization
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RC6InitError {
    #[error("invalid key size: `{0}`; RC6 requires a 16 byte key")]
    InvalidKeySize(usize),
}

/// The `RC6Algo` trait is the slice based block cipher interface handed to modes of operation.
///
/// Only the first [BLOCK_SIZE] bytes of every buffer are read or written. Buffers shorter than
/// that are a caller bug; the unchecked methods panic on them, the `try_` methods report
/// [RC6AlgoError::InvalidBlockSize] instead.
pub trait RC6Algo {
    /// The block size in bytes, always 16.
    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// Encrypts the first block of `src` into the first block of `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst` or `src` is shorter than [BLOCK_SIZE].
    fn encrypt(&self, dst: &mut [u8], src: &[u8]);

    /// Decrypts the first block of `src` into the first block of `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst` or `src` is shorter than [BLOCK_SIZE].
    fn decrypt(&self, dst: &mut [u8], src: &[u8]);

    /// Encrypts the first block of `block` in place.
    ///
    /// # Panics
    ///
    /// Panics if `block` is shorter than [BLOCK_SIZE].
    fn encrypt_in_place(&self, block: &mut [u8]) {
        let src = copy_block(block);
        self.encrypt(block, &src);
    }

    /// Decrypts the first block of `block` in place.
    ///
    /// # Panics
    ///
    /// Panics if `block` is shorter than [BLOCK_SIZE].
    fn decrypt_in_place(&self, block: &mut [u8]) {
        let src = copy_block(block);
        self.decrypt(block, &src);
    }

    /// Checked [RC6Algo::encrypt].
    ///
    /// # Examples
    ///
    /// ```
    /// use rc6::{RC6, RC6Algo, RC6AlgoError};
    ///
    /// let rc6 = RC6::new(&[0u8; 16]).unwrap();
    /// let mut dst = [0u8; 16];
    /// let res = rc6.try_encrypt(&mut dst, &[0u8; 8]);
    /// assert_eq!(res, Err(RC6AlgoError::InvalidBlockSize(8)));
    /// ```
    fn try_encrypt(&self, dst: &mut [u8], src: &[u8]) -> Result<(), RC6AlgoError> {
        check_block_len(dst)?;
        check_block_len(src)?;
        self.encrypt(dst, src);
        Ok(())
    }

    /// Checked [RC6Algo::decrypt].
    fn try_decrypt(&self, dst: &mut [u8], src: &[u8]) -> Result<(), RC6AlgoError> {
        check_block_len(dst)?;
        check_block_len(src)?;
        self.decrypt(dst, src);
        Ok(())
    }
}

impl RC6Algo for RC6 {
    fn encrypt(&self, dst: &mut [u8], src: &[u8]) {
        let mut words = load_words::<BLOCK_WORDS>(src);
        self.encrypt_words(&mut words);
        store_words(&words, dst);
    }

    fn decrypt(&self, dst: &mut [u8], src: &[u8]) {
        let mut words = load_words::<BLOCK_WORDS>(src);
        self.decrypt_words(&mut words);
        store_words(&words, dst);
    }
}

#[track_caller]
fn copy_block(bytes: &[u8]) -> [u8; BLOCK_SIZE] {
    let mut block = [0; BLOCK_SIZE];
    block.copy_from_slice(&bytes[..BLOCK_SIZE]);
    block
}

fn check_block_len(bytes: &[u8]) -> Result<(), RC6AlgoError> {
    if bytes.len() < BLOCK_SIZE {
        tracing::trace!(len = bytes.len(), "rc6 buffer shorter than a block");
        return Err(RC6AlgoError::InvalidBlockSize(bytes.len()));
    }
    Ok(())
}
