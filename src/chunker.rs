// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! This module provides utilities for cyclically walking a borrowed slice in equal-sized chunks,
//! used by the key schedule to advance its two cursors over arrays of different lengths.

use std::cmp::min;

/// A borrowed slice that is handed out in chunks and wraps around when it reaches the end.
///
/// Each call to `next_chunk_mut()` yields the next `chunk_size` elements, continuing from the
/// start of the slice once the end is reached.
///
/// # Examples
///
/// ```ignore
/// let mut arr = [1, 2, 3];
/// let mut chunker = CircularArrayChunker::new(&mut arr, 2);
///
/// let chunk: Vec<i32> = chunker.next_chunk_mut().map(|a| *a).collect();
/// assert_eq!(chunk, [1, 2]);
///
/// let chunk: Vec<i32> = chunker.next_chunk_mut().map(|a| *a).collect();
/// assert_eq!(chunk, [3, 1]);
/// ```
pub struct CircularArrayChunker<'a, T> {
    arr: &'a mut [T],
    chunk_size: usize,
    offset: usize,
}

impl<'a, T> CircularArrayChunker<'a, T> {
    /// Wraps `arr`; the chunk size is capped at the slice length.
    pub fn new(arr: &'a mut [T], chunk_size: usize) -> CircularArrayChunker<'a, T> {
        let arr_len = arr.len();
        CircularArrayChunker {
            arr,
            chunk_size: min(chunk_size, arr_len),
            offset: 0,
        }
    }

    /// Returns an iterator to the next chunk of the slice.
    pub fn next_chunk_mut(&mut self) -> impl Iterator<Item = &mut T> {
        let len = self.arr.len();
        let (left, right) = self.arr.split_at_mut(self.offset);
        if len > 0 {
            self.offset = (self.offset + self.chunk_size) % len;
        }
        right.iter_mut().chain(left).take(self.chunk_size)
    }
}

/// Splits `size` into consecutive chunk lengths of `chunk_size`, the last one possibly shorter.
///
/// ```ignore
/// let sizes: Vec<usize> = chunk_size_iter(10, 3).collect();
/// assert_eq!(sizes, [3, 3, 3, 1]);
/// ```
pub fn chunk_size_iter(size: usize, chunk_size: usize) -> impl Iterator<Item = usize> {
    let mut remaining = size;

    std::iter::from_fn(move || {
        if chunk_size == 0 || remaining == 0 {
            None
        } else {
            let current_chunk_size = min(remaining, chunk_size);
            remaining -= current_chunk_size;
            Some(current_chunk_size)
        }
    })
}
