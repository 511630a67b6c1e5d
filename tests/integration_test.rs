// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rc6::*;
use std::sync::Arc;

fn random_key(rng: &mut impl RngCore) -> [u8; KEY_SIZE] {
    let mut key = [0; KEY_SIZE];
    rng.fill_bytes(&mut key);
    key
}

fn random_block(rng: &mut impl RngCore) -> [u8; BLOCK_SIZE] {
    let mut block = [0; BLOCK_SIZE];
    rng.fill_bytes(&mut block);
    block
}

fn bit_distance(a: &[u8], b: &[u8]) -> u32 {
    a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum()
}

fn round_keys_bit_distance(a: &RC6, b: &RC6) -> u32 {
    a.round_keys()
        .iter()
        .zip(b.round_keys())
        .map(|(x, y)| (x ^ y).count_ones())
        .sum()
}

#[test]
fn encrypt_decrypt_round_trip_random() {
    let mut rng = rand::thread_rng();
    for _ in 0..256 {
        let rc6 = RC6::new(&random_key(&mut rng)).unwrap();
        let pt = random_block(&mut rng);

        let ct = rc6.encrypt_block(&pt);
        assert_eq!(rc6.decrypt_block(&ct), pt);

        // decryption is a bijection too, so the reverse direction holds as well
        let dt = rc6.decrypt_block(&pt);
        assert_eq!(rc6.encrypt_block(&dt), pt);
    }
}

#[test]
fn encrypt_decrypt_full_message() {
    let rc6 = RC6::new(b"my secret key!!!").unwrap();

    let mut plaintext = b"hello there, this message spans a few blocks".to_vec();
    let padding_size = (BLOCK_SIZE - plaintext.len() % BLOCK_SIZE) % BLOCK_SIZE;
    plaintext.resize(plaintext.len() + padding_size, 0);

    let original = plaintext.clone();

    plaintext
        .chunks_exact_mut(BLOCK_SIZE)
        .for_each(|block| rc6.encrypt_in_place(block));

    assert_ne!(original, plaintext);

    plaintext
        .chunks_exact_mut(BLOCK_SIZE)
        .for_each(|block| rc6.decrypt_in_place(block));

    assert_eq!(original, plaintext);
}

#[test]
fn schedule_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(6);
    let key = random_key(&mut rng);
    let first = RC6::new(&key).unwrap();
    let second = RC6::new(&key).unwrap();

    assert_eq!(first.round_keys(), second.round_keys());
    assert_eq!(first.round_keys().len(), ROUND_KEY_COUNT);

    let pt = random_block(&mut rng);
    assert_eq!(first.encrypt_block(&pt), second.encrypt_block(&pt));
    assert_eq!(first.decrypt_block(&pt), second.decrypt_block(&pt));
}

#[test]
fn block_size_independent_of_key() {
    let mut rng = StdRng::seed_from_u64(16);
    for _ in 0..8 {
        let rc6: Box<dyn RC6Algo> = Box::new(RC6::new(&random_key(&mut rng)).unwrap());
        assert_eq!(rc6.block_size(), BLOCK_SIZE);
    }
}

#[test]
fn key_length_validation() {
    for len in (0..=40).filter(|&len| len != KEY_SIZE) {
        let key = vec![0xA5; len];
        assert_eq!(RC6::new(&key).unwrap_err(), RC6InitError::InvalidKeySize(len));
    }
    assert!(RC6::new(&[0xA5; KEY_SIZE]).is_ok());
}

#[test]
fn key_avalanche_on_round_keys() {
    let mut rng = StdRng::seed_from_u64(0x5c6);
    let total_bits = (ROUND_KEY_COUNT * 32) as f64;

    for _ in 0..16 {
        let key = random_key(&mut rng);
        let bit = rng.gen_range(0..KEY_SIZE * 8);
        let mut flipped = key;
        flipped[bit / 8] ^= 1 << (bit % 8);

        let a = RC6::new(&key).unwrap();
        let b = RC6::new(&flipped).unwrap();

        let ratio = round_keys_bit_distance(&a, &b) as f64 / total_bits;
        assert!((0.35..0.65).contains(&ratio), "ratio {ratio}");
    }
}

#[test]
fn key_avalanche_on_ciphertext() {
    let mut rng = StdRng::seed_from_u64(0xc1f);
    let trials = 128;
    let mut changed = 0;

    for _ in 0..trials {
        let key = random_key(&mut rng);
        let pt = random_block(&mut rng);
        let bit = rng.gen_range(0..KEY_SIZE * 8);
        let mut flipped = key;
        flipped[bit / 8] ^= 1 << (bit % 8);

        let a = RC6::new(&key).unwrap().encrypt_block(&pt);
        let b = RC6::new(&flipped).unwrap().encrypt_block(&pt);
        changed += bit_distance(&a, &b);
    }

    let ratio = changed as f64 / (trials * BLOCK_SIZE * 8) as f64;
    assert!((0.45..0.55).contains(&ratio), "ratio {ratio}");
}

#[test]
fn plaintext_avalanche() {
    let mut rng = StdRng::seed_from_u64(0xb10c);
    let rc6 = RC6::new(&random_key(&mut rng)).unwrap();
    let trials = 128;
    let mut changed = 0;

    for _ in 0..trials {
        let pt = random_block(&mut rng);
        let bit = rng.gen_range(0..BLOCK_SIZE * 8);
        let mut flipped = pt;
        flipped[bit / 8] ^= 1 << (bit % 8);

        changed += bit_distance(&rc6.encrypt_block(&pt), &rc6.encrypt_block(&flipped));
    }

    let ratio = changed as f64 / (trials * BLOCK_SIZE * 8) as f64;
    assert!((0.45..0.55).contains(&ratio), "ratio {ratio}");
}

#[test]
fn ciphertext_differs_from_plaintext() {
    let mut rng = StdRng::seed_from_u64(42);
    let trials = 64;
    let identical = (0..trials)
        .filter(|_| {
            let rc6 = RC6::new(&random_key(&mut rng)).unwrap();
            let pt = random_block(&mut rng);
            rc6.encrypt_block(&pt) == pt
        })
        .count();

    assert_eq!(identical, 0);
}

#[test]
fn dst_src_and_in_place_agree() {
    let mut rng = StdRng::seed_from_u64(7);
    let rc6 = RC6::new(&random_key(&mut rng)).unwrap();
    let pt = random_block(&mut rng);

    let mut dst = [0; BLOCK_SIZE];
    rc6.encrypt(&mut dst, &pt);

    let mut in_place = pt;
    rc6.encrypt_in_place(&mut in_place);

    assert_eq!(dst, in_place);
    assert_eq!(dst, rc6.encrypt_block(&pt));

    let mut words = [0u32; 4];
    for (word, chunk) in words.iter_mut().zip(pt.chunks_exact(4)) {
        *word = u32::from_le_bytes(chunk.try_into().unwrap());
    }
    rc6.encrypt_words(&mut words);
    let expected: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
    assert_eq!(dst[..], expected[..]);
}

#[test]
fn shared_across_threads() {
    let mut rng = StdRng::seed_from_u64(99);
    let rc6 = Arc::new(RC6::new(&random_key(&mut rng)).unwrap());
    let blocks: Vec<[u8; BLOCK_SIZE]> = (0..64).map(|_| random_block(&mut rng)).collect();
    let expected: Vec<[u8; BLOCK_SIZE]> = blocks.iter().map(|b| rc6.encrypt_block(b)).collect();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let rc6 = Arc::clone(&rc6);
            let blocks = &blocks;
            let expected = &expected;
            scope.spawn(move || {
                for (pt, ct) in blocks.iter().zip(expected) {
                    assert_eq!(&rc6.encrypt_block(pt), ct);
                    assert_eq!(&rc6.decrypt_block(ct), pt);
                }
            });
        }
    });
}
