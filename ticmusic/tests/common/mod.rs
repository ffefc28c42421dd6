#![allow(dead_code)]

use rand::{Rng, SeedableRng, rngs::SmallRng};
use ticmusic::alphabet::ALPHABET;

/// A seeded generator, so failures can be reproduced
pub fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

pub fn bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = rng(seed);
    (0..len).map(|_| rng.r#gen::<u8>()).collect()
}

/// Symbols drawn from only the first `variety` characters of the alphabet
pub fn symbols(seed: u64, len: usize, variety: u8) -> String {
    let mut rng = rng(seed);
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..variety) as usize] as char)
        .collect()
}

/// A 192-byte block shaped like tracker pattern data: 64 rows of 3 bytes, mostly empty,
/// with a note every `step` rows
pub fn pattern_block(step: usize, note: u8) -> Vec<u8> {
    (0..64)
        .flat_map(|row| {
            if row % step == 0 {
                [note.wrapping_add((row / step % 3) as u8), 0x11, 0x02]
            } else {
                [0, 0, 0]
            }
        })
        .collect()
}
