use super::{CLOSE_CHAR, OPEN_CHAR, RESERVED, REPEAT_CHAR};
use log::{trace, warn};
use thiserror::Error;

/// Compress symbol text with the default [`RunCompressor`]
pub fn compress(symbols: &str) -> Result<String, CompressError> {
    RunCompressor::default().compress(symbols)
}

/// Greedy, exhaustive search for repeated substrings
///
/// Every round scans all `(length, offset)` pairs, longest bases first, for a base that is
/// immediately followed by at least one more copy of itself. The candidate that saves the
/// most characters replaces its run by `#<count>[<base>]`, after which the search starts
/// over on the new text (and may well wrap runs of notation in new repeats). The search
/// ends when no candidate saves enough.
///
/// A base is skipped when:
///
///  * it is itself periodic (`ABAB`), because its period will be found instead
///  * the block right before it is identical, because then it's the tail of a longer run
///  * it would split or unbalance existing notation
///
/// The result never grows: the text is returned as-is if nothing can be gained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCompressor {
    min_saving: usize,
    max_rounds: usize,
}

impl RunCompressor {
    /// A replacement has to save at least this many characters to be applied
    pub const DEFAULT_MIN_SAVING: usize = 6;

    /// The number of replacements after which the search gives up
    pub const DEFAULT_MAX_ROUNDS: usize = 4096;

    pub fn new() -> Self {
        Self {
            min_saving: Self::DEFAULT_MIN_SAVING,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
        }
    }

    /// Change the minimal number of characters a replacement has to save
    pub fn with_min_saving(mut self, min_saving: usize) -> Self {
        self.min_saving = min_saving.max(1);
        self
    }

    /// Bound the number of replacements
    ///
    /// When the budget runs out, the best text found so far is returned.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn min_saving(&self) -> usize {
        self.min_saving
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// Compress symbol text into run notation
    ///
    /// Fails if the text contains characters that can't be told apart from notation.
    pub fn compress(&self, symbols: &str) -> Result<String, CompressError> {
        for (index, character) in symbols.chars().enumerate() {
            if RESERVED.contains(&character) {
                return Err(CompressError::ReservedCharacter { character, index });
            }
            if !character.is_ascii() {
                return Err(CompressError::NonAscii { character, index });
            }
        }

        let mut text = symbols.as_bytes().to_vec();
        let mut rounds = 0;

        while let Some(candidate) = self.best_candidate(&text) {
            if rounds == self.max_rounds {
                warn!(
                    "Gave up on run compression after {rounds} rounds ({} -> {} chars)",
                    symbols.len(),
                    text.len()
                );
                break;
            }

            text = candidate.apply(&text);
            rounds += 1;

            trace!(
                "Round {rounds}: {} copies of a {}-char base at {} save {} chars",
                candidate.count,
                candidate.length,
                candidate.offset,
                candidate.saving
            );
        }

        Ok(text.into_iter().map(char::from).collect())
    }

    fn best_candidate(&self, text: &[u8]) -> Option<Candidate> {
        let boundaries = token_boundaries(text);
        let mut best: Option<Candidate> = None;

        for length in (1..=text.len() / 2).rev() {
            for offset in 0..=text.len() - 2 * length {
                let base = &text[offset..offset + length];

                if is_periodic(base) {
                    continue;
                }

                if offset >= length && &text[offset - length..offset] == base {
                    continue;
                }

                let count = count_copies(text, offset, length);
                if count < 2 {
                    continue;
                }

                let Some(saving) = chars_saved(length, count) else {
                    continue;
                };

                if saving < self.min_saving || best.as_ref().is_some_and(|b| saving <= b.saving) {
                    continue;
                }

                if !boundaries[offset]
                    || !boundaries[offset + length * count]
                    || !is_well_formed(base)
                {
                    continue;
                }

                best = Some(Candidate {
                    offset,
                    length,
                    count,
                    saving,
                });
            }
        }

        best
    }
}

impl Default for RunCompressor {
    fn default() -> Self {
        Self::new()
    }
}

/// A run of `count` copies of `text[offset..offset + length]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    offset: usize,
    length: usize,
    count: usize,
    saving: usize,
}

impl Candidate {
    fn apply(&self, text: &[u8]) -> Vec<u8> {
        let end = self.offset + self.length * self.count;
        let base = &text[self.offset..self.offset + self.length];

        let mut result = Vec::with_capacity(text.len() - self.saving);
        result.extend_from_slice(&text[..self.offset]);
        result.push(REPEAT_CHAR as u8);
        result.extend_from_slice(self.count.to_string().as_bytes());
        result.push(OPEN_CHAR as u8);
        result.extend_from_slice(base);
        result.push(CLOSE_CHAR as u8);
        result.extend_from_slice(&text[end..]);
        result
    }
}

/// How many characters replacing `count` copies of a base saves, if any
fn chars_saved(length: usize, count: usize) -> Option<usize> {
    let digits = count.to_string().len();
    let notation = length + digits + 3;
    (length * count).checked_sub(notation)
}

/// The number of back-to-back copies of `text[offset..offset + length]`
fn count_copies(text: &[u8], offset: usize, length: usize) -> usize {
    let base = &text[offset..offset + length];
    text[offset..]
        .chunks_exact(length)
        .take_while(|block| *block == base)
        .count()
}

/// Does the base consist of a shorter prefix repeated?
///
/// Only prefixes of two characters or more are considered; `AAA` is not periodic in this
/// sense, while `ABAB` and `AAAA` are.
fn is_periodic(base: &[u8]) -> bool {
    (2..=base.len() / 2).any(|period| {
        base.len() % period == 0
            && base
                .chunks_exact(period)
                .all(|chunk| chunk == &base[..period])
    })
}

/// Can the base be wrapped in a repeat on its own?
///
/// Every `#<count>[` needs its `]`, and a header can't be cut in half.
fn is_well_formed(base: &[u8]) -> bool {
    let mut depth = 0_usize;
    let mut in_header = false;

    for &byte in base {
        match byte {
            byte if byte == OPEN_CHAR as u8 => {
                if !in_header {
                    return false;
                }
                in_header = false;
                depth += 1;
            }
            byte if byte == CLOSE_CHAR as u8 => {
                if in_header || depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            byte if byte == REPEAT_CHAR as u8 => in_header = true,
            _ => {}
        }
    }

    !in_header && depth == 0
}

/// Which positions in the text don't fall inside a `#<count>[` header
///
/// The returned vector has one more entry than the text, for the position past its end.
fn token_boundaries(text: &[u8]) -> Vec<bool> {
    let mut boundaries = vec![true; text.len() + 1];
    let mut in_header = false;

    for (index, &byte) in text.iter().enumerate() {
        if in_header {
            boundaries[index] = false;
            if byte == OPEN_CHAR as u8 {
                in_header = false;
            }
        } else if byte == REPEAT_CHAR as u8 {
            in_header = true;
        }
    }

    boundaries
}

/// Errors that might be returned from [`RunCompressor::compress()`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompressError {
    /// The text contains a character that is part of the run notation
    #[error("Reserved character {character:?} found at position {index}")]
    ReservedCharacter { character: char, index: usize },

    /// The text contains a character outside of ASCII
    #[error("Non-ASCII character {character:?} found at position {index}")]
    NonAscii { character: char, index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rle::decompress;

    #[test]
    fn two_block_unit() {
        let text = "AAAAAABBBBBBAAAAAABBBBBBAAAAAABBBBBB";
        let compressed = compress(text).unwrap();
        assert_eq!(compressed, "#3[AAAAAABBBBBB]");
        assert_eq!(decompress(&compressed).unwrap(), text);
    }

    #[test]
    fn nothing_to_gain() {
        assert_eq!(compress("").unwrap(), "");
        assert_eq!(compress("A").unwrap(), "A");
        assert_eq!(compress("ABCDEFGHIJ").unwrap(), "ABCDEFGHIJ");

        // Saves exactly 5 characters, which isn't enough
        assert_eq!(
            compress("ABCDEFGHIABCDEFGHI").unwrap(),
            "ABCDEFGHIABCDEFGHI"
        );
    }

    #[test]
    fn just_enough() {
        assert_eq!(
            compress("ABCDEFGHIJABCDEFGHIJ").unwrap(),
            "#2[ABCDEFGHIJ]"
        );

        // 12 chars into "#2[ABCDEF]" saves 2, 18 chars into "#3[ABCDEF]" saves 8
        assert_eq!(compress("ABCDEFABCDEF").unwrap(), "ABCDEFABCDEF");
        assert_eq!(compress("ABCDEFABCDEFABCDEF").unwrap(), "#3[ABCDEF]");
    }

    #[test]
    fn single_character_runs() {
        let text = "A".repeat(30);
        let compressed = compress(&text).unwrap();
        assert_eq!(compressed, "#30[A]");
        assert_eq!(decompress(&compressed).unwrap(), text);
    }

    #[test]
    fn surrounded() {
        let text = format!("XY{}Z", "QRS".repeat(6));
        let compressed = compress(&text).unwrap();
        assert_eq!(compressed, "XY#6[QRS]Z");
        assert_eq!(decompress(&compressed).unwrap(), text);
    }

    #[test]
    fn nests() {
        let unit = format!("HELLO{}", "ab".repeat(8));
        let text = unit.repeat(4);
        let compressed = compress(&text).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), text);
        assert!(compressed.len() <= "#4[HELLO#8[ab]]".len());
    }

    #[test]
    fn reserved() {
        assert_eq!(
            compress("AB[C"),
            Err(CompressError::ReservedCharacter {
                character: '[',
                index: 2
            })
        );
        assert_eq!(
            compress("ABé"),
            Err(CompressError::NonAscii {
                character: 'é',
                index: 2
            })
        );
    }

    #[test]
    fn budget() {
        let text = "QRS".repeat(10);
        let compressor = RunCompressor::new().with_max_rounds(0);
        assert_eq!(compressor.compress(&text).unwrap(), text);
    }

    #[test]
    fn periodic() {
        assert!(is_periodic(b"ABAB"));
        assert!(is_periodic(b"AAAA"));
        assert!(is_periodic(b"ABCABC"));
        assert!(!is_periodic(b"AAA"));
        assert!(!is_periodic(b"AAAAA"));
        assert!(!is_periodic(b"ABCAB"));
    }

    #[test]
    fn well_formed() {
        assert!(is_well_formed(b"AB"));
        assert!(is_well_formed(b"#3[AB]C"));
        assert!(!is_well_formed(b"3[AB]#"));
        assert!(!is_well_formed(b"AB]C"));
        assert!(!is_well_formed(b"#3[AB"));
    }

    #[test]
    fn boundaries() {
        assert_eq!(
            token_boundaries(b"A#12[B]"),
            [true, true, false, false, false, true, true, true]
        );
    }

    #[test]
    fn never_grows() {
        for seed in 0..64_usize {
            let text: String = (0..48)
                .map(|i| b"ABCD"[(i * seed / 7 + i % (seed % 5 + 1)) % 4] as char)
                .collect();
            let compressed = compress(&text).unwrap();
            assert!(compressed.len() <= text.len());
            assert_eq!(decompress(&compressed).unwrap(), text);
        }
    }
}
