use super::{CLOSE_CHAR, OPEN_CHAR, REPEAT_CHAR, decompress::DecompressError};
use std::str::CharIndices;

/// A single syntactic element of run notation
#[derive(Debug, PartialEq, Eq)]
pub enum Lexeme {
    /// A literal character
    Char(char),

    /// A complete `#<count>[` header
    Open { count: usize },

    /// A `]`
    Close { index: usize },
}

/// Splits run notation into [`Lexeme`]s
pub struct Lexer<'a> {
    chars: CharIndices<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.char_indices(),
        }
    }

    fn count(&mut self) -> Result<usize, DecompressError> {
        let mut count: Option<usize> = None;

        for (index, character) in self.chars.by_ref() {
            match character {
                OPEN_CHAR => return count.ok_or(DecompressError::MissingCount { index }),
                '0'..='9' => {
                    let digit = character as usize - '0' as usize;
                    count = count
                        .unwrap_or(0)
                        .checked_mul(10)
                        .and_then(|count| count.checked_add(digit))
                        .map(Some)
                        .ok_or(DecompressError::CountOverflow { index })?;
                }
                _ => return Err(DecompressError::InvalidCount { character, index }),
            }
        }

        Err(DecompressError::TruncatedCount)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Lexeme, DecompressError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, character) = self.chars.next()?;

        let lexeme = match character {
            REPEAT_CHAR => self.count().map(|count| Lexeme::Open { count }),
            CLOSE_CHAR => Ok(Lexeme::Close { index }),
            OPEN_CHAR => Err(DecompressError::UnexpectedOpen { index }),
            character => Ok(Lexeme::Char(character)),
        };

        Some(lexeme)
    }
}
