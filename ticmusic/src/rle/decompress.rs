use super::{
    MAX_EXPANDED_LEN,
    lexer::{Lexeme, Lexer},
};
use thiserror::Error;

/// Expand run notation back into plain symbol text
///
/// The expansion runs on a stack of buffers: every `#<count>[` pushes a fresh buffer, literal
/// characters are appended to the topmost buffer and every `]` pops it, appending its contents
/// `count` times to the buffer below. Text that would grow past [`MAX_EXPANDED_LEN`] is
/// rejected before anything is allocated for it.
///
/// ```
/// # use ticmusic::rle::decompress;
/// assert_eq!(decompress("AB#3[C]D").unwrap(), "ABCCCD");
/// ```
pub fn decompress(text: &str) -> Result<String, DecompressError> {
    let mut root = String::with_capacity(text.len());
    let mut frames: Vec<Frame> = Vec::new();

    for lexeme in Lexer::new(text) {
        match lexeme? {
            Lexeme::Char(character) => top(&mut root, &mut frames).push(character),
            Lexeme::Open { count } => frames.push(Frame {
                count,
                buffer: String::new(),
            }),
            Lexeme::Close { index } => {
                let frame = frames
                    .pop()
                    .ok_or(DecompressError::UnexpectedClose { index })?;

                let below = top(&mut root, &mut frames);
                frame
                    .buffer
                    .len()
                    .checked_mul(frame.count)
                    .and_then(|len| len.checked_add(below.len()))
                    .filter(|len| *len <= MAX_EXPANDED_LEN)
                    .ok_or(DecompressError::TooLarge { index })?;

                below.push_str(&frame.buffer.repeat(frame.count));
            }
        }
    }

    if !frames.is_empty() {
        return Err(DecompressError::Unclosed {
            depth: frames.len(),
        });
    }

    Ok(root)
}

struct Frame {
    count: usize,
    buffer: String,
}

fn top<'a>(root: &'a mut String, frames: &'a mut [Frame]) -> &'a mut String {
    match frames.last_mut() {
        Some(frame) => &mut frame.buffer,
        None => root,
    }
}

/// Errors that might be returned from [`decompress()`] and [`parse()`](super::parse)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecompressError {
    /// A `]` was found without a matching `#<count>[`
    #[error("Unexpected ']' at position {index}")]
    UnexpectedClose { index: usize },

    /// A `[` was found outside of a repeat header
    #[error("Unexpected '[' at position {index}")]
    UnexpectedOpen { index: usize },

    /// The text ended while repeats were still open
    #[error("{depth} repeat(s) were never closed")]
    Unclosed { depth: usize },

    /// A repeat header contains something other than digits
    #[error("Character {character:?} at position {index} is not a digit")]
    InvalidCount { character: char, index: usize },

    /// A repeat header has no digits at all
    #[error("The repeat ending at position {index} has no count")]
    MissingCount { index: usize },

    /// A repeat count doesn't fit in memory
    #[error("The repeat count at position {index} is too large")]
    CountOverflow { index: usize },

    /// The text ended in the middle of a repeat header
    #[error("The text ended inside a repeat count")]
    TruncatedCount,

    /// A repeat expands into more text than [`MAX_EXPANDED_LEN`]
    #[error("The repeat closed at position {index} expands to more than {MAX_EXPANDED_LEN} bytes")]
    TooLarge { index: usize },
}
