use super::{
    CLOSE_CHAR, MAX_EXPANDED_LEN, OPEN_CHAR, REPEAT_CHAR,
    decompress::DecompressError,
    lexer::{Lexeme, Lexer},
};
use std::fmt;

/// A node in the structure of run notation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunToken {
    /// Characters that are copied as they are
    Literal(String),

    /// `base`, concatenated `count` times
    Repeat { count: usize, base: Vec<RunToken> },
}

impl RunToken {
    /// The plain text this token stands for
    ///
    /// Returns `None` if the text would be longer than [`MAX_EXPANDED_LEN`].
    pub fn expand(&self) -> Option<String> {
        let len = self.expanded_len().filter(|len| *len <= MAX_EXPANDED_LEN)?;

        let mut out = String::with_capacity(len);
        self.expand_into(&mut out);
        Some(out)
    }

    fn expand_into(&self, out: &mut String) {
        match self {
            Self::Literal(text) => out.push_str(text),
            Self::Repeat { count, base } => {
                let mut once = String::new();
                for token in base {
                    token.expand_into(&mut once);
                }
                out.push_str(&once.repeat(*count));
            }
        }
    }

    /// The length in bytes of the plain text this token stands for, or `None` on overflow
    pub fn expanded_len(&self) -> Option<usize> {
        match self {
            Self::Literal(text) => Some(text.len()),
            Self::Repeat { count, base } => base
                .iter()
                .try_fold(0_usize, |sum, token| sum.checked_add(token.expanded_len()?))?
                .checked_mul(*count),
        }
    }

    /// How deeply repeats are nested within this token
    pub fn depth(&self) -> usize {
        match self {
            Self::Literal(_) => 0,
            Self::Repeat { base, .. } => {
                1 + base.iter().map(RunToken::depth).max().unwrap_or_default()
            }
        }
    }
}

impl fmt::Display for RunToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Literal(text) => write!(f, "{text}"),
            Self::Repeat { count, base } => {
                write!(f, "{REPEAT_CHAR}{count}{OPEN_CHAR}")?;
                for token in base {
                    write!(f, "{token}")?;
                }
                write!(f, "{CLOSE_CHAR}")
            }
        }
    }
}

/// Parse run notation into its token structure
///
/// Consecutive literal characters are merged into a single [`RunToken::Literal`].
pub fn parse(text: &str) -> Result<Vec<RunToken>, DecompressError> {
    let mut root = Vec::new();
    let mut frames: Vec<(usize, Vec<RunToken>)> = Vec::new();

    for lexeme in Lexer::new(text) {
        match lexeme? {
            Lexeme::Char(character) => {
                let tokens = match frames.last_mut() {
                    Some((_, tokens)) => tokens,
                    None => &mut root,
                };

                match tokens.last_mut() {
                    Some(RunToken::Literal(literal)) => literal.push(character),
                    _ => tokens.push(RunToken::Literal(character.to_string())),
                }
            }
            Lexeme::Open { count } => frames.push((count, Vec::new())),
            Lexeme::Close { index } => {
                let (count, base) = frames
                    .pop()
                    .ok_or(DecompressError::UnexpectedClose { index })?;

                let tokens = match frames.last_mut() {
                    Some((_, tokens)) => tokens,
                    None => &mut root,
                };
                let token = RunToken::Repeat { count, base };
                if token.expanded_len().is_none_or(|len| len > MAX_EXPANDED_LEN) {
                    return Err(DecompressError::TooLarge { index });
                }

                tokens.push(token);
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
