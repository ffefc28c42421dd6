//! Substitution of frequent symbol n-grams by single marker characters
//!
//! Packed pattern data is full of the same few short sequences (empty rows mostly), which
//! the run compressor can't touch because they don't repeat back-to-back. Replacing each of
//! them by a one-character marker before run compression shortens the text considerably.

use crate::{alphabet, rle::RESERVED};
use thiserror::Error;

/// An ordered list of `(pattern, marker)` substitutions
///
/// Patterns are replaced in order, so earlier entries take precedence over later ones.
/// Markers are never part of the [`alphabet`], which guarantees that [`Dictionary::expand`]
/// exactly undoes [`Dictionary::substitute`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: Vec<(String, char)>,
}

impl Dictionary {
    /// Construct a dictionary, validating every entry
    pub fn new<I, S>(entries: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = (S, char)>,
        S: Into<String>,
    {
        let mut dictionary = Self::default();
        for (pattern, marker) in entries {
            dictionary.push(pattern, marker)?;
        }
        Ok(dictionary)
    }

    /// The substitutions that work well on converted pattern rows
    pub fn patterns() -> Self {
        Self {
            entries: [("AAAI", '@'), ("IAA", '$'), ("IAQh", '%'), ("Ago", '^')]
                .into_iter()
                .map(|(pattern, marker)| (pattern.to_owned(), marker))
                .collect(),
        }
    }

    /// Append a substitution at the lowest precedence
    pub fn push<S>(&mut self, pattern: S, marker: char) -> Result<(), DictionaryError>
    where
        S: Into<String>,
    {
        let pattern = pattern.into();

        if pattern.is_empty() {
            return Err(DictionaryError::EmptyPattern { marker });
        }

        if let Some(character) = pattern.chars().find(|c| !alphabet::contains(*c)) {
            return Err(DictionaryError::InvalidPatternCharacter { character, pattern });
        }

        if !marker.is_ascii_graphic() || alphabet::contains(marker) || RESERVED.contains(&marker) {
            return Err(DictionaryError::InvalidMarker { marker });
        }

        if self.entries.iter().any(|(_, existing)| *existing == marker) {
            return Err(DictionaryError::DuplicateMarker { marker });
        }

        self.entries.push((pattern, marker));
        Ok(())
    }

    /// The substitutions, in order of precedence
    pub fn entries(&self) -> impl Iterator<Item = (&str, char)> {
        self.entries
            .iter()
            .map(|(pattern, marker)| (pattern.as_str(), *marker))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every pattern by its marker
    pub fn substitute(&self, symbols: &str) -> String {
        let mut text = symbols.to_owned();
        for (pattern, marker) in &self.entries {
            let mut buffer = [0; 4];
            text = text.replace(pattern.as_str(), marker.encode_utf8(&mut buffer));
        }
        text
    }

    /// Replace every marker by its pattern
    pub fn expand(&self, text: &str) -> String {
        if self.entries.is_empty() {
            return text.to_owned();
        }

        let mut symbols = String::with_capacity(text.len());
        for character in text.chars() {
            match self.entries.iter().find(|(_, marker)| *marker == character) {
                Some((pattern, _)) => symbols.push_str(pattern),
                None => symbols.push(character),
            }
        }
        symbols
    }
}

/// Errors that might be returned when constructing a [`Dictionary`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DictionaryError {
    /// Substituting an empty pattern is meaningless
    #[error("The pattern for marker {marker:?} is empty")]
    EmptyPattern { marker: char },

    /// Patterns can only consist of alphabet symbols
    #[error("Pattern {pattern:?} contains {character:?}, which is not an alphabet symbol")]
    InvalidPatternCharacter { character: char, pattern: String },

    /// Markers must be printable ASCII outside of the alphabet and the run notation
    #[error("{marker:?} can't be used as a marker")]
    InvalidMarker { marker: char },

    /// Every marker can only stand for one pattern
    #[error("Marker {marker:?} is used more than once")]
    DuplicateMarker { marker: char },
}
