use std::{
    borrow::Borrow,
    collections::{BTreeMap, HashMap},
    fmt,
};

/// A code word: a string of bits, in the order they are written
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a bit in front of the code
    pub fn prepend(&mut self, bit: bool) {
        self.0.insert(0, bit);
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Is this code a prefix of (or equal to) another code?
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl Borrow<[bool]> for Code {
    fn borrow(&self) -> &[bool] {
        &self.0
    }
}

impl From<&str> for Code {
    /// Parse a string of `0`'s and `1`'s, ignoring anything else
    fn from(bits: &str) -> Self {
        Self(
            bits.chars()
                .filter_map(|c| match c {
                    '0' => Some(false),
                    '1' => Some(true),
                    _ => None,
                })
                .collect(),
        )
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for bit in &self.0 {
            write!(f, "{}", u8::from(*bit))?;
        }
        Ok(())
    }
}

/// The code word for every byte value in a tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    pub(crate) fn from_codes(codes: BTreeMap<u8, Code>) -> Self {
        Self { codes }
    }

    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.codes.get(&byte)
    }

    /// Iterate over `(byte, code)` pairs, ordered by byte
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> {
        self.codes.iter().map(|(byte, code)| (*byte, code))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Is no code a prefix of another code?
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }

    /// The number of bits needed to encode a text
    pub fn encoded_bits(&self, data: &[u8]) -> Option<usize> {
        data.iter().map(|byte| self.get(*byte).map(Code::len)).sum()
    }

    /// Flip the table around for decoding
    pub fn inverse(&self) -> InverseCodeTable {
        InverseCodeTable {
            bytes: self
                .codes
                .iter()
                .map(|(byte, code)| (code.clone(), *byte))
                .collect(),
            max_len: self.codes.values().map(Code::len).max().unwrap_or_default(),
        }
    }
}

/// The byte value for every code word in a tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InverseCodeTable {
    bytes: HashMap<Code, u8>,
    max_len: usize,
}

impl InverseCodeTable {
    /// The byte a string of bits decodes to, if it's a complete code word
    pub fn get(&self, bits: &[bool]) -> Option<u8> {
        self.bytes.get(bits).copied()
    }

    /// The length of the longest code word
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}
