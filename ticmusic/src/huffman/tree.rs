use super::{
    code::{Code, CodeTable},
    frequency::FrequencyTable,
};
use std::{collections::BTreeMap, fmt::Write};
use thiserror::Error;

/// A node in a [`HuffmanTree`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A byte value
    Leaf(u8),

    /// A branch, taken with a `0` bit to the left and a `1` bit to the right
    Internal(Box<Node>, Box<Node>),
}

impl Node {
    fn leaves(&self, out: &mut Vec<u8>) {
        match self {
            Self::Leaf(byte) => out.push(*byte),
            Self::Internal(left, right) => {
                left.leaves(out);
                right.leaves(out);
            }
        }
    }

    fn write_lua(&self, out: &mut String) {
        match self {
            Self::Leaf(byte) => write_lua_char(*byte, out),
            Self::Internal(left, right) => {
                out.push('{');
                left.write_lua(out);
                out.push(',');
                right.write_lua(out);
                out.push('}');
            }
        }
    }
}

/// A prefix code built from a [`FrequencyTable`]
///
/// Construction follows a fixed procedure, so that the same corpus always yields the same
/// codes: the working set starts out as one leaf per byte value in order of first occurrence.
/// The lightest entry (the first one found on equal weights) and the lightest of the rest
/// are taken out, merged into a branch that is appended to the working set, and every leaf
/// below them gets a `0` or `1` respectively put in front of its code. This repeats until a
/// single root remains.
///
/// A table with a single byte value gets the one-bit code `0` for it, because a zero-length
/// code can't be told apart from no data at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
    codes: CodeTable,
}

impl HuffmanTree {
    /// Build the tree (and codes) for a frequency table
    pub fn build(frequencies: &FrequencyTable) -> Result<Self, BuildTreeError> {
        let mut entries: Vec<(Node, usize)> = frequencies
            .iter()
            .map(|(byte, count)| (Node::Leaf(byte), count))
            .collect();

        let mut codes: BTreeMap<u8, Code> = frequencies
            .iter()
            .map(|(byte, _)| (byte, Code::new()))
            .collect();

        match entries.len() {
            0 => return Err(BuildTreeError::NoSymbols),
            1 => {
                for code in codes.values_mut() {
                    code.prepend(false);
                }
            }
            _ => (),
        }

        while entries.len() > 1 {
            let first = lightest(&entries, None);
            let second = lightest(&entries, Some(first));

            // Remove the later index first, so the earlier one stays valid
            let (first, second) = if first > second {
                let first = entries.remove(first);
                (first, entries.remove(second))
            } else {
                let second = entries.remove(second);
                (entries.remove(first), second)
            };

            prepend(&mut codes, &first.0, false);
            prepend(&mut codes, &second.0, true);

            let weight = first.1 + second.1;
            entries.push((Node::Internal(Box::new(first.0), Box::new(second.0)), weight));
        }

        let root = entries
            .pop()
            .map(|(node, _)| node)
            .ok_or(BuildTreeError::NoSymbols)?;

        Ok(Self {
            root,
            codes: CodeTable::from_codes(codes),
        })
    }

    /// Count a text and build the tree for it
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BuildTreeError> {
        Self::build(&FrequencyTable::from_bytes(bytes))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The code word for every byte value in the tree
    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// Export the tree as a nested Lua table
    ///
    /// Every branch becomes `{left,right}` and every leaf a one-character string. A decoder
    /// walks the table by indexing it with `bit + 1` until it hits a string. For a tree with
    /// a single byte value, the `1` branch is `nil`.
    ///
    /// ```
    /// # use ticmusic::huffman::HuffmanTree;
    /// let tree = HuffmanTree::from_bytes(b"AAAABBC").unwrap();
    /// assert_eq!(tree.to_lua(), r#"{{"C","B"},"A"}"#);
    /// ```
    pub fn to_lua(&self) -> String {
        let mut out = String::new();
        match &self.root {
            Node::Leaf(byte) => {
                out.push('{');
                write_lua_char(*byte, &mut out);
                out.push_str(",nil}");
            }
            node => node.write_lua(&mut out),
        }
        out
    }
}

/// The index of the lightest entry, skipping `skip`
///
/// On equal weights the earliest entry wins.
fn lightest(entries: &[(Node, usize)], skip: Option<usize>) -> usize {
    let mut lightest: Option<(usize, usize)> = None;

    for (index, (_, weight)) in entries.iter().enumerate() {
        if Some(index) == skip {
            continue;
        }

        if lightest.is_none_or(|(_, lightest)| *weight < lightest) {
            lightest = Some((index, *weight));
        }
    }

    lightest.map(|(index, _)| index).unwrap_or_default()
}

fn prepend(codes: &mut BTreeMap<u8, Code>, node: &Node, bit: bool) {
    let mut leaves = Vec::new();
    node.leaves(&mut leaves);

    for byte in leaves {
        if let Some(code) = codes.get_mut(&byte) {
            code.prepend(bit);
        }
    }
}

fn write_lua_char(byte: u8, out: &mut String) {
    match byte {
        b'"' => out.push_str(r#""\"""#),
        b'\\' => out.push_str(r#""\\""#),
        byte if byte.is_ascii_graphic() || byte == b' ' => {
            out.push('"');
            out.push(byte as char);
            out.push('"');
        }
        byte => {
            let _ = write!(out, "\"\\{byte}\"");
        }
    }
}

/// Errors that might be returned from [`HuffmanTree::build()`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildTreeError {
    /// A tree needs at least one symbol
    #[error("The frequency table is empty")]
    NoSymbols,
}
