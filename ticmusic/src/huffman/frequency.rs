/// Occurrence counts per byte value
///
/// Besides the counts, the table remembers the order in which byte values were first seen.
/// Tree construction breaks ties between equal weights on that order, which keeps the
/// resulting codes deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(u8, usize)>,
}

impl FrequencyTable {
    /// Construct an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every byte in a slice
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut table = Self::new();
        table.add(bytes);
        table
    }

    /// Count more bytes into the table
    pub fn add(&mut self, bytes: &[u8]) {
        for byte in bytes {
            match self.entries.iter_mut().find(|(value, _)| value == byte) {
                Some((_, count)) => *count += 1,
                None => self.entries.push((*byte, 1)),
            }
        }
    }

    /// How often a byte was counted
    pub fn count(&self, byte: u8) -> usize {
        self.entries
            .iter()
            .find(|(value, _)| *value == byte)
            .map(|(_, count)| *count)
            .unwrap_or_default()
    }

    /// The total number of bytes counted
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// The number of distinct byte values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(byte, count)` pairs in order of first occurrence
    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.entries.iter().copied()
    }
}

impl Extend<u8> for FrequencyTable {
    fn extend<T: IntoIterator<Item = u8>>(&mut self, iter: T) {
        for byte in iter {
            self.add(&[byte]);
        }
    }
}

impl FromIterator<u8> for FrequencyTable {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_order() {
        let table = FrequencyTable::from_bytes(b"BANANA");
        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            [(b'B', 1), (b'A', 3), (b'N', 2)]
        );
        assert_eq!(table.len(), 3);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn accumulates() {
        let mut table = FrequencyTable::from_bytes(b"AB");
        table.add(b"CA");
        assert_eq!(table.count(b'A'), 2);
        assert_eq!(table.count(b'C'), 1);
        assert_eq!(table.count(b'Z'), 0);

        let collected: FrequencyTable = b"ABCA".iter().copied().collect();
        assert_eq!(collected, table);
    }
}
