if_tracing! {
    use tracing::trace;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrequencyEntry {
    pub symbol: u8,
    pub count: u64,
}

/// Byte histogram of an input buffer.
///
/// Only symbols that occur are kept, most frequent first. Equal counts fall back to ascending
/// symbol order; the order only affects heap insertion, never the validity of the codes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
    total: u64,
}

impl FrequencyTable {
    pub fn count(data: &[u8]) -> Self {
        let mut histogram = [0u64; 256];
        for &b in data {
            histogram[b as usize] += 1;
        }

        let mut entries: Vec<FrequencyEntry> = histogram
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| FrequencyEntry {
                symbol: symbol as u8,
                count,
            })
            .collect();
        // stable: ties keep ascending symbol order
        entries.sort_by(|a, b| b.count.cmp(&a.count));

        if_tracing! {
            trace!(target = "huffman", input_len = data.len(), distinct = entries.len(), "frequencies counted");
        }

        Self {
            entries,
            total: data.len() as u64,
        }
    }

    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    pub fn distinct_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of bytes that were counted.
    pub const fn total(&self) -> u64 {
        self.total
    }

    pub fn count_of(&self, symbol: u8) -> u64 {
        self.entries.iter().find(|e| e.symbol == symbol).map_or(0, |e| e.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_mixed_text() {
        let table = FrequencyTable::count(b"abbabbabbacccddef");
        assert_eq!(table.distinct_count(), 6);
        assert_eq!(table.total(), 17);
        for (symbol, expected) in [(b'a', 4), (b'b', 6), (b'c', 3), (b'd', 2), (b'e', 1), (b'f', 1)] {
            assert_eq!(table.count_of(symbol), expected, "count of {:?}", symbol as char);
        }
        assert_eq!(table.count_of(b'z'), 0);
    }

    #[test]
    fn entries_sorted_by_descending_count() {
        let table = FrequencyTable::count(b"abbabbabbacccddef");
        let symbols: Vec<u8> = table.entries().iter().map(|e| e.symbol).collect();
        assert_eq!(symbols, b"bacdef");
        assert!(table.entries().windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn single_symbol_input() {
        let table = FrequencyTable::count(&[0xff; 300]);
        assert_eq!(
            table.entries(),
            &[FrequencyEntry {
                symbol: 0xff,
                count: 300
            }]
        );
    }

    #[test]
    fn full_alphabet() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1024).collect();
        let table = FrequencyTable::count(&data);
        assert_eq!(table.distinct_count(), 256);
        assert!(table.entries().iter().all(|e| e.count == 4));
    }

    #[test]
    fn empty_input_has_no_entries() {
        let table = FrequencyTable::count(&[]);
        assert_eq!(table.distinct_count(), 0);
        assert_eq!(table.total(), 0);
    }
}
