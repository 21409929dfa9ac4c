use core::fmt;

use crate::algorithms::frequency::FrequencyTable;
use crate::algorithms::huffman_tree::{HuffmanTree, Node};

/// A growable bit sequence, packed LSB-first: bit `i` lives in `bits[i / 8]` at position `i % 8`.
///
/// Unused high bits of the last byte are always zero.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Code {
    bits: Vec<u8>,
    len: usize,
}

impl Code {
    pub const fn new() -> Self {
        Self { bits: Vec::new(), len: 0 }
    }

    pub fn push(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bits.push(0);
        }
        if bit {
            let last = self.bits.len() - 1;
            self.bits[last] |= 1 << offset;
        }
        self.len += 1;
    }

    /// Returns a copy of this code with `bit` appended.
    pub fn with(&self, bit: bool) -> Self {
        let mut code = self.clone();
        code.push(bit);
        code
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bits[index / 8] >> (index % 8) & 1 == 1)
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Packed bytes backing the code, `len().div_ceil(8)` of them.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| self.bits[i / 8] >> (i % 8) & 1 == 1)
    }

    /// Whether `self` is a (non-strict) bit prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        let full = self.len / 8;
        if self.bits[..full] != other.bits[..full] {
            return false;
        }
        let rest = self.len % 8;
        if rest == 0 {
            return true;
        }
        let mask = (1u8 << rest) - 1;
        self.bits[full] & mask == other.bits[full] & mask
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code(")?;
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        write!(f, ")")
    }
}

impl FromIterator<bool> for Code {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut code = Code::new();
        iter.into_iter().for_each(|bit| code.push(bit));
        code
    }
}

/// Symbol to code mapping for every leaf of a tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Walks the tree pre-order, appending 0 when descending into `zero` and 1 into `one`.
    ///
    /// The lone leaf of a degenerate tree gets the empty code.
    pub fn derive(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; 256];
        let mut stack = vec![(tree.root(), Code::new())];

        while let Some((node, prefix)) = stack.pop() {
            match node {
                Node::Leaf { symbol } => codes[*symbol as usize] = Some(prefix),
                Node::Internal { zero, one } => {
                    stack.push((one, prefix.with(true)));
                    stack.push((zero, prefix.with(false)));
                }
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|c| (symbol as u8, c)))
    }

    pub fn max_len(&self) -> usize {
        self.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Exact payload size in bits when encoding data with these frequencies.
    pub fn encoded_bit_len(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .entries()
            .iter()
            .map(|e| e.count * self.get(e.symbol).map_or(0, |c| c.len() as u64))
            .sum()
    }
}
