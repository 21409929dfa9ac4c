//! Pre-order tree serialization: one 2-byte record `[is_leaf, symbol]` per node.
//!
//! Internal nodes carry a zero filler in the symbol byte. Weights are never stored, so a
//! decoded tree has shape and symbols only.

use crate::algorithms::huffman_tree::Node;
use crate::compressor::CodecError;

pub const RECORD_LEN: usize = 2;

const INTERNAL_FLAG: u8 = 0;
const LEAF_FLAG: u8 = 1;

/// A byte alphabet never needs more leaves than this.
pub const MAX_LEAVES: usize = 256;
/// Deepest leaf of a tree over [`MAX_LEAVES`] symbols has this many internal ancestors.
pub const MAX_DEPTH: usize = MAX_LEAVES - 1;

/// Appends the records for `root` to `out`, returning the number of bytes written.
pub fn write_tree(root: &Node, out: &mut Vec<u8>) -> usize {
    let start = out.len();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node {
            Node::Leaf { symbol } => out.extend_from_slice(&[LEAF_FLAG, *symbol]),
            Node::Internal { zero, one } => {
                out.extend_from_slice(&[INTERNAL_FLAG, 0]);
                stack.push(one);
                stack.push(zero);
            }
        }
    }
    out.len() - start
}

/// Size of the records [`write_tree`] would produce.
pub fn serialized_len(root: &Node) -> usize {
    let mut nodes = 0;
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        nodes += 1;
        if let Node::Internal { zero, one } = node {
            stack.push(one);
            stack.push(zero);
        }
    }
    nodes * RECORD_LEN
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTree {
    pub root: Node,
    pub leaf_count: usize,
    /// Bytes of `input` taken up by the tree records.
    pub consumed: usize,
}

/// Rebuilds a tree from the records at the start of `input`.
///
/// Bytes after the last record are left alone; [`DecodedTree::consumed`] says where they begin.
///
/// # Errors
///
/// [`CodecError::CorruptedStream`] if a record is cut short, a flag byte is neither 0 nor 1, the
/// tree has more than [`MAX_LEAVES`] leaves, or it nests deeper than [`MAX_DEPTH`].
pub fn read_tree(input: &[u8]) -> Result<DecodedTree, CodecError> {
    // one slot per open internal node; Some once its zero child is complete
    let mut open: Vec<Option<Node>> = Vec::new();
    let mut offset = 0;
    let mut leaf_count = 0;

    loop {
        let Some(record) = input.get(offset..offset + RECORD_LEN) else {
            return Err(CodecError::corrupted(format!("tree record truncated at byte {}", offset)));
        };
        offset += RECORD_LEN;

        let mut complete = match record[0] {
            LEAF_FLAG => {
                leaf_count += 1;
                if leaf_count > MAX_LEAVES {
                    return Err(CodecError::corrupted(format!("tree has more than {} leaves", MAX_LEAVES)));
                }
                Node::Leaf { symbol: record[1] }
            }
            INTERNAL_FLAG => {
                if open.len() == MAX_DEPTH {
                    return Err(CodecError::corrupted(format!("tree nests deeper than {} levels", MAX_DEPTH)));
                }
                open.push(None);
                continue;
            }
            flag => {
                return Err(CodecError::corrupted(format!(
                    "invalid node flag {:#04x} at byte {}",
                    flag,
                    offset - RECORD_LEN
                )));
            }
        };

        // a finished subtree fills the nearest open slot, possibly completing its parent too
        loop {
            match open.pop() {
                None => {
                    return Ok(DecodedTree {
                        root: complete,
                        leaf_count,
                        consumed: offset,
                    });
                }
                Some(None) => {
                    open.push(Some(complete));
                    break;
                }
                Some(Some(zero)) => {
                    complete = Node::Internal {
                        zero: Box::new(zero),
                        one: Box::new(complete),
                    };
                }
            }
        }
    }
}
