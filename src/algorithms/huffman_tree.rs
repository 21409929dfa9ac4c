use crate::algorithms::frequency::FrequencyTable;
use crate::algorithms::priority_queue::PriorityQueue;
use crate::compressor::CodecError;

if_tracing! {
    use tracing::debug;
}

/// A node of a Huffman tree.
///
/// Internal nodes always own exactly two children: `zero` is reached with a 0 bit, `one` with a
/// 1 bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf { symbol: u8 },
    Internal { zero: Box<Node>, one: Box<Node> },
}

impl Node {
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    fn internal(zero: Node, one: Node) -> Self {
        Node::Internal {
            zero: Box::new(zero),
            one: Box::new(one),
        }
    }
}

/// Tree node paired with the weight used to order it during construction.
#[derive(Debug)]
struct Weighted {
    weight: u64,
    node: Node,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Builds the tree by repeatedly merging the two least frequent nodes.
    ///
    /// A table with a single symbol yields a lone leaf. Which of several equally weighted nodes
    /// gets merged first depends on queue layout only, so tree shape is not stable across
    /// implementations; code lengths are optimal regardless.
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidInput`] for an empty table.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self, CodecError> {
        let entries = frequencies.entries();
        match entries {
            [] => return Err(CodecError::InvalidInput("cannot build a tree without symbols".into())),
            [only] => {
                return Ok(Self {
                    root: Node::Leaf { symbol: only.symbol },
                });
            }
            _ => {}
        }

        let mut queue = PriorityQueue::new(entries.len(), |a: &Weighted, b: &Weighted| a.weight.cmp(&b.weight));
        for entry in entries {
            queue
                .insert(Weighted {
                    weight: entry.count,
                    node: Node::Leaf { symbol: entry.symbol },
                })
                .map_err(queue_overflow)?;
        }

        while queue.len() > 1 {
            let (Some(n0), Some(n1)) = (queue.pop(), queue.pop()) else {
                return Err(CodecError::CapacityExceeded("priority queue drained during merge".into()));
            };
            queue
                .insert(Weighted {
                    weight: n0.weight + n1.weight,
                    node: Node::internal(n0.node, n1.node),
                })
                .map_err(queue_overflow)?;
        }

        let root = queue
            .pop()
            .ok_or_else(|| CodecError::CapacityExceeded("tree construction lost its root".into()))?
            .node;
        let tree = Self { root };

        if_tracing! {
            debug!(target = "huffman", leaves = entries.len(), height = tree.height(), "tree built");
        }

        Ok(tree)
    }

    /// Wraps an already shaped tree, e.g. one read back from a container.
    pub const fn from_root(root: Node) -> Self {
        Self { root }
    }

    pub const fn root(&self) -> &Node {
        &self.root
    }

    /// A tree made of a single leaf, produced when only one symbol occurs.
    pub const fn is_degenerate(&self) -> bool {
        self.root.is_leaf()
    }

    pub fn leaf_count(&self) -> usize {
        self.preorder().filter(|n| n.is_leaf()).count()
    }

    pub fn node_count(&self) -> usize {
        self.preorder().count()
    }

    /// Leaf symbols in pre-order, i.e. from the all-zeros path to the all-ones path.
    pub fn symbols(&self) -> Vec<u8> {
        self.preorder()
            .filter_map(|n| match n {
                Node::Leaf { symbol } => Some(*symbol),
                Node::Internal { .. } => None,
            })
            .collect()
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut stack = vec![(&self.root, 0usize)];
        let mut height = 0;
        while let Some((node, depth)) = stack.pop() {
            match node {
                Node::Leaf { .. } => height = height.max(depth),
                Node::Internal { zero, one } => {
                    stack.push((one, depth + 1));
                    stack.push((zero, depth + 1));
                }
            }
        }
        height
    }

    /// Visits every node in pre-order (node, then `zero` subtree, then `one` subtree).
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![&self.root] }
    }
}

pub struct Preorder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Node::Internal { zero, one } = node {
            self.stack.push(one);
            self.stack.push(zero);
        }
        Some(node)
    }
}

fn queue_overflow<T>(e: crate::algorithms::priority_queue::QueueFull<T>) -> CodecError {
    CodecError::CapacityExceeded(e.to_string())
}
