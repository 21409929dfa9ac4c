//! Building blocks of the Huffman coder, leaf-first.
//!
//! [`priority_queue`] orders nodes during [`huffman_tree`] construction, [`code_table`] turns the
//! tree into per-symbol codes, [`bitstream`] packs them, and [`tree_codec`] stores the tree
//! itself. [`huffman`] ties everything into the public `compress` / `decompress` pair.

pub mod bitstream;
pub mod code_table;
pub mod container;
pub mod frequency;
pub mod huffman;
pub mod huffman_tree;
pub mod priority_queue;
pub mod tree_codec;
