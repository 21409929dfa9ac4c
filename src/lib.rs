//! # huffpack
//!
//! Huffman entropy coding of whole byte buffers into a small self-describing container.
//!
//! ```rust
//! let data = b"abbabbabbacccddef";
//! let packed = huffpack::compress(data)?;
//! assert_eq!(huffpack::decompress(&packed)?, data);
//! # Ok::<(), huffpack::CodecError>(())
//! ```
//!
//! The container is laid out as follows:
//!
//! ```text
//! [0..4)   original length, i32 little-endian, always > 0
//! [4..T)   pre-order tree records, 2 bytes each: (is_leaf, symbol)
//! [T..end) packed codes, LSB-first, absent when only one symbol occurs
//! ```

/// Expands its body only when the `tracing` feature is enabled.
#[macro_export]
macro_rules! if_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(feature = "tracing")] {
                $($body)*
            }
        }
    };
}

/// Expands its body only when the `tracing` feature is disabled.
#[macro_export]
macro_rules! if_not_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(not(feature = "tracing"))] {
                $($body)*
            }
        }
    };
}

pub mod algorithms;
pub mod compressor;


pub use algorithms::container::ContainerInfo;
pub use algorithms::huffman::{HuffmanCoding, compress, decompress, inspect};
pub use compressor::{CodecError, Compressor, ErrorKind, RoundTripTestResult};
