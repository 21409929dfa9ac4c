pub use anyhow::Result;
use thiserror::Error;

/// Coarse classification of a [`CodecError`], for callers that only need to branch on the kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    CorruptedStream,
    CapacityExceeded,
}

/// Represents an error emitted by the Huffman coder while encoding or decoding data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input given to the coder cannot be processed at all, e.g. an empty buffer.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Input given to the decoder was malformed, truncated, or otherwise not a valid container.
    ///
    /// The argument is a string that describes what went wrong.
    #[error("corrupted stream: {0}")]
    CorruptedStream(String),

    /// A size or count exceeded what the container format (or an internal structure) can hold.
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(String),
}

impl CodecError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::CorruptedStream(_) => ErrorKind::CorruptedStream,
            Self::CapacityExceeded(_) => ErrorKind::CapacityExceeded,
        }
    }

    pub(crate) fn corrupted(message: impl Into<String>) -> Self {
        Self::CorruptedStream(message.into())
    }
}

/// Represents shared behavior for whole-buffer compressors.
///
/// Provides a method [`compress_bytes`](Compressor::compress_bytes) to compress data and
/// [`decompress_bytes`](Compressor::decompress_bytes) to decompress data.
///
/// # Note
///
/// No guarantees are made about the length of the resulting [`Vec<u8>`] from
/// [`compress_bytes`](Compressor::compress_bytes). It can be shorter, equal in length, or longer.
/// The only guarantee is that [`decompress_bytes`](Compressor::decompress_bytes) will be able to
/// reconstruct the original data.
pub trait Compressor: 'static {
    /// Compresses a given byte slice and returns the encoded data.
    ///
    /// # Errors
    ///
    /// Returns an error if the compressor cannot represent the input (for example, empty input).
    fn compress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompresses a given byte slice and returns the decoded data.
    ///
    /// # Errors
    ///
    /// Returns an error if the input data was malformed or truncated.
    fn decompress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>>;

    /// Human readable name of the algorithm, used in reports.
    fn compressor_name(&self) -> String {
        core::any::type_name::<Self>().to_string()
    }

    /// Performs a round-trip test on the compressor.
    ///
    /// Use for sanity checking the compressor and decompressor.
    fn test_roundtrip<'orig>(&mut self, data: &'orig [u8]) -> Result<RoundTripTestResult<'orig>> {
        let compressed = <Self as Compressor>::compress_bytes(self, data)?;
        let decompressed = <Self as Compressor>::decompress_bytes(self, &compressed)?;
        let equal = data == decompressed.as_slice();

        Ok(RoundTripTestResult {
            equal,
            original: data,
            compressed,
            decompressed,
        })
    }
}

/// Represents the result of a round-trip test.
///
/// Use accessor methods to retrieve the [`result`][RoundTripTestResult::is_successful],
/// the [`original data`][RoundTripTestResult::get_original],
/// the [`compressed data`][RoundTripTestResult::get_compressed],
/// and the [`decompressed data`][RoundTripTestResult::get_decompressed].
#[derive(Clone, Debug, Hash)]
pub struct RoundTripTestResult<'orig> {
    pub(crate) equal: bool,
    pub(crate) original: &'orig [u8],
    pub(crate) compressed: Vec<u8>,
    pub(crate) decompressed: Vec<u8>,
}

impl<'orig> RoundTripTestResult<'orig> {
    /// Whether the original and decompressed data were equal.
    pub const fn is_successful(&self) -> bool {
        self.equal
    }

    /// The original data before any action was taken.
    pub const fn get_original(&self) -> &'orig [u8] {
        self.original
    }

    /// The data after it has been encoded by the compressor.
    pub fn get_compressed(&self) -> &[u8] {
        self.compressed.as_slice()
    }

    /// The data after it has been decoded by the decompressor.
    pub fn get_decompressed(&self) -> &[u8] {
        self.decompressed.as_slice()
    }

    /// Compressed size divided by original size. Zero for empty originals.
    pub fn ratio(&self) -> f64 {
        if self.original.is_empty() {
            return 0.0;
        }
        self.compressed.len() as f64 / self.original.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_match_variants() {
        assert_eq!(CodecError::InvalidInput("x".into()).kind(), ErrorKind::InvalidInput);
        assert_eq!(CodecError::corrupted("x").kind(), ErrorKind::CorruptedStream);
        assert_eq!(CodecError::CapacityExceeded("x".into()).kind(), ErrorKind::CapacityExceeded);
    }

    #[test]
    fn error_display_carries_message() {
        let e = CodecError::corrupted("tree record truncated at byte 7");
        assert_eq!(e.to_string(), "corrupted stream: tree record truncated at byte 7");
    }
}
