//! Container header and metadata.

use serde::Serialize;

use crate::compressor::CodecError;

/// Size of the leading original-length field.
pub const HEADER_LEN: usize = 4;

/// Smallest well-formed container: header plus a single leaf record.
pub const MIN_CONTAINER_LEN: usize = HEADER_LEN + crate::algorithms::tree_codec::RECORD_LEN;

/// Largest input the length field can describe.
pub const MAX_ORIGINAL_LEN: usize = i32::MAX as usize;

pub fn write_original_len(len: usize, out: &mut Vec<u8>) -> Result<(), CodecError> {
    let field = i32::try_from(len).map_err(|_| {
        CodecError::CapacityExceeded(format!(
            "input of {} bytes exceeds the container limit of {} bytes",
            len, MAX_ORIGINAL_LEN
        ))
    })?;
    out.extend_from_slice(&field.to_le_bytes());
    Ok(())
}

/// Reads the declared original length, returning it and the bytes that follow the header.
pub fn read_original_len(data: &[u8]) -> Result<(usize, &[u8]), CodecError> {
    let (header, rest) = data
        .split_first_chunk::<HEADER_LEN>()
        .ok_or_else(|| CodecError::corrupted(format!("header needs {} bytes, got {}", HEADER_LEN, data.len())))?;
    let declared = i32::from_le_bytes(*header);
    if declared <= 0 {
        return Err(CodecError::corrupted(format!("declared original length {} is not positive", declared)));
    }
    Ok((declared as usize, rest))
}

/// Structural summary of a container, obtained without decoding its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerInfo {
    pub original_len: usize,
    pub container_len: usize,
    pub tree_bytes: usize,
    pub leaf_count: usize,
    pub tree_height: usize,
    pub payload_bytes: usize,
    /// Only one distinct symbol; no payload follows the tree.
    pub degenerate: bool,
}

impl ContainerInfo {
    /// Container size divided by original size.
    pub fn ratio(&self) -> f64 {
        self.container_len as f64 / self.original_len as f64
    }
}
