use core::fmt::Display;

use crate::algorithms::bitstream::{BitReader, BitWriter};
use crate::algorithms::code_table::CodeTable;
use crate::algorithms::container::{self, ContainerInfo, HEADER_LEN};
use crate::algorithms::frequency::FrequencyTable;
use crate::algorithms::huffman_tree::{HuffmanTree, Node};
use crate::algorithms::tree_codec;
use crate::compressor::{CodecError, Compressor, Result};

if_tracing! {
    use tracing::{Level, debug, info, span};
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HuffmanCoding;

impl Compressor for HuffmanCoding {
    fn compress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(compress(data)?)
    }

    fn decompress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(decompress(data)?)
    }

    fn compressor_name(&self) -> String {
        self.to_string()
    }
}

impl Display for HuffmanCoding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Huffman Coding")
    }
}

/// Compresses `data` into a single container.
///
/// # Errors
///
/// [`CodecError::InvalidInput`] for empty input, [`CodecError::CapacityExceeded`] for input the
/// 4-byte length field cannot describe.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    if_tracing! {
        let span = span!(Level::INFO, "huffman_compress", input_len = data.len());
        let _enter = span.enter();
        debug!(target = "huffman", input_len = data.len(), "huffman encode start");
    }
    if data.is_empty() {
        return Err(CodecError::InvalidInput("cannot compress an empty buffer".into()));
    }

    let frequencies = FrequencyTable::count(data);
    let tree = HuffmanTree::build(&frequencies)?;

    let tree_len = tree_codec::serialized_len(tree.root());
    let mut out = Vec::with_capacity(HEADER_LEN + tree_len);
    container::write_original_len(data.len(), &mut out)?;
    tree_codec::write_tree(tree.root(), &mut out);

    if tree.is_degenerate() {
        if_tracing! {
            info!(target = "huffman", input_len = data.len(), output_len = out.len(), "huffman encode complete: single symbol, no payload");
        }
        return Ok(out);
    }

    let codes = CodeTable::derive(&tree);
    let payload_bits = codes.encoded_bit_len(&frequencies);
    out.reserve(payload_bits.div_ceil(8) as usize);

    let mut writer = BitWriter::from_vec(out);
    for &b in data {
        // every input byte is a leaf of the tree built from it
        let code = codes
            .get(b)
            .ok_or_else(|| CodecError::CapacityExceeded(format!("no code derived for byte {:#04x}", b)))?;
        writer.append(code);
    }
    debug_assert_eq!(writer.bit_len(), payload_bits);
    let out = writer.finish();

    if_tracing! {
        info!(
            target = "huffman",
            input_len = data.len(),
            output_len = out.len(),
            symbols = frequencies.distinct_count(),
            max_code_len = codes.max_len(),
            payload_bits,
            "huffman encode complete"
        );
    }

    Ok(out)
}

/// Decompresses a container produced by [`compress`].
///
/// Bytes past the last code needed are ignored.
///
/// # Errors
///
/// [`CodecError::InvalidInput`] for an empty buffer; [`CodecError::CorruptedStream`] for a short
/// header, a non-positive declared length, a malformed tree, or a payload that ends early.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    if_tracing! {
        let span = span!(Level::INFO, "huffman_decompress", input_len = data.len());
        let _enter = span.enter();
        debug!(target = "huffman", input_len = data.len(), "huffman decode start");
    }
    if data.is_empty() {
        return Err(CodecError::InvalidInput("cannot decompress an empty buffer".into()));
    }

    let (original_len, rest) = container::read_original_len(data)?;
    let tree = tree_codec::read_tree(rest)?;
    let payload = &rest[tree.consumed..];

    let output = match tree.root {
        Node::Leaf { symbol } => vec![symbol; original_len],
        Node::Internal { .. } => decode_payload(&tree.root, payload, original_len)?,
    };

    if_tracing! {
        info!(
            target = "huffman",
            input_len = data.len(),
            output_len = output.len(),
            leaf_count = tree.leaf_count,
            "huffman decode complete"
        );
    }

    Ok(output)
}

/// Walks the tree once per output symbol, one payload bit per edge.
fn decode_payload(root: &Node, payload: &[u8], original_len: usize) -> Result<Vec<u8>, CodecError> {
    // every symbol costs at least one bit, so this bounds the allocation by the payload size
    let max_symbols = payload.len().saturating_mul(8);
    if original_len > max_symbols {
        return Err(CodecError::corrupted(format!(
            "payload of {} bytes cannot hold {} symbols",
            payload.len(),
            original_len
        )));
    }

    let mut output = Vec::with_capacity(original_len);
    let mut reader = BitReader::new(payload);
    while output.len() < original_len {
        let mut node = root;
        let symbol = loop {
            match node {
                Node::Leaf { symbol } => break *symbol,
                Node::Internal { zero, one } => {
                    let bit = reader.read_bit().ok_or_else(|| {
                        CodecError::corrupted(format!(
                            "payload ended after {} of {} symbols",
                            output.len(),
                            original_len
                        ))
                    })?;
                    node = if bit { one } else { zero };
                }
            }
        };
        output.push(symbol);
    }

    Ok(output)
}

/// Parses the header and tree of a container without decoding its payload.
///
/// # Errors
///
/// Same header and tree errors as [`decompress`].
pub fn inspect(data: &[u8]) -> Result<ContainerInfo, CodecError> {
    if data.is_empty() {
        return Err(CodecError::InvalidInput("cannot inspect an empty buffer".into()));
    }
    let (original_len, rest) = container::read_original_len(data)?;
    let decoded = tree_codec::read_tree(rest)?;
    let degenerate = decoded.root.is_leaf();
    let tree = HuffmanTree::from_root(decoded.root);

    Ok(ContainerInfo {
        original_len,
        container_len: data.len(),
        tree_bytes: decoded.consumed,
        leaf_count: decoded.leaf_count,
        tree_height: tree.height(),
        payload_bytes: if degenerate { 0 } else { rest.len() - decoded.consumed },
        degenerate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compressor::ErrorKind;
    use crate::tests::{roundtrip_test, rng_data};

    #[test]
    fn roundtrip_tests() {
        roundtrip_test(HuffmanCoding);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(compress(&[]).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(decompress(&[]).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert!(HuffmanCoding.compress_bytes(&[]).is_err());
    }

    #[test]
    fn single_symbol_container_is_six_bytes() {
        for n in [1usize, 2, 1000, 65_537] {
            let data = vec![b'x'; n];
            let packed = compress(&data).unwrap();
            let mut expected = (n as i32).to_le_bytes().to_vec();
            expected.extend_from_slice(&[1, b'x']);
            assert_eq!(packed, expected);
            assert_eq!(decompress(&packed).unwrap(), data);
        }
    }

    #[test]
    fn two_symbol_layout_is_bit_exact() {
        // b is rarer, so it takes the zero branch: codes a=1, b=0
        let packed = compress(b"aab").unwrap();
        assert_eq!(packed, vec![3, 0, 0, 0, 0, 0, 1, b'b', 1, b'a', 0b011]);
        assert_eq!(decompress(&packed).unwrap(), b"aab");
    }

    #[test]
    fn output_size_is_header_tree_and_payload() {
        let data = b"abbabbabbacccddef";
        let packed = compress(data).unwrap();
        // 6 leaves, 5 internal nodes, 40 payload bits
        assert_eq!(packed.len(), 4 + 11 * 2 + 5);
    }

    #[test]
    fn original_length_is_stored_first() {
        let data = b"adasdaskjdasnk;dfjhbaslkerfgbas";
        let packed = compress(data).unwrap();
        assert_eq!(i32::from_le_bytes(packed[..4].try_into().unwrap()), data.len() as i32);
    }

    #[test]
    fn non_positive_declared_length_is_rejected() {
        let mut packed = compress(b"hello world").unwrap();
        packed[..4].copy_from_slice(&0i32.to_le_bytes());
        assert_eq!(decompress(&packed).unwrap_err().kind(), ErrorKind::CorruptedStream);
        packed[..4].copy_from_slice(&(-1i32).to_le_bytes());
        assert_eq!(decompress(&packed).unwrap_err().kind(), ErrorKind::CorruptedStream);
    }

    #[test]
    fn truncated_containers_are_rejected() {
        let packed = compress(b"the rain in spain stays mainly in the plain").unwrap();
        for cut in 1..packed.len() {
            let err = decompress(&packed[..cut]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::CorruptedStream, "cut at {}", cut);
        }
    }

    #[test]
    fn inflated_declared_length_is_rejected() {
        let mut packed = compress(b"abcabcabc").unwrap();
        packed[..4].copy_from_slice(&i32::MAX.to_le_bytes());
        assert_eq!(decompress(&packed).unwrap_err().kind(), ErrorKind::CorruptedStream);
    }

    #[test]
    fn trailing_garbage_is_ignored() {
        let data = b"mississippi";
        let mut packed = compress(data).unwrap();
        packed.extend_from_slice(&[0xff; 16]);
        assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn all_byte_values_roundtrip() {
        let data: Vec<u8> = (0..=255u8).chain((0..=255u8).rev()).chain([7; 100]).collect();
        let packed = compress(&data).unwrap();
        assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn fibonacci_weights_roundtrip() {
        let mut data = Vec::new();
        let (mut a, mut b) = (1usize, 1usize);
        for symbol in 0..25u8 {
            data.extend(core::iter::repeat_n(symbol, a));
            (a, b) = (b, a + b);
        }
        let packed = compress(&data).unwrap();
        assert_eq!(inspect(&packed).unwrap().tree_height, 24);
        assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn maximal_depth_codes_decode() {
        // caterpillar over all 256 symbols: level i holds leaf i + 1 on its zero branch,
        // and symbol 0 sits at the bottom behind 255 one-bits
        let mut packed = 3i32.to_le_bytes().to_vec();
        for symbol in 1..=255u8 {
            packed.extend_from_slice(&[0, 0, 1, symbol]);
        }
        packed.extend_from_slice(&[1, 0]);

        // 1 = "0", 0 = 255 ones, 2 = "10"
        let bits: Vec<bool> = core::iter::once(false)
            .chain(core::iter::repeat_n(true, 256))
            .chain([false])
            .collect();
        let mut payload = vec![0u8; bits.len().div_ceil(8)];
        for (i, &bit) in bits.iter().enumerate() {
            if bit {
                payload[i / 8] |= 1 << (i % 8);
            }
        }
        packed.extend_from_slice(&payload);

        let info = inspect(&packed).unwrap();
        assert_eq!(info.leaf_count, 256);
        assert_eq!(info.tree_height, 255);
        assert_eq!(decompress(&packed).unwrap(), vec![1, 0, 2]);

        // final symbol cut off with the last payload byte
        let short = &packed[..packed.len() - 1];
        assert_eq!(decompress(short).unwrap_err().kind(), ErrorKind::CorruptedStream);
    }

    #[test]
    fn large_skewed_input_roundtrips() {
        let mut data = Vec::with_capacity(100_000);
        data.extend(core::iter::repeat_n(b'a', 40_000));
        data.extend((0..25_000).map(|i| if i % 5 == 0 { b'b' } else { b'c' }));
        data.extend((0..15_000u32).map(|i| b"0123456789"[(i * 7 % 10) as usize]));
        data.extend(rng_data(20_000, 0x5eed_1234));
        assert_eq!(data.len(), 100_000);

        let packed = compress(&data).unwrap();
        assert!(packed.len() < data.len());
        assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn inspect_reports_layout() {
        let data = b"abbabbabbacccddef";
        let packed = compress(data).unwrap();
        let info = inspect(&packed).unwrap();
        assert_eq!(
            info,
            ContainerInfo {
                original_len: 17,
                container_len: packed.len(),
                tree_bytes: 22,
                leaf_count: 6,
                tree_height: 4,
                payload_bytes: 5,
                degenerate: false,
            }
        );

        let info = inspect(&compress(b"zz").unwrap()).unwrap();
        assert!(info.degenerate);
        assert_eq!(info.payload_bytes, 0);
        assert_eq!(info.tree_height, 0);
    }
}
