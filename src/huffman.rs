//! The Huffman codec: frequency analysis, tree construction, code derivation, bit packing.

use std::{fmt::Display, io, path::Path};

use anyhow::anyhow;

use crate::{
    compressor::{Compressor, Result},
    error::CodecError,
};

pub mod bits;
pub mod code;
pub mod decoder;
pub mod encoder;
pub mod frequency;
pub mod header;
pub mod queue;
pub mod tree;

pub use code::{Code, CodeTable};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use frequency::FrequencyTable;
pub use header::EncodedHeader;
pub use tree::{HuffmanTree, TreeNode};

/// Failure while moving data between a source and a sink.
///
/// The stream functions do not know which files they work on; the caller attaches the paths with
/// [`into_codec_error`](StreamError::into_codec_error).
#[derive(Debug)]
pub enum StreamError {
    Input(io::Error),
    Output(io::Error),
    Malformed(String),
}

impl StreamError {
    pub fn into_codec_error(self, input: &Path, output: &Path) -> CodecError {
        match self {
            StreamError::Input(source) => CodecError::read(input, source),
            StreamError::Output(source) => CodecError::output(output, source),
            StreamError::Malformed(message) => CodecError::MalformedHeader(message),
        }
    }
}

impl From<CodecError> for StreamError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::MalformedHeader(message) => StreamError::Malformed(message),
            other => StreamError::Malformed(other.to_string()),
        }
    }
}

const MEMORY: &str = "<memory>";

/// Encodes `data` into a complete encoded buffer, header included.
///
/// Empty input produces a header with no symbols and no payload.
pub fn encode_bytes(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let encoder = Encoder::new(FrequencyTable::from_bytes(data))?;
    let mut out = Vec::new();
    encoder
        .write_header(&mut out)
        .map_err(|e| CodecError::output(MEMORY, e))?;
    encoder
        .write_payload(&mut &data[..], out)
        .map_err(|e| e.into_codec_error(Path::new(MEMORY), Path::new(MEMORY)))
}

/// Decodes a buffer produced by [`encode_bytes`].
pub fn decode_bytes(encoded: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut reader = encoded;
    let memory = Path::new(MEMORY);
    let decoder = Decoder::read_header(&mut reader).map_err(|e| e.into_codec_error(memory, memory))?;
    let mut out = Vec::new();
    decoder
        .write_decoded(reader, &mut out)
        .map_err(|e| e.into_codec_error(memory, memory))?;
    Ok(out)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HuffmanCoding;

impl Compressor for HuffmanCoding {
    fn compress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        if_tracing! {
            tracing::debug!(target = "huffman", input_len = data.len(), "huffman encode start");
        }
        let encoded = encode_bytes(data)?;
        if_tracing! {
            tracing::info!(target = "huffman", input_len = data.len(), output_len = encoded.len(), "huffman encode complete");
        }
        Ok(encoded)
    }

    fn decompress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        decode_bytes(data).map_err(|e| {
            if_tracing! {
                tracing::warn!(target = "huffman", error = %e, "huffman decode failed");
            }
            anyhow!(e)
        })
    }

    fn compressor_name(&self) -> String {
        self.to_string()
    }
}

impl Display for HuffmanCoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Huffman Coding")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_tests() {
        crate::tests::roundtrip_test(HuffmanCoding);
    }

    #[test]
    fn aaab_example() {
        let encoded = encode_bytes(b"aaab").unwrap();
        assert_eq!(encoded, b"2\na3\nb1\n4\n\xE0");
        assert_eq!(decode_bytes(&encoded).unwrap(), b"aaab");
    }

    #[test]
    fn abc_example() {
        // c = 0, a = 10, b = 11: 10 11 0 repeated three times
        let encoded = encode_bytes(b"abcabcabc").unwrap();
        assert_eq!(encoded, b"3\na3\nb3\nc3\n15\n\xB5\xAC");
        assert_eq!(decode_bytes(&encoded).unwrap(), b"abcabcabc");
    }

    #[test]
    fn single_symbol_roundtrip() {
        for n in [1usize, 7, 8, 9, 1000] {
            let data = vec![0xAAu8; n];
            let encoded = encode_bytes(&data).unwrap();
            assert_eq!(decode_bytes(&encoded).unwrap(), data, "length {}", n);
        }
    }

    #[test]
    fn every_byte_value_roundtrips() {
        let data: Vec<u8> = (0..=255u8).rev().chain(0..=255u8).chain([b'\n'; 30]).collect();
        assert_eq!(decode_bytes(&encode_bytes(&data).unwrap()).unwrap(), data);
    }

    #[test]
    fn malformed_input_is_an_error() {
        let mut compressor = HuffmanCoding;
        let err = compressor.decompress_bytes(b"not a header").unwrap_err();
        assert!(matches!(err.downcast_ref::<CodecError>(), Some(CodecError::MalformedHeader(_))));
    }

    #[test]
    fn non_canonical_numbers_are_rejected() {
        let err = decode_bytes(b"1\na03\n03\n\x00").unwrap_err();
        assert!(matches!(err, CodecError::MalformedHeader(_)));
    }

    #[test]
    fn stream_error_paths() {
        let err = StreamError::Output(io::Error::other("disk full"))
            .into_codec_error(Path::new("in.txt"), Path::new("in.txt.huff"));
        assert!(matches!(err, CodecError::OutputWrite { ref path, .. } if path == Path::new("in.txt.huff")));
    }
}
