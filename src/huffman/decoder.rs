use std::io::{self, BufRead, Read, Write};

use crate::{
    error::{CodecError, Result},
    huffman::{
        StreamError,
        bits::{BitReader, bytes_for_bits},
        frequency::FrequencyTable,
        header::EncodedHeader,
        tree::{HuffmanTree, TreeNode},
    },
};

/// Decodes a payload against the tree rebuilt from its header.
#[derive(Debug, Clone)]
pub struct Decoder {
    table: FrequencyTable,
    tree: Option<HuffmanTree>,
    bit_count: u64,
    symbol_count: u64,
}

impl Decoder {
    /// Rebuilds the tree and checks the declared bit count against it.
    pub fn new(header: EncodedHeader) -> Result<Self> {
        let bit_count = header.bit_count();
        let table = header.into_table();
        let symbol_count = table
            .total()
            .ok_or_else(|| CodecError::malformed("symbol frequencies overflow a 64-bit total"))?;
        let tree = HuffmanTree::build(&table)?;

        let expected = match &tree {
            Some(tree) => tree
                .codes()
                .encoded_bits(&table)
                .ok_or_else(|| CodecError::malformed("payload bit count overflows 64 bits"))?,
            None => 0,
        };
        if expected != bit_count {
            return Err(CodecError::malformed(format!(
                "header declares {} payload bits but its frequencies require {}",
                bit_count, expected
            )));
        }

        if_tracing! {
            tracing::debug!(target = "huffman", distinct = table.distinct(), bit_count, symbol_count, "decoder ready");
        }

        Ok(Self {
            table,
            tree,
            bit_count,
            symbol_count,
        })
    }

    /// Parses the header from `reader` and builds the decoder.
    ///
    /// I/O failures other than a truncated or garbled header are returned as
    /// [`StreamError::Input`].
    pub fn read_header<R: BufRead>(reader: &mut R) -> Result<Self, StreamError> {
        let header = EncodedHeader::read_from(reader).map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => StreamError::Malformed(e.to_string()),
            _ => StreamError::Input(e),
        })?;
        Self::new(header).map_err(StreamError::from)
    }

    pub const fn bit_count(&self) -> u64 {
        self.bit_count
    }

    pub const fn payload_len(&self) -> u64 {
        bytes_for_bits(self.bit_count)
    }

    /// Symbol counts declared by the header.
    pub const fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// Number of bytes the payload decodes to.
    pub const fn symbol_count(&self) -> u64 {
        self.symbol_count
    }

    pub const fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    /// Walks the payload through the tree, writing every decoded symbol to `output`.
    ///
    /// Exactly [`bit_count`](Decoder::bit_count) bits are consumed; `input` must end right after
    /// the byte holding the last of them. Returns the number of bytes written.
    pub fn write_decoded<R: Read, W: Write>(&self, mut input: R, output: &mut W) -> Result<u64, StreamError> {
        let mut bits = BitReader::new(&mut input, self.bit_count);
        let mut pending = Vec::with_capacity(8192);
        let mut written = 0u64;
        let mut seen = FrequencyTable::new();

        if let Some(tree) = &self.tree {
            let root = tree.root();
            let mut cursor = root;
            while let Some(bit) = bits.read_bit().map_err(payload_error)? {
                let next = match cursor {
                    TreeNode::Internal { zero, one, .. } => {
                        if bit {
                            &**one
                        } else {
                            &**zero
                        }
                    }
                    // only a single-leaf tree has a leaf at the cursor: every bit is one symbol
                    TreeNode::Leaf { .. } => cursor,
                };

                match next {
                    TreeNode::Leaf { symbol, .. } => {
                        pending.push(*symbol);
                        cursor = root;
                    }
                    TreeNode::Internal { .. } => cursor = next,
                }

                if pending.len() == pending.capacity() {
                    seen.add_bytes(&pending);
                    output.write_all(&pending).map_err(StreamError::Output)?;
                    written += pending.len() as u64;
                    pending.clear();
                }
            }

            if !core::ptr::eq(cursor, root) {
                return Err(StreamError::Malformed("payload ends in the middle of a code".to_string()));
            }
        }

        seen.add_bytes(&pending);
        output.write_all(&pending).map_err(StreamError::Output)?;
        written += pending.len() as u64;

        drop(bits);
        let mut extra = [0u8; 1];
        let trailing = loop {
            match input.read(&mut extra) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(StreamError::Input(e)),
            }
        };
        if trailing != 0 {
            return Err(StreamError::Malformed(format!(
                "payload is longer than the {} bytes the header declares",
                self.payload_len()
            )));
        }

        if seen != self.table {
            return Err(StreamError::Malformed(format!(
                "decoded symbol counts disagree with the header ({} bytes decoded, {} declared)",
                written, self.symbol_count
            )));
        }

        Ok(written)
    }
}

fn payload_error(e: io::Error) -> StreamError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        StreamError::Malformed("payload is shorter than the header's bit count".to_string())
    } else {
        StreamError::Input(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::encoder::Encoder;

    fn encode(data: &[u8]) -> Vec<u8> {
        let encoder = Encoder::new(FrequencyTable::from_bytes(data)).unwrap();
        let mut out = Vec::new();
        encoder.write_header(&mut out).unwrap();
        encoder.write_payload(&mut &data[..], out).unwrap()
    }

    fn decode(encoded: &[u8]) -> Result<Vec<u8>, StreamError> {
        let mut reader = encoded;
        let decoder = Decoder::read_header(&mut reader)?;
        let mut out = Vec::new();
        decoder.write_decoded(reader, &mut out)?;
        Ok(out)
    }

    #[test]
    fn decodes_aaab() {
        assert_eq!(decode(b"2\na3\nb1\n4\n\xE0").unwrap(), b"aaab");
    }

    #[test]
    fn padding_bits_are_ignored() {
        // the low four bits would decode as "aaaa" if they were read
        assert_eq!(decode(b"2\na3\nb1\n4\n\xEF").unwrap(), b"aaab");
    }

    #[test]
    fn single_symbol_payload() {
        assert_eq!(decode(b"1\nz9\n9\n\x00\x00").unwrap(), b"zzzzzzzzz");
    }

    #[test]
    fn empty_payload() {
        assert_eq!(decode(b"0\n0\n").unwrap(), b"");
    }

    #[test]
    fn tree_agrees_with_encoder() {
        let data = b"mississippi river banks";
        let encoder = Encoder::new(FrequencyTable::from_bytes(data)).unwrap();
        let decoder = Decoder::new(encoder.header()).unwrap();
        assert_eq!(decoder.tree().unwrap().codes(), *encoder.codes());
        assert_eq!(decoder.bit_count(), encoder.bit_count());
        assert_eq!(decode(&encode(data)).unwrap(), data);
    }

    #[test]
    fn rejects_wrong_bit_count() {
        let err = decode(b"2\na3\nb1\n5\n\xE0").unwrap_err();
        assert!(matches!(err, StreamError::Malformed(_)));
    }

    #[test]
    fn rejects_short_and_long_payloads() {
        assert!(matches!(decode(b"2\na3\nb1\n4\n").unwrap_err(), StreamError::Malformed(_)));
        assert!(matches!(decode(b"2\na3\nb1\n4\n\xE0\x00").unwrap_err(), StreamError::Malformed(_)));
    }

    #[test]
    fn rejects_payload_with_wrong_symbol_mix() {
        // right bit count, but 0000 decodes to four b's
        let err = decode(b"2\na3\nb1\n4\n\x00").unwrap_err();
        assert!(matches!(err, StreamError::Malformed(_)));
    }

    #[test]
    fn rejects_payload_ending_inside_a_code() {
        // c = 0, a = 10, b = 11; a header with total bits 15 whose payload ends on a 1
        let data = b"abcabcabc";
        let mut encoded = encode(data);
        let last = encoded.len() - 1;
        // flip bits so the stream is 0 0 ... followed by a dangling 1
        encoded[last - 1] = 0x00;
        encoded[last] = 0b0000_0010;
        let err = decode(&encoded).unwrap_err();
        assert!(matches!(err, StreamError::Malformed(_)));
    }
}
