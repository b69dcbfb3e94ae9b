use std::io::{self, Read, Write};

use crate::{
    error::{CodecError, Result},
    huffman::{
        StreamError,
        bits::{BitWriter, bytes_for_bits},
        code::CodeTable,
        frequency::FrequencyTable,
        header::EncodedHeader,
        tree::HuffmanTree,
    },
};

/// Encodes data whose symbol counts are known up front.
///
/// Built from the frequency table of a first pass; [`write_payload`](Encoder::write_payload)
/// then consumes the same data a second time.
#[derive(Debug, Clone)]
pub struct Encoder {
    table: FrequencyTable,
    codes: CodeTable,
    bit_count: u64,
}

impl Encoder {
    pub fn new(table: FrequencyTable) -> Result<Self> {
        let codes = match HuffmanTree::build(&table)? {
            Some(tree) => tree.codes(),
            None => CodeTable::default(),
        };
        let bit_count = codes
            .encoded_bits(&table)
            .ok_or_else(|| CodecError::malformed("payload bit count overflows 64 bits"))?;

        if_tracing! {
            tracing::debug!(target = "huffman", distinct = codes.len(), bit_count, "encoder ready");
        }

        Ok(Self { table, codes, bit_count })
    }

    pub const fn codes(&self) -> &CodeTable {
        &self.codes
    }

    pub const fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// Length of the payload in bits.
    pub const fn bit_count(&self) -> u64 {
        self.bit_count
    }

    /// Length of the payload in bytes, the last one possibly padded.
    pub const fn payload_len(&self) -> u64 {
        bytes_for_bits(self.bit_count)
    }

    pub fn header(&self) -> EncodedHeader {
        EncodedHeader::new(self.table.clone(), self.bit_count)
    }

    /// Writes the header, returning its length in bytes.
    pub fn write_header<W: Write>(&self, output: &mut W) -> io::Result<u64> {
        self.header().write_to(output)
    }

    /// Packs the code of every byte of `input` into `output`.
    ///
    /// `input` must yield exactly the bytes the frequency table was built from.
    pub fn write_payload<R: Read, W: Write>(&self, input: &mut R, mut output: W) -> Result<W, StreamError> {
        let mut bits = BitWriter::new(&mut output);
        let mut chunk = [0u8; 8192];
        loop {
            let n = match input.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(StreamError::Input(e)),
            };
            for &byte in &chunk[..n] {
                let code = self.codes.get(byte).ok_or_else(changed_input)?;
                bits.write_code(code).map_err(StreamError::Output)?;
            }
            if bits.bits_written() > self.bit_count {
                return Err(changed_input());
            }
        }

        let written = bits.finish().map_err(StreamError::Output)?;
        if written != self.bit_count {
            return Err(changed_input());
        }
        Ok(output)
    }
}

fn changed_input() -> StreamError {
    StreamError::Input(io::Error::new(
        io::ErrorKind::InvalidData,
        "input changed between the counting and encoding passes",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(data: &[u8]) -> Vec<u8> {
        let encoder = Encoder::new(FrequencyTable::from_bytes(data)).unwrap();
        let mut out = Vec::new();
        encoder.write_header(&mut out).unwrap();
        encoder.write_payload(&mut &data[..], out).unwrap()
    }

    #[test]
    fn aaab_layout() {
        // b = 0, a = 1
        assert_eq!(encode(b"aaab"), b"2\na3\nb1\n4\n\xE0");
    }

    #[test]
    fn single_symbol_costs_one_bit_each() {
        let encoder = Encoder::new(FrequencyTable::from_bytes(b"zzzzzzzzz")).unwrap();
        assert_eq!(encoder.bit_count(), 9);
        assert_eq!(encoder.payload_len(), 2);
        assert_eq!(encode(b"zzzzzzzzz"), b"1\nz9\n9\n\x00\x00");
    }

    #[test]
    fn empty_input_is_a_bare_header() {
        let encoder = Encoder::new(FrequencyTable::new()).unwrap();
        assert_eq!(encoder.bit_count(), 0);
        assert_eq!(encode(b""), b"0\n0\n");
    }

    #[test]
    fn changed_second_pass_is_detected() {
        let encoder = Encoder::new(FrequencyTable::from_bytes(b"aaab")).unwrap();
        let err = encoder.write_payload(&mut &b"aaac"[..], Vec::new()).unwrap_err();
        assert!(matches!(err, StreamError::Input(ref e) if e.kind() == io::ErrorKind::InvalidData));

        let err = encoder.write_payload(&mut &b"aaabb"[..], Vec::new()).unwrap_err();
        assert!(matches!(err, StreamError::Input(_)));

        let err = encoder.write_payload(&mut &b"aab"[..], Vec::new()).unwrap_err();
        assert!(matches!(err, StreamError::Input(_)));
    }

    #[test]
    fn deterministic_output() {
        let data = b"she sells sea shells by the sea shore";
        assert_eq!(encode(data), encode(data));
    }
}
