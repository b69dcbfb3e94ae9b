//! MSB-first bit packing on top of `bitbit`, with the bit accounting the payload needs.

use std::io::{self, Read, Write};

use arcode::bitbit::{self, MSB};

use crate::huffman::code::Code;

/// Packs codes into bytes, most significant bit first, counting every bit written.
pub struct BitWriter<W: Write> {
    inner: bitbit::BitWriter<W>,
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: bitbit::BitWriter::new(inner),
            bits_written: 0,
        }
    }

    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.inner.write_bit(bit)?;
        self.bits_written += 1;
        Ok(())
    }

    pub fn write_code(&mut self, code: &Code) -> io::Result<()> {
        for &bit in code.bits() {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    pub const fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Zero-pads the final partial byte and returns the number of bits written.
    pub fn finish(mut self) -> io::Result<u64> {
        if self.bits_written % 8 != 0 {
            self.inner.pad_to_byte()?;
        }
        Ok(self.bits_written)
    }
}

/// Reads up to a fixed number of bits, most significant bit first.
///
/// Bits past the limit, such as the padding of the last byte, are never returned, and no byte
/// beyond the one holding the last bit is pulled from the source.
pub struct BitReader<R: Read> {
    inner: bitbit::BitReader<R, MSB>,
    remaining: u64,
}

impl<R: Read> BitReader<R> {
    pub fn new(inner: R, bit_limit: u64) -> Self {
        Self {
            inner: bitbit::BitReader::new(inner),
            remaining: bit_limit,
        }
    }

    /// Next bit, or `None` once the limit is reached.
    ///
    /// # Errors
    ///
    /// [`io::ErrorKind::UnexpectedEof`] if the stream ends before the limit.
    pub fn read_bit(&mut self) -> io::Result<Option<bool>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        let bit = self.inner.read_bit()?;
        self.remaining -= 1;
        Ok(Some(bit))
    }

    pub const fn remaining(&self) -> u64 {
        self.remaining
    }
}

/// Number of whole bytes needed to hold `bits`.
pub const fn bytes_for_bits(bits: u64) -> u64 {
    bits.div_ceil(8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn packs_msb_first_and_pads() {
        let mut out = Vec::new();
        let mut writer = BitWriter::new(&mut out);
        for bit in bits("1011000111") {
            writer.write_bit(bit).unwrap();
        }
        assert_eq!(writer.finish().unwrap(), 10);
        assert_eq!(out, vec![0b1011_0001, 0b1100_0000]);
    }

    #[test]
    fn whole_bytes_have_no_padding_byte() {
        let mut out = Vec::new();
        let mut writer = BitWriter::new(&mut out);
        writer.write_code(&Code::from(bits("11110000").as_slice())).unwrap();
        assert_eq!(writer.bits_written(), 8);
        writer.finish().unwrap();
        assert_eq!(out, vec![0xF0]);
    }

    #[test]
    fn reader_stops_at_limit() {
        let data = [0b1011_0001u8, 0b1111_1111];
        let mut reader = BitReader::new(&data[..], 10);
        let mut got = vec![];
        while let Some(bit) = reader.read_bit().unwrap() {
            got.push(bit);
        }
        assert_eq!(got, bits("1011000111"));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn reader_leaves_bytes_past_the_limit() {
        let data = [0xA5u8, 0x01, 0x02];
        let mut source = &data[..];
        let mut reader = BitReader::new(&mut source, 9);
        while reader.read_bit().unwrap().is_some() {}
        drop(reader);
        assert_eq!(source, &[0x02]);
    }

    #[test]
    fn reader_reports_short_stream() {
        let data = [0xFFu8];
        let mut reader = BitReader::new(&data[..], 9);
        for _ in 0..8 {
            assert_eq!(reader.read_bit().unwrap(), Some(true));
        }
        let err = reader.read_bit().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn byte_rounding() {
        assert_eq!(bytes_for_bits(0), 0);
        assert_eq!(bytes_for_bits(1), 1);
        assert_eq!(bytes_for_bits(8), 1);
        assert_eq!(bytes_for_bits(9), 2);
    }
}
