//! Text header that precedes the packed payload.
//!
//! ```text
//! <distinct symbol count>\n
//! <symbol byte><frequency>\n     repeated, ascending symbol order
//! <payload bit count>\n
//! <payload>
//! ```

use std::io::{self, BufRead, Read, Write};

use crate::huffman::frequency::FrequencyTable;

/// Longest decimal `u64` plus its newline.
const MAX_LINE: u64 = 21;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedHeader {
    table: FrequencyTable,
    bit_count: u64,
}

impl EncodedHeader {
    pub const fn new(table: FrequencyTable, bit_count: u64) -> Self {
        Self { table, bit_count }
    }

    pub const fn table(&self) -> &FrequencyTable {
        &self.table
    }

    pub const fn bit_count(&self) -> u64 {
        self.bit_count
    }

    pub fn into_table(self) -> FrequencyTable {
        self.table
    }

    /// Writes the header and returns its length in bytes.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<u64> {
        let mut buf = format!("{}\n", self.table.distinct()).into_bytes();
        for (symbol, count) in self.table.symbols() {
            buf.push(symbol);
            buf.extend_from_slice(format!("{}\n", count).as_bytes());
        }
        buf.extend_from_slice(format!("{}\n", self.bit_count).as_bytes());
        writer.write_all(&buf)?;
        Ok(buf.len() as u64)
    }

    /// Parses a header, leaving `reader` positioned at the first payload byte.
    ///
    /// # Errors
    ///
    /// Content problems are reported as [`io::ErrorKind::InvalidData`], a header cut short as
    /// [`io::ErrorKind::UnexpectedEof`]. Other kinds come from the underlying reader.
    pub fn read_from<R: BufRead>(reader: &mut R) -> io::Result<Self> {
        let distinct = read_decimal_line(reader, "symbol count")?;
        if distinct > 256 {
            return Err(invalid(format!("symbol count {} exceeds 256", distinct)));
        }

        let mut table = FrequencyTable::new();
        let mut previous: Option<u8> = None;
        for _ in 0..distinct {
            let mut symbol = [0u8; 1];
            reader.read_exact(&mut symbol)?;
            let symbol = symbol[0];
            if previous.is_some_and(|p| p >= symbol) {
                return Err(invalid(format!(
                    "symbol 0x{:02x} is out of order or repeated",
                    symbol
                )));
            }
            previous = Some(symbol);

            let count = read_decimal_line(reader, "frequency")?;
            if count == 0 {
                return Err(invalid(format!("symbol 0x{:02x} has a zero frequency", symbol)));
            }
            table.set(symbol, count);
        }

        let bit_count = read_decimal_line(reader, "bit count")?;
        Ok(Self { table, bit_count })
    }
}

fn invalid(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

fn read_decimal_line<R: BufRead>(reader: &mut R, field: &str) -> io::Result<u64> {
    let mut line = Vec::new();
    reader.by_ref().take(MAX_LINE).read_until(b'\n', &mut line)?;
    match line.pop() {
        Some(b'\n') => {}
        Some(_) if line.len() as u64 + 1 == MAX_LINE => {
            return Err(invalid(format!("{} is too long", field)));
        }
        _ => {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("header ended while reading {}", field),
            ));
        }
    }
    if line.is_empty() || !line.iter().all(u8::is_ascii_digit) {
        return Err(invalid(format!(
            "{} is not a decimal number: {:?}",
            field,
            String::from_utf8_lossy(&line)
        )));
    }
    if line.len() > 1 && line[0] == b'0' {
        return Err(invalid(format!(
            "{} has a leading zero: {:?}",
            field,
            String::from_utf8_lossy(&line)
        )));
    }
    // all digits, so this is valid utf-8
    let text = core::str::from_utf8(&line).map_err(|e| invalid(e.to_string()))?;
    text.parse::<u64>()
        .map_err(|_| invalid(format!("{} {} does not fit in 64 bits", field, text)))
}
