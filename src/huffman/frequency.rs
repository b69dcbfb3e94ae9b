use std::io::{self, Read};

/// Occurrence counts for all 256 byte values.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    pub const fn new() -> Self {
        Self { counts: [0; 256] }
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.add_bytes(data);
        table
    }

    /// Tally every byte produced by `reader`, returning the table and the number of bytes read.
    pub fn from_reader<R: Read>(reader: &mut R) -> io::Result<(Self, u64)> {
        let mut table = Self::new();
        let mut chunk = [0u8; 8192];
        let mut total = 0u64;
        loop {
            let n = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            table.add_bytes(&chunk[..n]);
            total += n as u64;
        }
        Ok((table, total))
    }

    pub fn add_bytes(&mut self, data: &[u8]) {
        for &b in data {
            self.counts[b as usize] += 1;
        }
    }

    pub fn set(&mut self, symbol: u8, count: u64) {
        self.counts[symbol as usize] = count;
    }

    pub const fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Symbols with a nonzero count, in ascending symbol order.
    pub fn symbols(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count != 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c != 0).count()
    }

    /// Sum of all counts, `None` on overflow.
    pub fn total(&self) -> Option<u64> {
        self.counts.iter().try_fold(0u64, |acc, &c| acc.checked_add(c))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.symbols()).finish()
    }
}
