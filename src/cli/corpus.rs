use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result, bail};
use huffpack::{Compressor, HuffmanCoding};
use voxell_timer::time_fn;
use walkdir::WalkDir;

use crate::cli::CorpusArgs;

/// Outcome of one file's roundtrip.
#[derive(Debug)]
pub struct CorpusEntry {
    pub passed: bool,
    pub original_size: usize,
    pub compressed_size: usize,
    pub decompressed_size: usize,
    pub compression_time: Duration,
    pub decompression_time: Duration,
    pub error: Option<String>,
}

impl CorpusEntry {
    pub fn ratio(&self) -> f64 {
        if self.original_size == 0 {
            1.0
        } else {
            self.compressed_size as f64 / self.original_size as f64
        }
    }

    pub fn bytes_saved(&self) -> isize {
        self.original_size as isize - self.compressed_size as isize
    }
}

pub fn corpus(args: CorpusArgs) -> Result<()> {
    let mut failed = 0usize;
    let mut total = 0usize;
    let (mut original_total, mut compressed_total) = (0usize, 0usize);

    for entry in WalkDir::new(&args.dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        let input = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let result = roundtrip_file(&input);

        total += 1;
        original_total += result.original_size;
        compressed_total += result.compressed_size;
        if !result.passed {
            failed += 1;
        }
        print_result(path, &result);
    }

    if total == 0 {
        bail!("no files found under {}", args.dir.display());
    }

    eprintln!(
        "======== SUMMARY ========\n\tfiles: {}\n\tfailed: {}\n\toriginal: {} bytes\n\tcompressed: {} bytes",
        total, failed, original_total, compressed_total
    );

    if failed > 0 {
        bail!("{} of {} files failed the roundtrip", failed, total);
    }
    Ok(())
}

pub fn roundtrip_file(input: &[u8]) -> CorpusEntry {
    let mut compressor = HuffmanCoding;

    let (compressed, compression_time) = time_fn(|| compressor.compress_bytes(input));

    let compressed = match compressed {
        Ok(c) => c,
        Err(e) => {
            return CorpusEntry {
                passed: false,
                original_size: input.len(),
                compressed_size: 0,
                decompressed_size: 0,
                compression_time,
                decompression_time: Duration::ZERO,
                error: Some(e.to_string()),
            };
        }
    };

    let (decompressed, decompression_time) = time_fn(|| compressor.decompress_bytes(&compressed));

    let (passed, decompressed_size, error) = match decompressed {
        Ok(d) if d == input => (true, d.len(), None),
        Ok(d) => (false, d.len(), Some("decoded data differs from the original".to_string())),
        Err(e) => (false, 0, Some(e.to_string())),
    };

    CorpusEntry {
        passed,
        original_size: input.len(),
        compressed_size: compressed.len(),
        decompressed_size,
        compression_time,
        decompression_time,
        error,
    }
}

fn print_result(path: &Path, result: &CorpusEntry) {
    let percent_saved = if result.original_size == 0 {
        0.0
    } else {
        (result.bytes_saved() as f64) / (result.original_size as f64) * 100.0
    };

    let passed_string = if result.passed { "PASSED" } else { "FAILED" };
    eprintln!(
        "======== {} {} ========\n\t{:.0?} encode\n\t{:.0?} decode\n\toriginal: {} bytes\n\tcompressed: {} bytes\n\tdecompressed: {} bytes\n\tratio: {:.1}% (compressed/original)\n\tsaved: {:+} bytes ({:+.1}%)\n\t{}",
        passed_string,
        path.display(),
        result.compression_time,
        result.decompression_time,
        result.original_size,
        result.compressed_size,
        result.decompressed_size,
        result.ratio() * 100.0,
        result.bytes_saved(),
        percent_saved,
        result.error.as_deref().map(|e| format!("error: {}", e)).unwrap_or_default()
    );
}
