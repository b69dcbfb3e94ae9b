//! File-level encode and decode.

use std::{
    ffi::{OsStr, OsString},
    fs::{self, File},
    io::{self, BufReader, BufWriter, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Serialize;
use voxell_timer::time_fn;

use crate::{
    config::{CodecConfig, EmptyInputPolicy},
    error::{CodecError, Result},
    huffman::{CodeTable, Decoder, Encoder, FrequencyTable, HuffmanTree},
};

/// Outcome of a successful encode.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EncodeReport {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Size of the input file.
    pub input_bytes: u64,
    /// Size of the packed payload: the bit count rounded up to whole bytes.
    pub output_bytes: u64,
    pub header_bytes: u64,
    pub bit_count: u64,
    pub distinct_symbols: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl EncodeReport {
    /// Space saved by the payload, in percent of the input. `0.0` for empty input.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        (self.input_bytes as f64 - self.output_bytes as f64) / self.input_bytes as f64 * 100.0
    }

    /// Size of the whole encoded file, header included.
    pub const fn encoded_file_bytes(&self) -> u64 {
        self.header_bytes + self.output_bytes
    }
}

/// Outcome of a successful decode.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DecodeReport {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Size of the encoded file.
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub bit_count: u64,
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Encodes and decodes files according to a [`CodecConfig`].
///
/// Every call opens its own handles and builds its own tables, so one `Codec` can serve any
/// number of independent calls.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub const fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// `input` with the configured extension appended.
    pub fn encoded_path(&self, input: &Path) -> PathBuf {
        let mut name = OsString::from(input.as_os_str());
        name.push(&self.config.extension);
        PathBuf::from(name)
    }

    /// `input` with the configured extension stripped.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutputWrite`] if `input` does not end with the extension, or nothing is left
    /// once it is removed.
    pub fn decoded_path(&self, input: &Path) -> Result<PathBuf> {
        let invalid = |reason: String| CodecError::output(input, io::Error::new(io::ErrorKind::InvalidInput, reason));

        let name = input
            .file_name()
            .ok_or_else(|| invalid("input has no file name".to_string()))?;
        let stem = name
            .as_encoded_bytes()
            .strip_suffix(self.config.extension.as_bytes())
            .ok_or_else(|| invalid(format!("file name does not end with {:?}", self.config.extension)))?;
        if stem.is_empty() {
            return Err(invalid(format!("file name is only the extension {:?}", self.config.extension)));
        }
        // SAFETY: `stem` is `name` with a non-empty UTF-8 suffix removed.
        let stem = unsafe { OsStr::from_encoded_bytes_unchecked(stem) };
        Ok(input.with_file_name(stem))
    }

    /// Encodes `input` into `input` + extension.
    pub fn encode(&self, input: impl AsRef<Path>) -> Result<EncodeReport> {
        let input = input.as_ref();
        self.encode_to(input, self.encoded_path(input))
    }

    /// Encodes `input` into `output`, creating or truncating it.
    pub fn encode_to(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<EncodeReport> {
        let (input, output) = (input.as_ref(), output.as_ref());
        let (report, elapsed) = time_fn(|| self.write_encoded(input, output));
        let report = EncodeReport { elapsed, ..report? };

        if_tracing! {
            tracing::info!(
                event = "encode_complete",
                input = %input.display(),
                output = %output.display(),
                elapsed_ms = %report.elapsed.as_millis(),
                input_bytes = report.input_bytes,
                output_bytes = report.output_bytes,
                ratio = report.ratio(),
                "encode finished"
            );
        }

        Ok(report)
    }

    fn write_encoded(&self, input: &Path, output: &Path) -> Result<EncodeReport> {
        if_tracing! {
            tracing::debug!(event = "encode_start", input = %input.display(), output = %output.display());
        }

        let file = open_input(input)?;
        let mut reader = BufReader::with_capacity(self.config.buffer_capacity, file);
        let (table, input_bytes) = FrequencyTable::from_reader(&mut reader).map_err(|e| CodecError::read(input, e))?;

        if input_bytes == 0 && self.config.empty_input == EmptyInputPolicy::Reject {
            if_tracing! {
                tracing::warn!(event = "empty_input", input = %input.display(), "refusing to encode empty input");
            }
            return Err(CodecError::EmptyInput { path: input.to_path_buf() });
        }

        let encoder = Encoder::new(table)?;
        reader
            .seek(SeekFrom::Start(0))
            .map_err(|e| CodecError::read(input, e))?;

        refuse_overwriting_input(input, output)?;
        let mut guard = PartialOutput::create(output, self.config.cleanup_partial_output)?;
        let mut writer = BufWriter::with_capacity(self.config.buffer_capacity, guard.file()?);

        let header_bytes = encoder
            .write_header(&mut writer)
            .map_err(|e| CodecError::output(output, e))?;
        let writer = encoder
            .write_payload(&mut reader, writer)
            .map_err(|e| e.into_codec_error(input, output))?;
        finish_writer(writer, output)?;
        guard.keep();

        let report = EncodeReport {
            input_path: input.to_path_buf(),
            output_path: output.to_path_buf(),
            input_bytes,
            output_bytes: encoder.payload_len(),
            header_bytes,
            bit_count: encoder.bit_count(),
            distinct_symbols: encoder.codes().len(),
            elapsed: Duration::ZERO,
        };
        Ok(report)
    }

    /// Decodes `input` into `input` with the extension stripped.
    pub fn decode(&self, input: impl AsRef<Path>) -> Result<DecodeReport> {
        self.decode_into(input.as_ref(), None)
    }

    /// Decodes `input` into `output`, creating or truncating it.
    pub fn decode_to(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<DecodeReport> {
        self.decode_into(input.as_ref(), Some(output.as_ref()))
    }

    fn decode_into(&self, input: &Path, output: Option<&Path>) -> Result<DecodeReport> {
        let (report, elapsed) = time_fn(|| self.write_decoded(input, output));
        let report = DecodeReport { elapsed, ..report? };

        if_tracing! {
            tracing::info!(
                event = "decode_complete",
                input = %input.display(),
                output = %report.output_path.display(),
                elapsed_ms = %report.elapsed.as_millis(),
                decompressed_len = report.output_bytes,
                "decode finished"
            );
        }

        Ok(report)
    }

    fn write_decoded(&self, input: &Path, output: Option<&Path>) -> Result<DecodeReport> {
        let file = open_input(input)?;
        let input_bytes = file.metadata().map_err(|e| CodecError::read(input, e))?.len();
        let mut reader = BufReader::with_capacity(self.config.buffer_capacity, file);

        let decoder = Decoder::read_header(&mut reader).map_err(|e| {
            let e = e.into_codec_error(input, Path::new(""));
            if_tracing! {
                tracing::error!(event = "header_rejected", input = %input.display(), error = %e);
            }
            e
        })?;

        let output = match output {
            Some(path) => path.to_path_buf(),
            None => self.decoded_path(input)?,
        };

        if_tracing! {
            tracing::debug!(
                event = "decode_start",
                input = %input.display(),
                output = %output.display(),
                bit_count = decoder.bit_count(),
                "header parsed"
            );
        }

        refuse_overwriting_input(input, &output)?;
        let mut guard = PartialOutput::create(&output, self.config.cleanup_partial_output)?;
        let mut writer = BufWriter::with_capacity(self.config.buffer_capacity, guard.file()?);

        let output_bytes = decoder
            .write_decoded(&mut reader, &mut writer)
            .map_err(|e| e.into_codec_error(input, &output))?;
        finish_writer(writer, &output)?;
        guard.keep();

        let report = DecodeReport {
            input_path: input.to_path_buf(),
            output_path: output,
            input_bytes,
            output_bytes,
            bit_count: decoder.bit_count(),
            elapsed: Duration::ZERO,
        };
        Ok(report)
    }

    /// Frequency table and derived codes of `input`, without writing anything.
    pub fn code_table(&self, input: impl AsRef<Path>) -> Result<(FrequencyTable, CodeTable)> {
        let input = input.as_ref();
        let file = open_input(input)?;
        let mut reader = BufReader::with_capacity(self.config.buffer_capacity, file);
        let (table, _) = FrequencyTable::from_reader(&mut reader).map_err(|e| CodecError::read(input, e))?;
        let codes = HuffmanTree::build(&table)?
            .map(|tree| tree.codes())
            .unwrap_or_default();
        Ok((table, codes))
    }
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| {
        if_tracing! {
            tracing::error!(event = "open_failed", path = %path.display(), error = %source);
        }
        CodecError::FileNotFound {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn refuse_overwriting_input(input: &Path, output: &Path) -> Result<()> {
    match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(a), Ok(b)) if a == b => Err(CodecError::output(
            output,
            io::Error::new(io::ErrorKind::InvalidInput, "output would overwrite the input"),
        )),
        _ => Ok(()),
    }
}

fn finish_writer<W: Write>(writer: BufWriter<W>, output: &Path) -> Result<W> {
    writer
        .into_inner()
        .map_err(|e| CodecError::output(output, e.into_error()))
}

/// An output file that is deleted on drop unless [`keep`](PartialOutput::keep) was called.
#[derive(Debug)]
struct PartialOutput {
    path: PathBuf,
    file: Option<File>,
    remove_on_drop: bool,
}

impl PartialOutput {
    fn create(path: &Path, remove_on_failure: bool) -> Result<Self> {
        let file = File::create(path).map_err(|e| {
            if_tracing! {
                tracing::error!(event = "create_failed", path = %path.display(), error = %e);
            }
            CodecError::output(path, e)
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
            remove_on_drop: remove_on_failure,
        })
    }

    fn file(&mut self) -> Result<File> {
        self.file.take().ok_or_else(|| {
            CodecError::output(&self.path, io::Error::other("output handle already taken"))
        })
    }

    fn keep(&mut self) {
        self.remove_on_drop = false;
    }
}

impl Drop for PartialOutput {
    fn drop(&mut self) {
        if !self.remove_on_drop {
            return;
        }
        // close our handle first, if still held
        self.file.take();
        let _removed = fs::remove_file(&self.path);
        if_tracing! {
            tracing::warn!(event = "partial_output_removed", path = %self.path.display(), ok = _removed.is_ok());
        }
    }
}
