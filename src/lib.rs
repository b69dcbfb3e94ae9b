//! huffpack: a byte-oriented Huffman compression codec.
//!
//! An encoded file starts with a small text header holding the frequency of every symbol that
//! occurs in the input, followed by the total number of payload bits. The decoder rebuilds the
//! exact same tree from that table, so the tree itself is never stored.
//!
//! ```no_run
//! use huffpack::{Codec, CodecConfig};
//!
//! let codec = Codec::new(CodecConfig::default());
//! let report = codec.encode("notes.txt")?;
//! println!("{} -> {} bytes ({:.2}%)", report.input_bytes, report.output_bytes, report.ratio());
//! codec.decode("notes.txt.huff")?;
//! # Ok::<(), huffpack::CodecError>(())
//! ```

/// Expands its body only when the `tracing` feature is enabled.
#[macro_export]
macro_rules! if_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(feature = "tracing")] {
                $($body)*
            }
        }
    };
}

pub mod codec;
pub mod compressor;
pub mod config;
pub mod error;
pub mod huffman;

#[cfg(test)]
mod tests;

pub use codec::{Codec, DecodeReport, EncodeReport};
pub use compressor::{Compressor, RoundTripTestResult};
pub use config::{CodecConfig, EmptyInputPolicy};
pub use error::CodecError;
pub use huffman::HuffmanCoding;
