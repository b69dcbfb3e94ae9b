use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors produced by the codec.
///
/// Every variant carries enough context to be shown to a user as-is.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The input could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input was opened but reading from it failed.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The destination could not be created, written or flushed.
    #[error("cannot write output {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The encoded header could not be parsed or disagrees with the payload.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// The input holds zero bytes and the configuration rejects empty inputs.
    #[error("{} is empty, nothing to encode", path.display())]
    EmptyInput { path: PathBuf },

    /// The configuration file could not be used.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CodecError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedHeader(message.into())
    }

    pub(crate) fn output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::OutputWrite { path: path.into(), source }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read { path: path.into(), source }
    }
}

pub type Result<T, E = CodecError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_path() {
        let err = CodecError::FileNotFound {
            path: PathBuf::from("missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.to_string(), "cannot open missing.txt: no such file");

        let err = CodecError::EmptyInput { path: PathBuf::from("empty.bin") };
        assert_eq!(err.to_string(), "empty.bin is empty, nothing to encode");
    }

    #[test]
    fn malformed_header_message() {
        assert_eq!(CodecError::malformed("bad count").to_string(), "malformed header: bad count");
    }
}
