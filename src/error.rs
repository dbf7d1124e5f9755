use std::{error, fmt, io};

use symphonia::core::errors::Error as SymphoniaError;

// -------------------------------------------------------------------------------------------------

/// Provides an enumeration of all possible errors reported by waveform.
#[derive(Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    /// An option or constructor argument is invalid. Reported before any audio is read.
    ParameterError(String),
    /// The audio stream's container or codec is not a known or supported format.
    UnsupportedFormat,
    /// The audio format is recognized, but the stream is invalid or corrupt.
    InvalidData(String),
    /// The audio stream ended in the middle of a block or data structure.
    UnexpectedEndOfStream,
    AudioDecodingError(Box<dyn error::Error + Send + Sync>),
    IoError(io::Error),
}

impl Error {
    /// True for the known decoding failures: unsupported format, invalid data and truncated
    /// streams. All other errors are unexpected failures of the underlying decoder or IO.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat | Self::InvalidData(_) | Self::UnexpectedEndOfStream
        )
    }
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParameterError(str) => write!(f, "Invalid parameter: {str}"),
            Self::UnsupportedFormat => write!(f, "Unsupported audio format"),
            Self::InvalidData(str) => write!(f, "Invalid or corrupt audio data: {str}"),
            Self::UnexpectedEndOfStream => write!(f, "Unexpected end of audio stream"),
            Self::AudioDecodingError(err) => err.fmt(f),
            Self::IoError(err) => err.fmt(f),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IoError(err)
    }
}

impl From<SymphoniaError> for Error {
    fn from(err: SymphoniaError) -> Error {
        match err {
            SymphoniaError::Unsupported(_) => Error::UnsupportedFormat,
            SymphoniaError::DecodeError(str) => Error::InvalidData(str.to_string()),
            SymphoniaError::IoError(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                Error::UnexpectedEndOfStream
            }
            SymphoniaError::IoError(err) => Error::IoError(err),
            err => Error::AudioDecodingError(Box::new(err)),
        }
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_kinds() {
        assert!(Error::UnsupportedFormat.is_decode_error());
        assert!(Error::InvalidData("bad frame".to_string()).is_decode_error());
        assert!(Error::UnexpectedEndOfStream.is_decode_error());
        assert!(!Error::ParameterError("resolution".to_string()).is_decode_error());
        assert!(!Error::IoError(io::Error::other("broken pipe")).is_decode_error());
    }

    #[test]
    fn symphonia_error_conversion() {
        assert!(matches!(
            Error::from(SymphoniaError::Unsupported("codec")),
            Error::UnsupportedFormat
        ));
        assert!(matches!(
            Error::from(SymphoniaError::DecodeError("invalid frame header")),
            Error::InvalidData(_)
        ));
        assert!(matches!(
            Error::from(SymphoniaError::IoError(io::ErrorKind::UnexpectedEof.into())),
            Error::UnexpectedEndOfStream
        ));
        assert!(matches!(
            Error::from(SymphoniaError::ResetRequired),
            Error::AudioDecodingError(_)
        ));
    }
}
