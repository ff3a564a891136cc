use std::fmt;
use std::io;

use pngsteg_frame::FrameError;
use pngsteg_image::ImageIoError;
use pngsteg_pixel::StegError;

// Exit codes shared by every subcommand.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => USAGE,
        io::ErrorKind::InvalidData => DATA_INVALID,
        _ => FAILURE,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::MalformedInput { .. } => CliError::new(INTERNAL, format!("{context}: {err}")),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

pub fn steg_error(context: &str, err: StegError) -> CliError {
    match err {
        StegError::Frame(err) => frame_error(context, err),
        StegError::CapacityExceeded { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

pub fn image_error(context: &str, err: ImageIoError) -> CliError {
    match err {
        ImageIoError::Io(source) => io_error(context, source),
        ImageIoError::Grid(err) => steg_error(context, err),
        ImageIoError::Encode(_) => CliError::new(INTERNAL, format!("{context}: {err}")),
        other => CliError::new(USAGE, format!("{context}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn capacity_exceeded_is_data_invalid() {
        let err = steg_error(
            "encode failed",
            StegError::CapacityExceeded {
                needed: 40,
                capacity: 24,
            },
        );
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.contains("need 40 bits, capacity is 24 bits"));
    }

    #[test]
    fn decode_failures_are_data_invalid() {
        let err = steg_error(
            "decode failed",
            StegError::Frame(FrameError::InvalidHeader { len: 9, max: 2 }),
        );
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn validation_failures_are_usage() {
        let err = image_error(
            "invalid input",
            ImageIoError::NotFound {
                path: PathBuf::from("/nope.png"),
            },
        );
        assert_eq!(err.code, USAGE);
        assert_eq!(err.to_string(), "invalid input: input file does not exist: /nope.png");
    }

    #[test]
    fn permission_denied_keeps_its_code() {
        let err = io_error(
            "failed writing",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.code, PERMISSION_DENIED);
    }
}
