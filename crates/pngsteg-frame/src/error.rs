/// Errors that can occur while framing or deframing a payload.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// A bit sequence handed to byte reconstruction is not a whole number of bytes.
    #[error("malformed bit sequence ({len} bits is not a multiple of 8)")]
    MalformedInput { len: usize },

    /// The payload source is not valid UTF-8.
    #[error("payload is not valid UTF-8: {0}")]
    EncodingError(#[source] std::str::Utf8Error),

    /// The payload does not fit the 32-bit length header.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The decoded length header is outside what the carrier could hold.
    #[error("no valid hidden message found (length header {len} exceeds max {max} bytes)")]
    InvalidHeader { len: u32, max: usize },

    /// The bit stream ended before the frame was complete.
    #[error("bit stream ended early (needed {needed} more bits, {available} available)")]
    TruncatedStream { needed: usize, available: usize },

    /// The extracted payload bytes are not valid UTF-8.
    #[error("hidden payload is not valid UTF-8: {0}")]
    InvalidEncoding(#[source] std::string::FromUtf8Error),
}

impl FrameError {
    /// Short, stable name for the failure, without the variable details.
    pub fn reason(&self) -> &'static str {
        match self {
            FrameError::MalformedInput { .. } => "malformed input",
            FrameError::EncodingError(_) => "encoding error",
            FrameError::PayloadTooLarge { .. } => "payload too large",
            FrameError::InvalidHeader { .. } => "invalid header",
            FrameError::TruncatedStream { .. } => "truncated stream",
            FrameError::InvalidEncoding(_) => "invalid encoding",
        }
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
