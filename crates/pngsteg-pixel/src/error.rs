use pngsteg_frame::FrameError;

/// Errors that can occur while embedding or extracting a message.
#[derive(Debug, thiserror::Error)]
pub enum StegError {
    /// The framed message needs more LSB slots than the grid has.
    #[error("message too large for the image: need {needed} bits, capacity is {capacity} bits")]
    CapacityExceeded { needed: usize, capacity: usize },

    /// A raw pixel buffer does not match the grid dimensions.
    #[error("pixel buffer size mismatch (expected {expected} bytes, got {actual})")]
    BufferSize { expected: usize, actual: usize },

    /// Framing or deframing failed.
    #[error(transparent)]
    Frame(#[from] FrameError),
}

pub type Result<T> = std::result::Result<T, StegError>;
