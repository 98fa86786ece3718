pub mod random;

use thiserror::Error;

/// Errors raised by the random, salt and prepend helpers
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: i32, max: i32 },

    #[error("Invalid salt length {0}, expected a value between 4 and 255")]
    InvalidSaltLength(usize),

    #[error("Salted buffer holds {actual} bytes but the embedded salt length is {expected}")]
    TruncatedSaltedBuffer { expected: usize, actual: usize },

    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(#[from] rand::Error),
}

pub type Result<T> = std::result::Result<T, CryptoError>;
