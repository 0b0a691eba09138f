//! Error types for cipher construction and keystream generation

use thiserror::Error;

/// Errors from Salsa20 family cipher operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// Key material has the wrong length
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Required key length in bytes
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Nonce has the wrong length
    #[error("invalid nonce length: expected {expected}, got {actual}")]
    InvalidNonceLength {
        /// Required nonce length in bytes
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Two buffers passed to an XOR have different lengths
    #[error("length mismatch: {left} bytes XOR {right} bytes")]
    LengthMismatch {
        /// Length of the destination buffer
        left: usize,
        /// Length of the source buffer
        right: usize,
    },

    /// The block counter would wrap and repeat keystream
    #[error("keystream exhausted: counter at {counter}, {requested} more blocks requested")]
    KeystreamExhausted {
        /// Block counter when the request was refused
        counter: u64,
        /// Number of blocks the request needed
        requested: u64,
    },
}

impl CipherError {
    /// Returns true if this error is fatal (unrecoverable)
    ///
    /// Keystream generation is deterministic, so retrying the same call can
    /// never succeed. Every variant is fatal to the operation that raised it.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::InvalidKeyLength { .. }
            | Self::InvalidNonceLength { .. }
            | Self::LengthMismatch { .. }
            | Self::KeystreamExhausted { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_errors_are_fatal() {
        let errors = [
            CipherError::InvalidKeyLength { expected: 32, actual: 16 },
            CipherError::InvalidNonceLength { expected: 8, actual: 12 },
            CipherError::LengthMismatch { left: 3, right: 4 },
            CipherError::KeystreamExhausted { counter: u64::MAX, requested: 1 },
        ];

        for err in errors {
            assert!(err.is_fatal(), "{err} should be fatal");
        }
    }

    #[test]
    fn error_display() {
        let err = CipherError::InvalidKeyLength { expected: 32, actual: 16 };
        assert_eq!(err.to_string(), "invalid key length: expected 32, got 16");

        let err = CipherError::KeystreamExhausted { counter: 10, requested: 2 };
        assert_eq!(err.to_string(), "keystream exhausted: counter at 10, 2 more blocks requested");
    }
}
