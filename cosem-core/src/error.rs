use thiserror::Error;

/// Main error type for COSEM ciphering operations
///
/// Every failure is reported to the caller as-is; nothing is downgraded to
/// a default value and nothing is retried internally. Retrying an encode
/// with an unchanged frame counter would reuse a nonce, so retry policy
/// belongs to the protocol layer.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CosemError {
    /// Command has no ciphered (Glo) counterpart.
    #[error("command 0x{0:02X} has no Glo counterpart")]
    InvalidCommand(u8),

    /// Leading byte of a protected APDU is not one of the six Glo commands.
    #[error("unsupported command byte 0x{0:02X}")]
    UnsupportedCommand(u8),

    /// Security control byte is not one of the three defined modes.
    #[error("invalid security mode byte 0x{0:02X}")]
    InvalidSecurityMode(u8),

    /// Input ends before a mandatory field.
    #[error("buffer too short: need {needed} bytes, got {actual}")]
    BufferTooShort { needed: usize, actual: usize },

    /// Declared body length does not fit the remaining buffer.
    #[error("length mismatch: declared {declared} bytes, {remaining} remaining")]
    LengthMismatch { declared: usize, remaining: usize },

    /// Malformed length-of-length prefix in a variable-length count field.
    #[error("invalid length encoding 0x{0:02X}")]
    InvalidLengthEncoding(u8),

    /// Tag verification failed: tampering, wrong keys, or a mismatched
    /// frame counter.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The AEAD primitive refused the operation (e.g. payload exceeds the
    /// cipher's length limit).
    #[error("cipher failure")]
    CipherFailure,

    /// Key material has the wrong length for the cipher.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// System title is not exactly 8 bytes.
    #[error("invalid system title length: expected 8 bytes, got {0}")]
    InvalidSystemTitle(usize),
}

/// Result type alias for COSEM ciphering operations
pub type CosemResult<T> = Result<T, CosemError>;
