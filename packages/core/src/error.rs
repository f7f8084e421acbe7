// Типы ошибок

use std::fmt;
use thiserror::Error;

/// Why a supplied key was rejected.
///
/// Length faults are always reported before point or scalar faults, so a
/// truncated key never surfaces as a generic `NotOnCurve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidKeyReason {
    /// Encoded key has the wrong number of bytes (or hex characters).
    WrongLength { expected: usize, actual: usize },
    /// Bytes do not decode to a valid point on the curve.
    NotOnCurve,
    /// Private scalar is zero or not below the group order.
    ScalarOutOfRange,
    /// Private key does not generate the supplied public key.
    Inconsistent,
}

impl fmt::Display for InvalidKeyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidKeyReason::WrongLength { expected, actual } => {
                write!(f, "wrong length: expected {}, got {}", expected, actual)
            }
            InvalidKeyReason::NotOnCurve => write!(f, "not a valid curve point"),
            InvalidKeyReason::ScalarOutOfRange => write!(f, "scalar out of range"),
            InvalidKeyReason::Inconsistent => {
                write!(f, "private key does not match public key")
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum EccError {
    #[error("Failed to initialize crypto state: {0}")]
    StateInit(String),

    #[error("Failed to generate keys: {0}")]
    KeyGen(String),

    #[error("Invalid key ({reason})")]
    InvalidKey { reason: InvalidKeyReason },

    #[error("Data can not have a length of zero")]
    EmptyInput,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Operation requires a private key")]
    NoPrivateKey,

    #[error("Unknown curve: {0}")]
    UnknownCurve(String),

    #[error("Out of secure memory")]
    OutOfSecureMemory,

    #[error("Authentication failed")]
    AuthenticationFailure,

    #[error("DH session is {actual}, expected {expected}")]
    InvalidSessionState {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl EccError {
    pub(crate) fn wrong_length(expected: usize, actual: usize) -> Self {
        EccError::InvalidKey {
            reason: InvalidKeyReason::WrongLength { expected, actual },
        }
    }

    pub(crate) fn not_on_curve() -> Self {
        EccError::InvalidKey {
            reason: InvalidKeyReason::NotOnCurve,
        }
    }

    pub(crate) fn scalar_out_of_range() -> Self {
        EccError::InvalidKey {
            reason: InvalidKeyReason::ScalarOutOfRange,
        }
    }

    /// Reason of an `InvalidKey` error, `None` for every other variant.
    pub fn invalid_key_reason(&self) -> Option<InvalidKeyReason> {
        match self {
            EccError::InvalidKey { reason } => Some(*reason),
            _ => None,
        }
    }

    /// Map this error onto the four-entry DH taxonomy.
    pub fn dh_kind(&self) -> DhErrorKind {
        match self {
            EccError::InvalidKey {
                reason: InvalidKeyReason::WrongLength { .. },
            } => DhErrorKind::InvalidKeyWrongLength,
            EccError::InvalidKey { .. } => DhErrorKind::InvalidKey,
            EccError::OutOfSecureMemory => DhErrorKind::OutOfSecureMemory,
            _ => DhErrorKind::Unknown,
        }
    }
}

/// DH failures as seen by callers of `dh1`/`dh2`/`dhn`/`dh3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DhErrorKind {
    Unknown,
    OutOfSecureMemory,
    InvalidKeyWrongLength,
    InvalidKey,
}

impl DhErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            DhErrorKind::Unknown => "Unknown Error",
            DhErrorKind::OutOfSecureMemory => "Out of secure memory",
            DhErrorKind::InvalidKeyWrongLength => "Invalid key (wrong length)",
            DhErrorKind::InvalidKey => "Invalid key",
        }
    }
}

impl fmt::Display for DhErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<rand::Error> for EccError {
    fn from(err: rand::Error) -> Self {
        EccError::KeyGen(err.to_string()) // RNG failures surface as keygen faults
    }
}

impl From<serde_json::Error> for EccError {
    fn from(err: serde_json::Error) -> Self {
        EccError::Serialization(err.to_string())
    }
}

impl From<chacha20poly1305::Error> for EccError {
    fn from(_: chacha20poly1305::Error) -> Self {
        EccError::AuthenticationFailure
    }
}

pub type Result<T> = std::result::Result<T, EccError>;
