// ECC Engine Core
// Ключи, подписи, гибридное шифрование и многосторонний Diffie-Hellman
// на curve25519, NIST P-256/P-384/P-521 и secp256k1

#![warn(clippy::all)]

// Модули
pub mod api;
pub mod config;
pub mod crypto;
pub mod error;
pub mod protocol;
pub mod utils;

// Re-exports для удобства
pub use config::{Config, SymmetricCipher};
pub use crypto::{Curve, CryptoState, EccData, KeyPair, DEFAULT_CURVE};
pub use error::{DhErrorKind, EccError, InvalidKeyReason, Result};
