//! Криптографический модуль
//!
//! # Архитектура
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  api (Handle<T>, Option/bool)               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                ┌─────────────┴──────────────┬──────────────────┐
//!                ▼                            ▼                  ▼
//! ┌───────────────────────────┐  ┌───────────────────────┐  ┌──────────────────┐
//! │   CryptoState + KeyPair   │  │  signature / hybrid   │  │  handshake (DH)  │
//! │  - Конфигурация, RNG      │  │  - sign / verify      │  │  - dh1/dh2/dh3   │
//! │  - keygen / import        │  │  - ECIES encrypt      │  │  - dhn (relay)   │
//! │  - Зануление ключей       │  │  - envelope           │  │  - DhSession     │
//! └───────────────────────────┘  └───────────────────────┘  └──────────────────┘
//!                │                            │                  │
//!                └─────────────┬──────────────┴──────────────────┘
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │               CurveSuite (выбор по Curve)                   │
//! │  - curve25519: Ed25519 + X25519                             │
//! │  - p256 / p384 / p521 / secp256k1: ECDSA + ECDH             │
//! │  - HKDF-SHA256, ChaCha20-Poly1305 / AES-256-GCM             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Модули
//!
//! ### Core Traits
//! - [`provider`]: CurveSuite trait, вся арифметика кривой
//! - [`curve`]: идентификаторы кривых и их разбор
//!
//! ### Implementations
//! - [`suites`]: Curve25519, P-256, P-384, P-521, secp256k1
//!
//! ### Operations
//! - [`state`]: CryptoState
//! - [`keys`]: KeyPair
//! - [`signature`]: подписи
//! - [`hybrid`]: гибридное шифрование
//! - [`handshake`]: DH-обмен и его конечный автомат

// ============================================================================
// Core Traits
// ============================================================================

/// CurveSuite trait для выбора кривой во время выполнения
pub mod provider;

pub mod curve;

// ============================================================================
// Implementations
// ============================================================================

/// Реализации кривых
pub mod suites;

pub mod kdf;

// ============================================================================
// Operations
// ============================================================================

pub mod state;

pub mod keys;

pub mod signature;

pub mod hybrid;

/// Интерактивный Diffie-Hellman
pub mod handshake;

// ============================================================================
// Re-exports для удобства
// ============================================================================

pub use curve::{Curve, DEFAULT_CURVE};
pub use handshake::{dh1, dh2, dh3, dhn, DhKey, DhOffer, DhResponse, DhRole, DhSession, DhState};
pub use hybrid::{decrypt, encrypt, EccData};
pub use keys::{
    import_keypair, keygen, serialize_private_key, serialize_public_key, KeyPair,
    SerializedKeyPair,
};
pub use provider::CurveSuite;
pub use signature::{sign, verify, Signature};
pub use state::{free_state, new_state, CryptoState};
