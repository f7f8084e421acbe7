//! Гибридное шифрование (ECIES)
//!
//! ## Конструкция
//! ```text
//! e  ← случайный скаляр на кривой получателя,  E = e·G
//! Z  = ECDH(e, R)                    (для curve25519: R в форме Монтгомери)
//! k, n = HKDF-SHA256(salt = E || R, ikm = Z, info = label || cipher_id)
//! envelope = header || E || AEAD(k, n, aad = header, plaintext)
//! ```
//!
//! Ключ AEAD уникален для каждого сообщения (новый `e`), поэтому nonce
//! выводится вместе с ключом, а не передаётся в конверте.

use crate::config::SymmetricCipher;
use crate::crypto::curve::with_suite;
use crate::crypto::kdf::hkdf_expand;
use crate::crypto::keys::KeyPair;
use crate::crypto::provider::CurveSuite;
use crate::crypto::state::CryptoState;
use crate::error::{EccError, Result};
use crate::protocol::envelope::{self, Envelope};
use aes_gcm::Aes256Gcm;
use chacha20poly1305::aead::generic_array::GenericArray;
use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::ChaCha20Poly1305;
use std::fmt;
use std::ops::Deref;
use zeroize::Zeroizing;

const HYBRID_LABEL: &[u8] = b"ecc-core hybrid v1";
const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// Результат операции движка: буфер с авторитетной длиной.
///
/// Пустой буфер и ошибка различаются здесь; в одно "нет результата" они
/// сворачиваются только в [`crate::api`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EccData(Vec<u8>);

impl EccData {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for EccData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for EccData {
    fn from(data: Vec<u8>) -> Self {
        Self(data)
    }
}

impl fmt::Debug for EccData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EccData({} bytes)", self.0.len())
    }
}

struct MessageKey {
    key: Zeroizing<[u8; KEY_LEN]>,
    nonce: [u8; NONCE_LEN],
}

fn derive_message_key(
    cipher: SymmetricCipher,
    shared: &[u8],
    ephemeral: &[u8],
    recipient: &[u8],
) -> Result<MessageKey> {
    let mut salt = Vec::new();
    salt.try_reserve_exact(ephemeral.len() + recipient.len())
        .map_err(|_| EccError::OutOfSecureMemory)?;
    salt.extend_from_slice(ephemeral);
    salt.extend_from_slice(recipient);

    let cipher_id = [cipher.id()];
    let mut okm = Zeroizing::new([0u8; KEY_LEN + NONCE_LEN]);
    hkdf_expand(&salt, shared, &[HYBRID_LABEL, &cipher_id[..]], &mut okm[..])?;

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    key.copy_from_slice(&okm[..KEY_LEN]);
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&okm[KEY_LEN..]);
    Ok(MessageKey { key, nonce })
}

fn aead_seal<A: Aead + KeyInit>(key: &MessageKey, aad: &[u8], msg: &[u8]) -> Result<Vec<u8>> {
    let aead = A::new_from_slice(&key.key[..])
        .map_err(|e| EccError::Unknown(format!("AEAD key: {}", e)))?;
    aead.encrypt(GenericArray::from_slice(&key.nonce), Payload { msg, aad })
        .map_err(|_| EccError::Unknown("AEAD encryption failed".to_string()))
}

fn aead_open<A: Aead + KeyInit>(key: &MessageKey, aad: &[u8], msg: &[u8]) -> Result<Vec<u8>> {
    let aead = A::new_from_slice(&key.key[..])
        .map_err(|_| EccError::AuthenticationFailure)?;
    Ok(aead.decrypt(GenericArray::from_slice(&key.nonce), Payload { msg, aad })?)
}

/// Зашифровать `data` для владельца `keypair`.
///
/// # Errors
///
/// - `EmptyInput` для пустых данных
/// - `InvalidInput`, если данные больше `max_message_size`
pub fn encrypt(data: &[u8], keypair: &KeyPair, state: &CryptoState) -> Result<EccData> {
    use tracing::trace;

    if data.is_empty() {
        return Err(EccError::EmptyInput);
    }
    let limit = state.config().max_message_size;
    if data.len() > limit {
        return Err(EccError::InvalidInput(format!(
            "message of {} bytes exceeds limit of {}",
            data.len(),
            limit
        )));
    }

    let cipher = state.config().cipher;
    let recipient = keypair.public_key();
    let (ephemeral, shared) = with_suite!(keypair.curve(), S => {
        state.with_rng(|rng| S::ecies_encapsulate(recipient, rng))?
    });

    let key = derive_message_key(cipher, &shared, &ephemeral, recipient)?;
    let header = envelope::header(cipher);
    let sealed = match cipher {
        SymmetricCipher::ChaCha20Poly1305 => aead_seal::<ChaCha20Poly1305>(&key, &header, data)?,
        SymmetricCipher::Aes256Gcm => aead_seal::<Aes256Gcm>(&key, &header, data)?,
    };

    let out = Envelope {
        cipher,
        ephemeral: &ephemeral,
        sealed: &sealed,
    }
    .to_bytes()?;

    trace!(
        target: "crypto::hybrid",
        curve = %keypair.curve(),
        cipher = ?cipher,
        plaintext_len = data.len(),
        envelope_len = out.len(),
        "Data encrypted"
    );

    Ok(EccData(out))
}

/// Расшифровать конверт приватным ключом `keypair`.
///
/// # Errors
///
/// - `NoPrivateKey` для публичной пары
/// - `InvalidInput`, если конверт длиннее, чем допускает `max_message_size`
/// - `AuthenticationFailure` для любого дефекта конверта
pub fn decrypt(data: &[u8], keypair: &KeyPair, state: &CryptoState) -> Result<EccData> {
    use tracing::{debug, trace};

    let private = keypair.private_key()?;

    let limit = state.config().max_message_size;
    let overhead = with_suite!(keypair.curve(), S => {
        envelope::HEADER_LEN + S::ECIES_EPHEMERAL_LEN + envelope::TAG_LEN
    });
    if data.len() > limit.saturating_add(overhead) {
        return Err(EccError::InvalidInput(format!(
            "envelope of {} bytes exceeds limit of {}",
            data.len(),
            limit.saturating_add(overhead)
        )));
    }

    let result = with_suite!(keypair.curve(), S => {
        Envelope::parse(data, S::ECIES_EPHEMERAL_LEN).and_then(|envelope| {
            let shared = S::ecies_decapsulate(private, envelope.ephemeral)
                .map_err(|_| EccError::AuthenticationFailure)?;
            let key = derive_message_key(
                envelope.cipher,
                &shared,
                envelope.ephemeral,
                keypair.public_key(),
            )?;
            match envelope.cipher {
                SymmetricCipher::ChaCha20Poly1305 => {
                    aead_open::<ChaCha20Poly1305>(&key, &envelope.header(), envelope.sealed)
                }
                SymmetricCipher::Aes256Gcm => {
                    aead_open::<Aes256Gcm>(&key, &envelope.header(), envelope.sealed)
                }
            }
        })
    });

    match result {
        Ok(plaintext) => {
            trace!(
                target: "crypto::hybrid",
                curve = %keypair.curve(),
                plaintext_len = plaintext.len(),
                "Data decrypted"
            );
            Ok(EccData(plaintext))
        }
        Err(EccError::OutOfSecureMemory) => Err(EccError::OutOfSecureMemory),
        Err(_) => {
            debug!(target: "crypto::hybrid", curve = %keypair.curve(), "Envelope rejected");
            Err(EccError::AuthenticationFailure)
        }
    }
}
