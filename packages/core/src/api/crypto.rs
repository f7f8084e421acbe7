// Ключи, подписи и шифрование на границе API
//
// Внутри движка "нет результата" и "пустой результат" различаются
// (`Err` и пустой `EccData`); здесь оба превращаются в `None`.

use super::{ApiError, Handle};
use crate::crypto::hybrid::{self, EccData};
use crate::crypto::keys::{self, KeyPair};
use crate::crypto::signature::{self, Signature};
use crate::crypto::state::CryptoState;
use crate::error::EccError;

fn collapse(result: crate::error::Result<EccData>, operation: &'static str) -> Option<Vec<u8>> {
    use tracing::debug;

    match result {
        Ok(data) if !data.is_empty() => Some(data.into_vec()),
        Ok(_) => None,
        Err(err) => {
            debug!(target: "api", operation, error = %err, "Operation returned no result");
            None
        }
    }
}

pub fn new_state() -> Option<Handle<CryptoState>> {
    CryptoState::new(None).ok().map(Handle::new)
}

pub fn free_state(state: Handle<CryptoState>) {
    state.release();
}

/// Новая пара ключей на кривой по умолчанию: (public, private, curve)
pub fn keygen() -> Option<(Vec<u8>, Vec<u8>, String)> {
    let state = CryptoState::new(None).ok()?;
    let keypair = keys::keygen(None, &state).ok()?;
    let private = keys::serialize_private_key(&keypair, &state).ok()?;
    Some((
        keys::serialize_public_key(&keypair),
        private.to_vec(),
        keypair.curve().name().to_string(),
    ))
}

pub fn new_keypair(
    public: &[u8],
    private: Option<&[u8]>,
    state: &Handle<CryptoState>,
) -> Option<Handle<KeyPair>> {
    keys::import_keypair(public, private, state).ok().map(Handle::new)
}

/// Подпись в hex; `None` для публичной пары
pub fn sign(data: &[u8], keypair: &Handle<KeyPair>, state: &Handle<CryptoState>) -> Option<String> {
    signature::sign(data, keypair, state)
        .ok()
        .map(|signature| signature.to_hex())
}

/// Неразборчивая (не-hex) подпись даёт `false`
pub fn verify(
    data: &str,
    signature_hex: &str,
    keypair: &Handle<KeyPair>,
    state: &Handle<CryptoState>,
) -> bool {
    match Signature::from_hex(signature_hex) {
        Ok(parsed) => signature::verify(data.as_bytes(), &parsed, keypair, state),
        Err(_) => false,
    }
}

/// # Errors
///
/// `ApiError::EmptyInput` для пустых данных; остальные ошибки дают `Ok(None)`.
pub fn encrypt(
    data: &[u8],
    keypair: &Handle<KeyPair>,
    state: &Handle<CryptoState>,
) -> Result<Option<Vec<u8>>, ApiError> {
    match hybrid::encrypt(data, keypair, state) {
        Err(EccError::EmptyInput) => Err(ApiError::EmptyInput),
        result => Ok(collapse(result, "encrypt")),
    }
}

pub fn decrypt(
    data: &[u8],
    keypair: &Handle<KeyPair>,
    state: &Handle<CryptoState>,
) -> Option<Vec<u8>> {
    collapse(hybrid::decrypt(data, keypair, state), "decrypt")
}
