// Подписи
//
// Ed25519 детерминирован. ECDSA подписывает по RFC 6979 с дополнительной
// энтропией из генератора состояния.

use crate::crypto::curve::with_suite;
use crate::crypto::keys::KeyPair;
use crate::crypto::provider::CurveSuite;
use crate::crypto::state::CryptoState;
use crate::error::{EccError, Result};
use std::fmt;

/// Подпись фиксированной для кривой длины (`r || s` для ECDSA)
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl Signature {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Разобрать hex-строку. Длину не проверяем: это делает `verify`.
    pub fn from_hex(s: &str) -> Result<Self> {
        hex::decode(s)
            .map(Self)
            .map_err(|e| EccError::InvalidInput(format!("signature is not hex: {}", e)))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

/// Подписать данные. Пустые данные допустимы.
pub fn sign(data: &[u8], keypair: &KeyPair, state: &CryptoState) -> Result<Signature> {
    use tracing::trace;

    let private = keypair.private_key()?;
    let bytes = with_suite!(keypair.curve(), S => {
        state.with_rng(|rng| S::sign(private, data, rng))?
    });

    trace!(
        target: "crypto::signature",
        curve = %keypair.curve(),
        data_len = data.len(),
        "Data signed"
    );

    Ok(Signature(bytes))
}

/// Проверить подпись.
///
/// Никогда не возвращает ошибку: несовпадение и неразборчивая подпись
/// (неверная длина, невалидные компоненты) дают `false`.
pub fn verify(data: &[u8], signature: &Signature, keypair: &KeyPair, _state: &CryptoState) -> bool {
    use tracing::trace;

    let valid = with_suite!(keypair.curve(), S => {
        signature.0.len() == S::SIGNATURE_LEN
            && S::verify(keypair.public_key(), data, &signature.0)
    });

    trace!(
        target: "crypto::signature",
        curve = %keypair.curve(),
        valid,
        "Signature checked"
    );

    valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::crypto::curve::Curve;
    use crate::crypto::keys::{import_keypair, keygen};

    #[test]
    fn test_sign_verify_all_curves() {
        let state = CryptoState::new(Some(Config::default())).unwrap();
        for curve in Curve::ALL {
            let kp = keygen(Some(curve), &state).unwrap();
            let messages: [&[u8]; 3] = [b"", b"hello", &[0u8; 1000]];
            for message in messages {
                let signature = sign(message, &kp, &state).unwrap();
                assert_eq!(
                    signature.as_bytes().len(),
                    with_suite!(curve, S => S::SIGNATURE_LEN)
                );
                assert!(verify(message, &signature, &kp, &state), "{}", curve);
            }
        }
    }

    #[test]
    fn test_verify_rejects_wrong_message_and_malformed_signature() {
        let state = CryptoState::new(None).unwrap();
        let kp = keygen(Some(Curve::P256), &state).unwrap();
        let signature = sign(b"message", &kp, &state).unwrap();

        assert!(!verify(b"massage", &signature, &kp, &state));
        assert!(!verify(b"message", &Signature::from_bytes(&[0u8; 10]), &kp, &state));
        assert!(!verify(b"message", &Signature::from_bytes(&[0u8; 64]), &kp, &state));
    }

    #[test]
    fn test_public_only_pair_cannot_sign() {
        let state = CryptoState::new(None).unwrap();
        let kp = keygen(None, &state).unwrap();
        let public_only = import_keypair(kp.public_key(), None, &state).unwrap();

        assert!(matches!(
            sign(b"data", &public_only, &state),
            Err(EccError::NoPrivateKey)
        ));
        let signature = sign(b"data", &kp, &state).unwrap();
        assert!(verify(b"data", &signature, &public_only, &state));
    }

    #[test]
    fn test_hex_round_trip() {
        let state = CryptoState::new(None).unwrap();
        let kp = keygen(Some(Curve::Secp256k1), &state).unwrap();
        let signature = sign(b"data", &kp, &state).unwrap();
        assert_eq!(Signature::from_hex(&signature.to_hex()).unwrap(), signature);
        assert!(Signature::from_hex("zz").is_err());
    }
}
