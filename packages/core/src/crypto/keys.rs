// Пары ключей
// Генерация, импорт, сериализация и зануление приватных ключей

use crate::crypto::curve::{with_suite, Curve};
use crate::crypto::provider::CurveSuite;
use crate::crypto::state::CryptoState;
use crate::error::{EccError, InvalidKeyReason, Result};
use crate::utils::b64;
use crate::utils::secure::{copy_public, copy_secret, SecretBytes};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Пара ключей на одной кривой
///
/// Публичный ключ хранится в канонической форме кривой, приватный (если есть)
/// в зануляемом буфере. После создания пара не меняется.
#[derive(Clone)]
pub struct KeyPair {
    curve: Curve,
    public: Vec<u8>,
    private: Option<SecretBytes>,
}

impl KeyPair {
    /// Импортировать ключи на явно заданной кривой.
    ///
    /// Порядок проверок: длина публичного ключа, точка на кривой, длина
    /// приватного ключа, диапазон скаляра, согласованность пары.
    pub fn import_with_curve(curve: Curve, public: &[u8], private: Option<&[u8]>) -> Result<Self> {
        use tracing::debug;

        // буферы вызывающего могут не пережить вызов
        let public = copy_public(public)?;
        let private = private.map(copy_secret).transpose()?;

        let (public, private) = with_suite!(curve, S => {
            let public = S::decode_public_key(&public)?;
            if let Some(private) = private.as_ref() {
                if private.len() != S::PRIVATE_KEY_LEN {
                    return Err(EccError::wrong_length(S::PRIVATE_KEY_LEN, private.len()));
                }
                if S::public_from_private(private)? != public {
                    return Err(EccError::InvalidKey {
                        reason: InvalidKeyReason::Inconsistent,
                    });
                }
            }
            (public, private)
        });

        debug!(
            target: "crypto::keypair",
            curve = %curve,
            has_private = private.is_some(),
            "Key pair imported"
        );

        Ok(Self {
            curve,
            public,
            private,
        })
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public
    }

    pub fn has_private_key(&self) -> bool {
        self.private.is_some()
    }

    pub(crate) fn private_key(&self) -> Result<&[u8]> {
        self.private
            .as_ref()
            .map(|p| p.as_slice())
            .ok_or(EccError::NoPrivateKey)
    }

    /// Экспорт для хранения (JSON, base64-поля)
    pub fn to_serialized(&self) -> SerializedKeyPair {
        SerializedKeyPair {
            curve: self.curve,
            public_key: b64::encode(&self.public),
            private_key: self.private.as_ref().map(|p| b64::encode(p)),
        }
    }

    pub fn from_serialized(serialized: &SerializedKeyPair) -> Result<Self> {
        let public = b64::decode(&serialized.public_key)?;
        let private = match serialized.private_key.as_deref() {
            Some(encoded) => Some(SecretBytes::new(b64::decode(encoded)?)),
            None => None,
        };
        Self::import_with_curve(serialized.curve, &public, private.as_deref().map(|p| p.as_slice()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_serialized())?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let serialized: SerializedKeyPair = serde_json::from_str(json)?;
        Self::from_serialized(&serialized)
    }
}

impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.curve == other.curve
            && self.public == other.public
            && self.private.as_deref() == other.private.as_deref()
    }
}

impl Eq for KeyPair {}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("curve", &self.curve)
            .field("public", &hex::encode(&self.public))
            .field("has_private", &self.private.is_some())
            .finish()
    }
}

/// Сериализованная пара ключей для хранения
#[derive(Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct SerializedKeyPair {
    #[zeroize(skip)]
    pub curve: Curve,
    pub public_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

/// Сгенерировать новую пару ключей.
///
/// `None` выбирает кривую из конфигурации состояния.
pub fn keygen(curve: Option<Curve>, state: &CryptoState) -> Result<KeyPair> {
    use tracing::debug;

    let curve = curve.unwrap_or_else(|| state.default_curve());
    let (private, public) =
        with_suite!(curve, S => state.with_rng(|rng| S::generate_keypair(rng))?);

    debug!(
        target: "crypto::keypair",
        curve = %curve,
        public_len = public.len(),
        "Key pair generated"
    );

    Ok(KeyPair {
        curve,
        public,
        private: Some(private),
    })
}

/// Импортировать ключи на кривой из конфигурации состояния.
pub fn import_keypair(
    public: &[u8],
    private: Option<&[u8]>,
    state: &CryptoState,
) -> Result<KeyPair> {
    KeyPair::import_with_curve(state.default_curve(), public, private)
}

pub fn serialize_public_key(keypair: &KeyPair) -> Vec<u8> {
    keypair.public.clone()
}

/// Копия приватного ключа; `NoPrivateKey` для публичной пары.
pub fn serialize_private_key(keypair: &KeyPair, _state: &CryptoState) -> Result<SecretBytes> {
    copy_secret(keypair.private_key()?)
}
