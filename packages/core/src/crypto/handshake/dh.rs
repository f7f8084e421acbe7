// Интерактивный Diffie-Hellman: dh1 / dh2 / dhn / dh3
//
// Функции не хранят состояние между вызовами: экспоненту между dh1 и dh3
// переносит вызывающий. Все значения на границе передаются hex-строками.

use crate::crypto::curve::{with_suite, Curve};
use crate::crypto::kdf::hkdf_expand;
use crate::crypto::provider::CurveSuite;
use crate::error::Result;
use crate::protocol::wire;
use rand::rngs::OsRng;
use std::fmt;
use zeroize::Zeroizing;

const DH_LABEL: &[u8] = b"ecc-core dh v1";
pub const DH_KEY_LEN: usize = 32;
pub const DH_VERIFICATION_LEN: usize = 16;

/// Результат dh1: публичное значение для пира и экспонента для dh3
pub struct DhOffer {
    pub public: String,
    pub exp: Zeroizing<String>,
}

/// Результат dh2
pub struct DhResponse {
    pub public: String,
    pub key: Zeroizing<String>,
    pub verification: String,
}

/// Результат dh3
pub struct DhKey {
    pub key: Zeroizing<String>,
    pub verification: String,
}

// секреты в Debug не попадают
impl fmt::Debug for DhOffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DhOffer")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for DhResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DhResponse")
            .field("public", &self.public)
            .field("verification", &self.verification)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for DhKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DhKey")
            .field("verification", &self.verification)
            .finish_non_exhaustive()
    }
}

/// Вывести ключ и тег проверки из общего секрета.
///
/// Тег связывает оба публичных значения: подмена любого из них видна при
/// сравнении тегов по независимому каналу.
fn derive_key(
    curve: Curve,
    shared: &[u8],
    initiator_public: &[u8],
    responder_public: &[u8],
) -> Result<DhKey> {
    let curve_name = curve.name().as_bytes();

    let mut key = Zeroizing::new([0u8; DH_KEY_LEN]);
    hkdf_expand(DH_LABEL, shared, &[&b"key"[..], curve_name], &mut key[..])?;

    let mut verification = [0u8; DH_VERIFICATION_LEN];
    hkdf_expand(
        DH_LABEL,
        shared,
        &[&b"verify"[..], curve_name, initiator_public, responder_public],
        &mut verification,
    )?;

    Ok(DhKey {
        key: Zeroizing::new(wire::encode(&key[..])),
        verification: wire::encode(&verification),
    })
}

/// Шаг инициатора: новая экспонента и `public = G·exp`.
pub fn dh1(curve: Curve) -> Result<DhOffer> {
    use tracing::debug;

    let (exp, public) = with_suite!(curve, S => S::dh_generate(&mut OsRng)?);

    debug!(target: "crypto::dh", curve = %curve, "dh1: offer created");

    Ok(DhOffer {
        public: wire::encode(&public),
        exp: Zeroizing::new(wire::encode(&exp)),
    })
}

/// Шаг ответчика: своя экспонента, ключ и тег проверки.
pub fn dh2(peer_public: &str, curve: Curve) -> Result<DhResponse> {
    use tracing::debug;

    let (public, key) = with_suite!(curve, S => {
        let peer = wire::decode_public(peer_public, S::DH_PUBLIC_LEN)?;
        let (exp, public) = S::dh_generate(&mut OsRng)?;
        let shared = S::dh_agree(&peer, &exp)?;
        let key = derive_key(curve, &shared, &peer, &public)?;
        (public, key)
    });

    debug!(target: "crypto::dh", curve = %curve, "dh2: key agreed");

    Ok(DhResponse {
        public: wire::encode(&public),
        key: key.key,
        verification: key.verification,
    })
}

/// Шаг ретранслятора: `peer_public · exp` без вывода ключа.
pub fn dhn(peer_public: &str, exp: &str, curve: Curve) -> Result<String> {
    use tracing::debug;

    let relayed = with_suite!(curve, S => {
        wire::check_len(peer_public, S::DH_PUBLIC_LEN)?;
        wire::check_len(exp, S::DH_EXP_LEN)?;
        let peer = wire::decode_public(peer_public, S::DH_PUBLIC_LEN)?;
        let exp = wire::decode_secret(exp, S::DH_EXP_LEN)?;
        S::dh_multiply(&peer, &exp)?
    });

    debug!(target: "crypto::dh", curve = %curve, "dhn: value relayed");

    Ok(wire::encode(&relayed))
}

/// Шаг инициатора после ответа: ключ и тег, симметричные dh2.
pub fn dh3(peer_public: &str, exp: &str, curve: Curve) -> Result<DhKey> {
    use tracing::debug;

    let key = with_suite!(curve, S => {
        wire::check_len(peer_public, S::DH_PUBLIC_LEN)?;
        wire::check_len(exp, S::DH_EXP_LEN)?;
        let peer = wire::decode_public(peer_public, S::DH_PUBLIC_LEN)?;
        let exp = wire::decode_secret(exp, S::DH_EXP_LEN)?;
        let own_public = S::dh_public_from_exp(&exp)?;
        let shared = S::dh_agree(&peer, &exp)?;
        derive_key(curve, &shared, &own_public, &peer)?
    });

    debug!(target: "crypto::dh", curve = %curve, "dh3: key agreed");

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DhErrorKind, InvalidKeyReason};

    #[test]
    fn test_two_party_all_curves() {
        for curve in Curve::ALL {
            let offer = dh1(curve).unwrap();
            let response = dh2(&offer.public, curve).unwrap();
            let key = dh3(&response.public, &offer.exp, curve).unwrap();

            assert_eq!(*key.key, *response.key, "{}", curve);
            assert_eq!(key.verification, response.verification);
            assert_eq!(key.key.len(), DH_KEY_LEN * 2);
            assert_eq!(key.verification.len(), DH_VERIFICATION_LEN * 2);
        }
    }

    #[test]
    fn test_wire_lengths() {
        let offer = dh1(Curve::Curve25519).unwrap();
        assert_eq!((offer.public.len(), offer.exp.len()), (64, 64));
        let offer = dh1(Curve::P256).unwrap();
        assert_eq!((offer.public.len(), offer.exp.len()), (66, 64));
        let offer = dh1(Curve::P384).unwrap();
        assert_eq!((offer.public.len(), offer.exp.len()), (98, 96));
        let offer = dh1(Curve::P521).unwrap();
        assert_eq!((offer.public.len(), offer.exp.len()), (134, 132));
    }

    #[test]
    fn test_truncated_public_is_wrong_length() {
        for curve in Curve::ALL {
            let offer = dh1(curve).unwrap();
            let truncated = &offer.public[..offer.public.len() - 2];
            let err = dh2(truncated, curve).unwrap_err();
            assert_eq!(err.dh_kind(), DhErrorKind::InvalidKeyWrongLength);
        }
    }

    #[test]
    fn test_invalid_point_is_invalid_key() {
        // x = 2^256 - 1 больше модуля поля
        let bogus = format!("02{}", "ff".repeat(32));
        let err = dh2(&bogus, Curve::P256).unwrap_err();
        assert_eq!(err.invalid_key_reason(), Some(InvalidKeyReason::NotOnCurve));
        assert_eq!(err.dh_kind(), DhErrorKind::InvalidKey);

        // u = 0 даёт нулевой общий секрет
        let zero = "00".repeat(32);
        let err = dh2(&zero, Curve::Curve25519).unwrap_err();
        assert_eq!(err.dh_kind(), DhErrorKind::InvalidKey);
    }

    #[test]
    fn test_exp_length_checked_before_peer_validity() {
        let err = dh3(&"zz".repeat(32), "00", Curve::Curve25519).unwrap_err();
        assert_eq!(
            err.invalid_key_reason(),
            Some(InvalidKeyReason::WrongLength {
                expected: 64,
                actual: 2
            })
        );
    }

    #[test]
    fn test_relay_chain_agrees_on_key() {
        for curve in Curve::ALL {
            let initiator = dh1(curve).unwrap();
            let relay = dh1(curve).unwrap();

            let towards_responder = dhn(&initiator.public, &relay.exp, curve).unwrap();
            let response = dh2(&towards_responder, curve).unwrap();
            let towards_initiator = dhn(&response.public, &relay.exp, curve).unwrap();
            let key = dh3(&towards_initiator, &initiator.exp, curve).unwrap();

            assert_eq!(*key.key, *response.key, "{}", curve);
            // ретранслятор виден как преобразование публичных значений
            assert_ne!(key.verification, response.verification);
        }
    }

    #[test]
    fn test_tampered_public_changes_verification() {
        let offer = dh1(Curve::Secp256k1).unwrap();
        let mitm = dh1(Curve::Secp256k1).unwrap();
        let response = dh2(&mitm.public, Curve::Secp256k1).unwrap();
        let key = dh3(&response.public, &offer.exp, Curve::Secp256k1).unwrap();
        assert_ne!(*key.key, *response.key);
        assert_ne!(key.verification, response.verification);
    }
}
