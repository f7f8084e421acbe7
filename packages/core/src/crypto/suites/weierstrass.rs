//! Short-Weierstrass curves (P-256, P-384, P-521, secp256k1)
//!
//! ECDH and point handling are written once over `elliptic_curve`; ECDSA is
//! bound per curve because each crate fixes its own digest. All lengths
//! follow from the curve's field size.

use crate::crypto::provider::CurveSuite;
use crate::error::{EccError, Result};
use crate::utils::secure::{copy_secret, SecretBytes};
use elliptic_curve::generic_array::typenum::Unsigned;
use elliptic_curve::group::Curve as _;
use elliptic_curve::sec1::{FromEncodedPoint, ModulusSize, ToEncodedPoint};
use elliptic_curve::{AffinePoint, CurveArithmetic, FieldBytesSize, NonZeroScalar, PublicKey, SecretKey};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

fn field_len<C>() -> usize
where
    C: CurveArithmetic,
{
    <FieldBytesSize<C> as Unsigned>::USIZE
}

/// Decode a SEC1 point (compressed or uncompressed), length first.
fn decode_point<C>(bytes: &[u8]) -> Result<PublicKey<C>>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let compressed = 1 + field_len::<C>();
    let uncompressed = 1 + 2 * field_len::<C>();
    if bytes.len() != compressed && bytes.len() != uncompressed {
        return Err(EccError::wrong_length(compressed, bytes.len()));
    }
    // from_sec1_bytes отвергает точку на бесконечности
    PublicKey::<C>::from_sec1_bytes(bytes).map_err(|_| EccError::not_on_curve())
}

fn encode_point<C>(point: &PublicKey<C>) -> Vec<u8>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    point.to_encoded_point(true).as_bytes().to_vec()
}

fn decode_scalar<C>(bytes: &[u8]) -> Result<SecretKey<C>>
where
    C: CurveArithmetic,
{
    if bytes.len() != field_len::<C>() {
        return Err(EccError::wrong_length(field_len::<C>(), bytes.len()));
    }
    SecretKey::<C>::from_slice(bytes).map_err(|_| EccError::scalar_out_of_range())
}

fn generate<C, R>(rng: &mut R) -> Result<(SecretBytes, Vec<u8>)>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
    R: CryptoRngCore,
{
    let secret = SecretKey::<C>::random(rng);
    let public = encode_point(&secret.public_key());
    let scalar = Zeroizing::new(secret.to_bytes());
    Ok((copy_secret(&scalar)?, public))
}

fn public_from_scalar<C>(bytes: &[u8]) -> Result<Vec<u8>>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let secret = decode_scalar::<C>(bytes)?;
    Ok(encode_point(&secret.public_key()))
}

fn multiply<C>(peer_public: &[u8], exp: &[u8]) -> Result<Vec<u8>>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let peer = decode_point::<C>(peer_public)?;
    let secret = decode_scalar::<C>(exp)?;
    let scalar: NonZeroScalar<C> = secret.to_nonzero_scalar();
    let product = (peer.to_projective() * *scalar).to_affine();
    let product = PublicKey::<C>::from_affine(product).map_err(|_| EccError::not_on_curve())?;
    Ok(encode_point(&product))
}

fn agree<C>(peer_public: &[u8], exp: &[u8]) -> Result<SecretBytes>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let peer = decode_point::<C>(peer_public)?;
    let secret = decode_scalar::<C>(exp)?;
    let shared = elliptic_curve::ecdh::diffie_hellman(secret.to_nonzero_scalar(), peer.as_affine());
    copy_secret(shared.raw_secret_bytes())
}

fn encapsulate<C, R>(recipient_public: &[u8], rng: &mut R) -> Result<(Vec<u8>, SecretBytes)>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
    R: CryptoRngCore,
{
    let recipient = decode_point::<C>(recipient_public)?;
    let ephemeral = NonZeroScalar::<C>::random(rng);
    let ephemeral_public = encode_point(&PublicKey::<C>::from_secret_scalar(&ephemeral));
    let shared = elliptic_curve::ecdh::diffie_hellman(ephemeral, recipient.as_affine());
    Ok((ephemeral_public, copy_secret(shared.raw_secret_bytes())?))
}

macro_rules! ecdsa_suite {
    ($suite:ident, $curve:ty, $krate:ident) => {
        impl CurveSuite for $suite {
            const PUBLIC_KEY_LEN: usize = 1 + <FieldBytesSize<$curve> as Unsigned>::USIZE;
            const PRIVATE_KEY_LEN: usize = <FieldBytesSize<$curve> as Unsigned>::USIZE;
            const SIGNATURE_LEN: usize = 2 * <FieldBytesSize<$curve> as Unsigned>::USIZE;
            const DH_PUBLIC_LEN: usize = Self::PUBLIC_KEY_LEN;
            const DH_EXP_LEN: usize = Self::PRIVATE_KEY_LEN;
            const ECIES_EPHEMERAL_LEN: usize = Self::PUBLIC_KEY_LEN;

            fn generate_keypair<R: CryptoRngCore>(rng: &mut R) -> Result<(SecretBytes, Vec<u8>)> {
                generate::<$curve, R>(rng)
            }

            fn decode_public_key(bytes: &[u8]) -> Result<Vec<u8>> {
                Ok(encode_point(&decode_point::<$curve>(bytes)?))
            }

            fn public_from_private(private_key: &[u8]) -> Result<Vec<u8>> {
                public_from_scalar::<$curve>(private_key)
            }

            fn sign<R: CryptoRngCore>(
                private_key: &[u8],
                message: &[u8],
                rng: &mut R,
            ) -> Result<Vec<u8>> {
                use $krate::ecdsa::signature::RandomizedSigner;

                // диапазон скаляра проверяем сами, чтобы причина ошибки была точной
                decode_scalar::<$curve>(private_key)?;
                let key = $krate::ecdsa::SigningKey::from_slice(private_key)
                    .map_err(|_| EccError::scalar_out_of_range())?;
                // RFC 6979 с дополнительной энтропией (hedged)
                let signature: $krate::ecdsa::Signature = key.sign_with_rng(rng, message);
                Ok(signature.to_bytes().to_vec())
            }

            fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
                use $krate::ecdsa::signature::Verifier;

                if decode_point::<$curve>(public_key).is_err() {
                    return false;
                }
                let Ok(key) = $krate::ecdsa::VerifyingKey::from_sec1_bytes(public_key) else {
                    return false;
                };
                let Ok(signature) = $krate::ecdsa::Signature::from_slice(signature) else {
                    return false;
                };
                key.verify(message, &signature).is_ok()
            }

            fn ecies_encapsulate<R: CryptoRngCore>(
                recipient_public: &[u8],
                rng: &mut R,
            ) -> Result<(Vec<u8>, SecretBytes)> {
                encapsulate::<$curve, R>(recipient_public, rng)
            }

            fn ecies_decapsulate(
                private_key: &[u8],
                ephemeral_public: &[u8],
            ) -> Result<SecretBytes> {
                agree::<$curve>(ephemeral_public, private_key)
            }

            fn dh_generate<R: CryptoRngCore>(rng: &mut R) -> Result<(SecretBytes, Vec<u8>)> {
                generate::<$curve, R>(rng)
            }

            fn dh_public_from_exp(exp: &[u8]) -> Result<Vec<u8>> {
                public_from_scalar::<$curve>(exp)
            }

            fn dh_multiply(peer_public: &[u8], exp: &[u8]) -> Result<Vec<u8>> {
                multiply::<$curve>(peer_public, exp)
            }

            fn dh_agree(peer_public: &[u8], exp: &[u8]) -> Result<SecretBytes> {
                agree::<$curve>(peer_public, exp)
            }
        }
    };
}

/// NIST P-256 (secp256r1)
pub struct P256Suite;

/// NIST P-384 (secp384r1)
pub struct P384Suite;

/// NIST P-521 (secp521r1), ECDSA over SHA-512
pub struct P521Suite;

/// secp256k1 (K-256)
pub struct Secp256k1Suite;

ecdsa_suite!(P256Suite, p256::NistP256, p256);
ecdsa_suite!(P384Suite, p384::NistP384, p384);
ecdsa_suite!(P521Suite, p521::NistP521, p521);
ecdsa_suite!(Secp256k1Suite, k256::Secp256k1, k256);

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn test_p256_sign_verify() {
        let (private, public) = P256Suite::generate_keypair(&mut OsRng).unwrap();
        assert_eq!(public.len(), P256Suite::PUBLIC_KEY_LEN);

        let signature = P256Suite::sign(&private, b"message", &mut OsRng).unwrap();
        assert_eq!(signature.len(), P256Suite::SIGNATURE_LEN);
        assert!(P256Suite::verify(&public, b"message", &signature));
        assert!(!P256Suite::verify(&public, b"other", &signature));
    }

    #[test]
    fn test_uncompressed_point_canonicalized() {
        let secret = SecretKey::<k256::Secp256k1>::random(&mut OsRng);
        let uncompressed = secret.public_key().to_encoded_point(false);
        let canonical = Secp256k1Suite::decode_public_key(uncompressed.as_bytes()).unwrap();
        assert_eq!(canonical.len(), 33);
        assert_eq!(canonical, encode_point(&secret.public_key()));
    }

    #[test]
    fn test_length_checked_before_point() {
        let err = P256Suite::decode_public_key(&[0x02; 20]).unwrap_err();
        assert!(matches!(
            err.invalid_key_reason(),
            Some(crate::error::InvalidKeyReason::WrongLength { expected: 33, actual: 20 })
        ));

        // right length, but x is not on the curve for either parity
        let mut bogus = [0xffu8; 33];
        bogus[0] = 0x02;
        let err = P256Suite::decode_public_key(&bogus).unwrap_err();
        assert_eq!(
            err.invalid_key_reason(),
            Some(crate::error::InvalidKeyReason::NotOnCurve)
        );
    }

    #[test]
    fn test_zero_scalar_out_of_range() {
        let err = Secp256k1Suite::public_from_private(&[0u8; 32]).unwrap_err();
        assert_eq!(
            err.invalid_key_reason(),
            Some(crate::error::InvalidKeyReason::ScalarOutOfRange)
        );
    }

    #[test]
    fn test_lengths_follow_field_size() {
        assert_eq!(
            (P384Suite::PUBLIC_KEY_LEN, P384Suite::PRIVATE_KEY_LEN, P384Suite::SIGNATURE_LEN),
            (49, 48, 96)
        );
        assert_eq!(
            (P521Suite::PUBLIC_KEY_LEN, P521Suite::PRIVATE_KEY_LEN, P521Suite::SIGNATURE_LEN),
            (67, 66, 132)
        );
    }

    #[test]
    fn test_p521_generated_scalar_matches_public() {
        let (private, public) = P521Suite::generate_keypair(&mut OsRng).unwrap();
        assert_eq!(private.len(), 66);
        assert_eq!(P521Suite::public_from_private(&private).unwrap(), public);

        let signature = P521Suite::sign(&private, b"message", &mut OsRng).unwrap();
        assert_eq!(signature.len(), P521Suite::SIGNATURE_LEN);
        assert!(P521Suite::verify(&public, b"message", &signature));
    }

    #[test]
    fn test_p384_dh_chain_commutes() {
        let (a, a_pub) = P384Suite::dh_generate(&mut OsRng).unwrap();
        let (b, b_pub) = P384Suite::dh_generate(&mut OsRng).unwrap();
        let (r, _) = P384Suite::dh_generate(&mut OsRng).unwrap();

        let relayed_a = P384Suite::dh_multiply(&a_pub, &r).unwrap();
        let relayed_b = P384Suite::dh_multiply(&b_pub, &r).unwrap();
        let k_b = P384Suite::dh_agree(&relayed_a, &b).unwrap();
        let k_a = P384Suite::dh_agree(&relayed_b, &a).unwrap();
        assert_eq!(k_a.as_slice(), k_b.as_slice());
    }

    #[test]
    fn test_ecies_shared_secret_matches() {
        let (private, public) = Secp256k1Suite::generate_keypair(&mut OsRng).unwrap();
        let (ephemeral, sender) = Secp256k1Suite::ecies_encapsulate(&public, &mut OsRng).unwrap();
        let recipient = Secp256k1Suite::ecies_decapsulate(&private, &ephemeral).unwrap();
        assert_eq!(sender.as_slice(), recipient.as_slice());
    }
}
