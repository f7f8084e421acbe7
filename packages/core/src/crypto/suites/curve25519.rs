use crate::crypto::provider::CurveSuite;
use crate::error::{EccError, Result};
use crate::utils::secure::{copy_secret, to_array, SecretBytes};
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use rand_core::CryptoRngCore;
use x25519_dalek::{EphemeralSecret, PublicKey as X25519PublicKey, StaticSecret};
use zeroize::Zeroizing;

/// Curve25519: Ed25519 key pairs and signatures, X25519 for key agreement.
///
/// A key pair is an Ed25519 seed plus its verifying key. Encryption to such a
/// key goes through the birationally equivalent Montgomery form.
pub struct Curve25519Suite;

fn verifying_key(bytes: &[u8]) -> Result<VerifyingKey> {
    let arr = to_array::<32>(bytes)?;
    let key = VerifyingKey::from_bytes(&arr).map_err(|_| EccError::not_on_curve())?;
    // small-order points are useless as public keys
    if key.is_weak() {
        return Err(EccError::not_on_curve());
    }
    Ok(key)
}

fn signing_key(bytes: &[u8]) -> Result<SigningKey> {
    let seed = to_array::<32>(bytes)?;
    Ok(SigningKey::from_bytes(&seed))
}

fn x25519_secret(exp: &[u8]) -> Result<StaticSecret> {
    let arr = to_array::<32>(exp)?;
    Ok(StaticSecret::from(*arr))
}

fn x25519_public(bytes: &[u8]) -> Result<X25519PublicKey> {
    let arr = to_array::<32>(bytes)?;
    Ok(X25519PublicKey::from(*arr))
}

impl CurveSuite for Curve25519Suite {
    const PUBLIC_KEY_LEN: usize = 32;
    const PRIVATE_KEY_LEN: usize = 32;
    const SIGNATURE_LEN: usize = 64;
    const DH_PUBLIC_LEN: usize = 32;
    const DH_EXP_LEN: usize = 32;
    const ECIES_EPHEMERAL_LEN: usize = 32;

    fn generate_keypair<R: CryptoRngCore>(rng: &mut R) -> Result<(SecretBytes, Vec<u8>)> {
        let signing_key = SigningKey::generate(rng);
        let public = signing_key.verifying_key().to_bytes().to_vec();
        let private = copy_secret(signing_key.as_bytes())?;
        Ok((private, public))
    }

    fn decode_public_key(bytes: &[u8]) -> Result<Vec<u8>> {
        Ok(verifying_key(bytes)?.to_bytes().to_vec())
    }

    fn public_from_private(private_key: &[u8]) -> Result<Vec<u8>> {
        Ok(signing_key(private_key)?.verifying_key().to_bytes().to_vec())
    }

    fn sign<R: CryptoRngCore>(private_key: &[u8], message: &[u8], _rng: &mut R) -> Result<Vec<u8>> {
        // Ed25519 детерминирован, RNG не нужен
        let key = signing_key(private_key)?;
        Ok(key.sign(message).to_bytes().to_vec())
    }

    fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
        let Ok(key) = verifying_key(public_key) else {
            return false;
        };
        let Ok(sig_bytes) = <[u8; 64]>::try_from(signature) else {
            return false;
        };
        let signature = Signature::from_bytes(&sig_bytes);
        key.verify_strict(message, &signature).is_ok()
    }

    fn ecies_encapsulate<R: CryptoRngCore>(
        recipient_public: &[u8],
        rng: &mut R,
    ) -> Result<(Vec<u8>, SecretBytes)> {
        let recipient = verifying_key(recipient_public)?;
        let recipient_x = X25519PublicKey::from(recipient.to_montgomery().to_bytes());

        let ephemeral_secret = EphemeralSecret::random_from_rng(&mut *rng);
        let ephemeral_public = X25519PublicKey::from(&ephemeral_secret);

        let shared = ephemeral_secret.diffie_hellman(&recipient_x);
        if !shared.was_contributory() {
            return Err(EccError::not_on_curve());
        }
        Ok((ephemeral_public.to_bytes().to_vec(), copy_secret(shared.as_bytes())?))
    }

    fn ecies_decapsulate(private_key: &[u8], ephemeral_public: &[u8]) -> Result<SecretBytes> {
        let key = signing_key(private_key)?;
        let scalar = Zeroizing::new(key.to_scalar_bytes());
        let secret = StaticSecret::from(*scalar);

        let shared = secret.diffie_hellman(&x25519_public(ephemeral_public)?);
        if !shared.was_contributory() {
            return Err(EccError::not_on_curve());
        }
        copy_secret(shared.as_bytes())
    }

    fn dh_generate<R: CryptoRngCore>(rng: &mut R) -> Result<(SecretBytes, Vec<u8>)> {
        let secret = StaticSecret::random_from_rng(&mut *rng);
        let public = X25519PublicKey::from(&secret);
        Ok((copy_secret(secret.as_bytes())?, public.to_bytes().to_vec()))
    }

    fn dh_public_from_exp(exp: &[u8]) -> Result<Vec<u8>> {
        let secret = x25519_secret(exp)?;
        Ok(X25519PublicKey::from(&secret).to_bytes().to_vec())
    }

    fn dh_multiply(peer_public: &[u8], exp: &[u8]) -> Result<Vec<u8>> {
        // u-координата произведения и есть новое публичное значение
        Ok(Self::dh_agree(peer_public, exp)?.to_vec())
    }

    fn dh_agree(peer_public: &[u8], exp: &[u8]) -> Result<SecretBytes> {
        let peer = x25519_public(peer_public)?;
        let secret = x25519_secret(exp)?;
        let shared = secret.diffie_hellman(&peer);
        if !shared.was_contributory() {
            return Err(EccError::not_on_curve());
        }
        copy_secret(shared.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn test_generate_keypair_sizes() {
        let (private, public) = Curve25519Suite::generate_keypair(&mut OsRng).unwrap();
        assert_eq!(private.len(), 32);
        assert_eq!(public.len(), 32);
        assert_eq!(Curve25519Suite::public_from_private(&private).unwrap(), public);
    }

    #[test]
    fn test_ecies_shared_secret_matches() {
        let (private, public) = Curve25519Suite::generate_keypair(&mut OsRng).unwrap();
        let (ephemeral, sender_secret) =
            Curve25519Suite::ecies_encapsulate(&public, &mut OsRng).unwrap();
        let recipient_secret = Curve25519Suite::ecies_decapsulate(&private, &ephemeral).unwrap();
        assert_eq!(sender_secret.as_slice(), recipient_secret.as_slice());
    }

    #[test]
    fn test_low_order_peer_rejected() {
        let (exp, _) = Curve25519Suite::dh_generate(&mut OsRng).unwrap();
        // u = 0 is a point of small order
        let result = Curve25519Suite::dh_agree(&[0u8; 32], &exp);
        assert!(matches!(result, Err(EccError::InvalidKey { .. })));
    }

    #[test]
    fn test_dh_chain_commutes() {
        let (a, a_pub) = Curve25519Suite::dh_generate(&mut OsRng).unwrap();
        let (b, b_pub) = Curve25519Suite::dh_generate(&mut OsRng).unwrap();
        let (r, _) = Curve25519Suite::dh_generate(&mut OsRng).unwrap();

        let relayed_a = Curve25519Suite::dh_multiply(&a_pub, &r).unwrap();
        let relayed_b = Curve25519Suite::dh_multiply(&b_pub, &r).unwrap();

        let k_b = Curve25519Suite::dh_agree(&relayed_a, &b).unwrap();
        let k_a = Curve25519Suite::dh_agree(&relayed_b, &a).unwrap();
        assert_eq!(k_a.as_slice(), k_b.as_slice());
    }
}
