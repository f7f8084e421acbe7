//! Defines the CurveSuite trait: all curve arithmetic the engine needs.
//!
//! Every method works on canonical byte encodings so the engine above can
//! dispatch on a runtime [`Curve`](crate::crypto::curve::Curve) value.

use crate::error::Result;
use crate::utils::secure::SecretBytes;
use rand_core::CryptoRngCore;

/// Trait that formalizes all cryptographic operations for a specific curve.
pub trait CurveSuite {
    /// Length of a serialized public key (canonical form).
    const PUBLIC_KEY_LEN: usize;

    /// Length of a serialized private key.
    const PRIVATE_KEY_LEN: usize;

    /// Length of a signature produced by [`CurveSuite::sign`].
    const SIGNATURE_LEN: usize;

    /// Length of a DH public value (and of a relayed public value).
    const DH_PUBLIC_LEN: usize;

    /// Length of a DH exponent.
    const DH_EXP_LEN: usize;

    /// Length of the ephemeral public value carried in an encryption envelope.
    const ECIES_EPHEMERAL_LEN: usize;

    // ------------------------------------------------------------------
    // Key pairs
    // ------------------------------------------------------------------

    /// Generates a new (private, public) key pair.
    fn generate_keypair<R: CryptoRngCore>(rng: &mut R) -> Result<(SecretBytes, Vec<u8>)>;

    /// Validates a public key and returns its canonical encoding.
    fn decode_public_key(bytes: &[u8]) -> Result<Vec<u8>>;

    /// Derives the canonical public key from a private key.
    fn public_from_private(private_key: &[u8]) -> Result<Vec<u8>>;

    // ------------------------------------------------------------------
    // Signatures
    // ------------------------------------------------------------------

    /// Signs a message with the given private key.
    fn sign<R: CryptoRngCore>(private_key: &[u8], message: &[u8], rng: &mut R) -> Result<Vec<u8>>;

    /// Verifies a signature. Malformed keys or signatures verify as `false`.
    fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool;

    // ------------------------------------------------------------------
    // Hybrid encryption (ECIES)
    // ------------------------------------------------------------------

    /// Creates an ephemeral key and agrees a secret with the recipient.
    /// Returns (ephemeral public, shared secret).
    fn ecies_encapsulate<R: CryptoRngCore>(
        recipient_public: &[u8],
        rng: &mut R,
    ) -> Result<(Vec<u8>, SecretBytes)>;

    /// Recomputes the shared secret on the recipient's side.
    fn ecies_decapsulate(private_key: &[u8], ephemeral_public: &[u8]) -> Result<SecretBytes>;

    // ------------------------------------------------------------------
    // Interactive Diffie-Hellman
    // ------------------------------------------------------------------

    /// Generates an ephemeral (exponent, public) pair.
    fn dh_generate<R: CryptoRngCore>(rng: &mut R) -> Result<(SecretBytes, Vec<u8>)>;

    /// Recomputes `basepoint · exp`.
    fn dh_public_from_exp(exp: &[u8]) -> Result<Vec<u8>>;

    /// Computes `peer_public · exp` as a public value (used by relays).
    fn dh_multiply(peer_public: &[u8], exp: &[u8]) -> Result<Vec<u8>>;

    /// Computes the shared secret `x(peer_public · exp)`.
    fn dh_agree(peer_public: &[u8], exp: &[u8]) -> Result<SecretBytes>;
}
