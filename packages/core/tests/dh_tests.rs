//! Tests for the interactive Diffie-Hellman exchange
//!
//! This test suite covers:
//! - Two-party exchange (dh1 → dh2 → dh3)
//! - Relay chains (dhn)
//! - Error taxonomy
//! - DhSession state machine

use ecc_core::crypto::handshake::{dh1, dh2, dh3, dhn, DhRole, DhSession, DhState};
use ecc_core::{Curve, DhErrorKind, EccError};

/// Test the documented two-party exchange on the default curve
#[test]
fn test_two_party_exchange_curve25519() {
    let initiator = dh1(Curve::Curve25519).unwrap();
    let responder = dh2(&initiator.public, Curve::Curve25519).unwrap();
    let finalized = dh3(&responder.public, &initiator.exp, Curve::Curve25519).unwrap();

    assert_eq!(*finalized.key, *responder.key, "Both sides should derive the same key");
    assert_eq!(
        finalized.verification, responder.verification,
        "Verification tags should match"
    );
}

/// Test the full exchange on P-521, including a one-short public value
#[test]
fn test_two_party_exchange_p521() {
    let initiator = dh1(Curve::P521).unwrap();
    assert_eq!(initiator.public.len(), 134);

    let responder = dh2(&initiator.public, Curve::P521).unwrap();
    let finalized = dh3(&responder.public, &initiator.exp, Curve::P521).unwrap();
    assert_eq!(*finalized.key, *responder.key);
    assert_eq!(finalized.verification, responder.verification);

    let short = "x".repeat(responder.public.len() - 1);
    let err = dh2(&short, Curve::P521).unwrap_err();
    assert_eq!(err.dh_kind(), DhErrorKind::InvalidKeyWrongLength);
}

/// Test that every exchange produces a fresh key
#[test]
fn test_exchanges_are_independent() {
    let first = dh1(Curve::P256).unwrap();
    let second = dh1(Curve::P256).unwrap();
    assert_ne!(first.public, second.public);

    let a = dh2(&first.public, Curve::P256).unwrap();
    let b = dh2(&first.public, Curve::P256).unwrap();
    assert_ne!(*a.key, *b.key, "Responder exponent must be fresh per call");
}

/// Test that truncated public values are reported as wrong length
#[test]
fn test_truncated_public_value() {
    for curve in Curve::ALL {
        let offer = dh1(curve).unwrap();
        let truncated = &offer.public[..offer.public.len() / 2];

        let err = dh2(truncated, curve).unwrap_err();
        assert_eq!(
            err.dh_kind(),
            DhErrorKind::InvalidKeyWrongLength,
            "Truncation on {} must not be reported as a generic invalid key",
            curve
        );
        assert_eq!(err.dh_kind().message(), "Invalid key (wrong length)");

        let err = dh3(truncated, &offer.exp, curve).unwrap_err();
        assert_eq!(err.dh_kind(), DhErrorKind::InvalidKeyWrongLength);
    }
}

/// Test that well-sized garbage is a generic invalid key
#[test]
fn test_invalid_public_value() {
    let garbage = "xy".repeat(33);
    let err = dh2(&garbage, Curve::Secp256k1).unwrap_err();
    assert_eq!(err.dh_kind(), DhErrorKind::InvalidKey);
    assert_eq!(err.dh_kind().message(), "Invalid key");
}

/// Test that curve25519 values do not pass as Weierstrass values
#[test]
fn test_public_value_from_other_curve() {
    let offer = dh1(Curve::Curve25519).unwrap();
    let err = dh2(&offer.public, Curve::P256).unwrap_err();
    assert!(matches!(err, EccError::InvalidKey { .. }));
    assert_eq!(err.dh_kind(), DhErrorKind::InvalidKeyWrongLength);
}

/// Test a single relay between initiator and responder
#[test]
fn test_relay_chain() {
    for curve in Curve::ALL {
        let initiator = dh1(curve).unwrap();
        let relay = dh1(curve).unwrap();

        let relayed_offer = dhn(&initiator.public, &relay.exp, curve).unwrap();
        assert_eq!(relayed_offer.len(), initiator.public.len());

        let responder = dh2(&relayed_offer, curve).unwrap();
        let relayed_response = dhn(&responder.public, &relay.exp, curve).unwrap();
        let finalized = dh3(&relayed_response, &initiator.exp, curve).unwrap();

        assert_eq!(*finalized.key, *responder.key, "Relay chain key mismatch on {}", curve);
    }
}

/// Test two relays in a row
#[test]
fn test_two_relay_chain() {
    let curve = Curve::Secp256k1;
    let initiator = dh1(curve).unwrap();
    let first = dh1(curve).unwrap();
    let second = dh1(curve).unwrap();

    let hop1 = dhn(&initiator.public, &first.exp, curve).unwrap();
    let hop2 = dhn(&hop1, &second.exp, curve).unwrap();
    let responder = dh2(&hop2, curve).unwrap();

    let back1 = dhn(&responder.public, &second.exp, curve).unwrap();
    let back2 = dhn(&back1, &first.exp, curve).unwrap();
    let finalized = dh3(&back2, &initiator.exp, curve).unwrap();

    assert_eq!(*finalized.key, *responder.key);
}

/// Test relay input validation
#[test]
fn test_relay_rejects_bad_exponent() {
    let offer = dh1(Curve::P256).unwrap();
    let err = dhn(&offer.public, "abcd", Curve::P256).unwrap_err();
    assert_eq!(err.dh_kind(), DhErrorKind::InvalidKeyWrongLength);

    // zero is not a valid scalar
    let err = dhn(&offer.public, &"00".repeat(32), Curve::P256).unwrap_err();
    assert_eq!(err.dh_kind(), DhErrorKind::InvalidKey);
}

/// Test a full exchange through DhSession objects
#[test]
fn test_session_state_machine() {
    let _ = ecc_core::utils::logging::init_logging("ecc_core=trace", false);

    let mut alice = DhSession::initiate(Curve::Curve25519).unwrap();
    let mut relay = DhSession::relay(Curve::Curve25519).unwrap();
    assert_eq!(alice.role(), DhRole::Initiator);
    assert_eq!(relay.role(), DhRole::Relay);
    assert_eq!(relay.state(), DhState::Init);

    let to_bob = relay.forward(alice.public().unwrap()).unwrap();
    alice.relayed().unwrap();
    assert_eq!(alice.state(), DhState::AwaitingFinalize);

    let bob = DhSession::respond(&to_bob, Curve::Curve25519).unwrap();
    assert_eq!(bob.role(), DhRole::Responder);
    assert!(bob.key().is_some());

    let to_alice = relay.forward(bob.public().unwrap()).unwrap();
    assert!(relay.key().is_none(), "A relay never holds a key");

    alice.finalize(&to_alice).unwrap();
    assert_eq!(alice.state(), DhState::Finalized);
    assert_eq!(alice.key(), bob.key());
}

/// Test that aborting discards the session secrets
#[test]
fn test_session_abort() {
    let mut alice = DhSession::initiate(Curve::P256).unwrap();
    let bob = DhSession::respond(alice.public().unwrap(), Curve::P256).unwrap();
    assert!(alice.exp().is_some());

    alice.abort();
    assert_eq!(alice.state(), DhState::Aborted);
    assert!(alice.exp().is_none());
    assert!(matches!(
        alice.finalize(bob.public().unwrap()),
        Err(EccError::InvalidSessionState { .. })
    ));
}
