// DH на границе API: строки на входе и выходе, ошибки из четырёх видов

use super::DhError;
use crate::crypto::curve::Curve;
use crate::crypto::handshake::dh;
use crate::error::Result;
use zeroize::Zeroizing;

fn parse_curve(curve: &str) -> Result<Curve> {
    Curve::parse(curve.as_bytes())
}

// вынуть строку, оставив зануляемую обёртку пустой
fn take(mut secret: Zeroizing<String>) -> String {
    std::mem::take(&mut *secret)
}

/// (public, exp)
pub fn dh1(curve: &str) -> std::result::Result<(String, String), DhError> {
    let offer = dh::dh1(parse_curve(curve)?)?;
    Ok((offer.public, take(offer.exp)))
}

/// (public, key, verification)
pub fn dh2(peer_public: &str, curve: &str) -> std::result::Result<(String, String, String), DhError> {
    let response = dh::dh2(peer_public, parse_curve(curve)?)?;
    Ok((response.public, take(response.key), response.verification))
}

pub fn dhn(peer_public: &str, exp: &str, curve: &str) -> std::result::Result<String, DhError> {
    Ok(dh::dhn(peer_public, exp, parse_curve(curve)?)?)
}

/// (key, verification)
pub fn dh3(
    peer_public: &str,
    exp: &str,
    curve: &str,
) -> std::result::Result<(String, String), DhError> {
    let key = dh::dh3(peer_public, exp, parse_curve(curve)?)?;
    Ok((take(key.key), key.verification))
}
