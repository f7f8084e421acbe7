//! Поддерживаемые кривые
//!
//! | Кривая       | Подписи        | DH / шифрование |
//! |--------------|----------------|-----------------|
//! | `curve25519` | Ed25519        | X25519          |
//! | `p256`       | ECDSA-SHA256   | ECDH P-256      |
//! | `p384`       | ECDSA-SHA384   | ECDH P-384      |
//! | `p521`       | ECDSA-SHA512   | ECDH P-521      |
//! | `secp256k1`  | ECDSA-SHA256   | ECDH secp256k1  |

use crate::config::Config;
use crate::error::{EccError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Имя кривой по умолчанию, публикуется для вызывающих
pub const DEFAULT_CURVE: &str = "curve25519";

/// Upper bound on curve identifiers accepted from callers.
pub const MAX_CURVE_NAME_LEN: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Curve {
    #[default]
    #[serde(alias = "ed25519", alias = "x25519")]
    Curve25519,
    #[serde(alias = "secp256r1", alias = "prime256v1")]
    P256,
    #[serde(alias = "secp384r1")]
    P384,
    #[serde(alias = "secp521r1")]
    P521,
    #[serde(alias = "k256")]
    Secp256k1,
}

impl Curve {
    pub const ALL: [Curve; 5] = [
        Curve::Curve25519,
        Curve::P256,
        Curve::P384,
        Curve::P521,
        Curve::Secp256k1,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Curve::Curve25519 => "curve25519",
            Curve::P256 => "p256",
            Curve::P384 => "p384",
            Curve::P521 => "p521",
            Curve::Secp256k1 => "secp256k1",
        }
    }

    /// Parse an untrusted, length-prefixed curve identifier.
    ///
    /// The bytes are not assumed NUL-terminated; a single trailing NUL left by
    /// C callers is tolerated.
    pub fn parse(raw: &[u8]) -> Result<Curve> {
        Self::parse_with_limit(raw, Config::global().max_curve_name_len)
    }

    pub fn parse_with_limit(raw: &[u8], limit: usize) -> Result<Curve> {
        if raw.len() > limit {
            return Err(EccError::UnknownCurve(format!(
                "curve name longer than {} bytes",
                limit
            )));
        }
        let raw = raw.strip_suffix(&[0]).unwrap_or(raw);
        let name = std::str::from_utf8(raw)
            .map_err(|_| EccError::UnknownCurve("curve name is not UTF-8".to_string()))?;

        match name.trim().to_ascii_lowercase().as_str() {
            "curve25519" | "ed25519" | "x25519" | "25519" => Ok(Curve::Curve25519),
            "p256" | "p-256" | "secp256r1" | "prime256v1" | "nistp256" => Ok(Curve::P256),
            "p384" | "p-384" | "secp384r1" | "nistp384" => Ok(Curve::P384),
            "p521" | "p-521" | "secp521r1" | "nistp521" => Ok(Curve::P521),
            "secp256k1" | "k256" => Ok(Curve::Secp256k1),
            other => Err(EccError::UnknownCurve(other.to_string())),
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Curve {
    type Err = EccError;

    fn from_str(s: &str) -> Result<Self> {
        Curve::parse(s.as_bytes())
    }
}

/// Выбрать реализацию [`CurveSuite`](crate::crypto::provider::CurveSuite) по кривой
macro_rules! with_suite {
    ($curve:expr, $suite:ident => $body:expr) => {
        match $curve {
            $crate::crypto::curve::Curve::Curve25519 => {
                type $suite = $crate::crypto::suites::curve25519::Curve25519Suite;
                $body
            }
            $crate::crypto::curve::Curve::P256 => {
                type $suite = $crate::crypto::suites::weierstrass::P256Suite;
                $body
            }
            $crate::crypto::curve::Curve::P384 => {
                type $suite = $crate::crypto::suites::weierstrass::P384Suite;
                $body
            }
            $crate::crypto::curve::Curve::P521 => {
                type $suite = $crate::crypto::suites::weierstrass::P521Suite;
                $body
            }
            $crate::crypto::curve::Curve::Secp256k1 => {
                type $suite = $crate::crypto::suites::weierstrass::Secp256k1Suite;
                $body
            }
        }
    };
}

pub(crate) use with_suite;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Curve::parse(b"curve25519").unwrap(), Curve::Curve25519);
        assert_eq!(Curve::parse(b"Ed25519").unwrap(), Curve::Curve25519);
        assert_eq!(Curve::parse(b"prime256v1").unwrap(), Curve::P256);
        assert_eq!(Curve::parse(b"k256").unwrap(), Curve::Secp256k1);
        assert_eq!(Curve::parse(b"p521").unwrap(), Curve::P521);
        assert_eq!(Curve::parse(b"secp384r1").unwrap(), Curve::P384);
    }

    #[test]
    fn test_parse_tolerates_trailing_nul() {
        assert_eq!(Curve::parse(b"p256\0").unwrap(), Curve::P256);
    }

    #[test]
    fn test_parse_rejects_unknown_and_oversized() {
        assert!(matches!(Curve::parse(b"p160"), Err(EccError::UnknownCurve(_))));
        assert!(matches!(Curve::parse(&[0xff, 0xfe]), Err(EccError::UnknownCurve(_))));
        let long = vec![b'a'; MAX_CURVE_NAME_LEN + 1];
        assert!(matches!(Curve::parse(&long), Err(EccError::UnknownCurve(_))));
    }

    #[test]
    fn test_default_curve_constant_parses() {
        assert_eq!(Curve::parse(DEFAULT_CURVE.as_bytes()).unwrap(), Curve::default());
        assert_eq!(Curve::default().name(), DEFAULT_CURVE);
    }
}
