// Конверт гибридного шифрования
//
// version(1) || cipher_id(1) || ephemeral_public || ciphertext || tag(16)
//
// Заголовок (первые два байта) передаётся в AEAD как associated data.

use crate::config::SymmetricCipher;
use crate::error::{EccError, Result};
use crate::utils::secure::copy_public;

pub const ENVELOPE_VERSION: u8 = 1;
pub const HEADER_LEN: usize = 2;
pub const TAG_LEN: usize = 16;

/// Разобранный конверт, ссылается на исходный буфер
#[derive(Debug, Clone, Copy)]
pub struct Envelope<'a> {
    pub cipher: SymmetricCipher,
    pub ephemeral: &'a [u8],
    /// Шифртекст вместе с тегом
    pub sealed: &'a [u8],
}

pub fn header(cipher: SymmetricCipher) -> [u8; HEADER_LEN] {
    [ENVELOPE_VERSION, cipher.id()]
}

impl<'a> Envelope<'a> {
    /// Разобрать конверт с эфемерным ключом длины `ephemeral_len`.
    ///
    /// Любая ошибка формата неотличима от подделки: `AuthenticationFailure`.
    pub fn parse(bytes: &'a [u8], ephemeral_len: usize) -> Result<Self> {
        if bytes.len() < HEADER_LEN + ephemeral_len + TAG_LEN {
            return Err(EccError::AuthenticationFailure);
        }
        if bytes[0] != ENVELOPE_VERSION {
            return Err(EccError::AuthenticationFailure);
        }
        let cipher = SymmetricCipher::from_id(bytes[1]).ok_or(EccError::AuthenticationFailure)?;
        let (ephemeral, sealed) = bytes[HEADER_LEN..].split_at(ephemeral_len);

        Ok(Self {
            cipher,
            ephemeral,
            sealed,
        })
    }

    pub fn header(&self) -> [u8; HEADER_LEN] {
        header(self.cipher)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = copy_public(&self.header())?;
        out.try_reserve_exact(self.ephemeral.len() + self.sealed.len())
            .map_err(|_| EccError::OutOfSecureMemory)?;
        out.extend_from_slice(self.ephemeral);
        out.extend_from_slice(self.sealed);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let sealed = [7u8; TAG_LEN + 3];
        let envelope = Envelope {
            cipher: SymmetricCipher::Aes256Gcm,
            ephemeral: &[1u8; 33],
            sealed: &sealed,
        };
        let bytes = envelope.to_bytes().unwrap();
        assert_eq!(bytes.len(), HEADER_LEN + 33 + TAG_LEN + 3);
        assert_eq!(&bytes[..2], &[ENVELOPE_VERSION, 2]);

        let parsed = Envelope::parse(&bytes, 33).unwrap();
        assert_eq!(parsed.cipher, SymmetricCipher::Aes256Gcm);
        assert_eq!(parsed.ephemeral, &[1u8; 33][..]);
        assert_eq!(parsed.sealed, &sealed[..]);
    }

    #[test]
    fn test_malformed_is_authentication_failure() {
        assert!(matches!(
            Envelope::parse(&[ENVELOPE_VERSION, 1, 0], 32),
            Err(EccError::AuthenticationFailure)
        ));

        let mut bytes = vec![0u8; HEADER_LEN + 32 + TAG_LEN];
        bytes[1] = 1;
        assert!(matches!(
            Envelope::parse(&bytes, 32),
            Err(EccError::AuthenticationFailure)
        ));

        bytes[0] = ENVELOPE_VERSION;
        bytes[1] = 9;
        assert!(matches!(
            Envelope::parse(&bytes, 32),
            Err(EccError::AuthenticationFailure)
        ));
    }
}
