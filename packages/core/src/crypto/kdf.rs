// HKDF-SHA256 для гибридного шифрования и DH

use crate::error::{EccError, Result};
use hkdf::Hkdf;
use sha2::Sha256;

/// Расширить `ikm` в `okm` (HKDF-SHA256, extract + expand).
pub fn hkdf_expand(salt: &[u8], ikm: &[u8], info: &[&[u8]], okm: &mut [u8]) -> Result<()> {
    let hkdf = Hkdf::<Sha256>::new(Some(salt), ikm);
    hkdf.expand_multi_info(info, okm)
        .map_err(|e| EccError::Unknown(format!("HKDF expand failed: {}", e)))
}
