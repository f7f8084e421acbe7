// Защищённые буферы для секретного материала

use crate::error::{EccError, Result};
use zeroize::Zeroizing;

/// Owned, zero-on-drop copy of caller-supplied bytes.
pub type SecretBytes = Zeroizing<Vec<u8>>;

/// Copy an untrusted buffer into memory we own.
///
/// The caller's buffer may not outlive the call, so everything we keep is
/// copied first. The allocation is fallible and maps to `OutOfSecureMemory`.
pub fn copy_secret(data: &[u8]) -> Result<SecretBytes> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(data.len())
        .map_err(|_| EccError::OutOfSecureMemory)?;
    buf.extend_from_slice(data);
    Ok(Zeroizing::new(buf))
}

/// Same as [`copy_secret`] for public data that needs no wiping.
pub fn copy_public(data: &[u8]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(data.len())
        .map_err(|_| EccError::OutOfSecureMemory)?;
    buf.extend_from_slice(data);
    Ok(buf)
}

/// Zero-filled secret buffer of `len` bytes, allocated fallibly.
pub fn zeroed_secret(len: usize) -> Result<SecretBytes> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| EccError::OutOfSecureMemory)?;
    buf.resize(len, 0);
    Ok(Zeroizing::new(buf))
}

/// Convert a slice into a fixed-size array, reporting a length fault.
pub fn to_array<const N: usize>(data: &[u8]) -> Result<Zeroizing<[u8; N]>> {
    if data.len() != N {
        return Err(EccError::wrong_length(N, data.len()));
    }
    let mut out = Zeroizing::new([0u8; N]);
    out.copy_from_slice(data);
    Ok(out)
}
