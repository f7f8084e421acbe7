// Wire format для DH (hex-строки)
// Значения передаются внешним транспортом как строки в нижнем регистре

use crate::error::{EccError, Result};
use crate::utils::secure::{zeroed_secret, SecretBytes};

/// Закодировать значение для передачи
pub fn encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Проверить длину строки до разбора: обрезанное значение всегда
/// `WrongLength`, а не `NotOnCurve`.
pub fn check_len(s: &str, bytes: usize) -> Result<()> {
    let expected = bytes * 2;
    if s.len() != expected {
        return Err(EccError::wrong_length(expected, s.len()));
    }
    Ok(())
}

/// Раскодировать публичное значение длиной ровно `bytes` байт
pub fn decode_public(s: &str, bytes: usize) -> Result<Vec<u8>> {
    check_len(s, bytes)?;
    let mut out = Vec::new();
    out.try_reserve_exact(bytes)
        .map_err(|_| EccError::OutOfSecureMemory)?;
    out.resize(bytes, 0);
    hex::decode_to_slice(s, &mut out).map_err(|_| EccError::not_on_curve())?;
    Ok(out)
}

/// Раскодировать секрет (экспоненту) сразу в зануляемый буфер
pub fn decode_secret(s: &str, bytes: usize) -> Result<SecretBytes> {
    check_len(s, bytes)?;
    let mut out = zeroed_secret(bytes)?;
    hex::decode_to_slice(s, &mut out).map_err(|_| EccError::scalar_out_of_range())?;
    Ok(out)
}
