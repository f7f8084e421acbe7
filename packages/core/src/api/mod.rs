// Публичный API движка
// Граница для хост-обвязок: хендлы, байты и строки на входе,
// Option/bool на выходе

pub mod crypto;
pub mod dh;

pub use self::crypto::{decrypt, encrypt, free_state, keygen, new_keypair, new_state, sign, verify};
pub use self::dh::{dh1, dh2, dh3, dhn};
pub use crate::crypto::curve::DEFAULT_CURVE;

use crate::error::DhErrorKind;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use thiserror::Error;

/// Владеющий хендл ресурса движка
///
/// Клонирование дешёвое; деструктор `T` (с занулением секретов) выполняется
/// ровно один раз, когда освобождается последний клон.
pub struct Handle<T>(Arc<T>);

impl<T> Handle<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Явно освободить хендл. Эквивалентно `drop`.
    pub fn release(self) {
        drop(self);
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Deref for Handle<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&*self.0).finish()
    }
}

/// Ошибки, которые API не сворачивает в `None`
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    #[error("Data can not have a length of zero")]
    EmptyInput,
}

/// Ошибка DH с одним из четырёх сообщений
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind}")]
pub struct DhError {
    pub kind: DhErrorKind,
}

impl From<crate::error::EccError> for DhError {
    fn from(err: crate::error::EccError) -> Self {
        Self {
            kind: err.dh_kind(),
        }
    }
}
