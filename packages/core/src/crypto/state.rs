//! Криптографическое состояние движка
//!
//! `CryptoState` создаётся один раз и передаётся во все операции с ключами,
//! подписями и шифрованием. Внутри лежит конфигурация и источник случайности,
//! доступ к которому сериализован мьютексом: одновременные выборки из одного
//! генератора недопустимы.

use crate::config::Config;
use crate::crypto::curve::Curve;
use crate::error::{EccError, Result};
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use std::fmt;
use std::sync::Mutex;

pub struct CryptoState {
    config: Config,
    rng: Mutex<StdRng>,
}

impl CryptoState {
    /// Создать состояние; `None` берёт глобальную конфигурацию.
    ///
    /// # Errors
    ///
    /// `StateInit`, если ОС не отдала seed или конфигурация некорректна.
    pub fn new(config: Option<Config>) -> Result<Self> {
        use tracing::debug;

        let config = config.unwrap_or_else(|| Config::global().clone());
        config
            .validate()
            .map_err(|e| EccError::StateInit(e.to_string()))?;

        let rng = StdRng::from_rng(OsRng).map_err(|e| EccError::StateInit(e.to_string()))?;

        debug!(
            target: "crypto::state",
            curve = %config.default_curve,
            cipher = ?config.cipher,
            "Crypto state initialized"
        );

        Ok(Self {
            config,
            rng: Mutex::new(rng),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn default_curve(&self) -> Curve {
        self.config.default_curve
    }

    /// Выполнить `f` с эксклюзивным доступом к генератору.
    ///
    /// Отравленный мьютекс означает, что генератор мог остаться в
    /// неконсистентном состоянии, поэтому это `StateInit`, а не паника.
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> Result<T>) -> Result<T> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| EccError::StateInit("random source lock poisoned".to_string()))?;
        f(&mut *rng)
    }

    pub fn fill_random(&self, dest: &mut [u8]) -> Result<()> {
        self.with_rng(|rng| {
            rng.try_fill_bytes(dest)?;
            Ok(())
        })
    }
}

impl fmt::Debug for CryptoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // состояние генератора не печатаем
        f.debug_struct("CryptoState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Создать состояние с глобальной конфигурацией.
pub fn new_state() -> Result<CryptoState> {
    CryptoState::new(None)
}

/// Освободить состояние.
///
/// Значение потребляется, так что освобождение происходит ровно один раз.
/// Вызывающий не должен держать незавершённых операций над этим состоянием;
/// заимствования это гарантируют на уровне типов.
pub fn free_state(state: CryptoState) {
    use tracing::trace;

    trace!(target: "crypto::state", "Crypto state released");
    drop(state);
}
