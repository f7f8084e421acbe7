// Логирование
//
// Движок только пишет события через `tracing`; подписчика ставит хост.
// Эта функция нужна для CLI-обвязок и тестов.

use crate::error::{EccError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Установить глобальный tracing subscriber.
///
/// * `default_filter` -- значение `RUST_LOG`, если переменная не задана
///   (например, `"ecc_core=debug"`).
/// * `json` -- писать структурированные JSON-строки вместо человекочитаемых.
///
/// Повторный вызов возвращает `EccError::Config`: подписчик уже установлен.
pub fn init_logging(default_filter: &str, json: bool) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
    );
    let result = if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
    };
    result.map_err(|e| EccError::Config(format!("logging already initialized: {}", e)))
}
