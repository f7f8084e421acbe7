//! Централизованная конфигурация ECC engine
//!
//! Все константы и настройки движка определены здесь,
//! чтобы избежать хардкода по всему проекту.

use crate::crypto::curve::{Curve, MAX_CURVE_NAME_LEN};
use crate::error::{EccError, Result};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Глобальная конфигурация (синглтон)
static GLOBAL_CONFIG: OnceLock<Config> = OnceLock::new();

/// Symmetric AEAD used inside hybrid-encryption envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymmetricCipher {
    #[serde(rename = "chacha20poly1305")]
    ChaCha20Poly1305,
    #[serde(rename = "aes256gcm")]
    Aes256Gcm,
}

impl SymmetricCipher {
    /// Identifier byte written into the envelope header.
    pub fn id(&self) -> u8 {
        match self {
            SymmetricCipher::ChaCha20Poly1305 => 1,
            SymmetricCipher::Aes256Gcm => 2,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(SymmetricCipher::ChaCha20Poly1305),
            2 => Some(SymmetricCipher::Aes256Gcm),
            _ => None,
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "chacha20poly1305" | "chacha20-poly1305" | "chacha" => {
                Some(SymmetricCipher::ChaCha20Poly1305)
            }
            "aes256gcm" | "aes-256-gcm" | "aes" => Some(SymmetricCipher::Aes256Gcm),
            _ => None,
        }
    }
}

/// Основная структура конфигурации
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // ============================================
    // КРИПТОГРАФИЧЕСКИЕ ПАРАМЕТРЫ
    // ============================================
    /// Кривая по умолчанию для keygen и импорта ключей
    pub default_curve: Curve,

    /// AEAD для гибридного шифрования
    pub cipher: SymmetricCipher,

    // ============================================
    // ВАЛИДАЦИЯ
    // ============================================
    /// Максимальный размер plaintext (в байтах); конверт может быть длиннее
    /// ровно на заголовок, эфемерный ключ и тег
    pub max_message_size: usize,

    /// Максимальная длина имени кривой
    pub max_curve_name_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_curve: Curve::Curve25519,
            cipher: SymmetricCipher::ChaCha20Poly1305,
            max_message_size: 64 * 1024 * 1024, // 64 MiB
            max_curve_name_len: MAX_CURVE_NAME_LEN,
        }
    }
}

impl Config {
    /// Создать конфигурацию из переменных окружения
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Переопределяем значения из env, если они заданы
        if let Ok(val) = std::env::var("ECC_DEFAULT_CURVE") {
            if let Ok(curve) = Curve::parse_with_limit(val.as_bytes(), MAX_CURVE_NAME_LEN) {
                config.default_curve = curve;
            }
        }

        if let Ok(val) = std::env::var("ECC_CIPHER") {
            if let Some(cipher) = SymmetricCipher::parse(&val) {
                config.cipher = cipher;
            }
        }

        if let Ok(val) = std::env::var("ECC_MAX_MESSAGE_SIZE") {
            if let Ok(parsed) = val.parse() {
                config.max_message_size = parsed;
            }
        }

        config
    }

    /// Загрузить конфигурацию из JSON; отсутствующие поля берутся по умолчанию
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| EccError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_message_size == 0 {
            return Err(EccError::Config(
                "max_message_size must be greater than zero".to_string(),
            ));
        }
        if self.max_curve_name_len == 0 {
            return Err(EccError::Config(
                "max_curve_name_len must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Получить глобальный экземпляр конфигурации
    ///
    /// Автоматически инициализирует конфигурацию со значениями по умолчанию при первом вызове
    pub fn global() -> &'static Config {
        GLOBAL_CONFIG.get_or_init(Config::default)
    }

    /// Инициализировать глобальную конфигурацию со значениями по умолчанию
    ///
    /// # Errors
    ///
    /// Возвращает ошибку, если конфигурация уже была инициализирована
    pub fn init() -> std::result::Result<(), &'static str> {
        GLOBAL_CONFIG
            .set(Self::default())
            .map_err(|_| "Config already initialized")
    }

    /// Инициализировать глобальную конфигурацию из переменных окружения
    ///
    /// # Errors
    ///
    /// Возвращает ошибку, если конфигурация уже была инициализирована
    pub fn init_from_env() -> std::result::Result<(), &'static str> {
        GLOBAL_CONFIG
            .set(Self::from_env())
            .map_err(|_| "Config already initialized")
    }

    /// Инициализировать глобальную конфигурацию с кастомным экземпляром
    ///
    /// # Errors
    ///
    /// Возвращает ошибку, если конфигурация уже была инициализирована
    pub fn init_with(config: Config) -> std::result::Result<(), &'static str> {
        GLOBAL_CONFIG
            .set(config)
            .map_err(|_| "Config already initialized")
    }

    /// Проверить, инициализирована ли глобальная конфигурация
    pub fn is_initialized() -> bool {
        GLOBAL_CONFIG.get().is_some()
    }
}
