//! Реализации кривых (Curve Suites)
//!
//! Этот модуль содержит реализации [`CurveSuite`](crate::crypto::provider::CurveSuite).
//!
//! ## Доступные наборы
//!
//! ### Curve25519
//! - **Ключи и подписи**: Ed25519
//! - **DH / ECIES**: X25519 (ключи Ed25519 переводятся в форму Монтгомери)
//!
//! ### Weierstrass (P-256, P-384, P-521, secp256k1)
//! - **Ключи**: SEC1 compressed point + скаляр длины поля
//! - **Подписи**: ECDSA (SHA-256 / SHA-384 / SHA-512 по кривой; RFC 6979, hedged)
//! - **DH / ECIES**: ECDH, x-координата общей точки
//!
//! ## Выбор suite
//!
//! Движок выбирает suite по значению [`Curve`](crate::crypto::curve::Curve)
//! во время выполнения; напрямую suites нужны только для тестов.

pub mod curve25519;
pub mod weierstrass;
