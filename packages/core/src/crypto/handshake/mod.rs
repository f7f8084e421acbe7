//! Interactive Diffie-Hellman
//!
//! Этот модуль содержит 4-шаговый DH-обмен и его N-сторонее расширение
//! через ретрансляторы.
//!
//! Цель: получить общий ключ и тег проверки, который стороны сравнивают по
//! независимому каналу, чтобы заметить подмену публичных значений.
//!
//! ## Dataflow
//! ```text
//! Alice (инициатор)              Relay (опционально)          Bob (ответчик)
//! =================              ===================          ==============
//!
//! dh1(curve) → (pubA, expA)
//!        ─────── pubA ──────►  dhn(pubA, expR) → pubR
//!                                      ─────── pubR ──────►  dh2(pubR)
//!                                                            → (pubB, key, ver)
//!                              dhn(pubB, expR) → pubR'  ◄──── pubB ───────
//!        ◄────── pubR' ──────
//! dh3(pubR', expA) → (key, ver)
//! ```
//!
//! Без ретранслятора Alice вызывает `dh3(pubB, expA)` напрямую, и теги
//! совпадают. Через ретранслятор совпадает ключ; теги различаются, так как
//! стороны видят разные публичные значения.
//!
//! ## Ошибки
//! Любая ошибка сводится к одному из четырёх видов
//! [`DhErrorKind`](crate::error::DhErrorKind). Длина проверяется раньше
//! валидности точки, поэтому обрезанное значение всегда
//! `InvalidKeyWrongLength`.

pub mod dh;
pub mod session;

pub use dh::{dh1, dh2, dh3, dhn, DhKey, DhOffer, DhResponse};
pub use session::{DhRole, DhSession, DhState};
