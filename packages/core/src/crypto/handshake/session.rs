// DH-сессия: конечный автомат поверх dh1/dh2/dhn/dh3

use super::dh::{dh1, dh2, dh3, dhn};
use crate::crypto::curve::Curve;
use crate::error::{EccError, Result};
use std::fmt;
use zeroize::Zeroizing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DhRole {
    Initiator,
    Responder,
    Relay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DhState {
    Init,
    AwaitingResponse,
    Responded,
    Relayed,
    AwaitingFinalize,
    Finalized,
    Aborted,
}

impl DhState {
    pub fn name(&self) -> &'static str {
        match self {
            DhState::Init => "Init",
            DhState::AwaitingResponse => "AwaitingResponse",
            DhState::Responded => "Responded",
            DhState::Relayed => "Relayed",
            DhState::AwaitingFinalize => "AwaitingFinalize",
            DhState::Finalized => "Finalized",
            DhState::Aborted => "Aborted",
        }
    }
}

/// Одна сторона DH-обмена.
///
/// ```text
/// Initiator:  initiate ─► AwaitingResponse ─┬─────────────► finalize ─► Finalized
///                                           └─► relayed ─► AwaitingFinalize ─┘
/// Responder:  respond ─► Responded
/// Relay:      relay ─► Init ─► forward ─► Relayed ─► forward ...
/// ```
///
/// Ключ и тег доступны только в `Responded` и `Finalized`. Ретранслятор
/// ключа не получает никогда. Любая ошибка `finalize` переводит сессию в
/// `Aborted`, секреты зануляются.
pub struct DhSession {
    role: DhRole,
    curve: Curve,
    state: DhState,
    exp: Option<Zeroizing<String>>,
    public: Option<String>,
    peer_public: Option<String>,
    key: Option<Zeroizing<String>>,
    verification: Option<String>,
}

impl DhSession {
    fn new(role: DhRole, curve: Curve, state: DhState) -> Self {
        Self {
            role,
            curve,
            state,
            exp: None,
            public: None,
            peer_public: None,
            key: None,
            verification: None,
        }
    }

    fn expect_state(&self, allowed: &[DhState], expected: &'static str) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(EccError::InvalidSessionState {
                expected,
                actual: self.state.name(),
            })
        }
    }

    /// Начать обмен как инициатор (dh1).
    pub fn initiate(curve: Curve) -> Result<Self> {
        let offer = dh1(curve)?;
        let mut session = Self::new(DhRole::Initiator, curve, DhState::AwaitingResponse);
        session.public = Some(offer.public);
        session.exp = Some(offer.exp);
        Ok(session)
    }

    /// Ответить на предложение пира (dh2).
    pub fn respond(peer_public: &str, curve: Curve) -> Result<Self> {
        let response = dh2(peer_public, curve)?;
        let mut session = Self::new(DhRole::Responder, curve, DhState::Responded);
        session.peer_public = Some(peer_public.to_string());
        session.public = Some(response.public);
        session.key = Some(response.key);
        session.verification = Some(response.verification);
        Ok(session)
    }

    /// Создать ретранслятор со своей экспонентой.
    pub fn relay(curve: Curve) -> Result<Self> {
        let offer = dh1(curve)?;
        let mut session = Self::new(DhRole::Relay, curve, DhState::Init);
        session.exp = Some(offer.exp);
        Ok(session)
    }

    /// Применить экспоненту ретранслятора к значению в пути (dhn).
    pub fn forward(&mut self, peer_public: &str) -> Result<String> {
        if self.role != DhRole::Relay {
            return Err(EccError::InvalidSessionState {
                expected: "relay session",
                actual: self.state.name(),
            });
        }
        self.expect_state(&[DhState::Init, DhState::Relayed], "Init or Relayed")?;

        let exp = self.exp.as_ref().ok_or(EccError::InvalidSessionState {
            expected: "relay exponent",
            actual: self.state.name(),
        })?;
        let relayed = dhn(peer_public, exp, self.curve)?;
        self.state = DhState::Relayed;
        Ok(relayed)
    }

    /// Отметить, что предложение ушло через ретранслятор.
    pub fn relayed(&mut self) -> Result<()> {
        if self.role != DhRole::Initiator {
            return Err(EccError::InvalidSessionState {
                expected: "initiator session",
                actual: self.state.name(),
            });
        }
        self.expect_state(&[DhState::AwaitingResponse], "AwaitingResponse")?;
        self.state = DhState::AwaitingFinalize;
        Ok(())
    }

    /// Завершить обмен ответом пира (dh3).
    pub fn finalize(&mut self, peer_public: &str) -> Result<()> {
        use tracing::debug;

        if self.role != DhRole::Initiator {
            return Err(EccError::InvalidSessionState {
                expected: "initiator session",
                actual: self.state.name(),
            });
        }
        self.expect_state(
            &[DhState::AwaitingResponse, DhState::AwaitingFinalize],
            "AwaitingResponse or AwaitingFinalize",
        )?;

        let result = match self.exp.as_ref() {
            Some(exp) => dh3(peer_public, exp, self.curve),
            None => Err(EccError::Unknown("initiator exponent missing".to_string())),
        };

        match result {
            Ok(key) => {
                self.peer_public = Some(peer_public.to_string());
                self.key = Some(key.key);
                self.verification = Some(key.verification);
                self.exp = None;
                self.state = DhState::Finalized;
                Ok(())
            }
            Err(err) => {
                debug!(target: "crypto::dh", curve = %self.curve, error = %err, "Finalize failed");
                self.abort();
                Err(err)
            }
        }
    }

    /// Прервать сессию и занулить секреты.
    pub fn abort(&mut self) {
        self.exp = None;
        self.key = None;
        self.verification = None;
        self.state = DhState::Aborted;
    }

    pub fn role(&self) -> DhRole {
        self.role
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    pub fn state(&self) -> DhState {
        self.state
    }

    /// Своё публичное значение (для отправки пиру)
    pub fn public(&self) -> Option<&str> {
        self.public.as_deref()
    }

    pub fn peer_public(&self) -> Option<&str> {
        self.peer_public.as_deref()
    }

    /// Экспонента для переноса через транспорт (только до завершения)
    pub fn exp(&self) -> Option<&str> {
        self.exp.as_ref().map(|e| e.as_str())
    }

    fn is_complete(&self) -> bool {
        matches!(
            (self.role, self.state),
            (DhRole::Responder, DhState::Responded) | (DhRole::Initiator, DhState::Finalized)
        )
    }

    pub fn key(&self) -> Option<&str> {
        if !self.is_complete() {
            return None;
        }
        self.key.as_ref().map(|k| k.as_str())
    }

    pub fn verification(&self) -> Option<&str> {
        if !self.is_complete() {
            return None;
        }
        self.verification.as_deref()
    }
}

impl fmt::Debug for DhSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DhSession")
            .field("role", &self.role)
            .field("curve", &self.curve)
            .field("state", &self.state)
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}
