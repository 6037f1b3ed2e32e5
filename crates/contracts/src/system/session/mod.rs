//! Сессия оператора и решения о доступе к экранам.

use crate::domain::a001_empresa::aggregate::Empresa;
use crate::system::auth::UserInfo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage keys of the persisted session
pub const TOKEN_KEY: &str = "televendas.token";
pub const SESSION_KEY: &str = "televendas.session";
pub const EMPRESA_KEY: &str = "televendas.empresa";

/// Persisted session object: user identity and login instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub user: UserInfo,
    pub logged_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(user: UserInfo, logged_at: DateTime<Utc>) -> Self {
        Self { user, logged_at }
    }
}

/// What the gate sees when deciding whether a screen may render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
    pub empresa: Option<Empresa>,
}

impl SessionSnapshot {
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    pub fn empresa_id(&self) -> Option<i64> {
        self.empresa.as_ref().map(|e| e.id).filter(|id| *id > 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectLogin,
    RedirectEmpresaSelect,
}

/// Token first, then company when the screen requires one.
pub fn guard(snapshot: &SessionSnapshot, require_empresa: bool) -> GuardDecision {
    if !snapshot.has_token() {
        GuardDecision::RedirectLogin
    } else if require_empresa && snapshot.empresa_id().is_none() {
        GuardDecision::RedirectEmpresaSelect
    } else {
        GuardDecision::Allow
    }
}

/// Ensures a burst of 401 responses triggers one logout.
///
/// Armed on login; the first `trip` returns `true` and disarms it.
#[derive(Debug, Clone, Default)]
pub struct UnauthorizedLatch {
    armed: bool,
}

impl UnauthorizedLatch {
    pub fn armed() -> Self {
        Self { armed: true }
    }

    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn trip(&mut self) -> bool {
        std::mem::replace(&mut self.armed, false)
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empresa(id: i64) -> Empresa {
        Empresa {
            id,
            ..Default::default()
        }
    }

    #[test]
    fn test_guard_order() {
        let mut snapshot = SessionSnapshot::default();
        assert_eq!(guard(&snapshot, false), GuardDecision::RedirectLogin);

        snapshot.empresa = Some(empresa(1));
        snapshot.token = Some(" ".to_string());
        assert_eq!(guard(&snapshot, true), GuardDecision::RedirectLogin);

        snapshot.token = Some("tok".to_string());
        snapshot.empresa = None;
        assert_eq!(guard(&snapshot, false), GuardDecision::Allow);
        assert_eq!(guard(&snapshot, true), GuardDecision::RedirectEmpresaSelect);

        snapshot.empresa = Some(empresa(0));
        assert_eq!(guard(&snapshot, true), GuardDecision::RedirectEmpresaSelect);

        snapshot.empresa = Some(empresa(3));
        assert_eq!(guard(&snapshot, true), GuardDecision::Allow);
    }

    #[test]
    fn test_latch_acts_once_per_login() {
        let mut latch = UnauthorizedLatch::armed();
        let acted = (0..5).filter(|_| latch.trip()).count();
        assert_eq!(acted, 1);
        assert!(!latch.is_armed());

        latch.arm();
        assert!(latch.trip());
        assert!(!latch.trip());
    }

    #[test]
    fn test_unarmed_latch_ignores() {
        let mut latch = UnauthorizedLatch::default();
        assert!(!latch.trip());
    }
}
