use contracts::domain::a001_empresa::aggregate::Empresa;
use contracts::system::auth::{LoginResponse, UserInfo};
use contracts::system::session::{SessionSnapshot, StoredSession, UnauthorizedLatch};
use leptos::prelude::*;

use super::storage;

/// Where a forced logout lands; the gate renders the login form there.
const LOGIN_PATH: &str = "/";

/// Сессия оператора: токен, пользователь и выбранная empresa.
///
/// Provided once at the app root. Services receive it through `ApiClient`
/// instead of reading storage themselves.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub token: RwSignal<Option<String>>,
    pub user: RwSignal<Option<UserInfo>>,
    pub empresa: RwSignal<Option<Empresa>>,
    latch: StoredValue<UnauthorizedLatch>,
}

impl SessionContext {
    /// Restores whatever the browser kept from the previous visit.
    pub fn restore() -> Self {
        let token = storage::get_token();
        let user = storage::get_session().map(|s| s.user);
        let empresa = if token.is_some() {
            storage::get_empresa()
        } else {
            None
        };
        let latch = if token.is_some() {
            UnauthorizedLatch::armed()
        } else {
            UnauthorizedLatch::default()
        };
        log::debug!(
            "session restored: token={}, empresa={:?}",
            token.is_some(),
            empresa.as_ref().map(|e| e.id)
        );
        Self {
            token: RwSignal::new(token),
            user: RwSignal::new(user),
            empresa: RwSignal::new(empresa),
            latch: StoredValue::new(latch),
        }
    }

    /// Reactive view used by the gate.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            token: self.token.get(),
            user: self.user.get(),
            empresa: self.empresa.get(),
        }
    }

    pub fn token_untracked(&self) -> Option<String> {
        self.token
            .get_untracked()
            .filter(|t| !t.trim().is_empty())
    }

    pub fn empresa_id_untracked(&self) -> Option<i64> {
        self.empresa
            .with_untracked(|e| e.as_ref().map(|e| e.id))
            .filter(|id| *id > 0)
    }

    pub fn login(&self, response: LoginResponse) {
        storage::save_token(&response.token);
        storage::save_session(&StoredSession::new(response.user.clone(), chrono::Utc::now()));
        storage::clear_empresa();
        self.latch.update_value(|latch| latch.arm());
        self.empresa.set(None);
        self.user.set(Some(response.user));
        self.token.set(Some(response.token));
    }

    pub fn select_empresa(&self, empresa: Empresa) {
        log::info!("empresa selected: {} ({})", empresa.display_name(), empresa.id);
        storage::save_empresa(&empresa);
        self.empresa.set(Some(empresa));
    }

    /// Back to the company list without logging out.
    pub fn change_empresa(&self) {
        storage::clear_empresa();
        self.empresa.set(None);
    }

    pub fn logout(&self) {
        storage::clear_all();
        self.latch.update_value(|latch| {
            latch.trip();
        });
        self.empresa.set(None);
        self.user.set(None);
        self.token.set(None);
    }

    /// Reacts to a 401: the first one after login clears the session and
    /// reloads on the login screen, later ones are ignored.
    pub fn handle_unauthorized(&self) {
        let mut act = false;
        self.latch.update_value(|latch| act = latch.trip());
        if !act {
            log::debug!("401 ignored, logout already in progress");
            return;
        }
        log::info!("session expired, returning to login");
        storage::clear_all();
        self.token.set(None);
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(LOGIN_PATH);
        }
    }
}

/// Hook to access the session
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext not found in component tree")
}
