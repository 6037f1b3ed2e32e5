use contracts::domain::a001_empresa::aggregate::Empresa;
use contracts::system::session::{StoredSession, EMPRESA_KEY, SESSION_KEY, TOKEN_KEY};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::window;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn save_json<T: Serialize>(key: &str, value: &T) {
    let Some(storage) = get_local_storage() else {
        return;
    };
    match serde_json::to_string(value) {
        Ok(text) => {
            let _ = storage.set_item(key, &text);
        }
        Err(e) => log::warn!("could not persist {}: {}", key, e),
    }
}

/// Unreadable entries are treated as absent and removed.
fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let storage = get_local_storage()?;
    let text = storage.get_item(key).ok()??;
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("discarding stored {}: {}", key, e);
            let _ = storage.remove_item(key);
            None
        }
    }
}

pub fn save_token(token: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
    }
}

pub fn get_token() -> Option<String> {
    get_local_storage()?
        .get_item(TOKEN_KEY)
        .ok()?
        .filter(|t| !t.trim().is_empty())
}

pub fn save_session(session: &StoredSession) {
    save_json(SESSION_KEY, session);
}

pub fn get_session() -> Option<StoredSession> {
    load_json(SESSION_KEY)
}

pub fn save_empresa(empresa: &Empresa) {
    save_json(EMPRESA_KEY, empresa);
}

pub fn get_empresa() -> Option<Empresa> {
    load_json(EMPRESA_KEY)
}

pub fn clear_empresa() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(EMPRESA_KEY);
    }
}

/// Removes token, session and company.
pub fn clear_all() {
    if let Some(storage) = get_local_storage() {
        for key in [TOKEN_KEY, SESSION_KEY, EMPRESA_KEY] {
            let _ = storage.remove_item(key);
        }
    }
}
