use crate::shared::normalize::{record_envelope, Aliases, RawFields};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const TOKEN: Aliases = &["token", "access_token", "accessToken", "jwt"];
const USER: Aliases = &["user", "usuario"];
const USER_ID: Aliases = &["id", "usuario_id", "usuarioId", "user_id"];
const USERNAME: Aliases = &["username", "login", "usuario", "email"];
const FULL_NAME: Aliases = &["nome", "full_name", "fullName", "name"];
const EMAIL: Aliases = &["email"];
const REPRESENTANTE_ID: Aliases = &["representante_id", "representanteId", "vendedor_id", "vendedorId"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().is_empty() {
            return Err("Informe o usuário");
        }
        if self.password.is_empty() {
            return Err("Informe a senha");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    /// Set when the operator is bound to a representative
    pub representante_id: Option<i64>,
}

impl UserInfo {
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }

    fn from_raw(raw: &Value) -> Self {
        Self {
            id: raw.text(USER_ID),
            username: raw.text(USERNAME),
            full_name: raw.opt_text(FULL_NAME),
            email: raw.opt_text(EMAIL),
            representante_id: raw.opt_int(REPRESENTANTE_ID).filter(|id| *id > 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

impl LoginResponse {
    /// Reads the token and user from the login body.
    ///
    /// Returns `None` when no token is present. A body without a nested user
    /// object is read as the user itself.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let body = record_envelope(payload);
        let token = body.opt_text(TOKEN)?;
        let user = match body.get(USER[0]).or_else(|| body.get(USER[1])) {
            Some(nested @ Value::Object(_)) => UserInfo::from_raw(nested),
            _ => UserInfo::from_raw(body),
        };
        Some(Self { token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_user() {
        let payload = json!({
            "data": {
                "accessToken": "abc",
                "usuario": { "usuarioId": 5, "login": "ana", "nome": "Ana Paula", "vendedorId": "12" }
            }
        });
        let response = LoginResponse::from_payload(&payload).unwrap();
        assert_eq!(response.token, "abc");
        assert_eq!(response.user.id, "5");
        assert_eq!(response.user.display_name(), "Ana Paula");
        assert_eq!(response.user.representante_id, Some(12));
    }

    #[test]
    fn test_flat_body_and_missing_token() {
        let flat = json!({ "token": "t", "username": "op" });
        let response = LoginResponse::from_payload(&flat).unwrap();
        assert_eq!(response.user.display_name(), "op");
        assert_eq!(response.user.representante_id, None);

        assert!(LoginResponse::from_payload(&json!({ "user": {} })).is_none());
    }

    #[test]
    fn test_login_request_validation() {
        let request = LoginRequest {
            username: "  ".to_string(),
            password: "x".to_string(),
        };
        assert_eq!(request.validate(), Err("Informe o usuário"));
    }
}
