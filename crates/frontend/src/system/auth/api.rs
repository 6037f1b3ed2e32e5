use contracts::shared::api_error::ApiError;
use contracts::system::auth::{LoginRequest, LoginResponse};
use gloo_net::http::Request;
use serde_json::Value;

/// Login with username and password
///
/// The only call made without a token.
pub async fn login(base: &str, username: String, password: String) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest { username, password };

    let response = Request::post(&format!("{}/api/auth/login", base))
        .json(&request)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| {
            log::warn!("login request failed: {}", e);
            ApiError::Transport(e.to_string())
        })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::rejected(status, &body, "Usuário ou senha inválidos"));
    }

    let payload: Value = serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
    LoginResponse::from_payload(&payload)
        .ok_or_else(|| ApiError::Decode("resposta de login sem token".to_string()))
}
