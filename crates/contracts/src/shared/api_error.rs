use serde_json::Value;
use thiserror::Error;

/// Failure of a call to the televendas backend.
///
/// Missing-context variants are produced before any request is sent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Nenhuma empresa selecionada")]
    MissingEmpresa,

    #[error("Sessão não iniciada. Faça login novamente")]
    MissingToken,

    #[error("Sessão expirada. Faça login novamente")]
    Unauthorized,

    /// The detail is kept for logs; users see the generic message.
    #[error("Erro de conexão com o servidor")]
    Transport(String),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Resposta inválida do servidor: {0}")]
    Decode(String),
}

impl ApiError {
    /// Builds a `Rejected` error from a non-2xx response body.
    pub fn rejected(status: u16, body: &str, fallback: &str) -> Self {
        let message = extract_error_message(body).unwrap_or_else(|| fallback.to_string());
        ApiError::Rejected { status, message }
    }

    pub fn is_missing_context(&self) -> bool {
        matches!(self, ApiError::MissingEmpresa | ApiError::MissingToken)
    }
}

const MESSAGE_KEYS: &[&str] = &["message", "mensagem", "error", "erro", "detail"];

/// Pulls a human-readable message out of an error body.
///
/// Looks at `message`/`error` style keys at the top level and one level deep
/// (`{"error": {"message": ".."}}`), then at a non-JSON plain-text body.
pub fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => message_from_value(&value, 0),
        Err(_) if !trimmed.starts_with('<') && trimmed.len() <= 300 => Some(trimmed.to_string()),
        Err(_) => None,
    }
}

fn message_from_value(value: &Value, depth: usize) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(map) if depth < 2 => MESSAGE_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(|v| message_from_value(v, depth + 1)),
        Value::Array(items) if depth < 2 => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|v| message_from_value(v, depth + 1))
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_key() {
        assert_eq!(
            extract_error_message(r#"{"message":"Cliente bloqueado"}"#),
            Some("Cliente bloqueado".to_string())
        );
        assert_eq!(
            extract_error_message(r#"{"error":"Estoque insuficiente"}"#),
            Some("Estoque insuficiente".to_string())
        );
    }

    #[test]
    fn test_nested_error_object() {
        assert_eq!(
            extract_error_message(r#"{"error":{"message":"Prazo inválido"}}"#),
            Some("Prazo inválido".to_string())
        );
    }

    #[test]
    fn test_validation_array() {
        assert_eq!(
            extract_error_message(r#"{"message":["cnpj inválido","email obrigatório"]}"#),
            Some("cnpj inválido; email obrigatório".to_string())
        );
    }

    #[test]
    fn test_unparseable_bodies() {
        assert_eq!(extract_error_message(""), None);
        assert_eq!(extract_error_message("<html>502 Bad Gateway</html>"), None);
        assert_eq!(extract_error_message(r#"{"status":500}"#), None);
        assert_eq!(
            extract_error_message("Service Unavailable"),
            Some("Service Unavailable".to_string())
        );
    }

    #[test]
    fn test_rejected_uses_fallback() {
        let err = ApiError::rejected(500, "", "Erro ao salvar pedido");
        assert_eq!(err.to_string(), "Erro ao salvar pedido");
        let err = ApiError::rejected(422, r#"{"erro":"Sem limite"}"#, "Erro ao salvar pedido");
        assert_eq!(err.to_string(), "Sem limite");
    }

    #[test]
    fn test_transport_message_is_generic() {
        let err = ApiError::Transport("TypeError: Failed to fetch".to_string());
        assert_eq!(err.to_string(), "Erro de conexão com o servidor");
        assert!(!err.is_missing_context());
        assert!(ApiError::MissingEmpresa.is_missing_context());
    }
}
