//! Client service: list/search, get, create, update and CNPJ enrichment.

use crate::shared::api_client::{ApiClient, NoQuery};
use contracts::domain::a002_cliente::aggregate::Client;
use contracts::domain::a002_cliente::cnpj_lookup::CnpjLookup;
use contracts::domain::a002_cliente::document::only_digits;
use contracts::domain::a002_cliente::form::ClientForm;
use contracts::domain::common::AggregateRoot;
use contracts::shared::api_error::ApiError;
use contracts::shared::normalize::{normalize_list, normalize_one, FromRaw};
use gloo_net::http::Request;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientQuery {
    /// Name, code or document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busca: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub representante_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limite: Option<usize>,
}

impl ClientQuery {
    pub fn search(text: &str, limite: usize) -> Self {
        let text = text.trim();
        Self {
            busca: (!text.is_empty()).then(|| text.to_string()),
            limite: Some(limite),
            ..Default::default()
        }
    }
}

pub async fn list_clients(client: &ApiClient, query: &ClientQuery) -> Result<Vec<Client>, ApiError> {
    let payload = client
        .get(&Client::api_path(), query, "Não foi possível carregar os clientes")
        .await?;
    Ok(normalize_list(&payload))
}

pub async fn get_client(client: &ApiClient, id: i64) -> Result<Client, ApiError> {
    let path = format!("{}/{}", Client::api_path(), id);
    let payload = client
        .get(&path, &NoQuery {}, "Cliente não encontrado")
        .await?;
    Ok(normalize_one(&payload))
}

/// Creates or updates depending on `form.id`; returns the stored client.
pub async fn save_client(client: &ApiClient, form: &ClientForm) -> Result<Client, ApiError> {
    let empresa_id = client.empresa_id()?;
    let body = form.to_write_request(empresa_id);
    let payload = match form.id {
        Some(id) => {
            let path = format!("{}/{}", Client::api_path(), id);
            client.put(&path, &body, "Não foi possível salvar o cliente").await?
        }
        None => {
            client
                .post(&Client::api_path(), &body, "Não foi possível cadastrar o cliente")
                .await?
        }
    };
    let mut saved: Client = normalize_one(&payload);
    // Some backends answer 204 or echo only the id.
    if saved.id == 0 {
        saved.id = form.id.unwrap_or_default();
    }
    Ok(saved)
}

/// Public registry lookup. No token and no company: the registry is outside
/// the backend.
pub async fn lookup_cnpj(client: &ApiClient, cnpj: &str) -> Result<CnpjLookup, ApiError> {
    let digits = only_digits(cnpj);
    let url = client.config().cnpj_lookup_url(&digits);
    let response = Request::get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| {
            log::warn!("cnpj lookup failed: {}", e);
            ApiError::Transport(e.to_string())
        })?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    if !response.ok() {
        return Err(ApiError::rejected(status, &body, "CNPJ não encontrado"));
    }
    let raw: serde_json::Value =
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(CnpjLookup::from_raw(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query() {
        let q = ClientQuery::search("  mercado ", 50);
        assert_eq!(serde_qs::to_string(&q).unwrap(), "busca=mercado&limite=50");
        let empty = ClientQuery::search("   ", 50);
        assert_eq!(serde_qs::to_string(&empty).unwrap(), "limite=50");
    }
}
