use crate::shared::api_client::ApiClient;
use contracts::projections::p902_historico_compras::dto::{sort_recent_first, PurchaseRecord};
use contracts::shared::api_error::ApiError;
use contracts::shared::normalize::normalize_list;
use serde::Serialize;

const PATH: &str = "/api/historico-compras";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PurchaseQuery {
    cliente_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_inicio: Option<String>,
}

/// Items bought by the client, most recent first.
pub async fn list_purchases(
    client: &ApiClient,
    cliente_id: i64,
    data_inicio: Option<String>,
) -> Result<Vec<PurchaseRecord>, ApiError> {
    let query = PurchaseQuery {
        cliente_id,
        data_inicio,
    };
    let payload = client
        .get(PATH, &query, "Não foi possível carregar o histórico de compras")
        .await?;
    let mut items: Vec<PurchaseRecord> = normalize_list(&payload);
    sort_recent_first(&mut items);
    Ok(items)
}
