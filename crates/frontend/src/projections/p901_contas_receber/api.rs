use crate::shared::api_client::ApiClient;
use contracts::projections::p901_contas_receber::dto::Receivable;
use contracts::shared::api_error::ApiError;
use contracts::shared::normalize::normalize_list;
use serde::Serialize;

const PATH: &str = "/api/contas-receber";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReceivableQuery {
    cliente_id: i64,
    /// Settled titles are left out when true
    somente_abertos: bool,
}

pub async fn list_receivables(
    client: &ApiClient,
    cliente_id: i64,
    somente_abertos: bool,
) -> Result<Vec<Receivable>, ApiError> {
    let query = ReceivableQuery {
        cliente_id,
        somente_abertos,
    };
    let payload = client
        .get(PATH, &query, "Não foi possível carregar as contas a receber")
        .await?;
    let mut items: Vec<Receivable> = normalize_list(&payload);
    items.sort_by_key(|r| r.due_date());
    Ok(items)
}
