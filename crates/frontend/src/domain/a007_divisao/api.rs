use crate::shared::api_client::ApiClient;
use contracts::domain::a007_divisao::aggregate::Division;
use contracts::domain::common::AggregateRoot;
use contracts::shared::api_error::ApiError;
use contracts::shared::natural_sort::sort_lookup;
use contracts::shared::normalize::normalize_list;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fornecedor_id: Option<i64>,
}

/// Divisions, optionally of one supplier.
pub async fn list_divisions(client: &ApiClient, fornecedor_id: Option<i64>) -> Result<Vec<Division>, ApiError> {
    let query = DivisionQuery { fornecedor_id };
    let payload = client
        .get(&Division::api_path(), &query, "Não foi possível carregar as divisões")
        .await?;
    let mut items: Vec<Division> = normalize_list(&payload);
    if let Some(fornecedor_id) = fornecedor_id {
        // Older backends ignore the filter.
        items.retain(|d| d.fornecedor_id == 0 || d.fornecedor_id == fornecedor_id);
    }
    sort_lookup(&mut items);
    Ok(items)
}
