use crate::shared::api_client::{ApiClient, NoQuery};
use contracts::domain::a006_fornecedor::aggregate::Supplier;
use contracts::domain::common::AggregateRoot;
use contracts::shared::api_error::ApiError;
use contracts::shared::natural_sort::sort_lookup;
use contracts::shared::normalize::normalize_list;

pub async fn list_suppliers(client: &ApiClient) -> Result<Vec<Supplier>, ApiError> {
    let payload = client
        .get(&Supplier::api_path(), &NoQuery {}, "Não foi possível carregar os fornecedores")
        .await?;
    let mut items: Vec<Supplier> = normalize_list(&payload);
    sort_lookup(&mut items);
    Ok(items)
}
