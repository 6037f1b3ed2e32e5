use crate::shared::api_client::{ApiClient, NoQuery};
use contracts::domain::a005_representante::aggregate::Representative;
use contracts::domain::common::AggregateRoot;
use contracts::shared::api_error::ApiError;
use contracts::shared::natural_sort::natural_cmp;
use contracts::shared::normalize::normalize_list;

/// Representatives of the company, by name.
pub async fn list_representatives(client: &ApiClient) -> Result<Vec<Representative>, ApiError> {
    let payload = client
        .get(
            &Representative::api_path(),
            &NoQuery {},
            "Não foi possível carregar os representantes",
        )
        .await?;
    let mut items: Vec<Representative> = normalize_list(&payload);
    items.sort_by(|a, b| {
        natural_cmp(&a.nome, &b.nome)
            .then_with(|| natural_cmp(&a.codigo, &b.codigo))
            .then(a.id.cmp(&b.id))
    });
    Ok(items)
}
