use crate::shared::api_client::ApiClient;
use contracts::domain::a001_empresa::aggregate::Empresa;
use contracts::domain::common::AggregateRoot;
use contracts::shared::api_error::ApiError;
use contracts::shared::natural_sort::natural_cmp;
use contracts::shared::normalize::normalize_list;

/// Companies the operator may work for, by display name.
pub async fn list_empresas(client: &ApiClient) -> Result<Vec<Empresa>, ApiError> {
    let payload = client
        .get_unscoped(&Empresa::api_path(), "Não foi possível carregar as empresas")
        .await?;
    let mut items: Vec<Empresa> = normalize_list(&payload);
    items.retain(|e| e.id > 0);
    items.sort_by(|a, b| natural_cmp(a.display_name(), b.display_name()).then(a.id.cmp(&b.id)));
    Ok(items)
}
