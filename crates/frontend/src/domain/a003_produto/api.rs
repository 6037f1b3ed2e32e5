use crate::shared::api_client::{ApiClient, NoQuery};
use contracts::domain::a003_produto::aggregate::Product;
use contracts::domain::common::AggregateRoot;
use contracts::shared::api_error::ApiError;
use contracts::shared::normalize::{normalize_list, normalize_one};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    /// Code, description or EAN
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busca: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fornecedor_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divisao_id: Option<i64>,
    /// Price table whose prices the backend should include
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tabela: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limite: Option<usize>,
}

pub async fn list_products(client: &ApiClient, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
    let payload = client
        .get(&Product::api_path(), query, "Não foi possível carregar os produtos")
        .await?;
    Ok(normalize_list(&payload))
}

/// Full product with price tables and stock lots.
pub async fn get_product(client: &ApiClient, codigo: &str) -> Result<Product, ApiError> {
    let path = format!(
        "{}/{}",
        Product::api_path(),
        crate::shared::api_utils::path_segment(codigo)
    );
    let payload = client
        .get(&path, &NoQuery {}, "Produto não encontrado")
        .await?;
    Ok(normalize_one(&payload))
}
