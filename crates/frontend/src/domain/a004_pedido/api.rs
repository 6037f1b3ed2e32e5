//! Order service. Composition and payload rules live in `contracts`; this
//! module only moves them over HTTP.

use crate::shared::api_client::{ApiClient, NoQuery};
use contracts::domain::a004_pedido::aggregate::Order;
use contracts::domain::a004_pedido::composition::LineItem;
use contracts::domain::a004_pedido::payload::{build_create_payload, build_update_payload, OrderForm};
use contracts::domain::common::AggregateRoot;
use contracts::shared::api_error::ApiError;
use contracts::shared::normalize::{normalize_list, normalize_one};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    /// YYYY-MM-DD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_inicio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_fim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<i64>,
    /// Number, client name or origin tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busca: Option<String>,
}

pub async fn list_orders(client: &ApiClient, query: &OrderQuery) -> Result<Vec<Order>, ApiError> {
    let payload = client
        .get(&Order::api_path(), query, "Não foi possível carregar os pedidos")
        .await?;
    Ok(normalize_list(&payload))
}

/// Order with its lines.
pub async fn get_order(client: &ApiClient, id: i64) -> Result<Order, ApiError> {
    let path = format!("{}/{}", Order::api_path(), id);
    let payload = client.get(&path, &NoQuery {}, "Pedido não encontrado").await?;
    Ok(normalize_one(&payload))
}

/// Sends the order; `id` decides between create and update.
///
/// The backend may answer with the full order, with only `{ id }`, or with
/// nothing; in the last two cases the order is read back by id.
pub async fn save_order(
    client: &ApiClient,
    id: Option<i64>,
    form: &OrderForm,
    lines: &[LineItem],
) -> Result<Order, ApiError> {
    let payload = match id {
        Some(id) => {
            let body = build_update_payload(id, form, lines);
            let path = format!("{}/{}", Order::api_path(), id);
            client.put(&path, &body, "Não foi possível salvar o pedido").await?
        }
        None => {
            let body = build_create_payload(form, lines);
            client
                .post(&Order::api_path(), &body, "Não foi possível criar o pedido")
                .await?
        }
    };
    let saved: Order = normalize_one(&payload);
    let saved_id = if saved.id > 0 { saved.id } else { id.unwrap_or_default() };
    if saved_id == 0 {
        return Err(ApiError::Decode("resposta sem o número do pedido".to_string()));
    }
    if saved.itens.is_empty() {
        return get_order(client, saved_id).await;
    }
    Ok(saved)
}

pub async fn delete_order(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    let path = format!("{}/{}", Order::api_path(), id);
    client.delete(&path, "Não foi possível excluir o pedido").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string() {
        let q = OrderQuery {
            data_inicio: Some("2026-10-01".into()),
            cliente_id: Some(7),
            ..Default::default()
        };
        assert_eq!(
            serde_qs::to_string(&q).unwrap(),
            "dataInicio=2026-10-01&clienteId=7"
        );
        assert_eq!(serde_qs::to_string(&OrderQuery::default()).unwrap(), "");
    }
}
