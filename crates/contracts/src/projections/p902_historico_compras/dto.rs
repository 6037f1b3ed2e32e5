use crate::shared::normalize::{parse_backend_date, Aliases, FromRaw, RawFields};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

const PEDIDO_ID: Aliases = &["pedido_id", "pedidoId", "pedido", "numero_pedido", "numeroPedido"];
const DATA: Aliases = &["data", "data_pedido", "dataPedido", "emissao"];
const PRODUTO_CODIGO: Aliases = &["produto_codigo", "produtoCodigo", "codigo_produto", "codigoProduto", "produto.codigo"];
const PRODUTO_DESCRICAO: Aliases = &["produto_descricao", "produtoDescricao", "descricao", "produto.descricao"];
const QUANTIDADE: Aliases = &["quantidade", "qtd", "qtde"];
const PRECO: Aliases = &["preco", "preco_unitario", "precoUnitario", "valor_unitario", "valorUnitario"];
const TOTAL: Aliases = &["total", "valor_total", "valorTotal"];

/// Строка истории покупок клиента
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub pedido_id: String,
    pub data: String,
    pub produto_codigo: String,
    pub produto_descricao: String,
    pub quantidade: f64,
    pub preco: f64,
    pub total: f64,
}

impl FromRaw for PurchaseRecord {
    fn from_raw(raw: &Value) -> Self {
        let quantidade = raw.number(QUANTIDADE);
        let preco = raw.number(PRECO);
        Self {
            pedido_id: raw.text(PEDIDO_ID),
            data: raw.text(DATA),
            produto_codigo: raw.text(PRODUTO_CODIGO),
            produto_descricao: raw.text(PRODUTO_DESCRICAO),
            quantidade,
            preco,
            total: raw.opt_number(TOTAL).unwrap_or(quantidade * preco),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseSummary {
    pub valor_total: f64,
    pub pedidos: usize,
    pub produtos: usize,
    pub ultima_compra: Option<NaiveDate>,
}

impl PurchaseSummary {
    pub fn compute(items: &[PurchaseRecord]) -> Self {
        let pedidos: BTreeSet<&str> = items
            .iter()
            .map(|i| i.pedido_id.as_str())
            .filter(|id| !id.is_empty())
            .collect();
        let produtos: BTreeSet<&str> = items
            .iter()
            .map(|i| i.produto_codigo.as_str())
            .filter(|code| !code.is_empty())
            .collect();
        Self {
            valor_total: items.iter().map(|i| i.total).sum(),
            pedidos: pedidos.len(),
            produtos: produtos.len(),
            ultima_compra: items.iter().filter_map(|i| parse_backend_date(&i.data)).max(),
        }
    }
}

/// Most recent first; ties keep backend order.
pub fn sort_recent_first(items: &mut [PurchaseRecord]) {
    items.sort_by_key(|i| std::cmp::Reverse(parse_backend_date(&i.data)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary() {
        let mut items: Vec<PurchaseRecord> = [
            json!({ "pedidoId": 1, "dataPedido": "2026-01-05", "produto": { "codigo": "A" }, "qtd": 2, "preco": "10,50" }),
            json!({ "pedido_id": "1", "data": "2026-01-05", "produto_codigo": "B", "valor_total": 7 }),
            json!({ "pedido": 2, "data": "20/12/2025", "codigoProduto": "A", "total": 3 }),
            json!({}),
        ]
        .iter()
        .map(PurchaseRecord::from_raw)
        .collect();

        assert!((items[0].total - 21.0).abs() < 1e-9);
        let summary = PurchaseSummary::compute(&items);
        assert!((summary.valor_total - 31.0).abs() < 1e-9);
        assert_eq!(summary.pedidos, 2);
        assert_eq!(summary.produtos, 2);
        assert_eq!(summary.ultima_compra, NaiveDate::from_ymd_opt(2026, 1, 5));

        sort_recent_first(&mut items);
        assert_eq!(items[0].pedido_id, "1");
        assert_eq!(items[3].pedido_id, "");
    }
}
