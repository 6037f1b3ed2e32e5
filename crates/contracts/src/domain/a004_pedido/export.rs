//! "Exportar para faturamento": a JSON document downloaded in the browser.

use super::aggregate::Order;
use super::composition::{LineItem, Totals};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct InvoicingHeader {
    pub id: i64,
    pub numero: String,
    pub data: String,
    pub operacao: String,
    pub cliente_id: i64,
    pub cliente_nome: String,
    pub representante_id: i64,
    pub tabela: String,
    pub prazo_id: i64,
    pub forma_pagamento_id: i64,
    pub pedido_origem: String,
    pub observacao: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoicingExport {
    pub pedido: InvoicingHeader,
    pub itens: Vec<LineItem>,
    pub totais: Totals,
    pub exportado_em: DateTime<Utc>,
}

impl InvoicingExport {
    pub fn from_order(order: &Order, exportado_em: DateTime<Utc>) -> Self {
        Self {
            pedido: InvoicingHeader {
                id: order.id,
                numero: order.numero.clone(),
                data: order.data.clone(),
                operacao: order.operacao.clone(),
                cliente_id: order.cliente_id,
                cliente_nome: order.cliente_nome.clone(),
                representante_id: order.representante_id,
                tabela: order.tabela.clone(),
                prazo_id: order.prazo_id,
                forma_pagamento_id: order.forma_pagamento_id,
                pedido_origem: order.pedido_origem.clone(),
                observacao: order.observacao.clone(),
            },
            itens: order.itens.clone(),
            totais: order.totals(),
            exportado_em,
        }
    }

    pub fn file_name(&self) -> String {
        let key = if self.pedido.numero.is_empty() {
            self.pedido.id.to_string()
        } else {
            self.pedido.numero.clone()
        };
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        format!("pedido-{}.json", safe)
    }

    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_export_document() {
        let order = Order {
            id: 4,
            numero: "2024/0004".to_string(),
            cliente_nome: "Mercado Sol".to_string(),
            ..Default::default()
        };
        let at = Utc.with_ymd_and_hms(2024, 5, 2, 10, 0, 0).unwrap();
        let export = InvoicingExport::from_order(&order, at);
        assert_eq!(export.file_name(), "pedido-2024_0004.json");

        let json: serde_json::Value = serde_json::from_str(&export.to_pretty_json().unwrap()).unwrap();
        assert_eq!(json["pedido"]["cliente_nome"], "Mercado Sol");
        assert_eq!(json["totais"]["liquido"], 0.0);
        assert_eq!(json["exportado_em"], "2024-05-02T10:00:00Z");
    }
}
