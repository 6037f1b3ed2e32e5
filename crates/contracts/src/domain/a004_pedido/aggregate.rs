use super::composition::{compute_totals, ordered_lines, LineItem, Totals};
use crate::domain::common::AggregateRoot;
use crate::shared::normalize::{Aliases, FromRaw, RawFields};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Field aliases
// ============================================================================

const ID: Aliases = &["id", "pedido_id", "pedidoId", "id_pedido"];
const NUMERO: Aliases = &["numero", "numero_pedido", "numeroPedido", "num_pedido", "id"];
const DATA: Aliases = &["data", "data_pedido", "dataPedido", "data_emissao", "dataEmissao", "created_at"];
const OPERACAO: Aliases = &["operacao", "operacao_codigo", "operacaoCodigo", "tipo_operacao", "tipoOperacao"];
const OPERACAO_DESCRICAO: Aliases = &["operacao_descricao", "operacaoDescricao"];
const CLIENTE_ID: Aliases = &["cliente_id", "clienteId", "id_cliente", "cliente.id"];
const CLIENTE_NOME: Aliases = &[
    "cliente_nome",
    "clienteNome",
    "cliente_razao_social",
    "clienteRazaoSocial",
    "cliente.razao_social",
    "cliente.nome",
];
const REPRESENTANTE_ID: Aliases = &["representante_id", "representanteId", "vendedor_id", "vendedorId"];
const REPRESENTANTE_NOME: Aliases = &["representante_nome", "representanteNome", "vendedor_nome", "vendedorNome", "representante.nome"];
const TABELA: Aliases = &["tabela", "tabela_preco", "tabelaPreco", "tabela_codigo", "tabelaCodigo"];
const PRAZO_ID: Aliases = &["prazo_id", "prazoId", "prazo_pagamento_id", "prazoPagamentoId", "condicao_pagamento_id"];
const PRAZO_DESCRICAO: Aliases = &["prazo_descricao", "prazoDescricao", "prazo"];
const FORMA_PAGAMENTO_ID: Aliases = &["forma_pagamento_id", "formaPagamentoId", "forma_pgto_id"];
const ROTA_ID: Aliases = &["rota_id", "rotaId"];
const SEGMENTO_ID: Aliases = &["segmento_id", "segmentoId"];
const CIDADE_ID: Aliases = &["cidade_id", "cidadeId"];
const OBSERVACAO: Aliases = &["observacao", "obs", "observacoes"];
const PEDIDO_ORIGEM: Aliases = &["pedido_origem", "pedidoOrigem", "origem"];
const TRANSMITIDO: Aliases = &["transmitido", "is_transmitido", "isTransmitido", "enviado"];
const FATURADO: Aliases = &["faturado", "is_faturado", "isFaturado", "nota_emitida"];
const VALOR_TOTAL: Aliases = &["valor_total", "valorTotal", "total", "valor_liquido", "valorLiquido"];
const ITENS: Aliases = &["itens", "items", "produtos", "pedido_itens", "pedidoItens"];

// ============================================================================
// Aggregate
// ============================================================================

/// Pedido de venda
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub numero: String,
    pub data: String,
    pub operacao: String,
    pub operacao_descricao: String,
    pub cliente_id: i64,
    pub cliente_nome: String,
    pub representante_id: i64,
    pub representante_nome: String,
    pub tabela: String,
    pub prazo_id: i64,
    pub prazo_descricao: String,
    pub forma_pagamento_id: i64,
    pub rota_id: i64,
    pub segmento_id: i64,
    pub cidade_id: i64,
    pub observacao: String,
    pub pedido_origem: String,
    pub transmitido: bool,
    pub faturado: bool,
    /// Total stored by the backend; list rows come without items
    pub valor_total: f64,
    pub itens: Vec<LineItem>,
}

impl Order {
    pub fn totals(&self) -> Totals {
        compute_totals(&self.itens)
    }

    /// Net total for display: computed from items when they were loaded.
    pub fn display_total(&self) -> f64 {
        if self.itens.is_empty() {
            self.valor_total
        } else {
            self.totals().liquido
        }
    }

    /// Transmitted or invoiced orders are read-only in the console.
    pub fn is_locked(&self) -> bool {
        self.transmitido || self.faturado
    }

    pub fn status_label(&self) -> &'static str {
        if self.faturado {
            "Faturado"
        } else if self.transmitido {
            "Transmitido"
        } else {
            "Digitação"
        }
    }
}

impl FromRaw for Order {
    fn from_raw(raw: &Value) -> Self {
        let itens: Vec<LineItem> = raw.records(ITENS).iter().map(LineItem::from_raw).collect();
        Self {
            id: raw.int(ID),
            numero: raw.text(NUMERO),
            data: raw.text(DATA),
            operacao: raw.text(OPERACAO),
            operacao_descricao: raw.text(OPERACAO_DESCRICAO),
            cliente_id: raw.int(CLIENTE_ID),
            cliente_nome: raw.text(CLIENTE_NOME),
            representante_id: raw.int(REPRESENTANTE_ID),
            representante_nome: raw.text(REPRESENTANTE_NOME),
            tabela: raw.text(TABELA),
            prazo_id: raw.int(PRAZO_ID),
            prazo_descricao: raw.text(PRAZO_DESCRICAO),
            forma_pagamento_id: raw.int(FORMA_PAGAMENTO_ID),
            rota_id: raw.int(ROTA_ID),
            segmento_id: raw.int(SEGMENTO_ID),
            cidade_id: raw.int(CIDADE_ID),
            observacao: raw.text(OBSERVACAO),
            pedido_origem: raw.text(PEDIDO_ORIGEM),
            transmitido: raw.flag(TRANSMITIDO),
            faturado: raw.flag(FATURADO),
            valor_total: raw.number(VALOR_TOTAL),
            itens: ordered_lines(&itens),
        }
    }
}

impl AggregateRoot for Order {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn code(&self) -> &str {
        &self.numero
    }

    fn description(&self) -> &str {
        &self.cliente_nome
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "pedidos"
    }

    fn element_name() -> &'static str {
        "Pedido"
    }

    fn list_name() -> &'static str {
        "Pedidos"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_optional_fields_default() {
        let order = Order::from_raw(&json!({}));
        assert_eq!(order, Order::default());
        assert_eq!(order.numero, "");
        assert_eq!(order.valor_total, 0.0);
        assert!(order.itens.is_empty());
        assert!(!order.is_locked());
        assert_eq!(order.totals(), Totals::default());
    }

    #[test]
    fn test_variants_normalize_identically() {
        let snake = json!({
            "pedido_id": 55,
            "numero_pedido": "000123",
            "data_pedido": "2024-05-02",
            "cliente_id": 10,
            "cliente_nome": "Mercado Sol",
            "tabela_preco": "T1",
            "prazo_pagamento_id": "3",
            "valor_total": "1.250,00",
            "transmitido": "S",
            "itens": [{ "produto_codigo": "P1", "quantidade": 2, "preco_unitario": 10, "desconto_percentual": 5 }]
        });
        let camel = json!({
            "pedidoId": "55",
            "numeroPedido": "000123",
            "dataPedido": "2024-05-02",
            "clienteId": "10",
            "clienteNome": "Mercado Sol",
            "tabelaPreco": "T1",
            "prazoPagamentoId": 3,
            "valorTotal": 1250.0,
            "isTransmitido": true,
            "items": [{ "produtoCodigo": "P1", "qtd": "2", "precoUnitario": "10", "descontoPercentual": "5" }]
        });
        let a = Order::from_raw(&snake);
        let b = Order::from_raw(&camel);
        assert_eq!(a, b);
        assert!(a.is_locked());
        assert_eq!(a.status_label(), "Transmitido");
    }

    #[test]
    fn test_display_total() {
        let row = Order::from_raw(&json!({ "id": 1, "valorTotal": 300 }));
        assert_eq!(row.display_total(), 300.0);

        let full = Order::from_raw(&json!({
            "id": 1,
            "valorTotal": 300,
            "itens": [{ "codigo": "P1", "quantidade": 1, "preco": 100 }]
        }));
        assert_eq!(full.display_total(), 100.0);
    }

    #[test]
    fn test_items_sorted_by_ordem() {
        let order = Order::from_raw(&json!({
            "id": 1,
            "itens": [
                { "codigo": "B", "quantidade": 1, "preco": 1, "ordem": 2 },
                { "codigo": "A", "quantidade": 1, "preco": 1, "ordem": 1 }
            ]
        }));
        assert_eq!(order.itens[0].produto_codigo, "A");
    }
}
