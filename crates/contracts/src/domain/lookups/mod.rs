//! Metadata lookups: operations, price tables, payment forms and terms,
//! routes and segments.

use crate::shared::natural_sort::{sort_lookup, LookupEntry};
use crate::shared::normalize::{list_envelope, Aliases, RawFields};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookupKind {
    Operacao,
    TabelaPreco,
    FormaPagamento,
    PrazoPagamento,
    Rota,
    Segmento,
}

struct KindAliases {
    id: Aliases,
    codigo: Aliases,
    descricao: Aliases,
}

impl LookupKind {
    pub const ALL: [LookupKind; 6] = [
        LookupKind::Operacao,
        LookupKind::TabelaPreco,
        LookupKind::FormaPagamento,
        LookupKind::PrazoPagamento,
        LookupKind::Rota,
        LookupKind::Segmento,
    ];

    pub fn api_path(&self) -> &'static str {
        match self {
            LookupKind::Operacao => "/api/metadata/operacoes",
            LookupKind::TabelaPreco => "/api/metadata/tabelas-preco",
            LookupKind::FormaPagamento => "/api/metadata/formas-pagamento",
            LookupKind::PrazoPagamento => "/api/metadata/prazos-pagamento",
            LookupKind::Rota => "/api/metadata/rotas",
            LookupKind::Segmento => "/api/metadata/segmentos",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LookupKind::Operacao => "Operação",
            LookupKind::TabelaPreco => "Tabela de preço",
            LookupKind::FormaPagamento => "Forma de pagamento",
            LookupKind::PrazoPagamento => "Prazo",
            LookupKind::Rota => "Rota",
            LookupKind::Segmento => "Segmento",
        }
    }

    fn aliases(&self) -> KindAliases {
        match self {
            LookupKind::Operacao => KindAliases {
                id: &["id", "operacao_id", "operacaoId", "codigo"],
                codigo: &["codigo", "operacao_codigo", "operacaoCodigo", "tipo"],
                descricao: &["descricao", "operacao_descricao", "operacaoDescricao", "nome"],
            },
            LookupKind::TabelaPreco => KindAliases {
                id: &["id", "tabela_id", "tabelaId", "codigo"],
                codigo: &["codigo", "tabela", "tabela_codigo", "tabelaCodigo"],
                descricao: &["descricao", "tabela_descricao", "tabelaDescricao", "nome"],
            },
            LookupKind::FormaPagamento => KindAliases {
                id: &["id", "forma_pagamento_id", "formaPagamentoId", "codigo"],
                codigo: &["codigo", "forma_codigo", "formaCodigo", "sigla"],
                descricao: &["descricao", "forma_descricao", "formaDescricao", "nome"],
            },
            LookupKind::PrazoPagamento => KindAliases {
                id: &["id", "prazo_id", "prazoId", "condicao_pagamento_id", "codigo"],
                codigo: &["codigo", "prazo_codigo", "prazoCodigo"],
                descricao: &["descricao", "prazo_descricao", "prazoDescricao", "prazo", "nome"],
            },
            LookupKind::Rota => KindAliases {
                id: &["id", "rota_id", "rotaId", "codigo"],
                codigo: &["codigo", "rota_codigo", "rotaCodigo"],
                descricao: &["descricao", "rota_descricao", "rotaDescricao", "nome"],
            },
            LookupKind::Segmento => KindAliases {
                id: &["id", "segmento_id", "segmentoId", "codigo"],
                codigo: &["codigo", "segmento_codigo", "segmentoCodigo"],
                descricao: &["descricao", "segmento_descricao", "segmentoDescricao", "nome"],
            },
        }
    }
}

/// One option of a lookup dropdown. Ids stay textual: some tables are keyed by code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupItem {
    pub id: String,
    pub codigo: String,
    pub descricao: String,
}

impl LookupItem {
    pub fn from_raw(kind: LookupKind, raw: &Value) -> Self {
        let aliases = kind.aliases();
        Self {
            id: raw.text(aliases.id),
            codigo: raw.text(aliases.codigo),
            descricao: raw.text(aliases.descricao),
        }
    }

    pub fn label(&self) -> String {
        match (self.codigo.is_empty(), self.descricao.is_empty()) {
            (false, false) if self.codigo != self.descricao => {
                format!("{} - {}", self.codigo, self.descricao)
            }
            (true, false) => self.descricao.clone(),
            (false, _) => self.codigo.clone(),
            (true, true) => self.id.clone(),
        }
    }
}

impl LookupEntry for LookupItem {
    fn sort_label(&self) -> &str {
        &self.descricao
    }

    fn sort_code(&self) -> &str {
        &self.codigo
    }

    fn sort_id(&self) -> String {
        self.id.clone()
    }
}

/// Normalises a lookup response and sorts it deterministically.
///
/// Records without any identifier are dropped; they cannot be selected.
pub fn normalize_lookup(kind: LookupKind, payload: &Value) -> Vec<LookupItem> {
    let mut items: Vec<LookupItem> = list_envelope(payload)
        .iter()
        .map(|raw| LookupItem::from_raw(kind, raw))
        .filter(|item| !item.id.is_empty())
        .collect();
    sort_lookup(&mut items);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_aware_id_order() {
        let payload = json!([{ "id": "2" }, { "id": "10" }, { "id": "1" }]);
        let ids: Vec<String> = normalize_lookup(LookupKind::Rota, &payload)
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["1", "2", "10"]);
    }

    #[test]
    fn test_repeated_calls_are_stable() {
        let payload = json!({ "data": [
            { "prazoId": 3, "descricao": "30 dias" },
            { "prazoId": 1, "descricao": "7 dias" },
            { "prazoId": 2, "descricao": "30 DIAS", "codigo": "A" },
            { "prazoId": 4, "descricao": "30 dias", "codigo": "A" }
        ]});
        let first = normalize_lookup(LookupKind::PrazoPagamento, &payload);
        let second = normalize_lookup(LookupKind::PrazoPagamento, &payload);
        assert_eq!(first, second);
        let ids: Vec<&str> = first.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids[0], "1");
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_unknown_envelope_is_empty() {
        assert!(normalize_lookup(LookupKind::Operacao, &json!({ "rows": [] })).is_empty());
        assert!(normalize_lookup(LookupKind::Operacao, &Value::Null).is_empty());
    }

    #[test]
    fn test_records_without_id_dropped() {
        let payload = json!([{ "descricao": "sem id" }, { "codigo": "V1", "descricao": "Venda" }]);
        let items = normalize_lookup(LookupKind::Operacao, &payload);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "V1");
        assert_eq!(items[0].label(), "V1 - Venda");
    }
}
