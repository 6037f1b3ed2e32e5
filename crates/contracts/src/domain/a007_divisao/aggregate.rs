use crate::domain::common::AggregateRoot;
use crate::shared::natural_sort::LookupEntry;
use crate::shared::normalize::{Aliases, FromRaw, RawFields};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const ID: Aliases = &["id", "divisao_id", "divisaoId", "id_divisao"];
const CODIGO: Aliases = &["codigo", "codigo_divisao", "codigoDivisao"];
const DESCRICAO: Aliases = &["descricao", "divisao_descricao", "divisaoDescricao", "nome"];
const FORNECEDOR_ID: Aliases = &["fornecedor_id", "fornecedorId"];

/// Divisão de produtos (linha comercial)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Division {
    pub id: i64,
    pub codigo: String,
    pub descricao: String,
    pub fornecedor_id: i64,
}

impl FromRaw for Division {
    fn from_raw(raw: &Value) -> Self {
        Self {
            id: raw.int(ID),
            codigo: raw.text(CODIGO),
            descricao: raw.text(DESCRICAO),
            fornecedor_id: raw.int(FORNECEDOR_ID),
        }
    }
}

impl LookupEntry for Division {
    fn sort_label(&self) -> &str {
        &self.descricao
    }

    fn sort_code(&self) -> &str {
        &self.codigo
    }

    fn sort_id(&self) -> String {
        self.id.to_string()
    }
}

impl AggregateRoot for Division {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn code(&self) -> &str {
        &self.codigo
    }

    fn description(&self) -> &str {
        &self.descricao
    }

    fn aggregate_index() -> &'static str {
        "a007"
    }

    fn collection_name() -> &'static str {
        "divisoes"
    }

    fn element_name() -> &'static str {
        "Divisão"
    }

    fn list_name() -> &'static str {
        "Divisões"
    }
}
