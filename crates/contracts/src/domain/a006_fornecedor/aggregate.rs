use crate::domain::common::AggregateRoot;
use crate::shared::natural_sort::LookupEntry;
use crate::shared::normalize::{Aliases, FromRaw, RawFields};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const ID: Aliases = &["id", "fornecedor_id", "fornecedorId", "id_fornecedor"];
const CODIGO: Aliases = &["codigo", "codigo_fornecedor", "codigoFornecedor", "cod_fornec"];
const NOME: Aliases = &["nome_fantasia", "nomeFantasia", "fantasia", "razao_social", "razaoSocial", "nome"];
const CNPJ: Aliases = &["cnpj", "cnpj_cpf", "cnpjCpf"];

/// Fornecedor / fabricante
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub codigo: String,
    pub nome: String,
    pub cnpj: String,
}

impl FromRaw for Supplier {
    fn from_raw(raw: &Value) -> Self {
        Self {
            id: raw.int(ID),
            codigo: raw.text(CODIGO),
            nome: raw.text(NOME),
            cnpj: raw.text(CNPJ),
        }
    }
}

impl LookupEntry for Supplier {
    fn sort_label(&self) -> &str {
        &self.nome
    }

    fn sort_code(&self) -> &str {
        &self.codigo
    }

    fn sort_id(&self) -> String {
        self.id.to_string()
    }
}

impl AggregateRoot for Supplier {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn code(&self) -> &str {
        &self.codigo
    }

    fn description(&self) -> &str {
        &self.nome
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "fornecedores"
    }

    fn element_name() -> &'static str {
        "Fornecedor"
    }

    fn list_name() -> &'static str {
        "Fornecedores"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::natural_sort::sort_lookup;
    use serde_json::json;

    #[test]
    fn test_sort_is_deterministic() {
        let payload = json!({ "data": [
            { "id": 10, "nomeFantasia": "Nestlé", "codigo": "F10" },
            { "id": 2, "razao_social": "nestle", "codigo": "F2" },
            { "id": 1, "nome": "Ambev" }
        ]});
        let mut first: Vec<Supplier> = crate::shared::normalize::normalize_list(&payload);
        let mut second = first.clone();
        second.reverse();
        sort_lookup(&mut first);
        sort_lookup(&mut second);
        assert_eq!(first, second);
        assert_eq!(first[0].nome, "Ambev");
    }
}
