use crate::domain::common::AggregateRoot;
use crate::shared::normalize::{Aliases, FromRaw, RawFields};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const ID: Aliases = &["id", "empresa_id", "empresaId", "id_empresa", "codigo_empresa"];
const CODIGO: Aliases = &["codigo", "cod_empresa", "codEmpresa", "code"];
const RAZAO_SOCIAL: Aliases = &["razao_social", "razaoSocial", "nome", "name"];
const NOME_FANTASIA: Aliases = &["nome_fantasia", "nomeFantasia", "fantasia"];
const CNPJ: Aliases = &["cnpj", "cnpj_cpf", "cnpjCpf", "documento"];

/// Empresa: the tenant context that scopes every backend query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Empresa {
    pub id: i64,
    pub codigo: String,
    pub razao_social: String,
    pub nome_fantasia: String,
    pub cnpj: String,
}

impl Empresa {
    pub fn display_name(&self) -> &str {
        if self.nome_fantasia.is_empty() {
            &self.razao_social
        } else {
            &self.nome_fantasia
        }
    }
}

impl FromRaw for Empresa {
    fn from_raw(raw: &Value) -> Self {
        Self {
            id: raw.int(ID),
            codigo: raw.text(CODIGO),
            razao_social: raw.text(RAZAO_SOCIAL),
            nome_fantasia: raw.text(NOME_FANTASIA),
            cnpj: raw.text(CNPJ),
        }
    }
}

impl AggregateRoot for Empresa {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn code(&self) -> &str {
        &self.codigo
    }

    fn description(&self) -> &str {
        self.display_name()
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "empresas"
    }

    fn element_name() -> &'static str {
        "Empresa"
    }

    fn list_name() -> &'static str {
        "Empresas"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_name_prefers_trade_name() {
        let raw = json!({ "empresaId": "3", "razaoSocial": "Distribuidora Norte LTDA", "fantasia": "Norte" });
        let empresa = Empresa::from_raw(&raw);
        assert_eq!(empresa.id, 3);
        assert_eq!(empresa.display_name(), "Norte");

        let plain = Empresa::from_raw(&json!({ "id": 1, "nome": "Matriz" }));
        assert_eq!(plain.display_name(), "Matriz");
    }
}
