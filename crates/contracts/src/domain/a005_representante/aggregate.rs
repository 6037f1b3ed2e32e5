use crate::domain::common::AggregateRoot;
use crate::shared::normalize::{Aliases, FromRaw, RawFields};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const ID: Aliases = &["id", "representante_id", "representanteId", "vendedor_id", "vendedorId"];
const CODIGO: Aliases = &["codigo", "codigo_representante", "codigoRepresentante", "cod_vendedor"];
const NOME: Aliases = &["nome", "representante_nome", "representanteNome", "razao_social", "name"];
const EMAIL: Aliases = &["email"];
const TELEFONE: Aliases = &["telefone", "celular", "fone"];
const ATIVO: Aliases = &["ativo", "isAtivo", "is_ativo"];

/// Representante comercial (vendedor)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Representative {
    pub id: i64,
    pub codigo: String,
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub ativo: bool,
}

impl FromRaw for Representative {
    fn from_raw(raw: &Value) -> Self {
        Self {
            id: raw.int(ID),
            codigo: raw.text(CODIGO),
            nome: raw.text(NOME),
            email: raw.text(EMAIL),
            telefone: raw.text(TELEFONE),
            ativo: raw.flag_or(ATIVO, true),
        }
    }
}

impl Representative {
    /// "codigo - nome" for selects; either half alone when the other is blank.
    pub fn label(&self) -> String {
        match (self.codigo.trim(), self.nome.trim()) {
            ("", "") => self.id.to_string(),
            ("", nome) => nome.to_string(),
            (codigo, "") => codigo.to_string(),
            (codigo, nome) => format!("{} - {}", codigo, nome),
        }
    }
}

impl AggregateRoot for Representative {
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
        "a005"
    }

    fn collection_name() -> &'static str {
        "representantes"
    }

    fn element_name() -> &'static str {
        "Representante"
    }

    fn list_name() -> &'static str {
        "Representantes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_label() {
        let r = Representative::from_raw(&json!({ "vendedorId": 7, "cod_vendedor": "V07", "nome": "Ana" }));
        assert_eq!(r.label(), "V07 - Ana");
        assert!(r.ativo);
        let bare = Representative::from_raw(&json!({ "id": 3 }));
        assert_eq!(bare.label(), "3");
    }
}
