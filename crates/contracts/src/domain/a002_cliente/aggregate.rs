use crate::domain::common::AggregateRoot;
use crate::shared::normalize::{Aliases, FromRaw, RawFields};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Field aliases
// ============================================================================

const ID: Aliases = &["id", "cliente_id", "clienteId", "id_cliente", "codcli"];
const CODIGO: Aliases = &["codigo", "codigo_cliente", "codigoCliente", "cod_cliente", "code"];
const RAZAO_SOCIAL: Aliases = &[
    "razao_social",
    "razaoSocial",
    "cliente_nome",
    "clienteNome",
    "nome",
    "name",
];
const NOME_FANTASIA: Aliases = &["nome_fantasia", "nomeFantasia", "fantasia", "apelido"];
const DOCUMENTO: Aliases = &["cnpj_cpf", "cnpjCpf", "cnpj", "cpf", "documento", "cgc"];
const INSCRICAO_ESTADUAL: Aliases = &["inscricao_estadual", "inscricaoEstadual", "ie", "rg_ie"];
const EMAIL: Aliases = &["email", "e_mail", "emailNfe", "email_nfe"];
const TELEFONE: Aliases = &["telefone", "fone", "telefone1", "phone", "celular"];
const LOGRADOURO: Aliases = &["logradouro", "endereco", "endereco.logradouro", "rua"];
const NUMERO: Aliases = &["numero", "endereco_numero", "enderecoNumero", "endereco.numero"];
const COMPLEMENTO: Aliases = &["complemento", "endereco.complemento"];
const BAIRRO: Aliases = &["bairro", "endereco.bairro"];
const CIDADE: Aliases = &["cidade", "cidade_nome", "cidadeNome", "municipio", "endereco.cidade"];
const CIDADE_ID: Aliases = &["cidade_id", "cidadeId", "id_cidade", "codigo_municipio"];
const UF: Aliases = &["uf", "estado", "endereco.uf"];
const CEP: Aliases = &["cep", "endereco.cep"];
const ROTA_ID: Aliases = &["rota_id", "rotaId", "id_rota", "rota"];
const SEGMENTO_ID: Aliases = &["segmento_id", "segmentoId", "id_segmento", "ramo_atividade_id"];
const REPRESENTANTE_ID: Aliases = &[
    "representante_id",
    "representanteId",
    "id_representante",
    "vendedor_id",
    "vendedorId",
];
const LIMITE_CREDITO: Aliases = &["limite_credito", "limiteCredito", "limite"];
const BLOQUEADO: Aliases = &["bloqueado", "is_bloqueado", "isBloqueado", "blocked"];
const ATIVO: Aliases = &["ativo", "is_ativo", "isAtivo", "active"];

// ============================================================================
// Aggregate
// ============================================================================

/// Cliente da carteira de televendas
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub codigo: String,
    pub razao_social: String,
    pub nome_fantasia: String,
    /// CNPJ ou CPF, as returned by the backend (may carry punctuation)
    pub documento: String,
    pub inscricao_estadual: String,
    pub email: String,
    pub telefone: String,
    pub logradouro: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    pub cidade: String,
    pub cidade_id: i64,
    pub uf: String,
    pub cep: String,
    pub rota_id: i64,
    pub segmento_id: i64,
    pub representante_id: i64,
    pub limite_credito: f64,
    pub bloqueado: bool,
    pub ativo: bool,
}

impl Client {
    pub fn display_name(&self) -> &str {
        if self.nome_fantasia.is_empty() {
            &self.razao_social
        } else {
            &self.nome_fantasia
        }
    }

    /// "Cidade/UF", or whichever half is known
    pub fn city_label(&self) -> String {
        match (self.cidade.is_empty(), self.uf.is_empty()) {
            (false, false) => format!("{}/{}", self.cidade, self.uf),
            (false, true) => self.cidade.clone(),
            (true, false) => self.uf.clone(),
            (true, true) => String::new(),
        }
    }

    pub fn can_order(&self) -> bool {
        self.ativo && !self.bloqueado
    }
}

impl FromRaw for Client {
    fn from_raw(raw: &Value) -> Self {
        Self {
            id: raw.int(ID),
            codigo: raw.text(CODIGO),
            razao_social: raw.text(RAZAO_SOCIAL),
            nome_fantasia: raw.text(NOME_FANTASIA),
            documento: raw.text(DOCUMENTO),
            inscricao_estadual: raw.text(INSCRICAO_ESTADUAL),
            email: raw.text(EMAIL),
            telefone: raw.text(TELEFONE),
            logradouro: raw.text(LOGRADOURO),
            numero: raw.text(NUMERO),
            complemento: raw.text(COMPLEMENTO),
            bairro: raw.text(BAIRRO),
            cidade: raw.text(CIDADE),
            cidade_id: raw.int(CIDADE_ID),
            uf: raw.text(UF).to_uppercase(),
            cep: raw.text(CEP),
            rota_id: raw.int(ROTA_ID),
            segmento_id: raw.int(SEGMENTO_ID),
            representante_id: raw.int(REPRESENTANTE_ID),
            limite_credito: raw.number(LIMITE_CREDITO),
            bloqueado: raw.flag(BLOQUEADO),
            // a record without a status flag is an active client
            ativo: raw.flag_or(ATIVO, true),
        }
    }
}

impl AggregateRoot for Client {
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
        "a002"
    }

    fn collection_name() -> &'static str {
        "clientes"
    }

    fn element_name() -> &'static str {
        "Cliente"
    }

    fn list_name() -> &'static str {
        "Clientes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snake_and_camel_variants_match() {
        let snake = json!({
            "id": 10,
            "cliente_nome": "Mercadinho Boa Vista",
            "nome_fantasia": "Boa Vista",
            "cnpj_cpf": "11.222.333/0001-81",
            "cidade_id": "4205407",
            "rota_id": 2,
            "limite_credito": "1.500,00",
            "bloqueado": "N"
        });
        let camel = json!({
            "clienteId": "10",
            "clienteNome": "Mercadinho Boa Vista",
            "nomeFantasia": "Boa Vista",
            "cnpjCpf": "11.222.333/0001-81",
            "cidadeId": 4205407,
            "rotaId": "2",
            "limiteCredito": 1500.0,
            "isBloqueado": false
        });
        assert_eq!(Client::from_raw(&snake), Client::from_raw(&camel));
    }

    #[test]
    fn test_missing_fields_default() {
        let client = Client::from_raw(&Value::Null);
        assert_eq!(client.id, 0);
        assert_eq!(client.razao_social, "");
        assert_eq!(client.limite_credito, 0.0);
        assert!(client.ativo);
        assert!(!client.bloqueado);
        assert_eq!(client.city_label(), "");
    }

    #[test]
    fn test_nested_address() {
        let raw = json!({
            "id": 1,
            "nome": "Padaria Central",
            "endereco": { "logradouro": "Rua XV", "numero": "100", "cidade": "Joinville", "uf": "sc" }
        });
        let client = Client::from_raw(&raw);
        assert_eq!(client.logradouro, "Rua XV");
        assert_eq!(client.city_label(), "Joinville/SC");
    }

    #[test]
    fn test_blocked_client_cannot_order() {
        let client = Client::from_raw(&json!({ "id": 5, "bloqueado": "S" }));
        assert!(!client.can_order());
    }
}
