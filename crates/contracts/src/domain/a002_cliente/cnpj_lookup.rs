//! Enrichment of the client form from a public CNPJ registry.

use super::document::only_digits;
use super::form::ClientForm;
use crate::shared::normalize::{Aliases, FromRaw, RawFields};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const CNPJ: Aliases = &["cnpj"];
const RAZAO_SOCIAL: Aliases = &["razao_social", "razaoSocial", "nome"];
const NOME_FANTASIA: Aliases = &["nome_fantasia", "nomeFantasia", "fantasia"];
const LOGRADOURO: Aliases = &["logradouro", "estabelecimento.logradouro"];
const NUMERO: Aliases = &["numero", "estabelecimento.numero"];
const COMPLEMENTO: Aliases = &["complemento", "estabelecimento.complemento"];
const BAIRRO: Aliases = &["bairro", "estabelecimento.bairro"];
const MUNICIPIO: Aliases = &["municipio", "cidade", "estabelecimento.cidade.nome"];
const CODIGO_MUNICIPIO: Aliases = &["codigo_municipio_ibge", "codigo_municipio", "ibge"];
const UF: Aliases = &["uf", "estado", "estabelecimento.estado.sigla"];
const CEP: Aliases = &["cep", "estabelecimento.cep"];
const TELEFONE: Aliases = &["ddd_telefone_1", "telefone", "estabelecimento.telefone1"];
const EMAIL: Aliases = &["email", "estabelecimento.email"];

/// Company data returned by the CNPJ registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CnpjLookup {
    pub cnpj: String,
    pub razao_social: String,
    pub nome_fantasia: String,
    pub logradouro: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    pub municipio: String,
    pub codigo_municipio: i64,
    pub uf: String,
    pub cep: String,
    pub telefone: String,
    pub email: String,
}

impl FromRaw for CnpjLookup {
    fn from_raw(raw: &Value) -> Self {
        Self {
            cnpj: only_digits(&raw.text(CNPJ)),
            razao_social: raw.text(RAZAO_SOCIAL),
            nome_fantasia: raw.text(NOME_FANTASIA),
            logradouro: raw.text(LOGRADOURO),
            numero: raw.text(NUMERO),
            complemento: raw.text(COMPLEMENTO),
            bairro: raw.text(BAIRRO),
            municipio: raw.text(MUNICIPIO),
            codigo_municipio: raw.int(CODIGO_MUNICIPIO),
            uf: raw.text(UF).to_uppercase(),
            cep: only_digits(&raw.text(CEP)),
            telefone: raw.text(TELEFONE),
            email: raw.text(EMAIL).to_lowercase(),
        }
    }
}

fn fill(target: &mut String, value: &str) -> bool {
    if target.trim().is_empty() && !value.is_empty() {
        *target = value.to_string();
        true
    } else {
        false
    }
}

impl CnpjLookup {
    /// Copies registry data into the form fields the operator left empty.
    /// Returns how many fields were filled.
    pub fn apply_to(&self, form: &mut ClientForm) -> usize {
        let codigo_municipio = if self.codigo_municipio > 0 {
            self.codigo_municipio.to_string()
        } else {
            String::new()
        };
        [
            fill(&mut form.razao_social, &self.razao_social),
            fill(&mut form.nome_fantasia, &self.nome_fantasia),
            fill(&mut form.logradouro, &self.logradouro),
            fill(&mut form.numero, &self.numero),
            fill(&mut form.complemento, &self.complemento),
            fill(&mut form.bairro, &self.bairro),
            fill(&mut form.cidade, &self.municipio),
            fill(&mut form.cidade_id, &codigo_municipio),
            fill(&mut form.uf, &self.uf),
            fill(&mut form.cep, &self.cep),
            fill(&mut form.telefone, &self.telefone),
            fill(&mut form.email, &self.email),
        ]
        .iter()
        .filter(|filled| **filled)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_brasilapi_shape() {
        let raw = json!({
            "cnpj": "11222333000181",
            "razao_social": "ACME COMERCIO LTDA",
            "nome_fantasia": "ACME",
            "logradouro": "RUA DAS FLORES",
            "numero": "10",
            "municipio": "JOINVILLE",
            "codigo_municipio_ibge": 4209102,
            "uf": "SC",
            "cep": "89201000",
            "ddd_telefone_1": "4733330000"
        });
        let lookup = CnpjLookup::from_raw(&raw);
        assert_eq!(lookup.razao_social, "ACME COMERCIO LTDA");
        assert_eq!(lookup.codigo_municipio, 4209102);
    }

    #[test]
    fn test_receitaws_shape_matches() {
        let raw = json!({
            "cnpj": "11.222.333/0001-81",
            "nome": "ACME COMERCIO LTDA",
            "fantasia": "ACME",
            "municipio": "JOINVILLE",
            "uf": "SC",
            "cep": "89.201-000"
        });
        let lookup = CnpjLookup::from_raw(&raw);
        assert_eq!(lookup.cnpj, "11222333000181");
        assert_eq!(lookup.nome_fantasia, "ACME");
        assert_eq!(lookup.cep, "89201000");
    }

    #[test]
    fn test_apply_keeps_operator_input() {
        let lookup = CnpjLookup {
            razao_social: "ACME COMERCIO LTDA".to_string(),
            nome_fantasia: "ACME".to_string(),
            municipio: "JOINVILLE".to_string(),
            ..Default::default()
        };
        let mut form = ClientForm {
            nome_fantasia: "Loja do Zé".to_string(),
            ..Default::default()
        };
        let filled = lookup.apply_to(&mut form);
        assert_eq!(filled, 2);
        assert_eq!(form.razao_social, "ACME COMERCIO LTDA");
        assert_eq!(form.nome_fantasia, "Loja do Zé");
        assert_eq!(form.cidade, "JOINVILLE");
    }
}
