//! Client create/update form and its write payload.

use super::aggregate::Client;
use super::document::{is_valid_document, only_digits};
use crate::shared::normalize::{coerce_id, parse_decimal};
use serde::{Deserialize, Serialize};

/// Values as typed into the client form; ids are kept as text until submit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientForm {
    pub id: Option<i64>,
    pub codigo: String,
    pub razao_social: String,
    pub nome_fantasia: String,
    pub documento: String,
    pub inscricao_estadual: String,
    pub email: String,
    pub telefone: String,
    pub logradouro: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    pub cidade: String,
    pub cidade_id: String,
    pub uf: String,
    pub cep: String,
    pub rota_id: String,
    pub segmento_id: String,
    pub representante_id: String,
    pub limite_credito: String,
}

/// Body of `POST /api/clientes` and `PUT /api/clientes/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientWriteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub empresa_id: i64,
    pub codigo: String,
    pub razao_social: String,
    pub nome_fantasia: String,
    pub cnpj_cpf: String,
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
}

fn id_text(id: i64) -> String {
    if id > 0 {
        id.to_string()
    } else {
        String::new()
    }
}

impl ClientForm {
    pub fn from_client(client: &Client) -> Self {
        Self {
            id: (client.id > 0).then_some(client.id),
            codigo: client.codigo.clone(),
            razao_social: client.razao_social.clone(),
            nome_fantasia: client.nome_fantasia.clone(),
            documento: client.documento.clone(),
            inscricao_estadual: client.inscricao_estadual.clone(),
            email: client.email.clone(),
            telefone: client.telefone.clone(),
            logradouro: client.logradouro.clone(),
            numero: client.numero.clone(),
            complemento: client.complemento.clone(),
            bairro: client.bairro.clone(),
            cidade: client.cidade.clone(),
            cidade_id: id_text(client.cidade_id),
            uf: client.uf.clone(),
            cep: client.cep.clone(),
            rota_id: id_text(client.rota_id),
            segmento_id: id_text(client.segmento_id),
            representante_id: id_text(client.representante_id),
            limite_credito: if client.limite_credito != 0.0 {
                format!("{:.2}", client.limite_credito)
            } else {
                String::new()
            },
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.id.is_some()
    }

    /// First problem found, phrased for the operator.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.razao_social.trim().is_empty() {
            return Err("Razão social é obrigatória");
        }
        if self.documento.trim().is_empty() {
            return Err("CNPJ/CPF é obrigatório");
        }
        if !is_valid_document(&self.documento) {
            return Err("CNPJ/CPF inválido");
        }
        if !self.email.trim().is_empty() && !self.email.contains('@') {
            return Err("E-mail inválido");
        }
        if !self.uf.trim().is_empty() && self.uf.trim().len() != 2 {
            return Err("UF deve ter 2 letras");
        }
        Ok(())
    }

    pub fn to_write_request(&self, empresa_id: i64) -> ClientWriteRequest {
        ClientWriteRequest {
            id: self.id,
            empresa_id,
            codigo: self.codigo.trim().to_string(),
            razao_social: self.razao_social.trim().to_string(),
            nome_fantasia: self.nome_fantasia.trim().to_string(),
            cnpj_cpf: only_digits(&self.documento),
            inscricao_estadual: self.inscricao_estadual.trim().to_string(),
            email: self.email.trim().to_string(),
            telefone: self.telefone.trim().to_string(),
            logradouro: self.logradouro.trim().to_string(),
            numero: self.numero.trim().to_string(),
            complemento: self.complemento.trim().to_string(),
            bairro: self.bairro.trim().to_string(),
            cidade: self.cidade.trim().to_string(),
            cidade_id: coerce_id(&self.cidade_id),
            uf: self.uf.trim().to_uppercase(),
            cep: only_digits(&self.cep),
            rota_id: coerce_id(&self.rota_id),
            segmento_id: coerce_id(&self.segmento_id),
            representante_id: coerce_id(&self.representante_id),
            limite_credito: parse_decimal(&self.limite_credito).unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ClientForm {
        ClientForm {
            razao_social: "Mercado Sol LTDA".to_string(),
            documento: "11.222.333/0001-81".to_string(),
            cep: "89.201-000".to_string(),
            uf: "sc".to_string(),
            rota_id: "3".to_string(),
            limite_credito: "2.000,50".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validation() {
        assert!(filled().validate().is_ok());
        let mut form = filled();
        form.documento = "11.222.333/0001-00".to_string();
        assert_eq!(form.validate(), Err("CNPJ/CPF inválido"));
        form.razao_social.clear();
        assert_eq!(form.validate(), Err("Razão social é obrigatória"));
    }

    #[test]
    fn test_write_request_coerces_ids() {
        let request = filled().to_write_request(7);
        assert_eq!(request.empresa_id, 7);
        assert_eq!(request.cnpj_cpf, "11222333000181");
        assert_eq!(request.cep, "89201000");
        assert_eq!(request.uf, "SC");
        assert_eq!(request.rota_id, 3);
        assert_eq!(request.cidade_id, 0);
        assert_eq!(request.segmento_id, 0);
        assert_eq!(request.limite_credito, 2000.5);

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["razaoSocial"], "Mercado Sol LTDA");
        assert_eq!(json["rotaId"], 3);
    }

    #[test]
    fn test_round_trip_from_client() {
        let client = Client {
            id: 12,
            razao_social: "Padaria".to_string(),
            rota_id: 4,
            ..Default::default()
        };
        let form = ClientForm::from_client(&client);
        assert!(form.is_edit_mode());
        assert_eq!(form.rota_id, "4");
        assert_eq!(form.cidade_id, "");
        assert_eq!(form.to_write_request(1).id, Some(12));
    }
}
