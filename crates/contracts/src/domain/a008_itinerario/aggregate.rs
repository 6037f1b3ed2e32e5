//! Itinerário: a representative's visit route through clients.

use crate::domain::common::AggregateRoot;
use crate::shared::normalize::{coerce_id, Aliases, FromRaw, RawFields};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const ID: Aliases = &["id", "itinerario_id", "itinerarioId"];
const DESCRICAO: Aliases = &["descricao", "nome", "titulo"];
const REPRESENTANTE_ID: Aliases = &["representante_id", "representanteId", "vendedor_id", "vendedorId"];
const REPRESENTANTE_NOME: Aliases = &["representante_nome", "representanteNome", "representante.nome"];
const DIA_SEMANA: Aliases = &["dia_semana", "diaSemana", "dia"];
const DATA: Aliases = &["data", "data_visita", "dataVisita"];
const VISITAS: Aliases = &["visitas", "clientes", "itens", "paradas"];

const CLIENTE_ID: Aliases = &["cliente_id", "clienteId", "id_cliente", "id"];
const CLIENTE_NOME: Aliases = &["cliente_nome", "clienteNome", "razao_social", "razaoSocial", "nome"];
const CIDADE: Aliases = &["cidade", "cidade_nome", "cidadeNome", "municipio"];
const SEQUENCIA: Aliases = &["sequencia", "ordem", "seq"];
const VISITADO: Aliases = &["visitado", "realizada", "isVisitado"];

pub const WEEKDAYS: [&str; 7] = [
    "Domingo",
    "Segunda-feira",
    "Terça-feira",
    "Quarta-feira",
    "Quinta-feira",
    "Sexta-feira",
    "Sábado",
];

/// Visita a um cliente dentro do itinerário
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub cliente_id: i64,
    pub cliente_nome: String,
    pub cidade: String,
    pub sequencia: i32,
    pub visitado: bool,
}

impl FromRaw for Visit {
    fn from_raw(raw: &Value) -> Self {
        Self {
            cliente_id: raw.int(CLIENTE_ID),
            cliente_nome: raw.text(CLIENTE_NOME),
            cidade: raw.text(CIDADE),
            sequencia: raw.int(SEQUENCIA) as i32,
            visitado: raw.flag(VISITADO),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub id: i64,
    pub descricao: String,
    pub representante_id: i64,
    pub representante_nome: String,
    /// 0 = domingo .. 6 = sábado
    pub dia_semana: u8,
    pub data: String,
    pub visitas: Vec<Visit>,
}

/// Visits by `sequencia`; equal sequences keep insertion order.
pub fn ordered_visits(visits: &[Visit]) -> Vec<Visit> {
    let mut sorted = visits.to_vec();
    sorted.sort_by_key(|v| v.sequencia);
    sorted
}

fn parse_weekday(raw: &Value) -> u8 {
    if let Some(n) = raw.opt_int(DIA_SEMANA) {
        return n.clamp(0, 6) as u8;
    }
    let text = raw.text(DIA_SEMANA).to_lowercase();
    WEEKDAYS
        .iter()
        .position(|d| {
            let day = d.to_lowercase();
            !text.is_empty() && (day.starts_with(&text) || text.starts_with(&day[..3]))
        })
        .map(|p| p as u8)
        .unwrap_or(0)
}

impl Itinerary {
    pub fn weekday_label(&self) -> &'static str {
        WEEKDAYS[usize::from(self.dia_semana.min(6))]
    }

    pub fn pending_visits(&self) -> usize {
        self.visitas.iter().filter(|v| !v.visitado).count()
    }
}

impl FromRaw for Itinerary {
    fn from_raw(raw: &Value) -> Self {
        let visitas: Vec<Visit> = raw.records(VISITAS).iter().map(Visit::from_raw).collect();
        Self {
            id: raw.int(ID),
            descricao: raw.text(DESCRICAO),
            representante_id: raw.int(REPRESENTANTE_ID),
            representante_nome: raw.text(REPRESENTANTE_NOME),
            dia_semana: parse_weekday(raw),
            data: raw.text(DATA),
            visitas: ordered_visits(&visitas),
        }
    }
}

impl AggregateRoot for Itinerary {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn code(&self) -> &str {
        &self.descricao
    }

    fn description(&self) -> &str {
        &self.descricao
    }

    fn aggregate_index() -> &'static str {
        "a008"
    }

    fn collection_name() -> &'static str {
        "itinerarios"
    }

    fn element_name() -> &'static str {
        "Itinerário"
    }

    fn list_name() -> &'static str {
        "Itinerários"
    }
}

// ============================================================================
// Write side
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItineraryForm {
    pub descricao: String,
    pub representante_id: String,
    pub dia_semana: u8,
    pub data: String,
    /// Client ids in visiting order
    pub clientes: Vec<(i64, String)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRequest {
    pub cliente_id: i64,
    pub sequencia: i32,
}

/// Body of `POST /api/itinerarios`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryCreateRequest {
    pub empresa_id: i64,
    pub representante_id: i64,
    pub descricao: String,
    pub dia_semana: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    pub visitas: Vec<VisitRequest>,
}

impl ItineraryForm {
    pub fn validate(&self) -> Result<(), &'static str> {
        if coerce_id(&self.representante_id) <= 0 {
            return Err("Selecione o representante");
        }
        if self.descricao.trim().is_empty() {
            return Err("Informe a descrição do itinerário");
        }
        if self.clientes.is_empty() {
            return Err("Inclua ao menos um cliente no itinerário");
        }
        Ok(())
    }

    /// Adds a client at the end; a client already on the route is ignored.
    pub fn push_client(&mut self, id: i64, nome: String) -> bool {
        if id <= 0 || self.clientes.iter().any(|(c, _)| *c == id) {
            return false;
        }
        self.clientes.push((id, nome));
        true
    }

    pub fn remove_client(&mut self, index: usize) {
        if index < self.clientes.len() {
            self.clientes.remove(index);
        }
    }

    /// Moves a client one position up (towards the start of the route).
    pub fn move_up(&mut self, index: usize) {
        if index > 0 && index < self.clientes.len() {
            self.clientes.swap(index - 1, index);
        }
    }

    /// Visits are resequenced 1..n in form order.
    pub fn to_create_request(&self, empresa_id: i64) -> ItineraryCreateRequest {
        ItineraryCreateRequest {
            empresa_id,
            representante_id: coerce_id(&self.representante_id),
            descricao: self.descricao.trim().to_string(),
            dia_semana: self.dia_semana.min(6),
            data: Some(self.data.trim().to_string()).filter(|d| !d.is_empty()),
            visitas: self
                .clientes
                .iter()
                .enumerate()
                .map(|(i, (cliente_id, _))| VisitRequest {
                    cliente_id: *cliente_id,
                    sequencia: i as i32 + 1,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_and_order_visits() {
        let raw = json!({
            "itinerarioId": 3,
            "nome": "Rota Norte",
            "vendedorId": "8",
            "diaSemana": "terça",
            "clientes": [
                { "clienteId": 20, "ordem": 2 },
                { "clienteId": 10, "ordem": 1 },
                { "clienteId": 30, "ordem": 2, "visitado": "S" }
            ]
        });
        let it = Itinerary::from_raw(&raw);
        assert_eq!(it.representante_id, 8);
        assert_eq!(it.weekday_label(), "Terça-feira");
        let ids: Vec<i64> = it.visitas.iter().map(|v| v.cliente_id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
        assert_eq!(it.pending_visits(), 2);
    }

    #[test]
    fn test_numeric_weekday() {
        let it = Itinerary::from_raw(&json!({ "dia_semana": 5 }));
        assert_eq!(it.weekday_label(), "Sexta-feira");
        let clamped = Itinerary::from_raw(&json!({ "dia_semana": 12 }));
        assert_eq!(clamped.dia_semana, 6);
    }

    #[test]
    fn test_form_resequences() {
        let mut form = ItineraryForm {
            descricao: "Centro".to_string(),
            representante_id: "4".to_string(),
            ..Default::default()
        };
        assert!(form.push_client(7, "A".to_string()));
        assert!(form.push_client(9, "B".to_string()));
        assert!(!form.push_client(7, "A".to_string()));
        form.push_client(11, "C".to_string());
        form.move_up(2);
        form.remove_client(0);
        assert!(form.validate().is_ok());
        let request = form.to_create_request(1);
        assert_eq!(request.representante_id, 4);
        assert_eq!(request.data, None);
        assert_eq!(
            request.visitas,
            vec![
                VisitRequest { cliente_id: 11, sequencia: 1 },
                VisitRequest { cliente_id: 9, sequencia: 2 },
            ]
        );
    }
}
