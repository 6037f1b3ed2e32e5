//! Itinerary service: per-representative list, create and delete.

use crate::shared::api_client::ApiClient;
use contracts::domain::a008_itinerario::aggregate::{Itinerary, ItineraryForm};
use contracts::domain::common::AggregateRoot;
use contracts::shared::api_error::ApiError;
use contracts::shared::normalize::{normalize_list, normalize_one};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryQuery {
    pub representante_id: i64,
}

pub async fn list_itineraries(client: &ApiClient, representante_id: i64) -> Result<Vec<Itinerary>, ApiError> {
    let query = ItineraryQuery { representante_id };
    let payload = client
        .get(&Itinerary::api_path(), &query, "Não foi possível carregar os itinerários")
        .await?;
    let mut items: Vec<Itinerary> = normalize_list(&payload);
    // Older backends return every representative's itineraries.
    items.retain(|i| i.representante_id == 0 || i.representante_id == representante_id);
    items.sort_by(|a, b| a.dia_semana.cmp(&b.dia_semana).then_with(|| a.id.cmp(&b.id)));
    Ok(items)
}

pub async fn create_itinerary(client: &ApiClient, form: &ItineraryForm) -> Result<Itinerary, ApiError> {
    let body = form.to_create_request(client.empresa_id()?);
    let payload = client
        .post(&Itinerary::api_path(), &body, "Não foi possível criar o itinerário")
        .await?;
    Ok(normalize_one(&payload))
}

pub async fn delete_itinerary(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    let path = format!("{}/{}", Itinerary::api_path(), id);
    client.delete(&path, "Não foi possível excluir o itinerário").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string() {
        let q = ItineraryQuery { representante_id: 12 };
        assert_eq!(serde_qs::to_string(&q).unwrap(), "representanteId=12");
    }
}
