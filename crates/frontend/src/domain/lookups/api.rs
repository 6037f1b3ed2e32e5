use crate::shared::api_client::{ApiClient, NoQuery};
use contracts::domain::lookups::{normalize_lookup, LookupItem, LookupKind};
use contracts::shared::api_error::ApiError;

pub async fn fetch_lookup(client: &ApiClient, kind: LookupKind) -> Result<Vec<LookupItem>, ApiError> {
    let fallback = format!("Não foi possível carregar: {}", kind.label());
    let payload = client.get(kind.api_path(), &NoQuery {}, &fallback).await?;
    Ok(normalize_lookup(kind, &payload))
}
