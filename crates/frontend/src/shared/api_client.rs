//! Единая точка обращения к REST backend.
//!
//! Every request carries the bearer token and the selected company; both are
//! checked before anything goes on the wire. A 401 hands control to the
//! session, which logs out once and navigates to the login screen.

use crate::shared::api_utils::{api_base, ConfigContext};
use crate::system::auth::context::{use_session, SessionContext};
use contracts::shared::api_error::ApiError;
use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::prelude::use_context;
use serde::Serialize;
use serde_json::Value;

#[derive(Clone)]
pub struct ApiClient {
    config: ConfigContext,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(config: ConfigContext, session: SessionContext) -> Self {
        Self { config, session }
    }

    /// Client bound to the configuration and session found in context.
    ///
    /// Call while building a component, not inside event handlers.
    pub fn from_context() -> Self {
        let config = use_context::<ConfigContext>().unwrap_or_default();
        Self::new(config, use_session())
    }

    /// Base URL under the configuration in effect now.
    pub fn base(&self) -> String {
        api_base(&self.config.get_untracked())
    }

    pub fn config(&self) -> contracts::shared::config::ClientConfig {
        self.config.get_untracked()
    }

    fn token(&self) -> Result<String, ApiError> {
        self.session.token_untracked().ok_or(ApiError::MissingToken)
    }

    pub fn empresa_id(&self) -> Result<i64, ApiError> {
        self.session
            .empresa_id_untracked()
            .ok_or(ApiError::MissingEmpresa)
    }

    /// Token and company, in that order: a missing token wins.
    fn context(&self) -> Result<(String, i64), ApiError> {
        let token = self.token()?;
        let empresa_id = self.empresa_id()?;
        Ok((token, empresa_id))
    }

    fn scoped_url(&self, path: &str, empresa_id: i64, extra: &str) -> String {
        let mut url = format!("{}{}?empresaId={}", self.base(), path, empresa_id);
        if !extra.is_empty() {
            url.push('&');
            url.push_str(extra);
        }
        url
    }

    /// GET scoped to the selected company through the `empresaId` parameter.
    pub async fn get<Q: Serialize>(&self, path: &str, query: &Q, fallback: &str) -> Result<Value, ApiError> {
        let (token, empresa_id) = self.context()?;
        let extra = serde_qs::to_string(query).map_err(|e| ApiError::Decode(e.to_string()))?;
        let url = self.scoped_url(path, empresa_id, &extra);
        let response = authorized(Request::get(&url), &token)
            .send()
            .await
            .map_err(|e| transport(path, e))?;
        self.read(path, response, fallback).await
    }

    /// GET that only needs a token (company listing before a company is chosen).
    pub async fn get_unscoped(&self, path: &str, fallback: &str) -> Result<Value, ApiError> {
        let token = self.token()?;
        let url = format!("{}{}", self.base(), path);
        let response = authorized(Request::get(&url), &token)
            .send()
            .await
            .map_err(|e| transport(path, e))?;
        self.read(path, response, fallback).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B, fallback: &str) -> Result<Value, ApiError> {
        let (token, empresa_id) = self.context()?;
        let url = self.scoped_url(path, empresa_id, "");
        self.send_json(path, Request::post(&url), &token, body, fallback).await
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B, fallback: &str) -> Result<Value, ApiError> {
        let (token, empresa_id) = self.context()?;
        let url = self.scoped_url(path, empresa_id, "");
        self.send_json(path, Request::put(&url), &token, body, fallback).await
    }

    pub async fn delete(&self, path: &str, fallback: &str) -> Result<(), ApiError> {
        let (token, empresa_id) = self.context()?;
        let url = self.scoped_url(path, empresa_id, "");
        let response = authorized(Request::delete(&url), &token)
            .send()
            .await
            .map_err(|e| transport(path, e))?;
        self.read(path, response, fallback).await.map(|_| ())
    }

    async fn send_json<B: Serialize>(
        &self,
        path: &str,
        builder: RequestBuilder,
        token: &str,
        body: &B,
        fallback: &str,
    ) -> Result<Value, ApiError> {
        let request = authorized(builder, token)
            .json(body)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = request.send().await.map_err(|e| transport(path, e))?;
        self.read(path, response, fallback).await
    }

    async fn read(&self, path: &str, response: Response, fallback: &str) -> Result<Value, ApiError> {
        let status = response.status();
        if status == 401 {
            log::info!("401 from {}", path);
            self.session.handle_unauthorized();
            return Err(ApiError::Unauthorized);
        }

        let body = response.text().await.map_err(|e| transport(path, e))?;
        if !response.ok() {
            let error = ApiError::rejected(status, &body, fallback);
            log::warn!("{} rejected with {}: {}", path, status, error);
            return Err(error);
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| {
            log::warn!("{} returned an unreadable body: {}", path, e);
            ApiError::Decode(e.to_string())
        })
    }
}

fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder
        .header("Authorization", &format!("Bearer {}", token))
        .header("Accept", "application/json")
}

fn transport(path: &str, error: gloo_net::Error) -> ApiError {
    log::warn!("request to {} failed: {}", path, error);
    ApiError::Transport(error.to_string())
}

/// Query for endpoints that take nothing besides `empresaId`.
#[derive(Debug, Default, Serialize)]
pub struct NoQuery {}
