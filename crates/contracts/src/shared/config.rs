use serde::Deserialize;

/// Runtime configuration of the browser client.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub cnpj: CnpjConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Absolute backend URL; empty means "same host as the page, on `port`".
    pub base_url: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub page_size: usize,
    pub search_debounce_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CnpjConfig {
    /// `{cnpj}` is replaced by the 14 digits.
    pub lookup_url: String,
    pub debounce_ms: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            port: 3000,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: 50,
            search_debounce_ms: 350,
        }
    }
}

impl Default for CnpjConfig {
    fn default() -> Self {
        Self {
            lookup_url: "https://brasilapi.com.br/api/cnpj/v1/{cnpj}".to_string(),
            debounce_ms: 600,
        }
    }
}

impl ClientConfig {
    /// Parse a `televendas.toml` document; missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Backend base URL for a page served from `protocol//hostname`.
    pub fn api_base(&self, protocol: &str, hostname: &str) -> String {
        let configured = self.api.base_url.trim();
        if !configured.is_empty() {
            return configured.trim_end_matches('/').to_string();
        }
        format!("{}//{}:{}", protocol, hostname, self.api.port)
    }

    pub fn cnpj_lookup_url(&self, cnpj_digits: &str) -> String {
        self.cnpj.lookup_url.replace("{cnpj}", cnpj_digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_sample_matches_defaults() {
        let sample = include_str!("../../../frontend/televendas.toml");
        let config = ClientConfig::from_toml_str(sample).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(ClientConfig::from_toml_str("").unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = ClientConfig::from_toml_str("[api]\nbase_url = \"https://api.exemplo.com.br/\"\n").unwrap();
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.ui.page_size, 50);
        assert_eq!(config.api_base("http:", "localhost"), "https://api.exemplo.com.br");
    }

    #[test]
    fn test_api_base_from_location() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base("https:", "vendas.local"), "https://vendas.local:3000");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(ClientConfig::from_toml_str("[api\nport = ").is_err());
    }

    #[test]
    fn test_cnpj_url() {
        let config = ClientConfig::default();
        assert_eq!(
            config.cnpj_lookup_url("11222333000181"),
            "https://brasilapi.com.br/api/cnpj/v1/11222333000181"
        );
    }
}
