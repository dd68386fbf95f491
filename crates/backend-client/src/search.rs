//! Operator search against the backend's `/search` endpoint.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::error::{ApiError, Result};

/// Path of the search endpoint, relative to the base address.
pub const SEARCH_PATH: &str = "/search";

/// One health-plan operator record as returned by the backend.
///
/// Column names follow the registry's CSV header. Cells may arrive as
/// strings, numbers or `null`; numbers are kept as their string form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    #[serde(rename = "Registro_ANS", default, deserialize_with = "string_or_number")]
    pub registro_ans: Option<String>,
    #[serde(rename = "CNPJ", default, deserialize_with = "string_or_number")]
    pub cnpj: Option<String>,
    #[serde(rename = "Razao_Social", default, deserialize_with = "string_or_number")]
    pub razao_social: Option<String>,
    #[serde(rename = "Nome_Fantasia", default, deserialize_with = "string_or_number")]
    pub nome_fantasia: Option<String>,
    #[serde(rename = "Modalidade", default, deserialize_with = "string_or_number")]
    pub modalidade: Option<String>,
    #[serde(rename = "Logradouro", default, deserialize_with = "string_or_number")]
    pub logradouro: Option<String>,
    #[serde(rename = "Numero", default, deserialize_with = "string_or_number")]
    pub numero: Option<String>,
    #[serde(rename = "Complemento", default, deserialize_with = "string_or_number")]
    pub complemento: Option<String>,
    #[serde(rename = "Bairro", default, deserialize_with = "string_or_number")]
    pub bairro: Option<String>,
    #[serde(rename = "Cidade", default, deserialize_with = "string_or_number")]
    pub cidade: Option<String>,
    #[serde(rename = "UF", default, deserialize_with = "string_or_number")]
    pub uf: Option<String>,
    #[serde(rename = "CEP", default, deserialize_with = "string_or_number")]
    pub cep: Option<String>,
    #[serde(rename = "DDD", default, deserialize_with = "string_or_number")]
    pub ddd: Option<String>,
    #[serde(rename = "Telefone", default, deserialize_with = "string_or_number")]
    pub telefone: Option<String>,
    #[serde(
        rename = "Endereco_eletronico",
        default,
        deserialize_with = "string_or_number"
    )]
    pub endereco_eletronico: Option<String>,
    #[serde(rename = "Representante", default, deserialize_with = "string_or_number")]
    pub representante: Option<String>,

    /// Any other column the backend includes
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Operator {
    /// Name to show for this operator: trade name, then legal name, then CNPJ.
    #[must_use]
    pub fn display_name(&self) -> &str {
        [&self.nome_fantasia, &self.razao_social, &self.cnpj]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or("(unnamed)")
    }

    /// `Cidade/UF`, or whichever half is known.
    #[must_use]
    pub fn location(&self) -> String {
        match (self.cidade.as_deref(), self.uf.as_deref()) {
            (Some(city), Some(uf)) => format!("{city}/{uf}"),
            (Some(city), None) => city.to_string(),
            (None, Some(uf)) => uf.to_string(),
            (None, None) => String::new(),
        }
    }
}

/// Body of a `/search` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub results: Vec<Operator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    /// Render the results as one line per operator, followed by the backend message.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for operator in &self.results {
            let _ = writeln!(
                out,
                "{:<18}  {}  {}",
                operator.cnpj.as_deref().unwrap_or("-"),
                operator.display_name(),
                operator.location()
            );
        }
        if let Some(message) = &self.message {
            let _ = writeln!(out, "{message}");
        }
        out
    }
}

/// Anything that can run an operator search.
///
/// Call sites depend on this rather than on [`ApiClient`] so a stub can be
/// injected in tests.
#[async_trait]
pub trait OperatorSearch: Send + Sync {
    /// Search operators by legal or trade name.
    async fn search(&self, query: &str) -> Result<SearchResponse>;
}

impl ApiClient {
    /// Search operators by legal or trade name.
    ///
    /// The query is sent as-is; the backend rejects blank queries.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] when the backend answers with a non-success status
    /// - [`ApiError::Rejected`] when it answers 2xx with `success: false`
    /// - [`ApiError::Http`] on transport or decoding failures
    pub async fn search(&self, query: &str) -> Result<SearchResponse> {
        debug!(query, "Searching operators");

        let response = self
            .get(SEARCH_PATH)?
            .query(&[("query", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            let message = serde_json::from_str::<SearchResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or(body);

            warn!(status = %status, message = %message, "Operator search failed");

            return Err(ApiError::Api { status, message });
        }

        let payload: SearchResponse = response.json().await?;
        if !payload.success {
            let reason = payload
                .error
                .or(payload.message)
                .unwrap_or_else(|| "search reported failure".to_string());
            warn!(reason = %reason, "Operator search rejected");
            return Err(ApiError::Rejected(reason));
        }

        debug!(count = payload.results.len(), "Operator search completed");
        Ok(payload)
    }
}

#[async_trait]
impl OperatorSearch for ApiClient {
    async fn search(&self, query: &str) -> Result<SearchResponse> {
        ApiClient::search(self, query).await
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
