use crate::config::AppConfig;
use crate::error::AppError;
use crate::services::envelope::{decodificar, normalizar_envelope};
use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("imovel-console/", env!("CARGO_PKG_VERSION"));

/// Cliente HTTP do backend administrativo
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Cria o cliente com timeout padrão de 30 segundos
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Falha ao criar o cliente HTTP")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::with_timeout(config.api_url.clone(), config.http_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, caminho: &str) -> String {
        format!("{}/{}", self.base_url, caminho.trim_start_matches('/'))
    }

    pub(crate) fn request(&self, method: Method, caminho: &str) -> RequestBuilder {
        self.client.request(method, self.url(caminho))
    }

    /// Envia a requisição e normaliza o envelope da resposta.
    pub(crate) async fn enviar(&self, request: RequestBuilder) -> Result<Value, AppError> {
        let response = request.send().await.map_err(|e| {
            warn!("Falha de comunicação com o backend: {}", e);
            AppError::from(e)
        })?;

        let status = response.status();
        debug!("{} {}", status, response.url());

        let texto = response.text().await?;
        let corpo = if texto.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&texto).unwrap_or(Value::String(texto))
        };

        normalizar_envelope(status.as_u16(), corpo)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        caminho: &str,
        query: &[(String, String)],
    ) -> Result<T, AppError> {
        let valor = self
            .enviar(self.request(Method::GET, caminho).query(query))
            .await?;
        decodificar(valor)
    }

    pub(crate) async fn com_corpo<B, T>(
        &self,
        method: Method,
        caminho: &str,
        corpo: &B,
    ) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let valor = self
            .enviar(self.request(method, caminho).json(corpo))
            .await?;
        decodificar(valor)
    }

    pub(crate) async fn delete(&self, caminho: &str) -> Result<(), AppError> {
        self.enviar(self.request(Method::DELETE, caminho)).await?;
        Ok(())
    }
}
