use crate::error::AppError;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Endereço devolvido pela consulta de CEP
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnderecoCep {
    pub logradouro: String,
    pub bairro: String,
    pub cidade: String,
    pub uf: String,
}

#[async_trait]
pub trait BuscaCep: Send + Sync {
    /// `Ok(None)` quando o serviço não conhece o CEP.
    async fn buscar(&self, cep: &str) -> Result<Option<EnderecoCep>, AppError>;
}

/// Apenas os dígitos; `None` se não sobrarem exatamente 8.
pub fn normalizar_cep(cep: &str) -> Option<String> {
    let digitos: String = cep.chars().filter(char::is_ascii_digit).collect();
    (digitos.len() == 8).then_some(digitos)
}

#[derive(Debug, Deserialize)]
struct RespostaViaCep {
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    #[serde(default)]
    erro: Option<serde_json::Value>,
}

impl RespostaViaCep {
    fn em_endereco(self) -> Option<EnderecoCep> {
        // ViaCEP devolve `erro: true` (ou "true") para CEP inexistente
        let com_erro = match &self.erro {
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::String(s)) => s == "true",
            _ => false,
        };
        if com_erro {
            return None;
        }
        Some(EnderecoCep {
            logradouro: self.logradouro,
            bairro: self.bairro,
            cidade: self.localidade,
            uf: self.uf,
        })
    }
}

pub struct ViaCep {
    client: Client,
    base_url: String,
}

impl ViaCep {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Falha ao criar o cliente HTTP do ViaCEP")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl BuscaCep for ViaCep {
    async fn buscar(&self, cep: &str) -> Result<Option<EnderecoCep>, AppError> {
        let cep = normalizar_cep(cep)
            .ok_or_else(|| AppError::backend(format!("CEP inválido: {}", cep)))?;
        let url = format!("{}/ws/{}/json/", self.base_url, cep);
        debug!("Consultando CEP: {}", url);

        let resposta: RespostaViaCep = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resposta.em_endereco())
    }
}
