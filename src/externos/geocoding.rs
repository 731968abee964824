use crate::error::AppError;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordenadas {
    pub latitude: f64,
    pub longitude: f64,
}

#[async_trait]
pub trait Geocodificador: Send + Sync {
    /// Melhor resultado para o endereço em texto livre.
    async fn geocodificar(&self, consulta: &str) -> Result<Option<Coordenadas>, AppError>;
}

#[derive(Debug, Deserialize)]
struct ResultadoNominatim {
    lat: String,
    lon: String,
}

fn primeira_coordenada(resultados: Vec<ResultadoNominatim>) -> Option<Coordenadas> {
    resultados.into_iter().find_map(|r| {
        Some(Coordenadas {
            latitude: r.lat.parse().ok()?,
            longitude: r.lon.parse().ok()?,
        })
    })
}

/// Busca de coordenadas no Nominatim (OpenStreetMap)
pub struct Nominatim {
    client: Client,
    base_url: String,
}

impl Nominatim {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        // Nominatim exige um user agent identificável
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("imovel-console/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Falha ao criar o cliente HTTP do Nominatim")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Geocodificador for Nominatim {
    async fn geocodificar(&self, consulta: &str) -> Result<Option<Coordenadas>, AppError> {
        let consulta = consulta.trim();
        if consulta.is_empty() {
            return Ok(None);
        }
        debug!("Geocodificando: {}", consulta);

        let resultados: Vec<ResultadoNominatim> = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("format", "json"), ("limit", "1"), ("q", consulta)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(primeira_coordenada(resultados))
    }
}
