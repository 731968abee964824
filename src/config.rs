use anyhow::{Context, Result};
use std::{env, path::PathBuf, time::Duration};

/// Configuração carregada do ambiente (`.env` incluso).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub site_url: String,
    pub viacep_url: String,
    pub nominatim_url: String,
    pub http_timeout: Duration,
    pub minimo_fotos: usize,
    pub cache_dir: PathBuf,
    pub cache_ttl: chrono::Duration,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|chave| env::var(chave).ok())
    }

    /// Monta a configuração a partir de uma função de consulta.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("API_URL").context("API_URL deve ser definida")?;

        let ler_numero = |chave: &str, padrao: u64| -> Result<u64> {
            match lookup(chave) {
                Some(valor) => valor
                    .trim()
                    .parse()
                    .with_context(|| format!("{} deve ser um número, recebido '{}'", chave, valor)),
                None => Ok(padrao),
            }
        };

        let http_timeout = Duration::from_secs(ler_numero("HTTP_TIMEOUT_SECS", 30)?);
        let minimo_fotos = ler_numero("MINIMO_FOTOS", 5)? as usize;
        let ttl_minutos = ler_numero("CACHE_TTL_MINUTOS", 30)?;
        let cache_ttl = i64::try_from(ttl_minutos)
            .ok()
            .and_then(chrono::Duration::try_minutes)
            .with_context(|| format!("CACHE_TTL_MINUTOS fora do intervalo: {}", ttl_minutos))?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            site_url: lookup("SITE_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string())
                .trim_end_matches('/')
                .to_string(),
            viacep_url: lookup("VIACEP_URL").unwrap_or_else(|| "https://viacep.com.br".to_string()),
            nominatim_url: lookup("NOMINATIM_URL")
                .unwrap_or_else(|| "https://nominatim.openstreetmap.org".to_string()),
            http_timeout,
            minimo_fotos,
            cache_dir: lookup("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".cache")),
            cache_ttl,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_de(pares: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let mapa: HashMap<String, String> = pares
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |chave| mapa.get(chave).cloned()
    }

    #[test]
    fn aplica_padroes() {
        let config = AppConfig::from_lookup(lookup_de(&[("API_URL", "https://api.exemplo.com/")])).unwrap();

        assert_eq!(config.api_url, "https://api.exemplo.com");
        assert_eq!(config.minimo_fotos, 5);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.cache_ttl, chrono::Duration::minutes(30));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn exige_api_url() {
        assert!(AppConfig::from_lookup(lookup_de(&[])).is_err());
    }

    #[test]
    fn rejeita_numero_invalido() {
        let resultado = AppConfig::from_lookup(lookup_de(&[
            ("API_URL", "https://api.exemplo.com"),
            ("MINIMO_FOTOS", "cinco"),
        ]));
        assert!(resultado.is_err());
    }

    #[test]
    fn rejeita_ttl_fora_do_intervalo() {
        for valor in ["18446744073709551615", "9223372036854775807"] {
            let resultado = AppConfig::from_lookup(lookup_de(&[
                ("API_URL", "https://api.exemplo.com"),
                ("CACHE_TTL_MINUTOS", valor),
            ]));
            let erro = resultado.unwrap_err().to_string();
            assert!(erro.contains("CACHE_TTL_MINUTOS"), "{}", erro);
        }

        let config = AppConfig::from_lookup(lookup_de(&[
            ("API_URL", "https://api.exemplo.com"),
            ("CACHE_TTL_MINUTOS", "90"),
        ]))
        .unwrap();
        assert_eq!(config.cache_ttl, chrono::Duration::minutes(90));
    }
}
