use super::SimNao;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Foto de um imóvel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Foto {
    #[serde(rename = "Codigo", deserialize_with = "texto_ou_numero")]
    pub codigo: String,
    #[serde(rename = "Foto")]
    pub url: String,
    #[serde(rename = "FotoPequena", default, skip_serializing_if = "Option::is_none")]
    pub url_pequena: Option<String>,
    #[serde(rename = "Destaque", default)]
    pub destaque: SimNao,
    #[serde(
        rename = "Ordem",
        alias = "ordem",
        alias = "ORDEM",
        default,
        deserialize_with = "ordem_opcional",
        skip_serializing_if = "Option::is_none"
    )]
    pub ordem: Option<u32>,
}

impl Foto {
    pub fn new(codigo: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            codigo: codigo.into(),
            url: url.into(),
            url_pequena: None,
            destaque: SimNao::Nao,
            ordem: None,
        }
    }
}

/// Normaliza a coleção `Foto` vinda do backend.
///
/// Aceita array ou objeto indexado pelo código da foto. Qualquer outra
/// forma vira uma coleção vazia; entradas sem URL são descartadas.
pub fn de_valor(valor: &Value) -> Vec<Foto> {
    let entradas: Vec<&Value> = match valor {
        Value::Array(itens) => itens.iter().collect(),
        Value::Object(mapa) => mapa.values().collect(),
        _ => return Vec::new(),
    };

    entradas
        .into_iter()
        .filter_map(|entrada| match serde_json::from_value::<Foto>(entrada.clone()) {
            Ok(foto) if !foto.url.trim().is_empty() => Some(foto),
            Ok(foto) => {
                warn!("Foto {} sem URL descartada", foto.codigo);
                None
            }
            Err(e) => {
                warn!("Entrada de foto inválida descartada: {}", e);
                None
            }
        })
        .collect()
}

pub(crate) fn deserialize_colecao<'de, D>(deserializer: D) -> Result<Vec<Foto>, D::Error>
where
    D: Deserializer<'de>,
{
    let valor = Value::deserialize(deserializer)?;
    Ok(de_valor(&valor))
}

fn texto_ou_numero<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        outro => Err(serde::de::Error::custom(format!(
            "código de foto inválido: {}",
            outro
        ))),
    }
}

fn ordem_opcional<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}
