use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;
use url::Url;

lazy_static! {
    static ref YOUTUBE_ID: Regex = Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap();
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Video {
    #[serde(rename = "Video")]
    pub youtube_id: String,
}

/// Coleção de vídeos indexada por inteiros positivos ("1", "2", ...).
///
/// As chaves são validadas na entrada; o resto do código confia nelas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Videos(BTreeMap<u16, Video>);

impl Videos {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, chave: u16) -> Option<&Video> {
        self.0.get(&chave)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &Video)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    /// Adiciona um vídeo a partir de uma URL ou ID; devolve a chave usada.
    ///
    /// A chave é a seguinte à maior; se ela já for `u16::MAX`, usa a
    /// primeira livre. `None` para entrada inválida ou coleção cheia.
    pub fn adicionar(&mut self, entrada: &str) -> Option<u16> {
        let youtube_id = extrair_youtube_id(entrada)?;
        let chave = match self.0.keys().next_back() {
            None => 1,
            Some(maior) => match maior.checked_add(1) {
                Some(chave) => chave,
                None => (1..=u16::MAX).find(|k| !self.0.contains_key(k))?,
            },
        };
        self.0.insert(chave, Video { youtube_id });
        Some(chave)
    }

    pub fn remover(&mut self, chave: u16) -> Option<Video> {
        self.0.remove(&chave)
    }

    fn from_value(valor: Value) -> Result<Self, String> {
        let mut videos = BTreeMap::new();
        match valor {
            Value::Null => {}
            Value::String(ref s) if s.trim().is_empty() => {}
            Value::Array(itens) => {
                let mut chave = 1u16;
                for item in itens {
                    if let Some(video) = video_de_valor(&item) {
                        videos.insert(chave, video);
                        match chave.checked_add(1) {
                            Some(proxima) => chave = proxima,
                            None => break,
                        }
                    }
                }
            }
            Value::Object(mapa) => {
                for (chave, item) in mapa {
                    let chave: u16 = chave
                        .parse()
                        .ok()
                        .filter(|k| *k > 0)
                        .ok_or_else(|| format!("chave de vídeo inválida: '{}'", chave))?;
                    if let Some(video) = video_de_valor(&item) {
                        videos.insert(chave, video);
                    }
                }
            }
            // "", false, 0 e afins: backend sem vídeos
            outro => warn!("Coleção de vídeos inválida {}, ignorando", outro),
        }
        Ok(Self(videos))
    }
}

fn video_de_valor(valor: &Value) -> Option<Video> {
    let texto = match valor {
        Value::String(s) => s.as_str(),
        Value::Object(mapa) => mapa.get("Video").and_then(Value::as_str)?,
        _ => return None,
    };
    extrair_youtube_id(texto).map(|youtube_id| Video { youtube_id })
}

impl Serialize for Videos {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mapa: Map<String, Value> = self
            .0
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::json!({ "Video": v.youtube_id })))
            .collect();
        mapa.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Videos {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let valor = Value::deserialize(deserializer)?;
        Videos::from_value(valor).map_err(serde::de::Error::custom)
    }
}

/// Extrai o ID de um vídeo do YouTube de uma URL ou de um ID puro.
pub fn extrair_youtube_id(entrada: &str) -> Option<String> {
    let entrada = entrada.trim();
    if YOUTUBE_ID.is_match(entrada) {
        return Some(entrada.to_string());
    }

    let com_esquema = if entrada.starts_with("http://") || entrada.starts_with("https://") {
        entrada.to_string()
    } else {
        format!("https://{}", entrada)
    };
    let url = Url::parse(&com_esquema).ok()?;
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");

    let candidato = match host {
        "youtu.be" => url.path_segments()?.next().map(str::to_string),
        "youtube.com" | "youtube-nocookie.com" => {
            let segmentos: Vec<&str> = url.path_segments()?.collect();
            match segmentos.as_slice() {
                ["watch", ..] => url
                    .query_pairs()
                    .find(|(k, _)| k == "v")
                    .map(|(_, v)| v.into_owned()),
                ["embed", id, ..] | ["shorts", id, ..] | ["live", id, ..] | ["v", id, ..] => {
                    Some(id.to_string())
                }
                _ => None,
            }
        }
        _ => None,
    }?;

    YOUTUBE_ID.is_match(&candidato).then_some(candidato)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extrai_id_de_formatos_comuns() {
        let id = Some("dQw4w9WgXcQ".to_string());
        assert_eq!(extrair_youtube_id("dQw4w9WgXcQ"), id);
        assert_eq!(extrair_youtube_id("https://youtu.be/dQw4w9WgXcQ"), id);
        assert_eq!(extrair_youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10"), id);
        assert_eq!(extrair_youtube_id("youtube.com/embed/dQw4w9WgXcQ"), id);
        assert_eq!(extrair_youtube_id("https://youtube.com/shorts/dQw4w9WgXcQ"), id);
        assert_eq!(extrair_youtube_id("https://vimeo.com/123"), None);
        assert_eq!(extrair_youtube_id("curto"), None);
    }

    #[test]
    fn valida_chaves_na_entrada() {
        let videos: Videos = serde_json::from_value(json!({
            "2": {"Video": "https://youtu.be/dQw4w9WgXcQ"},
            "1": {"Video": "aaaaaaaaaaa"}
        }))
        .unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos.get(2).unwrap().youtube_id, "dQw4w9WgXcQ");

        assert!(serde_json::from_value::<Videos>(json!({"abc": {"Video": "aaaaaaaaaaa"}})).is_err());
        assert!(serde_json::from_value::<Videos>(json!({"0": {"Video": "aaaaaaaaaaa"}})).is_err());
    }

    #[test]
    fn array_recebe_chaves_sequenciais() {
        let videos: Videos =
            serde_json::from_value(json!(["aaaaaaaaaaa", "invalido", {"Video": "bbbbbbbbbbb"}])).unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos.get(1).unwrap().youtube_id, "aaaaaaaaaaa");
        assert_eq!(videos.get(2).unwrap().youtube_id, "bbbbbbbbbbb");

        let serializado = serde_json::to_value(&videos).unwrap();
        assert_eq!(serializado, json!({"1": {"Video": "aaaaaaaaaaa"}, "2": {"Video": "bbbbbbbbbbb"}}));
    }

    #[test]
    fn colecao_escalar_vira_vazia() {
        for valor in [json!(""), json!(false), json!(0), json!("sem video")] {
            let videos: Videos = serde_json::from_value(valor).unwrap();
            assert!(videos.is_empty());
        }
    }

    #[test]
    fn adicionar_apos_chave_maxima_usa_primeira_livre() {
        let mut videos: Videos = serde_json::from_value(json!({"65535": "aaaaaaaaaaa"})).unwrap();
        assert_eq!(videos.adicionar("bbbbbbbbbbb"), Some(1));
        assert_eq!(videos.adicionar("ccccccccccc"), Some(2));
        assert_eq!(videos.len(), 3);
    }

    #[test]
    fn adicionar_usa_proxima_chave() {
        let mut videos = Videos::new();
        assert_eq!(videos.adicionar("https://youtu.be/dQw4w9WgXcQ"), Some(1));
        assert_eq!(videos.adicionar("nao e video"), None);
        assert_eq!(videos.adicionar("aaaaaaaaaaa"), Some(2));
    }
}
