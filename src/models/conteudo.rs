use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Conteúdo institucional do site, organizado em seções nomeadas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct ConteudoSite {
    pub secoes: Map<String, Value>,
}

impl ConteudoSite {
    pub fn secao(&self, nome: &str) -> Option<&Value> {
        self.secoes.get(nome)
    }

    pub fn definir_secao(&mut self, nome: impl Into<String>, valor: Value) {
        self.secoes.insert(nome.into(), valor);
    }
}
