pub mod conteudo;
pub mod corretor;
pub mod filtros;
pub mod foto;
pub mod imovel;
pub mod video;

pub use conteudo::ConteudoSite;
pub use corretor::Corretor;
pub use filtros::{FiltrosImoveis, PaginaImoveis, Paginacao};
pub use foto::Foto;
pub use imovel::Imovel;
pub use video::{Video, Videos};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Flag "Sim"/"Não" usada pelo backend em vários campos.
///
/// Na leitura, nulo, vazio ou qualquer valor desconhecido vale `Nao`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub enum SimNao {
    #[serde(rename = "Sim")]
    Sim,
    #[default]
    #[serde(rename = "Não")]
    Nao,
}

impl<'de> Deserialize<'de> for SimNao {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(b) => SimNao::from(b),
            Value::Number(n) => SimNao::from(n.as_i64() == Some(1)),
            Value::String(s) => match filtros::chave_comparacao(&s).as_str() {
                "sim" | "s" | "true" | "1" => SimNao::Sim,
                "nao" | "n" | "false" | "0" | "" => SimNao::Nao,
                _ => {
                    warn!("Valor Sim/Não desconhecido '{}', usando Não", s);
                    SimNao::Nao
                }
            },
            Value::Null => SimNao::Nao,
            outro => {
                warn!("Valor Sim/Não inválido {}, usando Não", outro);
                SimNao::Nao
            }
        })
    }
}

impl SimNao {
    pub fn is_sim(self) -> bool {
        self == SimNao::Sim
    }
}

impl From<bool> for SimNao {
    fn from(valor: bool) -> Self {
        if valor {
            SimNao::Sim
        } else {
            SimNao::Nao
        }
    }
}
