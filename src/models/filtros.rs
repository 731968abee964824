use super::Imovel;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Filtros da listagem de imóveis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FiltrosImoveis {
    /// Categoria (Apartamento, Casa, Terreno...)
    pub categoria: Option<String>,
    pub cidade: Option<String>,
    /// Bairros selecionados; vazio significa todos
    #[serde(default)]
    pub bairros: Vec<String>,
    /// Situação (Lançamento, Pronto para morar...)
    pub situacao: Option<String>,
    pub ativo: Option<bool>,
    /// Busca livre por código, empreendimento ou endereço
    pub termo: Option<String>,
}

impl FiltrosImoveis {
    /// Parâmetros de query enviados ao backend.
    pub fn query_params(&self, page: u32, limit: u32) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), page.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        let opcionais = [
            ("categoria", &self.categoria),
            ("cidade", &self.cidade),
            ("situacao", &self.situacao),
            ("termo", &self.termo),
        ];
        for (nome, valor) in opcionais {
            if let Some(v) = valor.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                params.push((nome.to_string(), v.to_string()));
            }
        }
        let bairros = deduplicar_opcoes(self.bairros.iter().map(String::as_str));
        if !bairros.is_empty() {
            params.push(("bairros".to_string(), bairros.join(",")));
        }
        if let Some(ativo) = self.ativo {
            params.push(("ativo".to_string(), if ativo { "Sim" } else { "Não" }.to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Paginacao {
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default = "pagina_um")]
    pub current_page: u32,
    #[serde(default)]
    pub limit: u32,
}

fn pagina_um() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PaginaImoveis {
    #[serde(default)]
    pub data: Vec<Imovel>,
    #[serde(default)]
    pub pagination: Paginacao,
}

/// Chave de comparação sem acentos, caixa ou espaços extras.
pub fn chave_comparacao(texto: &str) -> String {
    texto
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .map(sem_acento)
        .flat_map(char::to_lowercase)
        .collect()
}

pub(crate) fn sem_acento(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        outro => outro,
    }
}

/// Remove opções repetidas (bairros, situações) ignorando acento e caixa.
///
/// Mantém a primeira grafia encontrada e devolve em ordem alfabética.
pub fn deduplicar_opcoes<'a, I>(opcoes: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut vistos = HashSet::new();
    let mut resultado: Vec<(String, String)> = Vec::new();
    for opcao in opcoes {
        let limpa = opcao.split_whitespace().collect::<Vec<_>>().join(" ");
        if limpa.is_empty() {
            continue;
        }
        let chave = chave_comparacao(&limpa);
        if vistos.insert(chave.clone()) {
            resultado.push((chave, limpa));
        }
    }
    resultado.sort();
    resultado.into_iter().map(|(_, opcao)| opcao).collect()
}
