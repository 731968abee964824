use crate::models::Foto;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SUFIXO_NUMERICO: Regex = Regex::new(r"^(.*?)[\s_\-\.\(]*(\d+)\)?$").unwrap();
}

const PALAVRAS_CAPA: [&str; 5] = ["fachada", "capa", "principal", "frente", "destaque"];
const PALAVRAS_FINAL: [&str; 2] = ["planta", "mapa"];

/// Estratégia de ranqueamento das fotos.
///
/// Implementações devolvem a chave de cada foto; o ordenador faz o resto.
/// A chave deve depender só da foto e da posição original para o resultado
/// ser determinístico.
pub trait EstrategiaOrdenacao: Send + Sync {
    fn chave(&self, foto: &Foto, indice_original: usize) -> ChaveOrdenacao;
}

/// Chave composta: prioridade, grupo, número da série, posição original.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ChaveOrdenacao {
    pub prioridade: u8,
    pub grupo: String,
    pub numero: u64,
    pub indice_original: usize,
}

/// Ordenação inferida pelo nome do arquivo.
///
/// Fotos de capa primeiro, plantas por último. Entre as demais, fotos da
/// mesma série ("sala_01", "sala_02") ficam juntas em ordem natural.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrdenacaoInteligente;

impl EstrategiaOrdenacao for OrdenacaoInteligente {
    fn chave(&self, foto: &Foto, indice_original: usize) -> ChaveOrdenacao {
        let nome = nome_arquivo(&foto.url);

        let prioridade = if PALAVRAS_CAPA.iter().any(|p| nome.contains(p)) {
            0
        } else if PALAVRAS_FINAL.iter().any(|p| nome.contains(p)) {
            2
        } else {
            1
        };

        let (grupo, numero) = match SUFIXO_NUMERICO.captures(&nome) {
            Some(caps) => {
                let grupo = caps.get(1).map_or("", |m| m.as_str()).to_string();
                // números enormes (hashes) não definem sequência
                let numero = caps
                    .get(2)
                    .and_then(|m| m.as_str().parse::<u64>().ok())
                    .unwrap_or(u64::MAX);
                (grupo, numero)
            }
            None => (nome, 0),
        };

        ChaveOrdenacao {
            prioridade,
            grupo,
            numero,
            indice_original,
        }
    }
}

/// Mantém a ordem recebida; útil quando o usuário já ordenou manualmente.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrdemOriginal;

impl EstrategiaOrdenacao for OrdemOriginal {
    fn chave(&self, _foto: &Foto, indice_original: usize) -> ChaveOrdenacao {
        ChaveOrdenacao {
            prioridade: 0,
            grupo: String::new(),
            numero: 0,
            indice_original,
        }
    }
}

/// Nome do arquivo em minúsculas, sem extensão, query ou fragmento.
pub(crate) fn nome_arquivo(url: &str) -> String {
    let sem_query = url.split(['?', '#']).next().unwrap_or("");
    let arquivo = sem_query.rsplit('/').next().unwrap_or(sem_query);
    let sem_extensao = match arquivo.rfind('.') {
        Some(pos) if pos > 0 => &arquivo[..pos],
        _ => arquivo,
    };
    sem_extensao.to_lowercase()
}

/// Ordena com a estratégia dada e renumera `ordem` de 1 a N.
///
/// O campo `ordem` recebido é ignorado. `destaque` não é alterado.
pub fn ordenar_com(fotos: &[Foto], estrategia: &dyn EstrategiaOrdenacao) -> Vec<Foto> {
    let mut chaveadas: Vec<(ChaveOrdenacao, &Foto)> = fotos
        .iter()
        .enumerate()
        .map(|(i, foto)| (estrategia.chave(foto, i), foto))
        .collect();
    chaveadas.sort_by(|a, b| a.0.cmp(&b.0));

    chaveadas
        .into_iter()
        .enumerate()
        .map(|(i, (_, foto))| {
            let mut foto = foto.clone();
            foto.ordem = Some(i as u32 + 1);
            foto
        })
        .collect()
}

pub fn ordenar(fotos: &[Foto]) -> Vec<Foto> {
    ordenar_com(fotos, &OrdenacaoInteligente)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SimNao;
    use std::collections::BTreeSet;

    fn foto(codigo: &str, url: &str) -> Foto {
        Foto::new(codigo, url)
    }

    fn codigos(fotos: &[Foto]) -> Vec<&str> {
        fotos.iter().map(|f| f.codigo.as_str()).collect()
    }

    #[test]
    fn extrai_nome_do_arquivo() {
        assert_eq!(nome_arquivo("https://cdn.site/imoveis/123/Sala_02.JPG?w=800"), "sala_02");
        assert_eq!(nome_arquivo("fachada.png"), "fachada");
        assert_eq!(nome_arquivo(".oculto"), ".oculto");
        assert_eq!(nome_arquivo(""), "");
    }

    #[test]
    fn resultado_e_permutacao_com_ordem_nova() {
        let entrada = vec![
            foto("a", "x.jpg"),
            foto("b", "y.jpg"),
            foto("c", "z.jpg"),
        ];
        let saida = ordenar(&entrada);

        assert_eq!(saida.len(), 3);
        let esperado: BTreeSet<&str> = ["a", "b", "c"].into_iter().collect();
        let obtido: BTreeSet<&str> = codigos(&saida).into_iter().collect();
        assert_eq!(obtido, esperado);
        let ordens: Vec<u32> = saida.iter().filter_map(|f| f.ordem).collect();
        assert_eq!(ordens, vec![1, 2, 3]);
    }

    #[test]
    fn ignora_ordem_recebida_e_e_deterministica() {
        let mut entrada = vec![
            foto("1", "https://cdn/planta_baixa.jpg"),
            foto("2", "https://cdn/sala_10.jpg"),
            foto("3", "https://cdn/sala_2.jpg"),
            foto("4", "https://cdn/fachada.jpg"),
            foto("5", "https://cdn/cozinha.jpg"),
        ];
        entrada[0].ordem = Some(1);
        entrada[3].ordem = Some(5);

        let primeira = ordenar(&entrada);
        let segunda = ordenar(&entrada);
        assert_eq!(primeira, segunda);
        assert_eq!(codigos(&primeira), vec!["4", "5", "3", "2", "1"]);
    }

    #[test]
    fn nao_altera_destaque() {
        let mut entrada = vec![foto("a", "b.jpg"), foto("b", "a.jpg")];
        entrada[0].destaque = SimNao::Sim;

        let saida = ordenar(&entrada);
        let destacada = saida.iter().find(|f| f.codigo == "a").unwrap();
        assert_eq!(destacada.destaque, SimNao::Sim);
        assert_eq!(saida.iter().filter(|f| f.destaque.is_sim()).count(), 1);
    }

    #[test]
    fn duplicatas_de_url_sao_preservadas() {
        let entrada = vec![foto("a", "igual.jpg"), foto("b", "igual.jpg")];
        assert_eq!(codigos(&ordenar(&entrada)), vec!["a", "b"]);
    }

    #[test]
    fn vazio_devolve_vazio() {
        assert!(ordenar(&[]).is_empty());
    }

    #[test]
    fn estrategia_original_so_renumera() {
        let entrada = vec![foto("z", "planta.jpg"), foto("y", "fachada.jpg")];
        let saida = ordenar_com(&entrada, &OrdemOriginal);
        assert_eq!(codigos(&saida), vec!["z", "y"]);
        assert_eq!(saida[1].ordem, Some(2));
    }
}
