//! Dados derivados para a página pública do imóvel.

use crate::fotos;
use crate::models::filtros::chave_comparacao;
use crate::models::{Foto, Imovel};
use serde::Serialize;

const LIMITE_DESCRICAO: usize = 160;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetadadosSeo {
    pub titulo: String,
    pub descricao: String,
    pub url_canonica: String,
    pub imagem: Option<String>,
}

impl MetadadosSeo {
    pub fn para_imovel(imovel: &Imovel, site_url: &str) -> Self {
        let titulo = match (imovel.empreendimento.trim(), imovel.bairro.trim()) {
            (nome, "") => nome.to_string(),
            (nome, bairro) => format!("{} - {}", nome, bairro),
        };

        let slug = if imovel.slug.trim().is_empty() {
            crate::formulario::gerar_slug(&imovel.empreendimento)
        } else {
            imovel.slug.trim().to_string()
        };

        Self {
            titulo,
            descricao: resumir(&imovel.descricao, LIMITE_DESCRICAO),
            url_canonica: format!(
                "{}/imovel-{}/{}",
                site_url.trim_end_matches('/'),
                imovel.codigo,
                slug
            ),
            imagem: galeria_publica(imovel).into_iter().next().map(|f| f.url),
        }
    }
}

/// Corta `texto` em no máximo `limite` caracteres, numa fronteira de palavra.
pub fn resumir(texto: &str, limite: usize) -> String {
    let texto = texto.split_whitespace().collect::<Vec<_>>().join(" ");
    if texto.chars().count() <= limite {
        return texto;
    }

    // reserva um caractere para as reticências
    let corte: String = texto.chars().take(limite.saturating_sub(1)).collect();
    let proximo = texto.chars().nth(limite.saturating_sub(1));
    let base = if proximo == Some(' ') {
        corte.as_str()
    } else {
        match corte.rfind(' ') {
            Some(pos) => &corte[..pos],
            None => corte.as_str(),
        }
    };
    format!("{}…", base.trim_end_matches(|c: char| c.is_whitespace() || c == ',' || c == '.'))
}

/// Fotos na ordem pública: ordenadas, com a de destaque na frente.
pub fn galeria_publica(imovel: &Imovel) -> Vec<Foto> {
    let mut galeria = fotos::ordenar(&imovel.fotos);
    if let Some(pos) = galeria.iter().position(|f| f.destaque.is_sim()) {
        let destaque = galeria.remove(pos);
        galeria.insert(0, destaque);
        fotos::renumerar(&mut galeria);
    }
    galeria
}

/// Sugestões de imóveis parecidos com `alvo`.
pub fn imoveis_semelhantes<'a>(
    alvo: &Imovel,
    candidatos: &'a [Imovel],
    limite: usize,
) -> Vec<&'a Imovel> {
    let categoria = chave_comparacao(&alvo.categoria);
    let cidade = chave_comparacao(&alvo.cidade);
    let bairro = chave_comparacao(&alvo.bairro);
    let preco = alvo.valor_venda_numerico();

    let distancia = |imovel: &Imovel| match (preco, imovel.valor_venda_numerico()) {
        (Some(a), Some(b)) => a.abs_diff(b),
        _ => u64::MAX,
    };

    let mut semelhantes: Vec<&Imovel> = candidatos
        .iter()
        .filter(|c| c.codigo != alvo.codigo)
        .filter(|c| c.ativo.is_sim())
        .filter(|c| chave_comparacao(&c.categoria) == categoria)
        .filter(|c| chave_comparacao(&c.cidade) == cidade)
        .collect();

    semelhantes.sort_by(|a, b| {
        let mesmo_bairro_a = chave_comparacao(&a.bairro) == bairro;
        let mesmo_bairro_b = chave_comparacao(&b.bairro) == bairro;
        mesmo_bairro_b
            .cmp(&mesmo_bairro_a)
            .then_with(|| distancia(a).cmp(&distancia(b)))
            .then_with(|| a.codigo.cmp(&b.codigo))
    });
    semelhantes.truncate(limite);
    semelhantes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SimNao;

    fn imovel(codigo: &str, bairro: &str, valor: &str) -> Imovel {
        Imovel {
            codigo: codigo.into(),
            categoria: "Apartamento".into(),
            cidade: "São Paulo".into(),
            bairro: bairro.into(),
            valor_venda: valor.into(),
            ativo: SimNao::Sim,
            ..Default::default()
        }
    }

    #[test]
    fn descricao_curta_fica_inteira() {
        assert_eq!(resumir("  Vista   para o mar ", 160), "Vista para o mar");
    }

    #[test]
    fn descricao_longa_corta_na_palavra() {
        let texto = "palavra ".repeat(40);
        let resumo = resumir(&texto, 160);
        assert!(resumo.chars().count() <= 160);
        assert!(resumo.ends_with("palavra…"));
    }

    #[test]
    fn metadados_com_url_canonica() {
        let mut alvo = imovel("123456", "Moema", "900000");
        alvo.empreendimento = "Residencial Aurora".into();
        alvo.fotos = vec![Foto::new("a", "https://cdn/fachada.jpg")];

        let seo = MetadadosSeo::para_imovel(&alvo, "https://site.com.br/");
        assert_eq!(seo.titulo, "Residencial Aurora - Moema");
        assert_eq!(
            seo.url_canonica,
            "https://site.com.br/imovel-123456/residencial-aurora"
        );
        assert_eq!(seo.imagem.as_deref(), Some("https://cdn/fachada.jpg"));
    }

    #[test]
    fn destaque_abre_a_galeria() {
        let mut alvo = imovel("1", "", "");
        let mut terceira = Foto::new("c", "sala_3.jpg");
        terceira.destaque = SimNao::Sim;
        alvo.fotos = vec![
            Foto::new("a", "sala_1.jpg"),
            Foto::new("b", "sala_2.jpg"),
            terceira,
        ];

        let galeria = galeria_publica(&alvo);
        let codigos: Vec<&str> = galeria.iter().map(|f| f.codigo.as_str()).collect();
        assert_eq!(codigos, vec!["c", "a", "b"]);
    }

    #[test]
    fn semelhantes_priorizam_bairro_e_preco() {
        let alvo = imovel("100000", "Moema", "1000000");
        let mut inativo = imovel("100005", "Moema", "1000000");
        inativo.ativo = SimNao::Nao;
        let mut outra_cidade = imovel("100006", "Moema", "1000000");
        outra_cidade.cidade = "Santos".into();

        let candidatos = vec![
            alvo.clone(),
            imovel("100001", "Pinheiros", "1000000"),
            imovel("100002", "Moema", "1500000"),
            imovel("100003", "Moema", "1100000"),
            inativo,
            outra_cidade,
            imovel("100004", "Sao Paulo", "1000000"),
        ];

        let codigos: Vec<&str> = imoveis_semelhantes(&alvo, &candidatos, 3)
            .iter()
            .map(|i| i.codigo.as_str())
            .collect();
        assert_eq!(codigos, vec!["100003", "100002", "100001"]);
    }
}
