use crate::models::Imovel;
use serde::Serialize;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};

/// Campos obrigatórios, já aparados, na forma que o `validator` entende.
#[derive(Debug, Validate)]
struct CamposObrigatorios {
    #[validate(length(min = 1, message = "O campo Empreendimento é obrigatório."))]
    empreendimento: String,
    #[validate(length(min = 1, message = "O campo Categoria é obrigatório."))]
    categoria: String,
    #[validate(length(min = 1, message = "O campo Situação é obrigatório."))]
    situacao: String,
    #[validate(length(min = 1, message = "O campo Endereço é obrigatório."))]
    endereco: String,
    #[validate(length(min = 1, message = "O campo Bairro é obrigatório."))]
    bairro: String,
    #[validate(length(min = 1, message = "O campo Cidade é obrigatório."))]
    cidade: String,
    #[validate(length(equal = 2, message = "Informe a UF com 2 letras."))]
    uf: String,
    #[validate(length(min = 1, message = "O campo Descrição é obrigatório."))]
    descricao: String,
}

impl From<&Imovel> for CamposObrigatorios {
    fn from(imovel: &Imovel) -> Self {
        Self {
            empreendimento: imovel.empreendimento.trim().to_string(),
            categoria: imovel.categoria.trim().to_string(),
            situacao: imovel.situacao.trim().to_string(),
            endereco: imovel.endereco.trim().to_string(),
            bairro: imovel.bairro.trim().to_string(),
            cidade: imovel.cidade.trim().to_string(),
            uf: imovel.uf.trim().to_string(),
            descricao: imovel.descricao.trim().to_string(),
        }
    }
}

/// Nomes dos campos obrigatórios, na ordem do formulário.
pub const CAMPOS_OBRIGATORIOS: [&str; 8] = [
    "empreendimento",
    "categoria",
    "situacao",
    "endereco",
    "bairro",
    "cidade",
    "uf",
    "descricao",
];

pub const CAMPO_FOTOS: &str = "fotos";

/// Valida campos obrigatórios e quantidade mínima de fotos.
pub fn validar_imovel(imovel: &Imovel, minimo_fotos: usize) -> Result<(), ValidationErrors> {
    let mut errors = match CamposObrigatorios::from(imovel).validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };

    if imovel.fotos.len() < minimo_fotos {
        let mut err = ValidationError::new("fotos_insuficientes");
        err.add_param("min".into(), &minimo_fotos);
        err.add_param("atual".into(), &imovel.fotos.len());
        err.message = Some(
            format!(
                "Fotos insuficientes: adicione pelo menos {} fotos ({} enviadas).",
                minimo_fotos,
                imovel.fotos.len()
            )
            .into(),
        );
        errors.add(CAMPO_FOTOS, err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Resumo recalculado a cada alteração do formulário
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResumoValidacao {
    pub formulario_valido: bool,
    /// campo -> preenchido corretamente
    pub campos: BTreeMap<&'static str, bool>,
    pub fotos: usize,
    pub fotos_minimas: usize,
}

impl ResumoValidacao {
    pub fn calcular(imovel: &Imovel, minimo_fotos: usize) -> Self {
        let erros = validar_imovel(imovel, minimo_fotos).err();
        let invalido = |campo: &str| {
            erros
                .as_ref()
                .map_or(false, |e| e.field_errors().contains_key(campo))
        };

        let campos = CAMPOS_OBRIGATORIOS
            .iter()
            .map(|campo| (*campo, !invalido(*campo)))
            .collect();

        Self {
            formulario_valido: erros.is_none(),
            campos,
            fotos: imovel.fotos.len(),
            fotos_minimas: minimo_fotos,
        }
    }

    pub fn fotos_suficientes(&self) -> bool {
        self.fotos >= self.fotos_minimas
    }

    pub fn campos_pendentes(&self) -> Vec<&'static str> {
        self.campos
            .iter()
            .filter(|(_, ok)| !**ok)
            .map(|(campo, _)| *campo)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Foto;

    fn imovel_completo(fotos: usize) -> Imovel {
        Imovel {
            codigo: "123456".into(),
            empreendimento: "Residencial Aurora".into(),
            categoria: "Apartamento".into(),
            situacao: "Pronto para morar".into(),
            endereco: "Rua Augusta".into(),
            bairro: "Consolação".into(),
            cidade: "São Paulo".into(),
            uf: "SP".into(),
            descricao: "Apartamento amplo".into(),
            fotos: (0..fotos)
                .map(|i| Foto::new(format!("f{}", i), format!("https://cdn/foto_{}.jpg", i)))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn imovel_completo_e_valido() {
        assert!(validar_imovel(&imovel_completo(5), 5).is_ok());
    }

    #[test]
    fn espacos_nao_contam_como_preenchido() {
        let mut imovel = imovel_completo(5);
        imovel.bairro = "   ".into();
        let erros = validar_imovel(&imovel, 5).unwrap_err();
        assert!(erros.field_errors().contains_key("bairro"));
        assert_eq!(erros.field_errors().len(), 1);
    }

    #[test]
    fn poucas_fotos_gera_erro_proprio() {
        let erros = validar_imovel(&imovel_completo(3), 5).unwrap_err();
        let campos = erros.field_errors();
        assert_eq!(campos.len(), 1);
        let mensagem = campos[CAMPO_FOTOS][0].message.as_ref().unwrap().to_string();
        assert!(mensagem.contains("Fotos insuficientes"));
    }

    #[test]
    fn resumo_por_campo() {
        let mut imovel = imovel_completo(2);
        imovel.cidade.clear();
        let resumo = ResumoValidacao::calcular(&imovel, 5);

        assert!(!resumo.formulario_valido);
        assert!(!resumo.fotos_suficientes());
        assert_eq!(resumo.campos_pendentes(), vec!["cidade"]);
        assert_eq!(resumo.campos["empreendimento"], true);
    }
}
