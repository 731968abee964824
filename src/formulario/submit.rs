use super::estado::ImovelForm;
use super::moeda::somente_digitos;
use super::slug::gerar_slug;
use super::validacao::validar_imovel;
use crate::error::AppError;
use crate::fotos;
use crate::models::filtros::chave_comparacao;
use crate::models::Imovel;
use crate::services::{ImovelServico, Resposta};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModoEnvio {
    Criar,
    Atualizar,
}

/// Tipo de logradouro a partir do início do endereço.
pub fn tipo_endereco(endereco: &str) -> &'static str {
    let primeira = endereco.split_whitespace().next().unwrap_or("");
    match chave_comparacao(primeira).trim_end_matches('.') {
        "av" | "avenida" => "Avenida",
        "al" | "alameda" => "Alameda",
        "tv" | "trav" | "travessa" => "Travessa",
        "estr" | "estrada" => "Estrada",
        "rod" | "rodovia" => "Rodovia",
        "pc" | "pca" | "praca" => "Praça",
        _ => "Rua",
    }
}

/// Prepara o registro para o backend.
///
/// Fotos viram array com `ordem` contígua na ordem atual, valores ficam só
/// com dígitos, o tipo de logradouro é derivado e o slug gerado se faltar.
pub fn montar_payload(imovel: &Imovel) -> Imovel {
    let mut payload = imovel.clone();

    fotos::renumerar(&mut payload.fotos);

    for valor in [
        &mut payload.valor_venda,
        &mut payload.valor_aluguel,
        &mut payload.valor_condominio,
        &mut payload.valor_iptu,
    ] {
        *valor = somente_digitos(valor.as_str());
    }

    payload.tipo_endereco = tipo_endereco(&payload.endereco).to_string();
    if payload.slug.trim().is_empty() {
        payload.slug = gerar_slug(&payload.empreendimento);
    }
    payload.uf = payload.uf.trim().to_uppercase();
    payload
}

/// Validação + envio do formulário de imóvel
pub struct ImovelSubmit<'a> {
    servico: &'a dyn ImovelServico,
}

impl<'a> ImovelSubmit<'a> {
    pub fn new(servico: &'a dyn ImovelServico) -> Self {
        Self { servico }
    }

    /// Valida e envia. Erros de validação nunca chegam ao backend.
    pub async fn enviar(&self, form: &ImovelForm, modo: ModoEnvio) -> Result<Imovel, AppError> {
        let imovel = form.imovel();
        if let Err(erros) = validar_imovel(imovel, form.minimo_fotos()) {
            warn!("Imóvel {} com campos inválidos: {:?}", imovel.codigo, form.resumo().campos_pendentes());
            return Err(AppError::Validacao(erros));
        }

        let payload = montar_payload(imovel);
        let resultado = match modo {
            ModoEnvio::Criar => self.servico.criar_imovel(&payload).await,
            ModoEnvio::Atualizar => self.servico.atualizar_imovel(&payload.codigo, &payload).await,
        };

        match &resultado {
            Ok(salvo) => info!("Imóvel {} salvo ({:?})", salvo.codigo, modo),
            Err(e) => error!("Falha ao salvar imóvel {}: {}", payload.codigo, e),
        }
        resultado
    }

    /// Mesmo que `enviar`, no formato entregue ao banner da interface.
    pub async fn enviar_resposta(&self, form: &ImovelForm, modo: ModoEnvio) -> Resposta<Imovel> {
        self.enviar(form, modo).await.into()
    }
}
