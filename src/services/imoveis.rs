use super::client::ApiClient;
use super::envelope::decodificar;
use super::traits::ImovelServico;
use crate::error::AppError;
use crate::models::{FiltrosImoveis, Imovel, PaginaImoveis, Paginacao, SimNao};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

impl ApiClient {
    /// Lista imóveis paginados com os filtros dados.
    pub async fn listar_imoveis(
        &self,
        filtros: &FiltrosImoveis,
        page: u32,
        limit: u32,
    ) -> Result<PaginaImoveis, AppError> {
        let query = filtros.query_params(page, limit);
        debug!("Listando imóveis: {:?}", query);

        let valor = self
            .enviar(self.request(Method::GET, "/admin/imoveis").query(&query))
            .await?;
        pagina_de_valor(valor, page, limit)
    }

    /// Imóveis marcados como destaque no site.
    pub async fn listar_destaques(&self) -> Result<Vec<Imovel>, AppError> {
        let valor = self
            .enviar(self.request(Method::GET, "/admin/imoveis/destacados"))
            .await?;
        Ok(pagina_de_valor(valor, 1, 0)?.data)
    }

    /// Marca ou desmarca um imóvel como destaque.
    pub async fn definir_destacado(&self, codigo: &str, destacado: bool) -> Result<(), AppError> {
        let corpo = json!({ "Destacado": SimNao::from(destacado) });
        let _: Value = self
            .com_corpo(Method::PUT, &format!("/admin/imoveis/{}", codigo), &corpo)
            .await?;
        info!("Imóvel {} destacado = {}", codigo, destacado);
        Ok(())
    }
}

/// Decodifica cada registro separadamente.
///
/// Um registro que não decodifica é descartado com `warn!` e não derruba a
/// lista inteira.
pub(crate) fn imoveis_de_itens(itens: Vec<Value>) -> Vec<Imovel> {
    itens
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let codigo = item.get("Codigo").map(Value::to_string).unwrap_or_default();
            match serde_json::from_value::<Imovel>(item) {
                Ok(imovel) => Some(imovel),
                Err(e) => {
                    warn!("Imóvel {} (posição {}) ignorado: {}", codigo, i, e);
                    None
                }
            }
        })
        .collect()
}

/// Aceita tanto `{data, pagination}` quanto um array puro.
fn pagina_de_valor(valor: Value, page: u32, limit: u32) -> Result<PaginaImoveis, AppError> {
    match valor {
        Value::Array(itens) => {
            let data = imoveis_de_itens(itens);
            let total = data.len() as u64;
            Ok(PaginaImoveis {
                pagination: Paginacao {
                    total_items: total,
                    total_pages: u32::from(total > 0),
                    current_page: page,
                    limit,
                },
                data,
            })
        }
        Value::Null => Ok(PaginaImoveis::default()),
        Value::Object(mut mapa) => {
            let itens = match mapa.remove("data") {
                Some(Value::Array(itens)) => itens,
                Some(Value::Null) | None => Vec::new(),
                Some(outro) => {
                    return Err(AppError::RespostaInvalida(format!(
                        "lista de imóveis inválida: {}",
                        outro
                    )))
                }
            };
            let pagination = match mapa.remove("pagination") {
                Some(Value::Null) | None => Paginacao::default(),
                Some(valor) => decodificar(valor)?,
            };
            Ok(PaginaImoveis {
                data: imoveis_de_itens(itens),
                pagination,
            })
        }
        outro => Err(AppError::RespostaInvalida(format!(
            "página de imóveis inválida: {}",
            outro
        ))),
    }
}

#[async_trait]
impl ImovelServico for ApiClient {
    async fn get_imovel_por_codigo(&self, codigo: &str) -> Result<Imovel, AppError> {
        self.get(&format!("/admin/imoveis/{}", codigo), &[]).await
    }

    async fn criar_imovel(&self, imovel: &Imovel) -> Result<Imovel, AppError> {
        let valor: Value = self.com_corpo(Method::POST, "/admin/imoveis", imovel).await?;
        let criado = imovel_ou_enviado(valor, imovel)?;
        info!("Imóvel {} criado", imovel.codigo);
        Ok(criado)
    }

    async fn atualizar_imovel(&self, codigo: &str, imovel: &Imovel) -> Result<Imovel, AppError> {
        let valor: Value = self
            .com_corpo(Method::PUT, &format!("/admin/imoveis/{}", codigo), imovel)
            .await?;
        let atualizado = imovel_ou_enviado(valor, imovel)?;
        info!("Imóvel {} atualizado", codigo);
        Ok(atualizado)
    }

    async fn excluir_imovel(&self, codigo: &str) -> Result<(), AppError> {
        self.delete(&format!("/admin/imoveis/{}", codigo)).await?;
        info!("Imóvel {} excluído", codigo);
        Ok(())
    }
}

/// Backend às vezes responde só `{success: true}`; nesse caso o registro
/// enviado é o resultado.
fn imovel_ou_enviado(valor: Value, enviado: &Imovel) -> Result<Imovel, AppError> {
    if valor.get("Codigo").is_some() {
        decodificar(valor)
    } else {
        Ok(enviado.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagina_a_partir_de_array() {
        let valor = json!([{"Codigo": "111111"}, {"Codigo": "222222"}]);
        let pagina = pagina_de_valor(valor, 1, 12).unwrap();
        assert_eq!(pagina.data.len(), 2);
        assert_eq!(pagina.pagination.total_items, 2);
        assert_eq!(pagina.pagination.total_pages, 1);
    }

    #[test]
    fn pagina_a_partir_de_objeto() {
        let valor = json!({
            "data": [{"Codigo": "111111"}],
            "pagination": {"totalItems": 30, "totalPages": 3, "currentPage": 2, "limit": 12}
        });
        let pagina = pagina_de_valor(valor, 2, 12).unwrap();
        assert_eq!(pagina.data[0].codigo, "111111");
        assert_eq!(pagina.pagination.total_pages, 3);
        assert_eq!(pagina.pagination.current_page, 2);
    }

    #[test]
    fn registro_ruim_nao_derruba_a_pagina() {
        let valor = json!({
            "data": [
                {"Codigo": "111111", "Complemento": null, "Ativo": null, "UF": null},
                {"Codigo": "222222", "Video": ""},
                {"Codigo": "333333", "Video": {"abc": "aaaaaaaaaaa"}},
                {"Codigo": "444444", "Empreendimento": "Edifício Sol"}
            ],
            "pagination": {"totalItems": 4, "totalPages": 1, "currentPage": 1, "limit": 12}
        });
        let pagina = pagina_de_valor(valor, 1, 12).unwrap();

        let codigos: Vec<&str> = pagina.data.iter().map(|i| i.codigo.as_str()).collect();
        assert_eq!(codigos, vec!["111111", "222222", "444444"]);
        assert_eq!(pagina.data[0].complemento, "");
        assert_eq!(pagina.data[0].ativo, SimNao::Nao);
        assert!(pagina.data[1].videos.is_empty());
        assert_eq!(pagina.pagination.total_items, 4);
    }

    #[test]
    fn registro_ruim_em_array_puro_tambem_e_ignorado() {
        let valor = json!([{"Codigo": "111111"}, {"Codigo": "222222", "Video": {"0": "x"}}]);
        let pagina = pagina_de_valor(valor, 1, 12).unwrap();
        assert_eq!(pagina.data.len(), 1);
        assert_eq!(pagina.pagination.total_items, 1);
    }

    #[test]
    fn resposta_sem_registro_devolve_o_enviado() {
        let imovel = Imovel::novo();
        assert_eq!(imovel_ou_enviado(json!({}), &imovel).unwrap().codigo, imovel.codigo);
        assert_eq!(imovel_ou_enviado(Value::Null, &imovel).unwrap().codigo, imovel.codigo);

        let salvo = imovel_ou_enviado(json!({"Codigo": "999999", "Slug": "casa"}), &imovel).unwrap();
        assert_eq!(salvo.codigo, "999999");
        assert_eq!(salvo.slug, "casa");
    }
}
