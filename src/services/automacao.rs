use super::client::ApiClient;
use crate::error::AppError;
use crate::models::Imovel;
use serde_json::Value;
use tracing::info;

impl ApiClient {
    /// Registros de imóveis importados pela automação, ainda não publicados.
    pub async fn listar_automacao(&self, page: u32, limit: u32) -> Result<Vec<Imovel>, AppError> {
        let query = vec![
            ("page".to_string(), page.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        let valor: Value = self.get("/automacao", &query).await?;
        let lista = match valor {
            Value::Object(mut mapa) => mapa.remove("data").unwrap_or(Value::Null),
            outro => outro,
        };
        match lista {
            Value::Array(itens) => Ok(super::imoveis::imoveis_de_itens(itens)),
            Value::Null => Ok(Vec::new()),
            outro => Err(AppError::RespostaInvalida(format!(
                "lista da automação inválida: {}",
                outro
            ))),
        }
    }

    pub async fn get_automacao_por_codigo(&self, codigo: &str) -> Result<Imovel, AppError> {
        self.get(&format!("/automacao/{}", codigo), &[]).await
    }

    pub async fn excluir_automacao(&self, codigo: &str) -> Result<(), AppError> {
        self.delete(&format!("/automacao/{}", codigo)).await?;
        info!("Registro de automação {} removido", codigo);
        Ok(())
    }

    /// Busca o registro da automação e devolve uma cópia pronta para edição.
    pub async fn importar_da_automacao(&self, codigo: &str) -> Result<Imovel, AppError> {
        let origem = self.get_automacao_por_codigo(codigo).await?;
        let imovel = Imovel::copiar_de_automacao(&origem);
        info!("Automação {} copiada para o imóvel {}", codigo, imovel.codigo);
        Ok(imovel)
    }
}
