use super::client::ApiClient;
use crate::error::AppError;
use crate::models::Corretor;
use reqwest::Method;
use serde_json::Value;
use tracing::info;
use validator::Validate;

impl ApiClient {
    pub async fn get_corretores(&self) -> Result<Vec<Corretor>, AppError> {
        let valor: Value = self.get("/admin/corretores", &[]).await?;
        // a listagem às vezes vem paginada em `data`
        let lista = match valor {
            Value::Object(mut mapa) => mapa.remove("data").unwrap_or(Value::Array(Vec::new())),
            outro => outro,
        };
        super::envelope::decodificar(lista)
    }

    pub async fn get_corretor_por_id(&self, id: &str) -> Result<Corretor, AppError> {
        self.get(&format!("/admin/corretores/{}", id), &[]).await
    }

    pub async fn criar_corretor(&self, corretor: &Corretor) -> Result<Corretor, AppError> {
        corretor.validate()?;
        let criado = self
            .com_corpo(Method::POST, "/admin/corretores", corretor)
            .await?;
        info!("Corretor '{}' criado", corretor.nome);
        Ok(criado)
    }

    pub async fn atualizar_corretor(&self, id: &str, corretor: &Corretor) -> Result<Corretor, AppError> {
        corretor.validate()?;
        let atualizado = self
            .com_corpo(Method::PUT, &format!("/admin/corretores/{}", id), corretor)
            .await?;
        info!("Corretor {} atualizado", id);
        Ok(atualizado)
    }

    pub async fn excluir_corretor(&self, id: &str) -> Result<(), AppError> {
        self.delete(&format!("/admin/corretores/{}", id)).await?;
        info!("Corretor {} excluído", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn criar_corretor_invalido_nao_chega_ao_backend() {
        // sem servidor nesse endereço: só um erro de validação prova que não houve requisição
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let corretor = Corretor::default();
        let resultado = client.criar_corretor(&corretor).await;
        assert!(matches!(resultado, Err(AppError::Validacao(_))));
    }
}
