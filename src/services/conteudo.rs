use super::client::ApiClient;
use crate::error::AppError;
use crate::models::ConteudoSite;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::info;

impl ApiClient {
    pub async fn get_conteudo_site(&self) -> Result<ConteudoSite, AppError> {
        let valor: Value = self.get("/admin/content", &[]).await?;
        match valor {
            Value::Null => Ok(ConteudoSite::default()),
            outro => super::envelope::decodificar(outro),
        }
    }

    /// Atualiza uma seção do conteúdo do site (home, sobre, contato...).
    pub async fn atualizar_secao_conteudo(&self, secao: &str, valor: Value) -> Result<(), AppError> {
        let corpo = json!({ "section": secao, "content": valor });
        let _: Value = self.com_corpo(Method::PUT, "/admin/content", &corpo).await?;
        info!("Seção '{}' do site atualizada", secao);
        Ok(())
    }
}
