use super::client::ApiClient;
use super::traits::EnvioImagem;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info};

fn tipo_mime(nome_arquivo: &str) -> &'static str {
    let extensao = nome_arquivo
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    match extensao.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

/// URL pública na resposta do upload (`url`, `location` ou string pura).
fn extrair_url(valor: &Value) -> Option<String> {
    match valor {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(mapa) => ["url", "location", "fileUrl"]
            .iter()
            .find_map(|k| mapa.get(*k).and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}

#[async_trait]
impl EnvioImagem for ApiClient {
    async fn enviar_imagem(
        &self,
        conteudo: Vec<u8>,
        diretorio: &str,
        nome_arquivo: &str,
    ) -> Result<String, AppError> {
        debug!("Enviando {} ({} bytes) para {}", nome_arquivo, conteudo.len(), diretorio);

        let arquivo = Part::bytes(conteudo)
            .file_name(nome_arquivo.to_string())
            .mime_str(tipo_mime(nome_arquivo))?;
        let form = Form::new()
            .text("directory", diretorio.to_string())
            .text("filename", nome_arquivo.to_string())
            .part("file", arquivo);

        let valor = self
            .enviar(self.request(Method::POST, "/admin/upload").multipart(form))
            .await?;
        let url = extrair_url(&valor)
            .ok_or_else(|| AppError::RespostaInvalida("upload sem URL na resposta".into()))?;

        info!("Imagem enviada: {}", url);
        Ok(url)
    }
}
