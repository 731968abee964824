use crate::error::AppError;
use crate::models::Imovel;
use async_trait::async_trait;

/// Operações de imóvel usadas pelo formulário.
/// Permite trocar o backend real por um duplo nos testes.
#[async_trait]
pub trait ImovelServico: Send + Sync {
    async fn get_imovel_por_codigo(&self, codigo: &str) -> Result<Imovel, AppError>;

    async fn criar_imovel(&self, imovel: &Imovel) -> Result<Imovel, AppError>;

    async fn atualizar_imovel(&self, codigo: &str, imovel: &Imovel) -> Result<Imovel, AppError>;

    async fn excluir_imovel(&self, codigo: &str) -> Result<(), AppError>;
}

/// Envio de arquivos de imagem; devolve a URL pública.
#[async_trait]
pub trait EnvioImagem: Send + Sync {
    async fn enviar_imagem(
        &self,
        conteudo: Vec<u8>,
        diretorio: &str,
        nome_arquivo: &str,
    ) -> Result<String, AppError>;
}
