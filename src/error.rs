use thiserror::Error;

/// Mensagem genérica exibida para qualquer falha de transporte.
pub const MENSAGEM_ERRO_CONEXAO: &str = "Erro de conexão. Tente novamente mais tarde.";

#[derive(Debug, Error)]
pub enum AppError {
    /// Falha de rede: conexão recusada, timeout, DNS.
    #[error("Erro de conexão: {0}")]
    Conexao(String),

    /// Erro reportado pelo backend (validação ou regra de negócio).
    #[error("{mensagem}")]
    Backend { status: Option<u16>, mensagem: String },

    #[error("Erro de validação")]
    Validacao(#[from] validator::ValidationErrors),

    #[error("Resposta inválida do servidor: {0}")]
    RespostaInvalida(String),

    #[error("Foto não encontrada: {0}")]
    FotoNaoEncontrada(String),

    #[error("Sessão não autenticada")]
    NaoAutenticado,

    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Erro interno: {0}")]
    Interno(#[from] anyhow::Error),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return AppError::RespostaInvalida(err.to_string());
        }
        if let Some(status) = err.status() {
            return AppError::Backend {
                status: Some(status.as_u16()),
                mensagem: err.to_string(),
            };
        }
        // connect, timeout, request: tudo vira erro de conexão
        AppError::Conexao(err.to_string())
    }
}

impl AppError {
    pub fn backend(mensagem: impl Into<String>) -> Self {
        AppError::Backend {
            status: None,
            mensagem: mensagem.into(),
        }
    }

    /// Texto do banner exibido ao usuário.
    pub fn mensagem_usuario(&self) -> String {
        match self {
            AppError::Conexao(_) => MENSAGEM_ERRO_CONEXAO.to_string(),
            AppError::Backend { mensagem, .. } => mensagem.clone(),
            AppError::Validacao(errors) => {
                let mut mensagens: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(campo, erros)| {
                        erros.iter().map(move |e| match &e.message {
                            Some(m) => m.to_string(),
                            None => format!("Campo inválido: {}", campo),
                        })
                    })
                    .collect();
                mensagens.sort();
                mensagens.dedup();
                if mensagens.is_empty() {
                    "Um ou mais campos são inválidos.".to_string()
                } else {
                    mensagens.join(" ")
                }
            }
            AppError::FotoNaoEncontrada(_) => "Foto não encontrada.".to_string(),
            AppError::NaoAutenticado => "Faça login para continuar.".to_string(),
            outro => {
                tracing::error!("Erro inesperado: {}", outro);
                "Ocorreu um erro inesperado.".to_string()
            }
        }
    }

    pub fn is_validacao(&self) -> bool {
        matches!(self, AppError::Validacao(_))
    }
}
