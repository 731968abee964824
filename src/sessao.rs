//! Sessão do administrador e imóvel selecionado no momento.

use crate::models::Imovel;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const ROTA_LOGIN: &str = "/admin/login";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usuario {
    pub id: String,
    pub nome: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EstadoAutenticacao {
    Autenticado(Usuario),
    #[default]
    Anonimo,
}

impl EstadoAutenticacao {
    pub fn usuario(&self) -> Option<&Usuario> {
        match self {
            EstadoAutenticacao::Autenticado(usuario) => Some(usuario),
            EstadoAutenticacao::Anonimo => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acesso<'a> {
    Permitido(&'a Usuario),
    Redirecionar(&'static str),
}

/// Rotas de `/admin` exigem usuário autenticado.
pub fn guarda_admin(estado: &EstadoAutenticacao) -> Acesso<'_> {
    match estado.usuario() {
        Some(usuario) => Acesso::Permitido(usuario),
        None => {
            debug!("Acesso anônimo à área administrativa, redirecionando");
            Acesso::Redirecionar(ROTA_LOGIN)
        }
    }
}

/// Imóvel aberto na tela de edição.
///
/// Preenchido ao entrar na página do imóvel e limpo ao sair, para que a
/// próxima tela nunca veja dados de outro registro.
#[derive(Debug, Default)]
pub struct ContextoImovel {
    atual: Option<Imovel>,
}

impl ContextoImovel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entrar(&mut self, imovel: Imovel) {
        info!("Editando imóvel {}", imovel.codigo);
        self.atual = Some(imovel);
    }

    pub fn sair(&mut self) -> Option<Imovel> {
        let anterior = self.atual.take();
        if let Some(imovel) = &anterior {
            debug!("Saindo do imóvel {}", imovel.codigo);
        }
        anterior
    }

    pub fn atual(&self) -> Option<&Imovel> {
        self.atual.as_ref()
    }

    pub fn atual_mut(&mut self) -> Option<&mut Imovel> {
        self.atual.as_mut()
    }
}
