use serde::{Deserialize, Serialize};
use validator::Validate;

/// Corretor da imobiliária
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Default)]
pub struct Corretor {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[validate(length(min = 1, message = "O nome do corretor é obrigatório."))]
    pub nome: String,

    #[validate(email(message = "E-mail inválido."))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default)]
    pub telefone: String,

    #[serde(default)]
    pub creci: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foto: Option<String>,

    #[serde(default = "ativo_padrao")]
    pub ativo: bool,
}

fn ativo_padrao() -> bool {
    true
}
