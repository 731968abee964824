use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

const MENSAGEM_PADRAO: &str = "Erro ao processar a requisição.";

/// Formato entregue à interface: `{success, data}` ou `{success, message}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Resposta<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> From<Result<T, AppError>> for Resposta<T> {
    fn from(resultado: Result<T, AppError>) -> Self {
        match resultado {
            Ok(data) => Resposta {
                success: true,
                data: Some(data),
                message: None,
            },
            Err(e) => Resposta {
                success: false,
                data: None,
                message: Some(e.mensagem_usuario()),
            },
        }
    }
}

fn extrair_mensagem(corpo: &Value) -> Option<String> {
    match corpo {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(mapa) => ["message", "mensagem", "error"]
            .iter()
            .find_map(|k| mapa.get(*k).and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}

/// Retira os campos de controle do envelope.
///
/// Se sobrar só `data`, devolve o conteúdo dele; se houver outros campos
/// (ex.: `pagination`), devolve o objeto sem os campos de controle.
fn conteudo(mut mapa: serde_json::Map<String, Value>) -> Value {
    for controle in ["success", "status", "message", "mensagem"] {
        mapa.remove(controle);
    }
    if mapa.len() == 1 && mapa.contains_key("data") {
        return mapa.remove("data").unwrap_or(Value::Null);
    }
    Value::Object(mapa)
}

fn status_de_erro(status: &Value) -> bool {
    match status {
        Value::Number(n) => n.as_u64().map_or(false, |s| s >= 400),
        Value::String(s) => matches!(s.to_lowercase().as_str(), "error" | "erro" | "fail"),
        Value::Bool(b) => !b,
        _ => false,
    }
}

/// Converte a resposta do backend para `Result`.
///
/// Aceita os dois envelopes usados pela API (`{success, message}` e
/// `{status, data}`) e respostas sem envelope.
pub fn normalizar_envelope(status_http: u16, corpo: Value) -> Result<Value, AppError> {
    if !(200..300).contains(&status_http) {
        return Err(AppError::Backend {
            status: Some(status_http),
            mensagem: extrair_mensagem(&corpo).unwrap_or_else(|| MENSAGEM_PADRAO.to_string()),
        });
    }

    let mapa = match corpo {
        Value::Object(mapa) => mapa,
        outro => return Ok(outro),
    };

    if let Some(sucesso) = mapa.get("success").and_then(Value::as_bool) {
        if !sucesso {
            let mensagem = extrair_mensagem(&Value::Object(mapa))
                .unwrap_or_else(|| MENSAGEM_PADRAO.to_string());
            return Err(AppError::backend(mensagem));
        }
        return Ok(conteudo(mapa));
    }

    if mapa.contains_key("status") && mapa.contains_key("data") {
        if status_de_erro(&mapa["status"]) {
            let status = mapa["status"].as_u64().and_then(|s| u16::try_from(s).ok());
            let mensagem = extrair_mensagem(&Value::Object(mapa))
                .unwrap_or_else(|| MENSAGEM_PADRAO.to_string());
            return Err(AppError::Backend { status, mensagem });
        }
        return Ok(conteudo(mapa));
    }

    Ok(Value::Object(mapa))
}

pub fn decodificar<T: DeserializeOwned>(valor: Value) -> Result<T, AppError> {
    serde_json::from_value(valor).map_err(|e| AppError::RespostaInvalida(e.to_string()))
}
