use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Erros de configuração são fatais para o cálculo corrente: o chamador
// precisa receber detalhe suficiente para corrigir a configuração.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("As listas da seção '{section}' têm tamanhos diferentes: {detail}")]
    ConfigLengthMismatch {
        section: &'static str,
        detail: String,
    },

    #[error("Item obrigatório '{0}' não encontrado na configuração")]
    PersonnelItemMissing(String),

    #[error("Valor negativo em '{field}' ({row})")]
    NegativeValue { field: &'static str, row: String },

    #[error("Descrição de item duplicada: '{0}'")]
    DuplicateItem(String),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    // Variante genérica para qualquer outro erro inesperado
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            // Erros de configuração: a mensagem do próprio erro já diz o que corrigir.
            ref e @ (AppError::ConfigLengthMismatch { .. }
            | AppError::PersonnelItemMissing(_)
            | AppError::NegativeValue { .. }
            | AppError::DuplicateItem(_)) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),

            // Todos os outros erros viram 500.
            // O `tracing` vai logar a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
