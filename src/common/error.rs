// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Todas as falhas que um handler pode devolver. O `IntoResponse` abaixo é o
// único lugar que decide o status HTTP de uma falha.
#[derive(Debug, Error)]
pub enum AppError {
    // O storage não achou o registro da chave pedida
    #[error("Registro não encontrado")]
    NotFound,

    #[error("Relação '{relation}' não existe em {entity}")]
    UnknownRelation {
        entity: &'static str,
        relation: String,
    },

    #[error("Query string inválida: {0}")]
    InvalidQuery(String),

    #[error("Corpo da requisição inválido: {0}")]
    InvalidPayload(String),

    // NOT NULL / CHECK rejeitados pelo banco
    #[error("Dados rejeitados pelo banco: {0}")]
    InvalidData(String),

    // UNIQUE / FOREIGN KEY
    #[error("Conflito de integridade: {0}")]
    Conflict(String),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            // Não encontrado não é falha do servidor: 404 sem corpo e sem log.
            AppError::NotFound => return StatusCode::NOT_FOUND.into_response(),

            AppError::UnknownRelation { .. } => {
                tracing::warn!("{}", self);
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }

            AppError::InvalidQuery(detail)
            | AppError::InvalidPayload(detail)
            | AppError::InvalidData(detail) => {
                tracing::warn!("{}", self);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": "Requisição inválida.", "detail": detail }),
                )
            }

            AppError::Conflict(detail) => {
                tracing::warn!("{}", self);
                (
                    StatusCode::CONFLICT,
                    json!({ "error": "Violação de integridade.", "detail": detail }),
                )
            }

            AppError::DatabaseError(e) => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Ocorreu um erro inesperado.", "detail": e.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
