// src/common/db_utils.rs

use sqlx::error::ErrorKind;

use crate::common::error::AppError;

// ---
// Classificação das falhas do Postgres
// ---
/// Converte um erro do sqlx no `AppError` correspondente.
///
/// Violações de integridade e dados inválidos viram erros do cliente (409/400); o resto
/// continua sendo `DatabaseError` (500).
pub(crate) fn classify(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        let detail = match db_err.constraint() {
            Some(constraint) => format!("{} ({})", db_err.message(), constraint),
            None => db_err.message().to_string(),
        };

        match db_err.kind() {
            ErrorKind::UniqueViolation | ErrorKind::ForeignKeyViolation => {
                return AppError::Conflict(detail);
            }
            ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                return AppError::InvalidData(detail);
            }
            _ => {}
        }

        // Classe 22 (data exception): valor fora de faixa, overflow etc.
        if is_data_exception(db_err.code().as_deref()) {
            return AppError::InvalidData(detail);
        }
    }
    AppError::DatabaseError(e)
}

fn is_data_exception(sqlstate: Option<&str>) -> bool {
    sqlstate.is_some_and(|code| code.starts_with("22"))
}

/// Resultado de um UPDATE/DELETE por chave: nenhuma linha = não encontrado.
pub(crate) fn require_row<T>(row: Option<T>) -> Result<T, AppError> {
    row.ok_or(AppError::NotFound)
}

/// Mesma regra para comandos que só devolvem `rows_affected`.
pub(crate) fn require_affected(rows_affected: u64) -> Result<(), AppError> {
    if rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}
