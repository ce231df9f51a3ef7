// src/middleware/includes.rs

use std::collections::{BTreeMap, HashMap};

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Serialize;

use crate::common::error::AppError;

const INCLUDE_PARAM: &str = "include";

/// Relações pedidas em `?include=a,b,c`, cada uma mapeada para `true`.
///
/// Só contém o que foi pedido explicitamente; nenhuma relação é carregada
/// por padrão. Os nomes não passam por trim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Includes(BTreeMap<String, bool>);

impl Includes {
    /// Monta a diretiva a partir dos parâmetros da query string.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        match params.get(INCLUDE_PARAM) {
            Some(raw) => Self::parse(raw),
            None => Self::default(),
        }
    }

    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::default();
        }
        Self(raw.split(',').map(|rel| (rel.to_string(), true)).collect())
    }

    pub fn contains(&self, relation: &str) -> bool {
        self.0.contains_key(relation)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn relations(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Rejeita relações que a entidade não tem, antes de tocar no banco.
    pub fn ensure_known(&self, entity: &'static str, known: &[&str]) -> Result<(), AppError> {
        match self.relations().find(|rel| !known.contains(rel)) {
            Some(unknown) => Err(AppError::UnknownRelation {
                entity,
                relation: unknown.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl<S> FromRequestParts<S> for Includes
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map_err(|rejection| AppError::InvalidQuery(rejection.body_text()))?;

        Ok(Includes::from_query(&params))
    }
}
