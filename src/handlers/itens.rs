// src/handlers/itens.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    middleware::includes::Includes,
    models::venda::{AtualizaItemVenda, ItemKey, ItemVenda, NovoItemVenda},
    services::CrudService,
};

// ---
// Itens de venda: o mesmo contrato de CRUD, sempre escopado pela venda da rota.
// ---

/// Grava o id da venda (vindo da rota) no corpo e só então desserializa.
///
/// Qualquer `venda_id` mandado pelo cliente é sobrescrito, mesmo que nem
/// seja um UUID válido.
pub(crate) fn inject_owner(
    mut body: Map<String, Value>,
    venda_id: Uuid,
) -> Result<NovoItemVenda, AppError> {
    body.insert("venda_id".to_string(), Value::String(venda_id.to_string()));

    serde_json::from_value(Value::Object(body))
        .map_err(|e| AppError::InvalidPayload(e.to_string()))
}

// POST /vendas/{id}/itens
pub async fn create_item(
    State(service): State<CrudService<ItemVenda>>,
    Path(venda_id): Path<Uuid>,
    Json(body): Json<Map<String, Value>>,
) -> Result<StatusCode, AppError> {
    let payload = inject_owner(body, venda_id)?;

    service.create(payload).await?;
    Ok(StatusCode::CREATED)
}

// GET /vendas/{id}/itens
pub async fn retrieve_all_items(
    State(service): State<CrudService<ItemVenda>>,
    Path(venda_id): Path<Uuid>,
    includes: Includes,
) -> Result<impl IntoResponse, AppError> {
    let itens = service.retrieve_all(&venda_id, &includes).await?;
    Ok((StatusCode::OK, Json(itens)))
}

// GET /vendas/{id}/itens/{item_id}
pub async fn retrieve_one_item(
    State(service): State<CrudService<ItemVenda>>,
    Path(key): Path<ItemKey>,
    includes: Includes,
) -> Result<impl IntoResponse, AppError> {
    let item = service.retrieve_one(&key, &includes).await?;
    Ok((StatusCode::OK, Json(item)))
}

// PATCH /vendas/{id}/itens/{item_id}
pub async fn update_item(
    State(service): State<CrudService<ItemVenda>>,
    Path(key): Path<ItemKey>,
    Json(payload): Json<AtualizaItemVenda>,
) -> Result<StatusCode, AppError> {
    service.update(&key, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /vendas/{id}/itens/{item_id}
pub async fn delete_item(
    State(service): State<CrudService<ItemVenda>>,
    Path(key): Path<ItemKey>,
) -> Result<StatusCode, AppError> {
    service.delete(&key).await?;
    Ok(StatusCode::NO_CONTENT)
}
