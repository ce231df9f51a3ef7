// src/handlers/crud.rs

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::includes::Includes,
    models::Entity,
    services::CrudService,
};

// ---
// Handlers genéricos das entidades de topo (categorias, vendas).
// Registrados no Router como `create::<Venda>`, `retrieve_all::<Categoria>` etc.
// ---

// POST /{entidade} -> 201 sem corpo
pub async fn create<E>(
    State(service): State<CrudService<E>>,
    Json(payload): Json<E::Create>,
) -> Result<StatusCode, AppError>
where
    E: Entity<Key = Uuid, Scope = ()>,
    CrudService<E>: FromRef<AppState>,
{
    service.create(payload).await?;
    Ok(StatusCode::CREATED)
}

// GET /{entidade}?include=... -> 200 com a lista ordenada
pub async fn retrieve_all<E>(
    State(service): State<CrudService<E>>,
    includes: Includes,
) -> Result<impl IntoResponse, AppError>
where
    E: Entity<Key = Uuid, Scope = ()>,
    CrudService<E>: FromRef<AppState>,
{
    let result = service.retrieve_all(&(), &includes).await?;
    Ok((StatusCode::OK, Json(result)))
}

// GET /{entidade}/{id}?include=... -> 200 ou 404
pub async fn retrieve_one<E>(
    State(service): State<CrudService<E>>,
    Path(id): Path<Uuid>,
    includes: Includes,
) -> Result<impl IntoResponse, AppError>
where
    E: Entity<Key = Uuid, Scope = ()>,
    CrudService<E>: FromRef<AppState>,
{
    let result = service.retrieve_one(&id, &includes).await?;
    Ok((StatusCode::OK, Json(result)))
}

// PATCH /{entidade}/{id} -> 204 ou 404
pub async fn update<E>(
    State(service): State<CrudService<E>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<E::Update>,
) -> Result<StatusCode, AppError>
where
    E: Entity<Key = Uuid, Scope = ()>,
    CrudService<E>: FromRef<AppState>,
{
    service.update(&id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /{entidade}/{id} -> 204 ou 404
pub async fn delete<E>(
    State(service): State<CrudService<E>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError>
where
    E: Entity<Key = Uuid, Scope = ()>,
    CrudService<E>: FromRef<AppState>,
{
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
