// src/db/repository.rs

use async_trait::async_trait;

use crate::{common::error::AppError, middleware::includes::Includes, models::Entity};

/// Operações de armazenamento que toda entidade implementa.
///
/// Cada método é uma única ida ao banco. Ausência de registro numa
/// operação por chave vira `AppError::NotFound`; em `find_one` ela é `None`.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn create(&self, data: E::Create) -> Result<E, AppError>;

    /// Lista em ordem fixa, embutindo as relações pedidas.
    async fn find_many(&self, scope: &E::Scope, includes: &Includes) -> Result<Vec<E>, AppError>;

    async fn find_one(&self, key: &E::Key, includes: &Includes) -> Result<Option<E>, AppError>;

    async fn update(&self, key: &E::Key, data: E::Update) -> Result<E, AppError>;

    async fn delete(&self, key: &E::Key) -> Result<(), AppError>;
}
