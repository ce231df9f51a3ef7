// src/services/crud_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::Repository,
    middleware::includes::Includes,
    models::Entity,
};

/// As cinco operações de CRUD, escritas uma vez para qualquer entidade.
///
/// O repositório chega pronto pelo construtor; o serviço não guarda estado
/// entre requisições.
pub struct CrudService<E: Entity> {
    repo: Arc<dyn Repository<E>>,
}

// Manual: o derive exigiria `E: Clone`.
impl<E: Entity> Clone for CrudService<E> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<E: Entity> CrudService<E> {
    pub fn new(repo: Arc<dyn Repository<E>>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, data: E::Create) -> Result<E, AppError> {
        self.repo.create(data).await
    }

    fn check_includes(&self, includes: &Includes) -> Result<(), AppError> {
        includes.ensure_known(E::NAME, E::RELATIONS)?;
        if !includes.is_empty() {
            tracing::debug!(entity = E::NAME, ?includes, "embutindo relações");
        }
        Ok(())
    }

    // Lista vazia é sucesso.
    pub async fn retrieve_all(&self, scope: &E::Scope, includes: &Includes) -> Result<Vec<E>, AppError> {
        self.check_includes(includes)?;
        self.repo.find_many(scope, includes).await
    }

    pub async fn retrieve_one(&self, key: &E::Key, includes: &Includes) -> Result<E, AppError> {
        self.check_includes(includes)?;
        self.repo
            .find_one(key, includes)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn update(&self, key: &E::Key, data: E::Update) -> Result<E, AppError> {
        self.repo.update(key, data).await
    }

    pub async fn delete(&self, key: &E::Key) -> Result<(), AppError> {
        self.repo.delete(key).await
    }
}
