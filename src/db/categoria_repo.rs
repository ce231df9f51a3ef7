// src/db/categoria_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{classify, require_affected, require_row},
        error::AppError,
    },
    db::Repository,
    middleware::includes::Includes,
    models::categoria::{AtualizaCategoria, Categoria, NovaCategoria},
};

#[derive(Clone)]
pub struct CategoriaRepository {
    pool: PgPool,
}

impl CategoriaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Categoria não tem relações, então `includes` já chega vazio aqui.
#[async_trait]
impl Repository<Categoria> for CategoriaRepository {
    async fn create(&self, data: NovaCategoria) -> Result<Categoria, AppError> {
        sqlx::query_as::<_, Categoria>(
            "INSERT INTO categorias (descricao) VALUES ($1) RETURNING id, descricao",
        )
        .bind(&data.descricao)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
    }

    async fn find_many(&self, _scope: &(), _includes: &Includes) -> Result<Vec<Categoria>, AppError> {
        sqlx::query_as::<_, Categoria>("SELECT id, descricao FROM categorias ORDER BY descricao ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }

    async fn find_one(&self, id: &Uuid, _includes: &Includes) -> Result<Option<Categoria>, AppError> {
        sqlx::query_as::<_, Categoria>("SELECT id, descricao FROM categorias WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    async fn update(&self, id: &Uuid, data: AtualizaCategoria) -> Result<Categoria, AppError> {
        let row = sqlx::query_as::<_, Categoria>(
            r#"
            UPDATE categorias
               SET descricao = COALESCE($2, descricao)
             WHERE id = $1
            RETURNING id, descricao
            "#,
        )
        .bind(id)
        .bind(data.descricao)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        require_row(row)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM categorias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;

        require_affected(result.rows_affected())
    }
}
