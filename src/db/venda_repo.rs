// src/db/venda_repo.rs

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
    models::venda::{AtualizaVenda, NovaVenda, Venda},
};

// Itens embutidos na mesma consulta, já em ordem de num_item.
const ITENS_SUBSELECT: &str = r#"
    COALESCE(
        (SELECT json_agg(i ORDER BY i.num_item ASC)
           FROM itens_venda i
          WHERE i.venda_id = v.id),
        '[]'::json
    ) AS itens"#;

/// SELECT de vendas com as colunas de relação pedidas.
fn select_vendas(includes: &Includes) -> String {
    let mut sql = String::from("SELECT v.id, v.data_hora, v.cliente");
    if includes.contains("itens") {
        sql.push(',');
        sql.push_str(ITENS_SUBSELECT);
    }
    sql.push_str(" FROM vendas v");
    sql
}

#[derive(Clone)]
pub struct VendaRepository {
    pool: PgPool,
}

impl VendaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Venda> for VendaRepository {
    async fn create(&self, data: NovaVenda) -> Result<Venda, AppError> {
        sqlx::query_as::<_, Venda>(
            r#"
            INSERT INTO vendas (data_hora, cliente)
            VALUES (COALESCE($1, now()), $2)
            RETURNING id, data_hora, cliente
            "#,
        )
        .bind(data.data_hora)
        .bind(data.cliente)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
    }

    async fn find_many(&self, _scope: &(), includes: &Includes) -> Result<Vec<Venda>, AppError> {
        let sql = format!("{} ORDER BY v.data_hora ASC", select_vendas(includes));

        sqlx::query_as::<_, Venda>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }

    async fn find_one(&self, id: &Uuid, includes: &Includes) -> Result<Option<Venda>, AppError> {
        let sql = format!("{} WHERE v.id = $1", select_vendas(includes));

        sqlx::query_as::<_, Venda>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    // `cliente` presente (mesmo `null`) substitui o valor; ausente mantém.
    async fn update(&self, id: &Uuid, data: AtualizaVenda) -> Result<Venda, AppError> {
        let row = sqlx::query_as::<_, Venda>(
            r#"
            UPDATE vendas
               SET data_hora = COALESCE($2, data_hora),
                   cliente   = CASE WHEN $3 THEN $4::text ELSE cliente END
             WHERE id = $1
            RETURNING id, data_hora, cliente
            "#,
        )
        .bind(id)
        .bind(data.data_hora)
        .bind(data.cliente.is_some())
        .bind(data.cliente.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        require_row(row)
    }

    // Os itens saem junto (ON DELETE CASCADE na FK).
    async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vendas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;

        require_affected(result.rows_affected())
    }
}
