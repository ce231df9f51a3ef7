// src/db/item_venda_repo.rs

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
    models::venda::{AtualizaItemVenda, ItemKey, ItemVenda, NovoItemVenda},
};

const COLUMNS: &str = "id, venda_id, num_item, produto, qtd, valor_unit, categoria_id";

/// SELECT de itens com as relações pedidas como sub-selects correlacionados.
fn select_itens(includes: &Includes) -> String {
    let mut sql = String::from(
        "SELECT i.id, i.venda_id, i.num_item, i.produto, i.qtd, i.valor_unit, i.categoria_id",
    );
    if includes.contains("venda") {
        sql.push_str(
            ", (SELECT row_to_json(v) FROM (SELECT id, data_hora, cliente FROM vendas \
             WHERE id = i.venda_id) v) AS venda",
        );
    }
    if includes.contains("categoria") {
        sql.push_str(
            ", (SELECT row_to_json(c) FROM (SELECT id, descricao FROM categorias \
             WHERE id = i.categoria_id) c) AS categoria",
        );
    }
    sql.push_str(" FROM itens_venda i");
    sql
}

#[derive(Clone)]
pub struct ItemVendaRepository {
    pool: PgPool,
}

impl ItemVendaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<ItemVenda> for ItemVendaRepository {
    async fn create(&self, data: NovoItemVenda) -> Result<ItemVenda, AppError> {
        // num_item ausente: próximo da venda, calculado no próprio INSERT.
        // Duas inserções simultâneas esbarram no UNIQUE(venda_id, num_item).
        let sql = format!(
            r#"
            INSERT INTO itens_venda (venda_id, num_item, produto, qtd, valor_unit, categoria_id)
            VALUES (
                $1,
                COALESCE($2, (SELECT COALESCE(MAX(num_item), 0) + 1
                                FROM itens_venda WHERE venda_id = $1)),
                $3, $4, $5, $6
            )
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, ItemVenda>(&sql)
            .bind(data.venda_id)
            .bind(data.num_item)
            .bind(data.produto)
            .bind(data.qtd)
            .bind(data.valor_unit)
            .bind(data.categoria_id)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)
    }

    async fn find_many(&self, venda_id: &Uuid, includes: &Includes) -> Result<Vec<ItemVenda>, AppError> {
        let sql = format!(
            "{} WHERE i.venda_id = $1 ORDER BY i.num_item ASC",
            select_itens(includes)
        );

        sqlx::query_as::<_, ItemVenda>(&sql)
            .bind(venda_id)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }

    // Casamento duplo: o item só aparece pela rota da própria venda.
    async fn find_one(&self, key: &ItemKey, includes: &Includes) -> Result<Option<ItemVenda>, AppError> {
        let sql = format!(
            "{} WHERE i.id = $1 AND i.venda_id = $2",
            select_itens(includes)
        );

        sqlx::query_as::<_, ItemVenda>(&sql)
            .bind(key.item_id)
            .bind(key.venda_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    // Anuláveis: presente (mesmo `null`) substitui, ausente mantém.
    async fn update(&self, key: &ItemKey, data: AtualizaItemVenda) -> Result<ItemVenda, AppError> {
        let sql = format!(
            r#"
            UPDATE itens_venda
               SET num_item     = COALESCE($3, num_item),
                   produto      = COALESCE($4, produto),
                   qtd          = COALESCE($5, qtd),
                   valor_unit   = CASE WHEN $6 THEN $7::numeric ELSE valor_unit END,
                   categoria_id = CASE WHEN $8 THEN $9::uuid ELSE categoria_id END
             WHERE id = $1 AND venda_id = $2
            RETURNING {COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ItemVenda>(&sql)
            .bind(key.item_id)
            .bind(key.venda_id)
            .bind(data.num_item)
            .bind(data.produto)
            .bind(data.qtd)
            .bind(data.valor_unit.is_some())
            .bind(data.valor_unit.flatten())
            .bind(data.categoria_id.is_some())
            .bind(data.categoria_id.flatten())
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?;

        require_row(row)
    }

    async fn delete(&self, key: &ItemKey) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM itens_venda WHERE id = $1 AND venda_id = $2")
            .bind(key.item_id)
            .bind(key.venda_id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;

        require_affected(result.rows_affected())
    }
}
