// src/db/memory_repo.rs
//
// Backend em memória usado pelos testes. Segue as mesmas regras do schema
// Postgres: ordenação das listagens, FKs, UNIQUE, CHECK (qtd > 0), cascade de
// itens e a ordem das verificações (linha inexistente é 404 antes de qualquer
// restrição).

use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::Repository,
    middleware::includes::Includes,
    models::{
        categoria::{AtualizaCategoria, Categoria, NovaCategoria},
        venda::{AtualizaItemVenda, AtualizaVenda, ItemKey, ItemVenda, NovaVenda, NovoItemVenda, Venda},
    },
};

#[derive(Default)]
struct Tables {
    categorias: Vec<Categoria>,
    vendas: Vec<Venda>,
    itens: Vec<ItemVenda>,
}

impl Tables {
    fn itens_da_venda(&self, venda_id: Uuid) -> Vec<ItemVenda> {
        let mut itens: Vec<ItemVenda> = self
            .itens
            .iter()
            .filter(|i| i.venda_id == venda_id)
            .cloned()
            .collect();
        itens.sort_by_key(|i| i.num_item);
        itens
    }

    fn venda_com_relacoes(&self, venda: &Venda, includes: &Includes) -> Venda {
        let mut venda = venda.clone();
        if includes.contains("itens") {
            venda.itens = Some(Json(self.itens_da_venda(venda.id)));
        }
        venda
    }

    fn item_com_relacoes(&self, item: &ItemVenda, includes: &Includes) -> ItemVenda {
        let mut item = item.clone();
        if includes.contains("venda") {
            item.venda = self
                .vendas
                .iter()
                .find(|v| v.id == item.venda_id)
                .cloned()
                .map(Json);
        }
        if includes.contains("categoria") {
            item.categoria = item
                .categoria_id
                .and_then(|id| self.categorias.iter().find(|c| c.id == id).cloned())
                .map(Json);
        }
        item
    }

    fn check_categoria(&self, categoria_id: Option<Uuid>) -> Result<(), AppError> {
        match categoria_id {
            Some(id) if !self.categorias.iter().any(|c| c.id == id) => Err(AppError::Conflict(
                "itens_venda_categoria_id_fkey".into(),
            )),
            _ => Ok(()),
        }
    }

    // UNIQUE (venda_id, num_item); `proprio` é o item sendo atualizado.
    fn check_num_item(&self, venda_id: Uuid, num_item: i32, proprio: Option<Uuid>) -> Result<(), AppError> {
        let ocupado = self
            .itens
            .iter()
            .any(|i| i.venda_id == venda_id && i.num_item == num_item && Some(i.id) != proprio);
        if ocupado {
            return Err(AppError::Conflict("itens_venda_venda_id_num_item_key".into()));
        }
        Ok(())
    }

    // MAX(num_item) + 1, estourando como o `integer` do Postgres.
    fn proximo_num_item(&self, venda_id: Uuid) -> Result<i32, AppError> {
        self.itens
            .iter()
            .filter(|i| i.venda_id == venda_id)
            .map(|i| i.num_item)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| AppError::InvalidData("integer out of range".into()))
    }
}

// CHECK (qtd > 0)
fn check_qtd(qtd: i32) -> Result<(), AppError> {
    if qtd <= 0 {
        return Err(AppError::InvalidData("itens_venda_qtd_check".into()));
    }
    Ok(())
}

/// Um único armazenamento que faz o papel dos três repositórios.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    broken: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A partir daqui toda operação falha como se o banco estivesse fora.
    pub fn break_storage(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut));
        }
        Ok(self.tables.lock().unwrap())
    }

    pub fn itens(&self) -> Vec<ItemVenda> {
        self.tables.lock().unwrap().itens.clone()
    }
}

#[async_trait]
impl Repository<Categoria> for MemoryStore {
    async fn create(&self, data: NovaCategoria) -> Result<Categoria, AppError> {
        let mut tables = self.lock()?;
        if tables.categorias.iter().any(|c| c.descricao == data.descricao) {
            return Err(AppError::Conflict("categorias_descricao_key".into()));
        }
        let categoria = Categoria {
            id: Uuid::new_v4(),
            descricao: data.descricao,
        };
        tables.categorias.push(categoria.clone());
        Ok(categoria)
    }

    async fn find_many(&self, _scope: &(), _includes: &Includes) -> Result<Vec<Categoria>, AppError> {
        let mut categorias = self.lock()?.categorias.clone();
        categorias.sort_by(|a, b| a.descricao.cmp(&b.descricao));
        Ok(categorias)
    }

    async fn find_one(&self, id: &Uuid, _includes: &Includes) -> Result<Option<Categoria>, AppError> {
        Ok(self.lock()?.categorias.iter().find(|c| c.id == *id).cloned())
    }

    async fn update(&self, id: &Uuid, data: AtualizaCategoria) -> Result<Categoria, AppError> {
        let mut tables = self.lock()?;
        let pos = tables
            .categorias
            .iter()
            .position(|c| c.id == *id)
            .ok_or(AppError::NotFound)?;
        if let Some(descricao) = data.descricao {
            if tables.categorias.iter().any(|c| c.id != *id && c.descricao == descricao) {
                return Err(AppError::Conflict("categorias_descricao_key".into()));
            }
            tables.categorias[pos].descricao = descricao;
        }
        Ok(tables.categorias[pos].clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        let mut tables = self.lock()?;
        let before = tables.categorias.len();
        tables.categorias.retain(|c| c.id != *id);
        if tables.categorias.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl Repository<Venda> for MemoryStore {
    async fn create(&self, data: NovaVenda) -> Result<Venda, AppError> {
        let venda = Venda {
            id: Uuid::new_v4(),
            data_hora: data.data_hora.unwrap_or_else(Utc::now),
            cliente: data.cliente,
            itens: None,
        };
        self.lock()?.vendas.push(venda.clone());
        Ok(venda)
    }

    async fn find_many(&self, _scope: &(), includes: &Includes) -> Result<Vec<Venda>, AppError> {
        let tables = self.lock()?;
        let mut vendas: Vec<Venda> = tables
            .vendas
            .iter()
            .map(|v| tables.venda_com_relacoes(v, includes))
            .collect();
        vendas.sort_by_key(|v| v.data_hora);
        Ok(vendas)
    }

    async fn find_one(&self, id: &Uuid, includes: &Includes) -> Result<Option<Venda>, AppError> {
        let tables = self.lock()?;
        Ok(tables
            .vendas
            .iter()
            .find(|v| v.id == *id)
            .map(|v| tables.venda_com_relacoes(v, includes)))
    }

    async fn update(&self, id: &Uuid, data: AtualizaVenda) -> Result<Venda, AppError> {
        let mut tables = self.lock()?;
        let venda = tables
            .vendas
            .iter_mut()
            .find(|v| v.id == *id)
            .ok_or(AppError::NotFound)?;
        if let Some(data_hora) = data.data_hora {
            venda.data_hora = data_hora;
        }
        if let Some(cliente) = data.cliente {
            venda.cliente = cliente;
        }
        Ok(venda.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        let mut tables = self.lock()?;
        let before = tables.vendas.len();
        tables.vendas.retain(|v| v.id != *id);
        if tables.vendas.len() == before {
            return Err(AppError::NotFound);
        }
        tables.itens.retain(|i| i.venda_id != *id);
        Ok(())
    }
}

#[async_trait]
impl Repository<ItemVenda> for MemoryStore {
    async fn create(&self, data: NovoItemVenda) -> Result<ItemVenda, AppError> {
        let mut tables = self.lock()?;
        if !tables.vendas.iter().any(|v| v.id == data.venda_id) {
            return Err(AppError::Conflict("itens_venda_venda_id_fkey".into()));
        }
        tables.check_categoria(data.categoria_id)?;
        check_qtd(data.qtd)?;

        let num_item = match data.num_item {
            Some(num_item) => num_item,
            None => tables.proximo_num_item(data.venda_id)?,
        };
        tables.check_num_item(data.venda_id, num_item, None)?;

        let item = ItemVenda {
            id: Uuid::new_v4(),
            venda_id: data.venda_id,
            num_item,
            produto: data.produto,
            qtd: data.qtd,
            valor_unit: data.valor_unit,
            categoria_id: data.categoria_id,
            venda: None,
            categoria: None,
        };
        tables.itens.push(item.clone());
        Ok(item)
    }

    async fn find_many(&self, venda_id: &Uuid, includes: &Includes) -> Result<Vec<ItemVenda>, AppError> {
        let tables = self.lock()?;
        Ok(tables
            .itens_da_venda(*venda_id)
            .iter()
            .map(|i| tables.item_com_relacoes(i, includes))
            .collect())
    }

    async fn find_one(&self, key: &ItemKey, includes: &Includes) -> Result<Option<ItemVenda>, AppError> {
        let tables = self.lock()?;
        Ok(tables
            .itens
            .iter()
            .find(|i| i.id == key.item_id && i.venda_id == key.venda_id)
            .map(|i| tables.item_com_relacoes(i, includes)))
    }

    // Primeiro a linha (sem linha = 404, como o UPDATE ... WHERE), depois as restrições.
    async fn update(&self, key: &ItemKey, data: AtualizaItemVenda) -> Result<ItemVenda, AppError> {
        let mut tables = self.lock()?;
        let pos = tables
            .itens
            .iter()
            .position(|i| i.id == key.item_id && i.venda_id == key.venda_id)
            .ok_or(AppError::NotFound)?;

        let mut item = tables.itens[pos].clone();
        if let Some(num_item) = data.num_item {
            item.num_item = num_item;
        }
        if let Some(produto) = data.produto {
            item.produto = produto;
        }
        if let Some(qtd) = data.qtd {
            item.qtd = qtd;
        }
        if let Some(valor_unit) = data.valor_unit {
            item.valor_unit = valor_unit;
        }
        if let Some(categoria_id) = data.categoria_id {
            item.categoria_id = categoria_id;
        }

        tables.check_categoria(item.categoria_id)?;
        check_qtd(item.qtd)?;
        tables.check_num_item(item.venda_id, item.num_item, Some(item.id))?;

        tables.itens[pos] = item.clone();
        Ok(item)
    }

    async fn delete(&self, key: &ItemKey) -> Result<(), AppError> {
        let mut tables = self.lock()?;
        let before = tables.itens.len();
        tables
            .itens
            .retain(|i| !(i.id == key.item_id && i.venda_id == key.venda_id));
        if tables.itens.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
