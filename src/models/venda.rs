// src/models/venda.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{FromRow, types::Json};
use uuid::Uuid;

use super::{Entity, categoria::Categoria};

// --- 1. Venda (cabeçalho) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Venda {
    pub id: Uuid,
    pub data_hora: DateTime<Utc>,
    pub cliente: Option<String>,

    // Relação `itens`: só vem preenchida quando pedida em `?include=itens`
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itens: Option<Json<Vec<ItemVenda>>>,
}

#[derive(Debug, Deserialize)]
pub struct NovaVenda {
    // Se o cliente não mandar, o banco usa o instante da inserção
    pub data_hora: Option<DateTime<Utc>>,
    pub cliente: Option<String>,
}

// Campos anuláveis usam `Option<Option<_>>`: ausente = mantém, `null` = limpa.
#[derive(Debug, Default, Deserialize)]
pub struct AtualizaVenda {
    pub data_hora: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "nullable")]
    pub cliente: Option<Option<String>>,
}

impl Entity for Venda {
    const NAME: &'static str = "venda";
    const RELATIONS: &'static [&'static str] = &["itens"];

    type Create = NovaVenda;
    type Update = AtualizaVenda;
    type Key = Uuid;
    type Scope = ();
}

// --- 2. Item de venda ---
// Sempre pertence a exatamente uma venda (venda_id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct ItemVenda {
    pub id: Uuid,
    pub venda_id: Uuid,
    pub num_item: i32,
    pub produto: String,
    pub qtd: i32,
    pub valor_unit: Option<Decimal>,
    pub categoria_id: Option<Uuid>,

    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venda: Option<Json<Venda>>,

    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categoria: Option<Json<Categoria>>,
}

/// Corpo de criação de um item.
///
/// `venda_id` nunca vem do cliente: o handler grava o id da rota no corpo
/// antes de desserializar (ver `handlers::itens::inject_owner`).
#[derive(Debug, Deserialize)]
pub struct NovoItemVenda {
    pub venda_id: Uuid,
    // Ausente = próximo número livre dentro da venda
    pub num_item: Option<i32>,
    pub produto: String,
    pub qtd: i32,
    pub valor_unit: Option<Decimal>,
    pub categoria_id: Option<Uuid>,
}

// Sem `venda_id`: um item não pode trocar de venda.
#[derive(Debug, Default, Deserialize)]
pub struct AtualizaItemVenda {
    pub num_item: Option<i32>,
    pub produto: Option<String>,
    pub qtd: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub valor_unit: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub categoria_id: Option<Option<Uuid>>,
}

// Só é chamado quando o campo está presente no corpo, então `null` vira `Some(None)`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Chave composta de um item: só é encontrado pela rota da venda dona.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct ItemKey {
    #[serde(rename = "id")]
    pub venda_id: Uuid,
    pub item_id: Uuid,
}

impl Entity for ItemVenda {
    const NAME: &'static str = "item de venda";
    const RELATIONS: &'static [&'static str] = &["venda", "categoria"];

    type Create = NovoItemVenda;
    type Update = AtualizaItemVenda;
    type Key = ItemKey;
    // id da venda dona
    type Scope = Uuid;
}
