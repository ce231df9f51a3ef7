// src/models/entity.rs

use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;

/// Descreve um tipo de entidade exposto pela API (categoria, venda, item).
///
/// Os handlers e o serviço de CRUD são escritos uma única vez, genéricos
/// sobre este trait. Cada entidade só informa os seus payloads, a forma da
/// sua chave e as relações que podem ser pedidas via `?include=`.
pub trait Entity: Serialize + Send + Sync + 'static {
    /// Nome usado em logs e mensagens de erro.
    const NAME: &'static str;

    /// Relações que podem ser embutidas na resposta.
    const RELATIONS: &'static [&'static str];

    /// Corpo aceito na criação.
    type Create: DeserializeOwned + Send + 'static;

    /// Corpo parcial aceito na atualização.
    type Update: DeserializeOwned + Send + 'static;

    /// Como um registro é encontrado (id simples ou chave composta).
    type Key: Debug + Send + Sync + 'static;

    /// Escopo de uma listagem (`()` para entidades de topo, o id do dono
    /// para entidades dependentes).
    type Scope: Debug + Send + Sync + 'static;
}
