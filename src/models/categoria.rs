// src/models/categoria.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Entity;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Categoria {
    pub id: Uuid,
    pub descricao: String,
}

#[derive(Debug, Deserialize)]
pub struct NovaCategoria {
    pub descricao: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AtualizaCategoria {
    pub descricao: Option<String>,
}

impl Entity for Categoria {
    const NAME: &'static str = "categoria";
    const RELATIONS: &'static [&'static str] = &[];

    type Create = NovaCategoria;
    type Update = AtualizaCategoria;
    type Key = Uuid;
    type Scope = ();
}
