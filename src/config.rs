// src/config.rs

use anyhow::Context;
use axum::extract::FromRef;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, sync::Arc, time::Duration};

use crate::{
    db::{CategoriaRepository, ItemVendaRepository, Repository, VendaRepository},
    models::{
        categoria::Categoria,
        venda::{ItemVenda, Venda},
    },
    services::CrudService,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

// Configuração lida do ambiente (e do .env, se existir)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let max_connections = parse_var("DATABASE_MAX_CONNECTIONS", 5)?;
        let acquire_timeout = Duration::from_secs(parse_var("DATABASE_ACQUIRE_TIMEOUT_SECS", 3)?);

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            acquire_timeout,
        })
    }

    pub async fn connect(&self) -> anyhow::Result<PgPool> {
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .connect(&self.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
        Ok(pool)
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_value(name, env::var(name).ok(), default)
}

// Variável ausente usa o padrão; valor inválido é erro de inicialização.
fn parse_value<T>(name: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{name} inválida: '{raw}'")),
        None => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub categoria_service: CrudService<Categoria>,
    pub venda_service: CrudService<Venda>,
    pub item_service: CrudService<ItemVenda>,
}

impl AppState {
    pub fn new(
        categorias: Arc<dyn Repository<Categoria>>,
        vendas: Arc<dyn Repository<Venda>>,
        itens: Arc<dyn Repository<ItemVenda>>,
    ) -> Self {
        Self {
            categoria_service: CrudService::new(categorias),
            venda_service: CrudService::new(vendas),
            item_service: CrudService::new(itens),
        }
    }

    // --- Monta o gráfico de dependências sobre o Postgres ---
    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(
            Arc::new(CategoriaRepository::new(pool.clone())),
            Arc::new(VendaRepository::new(pool.clone())),
            Arc::new(ItemVendaRepository::new(pool)),
        )
    }
}

// Permite que os handlers genéricos extraiam `State<CrudService<E>>`.
impl FromRef<AppState> for CrudService<Categoria> {
    fn from_ref(state: &AppState) -> Self {
        state.categoria_service.clone()
    }
}

impl FromRef<AppState> for CrudService<Venda> {
    fn from_ref(state: &AppState) -> Self {
        state.venda_service.clone()
    }
}

impl FromRef<AppState> for CrudService<ItemVenda> {
    fn from_ref(state: &AppState) -> Self {
        state.item_service.clone()
    }
}
