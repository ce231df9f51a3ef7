// src/routes.rs

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    config::AppState,
    handlers::{crud, itens},
    models::{categoria::Categoria, venda::Venda},
};

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        // --- Categorias ---
        .route("/categorias"
               ,post(crud::create::<Categoria>)
               .get(crud::retrieve_all::<Categoria>)
        )
        .route("/categorias/{id}"
               ,get(crud::retrieve_one::<Categoria>)
               .patch(crud::update::<Categoria>)
               .delete(crud::delete::<Categoria>)
        )
        // --- Vendas ---
        .route("/vendas"
               ,post(crud::create::<Venda>)
               .get(crud::retrieve_all::<Venda>)
        )
        .route("/vendas/{id}"
               ,get(crud::retrieve_one::<Venda>)
               .patch(crud::update::<Venda>)
               .delete(crud::delete::<Venda>)
        )
        // --- Itens: sempre pendurados na venda dona ---
        .route("/vendas/{id}/itens"
               ,post(itens::create_item)
               .get(itens::retrieve_all_items)
        )
        .route("/vendas/{id}/itens/{item_id}"
               ,get(itens::retrieve_one_item)
               .patch(itens::update_item)
               .delete(itens::delete_item)
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
