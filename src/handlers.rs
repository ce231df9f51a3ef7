pub mod crud;
pub mod itens;
