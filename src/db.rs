pub mod repository;
pub use repository::Repository;
pub mod categoria_repo;
pub use categoria_repo::CategoriaRepository;
pub mod venda_repo;
pub use venda_repo::VendaRepository;
pub mod item_venda_repo;
pub use item_venda_repo::ItemVendaRepository;

#[cfg(test)]
pub mod memory_repo;
