pub mod entity;
pub mod categoria;
pub mod venda;

pub use entity::Entity;
