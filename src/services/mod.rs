pub mod usuario_mapper;
pub mod usuario_service;

pub use usuario_service::*;
