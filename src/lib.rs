//! Console administrativo de imóveis: modelo de dados, ordenação de fotos,
//! formulário com validação e cliente da API administrativa.

pub mod cache;
pub mod config;
pub mod error;
pub mod externos;
pub mod formulario;
pub mod fotos;
pub mod models;
pub mod pagina;
pub mod services;
pub mod sessao;

pub use config::AppConfig;
pub use error::AppError;
