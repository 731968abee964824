//! Serviços externos consultados pelo formulário: CEP e geocodificação.

pub mod cep;
pub mod geocoding;

pub use cep::{normalizar_cep, BuscaCep, EnderecoCep, ViaCep};
pub use geocoding::{Coordenadas, Geocodificador, Nominatim};
