pub mod automacao;
pub mod client;
pub mod conteudo;
pub mod corretores;
pub mod envelope;
pub mod imoveis;
pub mod traits;
pub mod upload;

pub use client::ApiClient;
pub use envelope::{normalizar_envelope, Resposta};
pub use traits::{EnvioImagem, ImovelServico};
