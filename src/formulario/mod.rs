//! Estado, validação e envio do formulário de imóvel.

pub mod estado;
pub mod moeda;
pub mod slug;
pub mod submit;
pub mod validacao;

pub use estado::{AcaoPendente, CampoImovel, ImovelForm};
pub use moeda::{formatar_moeda, somente_digitos};
pub use slug::gerar_slug;
pub use submit::{montar_payload, tipo_endereco, ImovelSubmit, ModoEnvio};
pub use validacao::{validar_imovel, ResumoValidacao};
