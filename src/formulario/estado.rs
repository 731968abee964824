use super::moeda::{formatar_moeda, somente_digitos};
use super::slug::gerar_slug;
use super::validacao::ResumoValidacao;
use crate::error::AppError;
use crate::externos::{normalizar_cep, BuscaCep, EnderecoCep, Geocodificador};
use crate::fotos;
use crate::models::{Foto, Imovel, SimNao};
use crate::services::EnvioImagem;
use tracing::{debug, info, warn};

/// Campos editáveis do formulário de imóvel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampoImovel {
    Empreendimento,
    Categoria,
    Situacao,
    Status,
    Slug,
    Ativo,
    Endereco,
    Numero,
    Complemento,
    Bairro,
    Cidade,
    Uf,
    Cep,
    AreaPrivativa,
    AreaTotal,
    Dormitorios,
    Suites,
    Banheiros,
    Vagas,
    ValorVenda,
    ValorAluguel,
    ValorCondominio,
    ValorIptu,
    Descricao,
    DescricaoUnidades,
}

impl CampoImovel {
    pub fn is_monetario(self) -> bool {
        matches!(
            self,
            CampoImovel::ValorVenda
                | CampoImovel::ValorAluguel
                | CampoImovel::ValorCondominio
                | CampoImovel::ValorIptu
        )
    }
}

/// Efeito colateral que o chamador precisa executar depois de uma alteração.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcaoPendente {
    BuscarCep(String),
}

/// Estado do formulário de cadastro/edição de imóvel.
pub struct ImovelForm {
    imovel: Imovel,
    minimo_fotos: usize,
    resumo: ResumoValidacao,
}

impl ImovelForm {
    /// Formulário em branco com código novo.
    pub fn novo(minimo_fotos: usize) -> Self {
        Self::a_partir_de(Imovel::novo(), minimo_fotos)
    }

    /// Formulário de edição. As fotos chegam ordenadas pela ordenação automática.
    pub fn a_partir_de(mut imovel: Imovel, minimo_fotos: usize) -> Self {
        imovel.fotos = fotos::ordenar(&imovel.fotos);
        let resumo = ResumoValidacao::calcular(&imovel, minimo_fotos);
        Self {
            imovel,
            minimo_fotos,
            resumo,
        }
    }

    pub fn imovel(&self) -> &Imovel {
        &self.imovel
    }

    pub fn into_imovel(self) -> Imovel {
        self.imovel
    }

    pub fn minimo_fotos(&self) -> usize {
        self.minimo_fotos
    }

    pub fn resumo(&self) -> &ResumoValidacao {
        &self.resumo
    }

    pub fn is_valido(&self) -> bool {
        self.resumo.formulario_valido
    }

    fn recalcular(&mut self) {
        self.resumo = ResumoValidacao::calcular(&self.imovel, self.minimo_fotos);
    }

    fn campo_mut(&mut self, campo: CampoImovel) -> Option<&mut String> {
        let i = &mut self.imovel;
        Some(match campo {
            CampoImovel::Empreendimento => &mut i.empreendimento,
            CampoImovel::Categoria => &mut i.categoria,
            CampoImovel::Situacao => &mut i.situacao,
            CampoImovel::Status => &mut i.status,
            CampoImovel::Slug => &mut i.slug,
            CampoImovel::Endereco => &mut i.endereco,
            CampoImovel::Numero => &mut i.numero,
            CampoImovel::Complemento => &mut i.complemento,
            CampoImovel::Bairro => &mut i.bairro,
            CampoImovel::Cidade => &mut i.cidade,
            CampoImovel::Uf => &mut i.uf,
            CampoImovel::Cep => &mut i.cep,
            CampoImovel::AreaPrivativa => &mut i.area_privativa,
            CampoImovel::AreaTotal => &mut i.area_total,
            CampoImovel::Dormitorios => &mut i.dormitorios,
            CampoImovel::Suites => &mut i.suites,
            CampoImovel::Banheiros => &mut i.banheiros,
            CampoImovel::Vagas => &mut i.vagas,
            CampoImovel::ValorVenda => &mut i.valor_venda,
            CampoImovel::ValorAluguel => &mut i.valor_aluguel,
            CampoImovel::ValorCondominio => &mut i.valor_condominio,
            CampoImovel::ValorIptu => &mut i.valor_iptu,
            CampoImovel::Descricao => &mut i.descricao,
            CampoImovel::DescricaoUnidades => &mut i.descricao_unidades,
            CampoImovel::Ativo => return None,
        })
    }

    /// Aplica uma alteração vinda da interface.
    ///
    /// Valores monetários e CEP guardam só dígitos; o empreendimento gera o
    /// slug. Quando o CEP fica completo devolve `AcaoPendente::BuscarCep`.
    pub fn alterar_campo(&mut self, campo: CampoImovel, valor: &str) -> Option<AcaoPendente> {
        let mut acao = None;

        match campo {
            CampoImovel::Ativo => {
                self.imovel.ativo = SimNao::from(matches!(valor.trim(), "Sim" | "sim" | "true"));
            }
            c if c.is_monetario() => {
                if let Some(destino) = self.campo_mut(c) {
                    *destino = somente_digitos(valor);
                }
            }
            CampoImovel::Cep => {
                let digitos: String = somente_digitos(valor).chars().take(8).collect();
                acao = normalizar_cep(&digitos).map(AcaoPendente::BuscarCep);
                self.imovel.cep = digitos;
            }
            CampoImovel::Empreendimento => {
                self.imovel.empreendimento = valor.to_string();
                self.imovel.slug = gerar_slug(valor);
            }
            CampoImovel::Uf => {
                self.imovel.uf = valor.trim().to_uppercase();
            }
            c => {
                if let Some(destino) = self.campo_mut(c) {
                    *destino = valor.to_string();
                }
            }
        }

        self.recalcular();
        acao
    }

    /// Valor monetário formatado para exibição.
    pub fn valor_exibicao(&self, campo: CampoImovel) -> Option<String> {
        let i = &self.imovel;
        let digitos = match campo {
            CampoImovel::ValorVenda => &i.valor_venda,
            CampoImovel::ValorAluguel => &i.valor_aluguel,
            CampoImovel::ValorCondominio => &i.valor_condominio,
            CampoImovel::ValorIptu => &i.valor_iptu,
            _ => return None,
        };
        Some(formatar_moeda(digitos))
    }

    /// Preenche o endereço só nos campos que o usuário deixou vazios.
    pub fn aplicar_endereco(&mut self, endereco: &EnderecoCep) {
        let i = &mut self.imovel;
        for (destino, origem) in [
            (&mut i.endereco, &endereco.logradouro),
            (&mut i.bairro, &endereco.bairro),
            (&mut i.cidade, &endereco.cidade),
            (&mut i.uf, &endereco.uf),
        ] {
            if destino.trim().is_empty() && !origem.trim().is_empty() {
                *destino = origem.clone();
            }
        }
        self.recalcular();
    }

    pub fn aplicar_coordenadas(&mut self, latitude: f64, longitude: f64) {
        self.imovel.latitude = latitude.to_string();
        self.imovel.longitude = longitude.to_string();
    }

    /// Consulta CEP e coordenadas; falhas são registradas e ignoradas.
    pub async fn preencher_por_cep(&mut self, busca_cep: &dyn BuscaCep, geocodificador: &dyn Geocodificador) {
        let cep = match normalizar_cep(&self.imovel.cep) {
            Some(cep) => cep,
            None => return,
        };

        match busca_cep.buscar(&cep).await {
            Ok(Some(endereco)) => {
                debug!("CEP {} encontrado: {:?}", cep, endereco);
                self.aplicar_endereco(&endereco);
            }
            Ok(None) => warn!("CEP {} não encontrado", cep),
            Err(e) => {
                warn!("Falha ao consultar CEP {}: {}", cep, e);
                return;
            }
        }

        let consulta = self.imovel.endereco_completo();
        match geocodificador.geocodificar(&consulta).await {
            Ok(Some(coordenadas)) => {
                self.aplicar_coordenadas(coordenadas.latitude, coordenadas.longitude);
            }
            Ok(None) => warn!("Sem coordenadas para '{}'", consulta),
            Err(e) => warn!("Falha ao geocodificar '{}': {}", consulta, e),
        }
    }

    // --- Fotos ---

    pub fn fotos(&self) -> &[Foto] {
        &self.imovel.fotos
    }

    pub fn mover_foto(&mut self, codigo: &str, posicao: usize) -> Result<(), AppError> {
        fotos::mover(&mut self.imovel.fotos, codigo, posicao)
    }

    pub fn definir_foto_destaque(&mut self, codigo: &str) -> Result<(), AppError> {
        fotos::definir_destaque(&mut self.imovel.fotos, codigo)
    }

    pub fn remover_foto(&mut self, codigo: &str) -> Result<Foto, AppError> {
        let removida = fotos::remover(&mut self.imovel.fotos, codigo)?;
        self.recalcular();
        Ok(removida)
    }

    pub fn adicionar_foto(&mut self, url: impl Into<String>) -> String {
        let codigo = fotos::adicionar(&mut self.imovel.fotos, url).codigo.clone();
        self.recalcular();
        codigo
    }

    /// Reaplica a ordenação automática sobre as fotos atuais.
    pub fn reordenar_fotos(&mut self) {
        self.imovel.fotos = fotos::ordenar(&self.imovel.fotos);
    }

    /// Envia os arquivos e acrescenta as fotos ao imóvel.
    ///
    /// Cada arquivo é independente: uma falha não impede os demais.
    /// Devolve os códigos adicionados e os erros por arquivo.
    pub async fn enviar_fotos(
        &mut self,
        envio: &dyn EnvioImagem,
        arquivos: Vec<(String, Vec<u8>)>,
    ) -> (Vec<String>, Vec<(String, AppError)>) {
        let diretorio = format!("imoveis/{}", self.imovel.codigo);
        let mut adicionadas = Vec::new();
        let mut falhas = Vec::new();

        for (nome, conteudo) in arquivos {
            match envio.enviar_imagem(conteudo, &diretorio, &nome).await {
                Ok(url) => adicionadas.push(self.adicionar_foto(url)),
                Err(e) => {
                    warn!("Falha ao enviar {}: {}", nome, e);
                    falhas.push((nome, e));
                }
            }
        }

        info!(
            "{} foto(s) enviadas para o imóvel {}, {} falha(s)",
            adicionadas.len(),
            self.imovel.codigo,
            falhas.len()
        );
        (adicionadas, falhas)
    }
}
