use super::{foto, Foto, SimNao, Videos};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Registro de imóvel trocado com o backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Imovel {
    #[serde(default, deserialize_with = "texto")]
    pub codigo: String,

    // Identificação / classificação
    #[serde(default, deserialize_with = "texto")]
    pub empreendimento: String,
    #[serde(default, deserialize_with = "texto")]
    pub categoria: String,
    #[serde(default, deserialize_with = "texto")]
    pub situacao: String,
    #[serde(default, deserialize_with = "texto")]
    pub status: String,
    #[serde(default, deserialize_with = "texto")]
    pub slug: String,
    #[serde(default)]
    pub ativo: SimNao,
    #[serde(default)]
    pub destacado: SimNao,

    // Localização
    #[serde(default, deserialize_with = "texto")]
    pub tipo_endereco: String,
    #[serde(default, deserialize_with = "texto")]
    pub endereco: String,
    #[serde(default, deserialize_with = "texto")]
    pub numero: String,
    #[serde(default, deserialize_with = "texto")]
    pub complemento: String,
    #[serde(default, deserialize_with = "texto")]
    pub bairro: String,
    #[serde(default, deserialize_with = "texto")]
    pub cidade: String,
    #[serde(rename = "UF", default, deserialize_with = "texto")]
    pub uf: String,
    #[serde(rename = "CEP", default, deserialize_with = "texto")]
    pub cep: String,
    #[serde(default, deserialize_with = "texto")]
    pub latitude: String,
    #[serde(default, deserialize_with = "texto")]
    pub longitude: String,

    // Características
    #[serde(default, deserialize_with = "texto")]
    pub area_privativa: String,
    #[serde(default, deserialize_with = "texto")]
    pub area_total: String,
    #[serde(default, deserialize_with = "texto")]
    pub dormitorios: String,
    #[serde(default, deserialize_with = "texto")]
    pub suites: String,
    #[serde(default, deserialize_with = "texto")]
    pub banheiros: String,
    #[serde(default, deserialize_with = "texto")]
    pub vagas: String,

    // Valores em dígitos, sem formatação
    #[serde(default, deserialize_with = "texto")]
    pub valor_venda: String,
    #[serde(default, deserialize_with = "texto")]
    pub valor_aluguel: String,
    #[serde(default, deserialize_with = "texto")]
    pub valor_condominio: String,
    #[serde(default, deserialize_with = "texto")]
    pub valor_iptu: String,

    #[serde(default, deserialize_with = "texto")]
    pub descricao: String,
    #[serde(default, deserialize_with = "texto")]
    pub descricao_unidades: String,

    #[serde(rename = "Foto", default, deserialize_with = "foto::deserialize_colecao")]
    pub fotos: Vec<Foto>,
    #[serde(rename = "Video", default)]
    pub videos: Videos,

    /// Campos que o console não manipula, preservados no envio
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

impl Imovel {
    /// Novo imóvel em memória com código aleatório de 6 dígitos.
    pub fn novo() -> Self {
        Self {
            codigo: gerar_codigo(),
            ..Default::default()
        }
    }

    /// Copia um registro da automação para um novo imóvel, inativo.
    pub fn copiar_de_automacao(origem: &Imovel) -> Self {
        let mut imovel = origem.clone();
        if !codigo_valido(&imovel.codigo) {
            imovel.codigo = gerar_codigo();
        }
        imovel.extras.remove("_id");
        imovel.ativo = SimNao::Nao;
        imovel.destacado = SimNao::Nao;
        imovel
    }

    pub fn endereco_completo(&self) -> String {
        let rua = [self.endereco.trim(), self.numero.trim()]
            .iter()
            .filter(|p| !p.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        let cidade_uf = match (self.cidade.trim(), self.uf.trim()) {
            ("", "") => String::new(),
            (cidade, "") => cidade.to_string(),
            ("", uf) => uf.to_string(),
            (cidade, uf) => format!("{} - {}", cidade, uf),
        };
        [rua.as_str(), self.bairro.trim(), cidade_uf.as_str()]
            .iter()
            .filter(|p| !p.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn valor_venda_numerico(&self) -> Option<u64> {
        self.valor_venda.parse().ok().filter(|v| *v > 0)
    }
}

pub fn gerar_codigo() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

pub fn codigo_valido(codigo: &str) -> bool {
    codigo.len() == 6 && codigo.chars().all(|c| c.is_ascii_digit())
}

fn texto<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn codigo_gerado_tem_seis_digitos() {
        for _ in 0..50 {
            assert!(codigo_valido(&Imovel::novo().codigo));
        }
    }

    #[test]
    fn desserializa_e_preserva_campos_desconhecidos() {
        let valor = json!({
            "_id": "abc123",
            "Codigo": 123456,
            "Empreendimento": "Residencial Aurora",
            "UF": "SP",
            "CEP": "01310100",
            "Dormitorios": 3,
            "ValorVenda": "1250000",
            "Ativo": "Sim",
            "Foto": {"x": {"Codigo": "x", "Foto": "https://cdn/x.jpg"}},
            "Video": {"1": {"Video": "dQw4w9WgXcQ"}},
            "Corretor": "Ana"
        });
        let imovel: Imovel = serde_json::from_value(valor).unwrap();
        assert_eq!(imovel.codigo, "123456");
        assert_eq!(imovel.dormitorios, "3");
        assert_eq!(imovel.uf, "SP");
        assert!(imovel.ativo.is_sim());
        assert_eq!(imovel.fotos.len(), 1);
        assert_eq!(imovel.videos.len(), 1);
        assert_eq!(imovel.extras.get("Corretor"), Some(&json!("Ana")));

        let de_volta = serde_json::to_value(&imovel).unwrap();
        assert_eq!(de_volta["_id"], json!("abc123"));
        assert!(de_volta["Foto"].is_array());
        assert_eq!(de_volta["CEP"], json!("01310100"));
    }

    #[test]
    fn valores_nulos_ou_vazios_nao_rejeitam_o_registro() {
        let imovel: Imovel = serde_json::from_value(json!({
            "Codigo": "123456",
            "Complemento": null,
            "Bairro": null,
            "UF": null,
            "Ativo": null,
            "Destacado": "",
            "Video": "",
            "Foto": null
        }))
        .unwrap();
        assert_eq!(imovel.codigo, "123456");
        assert_eq!(imovel.complemento, "");
        assert_eq!(imovel.uf, "");
        assert_eq!(imovel.ativo, SimNao::Nao);
        assert_eq!(imovel.destacado, SimNao::Nao);
        assert!(imovel.videos.is_empty());
        assert!(imovel.fotos.is_empty());
    }

    #[test]
    fn copia_da_automacao_fica_inativa() {
        let mut origem = Imovel {
            codigo: "12".into(),
            ativo: SimNao::Sim,
            empreendimento: "Edifício Sol".into(),
            ..Default::default()
        };
        origem.extras.insert("_id".into(), json!("stg-1"));

        let copia = Imovel::copiar_de_automacao(&origem);
        assert!(codigo_valido(&copia.codigo));
        assert_eq!(copia.ativo, SimNao::Nao);
        assert_eq!(copia.empreendimento, "Edifício Sol");
        assert!(!copia.extras.contains_key("_id"));

        origem.codigo = "654321".into();
        assert_eq!(Imovel::copiar_de_automacao(&origem).codigo, "654321");
    }

    #[test]
    fn monta_endereco_completo() {
        let imovel = Imovel {
            endereco: "Rua Augusta".into(),
            numero: "100".into(),
            bairro: "Consolação".into(),
            cidade: "São Paulo".into(),
            uf: "SP".into(),
            ..Default::default()
        };
        assert_eq!(imovel.endereco_completo(), "Rua Augusta, 100, Consolação, São Paulo - SP");
    }
}
