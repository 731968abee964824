//! Ordenação e reconciliação das fotos de um imóvel.
//!
//! A ordenação automática é uma permutação determinística da entrada; as
//! operações manuais (mover, remover) sempre deixam `ordem` contígua de 1 a N.

pub mod operacoes;
pub mod ordenacao;

pub use crate::models::foto::de_valor;
pub use operacoes::{adicionar, definir_destaque, destaque, mover, remover, renumerar};
pub use ordenacao::{
    ordenar, ordenar_com, ChaveOrdenacao, EstrategiaOrdenacao, OrdemOriginal, OrdenacaoInteligente,
};

use serde_json::Value;

/// Ordena uma coleção crua vinda do backend.
///
/// Entrada nula ou malformada resulta em lista vazia.
pub fn ordenar_valor(valor: &Value) -> Vec<crate::models::Foto> {
    ordenar(&de_valor(valor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn colecao_nula_ou_invalida_vira_lista_vazia() {
        assert!(ordenar_valor(&Value::Null).is_empty());
        assert!(ordenar_valor(&json!(42)).is_empty());
        assert!(ordenar_valor(&json!([])).is_empty());
    }

    #[test]
    fn cenario_tres_fotos_sem_ordem() {
        let entrada = json!([
            {"Codigo": "a", "Foto": "x.jpg"},
            {"Codigo": "b", "Foto": "y.jpg"},
            {"Codigo": "c", "Foto": "z.jpg"}
        ]);
        let fotos = ordenar_valor(&entrada);
        let mut codigos: Vec<&str> = fotos.iter().map(|f| f.codigo.as_str()).collect();
        codigos.sort();
        assert_eq!(codigos, vec!["a", "b", "c"]);

        let mut ordens: Vec<u32> = fotos.iter().filter_map(|f| f.ordem).collect();
        ordens.sort();
        assert_eq!(ordens, vec![1, 2, 3]);
    }
}
