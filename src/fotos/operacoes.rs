use crate::error::AppError;
use crate::models::{Foto, SimNao};
use rand::Rng;
use tracing::debug;

/// Renumera `ordem` de 1 a N na ordem atual do vetor.
pub fn renumerar(fotos: &mut [Foto]) {
    for (i, foto) in fotos.iter_mut().enumerate() {
        foto.ordem = Some(i as u32 + 1);
    }
}

fn posicao_de(fotos: &[Foto], codigo: &str) -> Result<usize, AppError> {
    fotos
        .iter()
        .position(|f| f.codigo == codigo)
        .ok_or_else(|| AppError::FotoNaoEncontrada(codigo.to_string()))
}

/// Move a foto para a posição `destino` (1-based) e renumera todas.
///
/// Posições fora do intervalo são ajustadas para 1..=N. As demais fotos
/// mantêm a ordem relativa entre si.
pub fn mover(fotos: &mut Vec<Foto>, codigo: &str, destino: usize) -> Result<(), AppError> {
    let atual = posicao_de(fotos, codigo)?;
    let destino = destino.clamp(1, fotos.len()) - 1;

    let foto = fotos.remove(atual);
    fotos.insert(destino, foto);
    renumerar(fotos);

    debug!("Foto {} movida da posição {} para {}", codigo, atual + 1, destino + 1);
    Ok(())
}

/// Marca uma única foto como destaque, desmarcando todas as outras.
pub fn definir_destaque(fotos: &mut [Foto], codigo: &str) -> Result<(), AppError> {
    posicao_de(fotos, codigo)?;
    for foto in fotos.iter_mut() {
        foto.destaque = SimNao::from(foto.codigo == codigo);
    }
    Ok(())
}

/// Remove a foto pelo código e renumera as restantes.
pub fn remover(fotos: &mut Vec<Foto>, codigo: &str) -> Result<Foto, AppError> {
    let posicao = posicao_de(fotos, codigo)?;
    let removida = fotos.remove(posicao);
    renumerar(fotos);
    Ok(removida)
}

/// Acrescenta uma foto recém-enviada no fim da lista, com código único.
pub fn adicionar(fotos: &mut Vec<Foto>, url: impl Into<String>) -> &Foto {
    let mut rng = rand::thread_rng();
    let codigo = loop {
        let candidato = format!("{:08x}", rng.gen::<u32>());
        if !fotos.iter().any(|f| f.codigo == candidato) {
            break candidato;
        }
    };

    let mut foto = Foto::new(codigo, url);
    foto.ordem = Some(fotos.len() as u32 + 1);
    fotos.push(foto);
    &fotos[fotos.len() - 1]
}

/// Foto marcada como destaque, se houver.
pub fn destaque(fotos: &[Foto]) -> Option<&Foto> {
    fotos.iter().find(|f| f.destaque.is_sim())
}
