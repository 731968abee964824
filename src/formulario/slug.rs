use crate::models::filtros::sem_acento;

/// Slug de URL: sem acentos, minúsculo, palavras separadas por hífen.
pub fn gerar_slug(texto: &str) -> String {
    let mut slug = String::with_capacity(texto.len());
    for c in texto.chars().map(sem_acento).flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gera_slug() {
        assert_eq!(gerar_slug("Residencial Águas Claras"), "residencial-aguas-claras");
        assert_eq!(gerar_slug("  Edifício São João -- Bloco B! "), "edificio-sao-joao-bloco-b");
        assert_eq!(gerar_slug("Condomínio Ñandú & Cia"), "condominio-nandu-cia");
        assert_eq!(gerar_slug("***"), "");
    }
}
