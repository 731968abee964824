/// Mantém só os dígitos ASCII.
pub fn somente_digitos(valor: &str) -> String {
    valor.chars().filter(char::is_ascii_digit).collect()
}

/// Agrupa milhares com ponto: "1250000" -> "1.250.000".
pub fn agrupar_milhares(digitos: &str) -> String {
    let digitos = digitos.trim_start_matches('0');
    if digitos.is_empty() {
        return "0".to_string();
    }
    let tamanho = digitos.len();
    let mut saida = String::with_capacity(tamanho + tamanho / 3);
    for (i, c) in digitos.chars().enumerate() {
        if i > 0 && (tamanho - i) % 3 == 0 {
            saida.push('.');
        }
        saida.push(c);
    }
    saida
}

/// Valor para exibição em reais; vazio continua vazio.
pub fn formatar_moeda(valor: &str) -> String {
    let digitos = somente_digitos(valor);
    if digitos.is_empty() {
        return String::new();
    }
    format!("R$ {}", agrupar_milhares(&digitos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formata_reais() {
        assert_eq!(formatar_moeda("1250000"), "R$ 1.250.000");
        assert_eq!(formatar_moeda("R$ 980.000"), "R$ 980.000");
        assert_eq!(formatar_moeda("450"), "R$ 450");
        assert_eq!(formatar_moeda("0050"), "R$ 50");
        assert_eq!(formatar_moeda("000"), "R$ 0");
        assert_eq!(formatar_moeda("abc"), "");
    }

    #[test]
    fn remove_nao_digitos() {
        assert_eq!(somente_digitos("R$ 1.250.000,00"), "125000000");
        assert_eq!(somente_digitos("01310-100"), "01310100");
    }
}
