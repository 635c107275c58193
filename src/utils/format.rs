// ============================================================================
// FORMAT - Formateo de valores para la UI
// ============================================================================

/// Formatear un monto en pesos colombianos con separador de miles
/// (convención es-CO: puntos). Solo la parte entera, sin decimales.
pub fn format_cop(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agrupa_miles_con_puntos() {
        assert_eq!(format_cop(0), "0");
        assert_eq!(format_cop(950), "950");
        assert_eq!(format_cop(1_234), "1.234");
        assert_eq!(format_cop(150_000), "150.000");
        assert_eq!(format_cop(1_234_567), "1.234.567");
    }

    #[test]
    fn conserva_el_signo() {
        assert_eq!(format_cop(-12_500), "-12.500");
    }
}
