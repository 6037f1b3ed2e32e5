//! Number formatting for tables, pt-BR style: `1.234,56`.

/// Thousands separated by `.`, decimals by `,`.
///
/// ```text
/// format_number_with_decimals(1234.567, 2) == "1.234,57"
/// ```
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    let digits: Vec<char> = integer_part.chars().collect();
    let mut grouped = String::new();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }

    // -0,00 reads as zero
    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    match decimal_part {
        Some(d) => format!("{sign}{grouped},{d}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn format_money(value: f64) -> String {
    format_number_with_decimals(value, 2)
}

/// `R$ 1.234,56`
pub fn format_brl(value: f64) -> String {
    format!("R$ {}", format_money(value))
}

/// Quantities: whole numbers without decimals, fractions with up to three.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format_number_with_decimals(value, 0)
    } else {
        let text = format_number_with_decimals(value, 3);
        text.trim_end_matches('0').trim_end_matches(',').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "1.234,56");
        assert_eq!(format_money(1234567.89), "1.234.567,89");
        assert_eq!(format_money(0.0), "0,00");
        assert_eq!(format_money(-1234.56), "-1.234,56");
        assert_eq!(format_money(-0.001), "0,00");
        assert_eq!(format_money(999.999), "1.000,00");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1.235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1.234,6");
        assert_eq!(format_number_with_decimals(123.0, 0), "123");
    }

    #[test]
    fn test_format_brl_and_quantity() {
        assert_eq!(format_brl(10.5), "R$ 10,50");
        assert_eq!(format_quantity(12.0), "12");
        assert_eq!(format_quantity(1.5), "1,5");
        assert_eq!(format_quantity(1500.25), "1.500,25");
        assert_eq!(format_quantity(10.0001), "10");
    }
}
