//! CNPJ / CPF helpers

pub fn only_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn digits_of(input: &str) -> Vec<u32> {
    input.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

fn mod11_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    let rem = sum % 11;
    if rem < 2 {
        0
    } else {
        11 - rem
    }
}

pub fn is_valid_cnpj(input: &str) -> bool {
    let digits = digits_of(input);
    if digits.len() != 14 || all_same(&digits) {
        return false;
    }
    const W1: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    const W2: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    mod11_digit(&digits[..12], &W1) == digits[12] && mod11_digit(&digits[..13], &W2) == digits[13]
}

pub fn is_valid_cpf(input: &str) -> bool {
    let digits = digits_of(input);
    if digits.len() != 11 || all_same(&digits) {
        return false;
    }
    let check = |len: usize| {
        let sum: u32 = digits[..len]
            .iter()
            .enumerate()
            .map(|(i, d)| d * (len as u32 + 1 - i as u32))
            .sum();
        (sum * 10 % 11) % 10
    };
    check(9) == digits[9] && check(10) == digits[10]
}

pub fn is_valid_document(input: &str) -> bool {
    match only_digits(input).len() {
        11 => is_valid_cpf(input),
        14 => is_valid_cnpj(input),
        _ => false,
    }
}

/// 11222333000181 -> 11.222.333/0001-81, 52998224725 -> 529.982.247-25.
/// Anything else is returned unchanged.
pub fn format_document(input: &str) -> String {
    let d = only_digits(input);
    match d.len() {
        14 => format!("{}.{}.{}/{}-{}", &d[0..2], &d[2..5], &d[5..8], &d[8..12], &d[12..14]),
        11 => format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11]),
        _ => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cnpj() {
        assert!(is_valid_cnpj("11.222.333/0001-81"));
        assert!(is_valid_cnpj("11222333000181"));
        assert!(!is_valid_cnpj("11.222.333/0001-82"));
        assert!(!is_valid_cnpj("00000000000000"));
        assert!(!is_valid_cnpj("1122233300018"));
    }

    #[test]
    fn test_cpf() {
        assert!(is_valid_cpf("529.982.247-25"));
        assert!(!is_valid_cpf("529.982.247-26"));
        assert!(!is_valid_cpf("111.111.111-11"));
    }

    #[test]
    fn test_format() {
        assert_eq!(format_document("11222333000181"), "11.222.333/0001-81");
        assert_eq!(format_document("52998224725"), "529.982.247-25");
        assert_eq!(format_document("123"), "123");
        assert!(is_valid_document("529.982.247-25"));
        assert!(!is_valid_document("123"));
    }
}
