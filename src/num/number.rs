/// Arena a numeric literal lands in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classified {
    Int(i64),
    Float(f64),
}

/// Integral literals that fit `i64` stay integers; everything else is a float.
pub fn classify_u64(value: u64) -> Classified {
    match i64::try_from(value) {
        Ok(int) => Classified::Int(int),
        Err(_) => Classified::Float(value as f64),
    }
}

pub fn classify_i128(value: i128) -> Classified {
    match i64::try_from(value) {
        Ok(int) => Classified::Int(int),
        Err(_) => Classified::Float(value as f64),
    }
}

pub fn classify_u128(value: u128) -> Classified {
    match i64::try_from(value) {
        Ok(int) => Classified::Int(int),
        Err(_) => Classified::Float(value as f64),
    }
}

/// Floats are never demoted, even when integral (`42.0` stays a float).
pub fn classify_f64(value: f64) -> Option<Classified> {
    value.is_finite().then_some(Classified::Float(value))
}

/// Classifies a number by its literal text. Integral tokens in `i64` range are
/// integers (`-0` is `Int(0)`); the rest must be finite as `f64`.
pub fn classify_token(token: &str) -> Option<Classified> {
    let integral = !token.bytes().any(|byte| matches!(byte, b'.' | b'e' | b'E'));
    if integral {
        if let Ok(int) = token.parse::<i64>() {
            return Some(Classified::Int(int));
        }
    }
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(Classified::Float)
}

/// Shortest representation that reads back to the same bits, always a valid Rust
/// float literal (`1.0`, `2.5e-8`, `-0.0`). Non-finite values have no literal.
pub fn format_f64_literal(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let mut buffer = ryu::Buffer::new();
    Some(buffer.format_finite(value).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case(42, Classified::Int(42))]
    #[case(i64::MAX as u64, Classified::Int(i64::MAX))]
    #[case(1 << 63, Classified::Float(9_223_372_036_854_775_808.0))]
    fn test_classify_u64(#[case] input: u64, #[case] expected: Classified) {
        assert_eq!(classify_u64(input), expected);
    }

    #[rstest::rstest]
    fn test_classify_wide_integers() {
        assert_eq!(classify_i128(-5), Classified::Int(-5));
        assert_eq!(
            classify_i128(i64::MIN as i128 - 1),
            Classified::Float(-9_223_372_036_854_775_809.0)
        );
        assert_eq!(classify_u128(7), Classified::Int(7));
    }

    #[rstest::rstest]
    fn test_classify_f64_keeps_integral_floats() {
        assert_eq!(classify_f64(42.0), Some(Classified::Float(42.0)));
        assert_eq!(classify_f64(f64::NAN), None);
        assert_eq!(classify_f64(f64::INFINITY), None);
    }

    #[rstest::rstest]
    #[case("0", Some(Classified::Int(0)))]
    #[case("-0", Some(Classified::Int(0)))]
    #[case("-9223372036854775808", Some(Classified::Int(i64::MIN)))]
    #[case("9223372036854775808", Some(Classified::Float(9_223_372_036_854_775_808.0)))]
    #[case("-0.0", Some(Classified::Float(-0.0)))]
    #[case("42.0", Some(Classified::Float(42.0)))]
    #[case("1e+2", Some(Classified::Float(100.0)))]
    #[case("2.5E-8", Some(Classified::Float(2.5e-8)))]
    #[case("1e+400", None)]
    #[case("-1e+400", None)]
    fn test_classify_token(#[case] token: &str, #[case] expected: Option<Classified>) {
        assert_eq!(classify_token(token), expected);
    }

    #[rstest::rstest]
    #[case(1.0, "1.0")]
    #[case(-0.0, "-0.0")]
    #[case(0.1, "0.1")]
    #[case(1e300, "1e300")]
    #[case(2.5e-8, "2.5e-8")]
    fn test_format_f64_literal(#[case] input: f64, #[case] expected: &str) {
        let literal = format_f64_literal(input).expect("finite");
        assert_eq!(literal, expected);
        assert_eq!(literal.parse::<f64>().unwrap().to_bits(), input.to_bits());
    }
}
