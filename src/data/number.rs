/// Parses a numeric cell written with either decimal separator.
///
/// Surrounding whitespace and every `"` are dropped and `,` is read as the
/// decimal point, so `12,5` and `"7.0"` both parse. Returns `None` when the
/// remainder is not a number.
pub fn parse_locale_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|&c| c != '"')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    cleaned.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}
