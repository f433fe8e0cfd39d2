//! Best-effort numeric coercion for stored amount text.

/// Parse an amount the way a forgiving spreadsheet would.
///
/// Accepts stray whitespace, thousands separators and a leading currency
/// symbol ("₹1,250.50"). Anything else, including blank, NaN and infinity,
/// becomes 0.0.
pub fn coerce_amount(text: &str) -> f64 {
    let s = text.trim();
    if s.is_empty() {
        return 0.0;
    }

    if let Ok(v) = s.parse::<f64>() {
        return finite_or_zero(v);
    }

    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, s),
    };
    let digits: String = rest
        .trim_start_matches(is_symbol)
        .trim_start()
        .chars()
        .filter(|c| *c != ',')
        .collect();

    // Whatever is left must be an unsigned number
    if !digits.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return 0.0;
    }
    match digits.parse::<f64>() {
        Ok(v) => finite_or_zero(sign * v),
        Err(_) => 0.0,
    }
}

/// Currency sign characters such as `₹`, `$` or `€`
fn is_symbol(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace() && !matches!(c, '-' | '+' | '.' | ',')
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
