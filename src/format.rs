//! Number formatting for the metric cards.

/// Shown in place of a mean over zero records.
pub const NO_DATA: &str = "no data";

/// `1234567.891` with `decimals = 2` → `"1,234,567.89"`.
pub fn thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return NO_DATA.to_string();
    }
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && formatted.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

pub fn emissions(kg: f64) -> String {
    format!("{} kg", thousands(kg, 0))
}

pub fn water(mean_litres: Option<f64>) -> String {
    match mean_litres {
        Some(l) => format!("{} L", thousands(l, 0)),
        None => NO_DATA.to_string(),
    }
}

pub fn revenue(usd: f64) -> String {
    format!("US$ {}", thousands(usd, 2))
}
