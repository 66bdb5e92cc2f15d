//! Brazilian-convention number rendering for the terminal report

/// Shown instead of a number that cannot be rendered.
pub const PLACEHOLDER: &str = "-";

/// Format with `.` as the thousands separator and `,` as the decimal mark,
/// e.g. `1234567.891` with two decimals becomes `"1.234.567,89"`. Values
/// that are not finite render as the placeholder.
pub fn format_br(value: f64, decimals: usize) -> String {
    render(value, decimals, ',')
}

/// A ratio as a percentage with one decimal, e.g. `0.4` becomes `"40.0%"`.
/// The decimal mark stays `.` here; only the thousands grouping uses `.`.
pub fn percent_br(ratio: f64) -> String {
    let scaled = ratio * 100.0;
    if !scaled.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{}%", render(scaled, 1, '.'))
}

fn render(value: f64, decimals: usize, decimal_mark: char) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let fixed = format!("{value:.decimals$}");
    let (digits, negative) = match fixed.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (fixed.as_str(), false),
    };
    let (whole, frac) = match digits.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (digits, None),
    };

    let mut out = String::with_capacity(fixed.len() + whole.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    if let Some(frac) = frac {
        out.push(decimal_mark);
        out.push_str(frac);
    }
    out
}

/// Insert `.` between 3-digit groups, counting from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
