// Number formatting helpers shared by the composer and the parsers

/// Formats `value` with two decimals and comma thousands separators, e.g. `25,012.50`.
pub fn format_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Signed percentage with two decimals, e.g. `+0.42%`.
pub fn format_change(change_pct: f64) -> String {
    let rounded = (change_pct * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "+0.00%".to_string();
    }
    format!("{:+.2}%", rounded)
}

/// Rupee crore amount, e.g. `₹6,614.35 Cr` or `-₹529.10 Cr`.
pub fn format_crore(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}₹{} Cr", sign, format_thousands(amount.abs()))
}

/// Parses figures such as `6,614.35` as printed on scraped pages.
pub fn parse_grouped_number(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
