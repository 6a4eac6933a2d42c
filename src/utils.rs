// Format a currency amount the way the coin page shows it
pub fn format_currency(amount: f64, currency: &str) -> String {
    if amount == 0.0 || !amount.is_finite() {
        return format!("{}0.00", currency);
    }

    // Very small crypto prices keep two significant digits
    if amount > 0.0 && amount < 0.01 {
        let exponent = amount.abs().log10().floor() as i32;
        let decimals = (-exponent + 2).clamp(2, 12) as usize;
        return format!("{}{:.*}", currency, decimals, amount);
    }

    if amount >= 1_000_000.0 {
        return format!("{}{:.2}M", currency, amount / 1_000_000.0);
    }

    if amount >= 1_000.0 {
        let fixed = format!("{:.2}", amount);
        let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        return format!("{}{}.{}", currency, group_thousands(whole), fraction);
    }

    format!("{}{:.2}", currency, amount)
}

// Format an integer with thousands separators
pub fn format_number(value: u64) -> String {
    group_thousands(&value.to_string())
}

// Signed percentage, e.g. "+5.20%"
pub fn format_change(percent: f64) -> String {
    let sign = if percent >= 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, percent)
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}", sign, grouped)
}

// Shorten address for display
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }

    let start: String = chars[..5].iter().collect();
    let end: String = chars[chars.len() - 5..].iter().collect();

    format!("{}...{}", start, end)
}
