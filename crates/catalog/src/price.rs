//! Display-price formatting.
//!
//! Upstreams deliver prices as raw numbers, micros-derived numbers or
//! already-formatted strings; everything funnels through [`format_price`]
//! which is total and degrades to the free token instead of failing.

/// Localized "free" token used across both stores.
pub const FREE_PRICE_TOKEN: &str = "무료";

/// Currencies rendered as whole numbers (no decimal places).
const INTEGER_CURRENCIES: &[&str] = &["KRW", "JPY"];

const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("KRW", "₩"),
    ("JPY", "¥"),
    ("EUR", "€"),
    ("GBP", "£"),
];

/// Price value as delivered by an upstream record.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceValue<'a> {
    Number(f64),
    Text(&'a str),
}

/// Format an upstream price into a display string.
///
/// Free flag, absent, zero or unparsable input all yield the free token.
/// A string that already carries a recognized currency symbol is trusted
/// and returned unchanged.
pub fn format_price(value: Option<PriceValue<'_>>, currency: &str, is_free: bool) -> String {
    if is_free {
        return FREE_PRICE_TOKEN.to_string();
    }

    match value {
        None => FREE_PRICE_TOKEN.to_string(),
        Some(PriceValue::Number(amount)) => {
            if !amount.is_finite() || amount <= 0.0 {
                FREE_PRICE_TOKEN.to_string()
            } else {
                format_amount(amount, currency)
            }
        }
        Some(PriceValue::Text(text)) => {
            if CURRENCY_SYMBOLS
                .iter()
                .any(|(_, symbol)| text.contains(symbol))
            {
                return text.to_string();
            }
            match parse_amount(text) {
                Some(amount) if amount > 0.0 => format_amount(amount, currency),
                _ => FREE_PRICE_TOKEN.to_string(),
            }
        }
    }
}

fn symbol_for(currency: &str) -> &str {
    CURRENCY_SYMBOLS
        .iter()
        .find(|(code, _)| *code == currency)
        .map(|(_, symbol)| *symbol)
        .unwrap_or(currency)
}

/// Pull the first numeric substring (thousands separators allowed) out of
/// an arbitrary price string.
fn parse_amount(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let run: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .filter(|c| *c != ',')
        .collect();
    run.parse().ok()
}

fn format_amount(amount: f64, currency: &str) -> String {
    let symbol = symbol_for(currency);
    if INTEGER_CURRENCIES.contains(&currency) {
        let rounded = amount.round() as i64;
        format!("{}{}", symbol, group_thousands(&rounded.to_string()))
    } else {
        let fixed = format!("{:.2}", amount);
        match fixed.split_once('.') {
            Some((int_part, frac)) => format!("{}{}.{}", symbol, group_thousands(int_part), frac),
            None => format!("{}{}", symbol, group_thousands(&fixed)),
        }
    }
}

/// Insert a comma every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
