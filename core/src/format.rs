//! Display strings for balances. Pure, allocation only.

use crate::types::Cents;

/// `123456` -> `"$1,234.56"`.
pub fn format_cents(cents: Cents) -> String {
    let dollars = cents / 100;
    let rem = cents % 100;
    format!("${}.{rem:02}", group_thousands(dollars))
}

/// Short form for large balances: `$999.99`, `$1.23K`, `$4.50M`,
/// `$7.00B`, `$1.10T`. Truncates, never rounds up past the true value.
pub fn format_compact_cents(cents: Cents) -> String {
    const UNITS: [(u64, &str); 4] = [
        (1_000_000_000_000, "T"),
        (1_000_000_000, "B"),
        (1_000_000, "M"),
        (1_000, "K"),
    ];
    let dollars = cents / 100;
    for (scale, suffix) in UNITS {
        if dollars >= scale {
            let whole = dollars / scale;
            let hundredths = (u128::from(dollars % scale) * 100 / u128::from(scale)) as u64;
            return format!("${whole}.{hundredths:02}{suffix}");
        }
    }
    format_cents(cents)
}

pub fn nostalgia_balance_text(points: u64) -> String {
    if points == 1 {
        "1 nostalgia point".to_string()
    } else {
        format!("{points} nostalgia points")
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_are_grouped() {
        assert_eq!(format_cents(0), "$0.00");
        assert_eq!(format_cents(5), "$0.05");
        assert_eq!(format_cents(123_456), "$1,234.56");
        assert_eq!(format_cents(100_000_000), "$1,000,000.00");
    }

    #[test]
    fn compact_suffixes() {
        assert_eq!(format_compact_cents(99_999), "$999.99");
        assert_eq!(format_compact_cents(123_456), "$1.23K");
        assert_eq!(format_compact_cents(450_000_000), "$4.50M");
        assert_eq!(format_compact_cents(110_000_000_000_000), "$1.10T");
    }

    #[test]
    fn nostalgia_pluralises() {
        assert_eq!(nostalgia_balance_text(0), "0 nostalgia points");
        assert_eq!(nostalgia_balance_text(1), "1 nostalgia point");
        assert_eq!(nostalgia_balance_text(4), "4 nostalgia points");
    }
}
