use loan_core::calculations::common::{round_half_up, to_currency};
use rust_decimal::Decimal;

/// Formats a dollar amount as `$1,234.56`, rounding to cents.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Formats a calculator result. Non-finite values print as `n/a`.
pub fn format_currency_f64(amount: f64) -> String {
    to_currency(amount).map_or_else(|| "n/a".to_string(), format_currency)
}

/// Formats an optional value for display, using "-" when `None` or blank.
pub fn opt_display<T: std::fmt::Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "-".to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_currency(dec!(720000)), "$720,000.00");
    }

    #[test]
    fn format_currency_small_amounts() {
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(999.995)), "$1,000.00");
        assert_eq!(format_currency(dec!(12.5)), "$12.50");
    }

    #[test]
    fn format_currency_negative() {
        assert_eq!(format_currency(dec!(-1500.25)), "-$1,500.25");
    }

    #[test]
    fn format_currency_f64_rounds_to_cents() {
        assert_eq!(format_currency_f64(2144.8425), "$2,144.84");
        assert_eq!(format_currency_f64(1000.0), "$1,000.00");
        assert_eq!(format_currency_f64(f64::NAN), "n/a");
    }

    #[test]
    fn opt_display_handles_none_and_blank() {
        assert_eq!(opt_display(Some(dec!(1.5))), "1.5");
        assert_eq!(opt_display::<Decimal>(None), "-");
        assert_eq!(opt_display(Some("  ")), "-");
    }
}
