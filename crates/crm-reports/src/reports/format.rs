//! Display formatting for currency, counts and percentages.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("'{0}' is not a currency amount")]
    InvalidCurrency(String),
}

/// `$847,250`, `$1,234.5`, `-$12`. At most two fractional digits, trailing zeros dropped.
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let mut out = format!("{sign}${}", group_thousands(whole));
    if fraction != 0 {
        let digits = format!("{fraction:02}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

pub fn format_count(value: u64) -> String {
    group_thousands(value)
}

pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, round_half_away(value, decimals))
}

/// Inverse of [`format_currency`]: strips `$`, separators and whitespace.
pub fn parse_currency(raw: &str) -> Result<f64, FormatError> {
    let trimmed = raw.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let digits: String = rest
        .chars()
        .filter(|ch| *ch != '$' && *ch != ',' && !ch.is_whitespace())
        .collect();

    if digits.is_empty() || digits.starts_with('-') || digits.starts_with('+') {
        return Err(FormatError::InvalidCurrency(raw.to_string()));
    }

    let value = digits
        .parse::<f64>()
        .map_err(|_| FormatError::InvalidCurrency(raw.to_string()))?;

    if !value.is_finite() {
        return Err(FormatError::InvalidCurrency(raw.to_string()));
    }

    Ok(if negative { -value } else { value })
}

/// Rounds to `decimals` places with halves going away from zero.
pub(crate) fn round_half_away(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(847_250.0), "$847,250");
        assert_eq!(format_currency(1_250_000.0), "$1,250,000");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(0.0), "$0");
    }

    #[test]
    fn currency_keeps_significant_cents() {
        assert_eq!(format_currency(1234.5), "$1,234.5");
        assert_eq!(format_currency(1234.567), "$1,234.57");
        assert_eq!(format_currency(-12.0), "-$12");
    }

    #[test]
    fn integral_currency_round_trips() {
        for value in [0.0, 7.0, 1_000.0, 187_500.0, 1_250_000.0, 98_765_432.0] {
            let parsed = parse_currency(&format_currency(value)).expect("parses back");
            assert_eq!(parsed, value);
        }
        assert_eq!(parse_currency("-$12").expect("negative"), -12.0);
    }

    #[test]
    fn parse_currency_rejects_garbage() {
        assert!(parse_currency("").is_err());
        assert!(parse_currency("$").is_err());
        assert!(parse_currency("twelve").is_err());
        assert!(parse_currency("$--5").is_err());
    }

    #[test]
    fn percent_rounds_half_away_from_zero() {
        assert_eq!(format_percent(15.0, 1), "15.0%");
        assert_eq!(format_percent(6.586_270_871, 1), "6.6%");
        assert_eq!(format_percent(24.5, 1), "24.5%");
        assert_eq!(format_percent(-0.25, 1), "-0.3%");
    }

    #[test]
    fn counts_group_thousands() {
        assert_eq!(format_count(2_847), "2,847");
        assert_eq!(format_count(34), "34");
        assert_eq!(format_count(1_000_000), "1,000,000");
    }
}
