//! Text formatting for summaries and query results.

use txo_core::{PayoffModel, PositionPair};

const RULE_WIDTH: usize = 60;

/// Formats a number with comma thousands separators.
///
/// # Examples
/// ```
/// use txo_chart::format_thousands;
///
/// assert_eq!(format_thousands(17_150.0, 2), "17,150.00");
/// assert_eq!(format_thousands(-7_500.0, 0), "-7,500");
/// ```
pub fn format_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3 + 1);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let is_zero = raw.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Like [`format_thousands`] but always carries a sign.
pub fn format_signed_thousands(value: f64, decimals: usize) -> String {
    let body = format_thousands(value, decimals);
    if body.starts_with('-') {
        body
    } else {
        format!("+{}", body)
    }
}

/// Index points without a trailing `.0` for whole values.
pub fn format_points(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Trade setup, total premium outlay and breakevens for both legs.
pub fn format_summary(
    pair: &PositionPair,
    model: &PayoffModel,
    breakeven_a: f64,
    breakeven_b: f64,
) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let first = pair.first();
    let second = pair.second();
    [
        rule.clone(),
        format!(
            "Setup: Buy {} | Strike {} | {} lot(s)",
            pair.option_type(),
            format_thousands(pair.strike(), 0),
            pair.lots()
        ),
        rule,
        format!(
            "Monthly total cost: NT${} ({} pts)",
            format_thousands(model.total_cost(first), 0),
            format_points(first.premium())
        ),
        format!(
            "Weekly total cost:  NT${} ({} pts)",
            format_thousands(model.total_cost(second), 0),
            format_points(second.premium())
        ),
        format!("Monthly breakeven:  {} pts", format_thousands(breakeven_a, 2)),
        format!("Weekly breakeven:   {} pts", format_thousands(breakeven_b, 2)),
    ]
    .join("\n")
}

/// One query-loop result row.
pub fn format_settlement_line(settlement: f64, pl_a: f64, pl_b: f64) -> String {
    format!(
        "Settlement {} -> Monthly {} NT$ | Weekly {} NT$",
        format_thousands(settlement, 2),
        format_signed_thousands(pl_a, 0),
        format_signed_thousands(pl_b, 0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use txo_core::{breakeven, OptionType};

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_thousands(0.0, 0), "0");
        assert_eq!(format_thousands(999.0, 0), "999");
        assert_eq!(format_thousands(1_000.0, 0), "1,000");
        assert_eq!(format_thousands(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(format_thousands(-15_000.0, 0), "-15,000");
        assert_eq!(format_thousands(-0.2, 0), "0");
    }

    #[test]
    fn test_signed() {
        assert_eq!(format_signed_thousands(7_500.0, 0), "+7,500");
        assert_eq!(format_signed_thousands(-7_500.0, 0), "-7,500");
        assert_eq!(format_signed_thousands(0.0, 0), "+0");
    }

    #[test]
    fn test_points() {
        assert_eq!(format_points(150.0), "150");
        assert_eq!(format_points(62.5), "62.5");
    }

    #[test]
    fn test_summary_contents() {
        let pair = PositionPair::new(OptionType::Call, 17_000.0, 150.0, 60.0, 2).unwrap();
        let model = PayoffModel::default();
        let text = format_summary(
            &pair,
            &model,
            breakeven(17_000.0, 150.0, OptionType::Call),
            breakeven(17_000.0, 60.0, OptionType::Call),
        );
        assert!(text.contains("Buy Call | Strike 17,000 | 2 lot(s)"));
        assert!(text.contains("NT$15,000 (150 pts)"));
        assert!(text.contains("NT$6,000 (60 pts)"));
        assert!(text.contains("17,150.00 pts"));
        assert!(text.contains("17,060.00 pts"));
    }

    #[test]
    fn test_settlement_line() {
        let line = format_settlement_line(17_300.0, 7_500.0, -3_000.0);
        assert_eq!(
            line,
            "Settlement 17,300.00 -> Monthly +7,500 NT$ | Weekly -3,000 NT$"
        );
    }
}
