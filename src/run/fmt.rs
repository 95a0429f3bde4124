use rust_decimal::{Decimal, RoundingStrategy};

/// Money with thousand separators and two decimals, e.g. `-$1,234.50`.
pub(crate) fn format_amount(val: Decimal) -> String {
    let rounded = val
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let formatted = format!("{rounded:.2}");
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let grouped = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let sign = if val < Decimal::ZERO && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{dec_part}")
}

/// Whole-number percentage, or `n/a` when there is nothing to divide by.
pub(crate) fn format_percent(pct: Option<Decimal>) -> String {
    match pct {
        Some(p) => format!(
            "{:.0}%",
            p.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        ),
        None => "n/a".to_string(),
    }
}

/// Cut `s` to at most `max` characters, marking the cut with "…".
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max - 1).collect();
    format!("{kept}…")
}

#[cfg(test)]
#[path = "fmt_tests.rs"]
mod tests;
