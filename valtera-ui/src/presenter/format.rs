use rust_decimal::{Decimal, RoundingStrategy};

/// Shown wherever a value cannot be computed (e.g. a ratio over zero).
pub const PLACEHOLDER: &str = "—";

/// Inserts `,` every three digits of a run of ASCII digits.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Builds `$1,234.56` / `-$1,234.56` from an unsigned fixed-point string.
fn assemble_aud(
    negative: bool,
    unsigned: &str,
) -> String {
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    // -0.00 is printed as $0.00
    let is_zero = unsigned.chars().all(|c| c == '0' || c == '.');
    let sign = if negative && !is_zero { "-" } else { "" };

    match frac_part {
        Some(frac) => format!("{sign}${}.{frac}", group_thousands(int_part)),
        None => format!("{sign}${}", group_thousands(int_part)),
    }
}

/// Formats an amount as Australian dollars with exactly `dp` decimal places.
///
/// ```
/// use rust_decimal::Decimal;
/// use valtera_ui::presenter::format::format_aud;
///
/// assert_eq!(format_aud(Decimal::new(7041249, 2), 0), "$70,412");
/// assert_eq!(format_aud(Decimal::new(-150, 1), 2), "-$15.00");
/// ```
pub fn format_aud(
    value: Decimal,
    dp: u32,
) -> String {
    let mut rounded = value
        .abs()
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    assemble_aud(value.is_sign_negative(), &rounded.to_string())
}

/// Floating-point flavour of [`format_aud`]. Non-finite values render as
/// [`PLACEHOLDER`].
pub fn format_aud_f64(
    value: f64,
    dp: u32,
) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let unsigned = format!("{:.*}", dp as usize, value.abs());
    assemble_aud(value < 0.0, &unsigned)
}

/// Formats a fraction as a percentage with at most one decimal place.
///
/// Whole percentages drop the decimal: `0.3` is `30%`, `0.22788` is `22.8%`.
pub fn format_percent(ratio: Decimal) -> String {
    let pct = (ratio * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    // normalize() keeps the sign of a negative zero
    if pct.is_zero() {
        return "0%".to_string();
    }
    format!("{pct}%")
}

/// Floating-point flavour of [`format_percent`]. Non-finite ratios render as
/// [`PLACEHOLDER`].
pub fn format_percent_f64(ratio: f64) -> String {
    if !ratio.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let pct = (ratio * 1000.0).round() / 10.0;
    if pct == 0.0 {
        "0%".to_string()
    } else if pct.fract() == 0.0 {
        format!("{pct:.0}%")
    } else {
        format!("{pct:.1}%")
    }
}

/// Formats an optional fraction, using [`PLACEHOLDER`] when absent.
pub fn opt_percent_display(ratio: Option<Decimal>) -> String {
    ratio
        .map(format_percent)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}
