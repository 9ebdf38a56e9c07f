//! Balance rendering: thousands separators plus currency minor-unit
//! precision.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::data::domain::CurrencyCode;

/// Renders `amount` with comma thousands separators and the minor-unit
/// precision of `currency`.
///
/// `1234567.891 USD` -> `"1,234,567.89"`, `-5000 JPY` -> `"-5,000"`.
pub fn format_balance(amount: Decimal, currency: &CurrencyCode) -> String {
    format_amount(amount, currency.decimal_places())
}

/// Renders `amount` rounded (half-up) to `decimal_places`, grouping the
/// integer digits in threes.
pub fn format_amount(amount: Decimal, decimal_places: u32) -> String {
    let rounded = amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    let rendered = format!("{:.*}", decimal_places as usize, rounded);

    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let grouped = group_thousands(int_part);
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
