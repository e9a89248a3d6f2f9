use crate::wei::to_display_amount;
use bigdecimal::{Zero, num_bigint::BigUint};
use num_format::{Grouping, Locale};

/// Localized amount with digit grouping and a token symbol, e.g.
/// `"1,234,567.89 CUMB"`. Non-zero values hidden by `precision` render as
/// `"<0.01 CUMB"`.
pub fn format_amount(
    value: &BigUint,
    decimals: u8,
    precision: u8,
    locale_str: &str,
    symbol: &str,
) -> String {
    let locale = Locale::from_name(locale_str).unwrap_or(Locale::en);
    let plain = to_display_amount(value, decimals, precision);
    let (integer_part, decimal_part) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

    if integer_part == "0" && decimal_part.is_empty() && !value.is_zero() {
        let precision = precision.min(decimals) as usize;
        let smallest = if precision == 0 {
            "1".to_string()
        } else {
            format!("0.{}1", "0".repeat(precision - 1))
        };

        return format!("<{} {}", smallest, symbol);
    }

    let integer_formatted = format_integer_part(integer_part, &locale);
    let result = if decimal_part.is_empty() {
        format!("{} {}", integer_formatted, symbol)
    } else {
        format!("{}.{} {}", integer_formatted, decimal_part, symbol)
    };

    result.replace('\u{a0}', " ")
}

#[inline]
fn format_integer_part(integer_part: &str, locale: &Locale) -> String {
    let separator = locale.separator();

    match locale.grouping() {
        Grouping::Standard => {
            let mut result = String::new();
            let len = integer_part.len();
            for (i, c) in integer_part.chars().enumerate() {
                if i > 0 && (len - i) % 3 == 0 {
                    result.push_str(separator);
                }
                result.push(c);
            }
            result
        }
        Grouping::Indian => format_indian_grouping(integer_part, separator),
        _ => integer_part.to_string(),
    }
}

#[inline]
fn format_indian_grouping(s: &str, separator: &str) -> String {
    let len = s.len();
    if len <= 3 {
        return s.to_string();
    }

    let (remaining, last_three) = s.split_at(len - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = remaining.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&remaining[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(last_three);
    groups.join(separator)
}
