//! Minimal Kubernetes quantity parsing, enough to order requests against limits.

use std::cmp::Ordering;

use crate::error::{RecommendError, Result};

/// Parse a quantity string into billionths of the base unit.
///
/// Accepts plain decimals, decimal SI suffixes (`n`, `u`, `m`, `k`, `M`, `G`,
/// `T`, `P`, `E`), binary suffixes (`Ki` through `Ei`) and decimal exponents
/// (`1e3`, `5E-1`). Precision finer than one nano is rounded up.
///
/// Examples: "500m" → 500_000_000, "2" → 2_000_000_000, "500000000n" → 500_000_000
pub fn parse_nanos(quantity: &str) -> Result<u128> {
    let invalid = || RecommendError::InvalidQuantity(quantity.to_string());

    let q = quantity.trim();
    let q = q.strip_prefix('+').unwrap_or(q);
    let split = q
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(q.len());
    let (number, suffix) = q.split_at(split);

    let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
    if (whole.is_empty() && frac.is_empty()) || frac.contains('.') {
        return Err(invalid());
    }
    let mantissa: u128 = format!("{whole}{frac}").parse().map_err(|_| invalid())?;

    let (pow10, pow1024): (i32, u32) = match suffix {
        "n" => (-9, 0),
        "u" => (-6, 0),
        "m" => (-3, 0),
        "" => (0, 0),
        "k" => (3, 0),
        "M" => (6, 0),
        "G" => (9, 0),
        "T" => (12, 0),
        "P" => (15, 0),
        "E" => (18, 0),
        "Ki" => (0, 1),
        "Mi" => (0, 2),
        "Gi" => (0, 3),
        "Ti" => (0, 4),
        "Pi" => (0, 5),
        "Ei" => (0, 6),
        other => {
            let exponent = other
                .strip_prefix(|c: char| c == 'e' || c == 'E')
                .and_then(|e| e.parse::<i32>().ok())
                .ok_or_else(invalid)?;
            (exponent, 0)
        }
    };

    let frac_digits = i32::try_from(frac.len()).map_err(|_| invalid())?;
    let exponent = pow10
        .checked_add(9)
        .and_then(|e| e.checked_sub(frac_digits))
        .ok_or_else(invalid)?;

    let value = 1024u128
        .checked_pow(pow1024)
        .and_then(|m| mantissa.checked_mul(m))
        .ok_or_else(invalid)?;

    if exponent >= 0 {
        10u128
            .checked_pow(exponent.unsigned_abs())
            .and_then(|m| value.checked_mul(m))
            .ok_or_else(invalid)
    } else {
        match 10u128.checked_pow(exponent.unsigned_abs()) {
            Some(divisor) => Ok(value.div_ceil(divisor)),
            // anything non-zero this small rounds up to one nano
            None => Ok(u128::from(value > 0)),
        }
    }
}

/// Compare two quantities by magnitude.
pub fn compare(a: &str, b: &str) -> Result<Ordering> {
    Ok(parse_nanos(a)?.cmp(&parse_nanos(b)?))
}
