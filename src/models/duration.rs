//! Duration parsing from query strings
//!
//! Parses TTLs written as a signed sequence of decimal numbers with unit
//! suffixes, such as `300ms`, `1.5h` or `2h45m`.

use std::time::Duration;

use thiserror::Error;

/// Largest accepted duration, in nanoseconds.
const MAX_NANOS: u128 = i64::MAX as u128;

/// Fraction digits beyond this are truncated.
const MAX_FRACTION_DIGITS: usize = 18;

/// Error type for duration parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DurationParseError {
    #[error("Empty duration string")]
    Empty,

    #[error("Invalid duration: {0}")]
    InvalidFormat(String),

    #[error("Missing unit in duration: {0}")]
    MissingUnit(String),

    #[error("Unknown unit {unit:?} in duration: {input}")]
    UnknownUnit { unit: String, input: String },

    #[error("Duration out of range: {0}")]
    Overflow(String),
}

/// Parse a duration string into a TTL.
///
/// Accepts an optional `+`/`-` sign followed by one or more `<number><unit>`
/// components, where the number may have a fractional part and the unit is
/// one of `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`. The bare string `0` is
/// also accepted.
///
/// Negative durations are valid and clamp to zero, producing an entry that is
/// already expired.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use lru_ttl_cache::models::parse_duration;
///
/// assert_eq!(parse_duration("10ms").unwrap(), Duration::from_millis(10));
/// assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
/// assert_eq!(parse_duration("-5s").unwrap(), Duration::ZERO);
/// ```
pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    if input.is_empty() {
        return Err(DurationParseError::Empty);
    }

    let (negative, mut rest) = match input.as_bytes()[0] {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(DurationParseError::InvalidFormat(input.to_string()));
    }

    // A negative duration may reach one nanosecond further than a positive one
    let limit = if negative { MAX_NANOS + 1 } else { MAX_NANOS };

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (component, after) = parse_component(rest, input)?;
        total = total
            .checked_add(component)
            .filter(|nanos| *nanos <= limit)
            .ok_or_else(|| DurationParseError::Overflow(input.to_string()))?;
        rest = after;
    }

    if negative {
        return Ok(Duration::ZERO);
    }

    // total <= i64::MAX, so it always fits in u64
    Ok(Duration::from_nanos(total as u64))
}

/// Parses one `<number><unit>` component, returning its length in
/// nanoseconds and the unparsed remainder.
fn parse_component<'a>(
    rest: &'a str,
    input: &str,
) -> Result<(u128, &'a str), DurationParseError> {
    let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let (int_part, after) = rest.split_at(int_len);

    let (frac_part, after) = match after.strip_prefix('.') {
        Some(stripped) => {
            let frac_len = stripped.bytes().take_while(u8::is_ascii_digit).count();
            stripped.split_at(frac_len)
        }
        None => ("", after),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(DurationParseError::InvalidFormat(input.to_string()));
    }

    let unit_len = after
        .find(|c: char| c == '.' || c.is_ascii_digit())
        .unwrap_or(after.len());
    let (unit, after) = after.split_at(unit_len);
    if unit.is_empty() {
        return Err(DurationParseError::MissingUnit(input.to_string()));
    }
    let unit_nanos = unit_in_nanos(unit).ok_or_else(|| DurationParseError::UnknownUnit {
        unit: unit.to_string(),
        input: input.to_string(),
    })?;

    let overflow = || DurationParseError::Overflow(input.to_string());

    let whole: u128 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| overflow())?
    };
    let mut nanos = whole.checked_mul(unit_nanos).ok_or_else(overflow)?;

    if !frac_part.is_empty() {
        let digits = &frac_part[..frac_part.len().min(MAX_FRACTION_DIGITS)];
        let numerator: u128 = digits.parse().map_err(|_| overflow())?;
        let scale = 10u128.pow(digits.len() as u32);
        nanos = nanos
            .checked_add(numerator * unit_nanos / scale)
            .ok_or_else(overflow)?;
    }

    Ok((nanos, after))
}

fn unit_in_nanos(unit: &str) -> Option<u128> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        "h" => 3_600 * 1_000_000_000,
        _ => return None,
    };
    Some(nanos)
}
