//! Classification of raw bid text as typed into the bid input.
//!
//! The predicates here are pure and cheap, so callers re-run them on every
//! keystroke rather than tracking transitions.

use serde::Serialize;

/// Largest bid the auction API accepts; it stores amounts as signed 64-bit.
pub const MAX_BID: u64 = i64::MAX as u64;

/// Outcome of classifying the current contents of the bid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum BidValidation {
    Valid,
    InvalidNotInteger,
    InvalidNegative,
    /// Nothing typed yet. Not an error, but not submittable either.
    Empty,
}

/// Why a bid cannot be submitted.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BidRejection {
    #[error("bid must be a whole number")]
    NotInteger,
    #[error("bid must not be negative")]
    Negative,
    #[error("bid is empty")]
    Empty,
    #[error("bid is too large")]
    OutOfRange,
}

/// True when `current_bid` has been typed but is not made up solely of
/// ASCII decimal digits. An empty input is not flagged.
pub fn is_invalid_bid_not_integer(current_bid: &str) -> bool {
    !current_bid.is_empty() && !is_digits(current_bid)
}

/// True when `current_bid` is non-empty and its numeric value is below zero.
///
/// Any input this flags is already rejected by [`is_invalid_bid_not_integer`]
/// because of the leading `-`; it is kept as its own indicator since the two
/// warnings are shown independently.
pub fn is_invalid_bid_negative(current_bid: &str) -> bool {
    !current_bid.is_empty() && coerce_number(current_bid) < 0.0
}

/// True when any bid check fails.
pub fn is_invalid_bid(current_bid: &str) -> bool {
    is_invalid_bid_not_integer(current_bid) || is_invalid_bid_negative(current_bid)
}

/// Whether the submit control should be enabled for `current_bid`.
pub fn can_submit(current_bid: &str) -> bool {
    !is_invalid_bid(current_bid) && !current_bid.is_empty()
}

/// Classify `current_bid`, checking emptiness first, then the integer check,
/// then the negative check.
pub fn classify(current_bid: &str) -> BidValidation {
    if current_bid.is_empty() {
        BidValidation::Empty
    } else if is_invalid_bid_not_integer(current_bid) {
        BidValidation::InvalidNotInteger
    } else if is_invalid_bid_negative(current_bid) {
        BidValidation::InvalidNegative
    } else {
        BidValidation::Valid
    }
}

/// Parse `current_bid` into a bid amount, rejecting anything that would
/// leave the submit control disabled.
pub fn parse_bid(current_bid: &str) -> Result<u64, BidRejection> {
    match classify(current_bid) {
        BidValidation::Empty => Err(BidRejection::Empty),
        BidValidation::InvalidNotInteger => Err(BidRejection::NotInteger),
        BidValidation::InvalidNegative => Err(BidRejection::Negative),
        BidValidation::Valid => current_bid
            .parse::<u64>()
            .ok()
            .filter(|bid| *bid <= MAX_BID)
            .ok_or(BidRejection::OutOfRange),
    }
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Numeric value of `text` under browser string-to-number coercion:
/// surrounding whitespace is ignored, blank text is zero, and anything
/// unparseable is NaN.
fn coerce_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return f64::NAN;
            }
            return u128::from_str_radix(digits, radix)
                .map(|v| v as f64)
                .unwrap_or(f64::INFINITY);
        }
    }

    let (sign, unsigned) = match trimmed.as_bytes()[0] {
        b'-' => (-1.0, &trimmed[1..]),
        b'+' => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };

    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }

    let well_formed = !unsigned.is_empty()
        && !unsigned.starts_with(['+', '-'])
        && unsigned
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !well_formed {
        return f64::NAN;
    }

    unsigned
        .parse::<f64>()
        .map(|v| sign * v)
        .unwrap_or(f64::NAN)
}
