//! Core booking evaluation functions.
//!
//! Pure functions - no I/O, no shared state. `evaluate` is cheap enough to
//! run on every form edit for the live price preview.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use super::models::{BookingDraft, BookingEvaluation, SessionDuration, TranslatorOffering};

const MINUTES_PER_HOUR: f64 = 60.0;

/// Evaluate a draft against a translator offering.
///
/// The returned total keeps full `f64` precision; round it only for display
/// with [`display_amount`].
///
/// # Examples
/// ```
/// use tradconnect_booking::booking::{evaluate, BookingDraft, SessionDuration, TranslatorOffering};
///
/// let offering = TranslatorOffering { id: "1".to_string(), price_per_hour: 50.0 };
/// let draft = BookingDraft { duration: SessionDuration::Hour, ..Default::default() };
///
/// let evaluation = evaluate(&draft, &offering);
/// assert_eq!(evaluation.total_price, 50.0);
/// assert!(!evaluation.is_submittable);
/// ```
pub fn evaluate(draft: &BookingDraft, offering: &TranslatorOffering) -> BookingEvaluation {
    BookingEvaluation {
        is_submittable: is_submittable(draft),
        total_price: total_price(draft.duration, offering.price_per_hour),
    }
}

/// Price of a session: hours booked times the hourly rate.
pub fn total_price(duration: SessionDuration, price_per_hour: f64) -> f64 {
    (f64::from(duration.minutes()) / MINUTES_PER_HOUR) * price_per_hour
}

/// A draft can be submitted once both a date and a time slot are chosen.
pub fn is_submittable(draft: &BookingDraft) -> bool {
    draft.date.is_some() && draft.time.is_some()
}

/// Round a price to two decimal places for display (midpoint away from zero).
///
/// Rounds the exact binary value, so a total stored just under a midpoint
/// rounds down. Non-finite input yields zero.
pub fn display_amount(amount: f64) -> Decimal {
    Decimal::from_f64_retain(amount)
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a price with two decimals followed by the currency symbol, e.g. `25.00€`.
pub fn format_price(amount: f64, currency_symbol: &str) -> String {
    let rounded = display_amount(amount);
    format!("{:.2}{}", rounded, currency_symbol)
}

/// Format an hourly rate the way listing cards show it: no trailing zeros.
pub fn format_rate(price_per_hour: f64, currency_symbol: &str) -> String {
    let rate = display_amount(price_per_hour).normalize();
    format!("{}{}/h", rate, currency_symbol)
}

/// One-line breakdown under the total, e.g. `30 minutes à 50€/h`.
pub fn price_summary(duration: SessionDuration, price_per_hour: f64, currency_symbol: &str) -> String {
    format!(
        "{} minutes à {}",
        duration.minutes(),
        format_rate(price_per_hour, currency_symbol)
    )
}
