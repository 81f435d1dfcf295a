//! Display formatting for prices and dates.

use jiff::{
    Timestamp,
    tz::{Offset, TimeZone},
};
use rusty_money::{
    Money,
    iso::{self, Currency},
};

/// India Standard Time, UTC+05:30.
const IST_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;

const ORDER_DATE_FORMAT: &str = "%-d %B %Y, %I:%M %P";

/// Whole-unit amount with its currency symbol, e.g. `₹2999`.
pub fn format_money(money: &Money<'_, Currency>) -> String {
    format!("{}{}", money.currency().symbol, money.amount().trunc())
}

/// Whole-rupee amount with the rupee sign, e.g. `₹2999`.
pub fn format_rupees(amount: u64) -> String {
    let major = i64::try_from(amount).unwrap_or(i64::MAX);

    format_money(&Money::from_major(major, iso::INR))
}

/// Order date in Indian Standard Time, e.g. `16 October 2025, 05:30 pm`.
pub fn format_order_date(timestamp: Timestamp) -> String {
    timestamp
        .to_zoned(india_standard_time())
        .strftime(ORDER_DATE_FORMAT)
        .to_string()
}

fn india_standard_time() -> TimeZone {
    TimeZone::fixed(Offset::from_seconds(IST_OFFSET_SECONDS).unwrap_or(Offset::UTC))
}
