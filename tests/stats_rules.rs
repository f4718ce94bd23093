use chrono::{Duration, TimeZone, Utc};
use marketplace_api::{
    dto::admin::StatsPeriod,
    services::admin_service::{average_order_value, percent_change, period_bounds},
};
use rust_decimal::Decimal;

#[test]
fn windows_step_back_by_calendar_period() {
    let now = Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0).unwrap();

    let (previous, start) = period_bounds(StatsPeriod::Week, now);
    assert_eq!(start, now - Duration::days(7));
    assert_eq!(previous, now - Duration::days(14));

    let (previous, start) = period_bounds(StatsPeriod::Month, now);
    assert_eq!(start, Utc.with_ymd_and_hms(2026, 2, 28, 12, 0, 0).unwrap());
    assert_eq!(previous, Utc.with_ymd_and_hms(2026, 1, 28, 12, 0, 0).unwrap());

    let (previous, start) = period_bounds(StatsPeriod::Year, now);
    assert_eq!(start, Utc.with_ymd_and_hms(2025, 3, 31, 12, 0, 0).unwrap());
    assert_eq!(previous, Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap());
}

#[test]
fn default_period_is_month() {
    assert_eq!(StatsPeriod::default(), StatsPeriod::Month);
}

#[test]
fn change_is_whole_percent() {
    assert_eq!(
        percent_change(Decimal::new(150, 0), Decimal::new(100, 0)),
        Decimal::new(50, 0)
    );
    assert_eq!(
        percent_change(Decimal::new(1, 0), Decimal::new(3, 0)),
        Decimal::new(-67, 0)
    );
    assert_eq!(percent_change(Decimal::new(5, 0), Decimal::ZERO), Decimal::ONE_HUNDRED);
    assert_eq!(percent_change(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
}

#[test]
fn average_order_value_handles_empty_windows() {
    assert_eq!(average_order_value(Decimal::new(1000, 2), 0), Decimal::ZERO);
    assert_eq!(
        average_order_value(Decimal::new(1000, 2), 3),
        Decimal::new(333, 2)
    );
}
